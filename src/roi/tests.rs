use super::sensitivity::{ImpactTier, InputVariable, SensitivityAnalyzer, VariableRange};
use super::tests_support::{baseline_inputs, weekly_scenario_inputs};
use super::*;
use crate::core::{CalculationWarning, PeriodUnit};

fn compute(inputs: &RoiInputs) -> RoiResults {
    RoiCalculator::new()
        .compute(inputs, &RoiAssumptions::default())
        .expect("valid inputs compute")
}

fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() < tolerance,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn weekly_scenario_matches_worked_example() {
    let results = compute(&weekly_scenario_inputs());

    assert_close(results.monthly_tasks, 433.33, 0.01);
    assert_close(results.time_saved_per_task_minutes, 55.0, 1e-9);
    assert_close(results.monthly_savings, 9930.56, 0.01);
    assert_close(results.implementation_cost, 4000.0, 1e-9);
    assert_close(
        results.payback_period.months().expect("positive savings"),
        0.40,
        0.005,
    );
    assert!(results.warnings.is_empty());
}

#[test]
fn payback_times_savings_recovers_implementation_cost() {
    let results = compute(&baseline_inputs());
    let months = results.payback_period.months().expect("positive savings");
    let recovered = months * results.monthly_savings;
    let relative = (recovered - results.implementation_cost).abs() / results.implementation_cost;
    assert!(relative < 1e-6, "relative error {relative}");
}

#[test]
fn compute_is_deterministic() {
    let calculator = RoiCalculator::new();
    let inputs = baseline_inputs();
    let assumptions = RoiAssumptions::default();

    let first = calculator.compute(&inputs, &assumptions).unwrap();
    let second = calculator.compute(&inputs, &assumptions).unwrap();
    assert_eq!(first, second);
}

#[test]
fn zero_implementation_cost_yields_non_convergent_roi() {
    let mut inputs = weekly_scenario_inputs();
    inputs.implementation_hours = 0.0;
    inputs.implementation_hourly_rate = 0.0;

    let results = compute(&inputs);
    assert_eq!(results.simple_roi, MetricValue::NonConvergent);
    // Positive savings with zero upfront cost: payback is immediate
    assert_eq!(results.payback_period, PaybackPeriod::Months(0.0));
}

#[test]
fn slower_automation_computes_with_warning() {
    let mut inputs = baseline_inputs();
    inputs.manual_minutes_per_task = 5.0;
    inputs.automated_minutes_per_task = 12.0;

    let results = compute(&inputs);
    assert!(results.time_saved_per_task_minutes < 0.0);
    assert!(results
        .warnings
        .iter()
        .any(|w| matches!(w, CalculationWarning::AutomationSlower { .. })));
    assert_eq!(results.payback_period, PaybackPeriod::Never);
}

#[test]
fn negative_savings_never_pay_back() {
    let mut inputs = baseline_inputs();
    inputs.monthly_software_cost = 100_000.0;

    let results = compute(&inputs);
    assert!(results.monthly_savings < 0.0);
    assert_eq!(results.payback_period, PaybackPeriod::Never);
    assert!(results
        .warnings
        .iter()
        .any(|w| matches!(w, CalculationWarning::NegativeSavings { .. })));
}

#[test]
fn rework_savings_reflect_error_rate_delta() {
    let results = compute(&baseline_inputs());
    // 50 tasks/week * 52/12 * 7 points of error reduction * $25
    let expected = 50.0 * (52.0 / 12.0) * 0.07 * 25.0;
    assert_close(results.monthly_rework_savings, expected, 1e-6);
    assert_eq!(results.error_reduction, MetricValue::Converged(87.5));
}

#[test]
fn zero_manual_error_rate_makes_reduction_non_convergent() {
    let mut inputs = baseline_inputs();
    inputs.manual_error_rate = 0.0;
    inputs.automated_error_rate = 0.0;

    let results = compute(&inputs);
    assert_eq!(results.error_reduction, MetricValue::NonConvergent);
}

#[test]
fn npv_discounting_reduces_undiscounted_total() {
    let results = compute(&baseline_inputs());
    let months = 36.0;
    let undiscounted = results.monthly_savings * months - results.implementation_cost;
    assert!(results.net_present_value < undiscounted);
    assert!(results.net_present_value > 0.0);
}

#[test]
fn irr_converges_for_profitable_workflow() {
    let results = compute(&baseline_inputs());
    let irr = results
        .internal_rate_of_return
        .converged()
        .expect("profitable workflow has an IRR");
    assert!(irr > 0.0);
}

#[test]
fn projections_cover_the_lifespan_and_accumulate() {
    let inputs = baseline_inputs();
    let assumptions = RoiAssumptions {
        growth_rate: 0.1,
        ..RoiAssumptions::default()
    };
    let results = RoiCalculator::new().compute(&inputs, &assumptions).unwrap();

    assert_eq!(results.yearly_projections.len(), 3);
    let first = &results.yearly_projections[0];
    let second = &results.yearly_projections[1];
    assert!(second.savings > first.savings);
    assert_close(
        second.cumulative_net,
        first.cumulative_net + second.net,
        1e-9,
    );
    assert_close(
        first.cumulative_net,
        first.net - results.implementation_cost,
        1e-9,
    );
}

#[test]
fn daily_frequency_scales_to_thirty_days() {
    let mut inputs = weekly_scenario_inputs();
    inputs.task_frequency = PeriodUnit::Daily;
    inputs.tasks_per_period = 10.0;

    let results = compute(&inputs);
    assert_close(results.monthly_tasks, 300.0, 1e-9);
}

#[test]
fn negative_rate_is_rejected_with_field_context() {
    let mut inputs = baseline_inputs();
    inputs.rework_cost_per_error = -5.0;

    let err = RoiCalculator::new()
        .compute(&inputs, &RoiAssumptions::default())
        .unwrap_err();
    assert!(err.is_validation());
    assert!(err.to_string().contains("rework_cost_per_error"));
}

#[test]
fn zero_tasks_per_period_is_rejected() {
    let mut inputs = baseline_inputs();
    inputs.tasks_per_period = 0.0;

    let err = RoiCalculator::new()
        .compute(&inputs, &RoiAssumptions::default())
        .unwrap_err();
    assert!(err.to_string().contains("tasks_per_period"));
}

#[test]
fn non_positive_hourly_rate_is_rejected() {
    let mut inputs = baseline_inputs();
    inputs.employee_hourly_rate = 0.0;

    let err = RoiCalculator::new()
        .compute(&inputs, &RoiAssumptions::default())
        .unwrap_err();
    assert!(err.to_string().contains("employee_hourly_rate"));
}

#[test]
fn error_rate_above_hundred_is_rejected() {
    let mut inputs = baseline_inputs();
    inputs.manual_error_rate = 120.0;

    assert!(RoiCalculator::new()
        .compute(&inputs, &RoiAssumptions::default())
        .is_err());
}

#[test]
fn invalid_assumptions_are_rejected() {
    let inputs = baseline_inputs();

    let zero_discount = RoiAssumptions {
        discount_rate: 0.0,
        ..RoiAssumptions::default()
    };
    assert!(RoiCalculator::new().compute(&inputs, &zero_discount).is_err());

    let zero_lifespan = RoiAssumptions {
        technology_lifespan_years: 0,
        ..RoiAssumptions::default()
    };
    assert!(RoiCalculator::new().compute(&inputs, &zero_lifespan).is_err());
}

#[test]
fn scenario_bounds_are_monotonic() {
    let inputs = baseline_inputs();
    let ranges = vec![
        VariableRange {
            variable: InputVariable::ManualMinutesPerTask,
            min: 20.0,
            max: 45.0,
        },
        VariableRange {
            variable: InputVariable::AutomatedMinutesPerTask,
            min: 2.0,
            max: 10.0,
        },
        VariableRange {
            variable: InputVariable::EmployeeHourlyRate,
            min: 30.0,
            max: 60.0,
        },
        VariableRange {
            variable: InputVariable::ImplementationHours,
            min: 60.0,
            max: 120.0,
        },
    ];

    let analysis = SensitivityAnalyzer::default()
        .analyze(&inputs, &RoiAssumptions::default(), &ranges)
        .unwrap();

    let optimistic = analysis.optimistic.simple_roi.converged().unwrap();
    let most_likely = analysis.most_likely.simple_roi.converged().unwrap();
    let pessimistic = analysis.pessimistic.simple_roi.converged().unwrap();

    assert!(
        optimistic >= most_likely,
        "optimistic {optimistic} < most likely {most_likely}"
    );
    assert!(
        most_likely >= pessimistic,
        "most likely {most_likely} < pessimistic {pessimistic}"
    );
}

#[test]
fn cost_variables_favor_their_lower_bound() {
    let inputs = baseline_inputs();
    let ranges = vec![VariableRange {
        variable: InputVariable::AutomatedMinutesPerTask,
        min: 2.0,
        max: 20.0,
    }];

    let analysis = SensitivityAnalyzer::default()
        .analyze(&inputs, &RoiAssumptions::default(), &ranges)
        .unwrap();

    // Less automated time per task is the favorable direction
    let at_low = RoiCalculator::new()
        .compute(
            &InputVariable::AutomatedMinutesPerTask.with_value(&inputs, 2.0),
            &RoiAssumptions::default(),
        )
        .unwrap();
    assert_eq!(analysis.optimistic, at_low);

    let slope = analysis.variables[0].impact_on_roi.converged().unwrap();
    assert!(slope < 0.0, "more automated minutes must lower ROI");
}

#[test]
fn degenerate_range_has_non_convergent_impact() {
    let inputs = baseline_inputs();
    let ranges = vec![VariableRange {
        variable: InputVariable::EmployeeHourlyRate,
        min: 40.0,
        max: 40.0,
    }];

    let analysis = SensitivityAnalyzer::default()
        .analyze(&inputs, &RoiAssumptions::default(), &ranges)
        .unwrap();

    assert_eq!(
        analysis.variables[0].impact_on_roi,
        MetricValue::NonConvergent
    );
    assert_eq!(analysis.variables[0].impact_tier, ImpactTier::Low);
}

#[test]
fn inverted_range_is_rejected() {
    let inputs = baseline_inputs();
    let ranges = vec![VariableRange {
        variable: InputVariable::EmployeeHourlyRate,
        min: 50.0,
        max: 30.0,
    }];

    let err = SensitivityAnalyzer::default()
        .analyze(&inputs, &RoiAssumptions::default(), &ranges)
        .unwrap_err();
    assert!(err.is_validation());
}

#[test]
fn wide_rate_range_lands_in_a_higher_tier_than_narrow() {
    let inputs = baseline_inputs();
    let wide = vec![VariableRange {
        variable: InputVariable::EmployeeHourlyRate,
        min: 10.0,
        max: 100.0,
    }];
    let narrow = vec![VariableRange {
        variable: InputVariable::EmployeeHourlyRate,
        min: 39.0,
        max: 41.0,
    }];

    let analyzer = SensitivityAnalyzer::default();
    let assumptions = RoiAssumptions::default();
    let wide_tier = analyzer
        .analyze(&inputs, &assumptions, &wide)
        .unwrap()
        .variables[0]
        .impact_tier;
    let narrow_tier = analyzer
        .analyze(&inputs, &assumptions, &narrow)
        .unwrap()
        .variables[0]
        .impact_tier;

    assert_eq!(wide_tier, ImpactTier::High);
    assert_ne!(narrow_tier, ImpactTier::High);
}
