//! Core ROI calculation: turns one workflow's operational inputs into the
//! full set of derived financial metrics.

pub mod cashflow;
pub mod sensitivity;

#[cfg(test)]
mod tests;

use crate::core::{
    CalculationWarning, MetricValue, PaybackPeriod, RoiAssumptions, RoiInputs, RoiResults,
    YearlyProjection,
};
use crate::errors::{EngineError, EngineResult};

pub use cashflow::{internal_rate_of_return, net_present_value};
pub use sensitivity::{SensitivityAnalysis, SensitivityAnalyzer};

const MINUTES_PER_HOUR: f64 = 60.0;
const MONTHS_PER_YEAR: f64 = 12.0;
const MAX_STRATEGIC_SCORE: f64 = 100.0;

/// Converts raw operational inputs into ROI results. Stateless; every
/// computation is a pure function of its arguments.
#[derive(Debug, Clone, Copy, Default)]
pub struct RoiCalculator;

impl RoiCalculator {
    pub fn new() -> Self {
        Self
    }

    /// Compute the full result set. Validation is all-or-nothing: any
    /// out-of-range input aborts before a single metric is produced.
    pub fn compute(
        &self,
        inputs: &RoiInputs,
        assumptions: &RoiAssumptions,
    ) -> EngineResult<RoiResults> {
        validate_inputs(inputs)?;
        validate_assumptions(assumptions)?;

        let mut warnings = Vec::new();

        let monthly_tasks = inputs.tasks_per_period * inputs.task_frequency.monthly_factor();
        let time_saved_per_task =
            inputs.manual_minutes_per_task - inputs.automated_minutes_per_task;
        if time_saved_per_task < 0.0 {
            warnings.push(CalculationWarning::AutomationSlower {
                minutes_lost_per_task: -time_saved_per_task,
            });
        }

        let monthly_hours_saved = monthly_tasks * time_saved_per_task / MINUTES_PER_HOUR;
        let labor_savings = monthly_hours_saved * inputs.employee_hourly_rate;

        let monthly_rework_savings = monthly_tasks
            * (inputs.manual_error_rate - inputs.automated_error_rate)
            / 100.0
            * inputs.rework_cost_per_error;

        let monthly_operating_cost = inputs.monthly_software_cost + inputs.training.ongoing_monthly;
        let monthly_savings = labor_savings + monthly_rework_savings - monthly_operating_cost;
        if monthly_savings < 0.0 {
            warnings.push(CalculationWarning::NegativeSavings {
                monthly_deficit: -monthly_savings,
            });
        }

        let annual_savings = monthly_savings * MONTHS_PER_YEAR;

        let implementation_cost = inputs.implementation_hours * inputs.implementation_hourly_rate
            + inputs.training.initial_training
            + inputs.training.knowledge_transfer;

        let payback_period = if monthly_savings > 0.0 {
            PaybackPeriod::Months(implementation_cost / monthly_savings)
        } else {
            PaybackPeriod::Never
        };

        let horizon_months = assumptions.technology_lifespan_years * 12;
        let net_present_value = cashflow::net_present_value(
            monthly_savings,
            assumptions.discount_rate,
            horizon_months,
            implementation_cost,
        );
        let internal_rate_of_return =
            cashflow::internal_rate_of_return(monthly_savings, horizon_months, implementation_cost);

        let simple_roi = if implementation_cost > 0.0 {
            MetricValue::Converged(annual_savings / implementation_cost * 100.0)
        } else {
            MetricValue::NonConvergent
        };

        let error_reduction =
            MetricValue::percentage_delta(inputs.manual_error_rate, inputs.automated_error_rate);
        let productivity_increase = MetricValue::percentage_delta(
            inputs.manual_minutes_per_task,
            inputs.automated_minutes_per_task,
        );

        let strategic_value_score = strategic_value(inputs);
        let yearly_projections = project_years(
            labor_savings + monthly_rework_savings,
            monthly_operating_cost,
            implementation_cost,
            inputs,
            assumptions,
        );

        Ok(RoiResults {
            monthly_savings,
            annual_savings,
            implementation_cost,
            monthly_operating_cost,
            payback_period,
            net_present_value,
            internal_rate_of_return,
            simple_roi,
            monthly_tasks,
            time_saved_per_task_minutes: time_saved_per_task,
            monthly_hours_saved,
            annual_hours_saved: monthly_hours_saved * MONTHS_PER_YEAR,
            error_reduction,
            monthly_rework_savings,
            productivity_increase,
            strategic_value_score,
            yearly_projections,
            warnings,
        })
    }
}

// Pure function: qualitative score mean scaled by scalability, capped
fn strategic_value(inputs: &RoiInputs) -> f64 {
    let mean = (inputs.revenue_impact_score + inputs.competitive_advantage_score) / 2.0;
    (mean * inputs.scalability_factor).min(MAX_STRATEGIC_SCORE)
}

// Year-by-year lifespan projection. Value grows with the assumed growth
// rate, recurring costs with inflation; turnover adds a retraining cost
// proportional to the initial training spend.
fn project_years(
    gross_monthly_value: f64,
    monthly_operating_cost: f64,
    implementation_cost: f64,
    inputs: &RoiInputs,
    assumptions: &RoiAssumptions,
) -> Vec<YearlyProjection> {
    let mut cumulative = -implementation_cost;
    (1..=assumptions.technology_lifespan_years)
        .map(|year| {
            let growth = (1.0 + assumptions.growth_rate).powi(year as i32 - 1);
            let inflation = (1.0 + assumptions.inflation_rate).powi(year as i32 - 1);
            let savings = gross_monthly_value * MONTHS_PER_YEAR * growth;
            let operating_cost = monthly_operating_cost * MONTHS_PER_YEAR * inflation
                + assumptions.turnover_rate * inputs.training.initial_training;
            let net = savings - operating_cost;
            cumulative += net;
            YearlyProjection {
                year,
                savings,
                operating_cost,
                net,
                cumulative_net: cumulative,
            }
        })
        .collect()
}

// Pure function: reject a negative rate or count
fn validate_non_negative(field: &str, value: f64) -> EngineResult<()> {
    if value < 0.0 || !value.is_finite() {
        Err(EngineError::validation(
            field,
            value,
            "must be a non-negative number",
        ))
    } else {
        Ok(())
    }
}

// Pure function: reject a value outside [0, 100]
fn validate_percentage(field: &str, value: f64) -> EngineResult<()> {
    if !(0.0..=100.0).contains(&value) {
        Err(EngineError::validation(
            field,
            value,
            "must be a percentage between 0 and 100",
        ))
    } else {
        Ok(())
    }
}

fn validate_inputs(inputs: &RoiInputs) -> EngineResult<()> {
    validate_non_negative("manual_minutes_per_task", inputs.manual_minutes_per_task)?;
    validate_non_negative(
        "automated_minutes_per_task",
        inputs.automated_minutes_per_task,
    )?;
    validate_non_negative("tasks_per_period", inputs.tasks_per_period)?;
    if inputs.tasks_per_period == 0.0 {
        return Err(EngineError::validation(
            "tasks_per_period",
            0.0,
            "must be greater than zero",
        ));
    }
    if inputs.employee_hourly_rate <= 0.0 {
        return Err(EngineError::validation(
            "employee_hourly_rate",
            inputs.employee_hourly_rate,
            "must be greater than zero",
        ));
    }
    validate_non_negative("implementation_hours", inputs.implementation_hours)?;
    validate_non_negative(
        "implementation_hourly_rate",
        inputs.implementation_hourly_rate,
    )?;
    validate_non_negative("monthly_software_cost", inputs.monthly_software_cost)?;
    validate_non_negative("training.initial_training", inputs.training.initial_training)?;
    validate_non_negative(
        "training.knowledge_transfer",
        inputs.training.knowledge_transfer,
    )?;
    validate_non_negative("training.ongoing_monthly", inputs.training.ongoing_monthly)?;
    validate_percentage("manual_error_rate", inputs.manual_error_rate)?;
    validate_percentage("automated_error_rate", inputs.automated_error_rate)?;
    validate_non_negative("rework_cost_per_error", inputs.rework_cost_per_error)?;
    validate_non_negative("scalability_factor", inputs.scalability_factor)?;
    validate_percentage("revenue_impact_score", inputs.revenue_impact_score)?;
    validate_percentage(
        "competitive_advantage_score",
        inputs.competitive_advantage_score,
    )?;
    Ok(())
}

fn validate_assumptions(assumptions: &RoiAssumptions) -> EngineResult<()> {
    if assumptions.discount_rate <= 0.0 {
        return Err(EngineError::validation(
            "discount_rate",
            assumptions.discount_rate,
            "must be greater than zero",
        ));
    }
    if assumptions.technology_lifespan_years == 0 {
        return Err(EngineError::validation(
            "technology_lifespan_years",
            0.0,
            "must be at least one year",
        ));
    }
    validate_non_negative("inflation_rate", assumptions.inflation_rate)?;
    if !(0.0..=1.0).contains(&assumptions.turnover_rate) {
        return Err(EngineError::validation(
            "turnover_rate",
            assumptions.turnover_rate,
            "must be a fraction between 0 and 1",
        ));
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod tests_support {
    use crate::core::{PeriodUnit, RoiInputs, TrainingCosts};

    /// A modest but realistic workflow: 30 minutes manual, 5 automated,
    /// 50 tasks a week at $40/h.
    pub fn baseline_inputs() -> RoiInputs {
        RoiInputs {
            manual_minutes_per_task: 30.0,
            automated_minutes_per_task: 5.0,
            task_frequency: PeriodUnit::Weekly,
            tasks_per_period: 50.0,
            employee_hourly_rate: 40.0,
            implementation_hours: 80.0,
            implementation_hourly_rate: 120.0,
            monthly_software_cost: 200.0,
            training: TrainingCosts {
                initial_training: 1000.0,
                knowledge_transfer: 500.0,
                ongoing_monthly: 50.0,
            },
            manual_error_rate: 8.0,
            automated_error_rate: 1.0,
            rework_cost_per_error: 25.0,
            scalability_factor: 1.2,
            revenue_impact_score: 40.0,
            competitive_advantage_score: 55.0,
        }
    }

    /// The worked weekly scenario: 60 -> 5 minutes, 100 tasks a week at
    /// $25/h, a $4,000 implementation and nothing else.
    pub fn weekly_scenario_inputs() -> RoiInputs {
        RoiInputs {
            manual_minutes_per_task: 60.0,
            automated_minutes_per_task: 5.0,
            task_frequency: PeriodUnit::Weekly,
            tasks_per_period: 100.0,
            employee_hourly_rate: 25.0,
            implementation_hours: 40.0,
            implementation_hourly_rate: 100.0,
            monthly_software_cost: 0.0,
            training: TrainingCosts::default(),
            manual_error_rate: 0.0,
            automated_error_rate: 0.0,
            rework_cost_per_error: 0.0,
            scalability_factor: 1.0,
            revenue_impact_score: 0.0,
            competitive_advantage_score: 0.0,
        }
    }
}
