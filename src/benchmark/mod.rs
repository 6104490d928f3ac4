//! Comparison of computed results against fixed industry reference values.
//! Pure lookup and diff; the reference table comes from configuration.

use serde::{Deserialize, Serialize};

use crate::core::{MetricValue, PaybackPeriod, RoiResults};
use crate::errors::{EngineError, EngineResult};

/// Industry reference values, loaded from configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndustryBenchmarks {
    #[serde(default = "default_simple_roi")]
    pub average_simple_roi_pct: f64,

    #[serde(default = "default_payback_months")]
    pub average_payback_months: f64,

    #[serde(default = "default_error_reduction")]
    pub average_error_reduction_pct: f64,

    #[serde(default = "default_monthly_hours_saved")]
    pub average_monthly_hours_saved: f64,
}

fn default_simple_roi() -> f64 {
    150.0
}

fn default_payback_months() -> f64 {
    9.0
}

fn default_error_reduction() -> f64 {
    60.0
}

fn default_monthly_hours_saved() -> f64 {
    40.0
}

impl Default for IndustryBenchmarks {
    fn default() -> Self {
        Self {
            average_simple_roi_pct: default_simple_roi(),
            average_payback_months: default_payback_months(),
            average_error_reduction_pct: default_error_reduction(),
            average_monthly_hours_saved: default_monthly_hours_saved(),
        }
    }
}

impl IndustryBenchmarks {
    pub fn validate(&self) -> Result<(), String> {
        for (value, name) in [
            (self.average_simple_roi_pct, "average_simple_roi_pct"),
            (self.average_payback_months, "average_payback_months"),
            (
                self.average_error_reduction_pct,
                "average_error_reduction_pct",
            ),
            (
                self.average_monthly_hours_saved,
                "average_monthly_hours_saved",
            ),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(format!("benchmark {} must be a positive number", name));
            }
        }
        Ok(())
    }
}

/// Result metrics with an industry reference value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BenchmarkMetric {
    SimpleRoi,
    PaybackMonths,
    ErrorReduction,
    MonthlyHoursSaved,
}

impl BenchmarkMetric {
    pub fn display_name(&self) -> &str {
        match self {
            BenchmarkMetric::SimpleRoi => "Simple ROI",
            BenchmarkMetric::PaybackMonths => "Payback period",
            BenchmarkMetric::ErrorReduction => "Error reduction",
            BenchmarkMetric::MonthlyHoursSaved => "Monthly hours saved",
        }
    }

    /// Payback is the one metric where a smaller value outperforms.
    fn lower_is_better(&self) -> bool {
        matches!(self, BenchmarkMetric::PaybackMonths)
    }
}

/// One metric diffed against its reference value. `delta_pct` is positive
/// when the result outperforms the benchmark.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricComparison {
    pub metric: BenchmarkMetric,
    pub actual: MetricValue,
    pub benchmark: f64,
    pub delta_pct: MetricValue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImprovementOpportunity {
    pub metric: BenchmarkMetric,
    pub actual: MetricValue,
    pub benchmark: f64,
    /// How far behind the benchmark, in percent; non-convergent when the
    /// underlying metric has no numeric value
    pub gap_pct: MetricValue,
    pub suggestion: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkComparison {
    pub comparisons: Vec<MetricComparison>,
    pub improvement_opportunities: Vec<ImprovementOpportunity>,
}

#[derive(Debug)]
pub struct BenchmarkComparator {
    benchmarks: IndustryBenchmarks,
    margin_pct: f64,
}

impl BenchmarkComparator {
    /// Rejects a malformed reference table up front so `compare` stays pure.
    pub fn new(benchmarks: IndustryBenchmarks, margin_pct: f64) -> EngineResult<Self> {
        benchmarks
            .validate()
            .map_err(EngineError::config)?;
        if !(0.0..=100.0).contains(&margin_pct) {
            return Err(EngineError::config(format!(
                "benchmark margin must be between 0 and 100 percent, got {margin_pct}"
            )));
        }
        Ok(Self {
            benchmarks,
            margin_pct,
        })
    }

    pub fn compare(&self, results: &RoiResults) -> BenchmarkComparison {
        let payback = match results.payback_period {
            PaybackPeriod::Months(m) => MetricValue::Converged(m),
            PaybackPeriod::Never => MetricValue::NonConvergent,
        };

        let entries = [
            (
                BenchmarkMetric::SimpleRoi,
                results.simple_roi,
                self.benchmarks.average_simple_roi_pct,
            ),
            (
                BenchmarkMetric::PaybackMonths,
                payback,
                self.benchmarks.average_payback_months,
            ),
            (
                BenchmarkMetric::ErrorReduction,
                results.error_reduction,
                self.benchmarks.average_error_reduction_pct,
            ),
            (
                BenchmarkMetric::MonthlyHoursSaved,
                MetricValue::Converged(results.monthly_hours_saved),
                self.benchmarks.average_monthly_hours_saved,
            ),
        ];

        let comparisons: Vec<MetricComparison> = entries
            .iter()
            .map(|(metric, actual, benchmark)| MetricComparison {
                metric: *metric,
                actual: *actual,
                benchmark: *benchmark,
                delta_pct: delta_pct(*metric, *actual, *benchmark),
            })
            .collect();

        let improvement_opportunities = comparisons
            .iter()
            .filter_map(|c| self.opportunity_for(c))
            .collect();

        BenchmarkComparison {
            comparisons,
            improvement_opportunities,
        }
    }

    fn opportunity_for(&self, comparison: &MetricComparison) -> Option<ImprovementOpportunity> {
        match comparison.delta_pct {
            MetricValue::Converged(delta) if delta < -self.margin_pct => {
                Some(ImprovementOpportunity {
                    metric: comparison.metric,
                    actual: comparison.actual,
                    benchmark: comparison.benchmark,
                    gap_pct: MetricValue::Converged(-delta),
                    suggestion: suggestion_for(comparison.metric, -delta),
                })
            }
            // A payback of "never" is worse than any number the table could
            // hold. Other non-convergent metrics carry no evidence either
            // way and are skipped.
            MetricValue::NonConvergent if comparison.metric == BenchmarkMetric::PaybackMonths => {
                Some(ImprovementOpportunity {
                    metric: comparison.metric,
                    actual: comparison.actual,
                    benchmark: comparison.benchmark,
                    gap_pct: MetricValue::NonConvergent,
                    suggestion: "Savings never recover the implementation cost; reduce recurring costs or raise task volume"
                        .to_string(),
                })
            }
            _ => None,
        }
    }
}

// Positive when outperforming. Payback inverts since lower is better.
fn delta_pct(metric: BenchmarkMetric, actual: MetricValue, benchmark: f64) -> MetricValue {
    let actual = match actual.converged() {
        Some(v) => v,
        None => return MetricValue::NonConvergent,
    };
    let delta = if metric.lower_is_better() {
        (benchmark - actual) / benchmark * 100.0
    } else {
        (actual - benchmark) / benchmark * 100.0
    };
    MetricValue::Converged(delta)
}

fn suggestion_for(metric: BenchmarkMetric, gap: f64) -> String {
    match metric {
        BenchmarkMetric::SimpleRoi => format!(
            "ROI trails the industry average by {gap:.0}%; revisit recurring costs or widen the automated scope"
        ),
        BenchmarkMetric::PaybackMonths => format!(
            "Payback is {gap:.0}% slower than the industry average; consider phasing the implementation"
        ),
        BenchmarkMetric::ErrorReduction => format!(
            "Error reduction trails the industry average by {gap:.0}%; review the automated failure modes"
        ),
        BenchmarkMetric::MonthlyHoursSaved => format!(
            "Hours saved trail the industry average by {gap:.0}%; target higher-volume workflows first"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RoiAssumptions;
    use crate::roi::tests_support::{baseline_inputs, weekly_scenario_inputs};
    use crate::roi::RoiCalculator;

    fn comparator() -> BenchmarkComparator {
        BenchmarkComparator::new(IndustryBenchmarks::default(), 10.0).unwrap()
    }

    #[test]
    fn outperforming_results_produce_no_opportunities() {
        let results = RoiCalculator::new()
            .compute(&weekly_scenario_inputs(), &RoiAssumptions::default())
            .unwrap();
        let comparison = comparator().compare(&results);

        // Payback of 0.4 months and ~400 hours/month crush the averages
        assert!(comparison.improvement_opportunities.is_empty());
        assert_eq!(comparison.comparisons.len(), 4);
    }

    #[test]
    fn underperformance_beyond_margin_is_reported() {
        let mut inputs = baseline_inputs();
        // Shrink the workflow so hours saved fall far below the average
        inputs.tasks_per_period = 2.0;
        inputs.implementation_hours = 10.0;
        let results = RoiCalculator::new()
            .compute(&inputs, &RoiAssumptions::default())
            .unwrap();

        let comparison = comparator().compare(&results);
        assert!(comparison
            .improvement_opportunities
            .iter()
            .any(|o| o.metric == BenchmarkMetric::MonthlyHoursSaved));
    }

    #[test]
    fn never_payback_is_flagged_as_unmeasurable() {
        let mut inputs = baseline_inputs();
        inputs.monthly_software_cost = 100_000.0;
        let results = RoiCalculator::new()
            .compute(&inputs, &RoiAssumptions::default())
            .unwrap();

        let comparison = comparator().compare(&results);
        let opportunity = comparison
            .improvement_opportunities
            .iter()
            .find(|o| o.metric == BenchmarkMetric::PaybackMonths)
            .expect("payback opportunity");
        assert_eq!(opportunity.gap_pct, MetricValue::NonConvergent);
    }

    #[test]
    fn payback_delta_is_positive_when_faster() {
        let delta = delta_pct(
            BenchmarkMetric::PaybackMonths,
            MetricValue::Converged(4.5),
            9.0,
        );
        assert_eq!(delta, MetricValue::Converged(50.0));
    }

    #[test]
    fn malformed_benchmarks_are_a_configuration_error() {
        let benchmarks = IndustryBenchmarks {
            average_payback_months: f64::NAN,
            ..IndustryBenchmarks::default()
        };
        let err = BenchmarkComparator::new(benchmarks, 10.0).unwrap_err();
        assert!(matches!(err, EngineError::Configuration { .. }));
    }

    #[test]
    fn margin_outside_range_is_rejected() {
        let err = BenchmarkComparator::new(IndustryBenchmarks::default(), 150.0).unwrap_err();
        assert!(matches!(err, EngineError::Configuration { .. }));
    }
}
