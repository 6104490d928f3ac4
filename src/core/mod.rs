pub mod metric;
pub mod types;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::benchmark::BenchmarkComparison;
use crate::errors::{EngineError, EngineResult};
use crate::risk::RiskAssessment;
use crate::roi::sensitivity::SensitivityAnalysis;

pub use metric::{MetricValue, PaybackPeriod};
pub use types::{
    AlertSeverity, AlertThreshold, BusinessMetric, BusinessMetricType, CalculationStatus,
    CalculationWarning, PeriodUnit, RoiAssumptions, RoiInputs, ThresholdOperator, TimeSeriesData,
    TrainingCosts, TrendDirection, WorkflowMetric,
};

/// Full set of derived financial, time, quality and strategic metrics for
/// one workflow. Immutable once computed; a re-calculation produces a new
/// value rather than mutating this one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoiResults {
    // Financial
    pub monthly_savings: f64,
    pub annual_savings: f64,
    pub implementation_cost: f64,
    pub monthly_operating_cost: f64,
    pub payback_period: PaybackPeriod,
    pub net_present_value: f64,
    pub internal_rate_of_return: MetricValue,
    pub simple_roi: MetricValue,

    // Time
    pub monthly_tasks: f64,
    pub time_saved_per_task_minutes: f64,
    pub monthly_hours_saved: f64,
    pub annual_hours_saved: f64,

    // Quality
    pub error_reduction: MetricValue,
    pub monthly_rework_savings: f64,

    // Efficiency and strategy
    pub productivity_increase: MetricValue,
    pub strategic_value_score: f64,

    pub yearly_projections: Vec<YearlyProjection>,
    pub warnings: Vec<CalculationWarning>,
}

/// One year of the lifespan projection. Savings grow with the assumed
/// growth rate while recurring costs grow with inflation; turnover adds a
/// retraining cost each year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlyProjection {
    pub year: u32,
    pub savings: f64,
    pub operating_cost: f64,
    pub net: f64,
    /// Cumulative net over the years so far, minus the implementation cost
    pub cumulative_net: f64,
}

/// Predicted-versus-measured outcomes attached after a measurement period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationData {
    pub measured_monthly_savings: f64,
    pub measured_time_saved_hours: f64,
    pub measurement_period_days: u32,
    /// Measured monthly savings relative to the prediction, as a percentage
    pub variance_pct: MetricValue,
    pub validated_at: DateTime<Utc>,
}

impl ValidationData {
    /// Build validation data from measured outcomes, deriving the variance
    /// against the predicted monthly savings.
    pub fn from_measurement(
        predicted: &RoiResults,
        measured_monthly_savings: f64,
        measured_time_saved_hours: f64,
        measurement_period_days: u32,
        validated_at: DateTime<Utc>,
    ) -> Self {
        let variance_pct = if predicted.monthly_savings == 0.0 {
            MetricValue::NonConvergent
        } else {
            MetricValue::Converged(
                (measured_monthly_savings - predicted.monthly_savings)
                    / predicted.monthly_savings
                    * 100.0,
            )
        };
        Self {
            measured_monthly_savings,
            measured_time_saved_hours,
            measurement_period_days,
            variance_pct,
            validated_at,
        }
    }
}

/// Aggregate root binding one workflow, organization and user to a computed
/// inputs/results/sensitivity/risk bundle.
///
/// Numeric fields are never mutated after creation; the only mutations are
/// lifecycle transitions and attaching validation data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoiCalculation {
    pub id: String,
    pub workflow_id: String,
    pub organization_id: String,
    pub user_id: String,
    pub inputs: RoiInputs,
    pub assumptions: RoiAssumptions,
    pub results: RoiResults,
    pub sensitivity: Option<SensitivityAnalysis>,
    pub risk: Option<RiskAssessment>,
    pub benchmark: Option<BenchmarkComparison>,
    pub status: CalculationStatus,
    pub created_at: DateTime<Utc>,
    pub validation: Option<ValidationData>,
}

impl RoiCalculation {
    /// Advance the lifecycle state. Only forward transitions are allowed.
    pub fn advance_to(&mut self, next: CalculationStatus) -> EngineResult<()> {
        if self.status.can_transition_to(next) {
            self.status = next;
            Ok(())
        } else {
            Err(EngineError::validation(
                "status",
                0.0,
                format!("cannot transition from {} to {next:?}", self.status),
            ))
        }
    }

    /// Attach measured outcomes. Allowed once, on a published calculation.
    pub fn attach_validation(&mut self, data: ValidationData) -> EngineResult<()> {
        if self.status != CalculationStatus::Published {
            return Err(EngineError::validation(
                "status",
                0.0,
                format!(
                    "validation data can only be attached to a published calculation (currently {})",
                    self.status
                ),
            ));
        }
        if self.validation.is_some() {
            return Err(EngineError::validation(
                "validation",
                0.0,
                "validation data is already attached",
            ));
        }
        self.validation = Some(data);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_results() -> RoiResults {
        RoiResults {
            monthly_savings: 1000.0,
            annual_savings: 12000.0,
            implementation_cost: 4000.0,
            monthly_operating_cost: 0.0,
            payback_period: PaybackPeriod::Months(4.0),
            net_present_value: 5000.0,
            internal_rate_of_return: MetricValue::Converged(25.0),
            simple_roi: MetricValue::Converged(300.0),
            monthly_tasks: 100.0,
            time_saved_per_task_minutes: 30.0,
            monthly_hours_saved: 50.0,
            annual_hours_saved: 600.0,
            error_reduction: MetricValue::Converged(50.0),
            monthly_rework_savings: 0.0,
            productivity_increase: MetricValue::Converged(50.0),
            strategic_value_score: 60.0,
            yearly_projections: vec![],
            warnings: vec![],
        }
    }

    fn sample_calculation() -> RoiCalculation {
        RoiCalculation {
            id: "calc-1".to_string(),
            workflow_id: "wf-1".to_string(),
            organization_id: "org-1".to_string(),
            user_id: "user-1".to_string(),
            inputs: crate::roi::tests_support::baseline_inputs(),
            assumptions: RoiAssumptions::default(),
            results: sample_results(),
            sensitivity: None,
            risk: None,
            benchmark: None,
            status: CalculationStatus::Draft,
            created_at: Utc::now(),
            validation: None,
        }
    }

    #[test]
    fn lifecycle_advances_in_order() {
        let mut calc = sample_calculation();
        calc.advance_to(CalculationStatus::Validated).unwrap();
        calc.advance_to(CalculationStatus::Published).unwrap();
        calc.advance_to(CalculationStatus::Archived).unwrap();
        assert_eq!(calc.status, CalculationStatus::Archived);
    }

    #[test]
    fn lifecycle_rejects_skipped_states() {
        let mut calc = sample_calculation();
        let err = calc.advance_to(CalculationStatus::Published).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(calc.status, CalculationStatus::Draft);
    }

    #[test]
    fn validation_data_requires_published_status() {
        let mut calc = sample_calculation();
        let data = ValidationData::from_measurement(&calc.results, 900.0, 45.0, 90, Utc::now());
        assert!(calc.attach_validation(data.clone()).is_err());

        calc.advance_to(CalculationStatus::Validated).unwrap();
        calc.advance_to(CalculationStatus::Published).unwrap();
        calc.attach_validation(data.clone()).unwrap();

        // Second attachment is rejected
        assert!(calc.attach_validation(data).is_err());
    }

    #[test]
    fn variance_against_zero_prediction_is_non_convergent() {
        let mut results = sample_results();
        results.monthly_savings = 0.0;
        let data = ValidationData::from_measurement(&results, 100.0, 1.0, 30, Utc::now());
        assert_eq!(data.variance_pct, MetricValue::NonConvergent);
    }

    #[test]
    fn variance_reflects_measured_shortfall() {
        let results = sample_results();
        let data = ValidationData::from_measurement(&results, 900.0, 45.0, 90, Utc::now());
        assert_eq!(data.variance_pct, MetricValue::Converged(-10.0));
    }
}
