//! Common type definitions used across the engine

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unit of the caller-supplied task frequency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodUnit {
    Daily,
    Weekly,
    Monthly,
}

impl PeriodUnit {
    /// Multiplier that normalizes a per-period task count to a monthly count.
    /// Weekly uses 52/12 so that a year of weeks and a year of months agree.
    pub fn monthly_factor(&self) -> f64 {
        match self {
            PeriodUnit::Daily => 30.0,
            PeriodUnit::Weekly => 52.0 / 12.0,
            PeriodUnit::Monthly => 1.0,
        }
    }
}

/// Typed business measurements recorded per workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BusinessMetricType {
    TimeSaved,
    CostSavings,
    ErrorRate,
    ExecutionCount,
    SuccessRate,
    RoiPercentage,
}

impl BusinessMetricType {
    pub fn display_name(&self) -> &str {
        match self {
            BusinessMetricType::TimeSaved => "Time Saved",
            BusinessMetricType::CostSavings => "Cost Savings",
            BusinessMetricType::ErrorRate => "Error Rate",
            BusinessMetricType::ExecutionCount => "Execution Count",
            BusinessMetricType::SuccessRate => "Success Rate",
            BusinessMetricType::RoiPercentage => "ROI Percentage",
        }
    }

    /// Whether a larger value is an improvement for this metric.
    pub fn higher_is_better(&self) -> bool {
        !matches!(self, BusinessMetricType::ErrorRate)
    }
}

impl fmt::Display for BusinessMetricType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Direction of a metric over its most recent observations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Up,
    Down,
    Stable,
}

/// Severity levels for alerts, supplied by the threshold that fired
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertSeverity {
    Info,
    Warning,
    Critical,
}

/// Comparison operators for alert thresholds. `Eq` is exact numeric
/// equality; callers needing tolerance pre-round their values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdOperator {
    Gt,
    Lt,
    Eq,
    Gte,
    Lte,
}

impl ThresholdOperator {
    pub fn matches(&self, current: f64, threshold: f64) -> bool {
        match self {
            ThresholdOperator::Gt => current > threshold,
            ThresholdOperator::Lt => current < threshold,
            ThresholdOperator::Eq => current == threshold,
            ThresholdOperator::Gte => current >= threshold,
            ThresholdOperator::Lte => current <= threshold,
        }
    }
}

/// Lifecycle of an assembled calculation record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculationStatus {
    Draft,
    Validated,
    Published,
    Archived,
}

impl CalculationStatus {
    /// Transitions are forward-only: draft -> validated -> published -> archived.
    pub fn can_transition_to(&self, next: CalculationStatus) -> bool {
        matches!(
            (self, next),
            (CalculationStatus::Draft, CalculationStatus::Validated)
                | (CalculationStatus::Validated, CalculationStatus::Published)
                | (CalculationStatus::Published, CalculationStatus::Archived)
        )
    }
}

impl fmt::Display for CalculationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CalculationStatus::Draft => "draft",
            CalculationStatus::Validated => "validated",
            CalculationStatus::Published => "published",
            CalculationStatus::Archived => "archived",
        };
        f.write_str(s)
    }
}

/// Non-fatal conditions noticed during a calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CalculationWarning {
    /// Automation takes longer per task than the manual process
    AutomationSlower { minutes_lost_per_task: f64 },
    /// Recurring costs exceed the value produced each month
    NegativeSavings { monthly_deficit: f64 },
}

impl fmt::Display for CalculationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalculationWarning::AutomationSlower {
                minutes_lost_per_task,
            } => write!(
                f,
                "automation is {minutes_lost_per_task:.1} minutes slower per task than the manual process"
            ),
            CalculationWarning::NegativeSavings { monthly_deficit } => write!(
                f,
                "recurring costs exceed monthly value by {monthly_deficit:.2}"
            ),
        }
    }
}

/// One-time and recurring training spend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct TrainingCosts {
    #[serde(default)]
    pub initial_training: f64,
    #[serde(default)]
    pub knowledge_transfer: f64,
    #[serde(default)]
    pub ongoing_monthly: f64,
}

/// Raw operational inputs for one workflow.
///
/// All rates and counts must be non-negative; error rates are percentages
/// in `[0, 100]`. Violations are rejected by the calculator before any
/// computation happens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoiInputs {
    // Time costs
    pub manual_minutes_per_task: f64,
    pub automated_minutes_per_task: f64,
    pub task_frequency: PeriodUnit,
    pub tasks_per_period: f64,

    // Monetary costs
    pub employee_hourly_rate: f64,
    #[serde(default)]
    pub implementation_hours: f64,
    #[serde(default)]
    pub implementation_hourly_rate: f64,
    #[serde(default)]
    pub monthly_software_cost: f64,
    #[serde(default)]
    pub training: TrainingCosts,

    // Quality inputs
    #[serde(default)]
    pub manual_error_rate: f64,
    #[serde(default)]
    pub automated_error_rate: f64,
    #[serde(default)]
    pub rework_cost_per_error: f64,

    // Business context
    #[serde(default = "default_scalability")]
    pub scalability_factor: f64,
    #[serde(default)]
    pub revenue_impact_score: f64,
    #[serde(default)]
    pub competitive_advantage_score: f64,
}

fn default_scalability() -> f64 {
    1.0
}

/// Macro parameters used by NPV/IRR and the multi-year projections.
/// Rates are annual fractions (0.08 = 8%).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoiAssumptions {
    #[serde(default = "default_inflation_rate")]
    pub inflation_rate: f64,
    #[serde(default = "default_discount_rate")]
    pub discount_rate: f64,
    #[serde(default)]
    pub growth_rate: f64,
    #[serde(default = "default_lifespan_years")]
    pub technology_lifespan_years: u32,
    #[serde(default)]
    pub turnover_rate: f64,
}

fn default_inflation_rate() -> f64 {
    0.02
}

fn default_discount_rate() -> f64 {
    0.08
}

fn default_lifespan_years() -> u32 {
    3
}

impl Default for RoiAssumptions {
    fn default() -> Self {
        Self {
            inflation_rate: default_inflation_rate(),
            discount_rate: default_discount_rate(),
            growth_rate: 0.0,
            technology_lifespan_years: default_lifespan_years(),
            turnover_rate: 0.0,
        }
    }
}

/// One timestamped sample of a typed measurement for a workflow.
/// Immutable once recorded; superseded, not edited, by later samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessMetric {
    pub metric_type: BusinessMetricType,
    pub workflow_id: String,
    pub value: f64,
    pub trend: TrendDirection,
    /// Confidence in the sample, 0-100
    pub confidence: f64,
    pub recorded_at: DateTime<Utc>,
}

/// Timestamp/value pair inside a trend series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesData {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
}

/// Threshold rule evaluated against a current metric value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertThreshold {
    pub metric_type: BusinessMetricType,
    pub operator: ThresholdOperator,
    pub value: f64,
    pub severity: AlertSeverity,
}

/// Per-workflow dashboard row of already-computed figures
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowMetric {
    pub workflow_id: String,
    pub name: String,
    pub executions: u64,
    /// Fraction of successful executions, 0-100
    pub success_rate: f64,
    pub time_saved_hours: f64,
    pub cost_savings: f64,
    pub error_rate: f64,
    pub roi: crate::core::MetricValue,
}
