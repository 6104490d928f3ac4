// Export modules for library usage
pub mod aggregation;
pub mod alerts;
pub mod benchmark;
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod dashboard;
pub mod engine;
pub mod errors;
pub mod io;
pub mod risk;
pub mod roi;

// Re-export commonly used types
pub use crate::core::{
    AlertSeverity, AlertThreshold, BusinessMetric, BusinessMetricType, CalculationStatus,
    CalculationWarning, MetricValue, PaybackPeriod, PeriodUnit, RoiAssumptions, RoiCalculation,
    RoiInputs, RoiResults, ThresholdOperator, TimeSeriesData, TrainingCosts, TrendDirection,
    ValidationData, WorkflowMetric, YearlyProjection,
};

pub use crate::aggregation::{
    aggregate, aggregate_by_type, build_trend, classify_change, BusinessTrend, MetricAggregation,
};

pub use crate::alerts::{AlertEvaluator, BusinessAlert};

pub use crate::benchmark::{
    BenchmarkComparator, BenchmarkComparison, BenchmarkMetric, ImprovementOpportunity,
    IndustryBenchmarks, MetricComparison,
};

pub use crate::config::{load_config, RoimapConfig};

pub use crate::dashboard::{BusinessDashboard, BusinessSummary, DashboardBuilder};

pub use crate::engine::{
    build_dashboard, compute_roi, CalculationRequest, DashboardRequest, RiskInput,
};

pub use crate::errors::{EngineError, EngineResult};

pub use crate::io::output::{create_writer, OutputFormat, OutputWriter};

pub use crate::risk::{CategoryScores, RiskAssessment, RiskAssessor, RiskFactor};

pub use crate::roi::sensitivity::{
    ImpactTier, InputVariable, SensitivityAnalysis, SensitivityVariable, VariableRange,
};
pub use crate::roi::{internal_rate_of_return, net_present_value, RoiCalculator, SensitivityAnalyzer};
