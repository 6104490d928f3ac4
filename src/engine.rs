//! Facade assembling the full calculation and dashboard pipelines from the
//! individual components. No side effects; callers persist the results.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::aggregation::{self, BusinessTrend};
use crate::alerts::AlertEvaluator;
use crate::benchmark::BenchmarkComparator;
use crate::config::RoimapConfig;
use crate::core::{
    AlertThreshold, BusinessMetric, CalculationStatus, RoiAssumptions, RoiCalculation, RoiInputs,
};
use crate::dashboard::{BusinessDashboard, DashboardBuilder};
use crate::errors::EngineResult;
use crate::risk::{CategoryScores, RiskAssessor, RiskFactor};
use crate::roi::sensitivity::VariableRange;
use crate::roi::{RoiCalculator, SensitivityAnalyzer};

/// Optional risk section of a calculation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskInput {
    pub category_scores: CategoryScores,
    #[serde(default)]
    pub factors: Vec<RiskFactor>,
}

/// Everything needed to compute one workflow's calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationRequest {
    #[serde(default)]
    pub calculation_id: Option<String>,
    pub workflow_id: String,
    pub organization_id: String,
    pub user_id: String,
    pub inputs: RoiInputs,
    #[serde(default)]
    pub assumptions: RoiAssumptions,
    #[serde(default)]
    pub sensitivity_variables: Vec<VariableRange>,
    #[serde(default)]
    pub risk: Option<RiskInput>,
}

/// Compute ROI results plus the requested sensitivity, risk and benchmark
/// analyses, assembled into a draft calculation record.
pub fn compute_roi(
    request: &CalculationRequest,
    config: &RoimapConfig,
) -> EngineResult<RoiCalculation> {
    let calculator = RoiCalculator::new();
    let results = calculator.compute(&request.inputs, &request.assumptions)?;

    let sensitivity = if request.sensitivity_variables.is_empty() {
        None
    } else {
        let analyzer = SensitivityAnalyzer::new(config.sensitivity.clone());
        Some(analyzer.analyze(
            &request.inputs,
            &request.assumptions,
            &request.sensitivity_variables,
        )?)
    };

    let risk = match &request.risk {
        Some(input) => Some(
            RiskAssessor::new(config.risk.clone()).assess(&input.category_scores, &input.factors)?,
        ),
        None => None,
    };

    let comparator =
        BenchmarkComparator::new(config.benchmark.industry.clone(), config.benchmark.margin_pct)?;
    let benchmark = Some(comparator.compare(&results));

    let created_at = Utc::now();
    let id = request
        .calculation_id
        .clone()
        .unwrap_or_else(|| format!("{}-{}", request.workflow_id, created_at.timestamp_millis()));

    Ok(RoiCalculation {
        id,
        workflow_id: request.workflow_id.clone(),
        organization_id: request.organization_id.clone(),
        user_id: request.user_id.clone(),
        inputs: request.inputs.clone(),
        assumptions: request.assumptions.clone(),
        results,
        sensitivity,
        risk,
        benchmark,
        status: CalculationStatus::Draft,
        created_at,
        validation: None,
    })
}

/// Recorded samples plus per-workflow figures for one organization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardRequest {
    pub organization_id: String,
    #[serde(default)]
    pub workflow_metrics: Vec<crate::core::WorkflowMetric>,
    #[serde(default)]
    pub samples: Vec<BusinessMetric>,
    #[serde(default)]
    pub thresholds: Vec<AlertThreshold>,
}

/// Build trends from the recorded samples, run the alert thresholds over
/// each workflow's latest sample, and fold everything into a dashboard.
pub fn build_dashboard(request: &DashboardRequest, config: &RoimapConfig) -> BusinessDashboard {
    let trends = build_trends(&request.samples, config);

    let mut evaluator = AlertEvaluator::new();
    for (key, sample) in latest_samples(&request.samples) {
        for threshold in &request.thresholds {
            if threshold.metric_type == key.0 {
                evaluator.evaluate(&key.1, sample.value, threshold);
            }
        }
    }

    DashboardBuilder::new()
        .with_alerts(evaluator.active_alerts())
        .build(&request.organization_id, &request.workflow_metrics, &trends)
}

fn build_trends(samples: &[BusinessMetric], config: &RoimapConfig) -> Vec<BusinessTrend> {
    let mut types: Vec<_> = samples.iter().map(|s| s.metric_type).collect();
    types.sort();
    types.dedup();

    types
        .into_iter()
        .map(|metric_type| aggregation::build_trend(metric_type, samples, &config.trend))
        .collect()
}

// Most recent sample per (metric type, workflow), in deterministic order
fn latest_samples(
    samples: &[BusinessMetric],
) -> BTreeMap<(crate::core::BusinessMetricType, String), &BusinessMetric> {
    let mut latest: BTreeMap<_, &BusinessMetric> = BTreeMap::new();
    for sample in samples {
        let key = (sample.metric_type, sample.workflow_id.clone());
        let newer = latest
            .get(&key)
            .map_or(true, |existing| sample.recorded_at > existing.recorded_at);
        if newer {
            latest.insert(key, sample);
        }
    }
    latest
}
