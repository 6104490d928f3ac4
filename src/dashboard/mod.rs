//! Organization-level dashboard assembly: a pure fold over already-computed
//! per-workflow figures and trends.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::aggregation::BusinessTrend;
use crate::alerts::BusinessAlert;
use crate::core::{MetricValue, TrendDirection, WorkflowMetric};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessSummary {
    pub total_workflows: usize,
    pub total_executions: u64,
    pub total_time_saved_hours: f64,
    pub total_cost_savings: f64,
    /// Success rate weighted by execution count
    pub average_success_rate: f64,
    /// Mean over workflows with a convergent ROI
    pub average_roi: MetricValue,
    pub active_alert_count: usize,
}

/// Disposable snapshot for one organization at one point in time; has no
/// identity beyond `generated_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessDashboard {
    pub organization_id: String,
    pub summary: BusinessSummary,
    pub trends: Vec<BusinessTrend>,
    pub insights: Vec<String>,
    pub recommendations: Vec<String>,
    pub alerts: im::Vector<BusinessAlert>,
    pub generated_at: DateTime<Utc>,
}

#[derive(Default)]
pub struct DashboardBuilder {
    alerts: im::Vector<BusinessAlert>,
}

impl DashboardBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_alerts(mut self, alerts: im::Vector<BusinessAlert>) -> Self {
        self.alerts = alerts;
        self
    }

    pub fn build(
        self,
        organization_id: &str,
        workflow_metrics: &[WorkflowMetric],
        trends: &[BusinessTrend],
    ) -> BusinessDashboard {
        let summary = summarize(workflow_metrics, self.alerts.len());
        let insights = generate_insights(workflow_metrics, trends);
        let recommendations = generate_recommendations(workflow_metrics, trends);

        BusinessDashboard {
            organization_id: organization_id.to_string(),
            summary,
            trends: trends.to_vec(),
            insights,
            recommendations,
            alerts: self.alerts,
            generated_at: Utc::now(),
        }
    }
}

fn summarize(metrics: &[WorkflowMetric], active_alert_count: usize) -> BusinessSummary {
    let total_executions: u64 = metrics.iter().map(|m| m.executions).sum();

    let average_success_rate = if total_executions > 0 {
        metrics
            .iter()
            .map(|m| m.success_rate * m.executions as f64)
            .sum::<f64>()
            / total_executions as f64
    } else if !metrics.is_empty() {
        metrics.iter().map(|m| m.success_rate).sum::<f64>() / metrics.len() as f64
    } else {
        0.0
    };

    let convergent_rois: Vec<f64> = metrics.iter().filter_map(|m| m.roi.converged()).collect();
    let average_roi = if convergent_rois.is_empty() {
        MetricValue::NonConvergent
    } else {
        MetricValue::Converged(convergent_rois.iter().sum::<f64>() / convergent_rois.len() as f64)
    };

    BusinessSummary {
        total_workflows: metrics.len(),
        total_executions,
        total_time_saved_hours: metrics.iter().map(|m| m.time_saved_hours).sum(),
        total_cost_savings: metrics.iter().map(|m| m.cost_savings).sum(),
        average_success_rate,
        average_roi,
        active_alert_count,
    }
}

fn generate_insights(metrics: &[WorkflowMetric], trends: &[BusinessTrend]) -> Vec<String> {
    let mut insights = Vec::new();

    if metrics.is_empty() {
        insights.push("No workflow metrics recorded for this period".to_string());
        return insights;
    }

    if let Some(top) = metrics
        .iter()
        .max_by(|a, b| a.cost_savings.total_cmp(&b.cost_savings))
    {
        insights.push(format!(
            "'{}' delivers the largest savings at {:.0} per month",
            top.name, top.cost_savings
        ));
    }

    if let Some(worst) = metrics
        .iter()
        .filter(|m| m.error_rate > 0.0)
        .max_by(|a, b| a.error_rate.total_cmp(&b.error_rate))
    {
        insights.push(format!(
            "'{}' has the highest error rate at {:.1}%",
            worst.name, worst.error_rate
        ));
    }

    let rising: Vec<&BusinessTrend> = trends
        .iter()
        .filter(|t| t.direction == TrendDirection::Up && t.metric_type.higher_is_better())
        .collect();
    if !rising.is_empty() {
        let names: Vec<&str> = rising.iter().map(|t| t.metric_type.display_name()).collect();
        insights.push(format!("Improving this period: {}", names.join(", ")));
    }

    insights
}

fn generate_recommendations(metrics: &[WorkflowMetric], trends: &[BusinessTrend]) -> Vec<String> {
    let mut recommendations = Vec::new();

    let negative: Vec<&WorkflowMetric> = metrics
        .iter()
        .filter(|m| m.roi.converged().is_some_and(|roi| roi < 0.0))
        .collect();
    if !negative.is_empty() {
        let names: Vec<&str> = negative.iter().map(|m| m.name.as_str()).collect();
        recommendations.push(format!(
            "Review workflows running at a loss: {}",
            names.join(", ")
        ));
    }

    for metric in metrics.iter().filter(|m| m.success_rate < 90.0) {
        recommendations.push(format!(
            "'{}' succeeds only {:.1}% of the time; investigate its failure modes",
            metric.name, metric.success_rate
        ));
    }

    let declining: Vec<&BusinessTrend> = trends
        .iter()
        .filter(|t| {
            (t.direction == TrendDirection::Down && t.metric_type.higher_is_better())
                || (t.direction == TrendDirection::Up && !t.metric_type.higher_is_better())
        })
        .collect();
    if !declining.is_empty() {
        let names: Vec<&str> = declining
            .iter()
            .map(|t| t.metric_type.display_name())
            .collect();
        recommendations.push(format!(
            "Deteriorating this period: {}; review recent workflow changes",
            names.join(", ")
        ));
    }

    recommendations
}
