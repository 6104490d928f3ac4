use chrono::{Duration, TimeZone, Utc};
use roimap::{
    build_dashboard, AlertSeverity, AlertThreshold, BusinessMetric, BusinessMetricType,
    DashboardRequest, MetricValue, RoimapConfig, ThresholdOperator, TrendDirection,
    WorkflowMetric,
};

fn sample(
    metric_type: BusinessMetricType,
    workflow_id: &str,
    value: f64,
    minutes: i64,
) -> BusinessMetric {
    BusinessMetric {
        metric_type,
        workflow_id: workflow_id.to_string(),
        value,
        trend: TrendDirection::Stable,
        confidence: 85.0,
        recorded_at: Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap()
            + Duration::minutes(minutes),
    }
}

fn workflow(workflow_id: &str, name: &str) -> WorkflowMetric {
    WorkflowMetric {
        workflow_id: workflow_id.to_string(),
        name: name.to_string(),
        executions: 500,
        success_rate: 98.0,
        time_saved_hours: 120.0,
        cost_savings: 4_800.0,
        error_rate: 1.5,
        roi: MetricValue::Converged(220.0),
    }
}

fn request() -> DashboardRequest {
    DashboardRequest {
        organization_id: "org-acme".to_string(),
        workflow_metrics: vec![workflow("wf-invoices", "Invoice matching")],
        samples: vec![
            sample(BusinessMetricType::CostSavings, "wf-invoices", 4_200.0, 0),
            sample(BusinessMetricType::CostSavings, "wf-invoices", 4_800.0, 60),
            sample(BusinessMetricType::ErrorRate, "wf-invoices", 4.0, 0),
            sample(BusinessMetricType::ErrorRate, "wf-invoices", 7.0, 60),
        ],
        thresholds: vec![AlertThreshold {
            metric_type: BusinessMetricType::ErrorRate,
            operator: ThresholdOperator::Gt,
            value: 5.0,
            severity: AlertSeverity::Warning,
        }],
    }
}

#[test]
fn dashboard_combines_trends_alerts_and_summary() {
    let dashboard = build_dashboard(&request(), &RoimapConfig::default());

    assert_eq!(dashboard.organization_id, "org-acme");
    assert_eq!(dashboard.summary.total_workflows, 1);
    assert_eq!(dashboard.summary.total_executions, 500);

    // One trend per metric type present in the samples
    assert_eq!(dashboard.trends.len(), 2);
    let cost = dashboard
        .trends
        .iter()
        .find(|t| t.metric_type == BusinessMetricType::CostSavings)
        .unwrap();
    // 4200 -> 4800 is +14.3%
    assert_eq!(cost.direction, TrendDirection::Up);
    assert_eq!(cost.aggregation.count, 2);

    // The latest error rate of 7.0 breaches the gt-5 threshold
    assert_eq!(dashboard.alerts.len(), 1);
    let alert = &dashboard.alerts[0];
    assert_eq!(alert.metric_type, BusinessMetricType::ErrorRate);
    assert_eq!(alert.current_value, 7.0);
    assert_eq!(alert.severity, AlertSeverity::Warning);
    assert_eq!(dashboard.summary.active_alert_count, 1);
}

#[test]
fn threshold_uses_latest_sample_only() {
    let mut req = request();
    // Latest error rate drops back under the threshold
    req.samples
        .push(sample(BusinessMetricType::ErrorRate, "wf-invoices", 3.0, 120));

    let dashboard = build_dashboard(&req, &RoimapConfig::default());
    assert!(dashboard.alerts.is_empty());
}

#[test]
fn empty_request_builds_an_empty_snapshot() {
    let req = DashboardRequest {
        organization_id: "org-empty".to_string(),
        workflow_metrics: vec![],
        samples: vec![],
        thresholds: vec![],
    };
    let dashboard = build_dashboard(&req, &RoimapConfig::default());

    assert_eq!(dashboard.summary.total_workflows, 0);
    assert!(dashboard.trends.is_empty());
    assert!(dashboard.alerts.is_empty());
    assert_eq!(dashboard.summary.average_roi, MetricValue::NonConvergent);
}

#[test]
fn rising_error_rate_drives_a_recommendation() {
    let dashboard = build_dashboard(&request(), &RoimapConfig::default());
    assert!(dashboard
        .recommendations
        .iter()
        .any(|r| r.contains("Error Rate")));
}

#[test]
fn dashboard_serializes_for_the_presentation_layer() {
    let dashboard = build_dashboard(&request(), &RoimapConfig::default());
    let json = serde_json::to_string_pretty(&dashboard).unwrap();
    assert!(json.contains("org-acme"));
    assert!(json.contains("generated_at"));
}
