//! Threshold evaluation and alert lifecycle.
//!
//! The evaluator owns the dedup state: at most one unresolved alert exists
//! per `(metric type, workflow)` pair. Re-evaluating while that alert is
//! unresolved updates it in place instead of creating a duplicate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::core::{AlertSeverity, AlertThreshold, BusinessMetricType, ThresholdOperator};
use crate::errors::{EngineError, EngineResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessAlert {
    pub id: String,
    pub metric_type: BusinessMetricType,
    pub workflow_id: String,
    pub severity: AlertSeverity,
    pub current_value: f64,
    pub threshold_value: f64,
    pub operator: ThresholdOperator,
    pub message: String,
    pub acknowledged: bool,
    pub resolved_at: Option<DateTime<Utc>>,
    pub triggered_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BusinessAlert {
    pub fn is_resolved(&self) -> bool {
        self.resolved_at.is_some()
    }
}

#[derive(Debug, Default)]
pub struct AlertEvaluator {
    alerts: Vec<BusinessAlert>,
    /// Index of the unresolved alert per (metric type, workflow) key
    unresolved: HashMap<(BusinessMetricType, String), usize>,
    next_id: u64,
}

impl AlertEvaluator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluate one threshold against a current value. Returns the alert
    /// when the condition holds, either freshly created or the existing
    /// unresolved one updated in place.
    pub fn evaluate(
        &mut self,
        workflow_id: &str,
        current_value: f64,
        threshold: &AlertThreshold,
    ) -> Option<&BusinessAlert> {
        if !threshold.operator.matches(current_value, threshold.value) {
            return None;
        }

        let key = (threshold.metric_type, workflow_id.to_string());
        let now = Utc::now();

        if let Some(&index) = self.unresolved.get(&key) {
            let alert = &mut self.alerts[index];
            alert.current_value = current_value;
            alert.severity = threshold.severity;
            alert.message = alert_message(threshold, current_value);
            alert.updated_at = now;
            log::debug!(
                "updated unresolved alert {} for {} on workflow {}",
                alert.id,
                threshold.metric_type,
                workflow_id
            );
            return Some(&self.alerts[index]);
        }

        self.next_id += 1;
        let alert = BusinessAlert {
            id: format!("alert-{}", self.next_id),
            metric_type: threshold.metric_type,
            workflow_id: workflow_id.to_string(),
            severity: threshold.severity,
            current_value,
            threshold_value: threshold.value,
            operator: threshold.operator,
            message: alert_message(threshold, current_value),
            acknowledged: false,
            resolved_at: None,
            triggered_at: now,
            updated_at: now,
        };
        log::info!("alert {} triggered: {}", alert.id, alert.message);

        self.alerts.push(alert);
        let index = self.alerts.len() - 1;
        self.unresolved.insert(key, index);
        Some(&self.alerts[index])
    }

    /// Operator action: mark an alert as seen.
    pub fn acknowledge(&mut self, id: &str) -> EngineResult<()> {
        let alert = self.find_mut(id)?;
        alert.acknowledged = true;
        Ok(())
    }

    /// Operator action: close an alert. The key becomes free, so the next
    /// matching evaluation creates a fresh alert.
    pub fn resolve(&mut self, id: &str, at: DateTime<Utc>) -> EngineResult<()> {
        let alert = self.find_mut(id)?;
        alert.resolved_at = Some(at);
        let key = (alert.metric_type, alert.workflow_id.clone());
        self.unresolved.remove(&key);
        Ok(())
    }

    pub fn alerts(&self) -> &[BusinessAlert] {
        &self.alerts
    }

    /// Snapshot of the unresolved alerts, for dashboard assembly.
    pub fn active_alerts(&self) -> im::Vector<BusinessAlert> {
        self.alerts
            .iter()
            .filter(|a| !a.is_resolved())
            .cloned()
            .collect()
    }

    fn find_mut(&mut self, id: &str) -> EngineResult<&mut BusinessAlert> {
        self.alerts
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| EngineError::config(format!("unknown alert id: {id}")))
    }
}

fn alert_message(threshold: &AlertThreshold, current_value: f64) -> String {
    format!(
        "{} is {} (threshold: {} {})",
        threshold.metric_type,
        current_value,
        operator_symbol(threshold.operator),
        threshold.value
    )
}

fn operator_symbol(operator: ThresholdOperator) -> &'static str {
    match operator {
        ThresholdOperator::Gt => ">",
        ThresholdOperator::Lt => "<",
        ThresholdOperator::Eq => "==",
        ThresholdOperator::Gte => ">=",
        ThresholdOperator::Lte => "<=",
    }
}
