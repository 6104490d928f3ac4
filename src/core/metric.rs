//! Sentinel-carrying numeric results.
//!
//! Ratio metrics with a zero denominator and root-finding searches without a
//! bracketing sign change have no well-defined numeric answer. Those outcomes
//! are modeled explicitly instead of leaking `NaN`/`Infinity` into results.

use serde::{Deserialize, Serialize};

/// Outcome of a computed metric: a converged number, or an explicit
/// non-convergent marker that downstream consumers can detect and propagate.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum MetricValue {
    Converged(f64),
    NonConvergent,
}

impl MetricValue {
    /// The converged value, if any.
    pub fn converged(&self) -> Option<f64> {
        match self {
            Self::Converged(v) => Some(*v),
            Self::NonConvergent => None,
        }
    }

    pub fn is_convergent(&self) -> bool {
        matches!(self, Self::Converged(_))
    }

    pub fn unwrap_or(&self, default: f64) -> f64 {
        self.converged().unwrap_or(default)
    }

    /// Percentage delta `(baseline - actual) / baseline * 100`, treating a
    /// zero baseline as undefined rather than zero.
    pub fn percentage_delta(baseline: f64, actual: f64) -> Self {
        if baseline == 0.0 {
            Self::NonConvergent
        } else {
            Self::Converged((baseline - actual) / baseline * 100.0)
        }
    }
}

impl From<f64> for MetricValue {
    fn from(value: f64) -> Self {
        Self::Converged(value)
    }
}

/// Payback period for an implementation cost. A calculation that never pays
/// back is a distinct variant, never coerced to infinity or zero.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "months", rename_all = "snake_case")]
pub enum PaybackPeriod {
    Months(f64),
    Never,
}

impl PaybackPeriod {
    pub fn months(&self) -> Option<f64> {
        match self {
            Self::Months(m) => Some(*m),
            Self::Never => None,
        }
    }

    pub fn pays_back(&self) -> bool {
        matches!(self, Self::Months(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_delta_zero_baseline_is_non_convergent() {
        assert_eq!(
            MetricValue::percentage_delta(0.0, 5.0),
            MetricValue::NonConvergent
        );
    }

    #[test]
    fn percentage_delta_reduction() {
        let delta = MetricValue::percentage_delta(10.0, 2.0);
        assert_eq!(delta, MetricValue::Converged(80.0));
    }

    #[test]
    fn serde_round_trip_keeps_sentinel_tagged() {
        let json = serde_json::to_string(&MetricValue::NonConvergent).unwrap();
        assert!(json.contains("non_convergent"));
        let back: MetricValue = serde_json::from_str(&json).unwrap();
        assert_eq!(back, MetricValue::NonConvergent);
    }
}
