//! Statistical summaries over numeric time series.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::config::TrendThresholds;
use crate::core::{BusinessMetric, BusinessMetricType, TimeSeriesData, TrendDirection};

/// Summary statistics for one numeric series. An empty series yields the
/// all-zero aggregation with `count == 0`; callers must check `count`
/// before treating `average` or the percentiles as meaningful.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct MetricAggregation {
    pub sum: f64,
    pub count: usize,
    pub average: f64,
    pub min: f64,
    pub max: f64,
    pub std_dev: f64,
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
    pub p90: f64,
    pub p95: f64,
}

/// Direction and recent history of one metric for one scope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessTrend {
    pub metric_type: BusinessMetricType,
    pub direction: TrendDirection,
    /// Percentage change between the two most recent points
    pub change_pct: f64,
    pub points: Vec<TimeSeriesData>,
    pub aggregation: MetricAggregation,
}

pub fn aggregate(series: &[f64]) -> MetricAggregation {
    if series.is_empty() {
        return MetricAggregation::default();
    }

    let count = series.len();
    let sum: f64 = series.iter().sum();
    let average = sum / count as f64;

    let variance = series
        .iter()
        .map(|v| {
            let diff = v - average;
            diff * diff
        })
        .sum::<f64>()
        / count as f64;

    let mut sorted = series.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    MetricAggregation {
        sum,
        count,
        average,
        min: sorted[0],
        max: sorted[count - 1],
        std_dev: variance.sqrt(),
        p25: percentile(&sorted, 25.0),
        p50: percentile(&sorted, 50.0),
        p75: percentile(&sorted, 75.0),
        p90: percentile(&sorted, 90.0),
        p95: percentile(&sorted, 95.0),
    }
}

// Nearest-rank with linear interpolation between adjacent ranks on an
// ascending-sorted slice: index = p/100 * (n-1).
fn percentile(sorted: &[f64], p: f64) -> f64 {
    let index = p / 100.0 * (sorted.len() - 1) as f64;
    let lower = index.floor() as usize;
    let upper = index.ceil() as usize;
    if lower == upper {
        return sorted[lower];
    }
    let fraction = index - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
}

/// Classify a percentage change against the configured cutoffs.
pub fn classify_change(change_pct: f64, thresholds: &TrendThresholds) -> TrendDirection {
    if change_pct > thresholds.up_pct {
        TrendDirection::Up
    } else if change_pct < thresholds.down_pct {
        TrendDirection::Down
    } else {
        TrendDirection::Stable
    }
}

/// Build the trend for one metric type from its samples. Samples are
/// ordered by timestamp; direction comes from the percentage change between
/// the two most recent points. Fewer than two points, or a zero previous
/// value, classify as stable since no percentage change is defined.
pub fn build_trend(
    metric_type: BusinessMetricType,
    samples: &[BusinessMetric],
    thresholds: &TrendThresholds,
) -> BusinessTrend {
    let mut points: Vec<TimeSeriesData> = samples
        .iter()
        .filter(|m| m.metric_type == metric_type)
        .map(|m| TimeSeriesData {
            timestamp: m.recorded_at,
            value: m.value,
        })
        .collect();
    points.sort_by_key(|p| p.timestamp);

    let values: Vec<f64> = points.iter().map(|p| p.value).collect();
    let aggregation = aggregate(&values);

    let change_pct = match values.as_slice() {
        [.., previous, latest] if *previous != 0.0 => (latest - previous) / previous * 100.0,
        _ => 0.0,
    };

    BusinessTrend {
        metric_type,
        direction: classify_change(change_pct, thresholds),
        change_pct,
        points,
        aggregation,
    }
}

/// Aggregate every metric type present in the samples. The per-type folds
/// are independent, so they run in parallel.
pub fn aggregate_by_type(
    samples: &[BusinessMetric],
) -> HashMap<BusinessMetricType, MetricAggregation> {
    let mut grouped: HashMap<BusinessMetricType, Vec<f64>> = HashMap::new();
    for sample in samples {
        grouped
            .entry(sample.metric_type)
            .or_default()
            .push(sample.value);
    }

    grouped
        .into_par_iter()
        .map(|(metric_type, values)| (metric_type, aggregate(&values)))
        .collect()
}
