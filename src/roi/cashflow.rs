//! Discounted cash flow primitives: NPV over a monthly horizon and IRR by
//! bounded bisection.

use crate::core::MetricValue;

/// Bracket for the IRR search, as annual fractional rates.
const IRR_MIN_RATE: f64 = -0.99;
const IRR_MAX_RATE: f64 = 10.0;
const IRR_MAX_ITERATIONS: u32 = 100;
const IRR_NPV_TOLERANCE: f64 = 1e-6;

/// Net present value of a constant monthly cash flow over `months` periods,
/// discounted at `annual_rate / 12` per period, minus the upfront cost.
pub fn net_present_value(
    monthly_cash_flow: f64,
    annual_rate: f64,
    months: u32,
    upfront_cost: f64,
) -> f64 {
    let monthly_rate = annual_rate / 12.0;
    let discounted: f64 = (1..=months)
        .map(|t| monthly_cash_flow / (1.0 + monthly_rate).powi(t as i32))
        .sum();
    discounted - upfront_cost
}

/// The annual rate at which NPV reaches zero, found by bisection over a
/// bounded bracket with a fixed iteration cap. Reported as an annual
/// percentage. When the bracket contains no sign change the rate has no
/// well-defined value and `NonConvergent` is returned.
pub fn internal_rate_of_return(
    monthly_cash_flow: f64,
    months: u32,
    upfront_cost: f64,
) -> MetricValue {
    let npv_at = |rate: f64| net_present_value(monthly_cash_flow, rate, months, upfront_cost);

    let mut lo = IRR_MIN_RATE;
    let mut hi = IRR_MAX_RATE;
    let npv_lo = npv_at(lo);
    let npv_hi = npv_at(hi);

    if npv_lo.abs() < IRR_NPV_TOLERANCE {
        return MetricValue::Converged(lo * 100.0);
    }
    if npv_hi.abs() < IRR_NPV_TOLERANCE {
        return MetricValue::Converged(hi * 100.0);
    }
    if npv_lo.signum() == npv_hi.signum() {
        return MetricValue::NonConvergent;
    }

    let mut mid = (lo + hi) / 2.0;
    for _ in 0..IRR_MAX_ITERATIONS {
        mid = (lo + hi) / 2.0;
        let npv_mid = npv_at(mid);
        if npv_mid.abs() < IRR_NPV_TOLERANCE {
            return MetricValue::Converged(mid * 100.0);
        }
        if npv_mid.signum() == npv_at(lo).signum() {
            lo = mid;
        } else {
            hi = mid;
        }
    }

    // The bracket had a sign change, so the midpoint after the iteration
    // cap is the best bounded estimate.
    MetricValue::Converged(mid * 100.0)
}
