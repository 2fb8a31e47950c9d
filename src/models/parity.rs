//! Put-call parity
//!
//! C - P = S - K·e^(-rT) ties the six quantities together; given any five,
//! the sixth follows in closed form.

use crate::core::error::{ensure_finite, ensure_positive};
use crate::core::{PricingError, PricingResult};

/// Call premium implied by a put
pub fn call_from_put(spot: f64, put: f64, strike: f64, rate: f64, time: f64) -> f64 {
    spot + put - strike * (-rate * time).exp()
}

/// Put premium implied by a call
pub fn put_from_call(spot: f64, call: f64, strike: f64, rate: f64, time: f64) -> f64 {
    call + strike * (-rate * time).exp() - spot
}

/// Spot implied by a call/put pair
pub fn spot_from_pair(call: f64, put: f64, strike: f64, rate: f64, time: f64) -> f64 {
    call + strike * (-rate * time).exp() - put
}

/// Strike implied by a call/put pair
pub fn strike_from_pair(spot: f64, call: f64, put: f64, rate: f64, time: f64) -> f64 {
    (spot + put - call) * (rate * time).exp()
}

/// ln((S + P - C)/K), the quantity -rT
fn log_discount(spot: f64, call: f64, put: f64, strike: f64) -> PricingResult<f64> {
    ensure_positive(strike, "strike")?;
    let ratio = (spot + put - call) / strike;
    if !ratio.is_finite() || ratio <= 0.0 {
        return Err(PricingError::invalid_input(format!(
            "(S + P - C) / K must be positive, got {ratio}"
        )));
    }
    Ok(ratio.ln())
}

/// Continuously compounded rate implied by a call/put pair
pub fn rate_from_pair(spot: f64, call: f64, put: f64, strike: f64, time: f64) -> PricingResult<f64> {
    ensure_positive(time, "time to expiry")?;
    Ok(-log_discount(spot, call, put, strike)? / time)
}

/// Time to expiry implied by a call/put pair
pub fn time_from_pair(spot: f64, call: f64, put: f64, strike: f64, rate: f64) -> PricingResult<f64> {
    ensure_finite(rate, "rate")?;
    if rate == 0.0 {
        return Err(PricingError::invalid_input("time is not identified by parity when rate is zero"));
    }
    let time = -log_discount(spot, call, put, strike)? / rate;
    if time <= 0.0 {
        return Err(PricingError::invalid_input(format!(
            "call/put pair implies non-positive time {time}"
        )));
    }
    Ok(time)
}
