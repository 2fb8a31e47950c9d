//! Black-Scholes Model
//!
//! Provides:
//! - European option pricing
//! - Greeks computation
//! - Closed-form limits when σ√T collapses to zero
//!
//! These are plain functions over scalars. [`EuropeanOption`](super::EuropeanOption)
//! wraps them with validation and the σ/premium pairing, the batch module maps
//! them over arrays, and the implied volatility solvers call them at trial
//! volatilities.

use super::normal::{norm_cdf, norm_pdf};
use crate::core::{Greeks, OptionType, Valuation};

/// Below this σ√T the closed form is replaced by its limit
pub const DEGENERATE_STD_DEV: f64 = 1e-10;

/// Black-Scholes d1 parameter.
///
/// Split as ln(S/K)/(σ√T) + (r/σ + σ/2)·√T so that σ² never appears and a
/// huge but finite σ cannot overflow.
pub fn d1(spot: f64, strike: f64, rate: f64, vol: f64, time: f64) -> f64 {
    let sqrt_t = time.sqrt();
    (spot / strike).ln() / (vol * sqrt_t) + (rate / vol + 0.5 * vol) * sqrt_t
}

/// Black-Scholes d2 parameter
pub fn d2(spot: f64, strike: f64, rate: f64, vol: f64, time: f64) -> f64 {
    d1(spot, strike, rate, vol, time) - vol * time.sqrt()
}

/// True when the total standard deviation σ√T is too small for the closed form
pub fn is_degenerate(vol: f64, time: f64) -> bool {
    let std_dev = vol * time.sqrt();
    // NaN (negative time) also lands here
    !(std_dev > DEGENERATE_STD_DEV)
}

/// σ√T → 0 limit: intrinsic value against the discounted strike
fn limit_price(spot: f64, strike: f64, rate: f64, time: f64, option_type: OptionType) -> f64 {
    if time <= 0.0 {
        return option_type.intrinsic(spot, strike);
    }
    let df = (-rate * time).exp();
    option_type.intrinsic(spot, strike * df)
}

/// r·K·e^(-rT), taken as zero once the discount factor underflows
fn strike_carry(rate: f64, discounted_strike: f64) -> f64 {
    if discounted_strike == 0.0 {
        0.0
    } else {
        rate * discounted_strike
    }
}

fn limit_greeks(spot: f64, strike: f64, rate: f64, time: f64, option_type: OptionType) -> Greeks {
    let time = time.max(0.0);
    let discounted_strike = if time == 0.0 { strike } else { strike * (-rate * time).exp() };
    let carry = strike_carry(rate, discounted_strike);

    match option_type {
        OptionType::Call if spot > discounted_strike => {
            Greeks::new(1.0, 0.0, -carry, 0.0, time * discounted_strike)
        }
        OptionType::Put if spot < discounted_strike => {
            Greeks::new(-1.0, 0.0, carry, 0.0, -time * discounted_strike)
        }
        _ => Greeks::default(),
    }
}

/// Black-Scholes European option price
pub fn price(spot: f64, strike: f64, rate: f64, vol: f64, time: f64, option_type: OptionType) -> f64 {
    if is_degenerate(vol, time) {
        tracing::warn!(spot, strike, vol, time, "σ√T collapsed, pricing at the intrinsic limit");
        return limit_price(spot, strike, rate, time, option_type);
    }

    let d1 = d1(spot, strike, rate, vol, time);
    let d2 = d1 - vol * time.sqrt();
    let df = (-rate * time).exp();

    match option_type {
        OptionType::Call => spot * norm_cdf(d1) - strike * df * norm_cdf(d2),
        OptionType::Put => strike * df * norm_cdf(-d2) - spot * norm_cdf(-d1),
    }
}

/// Vega (dV/dσ), identical for calls and puts
pub fn vega(spot: f64, strike: f64, rate: f64, vol: f64, time: f64) -> f64 {
    if is_degenerate(vol, time) {
        return 0.0;
    }
    spot * norm_pdf(d1(spot, strike, rate, vol, time)) * time.sqrt()
}

/// Black-Scholes Greeks.
///
/// Inputs are expected finite; an infinite rate is tolerated and discounts the
/// strike terms to zero.
pub fn greeks(spot: f64, strike: f64, rate: f64, vol: f64, time: f64, option_type: OptionType) -> Greeks {
    if is_degenerate(vol, time) {
        tracing::warn!(spot, strike, vol, time, "σ√T collapsed, using limiting Greeks");
        return limit_greeks(spot, strike, rate, time, option_type);
    }

    let sqrt_t = time.sqrt();
    let d1 = d1(spot, strike, rate, vol, time);
    let d2 = d1 - vol * sqrt_t;
    let df = (-rate * time).exp();
    let pdf_d1 = norm_pdf(d1);

    let delta = match option_type {
        OptionType::Call => norm_cdf(d1),
        OptionType::Put => norm_cdf(d1) - 1.0,
    };

    // Gamma and vega are the same for call and put
    let gamma = pdf_d1 / (spot * vol * sqrt_t);
    let vega = spot * pdf_d1 * sqrt_t;

    let decay = -spot * pdf_d1 * vol / (2.0 * sqrt_t);
    let carry = strike_carry(rate, strike * df);
    let theta = match option_type {
        OptionType::Call => decay - carry * norm_cdf(d2),
        OptionType::Put => decay + carry * norm_cdf(-d2),
    };

    let rho = match option_type {
        OptionType::Call => time * strike * df * norm_cdf(d2),
        OptionType::Put => -time * strike * df * norm_cdf(-d2),
    };

    Greeks::new(delta, gamma, theta, vega, rho)
}

/// Price and Greeks in one record
pub fn valuation(
    spot: f64,
    strike: f64,
    rate: f64,
    vol: f64,
    time: f64,
    option_type: OptionType,
) -> Valuation {
    Valuation::new(
        price(spot, strike, rate, vol, time, option_type),
        greeks(spot, strike, rate, vol, time, option_type),
        is_degenerate(vol, time),
    )
}

/// No-arbitrage price bounds `(lower, upper)` for a European option
pub fn price_bounds(spot: f64, strike: f64, rate: f64, time: f64, option_type: OptionType) -> (f64, f64) {
    let discounted_strike = strike * (-rate * time).exp();
    match option_type {
        OptionType::Call => ((spot - discounted_strike).max(0.0), spot),
        OptionType::Put => ((discounted_strike - spot).max(0.0), discounted_strike),
    }
}
