//! Implied volatility solvers
//!
//! Newton-Raphson seeded at σ₀ (default 0.20) with an optional bisection
//! retry over a bounded bracket. Premiums outside the no-arbitrage band are
//! rejected before any iteration, since no positive σ can reproduce them.

use super::black_scholes::{price, price_bounds, vega};
use super::config::{BisectionConfig, SolverConfig};
use super::inversion::bisect;
use crate::core::error::{ensure_finite, ensure_positive};
use crate::core::{OptionType, PricingError, PricingResult};

fn check_inputs(
    market_price: f64,
    spot: f64,
    strike: f64,
    rate: f64,
    time: f64,
    option_type: OptionType,
) -> PricingResult<()> {
    ensure_positive(spot, "spot")?;
    ensure_positive(strike, "strike")?;
    ensure_positive(time, "time to expiry")?;
    ensure_finite(rate, "rate")?;
    ensure_finite(market_price, "premium")?;
    if market_price < 0.0 {
        return Err(PricingError::invalid_input(format!(
            "premium must be non-negative, got {market_price}"
        )));
    }

    let (lower, upper) = price_bounds(spot, strike, rate, time, option_type);
    if market_price <= lower || market_price >= upper {
        return Err(PricingError::implied_volatility(
            format!(
                "{option_type} premium {market_price} outside no-arbitrage bounds ({lower:.6}, {upper:.6})"
            ),
            f64::NAN,
            0,
        ));
    }
    Ok(())
}

/// Newton-Raphson implied volatility.
///
/// An estimate is accepted once the price residual is under `config.tolerance`
/// and the next step |Δσ| is under `config.vol_tolerance`. Deep in or out of
/// the money vega is tiny, and a small residual alone can sit far from the root.
///
/// Fails with [`PricingError::ImpliedVolatility`] when a step leaves the
/// positive axis, vega vanishes, or the budget runs out.
pub fn newton_implied_vol(
    market_price: f64,
    spot: f64,
    strike: f64,
    rate: f64,
    time: f64,
    option_type: OptionType,
    config: &SolverConfig,
) -> PricingResult<f64> {
    check_inputs(market_price, spot, strike, rate, time, option_type)?;
    ensure_positive(config.initial_guess, "initial volatility guess")?;

    let mut vol = config.initial_guess;
    for iteration in 0..config.max_iterations {
        let diff = price(spot, strike, rate, vol, time, option_type) - market_price;
        let vega = vega(spot, strike, rate, vol, time);
        tracing::trace!(iteration, vol, diff, vega, "newton step");

        if vega < config.min_vega {
            return Err(PricingError::implied_volatility(
                format!("vega {vega:e} too small to take a Newton step"),
                vol,
                iteration,
            ));
        }

        let step = diff / vega;
        if diff.abs() < config.tolerance && step.abs() < config.vol_tolerance {
            return Ok(vol);
        }

        let next = vol - step;
        if !next.is_finite() || next <= 0.0 {
            return Err(PricingError::implied_volatility(
                format!("Newton step left the positive volatility axis ({next})"),
                vol,
                iteration + 1,
            ));
        }
        vol = next;
    }

    let diff = price(spot, strike, rate, vol, time, option_type) - market_price;
    let vega = vega(spot, strike, rate, vol, time);
    if diff.abs() < config.tolerance && vega >= config.min_vega && (diff / vega).abs() < config.vol_tolerance {
        return Ok(vol);
    }

    Err(PricingError::implied_volatility(
        format!("Newton did not converge, residual {diff:e}"),
        vol,
        config.max_iterations,
    ))
}

/// Bisection implied volatility over `config.bisection`'s bracket.
///
/// The bracket is narrowed to `config.vol_tolerance` unless
/// `config.bisection.step_tolerance` sets its own width.
pub fn bisection_implied_vol(
    market_price: f64,
    spot: f64,
    strike: f64,
    rate: f64,
    time: f64,
    option_type: OptionType,
    config: &SolverConfig,
) -> PricingResult<f64> {
    check_inputs(market_price, spot, strike, rate, time, option_type)?;

    let bracket = BisectionConfig {
        step_tolerance: config.bisection.step_tolerance.or(Some(config.vol_tolerance)),
        ..config.bisection
    };
    let outcome = bisect(
        |vol| price(spot, strike, rate, vol, time, option_type),
        market_price,
        &bracket,
    )?;
    Ok(outcome.root)
}

/// Implied volatility: Newton first, bisection when Newton diverges and the
/// config allows the retry
pub fn implied_volatility(
    market_price: f64,
    spot: f64,
    strike: f64,
    rate: f64,
    time: f64,
    option_type: OptionType,
    config: &SolverConfig,
) -> PricingResult<f64> {
    let newton = newton_implied_vol(market_price, spot, strike, rate, time, option_type, config);

    let result = match newton {
        Err(err) if config.bisection_fallback && is_divergence(&err) => {
            tracing::debug!(error = %err, "Newton diverged, retrying with bisection");
            bisection_implied_vol(market_price, spot, strike, rate, time, option_type, config)
        }
        other => other,
    };

    if let Err(err) = &result {
        tracing::warn!(
            %option_type, market_price, spot, strike, rate, time,
            error = %err,
            "implied volatility solve failed"
        );
    }
    result
}

/// Divergence is retryable; an arbitrage violation (zero iterations) is not
fn is_divergence(err: &PricingError) -> bool {
    matches!(err, PricingError::ImpliedVolatility { last_estimate, .. } if last_estimate.is_finite())
}
