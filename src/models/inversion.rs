//! Bracketed inversion
//!
//! Backs out whichever input reproduces a target output: T or r from an
//! observed price, the spot at which delta hits 0.5, and so on. The search is an
//! iterative bisection with an explicit counter, so its depth is bounded by the
//! configured budget.

use serde::{Deserialize, Serialize};

use super::config::BisectionConfig;
use super::option::EuropeanOption;
use crate::core::{PricingError, PricingResult};

/// Result of a converged bisection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BisectionOutcome {
    /// Argument that reproduces the target
    pub root: f64,
    /// f(root) - target
    pub residual: f64,
    pub iterations: usize,
}

/// Find `x` in `[config.lower, config.upper]` with `|f(x) - target| < config.tolerance`.
///
/// With `config.step_tolerance` set, `x` must also sit in a bracket no wider
/// than that. `f` must be continuous on the bracket. Fails when
/// `f(lower) - target` and `f(upper) - target` share a sign, or when the
/// budget runs out first.
pub fn bisect<F>(f: F, target: f64, config: &BisectionConfig) -> PricingResult<BisectionOutcome>
where
    F: Fn(f64) -> f64,
{
    let (mut lo, mut hi) = (config.lower, config.upper);
    if !lo.is_finite() || !hi.is_finite() || lo >= hi {
        return Err(PricingError::invalid_input(format!(
            "bisection bracket must satisfy lower < upper, got [{lo}, {hi}]"
        )));
    }
    if !target.is_finite() {
        return Err(PricingError::invalid_input(format!("target must be finite, got {target}")));
    }

    let residual = |x: f64| -> PricingResult<f64> {
        let value = f(x) - target;
        if value.is_finite() {
            Ok(value)
        } else {
            Err(PricingError::numerical(format!("objective is not finite at {x}")))
        }
    };

    let converged = |g: f64, width: f64| {
        g.abs() < config.tolerance && config.step_tolerance.map_or(true, |step| width <= step)
    };

    let mut g_lo = residual(lo)?;
    if g_lo == 0.0 || converged(g_lo, hi - lo) {
        return Ok(BisectionOutcome { root: lo, residual: g_lo, iterations: 0 });
    }
    let g_hi = residual(hi)?;
    if g_hi == 0.0 || converged(g_hi, hi - lo) {
        return Ok(BisectionOutcome { root: hi, residual: g_hi, iterations: 0 });
    }
    if g_lo.signum() == g_hi.signum() {
        return Err(PricingError::implied_volatility(
            format!("target {target} is not bracketed by [{lo}, {hi}]"),
            0.5 * (lo + hi),
            0,
        ));
    }

    let mut mid = 0.5 * (lo + hi);
    for iteration in 1..=config.max_iterations {
        mid = 0.5 * (lo + hi);
        let g_mid = residual(mid)?;
        tracing::trace!(iteration, mid, residual = g_mid, "bisection step");

        if g_mid == 0.0 || converged(g_mid, hi - lo) {
            return Ok(BisectionOutcome { root: mid, residual: g_mid, iterations: iteration });
        }

        if g_mid.signum() == g_lo.signum() {
            lo = mid;
            g_lo = g_mid;
        } else {
            hi = mid;
        }
    }

    Err(PricingError::implied_volatility(
        format!("bisection did not reach tolerance {} within budget", config.tolerance),
        mid,
        config.max_iterations,
    ))
}

/// Model input that can be varied during an inversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Parameter {
    Spot,
    Strike,
    Time,
    Rate,
    Volatility,
}

impl Parameter {
    /// Spot, strike, time and volatility must stay strictly positive
    pub fn requires_positive(&self) -> bool {
        !matches!(self, Parameter::Rate)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Parameter::Spot => "spot",
            Parameter::Strike => "strike",
            Parameter::Time => "time",
            Parameter::Rate => "rate",
            Parameter::Volatility => "volatility",
        }
    }
}

/// Model output an inversion can target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Price,
    Delta,
    Gamma,
    Theta,
    Vega,
    Rho,
}

impl Metric {
    pub fn evaluate(&self, option: &EuropeanOption) -> f64 {
        match self {
            Metric::Price => option.price(),
            Metric::Delta => option.delta(),
            Metric::Gamma => option.gamma(),
            Metric::Theta => option.theta(),
            Metric::Vega => option.vega(),
            Metric::Rho => option.rho(),
        }
    }
}
