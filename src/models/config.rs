//! Configuration for the root-finders

use serde::{Deserialize, Serialize};

/// Bracketed bisection configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BisectionConfig {
    /// Lower end of the bracket
    /// Default: 1e-6 (volatility must stay positive)
    pub lower: f64,

    /// Upper end of the bracket
    /// Default: 5.0 (500% vol)
    pub upper: f64,

    /// Stop once |f(mid) - target| < tolerance
    /// Default: 1e-6
    pub tolerance: f64,

    /// Iteration budget
    /// Default: 200
    pub max_iterations: usize,

    /// When set, a midpoint is accepted only once the bracket is at most this wide
    /// Default: None (residual alone decides)
    pub step_tolerance: Option<f64>,
}

impl Default for BisectionConfig {
    fn default() -> Self {
        Self {
            lower: 1e-6,
            upper: 5.0,
            tolerance: 1e-6,
            max_iterations: 200,
            step_tolerance: None,
        }
    }
}

impl BisectionConfig {
    /// Same tolerances over a caller-chosen bracket
    pub fn with_bounds(lower: f64, upper: f64) -> Self {
        Self {
            lower,
            upper,
            ..Default::default()
        }
    }
}

/// Implied volatility solver configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Newton seed σ₀
    /// Default: 0.20
    pub initial_guess: f64,

    /// Stop once |price(σ) - premium| < tolerance
    /// Default: 1e-6
    pub tolerance: f64,

    /// Largest σ error accepted: the Newton step |Δσ| must fall below it and
    /// the bisection fallback narrows its bracket to it
    /// Default: 1e-8
    pub vol_tolerance: f64,

    /// Newton iteration budget
    /// Default: 50
    pub max_iterations: usize,

    /// Newton gives up when vega drops below this
    /// Default: 1e-10
    pub min_vega: f64,

    /// Retry with bisection when Newton diverges
    /// Default: true
    pub bisection_fallback: bool,

    /// Bracket and budget for the bisection fallback
    pub bisection: BisectionConfig,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            initial_guess: 0.20,
            tolerance: 1e-6,
            vol_tolerance: 1e-8,
            max_iterations: 50,
            min_vega: 1e-10,
            bisection_fallback: true,
            bisection: BisectionConfig::default(),
        }
    }
}

impl SolverConfig {
    /// Pure Newton: divergence is reported instead of retried
    pub fn newton_only() -> Self {
        Self {
            bisection_fallback: false,
            ..Default::default()
        }
    }

    /// Tight tolerances for calibration-grade inversion
    pub fn precise() -> Self {
        Self {
            tolerance: 1e-10,
            vol_tolerance: 1e-10,
            max_iterations: 100,
            bisection: BisectionConfig {
                tolerance: 1e-10,
                ..Default::default()
            },
            ..Default::default()
        }
    }
}
