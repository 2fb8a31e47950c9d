//! Option Greeks
//!
//! First and second order sensitivities, and the valuation record that pairs
//! them with the model price.

use serde::{Deserialize, Serialize};

/// Option Greeks (sensitivities), all in raw model units
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Greeks {
    /// Delta: dV/dS
    pub delta: f64,
    /// Gamma: d²V/dS²
    pub gamma: f64,
    /// Theta: calendar time decay per year (-dV/dT)
    pub theta: f64,
    /// Vega: dV/dσ per unit of volatility
    pub vega: f64,
    /// Rho: dV/dr per unit of rate
    pub rho: f64,
}

impl Greeks {
    pub fn new(delta: f64, gamma: f64, theta: f64, vega: f64, rho: f64) -> Self {
        Self {
            delta,
            gamma,
            theta,
            vega,
            rho,
        }
    }

    /// Scale Greeks by a factor (e.g. contract multiplier times quantity)
    pub fn scale(&self, factor: f64) -> Self {
        Self {
            delta: self.delta * factor,
            gamma: self.gamma * factor,
            theta: self.theta * factor,
            vega: self.vega * factor,
            rho: self.rho * factor,
        }
    }

    /// Theta expressed per calendar day
    pub fn theta_per_day(&self) -> f64 {
        self.theta / 365.0
    }

    /// Vega for a one vol-point (1%) move
    pub fn vega_per_point(&self) -> f64 {
        self.vega / 100.0
    }
}

/// Price plus Greeks for one option
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Valuation {
    pub price: f64,
    pub greeks: Greeks,
    /// Set when σ√T collapsed and the closed-form limit was used instead
    pub degenerate: bool,
}

impl Valuation {
    pub fn new(price: f64, greeks: Greeks, degenerate: bool) -> Self {
        Self {
            price,
            greeks,
            degenerate,
        }
    }
}
