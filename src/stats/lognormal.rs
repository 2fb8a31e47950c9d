//! Lognormal terminal distribution
//!
//! Under geometric Brownian motion with drift μ and volatility σ,
//!
//! S(T) = S·exp((μ - σ²/2)T + σ√T·Z),  Z ~ N(0, 1)
//!
//! so ln S(T) ~ N(m, s²) with m = ln S + (μ - σ²/2)T and s = σ√T.

use rand::Rng;
use rand_distr::{Distribution, StandardNormal};
use serde::Serialize;
use std::f64::consts::SQRT_2;

use statrs::distribution::{ContinuousCDF, LogNormal};
use statrs::function::erf::erfc_inv;

use crate::core::error::{ensure_finite, ensure_positive};
use crate::core::{PricingError, PricingResult};

/// Distribution of the underlying at a horizon
#[derive(Debug, Clone, Serialize)]
pub struct TerminalDistribution {
    pub spot: f64,
    pub drift: f64,
    pub vol: f64,
    pub time: f64,
    #[serde(skip)]
    dist: LogNormal,
}

impl TerminalDistribution {
    pub fn new(spot: f64, drift: f64, vol: f64, time: f64) -> PricingResult<Self> {
        ensure_positive(spot, "spot")?;
        ensure_finite(drift, "drift")?;
        ensure_positive(vol, "volatility")?;
        ensure_positive(time, "time")?;

        let location = spot.ln() + (drift - 0.5 * vol * vol) * time;
        let scale = vol * time.sqrt();
        let dist = LogNormal::new(location, scale)
            .map_err(|e| PricingError::invalid_input(format!("lognormal parameters: {e}")))?;

        Ok(Self {
            spot,
            drift,
            vol,
            time,
            dist,
        })
    }

    /// m: mean of ln S(T)
    pub fn location(&self) -> f64 {
        self.spot.ln() + (self.drift - 0.5 * self.vol * self.vol) * self.time
    }

    /// s: standard deviation of ln S(T)
    pub fn scale(&self) -> f64 {
        self.vol * self.time.sqrt()
    }

    /// E[S(T)] = S·e^(μT)
    pub fn mean(&self) -> f64 {
        self.spot * (self.drift * self.time).exp()
    }

    pub fn median(&self) -> f64 {
        self.location().exp()
    }

    /// Most likely value, e^(m - s²)
    pub fn mode(&self) -> f64 {
        let s = self.scale();
        (self.location() - s * s).exp()
    }

    pub fn variance(&self) -> f64 {
        let s = self.scale();
        self.mean().powi(2) * ((s * s).exp() - 1.0)
    }

    /// P(S(T) <= x)
    pub fn cdf(&self, x: f64) -> f64 {
        if x <= 0.0 {
            return 0.0;
        }
        self.dist.cdf(x)
    }

    /// P(S(T) > x)
    pub fn probability_above(&self, x: f64) -> f64 {
        1.0 - self.cdf(x)
    }

    /// Inverse CDF for p in (0, 1)
    pub fn quantile(&self, p: f64) -> PricingResult<f64> {
        if !(p > 0.0 && p < 1.0) {
            return Err(PricingError::invalid_input(format!(
                "quantile probability must lie in (0, 1), got {p}"
            )));
        }
        let z = -SQRT_2 * erfc_inv(2.0 * p);
        Ok((self.location() + self.scale() * z).exp())
    }
}

/// Simulate a GBM path with exact log-space steps. Returns `steps + 1` prices
/// starting at `spot`.
pub fn simulate_gbm_path<R: Rng + ?Sized>(
    spot: f64,
    drift: f64,
    vol: f64,
    dt: f64,
    steps: usize,
    rng: &mut R,
) -> PricingResult<Vec<f64>> {
    ensure_positive(spot, "spot")?;
    ensure_finite(drift, "drift")?;
    ensure_positive(vol, "volatility")?;
    ensure_positive(dt, "time step")?;

    let step_drift = (drift - 0.5 * vol * vol) * dt;
    let step_vol = vol * dt.sqrt();

    let mut path = Vec::with_capacity(steps + 1);
    let mut s = spot;
    path.push(s);
    for _ in 0..steps {
        let z: f64 = Distribution::<f64>::sample(&StandardNormal, rng);
        s *= (step_drift + step_vol * z).exp();
        path.push(s);
    }
    Ok(path)
}
