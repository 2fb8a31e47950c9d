//! Historical volatility
//!
//! Mean and volatility of log-returns from a close-price series, annualised
//! by the sampling frequency. The σ estimate is the usual input to
//! [`EuropeanOption::with_volatility`](crate::models::EuropeanOption::with_volatility)
//! when no market premium is available.

use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

use crate::core::{PricingError, PricingResult};

/// Sampling frequency of daily closes
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

fn validate_prices(prices: &[f64]) -> PricingResult<()> {
    if let Some((i, p)) = prices.iter().enumerate().find(|(_, p)| !p.is_finite() || **p <= 0.0) {
        return Err(PricingError::invalid_input(format!(
            "price at index {i} must be positive and finite, got {p}"
        )));
    }
    Ok(())
}

/// Period-over-period simple returns (P_i - P_{i-1}) / P_{i-1}
pub fn simple_returns(prices: &[f64]) -> PricingResult<Vec<f64>> {
    validate_prices(prices)?;
    Ok(prices.windows(2).map(|w| (w[1] - w[0]) / w[0]).collect())
}

/// Period-over-period log returns ln(P_i / P_{i-1})
pub fn log_returns(prices: &[f64]) -> PricingResult<Vec<f64>> {
    validate_prices(prices)?;
    Ok(prices.windows(2).map(|w| (w[1] / w[0]).ln()).collect())
}

/// Log-return statistics of a price series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistoricalEstimate {
    /// Mean log-return per period
    pub mean: f64,
    /// Sample standard deviation of log-returns per period
    pub volatility: f64,
    /// Periods per year used for annualisation
    pub periods_per_year: f64,
    /// Number of returns used
    pub observations: usize,
}

impl HistoricalEstimate {
    /// Estimate from daily closes (252 periods per year)
    pub fn from_daily_closes(prices: &[f64]) -> PricingResult<Self> {
        Self::from_prices(prices, TRADING_DAYS_PER_YEAR)
    }

    pub fn from_prices(prices: &[f64], periods_per_year: f64) -> PricingResult<Self> {
        if prices.len() < 3 {
            return Err(PricingError::invalid_input(format!(
                "need at least 3 prices for a volatility estimate, got {}",
                prices.len()
            )));
        }
        if !periods_per_year.is_finite() || periods_per_year <= 0.0 {
            return Err(PricingError::invalid_input(format!(
                "periods per year must be positive, got {periods_per_year}"
            )));
        }

        let returns = log_returns(prices)?;
        let mean = returns.iter().mean();
        let volatility = returns.iter().std_dev();

        tracing::debug!(observations = returns.len(), mean, volatility, "historical estimate");

        Ok(Self {
            mean,
            volatility,
            periods_per_year,
            observations: returns.len(),
        })
    }

    /// Drift per year: mean × periods
    pub fn annualized_mean(&self) -> f64 {
        self.mean * self.periods_per_year
    }

    /// Volatility per year: σ × √periods
    pub fn annualized_volatility(&self) -> f64 {
        self.volatility * self.periods_per_year.sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::lognormal::simulate_gbm_path;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_returns() {
        let prices = [100.0, 110.0, 99.0];
        let simple = simple_returns(&prices).unwrap();
        assert!((simple[0] - 0.1).abs() < 1e-12);
        assert!((simple[1] + 0.1).abs() < 1e-12);

        let logs = log_returns(&prices).unwrap();
        assert!((logs[0] - 1.1_f64.ln()).abs() < 1e-12);
        assert!((logs[1] - 0.9_f64.ln()).abs() < 1e-12);
    }

    #[test]
    fn test_constant_growth_has_zero_vol() {
        let prices: Vec<f64> = (0..10).map(|i| 100.0 * 1.01_f64.powi(i)).collect();
        let est = HistoricalEstimate::from_daily_closes(&prices).unwrap();
        assert!((est.mean - 1.01_f64.ln()).abs() < 1e-12);
        assert!(est.volatility < 1e-12);
        assert_eq!(est.observations, 9);
        assert!((est.annualized_mean() - 252.0 * 1.01_f64.ln()).abs() < 1e-9);
    }

    #[test]
    fn test_sample_std_uses_n_minus_one() {
        // log returns +a, -a  → mean 0, sample variance 2a²/(2-1)
        let a = 0.05_f64;
        let prices = [100.0, 100.0 * a.exp(), 100.0];
        let est = HistoricalEstimate::from_prices(&prices, 1.0).unwrap();
        assert!(est.mean.abs() < 1e-12);
        assert!((est.volatility - (2.0 * a * a).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_recovers_simulated_vol() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let path = simulate_gbm_path(100.0, 0.05, 0.3, 1.0 / 252.0, 5000, &mut rng).unwrap();
        let est = HistoricalEstimate::from_daily_closes(&path).unwrap();
        assert!((est.annualized_volatility() - 0.3).abs() < 0.02);
    }

    #[test]
    fn test_rejects_bad_series() {
        assert!(HistoricalEstimate::from_daily_closes(&[100.0, 101.0]).unwrap_err().is_invalid_input());
        assert!(HistoricalEstimate::from_daily_closes(&[100.0, 0.0, 101.0]).is_err());
        assert!(HistoricalEstimate::from_prices(&[100.0, 101.0, 102.0], 0.0).is_err());
        assert!(log_returns(&[100.0, f64::NAN]).is_err());
    }
}
