//! Discrete distributions and central-limit approximations

use statrs::distribution::{ContinuousCDF, Normal};

use crate::core::error::ensure_positive;
use crate::core::{PricingError, PricingResult};

/// Slack allowed when checking that probabilities sum to one
pub const PROBABILITY_SUM_TOLERANCE: f64 = 1e-4;

fn validate_distribution(probs: &[f64], values: &[f64]) -> PricingResult<()> {
    if probs.len() != values.len() {
        return Err(PricingError::invalid_input(format!(
            "{} probabilities for {} values",
            probs.len(),
            values.len()
        )));
    }
    if probs.iter().any(|p| !(0.0..=1.0).contains(p)) {
        return Err(PricingError::invalid_input("probabilities must lie in [0, 1]"));
    }
    let total: f64 = probs.iter().sum();
    if (total - 1.0).abs() > PROBABILITY_SUM_TOLERANCE {
        return Err(PricingError::invalid_input(format!("probabilities sum to {total}, not 1")));
    }
    Ok(())
}

/// E[X] for a finite distribution
pub fn expected_value(probs: &[f64], values: &[f64]) -> PricingResult<f64> {
    validate_distribution(probs, values)?;
    Ok(probs.iter().zip(values).map(|(p, v)| p * v).sum())
}

/// Var[X] = E[X²] - E[X]²
pub fn variance(probs: &[f64], values: &[f64]) -> PricingResult<f64> {
    let mean = expected_value(probs, values)?;
    let second: f64 = probs.iter().zip(values).map(|(p, v)| p * v * v).sum();
    Ok(second - mean * mean)
}

fn normal(mean: f64, std_dev: f64) -> PricingResult<Normal> {
    Normal::new(mean, std_dev).map_err(|e| PricingError::invalid_input(format!("normal parameters: {e}")))
}

/// P(X₁ + … + Xₙ <= x) for i.i.d. draws with mean `mu` and standard deviation `sigma`
pub fn clt_sum_probability(mu: f64, sigma: f64, n: u32, x: f64) -> PricingResult<f64> {
    ensure_positive(sigma, "sigma")?;
    if n == 0 {
        return Err(PricingError::invalid_input("sample size must be positive"));
    }
    let n = f64::from(n);
    Ok(normal(mu * n, sigma * n.sqrt())?.cdf(x))
}

/// P((X₁ + … + Xₙ)/n <= x) for i.i.d. draws with mean `mu` and standard deviation `sigma`
pub fn clt_mean_probability(mu: f64, sigma: f64, n: u32, x: f64) -> PricingResult<f64> {
    ensure_positive(sigma, "sigma")?;
    if n == 0 {
        return Err(PricingError::invalid_input("sample size must be positive"));
    }
    let n = f64::from(n);
    Ok(normal(mu, sigma / n.sqrt())?.cdf(x))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fair_die() {
        let probs = [1.0 / 6.0; 6];
        let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        assert!((expected_value(&probs, &values).unwrap() - 3.5).abs() < 1e-12);
        assert!((variance(&probs, &values).unwrap() - 35.0 / 12.0).abs() < 1e-12);
    }

    #[test]
    fn test_probabilities_must_sum_to_one() {
        let err = expected_value(&[0.5, 0.4], &[1.0, 2.0]).unwrap_err();
        assert!(err.is_invalid_input());
        // Within tolerance
        assert!(expected_value(&[0.5, 0.49995], &[1.0, 2.0]).is_ok());
        assert!(expected_value(&[0.5], &[1.0, 2.0]).is_err());
        assert!(expected_value(&[1.5, -0.5], &[1.0, 2.0]).is_err());
    }

    #[test]
    fn test_clt_sum() {
        // Sum centred on the threshold
        assert!((clt_sum_probability(2.0, 1.0, 100, 200.0).unwrap() - 0.5).abs() < 1e-12);
        // One standard deviation above: sd of sum = 10
        assert!((clt_sum_probability(2.0, 1.0, 100, 210.0).unwrap() - 0.841_344_746).abs() < 1e-8);
    }

    #[test]
    fn test_clt_mean() {
        // sd of mean = 0.1
        assert!((clt_mean_probability(2.0, 1.0, 100, 1.9).unwrap() - 0.158_655_254).abs() < 1e-8);
        assert!(clt_mean_probability(2.0, 1.0, 0, 1.9).is_err());
        assert!(clt_mean_probability(2.0, -1.0, 10, 1.9).is_err());
    }
}
