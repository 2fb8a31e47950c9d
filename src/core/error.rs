//! Error types for option valuation

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PricingError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Root-finder failed, or was handed a bracket without a sign change.
    #[error("Implied volatility error: {message} (last estimate {last_estimate:.6}, {iterations} iterations)")]
    ImpliedVolatility {
        message: String,
        last_estimate: f64,
        iterations: usize,
    },

    #[error("Numerical error: {0}")]
    Numerical(String),
}

pub type PricingResult<T> = Result<T, PricingError>;

impl PricingError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn implied_volatility(msg: impl Into<String>, last_estimate: f64, iterations: usize) -> Self {
        Self::ImpliedVolatility {
            message: msg.into(),
            last_estimate,
            iterations,
        }
    }

    pub fn numerical(msg: impl Into<String>) -> Self {
        Self::Numerical(msg.into())
    }

    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }

    pub fn is_implied_volatility(&self) -> bool {
        matches!(self, Self::ImpliedVolatility { .. })
    }
}

/// Reject NaN/Inf and values `<= 0`.
pub(crate) fn ensure_positive(value: f64, name: &str) -> PricingResult<f64> {
    if !value.is_finite() || value <= 0.0 {
        return Err(PricingError::invalid_input(format!(
            "{name} must be positive and finite, got {value}"
        )));
    }
    Ok(value)
}

pub(crate) fn ensure_finite(value: f64, name: &str) -> PricingResult<f64> {
    if !value.is_finite() {
        return Err(PricingError::invalid_input(format!(
            "{name} must be finite, got {value}"
        )));
    }
    Ok(value)
}
