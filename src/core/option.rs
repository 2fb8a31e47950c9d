//! Option contract definitions
//!
//! Variant tag (call/put) and the calendar description of a European vanilla
//! contract.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::error::PricingError;

/// Day count used to turn calendar days into year fractions (ACT/365.25)
pub const DAYS_PER_YEAR: f64 = 365.25;

/// Variant tag of a vanilla option
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    Call,
    Put,
}

impl OptionType {
    /// Exercise value `max(φ(S - K), 0)`
    pub fn intrinsic(&self, spot: f64, strike: f64) -> f64 {
        match self {
            OptionType::Call => (spot - strike).max(0.0),
            OptionType::Put => (strike - spot).max(0.0),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OptionType::Call => "call",
            OptionType::Put => "put",
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OptionType {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "call" | "c" => Ok(OptionType::Call),
            "put" | "p" => Ok(OptionType::Put),
            other => Err(PricingError::invalid_input(format!(
                "unsupported option type '{other}', expected 'call' or 'put'"
            ))),
        }
    }
}

/// Listed contract: what is written on the ticket rather than what the model
/// consumes. [`EuropeanOption::from_contract`](crate::models::EuropeanOption::from_contract)
/// turns it into model inputs as of a valuation date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionContract {
    pub underlying: String,
    pub strike: f64,
    /// Exercise date (European: this day only)
    pub expiry: NaiveDate,
    pub option_type: OptionType,
}

impl OptionContract {
    pub fn new(
        underlying: impl Into<String>,
        strike: f64,
        expiry: NaiveDate,
        option_type: OptionType,
    ) -> Self {
        Self {
            underlying: underlying.into(),
            strike,
            expiry,
            option_type,
        }
    }

    /// Year fraction from `as_of` to expiry, ACT/365.25. Negative once expired.
    pub fn time_to_expiry(&self, as_of: NaiveDate) -> f64 {
        (self.expiry - as_of).num_days() as f64 / DAYS_PER_YEAR
    }

    /// Payoff if exercised today at `spot`
    pub fn payoff(&self, spot: f64) -> f64 {
        self.option_type.intrinsic(spot, self.strike)
    }
}
