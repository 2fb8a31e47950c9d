//! Betting allocations
//!
//! Odds are quoted as net payout per unit staked ("o to 1"), so a winning
//! stake `b` returns `b·(1 + o)`.

use serde::{Deserialize, Serialize};

use crate::core::{PricingError, PricingResult};

/// Stakes across mutually exclusive outcomes and the resulting payout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BetAllocation {
    pub stakes: Vec<f64>,
    /// Net result, identical whichever outcome occurs
    pub profit: f64,
}

fn validate_odds(odds: f64) -> PricingResult<f64> {
    if !odds.is_finite() || odds < 0.0 {
        return Err(PricingError::invalid_input(format!("odds must be finite and non-negative, got {odds}")));
    }
    Ok(odds)
}

/// Split `bankroll` across every outcome so the payout is the same whichever
/// occurs.
///
/// Stake i is proportional to 1/(1 + oᵢ). The profit is positive exactly when
/// Σ 1/(1 + oᵢ) < 1, i.e. when the quoted odds are mutually inconsistent.
pub fn optimal_bets(odds: &[f64], bankroll: f64) -> PricingResult<BetAllocation> {
    if odds.is_empty() {
        return Err(PricingError::invalid_input("need at least one outcome"));
    }
    if !bankroll.is_finite() || bankroll <= 0.0 {
        return Err(PricingError::invalid_input(format!("bankroll must be positive, got {bankroll}")));
    }

    let weights = odds
        .iter()
        .map(|&o| validate_odds(o).map(|o| 1.0 / (1.0 + o)))
        .collect::<PricingResult<Vec<f64>>>()?;
    let total: f64 = weights.iter().sum();

    let payout = bankroll / total;
    Ok(BetAllocation {
        stakes: weights.iter().map(|w| payout * w).collect(),
        profit: payout - bankroll,
    })
}

/// Fair odds for an event of probability `p`: (1 - p) / p
pub fn probability_to_odds(p: f64) -> PricingResult<f64> {
    if !(p > 0.0 && p <= 1.0) {
        return Err(PricingError::invalid_input(format!("probability must lie in (0, 1], got {p}")));
    }
    Ok((1.0 - p) / p)
}

/// Implied probability of fair odds: 1 / (1 + o)
pub fn odds_to_probability(odds: f64) -> PricingResult<f64> {
    Ok(1.0 / (1.0 + validate_odds(odds)?))
}

/// Kelly fraction of bankroll to stake on a single bet with win probability
/// `p` at odds `o`: (p·o - (1 - p)) / o. Negative means the bet has no edge.
pub fn kelly_fraction(p: f64, odds: f64) -> PricingResult<f64> {
    if !(0.0..=1.0).contains(&p) {
        return Err(PricingError::invalid_input(format!("probability must lie in [0, 1], got {p}")));
    }
    let odds = validate_odds(odds)?;
    if odds == 0.0 {
        return Err(PricingError::invalid_input("odds must be positive for a Kelly stake"));
    }
    Ok((p * odds - (1.0 - p)) / odds)
}
