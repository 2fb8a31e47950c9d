//! Statistics helpers
//!
//! Closed-form companions to the valuation models:
//! - Historical volatility from close prices
//! - Lognormal terminal distribution of the underlying, GBM paths
//! - Betting allocations and Kelly stakes
//! - Discrete expectations and CLT probabilities

pub mod betting;
pub mod discrete;
pub mod historical;
pub mod lognormal;

pub use betting::*;
pub use discrete::*;
pub use historical::*;
pub use lognormal::*;
