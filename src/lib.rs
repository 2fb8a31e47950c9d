//! # BS Options - Black-Scholes Valuation Engine
//!
//! Closed-form pricing of European vanilla options, their Greeks, and the
//! inverse problem: backing volatility (or any other input) out of an observed
//! premium.
//!
//! ## Key Components
//!
//! - **Black-Scholes**: price, delta, gamma, theta, vega, rho, with the
//!   textbook limits substituted when σ√T collapses
//! - **Implied Volatility**: Newton-Raphson seeded at 20% with a bounded
//!   bisection fallback
//! - **EuropeanOption**: value object holding a consistent (σ, premium) pair
//! - **Batch**: the same formulas mapped over `ndarray` inputs
//! - **Stats**: historical volatility, lognormal terminal distribution,
//!   betting allocations, discrete expectations
//!
//! ## Usage
//!
//! ```rust
//! use bs_options::prelude::*;
//!
//! let call = EuropeanOption::with_volatility(100.0, 100.0, 1.0, 0.05, 0.2, OptionType::Call).unwrap();
//! assert!((call.price() - 10.4506).abs() < 1e-4);
//!
//! // Back the volatility out of a quoted premium
//! let quoted = EuropeanOption::from_premium(100.0, 100.0, 1.0, 0.05, 10.4506, OptionType::Call).unwrap();
//! assert!((quoted.volatility() - 0.2).abs() < 1e-4);
//! ```
//!
//! ## What This Crate Does NOT Do
//!
//! - Early exercise (American options)
//! - Fetch or store market data
//! - Calibrate across several instruments at once

pub mod core;
pub mod models;
pub mod stats;

/// Prelude with commonly used types
pub mod prelude {
    // Core types
    pub use crate::core::{Greeks, OptionContract, OptionType, PricingError, PricingResult, Valuation};

    // Models
    pub use crate::models::{
        bisect,
        greeks as bs_greeks,
        implied_vol_batch,
        implied_volatility,
        norm_cdf,
        norm_pdf,
        price as bs_price,
        valuate_batch,
        BatchValuation,
        BisectionConfig,
        EuropeanOption,
        Metric,
        Parameter,
        SolverConfig,
    };

    // Statistics
    pub use crate::stats::{optimal_bets, HistoricalEstimate, TerminalDistribution};
}

// Re-export main types at crate root
pub use crate::core::{OptionType, PricingError, PricingResult};
pub use crate::models::{EuropeanOption, SolverConfig};
