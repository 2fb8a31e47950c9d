//! Valuation Models
//!
//! Implements:
//! - Black-Scholes closed form (price, Greeks, σ√T → 0 limits)
//! - Implied volatility (Newton-Raphson with bisection fallback)
//! - Bracketed inversion for any input/output pair
//! - European option value object
//! - Put-call parity solvers and vectorised batch valuation

pub mod batch;
pub mod black_scholes;
pub mod config;
pub mod implied_vol;
pub mod inversion;
pub mod normal;
pub mod option;
pub mod parity;

pub use batch::*;
pub use black_scholes::{d1, d2, greeks, is_degenerate, price, price_bounds, valuation, vega};
pub use config::*;
pub use implied_vol::*;
pub use inversion::*;
pub use normal::*;
pub use option::*;
pub use parity::*;
