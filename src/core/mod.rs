//! Core data types
//!
//! Defines fundamental types:
//! - OptionType / OptionContract: variant tag and calendar contract
//! - Greeks / Valuation: model outputs
//! - PricingError: crate error taxonomy

pub mod error;
pub mod greeks;
pub mod option;

pub use error::*;
pub use greeks::*;
pub use option::*;
