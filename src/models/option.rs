//! European option value object
//!
//! Holds one contract's market parameters together with a mutually consistent
//! (σ, premium) pair. Exactly one of the two is supplied at construction; the
//! other is derived, by pricing when σ is known and by inversion when the
//! premium is known. Everything else (d1/d2, price, Greeks) is computed on
//! demand.

use chrono::NaiveDate;
use serde::Serialize;

use super::black_scholes;
use super::config::{BisectionConfig, SolverConfig};
use super::implied_vol::implied_volatility;
use super::inversion::{bisect, Metric, Parameter};
use crate::core::error::{ensure_finite, ensure_positive};
use crate::core::{Greeks, OptionContract, OptionType, PricingError, PricingResult, Valuation};

/// European vanilla option under Black-Scholes assumptions
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EuropeanOption {
    spot: f64,
    strike: f64,
    time: f64,
    rate: f64,
    volatility: f64,
    premium: f64,
    option_type: OptionType,
}

impl EuropeanOption {
    /// Build from exactly one of `volatility` or `premium`.
    ///
    /// # Errors
    /// [`PricingError::InvalidInput`] when both or neither are given, or a
    /// numeric input is out of range; [`PricingError::ImpliedVolatility`] when a
    /// premium cannot be inverted.
    pub fn new(
        spot: f64,
        strike: f64,
        time: f64,
        rate: f64,
        volatility: Option<f64>,
        premium: Option<f64>,
        option_type: OptionType,
    ) -> PricingResult<Self> {
        match (volatility, premium) {
            (Some(vol), None) => Self::with_volatility(spot, strike, time, rate, vol, option_type),
            (None, Some(premium)) => Self::from_premium(spot, strike, time, rate, premium, option_type),
            (None, None) => Err(PricingError::invalid_input(
                "provide either volatility or premium (market price)",
            )),
            (Some(_), Some(_)) => Err(PricingError::invalid_input(
                "provide volatility or premium, not both",
            )),
        }
    }

    /// Known volatility; the premium defaults to the model price
    pub fn with_volatility(
        spot: f64,
        strike: f64,
        time: f64,
        rate: f64,
        volatility: f64,
        option_type: OptionType,
    ) -> PricingResult<Self> {
        validate_market(spot, strike, time, rate)?;
        ensure_positive(volatility, "volatility")?;

        let premium = black_scholes::price(spot, strike, rate, volatility, time, option_type);
        Ok(Self {
            spot,
            strike,
            time,
            rate,
            volatility,
            premium,
            option_type,
        })
    }

    /// Observed premium; volatility is backed out with the default solver
    pub fn from_premium(
        spot: f64,
        strike: f64,
        time: f64,
        rate: f64,
        premium: f64,
        option_type: OptionType,
    ) -> PricingResult<Self> {
        Self::from_premium_with_config(spot, strike, time, rate, premium, option_type, &SolverConfig::default())
    }

    pub fn from_premium_with_config(
        spot: f64,
        strike: f64,
        time: f64,
        rate: f64,
        premium: f64,
        option_type: OptionType,
        config: &SolverConfig,
    ) -> PricingResult<Self> {
        validate_market(spot, strike, time, rate)?;
        let volatility = implied_volatility(premium, spot, strike, rate, time, option_type, config)?;
        Ok(Self {
            spot,
            strike,
            time,
            rate,
            volatility,
            premium,
            option_type,
        })
    }

    /// Price a dated contract as of `as_of`
    pub fn from_contract(
        contract: &OptionContract,
        spot: f64,
        as_of: NaiveDate,
        rate: f64,
        volatility: f64,
    ) -> PricingResult<Self> {
        let time = contract.time_to_expiry(as_of);
        if time <= 0.0 {
            return Err(PricingError::invalid_input(format!(
                "{} {} expired on {} (as of {as_of})",
                contract.underlying, contract.option_type, contract.expiry
            )));
        }
        Self::with_volatility(spot, contract.strike, time, rate, volatility, contract.option_type)
    }

    pub fn spot(&self) -> f64 {
        self.spot
    }

    pub fn strike(&self) -> f64 {
        self.strike
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    pub fn premium(&self) -> f64 {
        self.premium
    }

    pub fn option_type(&self) -> OptionType {
        self.option_type
    }

    pub fn d1(&self) -> f64 {
        self.d1_at(self.volatility)
    }

    pub fn d2(&self) -> f64 {
        self.d2_at(self.volatility)
    }

    /// d1 at a trial volatility; stored state is untouched
    pub fn d1_at(&self, vol: f64) -> f64 {
        black_scholes::d1(self.spot, self.strike, self.rate, vol, self.time)
    }

    pub fn d2_at(&self, vol: f64) -> f64 {
        black_scholes::d2(self.spot, self.strike, self.rate, vol, self.time)
    }

    /// Model price at the stored volatility
    pub fn price(&self) -> f64 {
        self.price_at(self.volatility)
    }

    /// What-if price at a transient volatility
    pub fn price_at(&self, vol: f64) -> f64 {
        black_scholes::price(self.spot, self.strike, self.rate, vol, self.time, self.option_type)
    }

    pub fn greeks(&self) -> Greeks {
        black_scholes::greeks(self.spot, self.strike, self.rate, self.volatility, self.time, self.option_type)
    }

    pub fn delta(&self) -> f64 {
        self.greeks().delta
    }

    pub fn gamma(&self) -> f64 {
        self.greeks().gamma
    }

    pub fn theta(&self) -> f64 {
        self.greeks().theta
    }

    pub fn vega(&self) -> f64 {
        black_scholes::vega(self.spot, self.strike, self.rate, self.volatility, self.time)
    }

    pub fn rho(&self) -> f64 {
        self.greeks().rho
    }

    /// Price and the five Greeks
    pub fn valuation(&self) -> Valuation {
        black_scholes::valuation(self.spot, self.strike, self.rate, self.volatility, self.time, self.option_type)
    }

    pub fn intrinsic(&self) -> f64 {
        self.option_type.intrinsic(self.spot, self.strike)
    }

    /// Volatility implied by some other premium for the same contract
    pub fn implied_volatility(&self, premium: f64, config: &SolverConfig) -> PricingResult<f64> {
        implied_volatility(premium, self.spot, self.strike, self.rate, self.time, self.option_type, config)
    }

    /// Delta-gamma estimate of the value after the underlying moves by `ds`.
    ///
    /// Local expansion `price + Δ·ds + Γ/2·ds²`; only meaningful for small `ds`.
    pub fn taylor_approx(&self, ds: f64) -> f64 {
        let greeks = self.greeks();
        self.price() + greeks.delta * ds + 0.5 * greeks.gamma * ds * ds
    }

    /// Copy with one input replaced, premium re-derived from the model
    pub fn with_parameter(&self, parameter: Parameter, value: f64) -> PricingResult<Self> {
        let mut next = *self;
        match parameter {
            Parameter::Spot => next.spot = value,
            Parameter::Strike => next.strike = value,
            Parameter::Time => next.time = value,
            Parameter::Rate => next.rate = value,
            Parameter::Volatility => next.volatility = value,
        }
        validate_market(next.spot, next.strike, next.time, next.rate)?;
        ensure_positive(next.volatility, "volatility")?;
        next.premium = next.price();
        Ok(next)
    }

    /// Find the value of `parameter` within `bracket` at which `metric` equals `target`.
    ///
    /// # Errors
    /// [`PricingError::InvalidInput`] for a bracket that leaves the parameter's
    /// domain; [`PricingError::ImpliedVolatility`] when the bracket does not
    /// straddle the target or the budget runs out.
    pub fn solve_parameter(
        &self,
        parameter: Parameter,
        metric: Metric,
        target: f64,
        bracket: &BisectionConfig,
    ) -> PricingResult<f64> {
        if parameter.requires_positive() && (bracket.lower.is_nan() || bracket.lower <= 0.0) {
            return Err(PricingError::invalid_input(format!(
                "{} bracket must be strictly positive, got lower bound {}",
                parameter.name(),
                bracket.lower
            )));
        }

        let objective = |value: f64| match self.with_parameter(parameter, value) {
            Ok(option) => metric.evaluate(&option),
            Err(_) => f64::NAN,
        };
        let outcome = bisect(objective, target, bracket)?;

        tracing::debug!(
            parameter = parameter.name(),
            ?metric,
            target,
            root = outcome.root,
            iterations = outcome.iterations,
            "parameter inversion converged"
        );
        Ok(outcome.root)
    }
}

fn validate_market(spot: f64, strike: f64, time: f64, rate: f64) -> PricingResult<()> {
    ensure_positive(spot, "spot")?;
    ensure_positive(strike, "strike")?;
    ensure_positive(time, "time to expiry")?;
    ensure_finite(rate, "rate")?;
    Ok(())
}
