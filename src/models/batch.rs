//! Vectorised valuation
//!
//! Prices many strikes/maturities at once. Every input is a 1-D array of the
//! common length `n` or of length 1, which broadcasts. Elements share no state,
//! so each one is exactly the scalar computation.

use ndarray::{Array1, ArrayView1, Zip};
use serde::Serialize;

use super::black_scholes;
use super::config::SolverConfig;
use super::implied_vol::implied_volatility;
use crate::core::error::{ensure_finite, ensure_positive};
use crate::core::{Greeks, OptionType, PricingError, PricingResult, Valuation};

/// Column-oriented batch output
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchValuation {
    pub price: Array1<f64>,
    pub delta: Array1<f64>,
    pub gamma: Array1<f64>,
    pub vega: Array1<f64>,
    pub theta: Array1<f64>,
    pub rho: Array1<f64>,
    pub degenerate: Array1<bool>,
}

impl BatchValuation {
    pub fn len(&self) -> usize {
        self.price.len()
    }

    pub fn is_empty(&self) -> bool {
        self.price.is_empty()
    }

    /// Row `index` as a scalar valuation
    pub fn get(&self, index: usize) -> Option<Valuation> {
        if index >= self.len() {
            return None;
        }
        Some(Valuation::new(
            self.price[index],
            Greeks::new(
                self.delta[index],
                self.gamma[index],
                self.theta[index],
                self.vega[index],
                self.rho[index],
            ),
            self.degenerate[index],
        ))
    }
}

/// Common length of the inputs, or an error naming the offending one
fn batch_len(lengths: &[(&str, usize)]) -> PricingResult<usize> {
    let n = lengths.iter().map(|&(_, len)| len).max().unwrap_or(0);
    for &(name, len) in lengths {
        if len != n && len != 1 {
            return Err(PricingError::invalid_input(format!(
                "{name} has length {len}, expected {n} or 1"
            )));
        }
    }
    Ok(n)
}

fn at_index(index: usize, err: PricingError) -> PricingError {
    match err {
        PricingError::InvalidInput(msg) => PricingError::InvalidInput(format!("element {index}: {msg}")),
        PricingError::ImpliedVolatility {
            message,
            last_estimate,
            iterations,
        } => PricingError::ImpliedVolatility {
            message: format!("element {index}: {message}"),
            last_estimate,
            iterations,
        },
        PricingError::Numerical(msg) => PricingError::Numerical(format!("element {index}: {msg}")),
    }
}

fn broadcast_error(name: &str) -> PricingError {
    PricingError::invalid_input(format!("{name} cannot be broadcast"))
}

/// Price and Greeks for every element
pub fn valuate_batch<'a>(
    spot: ArrayView1<'a, f64>,
    strike: ArrayView1<'a, f64>,
    time: ArrayView1<'a, f64>,
    rate: ArrayView1<'a, f64>,
    vol: ArrayView1<'a, f64>,
    option_type: OptionType,
) -> PricingResult<BatchValuation> {
    let n = batch_len(&[
        ("spot", spot.len()),
        ("strike", strike.len()),
        ("time", time.len()),
        ("rate", rate.len()),
        ("volatility", vol.len()),
    ])?;

    let spot = spot.broadcast(n).ok_or_else(|| broadcast_error("spot"))?;
    let strike = strike.broadcast(n).ok_or_else(|| broadcast_error("strike"))?;
    let time = time.broadcast(n).ok_or_else(|| broadcast_error("time"))?;
    let rate = rate.broadcast(n).ok_or_else(|| broadcast_error("rate"))?;
    let vol = vol.broadcast(n).ok_or_else(|| broadcast_error("volatility"))?;

    for i in 0..n {
        ensure_positive(spot[i], "spot")
            .and_then(|_| ensure_positive(strike[i], "strike"))
            .and_then(|_| ensure_positive(time[i], "time to expiry"))
            .and_then(|_| ensure_finite(rate[i], "rate"))
            .and_then(|_| ensure_positive(vol[i], "volatility"))
            .map_err(|e| at_index(i, e))?;
    }

    let rows = Zip::from(&spot)
        .and(&strike)
        .and(&time)
        .and(&rate)
        .and(&vol)
        .map_collect(|&s, &k, &t, &r, &v| black_scholes::valuation(s, k, r, v, t, option_type));

    let degenerate = rows.map(|v| v.degenerate);
    if degenerate.iter().any(|&d| d) {
        tracing::debug!(
            count = degenerate.iter().filter(|&&d| d).count(),
            "batch contains elements priced at the σ√T → 0 limit"
        );
    }

    Ok(BatchValuation {
        price: rows.map(|v| v.price),
        delta: rows.map(|v| v.greeks.delta),
        gamma: rows.map(|v| v.greeks.gamma),
        vega: rows.map(|v| v.greeks.vega),
        theta: rows.map(|v| v.greeks.theta),
        rho: rows.map(|v| v.greeks.rho),
        degenerate,
    })
}

/// Implied volatility for every element; the first failure aborts the batch
pub fn implied_vol_batch<'a>(
    premium: ArrayView1<'a, f64>,
    spot: ArrayView1<'a, f64>,
    strike: ArrayView1<'a, f64>,
    time: ArrayView1<'a, f64>,
    rate: ArrayView1<'a, f64>,
    option_type: OptionType,
    config: &SolverConfig,
) -> PricingResult<Array1<f64>> {
    let n = batch_len(&[
        ("premium", premium.len()),
        ("spot", spot.len()),
        ("strike", strike.len()),
        ("time", time.len()),
        ("rate", rate.len()),
    ])?;

    let premium = premium.broadcast(n).ok_or_else(|| broadcast_error("premium"))?;
    let spot = spot.broadcast(n).ok_or_else(|| broadcast_error("spot"))?;
    let strike = strike.broadcast(n).ok_or_else(|| broadcast_error("strike"))?;
    let time = time.broadcast(n).ok_or_else(|| broadcast_error("time"))?;
    let rate = rate.broadcast(n).ok_or_else(|| broadcast_error("rate"))?;

    let mut vols = Array1::zeros(n);
    for i in 0..n {
        vols[i] = implied_volatility(premium[i], spot[i], strike[i], rate[i], time[i], option_type, config)
            .map_err(|e| at_index(i, e))?;
    }
    Ok(vols)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_strike_ladder_broadcasts_scalars() {
        let strikes = array![90.0, 100.0, 110.0];
        let out = valuate_batch(
            array![100.0].view(),
            strikes.view(),
            array![1.0].view(),
            array![0.05].view(),
            array![0.2].view(),
            OptionType::Call,
        )
        .unwrap();

        assert_eq!(out.len(), 3);
        for (i, &k) in strikes.iter().enumerate() {
            let scalar = black_scholes::valuation(100.0, k, 0.05, 0.2, 1.0, OptionType::Call);
            assert_eq!(out.get(i).unwrap(), scalar);
        }
        // Call price falls with strike
        assert!(out.price[0] > out.price[1] && out.price[1] > out.price[2]);
        assert!((out.price[1] - 10.4506).abs() < 1e-4);
        assert!(out.get(3).is_none());
    }

    #[test]
    fn test_views_from_different_owners() {
        let quotes = vec![98.0, 102.0];
        let spot = ArrayView1::from(&quotes[..]);
        let expiries = array![0.5];
        let out = {
            let rates = array![0.02];
            let priced =
                valuate_batch(spot, array![100.0].view(), expiries.view(), rates.view(), array![0.3].view(), OptionType::Put);
            priced.unwrap()
        };
        assert_eq!(out.len(), 2);
        assert!(out.price[0] > out.price[1]);

        let premiums = out.price.clone();
        let implied = implied_vol_batch(
            premiums.view(),
            ArrayView1::from(&quotes[..]),
            array![100.0].view(),
            expiries.view(),
            array![0.02].view(),
            OptionType::Put,
            &SolverConfig::default(),
        )
        .unwrap();
        assert!(implied.iter().all(|v| (v - 0.3).abs() < 1e-4));
    }

    #[test]
    fn test_full_length_inputs() {
        let out = valuate_batch(
            array![100.0, 120.0].view(),
            array![100.0, 100.0].view(),
            array![1.0, 0.5].view(),
            array![0.05, 0.01].view(),
            array![0.2, 0.4].view(),
            OptionType::Put,
        )
        .unwrap();
        let second = black_scholes::price(120.0, 100.0, 0.01, 0.4, 0.5, OptionType::Put);
        assert_eq!(out.price[1], second);
        assert!(out.degenerate.iter().all(|&d| !d));
    }

    #[test]
    fn test_mismatched_lengths_rejected() {
        let err = valuate_batch(
            array![100.0, 101.0].view(),
            array![90.0, 100.0, 110.0].view(),
            array![1.0].view(),
            array![0.05].view(),
            array![0.2].view(),
            OptionType::Call,
        )
        .unwrap_err();
        assert!(err.is_invalid_input());
        assert!(err.to_string().contains("spot"));
    }

    #[test]
    fn test_invalid_element_reports_index() {
        let err = valuate_batch(
            array![100.0].view(),
            array![90.0, -1.0].view(),
            array![1.0].view(),
            array![0.05].view(),
            array![0.2].view(),
            OptionType::Call,
        )
        .unwrap_err();
        assert!(err.to_string().contains("element 1"));
    }

    #[test]
    fn test_empty_batch() {
        let empty = Array1::<f64>::zeros(0);
        let out = valuate_batch(
            empty.view(),
            empty.view(),
            empty.view(),
            empty.view(),
            empty.view(),
            OptionType::Call,
        )
        .unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_implied_vol_batch_round_trip() {
        let strikes = array![95.0, 100.0, 105.0];
        let vols = array![0.25, 0.2, 0.18];
        let premiums = Zip::from(&strikes)
            .and(&vols)
            .map_collect(|&k, &v| black_scholes::price(100.0, k, 0.03, v, 0.5, OptionType::Call));

        let implied = implied_vol_batch(
            premiums.view(),
            array![100.0].view(),
            strikes.view(),
            array![0.5].view(),
            array![0.03].view(),
            OptionType::Call,
            &SolverConfig::default(),
        )
        .unwrap();

        for i in 0..3 {
            assert!((implied[i] - vols[i]).abs() < 1e-4);
        }
    }

    #[test]
    fn test_implied_vol_batch_reports_failing_element() {
        let err = implied_vol_batch(
            array![10.0, 0.5].view(),
            array![100.0].view(),
            array![100.0, 50.0].view(),
            array![1.0].view(),
            array![0.05].view(),
            OptionType::Call,
            &SolverConfig::default(),
        )
        .unwrap_err();
        assert!(err.is_implied_volatility());
        assert!(err.to_string().contains("element 1"));
    }
}
