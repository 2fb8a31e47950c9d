//! Randomised properties of the Black-Scholes engine.
//!
//! Samples come from a fixed-seed ChaCha stream, so every run checks the same
//! points.

use bs_options::models::{black_scholes, parity};
use bs_options::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const SAMPLES: usize = 500;

#[derive(Debug, Clone, Copy)]
struct Market {
    spot: f64,
    strike: f64,
    time: f64,
    rate: f64,
    vol: f64,
}

fn sample_market(rng: &mut ChaCha8Rng) -> Market {
    let spot = rng.gen_range(20.0..200.0);
    Market {
        spot,
        strike: spot * rng.gen_range(0.7..1.3),
        time: rng.gen_range(0.05..3.0),
        rate: rng.gen_range(0.0..0.10),
        vol: rng.gen_range(0.05..1.0),
    }
}

fn call(m: &Market) -> f64 {
    bs_price(m.spot, m.strike, m.rate, m.vol, m.time, OptionType::Call)
}

fn put(m: &Market) -> f64 {
    bs_price(m.spot, m.strike, m.rate, m.vol, m.time, OptionType::Put)
}

fn close(actual: f64, expected: f64, rel: f64) -> bool {
    (actual - expected).abs() <= rel * expected.abs().max(1.0)
}

#[test]
fn put_call_parity_holds() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    for _ in 0..SAMPLES {
        let m = sample_market(&mut rng);
        let lhs = call(&m) - put(&m);
        let rhs = m.spot - m.strike * (-m.rate * m.time).exp();
        assert!((lhs - rhs).abs() < 1e-8, "{m:?}: C - P = {lhs}, S - Ke^-rT = {rhs}");

        let recovered = parity::put_from_call(m.spot, call(&m), m.strike, m.rate, m.time);
        assert!((recovered - put(&m)).abs() < 1e-8);
    }
}

#[test]
fn call_rises_and_put_falls_with_spot() {
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    for _ in 0..SAMPLES {
        let m = sample_market(&mut rng);
        let bumped = Market { spot: m.spot * rng.gen_range(1.001..1.5), ..m };
        assert!(call(&bumped) >= call(&m) - 1e-12, "{m:?}");
        assert!(put(&bumped) <= put(&m) + 1e-12, "{m:?}");
    }
}

#[test]
fn both_sides_rise_with_volatility() {
    let mut rng = ChaCha8Rng::seed_from_u64(13);
    for _ in 0..SAMPLES {
        let m = sample_market(&mut rng);
        let bumped = Market { vol: m.vol + rng.gen_range(0.001..0.5), ..m };
        assert!(call(&bumped) >= call(&m) - 1e-12, "{m:?}");
        assert!(put(&bumped) >= put(&m) - 1e-12, "{m:?}");
    }
}

#[test]
fn implied_volatility_round_trips() {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let config = SolverConfig::default();

    for _ in 0..SAMPLES {
        let spot: f64 = rng.gen_range(50.0..150.0);
        let time: f64 = rng.gen_range(0.1..2.0);
        let rate: f64 = rng.gen_range(0.0..0.08);
        let vol: f64 = rng.gen_range(0.01..3.0);
        // Strikes within half a standard deviation of the forward keep vega
        // large enough that a 1e-6 price residual pins σ to well under 1e-4
        let forward = spot * (rate * time).exp();
        let strike = forward * (rng.gen_range(-0.5..0.5) * vol * time.sqrt()).exp();

        for option_type in [OptionType::Call, OptionType::Put] {
            let premium = bs_price(spot, strike, rate, vol, time, option_type);
            let iv = implied_volatility(premium, spot, strike, rate, time, option_type, &config)
                .unwrap_or_else(|e| panic!("S={spot} K={strike} T={time} r={rate} σ={vol} {option_type}: {e}"));
            assert!(
                (iv - vol).abs() < 1e-4,
                "{option_type} S={spot} K={strike} T={time} r={rate}: σ={vol}, recovered {iv}"
            );
        }
    }
}

#[test]
fn greeks_match_central_differences() {
    let mut rng = ChaCha8Rng::seed_from_u64(99);
    for _ in 0..SAMPLES {
        let spot = rng.gen_range(50.0..150.0);
        let m = Market {
            spot,
            strike: spot * rng.gen_range(0.8..1.2),
            time: rng.gen_range(0.25..2.0),
            rate: rng.gen_range(0.0..0.08),
            vol: rng.gen_range(0.1..0.6),
        };

        for option_type in [OptionType::Call, OptionType::Put] {
            let g = bs_greeks(m.spot, m.strike, m.rate, m.vol, m.time, option_type);
            let p = |s: f64, r: f64, v: f64, t: f64| bs_price(s, m.strike, r, v, t, option_type);

            let hs = 1e-4 * m.spot;
            let delta = (p(m.spot + hs, m.rate, m.vol, m.time) - p(m.spot - hs, m.rate, m.vol, m.time)) / (2.0 * hs);
            assert!((delta - g.delta).abs() < 1e-4, "{option_type} {m:?}: delta {} vs {delta}", g.delta);

            let gamma = (p(m.spot + hs, m.rate, m.vol, m.time) - 2.0 * p(m.spot, m.rate, m.vol, m.time)
                + p(m.spot - hs, m.rate, m.vol, m.time))
                / (hs * hs);
            assert!((gamma - g.gamma).abs() < 1e-4, "{option_type} {m:?}: gamma {} vs {gamma}", g.gamma);

            let h = 1e-5;
            let vega = (p(m.spot, m.rate, m.vol + h, m.time) - p(m.spot, m.rate, m.vol - h, m.time)) / (2.0 * h);
            assert!(close(vega, g.vega, 1e-4), "{option_type} {m:?}: vega {} vs {vega}", g.vega);

            let rho = (p(m.spot, m.rate + h, m.vol, m.time) - p(m.spot, m.rate - h, m.vol, m.time)) / (2.0 * h);
            assert!(close(rho, g.rho, 1e-4), "{option_type} {m:?}: rho {} vs {rho}", g.rho);

            // Theta is the decay of value as calendar time passes: -∂V/∂T
            let theta = -(p(m.spot, m.rate, m.vol, m.time + h) - p(m.spot, m.rate, m.vol, m.time - h)) / (2.0 * h);
            assert!(close(theta, g.theta, 1e-4), "{option_type} {m:?}: theta {} vs {theta}", g.theta);
        }
    }
}

#[test]
fn reference_scenario_call() {
    let call = EuropeanOption::with_volatility(100.0, 100.0, 1.0, 0.05, 0.2, OptionType::Call).unwrap();
    assert!((call.price() - 10.4506).abs() < 1e-4);
    assert!((call.delta() - 0.6368).abs() < 1e-4);
}

#[test]
fn reference_scenario_put() {
    let put = EuropeanOption::with_volatility(100.0, 100.0, 1.0, 0.05, 0.2, OptionType::Put).unwrap();
    assert!((put.price() - 5.5735).abs() < 1e-4);
    assert!((put.delta() + 0.3632).abs() < 1e-4);

    let forward_gap = 100.0 - 100.0 * (-0.05f64).exp();
    assert!((10.4506 - put.price() - forward_gap).abs() < 1e-3);
}

#[test]
fn missing_volatility_and_premium_is_invalid_input() {
    let err = EuropeanOption::new(100.0, 100.0, 1.0, 0.05, None, None, OptionType::Call).unwrap_err();
    assert!(err.is_invalid_input());
}

#[test]
fn premium_below_intrinsic_is_an_implied_volatility_error() {
    // Intrinsic against the discounted strike is about 24.88
    for config in [SolverConfig::default(), SolverConfig::newton_only()] {
        let err = implied_volatility(20.0, 120.0, 100.0, 0.05, 1.0, OptionType::Call, &config).unwrap_err();
        match err {
            PricingError::ImpliedVolatility { iterations, last_estimate, .. } => {
                assert_eq!(iterations, 0);
                assert!(last_estimate.is_nan());
            }
            other => panic!("expected an implied volatility error, got {other:?}"),
        }
    }

    let err = EuropeanOption::from_premium(80.0, 100.0, 1.0, 0.05, 10.0, OptionType::Put).unwrap_err();
    assert!(err.is_implied_volatility());
}

#[test]
fn taylor_approximation_is_second_order() {
    let option = EuropeanOption::with_volatility(100.0, 100.0, 0.5, 0.03, 0.25, OptionType::Call).unwrap();
    let mut previous = f64::INFINITY;
    for ds in [1.0, 0.5, 0.25] {
        let exact = black_scholes::price(100.0 + ds, 100.0, 0.03, 0.25, 0.5, OptionType::Call);
        let err = (option.taylor_approx(ds) - exact).abs();
        // Error is O(ds³): halving ds shrinks it by about 8
        assert!(err < previous / 4.0);
        previous = err;
    }
    assert_eq!(option.taylor_approx(0.0), option.price());
}
