//! Example: Basic options pricing with Black-Scholes
//!
//! Run with: cargo run --example basic_pricing

use bs_options::prelude::*;
use bs_options::models::parity;
use ndarray::array;

fn main() {
    // Option parameters
    let spot = 100.0;
    let strike = 105.0;
    let time = 0.25; // 3 months
    let rate = 0.05; // 5% risk-free rate
    let vol = 0.20; // 20% volatility

    println!("=== Black-Scholes Pricing ===\n");
    println!("Spot:     ${:.2}", spot);
    println!("Strike:   ${:.2}", strike);
    println!("Time:     {:.2} years ({:.0} days)", time, time * 365.0);
    println!("Rate:     {:.1}%", rate * 100.0);
    println!("Vol:      {:.1}%\n", vol * 100.0);

    let call = match EuropeanOption::with_volatility(spot, strike, time, rate, vol, OptionType::Call) {
        Ok(call) => call,
        Err(e) => {
            println!("Could not build call: {}", e);
            return;
        }
    };
    let put_price = bs_price(spot, strike, rate, vol, time, OptionType::Put);

    println!("Call Price: ${:.4}", call.price());
    println!("Put Price:  ${:.4}", put_price);

    // Verify put-call parity: C - P = S - K*e^(-rT)
    let implied_put = parity::put_from_call(spot, call.price(), strike, rate, time);
    println!("\nPut-Call Parity Check:");
    println!("  Put from parity = {:.4}", implied_put);
    println!("  Difference: {:.2e}", (implied_put - put_price).abs());

    println!("\n=== Greeks (Call) ===\n");
    let greeks = call.greeks();
    println!("Delta:  {:.4}", greeks.delta);
    println!("Gamma:  {:.4}", greeks.gamma);
    println!("Theta:  {:.4} (per day: {:.4})", greeks.theta, greeks.theta_per_day());
    println!("Vega:   {:.4}", greeks.vega);
    println!("Rho:    {:.4}", greeks.rho);

    println!("\n=== Delta-Gamma Approximation ===\n");
    for ds in [-2.0, -0.5, 0.5, 2.0] {
        println!("  dS = {:+.1}: approx {:.4}", ds, call.taylor_approx(ds));
    }

    println!("\n=== Implied Volatility ===\n");
    let market_price = call.price() + 0.50; // Simulated market price
    match call.implied_volatility(market_price, &SolverConfig::default()) {
        Ok(iv) => println!("Market price ${:.4} implies vol: {:.2}%", market_price, iv * 100.0),
        Err(e) => println!("Could not solve for IV: {}", e),
    }

    println!("\n=== Strike Ladder ===\n");
    let strikes = array![90.0, 95.0, 100.0, 105.0, 110.0];
    match valuate_batch(
        array![spot].view(),
        strikes.view(),
        array![time].view(),
        array![rate].view(),
        array![vol].view(),
        OptionType::Call,
    ) {
        Ok(batch) => {
            for (k, (p, d)) in strikes.iter().zip(batch.price.iter().zip(batch.delta.iter())) {
                println!("  K = {:>6.1}  price {:>8.4}  delta {:.4}", k, p, d);
            }
        }
        Err(e) => println!("Batch failed: {}", e),
    }
}
