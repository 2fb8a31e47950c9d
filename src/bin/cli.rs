//! BS Options CLI
//!
//! Prices one European option from the command line.
//!
//! ```text
//! bs-cli <call|put> <spot> <strike> <time> <rate> (--vol <σ> | --premium <p>) [--json]
//! ```

use std::process::ExitCode;

use bs_options::prelude::*;

const USAGE: &str =
    "usage: bs-cli <call|put> <spot> <strike> <time> <rate> (--vol <sigma> | --premium <price>) [--json]";

struct Args {
    option_type: OptionType,
    spot: f64,
    strike: f64,
    time: f64,
    rate: f64,
    vol: Option<f64>,
    premium: Option<f64>,
    json: bool,
}

fn parse_number(name: &str, raw: Option<&String>) -> PricingResult<f64> {
    let raw = raw.ok_or_else(|| PricingError::invalid_input(format!("missing {name}")))?;
    raw.parse::<f64>()
        .map_err(|_| PricingError::invalid_input(format!("{name} is not a number: '{raw}'")))
}

fn parse_args(argv: &[String]) -> PricingResult<Args> {
    let option_type = argv
        .first()
        .ok_or_else(|| PricingError::invalid_input("missing option type"))?
        .parse::<OptionType>()?;

    let mut args = Args {
        option_type,
        spot: parse_number("spot", argv.get(1))?,
        strike: parse_number("strike", argv.get(2))?,
        time: parse_number("time", argv.get(3))?,
        rate: parse_number("rate", argv.get(4))?,
        vol: None,
        premium: None,
        json: false,
    };

    let mut rest = argv.iter().skip(5);
    while let Some(flag) = rest.next() {
        match flag.as_str() {
            "--vol" => args.vol = Some(parse_number("--vol", rest.next())?),
            "--premium" => args.premium = Some(parse_number("--premium", rest.next())?),
            "--json" => args.json = true,
            other => return Err(PricingError::invalid_input(format!("unknown argument '{other}'"))),
        }
    }
    Ok(args)
}

fn run(argv: &[String]) -> PricingResult<()> {
    let args = parse_args(argv)?;
    tracing::debug!(
        option_type = %args.option_type,
        spot = args.spot,
        strike = args.strike,
        time = args.time,
        rate = args.rate,
        "pricing"
    );

    let option = EuropeanOption::new(
        args.spot,
        args.strike,
        args.time,
        args.rate,
        args.vol,
        args.premium,
        args.option_type,
    )?;
    let valuation = option.valuation();

    if args.json {
        let out = serde_json::json!({
            "option": option,
            "valuation": valuation,
        });
        let text = serde_json::to_string_pretty(&out).map_err(|e| PricingError::numerical(e.to_string()))?;
        println!("{text}");
        return Ok(());
    }

    println!("Black-Scholes {} option", option.option_type());
    println!("  Spot:    {:.4}", option.spot());
    println!("  Strike:  {:.4}", option.strike());
    println!("  Time:    {:.4} years ({:.0} days)", option.time(), option.time() * 365.0);
    println!("  Rate:    {:.2}%", option.rate() * 100.0);
    println!("  Vol:     {:.4}%", option.volatility() * 100.0);
    println!("  Premium: {:.4}", option.premium());

    println!("\nValuation:");
    println!("  Price: {:.4}", valuation.price);
    println!("  Delta: {:.4}", valuation.greeks.delta);
    println!("  Gamma: {:.6}", valuation.greeks.gamma);
    println!("  Vega:  {:.4}", valuation.greeks.vega);
    println!("  Theta: {:.4} (per day: {:.4})", valuation.greeks.theta, valuation.greeks.theta_per_day());
    println!("  Rho:   {:.4}", valuation.greeks.rho);
    if valuation.degenerate {
        println!("  (σ√T ≈ 0: intrinsic-value limit used)");
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let argv: Vec<String> = std::env::args().skip(1).collect();
    match run(&argv) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            eprintln!("{USAGE}");
            ExitCode::FAILURE
        }
    }
}
