//! BSM Options CLI
//!
//! Prices one expiration of a ticker's option chain and prints market vs. model.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use bsm_options::prelude::*;

#[derive(Parser)]
#[command(name = "bsm-chain")]
#[command(about = "Black-Scholes pricing of a listed option chain against market prices")]
struct Args {
    /// Ticker symbol
    #[arg(long, short, default_value = "NVDA")]
    ticker: String,

    /// Risk-free rate as a decimal (overrides the config file)
    #[arg(long, short)]
    rate: Option<f64>,

    /// Expiration date (YYYY-MM-DD); defaults to the nearest listed one
    #[arg(long, short)]
    expiry: Option<String>,

    /// Option kind: call or put
    #[arg(long, short, default_value = "call")]
    kind: String,

    /// Path to a JSON pricing config
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Print the priced chain as JSON instead of a table
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.is_no_data() => {
            eprintln!("Invalid ticker or data unavailable ({}). Please try again.", args.ticker);
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> OptionsResult<()> {
    let mut config = match &args.config {
        Some(path) => PricingConfig::from_json_file(path)?,
        None => PricingConfig::default(),
    };
    if let Some(rate) = args.rate {
        config = config.with_rate(rate);
    }
    config.validate()?;

    let option_type: OptionType = args.kind.parse()?;
    let symbol = args.ticker.trim().to_ascii_uppercase();

    let yahoo = YahooClient::new()?;
    let summary = load_underlying(&yahoo, &symbol, &config)?;

    let expiry = match &args.expiry {
        Some(s) => parse_expiry(s)?,
        None => *summary
            .expirations
            .first()
            .ok_or_else(|| OptionsError::no_data(symbol.as_str()))?,
    };

    let now = chrono::Local::now().naive_local();
    let priced = price_chain(
        &yahoo,
        &summary,
        expiry,
        option_type,
        config.risk_free_rate,
        now,
        &config,
    )?;

    if args.json {
        let json = serde_json::to_string_pretty(&priced)
            .map_err(|e| OptionsError::Serialization(e.to_string()))?;
        println!("{}", json);
        return Ok(());
    }

    print_report(&summary, &priced, config.risk_free_rate);
    Ok(())
}

fn print_report(summary: &UnderlyingSummary, priced: &PricedChain, rate: f64) {
    let eval = &priced.evaluation;
    let kind = match eval.option_type {
        OptionType::Call => "Calls",
        OptionType::Put => "Puts",
    };

    println!("Black-Scholes Option Pricing: {}", summary.symbol);
    println!("==============================\n");
    println!("  Current Price:         ${:.2}", summary.spot);
    match &summary.historical_volatility {
        Ok(vol) => println!("  Historical Volatility: {:.2}%", vol * 100.0),
        Err(reason) => println!("  Historical Volatility: n/a ({})", reason),
    }
    println!("  Risk Free Rate:        {:.2}%", rate * 100.0);
    println!(
        "\nExpiration {}: {} days (T={:.4})\n",
        priced.expiry, priced.time_to_expiry.days, priced.time_to_expiry.years
    );

    println!("Market vs. Theoretical Price ({})", kind);
    println!(
        "{:<22} {:>9} {:>10} {:>10} {:>9} {:>8} {:>8}  {}",
        "Contract", "Strike", "Last", "BS Price", "Diff", "IV", "Volume", "Moneyness"
    );
    println!("{}", "-".repeat(92));
    for c in &eval.near_the_money {
        println!(
            "{:<22} {:>9.2} {:>10} {:>10} {:>9} {:>7.2}% {:>8}  {}",
            c.contract.contract_id,
            c.contract.strike,
            format!("${:.2}", c.contract.last_price),
            format!("${:.2}", c.theoretical_price),
            format!("${:.2}", c.price_diff),
            c.contract.implied_volatility * 100.0,
            c.contract.volume,
            c.moneyness
        );
    }

    let s = eval.summary();
    println!(
        "\n{} of {} contracts near the money ({} ITM, {} OTM, {} above model)",
        s.near_the_money, s.total, s.itm, s.otm, s.rich
    );
    if let Some(diff) = s.mean_price_diff {
        println!("Mean market - model difference: ${:.2}", diff);
    }
    println!("\nPositive Diff: the market prices the contract above the model,");
    println!("i.e. it implies more volatility than the historical estimate.");
}
