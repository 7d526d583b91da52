//! # BSM Options - Black-Scholes Option Chain Pricer
//!
//! Prices a listed option chain with the Black-Scholes closed form and compares
//! the model against the market, contract by contract.
//!
//! ## Overview
//!
//! For a chosen underlying and expiration:
//! - **Historical volatility**: sample std-dev of daily log returns, annualized over 252 days
//! - **Black-Scholes**: theoretical price of each call or put
//! - **Moneyness**: ITM / OTM relative to spot
//! - **Comparison**: market last price minus model price, filtered to strikes near spot
//!
//! ## Usage
//!
//! ```rust,no_run
//! use bsm_options::prelude::*;
//!
//! let config = PricingConfig::default();
//! let yahoo = YahooClient::new().unwrap();
//!
//! let summary = load_underlying(&yahoo, "NVDA", &config).unwrap();
//! let expiry = summary.expirations[0];
//! let now = chrono::Local::now().naive_local();
//!
//! let priced = price_chain(&yahoo, &summary, expiry, OptionType::Call, 0.0415, now, &config).unwrap();
//! for c in &priced.evaluation.near_the_money {
//!     println!("{} {:.2} {:.2} {}", c.contract.contract_id, c.contract.last_price, c.theoretical_price, c.moneyness);
//! }
//! ```
//!
//! ## What This Does NOT Do
//!
//! - Stream quotes in real time
//! - Adjust for American early exercise (European prices only)
//! - Compute Greeks
//! - Persist fetched data between runs

pub mod config;
pub mod core;
pub mod data;
pub mod models;
pub mod pricing;

/// Prelude with commonly used types
pub mod prelude {
    pub use crate::config::{MoneynessBand, PricingConfig};

    // Core types
    pub use crate::core::{
        parse_expiry, EnrichedContract, MarketSnapshot, Moneyness, OptionChain, OptionContract,
        OptionType, OptionsError, OptionsResult, PricePoint, PriceSeries, TimeToExpiry,
    };

    // Data fetching
    pub use crate::data::{MarketDataProvider, YahooClient};

    // Models
    pub use crate::models::{
        historical_volatility, norm_cdf, price as bs_price, price_checked as bs_price_checked,
    };

    // Chain pricing
    pub use crate::pricing::{
        load_underlying, price_chain, ChainEvaluation, ContractEvaluator, EvaluationSummary,
        PricedChain, UnderlyingSummary, VolatilityUnavailable,
    };
}

// Re-export main types at crate root
pub use crate::core::{OptionsError, OptionsResult};
pub use crate::pricing::{ChainEvaluation, ContractEvaluator};
