//! Provider-to-evaluation pipeline
//!
//! Resolves an underlying through a [`MarketDataProvider`], then prices one
//! expiration of its chain. Provider failures become [`OptionsError::NoData`]
//! so that nothing is priced over missing values.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::evaluator::{ChainEvaluation, ContractEvaluator};
use crate::config::PricingConfig;
use crate::core::{MarketSnapshot, OptionType, OptionsError, OptionsResult, TimeToExpiry};
use crate::data::MarketDataProvider;

/// Why a history could not produce a volatility
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum VolatilityUnavailable {
    InsufficientHistory(String),
    InvalidPriceSeries(String),
}

impl From<OptionsError> for VolatilityUnavailable {
    fn from(e: OptionsError) -> Self {
        match e {
            OptionsError::InsufficientHistory(msg) => Self::InsufficientHistory(msg),
            OptionsError::InvalidPriceSeries(msg) => Self::InvalidPriceSeries(msg),
            other => Self::InvalidPriceSeries(other.to_string()),
        }
    }
}

impl From<VolatilityUnavailable> for OptionsError {
    fn from(e: VolatilityUnavailable) -> Self {
        match e {
            VolatilityUnavailable::InsufficientHistory(msg) => OptionsError::InsufficientHistory(msg),
            VolatilityUnavailable::InvalidPriceSeries(msg) => OptionsError::InvalidPriceSeries(msg),
        }
    }
}

impl std::fmt::Display for VolatilityUnavailable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InsufficientHistory(msg) => write!(f, "insufficient history: {}", msg),
            Self::InvalidPriceSeries(msg) => write!(f, "invalid price series: {}", msg),
        }
    }
}

/// What is known about an underlying before an expiry is picked
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnderlyingSummary {
    pub symbol: String,
    pub spot: f64,
    /// Estimate, or the reason the history could not produce one
    pub historical_volatility: Result<f64, VolatilityUnavailable>,
    pub expirations: Vec<NaiveDate>,
}

/// One priced expiration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricedChain {
    pub symbol: String,
    pub expiry: NaiveDate,
    pub time_to_expiry: TimeToExpiry,
    pub evaluation: ChainEvaluation,
}

fn no_data<'a, E: std::fmt::Display>(
    symbol: &'a str,
    what: &'static str,
) -> impl FnOnce(E) -> OptionsError + 'a {
    move |e| {
        tracing::warn!("{}: {} unavailable: {}", symbol, what, e);
        OptionsError::no_data(symbol)
    }
}

/// Fetch spot, history and expirations, and estimate historical volatility.
///
/// Any provider failure, an empty history or a non-positive spot yields `NoData`.
/// A history that cannot produce a volatility is kept as the `Err` side of
/// `historical_volatility` and re-raised by [`price_chain`].
pub fn load_underlying<P: MarketDataProvider + ?Sized>(
    provider: &P,
    symbol: &str,
    config: &PricingConfig,
) -> OptionsResult<UnderlyingSummary> {
    tracing::info!("Fetching market data for {}", symbol);

    let spot = provider.spot(symbol).map_err(no_data(symbol, "spot"))?;
    if !(spot.is_finite() && spot > 0.0) {
        tracing::warn!("{}: provider returned spot {}", symbol, spot);
        return Err(OptionsError::no_data(symbol));
    }

    let history = provider
        .price_history(symbol, &config.history_range)
        .map_err(no_data(symbol, "price history"))?;
    if history.is_empty() {
        tracing::warn!("{}: empty price history", symbol);
        return Err(OptionsError::no_data(symbol));
    }

    let expirations = provider
        .expirations(symbol)
        .map_err(no_data(symbol, "expirations"))?;

    let historical_volatility = history
        .historical_volatility(config.trading_days_per_year)
        .map_err(VolatilityUnavailable::from);
    if let Err(e) = &historical_volatility {
        tracing::warn!("{}: volatility unavailable: {}", symbol, e);
    }

    tracing::debug!(
        "{}: spot {:.2}, {} closes, {} expirations",
        symbol,
        spot,
        history.len(),
        expirations.len()
    );

    Ok(UnderlyingSummary {
        symbol: symbol.to_string(),
        spot,
        historical_volatility,
        expirations,
    })
}

/// Price one expiration of an already-loaded underlying.
///
/// The expiry must be one of `summary.expirations`. `now` fixes the clock used
/// for time to expiry so that repeated calls are reproducible.
pub fn price_chain<P: MarketDataProvider + ?Sized>(
    provider: &P,
    summary: &UnderlyingSummary,
    expiry: NaiveDate,
    option_type: OptionType,
    rate: f64,
    now: NaiveDateTime,
    config: &PricingConfig,
) -> OptionsResult<PricedChain> {
    if !summary.expirations.contains(&expiry) {
        return Err(OptionsError::invalid_input(format!(
            "{} has no expiration on {}",
            summary.symbol, expiry
        )));
    }

    let volatility = summary.historical_volatility.clone()?;

    let time_to_expiry = TimeToExpiry::between(expiry, now, config);
    let snapshot = MarketSnapshot::new(summary.spot, volatility, rate, time_to_expiry.years)?;

    let chain = provider
        .option_chain(&summary.symbol, expiry)
        .map_err(no_data(&summary.symbol, "option chain"))?;

    let evaluator = ContractEvaluator::from_config(config);
    let evaluation = evaluator.evaluate_chain(&snapshot, chain.contracts(option_type), option_type)?;

    Ok(PricedChain {
        symbol: summary.symbol.clone(),
        expiry,
        time_to_expiry,
        evaluation,
    })
}
