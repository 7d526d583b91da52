//! Yahoo Finance data fetcher
//!
//! Spot quotes, daily close history and option chains from Yahoo Finance's
//! unofficial API.
//!
//! Note: This is for educational/research purposes. Yahoo Finance
//! data is delayed ~15 minutes and intended for personal use.

use chrono::{DateTime, NaiveDate, NaiveTime};
use serde::Deserialize;

use super::provider::MarketDataProvider;
use crate::core::{
    OptionChain, OptionContract, OptionsError, OptionsResult, PricePoint, PriceSeries,
};

const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";

/// Yahoo Finance API client
pub struct YahooClient {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl YahooClient {
    pub fn new() -> OptionsResult<Self> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Client against a different host (mirrors, test servers)
    pub fn with_base_url(base_url: impl Into<String>) -> OptionsResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .build()
            .map_err(|e| OptionsError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str, what: &str) -> OptionsResult<T> {
        tracing::debug!("GET {}", url);
        self.client
            .get(url)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| OptionsError::Network(e.to_string()))?
            .json()
            .map_err(|e| OptionsError::data(format!("Failed to parse {}: {}", what, e)))
    }

    /// Get current quote for a symbol
    pub fn get_quote(&self, symbol: &str) -> OptionsResult<f64> {
        let url = format!("{}/v7/finance/quote?symbols={}", self.base_url, symbol);
        let response: YahooQuoteResponse = self.get_json(&url, "quote")?;

        let result = response
            .quote_response
            .result
            .into_iter()
            .next()
            .ok_or_else(|| OptionsError::no_data(symbol))?;

        result
            .regular_market_price
            .ok_or_else(|| OptionsError::no_data(symbol))
    }

    /// Daily closes over the given range
    pub fn get_history(&self, symbol: &str, range: &str) -> OptionsResult<PriceSeries> {
        let url = format!(
            "{}/v8/finance/chart/{}?range={}&interval=1d",
            self.base_url, symbol, range
        );
        let response: YahooChartResponse = self.get_json(&url, "chart")?;

        let result = response
            .chart
            .result
            .and_then(|r| r.into_iter().next())
            .ok_or_else(|| OptionsError::no_data(symbol))?;

        let closes = result
            .indicators
            .quote
            .into_iter()
            .next()
            .map(|q| q.close)
            .unwrap_or_default();

        let mut points = Vec::with_capacity(result.timestamp.len());
        for (ts, close) in result.timestamp.iter().zip(closes) {
            let (Some(close), Some(timestamp)) = (close, DateTime::from_timestamp(*ts, 0)) else {
                tracing::warn!("{}: skipping bar at {} with no close", symbol, ts);
                continue;
            };
            points.push(PricePoint::new(timestamp, close));
        }

        PriceSeries::new(points)
    }

    /// Get available option expiration dates
    pub fn get_expirations(&self, symbol: &str) -> OptionsResult<Vec<NaiveDate>> {
        let url = format!("{}/v7/finance/options/{}", self.base_url, symbol);
        let response: YahooOptionsResponse = self.get_json(&url, "options")?;

        let chain = response
            .option_chain
            .result
            .into_iter()
            .next()
            .ok_or_else(|| OptionsError::no_data(symbol))?;

        let expiries: Vec<NaiveDate> = chain
            .expiration_dates
            .iter()
            .filter_map(|&ts| DateTime::from_timestamp(ts, 0).map(|dt| dt.date_naive()))
            .collect();

        Ok(expiries)
    }

    /// Get option chain for a specific expiration
    pub fn get_option_chain(&self, symbol: &str, expiry: NaiveDate) -> OptionsResult<OptionChain> {
        // Yahoo keys expirations by midnight UTC
        let expiry_ts = expiry.and_time(NaiveTime::MIN).and_utc().timestamp();

        let url = format!(
            "{}/v7/finance/options/{}?date={}",
            self.base_url, symbol, expiry_ts
        );
        let response: YahooOptionsResponse = self.get_json(&url, "options")?;

        let chain_data = response
            .option_chain
            .result
            .into_iter()
            .next()
            .ok_or_else(|| OptionsError::no_data(symbol))?;

        let mut chain = OptionChain::new(expiry);

        if let Some(options) = chain_data.options.into_iter().next() {
            chain.calls = convert_contracts(&options.calls, symbol);
            chain.puts = convert_contracts(&options.puts, symbol);
        }

        tracing::info!(
            "{} {}: {} calls, {} puts",
            symbol,
            expiry,
            chain.calls.len(),
            chain.puts.len()
        );
        Ok(chain)
    }
}

impl MarketDataProvider for YahooClient {
    fn spot(&self, symbol: &str) -> OptionsResult<f64> {
        self.get_quote(symbol)
    }

    fn price_history(&self, symbol: &str, range: &str) -> OptionsResult<PriceSeries> {
        self.get_history(symbol, range)
    }

    fn expirations(&self, symbol: &str) -> OptionsResult<Vec<NaiveDate>> {
        self.get_expirations(symbol)
    }

    fn option_chain(&self, symbol: &str, expiry: NaiveDate) -> OptionsResult<OptionChain> {
        self.get_option_chain(symbol, expiry)
    }
}

/// Convert Yahoo option rows to contracts, dropping rows without a strike
fn convert_contracts(rows: &[YahooOptionData], underlying: &str) -> Vec<OptionContract> {
    rows.iter()
        .filter_map(|row| {
            let Some(strike) = row.strike else {
                tracing::warn!("{}: dropping option row without strike", underlying);
                return None;
            };
            Some(OptionContract {
                contract_id: row.contract_symbol.clone().unwrap_or_default(),
                strike,
                last_price: row.last_price.unwrap_or(0.0),
                implied_volatility: row.implied_volatility.unwrap_or(0.0),
                volume: row.volume.unwrap_or(0).max(0) as u64,
            })
        })
        .collect()
}

// Yahoo Finance API response structures

#[derive(Debug, Deserialize)]
struct YahooQuoteResponse {
    #[serde(rename = "quoteResponse")]
    quote_response: YahooQuoteResult,
}

#[derive(Debug, Deserialize)]
struct YahooQuoteResult {
    result: Vec<YahooQuoteData>,
}

#[derive(Debug, Deserialize)]
struct YahooQuoteData {
    #[serde(rename = "regularMarketPrice")]
    regular_market_price: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct YahooChartResponse {
    chart: YahooChart,
}

#[derive(Debug, Deserialize)]
struct YahooChart {
    result: Option<Vec<YahooChartData>>,
}

#[derive(Debug, Deserialize)]
struct YahooChartData {
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: YahooIndicators,
}

#[derive(Debug, Deserialize)]
struct YahooIndicators {
    quote: Vec<YahooChartQuote>,
}

#[derive(Debug, Deserialize)]
struct YahooChartQuote {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
struct YahooOptionsResponse {
    #[serde(rename = "optionChain")]
    option_chain: YahooOptionChain,
}

#[derive(Debug, Deserialize)]
struct YahooOptionChain {
    result: Vec<YahooOptionChainData>,
}

#[derive(Debug, Deserialize)]
struct YahooOptionChainData {
    #[serde(rename = "expirationDates", default)]
    expiration_dates: Vec<i64>,
    #[serde(default)]
    options: Vec<YahooOptions>,
}

#[derive(Debug, Deserialize)]
struct YahooOptions {
    #[serde(default)]
    calls: Vec<YahooOptionData>,
    #[serde(default)]
    puts: Vec<YahooOptionData>,
}

#[derive(Debug, Deserialize)]
struct YahooOptionData {
    #[serde(rename = "contractSymbol")]
    contract_symbol: Option<String>,
    strike: Option<f64>,
    #[serde(rename = "lastPrice")]
    last_price: Option<f64>,
    volume: Option<i64>,
    #[serde(rename = "impliedVolatility")]
    implied_volatility: Option<f64>,
}
