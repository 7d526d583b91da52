//! Market data provider seam
//!
//! The pricing core never fetches anything itself; everything it needs comes
//! through this trait, fully materialized.

use chrono::NaiveDate;

use crate::core::{OptionChain, OptionsResult, PriceSeries};

/// Source of spot, history, expirations and chains for an underlying
pub trait MarketDataProvider {
    /// Current price of the underlying
    fn spot(&self, symbol: &str) -> OptionsResult<f64>;

    /// Daily closes over `range` (e.g. "1y"), oldest first
    fn price_history(&self, symbol: &str, range: &str) -> OptionsResult<PriceSeries>;

    /// Listed option expirations
    fn expirations(&self, symbol: &str) -> OptionsResult<Vec<NaiveDate>>;

    /// Calls and puts for one expiration
    fn option_chain(&self, symbol: &str, expiry: NaiveDate) -> OptionsResult<OptionChain>;
}
