//! Core data types for the option chain pricer
//!
//! Defines fundamental types:
//! - OptionContract / OptionChain: quoted contracts for one expiry
//! - EnrichedContract: a quote with model price and moneyness
//! - PriceSeries: historical closes of the underlying
//! - MarketSnapshot: spot, volatility, rate and time for one pricing pass

pub mod error;
pub mod option;
pub mod quote;
pub mod series;
pub mod snapshot;

pub use error::*;
pub use option::*;
pub use quote::*;
pub use series::*;
pub use snapshot::*;
