//! Error types for the option chain pricer

use thiserror::Error;

#[derive(Error, Debug)]
pub enum OptionsError {
    #[error("Insufficient history: {0}")]
    InsufficientHistory(String),

    #[error("Invalid price series: {0}")]
    InvalidPriceSeries(String),

    #[error("Invalid market snapshot: {0}")]
    InvalidMarketSnapshot(String),

    #[error("Unsupported option kind: {0}")]
    UnsupportedOptionKind(String),

    #[error("No data available for {0}")]
    NoData(String),

    #[error("Data error: {0}")]
    Data(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("IO error: {0}")]
    IO(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type OptionsResult<T> = Result<T, OptionsError>;

impl OptionsError {
    pub fn insufficient_history(msg: impl Into<String>) -> Self {
        Self::InsufficientHistory(msg.into())
    }

    pub fn invalid_price_series(msg: impl Into<String>) -> Self {
        Self::InvalidPriceSeries(msg.into())
    }

    pub fn invalid_snapshot(msg: impl Into<String>) -> Self {
        Self::InvalidMarketSnapshot(msg.into())
    }

    pub fn no_data(symbol: impl Into<String>) -> Self {
        Self::NoData(symbol.into())
    }

    pub fn data(msg: impl Into<String>) -> Self {
        Self::Data(msg.into())
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// True for the "no data for ticker" signal
    pub fn is_no_data(&self) -> bool {
        matches!(self, Self::NoData(_))
    }
}
