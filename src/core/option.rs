//! Option contract definitions
//!
//! Option kind, moneyness and the per-expiry chain records supplied by a data provider.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::error::{OptionsError, OptionsResult};

/// Option type (Call or Put)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    Call,
    Put,
}

impl OptionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OptionType::Call => "call",
            OptionType::Put => "put",
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OptionType {
    type Err = OptionsError;

    /// Accepts "call"/"put" in any case. Anything else is rejected rather than defaulted.
    fn from_str(s: &str) -> OptionsResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "call" | "c" => Ok(OptionType::Call),
            "put" | "p" => Ok(OptionType::Put),
            other => Err(OptionsError::UnsupportedOptionKind(other.to_string())),
        }
    }
}

/// In/out of the money. There is no separate at-the-money state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Moneyness {
    #[serde(rename = "ITM")]
    InTheMoney,
    #[serde(rename = "OTM")]
    OutOfTheMoney,
}

impl Moneyness {
    /// Classify a contract against spot.
    ///
    /// Calls are ITM when `spot > strike`, puts when `spot < strike`.
    /// `spot == strike` lands on OTM for both kinds.
    pub fn classify(spot: f64, strike: f64, option_type: OptionType) -> Self {
        let itm = match option_type {
            OptionType::Call => spot > strike,
            OptionType::Put => spot < strike,
        };
        if itm {
            Moneyness::InTheMoney
        } else {
            Moneyness::OutOfTheMoney
        }
    }

    pub fn is_itm(&self) -> bool {
        matches!(self, Moneyness::InTheMoney)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Moneyness::InTheMoney => "ITM",
            Moneyness::OutOfTheMoney => "OTM",
        }
    }
}

impl fmt::Display for Moneyness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single quoted contract from an option chain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionContract {
    /// Exchange contract symbol (e.g., "NVDA250620C00120000")
    pub contract_id: String,
    /// Strike price
    pub strike: f64,
    /// Last traded price
    pub last_price: f64,
    /// Implied volatility quoted by the provider
    pub implied_volatility: f64,
    /// Traded volume
    pub volume: u64,
}

impl OptionContract {
    pub fn new(
        contract_id: impl Into<String>,
        strike: f64,
        last_price: f64,
        implied_volatility: f64,
        volume: u64,
    ) -> Self {
        Self {
            contract_id: contract_id.into(),
            strike,
            last_price,
            implied_volatility,
            volume,
        }
    }
}

/// An option chain for a single expiry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionChain {
    /// Expiration date
    pub expiry: NaiveDate,
    /// Call contracts, in provider order
    pub calls: Vec<OptionContract>,
    /// Put contracts, in provider order
    pub puts: Vec<OptionContract>,
}

impl OptionChain {
    pub fn new(expiry: NaiveDate) -> Self {
        Self {
            expiry,
            calls: Vec::new(),
            puts: Vec::new(),
        }
    }

    /// Contracts of the given kind
    pub fn contracts(&self, option_type: OptionType) -> &[OptionContract] {
        match option_type {
            OptionType::Call => &self.calls,
            OptionType::Put => &self.puts,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty() && self.puts.is_empty()
    }
}

/// Parse an expiration date in `YYYY-MM-DD` form
pub fn parse_expiry(s: &str) -> OptionsResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|e| OptionsError::invalid_input(format!("bad expiration date '{}': {}", s, e)))
}
