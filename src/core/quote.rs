//! Option quotes compared against the model
//!
//! An [`EnrichedContract`] is a market quote with its Black-Scholes price,
//! the market-minus-model difference and its moneyness attached.

use serde::{Deserialize, Serialize};

use super::option::{Moneyness, OptionContract, OptionType};

/// Market quote plus model outputs. Built once per evaluation pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedContract {
    /// The quoted contract, copied from the chain
    #[serde(flatten)]
    pub contract: OptionContract,
    /// Kind the contract was priced as
    pub option_type: OptionType,
    /// Black-Scholes price
    pub theoretical_price: f64,
    /// last_price - theoretical_price
    pub price_diff: f64,
    /// ITM / OTM relative to spot
    pub moneyness: Moneyness,
}

impl EnrichedContract {
    pub fn new(
        contract: &OptionContract,
        option_type: OptionType,
        theoretical_price: f64,
        moneyness: Moneyness,
    ) -> Self {
        Self {
            contract: contract.clone(),
            option_type,
            theoretical_price,
            price_diff: contract.last_price - theoretical_price,
            moneyness,
        }
    }

    pub fn strike(&self) -> f64 {
        self.contract.strike
    }

    /// Positive when the market prices the contract above the model
    pub fn is_rich(&self) -> bool {
        self.price_diff > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_diff() {
        let contract = OptionContract::new("NVDA250620C00120000", 120.0, 7.25, 0.45, 1500);
        let enriched = EnrichedContract::new(&contract, OptionType::Call, 6.75, Moneyness::InTheMoney);

        assert!((enriched.price_diff - 0.5).abs() < 1e-12);
        assert!(enriched.is_rich());
        assert_eq!(enriched.strike(), 120.0);
        assert_eq!(enriched.contract, contract);
    }

    #[test]
    fn test_serialized_shape() {
        let contract = OptionContract::new("X", 100.0, 1.0, 0.3, 0);
        let enriched = EnrichedContract::new(&contract, OptionType::Put, 2.0, Moneyness::OutOfTheMoney);

        let value = serde_json::to_value(&enriched).unwrap();
        assert_eq!(value["contract_id"], "X");
        assert_eq!(value["option_type"], "put");
        assert_eq!(value["moneyness"], "OTM");
        assert_eq!(value["price_diff"], -1.0);
    }
}
