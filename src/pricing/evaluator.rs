//! Contract evaluation
//!
//! Prices every contract of a chain under one [`MarketSnapshot`], attaches the
//! market-minus-model difference and moneyness, and narrows the result to the
//! near-the-money band.

use serde::{Deserialize, Serialize};

use crate::config::{MoneynessBand, PricingConfig};
use crate::core::{
    EnrichedContract, MarketSnapshot, Moneyness, OptionContract, OptionType, OptionsError,
    OptionsResult,
};
use crate::models::black_scholes;

/// Output of one evaluation pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainEvaluation {
    /// Market context the contracts were priced under
    pub snapshot: MarketSnapshot,
    /// Kind every contract was priced as
    pub option_type: OptionType,
    /// Every input contract, enriched, in input order
    pub contracts: Vec<EnrichedContract>,
    /// Subset of `contracts` inside the moneyness band, in input order
    pub near_the_money: Vec<EnrichedContract>,
}

/// Aggregate view over the near-the-money contracts
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvaluationSummary {
    pub total: usize,
    pub near_the_money: usize,
    pub itm: usize,
    pub otm: usize,
    /// Contracts quoted above their model price
    pub rich: usize,
    /// Mean of last_price - theoretical_price, None when the view is empty
    pub mean_price_diff: Option<f64>,
}

impl ChainEvaluation {
    pub fn summary(&self) -> EvaluationSummary {
        let itm = self
            .near_the_money
            .iter()
            .filter(|c| c.moneyness.is_itm())
            .count();
        let rich = self.near_the_money.iter().filter(|c| c.is_rich()).count();
        let n = self.near_the_money.len();
        let mean_price_diff = if n == 0 {
            None
        } else {
            Some(self.near_the_money.iter().map(|c| c.price_diff).sum::<f64>() / n as f64)
        };

        EvaluationSummary {
            total: self.contracts.len(),
            near_the_money: n,
            itm,
            otm: n - itm,
            rich,
            mean_price_diff,
        }
    }
}

/// Applies the pricer and moneyness classifier across a chain
#[derive(Debug, Clone, Copy, Default)]
pub struct ContractEvaluator {
    band: MoneynessBand,
}

impl ContractEvaluator {
    pub fn new(band: MoneynessBand) -> Self {
        Self { band }
    }

    pub fn from_config(config: &PricingConfig) -> Self {
        Self::new(config.band)
    }

    pub fn band(&self) -> MoneynessBand {
        self.band
    }

    /// Price and classify a single contract. The snapshot must already be valid.
    pub fn enrich(
        &self,
        snapshot: &MarketSnapshot,
        contract: &OptionContract,
        option_type: OptionType,
    ) -> EnrichedContract {
        let theoretical = black_scholes::price(
            snapshot.spot,
            contract.strike,
            snapshot.time_to_expiry,
            snapshot.risk_free_rate,
            snapshot.volatility,
            option_type,
        );
        let moneyness = Moneyness::classify(snapshot.spot, contract.strike, option_type);
        EnrichedContract::new(contract, option_type, theoretical, moneyness)
    }

    /// Enrich every contract, unfiltered, in input order.
    ///
    /// Fails before pricing anything if the snapshot or any strike is invalid.
    pub fn evaluate(
        &self,
        snapshot: &MarketSnapshot,
        contracts: &[OptionContract],
        option_type: OptionType,
    ) -> OptionsResult<Vec<EnrichedContract>> {
        snapshot.validate()?;
        if let Some(bad) = contracts
            .iter()
            .find(|c| !(c.strike.is_finite() && c.strike > 0.0))
        {
            return Err(OptionsError::data(format!(
                "contract {} has non-positive strike {}",
                bad.contract_id, bad.strike
            )));
        }

        Ok(contracts
            .iter()
            .map(|c| self.enrich(snapshot, c, option_type))
            .collect())
    }

    /// Contracts whose strike lies strictly inside the band around `spot`
    pub fn near_the_money(&self, spot: f64, enriched: &[EnrichedContract]) -> Vec<EnrichedContract> {
        enriched
            .iter()
            .filter(|c| self.band.contains(spot, c.strike()))
            .cloned()
            .collect()
    }

    /// Full pass: enrich, then filter
    pub fn evaluate_chain(
        &self,
        snapshot: &MarketSnapshot,
        contracts: &[OptionContract],
        option_type: OptionType,
    ) -> OptionsResult<ChainEvaluation> {
        let enriched = self.evaluate(snapshot, contracts, option_type)?;
        let near_the_money = self.near_the_money(snapshot.spot, &enriched);

        tracing::debug!(
            "evaluated {} {}s, {} near the money (S={:.2}, σ={:.4}, r={:.4}, T={:.4})",
            enriched.len(),
            option_type,
            near_the_money.len(),
            snapshot.spot,
            snapshot.volatility,
            snapshot.risk_free_rate,
            snapshot.time_to_expiry
        );

        Ok(ChainEvaluation {
            snapshot: *snapshot,
            option_type,
            contracts: enriched,
            near_the_money,
        })
    }
}
