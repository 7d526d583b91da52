//! Configuration for the pricing pipeline

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::{OptionsError, OptionsResult};

fn is_positive(x: f64) -> bool {
    x.is_finite() && x > 0.0
}

/// Near-the-money strike band, as multiples of spot
///
/// Both bounds are exclusive: a strike is kept when
/// `lower * spot < strike < upper * spot`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoneynessBand {
    /// Lower multiple of spot
    /// Default: 0.5
    pub lower: f64,
    /// Upper multiple of spot
    /// Default: 1.5
    pub upper: f64,
}

impl Default for MoneynessBand {
    fn default() -> Self {
        Self {
            lower: 0.5,
            upper: 1.5,
        }
    }
}

impl MoneynessBand {
    pub fn contains(&self, spot: f64, strike: f64) -> bool {
        strike > spot * self.lower && strike < spot * self.upper
    }
}

/// Pricing pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    /// Periods used to annualize daily log-return dispersion
    /// Default: 252
    pub trading_days_per_year: f64,

    /// Calendar days per year when converting days to expiry into years
    /// Default: 365
    pub calendar_days_per_year: f64,

    /// Time to expiry substituted when the computed value is not positive
    /// Default: 0.0001 years
    pub min_time_to_expiry: f64,

    /// Risk-free rate as a decimal
    /// Default: 0.0415
    pub risk_free_rate: f64,

    /// Strike filter for the near-the-money view
    pub band: MoneynessBand,

    /// History window requested from the data provider
    /// Default: "1y"
    pub history_range: String,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            trading_days_per_year: 252.0,
            calendar_days_per_year: 365.0,
            min_time_to_expiry: 0.0001,
            risk_free_rate: 0.0415,
            band: MoneynessBand::default(),
            history_range: "1y".to_string(),
        }
    }
}

impl PricingConfig {
    /// Narrow view: strikes within 20% of spot
    pub fn tight() -> Self {
        Self {
            band: MoneynessBand {
                lower: 0.8,
                upper: 1.2,
            },
            ..Default::default()
        }
    }

    /// Broad view: deep wings included
    pub fn wide() -> Self {
        Self {
            band: MoneynessBand {
                lower: 0.25,
                upper: 2.0,
            },
            ..Default::default()
        }
    }

    pub fn with_rate(mut self, rate: f64) -> Self {
        self.risk_free_rate = rate;
        self
    }

    pub fn validate(&self) -> OptionsResult<()> {
        if !is_positive(self.trading_days_per_year) {
            return Err(OptionsError::invalid_input("trading_days_per_year must be positive"));
        }
        if !is_positive(self.calendar_days_per_year) {
            return Err(OptionsError::invalid_input("calendar_days_per_year must be positive"));
        }
        if !is_positive(self.min_time_to_expiry) {
            return Err(OptionsError::invalid_input("min_time_to_expiry must be positive"));
        }
        if !self.risk_free_rate.is_finite() {
            return Err(OptionsError::invalid_input("risk_free_rate must be finite"));
        }
        let band_ok = self.band.lower.is_finite()
            && self.band.upper.is_finite()
            && self.band.lower >= 0.0
            && self.band.lower < self.band.upper;
        if !band_ok {
            return Err(OptionsError::invalid_input(format!(
                "moneyness band [{}, {}] is empty",
                self.band.lower, self.band.upper
            )));
        }
        if self.history_range.trim().is_empty() {
            return Err(OptionsError::invalid_input("history_range is empty"));
        }
        Ok(())
    }

    /// Load and validate a JSON config file. Missing fields take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> OptionsResult<Self> {
        let json = fs::read_to_string(path.as_ref())?;
        let config: PricingConfig = serde_json::from_str(&json)
            .map_err(|e| OptionsError::Serialization(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_valid() {
        let config = PricingConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.trading_days_per_year, 252.0);
        assert_eq!(config.min_time_to_expiry, 0.0001);
        assert!(PricingConfig::tight().validate().is_ok());
        assert!(PricingConfig::wide().validate().is_ok());
    }

    #[test]
    fn test_band_bounds_exclusive() {
        let band = MoneynessBand::default();
        assert!(!band.contains(100.0, 50.0));
        assert!(band.contains(100.0, 50.01));
        assert!(band.contains(100.0, 149.99));
        assert!(!band.contains(100.0, 150.0));
        assert!(!band.contains(100.0, 200.0));
    }

    #[test]
    fn test_invalid_config() {
        let mut config = PricingConfig::default();
        config.band = MoneynessBand {
            lower: 1.5,
            upper: 0.5,
        };
        assert!(config.validate().is_err());

        let config = PricingConfig::default().with_rate(f64::NAN);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_non_finite_counts_rejected() {
        let mut config = PricingConfig::default();
        config.trading_days_per_year = f64::INFINITY;
        assert!(matches!(config.validate(), Err(OptionsError::InvalidInput(_))));

        let mut config = PricingConfig::default();
        config.calendar_days_per_year = f64::NAN;
        assert!(config.validate().is_err());

        let mut config = PricingConfig::default();
        config.min_time_to_expiry = f64::INFINITY;
        assert!(config.validate().is_err());

        let mut config = PricingConfig::default();
        config.band.upper = f64::INFINITY;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: PricingConfig = serde_json::from_str(r#"{"risk_free_rate": 0.05}"#).unwrap();
        assert_eq!(config.risk_free_rate, 0.05);
        assert_eq!(config.band, MoneynessBand::default());
        assert_eq!(config.history_range, "1y");
    }

    #[test]
    fn test_missing_file() {
        let err = PricingConfig::from_json_file("/nonexistent/pricing.json").unwrap_err();
        assert!(matches!(err, OptionsError::IO(_)));
    }
}
