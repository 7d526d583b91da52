//! Market context shared by one evaluation pass

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use super::error::{OptionsError, OptionsResult};
use crate::config::PricingConfig;

const SECONDS_PER_DAY: i64 = 86_400;

/// Spot, volatility, rate and time to expiry for one pricing pass
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    /// Underlying spot price
    pub spot: f64,
    /// Annualized volatility fed to the pricer
    pub volatility: f64,
    /// Risk-free rate (decimal)
    pub risk_free_rate: f64,
    /// Time to expiry in years, always > 0
    pub time_to_expiry: f64,
}

impl MarketSnapshot {
    pub fn new(
        spot: f64,
        volatility: f64,
        risk_free_rate: f64,
        time_to_expiry: f64,
    ) -> OptionsResult<Self> {
        let snapshot = Self {
            spot,
            volatility,
            risk_free_rate,
            time_to_expiry,
        };
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Check positivity of spot, volatility and time, and finiteness of the rate
    pub fn validate(&self) -> OptionsResult<()> {
        if !(self.spot.is_finite() && self.spot > 0.0) {
            return Err(OptionsError::invalid_snapshot(format!("spot {} is not positive", self.spot)));
        }
        if !(self.volatility.is_finite() && self.volatility > 0.0) {
            return Err(OptionsError::invalid_snapshot(format!(
                "volatility {} is not positive",
                self.volatility
            )));
        }
        if !(self.time_to_expiry.is_finite() && self.time_to_expiry > 0.0) {
            return Err(OptionsError::invalid_snapshot(format!(
                "time to expiry {} is not positive",
                self.time_to_expiry
            )));
        }
        if !self.risk_free_rate.is_finite() {
            return Err(OptionsError::invalid_snapshot(format!(
                "risk-free rate {} is not finite",
                self.risk_free_rate
            )));
        }
        Ok(())
    }
}

/// Remaining life of a contract
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeToExpiry {
    /// Whole calendar days until the expiry date starts (may be negative)
    pub days: i64,
    /// Years used for pricing, floored to a positive minimum
    pub years: f64,
    /// Whether the floor replaced a non-positive value
    pub floored: bool,
}

impl TimeToExpiry {
    /// Days from `now` to midnight of `expiry`, rounded down, over the
    /// calendar year length. Non-positive results take the configured floor.
    pub fn between(expiry: NaiveDate, now: NaiveDateTime, config: &PricingConfig) -> Self {
        let expiry_start = expiry.and_time(NaiveTime::MIN);
        let days = (expiry_start - now).num_seconds().div_euclid(SECONDS_PER_DAY);
        let raw = days as f64 / config.calendar_days_per_year;

        if raw <= 0.0 {
            tracing::warn!(
                "expiry {} is {} days out, using T = {}",
                expiry,
                days,
                config.min_time_to_expiry
            );
            Self {
                days,
                years: config.min_time_to_expiry,
                floored: true,
            }
        } else {
            Self {
                days,
                years: raw,
                floored: false,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, 0, 0).unwrap()
    }

    #[test]
    fn test_snapshot_validation() {
        assert!(MarketSnapshot::new(100.0, 0.2, 0.05, 1.0).is_ok());
        assert!(MarketSnapshot::new(100.0, 0.2, -0.01, 1.0).is_ok());

        for (spot, vol, rate, t) in [
            (0.0, 0.2, 0.05, 1.0),
            (100.0, 0.0, 0.05, 1.0),
            (100.0, 0.2, 0.05, 0.0),
            (100.0, f64::NAN, 0.05, 1.0),
            (100.0, 0.2, f64::INFINITY, 1.0),
        ] {
            let err = MarketSnapshot::new(spot, vol, rate, t).unwrap_err();
            assert!(matches!(err, OptionsError::InvalidMarketSnapshot(_)));
        }
    }

    #[test]
    fn test_time_to_expiry_whole_days() {
        let config = PricingConfig::default();
        let expiry = NaiveDate::from_ymd_opt(2025, 6, 20).unwrap();

        // 10:00 on the 10th leaves 9 days and 14 hours, which rounds down to 9
        let tte = TimeToExpiry::between(expiry, at(2025, 6, 10, 10), &config);
        assert_eq!(tte.days, 9);
        assert!((tte.years - 9.0 / 365.0).abs() < 1e-12);
        assert!(!tte.floored);
    }

    #[test]
    fn test_time_to_expiry_floor() {
        let config = PricingConfig::default();
        let expiry = NaiveDate::from_ymd_opt(2025, 6, 20).unwrap();

        // Same day, after midnight: negative partial day rounds down to -1
        let tte = TimeToExpiry::between(expiry, at(2025, 6, 20, 9), &config);
        assert_eq!(tte.days, -1);
        assert_eq!(tte.years, 0.0001);
        assert!(tte.floored);

        // Less than a day out: zero whole days
        let tte = TimeToExpiry::between(expiry, at(2025, 6, 19, 9), &config);
        assert_eq!(tte.days, 0);
        assert!(tte.floored);
    }
}
