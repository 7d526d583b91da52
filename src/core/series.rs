//! Historical price series
//!
//! Closing prices of the underlying, oldest first.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::{OptionsError, OptionsResult};

/// A single closing price
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub timestamp: DateTime<Utc>,
    pub close: f64,
}

impl PricePoint {
    pub fn new(timestamp: DateTime<Utc>, close: f64) -> Self {
        Self { timestamp, close }
    }
}

/// Chronological closing prices with no duplicate timestamps
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Build a series, rejecting out-of-order or duplicate timestamps.
    ///
    /// Price values are not checked here; that happens when returns are taken.
    pub fn new(points: Vec<PricePoint>) -> OptionsResult<Self> {
        if let Some(w) = points.windows(2).find(|w| w[1].timestamp <= w[0].timestamp) {
            return Err(OptionsError::invalid_price_series(format!(
                "timestamps not strictly increasing at {}",
                w[1].timestamp
            )));
        }
        Ok(Self { points })
    }

    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.close).collect()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn day(n: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 2, 21, 0, 0).unwrap() + Duration::days(n)
    }

    #[test]
    fn test_series_in_order() {
        let series = PriceSeries::new(vec![
            PricePoint::new(day(0), 100.0),
            PricePoint::new(day(1), 101.0),
            PricePoint::new(day(2), 99.5),
        ])
        .unwrap();

        assert_eq!(series.len(), 3);
        assert_eq!(series.closes(), vec![100.0, 101.0, 99.5]);
    }

    #[test]
    fn test_series_rejects_duplicates_and_disorder() {
        let dup = PriceSeries::new(vec![
            PricePoint::new(day(0), 100.0),
            PricePoint::new(day(0), 101.0),
        ]);
        assert!(matches!(dup, Err(OptionsError::InvalidPriceSeries(_))));

        let backwards = PriceSeries::new(vec![
            PricePoint::new(day(1), 100.0),
            PricePoint::new(day(0), 101.0),
        ]);
        assert!(backwards.is_err());
    }
}
