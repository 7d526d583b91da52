//! Historical volatility
//!
//! Sample standard deviation of close-to-close log returns, annualized by
//! `sqrt(periods per year)`.

use statrs::statistics::Statistics;

use crate::core::{OptionsError, OptionsResult, PriceSeries};

/// Trading days per year used to annualize daily returns
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// `ln(p[t] / p[t-1])` for each consecutive pair
pub fn log_returns(closes: &[f64]) -> OptionsResult<Vec<f64>> {
    if closes.len() < 2 {
        return Err(OptionsError::insufficient_history(format!(
            "need at least 2 prices, got {}",
            closes.len()
        )));
    }
    if let Some((i, p)) = closes.iter().enumerate().find(|(_, p)| !(p.is_finite() && **p > 0.0)) {
        return Err(OptionsError::invalid_price_series(format!("price {} at index {} is not positive", p, i)));
    }

    Ok(closes.windows(2).map(|w| (w[1] / w[0]).ln()).collect())
}

/// Annualized volatility with an explicit number of periods per year.
///
/// The sample std-dev needs at least 2 returns, so at least 3 prices.
pub fn annualized_volatility(closes: &[f64], periods_per_year: f64) -> OptionsResult<f64> {
    let returns = log_returns(closes)?;
    if returns.len() < 2 {
        return Err(OptionsError::insufficient_history(format!(
            "need at least 2 returns for a sample std-dev, got {}",
            returns.len()
        )));
    }
    let std_dev = returns.iter().std_dev();
    Ok(std_dev * periods_per_year.sqrt())
}

/// Annualized volatility over 252 trading days
pub fn historical_volatility(closes: &[f64]) -> OptionsResult<f64> {
    annualized_volatility(closes, TRADING_DAYS_PER_YEAR)
}

impl PriceSeries {
    /// Annualized historical volatility of this series
    pub fn historical_volatility(&self, periods_per_year: f64) -> OptionsResult<f64> {
        annualized_volatility(&self.closes(), periods_per_year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_flat_series_zero_vol() {
        let vol = historical_volatility(&[100.0, 100.0, 100.0, 100.0]).unwrap();
        assert_eq!(vol, 0.0);
    }

    #[test]
    fn test_insufficient_history() {
        assert!(matches!(
            historical_volatility(&[100.0]),
            Err(OptionsError::InsufficientHistory(_))
        ));
        assert!(matches!(
            historical_volatility(&[]),
            Err(OptionsError::InsufficientHistory(_))
        ));
    }

    #[test]
    fn test_non_positive_price() {
        assert!(matches!(
            historical_volatility(&[100.0, 0.0, 101.0]),
            Err(OptionsError::InvalidPriceSeries(_))
        ));
        assert!(matches!(
            historical_volatility(&[100.0, -5.0]),
            Err(OptionsError::InvalidPriceSeries(_))
        ));
        assert!(historical_volatility(&[100.0, f64::NAN, 101.0]).is_err());
    }

    #[test]
    fn test_known_value() {
        // Returns alternate +ln(1.01) / -ln(1.01)
        let closes = [100.0, 101.0, 100.0, 101.0, 100.0];
        let r = (1.01_f64).ln();
        let mean = 0.0;
        let var = 4.0 * (r - mean).powi(2) / 3.0;
        let expected = var.sqrt() * 252.0_f64.sqrt();

        let vol = historical_volatility(&closes).unwrap();
        assert_relative_eq!(vol, expected, max_relative = 1e-12);
    }

    #[test]
    fn test_single_return_has_no_dispersion() {
        assert!(matches!(
            historical_volatility(&[100.0, 105.0]),
            Err(OptionsError::InsufficientHistory(_))
        ));
        assert!(historical_volatility(&[100.0, 105.0, 103.0]).unwrap() > 0.0);
    }

    #[test]
    fn test_log_returns() {
        let returns = log_returns(&[100.0, 110.0, 99.0]).unwrap();
        assert_eq!(returns.len(), 2);
        assert_relative_eq!(returns[0], (1.1_f64).ln(), max_relative = 1e-12);
        assert_relative_eq!(returns[1], (0.9_f64).ln(), max_relative = 1e-12);
    }

    #[test]
    fn test_periods_scale() {
        let closes = [100.0, 102.0, 99.0, 103.0, 101.0];
        let daily = annualized_volatility(&closes, 1.0).unwrap();
        let annual = annualized_volatility(&closes, 252.0).unwrap();
        assert_relative_eq!(annual, daily * 252.0_f64.sqrt(), max_relative = 1e-12);
    }
}
