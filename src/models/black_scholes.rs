//! Black-Scholes Model
//!
//! Closed-form European option prices on a non-dividend-paying underlying.
//!
//! ```text
//! d1   = (ln(S/K) + (r + σ²/2)·T) / (σ·√T)
//! d2   = d1 - σ·√T
//! call = S·Φ(d1) - K·e^(-rT)·Φ(d2)
//! put  = K·e^(-rT)·Φ(-d2) - S·Φ(-d1)
//! ```
//!
//! [`price`] is the raw formula: it expects `S, K, T, σ > 0` and does not clamp its
//! output, so degenerate inputs can produce tiny negative values or NaN. Use
//! [`price_checked`] when inputs have not been validated upstream.

use std::f64::consts::SQRT_2;

use statrs::function::erf::erfc;

use crate::core::{OptionType, OptionsError, OptionsResult};

/// Standard normal CDF
pub fn norm_cdf(x: f64) -> f64 {
    0.5 * erfc(-x / SQRT_2)
}

/// Black-Scholes d1 parameter
pub fn d1(spot: f64, strike: f64, time: f64, rate: f64, vol: f64) -> f64 {
    ((spot / strike).ln() + (rate + 0.5 * vol * vol) * time) / (vol * time.sqrt())
}

/// Black-Scholes d2 parameter
pub fn d2(spot: f64, strike: f64, time: f64, rate: f64, vol: f64) -> f64 {
    d1(spot, strike, time, rate, vol) - vol * time.sqrt()
}

/// Black-Scholes European option price
pub fn price(
    spot: f64,
    strike: f64,
    time: f64,
    rate: f64,
    vol: f64,
    option_type: OptionType,
) -> f64 {
    let d1 = d1(spot, strike, time, rate, vol);
    let d2 = d1 - vol * time.sqrt();
    let df = (-rate * time).exp();

    match option_type {
        OptionType::Call => spot * norm_cdf(d1) - strike * df * norm_cdf(d2),
        OptionType::Put => strike * df * norm_cdf(-d2) - spot * norm_cdf(-d1),
    }
}

/// [`price`] with input validation
pub fn price_checked(
    spot: f64,
    strike: f64,
    time: f64,
    rate: f64,
    vol: f64,
    option_type: OptionType,
) -> OptionsResult<f64> {
    for (name, value) in [("spot", spot), ("strike", strike), ("time", time), ("volatility", vol)] {
        if !(value.is_finite() && value > 0.0) {
            return Err(OptionsError::invalid_snapshot(format!("{} {} is not positive", name, value)));
        }
    }
    if !rate.is_finite() {
        return Err(OptionsError::invalid_snapshot(format!("rate {} is not finite", rate)));
    }
    Ok(price(spot, strike, time, rate, vol, option_type))
}

/// Price with the kind given as text ("call" / "put")
pub fn price_for_kind(
    spot: f64,
    strike: f64,
    time: f64,
    rate: f64,
    vol: f64,
    kind: &str,
) -> OptionsResult<f64> {
    let option_type: OptionType = kind.parse()?;
    price_checked(spot, strike, time, rate, vol, option_type)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_norm_cdf() {
        assert!((norm_cdf(0.0) - 0.5).abs() < 1e-12);
        assert!((norm_cdf(1.96) - 0.975).abs() < 0.001);
        assert!((norm_cdf(-1.96) - 0.025).abs() < 0.001);
        assert!((norm_cdf(1.0) + norm_cdf(-1.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_reference_prices() {
        let call = price(100.0, 100.0, 1.0, 0.05, 0.20, OptionType::Call);
        let put = price(100.0, 100.0, 1.0, 0.05, 0.20, OptionType::Put);

        assert!((call - 10.4506).abs() < 1e-3);
        assert!((put - 5.5735).abs() < 1e-3);
        assert!((call - put - 4.8771).abs() < 1e-3);
        assert_relative_eq!(call - put, 100.0 - 100.0 * (-0.05_f64).exp(), max_relative = 1e-9);
    }

    #[test]
    fn test_atm_zero_rate_symmetry() {
        for &(s, vol, t) in &[(100.0, 0.2, 1.0), (42.0, 0.65, 0.1), (1500.0, 0.05, 3.0)] {
            let call = price(s, s, t, 0.0, vol, OptionType::Call);
            let put = price(s, s, t, 0.0, vol, OptionType::Put);
            assert_relative_eq!(call, put, max_relative = 1e-9);
        }
    }

    #[test]
    fn test_deep_itm_call_approaches_forward_intrinsic() {
        let call = price(300.0, 100.0, 0.5, 0.05, 0.2, OptionType::Call);
        let intrinsic = 300.0 - 100.0 * (-0.05_f64 * 0.5).exp();
        assert!((call - intrinsic).abs() < 1e-6);
    }

    #[test]
    fn test_tiny_time_floor_is_finite() {
        let call = price(100.0, 90.0, 0.0001, 0.04, 0.3, OptionType::Call);
        assert!(call.is_finite());
        assert!((call - 10.0).abs() < 0.01);
    }

    #[test]
    fn test_price_checked_rejects_bad_inputs() {
        assert!(price_checked(100.0, 100.0, 1.0, 0.05, 0.2, OptionType::Call).is_ok());

        let err = price_checked(100.0, 100.0, 0.0, 0.05, 0.2, OptionType::Call).unwrap_err();
        assert!(matches!(err, OptionsError::InvalidMarketSnapshot(_)));
        assert!(price_checked(100.0, 100.0, 1.0, 0.05, -0.2, OptionType::Put).is_err());
        assert!(price_checked(-1.0, 100.0, 1.0, 0.05, 0.2, OptionType::Put).is_err());
    }

    #[test]
    fn test_price_for_kind() {
        let call = price_for_kind(100.0, 100.0, 1.0, 0.05, 0.2, "Call").unwrap();
        assert!((call - 10.4506).abs() < 1e-3);

        let err = price_for_kind(100.0, 100.0, 1.0, 0.05, 0.2, "binary").unwrap_err();
        assert!(matches!(err, OptionsError::UnsupportedOptionKind(_)));
    }

    proptest! {
        #[test]
        fn put_call_parity(
            spot in 1.0f64..1000.0,
            strike in 1.0f64..1000.0,
            time in 0.01f64..5.0,
            rate in -0.05f64..0.15,
            vol in 0.05f64..2.0,
        ) {
            let call = price(spot, strike, time, rate, vol, OptionType::Call);
            let put = price(spot, strike, time, rate, vol, OptionType::Put);
            let rhs = spot - strike * (-rate * time).exp();
            prop_assert!(((call - put) - rhs).abs() <= 1e-6 * (spot + strike));
        }

        #[test]
        fn atm_zero_rate_call_equals_put(
            spot in 1.0f64..1000.0,
            time in 0.01f64..5.0,
            vol in 0.05f64..2.0,
        ) {
            let call = price(spot, spot, time, 0.0, vol, OptionType::Call);
            let put = price(spot, spot, time, 0.0, vol, OptionType::Put);
            prop_assert!((call - put).abs() <= 1e-9 * spot);
        }
    }
}
