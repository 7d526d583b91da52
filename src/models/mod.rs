//! Pricing Models
//!
//! Implements:
//! - Black-Scholes (closed-form European prices)
//! - Historical volatility from close-to-close log returns

pub mod black_scholes;
pub mod volatility;

pub use black_scholes::*;
pub use volatility::*;
