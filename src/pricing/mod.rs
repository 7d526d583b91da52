//! Chain pricing
//!
//! - Evaluator: Black-Scholes price, market difference and moneyness per contract
//! - Pipeline: provider data to a priced, filtered chain

pub mod evaluator;
pub mod pipeline;

pub use evaluator::*;
pub use pipeline::*;
