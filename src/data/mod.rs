//! Data fetching
//!
//! Handles:
//! - The provider trait the pricing pipeline consumes
//! - Yahoo Finance API for spot, history and option chains (free)

pub mod provider;
pub mod yahoo;

pub use provider::*;
pub use yahoo::*;
