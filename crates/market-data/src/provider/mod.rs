//! Spot-price provider implementations.

pub mod gold_api;
mod traits;

pub use gold_api::GoldApiProvider;
pub use traits::SpotPriceProvider;
