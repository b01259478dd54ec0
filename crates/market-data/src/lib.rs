//! Market data access for Goldfolio.
//!
//! This crate owns everything that talks to the upstream spot-price feed:
//! the provider trait, the gold-api.com implementation, and the error
//! taxonomy. It knows nothing about polling cadence or subscribers; the
//! broadcaster in `goldfolio-core` drives it.

pub mod errors;
pub mod models;
pub mod provider;

pub use errors::MarketDataError;
pub use models::SpotPrice;
pub use provider::{GoldApiProvider, SpotPriceProvider};
