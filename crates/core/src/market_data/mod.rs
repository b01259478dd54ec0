//! Live price distribution.
//!
//! One upstream provider is polled at low frequency; the last good price
//! is cached and changes are fanned out to every registered stream
//! subscriber without per-subscriber polling.

mod broadcaster;

pub use broadcaster::{PriceBroadcaster, PriceEvent, PriceSubscription};
