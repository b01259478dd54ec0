//! Spot-price provider trait definition.

use async_trait::async_trait;

use crate::errors::MarketDataError;
use crate::models::SpotPrice;

/// Trait for spot-price providers.
///
/// Implement this trait to add support for another price feed. A provider
/// performs exactly one fetch per call and reports failures as typed
/// errors; scheduling and retries belong to the caller.
#[async_trait]
pub trait SpotPriceProvider: Send + Sync {
    /// Unique identifier for this provider.
    ///
    /// Should be a constant string like "GOLD_API". Used for logging and
    /// error messages.
    fn id(&self) -> &'static str;

    /// Fetch the latest spot price.
    ///
    /// # Returns
    ///
    /// A validated positive price on success, or a `MarketDataError`
    /// describing the network, schema, or validation failure.
    async fn latest(&self) -> Result<SpotPrice, MarketDataError>;
}
