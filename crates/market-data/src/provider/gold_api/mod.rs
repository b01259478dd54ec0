//! gold-api.com provider for the XAU/USD spot price.
//!
//! The endpoint returns `{"price": <number>}` alongside metadata fields we
//! ignore. Any schema deviation, non-2xx status, or non-positive price is
//! reported as a typed error; the last good price stays wherever the
//! caller cached it.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::errors::MarketDataError;
use crate::models::SpotPrice;
use crate::provider::SpotPriceProvider;

/// Provider ID constant
const PROVIDER_ID: &str = "GOLD_API";

/// Default feed endpoint (gold priced in USD per troy ounce).
pub const DEFAULT_FEED_URL: &str = "https://api.gold-api.com/price/XAU";

/// Default HTTP request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// API response from gold-api.com
#[derive(Debug, Deserialize)]
struct GoldApiResponse {
    /// Spot price in USD per troy ounce; absent on malformed payloads
    price: Option<f64>,
}

/// gold-api.com spot-price provider.
///
/// # Example
///
/// ```ignore
/// use goldfolio_market_data::provider::gold_api::GoldApiProvider;
///
/// let provider = GoldApiProvider::new();
/// ```
pub struct GoldApiProvider {
    client: Client,
    url: String,
}

impl GoldApiProvider {
    /// Create a provider against the default public endpoint.
    pub fn new() -> Self {
        Self::with_url(DEFAULT_FEED_URL.to_string())
    }

    /// Create a provider against a non-default endpoint (tests, proxies).
    pub fn with_url(url: String) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client, url }
    }

    /// Validates the raw price value and converts it to a decimal.
    fn validate_price(raw: Option<f64>) -> Result<Decimal, MarketDataError> {
        let value = raw.ok_or_else(|| MarketDataError::ValidationFailed {
            message: "Response is missing the price field".to_string(),
        })?;

        if !value.is_finite() || value <= 0.0 {
            return Err(MarketDataError::ValidationFailed {
                message: format!("Price must be a positive number, got {value}"),
            });
        }

        Decimal::try_from(value).map_err(|e| MarketDataError::ValidationFailed {
            message: format!("Failed to convert price to decimal: {e}"),
        })
    }
}

impl Default for GoldApiProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SpotPriceProvider for GoldApiProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn latest(&self) -> Result<SpotPrice, MarketDataError> {
        let response = self.client.get(&self.url).send().await?;

        if !response.status().is_success() {
            return Err(MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("HTTP status {}", response.status()),
            });
        }

        // Non-numeric or missing price fields fail to deserialize here,
        // which is exactly the schema-deviation error the caller expects.
        let body: GoldApiResponse =
            response
                .json()
                .await
                .map_err(|e| MarketDataError::ProviderError {
                    provider: PROVIDER_ID.to_string(),
                    message: e.to_string(),
                })?;

        let price = Self::validate_price(body.price)?;

        Ok(SpotPrice::new(price, Utc::now()))
    }
}
