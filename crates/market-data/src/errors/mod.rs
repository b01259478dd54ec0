//! Error types for spot-price fetches.

use thiserror::Error;

/// Errors that can occur while fetching a spot price.
///
/// Every variant carries enough context to produce a human-readable
/// message for subscribers; none of them is retried here. Retrying is
/// temporal and belongs to the poll loop driving the provider.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// The feed answered, but not with a usable payload (non-2xx status
    /// or a body that does not parse as the expected schema).
    #[error("Provider error: {provider} - {message}")]
    ProviderError {
        /// The provider that returned the error
        provider: String,
        /// The error message from the provider
        message: String,
    },

    /// The response parsed, but the price failed validation.
    #[error("Validation failed: {message}")]
    ValidationFailed {
        /// Description of the validation failure
        message: String,
    },

    /// A network error occurred while communicating with the provider.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_embeds_cause() {
        let error = MarketDataError::ProviderError {
            provider: "GOLD_API".to_string(),
            message: "HTTP status 503 Service Unavailable".to_string(),
        };
        assert_eq!(
            format!("{}", error),
            "Provider error: GOLD_API - HTTP status 503 Service Unavailable"
        );

        let error = MarketDataError::ValidationFailed {
            message: "Price must be a positive number, got -1".to_string(),
        };
        assert_eq!(
            format!("{}", error),
            "Validation failed: Price must be a positive number, got -1"
        );
    }
}
