use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single observation of the spot price, in USD per troy ounce.
///
/// Ephemeral by design: it lives in the broadcaster cache and on the wire
/// to stream subscribers, never in storage. Providers only construct it
/// after validating `price > 0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpotPrice {
    pub price: Decimal,
    pub observed_at: DateTime<Utc>,
}

impl SpotPrice {
    /// Creates a new observation stamped with the given time.
    pub fn new(price: Decimal, observed_at: DateTime<Utc>) -> Self {
        Self { price, observed_at }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_serializes_camel_case() {
        let sample = SpotPrice::new(dec!(2412.5), Utc::now());
        let json = serde_json::to_value(&sample).unwrap();
        assert!(json.get("observedAt").is_some());
        assert!(json.get("price").is_some());
    }
}
