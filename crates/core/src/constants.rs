/// Interval between spot-price polls.
pub const PRICE_POLL_INTERVAL_SECS: u64 = 10;

/// Cadence of keepalive comments on price streams.
pub const STREAM_KEEPALIVE_SECS: u64 = 30;
