use std::{net::SocketAddr, time::Duration};

use goldfolio_core::constants::PRICE_POLL_INTERVAL_SECS;
use goldfolio_market_data::provider::gold_api::DEFAULT_FEED_URL;

use crate::auth::decode_secret_key;

pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub static_dir: String,
    pub jwt_secret: Vec<u8>,
    pub token_ttl: Duration,
    pub price_feed_url: String,
    pub poll_interval: Duration,
    pub enable_admin: bool,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let listen_addr: SocketAddr = std::env::var("GF_LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
            .parse()
            .expect("Invalid GF_LISTEN_ADDR");
        let db_path = std::env::var("GF_DB_PATH").unwrap_or_else(|_| "./db/app.db".into());
        let static_dir = std::env::var("GF_STATIC_DIR").unwrap_or_else(|_| "public".into());
        let jwt_secret = decode_secret_key(
            &std::env::var("GF_JWT_SECRET").expect("GF_JWT_SECRET must be set"),
        )
        .expect("Invalid GF_JWT_SECRET");
        let token_ttl_secs: u64 = std::env::var("GF_TOKEN_TTL_SECS")
            .unwrap_or_else(|_| "86400".into())
            .parse()
            .unwrap_or(86400);
        let price_feed_url =
            std::env::var("GF_PRICE_FEED_URL").unwrap_or_else(|_| DEFAULT_FEED_URL.to_string());
        let poll_interval_secs: u64 = std::env::var("GF_POLL_INTERVAL_SECS")
            .unwrap_or_else(|_| PRICE_POLL_INTERVAL_SECS.to_string())
            .parse()
            .unwrap_or(PRICE_POLL_INTERVAL_SECS);
        let enable_admin = std::env::var("GF_ENABLE_ADMIN")
            .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
            .unwrap_or(false);
        Self {
            listen_addr,
            db_path,
            static_dir,
            jwt_secret,
            token_ttl: Duration::from_secs(token_ttl_secs),
            price_feed_url,
            poll_interval: Duration::from_secs(poll_interval_secs),
            enable_admin,
        }
    }
}
