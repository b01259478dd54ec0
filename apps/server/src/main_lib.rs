use std::sync::Arc;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use goldfolio_core::accounts::{AccountService, AccountServiceTrait};
use goldfolio_core::investments::{InvestmentService, InvestmentServiceTrait};
use goldfolio_core::market_data::PriceBroadcaster;
use goldfolio_market_data::GoldApiProvider;
use goldfolio_storage_sqlite::accounts::AccountRepository;
use goldfolio_storage_sqlite::db;
use goldfolio_storage_sqlite::investments::InvestmentRepository;

use crate::auth::AuthManager;
use crate::config::Config;

pub struct AppState {
    pub account_service: Arc<dyn AccountServiceTrait + Send + Sync>,
    pub investment_service: Arc<dyn InvestmentServiceTrait + Send + Sync>,
    pub broadcaster: Arc<PriceBroadcaster>,
    pub auth: Arc<AuthManager>,
    pub db_path: String,
}

pub fn init_tracing() {
    let log_format = std::env::var("GF_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = db::spawn_writer((*pool).clone());

    let account_repo = Arc::new(AccountRepository::new(pool.clone(), writer.clone()));
    let account_service: Arc<dyn AccountServiceTrait + Send + Sync> =
        Arc::new(AccountService::new(account_repo));

    let investment_repo = Arc::new(InvestmentRepository::new(pool.clone(), writer.clone()));
    let investment_service: Arc<dyn InvestmentServiceTrait + Send + Sync> =
        Arc::new(InvestmentService::new(investment_repo));

    // The broadcaster is wired here and owned by the state; its lifecycle
    // (start/stop) stays with the caller, not with construction.
    let provider = Arc::new(GoldApiProvider::with_url(config.price_feed_url.clone()));
    let broadcaster = Arc::new(PriceBroadcaster::new(provider, config.poll_interval));

    let auth = Arc::new(AuthManager::new(&config.jwt_secret, config.token_ttl));

    Ok(Arc::new(AppState {
        account_service,
        investment_service,
        broadcaster,
        auth,
        db_path,
    }))
}
