//! HTTP API routes.

mod admin;
mod auth;
mod health;
mod investments;
mod stream;

use std::sync::Arc;

use axum::{middleware, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::require_auth;
use crate::config::Config;
use crate::main_lib::AppState;

pub fn app_router(state: Arc<AppState>, config: &Config) -> Router {
    let public = Router::new()
        .merge(auth::public_router())
        .merge(stream::router())
        .merge(health::router());

    let mut protected = Router::new()
        .merge(auth::protected_router())
        .merge(investments::router());
    if config.enable_admin {
        protected = protected.merge(admin::router());
    }
    let protected = protected.layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .nest("/api", public.merge(protected))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
