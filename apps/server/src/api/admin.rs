//! Operational listings over every account and ledger entry.
//!
//! Mounted only when `GF_ENABLE_ADMIN` is set, and always behind auth.

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};

use goldfolio_core::accounts::Account;
use goldfolio_core::investments::Investment;

use crate::error::ApiResult;
use crate::main_lib::AppState;

async fn list_accounts(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Account>>> {
    let accounts = state.account_service.list_accounts()?;
    Ok(Json(accounts))
}

async fn list_investments(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Investment>>> {
    let investments = state.investment_service.get_investments()?;
    Ok(Json(investments))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/admin/accounts", get(list_accounts))
        .route("/admin/investments", get(list_investments))
}
