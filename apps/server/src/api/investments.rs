use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Extension, Json, Router,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use goldfolio_core::investments::{Investment, NewInvestment};

use crate::auth::CurrentAccount;
use crate::error::ApiResult;
use crate::main_lib::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct InvestBody {
    investment_amount: Decimal,
    price_per_oz: Decimal,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InvestResponse {
    id: i64,
    gold_amount: Decimal,
    investment_amount: Decimal,
}

/// Records a purchase at the price the buyer observed.
///
/// The submitted price is persisted verbatim; the server's cached spot
/// price is intentionally not consulted here.
async fn create_investment(
    State(state): State<Arc<AppState>>,
    Extension(CurrentAccount(account_id)): Extension<CurrentAccount>,
    Json(body): Json<InvestBody>,
) -> ApiResult<Json<InvestResponse>> {
    let created = state
        .investment_service
        .record_investment(NewInvestment {
            account_id,
            cash_amount: body.investment_amount,
            unit_price: body.price_per_oz,
        })
        .await?;
    Ok(Json(InvestResponse {
        id: created.id,
        gold_amount: created.quantity,
        investment_amount: created.cash_amount,
    }))
}

async fn list_investments(
    State(state): State<Arc<AppState>>,
    Extension(CurrentAccount(account_id)): Extension<CurrentAccount>,
) -> ApiResult<Json<Vec<Investment>>> {
    let investments = state
        .investment_service
        .get_investments_by_account_id(&account_id)?;
    Ok(Json(investments))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PortfolioResponse {
    total_invested_usd: Decimal,
    total_gold_oz: Decimal,
    average_price: Decimal,
}

async fn get_portfolio(
    State(state): State<Arc<AppState>>,
    Extension(CurrentAccount(account_id)): Extension<CurrentAccount>,
) -> ApiResult<Json<PortfolioResponse>> {
    let summary = state.investment_service.summarize(&account_id)?;
    Ok(Json(PortfolioResponse {
        total_invested_usd: summary.total_invested,
        total_gold_oz: summary.total_quantity,
        average_price: summary.average_unit_price,
    }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/invest", post(create_investment))
        .route("/investments", get(list_investments))
        .route("/portfolio", get(get_portfolio))
}
