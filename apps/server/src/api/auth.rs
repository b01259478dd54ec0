use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};

use goldfolio_core::accounts::{Account, NewAccount};
use goldfolio_core::errors::{DatabaseError, Error as CoreError};

use crate::auth::{AuthError, CurrentAccount};
use crate::error::{ApiError, ApiResult};
use crate::main_lib::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RegisterBody {
    name: String,
    username: String,
    email: String,
    password: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginBody {
    email: String,
    password: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginResponse {
    access_token: String,
    token_type: String,
    expires_in: u64,
    account: Account,
}

async fn register(
    State(state): State<Arc<AppState>>,
    Json(body): Json<RegisterBody>,
) -> ApiResult<(StatusCode, Json<Account>)> {
    if body.password.trim().is_empty() {
        return Err(ApiError::BadRequest("password is required".to_string()));
    }
    // Hash here so the core never sees a plaintext password.
    let password_hash = state.auth.hash_password(&body.password)?;
    let created = state
        .account_service
        .create_account(NewAccount {
            name: body.name,
            username: body.username,
            email: body.email,
            password_hash,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn login(
    State(state): State<Arc<AppState>>,
    Json(body): Json<LoginBody>,
) -> ApiResult<Json<LoginResponse>> {
    let account = state
        .account_service
        .get_account_by_email(&body.email)?
        .ok_or(AuthError::InvalidCredentials)?;
    state
        .auth
        .verify_password(&account.password_hash, &body.password)?;
    let token = state.auth.issue_token(&account.id)?;
    Ok(Json(LoginResponse {
        access_token: token,
        token_type: "Bearer".to_string(),
        expires_in: state.auth.expires_in().as_secs(),
        account,
    }))
}

async fn me(
    State(state): State<Arc<AppState>>,
    Extension(CurrentAccount(account_id)): Extension<CurrentAccount>,
) -> ApiResult<Json<Account>> {
    match state.account_service.get_account(&account_id) {
        Ok(account) => Ok(Json(account)),
        // A valid token for a vanished account is still unauthenticated.
        Err(CoreError::Database(DatabaseError::NotFound(_))) => Err(ApiError::Unauthorized(
            "Account no longer exists".to_string(),
        )),
        Err(e) => Err(e.into()),
    }
}

pub fn public_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
}

pub fn protected_router() -> Router<Arc<AppState>> {
    Router::new().route("/auth/me", get(me))
}
