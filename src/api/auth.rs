use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Deserialize;
use std::sync::Arc;
use tower_sessions::Session;

use super::validation::require_field;
use super::{AccountDto, ApiError};
use crate::state::SharedState;

/// Session key holding the logged-in account id.
pub const SESSION_ACCOUNT_KEY: &str = "account_id";

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// POST /auth/register
/// Create an account. The email must not already be registered.
pub async fn register(
    State(state): State<Arc<SharedState>>,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let name = require_field(payload.name.as_deref(), "name")?;
    let email = require_field(payload.email.as_deref(), "email")?;
    let password = require_field(payload.password.as_deref(), "password")?;

    let account = state.identity.register(&name, &email, &password).await?;

    tracing::info!("Registered account {} ({})", account.id, account.email);

    Ok((StatusCode::CREATED, Json(AccountDto::from(account))))
}

/// POST /auth/login
/// Verify credentials and start a session. Unknown email and wrong
/// password produce the same response.
pub async fn login(
    State(state): State<Arc<SharedState>>,
    session: Session,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AccountDto>, ApiError> {
    let email = require_field(payload.email.as_deref(), "email")?;
    let password = require_field(payload.password.as_deref(), "password")?;

    let account = state.identity.login(&email, &password).await?;

    session
        .insert(SESSION_ACCOUNT_KEY, account.id)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to create session: {e}")))?;

    Ok(Json(AccountDto::from(account)))
}

/// POST /auth/logout
/// Invalidate the current session
pub async fn logout(session: Session) -> impl IntoResponse {
    let _ = session.flush().await;
    (StatusCode::OK, "Logged out")
}

/// GET /auth/me
/// Current account for the session started by login
pub async fn get_current_account(
    State(state): State<Arc<SharedState>>,
    session: Session,
) -> Result<Json<AccountDto>, ApiError> {
    let account_id = session
        .get::<i32>(SESSION_ACCOUNT_KEY)
        .await
        .map_err(|e| ApiError::internal(format!("Session error: {e}")))?
        .ok_or_else(|| ApiError::Unauthorized("Not authenticated".to_string()))?;

    let account = state
        .store
        .account_by_id(account_id)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Not authenticated".to_string()))?;

    Ok(Json(AccountDto::from(account)))
}
