//! Public authentication endpoints: registration and token issuance.

use axum::extract::{Form, State};
use axum::response::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::app::AppState;
use crate::auth;
use crate::error::ApiError;
use crate::services::account_service::RegisterInput;

/// POST /register/ - create an account with its tutor profile
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterInput>,
) -> Result<Json<Value>, ApiError> {
    let (account, tutor) = state.accounts().register(input).await?;
    tracing::info!(user_id = %account.id, tutor_id = %tutor.id, "registered tutor account");

    Ok(Json(json!({
        "msg": "User registered successfully",
        "user_id": account.id
    })))
}

/// Login form, submitted as `application/x-www-form-urlencoded`.
#[derive(Debug, Deserialize)]
pub struct TokenForm {
    pub username: String,
    pub password: String,
}

/// POST /token/ - exchange credentials for a bearer token
pub async fn token(
    State(state): State<AppState>,
    Form(form): Form<TokenForm>,
) -> Result<Json<Value>, ApiError> {
    let account = state
        .accounts()
        .authenticate(&form.username, &form.password)
        .await?;

    let token = auth::issue(&account.username).map_err(|e| {
        tracing::error!("token issuance failed: {}", e);
        ApiError::internal_server_error("Failed to issue token")
    })?;

    Ok(Json(json!({
        "access_token": token,
        "token_type": "bearer"
    })))
}
