//! Token endpoint

use axum::{extract::State, Form, Json};
use serde::Deserialize;
use tracing::info;

use crate::config::AppState;
use crate::error::{Error, Result};
use crate::models::TokenResponse;

/// Form body for the token endpoint.
///
/// Both fields default to empty so a missing field and an empty one
/// report the same way.
#[derive(Debug, Deserialize)]
pub struct TokenForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// POST /auth/token
///
/// Exchanges form credentials for a signed bearer token.
pub async fn issue_token(
    State(state): State<AppState>,
    Form(form): Form<TokenForm>,
) -> Result<Json<TokenResponse>> {
    info!("POST /auth/token - {}", form.username);

    if form.username.is_empty() || form.password.is_empty() {
        return Err(Error::MissingField);
    }

    let user = state
        .tokens
        .authenticate(&state.users, &form.username, &form.password)
        .await?;
    let access_token = state
        .tokens
        .issue(&user.username)
        .map_err(|e| Error::Internal(e.to_string()))?;

    info!("Token issued for {}", user.username);
    Ok(Json(TokenResponse {
        access_token,
        token_type: "Bearer".to_string(),
    }))
}
