//! Request identity extractor.

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use crate::config::AppState;
use crate::error::{Error, Result};
use crate::models::User;

/// Identity of the caller on protected routes. Extracting it parses
/// the `Authorization: Bearer` header and resolves the token against
/// the user directory; any failure rejects the request with 401.
#[derive(Clone, Debug)]
pub struct Ctx {
    user: User,
}

impl Ctx {
    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn into_user(self) -> User {
        self.user
    }
}

impl FromRequestParts<AppState> for Ctx {
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or(Error::InvalidToken)?;

        if !auth_header.starts_with("Bearer ") {
            return Err(Error::InvalidToken);
        }
        let token = &auth_header[7..];

        let user = state
            .tokens
            .resolve(&state.users, token)
            .await
            .map_err(|_| Error::InvalidToken)?;

        Ok(Ctx { user })
    }
}
