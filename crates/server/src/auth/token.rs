//! Token issuance and verification.
//!
//! Access tokens are HS256-signed JWTs carrying the username and an
//! expiry timestamp. The service is stateless: any instance holding
//! the same secret accepts tokens issued by any other.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::models::User;
use crate::store::UserStore;

use super::password;

/// Claims carried by every access token.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
}

/// Why an authentication attempt failed. Handlers collapse these into
/// uniform responses; logs and tests keep the distinction.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("user not found")]
    UserNotFound,
    #[error("invalid password")]
    InvalidPassword,
    #[error("invalid token")]
    InvalidToken,
    #[error("store error: {0}")]
    Store(anyhow::Error),
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        AuthError::Store(err)
    }
}

/// Issues bearer tokens and resolves them back to users.
#[derive(Clone)]
pub struct TokenService {
    secret: Vec<u8>,
    ttl: Duration,
}

impl TokenService {
    pub fn new(secret: impl Into<Vec<u8>>, ttl_minutes: i64) -> Self {
        Self {
            secret: secret.into(),
            ttl: Duration::minutes(ttl_minutes),
        }
    }

    /// Sign a token for `username` expiring after the default TTL.
    pub fn issue(&self, username: &str) -> Result<String, jsonwebtoken::errors::Error> {
        self.issue_with_ttl(username, self.ttl)
    }

    /// Sign a token with an explicit lifetime.
    pub fn issue_with_ttl(
        &self,
        username: &str,
        ttl: Duration,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let expiration = Utc::now() + ttl;

        let claims = Claims {
            sub: username.to_owned(),
            exp: expiration.timestamp() as usize,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(&self.secret),
        )
    }

    /// Check a username/password pair against the user directory.
    pub async fn authenticate(
        &self,
        users: &UserStore,
        username: &str,
        password: &str,
    ) -> Result<User, AuthError> {
        let user = users
            .find_by_username(username)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if !password::verify(&user.password_hash, password) {
            warn!("[auth] Failed login attempt for {}", username);
            return Err(AuthError::InvalidPassword);
        }

        Ok(user)
    }

    /// Resolve a bearer token back to its user.
    ///
    /// Every failure cause (malformed token, bad signature, expired or
    /// missing claim, unknown subject) maps to `InvalidToken`.
    pub async fn resolve(&self, users: &UserStore, token: &str) -> Result<User, AuthError> {
        // Expiry is checked by hand below: the library default keeps a
        // 60s leeway and would accept a token expiring this second.
        let mut validation = Validation::default();
        validation.validate_exp = false;

        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(&self.secret),
            &validation,
        )
        .map_err(|_| AuthError::InvalidToken)?;

        if data.claims.exp as i64 <= Utc::now().timestamp() {
            return Err(AuthError::InvalidToken);
        }

        match users.find_by_username(&data.claims.sub).await? {
            Some(user) => Ok(user),
            None => Err(AuthError::InvalidToken),
        }
    }
}
