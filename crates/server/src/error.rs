use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

use crate::auth::AuthError;

#[derive(Debug)]
pub enum Error {
    // Auth Errors
    LoginFail,
    InvalidToken,

    // Validation Errors
    MissingField,

    // Resource Errors
    UserNotFound,
    PostNotFound,
    FileNotFound,
    UsernameTaken,

    // Generic
    BadRequest(String),
    Internal(String),
}

pub type Result<T> = core::result::Result<T, Error>;

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        // Token failures carry a challenge so clients know to retry with Bearer auth.
        let bearer_challenge = matches!(self, Error::InvalidToken);

        let (status, error_message) = match self {
            Error::LoginFail => (
                StatusCode::UNAUTHORIZED,
                "Invalid username or password".to_string(),
            ),
            Error::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                "Could not validate credentials".to_string(),
            ),
            Error::MissingField => (StatusCode::UNPROCESSABLE_ENTITY, "Field required".to_string()),
            Error::UserNotFound => (StatusCode::NOT_FOUND, "User not found".to_string()),
            Error::PostNotFound => (StatusCode::NOT_FOUND, "Post not found".to_string()),
            Error::FileNotFound => (StatusCode::NOT_FOUND, "File not found".to_string()),
            Error::UsernameTaken => (StatusCode::CONFLICT, "Username already taken".to_string()),
            Error::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Error::Internal(msg) => {
                error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        let body = Json(json!({
            "error": {
                "message": error_message
            }
        }));

        let mut response = (status, body).into_response();
        if bearer_challenge {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}

// Both login failure causes collapse to one response so the API never
// reveals whether a username exists.
impl From<AuthError> for Error {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::UserNotFound | AuthError::InvalidPassword => Error::LoginFail,
            AuthError::InvalidToken => Error::InvalidToken,
            AuthError::Store(e) => Error::Internal(e.to_string()),
        }
    }
}

// Allow conversion from other errors (e.g., anyhow, sqlx) easiest via string
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::Internal(err.to_string())
    }
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        Error::Internal(err.to_string())
    }
}
