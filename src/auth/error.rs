use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use super::dto::MessageResponse;

pub const MISSING_FIELDS: &str = "username and password are required";
pub const INVALID_CREDENTIALS: &str = "invalid username or password";

/// Everything register/authenticate can fail with.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{0}")]
    Validation(String),
    #[error("username already exists")]
    Conflict,
    /// Unknown user and wrong password share this variant and message.
    #[error("invalid username or password")]
    InvalidCredentials,
    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),
    #[error("password hashing failed: {0}")]
    Hashing(String),
}

impl AuthError {
    pub fn missing_fields() -> Self {
        AuthError::Validation(MISSING_FIELDS.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::Validation(_) => StatusCode::BAD_REQUEST,
            AuthError::Conflict => StatusCode::CONFLICT,
            AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AuthError::Storage(_) | AuthError::Hashing(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to hand to the client; internal causes stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            AuthError::Storage(_) => "internal storage error".into(),
            AuthError::Hashing(_) => "internal error".into(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        (
            self.status(),
            Json(MessageResponse {
                message: self.public_message(),
            }),
        )
            .into_response()
    }
}
