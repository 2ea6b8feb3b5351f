use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use tracing::{debug, instrument, warn};

use crate::{
    auth::{
        dto::{CredentialsRequest, LoginResponse, MessageResponse},
        error::AuthError,
    },
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

/// A body that is not a JSON object counts as missing both fields.
fn credentials(
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<CredentialsRequest, AuthError> {
    match payload {
        Ok(Json(body)) => Ok(body),
        Err(rejection) => {
            warn!(error = %rejection, "unreadable credentials body");
            Err(AuthError::missing_fields())
        }
    }
}

#[instrument(skip_all)]
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), AuthError> {
    let body = credentials(payload)?;
    state
        .credentials
        .register(body.username.as_deref(), body.password.as_deref())
        .await?;
    Ok((StatusCode::CREATED, Json(MessageResponse::new("registered"))))
}

#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, AuthError> {
    let body = credentials(payload)?;
    let grant = state
        .credentials
        .authenticate(body.username.as_deref(), body.password.as_deref())
        .await?;
    debug!(user_id = grant.user_id, username = %grant.username, "login response");
    Ok(Json(LoginResponse {
        message: "login ok".into(),
        token: grant.token,
    }))
}
