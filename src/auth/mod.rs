use crate::state::AppState;
use axum::Router;

pub(crate) mod dto;
pub mod error;
pub mod handlers;
pub mod password;
pub mod repo;
pub mod repo_types;
pub mod services;
pub mod tokens;

pub use services::CredentialService;

pub fn router() -> Router<AppState> {
    handlers::auth_routes()
}
