use std::sync::Arc;

use sqlx::AnyPool;
use tracing::{debug, error, info, warn};

use crate::auth::{
    error::AuthError,
    password::{hash_password, prepare_dummy_hash, verify_dummy, verify_password},
    repo::is_unique_violation,
    repo_types::User,
    tokens::TokenIssuer,
};

pub const MAX_USERNAME_LEN: usize = 80;

/// What a successful login hands back.
#[derive(Debug, Clone)]
pub struct LoginGrant {
    pub user_id: i64,
    pub username: String,
    pub token: String,
}

/// Owns the register/authenticate logic over the `users` table.
#[derive(Clone)]
pub struct CredentialService {
    db: AnyPool,
    tokens: Arc<dyn TokenIssuer>,
}

impl CredentialService {
    pub fn new(db: AnyPool, tokens: Arc<dyn TokenIssuer>) -> Self {
        if !prepare_dummy_hash() {
            error!("dummy hash unavailable; unknown-user logins will answer faster");
        }
        Self { db, tokens }
    }

    pub async fn register(
        &self,
        username: Option<&str>,
        password: Option<&str>,
    ) -> Result<i64, AuthError> {
        let (username, password) = require(username, password)?;
        if username.chars().count() > MAX_USERNAME_LEN {
            return Err(AuthError::Validation(format!(
                "username must be at most {MAX_USERNAME_LEN} characters"
            )));
        }

        // Early answer for the common case; the UNIQUE constraint below is
        // what actually guarantees a single row under concurrency.
        if User::find_by_username(&self.db, username).await?.is_some() {
            warn!(%username, "username already registered");
            return Err(AuthError::Conflict);
        }

        let plain = password.to_owned();
        let hash = tokio::task::spawn_blocking(move || hash_password(&plain))
            .await
            .map_err(|e| AuthError::Hashing(e.to_string()))?
            .map_err(|e| AuthError::Hashing(e.to_string()))?;

        let mut tx = self.db.begin().await?;
        let inserted = User::insert_tx(&mut tx, username, &hash).await;
        let id = match inserted {
            Ok(id) => id,
            Err(e) => {
                if let Err(rb) = tx.rollback().await {
                    error!(error = %rb, "rollback after failed insert");
                }
                if is_unique_violation(&e) {
                    warn!(%username, "username registered concurrently");
                    return Err(AuthError::Conflict);
                }
                error!(error = %e, %username, "insert user failed");
                return Err(AuthError::Storage(e));
            }
        };
        tx.commit().await.map_err(|e| {
            error!(error = %e, %username, "commit user failed");
            AuthError::Storage(e)
        })?;

        info!(user_id = id, %username, "user registered");
        Ok(id)
    }

    pub async fn authenticate(
        &self,
        username: Option<&str>,
        password: Option<&str>,
    ) -> Result<LoginGrant, AuthError> {
        let (username, password) = require(username, password)?;

        let user = User::find_by_username(&self.db, username).await.map_err(|e| {
            error!(error = %e, %username, "find_by_username failed");
            AuthError::Storage(e)
        })?;

        let plain = password.to_owned();
        let checked = tokio::task::spawn_blocking(move || match user {
            Some(user) => {
                let ok = match verify_password(&plain, &user.password_hash) {
                    Ok(ok) => ok,
                    Err(e) => {
                        error!(error = %e, user_id = user.id, "stored hash unreadable");
                        false
                    }
                };
                ok.then_some(user)
            }
            None => {
                verify_dummy(&plain);
                None
            }
        })
        .await
        .map_err(|e| AuthError::Hashing(e.to_string()))?;

        let Some(user) = checked else {
            warn!(%username, "login rejected");
            return Err(AuthError::InvalidCredentials);
        };

        let token = self.tokens.issue(&user);
        debug!(user_id = user.id, "session token issued");
        info!(user_id = user.id, %username, "user logged in");
        Ok(LoginGrant {
            user_id: user.id,
            username: user.username,
            token,
        })
    }
}

fn require<'a>(
    username: Option<&'a str>,
    password: Option<&'a str>,
) -> Result<(&'a str, &'a str), AuthError> {
    match (username, password) {
        (Some(u), Some(p)) if !u.is_empty() && !p.is_empty() => Ok((u, p)),
        _ => Err(AuthError::missing_fields()),
    }
}
