use sqlx::{Any, AnyPool, Transaction};

use crate::auth::repo_types::User;

impl User {
    /// Find a user by exact username.
    pub async fn find_by_username(db: &AnyPool, username: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password_hash
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(db)
        .await
    }

    /// Insert a new user inside the caller's transaction and return its id.
    pub async fn insert_tx(
        tx: &mut Transaction<'_, Any>,
        username: &str,
        password_hash: &str,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO users (username, password_hash)
            VALUES ($1, $2)
            RETURNING id
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .fetch_one(&mut **tx)
        .await
    }
}

pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        // 23505 is Postgres, 2067 is SQLite's SQLITE_CONSTRAINT_UNIQUE
        sqlx::Error::Database(db_err) => {
            db_err.is_unique_violation()
                || db_err
                    .code()
                    .is_some_and(|code| code.as_ref() == "23505" || code.as_ref() == "2067")
        }
        _ => false,
    }
}
