use sqlx::FromRow;

/// User record in the database.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,               // autoincrement, never reused
    pub username: String,      // unique, stored exactly as given
    pub password_hash: String, // argon2 PHC string, never the plaintext
}
