use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use std::sync::atomic::{AtomicBool, Ordering};

use lazy_static::lazy_static;
use rand::rngs::OsRng;
use tracing::error;

lazy_static! {
    /// Hash checked against when the username does not exist, so a miss
    /// costs the same argon2 work as a wrong password.
    static ref DUMMY_HASH: Option<String> = hash_password("credvault-dummy-password").ok();
}

static DUMMY_READY: AtomicBool = AtomicBool::new(false);

/// Argon2id, v19, m=19456 KiB, t=2, p=1 (the crate defaults, which match
/// the OWASP baseline). The PHC string carries salt and parameters, so it
/// stays verifiable if the defaults move, and it fits the 120-char column.
pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| {
            error!(error = %e, "argon2 hash_password error");
            anyhow::anyhow!(e.to_string())
        })?
        .to_string();
    Ok(hash)
}

/// Constant-time check of `plain` against a stored PHC string. Errors only
/// when `hash` is not a parseable PHC string.
pub fn verify_password(plain: &str, hash: &str) -> anyhow::Result<bool> {
    let parsed = PasswordHash::new(hash).map_err(|e| {
        error!(error = %e, "argon2 parse hash error");
        anyhow::anyhow!(e.to_string())
    })?;
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}

/// Builds the dummy hash now instead of on the first unknown-user login,
/// which would otherwise pay for a hash on top of the verify.
pub fn prepare_dummy_hash() -> bool {
    lazy_static::initialize(&DUMMY_HASH);
    let ready = DUMMY_HASH.is_some();
    DUMMY_READY.store(ready, Ordering::Release);
    ready
}

/// True once [`prepare_dummy_hash`] has built a usable hash.
#[cfg(test)]
pub fn dummy_hash_ready() -> bool {
    DUMMY_READY.load(Ordering::Acquire)
}

/// Burns one verification worth of CPU; the result is always discarded.
pub fn verify_dummy(plain: &str) {
    if let Some(hash) = DUMMY_HASH.as_deref() {
        let _ = verify_password(plain, hash);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_roundtrip() {
        let password = "Secur3P@ssw0rd!";
        let hash = hash_password(password).expect("hashing should succeed");
        assert!(verify_password(password, &hash).expect("verify should succeed"));
    }

    #[test]
    fn verify_rejects_wrong_password() {
        let password = "correct-horse-battery-staple";
        let hash = hash_password(password).expect("hashing should succeed");
        assert!(!verify_password("wrong-password", &hash).expect("verify should not error"));
    }

    #[test]
    fn hash_never_contains_plaintext_and_fits_column() {
        let password = "secret1";
        let hash = hash_password(password).unwrap();
        assert!(!hash.contains(password));
        assert!(hash.starts_with("$argon2id$"));
        assert!(hash.len() <= 120);
    }

    #[test]
    fn salts_differ_but_both_hashes_verify() {
        let a = hash_password("same").unwrap();
        let b = hash_password("same").unwrap();
        assert_ne!(a, b);
        assert!(verify_password("same", &a).unwrap());
        assert!(verify_password("same", &b).unwrap());
    }

    #[test]
    fn verify_errors_on_malformed_hash() {
        let err = verify_password("anything", "not-a-valid-hash").unwrap_err();
        assert!(!err.to_string().is_empty());
    }

    #[test]
    fn dummy_hash_is_available() {
        assert!(prepare_dummy_hash());
        assert!(dummy_hash_ready());
        let hash = DUMMY_HASH.as_deref().unwrap();
        assert!(verify_password("credvault-dummy-password", hash).unwrap());
        verify_dummy("whatever");
    }
}
