//! Argon2id password hashing.
//!
//! Hashes are stored as PHC strings so the salt and parameters travel with
//! the hash. Login against an unknown email still runs a full verification
//! (against [`check_unknown_user`]) so response time does not reveal which
//! emails are registered.

use std::sync::LazyLock;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

/// Hash of a throwaway secret, computed once.
static DUMMY_HASH: LazyLock<Option<String>> =
    LazyLock::new(|| hash_password("projectdesk-unknown-user").ok());

/// Hash `password` with Argon2id and a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
}

/// `Ok(true)` when `password` matches the stored PHC `hash`.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, argon2::password_hash::Error> {
    let parsed = PasswordHash::new(hash)?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(e),
    }
}

/// Burn the same work as a real verification against a throwaway hash.
pub fn check_unknown_user(password: &str) {
    if let Some(hash) = DUMMY_HASH.as_deref() {
        let _ = verify_password(password, hash);
    }
}
