//! Argon2id password hashing.
//!
//! Hashes are stored as PHC strings so parameters can evolve without a
//! migration; verification always uses the parameters recorded in the hash.

use anyhow::{anyhow, Result};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

// Well-formed PHC record with the default parameters but a meaningless
// digest; no password verifies against it.
const DUMMY_PASSWORD_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$AAAAAAAAAAAAAAAAAAAAAA$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

pub(crate) fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| anyhow!("failed to hash password: {err}"))
}

pub(crate) fn verify_password(password: &str, stored_hash: &str) -> Result<bool> {
    let parsed =
        PasswordHash::new(stored_hash).map_err(|err| anyhow!("invalid password hash: {err}"))?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(err) => Err(anyhow!("failed to verify password: {err}")),
    }
}

/// Burn one verification for unknown usernames so login timing does not
/// reveal whether an account exists.
pub(crate) fn dummy_verify(password: &str) {
    if let Ok(parsed) = PasswordHash::new(DUMMY_PASSWORD_HASH) {
        let _ = Argon2::default().verify_password(password.as_bytes(), &parsed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_round_trip() {
        let hash = hash_password("CorrectHorseBatteryStaple").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert_eq!(
            verify_password("CorrectHorseBatteryStaple", &hash).ok(),
            Some(true)
        );
        assert_eq!(verify_password("wrong-password", &hash).ok(), Some(false));
    }

    #[test]
    fn hashes_are_salted() {
        let first = hash_password("CorrectHorseBatteryStaple").unwrap();
        let second = hash_password("CorrectHorseBatteryStaple").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn verify_rejects_garbage_hash() {
        assert!(verify_password("password", "not-a-phc-string").is_err());
    }

    #[test]
    fn dummy_hash_parses() {
        assert!(PasswordHash::new(DUMMY_PASSWORD_HASH).is_ok());
        // Must never panic, and never verify anything.
        dummy_verify("CorrectHorseBatteryStaple");
    }
}
