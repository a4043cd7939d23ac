//! # Monujo (Wallet Account Authentication)
//!
//! `monujo` is the authentication service for wallet accounts. It exposes
//! registration and login endpoints and issues opaque session tokens on
//! successful login.
//!
//! ## Accounts
//!
//! An account is identified by its username, normalized to a lowercase,
//! URL-safe string (`[a-z0-9_-]`). Each account carries wallet metadata: a
//! 3-letter currency code, an optional description, and an opening balance.
//!
//! ## Passwords & sessions
//!
//! Passwords are hashed with Argon2id and stored as PHC strings; raw
//! passwords never touch the database or logs. Session tokens are random
//! 32-byte values handed to the client once; the database only stores a
//! SHA-256 hash, and lookups accept unexpired sessions only.
//!
//! Login failures are uniform: unknown usernames and wrong passwords both
//! return `401 Unauthorized` with the same body.

pub mod api;
pub mod cli;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_commit_hash_format() {
        if GIT_COMMIT_HASH == "unknown" {
            // Acceptable in non-git build environments
            return;
        }
        // Should be a hex string (full SHA-1 is 40 chars, but could be short)
        assert!(
            GIT_COMMIT_HASH.chars().all(|c| c.is_ascii_hexdigit()),
            "GIT_COMMIT_HASH should be a hex string, got: {GIT_COMMIT_HASH}"
        );
        assert!(
            GIT_COMMIT_HASH.len() >= 7,
            "GIT_COMMIT_HASH should be at least 7 characters long, got: {GIT_COMMIT_HASH}"
        );
    }
}
