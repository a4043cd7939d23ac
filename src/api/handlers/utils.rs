//! Small helpers for account validation and session token handling.

use anyhow::{Context, Result};
use base64ct::{Base64UrlUnpadded, Encoding};
use rand::{rngs::OsRng, RngCore};
use regex::Regex;
use sha2::{Digest, Sha256};

const USERNAME_MIN_LENGTH: usize = 3;
const USERNAME_MAX_LENGTH: usize = 32;
const PASSWORD_MIN_LENGTH: usize = 8;
const PASSWORD_MAX_LENGTH: usize = 128;
pub(crate) const DESCRIPTION_MAX_LENGTH: usize = 256;

/// Normalize a username for lookup/uniqueness checks.
pub(crate) fn normalize_username(username: &str) -> String {
    username.trim().to_lowercase()
}

/// Username check on already-normalized input.
pub(crate) fn valid_username(username_normalized: &str) -> bool {
    let length = username_normalized.len();
    if !(USERNAME_MIN_LENGTH..=USERNAME_MAX_LENGTH).contains(&length) {
        return false;
    }
    Regex::new(r"^[a-z0-9][a-z0-9_-]*$").is_ok_and(|regex| regex.is_match(username_normalized))
}

/// Passwords are free-form; only their length is bounded.
pub(crate) fn valid_password(password: &str) -> bool {
    (PASSWORD_MIN_LENGTH..=PASSWORD_MAX_LENGTH).contains(&password.chars().count())
}

/// Normalize a currency code before validation.
pub(crate) fn normalize_currency(currency: &str) -> String {
    currency.trim().to_uppercase()
}

/// ISO 4217 style 3-letter code on already-normalized input.
pub(crate) fn valid_currency(currency_normalized: &str) -> bool {
    Regex::new(r"^[A-Z]{3}$").is_ok_and(|regex| regex.is_match(currency_normalized))
}

/// Opening balances must be actual, non-negative numbers.
pub(crate) fn valid_balance(balance: f64) -> bool {
    balance.is_finite() && balance >= 0.0
}

/// Create a new session token.
/// The raw value is only returned to the client; the database stores a hash.
pub(crate) fn generate_session_token() -> Result<String> {
    let mut bytes = [0u8; 32];
    OsRng
        .try_fill_bytes(&mut bytes)
        .context("failed to generate session token")?;
    Ok(Base64UrlUnpadded::encode_string(&bytes))
}

/// Hash a session token so raw values never touch the database.
/// The hash is used for lookups when the token is presented.
pub(crate) fn hash_session_token(token: &str) -> Vec<u8> {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hasher.finalize().to_vec()
}

pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().is_some_and(|code| code.as_ref() == "23505"),
        _ => false,
    }
}

/// Extract a client IP for rate limiting from common proxy headers.
pub(crate) fn extract_client_ip(headers: &axum::http::HeaderMap) -> Option<String> {
    let forwarded = headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|value| !value.is_empty());
    if forwarded.is_some() {
        return forwarded.map(str::to_string);
    }
    headers
        .get("x-real-ip")
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}
