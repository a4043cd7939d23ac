//! Database helpers for accounts and sessions.

use anyhow::{anyhow, Context, Result};
use sqlx::{PgPool, Row};
use tracing::Instrument;
use uuid::Uuid;

use super::utils::{generate_session_token, hash_session_token, is_unique_violation};

/// Outcome when attempting to create a new account.
#[derive(Debug)]
pub(crate) enum RegisterOutcome {
    Created,
    Conflict,
}

/// Minimal fields needed to verify a login.
pub(crate) struct LoginRecord {
    pub(crate) account_id: Uuid,
    pub(crate) password_hash: String,
}

/// Minimal data returned for a valid session token.
pub(crate) struct SessionRecord {
    pub(crate) username: String,
    pub(crate) currency: String,
    pub(crate) balance: f64,
}

/// Create an account; uniqueness is enforced by the database.
pub(crate) async fn insert_account(
    pool: &PgPool,
    username: &str,
    username_normalized: &str,
    password_hash: &str,
    currency: &str,
    description: &str,
    balance: f64,
) -> Result<RegisterOutcome> {
    let query = r"
        INSERT INTO accounts
            (username, username_normalized, password_hash, currency, description, balance)
        VALUES ($1, $2, $3, $4, $5, $6)
    ";
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "INSERT",
        db.statement = query
    );
    let result = sqlx::query(query)
        .bind(username)
        .bind(username_normalized)
        .bind(password_hash)
        .bind(currency)
        .bind(description)
        .bind(balance)
        .execute(pool)
        .instrument(span)
        .await;

    match result {
        Ok(_) => Ok(RegisterOutcome::Created),
        Err(err) if is_unique_violation(&err) => Ok(RegisterOutcome::Conflict),
        Err(err) => Err(err).context("failed to insert account"),
    }
}

/// Look up login data by normalized username.
pub(crate) async fn lookup_login_record(
    pool: &PgPool,
    username_normalized: &str,
) -> Result<Option<LoginRecord>> {
    let query = "SELECT id, password_hash FROM accounts WHERE username_normalized = $1";
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "SELECT",
        db.statement = query
    );
    let row = sqlx::query(query)
        .bind(username_normalized)
        .fetch_optional(pool)
        .instrument(span)
        .await
        .context("failed to lookup login record")?;

    Ok(row.map(|row| LoginRecord {
        account_id: row.get("id"),
        password_hash: row.get("password_hash"),
    }))
}

pub(crate) async fn insert_session(
    pool: &PgPool,
    account_id: Uuid,
    ttl_seconds: i64,
) -> Result<String> {
    // Generate a random token, store only its hash, and return the raw value
    // so the caller can hand it to the client.
    let query = r"
        INSERT INTO account_sessions (account_id, session_hash, expires_at)
        VALUES ($1, $2, NOW() + ($3 * INTERVAL '1 second'))
    ";
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "INSERT",
        db.statement = query
    );

    for _ in 0..3 {
        let token = generate_session_token()?;
        let token_hash = hash_session_token(&token);
        let result = sqlx::query(query)
            .bind(account_id)
            .bind(token_hash)
            .bind(ttl_seconds)
            .execute(pool)
            .instrument(span.clone())
            .await;

        match result {
            Ok(_) => return Ok(token),
            Err(err) if is_unique_violation(&err) => {}
            Err(err) => return Err(err).context("failed to insert session"),
        }
    }

    Err(anyhow!("failed to generate unique session token"))
}

pub(crate) async fn lookup_session(
    pool: &PgPool,
    token_hash: &[u8],
) -> Result<Option<SessionRecord>> {
    // Only accept unexpired sessions.
    let query = r"
        SELECT accounts.username, accounts.currency, accounts.balance
        FROM account_sessions
        JOIN accounts ON accounts.id = account_sessions.account_id
        WHERE account_sessions.session_hash = $1
          AND account_sessions.expires_at > NOW()
        LIMIT 1
    ";
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "SELECT",
        db.statement = query
    );
    let row = sqlx::query(query)
        .bind(token_hash)
        .fetch_optional(pool)
        .instrument(span)
        .await
        .context("failed to lookup session")?;

    if row.is_none() {
        return Ok(None);
    }

    // Record activity for audit/visibility without extending the session TTL.
    let query = r"
        UPDATE account_sessions
        SET last_seen_at = NOW()
        WHERE session_hash = $1
    ";
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "UPDATE",
        db.statement = query
    );
    sqlx::query(query)
        .bind(token_hash)
        .execute(pool)
        .instrument(span)
        .await
        .context("failed to update session last_seen_at")?;

    Ok(row.map(|row| SessionRecord {
        username: row.get("username"),
        currency: row.get("currency"),
        balance: row.get("balance"),
    }))
}

pub(crate) async fn delete_session(pool: &PgPool, token_hash: &[u8]) -> Result<()> {
    // Logout is idempotent; it's fine if no rows are deleted.
    let query = "DELETE FROM account_sessions WHERE session_hash = $1";
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "DELETE",
        db.statement = query
    );
    sqlx::query(query)
        .bind(token_hash)
        .execute(pool)
        .instrument(span)
        .await
        .context("failed to delete session")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{LoginRecord, RegisterOutcome, SessionRecord};
    use uuid::Uuid;

    #[test]
    fn register_outcome_debug_names() {
        assert_eq!(format!("{:?}", RegisterOutcome::Created), "Created");
        assert_eq!(format!("{:?}", RegisterOutcome::Conflict), "Conflict");
    }

    #[test]
    fn login_record_holds_values() {
        let record = LoginRecord {
            account_id: Uuid::nil(),
            password_hash: "$argon2id$stub".to_string(),
        };
        assert_eq!(record.account_id, Uuid::nil());
        assert!(record.password_hash.starts_with("$argon2id$"));
    }

    #[test]
    fn session_record_holds_values() {
        let record = SessionRecord {
            username: "alice".to_string(),
            currency: "EUR".to_string(),
            balance: 10.0,
        };
        assert_eq!(record.username, "alice");
        assert_eq!(record.currency, "EUR");
        assert!((record.balance - 10.0).abs() < f64::EPSILON);
    }
}
