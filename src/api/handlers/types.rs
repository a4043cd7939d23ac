//! Request/response types for the auth endpoints.
//!
//! Wire names follow the public API: the account identifier travels as
//! `user` even though it is stored as `username`.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct AccountRegister {
    pub user: String,
    pub password: String,
    pub currency: String,
    pub description: Option<String>,
    pub balance: Option<f64>,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct RegisterResponse {
    pub message: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct AccountLogin {
    pub user: String,
    pub password: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct LoginResponse {
    pub token: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct SessionResponse {
    pub user: String,
    pub currency: String,
    pub balance: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Context, Result};

    #[test]
    fn account_register_round_trips() -> Result<()> {
        let request = AccountRegister {
            user: "alice".to_string(),
            password: "hunter2hunter2".to_string(),
            currency: "EUR".to_string(),
            description: Some("savings".to_string()),
            balance: Some(42.5),
        };
        let value = serde_json::to_value(&request)?;
        let user = value
            .get("user")
            .and_then(serde_json::Value::as_str)
            .context("missing user")?;
        assert_eq!(user, "alice");
        let decoded: AccountRegister = serde_json::from_value(value)?;
        assert_eq!(decoded.currency, "EUR");
        assert_eq!(decoded.balance, Some(42.5));
        Ok(())
    }

    #[test]
    fn account_register_optional_fields_default_to_none() -> Result<()> {
        let decoded: AccountRegister = serde_json::from_str(
            r#"{"user":"bob","password":"hunter2hunter2","currency":"USD"}"#,
        )?;
        assert_eq!(decoded.description, None);
        assert_eq!(decoded.balance, None);
        Ok(())
    }

    #[test]
    fn login_response_round_trips() -> Result<()> {
        let response = LoginResponse {
            token: "opaque".to_string(),
        };
        let value = serde_json::to_value(&response)?;
        let decoded: LoginResponse = serde_json::from_value(value)?;
        assert_eq!(decoded.token, "opaque");
        Ok(())
    }
}
