use crate::api::handlers::{
    password::hash_password,
    state::{AuthState, RateLimitAction, RateLimitDecision},
    storage::{insert_account, RegisterOutcome},
    types::{AccountRegister, RegisterResponse},
    utils::{
        extract_client_ip, normalize_currency, normalize_username, valid_balance, valid_currency,
        valid_password, valid_username, DESCRIPTION_MAX_LENGTH,
    },
};
use axum::{
    extract::Extension,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use sqlx::PgPool;
use std::sync::Arc;
use tracing::error;

#[utoipa::path(
    post,
    path = "/auth/register",
    request_body = AccountRegister,
    responses(
        (status = 201, description = "Account registered", body = RegisterResponse, content_type = "application/json"),
        (status = 400, description = "Validation error", body = String),
        (status = 409, description = "Account with the specified username already exists", body = String),
        (status = 429, description = "Rate limited", body = String)
    ),
    tag = "auth"
)]
pub async fn register(
    headers: HeaderMap,
    pool: Extension<PgPool>,
    auth_state: Extension<Arc<AuthState>>,
    payload: Option<Json<AccountRegister>>,
) -> impl IntoResponse {
    let account: AccountRegister = match payload {
        Some(Json(payload)) => payload,
        None => return (StatusCode::BAD_REQUEST, "Missing payload".to_string()).into_response(),
    };

    // Validate everything before hashing or touching the database.
    let username = account.user.trim().to_string();
    let username_normalized = normalize_username(&username);
    if !valid_username(&username_normalized) {
        return (StatusCode::BAD_REQUEST, "Invalid username".to_string()).into_response();
    }

    if !valid_password(&account.password) {
        return (StatusCode::BAD_REQUEST, "Invalid password".to_string()).into_response();
    }

    let currency = normalize_currency(&account.currency);
    if !valid_currency(&currency) {
        return (StatusCode::BAD_REQUEST, "Invalid currency".to_string()).into_response();
    }

    let description = account.description.unwrap_or_default();
    if description.chars().count() > DESCRIPTION_MAX_LENGTH {
        return (StatusCode::BAD_REQUEST, "Invalid description".to_string()).into_response();
    }

    let balance = account.balance.unwrap_or(0.0);
    if !valid_balance(balance) {
        return (StatusCode::BAD_REQUEST, "Invalid balance".to_string()).into_response();
    }

    let client_ip = extract_client_ip(&headers);
    if auth_state
        .rate_limiter()
        .check_ip(client_ip.as_deref(), RateLimitAction::Register)
        == RateLimitDecision::Limited
    {
        return (StatusCode::TOO_MANY_REQUESTS, "Rate limited".to_string()).into_response();
    }

    let password_hash = match hash_password(&account.password) {
        Ok(hash) => hash,
        Err(err) => {
            error!("Failed to hash password: {err}");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Registration failed".to_string(),
            )
                .into_response();
        }
    };

    match insert_account(
        &pool,
        &username,
        &username_normalized,
        &password_hash,
        &currency,
        &description,
        balance,
    )
    .await
    {
        Ok(RegisterOutcome::Created) => (
            StatusCode::CREATED,
            Json(RegisterResponse {
                message: "Account created".to_string(),
            }),
        )
            .into_response(),
        Ok(RegisterOutcome::Conflict) => {
            error!("Account already exists");
            (StatusCode::CONFLICT, "Account already exists".to_string()).into_response()
        }
        Err(err) => {
            error!("Failed to create account: {err}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Registration failed".to_string(),
            )
                .into_response()
        }
    }
}
