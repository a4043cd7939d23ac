use crate::api::handlers::{
    password::{dummy_verify, verify_password},
    state::{AuthState, RateLimitAction, RateLimitDecision},
    storage::{insert_session, lookup_login_record},
    types::{AccountLogin, LoginResponse},
    utils::{extract_client_ip, normalize_username, valid_password, valid_username},
};
use axum::{
    extract::Extension,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use sqlx::PgPool;
use std::sync::Arc;
use tracing::{debug, error};

#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = AccountLogin,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse, content_type = "application/json"),
        (status = 400, description = "Validation error", body = String),
        (status = 401, description = "Unauthorized", body = String),
        (status = 429, description = "Rate limited", body = String)
    ),
    tag = "auth"
)]
pub async fn login(
    headers: HeaderMap,
    pool: Extension<PgPool>,
    auth_state: Extension<Arc<AuthState>>,
    payload: Option<Json<AccountLogin>>,
) -> impl IntoResponse {
    let account: AccountLogin = match payload {
        Some(Json(payload)) => payload,
        None => return (StatusCode::BAD_REQUEST, "Missing payload".to_string()).into_response(),
    };

    let username_normalized = normalize_username(&account.user);
    if !valid_username(&username_normalized) {
        return (StatusCode::BAD_REQUEST, "Invalid username".to_string()).into_response();
    }

    if !valid_password(&account.password) {
        return (StatusCode::BAD_REQUEST, "Invalid password".to_string()).into_response();
    }

    // Rate-limit before any credential work to keep abuse cheap to reject.
    let client_ip = extract_client_ip(&headers);
    if auth_state
        .rate_limiter()
        .check_ip(client_ip.as_deref(), RateLimitAction::Login)
        == RateLimitDecision::Limited
    {
        return (StatusCode::TOO_MANY_REQUESTS, "Rate limited".to_string()).into_response();
    }
    if auth_state
        .rate_limiter()
        .check_username(&username_normalized, RateLimitAction::Login)
        == RateLimitDecision::Limited
    {
        return (StatusCode::TOO_MANY_REQUESTS, "Rate limited".to_string()).into_response();
    }

    let record = match lookup_login_record(&pool, &username_normalized).await {
        Ok(record) => record,
        Err(err) => {
            error!("Login lookup failed: {err}");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Login failed".to_string(),
            )
                .into_response();
        }
    };

    let Some(record) = record else {
        // Unknown accounts still pay one verification, keeping timing uniform.
        dummy_verify(&account.password);
        debug!("Unknown account");
        return (StatusCode::UNAUTHORIZED, "Unauthorized".to_string()).into_response();
    };

    match verify_password(&account.password, &record.password_hash) {
        Ok(true) => {}
        Ok(false) => {
            debug!("Unauthorized");
            return (StatusCode::UNAUTHORIZED, "Unauthorized".to_string()).into_response();
        }
        Err(err) => {
            error!("Password verification failed: {err}");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Login failed".to_string(),
            )
                .into_response();
        }
    }

    match insert_session(
        &pool,
        record.account_id,
        auth_state.config().session_ttl_seconds(),
    )
    .await
    {
        Ok(token) => {
            debug!("Login successful");
            (StatusCode::OK, Json(LoginResponse { token })).into_response()
        }
        Err(err) => {
            error!("Failed to create session: {err}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Login failed".to_string(),
            )
                .into_response()
        }
    }
}
