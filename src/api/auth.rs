use axum::{
    Json,
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use super::types::{CredentialsRequest, MessageResponse};
use super::{ApiError, AppState};
use crate::services::{AuthError, LoginResult};

// ============================================================================
// Middleware
// ============================================================================

/// Identity resolved by the access guard, made available to protected
/// handlers through request extensions.
#[derive(Debug, Clone)]
pub struct AuthUser(pub String);

/// Authentication middleware for the protected routes: requires a valid
/// `Authorization: Bearer <token>` header and records the embedded
/// username as the acting identity.
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(&headers).ok_or(AuthError::Unauthenticated)?;
    let username = state.auth_service.verify_token(token)?;

    request.extensions_mut().insert(AuthUser(username));
    Ok(next.run(request).await)
}

/// Extract the token from an `Authorization: Bearer` header
fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/register
/// Create a new account
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CredentialsRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .auth_service
        .register(&payload.username, &payload.password)
        .await?;

    Ok(Json(MessageResponse {
        message: "User created".to_string(),
    }))
}

/// POST /api/login
/// Authenticate with username and password, returns a bearer token on success
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CredentialsRequest>,
) -> Result<Json<LoginResult>, ApiError> {
    let result = state
        .auth_service
        .login(&payload.username, &payload.password)
        .await?;

    Ok(Json(result))
}
