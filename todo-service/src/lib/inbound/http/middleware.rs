use auth::AuthenticatedContext;
use auth::GuardError;
use axum::extract::Request;
use axum::extract::State;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::Response;
use axum::Extension;

use super::handlers::ApiError;
use crate::domain::identity::models::Role;
use crate::inbound::http::router::AppState;

/// Middleware that validates bearer tokens and adds the caller's context to request extensions
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_token_from_header(&req)?;

    let context = state.access_guard.authenticate(token).map_err(|e| {
        if let GuardError::Unauthorized { cause } = &e {
            tracing::warn!(error = %cause, "Token validation failed");
        }
        ApiError::from(e)
    })?;

    tracing::debug!(username = %context.username, role = %context.role, "Request authenticated");
    req.extensions_mut().insert(context);

    Ok(next.run(req).await)
}

/// Middleware that only lets administrators through. Must run after `authenticate`.
pub async fn require_admin(
    State(state): State<AppState>,
    Extension(context): Extension<AuthenticatedContext>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    state
        .access_guard
        .require_role(&context, Role::ADMIN)
        .map_err(|e| {
            tracing::warn!(
                username = %context.username,
                role = %context.role,
                "Administrative access denied"
            );
            ApiError::from(e)
        })?;

    Ok(next.run(req).await)
}

fn extract_token_from_header(req: &Request) -> Result<&str, ApiError> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(|| ApiError::Unauthorized("Invalid token".to_string()))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| ApiError::Unauthorized("Invalid token".to_string()))?;

    bearer_token(auth_str).ok_or_else(|| ApiError::Unauthorized("Invalid token".to_string()))
}

/// Auth scheme names are case-insensitive.
fn bearer_token(header_value: &str) -> Option<&str> {
    let (scheme, token) = header_value.trim().split_once(' ')?;
    let token = token.trim();

    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}
