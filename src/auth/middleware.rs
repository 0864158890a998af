//! Authentication + authorization layer. Runs before extractors, so the body is never
//! read for rejected requests.

use super::{parse_basic, required_role};
use crate::error::AppError;
use crate::state::AppState;
use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};

/// Authenticate the Basic credentials, check the role policy, and store the
/// `Principal` in request extensions for handlers.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (username, password) = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(parse_basic)
        .ok_or_else(|| AppError::Unauthorized("missing or malformed credentials".into()))?;

    let principal = state.credentials.authenticate(&username, &password).ok_or_else(|| {
        tracing::warn!(username = %username, "authentication failed");
        AppError::Unauthorized("bad credentials".into())
    })?;

    let required = required_role(request.method());
    if !principal.role.satisfies(required) {
        tracing::warn!(
            username = %principal.username,
            method = %request.method(),
            path = %request.uri().path(),
            "access denied"
        );
        return Err(AppError::Forbidden(format!("{} role required", required.as_str())));
    }

    request.extensions_mut().insert(principal);
    Ok(next.run(request).await)
}
