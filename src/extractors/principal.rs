//! Extract the authenticated principal stored by `auth::require_auth`.

use crate::auth::Principal;
use crate::error::AppError;
use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};

/// The caller of a route behind `require_auth`.
#[derive(Clone, Debug)]
pub struct CurrentUser(pub Principal);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Principal>()
            .cloned()
            .map(CurrentUser)
            .ok_or_else(|| AppError::Unauthorized("no authenticated principal".into()))
    }
}
