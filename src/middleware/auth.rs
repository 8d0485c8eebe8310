//! Session authentication
//!
//! [`session_middleware`] resolves the signed session token (from the
//! `session` cookie or a `Bearer` header) into an [`AuthenticatedUser`]
//! request extension. It never rejects; handlers opt in through the
//! extractors.

use axum::{
    body::Body,
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use crate::{
    constants::cookies::SESSION,
    error::AppError,
    models::Role,
    services::AuthService,
    state::AppState,
};

use super::cookies::read_cookie;

/// Authenticated user extracted from the session token
#[derive(Debug, Clone, Serialize)]
pub struct AuthenticatedUser {
    pub id: Uuid,
    pub email: String,
    pub role: Role,
}

impl AuthenticatedUser {
    /// Fail with 403 unless the user has `role`
    pub fn require(&self, role: Role) -> Result<(), AppError> {
        if self.role == role {
            Ok(())
        } else {
            Err(AppError::Forbidden("Insufficient permissions".to_string()))
        }
    }
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or(AppError::Unauthorized)
    }
}

/// Optional authenticated user wrapper (never fails)
pub struct OptionalAuth(pub Option<AuthenticatedUser>);

impl<S> FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(OptionalAuth(parts.extensions.get::<AuthenticatedUser>().cloned()))
    }
}

/// Session token from `Authorization: Bearer` or the session cookie
fn session_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .or_else(|| read_cookie(headers, SESSION))
        .filter(|t| !t.is_empty())
}

/// Attach the signed-in user, if any, to the request
pub async fn session_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    if let Some(token) = session_token(request.headers()) {
        match AuthService::verify_token(token, &state.config().auth.jwt_secret) {
            Ok(claims) => {
                let user = AuthenticatedUser {
                    id: claims.sub,
                    email: claims.email,
                    role: claims.role,
                };
                request.extensions_mut().insert(user);
            }
            Err(e) => {
                debug!(path = %request.uri().path(), error = ?e, "Ignoring invalid session token");
            }
        }
    }

    next.run(request).await
}
