//! Identity context extractors.
//!
//! Identity is an external capability: the edge authenticates the user and
//! forwards `X-User-Id` / `X-User-Role` headers. These extractors only
//! surface that context; vendor-ownership facts are resolved against the
//! vendors collection by the services that need them.

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Customer,
    Vendor,
    Admin,
}

impl Role {
    fn parse(value: &str) -> Option<Self> {
        match value {
            "customer" => Some(Role::Customer),
            "vendor" => Some(Role::Vendor),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }
}

/// Authenticated caller context extracted from edge-set headers.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user_id: String,
    pub role: Role,
}

impl AuthContext {
    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.role != Role::Admin {
            return Err(AppError::Forbidden(anyhow::anyhow!("Admin role required")));
        }
        Ok(())
    }
}

fn context_from_parts(parts: &Parts) -> Result<Option<AuthContext>, AppError> {
    let user_id = match parts.headers.get("X-User-Id").and_then(|v| v.to_str().ok()) {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => return Ok(None),
    };

    let role = parts
        .headers
        .get("X-User-Role")
        .and_then(|v| v.to_str().ok())
        .and_then(Role::parse)
        .ok_or_else(|| {
            AppError::AuthError(anyhow::anyhow!("Missing or invalid X-User-Role header"))
        })?;

    let span = tracing::Span::current();
    span.record("user_id", user_id.as_str());

    Ok(Some(AuthContext { user_id, role }))
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        context_from_parts(parts)?
            .ok_or_else(|| AppError::AuthError(anyhow::anyhow!("Missing X-User-Id header")))
    }
}

/// Optional variant for endpoints that accept guest callers
/// (booking creation).
#[derive(Debug, Clone)]
pub struct OptionalAuthContext(pub Option<AuthContext>);

#[async_trait]
impl<S> FromRequestParts<S> for OptionalAuthContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(OptionalAuthContext(context_from_parts(parts)?))
    }
}
