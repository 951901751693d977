//! HTTP handlers.

pub mod admin;
pub mod bookings;
pub mod packages;
pub mod slots;
pub mod vendors;
pub mod wallets;

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::error::AppError;
use crate::middleware::AuthContext;
use crate::models::Vendor;
use crate::services::get_metrics;
use crate::AppState;

/// Resolve the calling user's approved vendor profile, or fail with 403.
pub(crate) async fn require_approved_vendor(
    state: &AppState,
    ctx: &AuthContext,
) -> Result<Vendor, AppError> {
    let vendor = state
        .repository
        .find_vendor_by_user(&ctx.user_id)
        .await?
        .ok_or_else(|| AppError::Forbidden(anyhow::anyhow!("Vendor profile required")))?;

    if !vendor.is_approved {
        return Err(AppError::Forbidden(anyhow::anyhow!("Vendor not approved")));
    }
    Ok(vendor)
}

pub async fn health_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "service": "marketplace-service",
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}

pub async fn readiness_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "status": "ready" })))
}

pub async fn metrics_endpoint() -> impl IntoResponse {
    (
        StatusCode::OK,
        [("content-type", "text/plain; charset=utf-8")],
        get_metrics(),
    )
}
