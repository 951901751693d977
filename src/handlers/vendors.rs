use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dtos::RegisterVendorRequest, error::AppError, middleware::AuthContext, models::Vendor, AppState,
};

/// Register a vendor profile for the calling user. The profile starts
/// `pending` and stays unbookable until an admin approves it.
pub async fn register_vendor(
    State(state): State<AppState>,
    ctx: AuthContext,
    Json(payload): Json<RegisterVendorRequest>,
) -> Result<(StatusCode, Json<Vendor>), AppError> {
    payload.validate()?;

    if state
        .repository
        .find_vendor_by_user(&ctx.user_id)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict(anyhow::anyhow!(
            "Vendor profile already exists"
        )));
    }

    let vendor = Vendor::new(
        ctx.user_id.clone(),
        payload.company_name,
        payload.description,
        payload.contact_email,
        payload.contact_phone,
        payload.location,
    );
    state.repository.insert_vendor(&vendor).await?;

    tracing::info!(vendor_id = %vendor.id, user_id = %ctx.user_id, "Registered vendor");
    Ok((StatusCode::CREATED, Json(vendor)))
}

/// Public vendor lookup; only approved vendors are visible.
pub async fn get_vendor(
    State(state): State<AppState>,
    Path(vendor_id): Path<Uuid>,
) -> Result<Json<Vendor>, AppError> {
    let vendor = state
        .repository
        .find_approved_vendor(vendor_id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Vendor not found")))?;

    Ok(Json(vendor))
}
