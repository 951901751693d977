use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use mongodb::bson::DateTime;
use uuid::Uuid;
use validator::Validate;

use crate::{
    dtos::{CreatePackageRequest, PackageListQuery},
    error::AppError,
    handlers::require_approved_vendor,
    middleware::AuthContext,
    models::Package,
    AppState,
};

pub async fn create_package(
    State(state): State<AppState>,
    ctx: AuthContext,
    Json(payload): Json<CreatePackageRequest>,
) -> Result<(StatusCode, Json<Package>), AppError> {
    payload.validate()?;

    let vendor = require_approved_vendor(&state, &ctx).await?;
    if payload.vendor_id != vendor.id {
        return Err(AppError::Forbidden(anyhow::anyhow!(
            "Can only create packages for your own vendor account"
        )));
    }

    let now = DateTime::now();
    let package = Package {
        id: Uuid::new_v4(),
        vendor_id: vendor.id,
        name: payload.name,
        description: payload.description,
        price: payload.price,
        duration_minutes: payload.duration_minutes,
        is_active: true,
        created_at: now,
        updated_at: now,
    };
    state.repository.insert_package(&package).await?;

    tracing::info!(package_id = %package.id, vendor_id = %vendor.id, "Created package");
    Ok((StatusCode::CREATED, Json(package)))
}

/// Public package lookup; hidden unless the package is active and its vendor
/// approved.
pub async fn get_package(
    State(state): State<AppState>,
    Path(package_id): Path<Uuid>,
) -> Result<Json<Package>, AppError> {
    let package = state
        .repository
        .find_active_package(package_id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Package not found")))?;

    state
        .repository
        .find_approved_vendor(package.vendor_id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Package vendor not approved")))?;

    Ok(Json(package))
}

pub async fn list_packages(
    State(state): State<AppState>,
    Query(query): Query<PackageListQuery>,
) -> Result<Json<Vec<Package>>, AppError> {
    if let Some(vendor_id) = query.vendor_id {
        state
            .repository
            .find_approved_vendor(vendor_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(anyhow::anyhow!("Vendor not found or not approved"))
            })?;
    }

    let packages = state.repository.list_packages(query.vendor_id).await?;
    Ok(Json(packages))
}
