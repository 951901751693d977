use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::{
    error::AppError,
    middleware::{AuthContext, Role},
    models::{SettlementTransaction, VendorWallet},
    AppState,
};

/// Wallet reads are restricted to the owning vendor and admins.
async fn authorize_wallet_access(
    state: &AppState,
    ctx: &AuthContext,
    vendor_id: Uuid,
) -> Result<(), AppError> {
    if ctx.role == Role::Admin {
        return Ok(());
    }

    let vendor = state
        .repository
        .find_vendor(vendor_id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Vendor not found")))?;

    if vendor.user_id != ctx.user_id {
        return Err(AppError::Forbidden(anyhow::anyhow!(
            "Not authorized to view this wallet"
        )));
    }
    Ok(())
}

pub async fn get_wallet(
    State(state): State<AppState>,
    ctx: AuthContext,
    Path(vendor_id): Path<Uuid>,
) -> Result<Json<VendorWallet>, AppError> {
    authorize_wallet_access(&state, &ctx, vendor_id).await?;

    let wallet = state
        .repository
        .find_wallet(vendor_id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Vendor wallet not found")))?;

    Ok(Json(wallet))
}

/// The audit trail behind the wallet's running totals.
pub async fn list_wallet_transactions(
    State(state): State<AppState>,
    ctx: AuthContext,
    Path(vendor_id): Path<Uuid>,
) -> Result<Json<Vec<SettlementTransaction>>, AppError> {
    authorize_wallet_access(&state, &ctx, vendor_id).await?;

    let transactions = state.repository.list_settlements(vendor_id).await?;
    Ok(Json(transactions))
}
