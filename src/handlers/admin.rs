//! Admin-only operations: vendor approval, commission management, payouts,
//! platform-wide listings and stats.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use mongodb::bson::doc;
use uuid::Uuid;
use validator::Validate;

use crate::{
    dtos::{
        AdminBookingsQuery, AdminDashboardStats, ApproveVendorRequest, CreatePayoutRequest,
        PayoutListQuery, SetCommissionRateRequest, SettlePayoutRequest,
        UpdateCommissionSettingsRequest, VendorApprovalStatus,
    },
    error::AppError,
    middleware::AuthContext,
    models::{Booking, CommissionSettings, Payout, Vendor, VendorStatus},
    AppState,
};

/// Vendor applications awaiting review, newest first.
pub async fn list_pending_vendors(
    State(state): State<AppState>,
    ctx: AuthContext,
) -> Result<Json<Vec<Vendor>>, AppError> {
    ctx.require_admin()?;

    let vendors = state
        .repository
        .list_vendors(doc! { "status": "pending" })
        .await?;
    Ok(Json(vendors))
}

/// Approve, reject or suspend a vendor application. Approval creates the
/// vendor's wallet (idempotently) and notifies them.
pub async fn approve_vendor(
    State(state): State<AppState>,
    ctx: AuthContext,
    Path(vendor_id): Path<Uuid>,
    Json(payload): Json<ApproveVendorRequest>,
) -> Result<Json<Vendor>, AppError> {
    ctx.require_admin()?;

    let vendor = state
        .repository
        .find_vendor(vendor_id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Vendor not found")))?;

    let (status, is_approved) = match payload.status {
        VendorApprovalStatus::Approved => (VendorStatus::Approved, true),
        VendorApprovalStatus::Rejected => (VendorStatus::Rejected, false),
        VendorApprovalStatus::Suspended => (VendorStatus::Suspended, false),
    };

    state
        .repository
        .update_vendor_approval(vendor_id, status, is_approved, &ctx.user_id)
        .await?;

    if is_approved {
        state.wallet.ensure_wallet(vendor_id).await?;
        state.notifications.vendor_approved(&vendor).await;
    }

    tracing::info!(
        vendor_id = %vendor_id,
        status = status.as_str(),
        approved_by = %ctx.user_id,
        reason = payload.reason.as_deref().unwrap_or("-"),
        "Vendor approval updated"
    );

    let updated = state
        .repository
        .find_vendor(vendor_id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Vendor not found")))?;
    Ok(Json(updated))
}

pub async fn set_vendor_commission_rate(
    State(state): State<AppState>,
    ctx: AuthContext,
    Path(vendor_id): Path<Uuid>,
    Json(payload): Json<SetCommissionRateRequest>,
) -> Result<StatusCode, AppError> {
    ctx.require_admin()?;
    payload.validate()?;

    if !state
        .repository
        .set_vendor_commission_rate(vendor_id, payload.commission_rate)
        .await?
    {
        return Err(AppError::NotFound(anyhow::anyhow!("Vendor not found")));
    }

    tracing::info!(
        vendor_id = %vendor_id,
        commission_rate = payload.commission_rate,
        "Set vendor commission rate"
    );
    Ok(StatusCode::NO_CONTENT)
}

/// Read the commission settings singleton, creating the default document on
/// first access.
pub async fn get_commission_settings(
    State(state): State<AppState>,
    ctx: AuthContext,
) -> Result<Json<CommissionSettings>, AppError> {
    ctx.require_admin()?;

    if let Some(settings) = state.repository.find_commission_settings().await? {
        return Ok(Json(settings));
    }

    let settings = CommissionSettings::default();
    state
        .repository
        .insert_commission_settings(&settings)
        .await?;
    Ok(Json(settings))
}

pub async fn update_commission_settings(
    State(state): State<AppState>,
    ctx: AuthContext,
    Json(payload): Json<UpdateCommissionSettingsRequest>,
) -> Result<Json<CommissionSettings>, AppError> {
    ctx.require_admin()?;
    payload.validate()?;

    if !state
        .repository
        .update_default_rate(payload.default_rate, &ctx.user_id)
        .await?
    {
        let settings = CommissionSettings {
            default_rate: payload.default_rate,
            updated_by: Some(ctx.user_id.clone()),
            ..CommissionSettings::default()
        };
        state
            .repository
            .insert_commission_settings(&settings)
            .await?;
    }

    let settings = state
        .repository
        .find_commission_settings()
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Commission settings not found")))?;

    tracing::info!(default_rate = payload.default_rate, "Updated commission settings");
    Ok(Json(settings))
}

pub async fn create_payout(
    State(state): State<AppState>,
    ctx: AuthContext,
    Json(payload): Json<CreatePayoutRequest>,
) -> Result<(StatusCode, Json<Payout>), AppError> {
    ctx.require_admin()?;
    payload.validate()?;

    let payout = state.payouts.create(payload).await?;
    Ok((StatusCode::CREATED, Json(payout)))
}

pub async fn settle_payout(
    State(state): State<AppState>,
    ctx: AuthContext,
    Path(payout_id): Path<Uuid>,
    Json(payload): Json<SettlePayoutRequest>,
) -> Result<Json<Payout>, AppError> {
    ctx.require_admin()?;

    let payout = state.payouts.settle(payout_id, payload, &ctx).await?;
    Ok(Json(payout))
}

pub async fn list_payouts(
    State(state): State<AppState>,
    ctx: AuthContext,
    Query(query): Query<PayoutListQuery>,
) -> Result<Json<Vec<Payout>>, AppError> {
    ctx.require_admin()?;

    let mut filter = doc! {};
    if let Some(status) = query.status {
        filter.insert("status", status.as_str());
    }
    if let Some(vendor_id) = query.vendor_id {
        filter.insert("vendor_id", vendor_id.to_string());
    }

    let payouts = state.repository.list_payouts(filter).await?;
    Ok(Json(payouts))
}

pub async fn list_bookings(
    State(state): State<AppState>,
    ctx: AuthContext,
    Query(query): Query<AdminBookingsQuery>,
) -> Result<Json<Vec<Booking>>, AppError> {
    ctx.require_admin()?;

    let mut filter = doc! {};
    if let Some(status) = query.status {
        filter.insert("status", status.as_str());
    }
    if let Some(vendor_id) = query.vendor_id {
        filter.insert("vendor_id", vendor_id.to_string());
    }
    let limit = query.limit.clamp(1, 200);

    let bookings = state
        .repository
        .list_bookings(filter, query.skip, limit)
        .await?;
    Ok(Json(bookings))
}

pub async fn dashboard(
    State(state): State<AppState>,
    ctx: AuthContext,
) -> Result<Json<AdminDashboardStats>, AppError> {
    ctx.require_admin()?;

    let total_vendors = state.repository.count_vendors(doc! {}).await?;
    let pending_vendors = state
        .repository
        .count_vendors(doc! { "status": "pending" })
        .await?;
    let approved_vendors = state
        .repository
        .count_vendors(doc! { "is_approved": true })
        .await?;

    let total_bookings = state.repository.count_bookings(doc! {}).await?;
    let (total_revenue, total_commission) = state.repository.completed_booking_totals().await?;
    let pending_payouts = state.repository.pending_payout_total(None).await?;

    Ok(Json(AdminDashboardStats {
        total_vendors,
        pending_vendors,
        approved_vendors,
        total_bookings,
        total_revenue,
        total_commission,
        pending_payouts,
    }))
}
