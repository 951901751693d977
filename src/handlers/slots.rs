use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use mongodb::bson::DateTime;
use uuid::Uuid;
use validator::Validate;

use crate::{
    dtos::{CreateTimeSlotRequest, TimeSlotListQuery},
    error::AppError,
    handlers::require_approved_vendor,
    middleware::AuthContext,
    models::TimeSlot,
    AppState,
};

pub async fn create_time_slot(
    State(state): State<AppState>,
    ctx: AuthContext,
    Json(payload): Json<CreateTimeSlotRequest>,
) -> Result<(StatusCode, Json<TimeSlot>), AppError> {
    payload.validate()?;

    let vendor = require_approved_vendor(&state, &ctx).await?;
    if payload.vendor_id != vendor.id {
        return Err(AppError::Forbidden(anyhow::anyhow!(
            "Can only create time slots for your own vendor account"
        )));
    }

    let now = DateTime::now();
    let slot = TimeSlot {
        id: Uuid::new_v4(),
        vendor_id: vendor.id,
        package_id: payload.package_id,
        slot_date: payload.slot_date,
        start_time: payload.start_time,
        end_time: payload.end_time,
        capacity: payload.capacity,
        booked_count: 0,
        is_available: true,
        created_at: now,
        updated_at: now,
    };
    state.repository.insert_time_slot(&slot).await?;

    tracing::info!(slot_id = %slot.id, vendor_id = %vendor.id, "Created time slot");
    Ok((StatusCode::CREATED, Json(slot)))
}

pub async fn list_time_slots(
    State(state): State<AppState>,
    Query(query): Query<TimeSlotListQuery>,
) -> Result<Json<Vec<TimeSlot>>, AppError> {
    let slots = state
        .repository
        .list_time_slots(query.vendor_id, query.slot_date.as_deref())
        .await?;
    Ok(Json(slots))
}

/// Delete a slot. Forbidden while the slot still carries bookings.
pub async fn delete_time_slot(
    State(state): State<AppState>,
    ctx: AuthContext,
    Path(slot_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let vendor = require_approved_vendor(&state, &ctx).await?;

    let slot = state
        .repository
        .find_time_slot(slot_id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Time slot not found")))?;

    if slot.vendor_id != vendor.id {
        return Err(AppError::Forbidden(anyhow::anyhow!(
            "Can only delete your own time slots"
        )));
    }
    if slot.booked_count > 0 {
        return Err(AppError::Conflict(anyhow::anyhow!(
            "Cannot delete slot with existing bookings"
        )));
    }

    // The delete re-checks booked_count, so a booking racing this request
    // keeps the slot alive.
    if !state.repository.delete_empty_slot(slot_id).await? {
        return Err(AppError::Conflict(anyhow::anyhow!(
            "Cannot delete slot with existing bookings"
        )));
    }

    tracing::info!(slot_id = %slot_id, "Deleted time slot");
    Ok(StatusCode::NO_CONTENT)
}
