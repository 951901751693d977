use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use mongodb::bson::doc;
use uuid::Uuid;
use validator::Validate;

use crate::{
    dtos::{CreateBookingRequest, MyBookingsQuery, UpdateBookingStatusRequest},
    error::AppError,
    middleware::{AuthContext, OptionalAuthContext, Role},
    models::Booking,
    AppState,
};

/// Create a booking; guests are allowed, so auth is optional.
pub async fn create_booking(
    State(state): State<AppState>,
    OptionalAuthContext(ctx): OptionalAuthContext,
    Json(payload): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<Booking>), AppError> {
    payload.validate()?;

    let customer_id = ctx.map(|c| c.user_id);
    let booking = state.bookings.create(payload, customer_id).await?;

    Ok((StatusCode::CREATED, Json(booking)))
}

/// Bookings for the calling user: the vendor view when the caller has a
/// vendor profile and the vendor role, otherwise the customer view.
pub async fn my_bookings(
    State(state): State<AppState>,
    ctx: AuthContext,
    Query(query): Query<MyBookingsQuery>,
) -> Result<Json<Vec<Booking>>, AppError> {
    let mut filter = if ctx.role == Role::Vendor {
        match state.repository.find_vendor_by_user(&ctx.user_id).await? {
            Some(vendor) => doc! { "vendor_id": vendor.id.to_string() },
            None => return Ok(Json(Vec::new())),
        }
    } else {
        doc! { "customer_id": ctx.user_id.as_str() }
    };

    if let Some(status) = query.status {
        filter.insert("status", status.as_str());
    }

    let bookings = state.repository.list_bookings(filter, 0, 100).await?;
    Ok(Json(bookings))
}

pub async fn get_booking(
    State(state): State<AppState>,
    ctx: AuthContext,
    Path(booking_id): Path<Uuid>,
) -> Result<Json<Booking>, AppError> {
    let booking = state.bookings.get_for(booking_id, &ctx).await?;
    Ok(Json(booking))
}

pub async fn update_booking_status(
    State(state): State<AppState>,
    ctx: AuthContext,
    Path(booking_id): Path<Uuid>,
    Json(payload): Json<UpdateBookingStatusRequest>,
) -> Result<Json<Booking>, AppError> {
    let booking = state.bookings.transition(booking_id, payload, &ctx).await?;
    Ok(Json(booking))
}
