//! Booking state machine: creation with a frozen financial breakdown, and
//! actor-gated status transitions with their wallet/slot side effects.

use mongodb::bson::{doc, DateTime, Document};
use uuid::Uuid;

use crate::dtos::{CreateBookingRequest, UpdateBookingStatusRequest};
use crate::error::AppError;
use crate::middleware::{AuthContext, Role};
use crate::models::{Booking, BookingStatus, PaymentStatus};
use crate::services::policy::{can_transition, Actor};
use crate::services::{
    commission, metrics, CommissionService, MarketplaceRepository, NotificationService,
    SlotCapacityTracker, WalletLedger,
};

#[derive(Clone)]
pub struct BookingService {
    repository: MarketplaceRepository,
    commission: CommissionService,
    slots: SlotCapacityTracker,
    wallet: WalletLedger,
    notifications: NotificationService,
}

impl BookingService {
    pub fn new(
        repository: MarketplaceRepository,
        commission: CommissionService,
        slots: SlotCapacityTracker,
        wallet: WalletLedger,
        notifications: NotificationService,
    ) -> Self {
        Self {
            repository,
            commission,
            slots,
            wallet,
            notifications,
        }
    }

    /// Create a booking in `pending` with the commission split computed from
    /// the package price and the vendor's effective rate, both frozen onto
    /// the document.
    pub async fn create(
        &self,
        request: CreateBookingRequest,
        customer_id: Option<String>,
    ) -> Result<Booking, AppError> {
        let package = self
            .repository
            .find_active_package(request.package_id)
            .await?
            .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Package not found")))?;

        if package.vendor_id != request.vendor_id {
            return Err(AppError::BadRequest(anyhow::anyhow!(
                "Package does not belong to the given vendor"
            )));
        }

        let vendor = self
            .repository
            .find_approved_vendor(request.vendor_id)
            .await?
            .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Vendor not approved")))?;

        if let Some(slot_id) = request.time_slot_id {
            if !self.slots.check_availability(slot_id).await? {
                return Err(AppError::Conflict(anyhow::anyhow!(
                    "Time slot not available"
                )));
            }
        }

        let rate = self.commission.resolve_rate(&vendor).await?;
        let breakdown = commission::split(package.price, rate);

        let now = DateTime::now();
        let booking = Booking {
            id: Uuid::new_v4(),
            customer_id,
            vendor_id: vendor.id,
            package_id: package.id,
            time_slot_id: request.time_slot_id,
            customer_name: request.customer_name,
            customer_email: request.customer_email,
            customer_phone: request.customer_phone,
            total_amount: breakdown.total_amount,
            commission_amount: breakdown.commission_amount,
            vendor_amount: breakdown.vendor_amount,
            status: BookingStatus::Pending,
            payment_status: PaymentStatus::Unpaid,
            created_at: now,
            updated_at: now,
            confirmed_at: None,
            completed_at: None,
            cancelled_at: None,
            notes: request.notes,
            cancellation_reason: None,
        };

        self.repository.insert_booking(&booking).await?;

        // Capacity is claimed after the insert; the booking and the slot are
        // separate documents and the store gives no cross-document
        // transaction. A claim lost to a concurrent booking leaves this one
        // pending with no seat held.
        if let Some(slot_id) = booking.time_slot_id {
            if !self.slots.reserve(slot_id).await.map_err(AppError::from)? {
                tracing::warn!(
                    booking_id = %booking.id,
                    slot_id = %slot_id,
                    "Slot filled between availability check and reservation"
                );
            }
        }

        metrics::record_booking("created");
        tracing::info!(
            booking_id = %booking.id,
            vendor_id = %vendor.id,
            total_amount = booking.total_amount,
            commission_rate = rate,
            "Created booking"
        );

        Ok(booking)
    }

    /// Apply a status transition for the given caller.
    ///
    /// The status write is a compare-and-set against the status that was
    /// read, and the wallet credit / slot release only run when that write
    /// matched, so a double confirm can never double-credit.
    pub async fn transition(
        &self,
        booking_id: Uuid,
        request: UpdateBookingStatusRequest,
        ctx: &AuthContext,
    ) -> Result<Booking, AppError> {
        let booking = self
            .repository
            .find_booking(booking_id)
            .await?
            .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Booking not found")))?;

        let vendor = self.repository.find_vendor(booking.vendor_id).await?;

        let actor = if ctx.role == Role::Admin {
            Actor::Admin
        } else if vendor
            .as_ref()
            .map(|v| v.user_id == ctx.user_id)
            .unwrap_or(false)
        {
            Actor::Vendor
        } else if booking.customer_id.as_deref() == Some(ctx.user_id.as_str()) {
            Actor::Customer
        } else {
            return Err(AppError::Forbidden(anyhow::anyhow!(
                "Not authorized to update this booking"
            )));
        };

        let from = booking.status;
        let to = request.status;
        if !can_transition(actor, from, to) {
            let detail = match actor {
                Actor::Customer => "Customers can only cancel pending bookings",
                Actor::Vendor => "Invalid status transition for vendor",
                Actor::Admin => unreachable!("admin transitions are unrestricted"),
            };
            return Err(AppError::Forbidden(anyhow::anyhow!("{detail}")));
        }

        let now = DateTime::now();
        let mut update = doc! {
            "status": to.as_str(),
            "updated_at": now,
        };
        if let Some(payment_status) = request.payment_status {
            update.insert(
                "payment_status",
                mongodb::bson::to_bson(&payment_status)
                    .map_err(|e| AppError::InternalError(e.into()))?,
            );
        }
        self.stamp_transition(&booking, to, now, &request, &mut update);

        if !self
            .repository
            .update_booking_status_cas(booking_id, from, update)
            .await?
        {
            return Err(AppError::Conflict(anyhow::anyhow!(
                "Booking status changed concurrently"
            )));
        }

        // Side effects run only after the CAS matched, keyed on the
        // pre-transition status.
        match to {
            BookingStatus::Confirmed if from != BookingStatus::Confirmed => {
                self.wallet
                    .credit(
                        booking.vendor_id,
                        booking.id,
                        booking.total_amount,
                        booking.commission_amount,
                        booking.vendor_amount,
                    )
                    .await?;
                if let Some(vendor) = &vendor {
                    self.notifications.booking_confirmed(&booking, vendor).await;
                }
                metrics::record_booking("confirmed");
                metrics::record_commission(booking.commission_amount);
            }
            BookingStatus::Cancelled if from != BookingStatus::Cancelled => {
                if let Some(slot_id) = booking.time_slot_id {
                    self.slots.release(slot_id).await?;
                }
                metrics::record_booking("cancelled");
            }
            BookingStatus::Completed => {
                metrics::record_booking("completed");
            }
            _ => {}
        }

        tracing::info!(
            booking_id = %booking_id,
            from = from.as_str(),
            to = to.as_str(),
            actor = ?actor,
            "Booking transitioned"
        );

        self.repository
            .find_booking(booking_id)
            .await?
            .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Booking not found")))
    }

    /// Record the transition timestamp (first time only) and cancellation
    /// reason on the update document.
    fn stamp_transition(
        &self,
        booking: &Booking,
        to: BookingStatus,
        now: DateTime,
        request: &UpdateBookingStatusRequest,
        update: &mut Document,
    ) {
        match to {
            BookingStatus::Confirmed => {
                if booking.confirmed_at.is_none() {
                    update.insert("confirmed_at", now);
                }
            }
            BookingStatus::Completed => {
                if booking.completed_at.is_none() {
                    update.insert("completed_at", now);
                }
            }
            BookingStatus::Cancelled => {
                if booking.cancelled_at.is_none() {
                    update.insert("cancelled_at", now);
                }
                if let Some(reason) = &request.cancellation_reason {
                    update.insert("cancellation_reason", reason.clone());
                }
            }
            BookingStatus::Pending => {}
        }
    }

    /// Load a booking visible to the caller: participants and admins only.
    pub async fn get_for(&self, booking_id: Uuid, ctx: &AuthContext) -> Result<Booking, AppError> {
        let booking = self
            .repository
            .find_booking(booking_id)
            .await?
            .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Booking not found")))?;

        if ctx.role == Role::Admin {
            return Ok(booking);
        }
        if booking.customer_id.as_deref() == Some(ctx.user_id.as_str()) {
            return Ok(booking);
        }
        if let Some(vendor) = self.repository.find_vendor(booking.vendor_id).await? {
            if vendor.user_id == ctx.user_id {
                return Ok(booking);
            }
        }

        Err(AppError::Forbidden(anyhow::anyhow!(
            "Not authorized to view this booking"
        )))
    }
}
