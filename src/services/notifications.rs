//! Fire-and-forget notification sink.
//!
//! Notifications are persisted for later delivery. A failed insert is logged
//! and discarded; it must never roll back the financial operation that
//! triggered it.

use crate::models::{Booking, Notification, NotificationType, Payout, Vendor};
use crate::services::MarketplaceRepository;

#[derive(Clone)]
pub struct NotificationService {
    repository: MarketplaceRepository,
}

impl NotificationService {
    pub fn new(repository: MarketplaceRepository) -> Self {
        Self { repository }
    }

    async fn dispatch(&self, notification: Notification) {
        if let Err(e) = self.repository.insert_notification(&notification).await {
            tracing::warn!(
                user_id = %notification.user_id,
                notification_type = ?notification.notification_type,
                error = %e,
                "Dropping notification after failed insert"
            );
        }
    }

    /// Notify both sides of a confirmed booking.
    pub async fn booking_confirmed(&self, booking: &Booking, vendor: &Vendor) {
        if let Some(customer_id) = &booking.customer_id {
            self.dispatch(
                Notification::new(
                    customer_id.clone(),
                    NotificationType::BookingConfirmation,
                    "Booking Confirmed".to_string(),
                )
                .with_message(format!(
                    "Your booking with {} has been confirmed.",
                    vendor.company_name
                ))
                .about_booking(booking.id)
                .about_vendor(vendor.id),
            )
            .await;
        }

        self.dispatch(
            Notification::new(
                vendor.user_id.clone(),
                NotificationType::BookingConfirmation,
                "New Booking".to_string(),
            )
            .with_message(format!("New booking from {}", booking.customer_name))
            .about_booking(booking.id),
        )
        .await;
    }

    pub async fn vendor_approved(&self, vendor: &Vendor) {
        self.dispatch(
            Notification::new(
                vendor.user_id.clone(),
                NotificationType::VendorApproval,
                "Vendor Application Approved".to_string(),
            )
            .with_message(
                "Congratulations! Your vendor application has been approved. \
                 You can now start listing packages.",
            )
            .about_vendor(vendor.id),
        )
        .await;
    }

    pub async fn payout_initiated(&self, vendor: &Vendor, payout: &Payout) {
        self.dispatch(
            Notification::new(
                vendor.user_id.clone(),
                NotificationType::PayoutProcessed,
                "Payout Initiated".to_string(),
            )
            .with_message(format!(
                "A payout of {:.2} has been initiated and is being processed.",
                payout.amount
            ))
            .about_vendor(vendor.id),
        )
        .await;
    }

    pub async fn payout_completed(&self, vendor: &Vendor, payout: &Payout) {
        self.dispatch(
            Notification::new(
                vendor.user_id.clone(),
                NotificationType::PayoutProcessed,
                "Payout Completed".to_string(),
            )
            .with_message(format!(
                "Your payout of {:.2} has been processed successfully.",
                payout.amount
            ))
            .about_vendor(vendor.id),
        )
        .await;
    }
}
