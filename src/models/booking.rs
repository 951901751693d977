use mongodb::bson::DateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Unpaid,
    Paid,
    Refunded,
}

/// One customer's reservation against one vendor package.
///
/// The financial breakdown (`total_amount`, `commission_amount`,
/// `vendor_amount`) is frozen at creation and never recomputed, so later
/// package price or commission rate changes cannot alter settled money.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Booking {
    #[serde(rename = "_id", with = "uuid::serde::hyphenated")]
    pub id: Uuid,
    /// None for guest bookings.
    pub customer_id: Option<String>,
    #[serde(with = "uuid::serde::hyphenated")]
    pub vendor_id: Uuid,
    #[serde(with = "uuid::serde::hyphenated")]
    pub package_id: Uuid,
    #[serde(with = "crate::models::uuid_opt_hyphenated")]
    pub time_slot_id: Option<Uuid>,

    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: Option<String>,

    pub total_amount: f64,
    pub commission_amount: f64,
    pub vendor_amount: f64,

    pub status: BookingStatus,
    pub payment_status: PaymentStatus,

    pub created_at: DateTime,
    pub updated_at: DateTime,
    pub confirmed_at: Option<DateTime>,
    pub completed_at: Option<DateTime>,
    pub cancelled_at: Option<DateTime>,

    pub notes: Option<String>,
    pub cancellation_reason: Option<String>,
}
