use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::{BookingStatus, PaymentStatus, PayoutStatus};

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterVendorRequest {
    #[validate(length(min = 1, message = "Company name is required"))]
    pub company_name: String,
    pub description: Option<String>,
    #[validate(email(message = "Invalid contact email"))]
    pub contact_email: String,
    #[validate(length(min = 1, message = "Contact phone is required"))]
    pub contact_phone: String,
    pub location: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum VendorApprovalStatus {
    Approved,
    Rejected,
    Suspended,
}

#[derive(Debug, Deserialize)]
pub struct ApproveVendorRequest {
    pub status: VendorApprovalStatus,
    pub reason: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct SetCommissionRateRequest {
    #[validate(range(min = 0.0, max = 100.0, message = "Rate must be between 0 and 100"))]
    pub commission_rate: f64,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCommissionSettingsRequest {
    #[validate(range(min = 0.0, max = 100.0, message = "Rate must be between 0 and 100"))]
    pub default_rate: f64,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreatePackageRequest {
    pub vendor_id: Uuid,
    #[validate(length(min = 1, message = "Package name is required"))]
    pub name: String,
    pub description: Option<String>,
    #[validate(range(min = 0.01, message = "Price must be greater than 0"))]
    pub price: f64,
    #[validate(range(min = 1, message = "Duration must be at least one minute"))]
    pub duration_minutes: i64,
}

#[derive(Debug, Deserialize)]
pub struct PackageListQuery {
    pub vendor_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateTimeSlotRequest {
    pub vendor_id: Uuid,
    pub package_id: Option<Uuid>,
    #[validate(length(min = 1, message = "Slot date is required"))]
    pub slot_date: String,
    #[validate(length(min = 1, message = "Start time is required"))]
    pub start_time: String,
    #[validate(length(min = 1, message = "End time is required"))]
    pub end_time: String,
    #[validate(range(min = 1, message = "Capacity must be at least 1"))]
    pub capacity: i32,
}

#[derive(Debug, Deserialize)]
pub struct TimeSlotListQuery {
    pub vendor_id: Uuid,
    pub slot_date: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateBookingRequest {
    pub vendor_id: Uuid,
    pub package_id: Uuid,
    pub time_slot_id: Option<Uuid>,
    #[validate(length(min = 1, message = "Customer name is required"))]
    pub customer_name: String,
    #[validate(email(message = "Invalid customer email"))]
    pub customer_email: String,
    pub customer_phone: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateBookingStatusRequest {
    pub status: BookingStatus,
    pub payment_status: Option<PaymentStatus>,
    pub cancellation_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MyBookingsQuery {
    pub status: Option<BookingStatus>,
}

fn default_limit() -> i64 {
    50
}

#[derive(Debug, Deserialize)]
pub struct AdminBookingsQuery {
    pub status: Option<BookingStatus>,
    pub vendor_id: Option<Uuid>,
    #[serde(default)]
    pub skip: u64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreatePayoutRequest {
    pub vendor_id: Uuid,
    #[validate(range(min = 0.01, message = "Payout amount must be greater than 0"))]
    pub amount: f64,
    pub payout_method: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PayoutSettleStatus {
    Completed,
    Failed,
}

#[derive(Debug, Deserialize)]
pub struct SettlePayoutRequest {
    pub status: PayoutSettleStatus,
    pub settlement_notes: Option<String>,
    pub payout_reference: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PayoutListQuery {
    pub status: Option<PayoutStatus>,
    pub vendor_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct AdminDashboardStats {
    pub total_vendors: u64,
    pub pending_vendors: u64,
    pub approved_vendors: u64,
    pub total_bookings: u64,
    pub total_revenue: f64,
    pub total_commission: f64,
    pub pending_payouts: f64,
}
