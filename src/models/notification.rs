use mongodb::bson::DateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    BookingConfirmation,
    VendorApproval,
    BookingCancelled,
    PayoutProcessed,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Notification {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub user_id: String,
    pub notification_type: NotificationType,
    pub title: String,
    pub message: Option<String>,
    pub related_booking_id: Option<Uuid>,
    pub related_vendor_id: Option<Uuid>,
    pub is_read: bool,
    pub created_at: DateTime,
}

impl Notification {
    pub fn new(user_id: String, notification_type: NotificationType, title: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            notification_type,
            title,
            message: None,
            related_booking_id: None,
            related_vendor_id: None,
            is_read: false,
            created_at: DateTime::now(),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn about_booking(mut self, booking_id: Uuid) -> Self {
        self.related_booking_id = Some(booking_id);
        self
    }

    pub fn about_vendor(mut self, vendor_id: Uuid) -> Self {
        self.related_vendor_id = Some(vendor_id);
        self
    }
}
