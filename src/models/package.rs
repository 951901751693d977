use mongodb::bson::DateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A bookable service package listed by a vendor.
///
/// `price` is the amount snapshotted onto bookings at creation time; editing
/// it later never changes existing bookings.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Package {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub vendor_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub duration_minutes: i64,
    pub is_active: bool,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}
