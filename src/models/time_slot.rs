use mongodb::bson::DateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A vendor's bookable capacity unit for a date/time range.
///
/// Invariant: `0 <= booked_count <= capacity`. `is_available` flips to false
/// once the slot fills, but vendors can also close a slot manually.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TimeSlot {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub vendor_id: Uuid,
    pub package_id: Option<Uuid>,
    /// YYYY-MM-DD
    pub slot_date: String,
    /// HH:MM
    pub start_time: String,
    /// HH:MM
    pub end_time: String,
    pub capacity: i32,
    pub booked_count: i32,
    pub is_available: bool,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl TimeSlot {
    pub fn has_capacity(&self) -> bool {
        self.is_available && self.booked_count < self.capacity
    }
}
