//! Time-slot capacity tracker.

use anyhow::Result;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::TimeSlot;
use crate::services::MarketplaceRepository;

#[derive(Clone)]
pub struct SlotCapacityTracker {
    repository: MarketplaceRepository,
}

impl SlotCapacityTracker {
    pub fn new(repository: MarketplaceRepository) -> Self {
        Self { repository }
    }

    /// Non-binding availability read used before a booking is persisted.
    pub async fn check_availability(&self, slot_id: Uuid) -> Result<bool, AppError> {
        let slot = self.repository.find_time_slot(slot_id).await?;
        Ok(slot.map(|s| s.has_capacity()).unwrap_or(false))
    }

    /// Claim one unit of capacity, closing the slot once it fills.
    /// Returns false when the slot was full, closed, or missing.
    pub async fn reserve(&self, slot_id: Uuid) -> Result<bool> {
        if !self.repository.try_reserve_slot(slot_id).await? {
            return Ok(false);
        }
        self.repository.close_slot_if_full(slot_id).await?;
        Ok(true)
    }

    /// Give back one unit of capacity. The count floors at zero and the slot
    /// always re-opens, even if the vendor had closed it manually.
    pub async fn release(&self, slot_id: Uuid) -> Result<()> {
        self.repository.release_slot(slot_id).await
    }

    pub async fn get(&self, slot_id: Uuid) -> Result<Option<TimeSlot>, AppError> {
        Ok(self.repository.find_time_slot(slot_id).await?)
    }
}
