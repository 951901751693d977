use mongodb::bson::DateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PayoutStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl PayoutStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PayoutStatus::Pending => "pending",
            PayoutStatus::Processing => "processing",
            PayoutStatus::Completed => "completed",
            PayoutStatus::Failed => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, PayoutStatus::Completed | PayoutStatus::Failed)
    }
}

/// An admin-initiated withdrawal against a vendor wallet. Balance-checked at
/// creation, settled exactly once into a terminal state.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Payout {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub vendor_id: Uuid,
    pub amount: f64,
    pub status: PayoutStatus,

    pub settled_by: Option<String>,
    pub settled_at: Option<DateTime>,
    pub settlement_notes: Option<String>,
    pub payout_method: Option<String>,
    pub payout_reference: Option<String>,

    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl Payout {
    pub fn new(vendor_id: Uuid, amount: f64, payout_method: Option<String>) -> Self {
        let now = DateTime::now();
        Self {
            id: Uuid::new_v4(),
            vendor_id,
            amount,
            status: PayoutStatus::Pending,
            settled_by: None,
            settled_at: None,
            settlement_notes: None,
            payout_method,
            payout_reference: None,
            created_at: now,
            updated_at: now,
        }
    }
}
