use mongodb::bson::DateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Per-vendor running ledger. One document per vendor, created at approval
/// time and mutated only through atomic `$inc` updates.
///
/// Invariant (net of 2dp rounding):
/// `balance == total_earned - total_commission - total_paid_out`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct VendorWallet {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub vendor_id: Uuid,
    pub balance: f64,
    pub total_earned: f64,
    pub total_commission: f64,
    pub total_paid_out: f64,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl VendorWallet {
    pub fn new(vendor_id: Uuid) -> Self {
        let now = DateTime::now();
        Self {
            id: Uuid::new_v4(),
            vendor_id,
            balance: 0.0,
            total_earned: 0.0,
            total_commission: 0.0,
            total_paid_out: 0.0,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    BookingEarnings,
    CommissionDeducted,
    Payout,
}

/// Immutable audit record of one money movement. Append-only; the wallet's
/// running totals can be reconstructed from these rows alone.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SettlementTransaction {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub vendor_id: Uuid,
    /// Set for earnings entries, None for payout entries.
    pub booking_id: Option<Uuid>,
    pub transaction_type: TransactionType,
    pub gross_amount: f64,
    pub commission_amount: f64,
    pub net_amount: f64,
    pub payout_id: Option<Uuid>,
    pub created_at: DateTime,
}
