use mongodb::bson::DateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum VendorStatus {
    Pending,
    Approved,
    Rejected,
    Suspended,
}

impl VendorStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VendorStatus::Pending => "pending",
            VendorStatus::Approved => "approved",
            VendorStatus::Rejected => "rejected",
            VendorStatus::Suspended => "suspended",
        }
    }
}

/// A vendor profile. `commission_rate` stays unset until an admin gives the
/// vendor a custom rate; resolution falls back to the global default.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Vendor {
    #[serde(rename = "_id", with = "uuid::serde::hyphenated")]
    pub id: Uuid,
    /// Identity-service user who owns this vendor account.
    pub user_id: String,
    pub company_name: String,
    pub description: Option<String>,
    pub contact_email: String,
    pub contact_phone: String,
    pub location: Option<String>,
    pub status: VendorStatus,
    pub commission_rate: Option<f64>,
    pub is_approved: bool,
    pub created_at: DateTime,
    pub updated_at: DateTime,
    pub approved_at: Option<DateTime>,
    pub approved_by: Option<String>,
}

impl Vendor {
    pub fn new(
        user_id: String,
        company_name: String,
        description: Option<String>,
        contact_email: String,
        contact_phone: String,
        location: Option<String>,
    ) -> Self {
        let now = DateTime::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            company_name,
            description,
            contact_email,
            contact_phone,
            location,
            status: VendorStatus::Pending,
            commission_rate: None,
            is_approved: false,
            created_at: now,
            updated_at: now,
            approved_at: None,
            approved_by: None,
        }
    }
}
