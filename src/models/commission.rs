use mongodb::bson::DateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Singleton document holding the platform-wide default commission rate.
/// Vendor-specific overrides live on the `Vendor` document.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CommissionSettings {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub default_rate: f64,
    pub min_rate: f64,
    pub max_rate: f64,
    pub updated_at: DateTime,
    pub updated_by: Option<String>,
}

impl Default for CommissionSettings {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4(),
            default_rate: 15.0,
            min_rate: 10.0,
            max_rate: 30.0,
            updated_at: DateTime::now(),
            updated_by: None,
        }
    }
}
