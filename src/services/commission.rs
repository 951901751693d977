//! Commission rate resolution and the earnings split.

use anyhow::Result;
use serde::Serialize;

use crate::models::Vendor;
use crate::services::MarketplaceRepository;

/// Used when no commission settings document exists yet.
pub const FALLBACK_COMMISSION_RATE: f64 = 15.0;

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct CommissionBreakdown {
    pub total_amount: f64,
    pub commission_amount: f64,
    pub vendor_amount: f64,
    pub commission_rate: f64,
}

/// Split a booking amount into platform commission and vendor net.
///
/// The commission is rounded to 2dp first; the vendor amount is the
/// *unrounded* total minus that rounded commission, rounded again. At a cent
/// boundary the two parts can differ from the total by up to 0.01; that
/// slack is documented behavior, kept identical everywhere money is split.
pub fn split(total_amount: f64, commission_rate: f64) -> CommissionBreakdown {
    let commission_amount = round2(total_amount * commission_rate / 100.0);
    let vendor_amount = round2(total_amount - commission_amount);

    CommissionBreakdown {
        total_amount,
        commission_amount,
        vendor_amount,
        commission_rate,
    }
}

/// Resolves the effective commission rate for a vendor:
/// vendor override, then the global default, then the hardcoded fallback.
/// Resolution always succeeds with a numeric rate.
#[derive(Clone)]
pub struct CommissionService {
    repository: MarketplaceRepository,
}

impl CommissionService {
    pub fn new(repository: MarketplaceRepository) -> Self {
        Self { repository }
    }

    pub async fn resolve_rate(&self, vendor: &Vendor) -> Result<f64> {
        if let Some(rate) = vendor.commission_rate {
            return Ok(rate);
        }

        if let Some(settings) = self.repository.find_commission_settings().await? {
            return Ok(settings.default_rate);
        }

        Ok(FALLBACK_COMMISSION_RATE)
    }
}
