//! Marketplace Service - bookings, commission split, vendor wallets and
//! payout settlement for a multi-vendor marketplace.

pub mod config;
pub mod dtos;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod startup;

use config::Config;
use services::{
    BookingService, CommissionService, MarketplaceRepository, NotificationService, PayoutService,
    SlotCapacityTracker, WalletLedger,
};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub db: mongodb::Database,
    pub config: Config,
    pub repository: MarketplaceRepository,
    pub bookings: BookingService,
    pub payouts: PayoutService,
    pub wallet: WalletLedger,
    pub slots: SlotCapacityTracker,
    pub notifications: NotificationService,
}
