pub mod bookings;
pub mod commission;
pub mod metrics;
pub mod notifications;
pub mod payouts;
pub mod policy;
pub mod repository;
pub mod slots;
pub mod wallet;

pub use bookings::BookingService;
pub use commission::CommissionService;
pub use metrics::{get_metrics, init_metrics};
pub use notifications::NotificationService;
pub use payouts::PayoutService;
pub use repository::MarketplaceRepository;
pub use slots::SlotCapacityTracker;
pub use wallet::WalletLedger;
