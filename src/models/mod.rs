/// Serialize `Option<Uuid>` through the hyphenated string form, mirroring
/// `uuid::serde::hyphenated` for optional fields. Keeps ids stored in the
/// database as plain strings, which is what every repository query assumes.
pub(crate) mod uuid_opt_hyphenated {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use uuid::fmt::Hyphenated;
    use uuid::Uuid;

    pub fn serialize<S: Serializer>(value: &Option<Uuid>, serializer: S) -> Result<S::Ok, S::Error> {
        value.map(|u| *u.as_hyphenated()).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Uuid>, D::Error> {
        Ok(Option::<Hyphenated>::deserialize(deserializer)?.map(Into::into))
    }
}

pub mod booking;
pub mod commission;
pub mod notification;
pub mod package;
pub mod payout;
pub mod time_slot;
pub mod vendor;
pub mod wallet;

pub use booking::{Booking, BookingStatus, PaymentStatus};
pub use commission::CommissionSettings;
pub use notification::{Notification, NotificationType};
pub use package::Package;
pub use payout::{Payout, PayoutStatus};
pub use time_slot::TimeSlot;
pub use vendor::{Vendor, VendorStatus};
pub use wallet::{SettlementTransaction, TransactionType, VendorWallet};
