//! MongoDB access layer.
//!
//! Every wallet and slot-count mutation is a single atomic `$inc`-style
//! update; booking status transitions and payout settlement are filtered
//! compare-and-set writes. The storage layer's single-document atomicity is
//! the only concurrency guard in this service.

use anyhow::Result;
use futures::TryStreamExt;
use mongodb::bson::{doc, Document};
use mongodb::options::{FindOptions, IndexOptions};
use mongodb::{Collection, Database, IndexModel};
use uuid::Uuid;

use crate::models::{
    Booking, BookingStatus, CommissionSettings, Notification, Package, Payout, PayoutStatus,
    SettlementTransaction, TimeSlot, Vendor, VendorStatus, VendorWallet,
};

#[derive(Clone)]
pub struct MarketplaceRepository {
    vendors: Collection<Vendor>,
    packages: Collection<Package>,
    time_slots: Collection<TimeSlot>,
    bookings: Collection<Booking>,
    wallets: Collection<VendorWallet>,
    settlements: Collection<SettlementTransaction>,
    payouts: Collection<Payout>,
    commission_settings: Collection<CommissionSettings>,
    notifications: Collection<Notification>,
}

impl MarketplaceRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            vendors: db.collection("vendors"),
            packages: db.collection("packages"),
            time_slots: db.collection("time_slots"),
            bookings: db.collection("bookings"),
            wallets: db.collection("vendor_wallets"),
            settlements: db.collection("settlement_transactions"),
            payouts: db.collection("payouts"),
            commission_settings: db.collection("commission_settings"),
            notifications: db.collection("notifications"),
        }
    }

    /// Initialize database indexes for the hot query paths.
    pub async fn init_indexes(&self) -> Result<()> {
        let vendor_user_index = IndexModel::builder()
            .keys(doc! { "user_id": 1 })
            .options(
                IndexOptions::builder()
                    .name("vendor_user_idx".to_string())
                    .unique(true)
                    .build(),
            )
            .build();
        self.vendors.create_index(vendor_user_index, None).await?;

        let wallet_vendor_index = IndexModel::builder()
            .keys(doc! { "vendor_id": 1 })
            .options(
                IndexOptions::builder()
                    .name("wallet_vendor_idx".to_string())
                    .unique(true)
                    .build(),
            )
            .build();
        self.wallets.create_index(wallet_vendor_index, None).await?;

        let booking_vendor_index = IndexModel::builder()
            .keys(doc! { "vendor_id": 1, "status": 1 })
            .options(
                IndexOptions::builder()
                    .name("booking_vendor_status_idx".to_string())
                    .build(),
            )
            .build();
        let booking_customer_index = IndexModel::builder()
            .keys(doc! { "customer_id": 1 })
            .options(
                IndexOptions::builder()
                    .name("booking_customer_idx".to_string())
                    .build(),
            )
            .build();
        self.bookings
            .create_indexes([booking_vendor_index, booking_customer_index], None)
            .await?;

        let slot_vendor_index = IndexModel::builder()
            .keys(doc! { "vendor_id": 1, "slot_date": 1 })
            .options(
                IndexOptions::builder()
                    .name("slot_vendor_date_idx".to_string())
                    .build(),
            )
            .build();
        self.time_slots.create_index(slot_vendor_index, None).await?;

        let settlement_vendor_index = IndexModel::builder()
            .keys(doc! { "vendor_id": 1, "created_at": -1 })
            .options(
                IndexOptions::builder()
                    .name("settlement_vendor_idx".to_string())
                    .build(),
            )
            .build();
        self.settlements
            .create_index(settlement_vendor_index, None)
            .await?;

        let payout_vendor_index = IndexModel::builder()
            .keys(doc! { "vendor_id": 1, "status": 1 })
            .options(
                IndexOptions::builder()
                    .name("payout_vendor_status_idx".to_string())
                    .build(),
            )
            .build();
        self.payouts.create_index(payout_vendor_index, None).await?;

        tracing::info!("Marketplace indexes initialized");
        Ok(())
    }

    // ---- vendors ----

    pub async fn insert_vendor(&self, vendor: &Vendor) -> Result<()> {
        self.vendors.insert_one(vendor, None).await?;
        Ok(())
    }

    pub async fn find_vendor(&self, id: Uuid) -> Result<Option<Vendor>> {
        Ok(self
            .vendors
            .find_one(doc! { "_id": id.to_string() }, None)
            .await?)
    }

    pub async fn find_approved_vendor(&self, id: Uuid) -> Result<Option<Vendor>> {
        Ok(self
            .vendors
            .find_one(doc! { "_id": id.to_string(), "is_approved": true }, None)
            .await?)
    }

    pub async fn find_vendor_by_user(&self, user_id: &str) -> Result<Option<Vendor>> {
        Ok(self
            .vendors
            .find_one(doc! { "user_id": user_id }, None)
            .await?)
    }

    pub async fn update_vendor_approval(
        &self,
        id: Uuid,
        status: VendorStatus,
        is_approved: bool,
        admin_id: &str,
    ) -> Result<bool> {
        let now = mongodb::bson::DateTime::now();
        let result = self
            .vendors
            .update_one(
                doc! { "_id": id.to_string() },
                doc! { "$set": {
                    "status": status.as_str(),
                    "is_approved": is_approved,
                    "approved_by": admin_id,
                    "approved_at": now,
                    "updated_at": now,
                }},
                None,
            )
            .await?;
        Ok(result.matched_count > 0)
    }

    pub async fn set_vendor_commission_rate(&self, id: Uuid, rate: f64) -> Result<bool> {
        let result = self
            .vendors
            .update_one(
                doc! { "_id": id.to_string() },
                doc! { "$set": {
                    "commission_rate": rate,
                    "updated_at": mongodb::bson::DateTime::now(),
                }},
                None,
            )
            .await?;
        Ok(result.matched_count > 0)
    }

    pub async fn list_vendors(&self, filter: Document) -> Result<Vec<Vendor>> {
        let options = FindOptions::builder()
            .sort(doc! { "created_at": -1 })
            .limit(200)
            .build();
        let cursor = self.vendors.find(filter, options).await?;
        Ok(cursor.try_collect().await?)
    }

    pub async fn count_vendors(&self, filter: Document) -> Result<u64> {
        Ok(self.vendors.count_documents(filter, None).await?)
    }

    // ---- packages ----

    pub async fn insert_package(&self, package: &Package) -> Result<()> {
        self.packages.insert_one(package, None).await?;
        Ok(())
    }

    pub async fn find_active_package(&self, id: Uuid) -> Result<Option<Package>> {
        Ok(self
            .packages
            .find_one(doc! { "_id": id.to_string(), "is_active": true }, None)
            .await?)
    }

    pub async fn list_packages(&self, vendor_id: Option<Uuid>) -> Result<Vec<Package>> {
        let mut filter = doc! { "is_active": true };
        if let Some(vendor_id) = vendor_id {
            filter.insert("vendor_id", vendor_id.to_string());
        }
        let options = FindOptions::builder()
            .sort(doc! { "created_at": -1 })
            .limit(100)
            .build();
        let cursor = self.packages.find(filter, options).await?;
        Ok(cursor.try_collect().await?)
    }

    // ---- time slots ----

    pub async fn insert_time_slot(&self, slot: &TimeSlot) -> Result<()> {
        self.time_slots.insert_one(slot, None).await?;
        Ok(())
    }

    pub async fn find_time_slot(&self, id: Uuid) -> Result<Option<TimeSlot>> {
        Ok(self
            .time_slots
            .find_one(doc! { "_id": id.to_string() }, None)
            .await?)
    }

    pub async fn list_time_slots(
        &self,
        vendor_id: Uuid,
        slot_date: Option<&str>,
    ) -> Result<Vec<TimeSlot>> {
        let mut filter = doc! { "vendor_id": vendor_id.to_string() };
        if let Some(date) = slot_date {
            filter.insert("slot_date", date);
        }
        let options = FindOptions::builder()
            .sort(doc! { "slot_date": 1, "start_time": 1 })
            .limit(200)
            .build();
        let cursor = self.time_slots.find(filter, options).await?;
        Ok(cursor.try_collect().await?)
    }

    /// Atomically claim one unit of slot capacity. The filter carries the
    /// availability and capacity guards, so a full or closed slot is never
    /// over-incremented. Returns false when the claim lost to a concurrent
    /// booking or the slot is gone.
    pub async fn try_reserve_slot(&self, id: Uuid) -> Result<bool> {
        let result = self
            .time_slots
            .update_one(
                doc! {
                    "_id": id.to_string(),
                    "is_available": true,
                    "$expr": { "$lt": ["$booked_count", "$capacity"] },
                },
                doc! {
                    "$inc": { "booked_count": 1 },
                    "$set": { "updated_at": mongodb::bson::DateTime::now() },
                },
                None,
            )
            .await?;
        Ok(result.matched_count > 0)
    }

    /// Flip `is_available` off once `booked_count` has reached capacity.
    pub async fn close_slot_if_full(&self, id: Uuid) -> Result<()> {
        self.time_slots
            .update_one(
                doc! {
                    "_id": id.to_string(),
                    "$expr": { "$gte": ["$booked_count", "$capacity"] },
                },
                doc! { "$set": {
                    "is_available": false,
                    "updated_at": mongodb::bson::DateTime::now(),
                }},
                None,
            )
            .await?;
        Ok(())
    }

    /// Release one unit of capacity. The decrement is floored at zero by the
    /// filter; the slot is re-opened unconditionally.
    pub async fn release_slot(&self, id: Uuid) -> Result<()> {
        let now = mongodb::bson::DateTime::now();
        self.time_slots
            .update_one(
                doc! { "_id": id.to_string(), "booked_count": { "$gt": 0 } },
                doc! { "$inc": { "booked_count": -1 }, "$set": { "updated_at": now } },
                None,
            )
            .await?;
        self.time_slots
            .update_one(
                doc! { "_id": id.to_string() },
                doc! { "$set": { "is_available": true, "updated_at": now } },
                None,
            )
            .await?;
        Ok(())
    }

    /// Delete a slot only while it carries no bookings.
    pub async fn delete_empty_slot(&self, id: Uuid) -> Result<bool> {
        let result = self
            .time_slots
            .delete_one(doc! { "_id": id.to_string(), "booked_count": 0 }, None)
            .await?;
        Ok(result.deleted_count > 0)
    }

    // ---- bookings ----

    pub async fn insert_booking(&self, booking: &Booking) -> Result<()> {
        self.bookings.insert_one(booking, None).await?;
        Ok(())
    }

    pub async fn find_booking(&self, id: Uuid) -> Result<Option<Booking>> {
        Ok(self
            .bookings
            .find_one(doc! { "_id": id.to_string() }, None)
            .await?)
    }

    pub async fn list_bookings(
        &self,
        filter: Document,
        skip: u64,
        limit: i64,
    ) -> Result<Vec<Booking>> {
        let options = FindOptions::builder()
            .sort(doc! { "created_at": -1 })
            .skip(skip)
            .limit(limit)
            .build();
        let cursor = self.bookings.find(filter, options).await?;
        Ok(cursor.try_collect().await?)
    }

    /// Compare-and-set status write: matches only when the booking still has
    /// the status the caller read, so concurrent transitions cannot both
    /// apply (and side effects gated on the match cannot run twice).
    pub async fn update_booking_status_cas(
        &self,
        id: Uuid,
        from: BookingStatus,
        update: Document,
    ) -> Result<bool> {
        let result = self
            .bookings
            .update_one(
                doc! { "_id": id.to_string(), "status": from.as_str() },
                doc! { "$set": update },
                None,
            )
            .await?;
        Ok(result.matched_count > 0)
    }

    pub async fn count_bookings(&self, filter: Document) -> Result<u64> {
        Ok(self.bookings.count_documents(filter, None).await?)
    }

    /// Sum of (total_amount, commission_amount) over completed bookings.
    pub async fn completed_booking_totals(&self) -> Result<(f64, f64)> {
        let pipeline = vec![
            doc! { "$match": { "status": "completed" } },
            doc! { "$group": {
                "_id": null,
                "total_revenue": { "$sum": "$total_amount" },
                "total_commission": { "$sum": "$commission_amount" },
            }},
        ];
        let mut cursor = self.bookings.aggregate(pipeline, None).await?;
        if let Some(row) = cursor.try_next().await? {
            let revenue = row.get_f64("total_revenue").unwrap_or(0.0);
            let commission = row.get_f64("total_commission").unwrap_or(0.0);
            return Ok((revenue, commission));
        }
        Ok((0.0, 0.0))
    }

    // ---- wallets ----

    pub async fn insert_wallet(&self, wallet: &VendorWallet) -> Result<()> {
        self.wallets.insert_one(wallet, None).await?;
        Ok(())
    }

    pub async fn find_wallet(&self, vendor_id: Uuid) -> Result<Option<VendorWallet>> {
        Ok(self
            .wallets
            .find_one(doc! { "vendor_id": vendor_id.to_string() }, None)
            .await?)
    }

    /// Atomic earnings credit: one `$inc` covering balance and lifetime
    /// totals, so concurrent confirmations never lose an update.
    pub async fn credit_wallet(
        &self,
        vendor_id: Uuid,
        net_amount: f64,
        gross_amount: f64,
        commission_amount: f64,
    ) -> Result<bool> {
        let result = self
            .wallets
            .update_one(
                doc! { "vendor_id": vendor_id.to_string() },
                doc! {
                    "$inc": {
                        "balance": net_amount,
                        "total_earned": gross_amount,
                        "total_commission": commission_amount,
                    },
                    "$set": { "updated_at": mongodb::bson::DateTime::now() },
                },
                None,
            )
            .await?;
        Ok(result.matched_count > 0)
    }

    /// Atomic payout debit. The balance floor is enforced at payout-creation
    /// time, not here.
    pub async fn debit_wallet(&self, vendor_id: Uuid, amount: f64) -> Result<bool> {
        let result = self
            .wallets
            .update_one(
                doc! { "vendor_id": vendor_id.to_string() },
                doc! {
                    "$inc": {
                        "balance": -amount,
                        "total_paid_out": amount,
                    },
                    "$set": { "updated_at": mongodb::bson::DateTime::now() },
                },
                None,
            )
            .await?;
        Ok(result.matched_count > 0)
    }

    // ---- settlement transactions ----

    pub async fn insert_settlement(&self, transaction: &SettlementTransaction) -> Result<()> {
        self.settlements.insert_one(transaction, None).await?;
        Ok(())
    }

    pub async fn list_settlements(&self, vendor_id: Uuid) -> Result<Vec<SettlementTransaction>> {
        let options = FindOptions::builder()
            .sort(doc! { "created_at": -1 })
            .limit(200)
            .build();
        let cursor = self
            .settlements
            .find(doc! { "vendor_id": vendor_id.to_string() }, options)
            .await?;
        Ok(cursor.try_collect().await?)
    }

    // ---- payouts ----

    pub async fn insert_payout(&self, payout: &Payout) -> Result<()> {
        self.payouts.insert_one(payout, None).await?;
        Ok(())
    }

    pub async fn find_payout(&self, id: Uuid) -> Result<Option<Payout>> {
        Ok(self
            .payouts
            .find_one(doc! { "_id": id.to_string() }, None)
            .await?)
    }

    pub async fn list_payouts(&self, filter: Document) -> Result<Vec<Payout>> {
        let options = FindOptions::builder()
            .sort(doc! { "created_at": -1 })
            .limit(200)
            .build();
        let cursor = self.payouts.find(filter, options).await?;
        Ok(cursor.try_collect().await?)
    }

    /// Compare-and-set settlement: matches only while the payout is still
    /// non-terminal, so an already-settled payout cannot be settled again.
    pub async fn settle_payout_cas(&self, id: Uuid, update: Document) -> Result<bool> {
        let result = self
            .payouts
            .update_one(
                doc! {
                    "_id": id.to_string(),
                    "status": { "$in": [
                        PayoutStatus::Pending.as_str(),
                        PayoutStatus::Processing.as_str(),
                    ]},
                },
                doc! { "$set": update },
                None,
            )
            .await?;
        Ok(result.matched_count > 0)
    }

    /// Sum of pending payout amounts, optionally for one vendor.
    pub async fn pending_payout_total(&self, vendor_id: Option<Uuid>) -> Result<f64> {
        let mut match_filter = doc! { "status": "pending" };
        if let Some(vendor_id) = vendor_id {
            match_filter.insert("vendor_id", vendor_id.to_string());
        }
        let pipeline = vec![
            doc! { "$match": match_filter },
            doc! { "$group": { "_id": null, "amount": { "$sum": "$amount" } } },
        ];
        let mut cursor = self.payouts.aggregate(pipeline, None).await?;
        if let Some(row) = cursor.try_next().await? {
            return Ok(row.get_f64("amount").unwrap_or(0.0));
        }
        Ok(0.0)
    }

    // ---- commission settings ----

    pub async fn find_commission_settings(&self) -> Result<Option<CommissionSettings>> {
        Ok(self.commission_settings.find_one(doc! {}, None).await?)
    }

    pub async fn insert_commission_settings(&self, settings: &CommissionSettings) -> Result<()> {
        self.commission_settings.insert_one(settings, None).await?;
        Ok(())
    }

    pub async fn update_default_rate(&self, rate: f64, updated_by: &str) -> Result<bool> {
        let result = self
            .commission_settings
            .update_one(
                doc! {},
                doc! { "$set": {
                    "default_rate": rate,
                    "updated_by": updated_by,
                    "updated_at": mongodb::bson::DateTime::now(),
                }},
                None,
            )
            .await?;
        Ok(result.matched_count > 0)
    }

    // ---- notifications ----

    pub async fn insert_notification(&self, notification: &Notification) -> Result<()> {
        self.notifications.insert_one(notification, None).await?;
        Ok(())
    }
}
