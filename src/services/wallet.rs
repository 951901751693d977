//! Vendor wallet ledger: the only writer of `VendorWallet` documents and the
//! settlement-transaction log.

use anyhow::Result;
use mongodb::bson::DateTime;
use uuid::Uuid;

use crate::models::{Payout, SettlementTransaction, TransactionType, VendorWallet};
use crate::services::MarketplaceRepository;

#[derive(Clone)]
pub struct WalletLedger {
    repository: MarketplaceRepository,
}

impl WalletLedger {
    pub fn new(repository: MarketplaceRepository) -> Self {
        Self { repository }
    }

    /// Create a wallet for a newly approved vendor. Idempotent: an existing
    /// wallet is returned untouched, so re-approval cannot reset balances.
    pub async fn ensure_wallet(&self, vendor_id: Uuid) -> Result<VendorWallet> {
        if let Some(existing) = self.repository.find_wallet(vendor_id).await? {
            return Ok(existing);
        }

        let wallet = VendorWallet::new(vendor_id);
        match self.repository.insert_wallet(&wallet).await {
            Ok(()) => Ok(wallet),
            // A concurrent approval may have inserted first; the unique
            // index on vendor_id rejects the second insert.
            Err(e) => match self.repository.find_wallet(vendor_id).await? {
                Some(existing) => Ok(existing),
                None => Err(e),
            },
        }
    }

    /// Credit confirmed-booking earnings: balance += net, lifetime totals
    /// accrue gross and commission, and a `booking_earnings` row is appended
    /// to the settlement log. Callers must gate this on the booking's
    /// pending→confirmed transition so it runs at most once per booking.
    pub async fn credit(
        &self,
        vendor_id: Uuid,
        booking_id: Uuid,
        gross_amount: f64,
        commission_amount: f64,
        net_amount: f64,
    ) -> Result<()> {
        let matched = self
            .repository
            .credit_wallet(vendor_id, net_amount, gross_amount, commission_amount)
            .await?;
        if !matched {
            tracing::warn!(
                vendor_id = %vendor_id,
                booking_id = %booking_id,
                "Earnings credit matched no wallet; vendor was never approved?"
            );
        }

        self.repository
            .insert_settlement(&SettlementTransaction {
                id: Uuid::new_v4(),
                vendor_id,
                booking_id: Some(booking_id),
                transaction_type: TransactionType::BookingEarnings,
                gross_amount,
                commission_amount,
                net_amount,
                payout_id: None,
                created_at: DateTime::now(),
            })
            .await?;

        tracing::info!(
            vendor_id = %vendor_id,
            booking_id = %booking_id,
            net_amount,
            "Credited booking earnings to wallet"
        );
        Ok(())
    }

    /// Debit a settled payout: balance -= amount, total_paid_out += amount,
    /// plus a `payout` row in the settlement log. The balance floor was
    /// checked when the payout was created, not here.
    pub async fn debit_for_payout(&self, payout: &Payout) -> Result<()> {
        let matched = self
            .repository
            .debit_wallet(payout.vendor_id, payout.amount)
            .await?;
        if !matched {
            tracing::warn!(
                vendor_id = %payout.vendor_id,
                payout_id = %payout.id,
                "Payout debit matched no wallet"
            );
        }

        self.repository
            .insert_settlement(&SettlementTransaction {
                id: Uuid::new_v4(),
                vendor_id: payout.vendor_id,
                booking_id: None,
                transaction_type: TransactionType::Payout,
                gross_amount: payout.amount,
                commission_amount: 0.0,
                net_amount: payout.amount,
                payout_id: Some(payout.id),
                created_at: DateTime::now(),
            })
            .await?;

        tracing::info!(
            vendor_id = %payout.vendor_id,
            payout_id = %payout.id,
            amount = payout.amount,
            "Debited wallet for settled payout"
        );
        Ok(())
    }
}
