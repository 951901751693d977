//! Payout settlement: admin-initiated withdrawals against vendor wallets.

use mongodb::bson::{doc, DateTime};
use uuid::Uuid;

use crate::dtos::{CreatePayoutRequest, PayoutSettleStatus, SettlePayoutRequest};
use crate::error::AppError;
use crate::middleware::AuthContext;
use crate::models::{Payout, PayoutStatus};
use crate::services::{metrics, MarketplaceRepository, NotificationService, WalletLedger};

#[derive(Clone)]
pub struct PayoutService {
    repository: MarketplaceRepository,
    wallet: WalletLedger,
    notifications: NotificationService,
}

impl PayoutService {
    pub fn new(
        repository: MarketplaceRepository,
        wallet: WalletLedger,
        notifications: NotificationService,
    ) -> Self {
        Self {
            repository,
            wallet,
            notifications,
        }
    }

    /// Create a pending payout after checking the requested amount against
    /// the wallet balance as of now. The check is a plain read: two
    /// concurrent creations can both pass against the same balance, and
    /// settlement does not re-validate.
    pub async fn create(&self, request: CreatePayoutRequest) -> Result<Payout, AppError> {
        let vendor = self
            .repository
            .find_vendor(request.vendor_id)
            .await?
            .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Vendor not found")))?;

        let wallet = self
            .repository
            .find_wallet(request.vendor_id)
            .await?
            .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Vendor wallet not found")))?;

        if request.amount > wallet.balance {
            return Err(AppError::BadRequest(anyhow::anyhow!(
                "Payout amount ({}) exceeds wallet balance ({})",
                request.amount,
                wallet.balance
            )));
        }

        let payout = Payout::new(request.vendor_id, request.amount, request.payout_method);
        self.repository.insert_payout(&payout).await?;

        self.notifications.payout_initiated(&vendor, &payout).await;
        metrics::record_payout("created");

        tracing::info!(
            payout_id = %payout.id,
            vendor_id = %payout.vendor_id,
            amount = payout.amount,
            "Created payout"
        );
        Ok(payout)
    }

    /// Settle a payout into a terminal state, exactly once. `completed`
    /// debits the wallet and logs the movement; `failed` records the outcome
    /// without touching the wallet.
    pub async fn settle(
        &self,
        payout_id: Uuid,
        request: SettlePayoutRequest,
        ctx: &AuthContext,
    ) -> Result<Payout, AppError> {
        let payout = self
            .repository
            .find_payout(payout_id)
            .await?
            .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Payout not found")))?;

        let terminal = match request.status {
            PayoutSettleStatus::Completed => PayoutStatus::Completed,
            PayoutSettleStatus::Failed => PayoutStatus::Failed,
        };

        let now = DateTime::now();
        let mut update = doc! {
            "status": terminal.as_str(),
            "settled_by": ctx.user_id.as_str(),
            "settled_at": now,
            "updated_at": now,
        };
        if let Some(notes) = &request.settlement_notes {
            update.insert("settlement_notes", notes.clone());
        }
        if let Some(reference) = &request.payout_reference {
            update.insert("payout_reference", reference.clone());
        }

        // The CAS filter only matches non-terminal payouts, so a settled
        // payout can never be settled (and the wallet debited) twice.
        if !self.repository.settle_payout_cas(payout_id, update).await? {
            return Err(AppError::Conflict(anyhow::anyhow!(
                "Payout has already been settled"
            )));
        }

        if terminal == PayoutStatus::Completed {
            self.wallet
                .debit_for_payout(&payout)
                .await
                .map_err(AppError::from)?;
            if let Some(vendor) = self.repository.find_vendor(payout.vendor_id).await? {
                self.notifications.payout_completed(&vendor, &payout).await;
            }
        }
        metrics::record_payout(terminal.as_str());

        tracing::info!(
            payout_id = %payout_id,
            status = terminal.as_str(),
            settled_by = %ctx.user_id,
            "Settled payout"
        );

        self.repository
            .find_payout(payout_id)
            .await?
            .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Payout not found")))
    }
}
