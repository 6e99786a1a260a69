//! Fund transfer orchestration.
//!
//! Coordinates the account service (balance mutation), the ledger service
//! (entry recording) and the transfer record store across one transfer.
//! Validation runs first and touches nothing; once movement starts, every
//! applied balance change registers its inverse so a later failure unwinds
//! cleanly instead of leaving money half-moved.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{error, info, warn};

use crate::account::{Account, AccountGateway};
use crate::ledger::{LedgerEntry, LedgerGateway};
use crate::reference::ReferenceAllocator;
use crate::remote::GatewayError;

use super::error::TransferError;
use super::status::TransferStatus;
use super::store::TransferRecordStore;
use super::types::{
    FundTransferRequest, FundTransferResponse, TRANSFER_SUCCESS_MESSAGE, TransferRecord,
};

/// Transaction type label stamped on both ledger legs of an internal transfer.
const INTERNAL_TRANSFER_TYPE: &str = "INTERNAL_TRANSFER";
const LEDGER_DESCRIPTION: &str = "Internal fund transfer";

/// One applied balance change, kept so it can be undone.
#[derive(Debug, Clone)]
struct AppliedChange {
    account_number: String,
    /// Amount that was added to the account's available balance.
    delta: Decimal,
}

pub struct FundTransferOrchestrator {
    accounts: Arc<dyn AccountGateway>,
    ledger: Arc<dyn LedgerGateway>,
    store: Arc<dyn TransferRecordStore>,
    references: Arc<dyn ReferenceAllocator>,
    /// Stale-snapshot retry bound per conditional balance write.
    balance_retries: u32,
}

impl FundTransferOrchestrator {
    pub fn new(
        accounts: Arc<dyn AccountGateway>,
        ledger: Arc<dyn LedgerGateway>,
        store: Arc<dyn TransferRecordStore>,
        references: Arc<dyn ReferenceAllocator>,
    ) -> Self {
        Self::with_retries(accounts, ledger, store, references, 3)
    }

    pub fn with_retries(
        accounts: Arc<dyn AccountGateway>,
        ledger: Arc<dyn LedgerGateway>,
        store: Arc<dyn TransferRecordStore>,
        references: Arc<dyn ReferenceAllocator>,
        balance_retries: u32,
    ) -> Self {
        Self {
            accounts,
            ledger,
            store,
            references,
            balance_retries,
        }
    }

    /// Execute a fund transfer.
    ///
    /// Validation failures are raised before any record or account is
    /// written; from that point on the record tracks the saga status and a
    /// failed movement is compensated before the error is returned.
    pub async fn transfer(
        &self,
        request: FundTransferRequest,
    ) -> Result<FundTransferResponse, TransferError> {
        if let Some(key) = request.idempotency_key.as_deref()
            && let Some(existing) = self.store.find_by_idempotency_key(key).await?
            && existing.status != TransferStatus::Failed
        {
            // A FAILED record never replays: its movement was compensated,
            // so the retry is allowed to run fresh.
            info!(
                reference = %existing.transaction_reference,
                key = %key,
                "replaying already accepted transfer"
            );
            return Ok(FundTransferResponse {
                transaction_id: existing.transaction_reference,
                message: replay_message(existing.status).to_string(),
            });
        }

        if request.amount <= Decimal::ZERO {
            return Err(TransferError::InvalidAmount);
        }
        if request.from_account == request.to_account {
            return Err(TransferError::SameAccount);
        }

        let source = self
            .accounts
            .read_by_number(&request.from_account)
            .await?
            .ok_or(TransferError::ResourceNotFound("source account"))?;
        let destination = self
            .accounts
            .read_by_number(&request.to_account)
            .await?
            .ok_or(TransferError::ResourceNotFound("destination account"))?;

        // Only the source status is validated; the destination is credited
        // regardless of its status.
        validate_source(&source, request.amount)?;

        let reference = self.references.allocate();
        let record = TransferRecord::new(
            reference.clone(),
            request.from_account.clone(),
            request.to_account.clone(),
            request.amount,
            request.idempotency_key.clone(),
        );
        self.store.create(&record).await?;
        self.store
            .update_status(&reference, TransferStatus::Pending, TransferStatus::Processing)
            .await?;
        info!(
            reference = %reference,
            from = %request.from_account,
            to = %request.to_account,
            amount = %request.amount,
            "transfer accepted"
        );

        match self.execute(&request, &reference, source, destination).await {
            Ok(()) => {
                self.store
                    .update_status(&reference, TransferStatus::Processing, TransferStatus::Success)
                    .await?;
                info!(reference = %reference, "transfer committed");
                Ok(FundTransferResponse {
                    transaction_id: reference,
                    message: TRANSFER_SUCCESS_MESSAGE.to_string(),
                })
            }
            Err(e) => {
                if let Err(store_err) = self
                    .store
                    .update_status_with_error(
                        &reference,
                        TransferStatus::Processing,
                        TransferStatus::Failed,
                        &e.to_string(),
                    )
                    .await
                {
                    error!(
                        reference = %reference,
                        error = %store_err,
                        "failed to mark transfer FAILED"
                    );
                }
                Err(e)
            }
        }
    }

    /// Look up a transfer record by its transaction reference.
    pub async fn get_by_reference(&self, reference: &str) -> Result<TransferRecord, TransferError> {
        self.store
            .find_by_reference(reference)
            .await?
            .ok_or(TransferError::ResourceNotFound("fund transfer"))
    }

    /// All transfers debiting the given account. Unknown accounts yield an
    /// empty list, never an error.
    pub async fn list_by_source_account(
        &self,
        account_number: &str,
    ) -> Result<Vec<TransferRecord>, TransferError> {
        self.store.find_by_from_account(account_number).await
    }

    /// Forward steps: debit source, credit destination, record the ledger
    /// batch. Each applied balance change registers its inverse.
    async fn execute(
        &self,
        request: &FundTransferRequest,
        reference: &str,
        source: Account,
        destination: Account,
    ) -> Result<(), TransferError> {
        let mut applied: Vec<AppliedChange> = Vec::with_capacity(2);

        self.debit_source(&request.from_account, request.amount, source)
            .await?;
        applied.push(AppliedChange {
            account_number: request.from_account.clone(),
            delta: -request.amount,
        });

        if let Err(e) = self
            .credit_destination(&request.to_account, request.amount, destination)
            .await
        {
            return self.unwind(reference, &applied, e).await;
        }
        applied.push(AppliedChange {
            account_number: request.to_account.clone(),
            delta: request.amount,
        });

        let entries = [
            LedgerEntry::debit(
                &request.from_account,
                INTERNAL_TRANSFER_TYPE,
                request.amount,
                LEDGER_DESCRIPTION,
            ),
            LedgerEntry::credit(
                &request.to_account,
                INTERNAL_TRANSFER_TYPE,
                request.amount,
                LEDGER_DESCRIPTION,
            ),
        ];
        if let Err(e) = self.ledger.record_batch(&entries, reference).await {
            return self.unwind(reference, &applied, e.into()).await;
        }

        Ok(())
    }

    /// Debit the source with a conditional write. A stale snapshot triggers
    /// a re-read and full re-validation: the concurrent writer may have
    /// drained the account or changed its status.
    async fn debit_source(
        &self,
        account_number: &str,
        amount: Decimal,
        initial: Account,
    ) -> Result<(), TransferError> {
        let mut snapshot = initial;
        for attempt in 0..=self.balance_retries {
            validate_source(&snapshot, amount)?;

            let updated = snapshot.with_balance(snapshot.available_balance - amount);
            match self
                .accounts
                .update_by_number(account_number, &updated, snapshot.available_balance)
                .await
            {
                Ok(()) => return Ok(()),
                Err(GatewayError::PreconditionFailed) => {
                    warn!(account = %account_number, attempt, "stale balance on debit, re-reading");
                    snapshot = self
                        .accounts
                        .read_by_number(account_number)
                        .await?
                        .ok_or(TransferError::ResourceNotFound("source account"))?;
                }
                Err(e) => return Err(e.into()),
            }
        }
        Err(TransferError::PreconditionExhausted(format!(
            "source account {} kept changing",
            account_number
        )))
    }

    /// Credit the destination. Same conditional-write loop as the debit but
    /// without status or balance validation.
    async fn credit_destination(
        &self,
        account_number: &str,
        amount: Decimal,
        initial: Account,
    ) -> Result<(), TransferError> {
        let mut snapshot = initial;
        for attempt in 0..=self.balance_retries {
            let updated = snapshot.with_balance(snapshot.available_balance + amount);
            match self
                .accounts
                .update_by_number(account_number, &updated, snapshot.available_balance)
                .await
            {
                Ok(()) => return Ok(()),
                Err(GatewayError::PreconditionFailed) => {
                    warn!(account = %account_number, attempt, "stale balance on credit, re-reading");
                    snapshot = self
                        .accounts
                        .read_by_number(account_number)
                        .await?
                        .ok_or(TransferError::ResourceNotFound("destination account"))?;
                }
                Err(e) => return Err(e.into()),
            }
        }
        Err(TransferError::PreconditionExhausted(format!(
            "destination account {} kept changing",
            account_number
        )))
    }

    /// Undo applied balance changes in reverse order, then return the
    /// causing error. A failed undo surfaces as `Incomplete`: money is
    /// half-moved and the FAILED record's error trail is the reconciliation
    /// input.
    async fn unwind(
        &self,
        reference: &str,
        applied: &[AppliedChange],
        cause: TransferError,
    ) -> Result<(), TransferError> {
        warn!(
            reference = %reference,
            error = %cause,
            "transfer failed after partial application, compensating"
        );

        for change in applied.iter().rev() {
            if let Err(e) = self.apply_inverse(change).await {
                error!(
                    reference = %reference,
                    account = %change.account_number,
                    error = %e,
                    "compensation failed, manual reconciliation required"
                );
                return Err(TransferError::Incomplete(format!(
                    "{} (while compensating {}: {})",
                    cause, change.account_number, e
                )));
            }
            info!(
                reference = %reference,
                account = %change.account_number,
                "compensated balance change"
            );
        }

        Err(cause)
    }

    async fn apply_inverse(&self, change: &AppliedChange) -> Result<(), TransferError> {
        let account_number = change.account_number.as_str();
        let mut snapshot = self
            .accounts
            .read_by_number(account_number)
            .await?
            .ok_or(TransferError::ResourceNotFound("account"))?;

        for _ in 0..=self.balance_retries {
            let updated = snapshot.with_balance(snapshot.available_balance - change.delta);
            match self
                .accounts
                .update_by_number(account_number, &updated, snapshot.available_balance)
                .await
            {
                Ok(()) => return Ok(()),
                Err(GatewayError::PreconditionFailed) => {
                    snapshot = self
                        .accounts
                        .read_by_number(account_number)
                        .await?
                        .ok_or(TransferError::ResourceNotFound("account"))?;
                }
                Err(e) => return Err(e.into()),
            }
        }
        Err(TransferError::PreconditionExhausted(format!(
            "account {} kept changing during compensation",
            account_number
        )))
    }
}

/// Source-side validation: the account must be ACTIVE and the balance must
/// be strictly greater than the amount. Equality is rejected: a transfer may
/// never empty the account.
fn validate_source(source: &Account, amount: Decimal) -> Result<(), TransferError> {
    if !source.is_active() {
        return Err(TransferError::AccountNotUpdatable(
            source.account_number.clone(),
        ));
    }
    if source.available_balance <= amount {
        return Err(TransferError::InsufficientBalance);
    }
    Ok(())
}

fn replay_message(status: TransferStatus) -> &'static str {
    match status {
        TransferStatus::Success => TRANSFER_SUCCESS_MESSAGE,
        _ => "Fund transfer is already in progress",
    }
}

#[cfg(test)]
mod tests {
    use crate::account::AccountStatus;

    use super::*;

    fn account(status: AccountStatus, balance: i64) -> Account {
        Account {
            account_id: None,
            account_number: "ACC0001234".to_string(),
            account_type: None,
            account_status: status,
            available_balance: Decimal::from(balance),
            user_id: None,
        }
    }

    #[test]
    fn test_validate_source_requires_active_status() {
        for status in [
            AccountStatus::Pending,
            AccountStatus::Blocked,
            AccountStatus::Closed,
        ] {
            let result = validate_source(&account(status, 1000), Decimal::from(500));
            assert!(matches!(result, Err(TransferError::AccountNotUpdatable(_))));
        }
    }

    #[test]
    fn test_validate_source_rejects_equal_balance() {
        // Strict boundary: balance == amount is rejected, not just less-than.
        let result = validate_source(&account(AccountStatus::Active, 1000), Decimal::from(1000));
        assert!(matches!(result, Err(TransferError::InsufficientBalance)));

        let result = validate_source(&account(AccountStatus::Active, 1000), Decimal::from(999));
        assert!(result.is_ok());
    }
}
