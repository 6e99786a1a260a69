//! Transfer record persistence.
//!
//! The store is addressed through a trait so orchestration tests run against
//! an in-memory implementation; production uses PostgreSQL. Status
//! transitions are conditional UPDATEs (compare-and-swap on the current
//! status) so a transition is never applied twice.

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use tracing::info;

use super::error::TransferError;
use super::status::{TransferStatus, TransferType};
use super::types::TransferRecord;

/// CRUD surface of the transfer record store.
#[async_trait]
pub trait TransferRecordStore: Send + Sync {
    async fn create(&self, record: &TransferRecord) -> Result<TransferRecord, TransferError>;

    async fn find_by_reference(
        &self,
        reference: &str,
    ) -> Result<Option<TransferRecord>, TransferError>;

    /// All records debiting the given account, in store order.
    async fn find_by_from_account(
        &self,
        account_number: &str,
    ) -> Result<Vec<TransferRecord>, TransferError>;

    /// Most recent record carrying the given caller idempotency key.
    async fn find_by_idempotency_key(
        &self,
        key: &str,
    ) -> Result<Option<TransferRecord>, TransferError>;

    /// Conditional status transition. Returns true when the expected status
    /// matched and the transition was applied.
    async fn update_status(
        &self,
        reference: &str,
        expected: TransferStatus,
        new: TransferStatus,
    ) -> Result<bool, TransferError>;

    /// Conditional status transition recording a failure trail.
    async fn update_status_with_error(
        &self,
        reference: &str,
        expected: TransferStatus,
        new: TransferStatus,
        error: &str,
    ) -> Result<bool, TransferError>;
}

/// PostgreSQL-backed store.
pub struct PgTransferStore {
    pool: PgPool,
}

impl PgTransferStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the schema on startup if it does not exist yet.
    pub async fn ensure_schema(&self) -> Result<(), TransferError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS fund_transfers (
                fund_transfer_id BIGSERIAL PRIMARY KEY,
                transaction_reference TEXT NOT NULL UNIQUE,
                idempotency_key TEXT,
                from_account TEXT NOT NULL,
                to_account TEXT NOT NULL,
                amount NUMERIC(19, 4) NOT NULL,
                status SMALLINT NOT NULL,
                transfer_type SMALLINT NOT NULL,
                error_message TEXT,
                transferred_on TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_fund_transfers_from_account \
             ON fund_transfers (from_account)",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_fund_transfers_idempotency_key \
             ON fund_transfers (idempotency_key)",
        )
        .execute(&self.pool)
        .await?;

        info!("fund_transfers schema ready");
        Ok(())
    }

    fn row_to_record(row: &sqlx::postgres::PgRow) -> Result<TransferRecord, TransferError> {
        let status_id: i16 = row.get("status");
        let status = TransferStatus::from_id(status_id)
            .ok_or_else(|| TransferError::Database(format!("invalid status id: {}", status_id)))?;

        let type_id: i16 = row.get("transfer_type");
        let transfer_type = TransferType::from_id(type_id)
            .ok_or_else(|| TransferError::Database(format!("invalid transfer type id: {}", type_id)))?;

        Ok(TransferRecord {
            transaction_reference: row.get("transaction_reference"),
            idempotency_key: row.get("idempotency_key"),
            from_account: row.get("from_account"),
            to_account: row.get("to_account"),
            amount: row.get("amount"),
            status,
            transfer_type,
            error: row.get("error_message"),
            transferred_on: row.get("transferred_on"),
        })
    }
}

const SELECT_COLUMNS: &str = "transaction_reference, idempotency_key, from_account, to_account, \
                              amount, status, transfer_type, error_message, transferred_on";

#[async_trait]
impl TransferRecordStore for PgTransferStore {
    async fn create(&self, record: &TransferRecord) -> Result<TransferRecord, TransferError> {
        sqlx::query(
            r#"
            INSERT INTO fund_transfers
                (transaction_reference, idempotency_key, from_account, to_account,
                 amount, status, transfer_type, error_message, transferred_on)
            VALUES
                ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(&record.transaction_reference)
        .bind(&record.idempotency_key)
        .bind(&record.from_account)
        .bind(&record.to_account)
        .bind(record.amount)
        .bind(record.status.id())
        .bind(record.transfer_type.id())
        .bind(&record.error)
        .bind(record.transferred_on)
        .execute(&self.pool)
        .await?;

        Ok(record.clone())
    }

    async fn find_by_reference(
        &self,
        reference: &str,
    ) -> Result<Option<TransferRecord>, TransferError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM fund_transfers WHERE transaction_reference = $1",
            SELECT_COLUMNS
        ))
        .bind(reference)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| Self::row_to_record(&r)).transpose()
    }

    async fn find_by_from_account(
        &self,
        account_number: &str,
    ) -> Result<Vec<TransferRecord>, TransferError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM fund_transfers WHERE from_account = $1",
            SELECT_COLUMNS
        ))
        .bind(account_number)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::row_to_record).collect()
    }

    async fn find_by_idempotency_key(
        &self,
        key: &str,
    ) -> Result<Option<TransferRecord>, TransferError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM fund_transfers WHERE idempotency_key = $1 \
             ORDER BY fund_transfer_id DESC LIMIT 1",
            SELECT_COLUMNS
        ))
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| Self::row_to_record(&r)).transpose()
    }

    async fn update_status(
        &self,
        reference: &str,
        expected: TransferStatus,
        new: TransferStatus,
    ) -> Result<bool, TransferError> {
        let result = sqlx::query(
            "UPDATE fund_transfers SET status = $1 \
             WHERE transaction_reference = $2 AND status = $3",
        )
        .bind(new.id())
        .bind(reference)
        .bind(expected.id())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn update_status_with_error(
        &self,
        reference: &str,
        expected: TransferStatus,
        new: TransferStatus,
        error: &str,
    ) -> Result<bool, TransferError> {
        let result = sqlx::query(
            "UPDATE fund_transfers SET status = $1, error_message = $2 \
             WHERE transaction_reference = $3 AND status = $4",
        )
        .bind(new.id())
        .bind(error)
        .bind(reference)
        .bind(expected.id())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}


#[cfg(test)]
pub use memory::InMemoryTransferStore;
