//! Request, response and record types for fund transfers.

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::status::{TransferStatus, TransferType};

/// Message returned to the caller when a transfer commits.
pub const TRANSFER_SUCCESS_MESSAGE: &str = "Fund transfer was successful";

/// Caller request to move funds between two accounts.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FundTransferRequest {
    pub from_account: String,
    pub to_account: String,
    pub amount: Decimal,
    /// Optional caller idempotency key: retrying a request with the same key
    /// never moves money twice.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idempotency_key: Option<String>,
}

/// Result returned to the caller once orchestration finishes.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FundTransferResponse {
    /// The transaction reference shared with the ledger entries.
    pub transaction_id: String,
    pub message: String,
}

/// Error payload served for rejected or failed requests.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub error_code: String,
    pub message: String,
}

/// Persistent record of one fund transfer.
///
/// Created PENDING before any external mutation; append-only once it reaches
/// a terminal status.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferRecord {
    pub transaction_reference: String,
    pub idempotency_key: Option<String>,
    pub from_account: String,
    pub to_account: String,
    pub amount: Decimal,
    pub status: TransferStatus,
    pub transfer_type: TransferType,
    /// Failure trail for reconciliation; never set on successful transfers.
    pub error: Option<String>,
    pub transferred_on: DateTime<Utc>,
}

impl TransferRecord {
    /// New INTERNAL transfer record in PENDING status.
    pub fn new(
        transaction_reference: String,
        from_account: String,
        to_account: String,
        amount: Decimal,
        idempotency_key: Option<String>,
    ) -> Self {
        Self {
            transaction_reference,
            idempotency_key,
            from_account,
            to_account,
            amount,
            status: TransferStatus::Pending,
            transfer_type: TransferType::Internal,
            error: None,
            transferred_on: Utc::now(),
        }
    }
}

impl fmt::Display for TransferRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Transfer[{}] {} -> {} amount={} status={}",
            self.transaction_reference, self.from_account, self.to_account, self.amount, self.status
        )
    }
}

/// Wire form of a transfer record.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FundTransferDto {
    pub transaction_reference: String,
    pub from_account: String,
    pub to_account: String,
    pub amount: Decimal,
    pub status: TransferStatus,
    pub transfer_type: TransferType,
    pub transferred_on: DateTime<Utc>,
}

impl From<TransferRecord> for FundTransferDto {
    fn from(record: TransferRecord) -> Self {
        Self {
            transaction_reference: record.transaction_reference,
            from_account: record.from_account,
            to_account: record.to_account,
            amount: record.amount,
            status: record.status,
            transfer_type: record.transfer_type,
            transferred_on: record.transferred_on,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> TransferRecord {
        TransferRecord::new(
            "REF-1".to_string(),
            "ACC0001234".to_string(),
            "ACC0005678".to_string(),
            Decimal::from(500),
            None,
        )
    }

    #[test]
    fn test_new_record_starts_pending_internal() {
        let record = record();
        assert_eq!(record.status, TransferStatus::Pending);
        assert_eq!(record.transfer_type, TransferType::Internal);
        assert!(record.error.is_none());
        assert!(record.idempotency_key.is_none());
    }

    #[test]
    fn test_request_wire_shape() {
        let json = r#"{"fromAccount":"ACC0001234","toAccount":"ACC0005678","amount":500}"#;
        let request: FundTransferRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.from_account, "ACC0001234");
        assert_eq!(request.amount, Decimal::from(500));
        assert!(request.idempotency_key.is_none());

        let with_key: FundTransferRequest = serde_json::from_str(
            r#"{"fromAccount":"A","toAccount":"B","amount":"10.50","idempotencyKey":"k-1"}"#,
        )
        .unwrap();
        assert_eq!(with_key.amount, Decimal::new(1050, 2));
        assert_eq!(with_key.idempotency_key.as_deref(), Some("k-1"));
    }

    #[test]
    fn test_dto_from_record() {
        let mut record = record();
        record.status = TransferStatus::Success;
        let dto = FundTransferDto::from(record.clone());

        assert_eq!(dto.transaction_reference, record.transaction_reference);
        assert_eq!(dto.amount, record.amount);

        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["transactionReference"], "REF-1");
        assert_eq!(json["status"], "SUCCESS");
        assert_eq!(json["transferType"], "INTERNAL");
    }

    #[test]
    fn test_record_display() {
        assert_eq!(
            record().to_string(),
            "Transfer[REF-1] ACC0001234 -> ACC0005678 amount=500 status=PENDING"
        );
    }
}
