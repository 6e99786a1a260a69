//! Transfer error taxonomy.
//!
//! Validation errors are raised before any external mutation and are safe to
//! retry as-is. `Incomplete` is the one kind that means money may have moved
//! and compensation could not restore it.

use thiserror::Error;

use crate::remote::GatewayError;

#[derive(Error, Debug)]
pub enum TransferError {
    // === Validation errors (nothing mutated) ===
    #[error("{0} not found")]
    ResourceNotFound(&'static str),

    #[error("account {0} is not in ACTIVE status")]
    AccountNotUpdatable(String),

    #[error("insufficient balance in the source account")]
    InsufficientBalance,

    #[error("amount must be greater than zero")]
    InvalidAmount,

    #[error("source and destination account cannot be the same")]
    SameAccount,

    // === Movement errors ===
    #[error("account kept changing concurrently: {0}")]
    PreconditionExhausted(String),

    /// Partially applied and compensation failed; the record's error trail
    /// is the reconciliation input.
    #[error("transfer partially applied: {0}")]
    Incomplete(String),

    // === System errors ===
    #[error("remote service call failed: {0}")]
    Remote(String),

    #[error("database error: {0}")]
    Database(String),
}

impl TransferError {
    /// Error code served in the `errorCode` field of error responses.
    pub fn code(&self) -> &'static str {
        match self {
            TransferError::ResourceNotFound(_) => "RESOURCE_NOT_FOUND",
            TransferError::AccountNotUpdatable(_) => "ACCOUNT_NOT_UPDATABLE",
            TransferError::InsufficientBalance => "INSUFFICIENT_BALANCE",
            TransferError::InvalidAmount => "INVALID_AMOUNT",
            TransferError::SameAccount => "SAME_ACCOUNT",
            TransferError::PreconditionExhausted(_) => "PRECONDITION_FAILED",
            TransferError::Incomplete(_) => "TRANSFER_INCOMPLETE",
            TransferError::Remote(_) => "REMOTE_SERVICE_ERROR",
            TransferError::Database(_) => "DATABASE_ERROR",
        }
    }

    /// HTTP status the API maps this error to.
    pub fn http_status(&self) -> u16 {
        match self {
            TransferError::ResourceNotFound(_) => 404,
            TransferError::AccountNotUpdatable(_) | TransferError::InsufficientBalance => 422,
            TransferError::InvalidAmount | TransferError::SameAccount => 400,
            TransferError::PreconditionExhausted(_) => 409,
            TransferError::Incomplete(_) | TransferError::Database(_) => 500,
            TransferError::Remote(_) => 503,
        }
    }
}

impl From<GatewayError> for TransferError {
    fn from(e: GatewayError) -> Self {
        match e {
            GatewayError::PreconditionFailed => TransferError::PreconditionExhausted(e.to_string()),
            GatewayError::Remote(msg) => TransferError::Remote(msg),
        }
    }
}

impl From<sqlx::Error> for TransferError {
    fn from(e: sqlx::Error) -> Self {
        TransferError::Database(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            TransferError::ResourceNotFound("source account").code(),
            "RESOURCE_NOT_FOUND"
        );
        assert_eq!(
            TransferError::InsufficientBalance.code(),
            "INSUFFICIENT_BALANCE"
        );
        assert_eq!(
            TransferError::AccountNotUpdatable("ACC1".into()).code(),
            "ACCOUNT_NOT_UPDATABLE"
        );
        assert_eq!(TransferError::Incomplete("x".into()).code(), "TRANSFER_INCOMPLETE");
    }

    #[test]
    fn test_http_status() {
        assert_eq!(TransferError::ResourceNotFound("fund transfer").http_status(), 404);
        assert_eq!(TransferError::InsufficientBalance.http_status(), 422);
        assert_eq!(TransferError::InvalidAmount.http_status(), 400);
        assert_eq!(TransferError::PreconditionExhausted("x".into()).http_status(), 409);
        assert_eq!(TransferError::Remote("down".into()).http_status(), 503);
    }

    #[test]
    fn test_display_names_the_missing_resource() {
        assert_eq!(
            TransferError::ResourceNotFound("source account").to_string(),
            "source account not found"
        );
        assert_eq!(
            TransferError::ResourceNotFound("destination account").to_string(),
            "destination account not found"
        );
    }

    #[test]
    fn test_gateway_error_conversion() {
        let err: TransferError = GatewayError::Remote("timeout".to_string()).into();
        assert!(matches!(err, TransferError::Remote(_)));

        let err: TransferError = GatewayError::PreconditionFailed.into();
        assert!(matches!(err, TransferError::PreconditionExhausted(_)));
    }
}
