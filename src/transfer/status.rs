//! Transfer status and type definitions.
//!
//! Numeric ids are what the store persists (SMALLINT); the string forms are
//! what the API serves.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Lifecycle of a transfer record.
///
/// Terminal states: SUCCESS (20), FAILED (-10).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(i16)]
pub enum TransferStatus {
    /// Record persisted, no external state touched yet
    Pending = 0,

    /// Balance movement in progress
    Processing = 10,

    /// Terminal: both accounts updated and the ledger batch recorded
    Success = 20,

    /// Terminal: rejected or failed; applied changes were compensated
    Failed = -10,
}

impl TransferStatus {
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self, TransferStatus::Success | TransferStatus::Failed)
    }

    /// Numeric id for SMALLINT storage.
    #[inline]
    pub fn id(&self) -> i16 {
        *self as i16
    }

    pub fn from_id(id: i16) -> Option<Self> {
        match id {
            0 => Some(TransferStatus::Pending),
            10 => Some(TransferStatus::Processing),
            20 => Some(TransferStatus::Success),
            -10 => Some(TransferStatus::Failed),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TransferStatus::Pending => "PENDING",
            TransferStatus::Processing => "PROCESSING",
            TransferStatus::Success => "SUCCESS",
            TransferStatus::Failed => "FAILED",
        }
    }
}

impl fmt::Display for TransferStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<i16> for TransferStatus {
    type Error = ();

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        TransferStatus::from_id(value).ok_or(())
    }
}

/// Kind of fund movement. Orchestration in this service always produces
/// INTERNAL transfers; the other kinds exist for records imported from the
/// wider platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(i16)]
pub enum TransferType {
    Withdrawal = 1,
    Internal = 2,
    External = 3,
    Cheque = 4,
}

impl TransferType {
    #[inline]
    pub fn id(&self) -> i16 {
        *self as i16
    }

    pub fn from_id(id: i16) -> Option<Self> {
        match id {
            1 => Some(TransferType::Withdrawal),
            2 => Some(TransferType::Internal),
            3 => Some(TransferType::External),
            4 => Some(TransferType::Cheque),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TransferType::Withdrawal => "WITHDRAWAL",
            TransferType::Internal => "INTERNAL",
            TransferType::External => "EXTERNAL",
            TransferType::Cheque => "CHEQUE",
        }
    }
}

impl fmt::Display for TransferType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_states() {
        assert!(TransferStatus::Success.is_terminal());
        assert!(TransferStatus::Failed.is_terminal());
        assert!(!TransferStatus::Pending.is_terminal());
        assert!(!TransferStatus::Processing.is_terminal());
    }

    #[test]
    fn test_status_id_roundtrip() {
        let statuses = [
            TransferStatus::Pending,
            TransferStatus::Processing,
            TransferStatus::Success,
            TransferStatus::Failed,
        ];
        for status in statuses {
            assert_eq!(TransferStatus::from_id(status.id()), Some(status));
        }
        assert!(TransferStatus::from_id(999).is_none());
    }

    #[test]
    fn test_transfer_type_id_roundtrip() {
        let types = [
            TransferType::Withdrawal,
            TransferType::Internal,
            TransferType::External,
            TransferType::Cheque,
        ];
        for transfer_type in types {
            assert_eq!(TransferType::from_id(transfer_type.id()), Some(transfer_type));
        }
        assert!(TransferType::from_id(0).is_none());
    }

    #[test]
    fn test_wire_form_is_screaming_case() {
        assert_eq!(
            serde_json::to_value(TransferStatus::Success).unwrap(),
            "SUCCESS"
        );
        assert_eq!(
            serde_json::to_value(TransferType::Internal).unwrap(),
            "INTERNAL"
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(TransferStatus::Processing.to_string(), "PROCESSING");
        assert_eq!(TransferType::Cheque.to_string(), "CHEQUE");
    }
}
