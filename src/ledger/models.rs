//! Ledger entry types sent to the ledger service.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single signed line item: money leaving (negative) or entering
/// (positive) one account. Internal transfers always produce a matched
/// debit/credit pair summing to zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntry {
    /// Account number the entry applies to.
    pub account_id: String,
    /// Free-form transaction type label, e.g. "INTERNAL_TRANSFER".
    pub transaction_type: String,
    /// Signed amount: negative for the debit leg, positive for the credit leg.
    pub amount: Decimal,
    pub description: String,
}

impl LedgerEntry {
    /// Debit leg: `amount` leaves `account_id`.
    pub fn debit(
        account_id: impl Into<String>,
        transaction_type: impl Into<String>,
        amount: Decimal,
        description: impl Into<String>,
    ) -> Self {
        Self {
            account_id: account_id.into(),
            transaction_type: transaction_type.into(),
            amount: -amount,
            description: description.into(),
        }
    }

    /// Credit leg: `amount` enters `account_id`.
    pub fn credit(
        account_id: impl Into<String>,
        transaction_type: impl Into<String>,
        amount: Decimal,
        description: impl Into<String>,
    ) -> Self {
        Self {
            account_id: account_id.into(),
            transaction_type: transaction_type.into(),
            amount,
            description: description.into(),
        }
    }
}
