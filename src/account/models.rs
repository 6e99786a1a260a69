//! Account snapshot types owned by the account service.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Account lifecycle status as reported by the account service.
///
/// Only ACTIVE accounts may act as a transfer source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountStatus {
    Pending,
    Active,
    Blocked,
    Closed,
}

impl AccountStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountStatus::Pending => "PENDING",
            AccountStatus::Active => "ACTIVE",
            AccountStatus::Blocked => "BLOCKED",
            AccountStatus::Closed => "CLOSED",
        }
    }
}

impl fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Snapshot of an account as owned by the account service.
///
/// The orchestrator reads a snapshot, recomputes the balance, and writes the
/// whole snapshot back. Fields it never touches (id, type, owner) are carried
/// along so the write-back does not erase them on the remote side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<i64>,
    pub account_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_type: Option<String>,
    pub account_status: AccountStatus,
    pub available_balance: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
}

impl Account {
    pub fn is_active(&self) -> bool {
        self.account_status == AccountStatus::Active
    }

    /// Copy of this snapshot with a recomputed available balance.
    pub fn with_balance(&self, available_balance: Decimal) -> Self {
        Self {
            available_balance,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(status: AccountStatus) -> Account {
        Account {
            account_id: Some(7),
            account_number: "ACC0001234".to_string(),
            account_type: Some("SAVINGS".to_string()),
            account_status: status,
            available_balance: Decimal::from(1000),
            user_id: Some(42),
        }
    }

    #[test]
    fn test_only_active_accounts_are_active() {
        assert!(account(AccountStatus::Active).is_active());
        assert!(!account(AccountStatus::Pending).is_active());
        assert!(!account(AccountStatus::Blocked).is_active());
        assert!(!account(AccountStatus::Closed).is_active());
    }

    #[test]
    fn test_with_balance_keeps_remote_owned_fields() {
        let updated = account(AccountStatus::Active).with_balance(Decimal::from(500));
        assert_eq!(updated.available_balance, Decimal::from(500));
        assert_eq!(updated.account_id, Some(7));
        assert_eq!(updated.account_type.as_deref(), Some("SAVINGS"));
        assert_eq!(updated.user_id, Some(42));
    }

    #[test]
    fn test_wire_shape_is_camel_case() {
        let json = serde_json::to_value(account(AccountStatus::Active)).unwrap();
        assert_eq!(json["accountNumber"], "ACC0001234");
        assert_eq!(json["accountStatus"], "ACTIVE");
        assert_eq!(json["availableBalance"], "1000");
    }

    #[test]
    fn test_parses_account_service_payload() {
        let json = r#"{
            "accountId": 1,
            "accountNumber": "ACC0005678",
            "accountType": "SAVINGS",
            "accountStatus": "BLOCKED",
            "availableBalance": 250.75,
            "userId": 9
        }"#;
        let account: Account = serde_json::from_str(json).unwrap();
        assert_eq!(account.account_status, AccountStatus::Blocked);
        assert_eq!(account.available_balance, Decimal::new(25075, 2));
    }
}
