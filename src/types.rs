//! Core types and data structures for the banking ledger

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of balance-affecting event recorded in an account's log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransactionKind {
    /// Money paid into the account
    Deposit,
    /// Money taken out of the account
    Withdraw,
    /// Outgoing leg of a transfer; the counterparty is the destination
    TransferOut,
    /// Incoming leg of a transfer; the counterparty is the source
    TransferIn,
}

impl TransactionKind {
    /// Whether this kind adds to the balance
    pub fn is_credit(&self) -> bool {
        matches!(self, TransactionKind::Deposit | TransactionKind::TransferIn)
    }

    /// Whether this kind is one leg of a transfer pair
    pub fn is_transfer(&self) -> bool {
        matches!(
            self,
            TransactionKind::TransferOut | TransactionKind::TransferIn
        )
    }

    /// Wire name of the kind
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Deposit => "deposit",
            TransactionKind::Withdraw => "withdraw",
            TransactionKind::TransferOut => "transfer-out",
            TransactionKind::TransferIn => "transfer-in",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Immutable record of one balance-affecting event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// When the event happened
    pub date: DateTime<Utc>,
    /// Always positive; direction comes from `kind`
    pub amount: BigDecimal,
    /// What happened
    pub kind: TransactionKind,
    /// The other account of a transfer pair
    pub counterparty: Option<String>,
}

impl Transaction {
    /// Create a deposit record
    pub fn deposit(amount: BigDecimal, date: DateTime<Utc>) -> Self {
        Self {
            date,
            amount,
            kind: TransactionKind::Deposit,
            counterparty: None,
        }
    }

    /// Create a withdrawal record
    pub fn withdraw(amount: BigDecimal, date: DateTime<Utc>) -> Self {
        Self {
            date,
            amount,
            kind: TransactionKind::Withdraw,
            counterparty: None,
        }
    }

    /// Create the outgoing leg of a transfer
    pub fn transfer_out(amount: BigDecimal, date: DateTime<Utc>, to_account_id: String) -> Self {
        Self {
            date,
            amount,
            kind: TransactionKind::TransferOut,
            counterparty: Some(to_account_id),
        }
    }

    /// Create the incoming leg of a transfer
    pub fn transfer_in(amount: BigDecimal, date: DateTime<Utc>, from_account_id: String) -> Self {
        Self {
            date,
            amount,
            kind: TransactionKind::TransferIn,
            counterparty: Some(from_account_id),
        }
    }

    /// Signed effect of this record on the account balance
    pub fn signed_amount(&self) -> BigDecimal {
        if self.kind.is_credit() {
            self.amount.clone()
        } else {
            -self.amount.clone()
        }
    }
}

/// Snapshot of an account as handed to callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier for the account
    pub id: String,
    /// Human-readable account name
    pub name: String,
    /// Current balance of the account
    pub balance: BigDecimal,
    /// Transaction log in chronological order
    pub transactions: Vec<Transaction>,
}

/// Report on ledger integrity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerIntegrityReport {
    pub checked_at: DateTime<Utc>,
    pub accounts_checked: usize,
    pub is_valid: bool,
    pub issues: Vec<String>,
}

/// Errors that can occur in the ledger system
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("{0}")]
    InvalidArgument(String),
    #[error("Account not found: {0}")]
    AccountNotFound(String),
    #[error("Insufficient balance in account {account_id}: requested {requested}, available {available}")]
    InsufficientFunds {
        account_id: String,
        requested: BigDecimal,
        available: BigDecimal,
    },
    #[error("Internal error: {0}")]
    Internal(String),
}

impl LedgerError {
    /// Whether the caller can correct the request and retry
    pub fn is_client_error(&self) -> bool {
        !matches!(self, LedgerError::Internal(_))
    }
}

/// Result type for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_serializes_kebab_case() {
        let json = serde_json::to_string(&TransactionKind::TransferOut).unwrap();
        assert_eq!(json, "\"transfer-out\"");
        let kind: TransactionKind = serde_json::from_str("\"transfer-in\"").unwrap();
        assert_eq!(kind, TransactionKind::TransferIn);
        assert_eq!(TransactionKind::Withdraw.to_string(), "withdraw");
    }

    #[test]
    fn signed_amount_follows_kind() {
        let now = Utc::now();
        let amount = BigDecimal::from(25);

        assert_eq!(Transaction::deposit(amount.clone(), now).signed_amount(), BigDecimal::from(25));
        assert_eq!(Transaction::withdraw(amount.clone(), now).signed_amount(), BigDecimal::from(-25));

        let out = Transaction::transfer_out(amount.clone(), now, "b".to_string());
        assert_eq!(out.signed_amount(), BigDecimal::from(-25));
        assert_eq!(out.counterparty.as_deref(), Some("b"));

        let incoming = Transaction::transfer_in(amount, now, "a".to_string());
        assert_eq!(incoming.signed_amount(), BigDecimal::from(25));
        assert!(incoming.kind.is_transfer());
    }

    #[test]
    fn internal_errors_are_not_client_errors() {
        assert!(LedgerError::AccountNotFound("x".to_string()).is_client_error());
        assert!(!LedgerError::Internal("poisoned".to_string()).is_client_error());
    }
}
