//! Request and response bodies of the HTTP API
//!
//! Field names are camelCase. Amounts are accepted as JSON numbers or decimal
//! strings and always returned as decimal strings.

use std::str::FromStr;

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::{Account, Transaction, TransactionKind};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccountRequest {
    pub name: String,
    #[serde(deserialize_with = "decimal_amount")]
    pub initial_balance: BigDecimal,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositRequest {
    pub account_id: String,
    #[serde(alias = "depositAmount", deserialize_with = "decimal_amount")]
    pub amount: BigDecimal,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawRequest {
    pub account_id: String,
    #[serde(alias = "withdrawalAmount", deserialize_with = "decimal_amount")]
    pub amount: BigDecimal,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    pub from_account_id: String,
    pub to_account_id: String,
    #[serde(alias = "transferAmount", deserialize_with = "decimal_amount")]
    pub amount: BigDecimal,
}

/// Parse an amount from the literal text of a JSON number or string.
///
/// A JSON number is read through its shortest decimal rendering, so `0.1`
/// becomes exactly `0.1` rather than the expansion of the nearest `f64`.
fn decimal_amount<'de, D>(deserializer: D) -> Result<BigDecimal, D::Error>
where
    D: Deserializer<'de>,
{
    let text = match Value::deserialize(deserializer)? {
        Value::Number(number) => number.to_string(),
        Value::String(text) => text,
        other => {
            return Err(de::Error::custom(format!(
                "expected a decimal amount, found {other}"
            )))
        }
    };

    BigDecimal::from_str(text.trim())
        .map_err(|e| de::Error::custom(format!("invalid amount '{text}': {e}")))
}

/// One entry of an account's transaction log
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionResponse {
    pub date: DateTime<Utc>,
    pub amount: BigDecimal,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_account_id: Option<String>,
}

impl From<Transaction> for TransactionResponse {
    fn from(transaction: Transaction) -> Self {
        Self {
            date: transaction.date,
            amount: transaction.amount,
            kind: transaction.kind,
            target_account_id: transaction.counterparty,
        }
    }
}

/// Full account detail
#[derive(Debug, Clone, Serialize)]
pub struct AccountResponse {
    pub id: String,
    pub name: String,
    pub balance: BigDecimal,
    pub transactions: Vec<TransactionResponse>,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            name: account.name,
            balance: account.balance,
            transactions: account
                .transactions
                .into_iter()
                .map(TransactionResponse::from)
                .collect(),
        }
    }
}

/// Confirmation of a successful mutation
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}
