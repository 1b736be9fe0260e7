//! Validation utilities

use crate::types::*;
use bigdecimal::BigDecimal;

/// Longest accepted account name, in characters
pub const MAX_ACCOUNT_NAME_LEN: usize = 100;

/// Validate that an amount is positive
pub fn validate_positive_amount(amount: &BigDecimal, operation: &str) -> LedgerResult<()> {
    if *amount <= BigDecimal::from(0) {
        Err(LedgerError::InvalidArgument(format!(
            "{operation} amount must be positive"
        )))
    } else {
        Ok(())
    }
}

/// Validate that an account name is valid
pub fn validate_account_name(name: &str) -> LedgerResult<()> {
    if name.trim().is_empty() {
        return Err(LedgerError::InvalidArgument(
            "Account name cannot be empty".to_string(),
        ));
    }

    if name.chars().count() > MAX_ACCOUNT_NAME_LEN {
        return Err(LedgerError::InvalidArgument(format!(
            "Account name cannot exceed {MAX_ACCOUNT_NAME_LEN} characters"
        )));
    }

    Ok(())
}

/// Validate that a transfer moves money between two different accounts
pub fn validate_distinct_accounts(from_account_id: &str, to_account_id: &str) -> LedgerResult<()> {
    if from_account_id == to_account_id {
        return Err(LedgerError::InvalidArgument(
            "Cannot transfer to the same account".to_string(),
        ));
    }

    Ok(())
}

/// Validate that an account holds enough money for a debit
pub fn validate_sufficient_funds(
    account_id: &str,
    balance: &BigDecimal,
    amount: &BigDecimal,
) -> LedgerResult<()> {
    if balance < amount {
        return Err(LedgerError::InsufficientFunds {
            account_id: account_id.to_string(),
            requested: amount.clone(),
            available: balance.clone(),
        });
    }

    Ok(())
}
