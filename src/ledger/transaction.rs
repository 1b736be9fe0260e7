//! Posting of deposits, withdrawals and transfers onto locked account records
//!
//! Every function here checks all of its preconditions and reserves log
//! capacity before touching the records, so a returned error always means the
//! records were left exactly as they were.

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};

use crate::ledger::account::AccountRecord;
use crate::types::*;
use crate::utils::validation::{validate_positive_amount, validate_sufficient_funds};

/// Post a deposit onto an account
pub fn post_deposit(
    account: &mut AccountRecord,
    amount: BigDecimal,
    date: DateTime<Utc>,
) -> LedgerResult<()> {
    validate_positive_amount(&amount, "Deposit")?;
    account.reserve(1)?;

    account.apply(Transaction::deposit(amount, date));
    Ok(())
}

/// Post a withdrawal onto an account
pub fn post_withdraw(
    account: &mut AccountRecord,
    amount: BigDecimal,
    date: DateTime<Utc>,
) -> LedgerResult<()> {
    validate_positive_amount(&amount, "Withdrawal")?;
    validate_sufficient_funds(account.id(), account.balance(), &amount)?;
    account.reserve(1)?;

    account.apply(Transaction::withdraw(amount, date));
    Ok(())
}

/// Post both legs of a transfer
///
/// The two records must be distinct and locked by the caller for the whole
/// call. Both legs carry the same timestamp and amount and name each other as
/// counterparty.
pub fn post_transfer(
    from: &mut AccountRecord,
    to: &mut AccountRecord,
    amount: BigDecimal,
    date: DateTime<Utc>,
) -> LedgerResult<()> {
    validate_positive_amount(&amount, "Transfer")?;
    validate_sufficient_funds(from.id(), from.balance(), &amount)?;
    from.reserve(1)?;
    to.reserve(1)?;

    let outgoing = Transaction::transfer_out(amount.clone(), date, to.id().to_string());
    let incoming = Transaction::transfer_in(amount, date, from.id().to_string());
    from.apply(outgoing);
    to.apply(incoming);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, balance: i64) -> AccountRecord {
        AccountRecord::new(id.to_string(), id.to_uppercase(), BigDecimal::from(balance))
    }

    #[test]
    fn deposit_appends_one_entry() {
        let mut acc = record("a", 1000);
        post_deposit(&mut acc, BigDecimal::from(500), Utc::now()).unwrap();

        assert_eq!(acc.balance(), &BigDecimal::from(1500));
        assert_eq!(acc.transactions().len(), 1);
        assert_eq!(acc.transactions()[0].kind, TransactionKind::Deposit);
        assert_eq!(acc.transactions()[0].amount, BigDecimal::from(500));
        assert!(acc.transactions()[0].counterparty.is_none());
    }

    #[test]
    fn rejected_deposit_leaves_record_untouched() {
        let mut acc = record("a", 1000);
        for amount in [0, -100] {
            let err = post_deposit(&mut acc, BigDecimal::from(amount), Utc::now()).unwrap_err();
            assert!(matches!(err, LedgerError::InvalidArgument(_)));
        }
        assert_eq!(acc.balance(), &BigDecimal::from(1000));
        assert!(acc.transactions().is_empty());
    }

    #[test]
    fn withdraw_whole_balance() {
        let mut acc = record("a", 300);
        post_withdraw(&mut acc, BigDecimal::from(300), Utc::now()).unwrap();

        assert_eq!(acc.balance(), &BigDecimal::from(0));
        assert_eq!(acc.transactions()[0].kind, TransactionKind::Withdraw);
    }

    #[test]
    fn overdraw_is_rejected() {
        let mut acc = record("a", 1500);
        let err = post_withdraw(&mut acc, BigDecimal::from(2000), Utc::now()).unwrap_err();

        assert!(matches!(err, LedgerError::InsufficientFunds { .. }));
        assert_eq!(acc.balance(), &BigDecimal::from(1500));
        assert!(acc.transactions().is_empty());
    }

    #[test]
    fn transfer_posts_crossed_pair() {
        let mut alice = record("alice", 1000);
        let mut bob = record("bob", 500);
        let date = Utc::now();

        post_transfer(&mut alice, &mut bob, BigDecimal::from(300), date).unwrap();

        assert_eq!(alice.balance(), &BigDecimal::from(700));
        assert_eq!(bob.balance(), &BigDecimal::from(800));

        let out = &alice.transactions()[0];
        let incoming = &bob.transactions()[0];
        assert_eq!(out.kind, TransactionKind::TransferOut);
        assert_eq!(out.counterparty.as_deref(), Some("bob"));
        assert_eq!(incoming.kind, TransactionKind::TransferIn);
        assert_eq!(incoming.counterparty.as_deref(), Some("alice"));
        assert_eq!(out.date, incoming.date);
        assert_eq!(out.amount, incoming.amount);
    }

    #[test]
    fn failed_transfer_touches_neither_account() {
        let mut alice = record("alice", 100);
        let mut bob = record("bob", 0);

        let err = post_transfer(&mut alice, &mut bob, BigDecimal::from(150), Utc::now())
            .unwrap_err();
        assert!(matches!(err, LedgerError::InsufficientFunds { .. }));

        let err = post_transfer(&mut alice, &mut bob, BigDecimal::from(0), Utc::now())
            .unwrap_err();
        assert!(matches!(err, LedgerError::InvalidArgument(_)));

        assert_eq!(alice.balance(), &BigDecimal::from(100));
        assert_eq!(bob.balance(), &BigDecimal::from(0));
        assert!(alice.transactions().is_empty());
        assert!(bob.transactions().is_empty());
    }
}
