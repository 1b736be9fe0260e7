//! Account records and the shared account table

use bigdecimal::BigDecimal;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, RwLock};

use crate::types::*;

/// Mutable state of one account, only ever touched under its lock
#[derive(Debug)]
pub struct AccountRecord {
    id: String,
    name: String,
    opening_balance: BigDecimal,
    balance: BigDecimal,
    transactions: Vec<Transaction>,
}

impl AccountRecord {
    /// Create a record with an empty log
    pub fn new(id: String, name: String, opening_balance: BigDecimal) -> Self {
        Self {
            id,
            name,
            balance: opening_balance.clone(),
            opening_balance,
            transactions: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn balance(&self) -> &BigDecimal {
        &self.balance
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Owned copy handed out to callers
    pub fn snapshot(&self) -> Account {
        Account {
            id: self.id.clone(),
            name: self.name.clone(),
            balance: self.balance.clone(),
            transactions: self.transactions.clone(),
        }
    }

    /// Balance recomputed from the opening balance and the log
    pub fn replayed_balance(&self) -> BigDecimal {
        self.transactions
            .iter()
            .fold(self.opening_balance.clone(), |acc, txn| acc + txn.signed_amount())
    }

    /// Make room for `additional` log entries so a later `apply` cannot fail
    pub fn reserve(&mut self, additional: usize) -> LedgerResult<()> {
        self.transactions.try_reserve(additional).map_err(|e| {
            LedgerError::Internal(format!(
                "cannot grow transaction log of account {}: {e}",
                self.id
            ))
        })
    }

    /// Apply a validated transaction: adjust the balance and append to the log
    ///
    /// Callers must have reserved log capacity and checked the balance first.
    pub fn apply(&mut self, transaction: Transaction) {
        if transaction.kind.is_credit() {
            self.balance += &transaction.amount;
        } else {
            self.balance -= &transaction.amount;
        }
        self.transactions.push(transaction);
    }
}

/// Shared handle to one account's record
pub type AccountHandle = Arc<Mutex<AccountRecord>>;

/// Lock one account, mapping a poisoned lock to an internal error
pub fn lock_account(handle: &AccountHandle) -> LedgerResult<MutexGuard<'_, AccountRecord>> {
    handle
        .lock()
        .map_err(|_| LedgerError::Internal("account lock poisoned".to_string()))
}

/// Lock two distinct accounts in ascending id order
///
/// Guards are returned in argument order regardless of acquisition order.
pub fn lock_account_pair<'a>(
    first_id: &str,
    first: &'a AccountHandle,
    second_id: &str,
    second: &'a AccountHandle,
) -> LedgerResult<(MutexGuard<'a, AccountRecord>, MutexGuard<'a, AccountRecord>)> {
    if first_id <= second_id {
        let first_guard = lock_account(first)?;
        let second_guard = lock_account(second)?;
        Ok((first_guard, second_guard))
    } else {
        let second_guard = lock_account(second)?;
        let first_guard = lock_account(first)?;
        Ok((first_guard, second_guard))
    }
}

/// Table of all accounts owned by a ledger
///
/// The table lock is held only long enough to look up or insert a handle;
/// account state itself is guarded by the per-account mutex.
#[derive(Debug, Default)]
pub struct AccountTable {
    accounts: RwLock<HashMap<String, AccountHandle>>,
}

impl AccountTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new record; identifiers may never be reused
    pub fn insert(&self, record: AccountRecord) -> LedgerResult<()> {
        let mut accounts = self
            .accounts
            .write()
            .map_err(|_| LedgerError::Internal("account table lock poisoned".to_string()))?;

        if accounts.contains_key(record.id()) {
            return Err(LedgerError::Internal(format!(
                "account id {} generated twice",
                record.id()
            )));
        }

        accounts.insert(record.id().to_string(), Arc::new(Mutex::new(record)));
        Ok(())
    }

    /// Handle for an existing account
    pub fn get(&self, account_id: &str) -> LedgerResult<AccountHandle> {
        self.accounts
            .read()
            .map_err(|_| LedgerError::Internal("account table lock poisoned".to_string()))?
            .get(account_id)
            .cloned()
            .ok_or_else(|| LedgerError::AccountNotFound(account_id.to_string()))
    }

    /// Handles for every account, ordered by id
    pub fn all(&self) -> LedgerResult<Vec<(String, AccountHandle)>> {
        let accounts = self
            .accounts
            .read()
            .map_err(|_| LedgerError::Internal("account table lock poisoned".to_string()))?;

        let mut handles: Vec<(String, AccountHandle)> = accounts
            .iter()
            .map(|(id, handle)| (id.clone(), Arc::clone(handle)))
            .collect();
        handles.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(handles)
    }

    pub fn len(&self) -> LedgerResult<usize> {
        self.accounts
            .read()
            .map(|accounts| accounts.len())
            .map_err(|_| LedgerError::Internal("account table lock poisoned".to_string()))
    }

    pub fn is_empty(&self) -> LedgerResult<bool> {
        Ok(self.len()? == 0)
    }
}
