//! Traits for identifier generation, validation and the service seam

use async_trait::async_trait;
use bigdecimal::BigDecimal;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::types::*;
use crate::utils::validation::validate_account_name;

/// Source of account identifiers
///
/// Implementations must never hand out the same identifier twice, including
/// when called from several threads at once.
pub trait IdGenerator: Send + Sync {
    /// Produce a fresh identifier
    fn next_id(&self) -> String;
}

/// Random UUID v4 identifiers
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

/// Monotonic counter identifiers (`acc-1`, `acc-2`, ...)
#[derive(Debug, Default)]
pub struct SequentialIdGenerator {
    next: AtomicU64,
}

impl SequentialIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed) + 1;
        format!("acc-{n}")
    }
}

/// Trait for implementing custom account validation rules
pub trait AccountValidator: Send + Sync {
    /// Validate the attributes of an account before it is created
    fn validate_new_account(&self, name: &str, initial_balance: &BigDecimal) -> LedgerResult<()>;
}

/// Default account validator: non-blank name, non-negative opening balance
pub struct DefaultAccountValidator;

impl AccountValidator for DefaultAccountValidator {
    fn validate_new_account(&self, name: &str, initial_balance: &BigDecimal) -> LedgerResult<()> {
        validate_account_name(name)?;

        if *initial_balance < BigDecimal::from(0) {
            return Err(LedgerError::InvalidArgument(
                "Initial balance cannot be negative".to_string(),
            ));
        }

        Ok(())
    }
}

/// Operations the transport layer needs from the ledger
///
/// `Ledger` is the production implementation; the HTTP handlers only see this
/// trait object so they can be driven by any other implementation.
#[async_trait]
pub trait LedgerService: Send + Sync {
    /// Open a new account
    async fn create_account(&self, name: String, initial_balance: BigDecimal)
        -> LedgerResult<Account>;

    /// Full snapshot of one account
    async fn get_account(&self, account_id: &str) -> LedgerResult<Account>;

    /// Pay money into an account
    async fn deposit(&self, account_id: &str, amount: BigDecimal) -> LedgerResult<()>;

    /// Take money out of an account
    async fn withdraw(&self, account_id: &str, amount: BigDecimal) -> LedgerResult<()>;

    /// Move money between two accounts
    async fn transfer(
        &self,
        from_account_id: &str,
        to_account_id: &str,
        amount: BigDecimal,
    ) -> LedgerResult<()>;

    /// Transaction log of an account, oldest first
    async fn list_transactions(&self, account_id: &str) -> LedgerResult<Vec<Transaction>>;
}
