//! Main ledger orchestrator that coordinates accounts and transactions

use async_trait::async_trait;
use bigdecimal::BigDecimal;
use chrono::Utc;
use tracing::instrument;

use crate::ledger::account::{lock_account, lock_account_pair, AccountRecord, AccountTable};
use crate::ledger::transaction::{post_deposit, post_transfer, post_withdraw};
use crate::traits::*;
use crate::types::*;
use crate::utils::validation::validate_distinct_accounts;

/// Main ledger system that owns every account and its transaction log
///
/// All operations take `&self`; a `Ledger` is meant to be shared behind an
/// `Arc` between any number of threads or tasks.
pub struct Ledger {
    accounts: AccountTable,
    id_generator: Box<dyn IdGenerator>,
    validator: Box<dyn AccountValidator>,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger {
    /// Create an empty ledger with UUID account ids
    pub fn new() -> Self {
        Self::with_id_generator(Box::new(UuidGenerator))
    }

    /// Create an empty ledger with a custom id generator
    pub fn with_id_generator(id_generator: Box<dyn IdGenerator>) -> Self {
        Self::with_validator(id_generator, Box::new(DefaultAccountValidator))
    }

    /// Create an empty ledger with a custom id generator and account validator
    pub fn with_validator(
        id_generator: Box<dyn IdGenerator>,
        validator: Box<dyn AccountValidator>,
    ) -> Self {
        Self {
            accounts: AccountTable::new(),
            id_generator,
            validator,
        }
    }

    /// Number of accounts in the ledger
    pub fn account_count(&self) -> LedgerResult<usize> {
        self.accounts.len()
    }

    /// Open a new account; no transaction is logged for the opening balance
    #[instrument(skip(self, initial_balance), fields(initial_balance = %initial_balance))]
    pub fn create_account(&self, name: String, initial_balance: BigDecimal) -> LedgerResult<Account> {
        let result = self
            .validator
            .validate_new_account(&name, &initial_balance)
            .and_then(|()| {
                let record = AccountRecord::new(self.id_generator.next_id(), name, initial_balance);
                let account = record.snapshot();
                self.accounts.insert(record)?;
                Ok(account)
            });

        if let Ok(account) = &result {
            tracing::info!(account_id = %account.id, "account created");
        }
        log_rejection("create_account", result)
    }

    /// Full snapshot of one account
    pub fn get_account(&self, account_id: &str) -> LedgerResult<Account> {
        let handle = self.accounts.get(account_id)?;
        let record = lock_account(&handle)?;
        Ok(record.snapshot())
    }

    /// Snapshot of every account, ordered by id
    pub fn list_accounts(&self) -> LedgerResult<Vec<Account>> {
        self.accounts
            .all()?
            .iter()
            .map(|(_, handle)| lock_account(handle).map(|record| record.snapshot()))
            .collect()
    }

    /// Pay money into an account
    #[instrument(skip(self, amount), fields(amount = %amount))]
    pub fn deposit(&self, account_id: &str, amount: BigDecimal) -> LedgerResult<()> {
        let result = self.accounts.get(account_id).and_then(|handle| {
            let mut record = lock_account(&handle)?;
            post_deposit(&mut record, amount, Utc::now())?;
            tracing::debug!(balance = %record.balance(), "deposit posted");
            Ok(())
        });
        log_rejection("deposit", result)
    }

    /// Take money out of an account
    #[instrument(skip(self, amount), fields(amount = %amount))]
    pub fn withdraw(&self, account_id: &str, amount: BigDecimal) -> LedgerResult<()> {
        let result = self.accounts.get(account_id).and_then(|handle| {
            let mut record = lock_account(&handle)?;
            post_withdraw(&mut record, amount, Utc::now())?;
            tracing::debug!(balance = %record.balance(), "withdrawal posted");
            Ok(())
        });
        log_rejection("withdraw", result)
    }

    /// Move money between two different accounts as one atomic unit
    #[instrument(skip(self, amount), fields(amount = %amount))]
    pub fn transfer(
        &self,
        from_account_id: &str,
        to_account_id: &str,
        amount: BigDecimal,
    ) -> LedgerResult<()> {
        let result = validate_distinct_accounts(from_account_id, to_account_id).and_then(|()| {
            let from = self.accounts.get(from_account_id)?;
            let to = self.accounts.get(to_account_id)?;

            let (mut from_record, mut to_record) =
                lock_account_pair(from_account_id, &from, to_account_id, &to)?;
            post_transfer(&mut from_record, &mut to_record, amount, Utc::now())?;
            tracing::debug!(
                from_balance = %from_record.balance(),
                to_balance = %to_record.balance(),
                "transfer posted"
            );
            Ok(())
        });
        log_rejection("transfer", result)
    }

    /// Transaction log of an account, oldest first
    ///
    /// The returned vector is a copy; later operations never change it.
    pub fn list_transactions(&self, account_id: &str) -> LedgerResult<Vec<Transaction>> {
        let handle = self.accounts.get(account_id)?;
        let record = lock_account(&handle)?;
        Ok(record.transactions().to_vec())
    }

    /// Replay every account's log and compare it with the stored balance
    pub fn validate_integrity(&self) -> LedgerResult<LedgerIntegrityReport> {
        let accounts = self.accounts.all()?;
        let mut issues = Vec::new();

        for (id, handle) in &accounts {
            let record = lock_account(handle)?;
            let replayed = record.replayed_balance();

            if &replayed != record.balance() {
                issues.push(format!(
                    "Account {id} balance {} does not match its log ({replayed})",
                    record.balance()
                ));
            }
            if *record.balance() < BigDecimal::from(0) {
                issues.push(format!(
                    "Account {id} has a negative balance: {}",
                    record.balance()
                ));
            }
        }

        if !issues.is_empty() {
            tracing::error!(issues = issues.len(), "ledger integrity check failed");
        }

        Ok(LedgerIntegrityReport {
            checked_at: Utc::now(),
            accounts_checked: accounts.len(),
            is_valid: issues.is_empty(),
            issues,
        })
    }
}

fn log_rejection<T>(operation: &str, result: LedgerResult<T>) -> LedgerResult<T> {
    match &result {
        Err(e) if e.is_client_error() => tracing::warn!(operation, error = %e, "rejected"),
        Err(e) => tracing::error!(operation, error = %e, "internal failure"),
        Ok(_) => {}
    }
    result
}

#[async_trait]
impl LedgerService for Ledger {
    async fn create_account(
        &self,
        name: String,
        initial_balance: BigDecimal,
    ) -> LedgerResult<Account> {
        Ledger::create_account(self, name, initial_balance)
    }

    async fn get_account(&self, account_id: &str) -> LedgerResult<Account> {
        Ledger::get_account(self, account_id)
    }

    async fn deposit(&self, account_id: &str, amount: BigDecimal) -> LedgerResult<()> {
        Ledger::deposit(self, account_id, amount)
    }

    async fn withdraw(&self, account_id: &str, amount: BigDecimal) -> LedgerResult<()> {
        Ledger::withdraw(self, account_id, amount)
    }

    async fn transfer(
        &self,
        from_account_id: &str,
        to_account_id: &str,
        amount: BigDecimal,
    ) -> LedgerResult<()> {
        Ledger::transfer(self, from_account_id, to_account_id, amount)
    }

    async fn list_transactions(&self, account_id: &str) -> LedgerResult<Vec<Transaction>> {
        Ledger::list_transactions(self, account_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn sequential_ledger() -> Ledger {
        Ledger::with_id_generator(Box::new(SequentialIdGenerator::new()))
    }

    #[test]
    fn test_ledger_worked_example() {
        let ledger = Ledger::new();

        let alice = ledger
            .create_account("Alice".to_string(), BigDecimal::from(1000))
            .unwrap();
        assert_eq!(alice.balance, BigDecimal::from(1000));
        assert!(alice.transactions.is_empty());

        ledger.deposit(&alice.id, BigDecimal::from(500)).unwrap();
        let snapshot = ledger.get_account(&alice.id).unwrap();
        assert_eq!(snapshot.balance, BigDecimal::from(1500));
        assert_eq!(snapshot.transactions.len(), 1);
        assert_eq!(snapshot.transactions[0].kind, TransactionKind::Deposit);

        let err = ledger.withdraw(&alice.id, BigDecimal::from(2000)).unwrap_err();
        assert!(matches!(err, LedgerError::InsufficientFunds { .. }));
        assert_eq!(
            ledger.get_account(&alice.id).unwrap().balance,
            BigDecimal::from(1500)
        );

        let bob = ledger
            .create_account("Bob".to_string(), BigDecimal::from(500))
            .unwrap();
        ledger
            .transfer(&alice.id, &bob.id, BigDecimal::from(300))
            .unwrap();

        let alice = ledger.get_account(&alice.id).unwrap();
        let bob = ledger.get_account(&bob.id).unwrap();
        assert_eq!(alice.balance, BigDecimal::from(1200));
        assert_eq!(bob.balance, BigDecimal::from(800));

        let out = alice.transactions.last().unwrap();
        assert_eq!(out.kind, TransactionKind::TransferOut);
        assert_eq!(out.counterparty.as_deref(), Some(bob.id.as_str()));
        let incoming = bob.transactions.last().unwrap();
        assert_eq!(incoming.kind, TransactionKind::TransferIn);
        assert_eq!(incoming.counterparty.as_deref(), Some(alice.id.as_str()));
        assert_eq!(out.date, incoming.date);
    }

    #[test]
    fn test_create_rejects_negative_opening_balance() {
        let ledger = Ledger::new();
        let err = ledger
            .create_account("Alice".to_string(), BigDecimal::from(-1))
            .unwrap_err();
        assert!(matches!(err, LedgerError::InvalidArgument(_)));
        assert_eq!(ledger.account_count().unwrap(), 0);
    }

    #[test]
    fn test_self_transfer_rejected() {
        let ledger = sequential_ledger();
        let acc = ledger
            .create_account("Solo".to_string(), BigDecimal::from(100))
            .unwrap();

        let err = ledger
            .transfer(&acc.id, &acc.id, BigDecimal::from(10))
            .unwrap_err();
        assert!(matches!(err, LedgerError::InvalidArgument(_)));
        assert!(ledger.list_transactions(&acc.id).unwrap().is_empty());
    }

    #[test]
    fn test_transfer_to_unknown_account_mutates_nothing() {
        let ledger = sequential_ledger();
        let acc = ledger
            .create_account("Alice".to_string(), BigDecimal::from(100))
            .unwrap();

        let err = ledger
            .transfer(&acc.id, "nobody", BigDecimal::from(10))
            .unwrap_err();
        assert!(matches!(err, LedgerError::AccountNotFound(id) if id == "nobody"));

        let err = ledger
            .transfer("nobody", &acc.id, BigDecimal::from(10))
            .unwrap_err();
        assert!(matches!(err, LedgerError::AccountNotFound(_)));

        let acc = ledger.get_account(&acc.id).unwrap();
        assert_eq!(acc.balance, BigDecimal::from(100));
        assert!(acc.transactions.is_empty());
    }

    #[test]
    fn test_list_transactions_is_a_snapshot() {
        let ledger = sequential_ledger();
        let acc = ledger
            .create_account("Alice".to_string(), BigDecimal::from(0))
            .unwrap();
        ledger.deposit(&acc.id, BigDecimal::from(10)).unwrap();

        let before = ledger.list_transactions(&acc.id).unwrap();
        ledger.deposit(&acc.id, BigDecimal::from(20)).unwrap();

        assert_eq!(before.len(), 1);
        assert_eq!(ledger.list_transactions(&acc.id).unwrap().len(), 2);
    }

    #[test]
    fn test_unknown_account_lookups() {
        let ledger = Ledger::new();
        assert!(matches!(
            ledger.list_transactions("missing"),
            Err(LedgerError::AccountNotFound(_))
        ));
        assert!(matches!(
            ledger.get_account("missing"),
            Err(LedgerError::AccountNotFound(_))
        ));
        assert!(matches!(
            ledger.deposit("missing", BigDecimal::from(1)),
            Err(LedgerError::AccountNotFound(_))
        ));
    }

    #[test]
    fn test_list_accounts_ordered_by_id() {
        let ledger = sequential_ledger();
        for name in ["A", "B", "C"] {
            ledger
                .create_account(name.to_string(), BigDecimal::from(1))
                .unwrap();
        }

        let ids: Vec<String> = ledger
            .list_accounts()
            .unwrap()
            .into_iter()
            .map(|a| a.id)
            .collect();
        assert_eq!(ids, vec!["acc-1", "acc-2", "acc-3"]);
    }

    #[test]
    fn test_integrity_after_mixed_operations() {
        let ledger = sequential_ledger();
        let a = ledger
            .create_account("A".to_string(), BigDecimal::from(100))
            .unwrap();
        let b = ledger
            .create_account("B".to_string(), BigDecimal::from(0))
            .unwrap();

        ledger.deposit(&a.id, BigDecimal::from(50)).unwrap();
        ledger.transfer(&a.id, &b.id, BigDecimal::from(120)).unwrap();
        ledger.withdraw(&b.id, BigDecimal::from(20)).unwrap();
        let _ = ledger.withdraw(&a.id, BigDecimal::from(1000));

        let report = ledger.validate_integrity().unwrap();
        assert!(report.is_valid, "issues: {:?}", report.issues);
        assert_eq!(report.accounts_checked, 2);
    }

    #[tokio::test]
    async fn test_service_trait_delegates_to_ledger() {
        let service: Arc<dyn LedgerService> = Arc::new(sequential_ledger());

        let acc = service
            .create_account("Alice".to_string(), BigDecimal::from(10))
            .await
            .unwrap();
        service.deposit(&acc.id, BigDecimal::from(5)).await.unwrap();
        service.withdraw(&acc.id, BigDecimal::from(3)).await.unwrap();

        let acc = service.get_account(&acc.id).await.unwrap();
        assert_eq!(acc.balance, BigDecimal::from(12));
        assert_eq!(service.list_transactions(&acc.id).await.unwrap().len(), 2);
    }
}
