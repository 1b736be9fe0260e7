//! # Banking Ledger
//!
//! An in-memory ledger of named accounts with balances and append-only
//! transaction histories, plus a small HTTP API over it.
//!
//! ## Features
//!
//! - **Atomic operations**: deposits, withdrawals and transfers either fully apply or leave no trace
//! - **Balance invariants**: balances never go negative and always match their transaction log
//! - **Per-account locking**: operations on different accounts run in parallel; transfers lock in id order
//! - **Snapshots**: account details and transaction lists handed out are detached copies
//! - **HTTP API**: axum routes for create, deposit, withdraw, transfer and transaction history
//!
//! ## Quick Start
//!
//! ```rust
//! use banking_ledger::{Ledger, TransactionKind};
//! use bigdecimal::BigDecimal;
//!
//! let ledger = Ledger::new();
//! let alice = ledger.create_account("Alice".to_string(), BigDecimal::from(1000)).unwrap();
//! let bob = ledger.create_account("Bob".to_string(), BigDecimal::from(500)).unwrap();
//!
//! ledger.transfer(&alice.id, &bob.id, BigDecimal::from(300)).unwrap();
//!
//! let log = ledger.list_transactions(&bob.id).unwrap();
//! assert_eq!(log[0].kind, TransactionKind::TransferIn);
//! assert_eq!(ledger.get_account(&bob.id).unwrap().balance, BigDecimal::from(800));
//! ```

pub mod api;
pub mod config;
pub mod ledger;
pub mod telemetry;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use ledger::Ledger;
pub use traits::*;
pub use types::*;
