//! Basic ledger usage example

use banking_ledger::{Ledger, LedgerError, SequentialIdGenerator};
use bigdecimal::BigDecimal;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Banking Ledger - Basic Example\n");

    let ledger = Ledger::with_id_generator(Box::new(SequentialIdGenerator::new()));

    // 1. Open two accounts
    let alice = ledger.create_account("Alice".to_string(), BigDecimal::from(1000))?;
    let bob = ledger.create_account("Bob".to_string(), BigDecimal::from(500))?;
    println!("  Opened {} ({}) with {}", alice.id, alice.name, alice.balance);
    println!("  Opened {} ({}) with {}\n", bob.id, bob.name, bob.balance);

    // 2. Deposit and a rejected withdrawal
    ledger.deposit(&alice.id, BigDecimal::from(500))?;
    println!("  Deposited 500 into {}", alice.id);

    match ledger.withdraw(&alice.id, BigDecimal::from(2000)) {
        Err(LedgerError::InsufficientFunds {
            requested,
            available,
            ..
        }) => println!("  Withdrawal of {requested} refused, only {available} available"),
        other => println!("  Unexpected outcome: {other:?}"),
    }

    // 3. Transfer
    ledger.transfer(&alice.id, &bob.id, BigDecimal::from(300))?;
    println!("  Transferred 300 from {} to {}\n", alice.id, bob.id);

    // 4. Statements
    for account in ledger.list_accounts()? {
        println!("Statement for {} ({}): balance {}", account.name, account.id, account.balance);
        for txn in &account.transactions {
            match &txn.counterparty {
                Some(other) => println!("    {:<13} {:>8}  ({other})", txn.kind, txn.amount),
                None => println!("    {:<13} {:>8}", txn.kind, txn.amount),
            }
        }
    }

    let report = ledger.validate_integrity()?;
    println!(
        "\nIntegrity check over {} accounts: {}",
        report.accounts_checked,
        if report.is_valid { "OK" } else { "FAILED" }
    );

    Ok(())
}
