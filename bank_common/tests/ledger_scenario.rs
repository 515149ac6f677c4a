use bank_common::constants::ADMIN_PASSWORD;
use bank_common::errors::AccountingError;
use bank_common::tx::TransactionKind;
use bank_common::{AccountType, Ledger};
use rust_decimal::Decimal;
use std::fs;

#[test]
fn savings_account_walkthrough() {
    let dir = tempfile::tempdir().unwrap();
    let mut ledger = Ledger::load(dir.path().join("Bank.data")).unwrap();

    let account = ledger
        .open_account("A", "B", "p1", Decimal::from(1000), AccountType::Savings)
        .unwrap();
    assert_eq!(1, account.account_number());
    assert_eq!("1000.00", format!("{:.2}", account.balance()));

    assert!(matches!(
        ledger.withdraw(1, "p1", Decimal::from(600)),
        Err(AccountingError::InsufficientFunds { .. })
    ));
    assert_eq!(Decimal::from(1000), ledger.balance_enquiry(1, "p1").unwrap().balance());

    let account = ledger.withdraw(1, "p1", Decimal::from(400)).unwrap();
    assert_eq!("600.00", format!("{:.2}", account.balance()));

    assert_eq!(
        Err(AccountingError::InvalidPassword),
        ledger.deposit(1, "p2", Decimal::from(100))
    );
    assert_eq!(Decimal::from(600), ledger.balance_enquiry(1, "p1").unwrap().balance());
}

#[test]
fn shutdown_persists_and_restart_reloads() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Bank.data");

    {
        let mut ledger = Ledger::load(&path).unwrap();
        ledger
            .open_account("Ada", "Lovelace", "p1", Decimal::from(1000), AccountType::Savings)
            .unwrap();
        ledger
            .open_account("Alan", "Turing", "p2", Decimal::from(2000), AccountType::Checking)
            .unwrap();
        ledger.deposit(1, "p1", Decimal::new(2550, 2)).unwrap();
        ledger.calculate_interest_for_all();
    }

    let mut ledger = Ledger::load(&path).unwrap();
    assert_eq!(2, ledger.len());
    assert_eq!(2, ledger.last_account_number());

    let ada = ledger.balance_enquiry(1, "p1").unwrap();
    assert_eq!(Decimal::new(10767750, 4), ada.balance());
    assert_eq!(AccountType::Savings, ada.account_type());
    assert_eq!("Lovelace", ada.last_name());

    let history = ledger.transaction_history(1, "p1").unwrap();
    assert_eq!(1, history.len());
    assert_eq!(TransactionKind::InitialDeposit, history[0].kind());

    let alan = ledger.balance_enquiry(2, "p2").unwrap();
    assert_eq!(Decimal::from(2040), alan.balance());

    let account = ledger
        .open_account("Grace", "Hopper", "p3", Decimal::from(700), AccountType::Savings)
        .unwrap();
    assert_eq!(3, account.account_number());
}

#[test]
fn closed_account_is_gone_after_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Bank.data");

    {
        let mut ledger = Ledger::load(&path).unwrap();
        ledger
            .open_account("A", "B", "p1", Decimal::from(1000), AccountType::Savings)
            .unwrap();
        ledger
            .open_account("C", "D", "p2", Decimal::from(1000), AccountType::Savings)
            .unwrap();
        ledger.close_account(1, "p1").unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("1\n"));
    }

    let ledger = Ledger::load(&path).unwrap();
    assert_eq!(1, ledger.len());
    assert_eq!(
        Err(AccountingError::AccountNotFound(1)),
        ledger.balance_enquiry(1, "p1").map(|_| ())
    );
    assert!(ledger.balance_enquiry(2, "p2").is_ok());
}

#[test]
fn sequence_continues_from_last_record_read() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Bank.data");
    fs::write(&path, "5\nA\nB\np5\n900\n0\n3\nC\nD\np3\n800\n1\n").unwrap();

    let ledger = Ledger::load(&path).unwrap();
    assert_eq!(2, ledger.len());
    assert_eq!(3, ledger.last_account_number());

    let all = ledger.show_all_accounts(ADMIN_PASSWORD).unwrap();
    assert_eq!(3, all[0].account_number());
    assert_eq!(5, all[1].account_number());
}

#[test]
fn shutdown_writes_in_account_number_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Bank.data");
    fs::write(&path, "2\nC\nD\np2\n800\n1\n1\nA\nB\np1\n900\n0\n").unwrap();

    drop(Ledger::load(&path).unwrap());

    assert_eq!(
        "1\nA\nB\np1\n900\n0\n2\nC\nD\np2\n800\n1\n",
        fs::read_to_string(&path).unwrap()
    );
}
