mod common;

use accounts_core::core::services::{AccountService, ServiceError};
use accounts_core::domain::{
    Account, AccountKind, SavingsDetails, TransactionStore,
};
use common::{checking_account, housing_debit, SequentialIds};

#[test]
fn linking_adds_to_store_and_account() {
    let ids = SequentialIds::new();
    let mut account = checking_account("0412", &ids);
    let mut store = TransactionStore::new();
    let tx = housing_debit("0412", 100.0, &ids);

    let id = AccountService::link_transaction(&mut account, tx, &mut store).unwrap();

    assert!(store.contains(id));
    assert_eq!(account.transaction_ids(), &[id]);
}

#[test]
fn linking_rejects_a_mismatched_account_number() {
    let ids = SequentialIds::new();
    let mut account = checking_account("0412", &ids);
    let mut store = TransactionStore::new();
    let tx = housing_debit("9999", 100.0, &ids);

    let result = AccountService::link_transaction(&mut account, tx, &mut store);
    assert!(matches!(result, Err(ServiceError::Invalid(_))));
    assert!(store.is_empty());
    assert!(account.transaction_ids().is_empty());
}

#[test]
fn unlinking_keeps_the_store_entry() {
    let ids = SequentialIds::new();
    let mut account = checking_account("0412", &ids);
    let mut store = TransactionStore::new();
    let tx = housing_debit("0412", 100.0, &ids);
    let id = AccountService::link_transaction(&mut account, tx, &mut store).unwrap();

    AccountService::unlink_transaction(&mut account, id);

    assert!(account.transaction_ids().is_empty());
    assert!(store.contains(id));
}

#[test]
fn total_balance_skips_inactive_and_excluded_accounts() {
    let ids = SequentialIds::new();
    let mut store = TransactionStore::new();

    let mut included = checking_account("0412", &ids);
    let tx = housing_debit("0412", 100.0, &ids);
    AccountService::link_transaction(&mut included, tx, &mut store).unwrap();

    let mut excluded = Account::new(
        "Old Savings",
        "First National",
        "0413",
        AccountKind::Savings(SavingsDetails { interest_rate: 1.0 }),
        &ids,
    )
    .unwrap()
    .with_include_in_total_balance(false);
    let tx = housing_debit("0413", 500.0, &ids);
    AccountService::link_transaction(&mut excluded, tx, &mut store).unwrap();

    let mut inactive = checking_account("0414", &ids);
    inactive.is_active = false;
    let tx = housing_debit("0414", 900.0, &ids);
    AccountService::link_transaction(&mut inactive, tx, &mut store).unwrap();

    let accounts = vec![included, excluded, inactive];
    assert_eq!(AccountService::total_balance(&accounts, &store), 100.0);
}

#[test]
fn refresh_balances_touches_every_account() {
    let ids = SequentialIds::new();
    let mut store = TransactionStore::new();
    let mut first = checking_account("0412", &ids);
    let tx = housing_debit("0412", 40.0, &ids);
    AccountService::link_transaction(&mut first, tx, &mut store).unwrap();
    let mut second = checking_account("0413", &ids);
    let tx = housing_debit("0413", 60.0, &ids);
    AccountService::link_transaction(&mut second, tx, &mut store).unwrap();

    let mut accounts = vec![first, second];
    AccountService::refresh_balances(&mut accounts, &store);

    assert_eq!(accounts[0].balance(), 40.0);
    assert_eq!(accounts[1].balance(), 60.0);
}
