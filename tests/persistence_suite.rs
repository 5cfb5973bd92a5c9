mod common;

use accounts_core::domain::{
    Account, AccountKind, AccountKindTag, Holding, InvestmentDetails, LoanDetails,
    TransactionStore,
};
use accounts_core::errors::CoreError;
use accounts_core::storage::{
    load_snapshot_from_file, save_snapshot_to_file, AccountRecord, Snapshot,
};
use common::{checking_account, housing_debit, SequentialIds};
use tempfile::TempDir;
use uuid::Uuid;

fn loan_account(ids: &SequentialIds) -> Account {
    Account::new(
        "Car Loan",
        "First National",
        "0412",
        AccountKind::Loan(LoanDetails {
            interest_rate: 6.0,
            term_months: 60,
            principal: 12_000.0,
            monthly_payment: Some(232.0),
        }),
        ids,
    )
    .unwrap()
    .with_currency("EUR")
    .with_notes("2019 hatchback")
}

#[test]
fn record_round_trip_reconstructs_the_same_variant() {
    let ids = SequentialIds::new();
    let mut account = loan_account(&ids);
    account.add_transaction_id(Uuid::from_u128(10));
    account.add_recurring_event_id(Uuid::from_u128(20));

    let record = AccountRecord::from_account(&account);
    assert_eq!(record.kind, AccountKindTag::Loan);

    let rebuilt = record.into_account().unwrap();
    assert_eq!(rebuilt.id, account.id);
    assert_eq!(rebuilt.currency, "EUR");
    assert_eq!(rebuilt.notes.as_deref(), Some("2019 hatchback"));
    assert_eq!(rebuilt.transaction_ids(), account.transaction_ids());
    assert_eq!(rebuilt.recurring_event_ids(), account.recurring_event_ids());
    let loan = rebuilt.as_loan().unwrap();
    assert_eq!(loan.principal, 12_000.0);
    assert_eq!(loan.monthly_payment, Some(232.0));
}

#[test]
fn reconstruction_rejects_missing_required_details() {
    let ids = SequentialIds::new();
    let account = loan_account(&ids);
    let mut record = AccountRecord::from_account(&account);
    record.details = None;

    assert!(matches!(
        record.into_account(),
        Err(CoreError::Validation(_))
    ));
}

#[test]
fn reconstruction_deduplicates_id_lists() {
    let ids = SequentialIds::new();
    let account = checking_account("0412", &ids);
    let mut record = AccountRecord::from_account(&account);
    let id = Uuid::from_u128(7);
    record.transaction_ids = vec![id, id, Uuid::from_u128(8)];

    let rebuilt = record.into_account().unwrap();
    assert_eq!(rebuilt.transaction_ids(), &[id, Uuid::from_u128(8)]);
}

#[test]
fn reconstruction_revalidates_the_account_number() {
    let ids = SequentialIds::new();
    let account = checking_account("0412", &ids);
    let mut record = AccountRecord::from_account(&account);
    record.account_number = "12".into();

    assert!(matches!(
        record.into_account(),
        Err(CoreError::Validation(_))
    ));
}

#[test]
fn investment_record_keeps_holdings() {
    let ids = SequentialIds::new();
    let account = Account::new(
        "Brokerage",
        "First National",
        "0412",
        AccountKind::Investment(InvestmentDetails {
            holdings: vec![Holding {
                symbol: "AAA".into(),
                quantity: 10.0,
                market_price: 5.0,
            }],
        }),
        &ids,
    )
    .unwrap();

    let rebuilt = AccountRecord::from_account(&account).into_account().unwrap();
    let store = TransactionStore::new();
    assert_eq!(rebuilt.compute_balance(&store), 50.0);
}

#[test]
fn snapshot_round_trips_through_a_file() {
    let ids = SequentialIds::new();
    let mut account = checking_account("0412", &ids);
    let mut store = TransactionStore::new();
    for amount in [100.0, -40.0, 25.0] {
        let tx = housing_debit("0412", amount, &ids);
        account.add_transaction_id(tx.id);
        store.add(tx);
    }

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("portfolio.json");
    let snapshot = Snapshot::capture(std::slice::from_ref(&account), &store);
    save_snapshot_to_file(&snapshot, &path).unwrap();

    let loaded = load_snapshot_from_file(&path).unwrap();
    assert_eq!(loaded.schema_version, snapshot.schema_version);
    let (accounts, restored_store) = loaded.restore().unwrap();
    assert_eq!(accounts.len(), 1);
    assert_eq!(restored_store.len(), 3);
    assert_eq!(accounts[0].compute_balance(&restored_store), 85.0);
}
