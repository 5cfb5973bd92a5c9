#![allow(dead_code)]

use std::cell::Cell;

use accounts_core::domain::{
    Account, AccountKind, CheckingDetails, IdGenerator, MainCategory, SubCategory, Transaction,
    TransactionKind,
};
use chrono::NaiveDate;
use uuid::Uuid;

/// Deterministic generator producing ids from an incrementing counter.
pub struct SequentialIds {
    next: Cell<u128>,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self { next: Cell::new(1) }
    }
}

impl IdGenerator for SequentialIds {
    fn generate(&self) -> Uuid {
        let value = self.next.get();
        self.next.set(value + 1);
        Uuid::from_u128(value)
    }
}

pub fn sample_date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Essential/Housing debit against `account_number`.
pub fn housing_debit(account_number: &str, amount: f64, ids: &dyn IdGenerator) -> Transaction {
    Transaction::new(
        account_number,
        TransactionKind::Debit,
        MainCategory::Essential,
        SubCategory::Housing,
        amount,
        ids,
    )
    .unwrap()
}

pub fn checking_account(account_number: &str, ids: &dyn IdGenerator) -> Account {
    Account::new(
        "Everyday",
        "First National",
        account_number,
        AccountKind::Checking(CheckingDetails::default()),
        ids,
    )
    .unwrap()
}
