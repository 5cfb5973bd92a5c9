//! Flat persistence projections of account state plus snapshot files.
//!
//! Records are not live entities: a record is reconstructable into exactly
//! one concrete account variant selected by its `kind` tag.

use std::{fs, path::Path};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    domain::{
        account::{
            Account, AccountKind, AccountKindTag, CheckingDetails, CreditCardDetails, Holding,
            InvestmentDetails, LoanDetails, RetirementDetails, SavingsDetails,
        },
        store::TransactionStore,
        transaction::Transaction,
    },
    errors::CoreError,
};

pub const SCHEMA_VERSION: u8 = 1;

/// Bookkeeping block reserved for forward schema evolution.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecordMeta {
    pub version: u8,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RecordMeta {
    fn now() -> Self {
        let now = Utc::now();
        Self {
            version: SCHEMA_VERSION,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Variant-specific scalar fields, flattened into one optional bag.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AccountDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overdraft_limit: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interest_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credit_limit: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apr: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_day: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub principal: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loan_interest_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub term_months: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_payment: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub holdings: Option<Vec<Holding>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_advantaged: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contribution_limit: Option<f64>,
}

/// Flat serialized projection of an account; not the live entity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccountRecord {
    pub id: Uuid,
    pub name: String,
    pub kind: AccountKindTag,
    pub institution: String,
    pub account_number: String,
    pub currency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub is_active: bool,
    /// Records written before this flag existed default to included.
    #[serde(default = "AccountRecord::include_in_totals_default")]
    pub include_in_total_balance: bool,
    #[serde(default)]
    pub transaction_ids: Vec<Uuid>,
    #[serde(default)]
    pub recurring_event_ids: Vec<Uuid>,
    pub meta: RecordMeta,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<AccountDetails>,
}

impl AccountRecord {
    /// Projects the live entity into its storage shape.
    pub fn from_account(account: &Account) -> Self {
        Self {
            id: account.id,
            name: account.name.clone(),
            kind: account.kind.tag(),
            institution: account.institution.clone(),
            account_number: account.account_number().to_string(),
            currency: account.currency.clone(),
            notes: account.notes.clone(),
            is_active: account.is_active,
            include_in_total_balance: account.include_in_total_balance,
            transaction_ids: account.transaction_ids().to_vec(),
            recurring_event_ids: account.recurring_event_ids().to_vec(),
            meta: RecordMeta::now(),
            details: Some(details_for(&account.kind)),
        }
    }

    /// Rebuilds exactly one concrete variant from the record tag.
    ///
    /// Detail fields the tagged variant requires are validation failures
    /// when missing; optional ones default. Id lists are deduplicated in
    /// input order.
    pub fn into_account(self) -> Result<Account, CoreError> {
        let kind = kind_from_details(self.kind, self.details.unwrap_or_default())?;
        let mut account = Account::restore(
            self.id,
            self.name,
            self.institution,
            self.account_number,
            kind,
        )?;
        account.currency = self.currency;
        account.notes = self.notes;
        account.is_active = self.is_active;
        account.include_in_total_balance = self.include_in_total_balance;
        for id in self.transaction_ids {
            account.add_transaction_id(id);
        }
        for id in self.recurring_event_ids {
            account.add_recurring_event_id(id);
        }
        Ok(account)
    }

    fn include_in_totals_default() -> bool {
        true
    }
}

fn details_for(kind: &AccountKind) -> AccountDetails {
    let mut details = AccountDetails::default();
    match kind {
        AccountKind::Checking(checking) => {
            details.overdraft_limit = checking.overdraft_limit;
        }
        AccountKind::Savings(savings) => {
            details.interest_rate = Some(savings.interest_rate);
        }
        AccountKind::CreditCard(card) => {
            details.credit_limit = Some(card.credit_limit);
            details.apr = card.apr;
            details.due_day = card.due_day;
        }
        AccountKind::Loan(loan) => {
            details.principal = Some(loan.principal);
            details.loan_interest_rate = Some(loan.interest_rate);
            details.term_months = Some(loan.term_months);
            details.monthly_payment = loan.monthly_payment;
        }
        AccountKind::Investment(investment) => {
            details.holdings = Some(investment.holdings.clone());
        }
        AccountKind::Retirement(retirement) => {
            details.plan_type = Some(retirement.plan_type.clone());
            details.holdings = Some(retirement.holdings.clone());
            details.tax_advantaged = Some(retirement.tax_advantaged);
            details.contribution_limit = retirement.contribution_limit;
        }
    }
    details
}

fn kind_from_details(
    tag: AccountKindTag,
    details: AccountDetails,
) -> Result<AccountKind, CoreError> {
    let kind = match tag {
        AccountKindTag::Checking => AccountKind::Checking(CheckingDetails {
            overdraft_limit: details.overdraft_limit,
        }),
        AccountKindTag::Savings => AccountKind::Savings(SavingsDetails {
            interest_rate: require(details.interest_rate, "interest_rate")?,
        }),
        AccountKindTag::CreditCard => AccountKind::CreditCard(CreditCardDetails {
            credit_limit: require(details.credit_limit, "credit_limit")?,
            apr: details.apr,
            due_day: details.due_day,
        }),
        AccountKindTag::Loan => AccountKind::Loan(LoanDetails {
            interest_rate: require(details.loan_interest_rate, "loan_interest_rate")?,
            term_months: require(details.term_months, "term_months")?,
            principal: require(details.principal, "principal")?,
            monthly_payment: details.monthly_payment,
        }),
        AccountKindTag::Investment => AccountKind::Investment(InvestmentDetails {
            holdings: details.holdings.unwrap_or_default(),
        }),
        AccountKindTag::Retirement => AccountKind::Retirement(RetirementDetails {
            plan_type: require(details.plan_type, "plan_type")?,
            holdings: details.holdings.unwrap_or_default(),
            tax_advantaged: details.tax_advantaged.unwrap_or(true),
            contribution_limit: details.contribution_limit,
        }),
    };
    Ok(kind)
}

fn require<T>(value: Option<T>, field: &str) -> Result<T, CoreError> {
    value.ok_or_else(|| CoreError::Validation(format!("missing detail field `{field}`")))
}

/// Complete serialized state: account projections plus the ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default = "Snapshot::schema_version_default")]
    pub schema_version: u8,
    pub saved_at: DateTime<Utc>,
    #[serde(default)]
    pub accounts: Vec<AccountRecord>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

impl Snapshot {
    /// Captures the current state of `accounts` and the store.
    pub fn capture(accounts: &[Account], store: &TransactionStore) -> Self {
        let mut transactions: Vec<Transaction> = store.iter().cloned().collect();
        // stable file output regardless of map iteration order
        transactions.sort_by_key(|tx| tx.id);
        Self {
            schema_version: SCHEMA_VERSION,
            saved_at: Utc::now(),
            accounts: accounts.iter().map(AccountRecord::from_account).collect(),
            transactions,
        }
    }

    /// Rebuilds live accounts and a populated store.
    pub fn restore(self) -> Result<(Vec<Account>, TransactionStore), CoreError> {
        let mut store = TransactionStore::new();
        for tx in self.transactions {
            store.add(tx);
        }
        let accounts = self
            .accounts
            .into_iter()
            .map(AccountRecord::into_account)
            .collect::<Result<Vec<_>, _>>()?;
        Ok((accounts, store))
    }

    pub fn schema_version_default() -> u8 {
        SCHEMA_VERSION
    }
}

/// Writes the snapshot to disk atomically by staging to a temporary file.
pub fn save_snapshot_to_file(snapshot: &Snapshot, path: &Path) -> Result<(), CoreError> {
    let tmp = path.with_extension("tmp");
    let json = serde_json::to_string_pretty(snapshot)?;
    fs::write(&tmp, json)?;
    fs::rename(tmp, path)?;
    tracing::info!(
        path = %path.display(),
        accounts = snapshot.accounts.len(),
        transactions = snapshot.transactions.len(),
        "saved snapshot"
    );
    Ok(())
}

/// Loads a snapshot from disk, returning structured errors on failure.
pub fn load_snapshot_from_file(path: &Path) -> Result<Snapshot, CoreError> {
    let data = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}
