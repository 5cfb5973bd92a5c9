//! Monetary movement records referencing accounts by number.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    domain::{
        category::{MainCategory, SubCategory},
        common::{Amounted, Displayable, IdGenerator, Identifiable},
    },
    errors::CoreError,
};

/// A single monetary movement against an account.
///
/// The account is referenced by number, never owned. The id is assigned at
/// construction and never reassigned; once handed to the
/// [`TransactionStore`](crate::domain::store::TransactionStore) a
/// transaction is treated as an immutable record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: Uuid,
    pub account_number: String,
    pub kind: TransactionKind,
    pub category: MainCategory,
    pub subcategory: SubCategory,
    /// Signed amount; the sign carries the debit/credit direction when
    /// summed into a balance.
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring_event_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub counterparty: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Transaction {
    /// Creates a transaction with a freshly generated id.
    ///
    /// Fails when `subcategory` does not belong to `category`.
    pub fn new(
        account_number: impl Into<String>,
        kind: TransactionKind,
        category: MainCategory,
        subcategory: SubCategory,
        amount: f64,
        ids: &dyn IdGenerator,
    ) -> Result<Self, CoreError> {
        if !category.allows(subcategory) {
            return Err(CoreError::InvalidCategory {
                main: category,
                sub: subcategory,
            });
        }
        Ok(Self {
            id: ids.generate(),
            account_number: account_number.into(),
            kind,
            category,
            subcategory,
            amount,
            date: None,
            recurring_event_id: None,
            counterparty: None,
            notes: None,
        })
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_recurring_event(mut self, recurring_event_id: Uuid) -> Self {
        self.recurring_event_id = Some(recurring_event_id);
        self
    }

    pub fn with_counterparty(mut self, counterparty: impl Into<String>) -> Self {
        self.counterparty = Some(counterparty.into());
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

impl Identifiable for Transaction {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Amounted for Transaction {
    fn amount(&self) -> f64 {
        self.amount
    }
}

impl Displayable for Transaction {
    fn display_label(&self) -> String {
        format!("txn:{} [{}]", self.id, self.kind)
    }
}

/// Direction of a monetary movement.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Debit,
    Credit,
    Transfer,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TransactionKind::Debit => "Debit",
            TransactionKind::Credit => "Credit",
            TransactionKind::Transfer => "Transfer",
        };
        f.write_str(label)
    }
}
