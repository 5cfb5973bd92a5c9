//! Single source of truth for transaction data, keyed by id.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::transaction::Transaction;

/// Owns the canonical id → transaction mapping.
///
/// Lookups treat absence as a normal result rather than an error: account
/// ledgers may reference transactions pruned by retention policy, and a
/// partial ledger is an expected steady state. The store is add-only and
/// performs no internal locking; concurrent hosts serialize access.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransactionStore {
    transactions: HashMap<Uuid, Transaction>,
}

impl TransactionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `tx`, replacing any prior entry with the same id.
    pub fn add(&mut self, tx: Transaction) {
        let id = tx.id;
        if self.transactions.insert(id, tx).is_some() {
            tracing::debug!(%id, "replaced transaction entry");
        }
    }

    /// Looks up a transaction by id.
    pub fn get(&self, id: Uuid) -> Option<&Transaction> {
        self.transactions.get(&id)
    }

    /// Resolves `ids` in input order, omitting ids with no entry.
    pub fn get_many(&self, ids: &[Uuid]) -> Vec<&Transaction> {
        ids.iter()
            .filter_map(|id| self.transactions.get(id))
            .collect()
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.transactions.contains_key(&id)
    }

    /// Iterates over all stored transactions in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions.values()
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

/// Finds a transaction by id within an arbitrary collection.
pub fn find_transaction_by_id(transactions: &[Transaction], id: Uuid) -> Option<&Transaction> {
    transactions.iter().find(|tx| tx.id == id)
}
