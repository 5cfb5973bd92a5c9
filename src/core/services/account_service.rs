use uuid::Uuid;

use crate::domain::account::Account;
use crate::domain::store::TransactionStore;
use crate::domain::transaction::Transaction;

use super::{ServiceError, ServiceResult};

/// Stateless operations tying accounts to the shared transaction store.
pub struct AccountService;

impl AccountService {
    /// Adds `tx` to the store and links its id to `account`.
    ///
    /// The transaction must reference the account's number. The link is
    /// idempotent on the account side; on the store side a same-id add
    /// replaces the prior entry.
    pub fn link_transaction(
        account: &mut Account,
        tx: Transaction,
        store: &mut TransactionStore,
    ) -> ServiceResult<Uuid> {
        if tx.account_number != account.account_number() {
            return Err(ServiceError::Invalid(format!(
                "transaction targets account `{}`, not `{}`",
                tx.account_number,
                account.account_number()
            )));
        }
        let id = tx.id;
        store.add(tx);
        account.add_transaction_id(id);
        tracing::debug!(account = %account.id, tx = %id, "linked transaction");
        Ok(id)
    }

    /// Unlinks `id` from the account. The store keeps its entry: it stays
    /// the single source of truth for any other reference.
    pub fn unlink_transaction(account: &mut Account, id: Uuid) {
        account.remove_transaction_id(id);
    }

    /// Refreshes the cached balance snapshot on every account.
    pub fn refresh_balances(accounts: &mut [Account], store: &TransactionStore) {
        for account in accounts.iter_mut() {
            account.refresh_balance(store);
        }
    }

    /// Sums derived balances across accounts that are active and included
    /// in aggregate totals.
    pub fn total_balance(accounts: &[Account], store: &TransactionStore) -> f64 {
        accounts
            .iter()
            .filter(|account| account.is_active && account.include_in_total_balance)
            .map(|account| account.compute_balance(store))
            .sum()
    }
}
