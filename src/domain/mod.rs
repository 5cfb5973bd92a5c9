//! Account and transaction domain models plus the shared ledger store.

pub mod account;
pub mod category;
pub mod common;
pub mod store;
pub mod transaction;

pub use account::{
    Account, AccountKind, AccountKindTag, CheckingDetails, CreditCardDetails, Holding,
    InvestmentDetails, LoanDetails, RetirementDetails, SavingsDetails,
};
pub use category::{MainCategory, SubCategory};
pub use common::{Amounted, Displayable, IdGenerator, Identifiable, NamedEntity, RandomIds};
pub use store::{find_transaction_by_id, TransactionStore};
pub use transaction::{Transaction, TransactionKind};
