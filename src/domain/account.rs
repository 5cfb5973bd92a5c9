//! Account aggregate: shared identity plus per-variant balance algorithms.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    domain::{
        common::{Displayable, IdGenerator, Identifiable, NamedEntity},
        store::TransactionStore,
    },
    errors::CoreError,
};

pub const DEFAULT_CURRENCY: &str = "USD";

/// A financial account tracked against the shared transaction ledger.
///
/// Accounts hold transaction ids, never transaction objects; balances and
/// metrics are recomputed on demand by resolving those ids against the
/// [`TransactionStore`]. The cached `balance`/`balance_as_of` pair is a
/// last-computed snapshot refreshed only through
/// [`Account::refresh_balance`], so callers must treat it as best-effort
/// as of that instant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Account {
    pub id: Uuid,
    pub name: String,
    pub institution: String,
    account_number: String,
    pub currency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub is_active: bool,
    /// Excludes e.g. closed accounts from aggregate totals when `false`.
    pub include_in_total_balance: bool,
    transaction_ids: Vec<Uuid>,
    recurring_event_ids: Vec<Uuid>,
    balance: f64,
    balance_as_of: DateTime<Utc>,
    pub kind: AccountKind,
}

impl Account {
    /// Creates an account with a freshly generated id and a zeroed balance
    /// snapshot.
    ///
    /// Fails when `account_number` is not exactly 4 decimal digits.
    pub fn new(
        name: impl Into<String>,
        institution: impl Into<String>,
        account_number: impl Into<String>,
        kind: AccountKind,
        ids: &dyn IdGenerator,
    ) -> Result<Self, CoreError> {
        Self::restore(
            ids.generate(),
            name.into(),
            institution.into(),
            account_number.into(),
            kind,
        )
    }

    /// Rehydrates an account from persisted parts, revalidating the
    /// account number. Id lists and the balance snapshot start empty.
    pub(crate) fn restore(
        id: Uuid,
        name: String,
        institution: String,
        account_number: String,
        kind: AccountKind,
    ) -> Result<Self, CoreError> {
        validate_account_number(&account_number)?;
        Ok(Self {
            id,
            name,
            institution,
            account_number,
            currency: DEFAULT_CURRENCY.to_string(),
            notes: None,
            is_active: true,
            include_in_total_balance: true,
            transaction_ids: Vec::new(),
            recurring_event_ids: Vec::new(),
            balance: 0.0,
            balance_as_of: Utc::now(),
            kind,
        })
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn with_include_in_total_balance(mut self, include: bool) -> Self {
        self.include_in_total_balance = include;
        self
    }

    /// Last four digits identifying the account at its institution.
    pub fn account_number(&self) -> &str {
        &self.account_number
    }

    /// Transaction ids in insertion order.
    pub fn transaction_ids(&self) -> &[Uuid] {
        &self.transaction_ids
    }

    /// Recurring-event ids in insertion order. The core never resolves
    /// these; they belong to an external scheduling subsystem.
    pub fn recurring_event_ids(&self) -> &[Uuid] {
        &self.recurring_event_ids
    }

    /// Last computed balance snapshot.
    pub fn balance(&self) -> f64 {
        self.balance
    }

    /// Instant the cached balance was computed.
    pub fn balance_as_of(&self) -> DateTime<Utc> {
        self.balance_as_of
    }

    /// Adds a transaction id unless already present.
    pub fn add_transaction_id(&mut self, id: Uuid) {
        if !self.transaction_ids.contains(&id) {
            self.transaction_ids.push(id);
        }
    }

    /// Removes a transaction id; a no-op when absent.
    pub fn remove_transaction_id(&mut self, id: Uuid) {
        self.transaction_ids.retain(|existing| *existing != id);
    }

    /// Adds a recurring-event id unless already present.
    pub fn add_recurring_event_id(&mut self, id: Uuid) {
        if !self.recurring_event_ids.contains(&id) {
            self.recurring_event_ids.push(id);
        }
    }

    /// Removes a recurring-event id; a no-op when absent.
    pub fn remove_recurring_event_id(&mut self, id: Uuid) {
        self.recurring_event_ids.retain(|existing| *existing != id);
    }

    /// Default balance algorithm: sums resolved amounts, skipping ids with
    /// no entry in the store.
    pub fn ledger_balance(&self, tx_ids: &[Uuid], store: &TransactionStore) -> f64 {
        store.get_many(tx_ids).iter().map(|tx| tx.amount).sum()
    }

    /// Derives the balance for this account's variant.
    ///
    /// Investment-style variants value their holdings and ignore the
    /// ledger entirely; the two derivations are never mixed.
    pub fn compute_balance(&self, store: &TransactionStore) -> f64 {
        match &self.kind {
            AccountKind::Investment(details) => details.market_value(),
            AccountKind::Retirement(details) => details.market_value(),
            _ => self.ledger_balance(&self.transaction_ids, store),
        }
    }

    /// Recomputes the balance and refreshes the cached snapshot, updating
    /// the amount and its timestamp together.
    pub fn refresh_balance(&mut self, store: &TransactionStore) -> f64 {
        let balance = self.compute_balance(store);
        self.balance = balance;
        self.balance_as_of = Utc::now();
        balance
    }

    /// Annual interest accrued on the current balance, for savings
    /// accounts.
    pub fn accrued_interest(&self, store: &TransactionStore) -> Option<f64> {
        match &self.kind {
            AccountKind::Savings(details) => {
                Some(details.accrued_interest(self.compute_balance(store)))
            }
            _ => None,
        }
    }

    /// Share of the credit limit consumed by the current balance, for
    /// credit cards.
    pub fn credit_utilization(&self, store: &TransactionStore) -> Option<f64> {
        match &self.kind {
            AccountKind::CreditCard(details) => {
                Some(details.utilization(self.compute_balance(store)))
            }
            _ => None,
        }
    }

    pub fn ideal_utilization(&self) -> Option<f64> {
        match &self.kind {
            AccountKind::CreditCard(details) => Some(details.ideal_utilization()),
            _ => None,
        }
    }

    /// Principal still owed after the payments recorded in the ledger, for
    /// loans.
    pub fn remaining_principal(&self, store: &TransactionStore) -> Option<f64> {
        match &self.kind {
            AccountKind::Loan(details) => {
                let paid = self.ledger_balance(&self.transaction_ids, store);
                Some(details.remaining_balance(paid))
            }
            _ => None,
        }
    }

    pub fn monthly_payment(&self) -> Option<f64> {
        match &self.kind {
            AccountKind::Loan(details) => Some(details.payment()),
            _ => None,
        }
    }

    /// Holdings backing an investment-style balance.
    pub fn holdings(&self) -> Option<&[Holding]> {
        match &self.kind {
            AccountKind::Investment(details) => Some(&details.holdings),
            AccountKind::Retirement(details) => Some(&details.holdings),
            _ => None,
        }
    }

    pub fn as_checking(&self) -> Option<&CheckingDetails> {
        match &self.kind {
            AccountKind::Checking(details) => Some(details),
            _ => None,
        }
    }

    pub fn as_savings(&self) -> Option<&SavingsDetails> {
        match &self.kind {
            AccountKind::Savings(details) => Some(details),
            _ => None,
        }
    }

    pub fn as_credit_card(&self) -> Option<&CreditCardDetails> {
        match &self.kind {
            AccountKind::CreditCard(details) => Some(details),
            _ => None,
        }
    }

    pub fn as_loan(&self) -> Option<&LoanDetails> {
        match &self.kind {
            AccountKind::Loan(details) => Some(details),
            _ => None,
        }
    }

    pub fn as_investment(&self) -> Option<&InvestmentDetails> {
        match &self.kind {
            AccountKind::Investment(details) => Some(details),
            _ => None,
        }
    }

    pub fn as_retirement(&self) -> Option<&RetirementDetails> {
        match &self.kind {
            AccountKind::Retirement(details) => Some(details),
            _ => None,
        }
    }
}

impl Identifiable for Account {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Account {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Displayable for Account {
    fn display_label(&self) -> String {
        format!("{} ({})", self.name, self.kind.tag())
    }
}

fn validate_account_number(raw: &str) -> Result<(), CoreError> {
    if raw.len() == 4 && raw.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "account number must be exactly 4 digits, got `{raw}`"
        )))
    }
}

/// Variant payloads; the discriminant selects the balance derivation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum AccountKind {
    Checking(CheckingDetails),
    Savings(SavingsDetails),
    CreditCard(CreditCardDetails),
    Loan(LoanDetails),
    Investment(InvestmentDetails),
    Retirement(RetirementDetails),
}

impl AccountKind {
    /// Plain discriminant for storage and display.
    pub fn tag(&self) -> AccountKindTag {
        match self {
            AccountKind::Checking(_) => AccountKindTag::Checking,
            AccountKind::Savings(_) => AccountKindTag::Savings,
            AccountKind::CreditCard(_) => AccountKindTag::CreditCard,
            AccountKind::Loan(_) => AccountKindTag::Loan,
            AccountKind::Investment(_) => AccountKindTag::Investment,
            AccountKind::Retirement(_) => AccountKindTag::Retirement,
        }
    }
}

/// Enumerates the supported account classifications without payloads.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AccountKindTag {
    Checking,
    Savings,
    CreditCard,
    Loan,
    Investment,
    Retirement,
}

impl fmt::Display for AccountKindTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AccountKindTag::Checking => "Checking",
            AccountKindTag::Savings => "Savings",
            AccountKindTag::CreditCard => "Credit Card",
            AccountKindTag::Loan => "Loan",
            AccountKindTag::Investment => "Investment",
            AccountKindTag::Retirement => "Retirement",
        };
        f.write_str(label)
    }
}

/// Checking: no interest, transactions unrestricted, overdraft allowed.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CheckingDetails {
    /// How far the account may be overdrawn. A policy threshold only; the
    /// core never enforces it against the balance.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overdraft_limit: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SavingsDetails {
    /// Annual interest rate in percent.
    pub interest_rate: f64,
}

impl SavingsDetails {
    /// Interest accrued on `balance` at the annual rate.
    pub fn accrued_interest(&self, balance: f64) -> f64 {
        balance * self.interest_rate / 100.0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreditCardDetails {
    pub credit_limit: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apr: Option<f64>,
    /// Day of the month the statement is due.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_day: Option<u32>,
}

impl CreditCardDetails {
    /// Share of the credit limit consumed by `balance`, as a percentage.
    /// A zero limit reads as zero utilization.
    pub fn utilization(&self, balance: f64) -> f64 {
        if self.credit_limit > 0.0 {
            (balance / self.credit_limit) * 100.0
        } else {
            0.0
        }
    }

    /// The commonly recommended utilization ceiling: 30% of the limit.
    pub fn ideal_utilization(&self) -> f64 {
        self.credit_limit * 0.3
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoanDetails {
    /// Annual interest rate in percent.
    pub interest_rate: f64,
    pub term_months: u32,
    /// Original loan principal amount.
    pub principal: f64,
    /// Precomputed payment; when absent, derived from the amortization
    /// formula.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_payment: Option<f64>,
}

impl LoanDetails {
    /// Principal left after `paid`, never negative.
    pub fn remaining_balance(&self, paid: f64) -> f64 {
        (self.principal - paid).max(0.0)
    }

    /// Fixed monthly payment for the configured principal, rate, and term.
    ///
    /// A zero rate degenerates to straight-line repayment; a zero term
    /// yields no payment.
    pub fn payment(&self) -> f64 {
        if let Some(payment) = self.monthly_payment {
            return payment;
        }
        if self.term_months == 0 {
            return 0.0;
        }
        let monthly_rate = self.interest_rate / 100.0 / 12.0;
        if monthly_rate.abs() < f64::EPSILON {
            return self.principal / f64::from(self.term_months);
        }
        (self.principal * monthly_rate)
            / (1.0 - (1.0 + monthly_rate).powi(-(self.term_months as i32)))
    }
}

/// A position in a tradable instrument.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Holding {
    pub symbol: String,
    pub quantity: f64,
    pub market_price: f64,
}

impl Holding {
    pub fn market_value(&self) -> f64 {
        self.quantity * self.market_price
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct InvestmentDetails {
    #[serde(default)]
    pub holdings: Vec<Holding>,
}

impl InvestmentDetails {
    /// Portfolio value across all holdings. The transaction ledger plays
    /// no part in this figure.
    pub fn market_value(&self) -> f64 {
        self.holdings.iter().map(Holding::market_value).sum()
    }
}

/// Tax-advantaged retirement account valued like an investment portfolio.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RetirementDetails {
    /// Plan flavour, e.g. "401k", "IRA", "Roth IRA".
    pub plan_type: String,
    #[serde(default)]
    pub holdings: Vec<Holding>,
    pub tax_advantaged: bool,
    /// Annual contribution cap, when the plan imposes one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contribution_limit: Option<f64>,
}

impl RetirementDetails {
    pub fn new(plan_type: impl Into<String>) -> Self {
        Self {
            plan_type: plan_type.into(),
            holdings: Vec::new(),
            tax_advantaged: true,
            contribution_limit: None,
        }
    }

    pub fn market_value(&self) -> f64 {
        self.holdings.iter().map(Holding::market_value).sum()
    }
}
