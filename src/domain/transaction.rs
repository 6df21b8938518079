use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    domain::common::Identifiable,
    period::PeriodKey,
};

/// Canonical transaction kind, independent of the literal used by the store.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub const ALL: [TransactionType; 2] = [TransactionType::Income, TransactionType::Expense];

    /// Applies the kind's sign to an amount: income adds, expense subtracts.
    pub fn signed(self, amount_cents: i64) -> i64 {
        match self {
            TransactionType::Income => amount_cents,
            TransactionType::Expense => -amount_cents,
        }
    }

    pub(crate) fn slot(self) -> usize {
        match self {
            TransactionType::Income => 0,
            TransactionType::Expense => 1,
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TransactionType::Income => "Income",
            TransactionType::Expense => "Expense",
        };
        f.write_str(label)
    }
}

/// A normalized ledger entry. Amounts are whole cents and never negative.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub description: String,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub amount_cents: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
}

impl Transaction {
    pub fn new(
        description: impl Into<String>,
        date: NaiveDate,
        kind: TransactionType,
        amount_cents: i64,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            description: description.into(),
            date,
            kind,
            amount_cents,
            category_id: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_category(mut self, category_id: impl Into<String>) -> Self {
        self.category_id = Some(category_id.into());
        self
    }

    /// Amount with income positive and expense negative.
    pub fn signed_amount(&self) -> i64 {
        self.kind.signed(self.amount_cents)
    }

    pub fn period(&self) -> PeriodKey {
        PeriodKey::from_date(self.date)
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }
}

impl Identifiable for Transaction {
    fn id(&self) -> &str {
        &self.id
    }
}

/// A transaction exactly as one of the store schemas delivers it.
///
/// The GraphQL schema sends `amountCents` and `INCOME`/`EXPENSE`; the PostgREST
/// tables send a decimal `amount` (often as a string) and `entrada`/`saida`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawTransaction {
    pub id: String,
    pub description: String,
    pub date: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, alias = "amount_cents", skip_serializing_if = "Option::is_none")]
    pub amount_cents: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<RawDecimal>,
    #[serde(default, alias = "category_id", skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
}

/// Decimal major-unit amount; numeric columns may arrive as JSON strings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum RawDecimal {
    Number(f64),
    Text(String),
}
