//! Derived, read-only view models produced by the aggregation services.

use serde::{Deserialize, Serialize};

use crate::{
    domain::{
        category::Category,
        common::NamedEntity,
        transaction::{Transaction, TransactionType},
    },
    period::PeriodKey,
};

pub const UNCATEGORIZED_LABEL: &str = "Uncategorized";
pub const UNCATEGORIZED_LABEL_PT: &str = "Outros";
pub const DEFAULT_RECENT_LIMIT: usize = 5;
pub const DEFAULT_TOP_CATEGORIES: usize = 5;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PeriodTotals {
    pub income: i64,
    pub expense: i64,
}

impl PeriodTotals {
    pub fn net(&self) -> i64 {
        self.income - self.expense
    }
}

/// Grouping target for category aggregations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", content = "category", rename_all = "snake_case")]
pub enum CategoryBucket {
    Category(Category),
    /// No category reference, or a reference to a category that no longer exists.
    Uncategorized,
}

impl CategoryBucket {
    pub fn category(&self) -> Option<&Category> {
        match self {
            CategoryBucket::Category(category) => Some(category),
            CategoryBucket::Uncategorized => None,
        }
    }

    pub fn category_id(&self) -> Option<&str> {
        self.category().map(|category| category.id.as_str())
    }

    /// Category title, or the localized uncategorized label.
    pub fn label(&self, language_tag: &str) -> &str {
        match self {
            CategoryBucket::Category(category) => category.name(),
            CategoryBucket::Uncategorized => uncategorized_label_for(language_tag),
        }
    }
}

/// Label shown for uncategorized spending in the given language.
pub fn uncategorized_label_for(language_tag: &str) -> &'static str {
    if language_tag.to_ascii_lowercase().starts_with("pt") {
        UNCATEGORIZED_LABEL_PT
    } else {
        UNCATEGORIZED_LABEL
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategorySpend {
    pub bucket: CategoryBucket,
    pub count: usize,
    pub total_cents: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryUsage {
    pub category: Category,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryStats {
    pub total_categories: usize,
    pub total_transactions: usize,
    pub most_used: Option<CategoryUsage>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BreakdownOptions {
    pub kind: TransactionType,
    pub period: Option<PeriodKey>,
    pub limit: Option<usize>,
}

impl Default for BreakdownOptions {
    fn default() -> Self {
        Self {
            kind: TransactionType::Expense,
            period: None,
            limit: None,
        }
    }
}

impl BreakdownOptions {
    pub fn for_period(period: PeriodKey) -> Self {
        Self {
            period: Some(period),
            ..Self::default()
        }
    }

    pub fn with_kind(mut self, kind: TransactionType) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DashboardOptions {
    pub recent_limit: usize,
    pub top_categories: usize,
}

impl Default for DashboardOptions {
    fn default() -> Self {
        Self {
            recent_limit: DEFAULT_RECENT_LIMIT,
            top_categories: DEFAULT_TOP_CATEGORIES,
        }
    }
}

/// Everything the dashboard cards show for one month.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DashboardSummary {
    pub period: PeriodKey,
    /// All-time balance; never scoped to `period`.
    pub balance: i64,
    pub month: PeriodTotals,
    pub recent: Vec<Transaction>,
    pub top_categories: Vec<CategorySpend>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bucket_labels_are_localized() {
        let bucket = CategoryBucket::Uncategorized;
        assert_eq!(bucket.label("pt-BR"), "Outros");
        assert_eq!(bucket.label("PT"), "Outros");
        assert_eq!(bucket.label("en-US"), "Uncategorized");
        let rent = CategoryBucket::Category(Category::new("Rent"));
        assert_eq!(rent.label("pt-BR"), "Rent");
    }
}
