//! Transaction list pipeline: search, type, category, period and date-range
//! filters, a total sort order, then pagination.

use std::{cmp::Ordering, fmt, str::FromStr};

use chrono::NaiveDate;
use serde::Serialize;

use crate::{
    core::pagination::{
        build_page_tokens, clamp_page, page_bounds, total_pages, PageToken, DEFAULT_PAGE,
        DEFAULT_PAGE_SIZE,
    },
    currency::normalize_type,
    domain::{Category, Transaction, TransactionType},
    errors::{LedgerError, LedgerResult},
    period::{parse_calendar_date, PeriodKey},
};

/// Words accepted for "no restriction" in type and category pickers.
const ALL_LITERALS: [&str; 3] = ["all", "todas", "todos"];

fn is_all_literal(raw: &str) -> bool {
    ALL_LITERALS
        .iter()
        .any(|literal| literal.eq_ignore_ascii_case(raw))
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TypeFilter {
    #[default]
    All,
    Only(TransactionType),
}

impl TypeFilter {
    pub fn matches(&self, transaction: &Transaction) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Only(kind) => transaction.kind == *kind,
        }
    }
}

impl FromStr for TypeFilter {
    type Err = LedgerError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        if is_all_literal(trimmed) {
            return Ok(TypeFilter::All);
        }
        normalize_type(trimmed)
            .map(TypeFilter::Only)
            .map_err(|_| LedgerError::InvalidFilterSpec(format!("type `{raw}`")))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl FromStr for CategoryFilter {
    type Err = LedgerError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(LedgerError::InvalidFilterSpec("empty category".into()));
        }
        if is_all_literal(trimmed) {
            return Ok(CategoryFilter::All);
        }
        Ok(CategoryFilter::Only(trimmed.to_string()))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    DateDesc,
    DateAsc,
    DescriptionAsc,
    DescriptionDesc,
    AmountDesc,
    AmountAsc,
}

impl SortOrder {
    pub const ALL: [SortOrder; 6] = [
        SortOrder::DateDesc,
        SortOrder::DateAsc,
        SortOrder::DescriptionAsc,
        SortOrder::DescriptionDesc,
        SortOrder::AmountDesc,
        SortOrder::AmountAsc,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::DateDesc => "date_desc",
            SortOrder::DateAsc => "date_asc",
            SortOrder::DescriptionAsc => "description_asc",
            SortOrder::DescriptionDesc => "description_desc",
            SortOrder::AmountDesc => "amount_desc",
            SortOrder::AmountAsc => "amount_asc",
        }
    }

    /// Total order over transactions; equal keys fall back to id ascending.
    pub fn compare(self, a: &Transaction, b: &Transaction) -> Ordering {
        let primary = match self {
            SortOrder::DateDesc => b.date.cmp(&a.date),
            SortOrder::DateAsc => a.date.cmp(&b.date),
            SortOrder::DescriptionAsc => compare_descriptions(a, b),
            SortOrder::DescriptionDesc => compare_descriptions(b, a),
            SortOrder::AmountDesc => b.amount_cents.cmp(&a.amount_cents),
            SortOrder::AmountAsc => a.amount_cents.cmp(&b.amount_cents),
        };
        primary.then_with(|| a.id.cmp(&b.id))
    }
}

fn compare_descriptions(a: &Transaction, b: &Transaction) -> Ordering {
    let folded = |text: &str| text.chars().flat_map(char::to_lowercase).collect::<Vec<_>>();
    folded(&a.description)
        .cmp(&folded(&b.description))
        .then_with(|| a.description.cmp(&b.description))
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = LedgerError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let wanted = raw.trim().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|order| order.as_str().eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| LedgerError::InvalidFilterSpec(format!("sort `{raw}`")))
    }
}

/// One request against the transaction list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionQuery {
    pub search: String,
    pub kind: TypeFilter,
    pub category: CategoryFilter,
    pub period: Option<PeriodKey>,
    /// Inclusive lower date bound.
    pub from: Option<NaiveDate>,
    /// Inclusive upper date bound.
    pub to: Option<NaiveDate>,
    pub sort: SortOrder,
    /// 1-indexed; clamped into range when the query runs.
    pub page: u64,
    pub page_size: u64,
}

impl Default for TransactionQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            kind: TypeFilter::All,
            category: CategoryFilter::All,
            period: None,
            from: None,
            to: None,
            sort: SortOrder::default(),
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl TransactionQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_type(mut self, kind: TypeFilter) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_category(mut self, category: CategoryFilter) -> Self {
        self.category = category;
        self
    }

    pub fn with_period(mut self, period: PeriodKey) -> Self {
        self.period = Some(period);
        self
    }

    pub fn with_date_range(mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        self.from = from;
        self.to = to;
        self
    }

    pub fn with_sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    pub fn with_page(mut self, page: u64, page_size: u64) -> Self {
        self.page = page;
        self.page_size = page_size;
        self
    }

    /// Builds a query from UI query-string pairs. Blank values are treated as
    /// absent; unknown keys and unparseable values are rejected.
    pub fn from_params<K, V>(params: &[(K, V)]) -> LedgerResult<Self>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut query = Self::default();
        for (key, value) in params {
            let (key, value) = (key.as_ref(), value.as_ref().trim());
            if value.is_empty() {
                continue;
            }
            match key {
                "q" | "search" => query.search = value.to_string(),
                "type" => query.kind = value.parse()?,
                "category" => query.category = value.parse()?,
                "period" => {
                    query.period = Some(value.parse::<PeriodKey>().map_err(|_| {
                        LedgerError::InvalidFilterSpec(format!("period `{value}`"))
                    })?)
                }
                "from" => query.from = Some(parse_bound(key, value)?),
                "to" => query.to = Some(parse_bound(key, value)?),
                "sort" => query.sort = value.parse()?,
                "page" => query.page = parse_number(key, value)?,
                "page_size" => query.page_size = parse_number(key, value)?,
                other => {
                    return Err(LedgerError::InvalidFilterSpec(format!(
                        "unknown parameter `{other}`"
                    )))
                }
            }
        }
        Ok(query)
    }

    /// Filters and sorts without paginating.
    pub fn matching<'a>(
        &self,
        transactions: &'a [Transaction],
        categories: &[Category],
    ) -> Vec<&'a Transaction> {
        let needle = self.search.trim().to_lowercase();
        let category_exists = match &self.category {
            CategoryFilter::All => true,
            CategoryFilter::Only(id) => categories.iter().any(|category| &category.id == id),
        };
        if !category_exists {
            return Vec::new();
        }
        let mut matched: Vec<&Transaction> = transactions
            .iter()
            .filter(|txn| needle.is_empty() || txn.description.to_lowercase().contains(&needle))
            .filter(|txn| self.kind.matches(txn))
            .filter(|txn| match &self.category {
                CategoryFilter::All => true,
                CategoryFilter::Only(id) => txn.category_id.as_deref() == Some(id.as_str()),
            })
            .filter(|txn| self.period.map_or(true, |period| txn.period() == period))
            .filter(|txn| self.from.map_or(true, |from| txn.date >= from))
            .filter(|txn| self.to.map_or(true, |to| txn.date <= to))
            .collect();
        matched.sort_by(|a, b| self.sort.compare(a, b));
        matched
    }

    /// Runs the full pipeline and returns the requested page.
    pub fn apply<'a>(
        &self,
        transactions: &'a [Transaction],
        categories: &[Category],
    ) -> LedgerResult<TransactionPage<'a>> {
        if self.page_size == 0 {
            return Err(LedgerError::InvalidFilterSpec(
                "page size must be positive".into(),
            ));
        }
        let matched = self.matching(transactions, categories);
        let total_items = matched.len();
        let pages = total_pages(total_items as u64, self.page_size);
        let page = clamp_page(self.page, pages);
        let bounds = page_bounds(page, self.page_size, total_items);
        tracing::debug!(
            total_items,
            page,
            total_pages = pages,
            sort = %self.sort,
            "transaction query applied"
        );
        Ok(TransactionPage {
            items: matched[bounds.start..bounds.end_exclusive].to_vec(),
            page,
            page_size: self.page_size,
            total_pages: pages,
            total_items,
            tokens: build_page_tokens(page, pages),
        })
    }
}

fn parse_bound(key: &str, value: &str) -> LedgerResult<NaiveDate> {
    parse_calendar_date(value)
        .map_err(|_| LedgerError::InvalidFilterSpec(format!("{key} `{value}`")))
}

fn parse_number(key: &str, value: &str) -> LedgerResult<u64> {
    value
        .parse()
        .map_err(|_| LedgerError::InvalidFilterSpec(format!("{key} `{value}`")))
}

/// One page of the filtered, sorted list plus pager metadata.
#[derive(Debug, Clone, Serialize)]
pub struct TransactionPage<'a> {
    pub items: Vec<&'a Transaction>,
    pub page: u64,
    pub page_size: u64,
    pub total_pages: u64,
    pub total_items: usize,
    pub tokens: Vec<PageToken>,
}
