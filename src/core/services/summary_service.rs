use std::collections::HashMap;

use crate::{
    domain::{
        category::Category,
        common::Identifiable,
        summary::{
            BreakdownOptions, CategoryBucket, CategorySpend, CategoryStats, CategoryUsage,
            DashboardOptions, DashboardSummary, PeriodTotals,
        },
        transaction::{Transaction, TransactionType},
    },
    core::query::SortOrder,
    period::PeriodKey,
};

/// Read-only aggregations over a normalized transaction set.
pub struct SummaryService;

impl SummaryService {
    /// All-time income minus expense.
    pub fn total_balance(transactions: &[Transaction]) -> i64 {
        transactions
            .iter()
            .fold(0, |balance: i64, txn| balance.saturating_add(txn.signed_amount()))
    }

    pub fn period_totals(transactions: &[Transaction], period: PeriodKey) -> PeriodTotals {
        transactions
            .iter()
            .filter(|txn| txn.period() == period)
            .fold(PeriodTotals::default(), |mut totals, txn| {
                let slot = match txn.kind {
                    TransactionType::Income => &mut totals.income,
                    TransactionType::Expense => &mut totals.expense,
                };
                *slot = slot.saturating_add(txn.amount_cents);
                totals
            })
    }

    /// Totals per category for one kind, largest first.
    ///
    /// Transactions without a category, or pointing at a category that no
    /// longer exists, land in [`CategoryBucket::Uncategorized`]. Equal totals
    /// keep the order in which their bucket first appeared.
    pub fn category_breakdown(
        transactions: &[Transaction],
        categories: &[Category],
        options: &BreakdownOptions,
    ) -> Vec<CategorySpend> {
        let by_id = index_by_id(categories);
        let mut spends: Vec<CategorySpend> = Vec::new();
        let mut positions: HashMap<Option<&str>, usize> = HashMap::new();

        let selected = transactions.iter().filter(|txn| {
            txn.kind == options.kind
                && options.period.map_or(true, |period| txn.period() == period)
        });
        for txn in selected {
            let category = txn
                .category_id
                .as_deref()
                .and_then(|id| by_id.get(id).copied());
            let key = category.map(|category| category.id.as_str());
            let slot = *positions.entry(key).or_insert_with(|| {
                spends.push(CategorySpend {
                    bucket: category
                        .cloned()
                        .map_or(CategoryBucket::Uncategorized, CategoryBucket::Category),
                    count: 0,
                    total_cents: 0,
                });
                spends.len() - 1
            });
            spends[slot].count += 1;
            spends[slot].total_cents = spends[slot].total_cents.saturating_add(txn.amount_cents);
        }

        spends.sort_by(|a, b| b.total_cents.cmp(&a.total_cents));
        if let Some(limit) = options.limit {
            spends.truncate(limit);
        }
        spends
    }

    /// Number of transactions referencing each category, in category order.
    pub fn category_usage(
        transactions: &[Transaction],
        categories: &[Category],
    ) -> Vec<CategoryUsage> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for id in transactions.iter().filter_map(|txn| txn.category_id.as_deref()) {
            *counts.entry(id).or_default() += 1;
        }
        categories
            .iter()
            .map(|category| CategoryUsage {
                category: category.clone(),
                count: counts.get(category.id.as_str()).copied().unwrap_or(0),
            })
            .collect()
    }

    /// Category with the most transactions. Ties go to the earliest created
    /// category, then to the one listed first. Unused categories never win.
    pub fn most_used_category(
        transactions: &[Transaction],
        categories: &[Category],
    ) -> Option<CategoryUsage> {
        Self::category_usage(transactions, categories)
            .into_iter()
            .enumerate()
            .filter(|(_, usage)| usage.count > 0)
            .min_by(|(left_pos, left), (right_pos, right)| {
                right
                    .count
                    .cmp(&left.count)
                    .then_with(|| creation_rank(&left.category).cmp(&creation_rank(&right.category)))
                    .then_with(|| left_pos.cmp(right_pos))
            })
            .map(|(_, usage)| usage)
    }

    pub fn category_stats(transactions: &[Transaction], categories: &[Category]) -> CategoryStats {
        CategoryStats {
            total_categories: categories.len(),
            total_transactions: transactions.len(),
            most_used: Self::most_used_category(transactions, categories),
        }
    }

    /// Newest transactions first; same-day entries ordered by id.
    pub fn recent(transactions: &[Transaction], limit: usize) -> Vec<&Transaction> {
        let mut ordered: Vec<&Transaction> = transactions.iter().collect();
        ordered.sort_by(|a, b| SortOrder::DateDesc.compare(a, b));
        ordered.truncate(limit);
        ordered
    }

    /// Dashboard cards for `current`. The balance covers the whole history.
    pub fn dashboard(
        transactions: &[Transaction],
        categories: &[Category],
        current: PeriodKey,
        options: &DashboardOptions,
    ) -> DashboardSummary {
        let breakdown =
            BreakdownOptions::for_period(current).with_limit(options.top_categories);
        let summary = DashboardSummary {
            period: current,
            balance: Self::total_balance(transactions),
            month: Self::period_totals(transactions, current),
            recent: Self::recent(transactions, options.recent_limit)
                .into_iter()
                .cloned()
                .collect(),
            top_categories: Self::category_breakdown(transactions, categories, &breakdown),
        };
        tracing::debug!(
            period = %current,
            transactions = transactions.len(),
            balance = summary.balance,
            "dashboard computed"
        );
        summary
    }
}

/// First entry wins when ids repeat.
fn index_by_id<T: Identifiable>(items: &[T]) -> HashMap<&str, &T> {
    let mut index = HashMap::with_capacity(items.len());
    for item in items {
        index.entry(item.id()).or_insert(item);
    }
    index
}

fn creation_rank(category: &Category) -> (bool, Option<chrono::DateTime<chrono::Utc>>) {
    (category.created_at.is_none(), category.created_at)
}
