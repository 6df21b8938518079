//! Plain-text renderings of the derived views.

use std::collections::HashMap;
use std::fmt::Write;

use colored::Colorize;

use crate::{
    cli::output::{style, MessageKind},
    core::{pagination::PageToken, query::TransactionPage},
    currency::{format_currency, LocaleConfig},
    domain::{
        summary::uncategorized_label_for, Category, CategoryStats, CategoryUsage,
        DashboardSummary, Transaction,
    },
    period::{format_long_date, format_period_label, format_short_date, MonthNames, PeriodKey},
};

fn signed_amount(txn: &Transaction, locale: &LocaleConfig) -> String {
    let text = format_currency(txn.signed_amount(), locale);
    if txn.is_income() {
        text.green().to_string()
    } else {
        text.red().to_string()
    }
}

fn transaction_line(
    txn: &Transaction,
    titles: &HashMap<&str, &str>,
    locale: &LocaleConfig,
) -> String {
    let category = txn
        .category_id
        .as_deref()
        .and_then(|id| titles.get(id).copied())
        .unwrap_or_else(|| uncategorized_label_for(&locale.language_tag));
    format!(
        "  {}  {:<24} {:<16} {}",
        format_short_date(txn.date),
        txn.description,
        category,
        signed_amount(txn, locale)
    )
}

fn category_titles(categories: &[Category]) -> HashMap<&str, &str> {
    let mut titles = HashMap::new();
    for category in categories {
        titles
            .entry(category.id.as_str())
            .or_insert(category.title.as_str());
    }
    titles
}

pub fn render_dashboard(
    summary: &DashboardSummary,
    categories: &[Category],
    locale: &LocaleConfig,
    names: &dyn MonthNames,
) -> String {
    let mut out = String::new();
    let titles = category_titles(categories);
    let _ = writeln!(
        out,
        "{}",
        style(
            MessageKind::Section,
            format!("Dashboard {}", format_period_label(summary.period, names))
        )
    );
    let _ = writeln!(out, "Balance:  {}", format_currency(summary.balance, locale));
    let _ = writeln!(out, "Income:   {}", format_currency(summary.month.income, locale));
    let _ = writeln!(out, "Expense:  {}", format_currency(summary.month.expense, locale));
    let _ = writeln!(out, "Net:      {}", format_currency(summary.month.net(), locale));

    let _ = writeln!(out, "\nRecent transactions:");
    if summary.recent.is_empty() {
        let _ = writeln!(out, "  (none)");
    }
    for txn in &summary.recent {
        let _ = writeln!(out, "{}", transaction_line(txn, &titles, locale));
    }

    let _ = writeln!(out, "\nTop categories:");
    if summary.top_categories.is_empty() {
        let _ = writeln!(out, "  (none)");
    }
    for spend in &summary.top_categories {
        let _ = writeln!(
            out,
            "  {:<20} {} ({})",
            spend.bucket.label(&locale.language_tag),
            format_currency(spend.total_cents, locale),
            spend.count
        );
    }
    out
}

fn pager(page: &TransactionPage<'_>) -> String {
    page.tokens
        .iter()
        .map(|token| match token {
            PageToken::Page(number) if *number == page.page => format!("[{number}]"),
            PageToken::Page(number) => number.to_string(),
            PageToken::Ellipsis => "...".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn render_transaction_page(
    page: &TransactionPage<'_>,
    categories: &[Category],
    locale: &LocaleConfig,
) -> String {
    let mut out = String::new();
    let titles = category_titles(categories);
    let _ = writeln!(out, "{}", style(MessageKind::Section, "Transactions"));
    if page.items.is_empty() {
        let _ = writeln!(out, "  No transactions found.");
    }
    for txn in &page.items {
        let _ = writeln!(out, "{}", transaction_line(txn, &titles, locale));
    }
    let _ = writeln!(
        out,
        "\nPage {} of {} ({} items)  {}",
        page.page,
        page.total_pages,
        page.total_items,
        pager(page)
    );
    out
}

pub fn render_categories(usages: &[CategoryUsage], stats: &CategoryStats) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", style(MessageKind::Section, "Categories"));
    for usage in usages {
        let created = usage
            .category
            .created_at
            .map(|at| format_long_date(at.date_naive()))
            .unwrap_or_default();
        let _ = writeln!(
            out,
            "  {:<20} {:<8} {:<8} {:>4} transactions  {}",
            usage.category.title,
            usage.category.icon.as_str(),
            usage.category.color.as_str(),
            usage.count,
            created
        );
    }
    let most_used = stats
        .most_used
        .as_ref()
        .map(|usage| format!("{} ({})", usage.category.title, usage.count))
        .unwrap_or_else(|| "-".to_string());
    let _ = writeln!(
        out,
        "\n{} categories, {} transactions, most used: {}",
        stats.total_categories, stats.total_transactions, most_used
    );
    out
}

pub fn render_periods(periods: &[PeriodKey], names: &dyn MonthNames) -> String {
    let mut out = String::new();
    for period in periods {
        let _ = writeln!(out, "  {}  {}", period, format_period_label(*period, names));
    }
    out
}
