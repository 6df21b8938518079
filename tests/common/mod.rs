#![allow(dead_code)]

use std::{path::PathBuf, sync::Mutex};

use chrono::{NaiveDate, TimeZone, Utc};
use financy_core::{
    config::ConfigManager,
    domain::{Category, CategoryColor, CategoryIcon, Snapshot, Transaction, TransactionType},
    period::PeriodKey,
};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates a unique directory that outlives the calling test.
pub fn temp_dir() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

pub fn config_manager() -> ConfigManager {
    ConfigManager::with_base_dir(temp_dir())
}

pub fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub fn february() -> PeriodKey {
    PeriodKey::new(2026, 2).expect("valid period")
}

pub fn categories() -> Vec<Category> {
    vec![
        Category::new("Rent")
            .with_id("rent")
            .with_style(CategoryIcon::Home, CategoryColor::Blue)
            .created(Utc.with_ymd_and_hms(2025, 11, 1, 12, 0, 0).unwrap()),
        Category::new("Transport")
            .with_id("transport")
            .with_style(CategoryIcon::Car, CategoryColor::Orange)
            .created(Utc.with_ymd_and_hms(2025, 11, 2, 12, 0, 0).unwrap()),
        Category::new("Groceries")
            .with_id("groceries")
            .with_style(CategoryIcon::Cart, CategoryColor::Green),
    ]
}

/// Salary, rent and a bus fare in February 2026.
pub fn february_transactions() -> Vec<Transaction> {
    vec![
        Transaction::new("Salary", ymd(2026, 2, 1), TransactionType::Income, 650000)
            .with_id("t1"),
        Transaction::new("Rent", ymd(2026, 2, 5), TransactionType::Expense, 180000)
            .with_id("t2")
            .with_category("rent"),
        Transaction::new("Bus", ymd(2026, 2, 8), TransactionType::Expense, 4500)
            .with_id("t3")
            .with_category("transport"),
    ]
}

/// Twenty-five expenses spread over January and February 2026.
pub fn many_transactions() -> Vec<Transaction> {
    (1..=25)
        .map(|n| {
            let (month, day) = if n <= 12 { (1, n) } else { (2, n - 12) };
            let category = if n % 2 == 0 { "groceries" } else { "transport" };
            Transaction::new(
                format!("Purchase {n:02}"),
                ymd(2026, month, day as u32),
                TransactionType::Expense,
                i64::from(n) * 100,
            )
            .with_id(format!("m{n:02}"))
            .with_category(category)
        })
        .collect()
}

/// Snapshot mixing both store schemas plus one broken record.
pub const MIXED_SNAPSHOT: &str = r#"{
  "categories": [
    {"id": "rent", "title": "Rent", "icon": "home", "color": "blue",
     "created_at": "2025-11-01T12:00:00Z"},
    {"id": "transport", "title": "Transport", "icon": "rocket", "color": "teal"}
  ],
  "transactions": [
    {"id": "t1", "description": "Salary", "date": "2026-02-01T00:00:00.000Z",
     "type": "INCOME", "amountCents": 650000},
    {"id": "t2", "description": "Rent", "date": "2026-02-05",
     "type": "saida", "amount": "1800.00", "category_id": "rent"},
    {"id": "t3", "description": "Bus", "date": "2026-02-08 09:30:00",
     "type": "EXPENSE", "amount": 45, "categoryId": "transport"},
    {"id": "t4", "description": "Broken", "date": "2026-02-09",
     "type": "TRANSFER", "amountCents": 100}
  ]
}"#;

pub fn mixed_snapshot() -> Snapshot {
    Snapshot::from_json(MIXED_SNAPSHOT).expect("parse snapshot")
}

/// Writes the mixed snapshot to a temp file and returns its path.
pub fn snapshot_file() -> PathBuf {
    let path = temp_dir().join("snapshot.json");
    std::fs::write(&path, MIXED_SNAPSHOT).expect("write snapshot");
    path
}
