mod common;

use common::*;
use financy_core::{
    core::services::{SummaryService, TransactionService},
    currency::{
        denormalize_type, normalize_type, to_major_units, to_minor_units, AmountPolicy,
        TypeVocabulary,
    },
    domain::{CategoryColor, CategoryIcon, TransactionType},
    errors::LedgerError,
    period::{parse_calendar_date, period_key},
    utils::persistence,
};

#[test]
fn mixed_schemas_normalize_to_the_same_model() {
    let snapshot = mixed_snapshot();
    let results = TransactionService::normalize_batch(&snapshot.transactions, AmountPolicy::default());
    assert_eq!(results.len(), 4);

    let accepted: Vec<_> = results.iter().filter_map(|result| result.as_ref().ok()).collect();
    let cents: Vec<i64> = accepted.iter().map(|txn| txn.amount_cents).collect();
    assert_eq!(cents, [650000, 180000, 4500]);
    assert!(accepted.iter().all(|txn| period_key(txn.date) == february()));

    let err = results[3].as_ref().unwrap_err();
    assert_eq!(err.record_id(), Some("t4"));
    assert!(matches!(err.root(), LedgerError::UnknownTransactionType(_)));
}

#[test]
fn normalized_snapshot_reproduces_february() {
    let snapshot = mixed_snapshot();
    let (transactions, rejected) =
        TransactionService::partition_batch(&snapshot.transactions, AmountPolicy::default());
    assert_eq!(rejected.len(), 1);
    assert_eq!(SummaryService::total_balance(&transactions), 465500);
    assert_eq!(
        SummaryService::period_totals(&transactions, february()).expense,
        184500
    );
}

#[test]
fn unknown_category_styles_fall_back_on_decode() {
    let snapshot = mixed_snapshot();
    let transport = &snapshot.categories[1];
    assert_eq!(transport.icon, CategoryIcon::Wallet);
    assert_eq!(transport.color, CategoryColor::Green);
    assert!(transport.created_at.is_none());
    assert_eq!(snapshot.categories[0].icon, CategoryIcon::Home);
    assert!(snapshot.categories[0].created_at.is_some());
}

#[test]
fn bare_and_timestamp_dates_agree() {
    let bare = parse_calendar_date("2026-02-08").unwrap();
    for raw in [
        "2026-02-08T00:00:00.000Z",
        "2026-02-08T23:59:59-03:00",
        "2026-02-08 10:00:00",
        "2026-02-08t10:00:00",
    ] {
        assert_eq!(parse_calendar_date(raw).unwrap(), bare, "{raw}");
    }
    assert_eq!(parse_calendar_date("Sun, 08 Feb 2026 10:00:00 +0000").unwrap(), bare);
    for raw in ["", "08/02/2026", "2026-13-01", "2026-02-08x"] {
        assert!(
            matches!(parse_calendar_date(raw), Err(LedgerError::InvalidDate(_))),
            "{raw}"
        );
    }
}

#[test]
fn cents_survive_major_unit_round_trip() {
    for cents in (0..10_000).chain([123_456, 650_000, 99_999_999]) {
        assert_eq!(to_minor_units(to_major_units(cents)).unwrap(), cents);
    }
}

#[test]
fn vocabularies_round_trip() {
    for vocabulary in TypeVocabulary::ALL {
        for kind in TransactionType::ALL {
            assert_eq!(normalize_type(denormalize_type(kind, vocabulary)).unwrap(), kind);
        }
    }
}

#[test]
fn snapshot_files_round_trip() {
    let path = snapshot_file();
    let snapshot = persistence::load_snapshot_from_file(&path).unwrap();
    let copy = temp_dir().join("copy.json");
    persistence::save_snapshot_to_file(&snapshot, &copy).unwrap();
    let reloaded = persistence::load_snapshot_from_file(&copy).unwrap();
    assert_eq!(reloaded.transactions, snapshot.transactions);
    assert_eq!(reloaded.categories, snapshot.categories);
}
