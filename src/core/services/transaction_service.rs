//! Conversion between store records and normalized transactions.

use crate::{
    currency::{denormalize_type, normalize_type, to_minor_units, AmountPolicy, TypeVocabulary},
    domain::transaction::{RawDecimal, RawTransaction, Transaction},
    errors::{LedgerError, LedgerResult},
    period::parse_calendar_date,
};

/// Validates raw store records and turns them into [`Transaction`] values.
pub struct TransactionService;

impl TransactionService {
    /// Normalizes one record. Failures carry the record id.
    pub fn normalize(raw: &RawTransaction, policy: AmountPolicy) -> LedgerResult<Transaction> {
        Self::normalize_fields(raw, policy).map_err(|err| {
            tracing::debug!(id = %raw.id, error = %err, "rejected transaction record");
            LedgerError::for_record(raw.id.clone(), err)
        })
    }

    /// Normalizes every record independently; one bad record never hides the rest.
    pub fn normalize_batch(
        raws: &[RawTransaction],
        policy: AmountPolicy,
    ) -> Vec<LedgerResult<Transaction>> {
        raws.iter().map(|raw| Self::normalize(raw, policy)).collect()
    }

    /// Splits a batch into accepted transactions and per-record failures.
    pub fn partition_batch(
        raws: &[RawTransaction],
        policy: AmountPolicy,
    ) -> (Vec<Transaction>, Vec<LedgerError>) {
        let mut accepted = Vec::with_capacity(raws.len());
        let mut rejected = Vec::new();
        for result in Self::normalize_batch(raws, policy) {
            match result {
                Ok(txn) => accepted.push(txn),
                Err(err) => rejected.push(err),
            }
        }
        (accepted, rejected)
    }

    /// Encodes a transaction for a store that speaks `vocabulary`.
    ///
    /// Canonical stores take integer cents; legacy stores take a decimal string.
    pub fn to_raw(txn: &Transaction, vocabulary: TypeVocabulary) -> RawTransaction {
        let (amount_cents, amount) = match vocabulary {
            TypeVocabulary::Canonical => (Some(txn.amount_cents), None),
            TypeVocabulary::Legacy => (
                None,
                Some(RawDecimal::Text(format!(
                    "{}.{:02}",
                    txn.amount_cents / 100,
                    txn.amount_cents % 100
                ))),
            ),
        };
        RawTransaction {
            id: txn.id.clone(),
            description: txn.description.clone(),
            date: txn.date.format("%Y-%m-%d").to_string(),
            kind: denormalize_type(txn.kind, vocabulary).to_string(),
            amount_cents,
            amount,
            category_id: txn.category_id.clone(),
        }
    }

    fn normalize_fields(raw: &RawTransaction, policy: AmountPolicy) -> LedgerResult<Transaction> {
        let kind = normalize_type(&raw.kind)?;
        let date = parse_calendar_date(&raw.date)?;
        let amount_cents = policy.check(minor_units(raw)?)?;
        let category_id = raw
            .category_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string);
        Ok(Transaction {
            id: raw.id.clone(),
            description: raw.description.clone(),
            date,
            kind,
            amount_cents,
            category_id,
        })
    }
}

fn minor_units(raw: &RawTransaction) -> LedgerResult<i64> {
    if let Some(cents) = raw.amount_cents {
        return Ok(cents);
    }
    match &raw.amount {
        Some(RawDecimal::Number(value)) => to_minor_units(*value),
        Some(RawDecimal::Text(text)) => {
            let value: f64 = text
                .trim()
                .parse()
                .map_err(|_| LedgerError::InvalidAmount(format!("`{text}` is not a number")))?;
            to_minor_units(value)
        }
        None => Err(LedgerError::InvalidAmount("missing amount".into())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TransactionType;
    use chrono::NaiveDate;

    fn raw(kind: &str) -> RawTransaction {
        RawTransaction {
            id: "t1".into(),
            description: "Market".into(),
            date: "2026-02-10".into(),
            kind: kind.into(),
            ..RawTransaction::default()
        }
    }

    #[test]
    fn normalizes_graphql_record() {
        let record = RawTransaction {
            amount_cents: Some(650000),
            date: "2026-02-01T00:00:00.000Z".into(),
            category_id: Some("  ".into()),
            ..raw("INCOME")
        };
        let txn = TransactionService::normalize(&record, AmountPolicy::AllowZero).unwrap();
        assert_eq!(txn.kind, TransactionType::Income);
        assert_eq!(txn.amount_cents, 650000);
        assert_eq!(txn.date, NaiveDate::from_ymd_opt(2026, 2, 1).unwrap());
        assert_eq!(txn.category_id, None);
    }

    #[test]
    fn normalizes_postgrest_decimal_strings() {
        let record = RawTransaction {
            amount: Some(RawDecimal::Text("1800.50".into())),
            category_id: Some("rent".into()),
            ..raw("saida")
        };
        let txn = TransactionService::normalize(&record, AmountPolicy::AllowZero).unwrap();
        assert_eq!(txn.kind, TransactionType::Expense);
        assert_eq!(txn.amount_cents, 180050);
        assert_eq!(txn.category_id.as_deref(), Some("rent"));
    }

    #[test]
    fn rejections_carry_record_id() {
        let cases = [
            RawTransaction {
                amount_cents: Some(-1),
                ..raw("INCOME")
            },
            RawTransaction {
                amount: Some(RawDecimal::Text("abc".into())),
                ..raw("INCOME")
            },
            raw("INCOME"),
            RawTransaction {
                amount_cents: Some(10),
                ..raw("TRANSFER")
            },
            RawTransaction {
                amount_cents: Some(10),
                date: "2026-02-30".into(),
                ..raw("EXPENSE")
            },
        ];
        for record in &cases {
            let err = TransactionService::normalize(record, AmountPolicy::AllowZero)
                .expect_err("record must be rejected");
            assert_eq!(err.record_id(), Some("t1"));
        }
    }

    #[test]
    fn zero_amount_follows_policy() {
        let record = RawTransaction {
            amount_cents: Some(0),
            ..raw("EXPENSE")
        };
        assert!(TransactionService::normalize(&record, AmountPolicy::AllowZero).is_ok());
        let err = TransactionService::normalize(&record, AmountPolicy::PositiveOnly).unwrap_err();
        assert!(matches!(err.root(), LedgerError::InvalidAmount(_)));
    }

    #[test]
    fn oversized_amounts_are_rejected_before_aggregation() {
        let records = vec![
            RawTransaction {
                id: "huge".into(),
                amount_cents: Some(i64::MAX),
                ..raw("INCOME")
            },
            RawTransaction {
                amount_cents: Some(1),
                ..raw("INCOME")
            },
        ];
        let (accepted, rejected) =
            TransactionService::partition_batch(&records, AmountPolicy::AllowZero);
        assert_eq!(accepted.len(), 1);
        assert_eq!(rejected[0].record_id(), Some("huge"));
        assert!(matches!(rejected[0].root(), LedgerError::InvalidAmount(_)));
        assert_eq!(crate::core::services::SummaryService::total_balance(&accepted), 1);
    }

    #[test]
    fn batch_keeps_good_records() {
        let records = vec![
            RawTransaction {
                amount_cents: Some(100),
                ..raw("INCOME")
            },
            raw("nope"),
        ];
        let (accepted, rejected) =
            TransactionService::partition_batch(&records, AmountPolicy::AllowZero);
        assert_eq!(accepted.len(), 1);
        assert_eq!(rejected.len(), 1);
        assert!(matches!(
            rejected[0].root(),
            LedgerError::UnknownTransactionType(_)
        ));
    }

    #[test]
    fn encodes_for_each_store() {
        let txn = Transaction::new(
            "Rent",
            NaiveDate::from_ymd_opt(2026, 2, 5).unwrap(),
            TransactionType::Expense,
            180005,
        )
        .with_id("t2");
        let legacy = TransactionService::to_raw(&txn, TypeVocabulary::Legacy);
        assert_eq!(legacy.kind, "saida");
        assert_eq!(legacy.amount, Some(RawDecimal::Text("1800.05".into())));
        assert_eq!(legacy.date, "2026-02-05");

        let canonical = TransactionService::to_raw(&txn, TypeVocabulary::Canonical);
        assert_eq!(canonical.kind, "EXPENSE");
        assert_eq!(canonical.amount_cents, Some(180005));

        for vocabulary in TypeVocabulary::ALL {
            let back = TransactionService::normalize(
                &TransactionService::to_raw(&txn, vocabulary),
                AmountPolicy::AllowZero,
            )
            .unwrap();
            assert_eq!(back, txn);
        }
    }
}
