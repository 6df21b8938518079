//! Calendar-month helpers: date normalization, `YYYY-MM` period keys and
//! half-open month ranges.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::errors::{LedgerError, LedgerResult};

const TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Normalizes a bare date or a timestamp string into a calendar date.
///
/// A leading `YYYY-MM-DD` is read lexically so that a UTC timestamp such as
/// `2026-02-08T00:00:00.000Z` stays on the 8th whatever the local offset.
/// Other timestamps keep the calendar date in the offset they were written in.
pub fn parse_calendar_date(raw: &str) -> LedgerResult<NaiveDate> {
    let trimmed = raw.trim();
    if let Some((year, month, day)) = lexical_prefix(trimmed) {
        return NaiveDate::from_ymd_opt(year, month, day)
            .ok_or_else(|| LedgerError::InvalidDate(raw.to_string()));
    }
    parse_timestamp(trimmed).ok_or_else(|| LedgerError::InvalidDate(raw.to_string()))
}

fn lexical_prefix(raw: &str) -> Option<(i32, u32, u32)> {
    let bytes = raw.as_bytes();
    if bytes.len() < 10 {
        return None;
    }
    let shaped = bytes[..10].iter().enumerate().all(|(idx, byte)| match idx {
        4 | 7 => *byte == b'-',
        _ => byte.is_ascii_digit(),
    });
    if !shaped {
        return None;
    }
    // The date must stand alone or be followed by a time component.
    if let Some(next) = bytes.get(10) {
        if !matches!(next, b'T' | b't' | b' ') {
            return None;
        }
    }
    let year = raw[0..4].parse().ok()?;
    let month = raw[5..7].parse().ok()?;
    let day = raw[8..10].parse().ok()?;
    Some((year, month, day))
}

fn parse_timestamp(raw: &str) -> Option<NaiveDate> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.date_naive());
    }
    if let Ok(parsed) = DateTime::parse_from_rfc2822(raw) {
        return Some(parsed.date_naive());
    }
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|parsed| parsed.date())
}

/// Calendar month used to group transactions, rendered as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PeriodKey {
    year: i32,
    month: u32,
}

impl PeriodKey {
    /// Years are limited to what [`NaiveDate`] can represent.
    pub fn new(year: i32, month: u32) -> LedgerResult<Self> {
        let years = NaiveDate::MIN.year()..=NaiveDate::MAX.year();
        if !(1..=12).contains(&month) || !years.contains(&year) {
            return Err(LedgerError::InvalidDate(format!("{year:04}-{month:02}")));
        }
        Ok(Self { year, month })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    pub fn previous(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

/// Stable group key for a date.
pub fn period_key(date: NaiveDate) -> PeriodKey {
    PeriodKey::from_date(date)
}

impl fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for PeriodKey {
    type Err = LedgerError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let invalid = || LedgerError::InvalidDate(format!("period `{raw}`"));
        let (year, month) = raw.trim().split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        PeriodKey::new(year, month).map_err(|_| invalid())
    }
}

impl TryFrom<String> for PeriodKey {
    type Error = LedgerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PeriodKey> for String {
    fn from(key: PeriodKey) -> Self {
        key.to_string()
    }
}

/// Half-open `[start, end_exclusive)` span of one calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthRange {
    pub start: NaiveDate,
    pub end_exclusive: NaiveDate,
}

impl MonthRange {
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date < self.end_exclusive
    }

    /// `YYYY-MM-DD` bounds for `gte`/`lt` filters on a text date column.
    pub fn query_bounds(&self) -> (String, String) {
        (
            self.start.format("%Y-%m-%d").to_string(),
            self.end_exclusive.format("%Y-%m-%d").to_string(),
        )
    }
}

impl fmt::Display for MonthRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end_exclusive)
    }
}

pub fn month_range(key: PeriodKey) -> LedgerResult<MonthRange> {
    let first_day = |period: PeriodKey| {
        NaiveDate::from_ymd_opt(period.year, period.month, 1)
            .ok_or_else(|| LedgerError::InvalidDate(format!("period `{period}` out of range")))
    };
    Ok(MonthRange {
        start: first_day(key)?,
        end_exclusive: first_day(key.next())?,
    })
}

/// The `count` most recent periods ending at `current`, newest first.
pub fn recent_periods(current: PeriodKey, count: usize) -> Vec<PeriodKey> {
    std::iter::successors(Some(current), |period| Some(period.previous()))
        .take(count)
        .collect()
}

/// Locale month-name table used for period labels.
pub trait MonthNames {
    /// `month` is 1-based.
    fn month_name(&self, month: u32) -> &'static str;
}

pub struct EnglishMonths;

impl MonthNames for EnglishMonths {
    fn month_name(&self, month: u32) -> &'static str {
        match month {
            1 => "January",
            2 => "February",
            3 => "March",
            4 => "April",
            5 => "May",
            6 => "June",
            7 => "July",
            8 => "August",
            9 => "September",
            10 => "October",
            11 => "November",
            12 => "December",
            _ => "",
        }
    }
}

pub struct PortugueseMonths;

impl MonthNames for PortugueseMonths {
    fn month_name(&self, month: u32) -> &'static str {
        match month {
            1 => "Janeiro",
            2 => "Fevereiro",
            3 => "Março",
            4 => "Abril",
            5 => "Maio",
            6 => "Junho",
            7 => "Julho",
            8 => "Agosto",
            9 => "Setembro",
            10 => "Outubro",
            11 => "Novembro",
            12 => "Dezembro",
            _ => "",
        }
    }
}

/// Picks a name table from a BCP 47 language tag, English unless Portuguese.
pub fn month_names_for(language_tag: &str) -> &'static dyn MonthNames {
    if language_tag.to_ascii_lowercase().starts_with("pt") {
        &PortugueseMonths
    } else {
        &EnglishMonths
    }
}

pub fn format_period_label(key: PeriodKey, names: &dyn MonthNames) -> String {
    format!("{} / {}", names.month_name(key.month), key.year)
}

/// `dd/mm/yy`, as shown in compact transaction lists.
pub fn format_short_date(date: NaiveDate) -> String {
    date.format("%d/%m/%y").to_string()
}

/// `dd/mm/yyyy`.
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn bare_date_and_utc_timestamp_agree() {
        let bare = parse_calendar_date("2026-02-08").unwrap();
        let stamped = parse_calendar_date("2026-02-08T00:00:00.000Z").unwrap();
        assert_eq!(bare, stamped);
        assert_eq!((bare.year(), bare.month(), bare.day()), (2026, 2, 8));
    }

    #[test]
    fn lexical_prefix_ignores_offset() {
        let date = parse_calendar_date("2026-02-08T23:30:00-03:00").unwrap();
        assert_eq!(date, ymd(2026, 2, 8));
        let spaced = parse_calendar_date("2026-02-08 10:00:00").unwrap();
        assert_eq!(spaced, ymd(2026, 2, 8));
    }

    #[test]
    fn falls_back_to_full_timestamp_parsing() {
        let date = parse_calendar_date("Sun, 08 Feb 2026 00:00:00 +0000").unwrap();
        assert_eq!(date, ymd(2026, 2, 8));
    }

    #[test]
    fn rejects_unparseable_and_impossible_dates() {
        for raw in ["", "08/02/2026", "2026-02-30", "2026-02-08x", "yesterday"] {
            let err = parse_calendar_date(raw).expect_err(raw);
            assert!(matches!(err, LedgerError::InvalidDate(_)), "{raw}: {err}");
        }
    }

    #[test]
    fn period_key_formats_and_parses() {
        let key = period_key(ymd(2026, 2, 8));
        assert_eq!(key.to_string(), "2026-02");
        assert_eq!("2026-02".parse::<PeriodKey>().unwrap(), key);
        assert!("2026-13".parse::<PeriodKey>().is_err());
        assert!("2026-2".parse::<PeriodKey>().is_err());
        assert!("202602".parse::<PeriodKey>().is_err());
    }

    #[test]
    fn period_keys_order_chronologically() {
        let older: PeriodKey = "2025-12".parse().unwrap();
        let newer: PeriodKey = "2026-01".parse().unwrap();
        assert!(older < newer);
        assert_eq!(older.next(), newer);
        assert_eq!(newer.previous(), older);
    }

    #[test]
    fn month_range_rolls_december_into_next_year() {
        let range = month_range("2025-12".parse().unwrap()).unwrap();
        assert_eq!(range.start, ymd(2025, 12, 1));
        assert_eq!(range.end_exclusive, ymd(2026, 1, 1));
        assert!(range.contains(ymd(2025, 12, 31)));
        assert!(!range.contains(ymd(2026, 1, 1)));
        assert_eq!(
            range.query_bounds(),
            ("2025-12-01".to_string(), "2026-01-01".to_string())
        );
    }

    #[test]
    fn years_outside_the_calendar_are_rejected() {
        for year in [i32::MAX, i32::MIN, NaiveDate::MAX.year() + 1] {
            let err = PeriodKey::new(year, 12).expect_err("year must be rejected");
            assert!(matches!(err, LedgerError::InvalidDate(_)));
        }
        let last = PeriodKey::new(NaiveDate::MAX.year(), 12).unwrap();
        assert_eq!(last.next().year(), NaiveDate::MAX.year() + 1);
        assert!(month_range(last.next()).is_err());
        let first = PeriodKey::new(NaiveDate::MIN.year(), 1).unwrap();
        assert_eq!(first.previous().month(), 12);
    }

    #[test]
    fn recent_periods_walk_backwards_across_years() {
        let periods = recent_periods("2026-02".parse().unwrap(), 4);
        let rendered: Vec<String> = periods.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, ["2026-02", "2026-01", "2025-12", "2025-11"]);
    }

    #[test]
    fn labels_use_the_supplied_name_table() {
        let key: PeriodKey = "2026-03".parse().unwrap();
        assert_eq!(format_period_label(key, &EnglishMonths), "March / 2026");
        assert_eq!(
            format_period_label(key, month_names_for("pt-BR")),
            "Março / 2026"
        );
        assert_eq!(format_short_date(ymd(2026, 2, 8)), "08/02/26");
        assert_eq!(format_long_date(ymd(2026, 2, 8)), "08/02/2026");
    }

    #[test]
    fn period_key_serializes_as_text() {
        let key: PeriodKey = "2026-02".parse().unwrap();
        assert_eq!(serde_json::to_string(&key).unwrap(), "\"2026-02\"");
        let decoded: PeriodKey = serde_json::from_str("\"2026-02\"").unwrap();
        assert_eq!(decoded, key);
    }
}
