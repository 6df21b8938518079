//! Money normalization: cents/decimal conversion, user amount parsing and
//! locale-aware rendering. Amounts inside the core are always whole cents.

pub mod vocabulary;

use serde::{Deserialize, Serialize};

use crate::errors::{LedgerError, LedgerResult};

pub use vocabulary::{denormalize_type, normalize_type, TypeVocabulary};

pub const CENTS_PER_UNIT: i64 = 100;

/// Largest amount in cents the stores can carry exactly (2^53 - 1).
pub const MAX_AMOUNT_CENTS: i64 = (1 << 53) - 1;

/// Rejects amounts outside `[0, MAX_AMOUNT_CENTS]`.
pub fn check_amount_range(amount_cents: i64) -> LedgerResult<i64> {
    if amount_cents < 0 {
        return Err(LedgerError::InvalidAmount(format!(
            "{amount_cents} cents is negative"
        )));
    }
    if amount_cents > MAX_AMOUNT_CENTS {
        return Err(LedgerError::InvalidAmount(format!(
            "{amount_cents} cents is out of range"
        )));
    }
    Ok(amount_cents)
}

/// ISO 4217 currency representation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct CurrencyCode(pub String);

impl CurrencyCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CurrencyCode {
    fn default() -> Self {
        Self::new("BRL")
    }
}

/// Locale-aware formatting preferences.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LocaleConfig {
    pub language_tag: String,
    pub currency: CurrencyCode,
    pub decimal_separator: char,
    pub grouping_separator: char,
    /// Whether a space separates the symbol from the digits (`R$ 10,00` vs `$10.00`).
    pub symbol_spacing: bool,
}

impl LocaleConfig {
    pub fn pt_br() -> Self {
        Self {
            language_tag: "pt-BR".into(),
            currency: CurrencyCode::new("BRL"),
            decimal_separator: ',',
            grouping_separator: '.',
            symbol_spacing: true,
        }
    }

    pub fn en_us() -> Self {
        Self {
            language_tag: "en-US".into(),
            currency: CurrencyCode::new("USD"),
            decimal_separator: '.',
            grouping_separator: ',',
            symbol_spacing: false,
        }
    }

    /// Resolves a language tag to one of the known layouts, pt-BR by default.
    pub fn for_tag(language_tag: &str, currency: &str) -> Self {
        let mut locale = if language_tag.to_ascii_lowercase().starts_with("en") {
            Self::en_us()
        } else {
            Self::pt_br()
        };
        locale.currency = CurrencyCode::new(currency);
        locale
    }
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self::pt_br()
    }
}

/// Whether zero-value transactions are accepted. Negative amounts never are.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AmountPolicy {
    #[default]
    AllowZero,
    PositiveOnly,
}

impl AmountPolicy {
    pub fn check(self, amount_cents: i64) -> LedgerResult<i64> {
        check_amount_range(amount_cents)?;
        if amount_cents == 0 && self == AmountPolicy::PositiveOnly {
            return Err(LedgerError::InvalidAmount(
                "zero amount is not allowed".into(),
            ));
        }
        Ok(amount_cents)
    }
}

/// Converts a decimal major-unit amount into cents, rounding half away from zero.
pub fn to_minor_units(major_units: f64) -> LedgerResult<i64> {
    if !major_units.is_finite() {
        return Err(LedgerError::InvalidAmount(format!(
            "{major_units} is not a finite amount"
        )));
    }
    if major_units < 0.0 {
        return Err(LedgerError::InvalidAmount(format!(
            "{major_units} is negative"
        )));
    }
    let scaled = (major_units * CENTS_PER_UNIT as f64).round();
    if scaled > MAX_AMOUNT_CENTS as f64 {
        return Err(LedgerError::InvalidAmount(format!(
            "{major_units} is out of range"
        )));
    }
    Ok(scaled as i64)
}

/// Presentational conversion back to major units. Exact for every accepted amount.
pub fn to_major_units(minor_units: i64) -> f64 {
    minor_units as f64 / CENTS_PER_UNIT as f64
}

/// Parses an amount typed by a user (`"1.234,56"`, `"R$ 12,5"`) into cents.
pub fn parse_amount_input(text: &str, locale: &LocaleConfig) -> LedgerResult<i64> {
    let symbol = symbol_for(locale.currency.as_str());
    let body = text.trim().trim_start_matches(symbol.as_str()).trim();
    let normalized: String = body
        .chars()
        .filter(|ch| *ch != locale.grouping_separator && !ch.is_whitespace())
        .map(|ch| if ch == locale.decimal_separator { '.' } else { ch })
        .collect();
    let well_formed = !normalized.is_empty()
        && normalized.chars().all(|ch| ch.is_ascii_digit() || ch == '.')
        && normalized.chars().filter(|ch| *ch == '.').count() <= 1
        && normalized.chars().any(|ch| ch.is_ascii_digit());
    if !well_formed {
        return Err(LedgerError::InvalidAmount(format!("`{text}` is not an amount")));
    }
    let value: f64 = normalized
        .parse()
        .map_err(|_| LedgerError::InvalidAmount(format!("`{text}` is not an amount")))?;
    to_minor_units(value)
}

pub fn symbol_for(code: &str) -> String {
    match code {
        "BRL" => "R$".into(),
        "USD" => "$".into(),
        "EUR" => "€".into(),
        "GBP" => "£".into(),
        _ => code.into(),
    }
}

/// Renders cents with grouping and a two-digit fraction, without a symbol.
pub fn format_cents(cents: i64, locale: &LocaleConfig) -> String {
    let body = format_magnitude(cents.unsigned_abs(), locale);
    if cents < 0 {
        format!("-{}", body)
    } else {
        body
    }
}

fn format_magnitude(magnitude: u64, locale: &LocaleConfig) -> String {
    let units = magnitude / CENTS_PER_UNIT as u64;
    let fraction = magnitude % CENTS_PER_UNIT as u64;
    format!(
        "{}{}{:02}",
        group_digits(&units.to_string(), locale.grouping_separator),
        locale.decimal_separator,
        fraction
    )
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::new();
    for (count, ch) in digits.chars().rev().enumerate() {
        if count != 0 && count % 3 == 0 {
            grouped.insert(0, separator);
        }
        grouped.insert(0, ch);
    }
    grouped
}

/// Renders cents as a currency value, e.g. `R$ 1.234,56` or `-$12.00`.
pub fn format_currency(cents: i64, locale: &LocaleConfig) -> String {
    let symbol = symbol_for(locale.currency.as_str());
    let spacing = if locale.symbol_spacing { " " } else { "" };
    let body = format_magnitude(cents.unsigned_abs(), locale);
    if cents < 0 {
        format!("-{}{}{}", symbol, spacing, body)
    } else {
        format!("{}{}{}", symbol, spacing, body)
    }
}
