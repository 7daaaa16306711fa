use std::sync::LazyLock;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use regex::Regex;
use rust_decimal::Decimal;

static NON_NUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^0-9,.]").expect("valid regex"));

/// Drops everything but digits, commas and periods (signs and thousands
/// spaces included) and reads a comma as the decimal separator.
pub fn clean_numeric(field: &str) -> String {
    NON_NUMERIC.replace_all(field, "").replace(',', ".")
}

pub fn parse_decimal(field: &str, field_name: &str) -> Result<Decimal> {
    clean_numeric(field)
        .parse::<Decimal>()
        .with_context(|| format!("Failed to parse {} '{}'", field_name, field))
}

pub fn parse_date(field: &str, formats: &[String]) -> Option<NaiveDate> {
    let field = field.trim();
    formats
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(field, format).ok())
}
