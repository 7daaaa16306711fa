use chrono::NaiveDate;
use derive_getters::Getters;
use derive_new::new;

/// Trade date as written in the export, plus its parsed calendar date for
/// ordering. The raw text is what ends up in the report.
#[derive(Clone, Debug, Eq, Getters, new, PartialEq)]
pub struct TradeDate {
    raw: String,
    date: NaiveDate,
}
