//! Per-record errors and the diagnostics a report run collects instead of failing.

use std::fmt;

use thiserror::Error;

use crate::models::{Quantity, TradeDate};

#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum MoneyError {
    #[error("currency mismatch: {left} vs {right}")]
    CurrencyMismatch { left: String, right: String },
    #[error("division by zero quantity")]
    DivideByZero,
    #[error("amount out of range")]
    Overflow,
}

/// Why a single input row was dropped.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum RecordError {
    #[error("row {row}: failed to parse {field} '{value}' for {ticker}")]
    Parse {
        row: usize,
        field: &'static str,
        value: String,
        ticker: String,
    },
    #[error("row {row}: quantity of {ticker} ({isin}) is zero")]
    ZeroQuantity {
        row: usize,
        ticker: String,
        isin: String,
    },
    #[error("row {row}: unrecognized trade date '{value}' for {ticker}")]
    UnknownDate {
        row: usize,
        value: String,
        ticker: String,
    },
    #[error("row {row}: {ticker} ({isin}): {source}")]
    Money {
        row: usize,
        ticker: String,
        isin: String,
        #[source]
        source: MoneyError,
    },
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Diagnostic {
    Skipped(RecordError),
    /// A sale ran out of open lots; the remainder was left unmatched.
    InsufficientLots {
        ticker: String,
        isin: String,
        sale_date: TradeDate,
        unmatched: Quantity,
    },
    /// A sale could not be matched. Reported once per sale. A currency
    /// mismatch is found before any lot is consumed, so those lots stay open;
    /// an overflow while computing profit drops the affected slices.
    MatchFailed {
        ticker: String,
        isin: String,
        source: MoneyError,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::Skipped(err) => write!(f, "Skipping record: {err}"),
            Diagnostic::InsufficientLots {
                ticker,
                isin,
                sale_date,
                unmatched,
            } => write!(
                f,
                "Unable to find purchase when calculating sale of {ticker} ({isin}) on {}. \
                 Skipping {unmatched} unmatched shares.",
                sale_date.raw()
            ),
            Diagnostic::MatchFailed {
                ticker,
                isin,
                source,
            } => write!(f, "Failed to match sale of {ticker} ({isin}): {source}"),
        }
    }
}
