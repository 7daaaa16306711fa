use std::io::Write;

use anyhow::{Context, Result};
use csv::{QuoteStyle, Terminator, WriterBuilder};
use derive_getters::Getters;
use serde::Serialize;

use crate::models::MatchedRecord;

pub const HEADER: &str = "#,ISIN,Ticker,Purchase date,Amount,Price,Quantity,Sale date,Sale price,Profit/loss";

const AMOUNT_DECIMALS: u32 = 2;
const PRICE_DECIMALS: u32 = 3;

/// One output line. Sale columns are `None` for lots still held.
#[derive(Clone, Debug, Eq, Getters, PartialEq, Serialize)]
pub struct ReportRow {
    index: usize,
    isin: String,
    ticker: String,
    purchase_date: String,
    amount: String,
    price: String,
    quantity: String,
    sale_date: Option<String>,
    sale_price: Option<String>,
    profit: Option<String>,
}

impl ReportRow {
    fn from_record(index: usize, record: &MatchedRecord) -> Self {
        let (sale_date, sale_price, profit) = match record {
            MatchedRecord::Open(_) => (None, None, None),
            MatchedRecord::Matched(sale) => (
                Some(sale.sale_date().raw().to_string()),
                Some(sale.sale_unit_price().format(PRICE_DECIMALS)),
                Some(sale.profit().format(AMOUNT_DECIMALS)),
            ),
        };

        Self {
            index,
            isin: record.isin().to_string(),
            ticker: record.ticker().to_string(),
            purchase_date: record.purchase_date().raw().to_string(),
            amount: record.cost().format(AMOUNT_DECIMALS),
            price: record.unit_price().format(PRICE_DECIMALS),
            quantity: record.quantity().format(),
            sale_date,
            sale_price,
            profit,
        }
    }
}

/// Orders records by purchase date (stable) and numbers them from zero.
pub fn assemble(mut records: Vec<MatchedRecord>) -> Vec<ReportRow> {
    records.sort_by_key(|record| *record.purchase_date().date());
    records
        .iter()
        .enumerate()
        .map(|(index, record)| ReportRow::from_record(index, record))
        .collect()
}

/// Writes the header line unquoted, then every row with all fields quoted.
pub fn write_csv<W: Write>(rows: &[ReportRow], mut writer: W) -> Result<()> {
    writeln!(writer, "{}", HEADER).context("Failed to write report header")?;

    let mut csv_writer = WriterBuilder::new()
        .has_headers(false)
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(&mut writer);
    for (idx, row) in rows.iter().enumerate() {
        csv_writer
            .serialize(row)
            .with_context(|| format!("Failed to write report row {}", idx))?;
    }
    csv_writer.flush().context("Failed to flush report")?;
    Ok(())
}
