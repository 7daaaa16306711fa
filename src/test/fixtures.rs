#![cfg(test)]

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::{
    app::normalizer::{AMOUNT_PRECISION, PRICE_PRECISION},
    models::{Money, PurchaseLot, Quantity, SaleEvent, TradeDate},
};

pub const HEADER: &str =
    "Id\tHandelsdag\tTransaksjonstype\tVerdipapir\tISIN\tAntall\tKurs\tValuta\tBeløp\tValuta";

/// Tab-separated export in the Nordnet layout. Each row is
/// `(trade date, transaction type, security name, ISIN, quantity, amount)`.
pub fn export(rows: &[(&str, &str, &str, &str, &str, &str)]) -> String {
    let mut text = String::from(HEADER);
    for (idx, (date, kind, name, isin, quantity, amount)) in rows.iter().enumerate() {
        text.push_str(&format!(
            "\n{}\t{}\t{}\t{}\t{}\t{}\t0\tNOK\t{}\tNOK",
            idx + 1,
            date,
            kind,
            name,
            isin,
            quantity,
            amount
        ));
    }
    text.push('\n');
    text
}

pub fn date(raw: &str) -> TradeDate {
    let parsed = NaiveDate::parse_from_str(raw, "%Y-%m-%d").unwrap();
    TradeDate::new(raw.to_string(), parsed)
}

pub fn nok(value: Decimal) -> Money {
    Money::from_decimal(value, AMOUNT_PRECISION, "NOK")
}

pub fn shares(count: i64) -> Quantity {
    Quantity::from_ticks(count * Quantity::SCALE)
}

pub fn lot(isin: &str, trade_date: &str, count: i64, cost: Decimal) -> PurchaseLot {
    let quantity = shares(count);
    let total_cost = nok(cost);
    let unit_price = total_cost.per_share(quantity, PRICE_PRECISION).unwrap();
    PurchaseLot::new(
        isin.to_string(),
        format!("Ticker {}", isin),
        quantity,
        unit_price,
        total_cost,
        date(trade_date),
    )
}

pub fn sale(isin: &str, trade_date: &str, count: i64, proceeds: Decimal) -> SaleEvent {
    let quantity = shares(count);
    let total_proceeds = nok(proceeds);
    let unit_price = total_proceeds.per_share(quantity, PRICE_PRECISION).unwrap();
    SaleEvent::new(
        isin.to_string(),
        format!("Ticker {}", isin),
        quantity,
        total_proceeds,
        unit_price,
        date(trade_date),
    )
}
