use anyhow::{Result, bail};
use csv::StringRecord;
use derive_getters::Getters;
use tracing::debug;

use crate::{
    app::utils::{parse_date, parse_decimal},
    config::Config,
    error::{MoneyError, RecordError},
    models::{Money, PurchaseLot, Quantity, SaleEvent, TradeDate, Transaction, TransactionKind},
};

/// Decimal places of cash amounts in the export.
pub const AMOUNT_PRECISION: u32 = 2;
/// Decimal places unit prices are derived at.
pub const PRICE_PRECISION: u32 = 4;

/// Header positions of the columns the normalizer reads.
#[derive(Clone, Debug, Eq, Getters, PartialEq)]
pub struct ColumnMap {
    transaction_type: usize,
    security_name: usize,
    isin: usize,
    quantity: usize,
    amount: usize,
    currency: usize,
    trade_date: usize,
    /// Optional; exports without a price column still normalize.
    unit_price: Option<usize>,
}

impl ColumnMap {
    pub fn resolve(headers: &StringRecord, config: &Config) -> Result<Self> {
        let columns = &config.columns;
        let find = |name: &str| -> Result<usize> {
            match headers.iter().position(|h| h.trim() == name) {
                Some(idx) => Ok(idx),
                None => bail!("Missing required column '{}' in header", name),
            }
        };

        let amount = find(&columns.amount)?;
        // Exports repeat the currency header after several amount columns;
        // take the one describing the cash amount.
        let currency = headers
            .iter()
            .enumerate()
            .skip(amount)
            .find(|(_, h)| h.trim() == columns.currency)
            .map(|(idx, _)| idx)
            .map_or_else(|| find(&columns.currency), Ok)?;

        Ok(Self {
            transaction_type: find(&columns.transaction_type)?,
            security_name: find(&columns.security_name)?,
            isin: find(&columns.isin)?,
            quantity: find(&columns.quantity)?,
            amount,
            currency,
            trade_date: find(&columns.trade_date)?,
            unit_price: headers.iter().position(|h| h.trim() == columns.unit_price),
        })
    }
}

pub struct Normalizer<'a> {
    config: &'a Config,
    columns: ColumnMap,
}

impl<'a> Normalizer<'a> {
    pub fn new(config: &'a Config, headers: &StringRecord) -> Result<Self> {
        Ok(Self {
            config,
            columns: ColumnMap::resolve(headers, config)?,
        })
    }

    /// Turns one data row into a purchase or sale. Rows of any other
    /// transaction type yield `Ok(None)`. `row` is the 1-based data row number.
    pub fn normalize(
        &self,
        row: usize,
        record: &StringRecord,
    ) -> Result<Option<Transaction>, RecordError> {
        let field = |idx: usize| record.get(idx).unwrap_or("");

        let raw_type = field(self.columns.transaction_type);
        let kind = self.config.classify(raw_type);
        if kind == TransactionKind::Ignored {
            debug!(row, transaction_type = raw_type, "ignoring row");
            return Ok(None);
        }

        let ticker = field(self.columns.security_name).to_string();
        let isin = field(self.columns.isin).to_string();
        let currency = field(self.columns.currency).trim();

        let parse_error = |name: &'static str, value: &str| RecordError::Parse {
            row,
            field: name,
            value: value.to_string(),
            ticker: ticker.clone(),
        };

        let raw_quantity = field(self.columns.quantity);
        let quantity = parse_decimal(raw_quantity, "quantity")
            .ok()
            .and_then(Quantity::from_decimal)
            .ok_or_else(|| parse_error("quantity", raw_quantity))?;

        let raw_amount = field(self.columns.amount);
        let amount = parse_decimal(raw_amount, "amount")
            .map(|value| Money::from_decimal(value, AMOUNT_PRECISION, currency))
            .map_err(|_| parse_error("amount", raw_amount))?;

        let raw_date = field(self.columns.trade_date);
        let date = parse_date(raw_date, &self.config.date_formats).ok_or_else(|| {
            RecordError::UnknownDate {
                row,
                value: raw_date.to_string(),
                ticker: ticker.clone(),
            }
        })?;
        let trade_date = TradeDate::new(raw_date.to_string(), date);

        if quantity.is_zero() {
            return Err(RecordError::ZeroQuantity { row, ticker, isin });
        }

        let unit_price = amount
            .per_share(quantity, PRICE_PRECISION)
            .map_err(|source: MoneyError| RecordError::Money {
                row,
                ticker: ticker.clone(),
                isin: isin.clone(),
                source,
            })?;
        if let Some(idx) = self.columns.unit_price {
            debug!(row, quoted = field(idx), derived = %unit_price, "unit price");
        }

        let transaction = match kind {
            TransactionKind::Purchase => Transaction::Purchase(PurchaseLot::new(
                isin, ticker, quantity, unit_price, amount, trade_date,
            )),
            _ => Transaction::Sale(SaleEvent::new(
                isin, ticker, quantity, amount, unit_price, trade_date,
            )),
        };
        Ok(Some(transaction))
    }
}
