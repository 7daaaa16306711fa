use derive_getters::Getters;
use tracing::debug;

use crate::{
    app::ledger::{LotLedger, LotSlice},
    error::{Diagnostic, MoneyError},
    models::{MatchedRecord, MatchedSale, PurchaseLot, SaleEvent, Transaction},
};

#[derive(Clone, Debug, Default, Getters)]
pub struct MatchOutcome {
    records: Vec<MatchedRecord>,
    diagnostics: Vec<Diagnostic>,
}

impl MatchOutcome {
    pub fn into_parts(self) -> (Vec<MatchedRecord>, Vec<Diagnostic>) {
        (self.records, self.diagnostics)
    }
}

/// FIFO-matches every sale against the purchases of the same ISIN.
///
/// All purchases are loaded and date-sorted first, then sales are applied in
/// trade-date order. Returns the open lots left over followed by one record
/// per lot slice consumed.
pub fn match_lots(transactions: Vec<Transaction>) -> MatchOutcome {
    let (purchases, mut sales): (Vec<PurchaseLot>, Vec<SaleEvent>) = transactions.into_iter().fold(
        (Vec::new(), Vec::new()),
        |(mut purchases, mut sales), transaction| {
            match transaction {
                Transaction::Purchase(lot) => purchases.push(lot),
                Transaction::Sale(sale) => sales.push(sale),
            }
            (purchases, sales)
        },
    );
    debug!(purchases = purchases.len(), sales = sales.len(), "matching lots");

    let mut ledger = LotLedger::new();
    for lot in purchases {
        ledger.add_purchase(lot);
    }
    ledger.sort_by_purchase_date();

    sales.sort_by_key(|sale| *sale.trade_date().date());

    let mut matched = Vec::new();
    let mut diagnostics = Vec::new();

    for sale in &sales {
        let consumption = match ledger
            .check_currency(sale.isin(), *sale.quantity(), sale.unit_price().currency())
            .and_then(|()| ledger.consume(sale.isin(), *sale.quantity()))
        {
            Ok(consumption) => consumption,
            Err(source) => {
                diagnostics.push(match_failed(sale, source));
                continue;
            }
        };

        let mut failure = None;
        for slice in consumption.slices() {
            match matched_sale(slice, sale) {
                Ok(record) => matched.push(MatchedRecord::Matched(record)),
                Err(source) => {
                    failure.get_or_insert(source);
                }
            }
        }
        if let Some(source) = failure {
            diagnostics.push(match_failed(sale, source));
        }
        debug!(
            isin = %sale.isin(),
            sold = %sale.quantity(),
            open = %ledger.open_quantity(sale.isin()),
            "applied sale"
        );

        if !consumption.unmatched().is_zero() {
            diagnostics.push(Diagnostic::InsufficientLots {
                ticker: sale.ticker().to_string(),
                isin: sale.isin().to_string(),
                sale_date: sale.trade_date().clone(),
                unmatched: *consumption.unmatched(),
            });
        }
    }

    if ledger.is_empty() {
        debug!("every purchase lot was sold");
    }
    let mut records: Vec<MatchedRecord> = ledger.into_open_lots().map(MatchedRecord::Open).collect();
    debug!(open = records.len(), matched = matched.len(), "lots matched");
    records.extend(matched);

    MatchOutcome {
        records,
        diagnostics,
    }
}

/// Profit comes from the unit prices rather than the slice cost, so rounding
/// in the proportional cost split never reaches it.
fn matched_sale(slice: &LotSlice, sale: &SaleEvent) -> Result<MatchedSale, MoneyError> {
    let profit = sale
        .unit_price()
        .subtract(slice.unit_price())?
        .multiply(*slice.quantity_taken())?;

    Ok(MatchedSale::new(
        slice.isin().to_string(),
        slice.ticker().to_string(),
        slice.purchase_date().clone(),
        slice.unit_price().clone(),
        slice.cost_taken().clone(),
        *slice.quantity_taken(),
        sale.trade_date().clone(),
        sale.unit_price().clone(),
        profit,
    ))
}

fn match_failed(sale: &SaleEvent, source: MoneyError) -> Diagnostic {
    Diagnostic::MatchFailed {
        ticker: sale.ticker().to_string(),
        isin: sale.isin().to_string(),
        source,
    }
}
