use derive_getters::Getters;
use derive_new::new;

use super::{Money, PurchaseLot, Quantity, TradeDate};

/// A purchase lot slice paired with the sale that consumed it.
#[derive(Clone, Debug, Eq, Getters, new, PartialEq)]
pub struct MatchedSale {
    isin: String,
    ticker: String,
    purchase_date: TradeDate,
    unit_price: Money,
    cost: Money,
    quantity: Quantity,
    sale_date: TradeDate,
    sale_unit_price: Money,
    profit: Money,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum MatchedRecord {
    /// Shares still held at the end of the run.
    Open(PurchaseLot),
    Matched(MatchedSale),
}

impl MatchedRecord {
    pub fn isin(&self) -> &str {
        match self {
            MatchedRecord::Open(lot) => lot.isin(),
            MatchedRecord::Matched(sale) => sale.isin(),
        }
    }

    pub fn ticker(&self) -> &str {
        match self {
            MatchedRecord::Open(lot) => lot.ticker(),
            MatchedRecord::Matched(sale) => sale.ticker(),
        }
    }

    pub fn purchase_date(&self) -> &TradeDate {
        match self {
            MatchedRecord::Open(lot) => lot.trade_date(),
            MatchedRecord::Matched(sale) => sale.purchase_date(),
        }
    }

    pub fn quantity(&self) -> Quantity {
        match self {
            MatchedRecord::Open(lot) => *lot.quantity(),
            MatchedRecord::Matched(sale) => *sale.quantity(),
        }
    }

    pub fn cost(&self) -> &Money {
        match self {
            MatchedRecord::Open(lot) => lot.total_cost(),
            MatchedRecord::Matched(sale) => sale.cost(),
        }
    }

    pub fn unit_price(&self) -> &Money {
        match self {
            MatchedRecord::Open(lot) => lot.unit_price(),
            MatchedRecord::Matched(sale) => sale.unit_price(),
        }
    }
}
