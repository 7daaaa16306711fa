use derive_getters::Getters;
use derive_new::new;

use super::{Money, Quantity, TradeDate};

#[derive(Clone, Debug, Eq, Getters, new, PartialEq)]
pub struct SaleEvent {
    isin: String,
    ticker: String,
    quantity: Quantity,
    total_proceeds: Money,
    unit_price: Money,
    trade_date: TradeDate,
}
