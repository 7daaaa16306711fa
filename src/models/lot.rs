use derive_getters::Getters;
use derive_new::new;

use super::{Money, Quantity, TradeDate};
use crate::error::MoneyError;

#[derive(Clone, Debug, Eq, Getters, new, PartialEq)]
pub struct PurchaseLot {
    isin: String,
    ticker: String,
    quantity: Quantity,
    unit_price: Money,
    total_cost: Money,
    trade_date: TradeDate,
}

impl PurchaseLot {
    /// Removes `take` shares and returns the cost they carried. The cost is
    /// taken proportionally from `total_cost` on the quantity held before the
    /// reduction, so the slices of a lot always add back up to its original cost.
    pub(crate) fn reduce(&mut self, take: Quantity) -> Result<Money, MoneyError> {
        let cost_taken = self.total_cost.proportion(take, self.quantity)?;
        self.total_cost = self.total_cost.subtract(&cost_taken)?;
        self.quantity = self
            .quantity
            .checked_sub(take)
            .ok_or(MoneyError::Overflow)?;
        Ok(cost_taken)
    }
}
