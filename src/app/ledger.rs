use std::collections::{BTreeMap, VecDeque};

use derive_getters::Getters;
use derive_new::new;

use crate::{
    error::MoneyError,
    models::{Money, PurchaseLot, Quantity, TradeDate},
};

/// The part of a purchase lot handed to a sale.
#[derive(Clone, Debug, Eq, Getters, new, PartialEq)]
pub struct LotSlice {
    isin: String,
    ticker: String,
    purchase_date: TradeDate,
    unit_price: Money,
    quantity_taken: Quantity,
    cost_taken: Money,
}

#[derive(Clone, Debug, Default, Eq, Getters, PartialEq)]
pub struct Consumption {
    slices: Vec<LotSlice>,
    /// Requested shares no open lot could cover.
    unmatched: Quantity,
}

/// Open purchase lots per ISIN, oldest first. Lots are only mutated here;
/// callers get back slice descriptors, never the lots themselves.
#[derive(Clone, Debug, Default)]
pub struct LotLedger {
    queues: BTreeMap<String, VecDeque<PurchaseLot>>,
}

impl LotLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_purchase(&mut self, lot: PurchaseLot) {
        self.queues
            .entry(lot.isin().to_string())
            .or_default()
            .push_back(lot);
    }

    /// Stable sort of every queue by trade date; lots bought on the same day
    /// keep their input order.
    pub fn sort_by_purchase_date(&mut self) {
        for queue in self.queues.values_mut() {
            queue
                .make_contiguous()
                .sort_by_key(|lot| *lot.trade_date().date());
        }
    }

    /// Takes `requested` shares of `isin` from the front of its queue, splitting
    /// the last lot touched if it is only partly used.
    pub fn consume(&mut self, isin: &str, requested: Quantity) -> Result<Consumption, MoneyError> {
        let mut consumption = Consumption {
            slices: Vec::new(),
            unmatched: requested,
        };
        let Some(queue) = self.queues.get_mut(isin) else {
            return Ok(consumption);
        };

        while !consumption.unmatched.is_zero() {
            let Some(front) = queue.front_mut() else {
                break;
            };

            let take = consumption.unmatched.min(*front.quantity());
            let cost_taken = front.reduce(take)?;
            consumption.slices.push(LotSlice::new(
                front.isin().to_string(),
                front.ticker().to_string(),
                front.trade_date().clone(),
                front.unit_price().clone(),
                take,
                cost_taken,
            ));
            consumption.unmatched = consumption
                .unmatched
                .checked_sub(take)
                .ok_or(MoneyError::Overflow)?;

            if front.quantity().is_zero() {
                queue.pop_front();
            }
        }

        Ok(consumption)
    }

    /// Checks that every lot `consume(isin, requested)` would touch is held in
    /// `currency`. Leaves the ledger as it is.
    pub fn check_currency(
        &self,
        isin: &str,
        requested: Quantity,
        currency: &str,
    ) -> Result<(), MoneyError> {
        let mut covered = Quantity::ZERO;
        for lot in self.open_lots(isin) {
            if covered >= requested {
                break;
            }
            let lot_currency = lot.total_cost().currency();
            if lot_currency != currency {
                return Err(MoneyError::CurrencyMismatch {
                    left: currency.to_string(),
                    right: lot_currency.to_string(),
                });
            }
            covered = covered + *lot.quantity();
        }
        Ok(())
    }

    pub fn open_quantity(&self, isin: &str) -> Quantity {
        self.queues
            .get(isin)
            .map(|queue| queue.iter().map(|lot| *lot.quantity()).sum())
            .unwrap_or_default()
    }

    pub fn open_lots(&self, isin: &str) -> impl Iterator<Item = &PurchaseLot> {
        self.queues.get(isin).into_iter().flatten()
    }

    pub fn is_empty(&self) -> bool {
        self.queues.values().all(VecDeque::is_empty)
    }

    /// Remaining lots, ISIN by ISIN, oldest first within each security.
    pub fn into_open_lots(self) -> impl Iterator<Item = PurchaseLot> {
        self.queues.into_values().flatten()
    }
}
