use strum_macros::Display;

use super::{PurchaseLot, SaleEvent};

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum TransactionKind {
    Purchase,
    Sale,
    Ignored,
}

/// A normalized input row that takes part in lot matching.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Transaction {
    Purchase(PurchaseLot),
    Sale(SaleEvent),
}

impl Transaction {
    pub fn kind(&self) -> TransactionKind {
        match self {
            Transaction::Purchase(_) => TransactionKind::Purchase,
            Transaction::Sale(_) => TransactionKind::Sale,
        }
    }
}
