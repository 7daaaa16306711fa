pub mod lot;
pub mod money;
pub mod quantity;
pub mod record;
pub mod sale;
pub mod trade_date;
pub mod transaction;

pub use lot::PurchaseLot;
pub use money::Money;
pub use quantity::Quantity;
pub use record::{MatchedRecord, MatchedSale};
pub use sale::SaleEvent;
pub use trade_date::TradeDate;
pub use transaction::{Transaction, TransactionKind};
