pub mod engine;
pub mod input;
pub mod ledger;
pub mod normalizer;
pub mod pipeline;
pub mod report;
pub mod utils;

pub use engine::match_lots;
pub use ledger::LotLedger;
pub use pipeline::{Pipeline, Report};
