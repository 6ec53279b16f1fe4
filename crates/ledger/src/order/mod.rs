//! Orders, their contents and their lifecycle status.

mod contents;
mod ledger;
mod record;
mod status;

pub use contents::Contents;
pub use ledger::OrderLedger;
pub use record::OrderRecord;
pub use status::OrderStatus;
