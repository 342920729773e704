//! Orders module.

mod ledger;
mod order;

pub use ledger::OrderLedger;
pub use order::{FinancialStatus, Order, OrderLine};
