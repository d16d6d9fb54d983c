//! Fee collection and expense ledger.

pub mod kind;
pub mod model;

pub use kind::{TransactionKind, TransactionStatus};
pub use model::{AccountStats, CreateTransaction, Transaction};
