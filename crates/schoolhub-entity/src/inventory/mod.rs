//! Inventory stock items.

pub mod model;
pub mod status;

pub use model::{CreateItem, InventoryItem, InventoryStats};
pub use status::StockStatus;
