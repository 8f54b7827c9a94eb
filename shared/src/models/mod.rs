//! Data models
//!
//! Reference data served by the console back office.
//! All IDs are `i64` (database INTEGER PRIMARY KEY).

pub mod credit;
pub mod price_list;
pub mod product;

// Re-exports
pub use credit::*;
pub use price_list::*;
pub use product::*;
