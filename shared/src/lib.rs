//! Shared types for the delivery console
//!
//! Common types used across the console crates: credit and price-list
//! models, draft order lines, the unified error system, and id helpers.

pub mod error;
pub mod models;
pub mod order;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use models::{PriceListEntry, ProductCredit, ProductInfo};
pub use order::{DraftOrderHeader, LineSource, OrderKind, OrderLine, SubmissionItem};
