//! Draft Order Types
//!
//! Types describing an order while it is being composed in the console:
//! - Lines: covered (drawn from subscription credits) or priced
//! - Header: customer, subscription, derived totals
//! - Submission items: the payload handed to order creation

pub mod draft;
pub mod line;

// Re-exports
pub use draft::{DraftOrderHeader, OrderKind, SubmissionItem};
pub use line::{LineSource, OrderLine};
