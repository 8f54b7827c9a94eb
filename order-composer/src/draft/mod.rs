//! Draft Order Session
//!
//! Owns everything a single draft needs: header, lines, the credit ledger
//! snapshot and the price cache. One session per draft; nothing here is
//! shared across drafts.

mod error;
mod session;
mod store;

pub use error::DraftError;
pub use session::DraftOrderSession;
pub use store::LineStore;

use crate::allocator::Allocation;
use crate::core::Config;
use crate::gateway::LookupDiagnostic;
use serde::Serialize;
use shared::OrderLine;

/// Limits applied to add requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DraftSettings {
    /// Used when an add request names no price list
    pub default_price_list_id: Option<i64>,
    pub max_line_quantity: i32,
}

impl DraftSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            default_price_list_id: config.default_price_list_id,
            max_line_quantity: config.max_line_quantity,
        }
    }
}

impl Default for DraftSettings {
    fn default() -> Self {
        Self {
            default_price_list_id: None,
            max_line_quantity: 9999,
        }
    }
}

/// "Add N of product P" as issued by the UI
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AddArticle {
    /// None when the user has not picked a product yet
    pub product_id: Option<i64>,
    pub quantity: i32,
    pub price_list_id: Option<i64>,
    pub notes: Option<String>,
}

impl AddArticle {
    pub fn new(product_id: i64, quantity: i32) -> Self {
        Self {
            product_id: Some(product_id),
            quantity,
            ..Default::default()
        }
    }

    pub fn with_price_list(mut self, price_list_id: i64) -> Self {
        self.price_list_id = Some(price_list_id);
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// What an accepted add produced
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AddOutcome {
    /// Appended lines (COVERED first, then PRICED)
    pub lines: Vec<OrderLine>,
    pub allocation: Allocation,
    /// Lookups that fell back to defaults
    pub diagnostics: Vec<LookupDiagnostic>,
}

impl AddOutcome {
    pub fn is_degraded(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}
