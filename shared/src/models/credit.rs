//! Subscription Credit Model

use serde::{Deserialize, Serialize};

/// Remaining entitlement for one product within a subscription's current cycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductCredit {
    /// Product reference (unique per subscription)
    pub product_id: i64,
    /// Display label
    #[serde(default)]
    pub description: String,
    /// Quantity not yet consumed this cycle (never negative)
    pub remaining_balance: i32,
}

impl ProductCredit {
    pub fn new(product_id: i64, description: impl Into<String>, remaining_balance: i32) -> Self {
        Self {
            product_id,
            description: description.into(),
            remaining_balance: remaining_balance.max(0),
        }
    }
}
