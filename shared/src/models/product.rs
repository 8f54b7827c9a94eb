//! Product Model

use serde::{Deserialize, Serialize};

/// Product details used to enrich order lines
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductInfo {
    pub id: i64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: Option<String>,
    /// Container must come back on the next delivery (bottles, drums)
    #[serde(default)]
    pub is_returnable: bool,
}

impl ProductInfo {
    /// Placeholder used when the product lookup fails
    pub fn unknown(id: i64) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }
}
