//! Order line types

use crate::models::ProductInfo;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Where a line's quantity comes from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LineSource {
    /// Drawn from subscription entitlement, zero price
    Covered,
    /// Charged against a price list
    Priced,
}

/// One line of a draft order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderLine {
    /// Client-side identifier assigned at creation
    pub id: i64,
    pub product_id: i64,
    /// Always positive
    pub quantity: i32,
    pub source: LineSource,

    // === Pricing (PRICED lines only; zero for COVERED) ===
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_list_id: Option<i64>,
    pub unit_price: Decimal,
    pub extended_price: Decimal,

    // === Provenance (COVERED lines only) ===
    /// Subscription whose credit this line consumed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscription_id: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    // === Display snapshot (captured at creation, never re-derived) ===
    pub product_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub is_returnable: bool,
}

impl OrderLine {
    /// Build a line drawn from subscription entitlement
    pub fn covered(
        id: i64,
        product: &ProductInfo,
        quantity: i32,
        subscription_id: i64,
        notes: Option<String>,
    ) -> Self {
        Self {
            id,
            product_id: product.id,
            quantity,
            source: LineSource::Covered,
            price_list_id: None,
            unit_price: Decimal::ZERO,
            extended_price: Decimal::ZERO,
            subscription_id: Some(subscription_id),
            notes,
            product_name: product.description.clone(),
            image_url: product.image_url.clone(),
            is_returnable: product.is_returnable,
        }
    }

    /// Build a line charged against a price list
    pub fn priced(
        id: i64,
        product: &ProductInfo,
        quantity: i32,
        price_list_id: Option<i64>,
        unit_price: Decimal,
        extended_price: Decimal,
        notes: Option<String>,
    ) -> Self {
        Self {
            id,
            product_id: product.id,
            quantity,
            source: LineSource::Priced,
            price_list_id,
            unit_price,
            extended_price,
            subscription_id: None,
            notes,
            product_name: product.description.clone(),
            image_url: product.image_url.clone(),
            is_returnable: product.is_returnable,
        }
    }

    #[inline]
    pub fn is_covered(&self) -> bool {
        self.source == LineSource::Covered
    }

    /// Field equality used by legacy removal (no id available)
    pub fn matches(
        &self,
        product_id: i64,
        quantity: i32,
        price_list_id: Option<i64>,
        notes: Option<&str>,
    ) -> bool {
        self.product_id == product_id
            && self.quantity == quantity
            && self.price_list_id == price_list_id
            && self.notes.as_deref() == notes
    }
}
