//! External data sources
//!
//! The composer reads three kinds of reference data on demand:
//! - subscription credits ([`SubscriptionGateway`])
//! - price list entries ([`PriceListGateway`])
//! - product details ([`ProductGateway`])
//!
//! Failures here never abort a draft operation. Callers degrade to an
//! empty/zero default and record a [`LookupDiagnostic`].

mod http;
pub mod memory;

pub use http::HttpGateway;
pub use memory::InMemoryGateway;

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Serialize;
use shared::{AppError, AppResult, ProductCredit, ProductInfo};
use std::sync::Arc;

#[async_trait]
pub trait SubscriptionGateway: Send + Sync {
    /// Current-cycle credits of a subscription
    async fn credits(&self, subscription_id: i64) -> AppResult<Vec<ProductCredit>>;
}

#[async_trait]
pub trait PriceListGateway: Send + Sync {
    /// Unit price of a product in a price list; `Ok(None)` when the list has no entry
    async fn unit_price(&self, price_list_id: i64, product_id: i64) -> AppResult<Option<Decimal>>;
}

#[async_trait]
pub trait ProductGateway: Send + Sync {
    async fn product(&self, product_id: i64) -> AppResult<ProductInfo>;
}

/// The three collaborators a draft session talks to
#[derive(Clone)]
pub struct Gateways {
    pub subscriptions: Arc<dyn SubscriptionGateway>,
    pub prices: Arc<dyn PriceListGateway>,
    pub products: Arc<dyn ProductGateway>,
}

impl Gateways {
    pub fn new(
        subscriptions: Arc<dyn SubscriptionGateway>,
        prices: Arc<dyn PriceListGateway>,
        products: Arc<dyn ProductGateway>,
    ) -> Self {
        Self {
            subscriptions,
            prices,
            products,
        }
    }

    /// Use one object for all three roles
    pub fn from_single<G>(gateway: Arc<G>) -> Self
    where
        G: SubscriptionGateway + PriceListGateway + ProductGateway + 'static,
    {
        Self {
            subscriptions: gateway.clone(),
            prices: gateway.clone(),
            products: gateway,
        }
    }
}

/// Which lookup degraded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupKind {
    /// Credit fetch failed; ledger left empty
    Credits,
    /// Price fetch failed; priced at zero
    Price,
    /// Price list has no entry for the product; priced at zero
    PriceMissing,
    /// Price negative, above the limit, or overflowing; priced at zero
    PriceInvalid,
    /// No price list given and none configured; priced at zero
    PriceListMissing,
    /// Product fetch failed; line carries default display fields
    Product,
}

/// A lookup that fell back to a default instead of failing the operation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LookupDiagnostic {
    pub kind: LookupKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<i64>,
    pub message: String,
}

impl LookupDiagnostic {
    pub fn new(kind: LookupKind, product_id: Option<i64>, message: impl Into<String>) -> Self {
        Self {
            kind,
            product_id,
            message: message.into(),
        }
    }

    pub(crate) fn from_error(kind: LookupKind, product_id: Option<i64>, err: &AppError) -> Self {
        Self::new(
            kind,
            product_id,
            format!("[{} {}] {}", err.code.category().name(), err.code, err.message),
        )
    }

    /// Emit the diagnostic as a warning
    pub(crate) fn log(&self) {
        tracing::warn!(
            kind = ?self.kind,
            product_id = ?self.product_id,
            message = %self.message,
            "Lookup degraded"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::ErrorCode;

    #[test]
    fn test_diagnostic_from_error_carries_code() {
        let err = AppError::new(ErrorCode::PriceListNotFound);
        let diagnostic = LookupDiagnostic::from_error(LookupKind::Price, Some(4), &err);

        assert_eq!(diagnostic.kind, LookupKind::Price);
        assert_eq!(diagnostic.product_id, Some(4));
        assert_eq!(diagnostic.message, "[product 6901] Price list not found");
    }

    #[test]
    fn test_diagnostic_serializes_kind_snake_case() {
        let diagnostic = LookupDiagnostic::new(LookupKind::PriceListMissing, None, "no list");
        let json = serde_json::to_value(&diagnostic).unwrap();
        assert_eq!(json["kind"], "price_list_missing");
        assert!(json.get("product_id").is_none());
    }
}
