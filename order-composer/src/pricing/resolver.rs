//! Price Resolver
//!
//! Missing prices and gateway failures resolve to zero with a diagnostic
//! rather than blocking the line.

use crate::gateway::{LookupDiagnostic, LookupKind, PriceListGateway};
use crate::order_money::{extended_price, validate_unit_price};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;

/// Result of pricing a quantity
#[derive(Debug, Clone, PartialEq)]
pub struct PriceQuote {
    /// Price list actually used (request or default)
    pub price_list_id: Option<i64>,
    pub unit_price: Decimal,
    pub extended_price: Decimal,
    /// Set when the price fell back to zero
    pub diagnostic: Option<LookupDiagnostic>,
}

pub struct PriceResolver {
    gateway: Arc<dyn PriceListGateway>,
    default_price_list_id: Option<i64>,
    /// (price_list_id, product_id) -> unit price; absent entries cached as None
    cache: HashMap<(i64, i64), Option<Decimal>>,
}

impl PriceResolver {
    pub fn new(gateway: Arc<dyn PriceListGateway>, default_price_list_id: Option<i64>) -> Self {
        Self {
            gateway,
            default_price_list_id,
            cache: HashMap::new(),
        }
    }

    pub fn default_price_list_id(&self) -> Option<i64> {
        self.default_price_list_id
    }

    /// Unit price of a product; zero with a diagnostic when unavailable
    pub async fn resolve_unit(
        &mut self,
        product_id: i64,
        price_list_id: Option<i64>,
    ) -> (Option<i64>, Decimal, Option<LookupDiagnostic>) {
        let Some(list_id) = price_list_id.or(self.default_price_list_id) else {
            let diagnostic = LookupDiagnostic::new(
                LookupKind::PriceListMissing,
                Some(product_id),
                "no price list given and no default configured",
            );
            diagnostic.log();
            return (None, Decimal::ZERO, Some(diagnostic));
        };

        let key = (list_id, product_id);
        let found = match self.cache.get(&key) {
            Some(cached) => *cached,
            None => match self.gateway.unit_price(list_id, product_id).await {
                Ok(price) => {
                    self.cache.insert(key, price);
                    price
                }
                Err(e) => {
                    // Failures are not cached; the next add retries
                    let diagnostic =
                        LookupDiagnostic::from_error(LookupKind::Price, Some(product_id), &e);
                    diagnostic.log();
                    return (Some(list_id), Decimal::ZERO, Some(diagnostic));
                }
            },
        };

        match found {
            Some(unit) => match validate_unit_price(unit) {
                Ok(()) => (Some(list_id), unit, None),
                Err(reason) => {
                    let diagnostic = LookupDiagnostic::new(
                        LookupKind::PriceInvalid,
                        Some(product_id),
                        format!("price list {}: {}", list_id, reason),
                    );
                    diagnostic.log();
                    (Some(list_id), Decimal::ZERO, Some(diagnostic))
                }
            },
            None => {
                let diagnostic = LookupDiagnostic::new(
                    LookupKind::PriceMissing,
                    Some(product_id),
                    format!("price list {} has no entry for product {}", list_id, product_id),
                );
                diagnostic.log();
                (Some(list_id), Decimal::ZERO, Some(diagnostic))
            }
        }
    }

    /// Unit and extended price for `quantity` units
    pub async fn quote(
        &mut self,
        product_id: i64,
        price_list_id: Option<i64>,
        quantity: i32,
    ) -> PriceQuote {
        let (price_list_id, unit_price, diagnostic) =
            self.resolve_unit(product_id, price_list_id).await;
        match extended_price(unit_price, quantity) {
            Some(extended_price) => PriceQuote {
                price_list_id,
                unit_price,
                extended_price,
                diagnostic,
            },
            None => {
                let diagnostic = LookupDiagnostic::new(
                    LookupKind::PriceInvalid,
                    Some(product_id),
                    format!("{} x {} overflows", unit_price, quantity),
                );
                diagnostic.log();
                PriceQuote {
                    price_list_id,
                    unit_price: Decimal::ZERO,
                    extended_price: Decimal::ZERO,
                    diagnostic: Some(diagnostic),
                }
            }
        }
    }

    /// Forget cached prices (price lists edited elsewhere)
    pub fn invalidate(&mut self) {
        self.cache.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::InMemoryGateway;

    fn resolver(gateway: &Arc<InMemoryGateway>, default: Option<i64>) -> PriceResolver {
        PriceResolver::new(gateway.clone(), default)
    }

    #[tokio::test]
    async fn test_quote_multiplies_quantity() {
        let gateway = Arc::new(InMemoryGateway::new().with_price(1, 7, Decimal::new(200, 2)));
        let mut prices = resolver(&gateway, None);

        let quote = prices.quote(7, Some(1), 2).await;
        assert_eq!(quote.price_list_id, Some(1));
        assert_eq!(quote.unit_price, Decimal::new(2, 0));
        assert_eq!(quote.extended_price, Decimal::new(4, 0));
        assert!(quote.diagnostic.is_none());
    }

    #[tokio::test]
    async fn test_falls_back_to_default_price_list() {
        let gateway = Arc::new(InMemoryGateway::new().with_price(3, 7, Decimal::new(150, 2)));
        let mut prices = resolver(&gateway, Some(3));

        let quote = prices.quote(7, None, 2).await;
        assert_eq!(quote.price_list_id, Some(3));
        assert_eq!(quote.extended_price, Decimal::new(300, 2));
    }

    #[tokio::test]
    async fn test_missing_price_is_zero_with_diagnostic() {
        let gateway = Arc::new(InMemoryGateway::new());
        let mut prices = resolver(&gateway, None);

        let quote = prices.quote(7, Some(1), 2).await;
        assert_eq!(quote.unit_price, Decimal::ZERO);
        assert_eq!(quote.extended_price, Decimal::ZERO);
        assert_eq!(quote.diagnostic.unwrap().kind, LookupKind::PriceMissing);
    }

    #[tokio::test]
    async fn test_no_price_list_at_all() {
        let gateway = Arc::new(InMemoryGateway::new());
        let mut prices = resolver(&gateway, None);

        let quote = prices.quote(7, None, 2).await;
        assert_eq!(quote.price_list_id, None);
        assert_eq!(quote.extended_price, Decimal::ZERO);
        assert_eq!(quote.diagnostic.unwrap().kind, LookupKind::PriceListMissing);
        assert_eq!(gateway.price_calls(), 0);
    }

    #[tokio::test]
    async fn test_cache_hits_skip_gateway() {
        let gateway = Arc::new(InMemoryGateway::new().with_price(1, 7, Decimal::ONE));
        let mut prices = resolver(&gateway, None);

        prices.quote(7, Some(1), 1).await;
        prices.quote(7, Some(1), 4).await;
        prices.quote(8, Some(1), 1).await;
        prices.quote(8, Some(1), 1).await;
        assert_eq!(gateway.price_calls(), 2);

        prices.invalidate();
        prices.quote(7, Some(1), 1).await;
        assert_eq!(gateway.price_calls(), 3);
    }

    #[tokio::test]
    async fn test_failures_are_not_cached() {
        let gateway = Arc::new(InMemoryGateway::new().with_price(1, 7, Decimal::ONE));
        let mut prices = resolver(&gateway, None);

        gateway.fail_prices(true);
        let quote = prices.quote(7, Some(1), 1).await;
        assert_eq!(quote.diagnostic.unwrap().kind, LookupKind::Price);
        assert_eq!(quote.unit_price, Decimal::ZERO);

        gateway.fail_prices(false);
        let quote = prices.quote(7, Some(1), 1).await;
        assert!(quote.diagnostic.is_none());
        assert_eq!(quote.unit_price, Decimal::ONE);
        assert_eq!(gateway.price_calls(), 2);
    }

    #[tokio::test]
    async fn test_out_of_range_price_is_rejected() {
        let gateway = Arc::new(
            InMemoryGateway::new()
                .with_price(1, 7, Decimal::new(-500, 2))
                .with_price(1, 8, Decimal::MAX),
        );
        let mut prices = resolver(&gateway, None);

        for product_id in [7, 8] {
            let quote = prices.quote(product_id, Some(1), 2).await;
            assert_eq!(quote.unit_price, Decimal::ZERO);
            assert_eq!(quote.extended_price, Decimal::ZERO);
            assert_eq!(quote.diagnostic.unwrap().kind, LookupKind::PriceInvalid);
        }
    }
}
