//! In-memory gateway for tests and offline embedding

use super::{PriceListGateway, ProductGateway, SubscriptionGateway};
use async_trait::async_trait;
use parking_lot::RwLock;
use rust_decimal::Decimal;
use shared::{AppError, AppResult, ErrorCode, ProductCredit, ProductInfo};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Default)]
struct State {
    credits: HashMap<i64, Vec<ProductCredit>>,
    prices: HashMap<(i64, i64), Decimal>,
    products: HashMap<i64, ProductInfo>,
    fail_credits: bool,
    fail_prices: bool,
    fail_products: bool,
}

/// Serves credits, prices and products from maps
///
/// Each lookup family can be switched to fail, to exercise the
/// degrade-not-fail paths.
#[derive(Default)]
pub struct InMemoryGateway {
    state: RwLock<State>,
    price_calls: AtomicUsize,
}

impl InMemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_credits(self, subscription_id: i64, credits: Vec<ProductCredit>) -> Self {
        self.set_credits(subscription_id, credits);
        self
    }

    pub fn with_price(self, price_list_id: i64, product_id: i64, unit_price: Decimal) -> Self {
        self.set_price(price_list_id, product_id, unit_price);
        self
    }

    pub fn with_product(self, product: ProductInfo) -> Self {
        self.state.write().products.insert(product.id, product);
        self
    }

    /// Replace the credits the "server" reports for a subscription
    pub fn set_credits(&self, subscription_id: i64, credits: Vec<ProductCredit>) {
        self.state.write().credits.insert(subscription_id, credits);
    }

    /// Replace a price list entry
    pub fn set_price(&self, price_list_id: i64, product_id: i64, unit_price: Decimal) {
        self.state
            .write()
            .prices
            .insert((price_list_id, product_id), unit_price);
    }

    pub fn fail_credits(&self, fail: bool) {
        self.state.write().fail_credits = fail;
    }

    pub fn fail_prices(&self, fail: bool) {
        self.state.write().fail_prices = fail;
    }

    pub fn fail_products(&self, fail: bool) {
        self.state.write().fail_products = fail;
    }

    /// Number of price lookups that reached this gateway
    pub fn price_calls(&self) -> usize {
        self.price_calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl SubscriptionGateway for InMemoryGateway {
    async fn credits(&self, subscription_id: i64) -> AppResult<Vec<ProductCredit>> {
        let state = self.state.read();
        if state.fail_credits {
            return Err(AppError::network("credit service unreachable"));
        }
        state
            .credits
            .get(&subscription_id)
            .cloned()
            .ok_or_else(|| AppError::new(ErrorCode::SubscriptionNotFound))
    }
}

#[async_trait]
impl PriceListGateway for InMemoryGateway {
    async fn unit_price(&self, price_list_id: i64, product_id: i64) -> AppResult<Option<Decimal>> {
        self.price_calls.fetch_add(1, Ordering::Relaxed);
        let state = self.state.read();
        if state.fail_prices {
            return Err(AppError::network("price service unreachable"));
        }
        Ok(state.prices.get(&(price_list_id, product_id)).copied())
    }
}

#[async_trait]
impl ProductGateway for InMemoryGateway {
    async fn product(&self, product_id: i64) -> AppResult<ProductInfo> {
        let state = self.state.read();
        if state.fail_products {
            return Err(AppError::network("product service unreachable"));
        }
        state
            .products
            .get(&product_id)
            .cloned()
            .ok_or_else(|| AppError::new(ErrorCode::ProductNotFound))
    }
}
