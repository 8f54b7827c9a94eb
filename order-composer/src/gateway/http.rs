//! Gateways backed by the console REST API

use super::{PriceListGateway, ProductGateway, SubscriptionGateway};
use crate::core::Config;
use async_trait::async_trait;
use console_client::HttpClient;
use rust_decimal::Decimal;
use shared::{AppResult, ProductCredit, ProductInfo};

/// Adapts [`HttpClient`] to all three gateway traits
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: HttpClient,
}

impl HttpGateway {
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    pub fn from_config(config: &Config) -> AppResult<Self> {
        let client = config.client_config().build_http_client()?;
        Ok(Self::new(client))
    }
}

#[async_trait]
impl SubscriptionGateway for HttpGateway {
    async fn credits(&self, subscription_id: i64) -> AppResult<Vec<ProductCredit>> {
        Ok(self.client.subscription_credits(subscription_id).await?)
    }
}

#[async_trait]
impl PriceListGateway for HttpGateway {
    async fn unit_price(&self, price_list_id: i64, product_id: i64) -> AppResult<Option<Decimal>> {
        let entry = self
            .client
            .price_list_entry(price_list_id, product_id)
            .await?;
        Ok(entry.map(|e| e.unit_price))
    }
}

#[async_trait]
impl ProductGateway for HttpGateway {
    async fn product(&self, product_id: i64) -> AppResult<ProductInfo> {
        Ok(self.client.product(product_id).await?)
    }
}
