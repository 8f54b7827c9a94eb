//! HTTP client for the console back-office API

use crate::{ClientConfig, ClientError, ClientResult};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use shared::{ApiResponse, PriceListEntry, ProductCredit, ProductInfo};

/// HTTP client for making requests to the console API
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            token: config.token.clone(),
        })
    }

    /// Set the authentication token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Get the current token
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Build authorization header value
    fn auth_header(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {}", t))
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Make a GET request and unwrap the response envelope
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let url = self.url(path);
        let mut request = self.client.get(&url);

        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }

        tracing::debug!(%url, "GET");
        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Handle the HTTP response
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await?;
            // Prefer the structured envelope when the server sent one
            if let Ok(envelope) = serde_json::from_str::<ApiResponse<serde_json::Value>>(&text)
                && !envelope.is_success()
                && let Err(err) = envelope.into_result()
                && !matches!(err.code, shared::ErrorCode::Unknown)
            {
                return Err(ClientError::Api(err));
            }
            return match status {
                StatusCode::UNAUTHORIZED => Err(ClientError::Unauthorized),
                StatusCode::FORBIDDEN => Err(ClientError::Forbidden(text)),
                StatusCode::NOT_FOUND => Err(ClientError::NotFound(text)),
                StatusCode::BAD_REQUEST => Err(ClientError::Validation(text)),
                _ => Err(ClientError::Internal(text)),
            };
        }

        let envelope: ApiResponse<T> = response
            .json()
            .await
            .map_err(|e| ClientError::InvalidResponse(e.to_string()))?;
        envelope.into_result().map_err(ClientError::Api)
    }

    // ========== Subscription API ==========

    /// Remaining credits of a subscription for the current cycle
    pub async fn subscription_credits(&self, subscription_id: i64) -> ClientResult<Vec<ProductCredit>> {
        self.get(&format!("/api/subscriptions/{}/credits", subscription_id))
            .await
    }

    // ========== Price List API ==========

    /// Price of one product in a price list, `None` when the list has no entry
    pub async fn price_list_entry(
        &self,
        price_list_id: i64,
        product_id: i64,
    ) -> ClientResult<Option<PriceListEntry>> {
        let path = format!(
            "/api/price-lists/{}/products/{}",
            price_list_id, product_id
        );
        match self.get::<PriceListEntry>(&path).await {
            Ok(entry) => Ok(Some(entry)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    // ========== Product API ==========

    /// Product details for line enrichment
    pub async fn product(&self, product_id: i64) -> ClientResult<ProductInfo> {
        self.get(&format!("/api/products/{}", product_id)).await
    }
}
