//! Commerce API client implementation.
//!
//! Plain JSON-over-HTTP with `reqwest`. Product metadata is cached using
//! `moka` (5-minute TTL); stock lookups always hit the API.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use shopcart_core::{Product, ProductId, StockRecord};

use super::{ApiError, ProductCatalog, StockService};
use crate::config::CartConfig;

/// Client for the commerce API.
///
/// Provides product and stock lookups. Products are cached for 5 minutes;
/// stock is not cached because availability checks must be fresh.
#[derive(Clone)]
pub struct CommerceClient {
    inner: Arc<CommerceClientInner>,
}

struct CommerceClientInner {
    client: reqwest::Client,
    base_url: Url,
    token: Option<SecretString>,
    products: Cache<ProductId, Product>,
}

impl CommerceClient {
    /// Create a new commerce API client.
    #[must_use]
    pub fn new(config: &CartConfig) -> Self {
        let products = Cache::builder()
            .max_capacity(1000)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        Self {
            inner: Arc::new(CommerceClientInner {
                client: reqwest::Client::new(),
                base_url: normalize_base(&config.api_url),
                token: config.api_token.clone(),
                products,
            }),
        }
    }

    /// Execute a GET request and decode the JSON response.
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.inner.base_url.join(path)?;

        let mut request = self.inner.client.get(url);
        if let Some(token) = &self.inner.token {
            request = request.bearer_auth(token.expose_secret());
        }

        let response = request.send().await?;
        let status = response.status();

        // Check for rate limiting
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(ApiError::RateLimited(retry_after));
        }

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(path.to_string()));
        }

        // Get response body as text first for better error diagnostics
        let response_text = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %response_text.chars().take(500).collect::<String>(),
                "Commerce API returned non-success status"
            );
            return Err(ApiError::Status {
                status: status.as_u16(),
                body: response_text.chars().take(200).collect(),
            });
        }

        serde_json::from_str(&response_text).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %response_text.chars().take(500).collect::<String>(),
                "Failed to parse commerce API response"
            );
            ApiError::Parse(e)
        })
    }
}

#[async_trait::async_trait]
impl StockService for CommerceClient {
    /// Query available stock for a product.
    ///
    /// Never served from cache: the cart's quantity checks rely on a fresh
    /// figure.
    #[instrument(skip(self), fields(product_id = %product_id))]
    async fn stock_for(&self, product_id: ProductId) -> Result<StockRecord, ApiError> {
        self.get_json(&format!("stock/{product_id}")).await
    }
}

#[async_trait::async_trait]
impl ProductCatalog for CommerceClient {
    /// Fetch product metadata by id, serving from the cache when possible.
    #[instrument(skip(self), fields(product_id = %product_id))]
    async fn product(&self, product_id: ProductId) -> Result<Product, ApiError> {
        if let Some(product) = self.inner.products.get(&product_id).await {
            debug!("Cache hit for product");
            return Ok(product);
        }

        let product: Product = self.get_json(&format!("products/{product_id}")).await?;

        self.inner
            .products
            .insert(product_id, product.clone())
            .await;

        Ok(product)
    }
}

/// Ensure the base URL path ends with a slash so `Url::join` appends the
/// endpoint path instead of replacing the last segment.
fn normalize_base(base: &Url) -> Url {
    if base.path().ends_with('/') {
        return base.clone();
    }

    let mut normalized = base.clone();
    normalized.set_path(&format!("{}/", base.path()));
    normalized
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base_appends_slash() {
        let base = Url::parse("http://localhost:3333/api").unwrap();
        let normalized = normalize_base(&base);
        assert_eq!(normalized.as_str(), "http://localhost:3333/api/");

        // Endpoint paths now join under the API root
        let joined = normalized.join("stock/1").unwrap();
        assert_eq!(joined.as_str(), "http://localhost:3333/api/stock/1");
    }

    #[test]
    fn test_normalize_base_keeps_existing_slash() {
        let base = Url::parse("http://localhost:3333/").unwrap();
        assert_eq!(normalize_base(&base), base);
    }

    #[test]
    fn test_api_error_display() {
        let err = ApiError::NotFound("products/123".to_string());
        assert_eq!(err.to_string(), "Not found: products/123");

        let err = ApiError::RateLimited(60);
        assert_eq!(err.to_string(), "Rate limited, retry after 60 seconds");
    }
}
