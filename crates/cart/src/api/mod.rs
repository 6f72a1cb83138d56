//! Commerce API collaborators.
//!
//! The cart consumes two read-only endpoints:
//!
//! - `GET stock/{productId}` - maximum purchasable quantity for a product
//! - `GET products/{productId}` - product metadata by id
//!
//! Both are expressed as traits so tests (and alternative backends) can swap
//! in fakes; [`CommerceClient`] is the `reqwest`-backed implementation of
//! both, with product metadata cached via `moka` (5-minute TTL). Stock is
//! never cached - quantity checks must see a fresh figure.

mod client;

pub use client::CommerceClient;

use async_trait::async_trait;
use shopcart_core::{Product, ProductId, StockRecord};
use thiserror::Error;

/// Errors that can occur when calling the commerce API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Request URL could not be built.
    #[error("Invalid request URL: {0}")]
    Url(#[from] url::ParseError),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Rate limited by the API.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// Non-success HTTP status.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },
}

/// Reports available stock per product.
#[async_trait]
pub trait StockService: Send + Sync {
    /// Query the quantity currently available for `product_id`.
    async fn stock_for(&self, product_id: ProductId) -> Result<StockRecord, ApiError>;
}

/// Resolves product metadata by id.
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    /// Fetch the product record for `product_id`.
    async fn product(&self, product_id: ProductId) -> Result<Product, ApiError>;
}
