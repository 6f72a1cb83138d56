//! Product, stock, and cart line item records.
//!
//! The cart only ever inspects a product's `id`; every other field (title,
//! price, image, and anything else the catalog returns) is carried as opaque
//! payload so it can be rendered or persisted without the cart knowing the
//! catalog's full schema.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ProductId;

/// A product record as returned by the product catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Stable product identifier.
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// Unit price in the store's currency.
    pub price: Decimal,
    /// Product image URL, if the catalog provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Any additional catalog fields, preserved verbatim.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Available stock for a product, as reported by the stock service.
///
/// Read-only from the cart's perspective: the cart never decrements stock,
/// it only checks requested quantities against `amount`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockRecord {
    /// Product the stock figure applies to.
    #[serde(rename = "productId")]
    pub product_id: ProductId,
    /// Maximum purchasable quantity currently available.
    pub amount: u32,
}

/// One product plus its requested quantity within a cart.
///
/// Invariant: `amount >= 1` for as long as the item exists in a cart. An
/// item whose quantity would drop to zero is removed instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// The product this line refers to, flattened into the line record so
    /// the persisted form is the product fields plus `amount`.
    #[serde(flatten)]
    pub product: Product,
    /// Requested quantity.
    pub amount: u32,
}

impl LineItem {
    /// Create a line item for a freshly added product, with quantity 1.
    #[must_use]
    pub const fn new(product: Product) -> Self {
        Self { product, amount: 1 }
    }

    /// The product id this line refers to.
    #[must_use]
    pub const fn product_id(&self) -> ProductId {
        self.product.id
    }

    /// Price of this line (`unit price * amount`).
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.product.price * Decimal::from(self.amount)
    }
}
