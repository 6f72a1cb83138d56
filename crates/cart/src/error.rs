//! Cart error taxonomy.
//!
//! `CartError` never crosses the public operation boundary: the store's
//! public methods map every error to a single user-facing notice and return
//! nothing. The enum exists so the internal operation paths can propagate
//! failures with `?` and so tests can assert on exact failure causes.

use thiserror::Error;

use shopcart_core::ProductId;

use crate::api::ApiError;
use crate::persist::PersistError;

/// Errors a cart operation can run into internally.
#[derive(Debug, Error)]
pub enum CartError {
    /// Requested quantity exceeds what the stock service reports.
    #[error(
        "insufficient stock for product {product_id}: requested {requested}, available {available}"
    )]
    OutOfStock {
        product_id: ProductId,
        requested: u32,
        available: u32,
    },

    /// Target product is not in the cart (remove path only).
    #[error("product {0} is not in the cart")]
    ItemNotFound(ProductId),

    /// Commerce API call failed.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Persistence sink read or write failed.
    #[error("persistence error: {0}")]
    Persist(#[from] PersistError),

    /// Cart payload could not be serialized.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_stock_display() {
        let err = CartError::OutOfStock {
            product_id: ProductId::new(1),
            requested: 3,
            available: 2,
        };
        assert_eq!(
            err.to_string(),
            "insufficient stock for product 1: requested 3, available 2"
        );
    }

    #[test]
    fn test_item_not_found_display() {
        let err = CartError::ItemNotFound(ProductId::new(9));
        assert_eq!(err.to_string(), "product 9 is not in the cart");
    }
}
