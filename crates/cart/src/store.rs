//! Cart state management.
//!
//! [`CartStore`] owns the cart for one shopping session: an ordered list of
//! line items, unique by product id. Every successful mutation produces a
//! whole new snapshot, published to observers and written to the persistence
//! sink under one storage key. Observers never see a partially updated cart.
//!
//! Operations are expected to be serialized by the caller (one user action
//! at a time). On a multi-threaded host the snapshot swap and persistence
//! write run as one critical section; the stock check, however, is computed
//! against the snapshot taken before the stock query, so a concurrent stock
//! change can make the check momentarily stale. That weak guarantee is
//! inherent to checking stock over the network and is accepted here.

use std::sync::{Mutex, PoisonError};

use rust_decimal::Decimal;
use tokio::sync::watch;
use tracing::instrument;

use shopcart_core::{LineItem, ProductId};

use crate::api::{ProductCatalog, StockService};
use crate::error::CartError;
use crate::notify::{Notice, Notifier};
use crate::persist::Persister;

/// Cart state for one shopping session.
///
/// Generic over its collaborators so hosts can inject real HTTP-backed
/// services while tests inject in-memory fakes.
pub struct CartStore<S, C, P, N> {
    stock: S,
    catalog: C,
    persister: P,
    notifier: N,
    storage_key: String,
    cart: Mutex<Vec<LineItem>>,
    publisher: watch::Sender<Vec<LineItem>>,
}

impl<S, C, P, N> CartStore<S, C, P, N>
where
    S: StockService,
    C: ProductCatalog,
    P: Persister,
    N: Notifier,
{
    /// Construct a store, restoring the cart from the persistence sink.
    ///
    /// An absent key yields an empty cart. A stored payload that cannot be
    /// read or parsed also yields an empty cart, with a warning logged - a
    /// corrupt sink must not take the whole session down.
    pub fn load(
        stock: S,
        catalog: C,
        persister: P,
        notifier: N,
        storage_key: impl Into<String>,
    ) -> Self {
        let storage_key = storage_key.into();

        let initial: Vec<LineItem> = match persister.get(&storage_key) {
            Ok(Some(payload)) => match serde_json::from_str(&payload) {
                Ok(cart) => cart,
                Err(e) => {
                    tracing::warn!(error = %e, "Stored cart is not a valid cart payload, starting empty");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read stored cart, starting empty");
                Vec::new()
            }
        };

        let (publisher, _) = watch::channel(initial.clone());

        Self {
            stock,
            catalog,
            persister,
            notifier,
            storage_key,
            cart: Mutex::new(initial),
            publisher,
        }
    }

    // =========================================================================
    // Read access
    // =========================================================================

    /// The current cart snapshot.
    #[must_use]
    pub fn cart(&self) -> Vec<LineItem> {
        self.cart
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Subscribe to cart snapshots. Each published value is a whole cart.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Vec<LineItem>> {
        self.publisher.subscribe()
    }

    /// Total units across all lines (the cart badge figure).
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.cart().iter().map(|line| line.amount).sum()
    }

    /// Sum of `price * amount` across all lines.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.cart().iter().map(LineItem::line_total).sum()
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Add one unit of a product to the cart.
    ///
    /// Checks fresh stock first; a product already in the cart has its
    /// quantity incremented, otherwise the catalog is queried and a new line
    /// is appended with quantity 1. Failures never propagate to the caller:
    /// each produces exactly one notice and leaves the cart as it was.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn add_product(&self, product_id: ProductId) {
        if let Err(err) = self.try_add_product(product_id).await {
            tracing::warn!(error = %err, "Failed to add product");
            let notice = match err {
                CartError::OutOfStock { .. } => Notice::OutOfStock,
                _ => Notice::AddFailed,
            };
            self.notifier.notify(notice);
        }
    }

    /// Remove a product's line from the cart entirely.
    ///
    /// Removing a product that is not in the cart reports a notice and
    /// changes nothing. No network calls.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub fn remove_product(&self, product_id: ProductId) {
        if let Err(err) = self.try_remove_product(product_id) {
            tracing::warn!(error = %err, "Failed to remove product");
            let notice = match err {
                CartError::ItemNotFound(_) => Notice::ItemNotFound,
                _ => Notice::RemoveFailed,
            };
            self.notifier.notify(notice);
        }
    }

    /// Set a product's quantity to exactly `amount`.
    ///
    /// A requested amount of zero or less is a strict no-op: no notice, no
    /// write. Quantities are driven to zero via [`Self::remove_product`],
    /// never through here.
    #[instrument(skip(self), fields(product_id = %product_id, amount))]
    pub async fn update_product_amount(&self, product_id: ProductId, amount: i64) {
        if amount <= 0 {
            return;
        }
        let requested = u32::try_from(amount).unwrap_or(u32::MAX);

        if let Err(err) = self.try_update_amount(product_id, requested).await {
            tracing::warn!(error = %err, "Failed to update product quantity");
            let notice = match err {
                CartError::OutOfStock { .. } => Notice::OutOfStock,
                _ => Notice::UpdateFailed,
            };
            self.notifier.notify(notice);
        }
    }

    /// Empty the cart and persist the empty snapshot.
    #[instrument(skip(self))]
    pub fn clear(&self) {
        if let Err(err) = self.commit(Vec::new()) {
            tracing::warn!(error = %err, "Failed to clear cart");
            self.notifier.notify(Notice::RemoveFailed);
        }
    }

    // =========================================================================
    // Operation internals
    // =========================================================================

    async fn try_add_product(&self, product_id: ProductId) -> Result<(), CartError> {
        let stock = self.stock.stock_for(product_id).await?;

        let current = self.cart();
        let existing = current
            .iter()
            .find(|line| line.product_id() == product_id)
            .map(|line| line.amount);
        let desired = existing.map_or(1, |amount| amount + 1);

        if stock.amount < desired {
            return Err(CartError::OutOfStock {
                product_id,
                requested: desired,
                available: stock.amount,
            });
        }

        let next: Vec<LineItem> = if existing.is_some() {
            // Increment in place, order preserved
            current
                .into_iter()
                .map(|mut line| {
                    if line.product_id() == product_id {
                        line.amount += 1;
                    }
                    line
                })
                .collect()
        } else {
            // New product: resolve metadata and append with quantity 1
            let product = self.catalog.product(product_id).await?;
            let mut next = current;
            next.push(LineItem::new(product));
            next
        };

        self.commit(next)
    }

    fn try_remove_product(&self, product_id: ProductId) -> Result<(), CartError> {
        let current = self.cart();

        if !current.iter().any(|line| line.product_id() == product_id) {
            return Err(CartError::ItemNotFound(product_id));
        }

        let next = current
            .into_iter()
            .filter(|line| line.product_id() != product_id)
            .collect();

        self.commit(next)
    }

    async fn try_update_amount(&self, product_id: ProductId, amount: u32) -> Result<(), CartError> {
        let stock = self.stock.stock_for(product_id).await?;

        if stock.amount < amount {
            return Err(CartError::OutOfStock {
                product_id,
                requested: amount,
                available: stock.amount,
            });
        }

        // A cart without the target id is republished and persisted as-is
        // rather than reported as missing; remove_product is the only path
        // that reports absence.
        let next = self
            .cart()
            .into_iter()
            .map(|mut line| {
                if line.product_id() == product_id {
                    line.amount = amount;
                }
                line
            })
            .collect();

        self.commit(next)
    }

    /// Swap in a new snapshot, publish it, and persist it.
    ///
    /// Runs as one critical section so concurrent writers on a
    /// multi-threaded host observe whole snapshots only.
    fn commit(&self, next: Vec<LineItem>) -> Result<(), CartError> {
        let payload = serde_json::to_string(&next)?;

        let mut guard = self.cart.lock().unwrap_or_else(PoisonError::into_inner);
        *guard = next.clone();
        self.publisher.send_replace(next);
        self.persister.put(&self.storage_key, &payload)?;

        Ok(())
    }
}
