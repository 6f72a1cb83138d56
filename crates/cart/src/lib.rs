//! Shopcart - cart state management over a commerce API.
//!
//! This crate owns the state of a shopping session: an ordered list of line
//! items, unique by product id, kept in memory and mirrored to a key-value
//! persistence sink on every successful mutation. Stock availability is
//! checked against the commerce API before any quantity change.
//!
//! # Architecture
//!
//! - [`store::CartStore`] holds the cart snapshot and performs all mutations
//! - [`api`] defines the `StockService` and `ProductCatalog` seams plus the
//!   `reqwest`-backed client implementing both
//! - [`persist`] defines the key-value `Persister` seam with file-backed and
//!   in-memory stores
//! - [`notify`] carries user-facing failure notices out of the store; cart
//!   operations never return errors to their caller
//!
//! # Example
//!
//! ```rust,ignore
//! use shopcart::api::CommerceClient;
//! use shopcart::config::CartConfig;
//! use shopcart::notify::TracingNotifier;
//! use shopcart::persist::FileStore;
//! use shopcart::store::CartStore;
//! use shopcart_core::ProductId;
//!
//! let config = CartConfig::from_env()?;
//! let client = CommerceClient::new(&config);
//! let store = CartStore::load(
//!     client.clone(),
//!     client,
//!     FileStore::new(&config.data_dir),
//!     TracingNotifier,
//!     config.storage_key.as_str(),
//! );
//!
//! store.add_product(ProductId::new(1)).await;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod error;
pub mod notify;
pub mod persist;
pub mod store;

pub use error::CartError;
pub use store::CartStore;
