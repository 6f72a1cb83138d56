//! Shopcart Core - Shared types library.
//!
//! This crate provides common types used across all Shopcart components:
//! - `cart` - Cart state management over a commerce API
//! - `cli` - Command-line tool for driving a cart from a terminal
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no storage.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype product IDs plus the product, stock, and line item records

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
