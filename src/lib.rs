//! Tradepost - a multi-seller barter marketplace engine.
//!
//! Many independent shops, each anchored to a location, sell listings
//! priced in arbitrary other items and accumulate a revenue pool from
//! sales. The crate provides the transactional core: a multi-index
//! in-memory registry, all-or-nothing purchase execution and a durable
//! SQLite store that survives process restarts.
//!
//! # Architecture
//!
//! - [`domain`] - platform-agnostic types: [`domain::Shop`],
//!   [`domain::Listing`], [`domain::ItemStack`], price vectors.
//! - [`registry`] - the in-memory authority: lifecycle, three lookup
//!   indices, purchases, search and statistics. One async mutex per shop
//!   serializes mutation; indices allow lock-free concurrent reads.
//! - [`ports`] - the traits the core consumes: the persistence gateway,
//!   the external inventory oracle, outcome presentation, world catalog.
//! - [`adapters`] - diesel/SQLite and in-memory stores, the binary item
//!   codec, log-backed presentation.
//! - [`config`] - TOML configuration with logging setup.
//! - [`error`] - error types for the crate.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use tradepost::adapters::{LogPresenter, MemoryShopStore};
//! use tradepost::domain::{Actor, ExactMatcher, Location};
//! use tradepost::registry::ShopRegistry;
//!
//! # async fn demo() -> tradepost::error::Result<()> {
//! let registry = ShopRegistry::new(
//!     MemoryShopStore::new(),
//!     Arc::new(LogPresenter),
//!     Arc::new(ExactMatcher),
//! );
//! let owner = Actor::new("alice");
//! let shop = registry
//!     .create_shop(&owner, Location::new("overworld", 0, 64, 0))
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod ports;
pub mod registry;
