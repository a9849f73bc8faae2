//! # Yggdrasil Store
//!
//! Persistence contracts consumed by the Yggdrasil protocol engine.
//!
//! The engine keeps no state of its own. Everything durable lives behind two
//! traits defined here:
//!
//! - [`ExpiringStore`] - a key-value store with per-entry time-to-live, used
//!   for access tokens and join sessions
//! - [`DataStore`] - read access to users and profiles, plus profile selection
//!
//! ## Design Principles
//!
//! - Stores are shared across concurrent requests, so every method takes `&self`
//! - Each individual operation is atomic; no cross-key transactions are offered
//! - Absence is a value (`Ok(None)`), never an error
//! - Expiry is passive: the store hides and evicts stale entries
//!
//! ## Example
//!
//! ```rust
//! use std::time::Duration;
//! use ygg_store::{ExpiringStore, MemoryStore};
//!
//! let store = MemoryStore::new();
//! store.set("token", "alice", Some(Duration::from_secs(60))).unwrap();
//! assert_eq!(store.get("token").unwrap().as_deref(), Some("alice"));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod backend;
mod data;
mod error;
mod memory;
mod namespaced;

pub use backend::ExpiringStore;
pub use data::DataStore;
pub use error::{StoreError, StoreResult};
pub use memory::{MemoryStore, DEFAULT_SWEEP_INTERVAL};
pub use namespaced::NamespacedStore;
