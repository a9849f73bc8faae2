//! # Yggdrasil Testkit
//!
//! Test utilities for the Yggdrasil server crates.
//!
//! This crate provides:
//! - Fixed RSA key material for signing tests
//! - An in-memory [`DataStore`](ygg_store::DataStore) with account fixtures
//! - Stores that fail always or on demand, for error-path tests
//! - Property-based test generators using proptest
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ygg_testkit::prelude::*;
//!
//! let data = MemoryDataStore::new()
//!     .with_account(Account::offline("alice", "secret").with_profile("alice_alt"));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;
pub mod keys;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
    pub use crate::keys::*;
}

pub use fixtures::*;
pub use generators::*;
pub use keys::*;
