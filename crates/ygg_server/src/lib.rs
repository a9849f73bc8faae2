//! # Yggdrasil Server
//!
//! Authentication and session protocol engine compatible with the
//! Mojang Yggdrasil API.
//!
//! This crate provides:
//! - Access token issue, refresh, validation and revocation
//! - The join/hasJoined handshake between game clients and game servers
//! - Profile lookups with SHA1withRSA signed properties
//! - A transport-agnostic dispatcher for the HTTP route table
//!
//! # Architecture
//!
//! The engine keeps no state of its own. Tokens and join sessions live in
//! two [`ExpiringStore`](ygg_store::ExpiringStore) namespaces, either two
//! stores or one shared store split by key prefix; users and
//! profiles come from a [`DataStore`](ygg_store::DataStore). Any HTTP stack
//! can be put in front of [`YggdrasilServer`].
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use ygg_server::{ProtocolEngine, Request, ServerConfig, SigningKeys, YggdrasilServer};
//!
//! let keys = SigningKeys::from_private_pem(&std::fs::read_to_string("private.pem")?)?;
//! let engine = ProtocolEngine::in_memory(ServerConfig::default(), keys, Arc::new(my_accounts));
//! let server = YggdrasilServer::new(engine);
//!
//! let response = server.handle(&Request::get("/"));
//! assert_eq!(response.status, 200);
//! ```
//!
//! # Concurrency
//!
//! Operations interleave at the granularity of single store calls. A refresh
//! issues the new token before revoking the old one, so a concurrent reader
//! may briefly see both as valid, and a failed write leaves the old token
//! usable.

#![deny(unsafe_code)]
#![warn(missing_docs)]
// Production code MUST NOT use panic!/unwrap()/expect()
#![warn(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod codec;
mod config;
mod engine;
mod error;
mod keys;
mod ledger;
mod server;

pub use codec::{normalize, prepare_profile, sign, verify, Signing};
pub use config::{ServerConfig, DEFAULT_SESSION_TTL, DEFAULT_TOKEN_TTL};
pub use engine::{ProtocolEngine, SESSION_NAMESPACE, TOKEN_NAMESPACE};
pub use error::{YggResult, YggdrasilError};
pub use keys::{KeyError, KeyResult, SignatureVerifier, SigningKeys};
pub use ledger::{generate_token, JoinSessionLedger, TokenLedger};
pub use server::{Method, Request, Response, YggdrasilServer};
