//! # Yggdrasil Protocol
//!
//! Wire types for the Yggdrasil authentication protocol.
//!
//! This crate provides:
//! - `User`, `Profile` and `ProfileProperty` records
//! - Texture payloads carried inside the `textures` property
//! - Request and response bodies for every auth/session endpoint
//! - API metadata and the error envelope
//! - Unsigned UUID derivation for offline accounts
//!
//! This is a pure protocol crate with no I/O operations.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod envelope;
mod id;
mod messages;
mod metadata;
mod profile;
mod textures;

pub use envelope::ErrorEnvelope;
pub use id::{offline_uuid, to_unsigned, unsigned_uuid_from_bytes, UnsignedUuid};
pub use messages::{
    Agent, AuthenticateRequest, AuthenticateResponse, HasJoinedQuery, InvalidateRequest,
    JoinRequest, ProfileQuery, RefreshRequest, RefreshResponse, SignoutRequest, ValidateRequest,
};
pub use metadata::{ApiMetadata, FeatureFlag, Links, MetadataResponse};
pub use profile::{Profile, ProfileProperty, PropertyName, PropertyValue, User, UserProperty};
pub use textures::{SkinModel, Texture, TextureMetadata, TextureSet, TextureType, Textures};

/// Maximum number of names resolved by one bulk profile query.
pub const MAX_PROFILE_BATCH: usize = 64;
