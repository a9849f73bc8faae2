//! Unsigned UUIDs.
//!
//! The protocol renders every UUID as 32 lowercase hex characters with no
//! separators. Accounts without a natural UUID (offline players) get a
//! name-based version 3 UUID computed the same way as
//! `java.util.UUID#nameUUIDFromBytes`.

use md5::{Digest, Md5};
use uuid::{Builder, Uuid};

/// A UUID rendered without separator characters.
pub type UnsignedUuid = String;

/// Derives an unsigned UUID from arbitrary bytes.
///
/// The MD5 digest of `input` is stamped with version 3 and the IETF variant.
pub fn unsigned_uuid_from_bytes(input: impl AsRef<[u8]>) -> UnsignedUuid {
    let digest = Md5::digest(input.as_ref());
    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&digest);

    Builder::from_md5_bytes(bytes)
        .into_uuid()
        .simple()
        .to_string()
}

/// Returns the UUID an offline-mode server assigns to `name`.
pub fn offline_uuid(name: &str) -> UnsignedUuid {
    unsigned_uuid_from_bytes(format!("OfflinePlayer:{name}"))
}

/// Normalizes a UUID in any accepted textual form to its unsigned rendering.
///
/// Returns `None` if `input` is not a UUID.
pub fn to_unsigned(input: &str) -> Option<UnsignedUuid> {
    Uuid::try_parse(input)
        .ok()
        .map(|uuid| uuid.simple().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn offline_uuid_matches_vanilla_server() {
        assert_eq!(offline_uuid("Notch"), "b50ad385829d3141a2167e7d7539ba7f");
    }

    #[test]
    fn to_unsigned_strips_hyphens() {
        assert_eq!(
            to_unsigned("B50AD385-829D-3141-A216-7E7D7539BA7F").as_deref(),
            Some("b50ad385829d3141a2167e7d7539ba7f")
        );
        assert_eq!(
            to_unsigned("b50ad385829d3141a2167e7d7539ba7f").as_deref(),
            Some("b50ad385829d3141a2167e7d7539ba7f")
        );
        assert!(to_unsigned("not-a-uuid").is_none());
    }

    proptest! {
        #[test]
        fn derived_uuid_is_version_3_ietf(input in prop::collection::vec(any::<u8>(), 0..64)) {
            let id = unsigned_uuid_from_bytes(&input);
            prop_assert_eq!(id.len(), 32);
            prop_assert!(id.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));

            let parsed = Uuid::parse_str(&id).unwrap();
            prop_assert_eq!(parsed.get_version_num(), 3);
            prop_assert_eq!(parsed.get_variant(), uuid::Variant::RFC4122);
        }
    }
}
