//! Profile property normalization and signing.
//!
//! A property value leaves the server as a string. Structured values are
//! rendered to compact JSON and base64-encoded; the signature, when one is
//! attached, covers the UTF-8 bytes of that final string.

use crate::error::{YggResult, YggdrasilError};
use crate::keys::{SignatureVerifier, SigningKeys};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use ygg_protocol::{Profile, ProfileProperty, PropertyValue};

/// Whether outgoing properties carry signatures.
#[derive(Debug, Clone, Copy)]
pub enum Signing<'a> {
    /// Strip any signature.
    Unsigned,
    /// Sign every property with these keys.
    Signed(&'a SigningKeys),
}

/// Rewrites `property.value` into its wire string.
///
/// Strings pass through untouched; anything else becomes
/// `base64(json(value))`. Idempotent.
pub fn normalize(property: &mut ProfileProperty) {
    let encoded = match &property.value {
        PropertyValue::Encoded(_) => return,
        PropertyValue::Structured(serde_json::Value::String(s)) => s.clone(),
        PropertyValue::Structured(value) => STANDARD.encode(value.to_string()),
    };
    property.value = PropertyValue::Encoded(encoded);
}

/// Normalizes `property` and attaches a signature over its value.
///
/// # Errors
///
/// Returns an internal error if the key cannot produce a signature.
pub fn sign(property: &mut ProfileProperty, keys: &SigningKeys) -> YggResult<()> {
    normalize(property);
    let value = property.value.as_encoded().unwrap_or_default();
    let signature = keys.sign(value.as_bytes()).map_err(|e| {
        tracing::error!(error = %e, "property signing failed");
        YggdrasilError::internal()
    })?;
    property.signature = Some(signature);
    Ok(())
}

/// Returns true if `property` carries a valid signature for its value.
///
/// Unsigned or unnormalized properties never verify.
pub fn verify(property: &ProfileProperty, verifier: &SignatureVerifier) -> bool {
    match (&property.value, &property.signature) {
        (PropertyValue::Encoded(value), Some(signature)) => {
            verifier.verify(value.as_bytes(), signature)
        }
        _ => false,
    }
}

/// Prepares every property of `profile` for the wire.
///
/// A profile without properties gets an empty list, since every endpoint
/// that calls this promises a `properties` field.
///
/// # Errors
///
/// Returns an internal error if signing fails.
pub fn prepare_profile(profile: &mut Profile, signing: Signing<'_>) -> YggResult<()> {
    for property in profile.properties.get_or_insert_with(Vec::new) {
        match signing {
            Signing::Unsigned => {
                normalize(property);
                property.signature = None;
            }
            Signing::Signed(keys) => sign(property, keys)?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;
    use ygg_protocol::PropertyName;
    use ygg_testkit::{json_value_strategy, TEST_PRIVATE_KEY_PEM, TEST_PUBLIC_KEY_PEM};

    fn keys() -> SigningKeys {
        SigningKeys::from_pem(TEST_PRIVATE_KEY_PEM, TEST_PUBLIC_KEY_PEM).unwrap()
    }

    fn decode(property: &ProfileProperty) -> serde_json::Value {
        let text = property.value.as_encoded().unwrap();
        serde_json::from_slice(&STANDARD.decode(text).unwrap()).unwrap()
    }

    #[test]
    fn normalize_leaves_strings_alone() {
        let mut property = ProfileProperty::new(PropertyName::Textures, "already");
        normalize(&mut property);
        assert_eq!(property.value, PropertyValue::Encoded("already".into()));
    }

    #[test]
    fn normalize_unwraps_json_strings() {
        let mut property = ProfileProperty::new(PropertyName::Textures, json!("plain"));
        normalize(&mut property);
        assert_eq!(property.value, PropertyValue::Encoded("plain".into()));
    }

    #[test]
    fn normalize_encodes_objects() {
        let mut property = ProfileProperty::new(PropertyName::Textures, json!({"a": 1}));
        normalize(&mut property);
        assert_eq!(property.value, PropertyValue::Encoded("eyJhIjoxfQ==".into()));
    }

    #[test]
    fn normalize_is_idempotent() {
        let mut property = ProfileProperty::new(PropertyName::Textures, json!([1, 2, 3]));
        normalize(&mut property);
        let once = property.clone();
        normalize(&mut property);
        assert_eq!(property, once);
    }

    #[test]
    fn sign_normalizes_first() {
        let keys = keys();
        let mut property = ProfileProperty::new(PropertyName::Textures, json!({"a": 1}));
        sign(&mut property, &keys).unwrap();

        assert_eq!(property.value.as_encoded(), Some("eyJhIjoxfQ=="));
        assert!(verify(&property, keys.verifier()));
    }

    #[test]
    fn verify_rejects_tampered_value() {
        let keys = keys();
        let mut property = ProfileProperty::new(PropertyName::Textures, "value");
        sign(&mut property, &keys).unwrap();

        property.value = PropertyValue::Encoded("other".into());
        assert!(!verify(&property, keys.verifier()));
    }

    #[test]
    fn prepare_unsigned_strips_signatures() {
        let mut profile = Profile::offline("alice").with_property(ProfileProperty {
            name: PropertyName::Textures,
            value: PropertyValue::Structured(json!({"a": 1})),
            signature: Some("stale".into()),
        });

        prepare_profile(&mut profile, Signing::Unsigned).unwrap();

        let property = &profile.properties.as_ref().unwrap()[0];
        assert!(property.signature.is_none());
        assert_eq!(property.value.as_encoded(), Some("eyJhIjoxfQ=="));
    }

    #[test]
    fn prepare_signed_signs_every_property() {
        let keys = keys();
        let mut profile = Profile::offline("alice")
            .with_property(ProfileProperty::new(PropertyName::Textures, json!({"a": 1})))
            .with_property(ProfileProperty::new(
                PropertyName::UploadableTextures,
                "skin,cape",
            ));

        prepare_profile(&mut profile, Signing::Signed(&keys)).unwrap();

        for property in profile.properties.as_ref().unwrap() {
            assert!(verify(property, keys.verifier()));
        }
    }

    #[test]
    fn prepare_fills_missing_properties() {
        let mut profile = Profile::offline("alice");
        prepare_profile(&mut profile, Signing::Unsigned).unwrap();
        assert_eq!(profile.properties, Some(vec![]));
    }

    proptest! {
        #[test]
        fn normalize_round_trips(value in json_value_strategy()) {
            let mut property = ProfileProperty::new(PropertyName::Textures, value.clone());
            normalize(&mut property);
            prop_assert_eq!(decode(&property), value);
        }
    }
}
