//! Sign command implementation.

use super::read_pem;
use serde_json::Value;
use std::path::Path;
use ygg_protocol::{ProfileProperty, PropertyName, PropertyValue};
use ygg_server::SigningKeys;

/// Builds and signs a property, returning it as JSON.
pub fn render(
    key_path: &Path,
    name: &str,
    value: &str,
    json: bool,
) -> Result<String, Box<dyn std::error::Error>> {
    let keys = SigningKeys::from_private_pem(&read_pem(key_path)?)?;
    let name: PropertyName = serde_json::from_value(Value::String(name.to_string()))
        .map_err(|_| format!("Unknown property name: {name}"))?;
    let value = if json {
        PropertyValue::Structured(serde_json::from_str(value)?)
    } else {
        PropertyValue::Encoded(value.to_string())
    };

    let mut property = ProfileProperty::new(name, value);
    ygg_server::sign(&mut property, &keys)?;
    tracing::debug!(?name, "signed property");

    Ok(serde_json::to_string_pretty(&property)?)
}

/// Runs the sign command.
pub fn run(
    key_path: &Path,
    name: &str,
    value: &str,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", render(key_path, name, value, json)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;
    use ygg_server::SignatureVerifier;
    use ygg_testkit::{TEST_PRIVATE_KEY_PEM, TEST_PUBLIC_KEY_PEM};

    fn key_file() -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(TEST_PRIVATE_KEY_PEM.as_bytes()).unwrap();
        file
    }

    fn signed(output: &str) -> ProfileProperty {
        serde_json::from_str(output).unwrap()
    }

    #[test]
    fn signs_json_value() {
        let key = key_file();
        let output = render(key.path(), "textures", r#"{"a":1}"#, true).unwrap();
        let property = signed(&output);

        assert_eq!(property.value.as_encoded(), Some("eyJhIjoxfQ=="));
        let verifier = SignatureVerifier::from_pem(TEST_PUBLIC_KEY_PEM).unwrap();
        assert!(ygg_server::verify(&property, &verifier));
    }

    #[test]
    fn signs_verbatim_value() {
        let key = key_file();
        let output = render(key.path(), "uploadableTextures", "skin,cape", false).unwrap();
        let property = signed(&output);

        assert_eq!(property.name, PropertyName::UploadableTextures);
        assert_eq!(property.value.as_encoded(), Some("skin,cape"));
        assert!(property.signature.is_some());
    }

    #[test]
    fn rejects_bad_input() {
        let key = key_file();
        assert!(render(key.path(), "cape", "x", false).is_err());
        assert!(render(key.path(), "textures", "{not json", true).is_err());
        assert!(render(Path::new("/nonexistent/key.pem"), "textures", "x", false).is_err());
    }
}
