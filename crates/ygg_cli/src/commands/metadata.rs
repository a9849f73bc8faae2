//! Metadata command implementation.

use super::read_pem;
use std::path::Path;
use ygg_protocol::MetadataResponse;
use ygg_server::{ServerConfig, SigningKeys};

/// Renders the `GET /` document for the given key and settings.
pub fn render(
    key_path: &Path,
    server_name: Option<String>,
    skin_domains: Vec<String>,
) -> Result<String, Box<dyn std::error::Error>> {
    let keys = SigningKeys::from_private_pem(&read_pem(key_path)?)?;

    let mut config = ServerConfig::default().with_skin_domains(skin_domains);
    if let Some(name) = server_name {
        config.metadata = config.metadata.with_server_name(name);
    }

    let document = MetadataResponse {
        meta: config.metadata,
        skin_domains: config.skin_domains,
        signature_publickey: keys.public_key_pem().to_string(),
    };
    Ok(serde_json::to_string_pretty(&document)?)
}

/// Runs the metadata command.
pub fn run(
    key_path: &Path,
    server_name: Option<String>,
    skin_domains: Vec<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", render(key_path, server_name, skin_domains)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use std::io::Write;
    use tempfile::NamedTempFile;
    use ygg_testkit::TEST_PRIVATE_KEY_PEM;

    #[test]
    fn renders_document_without_skin_domains() {
        let mut key = NamedTempFile::new().unwrap();
        key.write_all(TEST_PRIVATE_KEY_PEM.as_bytes()).unwrap();

        let output = render(key.path(), None, Vec::new()).unwrap();
        let document: Value = serde_json::from_str(&output).unwrap();

        assert_eq!(document["skinDomains"], Value::Array(Vec::new()));
        assert!(document["meta"].is_object());
    }

    #[test]
    fn renders_document() {
        let mut key = NamedTempFile::new().unwrap();
        key.write_all(TEST_PRIVATE_KEY_PEM.as_bytes()).unwrap();

        let output = render(
            key.path(),
            Some("Test Server".into()),
            vec!["textures.example.com".into()],
        )
        .unwrap();
        let document: Value = serde_json::from_str(&output).unwrap();

        assert_eq!(document["meta"]["serverName"], "Test Server");
        assert_eq!(document["skinDomains"][0], "textures.example.com");
        assert!(document["signaturePublickey"]
            .as_str()
            .unwrap()
            .starts_with("-----BEGIN PUBLIC KEY-----"));
    }
}
