//! Verify command implementation.

use super::read_pem;
use std::path::Path;
use ygg_server::SignatureVerifier;

/// Returns true if `signature` is valid for `value` under the key at `key_path`.
pub fn check(
    key_path: &Path,
    value: &str,
    signature: &str,
) -> Result<bool, Box<dyn std::error::Error>> {
    let verifier = SignatureVerifier::from_pem(&read_pem(key_path)?)?;
    Ok(verifier.verify(value.as_bytes(), signature))
}

/// Runs the verify command.
pub fn run(key_path: &Path, value: &str, signature: &str) -> Result<(), Box<dyn std::error::Error>> {
    if check(key_path, value, signature)? {
        println!("✓ Signature valid");
        Ok(())
    } else {
        println!("✗ Signature invalid");
        Err("Verification failed".into())
    }
}
