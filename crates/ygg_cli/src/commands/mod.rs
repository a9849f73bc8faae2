//! CLI command implementations.

pub mod metadata;
pub mod offline_uuid;
pub mod sign;
pub mod verify;

use std::path::Path;

/// Reads a PEM file.
pub fn read_pem(path: &Path) -> Result<String, Box<dyn std::error::Error>> {
    std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read key {}: {}", path.display(), e).into())
}
