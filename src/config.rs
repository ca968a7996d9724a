//! Loading helpers for tuning files and environment flags.

use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::Result;

/// Parse any table type from a JSON string.
pub fn from_json_str<T: DeserializeOwned>(raw: &str) -> Result<T> {
    Ok(serde_json::from_str(raw)?)
}

/// Read and parse a JSON tuning file.
pub fn load_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let raw = std::fs::read_to_string(path)?;
    from_json_str(&raw)
}

/// `1/true/yes/on` → true, `0/false/no/off/""` → false, anything else → `None`.
pub fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "" | "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
