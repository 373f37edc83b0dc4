pub mod unescape;

use crate::error::{RelayError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use tracing::debug;

pub use unescape::unescape;

/// Assignment the Flash Invaders page uses to embed its flash list.
/// The payload match is lazy and does not cross line breaks.
static FLASH_DATA_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"var flashData = JSON\.parse\('(.+?)'\);")
        .expect("flashData marker pattern is valid")
});

/// JSON value recovered from an HTML page
#[derive(Debug, Clone)]
pub struct ExtractedPayload {
    pub value: Value,
    /// The payload exactly as it appeared between the quotes, still escaped
    pub source: String,
}

impl ExtractedPayload {
    /// Canonical JSON encoding of the extracted value
    pub fn to_json_bytes(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(&self.value)?)
    }
}

/// Locate the first `flashData` assignment in `html`, undo its escaping and
/// parse it as JSON.
pub fn extract_flash_data(html: &str) -> Result<ExtractedPayload> {
    let source = FLASH_DATA_MARKER
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or(RelayError::Extraction)?;

    debug!("Found flashData payload ({} bytes escaped)", source.len());

    let value = serde_json::from_str(&unescape(&source))?;

    Ok(ExtractedPayload { value, source })
}
