//! Encoding and decoding of base64 `data:` URIs for generated images.

use crate::{Error, Result};
use base64::Engine as _;

/// Embeds raw bytes and their MIME type in a `data:` URI.
pub fn encode(mime_type: &str, bytes: &[u8]) -> String {
    format!(
        "data:{};base64,{}",
        mime_type,
        base64::engine::general_purpose::STANDARD.encode(bytes)
    )
}

/// Splits a base64 `data:` URI back into its MIME type and raw bytes.
pub fn decode(uri: &str) -> Result<(String, Vec<u8>)> {
    let rest = uri
        .strip_prefix("data:")
        .ok_or_else(|| Error::Generic(format!("Not a data URI: {}", truncate(uri))))?;

    let (mime_type, payload) = rest
        .split_once(";base64,")
        .ok_or_else(|| Error::Generic(format!("Data URI is not base64-encoded: {}", truncate(uri))))?;

    let bytes = base64::engine::general_purpose::STANDARD
        .decode(payload)
        .map_err(|e| Error::Generic(format!("Invalid base64 payload in data URI: {}", e)))?;

    Ok((mime_type.to_string(), bytes))
}

/// Maps an image MIME type to a filename extension, defaulting to `png`.
pub fn extension_for(mime_type: &str) -> &'static str {
    match mime_type {
        "image/jpeg" => "jpg",
        "image/webp" => "webp",
        "image/png" => "png",
        other => {
            tracing::warn!("Unrecognized image MIME type '{}', using .png", other);
            "png"
        }
    }
}

fn truncate(uri: &str) -> &str {
    uri.get(..32).unwrap_or(uri)
}
