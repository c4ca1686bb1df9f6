//! Base64 payload handling for the CLI surface.
//!
//! The original plugin moved images across its bridge as base64 strings, and
//! those strings often carry line breaks (Android's encoder wraps at 76
//! columns). Decoding strips all whitespace first so both wrapped and
//! compact payloads round-trip.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PayloadError {
    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),
}

/// Decode a base64 payload, tolerating embedded whitespace and line breaks.
pub fn from_base64(text: &str) -> Result<Vec<u8>, PayloadError> {
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    Ok(STANDARD.decode(compact.as_bytes())?)
}

/// Encode bytes as a compact base64 string.
pub fn to_base64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip() {
        let bytes = vec![0u8, 1, 2, 254, 255];
        let encoded = to_base64(&bytes);
        assert_eq!(from_base64(&encoded).unwrap(), bytes);
    }

    #[test]
    fn decode_tolerates_line_breaks() {
        // "hello world" wrapped mid-stream
        let wrapped = "aGVsbG8g\nd29ybGQ=\n";
        assert_eq!(from_base64(wrapped).unwrap(), b"hello world");
    }

    #[test]
    fn decode_rejects_invalid_input() {
        assert!(matches!(
            from_base64("not!!base64"),
            Err(PayloadError::Base64(_))
        ));
    }
}
