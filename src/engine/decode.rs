//! Payload decoding — encoded image bytes to an in-memory raster buffer.
//!
//! Pure: reads only the provided buffer, no filesystem access. Format
//! sniffing and pixel decoding are delegated to the `image` crate's
//! pure-Rust decoders (JPEG, PNG, WebP are compiled in).

use image::DynamicImage;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("image payload is empty")]
    Empty,
    #[error("failed to decode image payload: {0}")]
    Malformed(String),
}

/// Decode an encoded image payload into a raster buffer.
///
/// Fails with [`DecodeError::Empty`] on a zero-length payload and
/// [`DecodeError::Malformed`] when no compiled-in decoder accepts the bytes.
pub fn decode(payload: &[u8]) -> Result<DynamicImage, DecodeError> {
    if payload.is_empty() {
        return Err(DecodeError::Empty);
    }
    image::load_from_memory(payload).map_err(|e| DecodeError::Malformed(e.to_string()))
}
