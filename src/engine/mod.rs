//! The image engine — pure Rust, no system codec or font dependencies.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode** (JPEG, PNG, WebP) | `image::load_from_memory` |
//! | **Stack / scale** | `image::imageops` (Lanczos3) |
//! | **Text overlay** | `imageproc::drawing` + `ab_glyph` (embedded DejaVu Sans) |
//! | **Size-constrained encode** | quality binary search + 0.8 downscale passes, JPEG output |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension and placement math (unit testable)
//! - **Parameters**: Data structures describing engine behavior and bounds
//! - **Decode**: Payload bytes → raster buffer
//! - **Compose**: Vertical stacking and deterministic text overlay
//! - **Encode**: JPEG encoding under a byte budget

mod calculations;
pub mod compose;
pub mod decode;
pub mod encode;
mod params;

pub use calculations::{
    anchor_origin, downscaled_dimensions, pixel_count, scale_to_width, stacked_dimensions,
};
pub use compose::{CompositionError, compose};
pub use decode::{DecodeError, decode};
pub use encode::{EncodeError, EncodedResult, MEGABYTE, encode_to_fit};
pub use params::{Anchor, Limits, Quality, TextSpec, TextStyle};
