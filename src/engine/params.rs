//! Parameter types for the join/resize engine.
//!
//! These structs describe *what* to do, not *how* to do it. They are the
//! interface between the high-level [`ops`](crate::ops) module (which decides
//! what a request means) and the engine modules (which do the actual pixel
//! work).
//!
//! ## Types
//!
//! - [`Quality`] — Lossy encoding quality (1–100, default 90). Clamped on construction.
//! - [`Limits`] — Resource and search bounds: megapixel cap, quality search range, downscale floor.
//! - [`TextSpec`] / [`TextStyle`] — Overlay text content plus size, color, and anchor.
//! - [`Anchor`] — Where overlay text is placed on the composed image.

/// Quality setting for JPEG encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(pub u8);

impl Quality {
    pub fn new(value: u8) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(90)
    }
}

/// Resource and search bounds for a single join/resize call.
///
/// Every field has a default that matches the stock engine behavior; callers
/// override individual fields with struct update syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Largest composed output, in megapixels. Stacking two large sources can
    /// request an allocation far bigger than either input; this caps it.
    pub max_megapixels: u32,
    /// Lower bound of the quality search.
    pub min_quality: Quality,
    /// Upper bound of the quality search (also the first quality tried).
    pub max_quality: Quality,
    /// Downscaling stops once the longer edge would drop below this.
    pub min_dimension: u32,
    /// Hard cap on downscale passes, so the search always terminates.
    pub max_downscale_passes: u32,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_megapixels: 50,
            min_quality: Quality::new(10),
            max_quality: Quality::default(),
            min_dimension: 32,
            max_downscale_passes: 16,
        }
    }
}

impl Limits {
    /// Pixel-count form of the megapixel cap.
    pub fn max_pixels(&self) -> u64 {
        self.max_megapixels as u64 * 1_000_000
    }
}

/// Where overlay text is anchored on the composed image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Anchor {
    TopLeft,
    TopCenter,
    #[default]
    BottomCenter,
}

/// Rendering style for overlay text.
///
/// - `size`: Font size in pixels.
/// - `color`: RGBA, straight alpha.
/// - `anchor`: Placement on the composed image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size: f32,
    pub color: [u8; 4],
    pub anchor: Anchor,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            size: 48.0,
            color: [255, 255, 255, 255],
            anchor: Anchor::BottomCenter,
        }
    }
}

/// Overlay text for the join operation.
#[derive(Debug, Clone, PartialEq)]
pub struct TextSpec {
    pub content: String,
    pub style: TextStyle,
}

impl TextSpec {
    /// Text with the default style (48 px white, bottom-center).
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            style: TextStyle::default(),
        }
    }
}
