//! Size-constrained JPEG encoding.
//!
//! Converges on the highest quality whose encoded output fits a byte budget,
//! then falls back to resolution downscaling when even the minimum quality is
//! over budget. The downscale factor (0.8 per pass) matches the scale loop of
//! the original Android implementation this engine replaces.
//!
//! The search is bounded on every axis: quality probes halve a fixed
//! interval, downscale passes are capped, and the longer edge never drops
//! below `Limits::min_dimension`. When the floor is reached while still over
//! budget the smallest encoding produced is returned with `size_exceeded`
//! set — never a silent over-budget result, never a hard failure.

use super::calculations::downscaled_dimensions;
use super::params::Limits;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ExtendedColorType, RgbImage, imageops};
use std::path::PathBuf;
use thiserror::Error;

pub const MEGABYTE: u64 = 1_048_576;

/// Per-pass shrink factor when quality alone cannot meet the budget.
const SCALE_FACTOR: f64 = 0.8;

#[derive(Error, Debug)]
pub enum EncodeError {
    #[error("JPEG encoding failed: {0}")]
    Codec(String),
}

/// Final output of a join or resize call.
#[derive(Debug, Clone)]
pub struct EncodedResult {
    /// Encoded JPEG payload.
    pub bytes: Vec<u8>,
    /// Dimensions of the encoded image (after any downscaling).
    pub width: u32,
    pub height: u32,
    /// Quality the payload was encoded at. `None` when a source payload was
    /// reused unchanged, so no encode happened in this call.
    pub quality: Option<u8>,
    /// Format identifier — always `"jpeg"` for this engine.
    pub format: &'static str,
    /// True when even the smallest permitted encoding exceeded the budget.
    /// `bytes` then holds the best effort, not a within-budget payload.
    pub size_exceeded: bool,
    /// Where the payload was persisted, when the caller asked for that.
    pub path: Option<PathBuf>,
}

impl EncodedResult {
    pub fn size_bytes(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// Outcome of a quality search at a fixed resolution.
enum Fit {
    /// Highest within-budget quality found.
    Within { bytes: Vec<u8>, quality: u8 },
    /// Even the minimum quality is over budget; carries that attempt so the
    /// floor case can reuse it.
    Over { bytes: Vec<u8> },
}

fn encode_jpeg(rgb: &RgbImage, quality: u8) -> Result<Vec<u8>, EncodeError> {
    let mut buf = Vec::new();
    JpegEncoder::new_with_quality(&mut buf, quality)
        .encode(rgb.as_raw(), rgb.width(), rgb.height(), ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::Codec(e.to_string()))?;
    Ok(buf)
}

/// Binary-search quality in `[min_quality, max_quality]` for the largest
/// value whose encoded size fits `max_bytes`.
///
/// JPEG size is monotone in quality for practical purposes; the search keeps
/// the last fitting encoding, so a non-monotone blip can only cost quality,
/// never the budget. At most `2 + log2(range)` encodes per call.
fn fit_quality(rgb: &RgbImage, max_bytes: u64, limits: &Limits) -> Result<Fit, EncodeError> {
    let min_q = limits.min_quality.value();
    let max_q = limits.max_quality.value();

    let at_max = encode_jpeg(rgb, max_q)?;
    if at_max.len() as u64 <= max_bytes {
        return Ok(Fit::Within {
            bytes: at_max,
            quality: max_q,
        });
    }
    let at_min = encode_jpeg(rgb, min_q)?;
    if at_min.len() as u64 > max_bytes {
        return Ok(Fit::Over { bytes: at_min });
    }

    // Invariant: lo fits, hi does not.
    let (mut lo, mut hi) = (min_q, max_q);
    let mut best = (at_min, min_q);
    while hi - lo > 1 {
        let mid = lo + (hi - lo) / 2;
        let attempt = encode_jpeg(rgb, mid)?;
        if attempt.len() as u64 <= max_bytes {
            best = (attempt, mid);
            lo = mid;
        } else {
            hi = mid;
        }
    }
    Ok(Fit::Within {
        bytes: best.0,
        quality: best.1,
    })
}

/// Encode `image` as JPEG within `max_bytes`.
///
/// Tries quality first, resolution second. See the module docs for the
/// policy when the budget is unreachable.
pub fn encode_to_fit(
    image: &DynamicImage,
    max_bytes: u64,
    limits: &Limits,
) -> Result<EncodedResult, EncodeError> {
    // JPEG has no alpha channel; composited RGBA flattens here.
    let mut rgb = image.to_rgb8();
    let mut passes = 0;

    loop {
        match fit_quality(&rgb, max_bytes, limits)? {
            Fit::Within { bytes, quality } => {
                return Ok(EncodedResult {
                    width: rgb.width(),
                    height: rgb.height(),
                    quality: Some(quality),
                    format: "jpeg",
                    size_exceeded: false,
                    path: None,
                    bytes,
                });
            }
            Fit::Over { bytes } => {
                let (w, h) = downscaled_dimensions((rgb.width(), rgb.height()), SCALE_FACTOR);
                // Pass cap or downscale floor reached: return the minimum-
                // quality encoding fit_quality just measured over budget.
                if passes == limits.max_downscale_passes || w.max(h) < limits.min_dimension {
                    return Ok(EncodedResult {
                        width: rgb.width(),
                        height: rgb.height(),
                        quality: Some(limits.min_quality.value()),
                        format: "jpeg",
                        size_exceeded: true,
                        path: None,
                        bytes,
                    });
                }
                passes += 1;
                rgb = imageops::resize(&rgb, w, h, FilterType::Lanczos3);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::params::Quality;
    use image::Rgb;

    /// Deterministic high-entropy image — compresses poorly, so small byte
    /// budgets actually exercise the search.
    fn noisy(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
            let v = x.wrapping_mul(31).wrapping_add(y.wrapping_mul(17));
            Rgb([
                (v % 251) as u8,
                (v.wrapping_mul(7) % 241) as u8,
                (v.wrapping_mul(13) % 239) as u8,
            ])
        }))
    }

    #[test]
    fn generous_budget_uses_max_quality() {
        let img = noisy(200, 150);
        let result = encode_to_fit(&img, 10 * MEGABYTE, &Limits::default()).unwrap();
        assert!(!result.size_exceeded);
        assert_eq!(result.quality, Some(90));
        assert_eq!((result.width, result.height), (200, 150));
        assert!(result.size_bytes() <= 10 * MEGABYTE);
    }

    #[test]
    fn tight_budget_lowers_quality_but_fits() {
        let img = noisy(400, 300);
        let generous = encode_to_fit(&img, 10 * MEGABYTE, &Limits::default()).unwrap();
        // Half of the full-quality size forces the search below max quality
        let budget = generous.size_bytes() / 2;
        let result = encode_to_fit(&img, budget, &Limits::default()).unwrap();
        assert!(!result.size_exceeded);
        assert!(result.quality.unwrap() < 90);
        assert!(result.size_bytes() <= budget);
    }

    #[test]
    fn impossible_budget_downscales() {
        let img = noisy(800, 600);
        // A few KB forces resolution reduction for a noisy 800x600
        let result = encode_to_fit(&img, 4096, &Limits::default()).unwrap();
        assert!(!result.size_exceeded);
        assert!(result.width < 800);
        assert!(result.height < 600);
        assert!(result.size_bytes() <= 4096);
    }

    #[test]
    fn unreachable_budget_flags_size_exceeded() {
        let img = noisy(256, 256);
        // No JPEG fits in 16 bytes; floor case must flag, not fail
        let result = encode_to_fit(&img, 16, &Limits::default()).unwrap();
        assert!(result.size_exceeded);
        assert_eq!(result.quality, Some(Limits::default().min_quality.value()));
        assert!(!result.bytes.is_empty());
        // A flagged result really is over budget, never a fitting one
        assert!(result.size_bytes() > 16);
    }

    #[test]
    fn pass_cap_limits_downscales() {
        let limits = Limits {
            max_downscale_passes: 2,
            min_dimension: 1,
            ..Limits::default()
        };
        let result = encode_to_fit(&noisy(256, 256), 16, &limits).unwrap();
        assert!(result.size_exceeded);
        // Exactly two 0.8 passes from 256: 256 → 204 → 163, and no further
        assert_eq!((result.width, result.height), (163, 163));
    }

    #[test]
    fn downscale_respects_min_dimension() {
        let limits = Limits {
            min_dimension: 100,
            ..Limits::default()
        };
        let result = encode_to_fit(&noisy(256, 256), 16, &limits).unwrap();
        assert!(result.size_exceeded);
        // Longer edge never dropped below the floor
        assert!(result.width.max(result.height) >= 100);
    }

    #[test]
    fn reencode_stays_within_budget() {
        let budget = 20_000;
        let first = encode_to_fit(&noisy(500, 500), budget, &Limits::default()).unwrap();
        assert!(!first.size_exceeded);

        let decoded = image::load_from_memory(&first.bytes).unwrap();
        let second = encode_to_fit(&decoded, budget, &Limits::default()).unwrap();
        assert!(!second.size_exceeded);
        assert!(second.size_bytes() <= budget);
    }

    #[test]
    fn custom_quality_bounds_are_honored() {
        let limits = Limits {
            min_quality: Quality::new(50),
            max_quality: Quality::new(60),
            ..Limits::default()
        };
        let result = encode_to_fit(&noisy(200, 200), 10 * MEGABYTE, &limits).unwrap();
        assert_eq!(result.quality, Some(60));
    }

    #[test]
    fn output_decodes_to_reported_dimensions() {
        let result = encode_to_fit(&noisy(300, 200), 10 * MEGABYTE, &Limits::default()).unwrap();
        let decoded = image::load_from_memory(&result.bytes).unwrap();
        assert_eq!(decoded.width(), result.width);
        assert_eq!(decoded.height(), result.height);
    }
}
