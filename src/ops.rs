//! The two operations the crate exposes: `join` and `resize`.
//!
//! Each call is self-contained: validate, decode, compose (join only),
//! encode under the byte budget, optionally persist. Nothing is shared
//! between calls, so arbitrarily many may run concurrently — the CLI's batch
//! resize leans on exactly that.
//!
//! Parameter semantics preserved from the original plugin surface:
//! - Only the first image is required for `join`; the second is optional and
//!   a single-image join is a resize plus the text overlay.
//! - A non-positive or absent size limit falls back to 5 MB.
//! - Output folder and filename may be absent or empty; persistence happens
//!   only when both are usable.
//!
//! A JPEG payload that already fits the budget is returned unchanged on the
//! paths that would not alter its pixels (`resize`, and `join` with one
//! image and no text). That makes repeated constrained re-encoding at the
//! same budget a fixpoint — output size is monotone non-increasing — and
//! spares an untouched image a generation of JPEG loss.

use crate::engine::{
    self, EncodedResult, Limits, TextSpec, compose, decode, encode_to_fit,
};
use image::{ImageFormat, ImageReader};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Byte budget applied when the caller gives none (or a non-positive one).
pub const DEFAULT_SIZE_MB: f64 = 5.0;

#[derive(Error, Debug)]
pub enum OpError {
    #[error("parameter '{0}' is required")]
    Validation(&'static str),
    #[error("decode failed: {0}")]
    Decode(#[from] engine::DecodeError),
    #[error("composition failed: {0}")]
    Composition(#[from] engine::CompositionError),
    #[error("encode failed: {0}")]
    Encode(#[from] engine::EncodeError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Inputs for the join operation.
#[derive(Debug, Clone, Default)]
pub struct JoinRequest {
    /// First (topmost) image payload. Required.
    pub first: Vec<u8>,
    /// Second image payload, stacked below the first when present.
    pub second: Option<Vec<u8>>,
    /// Text drawn over the composed image.
    pub text: Option<TextSpec>,
    /// Maximum output size in megabytes. Non-positive/absent → 5.
    pub max_size_mb: Option<f64>,
    /// Folder to persist the result into, together with `output_filename`.
    pub output_folder: Option<PathBuf>,
    pub output_filename: Option<String>,
}

/// Inputs for the resize operation.
#[derive(Debug, Clone, Default)]
pub struct ResizeRequest {
    /// Image payload. Required.
    pub image: Vec<u8>,
    /// Maximum output size in megabytes. Non-positive/absent → 5.
    pub max_size_mb: Option<f64>,
}

/// Resolve a caller-supplied megabyte limit into a byte budget.
pub fn effective_budget_bytes(max_size_mb: Option<f64>) -> u64 {
    let mb = match max_size_mb {
        Some(v) if v > 0.0 => v,
        _ => DEFAULT_SIZE_MB,
    };
    (mb * engine::MEGABYTE as f64) as u64
}

/// Join one or two images into a single JPEG within the byte budget,
/// optionally overlaying text and persisting the result.
pub fn join(request: &JoinRequest) -> Result<EncodedResult, OpError> {
    join_with_limits(request, &Limits::default())
}

/// [`join`] with explicit engine limits (megapixel cap, quality bounds).
pub fn join_with_limits(request: &JoinRequest, limits: &Limits) -> Result<EncodedResult, OpError> {
    if request.first.is_empty() {
        return Err(OpError::Validation("firstImage"));
    }

    let budget = effective_budget_bytes(request.max_size_mb);
    let text = request.text.as_ref().filter(|t| !t.content.is_empty());

    // Pixels would come out unchanged, so the payload can too
    let reusable = if request.second.is_none() && text.is_none() {
        reuse_fitting_jpeg(&request.first, budget)
    } else {
        None
    };
    let mut result = match reusable {
        Some(reused) => reused,
        None => {
            let first = decode(&request.first)?;
            let second = match &request.second {
                Some(payload) => Some(decode(payload)?),
                None => None,
            };
            let composed = compose(first, second, text, limits)?;
            encode_to_fit(&composed, budget, limits)?
        }
    };

    if let Some(target) = persist_target(request) {
        persist(&result.bytes, &target)?;
        result.path = Some(target);
    }
    Ok(result)
}

/// Resize a single image so its JPEG encoding fits the byte budget.
pub fn resize(request: &ResizeRequest) -> Result<EncodedResult, OpError> {
    resize_with_limits(request, &Limits::default())
}

/// [`resize`] with explicit engine limits.
pub fn resize_with_limits(
    request: &ResizeRequest,
    limits: &Limits,
) -> Result<EncodedResult, OpError> {
    if request.image.is_empty() {
        return Err(OpError::Validation("image"));
    }
    let budget = effective_budget_bytes(request.max_size_mb);
    if let Some(reused) = reuse_fitting_jpeg(&request.image, budget) {
        return Ok(reused);
    }
    let image = decode(&request.image)?;
    Ok(encode_to_fit(&image, budget, limits)?)
}

/// Reuse a JPEG payload untouched when it already fits the budget.
///
/// Re-encoding a fitting JPEG would add a generation of loss, and the fresh
/// quality search could even land on a larger payload than the input.
/// Anything that fails header inspection returns `None` and falls through
/// to the full pipeline, which reports the real decode error.
fn reuse_fitting_jpeg(payload: &[u8], budget: u64) -> Option<EncodedResult> {
    if payload.len() as u64 > budget {
        return None;
    }
    if image::guess_format(payload).ok()? != ImageFormat::Jpeg {
        return None;
    }
    let (width, height) = ImageReader::with_format(Cursor::new(payload), ImageFormat::Jpeg)
        .into_dimensions()
        .ok()?;
    Some(EncodedResult {
        bytes: payload.to_vec(),
        width,
        height,
        quality: None,
        format: "jpeg",
        size_exceeded: false,
        path: None,
    })
}

/// Where to persist, if the request names both a folder and a filename.
/// Empty strings count as absent — the original surface passed "" for
/// "no persistence".
fn persist_target(request: &JoinRequest) -> Option<PathBuf> {
    let folder = request
        .output_folder
        .as_ref()
        .filter(|f| !f.as_os_str().is_empty())?;
    let filename = request
        .output_filename
        .as_ref()
        .filter(|n| !n.is_empty())?;
    Some(folder.join(filename))
}

fn persist(bytes: &[u8], target: &Path) -> std::io::Result<()> {
    if let Some(parent) = target.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(target, bytes)
}
