//! Compositing — vertical stacking of two raster buffers plus text overlay.
//!
//! Layout policy: the first image is the reference. When a second image is
//! present it is scaled (Lanczos3, aspect preserved) to the first's width and
//! placed directly below it, so the output width always equals the first
//! image's width. With no second image the first passes through unchanged
//! apart from the optional text overlay — the join operation is legal with a
//! single image.
//!
//! Text is rasterized with `imageproc`/`ab_glyph` against an embedded
//! DejaVu Sans face. No system font lookup happens, so identical inputs
//! produce identical pixels on every machine.

use super::calculations::{anchor_origin, pixel_count, stacked_dimensions};
use super::params::{Limits, TextSpec};
use ab_glyph::{FontRef, PxScale};
use image::imageops::FilterType;
use image::{DynamicImage, Rgba, RgbaImage, imageops};
use imageproc::drawing::{draw_text_mut, text_size};
use std::sync::LazyLock;
use thiserror::Error;

/// Distance in pixels between overlay text and the nearest image edge.
const TEXT_MARGIN: u32 = 8;

static DEFAULT_FONT: LazyLock<FontRef<'static>> = LazyLock::new(|| {
    FontRef::try_from_slice(include_bytes!("../../assets/DejaVuSans.ttf"))
        .expect("embedded DejaVu Sans is a valid font")
});

#[derive(Error, Debug)]
pub enum CompositionError {
    #[error("degenerate image dimensions: {width}x{height}")]
    Degenerate { width: u32, height: u32 },
    #[error("composed image would be {0} pixels, above the {1} megapixel cap")]
    TooLarge(u64, u32),
}

fn check_dimensions(img: &DynamicImage) -> Result<(), CompositionError> {
    if img.width() == 0 || img.height() == 0 {
        return Err(CompositionError::Degenerate {
            width: img.width(),
            height: img.height(),
        });
    }
    Ok(())
}

/// Compose one or two raster buffers and an optional text overlay into a
/// single output buffer.
///
/// Single image without text is a passthrough — no pixel copy, no format
/// conversion. Empty text content counts as no text.
pub fn compose(
    first: DynamicImage,
    second: Option<DynamicImage>,
    text: Option<&TextSpec>,
    limits: &Limits,
) -> Result<DynamicImage, CompositionError> {
    check_dimensions(&first)?;
    if let Some(second) = &second {
        check_dimensions(second)?;
    }
    let text = text.filter(|t| !t.content.is_empty());

    let mut canvas = match second {
        Some(second) => stack(&first, &second, limits)?,
        None if text.is_none() => return Ok(first),
        None => first.to_rgba8(),
    };

    if let Some(spec) = text {
        draw_overlay_text(&mut canvas, spec);
    }

    Ok(DynamicImage::ImageRgba8(canvas))
}

/// Stack `second` below `first`, scaling it to the first's width.
fn stack(
    first: &DynamicImage,
    second: &DynamicImage,
    limits: &Limits,
) -> Result<RgbaImage, CompositionError> {
    let first_dims = (first.width(), first.height());
    let (stack_w, stack_h) = stacked_dimensions(first_dims, (second.width(), second.height()));

    let pixels = pixel_count((stack_w, stack_h));
    if pixels > limits.max_pixels() {
        return Err(CompositionError::TooLarge(pixels, limits.max_megapixels));
    }

    // Cap check bounds both edges, so the casts cannot truncate
    let (out_w, out_h) = (stack_w as u32, stack_h as u32);
    let scaled_h = out_h - first.height();
    let scaled_second = second.resize_exact(out_w, scaled_h, FilterType::Lanczos3);

    let mut canvas = RgbaImage::from_pixel(out_w, out_h, Rgba([255, 255, 255, 255]));
    imageops::overlay(&mut canvas, &first.to_rgba8(), 0, 0);
    imageops::overlay(&mut canvas, &scaled_second.to_rgba8(), 0, first.height() as i64);
    Ok(canvas)
}

fn draw_overlay_text(canvas: &mut RgbaImage, spec: &TextSpec) {
    let font = &*DEFAULT_FONT;
    let scale = PxScale::from(spec.style.size);
    let (text_w, text_h) = text_size(scale, font, &spec.content);
    let (x, y) = anchor_origin(
        spec.style.anchor,
        (canvas.width(), canvas.height()),
        (text_w, text_h),
        TEXT_MARGIN,
    );
    draw_text_mut(canvas, Rgba(spec.style.color), x, y, scale, font, &spec.content);
}
