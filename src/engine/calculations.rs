//! Pure calculation functions for image dimensions and text placement.
//!
//! All functions here are pure and testable without any I/O or pixels.

use super::params::Anchor;

/// Calculate dimensions for scaling an image to a target width.
///
/// Preserves the source aspect ratio; height is rounded and never below 1.
///
/// # Examples
/// ```
/// # use join_images::engine::scale_to_width;
/// // 800x600 scaled to width 400 → 400x300
/// assert_eq!(scale_to_width((800, 600), 400), (400, 300));
///
/// // Upscaling works the same way
/// assert_eq!(scale_to_width((100, 50), 300), (300, 150));
/// ```
pub fn scale_to_width(source: (u32, u32), target_width: u32) -> (u32, u32) {
    let (src_w, src_h) = source;
    let h = (src_h as f64 * target_width as f64 / src_w as f64).round() as u32;
    (target_width, h.max(1))
}

/// Calculate the output dimensions of a vertical stack.
///
/// The second image is scaled to the first's width (aspect preserved), then
/// placed below it: output width is the first's width, output height is the
/// sum of the first's height and the scaled second's height.
///
/// Returned as u64: two decodable inputs can stack past u32 range, and the
/// megapixel cap rejects that case after this math runs.
pub fn stacked_dimensions(first: (u32, u32), second: (u32, u32)) -> (u64, u64) {
    let (first_w, first_h) = first;
    let (_, scaled_h) = scale_to_width(second, first_w);
    (first_w as u64, first_h as u64 + scaled_h as u64)
}

/// Calculate dimensions after one downscale pass.
///
/// Both edges shrink by `factor`; neither drops below 1.
pub fn downscaled_dimensions(dims: (u32, u32), factor: f64) -> (u32, u32) {
    let (w, h) = dims;
    let new_w = ((w as f64 * factor) as u32).max(1);
    let new_h = ((h as f64 * factor) as u32).max(1);
    (new_w, new_h)
}

/// Total pixel count of an image, for comparison against a megapixel cap.
/// Saturating — every cap sits far below the saturation point.
pub fn pixel_count(dims: (u64, u64)) -> u64 {
    dims.0.saturating_mul(dims.1)
}

/// Calculate the top-left origin for text of the given rendered size.
///
/// Centered anchors clamp to x = 0 when the text is wider than the canvas;
/// bottom anchors clamp to y = 0 when it is taller. Placement is therefore
/// always on-canvas (drawing itself clips at the edges).
pub fn anchor_origin(
    anchor: Anchor,
    canvas: (u32, u32),
    text: (u32, u32),
    margin: u32,
) -> (i32, i32) {
    let (canvas_w, canvas_h) = canvas;
    let (text_w, text_h) = text;

    let centered_x = (canvas_w.saturating_sub(text_w) / 2) as i32;
    let bottom_y = canvas_h.saturating_sub(text_h + margin) as i32;

    match anchor {
        Anchor::TopLeft => (margin as i32, margin as i32),
        Anchor::TopCenter => (centered_x, margin as i32),
        Anchor::BottomCenter => (centered_x, bottom_y),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // scale_to_width tests
    // =========================================================================

    #[test]
    fn scale_down_preserves_aspect() {
        // 800x600 (4:3) to width 400 → 400x300
        assert_eq!(scale_to_width((800, 600), 400), (400, 300));
    }

    #[test]
    fn scale_up_preserves_aspect() {
        assert_eq!(scale_to_width((100, 50), 300), (300, 150));
    }

    #[test]
    fn scale_same_width_is_identity() {
        assert_eq!(scale_to_width((640, 480), 640), (640, 480));
    }

    #[test]
    fn scale_rounds_height() {
        // 3:1 source to width 100 → height 33.33 rounds to 33
        assert_eq!(scale_to_width((300, 100), 100), (100, 33));
    }

    #[test]
    fn scale_extreme_shrink_clamps_height_to_one() {
        // 1000x2 to width 10 → height would round to 0, clamps to 1
        assert_eq!(scale_to_width((1000, 2), 10), (10, 1));
    }

    // =========================================================================
    // stacked_dimensions tests
    // =========================================================================

    #[test]
    fn stack_equal_widths_sums_heights() {
        assert_eq!(stacked_dimensions((400, 300), (400, 200)), (400, 500));
    }

    #[test]
    fn stack_scales_second_to_first_width() {
        // Second is 800x600, scaled to width 400 → 400x300. Total 400x600.
        assert_eq!(stacked_dimensions((400, 300), (800, 600)), (400, 600));
    }

    #[test]
    fn stack_upscales_narrow_second() {
        // Second is 100x50, scaled to width 400 → 400x200. Total 400x500.
        assert_eq!(stacked_dimensions((400, 300), (100, 50)), (400, 500));
    }

    #[test]
    fn stack_height_at_least_max_of_inputs() {
        // Stacking never shrinks below either source height at common width
        let (w, h) = stacked_dimensions((400, 300), (400, 700));
        assert_eq!(w, 400);
        assert!(h >= 700);
    }

    #[test]
    fn stack_of_extreme_heights_does_not_overflow() {
        // Two maximally tall one-pixel-wide columns sum past u32 range
        let (w, h) = stacked_dimensions((1, u32::MAX), (1, u32::MAX));
        assert_eq!(w, 1);
        assert_eq!(h, 2 * u32::MAX as u64);
    }

    // =========================================================================
    // downscaled_dimensions tests
    // =========================================================================

    #[test]
    fn downscale_applies_factor_to_both_edges() {
        assert_eq!(downscaled_dimensions((1000, 500), 0.8), (800, 400));
    }

    #[test]
    fn downscale_truncates_like_original_loop() {
        // 0.8 of 99 is 79.2, truncated to 79
        assert_eq!(downscaled_dimensions((99, 99), 0.8), (79, 79));
    }

    #[test]
    fn downscale_never_reaches_zero() {
        assert_eq!(downscaled_dimensions((1, 1), 0.8), (1, 1));
    }

    #[test]
    fn pixel_count_multiplies_without_overflow() {
        assert_eq!(pixel_count((100_000, 100_000)), 10_000_000_000);
        assert_eq!(pixel_count((u64::MAX, 2)), u64::MAX);
    }

    // =========================================================================
    // anchor_origin tests
    // =========================================================================

    #[test]
    fn anchor_top_left_is_margin() {
        assert_eq!(
            anchor_origin(Anchor::TopLeft, (400, 300), (120, 40), 8),
            (8, 8)
        );
    }

    #[test]
    fn anchor_top_center_centers_horizontally() {
        assert_eq!(
            anchor_origin(Anchor::TopCenter, (400, 300), (120, 40), 8),
            (140, 8)
        );
    }

    #[test]
    fn anchor_bottom_center_sits_above_margin() {
        // y = 300 - 40 - 8 = 252
        assert_eq!(
            anchor_origin(Anchor::BottomCenter, (400, 300), (120, 40), 8),
            (140, 252)
        );
    }

    #[test]
    fn anchor_clamps_oversized_text_to_origin() {
        // Text wider and taller than canvas: x clamps to 0, y clamps to 0
        assert_eq!(
            anchor_origin(Anchor::BottomCenter, (100, 30), (500, 60), 8),
            (0, 0)
        );
    }
}
