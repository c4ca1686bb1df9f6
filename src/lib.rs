//! # Join Images
//!
//! Join two images into one — optionally with overlaid text — and resize
//! images so their encoded form fits a maximum file size. The engine that a
//! hybrid-app "join images" plugin would delegate to native code, rebuilt as
//! a self-contained Rust library with a CLI.
//!
//! # Architecture: A Linear Pipeline
//!
//! Every call runs the same three stages, each a pure function over the
//! previous stage's output:
//!
//! ```text
//! 1. Decode   payload bytes  →  raster buffer     (image crate)
//! 2. Compose  one/two buffers + text  →  buffer   (join path only)
//! 3. Encode   buffer  →  JPEG within byte budget  (quality search + downscale)
//! ```
//!
//! Calls are stateless and independent: no caches, no globals, nothing shared
//! between concurrent calls. A failed stage short-circuits with its error;
//! exactly one of result or error comes out of every call.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Decode, compose, and size-constrained encode, plus the pure dimension math |
//! | [`ops`] | The `join` and `resize` operations: validation, pipeline wiring, persistence |
//! | [`payload`] | Base64 payload handling for the CLI surface |
//! | [`output`] | CLI output formatting — human lines and JSON summaries |
//!
//! # Design Decisions
//!
//! ## JPEG-Only Output
//!
//! Output is always JPEG, like the plugin surface this replaces. JPEG is the
//! one mainstream format with a continuous quality dial, which is what makes
//! a byte-budget search meaningful; every result records its format so a
//! second output format can be added without breaking callers.
//!
//! ## Quality First, Resolution Second
//!
//! The size search binary-searches JPEG quality and only then shrinks the
//! image by 0.8 per pass. Lowering quality preserves framing and dimensions,
//! which callers usually care about more than per-pixel fidelity. When even
//! the smallest permitted rendition is over budget the result is returned
//! flagged, not thrown away.
//!
//! ## Single Image Joins Are Legal
//!
//! The original surface validated only the first image, so a join with one
//! image is well-defined: it behaves as a resize plus the text overlay. That
//! behavior is preserved deliberately rather than tightened.
//!
//! ## Embedded Font
//!
//! Text overlay uses a DejaVu Sans face compiled into the binary. No system
//! font lookup means identical inputs render identical pixels on every
//! machine — overlay output is byte-for-byte reproducible and testable.
//!
//! ## Pure-Rust Imaging (No ImageMagick, No FFmpeg)
//!
//! Decoding, scaling, glyph rasterization, and encoding all come from the
//! `image`/`imageproc` ecosystem. The binary has zero system dependencies:
//! no `apt install`, no Homebrew, no version conflicts.

pub mod engine;
pub mod ops;
pub mod output;
pub mod payload;

pub use engine::{Anchor, EncodedResult, Limits, Quality, TextSpec, TextStyle};
pub use ops::{JoinRequest, OpError, ResizeRequest, join, resize};
