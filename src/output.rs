//! CLI output formatting.
//!
//! Each surface has a `format_*` function (returns `Vec<String>`) for
//! testability and the binary prints the lines. Format functions are pure —
//! no I/O, no side effects.
//!
//! # Output Format
//!
//! ```text
//! photo.jpg
//!     1200x900 jpeg, quality 82, 1.8 MB
//!     Saved: out/photo.jpg
//! ```
//!
//! With `--json` the human display is replaced by a [`ResultSummary`] per
//! input, serialized as one JSON object (payload bytes excluded — they go to
//! the output file or the base64 stream, not the report).

use crate::engine::EncodedResult;
use serde::Serialize;

/// Machine-readable summary of one join/resize result.
#[derive(Debug, Clone, Serialize)]
pub struct ResultSummary {
    pub input: String,
    pub width: u32,
    pub height: u32,
    pub format: String,
    /// Absent when the source payload was reused without re-encoding.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<u8>,
    pub size_bytes: u64,
    pub size_exceeded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl ResultSummary {
    pub fn new(input: &str, result: &EncodedResult) -> Self {
        Self {
            input: input.to_string(),
            width: result.width,
            height: result.height,
            format: result.format.to_string(),
            quality: result.quality,
            size_bytes: result.size_bytes(),
            size_exceeded: result.size_exceeded,
            path: result
                .path
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
        }
    }
}

/// Format a byte count the way humans read file sizes.
fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * 1024;
    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} B")
    }
}

/// Human-readable display for one result: header line plus indented context.
pub fn format_result(input: &str, result: &EncodedResult) -> Vec<String> {
    let mut lines = vec![
        input.to_string(),
        format!(
            "    {}x{} {}, {}, {}",
            result.width,
            result.height,
            result.format,
            match result.quality {
                Some(q) => format!("quality {q}"),
                None => "original encoding".to_string(),
            },
            format_size(result.size_bytes())
        ),
    ];
    if result.size_exceeded {
        lines.push("    Warning: smallest encoding still exceeds the size limit".to_string());
    }
    if let Some(path) = &result.path {
        lines.push(format!("    Saved: {}", path.display()));
    }
    lines
}
