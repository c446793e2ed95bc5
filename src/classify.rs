//! Per-reference action classification.
//!
//! A resolved reference lands in exactly one terminal state — inline, resize,
//! or skip — decided purely from its byte size, its extension, and whether
//! resizing is enabled. No filesystem access happens here; the driver stats
//! the file and passes the size in.

use std::fmt;

/// Extensions eligible for the resize action.
pub const RASTER_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

/// Terminal state for one resolved reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Embed the file's bytes into the output in place of the reference.
    Inline,
    /// Write a resized variant to disk and repoint the reference.
    Resize,
    /// Leave the reference byte-for-byte unchanged.
    Skip(SkipReason),
}

/// Why a reference was left unchanged.
///
/// The classifier produces [`ResizeDisabled`](SkipReason::ResizeDisabled) and
/// [`NotRaster`](SkipReason::NotRaster); the driver adds the remaining
/// variants for failures upstream and downstream of classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Source path contains an interpolation marker.
    Dynamic,
    /// Not found under any candidate base directory.
    NotFound,
    /// Classified for resize, but resizing is disabled.
    ResizeDisabled,
    /// Too large to inline and not a raster extension (e.g. an oversized
    /// SVG or a GIF).
    NotRaster,
    /// Raster by extension, but the decoded content is not an encodable
    /// raster format.
    UnsupportedFormat,
    /// Read, optimize, or encode failed; the reference is left as-is.
    Failed(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Dynamic => write!(f, "source path is not static"),
            SkipReason::NotFound => write!(f, "not found in any search directory"),
            SkipReason::ResizeDisabled => write!(f, "resizing disabled"),
            SkipReason::NotRaster => write!(f, "not resizable (not a raster format)"),
            SkipReason::UnsupportedFormat => write!(f, "unrecognized raster format"),
            SkipReason::Failed(msg) => write!(f, "{msg}"),
        }
    }
}

/// Classify one resolved reference.
///
/// Files strictly smaller than `inline_size` are inlined regardless of type.
/// Larger files are resized only when the extension is a known raster format
/// and resizing is enabled; everything else is skipped.
pub fn classify(byte_size: u64, ext: &str, inline_size: u64, resize_enabled: bool) -> Action {
    if byte_size < inline_size {
        return Action::Inline;
    }
    if RASTER_EXTENSIONS.iter().any(|e| ext.eq_ignore_ascii_case(e)) {
        if resize_enabled {
            Action::Resize
        } else {
            Action::Skip(SkipReason::ResizeDisabled)
        }
    } else {
        Action::Skip(SkipReason::NotRaster)
    }
}
