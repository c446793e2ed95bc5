//! Encoder backend trait and shared types.
//!
//! [`ImageBackend`] defines the three operations the renderer needs:
//! probe the container format, identify dimensions, and resize-and-encode.
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend); tests use the recording
//! [`MockBackend`](tests::MockBackend) so decision logic runs without
//! decoding a single pixel.

use super::params::ResizeParams;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("unrecognized raster format")]
    UnsupportedFormat,
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

/// Container format determined from file *content*, not the extension.
///
/// A closed set: everything the resize path cannot encode collapses into
/// [`Unsupported`](RasterFormat::Unsupported), which the renderer turns into
/// a skip. A misnamed extension therefore cannot select the wrong encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RasterFormat {
    Jpeg,
    Png,
    Webp,
    Unsupported,
}

/// Result of an identify operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Trait for encoder backends.
pub trait ImageBackend: Sync {
    /// Sniff the container format from file content.
    fn detect_format(&self, path: &Path) -> Result<RasterFormat, BackendError>;

    /// Get natural image dimensions.
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError>;

    /// Resize and encode to `params.output` in `params.format`.
    fn resize(&self, params: &ResizeParams) -> Result<(), BackendError>;
}
