//! Parameter types for encoder operations.
//!
//! These structs describe *what* to encode, not *how*. They are the interface
//! between [`render`](crate::render) (which decides what files to create) and
//! the [`backend`](super::backend) (which does the pixel work), so the
//! decision path can be tested against a mock.

use super::backend::RasterFormat;
use std::path::PathBuf;

/// Quality setting for lossy encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(u32);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(70)
    }
}

/// Full specification for one resize-and-encode operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResizeParams {
    pub source: PathBuf,
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
    pub quality: Quality,
    /// Encoder selection, taken from the probed container format.
    pub format: RasterFormat,
}
