//! Encoder backend — pure Rust, statically linked.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Format probe** | `image::ImageReader::with_guessed_format` (content sniff) |
//! | **Identify** | `image::ImageReader::into_dimensions` |
//! | **Resize** | Lanczos3 via `image::imageops` |
//! | **Encode JPEG** | `JpegEncoder::new_with_quality` |
//! | **Encode PNG** | `PngEncoder` with best compression |
//! | **Encode WebP** | `webp` crate, lossy |
//!
//! The module is split into:
//! - **Parameters**: Data structures describing a resize operation
//! - **Backend**: [`ImageBackend`] trait (+ a recording mock for tests)
//! - **RustBackend**: the production implementation

pub mod backend;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend, RasterFormat};
pub use params::{Quality, ResizeParams};
pub use rust_backend::RustBackend;
