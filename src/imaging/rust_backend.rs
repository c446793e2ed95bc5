//! Production encoder backend built on the `image` crate.
//!
//! Format detection sniffs file content (`with_guessed_format`), so the
//! extension never selects an encoder. Resizing uses Lanczos3 and encodes
//! per format: JPEG through `JpegEncoder::new_with_quality`, PNG with best
//! compression, and WebP lossily through the `webp` crate (the `image`
//! crate's own WebP encoder is lossless-only).

use super::backend::{BackendError, Dimensions, ImageBackend, RasterFormat};
use super::params::ResizeParams;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType as PngFilter, PngEncoder};
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, ImageReader};
use std::io::BufWriter;
use std::path::Path;

/// Pure Rust backend using the `image` crate ecosystem.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn load_image(path: &Path) -> Result<DynamicImage, BackendError> {
    ImageReader::open(path)
        .map_err(BackendError::Io)?
        .with_guessed_format()
        .map_err(BackendError::Io)?
        .decode()
        .map_err(|e| {
            BackendError::ProcessingFailed(format!("Failed to decode {}: {}", path.display(), e))
        })
}

/// Encode and save in the requested format.
fn save_image(
    img: &DynamicImage,
    path: &Path,
    format: RasterFormat,
    quality: u32,
) -> Result<(), BackendError> {
    match format {
        RasterFormat::Jpeg => {
            let file = std::fs::File::create(path).map_err(BackendError::Io)?;
            let writer = BufWriter::new(file);
            let encoder = JpegEncoder::new_with_quality(writer, quality as u8);
            // The JPEG encoder rejects alpha channels.
            DynamicImage::ImageRgb8(img.to_rgb8())
                .write_with_encoder(encoder)
                .map_err(|e| BackendError::ProcessingFailed(format!("JPEG encode failed: {}", e)))
        }
        RasterFormat::Png => {
            let file = std::fs::File::create(path).map_err(BackendError::Io)?;
            let writer = BufWriter::new(file);
            let encoder =
                PngEncoder::new_with_quality(writer, CompressionType::Best, PngFilter::Adaptive);
            img.write_with_encoder(encoder)
                .map_err(|e| BackendError::ProcessingFailed(format!("PNG encode failed: {}", e)))
        }
        RasterFormat::Webp => {
            let rgba = DynamicImage::ImageRgba8(img.to_rgba8());
            let encoder = webp::Encoder::from_image(&rgba)
                .map_err(|e| BackendError::ProcessingFailed(format!("WebP encode failed: {}", e)))?;
            let encoded = encoder.encode(quality as f32);
            std::fs::write(path, &*encoded).map_err(BackendError::Io)
        }
        RasterFormat::Unsupported => Err(BackendError::UnsupportedFormat),
    }
}

impl ImageBackend for RustBackend {
    fn detect_format(&self, path: &Path) -> Result<RasterFormat, BackendError> {
        let reader = ImageReader::open(path)
            .map_err(BackendError::Io)?
            .with_guessed_format()
            .map_err(BackendError::Io)?;
        Ok(match reader.format() {
            Some(ImageFormat::Jpeg) => RasterFormat::Jpeg,
            Some(ImageFormat::Png) => RasterFormat::Png,
            Some(ImageFormat::WebP) => RasterFormat::Webp,
            _ => RasterFormat::Unsupported,
        })
    }

    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError> {
        let (width, height) = ImageReader::open(path)
            .map_err(BackendError::Io)?
            .with_guessed_format()
            .map_err(BackendError::Io)?
            .into_dimensions()
            .map_err(|e| {
                BackendError::ProcessingFailed(format!("Failed to read dimensions: {}", e))
            })?;
        Ok(Dimensions { width, height })
    }

    fn resize(&self, params: &ResizeParams) -> Result<(), BackendError> {
        let img = load_image(&params.source)?;
        let resized = img.resize_exact(params.width, params.height, FilterType::Lanczos3);
        save_image(&resized, &params.output, params.format, params.quality.value())
    }
}
