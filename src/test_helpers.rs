//! Shared test utilities for the imgfold test suite.
//!
//! Path resolution is relative to the working directory (candidate bases have
//! any leading `/` stripped), so tests that exercise the resolver or the full
//! driver run inside a temp tree via [`in_tree`], serialized on a process-wide
//! lock because the working directory is process state.
//!
//! Synthetic images are encoded with the `image` crate. The "noise" variants
//! fill pixels with a multiplicative hash so PNG's deflate stage cannot
//! compress them below the inline threshold.

use image::{ImageEncoder, RgbImage};
use std::fs;
use std::path::Path;
use std::sync::Mutex;
use tempfile::TempDir;

static CWD_LOCK: Mutex<()> = Mutex::new(());

/// Create the given files (content `b"x"`) in a temp directory, chdir into
/// it, run `f`, and restore the previous working directory.
pub fn in_tree<F: FnOnce(&Path)>(layout: &[&str], f: F) {
    let _guard = CWD_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let tmp = TempDir::new().unwrap();
    for file in layout {
        let path = tmp.path().join(file);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, b"x").unwrap();
    }
    let old = std::env::current_dir().unwrap();
    // Restore the cwd even if `f` panics, so one failing test cannot leave
    // the process inside a deleted TempDir and poison the rest of the suite.
    struct RestoreCwd(std::path::PathBuf);
    impl Drop for RestoreCwd {
        fn drop(&mut self) {
            let _ = std::env::set_current_dir(&self.0);
        }
    }
    let _restore = RestoreCwd(old);
    std::env::set_current_dir(tmp.path()).unwrap();
    f(tmp.path());
}

/// Incompressible pixel pattern: a multiplicative hash of the coordinates.
fn noise(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        let n = (x ^ (y << 16) ^ 0x9e37)
            .wrapping_mul(2654435761)
            .wrapping_add(y.wrapping_mul(40503));
        image::Rgb([(n & 0xff) as u8, ((n >> 8) & 0xff) as u8, ((n >> 16) & 0xff) as u8])
    })
}

/// Write a PNG of incompressible noise. 200x200 comes out well above the
/// default 3072-byte inline threshold; 4x4 well below it.
pub fn create_noise_png(path: &Path, width: u32, height: u32) {
    noise(width, height).save(path).unwrap();
}

/// Write a small smooth-gradient PNG (compresses to a few hundred bytes).
pub fn create_small_png(path: &Path, width: u32, height: u32) {
    let img = RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    // Encode explicitly as PNG: `save` dispatches on the path extension, so a
    // deliberately misnamed path (e.g. "lying.jpg") would get JPEG bytes.
    img.save_with_format(path, image::ImageFormat::Png).unwrap();
}

/// Write a JPEG of incompressible noise at the given dimensions.
pub fn create_noise_jpeg(path: &Path, width: u32, height: u32) {
    let img = noise(width, height);
    let file = fs::File::create(path).unwrap();
    let writer = std::io::BufWriter::new(file);
    image::codecs::jpeg::JpegEncoder::new(writer)
        .write_image(
            img.as_raw(),
            width,
            height,
            image::ExtendedColorType::Rgb8,
        )
        .unwrap();
}

/// A small well-formed SVG with a comment and an XML declaration, so
/// optimizer effects are observable after inlining.
pub const SAMPLE_SVG: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
    <!-- sample icon -->\n\
    <svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 16 16\">\n\
        <circle cx=\"8\" cy=\"8\" r=\"7\"/>\n\
    </svg>\n";
