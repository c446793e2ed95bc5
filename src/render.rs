//! Replacement-text rendering.
//!
//! Three render paths, one per action:
//!
//! - **Inline SVG**: read as text, minify ([`svg`](crate::svg), multipass),
//!   inject the tag's original attributes into the root element, and turn
//!   every `"` into `'` so the result cannot break the host markup's own
//!   quoting.
//! - **Inline raster**: read as bytes, base64-encode, emit a self-closing
//!   tag with a `data:image/<ext>;base64,` source. Original attributes are
//!   preserved, same as the SVG path.
//! - **Resize**: probe format and natural dimensions, plan target
//!   dimensions, have the backend write `<stem>.<w>x<h>.<ext>` beside the
//!   original, and emit a tag pointing at the resolved base directory (with
//!   a literal `src/` prefix stripped) plus the new file name.
//!
//! Rendered tags always single-quote the `src` value.

use crate::attrs::{self, AttrList};
use crate::imaging::{Dimensions, ImageBackend, Quality, RasterFormat, ResizeParams};
use crate::plan;
use crate::resolve::ResolvedReference;
use crate::svg;
use base64::Engine;
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Classified for resize, but the decoded content is not an encodable
    /// raster format. Nothing is written.
    #[error("unrecognized raster format")]
    UnsupportedFormat,
    #[error(transparent)]
    Backend(#[from] crate::imaging::BackendError),
}

/// Variant file name: `logo.png` at 200x100 → `logo.200x100.png`.
///
/// A pure function of its inputs, so repeated runs compute the same name and
/// overwrite instead of accumulating variants.
pub fn variant_file_name(file_name: &str, width: u32, height: u32) -> String {
    match file_name.rfind('.') {
        Some(dot) => format!(
            "{}.{}x{}{}",
            &file_name[..dot],
            width,
            height,
            &file_name[dot..]
        ),
        None => format!("{file_name}.{width}x{height}"),
    }
}

fn lead_attrs(attrs: &AttrList) -> String {
    if attrs.is_empty() {
        String::new()
    } else {
        format!(" {attrs}")
    }
}

/// Inject attributes into the root `<svg>` element.
fn inject_svg_attributes(svg: &str, attrs: &AttrList) -> String {
    if attrs.is_empty() {
        return svg.to_string();
    }
    match svg.find("<svg") {
        Some(pos) => {
            let insert_at = pos + "<svg".len();
            format!("{} {}{}", &svg[..insert_at], attrs, &svg[insert_at..])
        }
        None => svg.to_string(),
    }
}

/// Render the inline replacement for a resolved reference.
pub fn inline_tag(
    resolved: &ResolvedReference,
    ext: &str,
    attrs: &AttrList,
) -> Result<String, RenderError> {
    if ext.eq_ignore_ascii_case("svg") {
        let text = fs::read_to_string(&resolved.path)?;
        let optimized = svg::optimize(&text, &svg::OptimizeOptions::default());
        Ok(inject_svg_attributes(&optimized, attrs).replace('"', "'"))
    } else {
        let bytes = fs::read(&resolved.path)?;
        let payload = base64::engine::general_purpose::STANDARD.encode(&bytes);
        Ok(format!(
            "<img{} src='data:image/{};base64,{}' />",
            lead_attrs(attrs),
            ext,
            payload
        ))
    }
}

/// What the resize path produced, for the driver's outcome record.
#[derive(Debug, Clone)]
pub struct ResizeRendering {
    pub tag: String,
    pub output: PathBuf,
    pub natural: Dimensions,
    pub target: (u32, u32),
}

/// Render the resize replacement: write the variant file and build the
/// repointed tag.
pub fn resize_tag(
    backend: &impl ImageBackend,
    resolved: &ResolvedReference,
    file_name: &str,
    attrs: &AttrList,
    max: Option<(u32, u32)>,
    quality: Quality,
) -> Result<ResizeRendering, RenderError> {
    let format = backend.detect_format(&resolved.path)?;
    if format == RasterFormat::Unsupported {
        return Err(RenderError::UnsupportedFormat);
    }
    let natural = backend.identify(&resolved.path)?;
    let declared = attrs::declared_size(attrs);
    let (w, h) = plan::plan_dimensions(declared, (natural.width, natural.height), max);
    let (width, height) = ((w.round() as u32).max(1), (h.round() as u32).max(1));

    let new_name = variant_file_name(file_name, width, height);
    let output = match resolved.path.parent() {
        Some(dir) => dir.join(&new_name),
        None => PathBuf::from(&new_name),
    };
    backend.resize(&ResizeParams {
        source: resolved.path.clone(),
        output: output.clone(),
        width,
        height,
        quality,
        format,
    })?;

    let tag = format!(
        "<img{} src='{}' />",
        lead_attrs(attrs),
        rewritten_src(&resolved.base, &new_name)
    );
    Ok(ResizeRendering {
        tag,
        output,
        natural,
        target: (width, height),
    })
}

/// New source path for a resized reference: the resolved base directory with
/// a literal `src/` prefix stripped, joined with the variant file name.
fn rewritten_src(base: &str, file_name: &str) -> String {
    let base = base.strip_prefix("src/").unwrap_or(base);
    let base = base.trim_end_matches('/');
    if base.is_empty() {
        file_name.to_string()
    } else {
        format!("{base}/{file_name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::backend::tests::{MockBackend, RecordedOp};
    use crate::test_helpers::{SAMPLE_SVG, create_small_png};
    use tempfile::TempDir;

    fn resolved_in(tmp: &TempDir, base: &str, file_name: &str) -> ResolvedReference {
        ResolvedReference {
            base: base.to_string(),
            path: tmp.path().join(file_name),
        }
    }

    #[test]
    fn variant_name_is_deterministic() {
        assert_eq!(variant_file_name("logo.png", 200, 100), "logo.200x100.png");
        assert_eq!(
            variant_file_name("logo.png", 200, 100),
            variant_file_name("logo.png", 200, 100)
        );
    }

    #[test]
    fn variant_name_uses_last_dot() {
        assert_eq!(
            variant_file_name("a.photo.jpeg", 10, 20),
            "a.photo.10x20.jpeg"
        );
    }

    #[test]
    fn variant_name_without_extension() {
        assert_eq!(variant_file_name("logo", 10, 20), "logo.10x20");
    }

    #[test]
    fn inline_raster_round_trips_bytes() {
        let tmp = TempDir::new().unwrap();
        create_small_png(&tmp.path().join("a.png"), 4, 4);
        let resolved = resolved_in(&tmp, "assets", "a.png");
        let original = fs::read(&resolved.path).unwrap();

        let attrs = AttrList::parse(r#"alt="logo""#);
        let tag = inline_tag(&resolved, "png", &attrs).unwrap();

        assert!(tag.starts_with("<img alt=\"logo\" src='data:image/png;base64,"));
        let payload = tag
            .split("base64,")
            .nth(1)
            .unwrap()
            .split('\'')
            .next()
            .unwrap();
        let decoded = base64::engine::general_purpose::STANDARD
            .decode(payload)
            .unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn inline_raster_without_attributes() {
        let tmp = TempDir::new().unwrap();
        create_small_png(&tmp.path().join("a.png"), 2, 2);
        let resolved = resolved_in(&tmp, "", "a.png");

        let tag = inline_tag(&resolved, "png", &AttrList::default()).unwrap();
        assert!(tag.starts_with("<img src='data:image/png;base64,"));
    }

    #[test]
    fn inline_svg_injects_attributes_and_single_quotes() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("icon.svg"), SAMPLE_SVG).unwrap();
        let resolved = resolved_in(&tmp, "assets", "icon.svg");

        let attrs = AttrList::parse(r#"class="icon" width="16""#);
        let tag = inline_tag(&resolved, "svg", &attrs).unwrap();

        assert!(tag.starts_with("<svg class='icon' width='16' "));
        assert!(!tag.contains('"'), "no double quotes may survive: {tag}");
        assert!(!tag.contains("<!--"));
        assert!(!tag.contains("<?xml"));
        assert!(tag.contains("<circle"));
    }

    #[test]
    fn inline_missing_file_errors() {
        let tmp = TempDir::new().unwrap();
        let resolved = resolved_in(&tmp, "assets", "missing.png");
        assert!(inline_tag(&resolved, "png", &AttrList::default()).is_err());
    }

    #[test]
    fn resize_plans_from_declared_width() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a.png"), b"placeholder").unwrap();
        let resolved = resolved_in(&tmp, "assets", "a.png");
        let backend = MockBackend::with_probe(
            RasterFormat::Png,
            Dimensions {
                width: 800,
                height: 400,
            },
        );

        let attrs = AttrList::parse(r#"width="200""#);
        let r = resize_tag(&backend, &resolved, "a.png", &attrs, None, Quality::new(70)).unwrap();

        assert_eq!(r.target, (200, 100));
        assert_eq!(r.output, tmp.path().join("a.200x100.png"));
        assert_eq!(r.tag, "<img width=\"200\" src='assets/a.200x100.png' />");

        let ops = backend.get_operations();
        assert!(matches!(
            &ops[2],
            RecordedOp::Resize {
                width: 200,
                height: 100,
                format: RasterFormat::Png,
                ..
            }
        ));
    }

    #[test]
    fn resize_strips_src_prefix_from_base() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a.jpg"), b"placeholder").unwrap();
        let resolved = resolved_in(&tmp, "src/assets", "a.jpg");
        let backend = MockBackend::with_probe(
            RasterFormat::Jpeg,
            Dimensions {
                width: 100,
                height: 100,
            },
        );

        let r = resize_tag(
            &backend,
            &resolved,
            "a.jpg",
            &AttrList::default(),
            None,
            Quality::new(70),
        )
        .unwrap();
        assert_eq!(r.tag, "<img src='assets/a.100x100.jpg' />");
    }

    #[test]
    fn resize_applies_max_bound() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a.png"), b"placeholder").unwrap();
        let resolved = resolved_in(&tmp, "assets", "a.png");
        let backend = MockBackend::with_probe(
            RasterFormat::Png,
            Dimensions {
                width: 800,
                height: 400,
            },
        );

        let r = resize_tag(
            &backend,
            &resolved,
            "a.png",
            &AttrList::default(),
            Some((200, 200)),
            Quality::new(70),
        )
        .unwrap();
        assert_eq!(r.target, (200, 100));
    }

    #[test]
    fn resize_unsupported_content_writes_nothing() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a.png"), b"not an image").unwrap();
        let resolved = resolved_in(&tmp, "assets", "a.png");
        let backend = MockBackend::with_probe(
            RasterFormat::Unsupported,
            Dimensions {
                width: 0,
                height: 0,
            },
        );

        let err = resize_tag(
            &backend,
            &resolved,
            "a.png",
            &AttrList::default(),
            None,
            Quality::new(70),
        )
        .unwrap_err();
        assert!(matches!(err, RenderError::UnsupportedFormat));
        // Probe only — no resize op recorded.
        assert_eq!(backend.get_operations().len(), 1);
    }

    #[test]
    fn rewritten_src_joins_cleanly() {
        assert_eq!(rewritten_src("assets", "a.png"), "assets/a.png");
        assert_eq!(rewritten_src("assets/", "a.png"), "assets/a.png");
        assert_eq!(rewritten_src("", "a.png"), "a.png");
        assert_eq!(rewritten_src("src/img", "a.png"), "img/a.png");
    }
}
