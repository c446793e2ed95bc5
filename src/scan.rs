//! Image-reference scanner.
//!
//! Finds `<img ... src="...">` occurrences in raw text with a single regex —
//! no DOM, no AST. Each match exposes the full tag text, the raw attribute
//! text before and after `src`, the quoted source path, and the byte span of
//! the match in the original text so the driver can splice replacements.
//!
//! A source path containing `{` is an interpolated expression, not a static
//! file reference. Such matches are still surfaced (the driver reports them)
//! but [`Reference::is_dynamic`] flags them so no filesystem access happens.

use regex::Regex;
use std::sync::LazyLock;

/// Matches an image tag with a single- or double-quoted `src` value.
///
/// Capture groups: 1 = leading attribute text, 2/3 = double-/single-quoted
/// source path, 4 = trailing attribute text (may end with the self-closing
/// `/`, which attribute parsing discards).
static IMG_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<img([^>]*?)\s+src\s*=\s*(?:"([^"']+)"|'([^"']+)')([^>]*)>"#).unwrap()
});

/// One image-reference occurrence found in scanned text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    /// Byte range of the full match in the scanned text.
    pub span: (usize, usize),
    /// Full matched tag text, verbatim.
    pub tag: String,
    /// Raw attribute text between `<img` and `src`.
    pub leading: String,
    /// Quoted source-path value.
    pub src: String,
    /// Raw attribute text after the closing quote, up to `>`.
    pub trailing: String,
    /// Base name of the source path (`assets/a.png` → `a.png`).
    pub file_name: String,
    /// Extension of the base name; the whole base name if it has no dot.
    pub ext: String,
}

impl Reference {
    /// True if the source path contains an interpolation marker and must be
    /// skipped without touching the filesystem.
    pub fn is_dynamic(&self) -> bool {
        self.src.contains('{')
    }

    /// Relative directory prefix of the source path (`assets/a.png` →
    /// `assets/`). Empty when the path is a bare file name.
    pub fn dir(&self) -> &str {
        self.src.strip_suffix(self.file_name.as_str()).unwrap_or("")
    }

    /// Combined raw attribute text, with any self-closing `/` dropped.
    pub fn attr_text(&self) -> String {
        let trailing = self.trailing.trim_end();
        let trailing = trailing.strip_suffix('/').unwrap_or(trailing);
        format!("{} {}", self.leading.trim(), trailing.trim())
            .trim()
            .to_string()
    }
}

/// Lazily yield every reference in `text`, in order of appearance.
///
/// Matches are non-overlapping and carry their byte spans, so a caller can
/// reconstruct the text around them from the original input.
pub fn references(text: &str) -> impl Iterator<Item = Reference> + '_ {
    IMG_TAG.captures_iter(text).map(|caps| {
        let whole = caps.get(0).unwrap();
        let src = caps
            .get(2)
            .or_else(|| caps.get(3))
            .map(|m| m.as_str())
            .unwrap_or("")
            .to_string();
        let file_name = match src.rsplit('/').next() {
            Some("") | None => src.clone(),
            Some(name) => name.to_string(),
        };
        // Mirrors `name.split('.').pop()`: no dot means the whole name.
        let ext = file_name
            .rsplit('.')
            .next()
            .unwrap_or(file_name.as_str())
            .to_string();
        Reference {
            span: (whole.start(), whole.end()),
            tag: whole.as_str().to_string(),
            leading: caps.get(1).map(|m| m.as_str()).unwrap_or("").to_string(),
            src,
            trailing: caps.get(4).map(|m| m.as_str()).unwrap_or("").to_string(),
            file_name,
            ext,
        }
    })
}
