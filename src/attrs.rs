//! Ordered attribute list for image tags.
//!
//! The scanner hands over raw attribute text verbatim. Rather than splicing
//! substrings back together, the text is parsed once into an ordered list of
//! `name`/`value` pairs and re-serialized deterministically — order and quote
//! style are preserved, so "keep everything, override specific fields"
//! behavior needs no string surgery.
//!
//! This module also extracts the declared display size of a tag: integer
//! `width`/`height` attributes, overridden by `width:<n>px` / `height:<n>px`
//! values inside a `style` attribute.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static STYLE_WIDTH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|[;\s])width:\s*(\d+)\s*px").unwrap());
static STYLE_HEIGHT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|[;\s])height:\s*(\d+)\s*px").unwrap());

/// Quote style an attribute value was written with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quote {
    Double,
    Single,
    /// Unquoted value, or a valueless attribute.
    Bare,
}

/// One attribute: name, optional raw value, original quote style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attr {
    pub name: String,
    pub value: Option<String>,
    pub quote: Quote,
}

/// Ordered attribute collection parsed from a tag's raw attribute text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttrList {
    attrs: Vec<Attr>,
}

impl AttrList {
    /// Parse raw attribute text (everything between the tag name and `>`,
    /// minus `src`). A stray self-closing `/` token is discarded.
    pub fn parse(raw: &str) -> Self {
        let b = raw.as_bytes();
        let mut attrs = Vec::new();
        let mut i = 0;
        while i < b.len() {
            while i < b.len() && b[i].is_ascii_whitespace() {
                i += 1;
            }
            if i >= b.len() {
                break;
            }
            if b[i] == b'/' || b[i] == b'=' {
                i += 1;
                continue;
            }
            let name_start = i;
            while i < b.len() && !b[i].is_ascii_whitespace() && b[i] != b'=' {
                i += 1;
            }
            let name = raw[name_start..i].to_string();
            let mut j = i;
            while j < b.len() && b[j].is_ascii_whitespace() {
                j += 1;
            }
            if j < b.len() && b[j] == b'=' {
                j += 1;
                while j < b.len() && b[j].is_ascii_whitespace() {
                    j += 1;
                }
                if j < b.len() && (b[j] == b'"' || b[j] == b'\'') {
                    let quote_byte = b[j];
                    let value_start = j + 1;
                    let mut k = value_start;
                    while k < b.len() && b[k] != quote_byte {
                        k += 1;
                    }
                    attrs.push(Attr {
                        name,
                        value: Some(raw[value_start..k].to_string()),
                        quote: if quote_byte == b'"' {
                            Quote::Double
                        } else {
                            Quote::Single
                        },
                    });
                    i = (k + 1).min(b.len());
                } else {
                    let value_start = j;
                    let mut k = j;
                    while k < b.len() && !b[k].is_ascii_whitespace() {
                        k += 1;
                    }
                    attrs.push(Attr {
                        name,
                        value: Some(raw[value_start..k].to_string()),
                        quote: Quote::Bare,
                    });
                    i = k;
                }
            } else {
                attrs.push(Attr {
                    name,
                    value: None,
                    quote: Quote::Bare,
                });
            }
        }
        Self { attrs }
    }

    /// Value of the first attribute with this name (ASCII-case-insensitive).
    /// `None` for both "absent" and "valueless".
    pub fn get(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|a| a.name.eq_ignore_ascii_case(name))
            .and_then(|a| a.value.as_deref())
    }

    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }
}

impl fmt::Display for AttrList {
    /// Deterministic serialization: original order, original quote style,
    /// single spaces between attributes.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, attr) in self.attrs.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            match (&attr.value, attr.quote) {
                (None, _) => write!(f, "{}", attr.name)?,
                (Some(v), Quote::Double) => write!(f, "{}=\"{}\"", attr.name, v)?,
                (Some(v), Quote::Single) => write!(f, "{}='{}'", attr.name, v)?,
                (Some(v), Quote::Bare) => write!(f, "{}={}", attr.name, v)?,
            }
        }
        Ok(())
    }
}

/// Display size declared on a tag. Either, both, or neither axis may be set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeclaredSize {
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// Extract the declared size: `width`/`height` attributes first, then
/// `style` pixel values, which take precedence when present.
pub fn declared_size(attrs: &AttrList) -> DeclaredSize {
    let mut width = attrs.get("width").and_then(leading_uint);
    let mut height = attrs.get("height").and_then(leading_uint);
    if let Some(style) = attrs.get("style") {
        if let Some(w) = style_px(&STYLE_WIDTH, style) {
            width = Some(w);
        }
        if let Some(h) = style_px(&STYLE_HEIGHT, style) {
            height = Some(h);
        }
    }
    DeclaredSize { width, height }
}

fn style_px(re: &Regex, style: &str) -> Option<u32> {
    re.captures(style)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Parse the leading digit run of a value, so `"200"` and `"200px"` both
/// yield 200.
fn leading_uint(value: &str) -> Option<u32> {
    let t = value.trim_start();
    let end = t
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(t.len());
    t[..end].parse().ok()
}
