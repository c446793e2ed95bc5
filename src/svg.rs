//! Multipass SVG minifier for the inline path.
//!
//! Inlined SVGs land inside host markup, so every byte counts. The optimizer
//! removes content that contributes nothing to rendering — the XML
//! declaration, DOCTYPE, comments, and whitespace between tags — and leaves
//! element structure, attributes, and text content alone.
//!
//! With multipass enabled a pass is repeated until the output stops changing
//! (removal can expose new inter-tag whitespace runs).

use regex::Regex;
use std::sync::LazyLock;

static INTER_TAG_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r">\s+<").unwrap());

/// Optimizer settings.
#[derive(Debug, Clone)]
pub struct OptimizeOptions {
    /// Repeat passes until a fixed point is reached.
    pub multipass: bool,
    /// Upper bound on passes when `multipass` is set.
    pub max_passes: usize,
}

impl Default for OptimizeOptions {
    fn default() -> Self {
        Self {
            multipass: true,
            max_passes: 10,
        }
    }
}

/// Minify an SVG string.
pub fn optimize(svg: &str, options: &OptimizeOptions) -> String {
    let mut current = single_pass(svg);
    if options.multipass {
        for _ in 1..options.max_passes {
            let next = single_pass(&current);
            if next == current {
                break;
            }
            current = next;
        }
    }
    current
}

fn single_pass(svg: &str) -> String {
    let out = strip_delimited(svg, "<!--", "-->");
    let out = strip_delimited(&out, "<?", "?>");
    let out = strip_doctype(&out);
    INTER_TAG_WHITESPACE
        .replace_all(&out, "><")
        .trim()
        .to_string()
}

/// Remove every `open … close` span. An unterminated span is dropped to the
/// end of the input.
fn strip_delimited(text: &str, open: &str, close: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find(open) {
        out.push_str(&rest[..start]);
        match rest[start + open.len()..].find(close) {
            Some(end) => rest = &rest[start + open.len() + end + close.len()..],
            None => return out,
        }
    }
    out.push_str(rest);
    out
}

fn strip_doctype(text: &str) -> String {
    let lower = text.to_ascii_lowercase();
    match lower.find("<!doctype") {
        Some(start) => match text[start..].find('>') {
            Some(end) => format!("{}{}", &text[..start], &text[start + end + 1..]),
            None => text[..start].to_string(),
        },
        None => text.to_string(),
    }
}
