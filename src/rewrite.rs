//! The rewrite driver.
//!
//! One pass over one text blob: scan for references, resolve and classify
//! each, render its replacement, and fold everything into a fresh output
//! buffer. Matches come from the *original* text and are spliced by byte
//! span, so replacements of different lengths cannot invalidate later
//! matches — there is no mutate-while-scanning.
//!
//! References are processed strictly in order of appearance; each one's work
//! (stat, read, encode) completes before its replacement is appended.
//! Nothing here is fatal: every per-reference failure becomes a
//! [`SkipReason`] and the reference is emitted unchanged.
//!
//! The driver returns structured [`Outcome`]s rather than printing;
//! [`output`](crate::output) renders them for humans.

use crate::attrs::AttrList;
use crate::classify::{self, Action, SkipReason};
use crate::config::Config;
use crate::imaging::ImageBackend;
use crate::render::{self, RenderError};
use crate::resolve;
use crate::scan::{self, Reference};
use std::path::PathBuf;

/// Rewritten text plus one outcome per reference encountered.
#[derive(Debug)]
pub struct RewriteResult {
    pub text: String,
    pub outcomes: Vec<Outcome>,
}

/// What happened to one reference.
#[derive(Debug, Clone)]
pub enum Outcome {
    /// Embedded into the output; `bytes` is the source file size.
    Inlined { src: String, bytes: u64 },
    /// A variant file was written and the reference repointed.
    Resized {
        src: String,
        output: PathBuf,
        natural: (u32, u32),
        target: (u32, u32),
    },
    /// Left byte-for-byte unchanged.
    Skipped { src: String, reason: SkipReason },
}

enum Processed {
    Replaced(String, Outcome),
    Unchanged(Outcome),
}

/// Rewrite one text blob. Never fails; the worst per-reference outcome is
/// "unchanged".
pub fn rewrite(text: &str, config: &Config, backend: &impl ImageBackend) -> RewriteResult {
    let mut out = String::with_capacity(text.len());
    let mut outcomes = Vec::new();
    let mut cursor = 0;
    for reference in scan::references(text) {
        let (start, end) = reference.span;
        out.push_str(&text[cursor..start]);
        cursor = end;
        match process_reference(&reference, config, backend) {
            Processed::Replaced(replacement, outcome) => {
                out.push_str(&replacement);
                outcomes.push(outcome);
            }
            Processed::Unchanged(outcome) => {
                out.push_str(&reference.tag);
                outcomes.push(outcome);
            }
        }
    }
    out.push_str(&text[cursor..]);
    RewriteResult {
        text: out,
        outcomes,
    }
}

fn skip(src: &str, reason: SkipReason) -> Processed {
    Processed::Unchanged(Outcome::Skipped {
        src: src.to_string(),
        reason,
    })
}

fn process_reference(
    reference: &Reference,
    config: &Config,
    backend: &impl ImageBackend,
) -> Processed {
    let src = &reference.src;
    // Dynamic references never touch the filesystem.
    if reference.is_dynamic() {
        return skip(src, SkipReason::Dynamic);
    }
    let resolved = match resolve::resolve(reference.dir(), &reference.file_name, &config.search_path)
    {
        Ok(r) => r,
        Err(resolve::ResolveError::NotFound(_)) => return skip(src, SkipReason::NotFound),
    };
    let byte_size = match std::fs::metadata(&resolved.path) {
        Ok(meta) => meta.len(),
        Err(e) => return skip(src, SkipReason::Failed(e.to_string())),
    };
    let attrs = AttrList::parse(&reference.attr_text());

    match classify::classify(
        byte_size,
        &reference.ext,
        config.inline_size,
        config.resize.is_enabled(),
    ) {
        Action::Inline => match render::inline_tag(&resolved, &reference.ext, &attrs) {
            Ok(tag) => Processed::Replaced(
                tag,
                Outcome::Inlined {
                    src: src.clone(),
                    bytes: byte_size,
                },
            ),
            Err(e) => skip(src, SkipReason::Failed(e.to_string())),
        },
        Action::Resize => match render::resize_tag(
            backend,
            &resolved,
            &reference.file_name,
            &attrs,
            config.resize.max(),
            config.quality(),
        ) {
            Ok(r) => Processed::Replaced(
                r.tag,
                Outcome::Resized {
                    src: src.clone(),
                    output: r.output,
                    natural: (r.natural.width, r.natural.height),
                    target: r.target,
                },
            ),
            Err(RenderError::UnsupportedFormat) => skip(src, SkipReason::UnsupportedFormat),
            Err(e) => skip(src, SkipReason::Failed(e.to_string())),
        },
        Action::Skip(reason) => skip(src, reason),
    }
}
