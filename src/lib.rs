//! # imgfold
//!
//! A build-time source transform for markup and script files: it finds image
//! references in raw text and, per reference, either inlines the image's bytes
//! as a data URI, writes a resized raster variant to disk and repoints the
//! reference at it, or leaves the reference alone.
//!
//! # Architecture: Scan → Resolve → Classify → Render
//!
//! One pass over a text blob works through four stages, each a small module:
//!
//! ```text
//! 1. Scan      text      →  references       (regex match, no AST)
//! 2. Resolve   reference →  file on disk     (candidate base directories)
//! 3. Classify  file      →  inline | resize | skip
//! 4. Render    decision  →  replacement tag  (+ resized file for resize)
//! ```
//!
//! The [`rewrite`] driver folds these over the original text, copying
//! unmatched spans into a fresh output buffer and splicing in rendered
//! replacements. It never mutates the buffer it is scanning, so replacement
//! length changes cannot invalidate later matches.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Finds image-reference tags and their attribute/source-path text |
//! | [`resolve`] | Locates the referenced file by trying candidate base directories |
//! | [`attrs`] | Ordered attribute list: parse once, re-serialize deterministically |
//! | [`plan`] | Pure dimension math: explicit attrs + natural size + max bound |
//! | [`classify`] | Inline / resize / skip decision from byte size and extension |
//! | [`render`] | Produces replacement tags; drives the encoder for resizes |
//! | [`rewrite`] | Single-pass driver returning rewritten text + structured outcomes |
//! | [`svg`] | Multipass SVG minifier used by the inline path |
//! | [`imaging`] | Encoder backend: format probe, dimensions, resize + encode |
//! | [`config`] | `imgfold.toml` loading with stock defaults and sparse overrides |
//! | [`output`] | Renders structured outcomes to human-readable report lines |
//!
//! # Design Decisions
//!
//! ## Decisions Are Pure, Reporting Is Separate
//!
//! The scanner, resolver, classifier, and planner return structured values;
//! nothing in the decision path writes to a console. [`rewrite::rewrite`]
//! collects one [`rewrite::Outcome`] per reference and [`output`] turns those
//! into text. Unit tests exercise every decision without capturing stdout.
//!
//! ## No Error Is Fatal
//!
//! Every failure — unresolved path, dynamic source, unrecognized format,
//! encoder error — is caught at single-reference granularity. The worst
//! outcome for any reference is "left byte-for-byte unchanged"; the run
//! always completes and reports what it skipped.
//!
//! ## Format From Content, Not Extension
//!
//! The resize path picks its encoder from the decoded container format
//! ([`imaging::RasterFormat`]), not the filename extension, so a misnamed
//! `.png` that is really a GIF is skipped instead of mis-encoded.
//!
//! ## Deterministic Variant Names
//!
//! Resized files are named `<stem>.<width>x<height>.<ext>` beside the
//! original. Repeated runs with identical inputs compute identical names and
//! overwrite rather than accumulate.

pub mod attrs;
pub mod classify;
pub mod config;
pub mod imaging;
pub mod output;
pub mod plan;
pub mod render;
pub mod resolve;
pub mod rewrite;
pub mod scan;
pub mod svg;

#[cfg(test)]
pub(crate) mod test_helpers;
