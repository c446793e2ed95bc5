//! Report formatting for rewrite outcomes.
//!
//! The driver returns structured [`Outcome`]s; this module turns them into
//! human-readable lines. Each `format_*` function is pure and returns
//! strings, with a `print_*` wrapper that writes to stdout — so every
//! message is testable without capturing console output, and reporting can
//! never affect a rewrite decision.
//!
//! ```text
//! index.html
//!     --* inlined assets/logo.svg [812 bytes]
//!     --* resized assets/hero.jpg (2400x1600) -> hero.800x533.jpg (800x533)
//!     --X skipped assets/{name}.png: source path is not static
//! ```

use crate::rewrite::Outcome;
use std::path::Path;

/// Format one outcome as a single report line.
pub fn format_outcome(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Inlined { src, bytes } => {
            format!("--* inlined {src} [{bytes} bytes]")
        }
        Outcome::Resized {
            src,
            output,
            natural,
            target,
        } => {
            let name = output
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| output.display().to_string());
            format!(
                "--* resized {src} ({}x{}) -> {name} ({}x{})",
                natural.0, natural.1, target.0, target.1
            )
        }
        Outcome::Skipped { src, reason } => {
            format!("--X skipped {src}: {reason}")
        }
    }
}

/// Format the report for one rewritten file: a header line, then one
/// indented line per reference. Files with no references produce nothing.
pub fn format_report(path: &Path, outcomes: &[Outcome]) -> Vec<String> {
    if outcomes.is_empty() {
        return Vec::new();
    }
    let mut lines = vec![path.display().to_string()];
    for outcome in outcomes {
        lines.push(format!("    {}", format_outcome(outcome)));
    }
    lines
}

/// Print a file report to stdout.
pub fn print_report(path: &Path, outcomes: &[Outcome]) {
    for line in format_report(path, outcomes) {
        println!("{line}");
    }
}
