//! Reference path resolution.
//!
//! A reference's source path is relative to the markup it appears in, which
//! this tool never knows the location of. Resolution instead tries an ordered
//! list of candidate base directories: the reference's own relative directory
//! first, then the configured search path. The first base under which the
//! file exists wins.
//!
//! A leading `/` on a candidate is stripped — absolute-looking paths in
//! markup are site-root-relative, not filesystem-absolute.

use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("`{0}` not found in any candidate directory")]
    NotFound(String),
}

/// A reference matched to a file on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedReference {
    /// The candidate base the file was found under, without a trailing `/`.
    /// Rewritten tags are built from this, not from the on-disk path.
    pub base: String,
    /// Path to the file, as joined from the base and file name.
    pub path: PathBuf,
}

/// Try `own_dir` then each entry of `search_path` in order; return the first
/// base under which `file_name` exists.
pub fn resolve(
    own_dir: &str,
    file_name: &str,
    search_path: &[String],
) -> Result<ResolvedReference, ResolveError> {
    let candidates = std::iter::once(own_dir).chain(search_path.iter().map(String::as_str));
    for candidate in candidates {
        let base = candidate.strip_prefix('/').unwrap_or(candidate);
        let path = Path::new(base).join(file_name);
        if path.exists() {
            return Ok(ResolvedReference {
                base: base.trim_end_matches('/').to_string(),
                path,
            });
        }
    }
    Err(ResolveError::NotFound(file_name.to_string()))
}
