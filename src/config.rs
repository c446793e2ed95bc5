//! Run configuration.
//!
//! Loaded once per run from an `imgfold.toml` file and/or CLI flags. All
//! fields have stock defaults; config files are sparse — override just the
//! values you want. Unknown keys are rejected to catch typos early.
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! file_types = ["html", "js"]   # Text files eligible for rewriting
//! search_path = ["./"]          # Base directories tried after the
//!                               # reference's own relative directory
//! inline_size = 3072            # Files strictly smaller are inlined (bytes)
//! resize = false                # false | true (unbounded) | "800x600"
//! quality = 70                  # Lossy encoder quality (1-100)
//! ```

use crate::imaging::Quality;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Immutable per-run configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Extensions of text files eligible for scanning.
    pub file_types: Vec<String>,
    /// Base directories searched after the reference's own directory.
    pub search_path: Vec<String>,
    /// Byte threshold; files strictly smaller are inlined.
    pub inline_size: u64,
    /// Resize action: disabled, unbounded, or bounded by `WxH`.
    pub resize: ResizeMode,
    /// Encoder quality for lossy re-encoding.
    pub quality: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            file_types: vec!["html".to_string(), "js".to_string()],
            search_path: vec!["./".to_string()],
            inline_size: 3072,
            resize: ResizeMode::Disabled,
            quality: 70,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        Ok(toml::from_str(&fs::read_to_string(path)?)?)
    }

    pub fn quality(&self) -> Quality {
        Quality::new(self.quality)
    }

    /// Whether an identifier's extension matches `file_types`. A `?query`
    /// suffix on the identifier is ignored.
    pub fn is_eligible(&self, id: &str) -> bool {
        let ext = id
            .rsplit('.')
            .next()
            .unwrap_or("")
            .split('?')
            .next()
            .unwrap_or("");
        self.file_types.iter().any(|t| t.eq_ignore_ascii_case(ext))
    }
}

/// Whether and how far the resize action may shrink images.
///
/// In config files: `false`, `true`, or a `"WxH"` bound. A bound of `1x1` or
/// smaller means "enabled, unconstrained" (legacy sentinel).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ResizeModeRepr", into = "ResizeModeRepr")]
pub enum ResizeMode {
    Disabled,
    Enabled { max: Option<(u32, u32)> },
}

impl ResizeMode {
    pub fn is_enabled(&self) -> bool {
        matches!(self, ResizeMode::Enabled { .. })
    }

    pub fn max(&self) -> Option<(u32, u32)> {
        match self {
            ResizeMode::Enabled { max } => *max,
            ResizeMode::Disabled => None,
        }
    }
}

impl FromStr for ResizeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "off" | "false" => Ok(ResizeMode::Disabled),
            "on" | "true" => Ok(ResizeMode::Enabled { max: None }),
            _ => {
                let (w, h) = s
                    .split_once('x')
                    .ok_or_else(|| format!("expected `off`, `on`, or `WxH`, got `{s}`"))?;
                let w: u32 = w
                    .trim()
                    .parse()
                    .map_err(|_| format!("invalid width in `{s}`"))?;
                let h: u32 = h
                    .trim()
                    .parse()
                    .map_err(|_| format!("invalid height in `{s}`"))?;
                if w == 0 || h == 0 {
                    return Err(format!("resize bound must be positive, got `{s}`"));
                }
                if w <= 1 && h <= 1 {
                    Ok(ResizeMode::Enabled { max: None })
                } else {
                    Ok(ResizeMode::Enabled { max: Some((w, h)) })
                }
            }
        }
    }
}

/// Wire form of [`ResizeMode`]: a bare bool or a `"WxH"` string.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum ResizeModeRepr {
    Flag(bool),
    Bound(String),
}

impl TryFrom<ResizeModeRepr> for ResizeMode {
    type Error = String;

    fn try_from(repr: ResizeModeRepr) -> Result<Self, Self::Error> {
        match repr {
            ResizeModeRepr::Flag(false) => Ok(ResizeMode::Disabled),
            ResizeModeRepr::Flag(true) => Ok(ResizeMode::Enabled { max: None }),
            ResizeModeRepr::Bound(s) => s.parse(),
        }
    }
}

impl From<ResizeMode> for ResizeModeRepr {
    fn from(mode: ResizeMode) -> Self {
        match mode {
            ResizeMode::Disabled => ResizeModeRepr::Flag(false),
            ResizeMode::Enabled { max: None } => ResizeModeRepr::Flag(true),
            ResizeMode::Enabled { max: Some((w, h)) } => ResizeModeRepr::Bound(format!("{w}x{h}")),
        }
    }
}
