use clap::Parser;
use imgfold::config::{Config, ResizeMode};
use imgfold::imaging::{ImageBackend, RustBackend};
use imgfold::rewrite::Outcome;
use imgfold::{output, rewrite};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use walkdir::WalkDir;

#[derive(Parser)]
#[command(name = "imgfold")]
#[command(about = "Rewrite image references in markup: inline small images, resize large ones")]
#[command(long_about = "\
Rewrite image references in markup: inline small images, resize large ones

Scans the given files (or directories, recursively) for image tags with a
static source path. Images smaller than the inline threshold are embedded
directly as data URIs (SVGs are minified first); larger raster images can be
re-encoded at the displayed size and the reference repointed at the new file,
written as <stem>.<width>x<height>.<ext> beside the original.

References whose path is interpolated, cannot be found, or cannot be decoded
are reported and left untouched. Files are rewritten in place.")]
#[command(version)]
struct Cli {
    /// Files or directories to rewrite in place
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Config file (TOML); defaults apply if absent
    #[arg(long, default_value = "imgfold.toml")]
    config: PathBuf,

    /// Base directory to search (repeatable, replaces the configured list)
    #[arg(long)]
    search_path: Vec<String>,

    /// Inline threshold in bytes
    #[arg(long)]
    inline_size: Option<u64>,

    /// Resize mode: off | on | WxH
    #[arg(long, value_parser = ResizeMode::from_str)]
    resize: Option<ResizeMode>,

    /// Encoder quality for lossy re-encoding (1-100)
    #[arg(long)]
    quality: Option<u32>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = if cli.config.exists() {
        Config::load(&cli.config)?
    } else {
        Config::default()
    };
    if !cli.search_path.is_empty() {
        config.search_path = cli.search_path.clone();
    }
    if let Some(v) = cli.inline_size {
        config.inline_size = v;
    }
    if let Some(v) = cli.resize {
        config.resize = v;
    }
    if let Some(v) = cli.quality {
        config.quality = v;
    }

    let files = collect_files(&cli.paths, &config);
    if files.is_empty() {
        eprintln!("no eligible files (file_types: {})", config.file_types.join(", "));
        return Ok(());
    }

    let backend = RustBackend::new();
    // Files are independent: each rewrites a disjoint text blob, so they can
    // run in parallel. Reporting happens afterwards, in input order.
    let reports: Vec<(PathBuf, std::io::Result<Vec<Outcome>>)> = files
        .par_iter()
        .map(|path| (path.clone(), rewrite_file(path, &config, &backend)))
        .collect();

    for (path, result) in reports {
        match result {
            Ok(outcomes) => output::print_report(&path, &outcomes),
            Err(e) => eprintln!("{}: {}", path.display(), e),
        }
    }
    Ok(())
}

/// Rewrite one file in place. The file is only written back if anything
/// actually changed.
fn rewrite_file(
    path: &Path,
    config: &Config,
    backend: &impl ImageBackend,
) -> std::io::Result<Vec<Outcome>> {
    let text = std::fs::read_to_string(path)?;
    let result = rewrite::rewrite(&text, config, backend);
    if result.text != text {
        std::fs::write(path, &result.text)?;
    }
    Ok(result.outcomes)
}

/// Expand CLI paths into the eligible file list: directories are walked
/// recursively, and everything is filtered by the configured file types.
fn collect_files(paths: &[PathBuf], config: &Config) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            for entry in WalkDir::new(path)
                .sort_by_file_name()
                .into_iter()
                .filter_map(|e| e.ok())
            {
                if entry.file_type().is_file()
                    && config.is_eligible(&entry.path().to_string_lossy())
                {
                    files.push(entry.path().to_path_buf());
                }
            }
        } else if config.is_eligible(&path.to_string_lossy()) {
            files.push(path.clone());
        }
    }
    files
}
