//! Asset discovery.
//!
//! Walks the source tree and collects every file whose extension matches the
//! asset rule table. Each asset is emitted at its project-relative path with
//! the configured prefix removed (see [`crate::rewrite`]):
//!
//! ```text
//! src/img/logo.png      →  dist/img/logo.png
//! src/fonts/inter.woff2 →  dist/fonts/inter.woff2
//! src/data/menu.json    →  dist/data/menu.json
//! ```
//!
//! Page templates, scripts and stylesheets are not assets. Hidden entries
//! (dot-prefixed) are skipped, including everything beneath hidden
//! directories.

use crate::rewrite::{relative_slash_path, strip_path_prefix};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum AssetError {
    #[error("Cannot walk source directory: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Asset {} is outside the project root", .0.display())]
    OutsideProject(PathBuf),
    #[error("Asset {0} maps to an empty output path (check assets.strip_prefix)")]
    EmptyOutputPath(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    Image,
    Font,
    Media,
    Data,
    Php,
}

impl AssetKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetKind::Image => "image",
            AssetKind::Font => "font",
            AssetKind::Media => "media",
            AssetKind::Data => "data",
            AssetKind::Php => "php",
        }
    }
}

/// Extension rules, checked in order. `svg` is claimed by images first.
const ASSET_RULES: &[(AssetKind, &[&str])] = &[
    (AssetKind::Image, &["png", "svg", "jpg", "jpeg", "gif"]),
    (AssetKind::Font, &["woff", "woff2", "ttf", "eot", "otf"]),
    (AssetKind::Media, &["mp4", "mp3"]),
    (AssetKind::Data, &["json"]),
    (AssetKind::Php, &["php"]),
];

/// One file copied from the source tree into the output tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetDirective {
    /// Project-relative source path, `/`-separated.
    pub source_path: String,
    /// Output-relative destination path, `/`-separated.
    pub output_path: String,
    pub kind: AssetKind,
}

/// Classify a file by extension (case-insensitive).
pub fn asset_kind(path: &Path) -> Option<AssetKind> {
    let ext = path.extension()?.to_string_lossy().to_lowercase();
    ASSET_RULES
        .iter()
        .find(|(_, exts)| exts.contains(&ext.as_str()))
        .map(|(kind, _)| *kind)
}

/// Collect asset directives for everything under `source_dir`.
///
/// `source_dir` must lie inside `project_root`; output paths are derived from
/// the project-relative path so that `strip_prefix` lines up with how the
/// source directory is spelled in config (`src/` for `source_dir = "src"`).
pub fn discover_assets(
    project_root: &Path,
    source_dir: &Path,
    strip_prefix: &str,
) -> Result<Vec<AssetDirective>, AssetError> {
    let mut assets = Vec::new();

    let walker = WalkDir::new(source_dir)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e.file_name()));

    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(kind) = asset_kind(entry.path()) else {
            continue;
        };
        let source_path = relative_slash_path(entry.path(), project_root)
            .ok_or_else(|| AssetError::OutsideProject(entry.path().to_path_buf()))?;
        let output_path = strip_path_prefix(&source_path, strip_prefix).to_string();
        if output_path.is_empty() {
            return Err(AssetError::EmptyOutputPath(source_path));
        }
        assets.push(AssetDirective {
            source_path,
            output_path,
            kind,
        });
    }

    Ok(assets)
}

fn is_hidden(name: &std::ffi::OsStr) -> bool {
    name.to_string_lossy().starts_with('.')
}
