//! Output path rewriting shared by page and asset planning.
//!
//! Assets keep their location relative to the project when emitted, minus a
//! leading source prefix. With the default `src/` prefix:
//!
//! - `src/img/logo.png` → `img/logo.png`
//! - `src/fonts/inter.woff2` → `fonts/inter.woff2`
//! - `vendor/data.json` → `vendor/data.json` (prefix absent, unchanged)
//!
//! The prefix is matched on whole path components, with or without a
//! trailing slash: `src` and `src/` both turn `src/img/logo.png` into
//! `img/logo.png`, while `srcset/a.png` and `assets/src/a.png` are left alone.

use std::path::{Component, Path};

/// Remove the leading components named by `prefix` from `path`.
///
/// Both are `/`-separated. Returns `path` unchanged when its leading
/// components do not match, and never returns a path starting with `/`.
/// An empty prefix is a no-op; a prefix naming all of `path` yields `""`.
pub fn strip_path_prefix<'a>(path: &'a str, prefix: &str) -> &'a str {
    let prefix = prefix.trim_matches('/');
    if prefix.is_empty() {
        return path;
    }
    match path.strip_prefix(prefix) {
        Some("") => "",
        Some(rest) if rest.starts_with('/') => rest.trim_start_matches('/'),
        _ => path,
    }
}

/// Express `path` relative to `base`, joined with `/` on every platform.
///
/// Returns `None` when `path` is not under `base`.
pub fn relative_slash_path(path: &Path, base: &Path) -> Option<String> {
    let rel = path.strip_prefix(base).ok()?;
    let parts: Vec<String> = rel
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    Some(parts.join("/"))
}
