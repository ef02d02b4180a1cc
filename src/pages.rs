//! Page discovery and emission planning.
//!
//! Every top-level entry of the source directory whose name contains the page
//! marker (`.html` by default) becomes one output page with the same name.
//! Exactly one name is special: the primary page (`index.html` by default) is
//! emitted untouched, while every other page receives the bundle references.
//!
//! ```text
//! src/                          dist/
//! ├── index.html      ──────▶   ├── index.html     (injection: none)
//! ├── about.html      ──────▶   ├── about.html     (injection: body)
//! ├── contact.html    ──────▶   ├── contact.html   (injection: body)
//! ├── js/             (not a page)
//! └── img/            (not a page)
//! ```
//!
//! Discovery is non-recursive: pages in subdirectories are not emitted.
//! Planning is a pure function of the discovered list, so the directory is
//! read once per build and the result is passed along explicitly.

use crate::config::PagesConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DiscoverError {
    #[error("Cannot enumerate source pages in {}: {source}", path.display())]
    DirectoryNotFound { path: PathBuf, source: io::Error },
    #[error("IO error while listing {}: {source}", path.display())]
    Entry { path: PathBuf, source: io::Error },
    #[error("Page file name is not valid UTF-8: {}", path.display())]
    NonUtf8Name { path: PathBuf },
}

/// A page template found in the source directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageFile {
    /// File name, e.g. `about.html`.
    pub name: String,
    /// Whether this is the distinguished primary page.
    pub is_primary: bool,
}

/// Where generated script/style references go in an emitted page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InjectionMode {
    /// Nothing is injected.
    None,
    /// Stylesheet in `<head>`, script at the end of `<body>`.
    Body,
}

/// Everything needed to generate one output page from one template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmissionDirective {
    /// Template location: source directory joined with the page name.
    pub template_path: PathBuf,
    /// Output file name, relative to the output directory.
    pub output_filename: String,
    pub injection_mode: InjectionMode,
}

/// List page templates in `dir`.
///
/// Non-directory entries whose name contains `rules.marker` are returned,
/// sorted by name so that repeated calls on an unchanged directory agree.
/// An empty result is valid; a missing or unreadable directory is not.
pub fn discover_pages(dir: &Path, rules: &PagesConfig) -> Result<Vec<PageFile>, DiscoverError> {
    let read_dir = fs::read_dir(dir).map_err(|source| DiscoverError::DirectoryNotFound {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut names = Vec::new();
    for entry in read_dir {
        let entry = entry.map_err(|source| DiscoverError::Entry {
            path: dir.to_path_buf(),
            source,
        })?;
        let file_name = entry.file_name();
        if !file_name.to_string_lossy().contains(rules.marker.as_str()) {
            continue;
        }
        // Follows symlinks so a linked template still counts as a page.
        if entry.path().is_dir() {
            continue;
        }
        let name = file_name
            .into_string()
            .map_err(|_| DiscoverError::NonUtf8Name { path: entry.path() })?;
        names.push(name);
    }
    names.sort();

    Ok(names
        .into_iter()
        .map(|name| PageFile {
            is_primary: name == rules.primary,
            name,
        })
        .collect())
}

/// Derive one emission directive per page, in input order.
pub fn plan_emissions(pages: &[PageFile], source_dir: &Path) -> Vec<EmissionDirective> {
    pages
        .iter()
        .map(|page| EmissionDirective {
            template_path: source_dir.join(&page.name),
            output_filename: page.name.clone(),
            injection_mode: if page.is_primary {
                InjectionMode::None
            } else {
                InjectionMode::Body
            },
        })
        .collect()
}
