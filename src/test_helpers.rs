//! Shared test utilities for the pagesmith test suite.
//!
//! Builds throwaway projects in temp directories and provides lookups that
//! panic with the available names on a miss.
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_project();
//! let plan = plan_project(tmp.path(), Mode::Development).unwrap();
//! let about = find_directive(&plan.pages, "about.html");
//! ```

use std::fs;
use std::path::Path;
use tempfile::TempDir;

use crate::assets::AssetDirective;
use crate::pages::EmissionDirective;
use crate::plan::BuildPlan;

pub const INDEX_HTML: &str = "<!DOCTYPE html>\n<html>\n<head>\n<title>Home</title>\n</head>\n<body>\n<!-- hero -->\n<h1>Home</h1>\n</body>\n</html>\n";

pub const ABOUT_HTML: &str = "<!DOCTYPE html>\n<html>\n<head>\n<title>About</title>\n</head>\n<body>\n<!-- team -->\n<img src=\"img/logo.png\">\n</body>\n</html>\n";

// =========================================================================
// Fixture setup
// =========================================================================

/// A small multi-page project:
///
/// ```text
/// src/
/// ├── index.html
/// ├── about.html
/// ├── contact.html
/// ├── js/index.js
/// ├── scss/style.scss
/// ├── img/logo.png
/// └── fonts/inter.woff2
/// ```
pub fn setup_project() -> TempDir {
    let tmp = TempDir::new().unwrap();
    write_file(tmp.path(), "src/index.html", INDEX_HTML);
    write_file(tmp.path(), "src/about.html", ABOUT_HTML);
    write_file(
        tmp.path(),
        "src/contact.html",
        "<html><head></head><body>contact</body></html>",
    );
    write_file(tmp.path(), "src/js/index.js", "console.log('hi')");
    write_file(tmp.path(), "src/scss/style.scss", "body { margin: 0 }");
    write_file(tmp.path(), "src/img/logo.png", "fake png");
    write_file(tmp.path(), "src/fonts/inter.woff2", "fake font");
    tmp
}

/// A bare directory containing empty files with the given names.
pub fn source_dir_with(names: &[&str]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    for name in names {
        fs::write(tmp.path().join(name), "").unwrap();
    }
    tmp
}

/// Write `content` to `root/rel`, creating parent directories.
pub fn write_file(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

// =========================================================================
// Plan lookups — panics with a clear message on miss
// =========================================================================

/// Find a page directive by output filename. Panics if not found.
pub fn find_directive<'a>(directives: &'a [EmissionDirective], name: &str) -> &'a EmissionDirective {
    directives
        .iter()
        .find(|d| d.output_filename == name)
        .unwrap_or_else(|| {
            let names: Vec<&str> = directives.iter().map(|d| d.output_filename.as_str()).collect();
            panic!("page '{name}' not found. Available: {names:?}")
        })
}

/// Find an asset by output path. Panics if not found.
pub fn find_asset<'a>(plan: &'a BuildPlan, output_path: &str) -> &'a AssetDirective {
    plan.assets
        .iter()
        .find(|a| a.output_path == output_path)
        .unwrap_or_else(|| {
            let paths: Vec<&str> = plan.assets.iter().map(|a| a.output_path.as_str()).collect();
            panic!("asset '{output_path}' not found. Available: {paths:?}")
        })
}
