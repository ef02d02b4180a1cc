//! Build configuration module.
//!
//! Handles loading, validating, and merging `pagesmith.toml`. Stock defaults
//! form the base layer; the project's file (if any) is merged on top.
//!
//! ## Config File Location
//!
//! ```text
//! my-site/
//! ├── pagesmith.toml           # Optional, overrides stock defaults
//! ├── src/                     # Source directory
//! │   ├── index.html           # Primary page
//! │   ├── about.html
//! │   └── img/logo.png
//! └── dist/                    # Output directory (cleaned on build)
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! source_dir = "src"
//! output_dir = "dist"
//!
//! [pages]
//! marker = ".html"          # Entries whose name contains this are pages
//! primary = "index.html"    # Exact name of the page that gets no injection
//!
//! [bundle]
//! script = "js/bundle.js"   # Script reference injected into pages
//! stylesheet = "css/style.css"
//! script_loading = "defer"  # defer | blocking | module
//!
//! [assets]
//! strip_prefix = "src/"     # Removed from the front of asset output paths
//!
//! [output]
//! clean = true              # Remove the output directory before emitting
//!
//! [html.production]
//! strip_comments = true
//!
//! [html.development]
//! strip_comments = false
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse — override just the values you want:
//!
//! ```toml
//! [pages]
//! primary = "home.html"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Component, Path};
use thiserror::Error;

/// Name of the config file looked up in the project root.
pub const CONFIG_FILENAME: &str = "pagesmith.toml";

/// Environment variable selecting the build mode.
pub const MODE_ENV_VAR: &str = "PAGESMITH_ENV";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Build mode. Only selects the HTML output preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Production,
    Development,
}

impl Mode {
    /// Interpret a raw environment value: exactly `production` selects
    /// production, anything else (including absence) is development.
    pub fn from_env_value(value: Option<&str>) -> Self {
        match value {
            Some("production") => Mode::Production,
            _ => Mode::Development,
        }
    }

    /// Read the mode from [`MODE_ENV_VAR`].
    pub fn from_env() -> Self {
        Self::from_env_value(std::env::var(MODE_ENV_VAR).ok().as_deref())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Production => "production",
            Mode::Development => "development",
        }
    }
}

/// Build configuration loaded from `pagesmith.toml`.
///
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Directory holding page templates and assets, relative to the project.
    pub source_dir: String,
    /// Directory receiving emitted pages and assets, relative to the project.
    pub output_dir: String,
    /// Page discovery rules.
    pub pages: PagesConfig,
    /// Bundle references injected into non-primary pages.
    pub bundle: BundleConfig,
    /// Asset emission settings.
    pub assets: AssetsConfig,
    /// Output directory handling.
    pub output: OutputConfig,
    /// Per-mode HTML presets.
    pub html: HtmlConfig,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            source_dir: "src".to_string(),
            output_dir: "dist".to_string(),
            pages: PagesConfig::default(),
            bundle: BundleConfig::default(),
            assets: AssetsConfig::default(),
            output: OutputConfig::default(),
            html: HtmlConfig::default(),
        }
    }
}

impl BuildConfig {
    /// Validate config values are usable for a build.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_project_dir("source_dir", &self.source_dir)?;
        check_project_dir("output_dir", &self.output_dir)?;
        // The output directory is removed on every build and the source tree
        // is walked for assets, so neither may live inside the other.
        let (source, output) = (Path::new(&self.source_dir), Path::new(&self.output_dir));
        if source.starts_with(output) || output.starts_with(source) {
            return Err(ConfigError::Validation(format!(
                "source_dir ({}) and output_dir ({}) must not contain one another",
                self.source_dir, self.output_dir
            )));
        }
        for (key, value) in [
            ("pages.marker", &self.pages.marker),
            ("pages.primary", &self.pages.primary),
            ("bundle.script", &self.bundle.script),
            ("bundle.stylesheet", &self.bundle.stylesheet),
        ] {
            if value.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "{key} must not be empty"
                )));
            }
        }
        Ok(())
    }
}

/// A project directory must be a plain relative path: the output directory
/// is deleted on clean, so `.`, absolute paths, and `..` are refused.
fn check_project_dir(key: &str, value: &str) -> Result<(), ConfigError> {
    let path = Path::new(value);
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{key} must not be empty")));
    }
    let all_normal = path.components().all(|c| matches!(c, Component::Normal(_)));
    if !all_normal || path.components().next().is_none() {
        return Err(ConfigError::Validation(format!(
            "{key} must be a relative path inside the project, got {value:?}"
        )));
    }
    Ok(())
}

/// Page discovery rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PagesConfig {
    /// Substring identifying a page template by name.
    pub marker: String,
    /// Exact (case-sensitive) name of the primary page.
    pub primary: String,
}

impl Default for PagesConfig {
    fn default() -> Self {
        Self {
            marker: ".html".to_string(),
            primary: "index.html".to_string(),
        }
    }
}

/// How the injected script tag loads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptLoading {
    #[default]
    Defer,
    Blocking,
    Module,
}

/// Bundle references injected into pages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BundleConfig {
    /// Script bundle path, relative to the output directory.
    pub script: String,
    /// Extracted stylesheet path, relative to the output directory.
    pub stylesheet: String,
    pub script_loading: ScriptLoading,
}

impl Default for BundleConfig {
    fn default() -> Self {
        Self {
            script: "js/bundle.js".to_string(),
            stylesheet: "css/style.css".to_string(),
            script_loading: ScriptLoading::Defer,
        }
    }
}

/// Asset emission settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AssetsConfig {
    /// Leading path components removed from project-relative asset paths.
    pub strip_prefix: String,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            strip_prefix: "src/".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub clean: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { clean: true }
    }
}

/// HTML output presets, one per mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HtmlConfig {
    pub production: HtmlPreset,
    pub development: HtmlPreset,
}

impl Default for HtmlConfig {
    fn default() -> Self {
        Self {
            production: HtmlPreset {
                strip_comments: true,
            },
            development: HtmlPreset {
                strip_comments: false,
            },
        }
    }
}

impl HtmlConfig {
    /// The preset that applies in `mode`.
    pub fn preset(&self, mode: Mode) -> &HtmlPreset {
        match mode {
            Mode::Production => &self.production,
            Mode::Development => &self.development,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HtmlPreset {
    /// Remove `<!-- ... -->` comments from emitted pages.
    pub strip_comments: bool,
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(BuildConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `pagesmith.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join(CONFIG_FILENAME);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<BuildConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: BuildConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config for the project rooted at `project_root`.
pub fn load_config(project_root: &Path) -> Result<BuildConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(project_root)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `pagesmith.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# pagesmith configuration
# =======================
# Every key is optional. Values shown are the stock defaults.

# Directory containing page templates and assets, relative to this file.
source_dir = "src"

# Directory receiving the built site. Must not contain or sit inside source_dir.
output_dir = "dist"

[pages]
# A top-level entry of source_dir is a page when its name contains this.
marker = ".html"
# The primary page is emitted as-is, without injected bundle references.
# Matched exactly and case-sensitively.
primary = "index.html"

[bundle]
# Paths of the script and stylesheet bundles, relative to output_dir.
# Every page other than the primary one references both.
script = "js/bundle.js"
stylesheet = "css/style.css"
# How the script tag loads: "defer", "blocking", or "module".
script_loading = "defer"

[assets]
# Images, fonts, media, JSON and PHP files are copied to output_dir at
# their project-relative path with these leading path components removed
# ("src" and "src/" are equivalent).
strip_prefix = "src/"

[output]
# Remove output_dir before emitting.
clean = true

# HTML presets, selected by PAGESMITH_ENV (or --mode).
[html.production]
strip_comments = true

[html.development]
strip_comments = false
"##
}
