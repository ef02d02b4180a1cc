//! Build planning.
//!
//! Stage 1 of the build. Reads the source directory exactly once and returns
//! a [`BuildPlan`] describing every file the emit stage will write. Nothing
//! downstream touches the source listing again; the plan is the single value
//! handed to [`crate::emit::emit`] and the CLI output.

use crate::assets::{self, AssetDirective, AssetError};
use crate::config::{BuildConfig, ConfigError, Mode};
use crate::pages::{self, DiscoverError, EmissionDirective};
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlanError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Discover(#[from] DiscoverError),
    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),
}

/// Everything a build will emit.
#[derive(Debug, Clone, Serialize)]
pub struct BuildPlan {
    pub mode: Mode,
    pub config: BuildConfig,
    pub pages: Vec<EmissionDirective>,
    pub assets: Vec<AssetDirective>,
}

impl BuildPlan {
    /// Output directory resolved against the project root.
    pub fn output_dir(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.config.output_dir)
    }

    /// The directive for the primary page, if one was discovered.
    pub fn primary_page(&self) -> Option<&EmissionDirective> {
        self.pages
            .iter()
            .find(|d| d.injection_mode == pages::InjectionMode::None)
    }
}

/// Discover pages and assets under `project_root` with an already-loaded config.
pub fn plan(project_root: &Path, config: &BuildConfig, mode: Mode) -> Result<BuildPlan, PlanError> {
    let source_dir = project_root.join(&config.source_dir);

    let page_files = pages::discover_pages(&source_dir, &config.pages)?;
    let directives = pages::plan_emissions(&page_files, &source_dir);
    let mut assets =
        assets::discover_assets(project_root, &source_dir, &config.assets.strip_prefix)?;
    // A page and an asset can share an output path (`menu.html.json`); the page wins.
    assets.retain(|a| !directives.iter().any(|d| d.output_filename == a.output_path));

    Ok(BuildPlan {
        mode,
        config: config.clone(),
        pages: directives,
        assets,
    })
}

/// Load `pagesmith.toml` from `project_root`, then [`plan`].
pub fn plan_project(project_root: &Path, mode: Mode) -> Result<BuildPlan, PlanError> {
    let config = crate::config::load_config(project_root)?;
    plan(project_root, &config, mode)
}
