//! Site emission.
//!
//! Stage 2 of the build. Takes a [`BuildPlan`] and writes the output tree:
//!
//! ```text
//! dist/
//! ├── index.html          # primary page, copied as-is
//! ├── about.html          # stylesheet + script references injected
//! ├── img/logo.png        # assets, source prefix stripped
//! └── fonts/inter.woff2
//! ```
//!
//! The output directory is removed first when `output.clean` is set, so files
//! from earlier builds never linger. Script and stylesheet bundles are
//! referenced by path only; producing them is left to the JS/CSS toolchain.
//!
//! ## Parallel Copying
//!
//! Pages are rendered sequentially (each needs its template read and
//! rewritten). Assets are plain copies and go through
//! [rayon](https://docs.rs/rayon)'s global pool.

use crate::assets::AssetKind;
use crate::inject::{inject, strip_comments};
use crate::pages::InjectionMode;
use crate::plan::BuildPlan;
use rayon::prelude::*;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EmitError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Cannot read page template {}: {source}", path.display())]
    Template { path: PathBuf, source: io::Error },
    #[error("Cannot write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
}

#[derive(Debug, Clone, Serialize)]
pub struct EmittedPage {
    pub output_filename: String,
    pub injection_mode: InjectionMode,
    pub bytes: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct EmittedAsset {
    pub output_path: String,
    pub kind: AssetKind,
    pub bytes: u64,
}

/// What a build actually wrote.
#[derive(Debug, Clone, Serialize)]
pub struct EmitReport {
    pub output_dir: PathBuf,
    pub cleaned: bool,
    pub pages: Vec<EmittedPage>,
    pub assets: Vec<EmittedAsset>,
}

pub fn emit(plan: &BuildPlan, project_root: &Path) -> Result<EmitReport, EmitError> {
    let output_dir = plan.output_dir(project_root);

    let cleaned = plan.config.output.clean && output_dir.exists();
    if cleaned {
        fs::remove_dir_all(&output_dir)?;
    }
    fs::create_dir_all(&output_dir)?;

    let preset = plan.config.html.preset(plan.mode);
    let mut pages = Vec::with_capacity(plan.pages.len());
    for directive in &plan.pages {
        let template =
            fs::read_to_string(&directive.template_path).map_err(|source| EmitError::Template {
                path: directive.template_path.clone(),
                source,
            })?;

        let mut html = inject(&template, directive.injection_mode, &plan.config.bundle);
        if preset.strip_comments {
            html = strip_comments(&html);
        }

        let dest = output_dir.join(&directive.output_filename);
        fs::write(&dest, &html).map_err(|source| EmitError::Write { path: dest, source })?;

        pages.push(EmittedPage {
            output_filename: directive.output_filename.clone(),
            injection_mode: directive.injection_mode,
            bytes: html.len(),
        });
    }

    let assets = plan
        .assets
        .par_iter()
        .map(|asset| {
            let src = project_root.join(&asset.source_path);
            let dest = output_dir.join(&asset.output_path);
            copy_asset(&src, &dest).map(|bytes| EmittedAsset {
                output_path: asset.output_path.clone(),
                kind: asset.kind,
                bytes,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(EmitReport {
        output_dir,
        cleaned,
        pages,
        assets,
    })
}

fn copy_asset(src: &Path, dest: &Path) -> Result<u64, EmitError> {
    let wrap = |source| EmitError::Write {
        path: dest.to_path_buf(),
        source,
    };
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).map_err(wrap)?;
    }
    fs::copy(src, dest).map_err(wrap)
}
