//! # pagesmith
//!
//! A multi-page site builder. Every HTML file at the top of the source
//! directory becomes one output page; script and stylesheet bundle
//! references are injected into every page except the primary one; images,
//! fonts, media and data files are copied across with the source prefix
//! stripped from their paths.
//!
//! # Architecture: Two-Stage Pipeline
//!
//! ```text
//! 1. Plan   src/      →  BuildPlan   (one directory read → structured data)
//! 2. Emit   BuildPlan →  dist/       (clean, write pages, copy assets)
//! ```
//!
//! The source directory is read once, during planning. The resulting
//! [`plan::BuildPlan`] is passed explicitly to every consumer (emit stage,
//! CLI output, `plan --json`), so no stage re-scans the filesystem.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`pages`] | Page discovery and per-page emission directives |
//! | [`assets`] | Asset discovery by extension rule table |
//! | [`rewrite`] | Leading-prefix removal and slash-normalised relative paths |
//! | [`plan`] | Stage 1: builds the [`plan::BuildPlan`] from config + source dir |
//! | [`inject`] | Renders bundle tags with Maud and places them in page markup |
//! | [`emit`] | Stage 2: cleans the output directory, writes pages, copies assets |
//! | [`config`] | `pagesmith.toml` loading, merging, validation, build mode |
//! | [`output`] | CLI output formatting for both stages |
//!
//! # Design Decisions
//!
//! ## The Primary Page Is Left Alone
//!
//! The primary page (`index.html` unless configured otherwise) is emitted
//! exactly as written. Entry pages often carry hand-placed tags or inline
//! loaders, so only secondary pages get the bundle references. The match is
//! exact and case-sensitive; a directory holds at most one such name.
//!
//! ## Bundles Are Referenced, Not Built
//!
//! pagesmith does not resolve modules or compile Sass. The script and
//! stylesheet paths in `[bundle]` name files produced by whatever JS/CSS
//! toolchain the project already uses.

pub mod assets;
pub mod config;
pub mod emit;
pub mod inject;
pub mod output;
pub mod pages;
pub mod plan;
pub mod rewrite;

#[cfg(test)]
pub(crate) mod test_helpers;
