//! CLI output formatting for both build stages.
//!
//! Every entity is shown as a header line (positional index + identity)
//! followed by indented context lines, so plan and emit output read the same
//! way for the same page.
//!
//! ## Plan
//!
//! ```text
//! Pages
//! 001 about.html (inject: body)
//!     Source: src/about.html
//! 002 index.html (primary, no injection)
//!     Source: src/index.html
//!
//! Assets
//! 001 img/logo.png (image)
//!     Source: src/img/logo.png
//!
//! Mode: development
//! ```
//!
//! ## Emit
//!
//! ```text
//! about.html → dist/about.html (1.2 KB)
//! index.html → dist/index.html (980 B)
//!
//! Emitted 2 pages, 1 asset (1 image)
//! ```
//!
//! Format functions are pure and return `Vec<String>`; `print_*` wrappers
//! write to stdout.

use crate::assets::AssetKind;
use crate::emit::EmitReport;
use crate::pages::{EmissionDirective, InjectionMode};
use crate::plan::BuildPlan;
use std::path::Path;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn injection_label(mode: InjectionMode) -> &'static str {
    match mode {
        InjectionMode::None => "primary, no injection",
        InjectionMode::Body => "inject: body",
    }
}

/// `1 page`, `3 pages`.
fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

/// Human-readable byte size.
fn format_size(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    let b = bytes as f64;
    if b < KB {
        format!("{bytes} B")
    } else if b < KB * KB {
        format!("{:.1} KB", b / KB)
    } else {
        format!("{:.1} MB", b / (KB * KB))
    }
}

/// Per-kind counts in rule order, skipping kinds with none.
fn kind_breakdown(kinds: impl Iterator<Item = AssetKind>) -> String {
    let order = [
        AssetKind::Image,
        AssetKind::Font,
        AssetKind::Media,
        AssetKind::Data,
        AssetKind::Php,
    ];
    let all: Vec<AssetKind> = kinds.collect();
    order
        .iter()
        .filter_map(|k| {
            let n = all.iter().filter(|a| *a == k).count();
            (n > 0).then(|| format!("{n} {}", k.as_str()))
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Display a template path relative to the project when possible.
fn display_source(path: &Path, project_root: &Path) -> String {
    path.strip_prefix(project_root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}

fn page_lines(index: usize, directive: &EmissionDirective, project_root: &Path) -> Vec<String> {
    vec![
        format!(
            "{} {} ({})",
            format_index(index),
            directive.output_filename,
            injection_label(directive.injection_mode)
        ),
        format!(
            "    Source: {}",
            display_source(&directive.template_path, project_root)
        ),
    ]
}

// ============================================================================
// Stage 1: Plan output
// ============================================================================

pub fn format_plan_output(plan: &BuildPlan, project_root: &Path) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push("Pages".to_string());
    if plan.pages.is_empty() {
        lines.push(format!("    (no pages in {}/)", plan.config.source_dir));
    }
    for (i, directive) in plan.pages.iter().enumerate() {
        lines.extend(page_lines(i + 1, directive, project_root));
    }
    if !plan.pages.is_empty() && plan.primary_page().is_none() {
        lines.push(format!(
            "    Note: no {} found; every page gets bundle references",
            plan.config.pages.primary
        ));
    }

    if !plan.assets.is_empty() {
        lines.push(String::new());
        lines.push("Assets".to_string());
        for (i, asset) in plan.assets.iter().enumerate() {
            lines.push(format!(
                "{} {} ({})",
                format_index(i + 1),
                asset.output_path,
                asset.kind.as_str()
            ));
            lines.push(format!("    Source: {}", asset.source_path));
        }
    }

    lines.push(String::new());
    lines.push(format!("Mode: {}", plan.mode.as_str()));

    lines
}

pub fn print_plan_output(plan: &BuildPlan, project_root: &Path) {
    for line in format_plan_output(plan, project_root) {
        println!("{}", line);
    }
}

// ============================================================================
// Stage 2: Emit output
// ============================================================================

pub fn format_emit_output(report: &EmitReport, project_root: &Path) -> Vec<String> {
    let mut lines = Vec::new();
    let out = display_source(&report.output_dir, project_root);

    if report.cleaned {
        lines.push(format!("Cleaned {}/", out));
    }

    for page in &report.pages {
        lines.push(format!(
            "{} → {}/{} ({})",
            page.output_filename,
            out,
            page.output_filename,
            format_size(page.bytes as u64)
        ));
    }

    lines.push(String::new());
    let mut summary = format!(
        "Emitted {}, {}",
        plural(report.pages.len(), "page"),
        plural(report.assets.len(), "asset")
    );
    if !report.assets.is_empty() {
        summary.push_str(&format!(
            " ({})",
            kind_breakdown(report.assets.iter().map(|a| a.kind))
        ));
    }
    lines.push(summary);

    lines
}

pub fn print_emit_output(report: &EmitReport, project_root: &Path) {
    for line in format_emit_output(report, project_root) {
        println!("{}", line);
    }
}
