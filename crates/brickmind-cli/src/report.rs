use std::path::Path;

use brickmind_core::config::PhysicsConfig;
use brickmind_core::{AssembledStructure, BuildData, Palette};
use brickmind_physics::validate_physics;
use brickmind_sanitize::SanitizedBuild;
use serde::Serialize;

/// Save any output value as pretty JSON, creating parent directories.
pub fn save_json<T: Serialize>(path: &Path, value: &T) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(value).map_err(std::io::Error::other)?;
    std::fs::write(path, json)
}

fn format_variants(variants: &[AssembledStructure], physics: &PhysicsConfig) -> String {
    let mut out = String::new();
    out.push_str("| Variant | Pieces | Difficulty | Minutes | Physics |\n");
    out.push_str("|---------|--------|------------|---------|---------|\n");
    for v in variants {
        let report = validate_physics(&v.pieces, physics);
        out.push_str(&format!(
            "| {} | {} | {:?} | {} | {:?} |\n",
            v.name,
            v.piece_count(),
            v.difficulty,
            v.estimated_minutes,
            report.status,
        ));
    }
    out
}

fn format_palette(palette: &Palette) -> String {
    let mut out = String::new();
    out.push_str("| Id | Part | Name | Color | Qty |\n");
    out.push_str("|----|------|------|-------|-----|\n");
    for e in &palette.entries {
        out.push_str(&format!(
            "| {} | {} | {} | {} | {} |\n",
            e.id, e.spec.part_id, e.spec.name, e.color.name, e.quantity
        ));
    }
    out
}

/// Markdown summary of a generated build.
pub fn format_build(build: &BuildData, physics: &PhysicsConfig) -> String {
    let mut out = format!("## {} (budget {})\n\n", build.prompt, build.budget);
    out.push_str(&format_variants(&build.variants, physics));
    out.push_str(&format!(
        "\n### Palette ({} pieces)\n\n",
        build.palette.total_quantity()
    ));
    out.push_str(&format_palette(&build.palette));
    out.push_str(&format!("\n{} build steps\n", build.steps.len()));
    out
}

/// Markdown summary of a sanitized external build.
pub fn format_sanitized(build: &SanitizedBuild, physics: &PhysicsConfig) -> String {
    let mut out = String::from("## Sanitized build\n\n");
    out.push_str(&format_variants(&build.variants, physics));
    out.push_str(&format!(
        "\n{} skipped, {} dropped during repair\n",
        build.skipped, build.dropped
    ));
    out.push_str(&format!(
        "\n### Inventory ({} pieces)\n\n",
        build.inventory.total_quantity()
    ));
    out.push_str(&format_palette(&build.inventory));
    for step in &build.steps {
        out.push_str(&format!(
            "\n{}. {} ({} pieces)",
            step.step_num,
            step.title,
            step.pieces.len()
        ));
    }
    out.push('\n');
    out
}
