//! Repair of externally generated builds.
//!
//! An external generator (see [`BuildSource`]) proposes pieces with
//! arbitrary identifiers and continuous coordinates. This crate turns that
//! payload into a grid-aligned structure with no overlaps and no floating
//! pieces, plus an inventory and per-layer build steps. It uses no
//! randomness: the same payload always yields the same build.

pub mod error;
pub mod inventory;
pub mod layers;
pub mod payload;
pub mod repair;

pub use error::SanitizeError;
pub use payload::{LayerGuidance, RawPiece};

use brickmind_core::{AssembledStructure, BuildStep, Catalog, EngineConfig, Palette, Rotation};
use repair::Repairer;
use serde::Serialize;

/// Supplier of raw build payloads, typically a remote text generator.
/// Transport failures are reported as plain messages.
pub trait BuildSource {
    fn fetch(&self, prompt: &str, limit: usize) -> Result<String, String>;
}

impl<F> BuildSource for F
where
    F: Fn(&str, usize) -> Result<String, String>,
{
    fn fetch(&self, prompt: &str, limit: usize) -> Result<String, String> {
        self(prompt, limit)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SanitizedBuild {
    /// Repaired build first, the same build turned 180 degrees second.
    /// Footprints and connector grids are centered on the piece position,
    /// so the half turn keeps every bounding box and stud in place and the
    /// second variant is legal whenever the first is.
    pub variants: [AssembledStructure; 2],
    pub inventory: Palette,
    pub steps: Vec<BuildStep>,
    /// Raw entries without a part id or a usable position (missing,
    /// non-numeric, non-finite, or beyond the world extent).
    pub skipped: usize,
    /// Pieces that were still illegal after every repair.
    pub dropped: usize,
}

impl SanitizedBuild {
    pub fn primary(&self) -> &AssembledStructure {
        &self.variants[0]
    }

    pub fn rotated(&self) -> &AssembledStructure {
        &self.variants[1]
    }
}

/// Ask `source` for a build and repair it. An empty prompt is rejected
/// before the source is called.
pub fn sanitize_external_build(
    prompt: &str,
    limit: usize,
    source: &dyn BuildSource,
    cfg: &EngineConfig,
) -> Result<SanitizedBuild, SanitizeError> {
    if prompt.trim().is_empty() {
        return Err(SanitizeError::EmptyPrompt);
    }
    let text = source.fetch(prompt, limit).map_err(SanitizeError::Source)?;
    sanitize_payload(&text, limit, cfg)
}

/// Parse and repair a payload already in hand.
pub fn sanitize_payload(text: &str, limit: usize, cfg: &EngineConfig) -> Result<SanitizedBuild, SanitizeError> {
    let payload = payload::parse_payload(text)?;
    sanitize_pieces(&payload.parts, &payload.layers, limit, cfg)
}

/// Repair raw pieces against the built-in catalog.
pub fn sanitize_pieces(
    raw: &[RawPiece],
    guidance: &[LayerGuidance],
    limit: usize,
    cfg: &EngineConfig,
) -> Result<SanitizedBuild, SanitizeError> {
    let catalog = Catalog::builtin();
    let (declared, skipped) = payload::declare_pieces(raw, limit);
    if declared.is_empty() {
        return Err(SanitizeError::NoValidPieces);
    }

    let outcome = Repairer {
        catalog: &catalog,
        physics: &cfg.physics,
        config: &cfg.sanitizer,
    }
    .repair(declared)?;
    if outcome.pieces.is_empty() {
        return Err(SanitizeError::NoValidPieces);
    }

    let inventory = inventory::build_inventory(&outcome.pieces, &catalog);
    let steps = layers::layer_steps(&outcome.pieces, guidance);
    let turned = outcome
        .pieces
        .iter()
        .map(|p| p.rotated(Rotation::Deg180))
        .collect();

    log::info!(
        "Sanitized {} pieces into {} layers ({} skipped, {} dropped)",
        outcome.pieces.len(),
        steps.len(),
        skipped,
        outcome.dropped
    );

    Ok(SanitizedBuild {
        variants: [
            AssembledStructure::new("As Designed", "Repaired external design", outcome.pieces),
            AssembledStructure::new("Turned Around", "Same build, rotated 180 degrees", turned),
        ],
        inventory,
        steps,
        skipped,
        dropped: outcome.dropped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use brickmind_physics::validate_physics;
    use std::cell::Cell;

    const CASTLE: &str = r#"Sure! Here's a small castle:
```json
{
  "parts": [
    {"part": "3001", "color": 71, "position": {"x": 0, "y": 0, "z": 0}, "rotation": 0, "step": 1},
    {"part": "3001", "color": 71, "position": {"x": 80, "y": 0, "z": 0}, "rotation": 0, "step": 1},
    {"part": "3001.dat", "color": 71, "position": {"x": 40, "y": 24, "z": 0}, "rotation": 0, "step": 2},
    {"part": "3003", "color": 4, "position": {"x": 3, "y": 47, "z": -2}, "rotation": 88, "step": 3},
    {"part": "mystery", "color": 999, "position": {"x": 0, "y": 0, "z": 0}, "step": 4},
    {"part": "3020", "position": [40, 72, 0], "rotation": 270}
  ],
  "layers": [{"title": "Foundation", "description": "Two long bricks side by side"}]
}
```"#;

    #[test]
    fn test_empty_prompt_rejected_before_fetch() {
        let called = Cell::new(false);
        let source = |_: &str, _: usize| -> Result<String, String> {
            called.set(true);
            Ok(CASTLE.to_string())
        };
        let result = sanitize_external_build("   ", 200, &source, &EngineConfig::default());
        assert_eq!(result, Err(SanitizeError::EmptyPrompt));
        assert!(!called.get(), "source must not be called");
    }

    #[test]
    fn test_zero_parts_rejected() {
        let source = |_: &str, _: usize| -> Result<String, String> { Ok(r#"{"parts": []}"#.to_string()) };
        let result = sanitize_external_build("castle", 200, &source, &EngineConfig::default());
        assert_eq!(result, Err(SanitizeError::NoValidPieces));
    }

    #[test]
    fn test_source_failure_surfaced() {
        let source = |_: &str, _: usize| -> Result<String, String> { Err("timeout".to_string()) };
        let result = sanitize_external_build("castle", 200, &source, &EngineConfig::default());
        assert_eq!(result, Err(SanitizeError::Source("timeout".into())));
    }

    #[test]
    fn test_malformed_payload_rejected() {
        let result = sanitize_payload("{\"parts\": [", 200, &EngineConfig::default());
        assert!(matches!(result, Err(SanitizeError::PayloadFormat(_))));
    }

    #[test]
    fn test_huge_coordinates_skipped_not_fatal() {
        let cfg = EngineConfig::default();
        let payload = r#"{"parts": [
            {"part": "3001", "position": [1e12, 0, 0]},
            {"part": "3001", "position": [0, 1e300, 0]},
            {"part": "3001", "position": [0, 0, 0]}
        ]}"#;
        let build = sanitize_payload(payload, 10, &cfg).unwrap();
        assert_eq!(build.skipped, 2);
        assert_eq!(build.primary().piece_count(), 1);

        let only_huge = r#"{"parts": [{"part": "3001", "position": [1e12, 0, 0]}]}"#;
        assert_eq!(sanitize_payload(only_huge, 10, &cfg), Err(SanitizeError::NoValidPieces));
    }

    #[test]
    fn test_one_bad_position_keeps_the_rest() {
        let payload = r#"{"parts": [
            {"part": "3001", "position": {"x": 0, "y": 0, "z": 0}},
            {"part": "3001", "position": {"x": "40", "y": 0}},
            {"part": "3001", "position": [0, 0]}
        ]}"#;
        let build = sanitize_payload(payload, 10, &EngineConfig::default()).unwrap();
        assert_eq!(build.primary().piece_count(), 1);
        assert_eq!(build.skipped, 2);
    }

    #[test]
    fn test_zero_limit_leaves_nothing() {
        let result = sanitize_payload(CASTLE, 0, &EngineConfig::default());
        assert_eq!(result, Err(SanitizeError::NoValidPieces));
    }

    #[test]
    fn test_castle_end_to_end() {
        let cfg = EngineConfig::default();
        let source = |_: &str, _: usize| -> Result<String, String> { Ok(CASTLE.to_string()) };
        let build = sanitize_external_build("castle", 200, &source, &cfg).unwrap();

        let primary = build.primary();
        assert_eq!(primary.piece_count() + build.dropped, 6);
        assert_eq!(build.skipped, 0);
        let report = validate_physics(&primary.pieces, &cfg.physics);
        assert!(report.is_legal(), "{:?}", report.errors);

        assert_eq!(build.inventory.total_quantity() as usize, primary.piece_count());
        let stepped: usize = build.steps.iter().map(|s| s.pieces.len()).sum();
        assert_eq!(stepped, primary.piece_count());
        assert_eq!(build.steps[0].title, "Foundation");
        // Unknown part falls back to the default brick, unknown color to grey
        assert!(primary.pieces.iter().any(|p| p.color.hex == "#808080" && p.part_id == "3003"));
    }

    #[test]
    fn test_rotated_variant_is_half_turn() {
        let build = sanitize_payload(CASTLE, 200, &EngineConfig::default()).unwrap();
        let (a, b) = (build.primary(), build.rotated());
        assert_eq!(a.piece_count(), b.piece_count());
        for (p, q) in a.pieces.iter().zip(b.pieces.iter()) {
            assert_eq!(p.position, q.position);
            assert_eq!(q.rotation, p.rotation.add(Rotation::Deg180));
            // A second half turn restores the repaired orientation
            assert_eq!(q.rotated(Rotation::Deg180).rotation, p.rotation);
        }
        let report = validate_physics(&b.pieces, &EngineConfig::default().physics);
        assert!(report.is_legal(), "{:?}", report.errors);
    }

    #[test]
    fn test_limit_caps_piece_count() {
        let build = sanitize_payload(CASTLE, 2, &EngineConfig::default()).unwrap();
        assert!(build.primary().piece_count() <= 2);
    }

    #[test]
    fn test_deterministic() {
        let a = sanitize_payload(CASTLE, 200, &EngineConfig::default()).unwrap();
        let b = sanitize_payload(CASTLE, 200, &EngineConfig::default()).unwrap();
        assert_eq!(a, b);
    }
}
