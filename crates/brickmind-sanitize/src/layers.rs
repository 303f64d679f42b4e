use crate::payload::LayerGuidance;
use brickmind_core::{BuildStep, CameraAngle, Piece, StepPiece};
use std::collections::BTreeMap;

fn default_title(index: usize, count: usize) -> &'static str {
    if index == 0 {
        "Base / Chassis"
    } else if index + 1 == count {
        "Roof / Details"
    } else {
        "Walls / Structure"
    }
}

/// One build step per distinct height, lowest first. Guidance at the same
/// index replaces the default title and description.
pub fn layer_steps(pieces: &[Piece], guidance: &[LayerGuidance]) -> Vec<BuildStep> {
    let mut by_y: BTreeMap<i32, Vec<&Piece>> = BTreeMap::new();
    for piece in pieces {
        by_y.entry(piece.position.y).or_default().push(piece);
    }

    let count = by_y.len();
    by_y.into_iter()
        .enumerate()
        .map(|(i, (y, group))| {
            let hint = guidance.get(i);
            let title = match hint.map(|g| g.title.trim()).filter(|t| !t.is_empty()) {
                Some(t) => t.to_string(),
                None => format!("{} (y={y})", default_title(i, count)),
            };
            let description = match hint.map(|g| g.description.trim()).filter(|d| !d.is_empty()) {
                Some(d) => d.to_string(),
                None => format!("Place {} pieces at height {y} LDU", group.len()),
            };
            BuildStep {
                step_num: i + 1,
                title,
                description,
                pieces: group.into_iter().map(StepPiece::from).collect(),
                camera: CameraAngle::for_step(i),
            }
        })
        .collect()
}
