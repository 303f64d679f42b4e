use brickmind_core::{BuildStep, CameraAngle, Piece, StepPiece};

pub const MIN_STEPS: usize = 6;
pub const MAX_STEPS: usize = 20;

/// Pieces per step the step count aims for.
const PIECES_PER_STEP: usize = 8;

/// Split a piece list into `clamp(n / 8, 6, 20)` contiguous steps of
/// `ceil(n / steps)` pieces. Short lists leave the trailing steps empty.
pub fn derive_steps(pieces: &[Piece]) -> Vec<BuildStep> {
    let n = pieces.len();
    let step_count = (n / PIECES_PER_STEP).clamp(MIN_STEPS, MAX_STEPS);
    let per_step = n.div_ceil(step_count);

    (0..step_count)
        .map(|s| {
            let start = (s * per_step).min(n);
            let end = ((s + 1) * per_step).min(n);
            let group = &pieces[start..end];
            let (title, description) = if s == 0 {
                ("Foundation".to_string(), "Build the foundation baseplate".to_string())
            } else if s == step_count - 1 {
                (
                    "Finishing touches".to_string(),
                    "Add final details and finishing touches".to_string(),
                )
            } else {
                (
                    format!("Layer {}", s + 1),
                    format!("Assemble layer {} - {} bricks", s + 1, group.len()),
                )
            };
            BuildStep {
                step_num: s + 1,
                title,
                description,
                pieces: group.iter().map(StepPiece::from).collect(),
                camera: CameraAngle::for_step(s),
            }
        })
        .collect()
}
