//! Stud-to-anti-stud support reasoning.
//!
//! A bottom connector of piece P is supported when some other piece Q that
//! sits strictly lower has its top face at P's base height (within the
//! connector tolerance) and exposes a top stud within the tolerance of the
//! connector in both x and z.

use brickmind_core::config::PhysicsConfig;
use brickmind_core::types::Connector;
use brickmind_core::Piece;

/// Baseplate-resting pieces are exempt from support checks.
pub fn is_grounded(piece: &Piece, cfg: &PhysicsConfig) -> bool {
    piece.position.y <= cfg.ground_clearance
}

/// Whether `point` (world x, z at `piece`'s base) lands on a stud of any
/// piece in `others` below it.
fn point_supported<'a>(
    others: impl Iterator<Item = &'a Piece>,
    piece: &Piece,
    point: Connector,
    cfg: &PhysicsConfig,
) -> bool {
    let tol = cfg.connector_tolerance;
    let y = piece.position.y;
    others
        .filter(|other| other.position.y < y)
        .filter(|other| (other.top_y() - y).abs() <= tol)
        .any(|other| {
            other
                .world_top_connectors()
                .any(|stud| (stud.x - point.x).abs() < tol && (stud.y - point.y).abs() < tol)
        })
}

/// Number of `piece`'s bottom connectors that land on a stud below.
/// `others` must not contain `piece` itself.
pub fn supported_connector_count(others: &[&Piece], piece: &Piece, cfg: &PhysicsConfig) -> usize {
    piece
        .world_bottom_connectors()
        .filter(|&point| point_supported(others.iter().copied(), piece, point, cfg))
        .count()
}

/// Fraction of the piece at `index` whose bottom connectors are supported.
/// A piece without bottom connectors has ratio 0.
pub fn support_ratio(pieces: &[Piece], index: usize, cfg: &PhysicsConfig) -> f32 {
    let piece = &pieces[index];
    let total = piece.bottom_connectors.len();
    if total == 0 {
        return 0.0;
    }
    let others = others_of(pieces, index);
    supported_connector_count(&others, piece, cfg) as f32 / total as f32
}

/// Whether at least one bottom connector of the piece at `index` is
/// supported.
pub fn has_any_support(pieces: &[Piece], index: usize, cfg: &PhysicsConfig) -> bool {
    let piece = &pieces[index];
    let others = others_of(pieces, index);
    piece
        .world_bottom_connectors()
        .any(|point| point_supported(others.iter().copied(), piece, point, cfg))
}

/// Whether a candidate not yet in `placed` would rest on studs of `placed`.
/// Grounded candidates always qualify.
pub fn candidate_supported(placed: &[Piece], candidate: &Piece, cfg: &PhysicsConfig) -> bool {
    if is_grounded(candidate, cfg) {
        return true;
    }
    candidate
        .world_bottom_connectors()
        .any(|point| point_supported(placed.iter(), candidate, point, cfg))
}

/// Indices of raised pieces with no supported bottom connector.
pub fn find_floating(pieces: &[Piece], cfg: &PhysicsConfig) -> Vec<usize> {
    (0..pieces.len())
        .filter(|&i| !is_grounded(&pieces[i], cfg))
        .filter(|&i| !has_any_support(pieces, i, cfg))
        .collect()
}

/// Raised pieces whose support ratio is below the stability threshold,
/// with their ratios.
pub fn find_unstable(pieces: &[Piece], cfg: &PhysicsConfig) -> Vec<(usize, f32)> {
    (0..pieces.len())
        .filter(|&i| !is_grounded(&pieces[i], cfg))
        .map(|i| (i, support_ratio(pieces, i, cfg)))
        .filter(|&(_, ratio)| ratio < cfg.stability_threshold)
        .collect()
}

fn others_of(pieces: &[Piece], index: usize) -> Vec<&Piece> {
    pieces
        .iter()
        .enumerate()
        .filter(|&(i, _)| i != index)
        .map(|(_, p)| p)
        .collect()
}
