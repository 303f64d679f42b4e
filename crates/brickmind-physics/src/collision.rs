use brickmind_core::piece::{Aabb, Piece};

/// Indices of every strictly overlapping pair, in (i, j) order with i < j.
pub fn detect_collisions(pieces: &[Piece]) -> Vec<(usize, usize)> {
    let boxes: Vec<Aabb> = pieces.iter().map(Piece::bounds).collect();
    let mut pairs = Vec::new();
    for i in 0..boxes.len() {
        for j in (i + 1)..boxes.len() {
            if boxes[i].overlaps(&boxes[j]) {
                pairs.push((i, j));
            }
        }
    }
    pairs
}

/// Indices of placed pieces the candidate would overlap.
pub fn candidate_collisions(placed: &[Piece], candidate: &Piece) -> Vec<usize> {
    let bounds = candidate.bounds();
    placed
        .iter()
        .enumerate()
        .filter(|(_, p)| p.bounds().overlaps(&bounds))
        .map(|(i, _)| i)
        .collect()
}

/// Whether the candidate overlaps anything already placed.
pub fn collides_with_any(placed: &[Piece], candidate: &Piece) -> bool {
    let bounds = candidate.bounds();
    placed.iter().any(|p| p.bounds().overlaps(&bounds))
}

/// Whether the candidate shares a face with anything already placed.
pub fn touches_any(placed: &[Piece], candidate: &Piece, epsilon: i32) -> bool {
    let bounds = candidate.bounds();
    placed.iter().any(|p| p.bounds().touches(&bounds, epsilon))
}
