//! Deterministic repair of declared pieces into a grid-legal structure.
//!
//! Pieces are processed in ascending declared height (ties by declared
//! step). Each one is snapped to the grid, moved off any piece it overlaps,
//! moved next to the structure when it is detached, and finally checked
//! against everything already accepted. Pieces the repairs cannot make
//! legal are dropped.

use crate::error::SanitizeError;
use crate::payload::DeclaredPiece;
use brickmind_core::color::color_by_code;
use brickmind_core::config::{PhysicsConfig, SanitizerConfig};
use brickmind_core::constants::SNAP_XZ;
use brickmind_core::geometry::instantiate_spec;
use brickmind_core::math::{snap_full_height, snap_rotation, snap_xz};
use brickmind_core::{Catalog, Piece};
use brickmind_physics::collision::{collides_with_any, touches_any};
use brickmind_physics::{validate_placement, PhysicsStatus};
use glam::IVec3;

/// Accepted pieces plus the count of pieces no repair could place.
#[derive(Debug, Clone, Default)]
pub struct RepairOutcome {
    pub pieces: Vec<Piece>,
    pub dropped: usize,
}

/// Horizontal grid offsets at Chebyshev distance `radius`, nearest first.
fn ring_offsets(radius: i32) -> Vec<(i32, i32)> {
    let mut cells: Vec<(i32, i32)> = (-radius..=radius)
        .flat_map(|dx| (-radius..=radius).map(move |dz| (dx, dz)))
        .filter(|&(dx, dz)| dx.abs().max(dz.abs()) == radius)
        .collect();
    cells.sort_by_key(|&(dx, dz)| (dx * dx + dz * dz, dx, dz));
    cells
}

pub struct Repairer<'a> {
    pub catalog: &'a Catalog,
    pub physics: &'a PhysicsConfig,
    pub config: &'a SanitizerConfig,
}

impl Repairer<'_> {
    fn fits(&self, placed: &[Piece], candidate: &Piece) -> bool {
        !collides_with_any(placed, candidate)
            && (placed.is_empty() || touches_any(placed, candidate, self.config.touch_epsilon))
    }

    /// Directly on top of the most recently placed piece.
    fn stack_on_last(placed: &[Piece], candidate: &mut Piece) {
        if let Some(last) = placed.last() {
            candidate.position = IVec3::new(last.position.x, last.top_y(), last.position.z);
        }
    }

    /// Move an overlapping candidate to the nearest free, attached ring cell
    /// at the same height, or stack it on the last piece.
    fn repair_collision(&self, placed: &[Piece], candidate: &mut Piece) {
        if !collides_with_any(placed, candidate) {
            return;
        }
        let origin = candidate.position;
        for radius in 1..=self.config.max_ring_radius {
            for (dx, dz) in ring_offsets(radius) {
                candidate.position = origin + IVec3::new(dx * SNAP_XZ, 0, dz * SNAP_XZ);
                if self.fits(placed, candidate) {
                    log::debug!("{} moved {dx},{dz} cells off a collision", candidate.id);
                    return;
                }
            }
        }
        candidate.position = origin;
        Self::stack_on_last(placed, candidate);
        log::debug!("{} stacked after ring search failed", candidate.id);
    }

    /// Move a detached candidate beside or above the last piece.
    fn repair_connectivity(&self, placed: &[Piece], candidate: &mut Piece) {
        let Some(last) = placed.last() else {
            return;
        };
        if touches_any(placed, candidate, self.config.touch_epsilon) {
            return;
        }
        let (lw, ld) = last.footprint();
        let (cw, cd) = candidate.footprint();
        let dx = lw / 2 + cw / 2;
        let dz = ld / 2 + cd / 2;
        let base = last.position;
        let offsets = [
            IVec3::new(dx, 0, 0),
            IVec3::new(-dx, 0, 0),
            IVec3::new(0, 0, dz),
            IVec3::new(0, 0, -dz),
            IVec3::new(0, last.size.h, 0),
        ];
        for offset in offsets {
            // Half-stud offsets would leave the grid
            if offset.x % SNAP_XZ != 0 || offset.z % SNAP_XZ != 0 {
                continue;
            }
            let position = base + offset;
            let trial = Piece {
                position,
                ..candidate.clone()
            };
            if self.fits(placed, &trial) {
                candidate.position = position;
                return;
            }
        }
        Self::stack_on_last(placed, candidate);
        self.repair_collision(placed, candidate);
    }

    /// Snap a declared piece onto the grid. The first piece is pinned to the
    /// ground.
    fn snap(&self, declared: &DeclaredPiece, id: String, first: bool) -> Result<Piece, SanitizeError> {
        let spec = self.catalog.normalize(&declared.part);
        let template = instantiate_spec(spec, 1, &color_by_code(declared.color_code))?;
        let y = if first {
            0
        } else {
            snap_full_height(declared.position.y)
        };
        let position = IVec3::new(snap_xz(declared.position.x), y, snap_xz(declared.position.z));
        Ok(template.place(id, position, snap_rotation(declared.rotation)))
    }

    /// Run every repair stage over the declared pieces.
    pub fn repair(&self, mut declared: Vec<DeclaredPiece>) -> Result<RepairOutcome, SanitizeError> {
        declared.sort_by(|a, b| {
            a.position
                .y
                .total_cmp(&b.position.y)
                .then(a.step.cmp(&b.step))
        });

        let mut outcome = RepairOutcome::default();
        for (i, d) in declared.iter().enumerate() {
            let id = format!("S{}", outcome.pieces.len() + 1);
            let mut candidate = self.snap(d, id, i == 0)?;
            self.repair_collision(&outcome.pieces, &mut candidate);
            self.repair_connectivity(&outcome.pieces, &mut candidate);

            match validate_placement(&outcome.pieces, &candidate, self.physics) {
                PhysicsStatus::Legal | PhysicsStatus::Unstable => outcome.pieces.push(candidate),
                status => {
                    log::warn!(
                        "Dropping '{}' declared at {:?}: still {status:?} at {:?} after repair",
                        d.part,
                        d.position,
                        candidate.position
                    );
                    outcome.dropped += 1;
                }
            }
        }
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brickmind_core::math::is_grid_aligned;
    use brickmind_core::Rotation;
    use brickmind_physics::validate_physics;
    use glam::DVec3;

    fn declared(part: &str, x: f64, y: f64, z: f64, step: i64) -> DeclaredPiece {
        DeclaredPiece {
            part: part.into(),
            color_code: 4,
            position: DVec3::new(x, y, z),
            rotation: 0.0,
            step,
        }
    }

    fn run(pieces: Vec<DeclaredPiece>) -> RepairOutcome {
        let catalog = Catalog::builtin();
        let physics = PhysicsConfig::default();
        let config = SanitizerConfig::default();
        Repairer {
            catalog: &catalog,
            physics: &physics,
            config: &config,
        }
        .repair(pieces)
        .unwrap()
    }

    #[test]
    fn test_ring_offsets_nearest_first() {
        let ring = ring_offsets(1);
        assert_eq!(ring.len(), 8);
        assert_eq!(&ring[..4], &[(-1, 0), (0, -1), (0, 1), (1, 0)]);
        assert_eq!(ring_offsets(2).len(), 16);
    }

    #[test]
    fn test_first_piece_pinned_to_ground() {
        let out = run(vec![declared("3001", 3.0, 97.0, -11.0, 1)]);
        assert_eq!(out.pieces.len(), 1);
        assert_eq!(out.pieces[0].position, IVec3::new(0, 0, -20));
    }

    #[test]
    fn test_stacked_tower_kept_in_place() {
        let out = run(vec![
            declared("3003", 0.0, 0.0, 0.0, 1),
            declared("3003", 0.0, 24.0, 0.0, 2),
            declared("3003", 0.0, 48.0, 0.0, 3),
        ]);
        let ys: Vec<i32> = out.pieces.iter().map(|p| p.position.y).collect();
        assert_eq!(ys, vec![0, 24, 48]);
        assert_eq!(out.dropped, 0);
    }

    #[test]
    fn test_processing_order_by_height_then_step() {
        let out = run(vec![
            declared("3001", 0.0, 24.0, 0.0, 1),
            declared("3003", 0.0, 0.0, 0.0, 9),
        ]);
        assert_eq!(out.pieces[0].part_id, "3003");
        assert_eq!(out.pieces[0].position.y, 0);
    }

    #[test]
    fn test_overlap_moved_to_adjacent_cell() {
        let out = run(vec![
            declared("3003", 0.0, 0.0, 0.0, 1),
            declared("3003", 0.0, 0.0, 0.0, 2),
        ]);
        assert_eq!(out.pieces.len(), 2);
        let moved = &out.pieces[1];
        assert_eq!(moved.position.y, 0);
        // Nearest free cell that shares a face: two cells along an axis
        assert_eq!(moved.position, IVec3::new(-40, 0, 0));
    }

    #[test]
    fn test_detached_piece_pulled_alongside() {
        let out = run(vec![
            declared("3003", 0.0, 0.0, 0.0, 1),
            declared("3003", 400.0, 0.0, 0.0, 2),
        ]);
        assert_eq!(out.pieces[1].position, IVec3::new(40, 0, 0));
    }

    #[test]
    fn test_output_is_legal_and_aligned() {
        let messy = vec![
            declared("3001", 3.2, -5.0, 4.9, 1),
            declared("3001.dat", 7.0, 1.0, 2.0, 2),
            declared("9999", 500.0, 300.0, -800.0, 3),
            declared("3068", 12.0, 25.0, 11.0, 4),
            declared("3004", -33.0, 24.0, 18.0, 5),
            declared("3020", 0.0, 49.0, 0.0, 6),
            declared("3039", 10.0, 70.0, 10.0, 7),
        ];
        let out = run(messy.clone());
        assert_eq!(out.pieces.len() + out.dropped, messy.len());
        let report = validate_physics(&out.pieces, &PhysicsConfig::default());
        assert!(report.is_legal(), "{:?}", report.errors);
        for p in &out.pieces {
            assert!(is_grid_aligned(p.position.x, p.position.y, p.position.z), "{:?}", p.position);
        }
    }

    #[test]
    fn test_rotation_snapped() {
        let mut d = declared("3001", 0.0, 0.0, 0.0, 1);
        d.rotation = 100.0;
        let out = run(vec![d]);
        assert_eq!(out.pieces[0].rotation, Rotation::Deg90);
    }
}
