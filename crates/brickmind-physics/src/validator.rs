use crate::collision::{candidate_collisions, detect_collisions};
use crate::support::{candidate_supported, find_floating, find_unstable};
use brickmind_core::config::PhysicsConfig;
use brickmind_core::Piece;
use serde::Serialize;

/// Overall classification of an arrangement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PhysicsStatus {
    /// No collisions, no floating pieces, no stability warnings.
    Legal,
    /// At least one pair of pieces overlaps.
    Collision,
    /// At least one raised piece has no stud below it.
    Floating,
    /// Legal, but some pieces are weakly supported. Warnings only.
    Unstable,
}

/// Validator output: status plus the evidence behind it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhysicsReport {
    pub status: PhysicsStatus,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    /// Ids of every overlapping pair.
    pub collisions: Vec<(String, String)>,
    /// Ids of unsupported raised pieces.
    pub floating: Vec<String>,
    /// Ids and support ratios of weakly supported pieces.
    pub unstable: Vec<(String, f32)>,
}

impl PhysicsReport {
    fn new(status: PhysicsStatus) -> Self {
        Self {
            status,
            errors: Vec::new(),
            warnings: Vec::new(),
            collisions: Vec::new(),
            floating: Vec::new(),
            unstable: Vec::new(),
        }
    }

    /// True when nothing blocks acceptance (`Legal` or `Unstable`).
    pub fn is_legal(&self) -> bool {
        matches!(self.status, PhysicsStatus::Legal | PhysicsStatus::Unstable)
    }
}

/// Classify a complete arrangement. Checks run in priority order and the
/// first failing check decides the status:
///
/// 1. collision: any strictly overlapping pair
/// 2. floating: any raised piece without a single supported connector
/// 3. stability: raised pieces with support ratio below the threshold
///    produce warnings and the `Unstable` status, never errors
pub fn validate_physics(pieces: &[Piece], cfg: &PhysicsConfig) -> PhysicsReport {
    let collisions = detect_collisions(pieces);
    if !collisions.is_empty() {
        let mut report = PhysicsReport::new(PhysicsStatus::Collision);
        for (i, j) in collisions {
            let (a, b) = (&pieces[i].id, &pieces[j].id);
            report.errors.push(format!("Collision between {a} and {b}"));
            report.collisions.push((a.clone(), b.clone()));
        }
        log::debug!("{} colliding pair(s) among {} pieces", report.collisions.len(), pieces.len());
        return report;
    }

    let floating = find_floating(pieces, cfg);
    if !floating.is_empty() {
        let mut report = PhysicsReport::new(PhysicsStatus::Floating);
        for i in floating {
            let id = &pieces[i].id;
            report
                .errors
                .push(format!("Piece {id} is floating (no connection below)"));
            report.floating.push(id.clone());
        }
        log::debug!("{} floating piece(s) among {} pieces", report.floating.len(), pieces.len());
        return report;
    }

    let unstable = find_unstable(pieces, cfg);
    let mut report = PhysicsReport::new(if unstable.is_empty() {
        PhysicsStatus::Legal
    } else {
        PhysicsStatus::Unstable
    });
    for (i, ratio) in unstable {
        let id = &pieces[i].id;
        report.warnings.push(format!(
            "Piece {id} may be unstable ({:.0}% supported)",
            ratio * 100.0
        ));
        report.unstable.push((id.clone(), ratio));
    }
    report
}

/// Classify `placed + candidate` when `placed` is already collision-free
/// and fully supported.
///
/// Adding a piece cannot remove support from existing pieces, so only
/// pairs involving the candidate and the candidate's own support need
/// checking; the collision/floating outcome equals a full
/// [`validate_physics`] run. Stability of the candidate is not evaluated.
pub fn validate_placement(placed: &[Piece], candidate: &Piece, cfg: &PhysicsConfig) -> PhysicsStatus {
    if !candidate_collisions(placed, candidate).is_empty() {
        return PhysicsStatus::Collision;
    }
    if !candidate_supported(placed, candidate, cfg) {
        return PhysicsStatus::Floating;
    }
    PhysicsStatus::Legal
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_pieces::{brick, plate};
    use glam::IVec3;

    fn cfg() -> PhysicsConfig {
        PhysicsConfig::default()
    }

    fn tower() -> Vec<Piece> {
        vec![
            plate("baseplate", 6, 6, IVec3::ZERO),
            brick("b1", 2, 2, IVec3::new(0, 8, 0)),
            brick("b2", 2, 2, IVec3::new(0, 32, 0)),
            brick("b3", 4, 2, IVec3::new(20, 56, 0)),
        ]
    }

    #[test]
    fn test_legal_tower() {
        let report = validate_physics(&tower(), &cfg());
        assert_eq!(report.status, PhysicsStatus::Legal, "{:?}", report.errors);
        assert!(report.errors.is_empty());
        assert!(report.warnings.is_empty());
        assert!(report.is_legal());
    }

    #[test]
    fn test_empty_is_legal() {
        assert_eq!(validate_physics(&[], &cfg()).status, PhysicsStatus::Legal);
    }

    #[test]
    fn test_collision_short_circuits_floating() {
        let mut pieces = tower();
        pieces.push(brick("overlap", 2, 2, IVec3::new(20, 8, 0)));
        pieces.push(brick("adrift", 2, 2, IVec3::new(200, 200, 0)));
        let report = validate_physics(&pieces, &cfg());
        assert_eq!(report.status, PhysicsStatus::Collision);
        assert_eq!(report.collisions, vec![("b1".to_string(), "overlap".to_string())]);
        assert!(report.floating.is_empty(), "floating check must not run");
        assert!(!report.is_legal());
    }

    #[test]
    fn test_floating_reports_every_piece() {
        let mut pieces = tower();
        pieces.push(brick("f1", 2, 2, IVec3::new(200, 48, 0)));
        pieces.push(brick("f2", 2, 2, IVec3::new(-200, 96, 0)));
        let report = validate_physics(&pieces, &cfg());
        assert_eq!(report.status, PhysicsStatus::Floating);
        assert_eq!(report.floating, vec!["f1".to_string(), "f2".to_string()]);
        assert_eq!(report.errors.len(), 2);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_warnings_only_construction() {
        // A 4x2 plate hanging off one corner stud: supported, but weakly
        let pieces = vec![
            plate("baseplate", 6, 6, IVec3::ZERO),
            brick("post", 2, 2, IVec3::new(0, 8, 0)),
            plate("ledge", 4, 2, IVec3::new(40, 32, 20)),
        ];
        let report = validate_physics(&pieces, &cfg());
        assert_eq!(report.status, PhysicsStatus::Unstable);
        assert!(report.errors.is_empty(), "warnings must never become errors");
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.unstable, vec![("ledge".to_string(), 0.125)]);
        assert!(report.is_legal());
    }

    #[test]
    fn test_threshold_is_configurable() {
        // Half-supported piece passes at 0.25, warns at 0.75
        let pieces = vec![
            brick("low", 2, 2, IVec3::new(0, 8, 0)),
            brick("high", 2, 2, IVec3::new(20, 32, 0)),
        ];
        assert_eq!(validate_physics(&pieces, &cfg()).status, PhysicsStatus::Legal);
        let strict = PhysicsConfig {
            stability_threshold: 0.75,
            ..cfg()
        };
        assert_eq!(validate_physics(&pieces, &strict).status, PhysicsStatus::Unstable);
    }

    #[test]
    fn test_placement_agrees_with_full_validation() {
        let placed = tower();
        let candidates = [
            brick("ok", 2, 2, IVec3::new(20, 80, 0)),
            brick("hit", 2, 2, IVec3::new(0, 40, 0)),
            brick("air", 2, 2, IVec3::new(0, 120, 0)),
            plate("ground", 2, 2, IVec3::new(100, 0, 100)),
        ];
        for candidate in candidates {
            let mut all = placed.clone();
            all.push(candidate.clone());
            let full = validate_physics(&all, &cfg());
            let incremental = validate_placement(&placed, &candidate, &cfg());
            let full_status = if full.is_legal() {
                PhysicsStatus::Legal
            } else {
                full.status
            };
            assert_eq!(incremental, full_status, "candidate {}", candidate.id);
        }
    }
}
