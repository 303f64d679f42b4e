use crate::color::BrickColor;
use crate::types::{Connector, PieceSize, Rotation, ShapeKind};
use glam::IVec3;
use serde::{Deserialize, Serialize};

/// A sized part with connectors but no placement yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceTemplate {
    pub part_id: String,
    pub name: String,
    pub shape: ShapeKind,
    pub color: BrickColor,
    pub size: PieceSize,
    pub top_connectors: Vec<Connector>,
    pub bottom_connectors: Vec<Connector>,
}

impl PieceTemplate {
    /// Place the template in the world.
    pub fn place(self, id: impl Into<String>, position: IVec3, rotation: Rotation) -> Piece {
        Piece {
            id: id.into(),
            part_id: self.part_id,
            name: self.name,
            shape: self.shape,
            color: self.color,
            position,
            size: self.size,
            rotation,
            top_connectors: self.top_connectors,
            bottom_connectors: self.bottom_connectors,
        }
    }
}

/// A placed piece. `position` is the center of the bottom face in LDU:
/// the box spans `x ± w/2`, `z ± d/2` and `y .. y + h`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    pub id: String,
    pub part_id: String,
    pub name: String,
    pub shape: ShapeKind,
    pub color: BrickColor,
    pub position: IVec3,
    /// Unrotated size from the catalog entry.
    pub size: PieceSize,
    pub rotation: Rotation,
    pub top_connectors: Vec<Connector>,
    pub bottom_connectors: Vec<Connector>,
}

impl Piece {
    /// Horizontal extent after rotation as (x extent, z extent).
    pub fn footprint(&self) -> (i32, i32) {
        if self.rotation.is_quarter() {
            (self.size.d, self.size.w)
        } else {
            (self.size.w, self.size.d)
        }
    }

    /// World-space bounding box.
    pub fn bounds(&self) -> Aabb {
        let (fw, fd) = self.footprint();
        let p = self.position;
        Aabb {
            min: IVec3::new(p.x - fw / 2, p.y, p.z - fd / 2),
            max: IVec3::new(p.x + fw / 2, p.y + self.size.h, p.z + fd / 2),
        }
    }

    /// Height of the top face.
    pub fn top_y(&self) -> i32 {
        self.position.y + self.size.h
    }

    /// World (x, z) of each top stud.
    pub fn world_top_connectors(&self) -> impl Iterator<Item = Connector> + '_ {
        let origin = Connector::new(self.position.x, self.position.z);
        self.top_connectors
            .iter()
            .map(move |c| origin + self.rotation.apply(*c))
    }

    /// World (x, z) of each bottom anti-stud.
    pub fn world_bottom_connectors(&self) -> impl Iterator<Item = Connector> + '_ {
        let origin = Connector::new(self.position.x, self.position.z);
        self.bottom_connectors
            .iter()
            .map(move |c| origin + self.rotation.apply(*c))
    }

    /// Same piece turned by an extra `by` about its own center.
    pub fn rotated(&self, by: Rotation) -> Piece {
        Piece {
            rotation: self.rotation.add(by),
            ..self.clone()
        }
    }
}

/// Axis-aligned box in LDU.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Aabb {
    pub min: IVec3,
    pub max: IVec3,
}

impl Aabb {
    /// Signed gap between the two boxes along `axis`. Negative means the
    /// intervals overlap, zero means they share a face plane.
    fn gap(&self, other: &Aabb, axis: usize) -> i32 {
        (other.min[axis] - self.max[axis]).max(self.min[axis] - other.max[axis])
    }

    /// Strict interior overlap on all three axes. Boxes that only share a
    /// face do not overlap.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        (0..3).all(|axis| self.gap(other, axis) < 0)
    }

    /// Face contact: on exactly one axis the boxes are separated by at most
    /// `epsilon`, and on the other two their intervals overlap.
    pub fn touches(&self, other: &Aabb, epsilon: i32) -> bool {
        (0..3).any(|axis| {
            let g = self.gap(other, axis);
            let others_overlap = (0..3)
                .filter(|&a| a != axis)
                .all(|a| self.gap(other, a) < 0);
            (0..=epsilon).contains(&g) && others_overlap
        })
    }
}
