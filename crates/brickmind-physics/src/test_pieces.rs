//! Piece builders shared by this crate's unit tests.

use brickmind_core::catalog::PieceSpec;
use brickmind_core::geometry::instantiate_spec;
use brickmind_core::{BrickColor, HeightClass, Piece, Rotation, ShapeKind};
use glam::IVec3;

fn make(id: &str, shape: ShapeKind, height: HeightClass, w: i32, d: i32, pos: IVec3) -> Piece {
    let spec = PieceSpec::new("test", "Test", shape, w, d, height);
    instantiate_spec(&spec, 1, &BrickColor::new("Red", "#E3000B"))
        .unwrap()
        .place(id, pos, Rotation::Deg0)
}

pub(crate) fn brick(id: &str, w: i32, d: i32, pos: IVec3) -> Piece {
    make(id, ShapeKind::Brick, HeightClass::Full, w, d, pos)
}

pub(crate) fn plate(id: &str, w: i32, d: i32, pos: IVec3) -> Piece {
    make(id, ShapeKind::Plate, HeightClass::Thin, w, d, pos)
}

pub(crate) fn tile(id: &str, w: i32, d: i32, pos: IVec3) -> Piece {
    make(id, ShapeKind::Tile, HeightClass::Thin, w, d, pos)
}
