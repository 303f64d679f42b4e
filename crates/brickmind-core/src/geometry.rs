//! Pure geometry for catalog parts: connector grids and sized templates.

use crate::catalog::PieceSpec;
use crate::color::BrickColor;
use crate::constants::{UNIT_HEIGHT_FULL, UNIT_HEIGHT_THIN, UNIT_XZ};
use crate::error::GeometryError;
use crate::piece::PieceTemplate;
use crate::types::{Connector, HeightClass, PieceSize};

/// Connector points for a `width_studs` x `depth_studs` face, centered on
/// the local origin and spaced one stud apart. Point (i, j) is
/// `((i - (w-1)/2) * UNIT_XZ, (j - (d-1)/2) * UNIT_XZ)`, ordered by i then j.
///
/// The same grid serves as the top stud set and the bottom anti-stud set.
pub fn generate_connector_grid(width_studs: i32, depth_studs: i32) -> Vec<Connector> {
    let w = width_studs.max(0);
    let d = depth_studs.max(0);
    let mut points = Vec::with_capacity((w * d) as usize);
    // Doubled coordinates keep the half-stud offset of even grids exact.
    for i in 0..w {
        for j in 0..d {
            let x2 = (2 * i - (w - 1)) * UNIT_XZ;
            let z2 = (2 * j - (d - 1)) * UNIT_XZ;
            points.push(Connector::new(x2 / 2, z2 / 2));
        }
    }
    points
}

/// Size a catalog spec and generate its connector sets. Position, rotation
/// and id are assigned later by the placer.
pub fn instantiate_spec(
    spec: &PieceSpec,
    height_multiplier: i32,
    color: &BrickColor,
) -> Result<PieceTemplate, GeometryError> {
    if spec.width_studs <= 0 || spec.depth_studs <= 0 {
        return Err(GeometryError::InvalidDimensions {
            width: spec.width_studs,
            depth: spec.depth_studs,
        });
    }
    if height_multiplier <= 0 {
        return Err(GeometryError::InvalidHeightMultiplier(height_multiplier));
    }

    let unit_height = match spec.height {
        HeightClass::Thin => UNIT_HEIGHT_THIN,
        HeightClass::Full => UNIT_HEIGHT_FULL,
    };
    let grid = generate_connector_grid(spec.width_studs, spec.depth_studs);
    let top_connectors = if spec.shape.has_top_studs() {
        grid.clone()
    } else {
        Vec::new()
    };

    Ok(PieceTemplate {
        part_id: spec.part_id.clone(),
        name: spec.name.clone(),
        shape: spec.shape,
        color: color.clone(),
        size: PieceSize {
            w: spec.width_studs * UNIT_XZ,
            h: unit_height * height_multiplier,
            d: spec.depth_studs * UNIT_XZ,
        },
        top_connectors,
        bottom_connectors: grid,
    })
}
