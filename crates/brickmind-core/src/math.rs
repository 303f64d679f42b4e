use crate::constants::{SNAP_XZ, SNAP_Y, UNIT_HEIGHT_FULL};
use crate::types::Rotation;

/// Round `value` to the nearest multiple of `step`, ties toward +infinity.
/// `step` must be positive. Out-of-range input saturates to the largest
/// multiple of `step` that fits in `i32`, so the result is always on the
/// grid; NaN maps to 0.
pub fn round_half_up(value: f64, step: i32) -> i32 {
    let s = step as f64;
    let max_multiple = (i32::MAX / step) as f64;
    ((value / s + 0.5).floor().clamp(-max_multiple, max_multiple) * s) as i32
}

/// Integer variant of [`round_half_up`].
pub fn snap_int(value: i32, step: i32) -> i32 {
    (value + step / 2).div_euclid(step) * step
}

/// Snap a horizontal coordinate to the stud grid.
pub fn snap_xz(value: f64) -> i32 {
    round_half_up(value, SNAP_XZ)
}

/// Snap a vertical coordinate to the plate grid.
pub fn snap_y(value: f64) -> i32 {
    round_half_up(value, SNAP_Y)
}

/// Snap a vertical coordinate to whole brick heights. Negative input is
/// folded to its absolute value after snapping.
pub fn snap_full_height(value: f64) -> i32 {
    round_half_up(value, UNIT_HEIGHT_FULL).abs()
}

/// Snap an arbitrary angle in degrees to the nearest quarter turn.
/// Non-finite input maps to no rotation.
pub fn snap_rotation(degrees: f64) -> Rotation {
    if !degrees.is_finite() {
        return Rotation::Deg0;
    }
    Rotation::from_quarter_turns((degrees / 90.0 + 0.5).floor() as i64)
}

/// Whether a position satisfies the grid-alignment invariant.
pub fn is_grid_aligned(x: i32, y: i32, z: i32) -> bool {
    x.rem_euclid(SNAP_XZ) == 0 && z.rem_euclid(SNAP_XZ) == 0 && y.rem_euclid(SNAP_Y) == 0
}
