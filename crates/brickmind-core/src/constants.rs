//! Single source of truth for the LDraw-unit (LDU) grid.
//! Every position the engine produces is an integer multiple of the snap
//! increments below.

/// Millimetres per LDU.
pub const LDU_TO_MM: f32 = 0.4;

/// Horizontal grid pitch: one stud.
pub const UNIT_XZ: i32 = 20;

/// Height of a full vertical piece (a brick).
pub const UNIT_HEIGHT_FULL: i32 = 24;

/// Height of a thin vertical piece (a plate). Divides UNIT_HEIGHT_FULL.
pub const UNIT_HEIGHT_THIN: i32 = 8;

/// Stud protrusion above a piece's top face. Not part of the bounding box.
pub const STUD_HEIGHT: i32 = 4;

/// Horizontal snap increment.
pub const SNAP_XZ: i32 = 20;

/// Vertical snap increment.
pub const SNAP_Y: i32 = 8;

/// Allowed x/z/y distance between a bottom connector and a top connector
/// for the two to count as interlocked.
pub const CONNECTOR_TOLERANCE: i32 = 2;

/// Support ratio below which a raised piece is flagged as unstable.
pub const STABILITY_THRESHOLD: f32 = 0.25;

/// Pieces at or below this height rest on the baseplate layer and are
/// exempt from the floating and stability checks.
pub const GROUND_CLEARANCE: i32 = SNAP_Y;

/// Candidate proposals per slot before the Creator gives up on it.
pub const MAX_PLACEMENT_RETRIES: u32 = 10;

/// A layer is abandoned once total failures exceed this many retry budgets.
pub const LAYER_ABANDON_FACTOR: u32 = 3;

/// Largest ring radius (in grid cells) searched by collision repair.
pub const MAX_REPAIR_RING: i32 = 6;

/// Largest gap (LDU) between two faces that still counts as touching.
pub const TOUCH_EPSILON: i32 = 1;

/// Largest absolute coordinate (LDU) accepted from outside the engine, on
/// any axis (40 metres). Far enough from `i32::MAX` that bounds,
/// stud positions and repair offsets cannot overflow.
pub const WORLD_EXTENT: i32 = 100_000;

const _: () = assert!(UNIT_HEIGHT_FULL % UNIT_HEIGHT_THIN == 0);
const _: () = assert!(UNIT_HEIGHT_FULL % SNAP_Y == 0);
const _: () = assert!(SNAP_XZ == UNIT_XZ);
const _: () = assert!(WORLD_EXTENT % SNAP_XZ == 0 && WORLD_EXTENT % SNAP_Y == 0);
