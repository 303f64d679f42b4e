use glam::IVec2;
use serde::{Deserialize, Serialize};

/// Local (x, z) offset of a stud or anti-stud, in LDU.
pub type Connector = IVec2;

/// Rotation about the vertical axis. Only quarter turns are representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

/// All four rotations in clockwise order.
pub const ALL_ROTATIONS: [Rotation; 4] = [
    Rotation::Deg0,
    Rotation::Deg90,
    Rotation::Deg180,
    Rotation::Deg270,
];

impl Rotation {
    /// Rotation in degrees (0, 90, 180 or 270).
    pub fn degrees(self) -> u16 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }

    /// Build from a quarter-turn count; any integer is reduced mod 4.
    pub fn from_quarter_turns(turns: i64) -> Self {
        ALL_ROTATIONS[turns.rem_euclid(4) as usize]
    }

    /// Number of clockwise quarter turns.
    pub fn quarter_turns(self) -> i64 {
        self.degrees() as i64 / 90
    }

    /// Compose two rotations (mod 360).
    pub fn add(self, other: Rotation) -> Rotation {
        Self::from_quarter_turns(self.quarter_turns() + other.quarter_turns())
    }

    /// Whether this rotation swaps the footprint's width and depth.
    pub fn is_quarter(self) -> bool {
        matches!(self, Rotation::Deg90 | Rotation::Deg270)
    }

    /// Rotate a local connector offset about the piece origin.
    pub fn apply(self, p: Connector) -> Connector {
        match self {
            Rotation::Deg0 => p,
            Rotation::Deg90 => IVec2::new(-p.y, p.x),
            Rotation::Deg180 => IVec2::new(-p.x, -p.y),
            Rotation::Deg270 => IVec2::new(p.y, -p.x),
        }
    }
}

impl From<Rotation> for u16 {
    fn from(r: Rotation) -> u16 {
        r.degrees()
    }
}

impl TryFrom<u16> for Rotation {
    type Error = String;

    fn try_from(deg: u16) -> Result<Self, Self::Error> {
        match deg {
            0 => Ok(Rotation::Deg0),
            90 => Ok(Rotation::Deg90),
            180 => Ok(Rotation::Deg180),
            270 => Ok(Rotation::Deg270),
            other => Err(format!("rotation must be 0, 90, 180 or 270 (got {other})")),
        }
    }
}

/// Categorical form of a piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Brick,
    Plate,
    Slope,
    Tile,
    Round,
    Technic,
    Special,
}

impl ShapeKind {
    /// Tiles are smooth on top and expose no studs.
    pub fn has_top_studs(self) -> bool {
        !matches!(self, ShapeKind::Tile)
    }

    pub fn name(self) -> &'static str {
        match self {
            ShapeKind::Brick => "brick",
            ShapeKind::Plate => "plate",
            ShapeKind::Slope => "slope",
            ShapeKind::Tile => "tile",
            ShapeKind::Round => "round",
            ShapeKind::Technic => "technic",
            ShapeKind::Special => "special",
        }
    }
}

/// Vertical size class of a piece spec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeightClass {
    /// One plate high (UNIT_HEIGHT_THIN).
    Thin,
    /// One brick high (UNIT_HEIGHT_FULL).
    Full,
}

/// World-space extent of a piece in LDU, before rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PieceSize {
    pub w: i32,
    pub h: i32,
    pub d: i32,
}

/// Coarse build difficulty derived from the piece count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Novice,
    Intermediate,
    Expert,
}

impl Difficulty {
    /// `count < 80` is novice, `count > 150` is expert, everything between
    /// is intermediate.
    pub fn from_count(count: usize) -> Self {
        if count < 80 {
            Difficulty::Novice
        } else if count > 150 {
            Difficulty::Expert
        } else {
            Difficulty::Intermediate
        }
    }
}

/// Estimated build time in minutes: `floor(count * 0.6)`.
pub fn estimated_minutes(count: usize) -> u32 {
    (count as u64 * 6 / 10) as u32
}
