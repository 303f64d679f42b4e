use crate::catalog::PieceSpec;
use crate::color::BrickColor;
use crate::piece::Piece;
use crate::types::{estimated_minutes, Difficulty, Rotation};
use glam::IVec3;
use serde::Serialize;

/// One (spec, color, quantity) line of a palette or inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaletteEntry {
    /// Palette-local id ("P001", ...).
    pub id: String,
    pub spec: PieceSpec,
    pub color: BrickColor,
    pub quantity: u32,
}

/// Parts available to a single build request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Palette {
    pub entries: Vec<PaletteEntry>,
}

impl Palette {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all entry quantities.
    pub fn total_quantity(&self) -> u32 {
        self.entries.iter().map(|e| e.quantity).sum()
    }
}

/// The placed pieces of one design variant plus derived metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssembledStructure {
    pub name: String,
    pub subtitle: String,
    pub pieces: Vec<Piece>,
    pub difficulty: Difficulty,
    pub estimated_minutes: u32,
}

impl AssembledStructure {
    /// Wrap a piece list, deriving difficulty and build time from its length.
    pub fn new(name: impl Into<String>, subtitle: impl Into<String>, pieces: Vec<Piece>) -> Self {
        let count = pieces.len();
        Self {
            name: name.into(),
            subtitle: subtitle.into(),
            pieces,
            difficulty: Difficulty::from_count(count),
            estimated_minutes: estimated_minutes(count),
        }
    }

    pub fn piece_count(&self) -> usize {
        self.pieces.len()
    }
}

/// A piece as listed in a build step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepPiece {
    pub piece_id: String,
    pub part_id: String,
    pub position: IVec3,
    pub rotation: Rotation,
}

impl From<&Piece> for StepPiece {
    fn from(p: &Piece) -> Self {
        Self {
            piece_id: p.id.clone(),
            part_id: p.part_id.clone(),
            position: p.position,
            rotation: p.rotation,
        }
    }
}

/// Suggested camera framing, in degrees. Presentation only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CameraAngle {
    pub rotate_x: i32,
    pub rotate_y: i32,
}

impl CameraAngle {
    /// Tilt slowly and orbit 30 degrees per step.
    pub fn for_step(index: usize) -> Self {
        let s = index as i32;
        Self {
            rotate_x: -25 + s * 2,
            rotate_y: s * 30,
        }
    }
}

/// A contiguous slice of a structure's pieces with a description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildStep {
    /// 1-based.
    pub step_num: usize,
    pub title: String,
    pub description: String,
    pub pieces: Vec<StepPiece>,
    pub camera: CameraAngle,
}

/// Everything the Creator produces for one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildData {
    pub prompt: String,
    pub budget: u32,
    pub palette: Palette,
    /// Compact variant first, full variant second.
    pub variants: [AssembledStructure; 2],
    /// Derived from the full variant.
    pub steps: Vec<BuildStep>,
}

impl BuildData {
    pub fn compact(&self) -> &AssembledStructure {
        &self.variants[0]
    }

    pub fn full(&self) -> &AssembledStructure {
        &self.variants[1]
    }
}
