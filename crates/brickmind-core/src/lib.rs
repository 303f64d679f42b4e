pub mod build;
pub mod catalog;
pub mod color;
pub mod config;
pub mod constants;
pub mod error;
pub mod geometry;
pub mod math;
pub mod piece;
pub mod types;

pub use build::{AssembledStructure, BuildData, BuildStep, CameraAngle, Palette, PaletteEntry, StepPiece};
pub use catalog::{Catalog, PieceSpec};
pub use color::BrickColor;
pub use config::EngineConfig;
pub use error::{CatalogError, GeometryError};
pub use piece::{Aabb, Piece, PieceTemplate};
pub use types::{Difficulty, HeightClass, PieceSize, Rotation, ShapeKind};
