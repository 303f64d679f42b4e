use crate::error::CatalogError;
use crate::types::{HeightClass, ShapeKind};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Static catalog entry describing one kind of part.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PieceSpec {
    /// LDraw part number, lowercase (e.g. "3001", "3068b").
    pub part_id: String,
    /// Human-readable name for inventory display.
    pub name: String,
    pub shape: ShapeKind,
    /// Extent along local x, in studs.
    pub width_studs: i32,
    /// Extent along local z, in studs.
    pub depth_studs: i32,
    pub height: HeightClass,
}

impl PieceSpec {
    pub fn new(
        part_id: &str,
        name: &str,
        shape: ShapeKind,
        width_studs: i32,
        depth_studs: i32,
        height: HeightClass,
    ) -> Self {
        Self {
            part_id: part_id.into(),
            name: name.into(),
            shape,
            width_studs,
            depth_studs,
            height,
        }
    }
}

/// Part id used when an external identifier cannot be resolved.
pub const DEFAULT_PART_ID: &str = "3003";

/// Ordered shape list the Creator draws its palette from.
pub const CREATOR_SHAPES: [&str; 7] = ["3001", "3003", "3004", "3020", "3022", "3039", "2431"];

/// Read-only part lookup table, keyed by normalized part id.
#[derive(Debug, Clone)]
pub struct Catalog {
    specs: Vec<PieceSpec>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids and non-positive dimensions.
    pub fn new(specs: Vec<PieceSpec>) -> Result<Self, CatalogError> {
        if specs.is_empty() {
            return Err(CatalogError::Empty);
        }
        let mut seen = HashSet::new();
        for spec in &specs {
            if !seen.insert(spec.part_id.clone()) {
                return Err(CatalogError::DuplicatePartId(spec.part_id.clone()));
            }
            if spec.width_studs <= 0 || spec.depth_studs <= 0 {
                return Err(CatalogError::InvalidPartDimensions {
                    part_id: spec.part_id.clone(),
                    width: spec.width_studs,
                    depth: spec.depth_studs,
                });
            }
        }
        Ok(Self { specs })
    }

    /// The built-in part table.
    pub fn builtin() -> Self {
        use HeightClass::{Full, Thin};
        use ShapeKind::*;
        Self {
            specs: vec![
                PieceSpec::new("3001", "Brick 2x4", Brick, 4, 2, Full),
                PieceSpec::new("3003", "Brick 2x2", Brick, 2, 2, Full),
                PieceSpec::new("3004", "Brick 1x2", Brick, 2, 1, Full),
                PieceSpec::new("3010", "Brick 1x4", Brick, 4, 1, Full),
                PieceSpec::new("3020", "Plate 2x4", Plate, 4, 2, Thin),
                PieceSpec::new("3022", "Plate 2x2", Plate, 2, 2, Thin),
                PieceSpec::new("3023", "Plate 1x2", Plate, 2, 1, Thin),
                PieceSpec::new("3666", "Plate 1x6", Plate, 6, 1, Thin),
                PieceSpec::new("3039", "Slope 2x2", Slope, 2, 2, Full),
                PieceSpec::new("3040", "Slope 1x2", Slope, 2, 1, Full),
                PieceSpec::new("3068b", "Tile 2x2", Tile, 2, 2, Thin),
                PieceSpec::new("2431", "Tile 1x4", Tile, 4, 1, Thin),
                PieceSpec::new("3062b", "Round 1x1", Round, 1, 1, Full),
                PieceSpec::new("3701", "Technic Beam 1x4", Technic, 4, 1, Full),
                PieceSpec::new("2780", "Technic Pin", Technic, 1, 1, Full),
                PieceSpec::new("2437", "Windshield 3x4", Special, 4, 3, Full),
            ],
        }
    }

    pub fn specs(&self) -> &[PieceSpec] {
        &self.specs
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Exact lookup by part id.
    pub fn get(&self, part_id: &str) -> Option<&PieceSpec> {
        self.specs.iter().find(|s| s.part_id == part_id)
    }

    /// Fallback spec for unresolvable identifiers. Uses `DEFAULT_PART_ID`
    /// when present, otherwise the first entry.
    pub fn default_spec(&self) -> &PieceSpec {
        self.get(DEFAULT_PART_ID).unwrap_or(&self.specs[0])
    }

    /// Resolve an untrusted identifier: trims, lowercases, drops a `.dat`
    /// suffix, then retries without a trailing variant letter ("3068b" and
    /// "3068" both resolve). Returns `None` when nothing matches.
    pub fn resolve(&self, raw: &str) -> Option<&PieceSpec> {
        let mut id = raw.trim().to_lowercase();
        if let Some(stripped) = id.strip_suffix(".dat") {
            id = stripped.to_string();
        }
        if id.is_empty() {
            return None;
        }
        if let Some(spec) = self.get(&id) {
            return Some(spec);
        }
        // "3068" -> "3068b" and "3001a" -> "3001"
        let base = id.trim_end_matches(|c: char| c.is_ascii_alphabetic());
        self.specs.iter().find(|s| {
            s.part_id == base || s.part_id.trim_end_matches(|c: char| c.is_ascii_alphabetic()) == base
        })
    }

    /// Resolve or fall back to the default spec.
    pub fn normalize(&self, raw: &str) -> &PieceSpec {
        self.resolve(raw).unwrap_or_else(|| self.default_spec())
    }

    /// The Creator's ordered shape subset. Ids missing from a custom
    /// catalog are skipped; an empty result falls back to every spec.
    pub fn creator_shapes(&self) -> Vec<&PieceSpec> {
        let shapes: Vec<&PieceSpec> = CREATOR_SHAPES.iter().filter_map(|id| self.get(id)).collect();
        if shapes.is_empty() {
            self.specs.iter().collect()
        } else {
            shapes
        }
    }
}

/// Parse a part catalog from a RON list of specs.
pub fn load_catalog_from_str(ron_str: &str) -> Result<Catalog, CatalogError> {
    let options = ron::Options::default();
    let specs: Vec<PieceSpec> = options
        .from_str(ron_str)
        .map_err(|e| CatalogError::CatalogParseError(e.to_string()))?;
    Catalog::new(specs)
}
