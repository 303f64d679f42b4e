use thiserror::Error;

/// Precondition violations raised while instantiating piece geometry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeometryError {
    #[error("piece dimensions must be positive (got {width}x{depth} studs)")]
    InvalidDimensions { width: i32, depth: i32 },

    #[error("height multiplier must be positive (got {0})")]
    InvalidHeightMultiplier(i32),
}

/// Errors raised while loading catalog or configuration data.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to parse catalog RON: {0}")]
    CatalogParseError(String),

    #[error("Failed to parse engine config RON: {0}")]
    ConfigParseError(String),

    #[error("Duplicate part id '{0}'")]
    DuplicatePartId(String),

    #[error("Part '{part_id}' has invalid dimensions {width}x{depth}")]
    InvalidPartDimensions {
        part_id: String,
        width: i32,
        depth: i32,
    },

    #[error("Catalog is empty")]
    Empty,
}
