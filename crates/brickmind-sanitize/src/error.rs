use brickmind_core::GeometryError;

/// Caller-visible sanitizer failures. None of them are retried here.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SanitizeError {
    #[error("prompt must not be empty")]
    EmptyPrompt,

    #[error("build source failed: {0}")]
    Source(String),

    #[error("malformed build payload: {0}")]
    PayloadFormat(String),

    #[error("no valid pieces in build payload")]
    NoValidPieces,

    #[error("invalid piece geometry: {0}")]
    Geometry(#[from] GeometryError),
}
