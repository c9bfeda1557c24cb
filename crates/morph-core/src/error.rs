use thiserror::Error;

/// Construction-time failures of a morph timeline.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MorphError {
    #[error("shape {index} has {actual} points, expected {expected}")]
    LengthMismatch {
        index: usize,
        expected: usize,
        actual: usize,
    },
    #[error("a morph needs at least two shapes, got {0}")]
    TooFewShapes(usize),
    #[error("palette has {actual} colours for {expected} shapes")]
    PaletteMismatch { expected: usize, actual: usize },
}
