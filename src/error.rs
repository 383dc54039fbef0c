use thiserror::Error;

/// Errors raised by the maze model and the generator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MazeError {
    #[error("position ({x}, {y}) is outside the {width}x{height} grid")]
    InvalidPosition {
        x: u16,
        y: u16,
        width: u16,
        height: u16,
    },

    #[error("invalid maze configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("maze generation failed: {0}")]
    GenerationFailure(String),
}

/// Configuration problems, rejected before any search starts.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("grid must be at least {min}x{min}, got {width}x{height}")]
    GridTooSmall { width: u16, height: u16, min: u16 },

    #[error("grid must be at most {max}x{max}, got {width}x{height}")]
    GridTooLarge {
        width: usize,
        height: usize,
        max: usize,
    },

    #[error("grid rows must all have the same length (row {row} has {found} cells, expected {expected})")]
    RaggedRows {
        row: usize,
        found: usize,
        expected: usize,
    },

    #[error("{which} cell ({x}, {y}) is outside the {width}x{height} grid")]
    EndpointOutOfBounds {
        which: &'static str,
        x: u16,
        y: u16,
        width: u16,
        height: u16,
    },

    #[error("{which} cell ({x}, {y}) is a wall")]
    EndpointOnWall { which: &'static str, x: u16, y: u16 },

    #[error("{which} cell ({x}, {y}) must have odd coordinates to lie on a carved cell")]
    EndpointOffLattice { which: &'static str, x: u16, y: u16 },

    #[error("start and goal must differ, both are ({x}, {y})")]
    StartIsGoal { x: u16, y: u16 },

    #[error("unexpected character {found:?} at row {row}, column {col} (expected '#' or '.')")]
    BadTile { row: usize, col: usize, found: char },

    #[error("step delay bounds are invalid: min {min_ms}ms, default {default_ms}ms, max {max_ms}ms")]
    DelayBounds {
        min_ms: u128,
        default_ms: u128,
        max_ms: u128,
    },
}

pub type Result<T> = std::result::Result<T, MazeError>;

impl From<MazeError> for std::io::Error {
    fn from(err: MazeError) -> Self {
        let kind = match err {
            MazeError::GenerationFailure(_) => std::io::ErrorKind::Other,
            _ => std::io::ErrorKind::InvalidInput,
        };
        std::io::Error::new(kind, err)
    }
}
