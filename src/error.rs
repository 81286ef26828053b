//! Error types for grid-slam.

use thiserror::Error;

use crate::core::types::Position;

/// grid-slam error type.
///
/// These are caller errors caught at the API boundary. Degenerate estimation
/// (all-zero likelihoods) is deliberately not an error: the filter logs it,
/// records it in [`FilterState`](crate::FilterState), and falls back to a
/// uniform weight table.
#[derive(Error, Debug)]
pub enum SlamError {
    #[error("grid {width}x{height} is too small to have an interior")]
    GridTooSmall { width: i32, height: i32 },

    #[error("position {0:?} lies outside the grid")]
    PositionOutsideGrid(Position),

    #[error("legal position {0:?} appears more than once")]
    DuplicateLegalPosition(Position),

    #[error("start position {0:?} is not in the legal-position set")]
    IllegalStartPosition(Position),

    #[error("wall prior {0} must lie strictly between 0 and 1")]
    WallPriorOutOfRange(f64),

    #[error("particle population must be non-empty")]
    EmptyPopulation,
}

pub type Result<T> = std::result::Result<T, SlamError>;
