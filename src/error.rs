use thiserror::Error;

use crate::{Float, UInt};

/// Problems with a grid-world configuration. All of them are detected before
/// the first sweep runs.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("malformed cell entry {entry:?} (expected \"row,col\")")]
    MalformedCell { entry: String },

    #[error("cell ({row}, {col}) is outside the {num_rows}x{num_cols} grid")]
    CellOutOfBounds {
        row: usize,
        col: usize,
        num_rows: usize,
        num_cols: usize,
    },

    #[error("start cell ({row}, {col}) is outside the {num_rows}x{num_cols} grid")]
    StartOutOfBounds {
        row: usize,
        col: usize,
        num_rows: usize,
        num_cols: usize,
    },

    #[error("grid dimensions must be positive, got {num_rows}x{num_cols}")]
    NonPositiveDimension { num_rows: usize, num_cols: usize },

    #[error("{name} must be positive, got {value}")]
    NonPositiveCount { name: &'static str, value: UInt },

    #[error("{name} = {value} is not a probability")]
    InvalidProbability { name: &'static str, value: Float },

    #[error("transition probabilities sum to {sum}, expected 1.0")]
    ProbabilitiesDoNotSumToOne { sum: Float },

    #[error("discount factor {0} is outside (0, 1)")]
    DiscountOutOfRange(Float),

    #[error("maxError must be positive, got {0}")]
    NonPositiveMaxError(Float),

    #[error("convergence threshold {0} is not positive (is every reward <= 0?)")]
    NonPositiveThreshold(Float),

    #[error("start cell ({row}, {col}) is a wall")]
    StartOnWall { row: usize, col: usize },

    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}
