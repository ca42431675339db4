pub mod actions;
pub mod config;
pub mod error;
pub mod grid;
pub mod planning;
pub mod render;
pub mod state;
pub mod transition;

pub type Float = f64;
pub type UInt = u32;

/// Tolerance used when checking that transition probabilities sum to one.
pub const PROBABILITY_TOLERANCE: Float = 1e-9;
