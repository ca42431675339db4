use serde::{Deserialize, Serialize};

use crate::actions::Action;
use crate::config::Config;
use crate::grid::GridWorld;
use crate::{Float, PROBABILITY_TOLERANCE};

/// Stochastic drift of the agent: it moves in the intended direction most of
/// the time and veers 90 degrees to either side otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransitionModel {
    pub intended: Float,
    /// Probability of veering clockwise.
    pub right: Float,
    /// Probability of veering counter-clockwise.
    pub left: Float,
}

impl Default for TransitionModel {
    fn default() -> Self {
        TransitionModel {
            intended: 0.8,
            right: 0.1,
            left: 0.1,
        }
    }
}

impl From<&Config> for TransitionModel {
    fn from(config: &Config) -> Self {
        TransitionModel {
            intended: config.intended_prob,
            right: config.right_prob,
            left: config.left_prob,
        }
    }
}

impl TransitionModel {
    /// `(probability, resulting direction)` for each way the intended move can go.
    pub fn outcomes(&self, intended: Action) -> [(Float, Action); 3] {
        debug_assert!(
            (self.intended + self.right + self.left - 1.0).abs() <= PROBABILITY_TOLERANCE,
            "transition probabilities must sum to 1"
        );
        [
            (self.intended, intended),
            (self.right, intended.clockwise()),
            (self.left, intended.counter_clockwise()),
        ]
    }

    /// Cell reached by moving one step from `(row, col)` in `direction`. A move
    /// into a wall or off the grid leaves the agent where it was.
    pub fn step(
        &self,
        grid: &GridWorld,
        row: usize,
        col: usize,
        direction: Action,
    ) -> (usize, usize) {
        let (dr, dc) = direction.delta();
        let (next_row, next_col) = (row as isize + dr, col as isize + dc);
        if grid.is_blocked(next_row, next_col) {
            (row, col)
        } else {
            (next_row as usize, next_col as usize)
        }
    }
}
