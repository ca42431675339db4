use serde::{Deserialize, Serialize};

use crate::Float;
use crate::actions::Action;
use crate::grid::GridWorld;
use crate::planning::utility::ActionUtility;

/// One `ActionUtility` per grid cell, row-major.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UtilityTable {
    num_rows: usize,
    num_cols: usize,
    cells: Vec<ActionUtility>,
}

impl UtilityTable {
    /// Table before the first sweep: open cells at 0.0 with no action yet,
    /// wall cells pinned to their wall reward.
    pub fn initial(grid: &GridWorld) -> Self {
        let cells = grid
            .cells()
            .map(|(row, col)| {
                let state = grid.at(row, col);
                if state.is_wall() {
                    ActionUtility::wall(state.reward())
                } else {
                    ActionUtility::default()
                }
            })
            .collect();
        UtilityTable {
            num_rows: grid.num_rows(),
            num_cols: grid.num_cols(),
            cells,
        }
    }

    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    fn index(&self, row: usize, col: usize) -> usize {
        assert!(
            row < self.num_rows && col < self.num_cols,
            "utility table access ({row}, {col}) outside {}x{}",
            self.num_rows,
            self.num_cols
        );
        row * self.num_cols + col
    }

    pub fn get(&self, row: usize, col: usize) -> &ActionUtility {
        &self.cells[self.index(row, col)]
    }

    pub fn set(&mut self, row: usize, col: usize, value: ActionUtility) {
        let idx = self.index(row, col);
        self.cells[idx] = value;
    }

    pub fn utility(&self, row: usize, col: usize) -> Float {
        self.get(row, col).utility
    }

    pub fn action(&self, row: usize, col: usize) -> Option<Action> {
        self.get(row, col).action
    }

    pub fn rows(&self) -> impl Iterator<Item = &[ActionUtility]> {
        self.cells.chunks(self.num_cols)
    }

    /// Largest absolute utility difference between two tables of the same shape.
    pub fn max_abs_diff(&self, other: &UtilityTable) -> Float {
        assert_eq!(
            (self.num_rows, self.num_cols),
            (other.num_rows, other.num_cols),
            "utility tables differ in shape"
        );
        self.cells
            .iter()
            .zip(&other.cells)
            .map(|(a, b)| (a.utility - b.utility).abs())
            .fold(0.0, Float::max)
    }
}
