use itertools::iproduct;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::ConfigError;
use crate::state::State;

pub const CELL_SEPARATOR: char = ';';
pub const ROW_COLUMN_SEPARATOR: char = ',';

/// Parse a list such as `"0,0; 2,0; 5,0"` into `(row, col)` pairs.
/// Empty segments (an empty list or a trailing separator) are skipped.
pub fn parse_cells(list: &str) -> Result<Vec<(usize, usize)>, ConfigError> {
    list.split(CELL_SEPARATOR)
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| -> Result<(usize, usize), ConfigError> {
            let malformed = || ConfigError::MalformedCell {
                entry: entry.to_string(),
            };
            let (row, col) = entry.split_once(ROW_COLUMN_SEPARATOR).ok_or_else(malformed)?;
            let row = row.trim().parse::<usize>().map_err(|_| malformed())?;
            let col = col.trim().parse::<usize>().map_err(|_| malformed())?;
            Ok((row, col))
        })
        .collect()
}

/// A `num_rows x num_cols` grid of states, stored row-major.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridWorld {
    num_rows: usize,
    num_cols: usize,
    start: (usize, usize),
    states: Vec<State>,
}

impl GridWorld {
    /// Build the grid from a validated config. Every cell starts white; green,
    /// brown and wall lists are then applied in that order.
    pub fn build(config: &Config) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut grid = GridWorld {
            num_rows: config.num_rows,
            num_cols: config.num_cols,
            start: (config.start_row, config.start_col),
            states: vec![State::new(config.white_reward); config.num_rows * config.num_cols],
        };

        for (list, state) in [
            (&config.green_cell, State::new(config.green_reward)),
            (&config.brown_cell, State::new(config.brown_reward)),
            (&config.wall_cell, State::wall(config.wall_collision)),
        ] {
            for (row, col) in parse_cells(list)? {
                if row >= grid.num_rows || col >= grid.num_cols {
                    return Err(ConfigError::CellOutOfBounds {
                        row,
                        col,
                        num_rows: grid.num_rows,
                        num_cols: grid.num_cols,
                    });
                }
                let idx = grid.index(row, col);
                grid.states[idx] = state;
            }
        }

        let (start_row, start_col) = grid.start;
        if grid.at(start_row, start_col).is_wall() {
            return Err(ConfigError::StartOnWall {
                row: start_row,
                col: start_col,
            });
        }

        debug!(
            "Built {}x{} grid with {} walls",
            grid.num_rows,
            grid.num_cols,
            grid.states.iter().filter(|s| s.is_wall()).count()
        );
        Ok(grid)
    }

    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    /// The agent's start cell. Informational only; solving covers every cell.
    pub fn start(&self) -> (usize, usize) {
        self.start
    }

    fn index(&self, row: usize, col: usize) -> usize {
        assert!(
            row < self.num_rows && col < self.num_cols,
            "cell ({row}, {col}) outside {}x{} grid",
            self.num_rows,
            self.num_cols
        );
        row * self.num_cols + col
    }

    pub fn at(&self, row: usize, col: usize) -> &State {
        &self.states[self.index(row, col)]
    }

    pub fn in_bounds(&self, row: isize, col: isize) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.num_rows && (col as usize) < self.num_cols
    }

    /// True if the agent cannot enter the cell: off the grid or a wall.
    pub fn is_blocked(&self, row: isize, col: isize) -> bool {
        !self.in_bounds(row, col) || self.at(row as usize, col as usize).is_wall()
    }

    /// All `(row, col)` pairs in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        iproduct!(0..self.num_rows, 0..self.num_cols)
    }
}
