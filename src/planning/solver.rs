use enum_dispatch::enum_dispatch;
use serde::{Deserialize, Serialize};

use crate::UInt;
use crate::config::{Config, Method};
use crate::error::ConfigError;
use crate::grid::GridWorld;
use crate::planning::policy_iteration::PolicyIteration;
use crate::planning::utility_table::UtilityTable;
use crate::planning::value_iteration::ValueIteration;

#[enum_dispatch]
pub trait Solver {
    fn name(&self) -> &str;
    /// Compute utilities and a policy for every cell of the grid.
    fn solve(&mut self, grid: &GridWorld) -> Solution;
}

#[derive(Debug, Clone, PartialEq)]
#[enum_dispatch(Solver)]
pub enum SolverType {
    Value(ValueIteration),
    Policy(PolicyIteration),
}

impl SolverType {
    pub fn from_config(config: &Config) -> Self {
        match config.method {
            Method::Value => ValueIteration::from(config).into(),
            Method::Policy => PolicyIteration::from(config).into(),
        }
    }
}

/// Result of a solve. `history[0]` is the initial table and `history[i]` the
/// table after iteration `i`; the last entry equals `table`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    pub method: Method,
    pub table: UtilityTable,
    pub history: Vec<UtilityTable>,
    /// Sweeps (value iteration) or improvement rounds (policy iteration) run.
    pub iterations: UInt,
    /// True when the run stopped because its convergence test passed rather
    /// than because of a fixed budget or cap.
    pub converged: bool,
}

/// Validate `config`, build its grid and solve it with the configured method.
pub fn solve(config: &Config) -> Result<(GridWorld, Solution), ConfigError> {
    let grid = GridWorld::build(config)?;
    let solution = SolverType::from_config(config).solve(&grid);
    Ok((grid, solution))
}
