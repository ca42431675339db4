use log::{debug, info};

use crate::config::{Config, Method, Stopping};
use crate::grid::GridWorld;
use crate::planning::bellman::Backup;
use crate::planning::solver::{Solution, Solver};
use crate::planning::utility_table::UtilityTable;
use crate::transition::TransitionModel;
use crate::{Float, UInt};

/// Synchronous value iteration. Each sweep builds a new table from the
/// previous one; nothing is updated in place.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueIteration {
    pub model: TransitionModel,
    pub discount: Float,
    pub sweeps: UInt,
    pub stopping: Stopping,
    pub threshold: Float,
}

impl From<&Config> for ValueIteration {
    fn from(config: &Config) -> Self {
        ValueIteration {
            model: TransitionModel::from(config),
            discount: config.disc_factor,
            sweeps: config.k,
            stopping: config.stopping,
            threshold: config.convergence_threshold(),
        }
    }
}

impl ValueIteration {
    fn done(&self, sweep: UInt, delta: Float) -> bool {
        match self.stopping {
            Stopping::FixedSweeps => sweep >= self.sweeps,
            Stopping::Converged => delta < self.threshold,
        }
    }
}

impl Solver for ValueIteration {
    fn name(&self) -> &str {
        "value iteration"
    }

    fn solve(&mut self, grid: &GridWorld) -> Solution {
        let backup = Backup::new(grid, self.model, self.discount);
        let mut history = vec![UtilityTable::initial(grid)];
        let mut sweep: UInt = 0;
        loop {
            let prev = history.last().expect("history starts with the initial table");
            let next = backup.sweep(prev);
            let delta = next.max_abs_diff(prev);
            sweep += 1;
            debug!("Sweep: {:4} | Max change: {:.6}", sweep, delta);
            history.push(next);
            if self.done(sweep, delta) {
                break;
            }
        }

        let converged = self.stopping == Stopping::Converged;
        info!(
            "Value iteration finished after {} sweeps ({})",
            sweep, self.stopping
        );
        Solution {
            method: Method::Value,
            table: history.last().cloned().expect("at least one sweep ran"),
            history,
            iterations: sweep,
            converged,
        }
    }
}
