use log::{debug, info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::actions::Action;
use crate::config::{Config, Method};
use crate::grid::GridWorld;
use crate::planning::bellman::Backup;
use crate::planning::solver::{Solution, Solver};
use crate::planning::utility::ActionUtility;
use crate::planning::utility_table::UtilityTable;
use crate::transition::TransitionModel;
use crate::{Float, UInt};

/// Modified policy iteration: evaluate the current policy with a fixed
/// number of sweeps, then switch every cell whose greedy action is strictly
/// better. Stops once a round changes nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct PolicyIteration {
    pub model: TransitionModel,
    pub discount: Float,
    /// Evaluation sweeps per round.
    pub sweeps: UInt,
    pub max_rounds: UInt,
    pub seed: u64,
}

impl From<&Config> for PolicyIteration {
    fn from(config: &Config) -> Self {
        PolicyIteration {
            model: TransitionModel::from(config),
            discount: config.disc_factor,
            sweeps: config.k,
            max_rounds: config.max_policy_iterations,
            seed: config.seed,
        }
    }
}

impl PolicyIteration {
    /// Zero utilities with a random action on every open cell.
    fn initial_policy(&self, grid: &GridWorld) -> UtilityTable {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut table = UtilityTable::initial(grid);
        for (row, col) in grid.cells() {
            if !grid.at(row, col).is_wall() {
                table.set(row, col, ActionUtility::new(Action::random(&mut rng), 0.0));
            }
        }
        table
    }

    fn evaluate(&self, backup: &Backup, policy: &UtilityTable) -> UtilityTable {
        (0..self.sweeps).fold(policy.clone(), |table, _| backup.evaluate(&table))
    }

    /// Greedy improvement. Returns the number of cells whose action changed.
    fn improve(&self, backup: &Backup, table: &mut UtilityTable) -> usize {
        let evaluated = table.clone();
        let grid = backup.grid();
        let mut changed = 0;
        for (row, col) in grid.cells() {
            if grid.at(row, col).is_wall() {
                continue;
            }
            let current = evaluated
                .action(row, col)
                .expect("open cells always carry a policy action");
            let best = backup.best_action(&evaluated, row, col);
            let incumbent = backup.action_utility(&evaluated, row, col, current);
            if best.better_than(&incumbent) {
                table.set(
                    row,
                    col,
                    ActionUtility {
                        action: best.action,
                        utility: evaluated.utility(row, col),
                    },
                );
                changed += 1;
            }
        }
        changed
    }
}

impl Solver for PolicyIteration {
    fn name(&self) -> &str {
        "policy iteration"
    }

    fn solve(&mut self, grid: &GridWorld) -> Solution {
        let backup = Backup::new(grid, self.model, self.discount);
        let mut history = vec![self.initial_policy(grid)];
        let mut rounds: UInt = 0;
        let mut converged = false;

        while rounds < self.max_rounds {
            let prev = history.last().expect("history starts with the initial policy");
            let mut table = self.evaluate(&backup, prev);
            let changed = self.improve(&backup, &mut table);
            rounds += 1;
            debug!("Round: {:4} | Changed actions: {}", rounds, changed);
            history.push(table);
            if changed == 0 {
                converged = true;
                break;
            }
        }

        if converged {
            info!("Policy iteration stable after {} rounds", rounds);
        } else {
            warn!(
                "Policy iteration stopped after {} rounds without a stable policy",
                rounds
            );
        }
        Solution {
            method: Method::Policy,
            table: history.last().cloned().expect("at least one round ran"),
            history,
            iterations: rounds,
            converged,
        }
    }
}
