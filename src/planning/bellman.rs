use crate::Float;
use crate::actions::Action;
use crate::grid::GridWorld;
use crate::planning::utility::ActionUtility;
use crate::planning::utility_table::UtilityTable;
use crate::transition::TransitionModel;

/// Bellman backups over one grid: `U'(s) = R(s) + γ · Σ P(s'|s,a) U(s')`.
///
/// Every method reads a previous table and never writes to it, so a sweep is
/// always synchronous.
#[derive(Debug, Clone, Copy)]
pub struct Backup<'a> {
    grid: &'a GridWorld,
    model: TransitionModel,
    discount: Float,
}

impl<'a> Backup<'a> {
    pub fn new(grid: &'a GridWorld, model: TransitionModel, discount: Float) -> Self {
        Backup {
            grid,
            model,
            discount,
        }
    }

    pub fn grid(&self) -> &'a GridWorld {
        self.grid
    }

    /// `Σ P(s'|s,a) · prev[s']` for the intended `action` from `(row, col)`.
    pub fn expected_utility(
        &self,
        prev: &UtilityTable,
        row: usize,
        col: usize,
        action: Action,
    ) -> Float {
        self.model
            .outcomes(action)
            .into_iter()
            .map(|(probability, direction)| {
                let (r, c) = self.model.step(self.grid, row, col, direction);
                probability * prev.utility(r, c)
            })
            .sum()
    }

    /// Backed-up utility of committing to `action` in an open cell.
    pub fn action_utility(
        &self,
        prev: &UtilityTable,
        row: usize,
        col: usize,
        action: Action,
    ) -> ActionUtility {
        let state = self.grid.at(row, col);
        assert!(!state.is_wall(), "backup requested for wall cell ({row}, {col})");
        ActionUtility::new(
            action,
            state.reward() + self.discount * self.expected_utility(prev, row, col, action),
        )
    }

    /// Best action for an open cell. Actions are tried in canonical order and
    /// the incumbent is replaced only on strict improvement.
    pub fn best_action(&self, prev: &UtilityTable, row: usize, col: usize) -> ActionUtility {
        let mut actions = Action::all();
        let first = actions.next().expect("at least one action in enum");
        let mut best = self.action_utility(prev, row, col, first);
        for action in actions {
            let candidate = self.action_utility(prev, row, col, action);
            if candidate.better_than(&best) {
                best = candidate;
            }
        }
        best
    }

    /// One synchronous value-iteration sweep. Wall cells are copied through.
    pub fn sweep(&self, prev: &UtilityTable) -> UtilityTable {
        let mut next = prev.clone();
        for (row, col) in self.grid.cells() {
            if !self.grid.at(row, col).is_wall() {
                next.set(row, col, self.best_action(prev, row, col));
            }
        }
        next
    }

    /// One synchronous sweep evaluating the fixed policy stored in `prev`.
    pub fn evaluate(&self, prev: &UtilityTable) -> UtilityTable {
        let mut next = prev.clone();
        for (row, col) in self.grid.cells() {
            if self.grid.at(row, col).is_wall() {
                continue;
            }
            let action = prev
                .action(row, col)
                .unwrap_or_else(|| panic!("open cell ({row}, {col}) has no policy action"));
            next.set(row, col, self.action_utility(prev, row, col, action));
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use approx::assert_relative_eq;

    fn strip(num_cols: usize, green: &str) -> Config {
        Config {
            num_rows: 1,
            num_cols,
            start_row: 0,
            start_col: 0,
            green_cell: green.to_string(),
            brown_cell: String::new(),
            wall_cell: String::new(),
            ..Config::default()
        }
    }

    #[test]
    fn test_first_sweep_is_reward() {
        let config = Config::default();
        let grid = GridWorld::build(&config).unwrap();
        let backup = Backup::new(&grid, TransitionModel::from(&config), config.disc_factor);
        let table = backup.sweep(&UtilityTable::initial(&grid));
        for (row, col) in grid.cells() {
            assert_relative_eq!(table.utility(row, col), grid.at(row, col).reward());
        }
    }

    #[test]
    fn test_all_ties_pick_up() {
        let config = Config::default();
        let grid = GridWorld::build(&config).unwrap();
        let backup = Backup::new(&grid, TransitionModel::from(&config), config.disc_factor);
        let table = backup.sweep(&UtilityTable::initial(&grid));
        for (row, col) in grid.cells().filter(|&(r, c)| !grid.at(r, c).is_wall()) {
            assert_eq!(table.action(row, col), Some(Action::Up));
        }
    }

    #[test]
    fn test_tie_between_left_and_right_picks_left() {
        // Green cells on both sides of the middle cell make Left and Right
        // equally good and strictly better than Up and Down.
        let config = strip(3, "0,0; 0,2");
        let grid = GridWorld::build(&config).unwrap();
        let backup = Backup::new(&grid, TransitionModel::from(&config), config.disc_factor);
        let first = backup.sweep(&UtilityTable::initial(&grid));
        let up = backup.action_utility(&first, 0, 1, Action::Up);
        let left = backup.action_utility(&first, 0, 1, Action::Left);
        let right = backup.action_utility(&first, 0, 1, Action::Right);
        assert!(left.same_utility(&right));
        assert!(left.better_than(&up));

        let best = backup.best_action(&first, 0, 1);
        assert_eq!(best.action, Some(Action::Left));
        assert_relative_eq!(
            best.utility,
            -0.04 + 0.99 * (0.8 * 1.0 + 0.2 * -0.04),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_expected_utility_uses_bounce() {
        let config = strip(2, "0,1");
        let grid = GridWorld::build(&config).unwrap();
        let backup = Backup::new(&grid, TransitionModel::from(&config), config.disc_factor);
        let first = backup.sweep(&UtilityTable::initial(&grid));
        // From (0,0) moving Up: 0.8 bounces back, 0.1 veers Right into the
        // green cell, 0.1 veers Left off the grid and bounces back.
        assert_relative_eq!(
            backup.expected_utility(&first, 0, 0, Action::Up),
            0.9 * -0.04 + 0.1 * 1.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_evaluate_follows_policy() {
        let config = strip(2, "0,1");
        let grid = GridWorld::build(&config).unwrap();
        let backup = Backup::new(&grid, TransitionModel::from(&config), config.disc_factor);
        let mut policy = UtilityTable::initial(&grid);
        policy.set(0, 0, ActionUtility::new(Action::Left, 0.0));
        policy.set(0, 1, ActionUtility::new(Action::Right, 0.0));
        let evaluated = backup.evaluate(&policy);
        assert_eq!(evaluated.action(0, 0), Some(Action::Left));
        assert_relative_eq!(evaluated.utility(0, 0), -0.04);
        assert_relative_eq!(evaluated.utility(0, 1), 1.0);
    }

    #[test]
    #[should_panic(expected = "backup requested for wall cell")]
    fn test_backup_of_wall_panics() {
        let config = Config::default();
        let grid = GridWorld::build(&config).unwrap();
        let backup = Backup::new(&grid, TransitionModel::from(&config), config.disc_factor);
        backup.action_utility(&UtilityTable::initial(&grid), 1, 0, Action::Up);
    }
}
