//! Plain-text views of a grid and its solution.

use itertools::Itertools;

use crate::config::{Config, Method, Stopping};
use crate::grid::GridWorld;
use crate::planning::solver::Solution;
use crate::planning::utility_table::UtilityTable;

const CELL_WIDTH: usize = 8;

fn frame_title(title: &str) -> String {
    let rule = "=".repeat(60);
    format!("{rule}\n{title:^60}\n{rule}\n")
}

fn border(num_cols: usize) -> String {
    format!("|{}\n", format!("{}|", "-".repeat(CELL_WIDTH)).repeat(num_cols))
}

fn spacer(num_cols: usize) -> String {
    format!("|{}\n", format!("{}|", " ".repeat(CELL_WIDTH)).repeat(num_cols))
}

/// Framed table with one centred label per cell.
fn framed<F>(title: &str, num_rows: usize, num_cols: usize, label: F) -> String
where
    F: Fn(usize, usize) -> String,
{
    let mut out = frame_title(title);
    out.push_str(&border(num_cols));
    for row in 0..num_rows {
        out.push_str(&spacer(num_cols));
        let cells = (0..num_cols)
            .map(|col| format!("{:^width$}", label(row, col), width = CELL_WIDTH))
            .join("|");
        out.push_str(&format!("|{cells}|\n"));
        out.push_str(&spacer(num_cols));
        out.push_str(&border(num_cols));
    }
    out
}

/// Layout of the world: start cell, walls and every non-white reward.
pub fn grid_layout(grid: &GridWorld, config: &Config) -> String {
    framed("GRID WORLD", grid.num_rows(), grid.num_cols(), |row, col| {
        let state = grid.at(row, col);
        if (row, col) == grid.start() {
            "Start".to_string()
        } else if state.is_wall() {
            "Wall".to_string()
        } else if state.reward() != config.white_reward {
            format!("{:+.2}", state.reward())
        } else {
            String::new()
        }
    })
}

pub fn policy_map(table: &UtilityTable) -> String {
    framed(
        "Plot of Optimal Policy",
        table.num_rows(),
        table.num_cols(),
        |row, col| table.get(row, col).action_str(),
    )
}

pub fn utility_map(table: &UtilityTable) -> String {
    framed(
        "Utilities of All States (Map)",
        table.num_rows(),
        table.num_cols(),
        |row, col| format!("{:.3}", table.utility(row, col)),
    )
}

/// `(row, col): utility` for every open cell, row-major.
pub fn utility_list(grid: &GridWorld, table: &UtilityTable) -> String {
    let mut out = frame_title("Utility Values of States");
    for (row, col) in grid.cells().filter(|&(r, c)| !grid.at(r, c).is_wall()) {
        out.push_str(&format!("({row}, {col}): {:.8}\n", table.utility(row, col)));
    }
    out
}

pub fn experiment_setup(config: &Config) -> String {
    let mut out = frame_title("Experiment Setup");
    out.push_str(&format!("Method: {}\n", config.method));
    out.push_str(&format!("Discount: {:.3}\n", config.disc_factor));
    out.push_str(&format!(
        "Rewards (white/green/brown/wall): {:.3} / {:.3} / {:.3} / {:.3}\n",
        config.white_reward, config.green_reward, config.brown_reward, config.wall_collision
    ));
    out.push_str(&format!(
        "Transition (intended/right/left): {:.3} / {:.3} / {:.3}\n",
        config.intended_prob, config.right_prob, config.left_prob
    ));
    out.push_str(&format!(
        "Utility upper bound: {:.3}\n",
        config.utility_upper_bound()
    ));
    match (config.method, config.stopping) {
        (Method::Value, Stopping::FixedSweeps) => {
            out.push_str(&format!("Stopping: {} sweeps\n", config.k))
        }
        (Method::Value, Stopping::Converged) => out.push_str(&format!(
            "Stopping: max change < {:.6}\n",
            config.convergence_threshold()
        )),
        (Method::Policy, _) => out.push_str(&format!(
            "Stopping: stable policy ({} evaluation sweeps per round, at most {} rounds)\n",
            config.k, config.max_policy_iterations
        )),
    }
    out
}

/// Everything the binary prints, in display order.
pub fn report(config: &Config, grid: &GridWorld, solution: &Solution) -> String {
    [
        grid_layout(grid, config),
        experiment_setup(config),
        format!("Iterations: {}\n", solution.iterations),
        utility_list(grid, &solution.table),
        policy_map(&solution.table),
        utility_map(&solution.table),
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planning::solver::solve;

    #[test]
    fn test_grid_layout_marks_cells() {
        let config = Config::default();
        let grid = GridWorld::build(&config).unwrap();
        let layout = grid_layout(&grid, &config);
        assert_eq!(layout.matches("Start").count(), 1);
        assert_eq!(layout.matches("Wall").count(), 5);
        assert_eq!(layout.matches("+1.00").count(), 6);
        assert_eq!(layout.matches("-1.00").count(), 5);
    }

    #[test]
    fn test_policy_map_shape() {
        let (_, solution) = solve(&Config::default()).unwrap();
        let map = policy_map(&solution.table);
        let lines: Vec<_> = map.lines().collect();
        // 3 title lines, then a border plus 4 lines per row.
        assert_eq!(lines.len(), 3 + 1 + 6 * 4);
        assert_eq!(map.matches("Wall").count(), 5);
        let cell_rows = lines.iter().filter(|l| l.contains('^') || l.contains('<'));
        assert!(cell_rows.count() > 0);
        assert!(lines[3..].iter().all(|l| l.len() == 1 + 6 * (CELL_WIDTH + 1)));
    }

    #[test]
    fn test_utility_list_skips_walls() {
        let (grid, solution) = solve(&Config::default()).unwrap();
        let list = utility_list(&grid, &solution.table);
        assert_eq!(list.lines().count(), 3 + 31);
        assert!(list.contains("(0, 0): "));
        assert!(!list.contains("(1, 0): "));
    }

    #[test]
    fn test_report_contains_every_section() {
        let config = Config::default();
        let (grid, solution) = solve(&config).unwrap();
        let report = report(&config, &grid, &solution);
        for title in [
            "GRID WORLD",
            "Experiment Setup",
            "Iterations: 10",
            "Utility Values of States",
            "Plot of Optimal Policy",
            "Utilities of All States (Map)",
        ] {
            assert!(report.contains(title), "missing {title}");
        }
    }
}
