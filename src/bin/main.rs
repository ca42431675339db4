use std::path::Path;
use std::process::ExitCode;

use gridworld::{
    config::Config,
    error::ConfigError,
    grid::GridWorld,
    planning::solver::{Solver, SolverType},
    render,
};
use log::{debug, error, info};

const DEFAULT_CONFIG: &str = "./gridworld.toml";

fn load_config() -> Result<Config, ConfigError> {
    match std::env::args().nth(1) {
        Some(path) => Config::from_file(path),
        None if Path::new(DEFAULT_CONFIG).exists() => Config::from_file(DEFAULT_CONFIG),
        None => {
            info!("No {} found, using built-in defaults", DEFAULT_CONFIG);
            Ok(Config::default())
        }
    }
}

fn setup() -> Result<(Config, GridWorld), ConfigError> {
    let config = load_config()?;
    let grid = GridWorld::build(&config)?;
    Ok((config, grid))
}

fn main() -> ExitCode {
    env_logger::init();

    let (config, grid) = match setup() {
        Ok(setup) => setup,
        Err(err) => {
            error!("{err}");
            return ExitCode::FAILURE;
        }
    };

    let mut solver = SolverType::from_config(&config);
    info!(
        "Solving {}x{} grid with {}",
        grid.num_rows(),
        grid.num_cols(),
        solver.name()
    );
    let solution = solver.solve(&grid);

    println!("{}", render::report(&config, &grid, &solution));

    match serde_json::to_string(&solution.table) {
        Ok(json) => debug!("Final table: {json}"),
        Err(err) => error!("Failed to serialize solution: {err}"),
    }
    ExitCode::SUCCESS
}
