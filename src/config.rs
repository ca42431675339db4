use std::path::Path;

use serde::{Deserialize, Serialize};
use strum_macros::Display;

use crate::error::ConfigError;
use crate::{Float, PROBABILITY_TOLERANCE, UInt};

/// Which algorithm produces the utility table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Method {
    #[default]
    #[strum(serialize = "value iteration")]
    Value,
    #[strum(serialize = "policy iteration")]
    Policy,
}

/// When value iteration stops sweeping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Stopping {
    /// Exactly `k` sweeps.
    #[default]
    #[strum(serialize = "fixed sweeps")]
    FixedSweeps,
    /// Sweep until the largest change drops below the convergence threshold.
    #[strum(serialize = "converged")]
    Converged,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    pub num_rows: usize,
    pub num_cols: usize,
    pub start_row: usize,
    pub start_col: usize,

    pub green_cell: String,
    pub brown_cell: String,
    pub wall_cell: String,

    pub white_reward: Float,
    pub green_reward: Float,
    pub brown_reward: Float,
    pub wall_collision: Float,

    pub intended_prob: Float,
    pub right_prob: Float,
    pub left_prob: Float,

    pub disc_factor: Float,
    pub k: UInt,

    pub method: Method,
    pub stopping: Stopping,
    pub max_error: Float,
    pub max_policy_iterations: UInt,
    pub seed: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            num_rows: 6,
            num_cols: 6,
            start_row: 3,
            start_col: 2,
            green_cell: "0,0; 2,0; 5,0; 3,1; 4,2; 5,3".to_string(),
            brown_cell: "1,1; 5,1; 2,2; 3,3; 4,4".to_string(),
            wall_cell: "1,0; 4,1; 1,4; 2,4; 3,4".to_string(),
            white_reward: -0.04,
            green_reward: 1.0,
            brown_reward: -1.0,
            wall_collision: 0.0,
            intended_prob: 0.8,
            right_prob: 0.1,
            left_prob: 0.1,
            disc_factor: 0.99,
            k: 10,
            method: Method::default(),
            stopping: Stopping::default(),
            max_error: 30.0,
            max_policy_iterations: 1000,
            seed: 42,
        }
    }
}

impl Config {
    /// Read a TOML config file. Keys missing from the file keep their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Check every scalar option. Cell lists are checked when the grid is built.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_rows == 0 || self.num_cols == 0 {
            return Err(ConfigError::NonPositiveDimension {
                num_rows: self.num_rows,
                num_cols: self.num_cols,
            });
        }
        if self.start_row >= self.num_rows || self.start_col >= self.num_cols {
            return Err(ConfigError::StartOutOfBounds {
                row: self.start_row,
                col: self.start_col,
                num_rows: self.num_rows,
                num_cols: self.num_cols,
            });
        }
        if self.k == 0 {
            return Err(ConfigError::NonPositiveCount { name: "k", value: self.k });
        }
        if self.max_policy_iterations == 0 {
            return Err(ConfigError::NonPositiveCount {
                name: "maxPolicyIterations",
                value: self.max_policy_iterations,
            });
        }
        for (name, value) in [
            ("intendedProb", self.intended_prob),
            ("rightProb", self.right_prob),
            ("leftProb", self.left_prob),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::InvalidProbability { name, value });
            }
        }
        let sum = self.intended_prob + self.right_prob + self.left_prob;
        if (sum - 1.0).abs() > PROBABILITY_TOLERANCE {
            return Err(ConfigError::ProbabilitiesDoNotSumToOne { sum });
        }
        if !(self.disc_factor > 0.0 && self.disc_factor < 1.0) {
            return Err(ConfigError::DiscountOutOfRange(self.disc_factor));
        }
        if self.stopping == Stopping::Converged {
            if !(self.max_error > 0.0) {
                return Err(ConfigError::NonPositiveMaxError(self.max_error));
            }
            let threshold = self.convergence_threshold();
            if !(threshold.is_finite() && threshold > 0.0) {
                return Err(ConfigError::NonPositiveThreshold(threshold));
            }
        }
        Ok(())
    }

    /// The largest reward a cell can carry.
    pub fn max_reward(&self) -> Float {
        [
            self.white_reward,
            self.green_reward,
            self.brown_reward,
            self.wall_collision,
        ]
        .into_iter()
        .fold(Float::NEG_INFINITY, Float::max)
    }

    /// Upper bound on any utility: `maxReward / (1 - discFactor)`.
    pub fn utility_upper_bound(&self) -> Float {
        self.max_reward() / (1.0 - self.disc_factor)
    }

    /// Largest per-sweep change at which value iteration counts as converged.
    pub fn convergence_threshold(&self) -> Float {
        self.max_error * self.max_reward() * ((1.0 - self.disc_factor) / self.disc_factor)
    }
}
