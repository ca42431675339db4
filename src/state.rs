use serde::{Deserialize, Serialize};

use crate::Float;

/// One cell of the grid world. The reward is collected every time step the
/// agent occupies the cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct State {
    reward: Float,
    is_wall: bool,
}

impl State {
    pub fn new(reward: Float) -> Self {
        State {
            reward,
            is_wall: false,
        }
    }

    pub fn wall(reward: Float) -> Self {
        State {
            reward,
            is_wall: true,
        }
    }

    pub fn reward(&self) -> Float {
        self.reward
    }

    pub fn is_wall(&self) -> bool {
        self.is_wall
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structural_equality() {
        assert_eq!(State::new(-0.04), State::new(-0.04));
        assert_ne!(State::new(0.0), State::wall(0.0));
        assert_ne!(State::new(1.0), State::new(-1.0));
    }

    #[test]
    fn test_wall_flag() {
        let wall = State::wall(0.0);
        assert!(wall.is_wall());
        assert_eq!(wall.reward(), 0.0);
        assert!(!State::new(1.0).is_wall());
    }
}
