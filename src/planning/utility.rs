use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::Float;
use crate::actions::Action;

/// The chosen (or candidate) action for a cell and its expected utility.
/// `action` is `None` for wall cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionUtility {
    pub action: Option<Action>,
    pub utility: Float,
}

impl ActionUtility {
    pub fn new(action: Action, utility: Float) -> Self {
        ActionUtility {
            action: Some(action),
            utility,
        }
    }

    pub fn wall(utility: Float) -> Self {
        ActionUtility {
            action: None,
            utility,
        }
    }

    /// Strictly higher utility. Equal utilities are never better, so the
    /// incumbent wins ties.
    pub fn better_than(&self, other: &ActionUtility) -> bool {
        self.utility > other.utility
    }

    /// Equal utility, whatever the actions.
    pub fn same_utility(&self, other: &ActionUtility) -> bool {
        self.utility == other.utility
    }

    /// Comparator that sorts best-first (descending utility). Stable sorts
    /// keep the enumeration order among equal utilities.
    pub fn best_first(a: &ActionUtility, b: &ActionUtility) -> Ordering {
        b.utility.total_cmp(&a.utility)
    }

    /// Action symbol, or `Wall` for cells without an action.
    pub fn action_str(&self) -> String {
        match self.action {
            Some(action) => action.to_string(),
            None => "Wall".to_string(),
        }
    }
}
