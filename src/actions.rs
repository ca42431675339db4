use rand::Rng;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};

/// A move the agent can attempt. Declaration order is the canonical
/// enumeration order used for tie-breaking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, Serialize, Deserialize)]
pub enum Action {
    #[strum(serialize = "^")]
    Up,
    #[strum(serialize = "v")]
    Down,
    #[strum(serialize = "<")]
    Left,
    #[strum(serialize = ">")]
    Right,
}

impl Action {
    /// The direction 90 degrees clockwise: Up -> Right -> Down -> Left -> Up.
    pub fn clockwise(self) -> Self {
        match self {
            Action::Up => Action::Right,
            Action::Right => Action::Down,
            Action::Down => Action::Left,
            Action::Left => Action::Up,
        }
    }

    pub fn counter_clockwise(self) -> Self {
        match self {
            Action::Up => Action::Left,
            Action::Left => Action::Down,
            Action::Down => Action::Right,
            Action::Right => Action::Up,
        }
    }

    /// (row, col) offset of one step in this direction. Row 0 is the top row.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Action::Up => (-1, 0),
            Action::Down => (1, 0),
            Action::Left => (0, -1),
            Action::Right => (0, 1),
        }
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        match rng.random_range(0..4) {
            0 => Action::Up,
            1 => Action::Down,
            2 => Action::Left,
            3 => Action::Right,
            _ => unreachable!(),
        }
    }

    pub fn all() -> impl Iterator<Item = Action> {
        Action::iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_canonical_order() {
        assert_eq!(
            Action::all().collect_vec(),
            vec![Action::Up, Action::Down, Action::Left, Action::Right]
        );
    }

    #[test]
    fn test_rotation_is_cyclic() {
        for action in Action::all() {
            assert_eq!(action.clockwise().counter_clockwise(), action);
            assert_eq!(
                action.clockwise().clockwise().clockwise().clockwise(),
                action
            );
            assert_ne!(action.clockwise(), action);
        }
        assert_eq!(Action::Up.clockwise(), Action::Right);
        assert_eq!(Action::Down.clockwise(), Action::Left);
        assert_eq!(Action::Left.counter_clockwise(), Action::Down);
    }

    #[test]
    fn test_perpendicular_deltas() {
        for action in Action::all() {
            let (dr, dc) = action.delta();
            let (pr, pc) = action.clockwise().delta();
            assert_eq!(dr * pr + dc * pc, 0);
        }
    }

    #[test]
    fn test_display_symbols() {
        let symbols = Action::all().map(|a| a.to_string()).join("");
        assert_eq!(symbols, "^v<>");
    }

    #[test]
    fn test_random_covers_all_actions() {
        let mut rng = StdRng::seed_from_u64(7);
        let seen = (0..200).map(|_| Action::random(&mut rng)).unique().count();
        assert_eq!(seen, 4);
    }
}
