//! Local search moves over a working assignment.

use rand::Rng;

/// A change to a working assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterMove {
    /// Assigns `resource` to `day`.
    Change { day: usize, resource: usize },
    /// Exchanges the resources of two days.
    Swap { first: usize, second: usize },
}

impl RosterMove {
    /// Returns false if applying the move would leave the assignment unchanged.
    pub fn is_doable(&self, assignment: &[usize]) -> bool {
        match *self {
            RosterMove::Change { day, resource } => assignment[day] != resource,
            RosterMove::Swap { first, second } => assignment[first] != assignment[second],
        }
    }

    /// Applies the move and returns the move that undoes it.
    pub fn apply(&self, assignment: &mut [usize]) -> RosterMove {
        match *self {
            RosterMove::Change { day, resource } => {
                let previous = assignment[day];
                assignment[day] = resource;
                RosterMove::Change {
                    day,
                    resource: previous,
                }
            }
            RosterMove::Swap { first, second } => {
                assignment.swap(first, second);
                *self
            }
        }
    }
}

/// Draws random moves, changes and swaps in the ratio
/// `change_weight : swap_weight`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveSelector {
    change_weight: u32,
    swap_weight: u32,
}

impl Default for MoveSelector {
    fn default() -> Self {
        Self {
            change_weight: 1,
            swap_weight: 4,
        }
    }
}

impl MoveSelector {
    pub fn new(change_weight: u32, swap_weight: u32) -> Self {
        Self {
            change_weight,
            swap_weight,
        }
    }

    /// Draws one move for an assignment of `day_count` days over
    /// `resource_count` resources. Both counts must be non-zero.
    pub fn select<R: Rng>(&self, rng: &mut R, day_count: usize, resource_count: usize) -> RosterMove {
        let total = self.change_weight + self.swap_weight;
        let swap = day_count > 1 && total > 0 && rng.random_ratio(self.swap_weight, total);

        if swap {
            let first = rng.random_range(0..day_count);
            let mut second = rng.random_range(0..day_count - 1);
            if second >= first {
                second += 1;
            }
            RosterMove::Swap { first, second }
        } else {
            RosterMove::Change {
                day: rng.random_range(0..day_count),
                resource: rng.random_range(0..resource_count),
            }
        }
    }
}
