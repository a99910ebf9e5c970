#[cfg(test)]
#[path = "../../../tests/unit/solver/termination/no_improvement_test.rs"]
mod no_improvement_test;

use super::Termination;
use crate::models::common::Cost;

/// A termination criterion which stops the search after a number of consecutive
/// generations without improvement of the best known cost.
pub struct MaxNoImprovement {
    limit: usize,
    stale: usize,
    best_cost: Option<Cost>,
    is_terminated: bool,
}

impl MaxNoImprovement {
    /// Creates a new instance of `MaxNoImprovement`.
    pub fn new(limit: usize) -> Self {
        Self { limit, stale: 0, best_cost: None, is_terminated: false }
    }
}

impl Termination for MaxNoImprovement {
    fn is_termination(&mut self, best_cost: Option<Cost>) -> bool {
        let improved = match (self.best_cost, best_cost) {
            (None, Some(_)) => true,
            (Some(old), Some(new)) => new < old,
            _ => false,
        };

        if improved {
            self.best_cost = best_cost;
            self.stale = 0;
        } else {
            self.stale += 1;
        }

        self.is_terminated |= self.stale > self.limit;

        self.is_terminated
    }
}
