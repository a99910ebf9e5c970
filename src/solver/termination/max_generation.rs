#[cfg(test)]
#[path = "../../../tests/unit/solver/termination/max_generation_test.rs"]
mod max_generation_test;

use super::Termination;
use crate::models::common::Cost;

/// A termination criterion which stops the search after a fixed number of generations.
pub struct MaxGeneration {
    limit: usize,
    generation: usize,
}

impl MaxGeneration {
    /// Creates a new instance of `MaxGeneration`.
    pub fn new(limit: usize) -> Self {
        Self { limit, generation: 0 }
    }
}

impl Termination for MaxGeneration {
    fn is_termination(&mut self, _: Option<Cost>) -> bool {
        let is_terminated = self.generation >= self.limit;
        self.generation += 1;

        is_terminated
    }
}
