#[cfg(test)]
#[path = "../../../tests/unit/solver/termination/max_time_test.rs"]
mod max_time_test;

use super::Termination;
use crate::models::common::Cost;
use crate::utils::Timer;

/// A termination criterion which stops the search once a wall clock limit elapsed. The
/// timer starts at construction.
pub struct MaxTime {
    start: Timer,
    limit_in_secs: f64,
    is_terminated: bool,
}

impl MaxTime {
    /// Creates a new instance of `MaxTime`.
    pub fn new(limit_in_secs: f64) -> Self {
        Self { start: Timer::start(), limit_in_secs, is_terminated: false }
    }
}

impl Termination for MaxTime {
    fn is_termination(&mut self, _: Option<Cost>) -> bool {
        self.is_terminated |= self.start.elapsed_secs_as_f64() > self.limit_in_secs;

        self.is_terminated
    }
}
