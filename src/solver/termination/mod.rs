//! The termination module contains logic which defines stopping criteria for the search,
//! e.g. when to stop the evolution.

use crate::models::common::Cost;

/// A trait which specifies criteria when the search should stop looking for improved
/// solutions. Implementations are polled once per generation with the best known feasible
/// cost; once a criterion reports termination it keeps doing so.
pub trait Termination {
    /// Returns true if the termination condition is met.
    fn is_termination(&mut self, best_cost: Option<Cost>) -> bool;
}

mod max_generation;
pub use self::max_generation::MaxGeneration;

mod max_time;
pub use self::max_time::MaxTime;

mod no_improvement;
pub use self::no_improvement::MaxNoImprovement;

/// Specifies how a composite combines its criteria.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CompositionMode {
    /// Terminates as soon as any criterion terminates.
    Any,
    /// Terminates once all criteria terminate.
    All,
}

/// Encapsulates multiple termination criteria.
pub struct CompositeTermination {
    terminations: Vec<Box<dyn Termination>>,
    mode: CompositionMode,
    is_terminated: bool,
}

impl CompositeTermination {
    /// Creates a new instance of `CompositeTermination`.
    pub fn new(terminations: Vec<Box<dyn Termination>>, mode: CompositionMode) -> Self {
        Self { terminations, mode, is_terminated: false }
    }
}

impl Termination for CompositeTermination {
    fn is_termination(&mut self, best_cost: Option<Cost>) -> bool {
        // Every criterion is polled even after a decision so that latched state stays
        // consistent across the whole composite.
        let flags: Vec<bool> =
            self.terminations.iter_mut().map(|termination| termination.is_termination(best_cost)).collect();

        self.is_terminated |= match self.mode {
            CompositionMode::Any => flags.iter().any(|&flag| flag),
            CompositionMode::All => flags.iter().all(|&flag| flag),
        };

        self.is_terminated
    }
}
