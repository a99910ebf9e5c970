#[cfg(test)]
#[path = "../../tests/unit/solver/evaluator_test.rs"]
mod evaluator_test;

use crate::models::common::*;
use crate::models::solution::Solution;

/// Combines distance, duration, load excess, time warp, and prize terms into a penalised
/// objective. Penalty coefficients are plain non-negative integers owned by the caller;
/// the evaluator itself is immutable and cheap to clone.
#[derive(Clone, Debug)]
pub struct CostEvaluator {
    load_penalties: Vec<Cost>,
    tw_penalty: Cost,
    dist_penalty: Cost,
    dur_penalty: Cost,
}

impl CostEvaluator {
    /// Creates a new instance of `CostEvaluator` with one load penalty per capacity
    /// dimension and single penalties for time warp, excess distance, and excess duration.
    pub fn new(load_penalties: Vec<Cost>, tw_penalty: Cost, dist_penalty: Cost, dur_penalty: Cost) -> Self {
        debug_assert!(load_penalties.iter().all(|&penalty| penalty >= 0));
        debug_assert!(tw_penalty >= 0 && dist_penalty >= 0 && dur_penalty >= 0);

        Self { load_penalties, tw_penalty, dist_penalty, dur_penalty }
    }

    /// Returns penalty for the given excess load vector.
    pub fn load_penalty(&self, excess: &[LoadValue]) -> Cost {
        self.load_penalties
            .iter()
            .zip(excess.iter())
            .fold(0i64, |acc, (&penalty, &excess)| acc.saturating_add(penalty.saturating_mul(excess)))
    }

    /// Returns penalty for the given time warp.
    pub fn tw_penalty(&self, time_warp: Duration) -> Cost {
        self.tw_penalty.saturating_mul(time_warp)
    }

    /// Returns penalty for the given excess distance.
    pub fn dist_penalty(&self, excess: Distance) -> Cost {
        self.dist_penalty.saturating_mul(excess)
    }

    /// Returns penalty for the given excess duration.
    pub fn dur_penalty(&self, excess: Duration) -> Cost {
        self.dur_penalty.saturating_mul(excess)
    }

    /// Returns the penalised cost of a solution: the objective value plus all penalty terms.
    pub fn penalised_cost(&self, solution: &Solution) -> Cost {
        self.objective(solution)
            .saturating_add(self.load_penalty(solution.excess_load()))
            .saturating_add(self.tw_penalty(solution.time_warp()))
            .saturating_add(self.dist_penalty(solution.excess_distance()))
            .saturating_add(self.dur_penalty(solution.excess_duration()))
    }

    /// Returns the objective of a feasible solution, or `Cost::MAX` when the solution is
    /// infeasible in any dimension.
    pub fn cost(&self, solution: &Solution) -> Cost {
        if solution.is_feasible() {
            self.objective(solution)
        } else {
            Cost::MAX
        }
    }

    fn objective(&self, solution: &Solution) -> Cost {
        solution
            .fixed_cost()
            .saturating_add(solution.distance_cost())
            .saturating_add(solution.duration_cost())
            .saturating_add(solution.uncollected_prizes())
    }
}
