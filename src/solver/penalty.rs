#[cfg(test)]
#[path = "../../tests/unit/solver/penalty_test.rs"]
mod penalty_test;

use crate::models::common::*;
use crate::models::problem::ProblemData;
use crate::models::solution::Solution;
use crate::solver::CostEvaluator;

/// Penalty manager parameters.
#[derive(Clone, Debug)]
pub struct PenaltyParams {
    /// Factor by which penalties are multiplied for the feasibility enforcing repair pass.
    pub repair_booster: Cost,
    /// Number of feasibility registrations between penalty updates.
    pub solutions_between_updates: usize,
    /// Increase factor as a rational number, applied when too few registrations are feasible.
    pub penalty_increase: (Cost, Cost),
    /// Decrease factor as a rational number, applied when enough registrations are feasible.
    pub penalty_decrease: (Cost, Cost),
    /// Target fraction of feasible registrations per dimension.
    pub target_feasible: f64,
    /// Tolerated deviation from the target fraction before penalties change.
    pub feas_tolerance: f64,
    /// Lower clamp for every penalty value.
    pub min_penalty: Cost,
    /// Upper clamp for every penalty value.
    pub max_penalty: Cost,
}

impl Default for PenaltyParams {
    fn default() -> Self {
        Self {
            repair_booster: 12,
            solutions_between_updates: 50,
            penalty_increase: (13, 10),
            penalty_decrease: (10, 13),
            target_feasible: 0.2,
            feas_tolerance: 0.05,
            min_penalty: 1,
            max_penalty: 100_000,
        }
    }
}

/// Tracks recent feasibility per constraint dimension and self adapts the penalty
/// coefficients between generations. Penalty values evolve independently per dimension:
/// one per capacity dimension, then time warp, excess distance, and excess duration.
pub struct PenaltyManager {
    params: PenaltyParams,
    penalties: Vec<Cost>,
    initial_penalties: Vec<Cost>,
    feas_lists: Vec<Vec<bool>>,
}

impl PenaltyManager {
    /// Creates a new instance of `PenaltyManager` from explicit initial penalty values:
    /// one per capacity dimension plus time warp, excess distance, and excess duration.
    pub fn new(initial_penalties: Vec<Cost>, params: PenaltyParams) -> Self {
        let penalties: Vec<_> = initial_penalties
            .iter()
            .map(|&penalty| penalty.clamp(params.min_penalty, params.max_penalty))
            .collect();

        Self {
            feas_lists: vec![vec![]; penalties.len()],
            initial_penalties: penalties.clone(),
            penalties,
            params,
        }
    }

    /// Creates a new instance of `PenaltyManager` with initial penalties scaled to the
    /// instance: an average unit of violation starts out weighing as much as an average
    /// best edge cost.
    pub fn init_from(data: &ProblemData, params: PenaltyParams) -> Self {
        let num_edges = (data.num_locations() * data.num_locations()) as i64;

        let mut cost_sum = 0i64;
        let mut dist_sum = 0i64;
        let mut dur_sum = 0i64;

        for from in 0..data.num_locations() {
            for to in 0..data.num_locations() {
                let edge_cost = data
                    .vehicle_types()
                    .map(|vt| {
                        let dist = data.distance(vt.profile, from, to);
                        let dur = data.duration(vt.profile, from, to);
                        vt.unit_distance_cost.saturating_mul(dist).saturating_add(vt.unit_duration_cost.saturating_mul(dur))
                    })
                    .min()
                    .unwrap_or_default();

                let dist = (0..data.num_profiles()).map(|p| data.distance(p, from, to)).min().unwrap_or_default();
                let dur = (0..data.num_profiles()).map(|p| data.duration(p, from, to)).min().unwrap_or_default();

                cost_sum = cost_sum.saturating_add(edge_cost);
                dist_sum = dist_sum.saturating_add(dist);
                dur_sum = dur_sum.saturating_add(dur);
            }
        }

        let avg_cost = cost_sum / num_edges.max(1);
        let avg_distance = dist_sum / num_edges.max(1);
        let avg_duration = dur_sum / num_edges.max(1);

        let mut initial = vec![];
        for dim in 0..data.num_load_dimensions() {
            let demand_sum: i64 = data
                .client_locations()
                .map(|location| {
                    let client = data.client(location);
                    client.delivery[dim].max(client.pickup[dim])
                })
                .sum();
            let avg_load = demand_sum / (data.num_clients() as i64).max(1);

            initial.push(avg_cost / avg_load.max(1));
        }

        initial.push(avg_cost / avg_duration.max(1));
        initial.push(avg_cost / avg_distance.max(1));
        initial.push(avg_cost / avg_duration.max(1));

        Self::new(initial, params)
    }

    /// Returns current penalty values in registration order: loads, time warp, excess
    /// distance, excess duration.
    pub fn penalties(&self) -> &[Cost] {
        &self.penalties
    }

    /// Registers the per-dimension feasibility of the given solution and updates penalties
    /// once enough registrations accumulated.
    pub fn register(&mut self, solution: &Solution) {
        let mut is_feasible: Vec<bool> =
            solution.excess_load().iter().map(|&excess| excess == 0).collect();
        is_feasible.push(solution.time_warp() == 0);
        is_feasible.push(solution.excess_distance() == 0);
        is_feasible.push(solution.excess_duration() == 0);

        for (idx, feasible) in is_feasible.into_iter().enumerate() {
            self.feas_lists[idx].push(feasible);

            if self.feas_lists[idx].len() == self.params.solutions_between_updates {
                let feasible_count = self.feas_lists[idx].iter().filter(|&&flag| flag).count();
                let fraction = feasible_count as f64 / self.params.solutions_between_updates as f64;

                self.feas_lists[idx].clear();
                self.penalties[idx] = self.compute(self.penalties[idx], fraction);
            }
        }
    }

    /// Resets penalties and feasibility windows to their initial state. Used on restarts.
    pub fn reset(&mut self) {
        self.penalties = self.initial_penalties.clone();
        self.feas_lists.iter_mut().for_each(|list| list.clear());
    }

    /// Returns a cost evaluator using the current penalty values.
    pub fn cost_evaluator(&self) -> CostEvaluator {
        self.make_evaluator(1)
    }

    /// Returns a cost evaluator using the boosted penalty values, which makes the local
    /// search treat constraints as effectively hard.
    pub fn booster_cost_evaluator(&self) -> CostEvaluator {
        self.make_evaluator(self.params.repair_booster)
    }

    fn make_evaluator(&self, booster: Cost) -> CostEvaluator {
        let (loads, rest) = self.penalties.split_at(self.penalties.len() - 3);

        CostEvaluator::new(
            loads.iter().map(|&penalty| penalty.saturating_mul(booster)).collect(),
            rest[0].saturating_mul(booster),
            rest[1].saturating_mul(booster),
            rest[2].saturating_mul(booster),
        )
    }

    fn compute(&self, penalty: Cost, feas_fraction: f64) -> Cost {
        let diff = self.params.target_feasible - feas_fraction;

        if diff.abs() < self.params.feas_tolerance {
            return penalty;
        }

        let (num, den) = if diff > 0. { self.params.penalty_increase } else { self.params.penalty_decrease };
        let updated = penalty.saturating_mul(num) / den;

        // Integer arithmetic must not get stuck at small values.
        let updated = if diff > 0. { updated.max(penalty + 1) } else { updated.min(penalty - 1) };

        updated.clamp(self.params.min_penalty, self.params.max_penalty)
    }
}
