//! The solver module contains the population based genetic orchestrator: crossover,
//! education via local search, diversity management, penalty self adaptation, and restarts.

#[cfg(test)]
#[path = "../../tests/unit/solver/solver_test.rs"]
mod solver_test;

#[cfg(test)]
#[path = "../../tests/unit/solver/scenarios_test.rs"]
mod scenarios_test;

mod evaluator;
pub use self::evaluator::CostEvaluator;

mod penalty;
pub use self::penalty::{PenaltyManager, PenaltyParams};

mod population;
pub use self::population::{Population, PopulationParams};

mod crossover;
pub use self::crossover::{ox, srex};

mod telemetry;
pub use self::telemetry::{SearchStatistics, Telemetry, TelemetryMode};

pub mod termination;

use crate::models::common::Cost;
use crate::models::problem::ProblemData;
use crate::models::solution::Solution;
use crate::search::{compute_neighbours, LocalSearch, NeighbourhoodParams, SearchMode};
use crate::solver::termination::Termination;
use crate::utils::{DefaultRandom, GenericResult, Random};
use std::sync::Arc;

/// Solver configuration.
pub struct SolverConfig {
    /// Seed of the solver's random generator.
    pub seed: u64,
    /// Move acceptance mode of the local search.
    pub search_mode: SearchMode,
    /// Granular neighbourhood parameters.
    pub neighbourhood: NeighbourhoodParams,
    /// Population parameters.
    pub population: PopulationParams,
    /// Penalty manager parameters.
    pub penalty: PenaltyParams,
    /// Probability of running the feasibility enforcing repair pass on an infeasible
    /// offspring.
    pub repair_probability: f64,
    /// Number of consecutive generations without improvement before the search restarts
    /// from scratch.
    pub restart_after: usize,
    /// Progress reporting mode.
    pub telemetry: TelemetryMode,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            search_mode: SearchMode::FirstImprovement,
            neighbourhood: NeighbourhoodParams::default(),
            population: PopulationParams::default(),
            penalty: PenaltyParams::default(),
            repair_probability: 0.5,
            restart_after: 20_000,
            telemetry: TelemetryMode::None,
        }
    }
}

/// The outcome of a solver run: the best discovered solution and per-generation statistics.
pub struct SolveResult {
    /// The best feasible solution found or, when none exists, the best penalised one.
    pub best: Solution,
    /// Per-generation statistics.
    pub statistics: Vec<SearchStatistics>,
}

/// A hybrid genetic search solver. Runs generations of parent selection, crossover,
/// education, and survivor selection until the termination criterion fires, adapting
/// penalties to steer the feasible/infeasible balance.
pub struct Solver {
    data: Arc<ProblemData>,
    random: Arc<dyn Random>,
    penalty_manager: PenaltyManager,
    population: Population,
    local_search: LocalSearch,
    telemetry: Telemetry,
    repair_probability: f64,
    restart_after: usize,
    min_pop_size: usize,
}

impl Solver {
    /// Creates a new instance of `Solver` for the given instance.
    pub fn new(data: Arc<ProblemData>, config: SolverConfig) -> Self {
        let random: Arc<dyn Random> = Arc::new(DefaultRandom::new_with_seed(config.seed));
        let neighbours = compute_neighbours(&data, &config.neighbourhood);

        Self {
            penalty_manager: PenaltyManager::init_from(&data, config.penalty),
            population: Population::new(config.population.clone(), random.clone()),
            local_search: LocalSearch::new(data.clone(), random.clone(), neighbours, config.search_mode),
            telemetry: Telemetry::new(config.telemetry),
            repair_probability: config.repair_probability,
            restart_after: config.restart_after,
            min_pop_size: config.population.min_pop_size,
            data,
            random,
        }
    }

    /// Runs the search until the termination criterion fires and returns the best feasible
    /// solution found or, when none exists, the best penalised one.
    pub fn solve(&mut self, termination: &mut dyn Termination) -> GenericResult<SolveResult> {
        self.seed_population();

        let mut best_feasible: Option<(Cost, Arc<Solution>)> = None;
        let mut best_any: Option<(Cost, Arc<Solution>)> = None;
        let mut stale = 0usize;
        let mut generation = 0usize;

        while !termination.is_termination(best_feasible.as_ref().map(|(cost, _)| *cost)) {
            let evaluator = self.penalty_manager.cost_evaluator();

            let (first, second) = self.population.select();
            let offspring = self.crossover(&first, &second);
            let educated = Arc::new(self.educate(&offspring));

            self.penalty_manager.register(&educated);
            self.population.add(educated.clone(), &evaluator);

            let mut improved = false;

            if educated.is_feasible() {
                let cost = evaluator.cost(&educated);
                if best_feasible.as_ref().map_or(true, |(best, _)| cost < *best) {
                    best_feasible = Some((cost, educated.clone()));
                    improved = true;
                }
            }

            let penalised = evaluator.penalised_cost(&educated);
            if best_any.as_ref().map_or(true, |(best, _)| penalised < *best) {
                best_any = Some((penalised, educated.clone()));
            }

            stale = if improved { 0 } else { stale + 1 };

            if stale >= self.restart_after {
                self.restart();
                stale = 0;
            }

            self.report(generation, educated.is_feasible());
            generation += 1;
        }

        let best = best_feasible
            .or(best_any)
            .map(|(_, solution)| solution)
            .or_else(|| self.population.best_overall())
            .map(|solution| solution.as_ref().clone())
            .ok_or("search terminated before any solution was produced")?;

        Ok(SolveResult { best, statistics: self.telemetry.take_statistics() })
    }

    fn seed_population(&mut self) {
        let evaluator = self.penalty_manager.cost_evaluator();

        for _ in 0..self.min_pop_size {
            let solution = Solution::make_random(&self.data, &self.random);
            self.population.add(Arc::new(solution), &evaluator);
        }
    }

    fn restart(&mut self) {
        self.population.clear();
        self.penalty_manager.reset();
        self.seed_population();
    }

    /// Chooses the crossover operator by instance characteristics: the ordered crossover on
    /// the giant tour only fits single vehicle type, single depot instances with parents of
    /// equal route counts.
    fn crossover(&self, first: &Solution, second: &Solution) -> Solution {
        let uniform_fleet = self.data.num_vehicle_types() == 1 && self.data.num_depots() == 1;

        if uniform_fleet && first.num_routes() == second.num_routes() && first.num_routes() > 0 {
            ox(&self.data, first, second, &self.random)
        } else {
            srex(&self.data, first, second, &self.random)
        }
    }

    /// Educates an offspring: a penalised descent, followed with some probability by a
    /// feasibility enforcing pass when the result is still infeasible.
    fn educate(&mut self, offspring: &Solution) -> Solution {
        let evaluator = self.penalty_manager.cost_evaluator();
        let educated = self.local_search.search(offspring, &evaluator);

        if !educated.is_feasible() && self.random.is_hit(self.repair_probability) {
            let booster = self.penalty_manager.booster_cost_evaluator();
            let repaired = self.local_search.search(&educated, &booster);

            if repaired.is_feasible() {
                return repaired;
            }
        }

        educated
    }

    fn report(&mut self, generation: usize, offspring_feasible: bool) {
        let (feasible_size, infeasible_size) = self.population.size();

        self.telemetry.on_generation(
            SearchStatistics {
                generation,
                feasible_size,
                infeasible_size,
                best_feasible: self.population.best_feasible_cost(),
                best_infeasible: self.population.best_infeasible_cost(),
                feasible_fraction: 0.,
                penalties: self.penalty_manager.penalties().to_vec(),
            },
            offspring_feasible,
        );
    }
}
