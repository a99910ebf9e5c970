#[cfg(test)]
#[path = "../../tests/unit/solver/population_test.rs"]
mod population_test;

use crate::models::common::Cost;
use crate::models::solution::Solution;
use crate::solver::CostEvaluator;
use crate::utils::Random;
use std::sync::Arc;

/// Population parameters.
#[derive(Clone, Debug)]
pub struct PopulationParams {
    /// Minimum sub-population size kept after survivor selection.
    pub min_pop_size: usize,
    /// Number of offspring added before survivor selection triggers.
    pub generation_size: usize,
    /// Number of closest neighbours considered in the diversity measure, and the weight
    /// anchor of the diversity term in the biased fitness.
    pub num_elite: usize,
}

impl PopulationParams {
    fn capacity(&self) -> usize {
        self.min_pop_size + self.generation_size
    }
}

impl Default for PopulationParams {
    fn default() -> Self {
        Self { min_pop_size: 25, generation_size: 40, num_elite: 5 }
    }
}

struct Item {
    solution: Arc<Solution>,
    cost: Cost,
    fitness: f64,
}

/// A sub-population of either feasible or infeasible individuals, ranked by biased fitness:
/// a blend of cost rank and diversity rank, where diversity is the average broken pairs
/// distance to the closest neighbours.
struct SubPopulation {
    params: PopulationParams,
    items: Vec<Item>,
}

impl SubPopulation {
    fn new(params: PopulationParams) -> Self {
        Self { params, items: vec![] }
    }

    fn add(&mut self, solution: Arc<Solution>, evaluator: &CostEvaluator) {
        let signature = solution.signature();
        if self.items.iter().any(|item| item.solution.signature() == signature) {
            return;
        }

        let cost = evaluator.penalised_cost(&solution);
        self.items.push(Item { solution, cost, fitness: 0. });
        self.update_fitness();

        if self.items.len() > self.params.capacity() {
            while self.items.len() > self.params.min_pop_size {
                let worst = self
                    .items
                    .iter()
                    .enumerate()
                    .max_by(|(_, a), (_, b)| a.fitness.total_cmp(&b.fitness))
                    .map(|(idx, _)| idx)
                    .expect("sub-population is empty");

                self.items.swap_remove(worst);
                self.update_fitness();
            }
        }
    }

    /// Recomputes the biased fitness of every individual.
    fn update_fitness(&mut self) {
        let size = self.items.len();
        if size == 0 {
            return;
        }

        let num_elite = self.params.num_elite.min(size);

        let mut by_cost: Vec<usize> = (0..size).collect();
        by_cost.sort_by_key(|&idx| self.items[idx].cost);

        let diversity: Vec<f64> = (0..size).map(|idx| self.avg_distance_to_closest(idx)).collect();
        let mut by_diversity: Vec<usize> = (0..size).collect();
        by_diversity.sort_by(|&a, &b| diversity[b].total_cmp(&diversity[a]));

        let mut cost_rank = vec![0usize; size];
        let mut diversity_rank = vec![0usize; size];
        for (rank, &idx) in by_cost.iter().enumerate() {
            cost_rank[idx] = rank + 1;
        }
        for (rank, &idx) in by_diversity.iter().enumerate() {
            diversity_rank[idx] = rank + 1;
        }

        let diversity_weight = 1. - num_elite as f64 / size as f64;
        for (idx, item) in self.items.iter_mut().enumerate() {
            item.fitness = cost_rank[idx] as f64 / size as f64
                + diversity_weight * diversity_rank[idx] as f64 / size as f64;
        }
    }

    fn avg_distance_to_closest(&self, idx: usize) -> f64 {
        let num_close = self.params.num_elite.min(self.items.len().saturating_sub(1));
        if num_close == 0 {
            return 0.;
        }

        let mut distances: Vec<f64> = self
            .items
            .iter()
            .enumerate()
            .filter(|&(other, _)| other != idx)
            .map(|(_, item)| self.items[idx].solution.broken_pairs_distance(&item.solution))
            .collect();

        distances.sort_by(|a, b| a.total_cmp(b));
        distances.truncate(num_close);

        distances.iter().sum::<f64>() / num_close as f64
    }

    fn size(&self) -> usize {
        self.items.len()
    }

    fn clear(&mut self) {
        self.items.clear();
    }
}

/// Manages the feasible and infeasible sub-populations and selects parents by binary
/// tournament over their union.
pub struct Population {
    random: Arc<dyn Random>,
    feasible: SubPopulation,
    infeasible: SubPopulation,
}

impl Population {
    /// Creates a new instance of `Population`.
    pub fn new(params: PopulationParams, random: Arc<dyn Random>) -> Self {
        Self {
            random,
            feasible: SubPopulation::new(params.clone()),
            infeasible: SubPopulation::new(params),
        }
    }

    /// Adds an individual to the sub-population matching its feasibility, triggering
    /// survivor selection when the sub-population overflows.
    pub fn add(&mut self, solution: Arc<Solution>, evaluator: &CostEvaluator) {
        if solution.is_feasible() {
            self.feasible.add(solution, evaluator);
        } else {
            self.infeasible.add(solution, evaluator);
        }
    }

    /// Returns the sizes of the feasible and infeasible sub-populations.
    pub fn size(&self) -> (usize, usize) {
        (self.feasible.size(), self.infeasible.size())
    }

    /// Returns the lowest registered cost in the feasible sub-population, if any.
    pub fn best_feasible_cost(&self) -> Option<Cost> {
        self.feasible.items.iter().map(|item| item.cost).min()
    }

    /// Returns the lowest registered cost in the infeasible sub-population, if any.
    pub fn best_infeasible_cost(&self) -> Option<Cost> {
        self.infeasible.items.iter().map(|item| item.cost).min()
    }

    /// Returns the individual with the lowest registered cost over both sub-populations.
    pub fn best_overall(&self) -> Option<Arc<Solution>> {
        self.feasible
            .items
            .iter()
            .chain(self.infeasible.items.iter())
            .min_by_key(|item| item.cost)
            .map(|item| item.solution.clone())
    }

    /// Selects two parents by binary tournament on biased fitness.
    pub fn select(&self) -> (Arc<Solution>, Arc<Solution>) {
        (self.tournament(), self.tournament())
    }

    fn tournament(&self) -> Arc<Solution> {
        let total = self.feasible.size() + self.infeasible.size();
        debug_assert!(total > 0, "cannot select from an empty population");

        let first = self.pick(self.random.uniform_int(0, total as i32 - 1) as usize);
        let second = self.pick(self.random.uniform_int(0, total as i32 - 1) as usize);

        if first.fitness <= second.fitness {
            first.solution.clone()
        } else {
            second.solution.clone()
        }
    }

    fn pick(&self, idx: usize) -> &Item {
        if idx < self.feasible.size() {
            &self.feasible.items[idx]
        } else {
            &self.infeasible.items[idx - self.feasible.size()]
        }
    }

    /// Removes all individuals from both sub-populations. Used on restarts.
    pub fn clear(&mut self) {
        self.feasible.clear();
        self.infeasible.clear();
    }
}
