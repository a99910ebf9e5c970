use super::*;
use crate::helpers::*;
use crate::models::problem::VehicleType;
use crate::models::solution::Solution;
use crate::utils::{DefaultRandom, Random};
use std::sync::Arc;

fn create_population(min_pop_size: usize, generation_size: usize) -> Population {
    let params = PopulationParams { min_pop_size, generation_size, num_elite: 5 };
    let random: Arc<dyn Random> = Arc::new(DefaultRandom::new_with_seed(0));

    Population::new(params, random)
}

fn two_route_solution(data: &Arc<crate::models::problem::ProblemData>, split: usize) -> Arc<Solution> {
    let clients: Vec<usize> = data.client_locations().collect();
    let (first, second) = clients.split_at(split);

    Arc::new(make_solution(data, vec![(0, first.to_vec()), (0, second.to_vec())]))
}

#[test]
fn can_separate_feasible_and_infeasible_individuals() {
    let data = create_line_data(4, 5, VehicleType::new(2, vec![10]));
    let mut population = create_population(2, 2);
    let evaluator = create_evaluator(100, 10);

    population.add(two_route_solution(&data, 2), &evaluator);
    population.add(two_route_solution(&data, 1), &evaluator);

    // The balanced split is feasible, the 1/3 split overloads its second route.
    assert_eq!(population.size(), (1, 1));
}

#[test]
fn can_ignore_duplicate_individuals() {
    let data = create_line_data(4, 5, VehicleType::new(2, vec![10]));
    let mut population = create_population(2, 2);
    let evaluator = create_evaluator(100, 10);

    population.add(two_route_solution(&data, 2), &evaluator);
    population.add(two_route_solution(&data, 2), &evaluator);

    assert_eq!(population.size(), (1, 0));
}

#[test]
fn can_cull_down_to_minimum_size() {
    let data = create_line_data(6, 0, VehicleType::new(3, vec![100]));
    let mut population = create_population(2, 2);
    let evaluator = create_evaluator(100, 10);

    // Six structurally distinct feasible splits overflow the capacity of four.
    for split in 1..=5 {
        population.add(two_route_solution(&data, split), &evaluator);
    }
    let clients: Vec<usize> = data.client_locations().collect();
    population.add(
        Arc::new(make_solution(&data, vec![(0, clients[..3].to_vec()), (0, vec![clients[4], clients[3], clients[5]])])),
        &evaluator,
    );

    // The fifth insertion overflows the capacity of four and culls down to the minimum
    // size; the sixth lands on top of the culled population.
    let (feasible, infeasible) = population.size();
    assert_eq!(infeasible, 0);
    assert_eq!(feasible, 3);
}

#[test]
fn can_track_best_costs() {
    let data = create_line_data(4, 5, VehicleType::new(2, vec![10]));
    let mut population = create_population(4, 4);
    let evaluator = create_evaluator(100, 10);

    population.add(two_route_solution(&data, 2), &evaluator);
    population.add(two_route_solution(&data, 1), &evaluator);

    // Split after two: routes [1 2] and [3 4] with distance 12, feasible.
    assert_eq!(population.best_feasible_cost(), Some(12));
    assert!(population.best_infeasible_cost().unwrap() > 12);

    let best = population.best_overall().expect("population is not empty");
    assert!(best.is_feasible());
}

#[test]
fn can_select_parents_from_union() {
    let data = create_line_data(4, 5, VehicleType::new(2, vec![10]));
    let mut population = create_population(4, 4);
    let evaluator = create_evaluator(100, 10);

    population.add(two_route_solution(&data, 2), &evaluator);
    population.add(two_route_solution(&data, 1), &evaluator);
    population.add(two_route_solution(&data, 3), &evaluator);

    for _ in 0..10 {
        let (first, second) = population.select();
        assert_eq!(
            first.routes().iter().map(|route| route.visits().len()).sum::<usize>(),
            data.num_clients()
        );
        assert_eq!(
            second.routes().iter().map(|route| route.visits().len()).sum::<usize>(),
            data.num_clients()
        );
    }
}

#[test]
fn can_clear_population_for_restart() {
    let data = create_line_data(4, 5, VehicleType::new(2, vec![10]));
    let mut population = create_population(2, 2);
    let evaluator = create_evaluator(100, 10);

    population.add(two_route_solution(&data, 2), &evaluator);
    population.clear();

    assert_eq!(population.size(), (0, 0));
    assert!(population.best_overall().is_none());
}
