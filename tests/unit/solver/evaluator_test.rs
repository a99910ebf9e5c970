use super::*;
use crate::helpers::*;
use crate::models::problem::VehicleType;

#[test]
fn can_penalise_excess_load() {
    let data = create_line_data(4, 5, VehicleType::new(1, vec![10]));
    let solution = make_solution(&data, vec![(0, vec![1, 2, 3, 4])]);

    let evaluator = CostEvaluator::new(vec![2], 3, 4, 5);

    // Distance 8 at unit cost plus ten units of excess load.
    assert_eq!(solution.excess_load(), &[10]);
    assert_eq!(evaluator.penalised_cost(&solution), 8 + 2 * 10);
    assert_eq!(evaluator.cost(&solution), Cost::MAX);
}

#[test]
fn can_evaluate_feasible_solution() {
    let data = create_line_data(4, 5, VehicleType::new(2, vec![10]));
    let solution = make_solution(&data, vec![(0, vec![1, 2]), (0, vec![3, 4])]);

    let evaluator = CostEvaluator::new(vec![2], 3, 4, 5);

    assert_eq!(evaluator.penalised_cost(&solution), 12);
    assert_eq!(evaluator.cost(&solution), 12);
}

#[test]
fn can_account_fixed_and_unit_costs() {
    let mut vehicle_type = VehicleType::new(2, vec![10]);
    vehicle_type.fixed_cost = 100;
    vehicle_type.unit_distance_cost = 2;
    vehicle_type.unit_duration_cost = 3;

    let data = create_line_data(4, 5, vehicle_type);
    let solution = make_solution(&data, vec![(0, vec![1, 2]), (0, vec![3, 4])]);

    let evaluator = CostEvaluator::new(vec![1], 1, 1, 1);

    // Two used vehicles, distance 12 at unit cost 2, duration 12 at unit cost 3.
    assert_eq!(evaluator.cost(&solution), 200 + 24 + 36);
}

#[test]
fn can_charge_uncollected_prizes() {
    let mut clients: Vec<_> = (1..=2i64).map(|x| delivery_client(x, 0, 0)).collect();
    clients[1].required = false;
    clients[1].prize = 9;

    let data = create_data(vec![crate::models::problem::Depot::new(0, 0)], clients, vec![VehicleType::new(1, vec![10])]);
    let solution = make_solution(&data, vec![(0, vec![1])]);

    let evaluator = CostEvaluator::new(vec![1], 1, 1, 1);

    // Distance 2 plus the prize of the omitted optional client.
    assert_eq!(evaluator.cost(&solution), 2 + 9);
}

#[test]
fn can_penalise_time_warp() {
    let mut clients = vec![delivery_client(1, 0, 0), delivery_client(2, 0, 0)];
    clients[1].tw = TimeWindow::new(0, 1);

    let data = create_data(vec![crate::models::problem::Depot::new(0, 0)], clients, vec![VehicleType::new(1, vec![0])]);
    let solution = make_solution(&data, vec![(0, vec![1, 2])]);

    let evaluator = CostEvaluator::new(vec![0], 10, 0, 0);

    assert_eq!(solution.time_warp(), 1);
    assert_eq!(evaluator.penalised_cost(&solution), 4 + 10);
    assert_eq!(evaluator.cost(&solution), Cost::MAX);
}
