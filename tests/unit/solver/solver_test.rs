use super::*;
use crate::helpers::*;
use crate::models::common::MAX_VALUE;
use crate::models::problem::{Depot, Matrix, VehicleType};
use crate::solver::termination::MaxGeneration;

fn solve(data: &std::sync::Arc<ProblemData>, seed: u64, generations: usize) -> SolveResult {
    let config = SolverConfig { seed, ..SolverConfig::default() };
    let mut solver = Solver::new(data.clone(), config);
    let mut termination = MaxGeneration::new(generations);

    solver.solve(&mut termination).expect("solver produces a solution")
}

#[test]
fn can_solve_small_capacitated_instance() {
    let data = create_line_data(4, 5, VehicleType::new(2, vec![10]));
    let result = solve(&data, 0, 50);

    // Any feasible solution splits the clients two and two; the best split has distance 12.
    assert!(result.best.is_feasible());
    assert_eq!(result.best.num_routes(), 2);
    assert_eq!(result.best.distance(), 12);
    assert_eq!(result.statistics.len(), 50);
}

#[test]
fn can_solve_deterministically() {
    let data = create_line_data(6, 5, VehicleType::new(3, vec![10]));

    let first = solve(&data, 42, 30);
    let second = solve(&data, 42, 30);

    let visits = |result: &SolveResult| -> Vec<(usize, Vec<usize>)> {
        result
            .best
            .routes()
            .iter()
            .map(|route| (route.vehicle_type(), route.visits().to_vec()))
            .collect()
    };

    assert_eq!(visits(&first), visits(&second));
    assert_eq!(first.best.distance(), second.best.distance());
}

#[test]
fn can_serve_from_multiple_depots() {
    let depots = vec![Depot::new(0, 0), Depot::new(10, 0)];
    let clients = vec![
        delivery_client(1, 0, 1),
        delivery_client(2, 0, 1),
        delivery_client(8, 0, 1),
        delivery_client(9, 0, 1),
    ];

    let far_type = VehicleType { start_depot: 1, end_depot: 1, ..VehicleType::new(2, vec![10]) };
    let data = create_data(depots, clients, vec![VehicleType::new(2, vec![10]), far_type]);

    let result = solve(&data, 0, 60);

    assert!(result.best.is_feasible());
    assert_eq!(result.best.time_warp(), 0);

    for route in result.best.routes() {
        let vt = data.vehicle_type(route.vehicle_type());
        assert_eq!(route.start_depot(), vt.start_depot);
        assert_eq!(route.end_depot(), vt.end_depot);
        assert_eq!(route.start_depot(), route.end_depot());
    }
}

#[test]
fn can_collect_prizes_selectively() {
    let mut near = delivery_client(1, 0, 0);
    near.required = false;
    near.prize = 100;

    let mut far = delivery_client(50, 0, 0);
    far.required = false;
    far.prize = 10;

    let data = create_data(vec![Depot::new(0, 0)], vec![near, far], vec![VehicleType::new(1, vec![10])]);
    let result = solve(&data, 0, 40);

    // Serving the far client costs a 100 unit round trip for a prize of 10.
    assert!(result.best.is_feasible());
    assert_eq!(result.best.route_of(1), Some(0));
    assert_eq!(result.best.route_of(2), None);
}

#[test]
fn can_respect_profile_restrictions() {
    // The second profile walls off client 3: routes of the restricted vehicle type would
    // pay the forbidden edge cost to reach it.
    let points = vec![(0, 0), (1, 0), (2, 0), (3, 0)];
    let open = manhattan_matrix(&points);

    let mut walled_rows: Vec<Vec<i64>> =
        (0..points.len()).map(|from| (0..points.len()).map(|to| open.at(from, to)).collect()).collect();
    for other in 0..points.len() {
        walled_rows[other][3] = MAX_VALUE;
        walled_rows[3][other] = MAX_VALUE;
    }
    let walled = Matrix::from_rows(walled_rows);

    let restricted = VehicleType { profile: 1, ..VehicleType::new(1, vec![10]) };
    let data = std::sync::Arc::new(
        ProblemData::new(
            vec![Depot::new(0, 0)],
            vec![delivery_client(1, 0, 5), delivery_client(2, 0, 5), delivery_client(3, 0, 5)],
            vec![VehicleType::new(1, vec![10]), restricted],
            vec![],
            vec![open.clone(), walled.clone()],
            vec![open, walled],
        )
        .expect("valid instance"),
    );

    let result = solve(&data, 0, 60);

    assert!(result.best.is_feasible());
    let zoned_route = result.best.route_of(3).expect("client 3 is required");
    assert_eq!(result.best.routes()[zoned_route].vehicle_type(), 0);
}

#[test]
fn can_use_reloads_for_large_demand() {
    let vehicle_type = VehicleType { reload_depots: vec![0], max_reloads: 2, ..VehicleType::new(1, vec![10]) };
    let data = create_line_data(4, 5, vehicle_type);

    let result = solve(&data, 0, 60);

    // Twenty demand units only fit a ten unit vehicle with at least one reload.
    assert!(result.best.is_feasible());
    assert_eq!(result.best.num_routes(), 1);
    assert!(result.best.routes()[0].num_trips() >= 2);

    let delivered: i64 = result.best.routes()[0].trip_loads().iter().map(|loads| loads[0]).sum();
    assert_eq!(delivered, 20);
}

#[test]
fn can_handle_pickups_and_deliveries() {
    let mut clients: Vec<_> = (1..=4i64).map(|x| delivery_client(x, 0, 5)).collect();
    clients[1].delivery = vec![0];
    clients[1].pickup = vec![5];
    clients[3].delivery = vec![0];
    clients[3].pickup = vec![5];

    let data = create_data(vec![Depot::new(0, 0)], clients, vec![VehicleType::new(2, vec![10])]);
    let result = solve(&data, 0, 60);

    assert!(result.best.is_feasible());

    // No prefix of any trip may ever carry more than the vehicle fits.
    for route in result.best.routes() {
        for loads in route.trip_loads() {
            assert!(loads[0] <= 10);
        }
    }
}

#[test]
fn can_report_statistics_per_generation() {
    let data = create_line_data(4, 5, VehicleType::new(2, vec![10]));
    let result = solve(&data, 7, 20);

    assert_eq!(result.statistics.len(), 20);

    for (generation, stats) in result.statistics.iter().enumerate() {
        assert_eq!(stats.generation, generation);
        assert_eq!(stats.penalties.len(), 4);
        assert!(stats.feasible_size + stats.infeasible_size > 0);
    }
}

#[test]
fn can_return_best_without_any_generation() {
    let data = create_line_data(4, 5, VehicleType::new(2, vec![10]));
    let result = solve(&data, 0, 0);

    // With zero generations the best seeded random solution is returned.
    assert!(result.statistics.is_empty());
    assert!(result.best.num_routes() > 0);
}
