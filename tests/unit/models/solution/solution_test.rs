use super::*;
use crate::helpers::*;
use crate::models::problem::VehicleType;
use crate::utils::DefaultRandom;

#[test]
fn can_aggregate_route_attributes() {
    let data = create_line_data(4, 5, VehicleType::new(2, vec![10]));
    let solution = make_solution(&data, vec![(0, vec![1, 2]), (0, vec![3, 4])]);

    assert_eq!(solution.num_routes(), 2);
    assert_eq!(solution.distance(), 4 + 8);
    assert_eq!(solution.excess_load(), &[0]);
    assert_eq!(solution.time_warp(), 0);
    assert!(solution.unassigned().is_empty());
    assert!(solution.is_complete());
    assert!(solution.is_feasible());
}

#[test]
fn can_expose_client_neighbours() {
    let data = create_line_data(4, 5, VehicleType::new(2, vec![10]));
    let solution = make_solution(&data, vec![(0, vec![1, 2]), (0, vec![3, 4])]);

    assert_eq!(solution.neighbours_of(1), Some((0, 2)));
    assert_eq!(solution.neighbours_of(2), Some((1, 0)));
    assert_eq!(solution.neighbours_of(3), Some((0, 4)));
    assert_eq!(solution.route_of(1), Some(0));
    assert_eq!(solution.route_of(4), Some(1));
}

#[test]
fn can_track_unassigned_and_prizes() {
    let mut clients: Vec<_> = (1..=3i64).map(|x| delivery_client(x, 0, 0)).collect();
    clients[2].required = false;
    clients[2].prize = 7;

    let data = create_data(vec![crate::models::problem::Depot::new(0, 0)], clients, vec![VehicleType::new(1, vec![10])]);
    let solution = make_solution(&data, vec![(0, vec![1, 2])]);

    assert_eq!(solution.unassigned(), &[3]);
    assert_eq!(solution.uncollected_prizes(), 7);
    assert!(solution.is_complete());
    assert!(solution.is_feasible());
}

#[test]
fn can_detect_missing_required_client() {
    let data = create_line_data(3, 0, VehicleType::new(1, vec![10]));
    let solution = make_solution(&data, vec![(0, vec![1, 2])]);

    assert_eq!(solution.unassigned(), &[3]);
    assert!(!solution.is_complete());
    assert!(!solution.is_feasible());
}

#[test]
fn can_compute_broken_pairs_distance() {
    let data = create_line_data(4, 5, VehicleType::new(2, vec![10]));
    let first = make_solution(&data, vec![(0, vec![1, 2]), (0, vec![3, 4])]);
    let same = make_solution(&data, vec![(0, vec![1, 2]), (0, vec![3, 4])]);
    let other = make_solution(&data, vec![(0, vec![1, 3]), (0, vec![2, 4])]);

    assert_eq!(first.broken_pairs_distance(&same), 0.);
    assert_eq!(first.broken_pairs_distance(&other), 1.);
    assert_eq!(first.broken_pairs_distance(&other), other.broken_pairs_distance(&first));
    assert_eq!(first.signature(), same.signature());
    assert_ne!(first.signature(), other.signature());
}

#[test]
fn can_make_random_complete_solution() {
    let data = create_line_data(6, 1, VehicleType::new(3, vec![10]));
    let random: std::sync::Arc<dyn crate::utils::Random> =
        std::sync::Arc::new(DefaultRandom::new_with_seed(17));

    let solution = Solution::make_random(&data, &random);

    assert!(solution.is_complete());
    assert_eq!(
        solution.routes().iter().map(|route| route.visits().len()).sum::<usize>(),
        data.num_clients()
    );
}

#[test]
fn can_respect_groups_in_random_solution() {
    let mut clients: Vec<_> = (1..=3i64).map(|x| delivery_client(x, 0, 1)).collect();
    clients[0].group = Some(0);
    clients[0].required = false;
    clients[1].group = Some(0);
    clients[1].required = false;

    let data = create_data_with_groups(
        vec![crate::models::problem::Depot::new(0, 0)],
        clients,
        vec![VehicleType::new(2, vec![10])],
        vec![crate::models::problem::ClientGroup::new(vec![1, 2])],
    );

    let random: std::sync::Arc<dyn crate::utils::Random> =
        std::sync::Arc::new(DefaultRandom::new_with_seed(3));
    let solution = Solution::make_random(&data, &random);

    let group_members = [1, 2];
    let served = group_members.iter().filter(|&&client| solution.route_of(client).is_some()).count();

    assert_eq!(served, 1);
    assert!(solution.route_of(3).is_some());
}
