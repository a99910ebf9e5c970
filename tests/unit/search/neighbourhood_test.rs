use super::*;
use crate::helpers::*;
use crate::models::problem::VehicleType;

#[test]
fn can_limit_and_order_neighbours() {
    let data = create_line_data(4, 1, VehicleType::new(1, vec![10]));
    let params = NeighbourhoodParams { num_neighbours: 2, ..NeighbourhoodParams::default() };

    let neighbours = compute_neighbours(&data, &params);

    // Depots have no neighbours; clients get their two closest peers, ties broken by index.
    assert!(neighbours[0].is_empty());
    assert_eq!(neighbours[1], vec![2, 3]);
    assert_eq!(neighbours[2], vec![1, 3]);
    assert_eq!(neighbours[3], vec![2, 4]);
    assert_eq!(neighbours[4], vec![3, 2]);
}

#[test]
fn can_return_all_other_clients_when_k_is_large() {
    let data = create_line_data(4, 1, VehicleType::new(1, vec![10]));
    let neighbours = compute_neighbours(&data, &NeighbourhoodParams::default());

    for client in data.client_locations() {
        assert_eq!(neighbours[client].len(), data.num_clients() - 1);
        assert!(!neighbours[client].contains(&client));
        assert!(!neighbours[client].contains(&0));
    }
}

#[test]
fn can_prefer_time_compatible_neighbours() {
    let mut clients = vec![delivery_client(1, 0, 1), delivery_client(2, 0, 1), delivery_client(2, 0, 1)];
    clients[0].tw = TimeWindow::new(0, 10);
    // The second client opens far too late to follow the first without waiting.
    clients[1].tw = TimeWindow::new(1_000, 2_000);
    clients[2].tw = TimeWindow::new(0, 10);

    let data = create_data(vec![crate::models::problem::Depot::new(0, 0)], clients, vec![VehicleType::new(1, vec![10])]);
    let params = NeighbourhoodParams { num_neighbours: 1, ..NeighbourhoodParams::default() };

    let neighbours = compute_neighbours(&data, &params);

    // Clients 2 and 3 are equidistant from client 1, but 3 fits its window.
    assert_eq!(neighbours[1], vec![3]);
}
