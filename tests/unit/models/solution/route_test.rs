use super::*;
use crate::helpers::*;
use crate::models::problem::VehicleType;

#[test]
fn can_evaluate_simple_route() {
    let data = create_line_data(4, 5, VehicleType::new(1, vec![10]));
    let route = Route::new(&data, 0, vec![1, 2, 3, 4]);

    assert_eq!(route.distance(), 8);
    assert_eq!(route.duration(), 8);
    assert_eq!(route.time_warp(), 0);
    assert_eq!(route.excess_load(), &[10]);
    assert_eq!(route.num_trips(), 1);
    assert_eq!(route.trip_loads(), &[vec![20]]);
    assert!(!route.is_feasible());
}

#[test]
fn can_reset_load_on_reload() {
    let data = create_line_data(4, 5, VehicleType::new(1, vec![10]));
    let route = Route::new(&data, 0, vec![1, 2, 0, 3, 4]);

    assert_eq!(route.distance(), 12);
    assert_eq!(route.num_trips(), 2);
    assert_eq!(route.trip_loads(), &[vec![10], vec![10]]);
    assert_eq!(route.excess_load(), &[0]);
    assert!(route.is_feasible());
}

#[test]
fn can_iterate_clients_without_depots() {
    let data = create_line_data(4, 5, VehicleType::new(1, vec![10]));
    let route = Route::new(&data, 0, vec![1, 2, 0, 3, 4]);

    let clients: Vec<_> = route.clients(&data).collect();
    assert_eq!(clients, vec![1, 2, 3, 4]);

    let trips: Vec<&[usize]> = route.trips(&data).collect();
    assert_eq!(trips, vec![&[1, 2][..], &[3, 4][..]]);
}

#[test]
fn can_accumulate_time_warp_from_client_windows() {
    let data = {
        let mut clients = vec![delivery_client(1, 0, 0), delivery_client(2, 0, 0)];
        clients[1].tw = TimeWindow::new(0, 1);
        create_data(vec![crate::models::problem::Depot::new(0, 0)], clients, vec![VehicleType::new(1, vec![0])])
    };

    // Arrival at the second client is at 2 while its window closes at 1.
    let route = Route::new(&data, 0, vec![1, 2]);

    assert_eq!(route.time_warp(), 1);
    assert!(!route.is_feasible());
}

#[test]
fn can_respect_route_ceilings() {
    let mut vehicle_type = VehicleType::new(1, vec![100]);
    vehicle_type.max_distance = 6;
    vehicle_type.max_duration = 7;

    let data = create_line_data(4, 5, vehicle_type);
    let route = Route::new(&data, 0, vec![1, 2, 3, 4]);

    assert_eq!(route.excess_distance(), 2);
    assert_eq!(route.excess_duration(), 1);
    assert!(!route.is_feasible());
}
