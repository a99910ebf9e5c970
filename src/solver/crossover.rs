#[cfg(test)]
#[path = "../../tests/unit/solver/crossover_test.rs"]
mod crossover_test;

use crate::models::common::*;
use crate::models::problem::ProblemData;
use crate::models::solution::{Route, Solution};
use crate::utils::Random;
use hashbrown::HashSet;
use std::sync::Arc;

/// Selective route exchange: the offspring keeps most of the first parent's routes,
/// exchanges a randomly chosen stretch of them for routes of the second parent, and leaves
/// displaced required clients to a greedy best-position repair during education.
pub fn srex(
    data: &ProblemData,
    first: &Solution,
    second: &Solution,
    random: &Arc<dyn Random>,
) -> Solution {
    if first.num_routes() == 0 || second.num_routes() == 0 {
        return if first.num_routes() == 0 { second.clone() } else { first.clone() };
    }

    let max_moved = (first.num_routes().min(second.num_routes()) / 2).max(1);
    let num_moved = random.uniform_int(1, max_moved as i32) as usize;
    let first_start = random.uniform_int(0, first.num_routes() as i32 - 1) as usize;
    let second_start = random.uniform_int(0, second.num_routes() as i32 - 1) as usize;

    let removed: HashSet<usize> =
        (0..num_moved).map(|offset| (first_start + offset) % first.num_routes()).collect();
    let donors: Vec<&Route> = (0..num_moved)
        .map(|offset| &second.routes()[(second_start + offset) % second.num_routes()])
        .collect();

    let moved_clients: HashSet<Location> =
        donors.iter().flat_map(|route| route.clients(data)).collect();

    let mut type_usage = vec![0usize; data.num_vehicle_types()];
    let mut used_groups = HashSet::new();
    let mut routes = vec![];

    for (idx, route) in first.routes().iter().enumerate() {
        if removed.contains(&idx) {
            continue;
        }

        let visits: Vec<Location> = route
            .visits()
            .iter()
            .copied()
            .filter(|&visit| data.is_depot(visit) || !moved_clients.contains(&visit))
            .collect();

        if visits.iter().any(|&visit| !data.is_depot(visit)) {
            type_usage[route.vehicle_type()] += 1;
            for &visit in visits.iter() {
                if let Some(group) = group_of(data, visit) {
                    used_groups.insert(group);
                }
            }
            routes.push(Route::new(data, route.vehicle_type(), visits));
        }
    }

    for donor in donors {
        let Some(vehicle_type) = pick_vehicle_type(data, donor, &type_usage) else {
            continue;
        };

        let visits: Vec<Location> = donor
            .visits()
            .iter()
            .copied()
            .filter(|&visit| {
                data.is_depot(visit)
                    || group_of(data, visit).map_or(true, |group| !used_groups.contains(&group))
            })
            .collect();

        if visits.iter().any(|&visit| !data.is_depot(visit)) {
            type_usage[vehicle_type] += 1;
            for &visit in visits.iter() {
                if let Some(group) = group_of(data, visit) {
                    used_groups.insert(group);
                }
            }
            routes.push(Route::new(data, vehicle_type, visits));
        }
    }

    Solution::new(data, routes)
}

fn group_of(data: &ProblemData, visit: Location) -> Option<usize> {
    if data.is_depot(visit) {
        None
    } else {
        data.client(visit).group
    }
}

/// Picks a vehicle type for a donor route: the donor's own type when still free, otherwise
/// any free type which admits all the route's clients.
fn pick_vehicle_type(data: &ProblemData, donor: &Route, type_usage: &[usize]) -> Option<usize> {
    let fits = |vehicle_type: usize| {
        type_usage[vehicle_type] < data.vehicle_type(vehicle_type).num_available
            && donor.clients(data).all(|client| data.vehicle_type_allowed(client, vehicle_type))
    };

    if fits(donor.vehicle_type()) {
        return Some(donor.vehicle_type());
    }

    (0..data.num_vehicle_types()).find(|&vehicle_type| fits(vehicle_type))
}

/// Ordered crossover on the flattened giant tour, used for single vehicle type, single
/// depot instances when both parents use the same number of routes. The child keeps a
/// random slice of the first parent's tour and fills the rest in the second parent's order,
/// then splits the tour into routes greedily by capacity.
pub fn ox(data: &ProblemData, first: &Solution, second: &Solution, random: &Arc<dyn Random>) -> Solution {
    let tour1 = giant_tour(data, first);
    let tour2 = giant_tour(data, second);

    if tour1.is_empty() {
        return first.clone();
    }

    let cut1 = random.uniform_int(0, tour1.len() as i32 - 1) as usize;
    let cut2 = random.uniform_int(0, tour1.len() as i32 - 1) as usize;
    let (cut1, cut2) = (cut1.min(cut2), cut1.max(cut2));

    let mut used: HashSet<Location> = tour1[cut1..=cut2].iter().copied().collect();
    let mut used_groups: HashSet<usize> =
        tour1[cut1..=cut2].iter().filter_map(|&client| group_of(data, client)).collect();

    let mut child: Vec<Location> = tour1[cut1..=cut2].to_vec();
    for offset in 0..tour2.len() {
        let client = tour2[(cut2 + 1 + offset) % tour2.len()];
        if used.contains(&client) {
            continue;
        }

        if let Some(group) = group_of(data, client) {
            if !used_groups.insert(group) {
                continue;
            }
        }

        used.insert(client);
        child.push(client);
    }

    Solution::new(data, split_tour(data, child))
}

fn giant_tour(data: &ProblemData, solution: &Solution) -> Vec<Location> {
    solution.routes().iter().flat_map(|route| route.clients(data).collect::<Vec<_>>()).collect()
}

/// Splits a giant tour into at most the available number of routes, opening a new route
/// whenever the running load exceeds capacity. Any remainder stays in the last route and is
/// repaired by the penalised search.
fn split_tour(data: &ProblemData, tour: Vec<Location>) -> Vec<Route> {
    let vt = data.vehicle_type(0);
    let dims = data.num_load_dimensions();

    let mut routes: Vec<Route> = vec![];
    let mut visits: Vec<Location> = vec![];
    let mut loads = vec![LoadSegment::default(); dims];

    for client in tour {
        let merged: Vec<LoadSegment> =
            (0..dims).map(|dim| loads[dim].merge(&data.visit_load(client, dim))).collect();
        let overflow = merged.iter().zip(vt.capacity.iter()).any(|(load, &cap)| load.excess(cap) > 0);

        if overflow && !visits.is_empty() && routes.len() + 1 < vt.num_available {
            routes.push(Route::new(data, 0, std::mem::take(&mut visits)));
            loads = (0..dims).map(|dim| data.visit_load(client, dim)).collect();
        } else {
            loads = merged;
        }

        visits.push(client);
    }

    if !visits.is_empty() {
        routes.push(Route::new(data, 0, visits));
    }

    routes
}
