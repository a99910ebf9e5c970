#[cfg(test)]
#[path = "../../../tests/unit/models/solution/solution_test.rs"]
mod solution_test;

use crate::models::common::*;
use crate::models::problem::ProblemData;
use crate::models::solution::Route;
use crate::utils::Random;
use hashbrown::HashSet;
use rustc_hash::FxHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// An immutable solution: a collection of non-empty routes plus the set of unassigned
/// clients, with aggregated cost and feasibility attributes and a per-client neighbour table
/// for constant time lookups by search operators.
#[derive(Clone, Debug)]
pub struct Solution {
    routes: Vec<Route>,
    unassigned: Vec<Location>,
    distance: Distance,
    duration: Duration,
    time_warp: Duration,
    excess_load: Vec<LoadValue>,
    excess_distance: Distance,
    excess_duration: Duration,
    fixed_cost: Cost,
    distance_cost: Cost,
    duration_cost: Cost,
    uncollected_prizes: Cost,
    is_complete: bool,
    num_clients: usize,
    neighbours: Vec<Option<(Location, Location)>>,
    client_route: Vec<Option<usize>>,
}

impl Solution {
    /// Creates a new instance of `Solution` from the given routes. Empty routes are dropped.
    /// Structural invariant breaches (duplicated client, group double use, vehicle type
    /// overuse) indicate a bug in the caller and abort.
    pub fn new(data: &ProblemData, routes: Vec<Route>) -> Self {
        let routes: Vec<_> = routes.into_iter().filter(|route| !route.is_empty()).collect();

        let mut type_usage = vec![0; data.num_vehicle_types()];
        let mut group_usage = vec![0; data.num_groups()];
        let mut assigned = HashSet::new();

        let mut neighbours = vec![None; data.num_locations()];
        let mut client_route = vec![None; data.num_locations()];

        for (route_idx, route) in routes.iter().enumerate() {
            type_usage[route.vehicle_type()] += 1;

            let mut prev = route.start_depot();
            let visits = route.visits();

            for (pos, &visit) in visits.iter().enumerate() {
                let next = visits.get(pos + 1).copied().unwrap_or_else(|| route.end_depot());

                if !data.is_depot(visit) {
                    assert!(assigned.insert(visit), "client {visit} is assigned more than once");

                    if let Some(group) = data.client(visit).group {
                        group_usage[group] += 1;
                        assert!(group_usage[group] <= 1, "client group {group} is used more than once");
                    }

                    neighbours[visit] = Some((prev, next));
                    client_route[visit] = Some(route_idx);
                }

                prev = visit;
            }
        }

        for (idx, &used) in type_usage.iter().enumerate() {
            assert!(
                used <= data.vehicle_type(idx).num_available,
                "vehicle type {idx} is used more often than available"
            );
        }

        let unassigned: Vec<_> =
            data.client_locations().filter(|location| !assigned.contains(location)).collect();

        let is_complete = unassigned.iter().all(|&location| !data.client(location).required);

        let uncollected_prizes = unassigned
            .iter()
            .filter(|&&location| !data.client(location).required)
            .map(|&location| data.client(location).prize)
            .sum();

        let mut excess_load = vec![0; data.num_load_dimensions()];
        let (mut distance, mut duration, mut time_warp): (Distance, Duration, Duration) = (0, 0, 0);
        let (mut excess_distance, mut excess_duration): (Distance, Duration) = (0, 0);
        let (mut fixed_cost, mut distance_cost, mut duration_cost) = (0i64, 0i64, 0i64);

        for route in routes.iter() {
            let vt = data.vehicle_type(route.vehicle_type());

            distance += route.distance();
            duration += route.duration();
            time_warp = time_warp.saturating_add(route.time_warp());
            excess_distance += route.excess_distance();
            excess_duration += route.excess_duration();

            for (dim, &excess) in route.excess_load().iter().enumerate() {
                excess_load[dim] += excess;
            }

            fixed_cost += vt.fixed_cost;
            distance_cost = distance_cost.saturating_add(vt.unit_distance_cost.saturating_mul(route.distance()));
            duration_cost = duration_cost.saturating_add(vt.unit_duration_cost.saturating_mul(route.duration()));
        }

        Self {
            routes,
            unassigned,
            distance,
            duration,
            time_warp,
            excess_load,
            excess_distance,
            excess_duration,
            fixed_cost,
            distance_cost,
            duration_cost,
            uncollected_prizes,
            is_complete,
            num_clients: data.num_clients(),
            neighbours,
            client_route,
        }
    }

    /// Creates a random solution: group conflicts resolved by a random member, every other
    /// client assigned to a random compatible vehicle. Used to seed the initial population
    /// and restarts.
    pub fn make_random(data: &ProblemData, random: &Arc<dyn Random>) -> Self {
        let mut group_choice = vec![false; data.num_locations()];
        for idx in 0..data.num_groups() {
            let members = &data.group(idx).clients;
            let choice = members[random.uniform_int(0, members.len() as i32 - 1) as usize];
            group_choice[choice] = true;
        }

        let mut slots: Vec<(usize, Vec<Location>)> = (0..data.num_vehicle_types())
            .flat_map(|idx| (0..data.vehicle_type(idx).num_available).map(move |_| (idx, vec![])))
            .collect();

        let mut clients: Vec<_> = data
            .client_locations()
            .filter(|&location| data.client(location).group.is_none() || group_choice[location])
            .collect();
        random.shuffle(&mut clients);

        for client in clients {
            let compatible: Vec<_> = (0..slots.len())
                .filter(|&slot| data.vehicle_type_allowed(client, slots[slot].0))
                .collect();

            if compatible.is_empty() {
                continue;
            }

            let slot = compatible[random.uniform_int(0, compatible.len() as i32 - 1) as usize];
            slots[slot].1.push(client);
        }

        let routes = slots
            .into_iter()
            .filter(|(_, visits)| !visits.is_empty())
            .map(|(vehicle_type, visits)| Route::new(data, vehicle_type, visits))
            .collect();

        Self::new(data, routes)
    }

    /// Returns the routes of the solution.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Returns number of routes.
    pub fn num_routes(&self) -> usize {
        self.routes.len()
    }

    /// Returns unassigned client locations.
    pub fn unassigned(&self) -> &[Location] {
        &self.unassigned
    }

    /// Returns total travel distance over all routes.
    pub fn distance(&self) -> Distance {
        self.distance
    }

    /// Returns total duration over all routes.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Returns total time warp over all routes.
    pub fn time_warp(&self) -> Duration {
        self.time_warp
    }

    /// Returns total excess load per dimension.
    pub fn excess_load(&self) -> &[LoadValue] {
        &self.excess_load
    }

    /// Returns total excess distance.
    pub fn excess_distance(&self) -> Distance {
        self.excess_distance
    }

    /// Returns total excess duration.
    pub fn excess_duration(&self) -> Duration {
        self.excess_duration
    }

    /// Returns total fixed vehicle cost.
    pub fn fixed_cost(&self) -> Cost {
        self.fixed_cost
    }

    /// Returns total distance dependent cost.
    pub fn distance_cost(&self) -> Cost {
        self.distance_cost
    }

    /// Returns total duration dependent cost.
    pub fn duration_cost(&self) -> Cost {
        self.duration_cost
    }

    /// Returns the sum of prizes of unserved optional clients.
    pub fn uncollected_prizes(&self) -> Cost {
        self.uncollected_prizes
    }

    /// Checks whether every required client is served.
    pub fn is_complete(&self) -> bool {
        self.is_complete
    }

    /// Checks whether the solution is feasible: complete and without any excess.
    pub fn is_feasible(&self) -> bool {
        self.is_complete
            && self.time_warp == 0
            && self.excess_distance == 0
            && self.excess_duration == 0
            && self.excess_load.iter().all(|&excess| excess == 0)
    }

    /// Returns the route index serving the given client, if any.
    pub fn route_of(&self, client: Location) -> Option<usize> {
        self.client_route[client]
    }

    /// Returns predecessor and successor locations of the given client, if it is served.
    pub fn neighbours_of(&self, client: Location) -> Option<(Location, Location)> {
        self.neighbours[client]
    }

    /// Returns the broken pairs distance to another solution: the fraction of clients whose
    /// predecessor or successor differs between the two solutions. Symmetric, zero on
    /// structurally identical solutions.
    pub fn broken_pairs_distance(&self, other: &Self) -> f64 {
        if self.num_clients == 0 {
            return 0.;
        }

        let broken = self
            .neighbours
            .iter()
            .zip(other.neighbours.iter())
            .filter(|(own, others)| own != others)
            .count();

        broken as f64 / self.num_clients as f64
    }

    /// Returns a cheap structural signature used to deduplicate identical solutions.
    pub fn signature(&self) -> u64 {
        let mut hasher = FxHasher::default();

        for route in self.routes.iter() {
            route.vehicle_type().hash(&mut hasher);
            route.visits().hash(&mut hasher);
        }
        self.unassigned.hash(&mut hasher);

        hasher.finish()
    }
}
