#[cfg(test)]
#[path = "../../../tests/unit/models/problem/data_test.rs"]
mod data_test;

use crate::models::common::*;
use crate::models::problem::{Client, ClientGroup, Depot, Matrix, VehicleType};
use crate::utils::GenericResult;
use hashbrown::HashSet;

/// An immutable problem instance: depots, clients, fleet, client groups, and per-profile
/// distance/duration matrices. Locations are indexed contiguously, depots first.
pub struct ProblemData {
    depots: Vec<Depot>,
    clients: Vec<Client>,
    vehicle_types: Vec<VehicleType>,
    groups: Vec<ClientGroup>,
    distances: Vec<Matrix>,
    durations: Vec<Matrix>,
    num_load_dimensions: usize,
}

impl ProblemData {
    /// Creates a new instance of `ProblemData`, validating the definition. All validation
    /// failures are fatal: no solver component accepts a partially consistent instance.
    pub fn new(
        depots: Vec<Depot>,
        clients: Vec<Client>,
        vehicle_types: Vec<VehicleType>,
        groups: Vec<ClientGroup>,
        distances: Vec<Matrix>,
        durations: Vec<Matrix>,
    ) -> GenericResult<Self> {
        if depots.is_empty() {
            return Err("at least one depot is required".into());
        }

        if vehicle_types.is_empty() || vehicle_types.iter().all(|vt| vt.num_available == 0) {
            return Err("at least one vehicle is required".into());
        }

        let num_locations = depots.len() + clients.len();

        if distances.is_empty() || distances.len() != durations.len() {
            return Err("each routing profile needs one distance and one duration matrix".into());
        }

        for matrix in distances.iter().chain(durations.iter()) {
            if !matrix.is_square(num_locations) {
                return Err(format!(
                    "matrix of size {} does not cover all {num_locations} locations",
                    matrix.size()
                )
                .into());
            }

            if matrix.values().any(|value| value < 0) {
                return Err("negative distance or duration".into());
            }
        }

        let num_load_dimensions =
            vehicle_types.first().map(|vt| vt.capacity.len()).unwrap_or_default();

        let data = Self { depots, clients, vehicle_types, groups, distances, durations, num_load_dimensions };

        data.validate_locations()?;
        data.validate_fleet()?;
        data.validate_groups()?;
        data.validate_reachability()?;

        Ok(data)
    }

    fn validate_locations(&self) -> GenericResult<()> {
        for depot in self.depots.iter() {
            if !depot.tw.is_valid() {
                return Err("depot time window has early > late".into());
            }
        }

        for (idx, client) in self.clients.iter().enumerate() {
            if !client.tw.is_valid() {
                return Err(format!("client at location {} has early > late", self.num_depots() + idx).into());
            }

            if client.service_duration < 0 || client.release_time < 0 || client.prize < 0 {
                return Err("negative client attribute".into());
            }

            if client.release_time > client.tw.late {
                return Err("client release time exceeds its latest service start".into());
            }

            if client.delivery.len() != self.num_load_dimensions
                || client.pickup.len() != self.num_load_dimensions
            {
                return Err("client demand dimensions do not match vehicle capacity dimensions".into());
            }

            if client.delivery.iter().chain(client.pickup.iter()).any(|&value| value < 0) {
                return Err("negative client demand".into());
            }
        }

        Ok(())
    }

    fn validate_fleet(&self) -> GenericResult<()> {
        for vehicle_type in self.vehicle_types.iter() {
            if vehicle_type.capacity.len() != self.num_load_dimensions {
                return Err("vehicle capacity dimensions differ between vehicle types".into());
            }

            if vehicle_type.capacity.iter().any(|&value| value < 0) {
                return Err("negative vehicle capacity".into());
            }

            if vehicle_type.start_depot >= self.num_depots() || vehicle_type.end_depot >= self.num_depots() {
                return Err("vehicle type references an unknown depot".into());
            }

            if !vehicle_type.tw.is_valid() {
                return Err("vehicle shift window has early > late".into());
            }

            if vehicle_type.max_duration < 0 || vehicle_type.max_distance < 0 {
                return Err("negative route ceiling".into());
            }

            if vehicle_type.profile >= self.distances.len() {
                return Err("vehicle type references an unknown routing profile".into());
            }

            if vehicle_type.reload_depots.iter().any(|&depot| depot >= self.num_depots()) {
                return Err("reload depot is not a depot location".into());
            }
        }

        Ok(())
    }

    fn validate_groups(&self) -> GenericResult<()> {
        let mut seen = HashSet::new();

        for (idx, group) in self.groups.iter().enumerate() {
            if group.clients.is_empty() {
                return Err("empty client group".into());
            }

            for &location in group.clients.iter() {
                if location < self.num_depots() || location >= self.num_locations() {
                    return Err("client group member is not a client location".into());
                }

                if !seen.insert(location) {
                    return Err("client appears in more than one group".into());
                }

                if self.client(location).group != Some(idx) {
                    return Err("client group membership is inconsistent".into());
                }
            }
        }

        Ok(())
    }

    fn validate_reachability(&self) -> GenericResult<()> {
        for location in self.num_depots()..self.num_locations() {
            if !self.client(location).required {
                continue;
            }

            let reachable = self.vehicle_types.iter().enumerate().any(|(idx, vt)| {
                self.vehicle_type_allowed(location, idx)
                    && self.distance(vt.profile, vt.start_depot, location) < MAX_VALUE
                    && self.distance(vt.profile, location, vt.end_depot) < MAX_VALUE
            });

            if !reachable {
                return Err(format!("required client at location {location} is unreachable").into());
            }
        }

        Ok(())
    }

    /// Returns number of depots.
    pub fn num_depots(&self) -> usize {
        self.depots.len()
    }

    /// Returns number of clients.
    pub fn num_clients(&self) -> usize {
        self.clients.len()
    }

    /// Returns number of locations: depots followed by clients.
    pub fn num_locations(&self) -> usize {
        self.depots.len() + self.clients.len()
    }

    /// Returns number of vehicle types.
    pub fn num_vehicle_types(&self) -> usize {
        self.vehicle_types.len()
    }

    /// Returns total number of vehicles over all types.
    pub fn num_vehicles(&self) -> usize {
        self.vehicle_types.iter().map(|vt| vt.num_available).sum()
    }

    /// Returns number of capacity dimensions.
    pub fn num_load_dimensions(&self) -> usize {
        self.num_load_dimensions
    }

    /// Returns number of routing profiles.
    pub fn num_profiles(&self) -> usize {
        self.distances.len()
    }

    /// Returns number of client groups.
    pub fn num_groups(&self) -> usize {
        self.groups.len()
    }

    /// Checks whether the location is a depot.
    pub fn is_depot(&self, location: Location) -> bool {
        location < self.depots.len()
    }

    /// Returns a depot by its location.
    pub fn depot(&self, location: Location) -> &Depot {
        &self.depots[location]
    }

    /// Returns a client by its location.
    pub fn client(&self, location: Location) -> &Client {
        &self.clients[location - self.depots.len()]
    }

    /// Returns an iterator over all client locations.
    pub fn client_locations(&self) -> impl Iterator<Item = Location> {
        self.depots.len()..self.num_locations()
    }

    /// Returns a vehicle type by its index.
    pub fn vehicle_type(&self, idx: usize) -> &VehicleType {
        &self.vehicle_types[idx]
    }

    /// Returns an iterator over all vehicle types.
    pub fn vehicle_types(&self) -> impl Iterator<Item = &VehicleType> {
        self.vehicle_types.iter()
    }

    /// Returns a client group by its index.
    pub fn group(&self, idx: usize) -> &ClientGroup {
        &self.groups[idx]
    }

    /// Checks whether the given vehicle type may serve the given client location.
    pub fn vehicle_type_allowed(&self, location: Location, vehicle_type: usize) -> bool {
        if self.is_depot(location) {
            return true;
        }

        self.client(location)
            .allowed_vehicle_types
            .as_ref()
            .map_or(true, |allowed| allowed.contains(&vehicle_type))
    }

    /// Returns travel distance of an edge under the given profile.
    pub fn distance(&self, profile: usize, from: Location, to: Location) -> Distance {
        self.distances[profile].at(from, to)
    }

    /// Returns travel duration of an edge under the given profile.
    pub fn duration(&self, profile: usize, from: Location, to: Location) -> Duration {
        self.durations[profile].at(from, to)
    }

    /// Returns service duration at the given location. Depots have none.
    pub fn service_duration(&self, location: Location) -> Duration {
        if self.is_depot(location) {
            0
        } else {
            self.client(location).service_duration
        }
    }

    /// Returns the service time window of the given location.
    pub fn time_window(&self, location: Location) -> TimeWindow {
        if self.is_depot(location) {
            self.depot(location).tw
        } else {
            self.client(location).tw
        }
    }

    /// Returns release time of the given location. Depots have none.
    pub fn release_time(&self, location: Location) -> Duration {
        if self.is_depot(location) {
            0
        } else {
            self.client(location).release_time
        }
    }

    /// Returns a duration segment describing a visit of the single given location.
    pub fn visit_segment(&self, location: Location) -> DistanceDurationSegment {
        DistanceDurationSegment::for_location(
            self.service_duration(location),
            self.time_window(location),
            self.release_time(location),
        )
    }

    /// Returns a load segment describing a visit of the single given location in the given
    /// capacity dimension.
    pub fn visit_load(&self, location: Location, dimension: usize) -> LoadSegment {
        if self.is_depot(location) {
            LoadSegment::default()
        } else {
            let client = self.client(location);
            LoadSegment::new(client.delivery[dimension], client.pickup[dimension])
        }
    }
}
