#[cfg(test)]
#[path = "../../../tests/unit/models/solution/route_test.rs"]
mod route_test;

use crate::models::common::*;
use crate::models::problem::ProblemData;

/// An immutable snapshot of a single route: the visited locations in order, the vehicle type,
/// and the evaluated route statistics. Reload depot visits partition the route into trips.
#[derive(Clone, Debug)]
pub struct Route {
    vehicle_type: usize,
    visits: Vec<Location>,
    start_depot: Location,
    end_depot: Location,
    distance: Distance,
    duration: Duration,
    time_warp: Duration,
    excess_load: Vec<LoadValue>,
    excess_distance: Distance,
    excess_duration: Duration,
    trip_loads: Vec<Vec<LoadValue>>,
}

impl Route {
    /// Creates a new instance of `Route` for the given vehicle type and visit sequence,
    /// evaluating all route statistics. Visits exclude the start and end depots; reload
    /// depot locations may appear between clients.
    pub fn new(data: &ProblemData, vehicle_type: usize, visits: Vec<Location>) -> Self {
        let vt = data.vehicle_type(vehicle_type);
        let profile = vt.profile;

        let start_tw = shift_window(data.time_window(vt.start_depot), vt.tw);
        let end_tw = shift_window(data.time_window(vt.end_depot), vt.tw);

        let mut segment = DistanceDurationSegment::for_location(0, start_tw, 0);
        let mut last = vt.start_depot;

        let dims = data.num_load_dimensions();
        let mut trip = vec![LoadSegment::default(); dims];
        let mut excess_load = vec![0; dims];
        let mut trip_loads = vec![];

        for &visit in visits.iter() {
            segment = segment.merge(
                &data.visit_segment(visit),
                data.distance(profile, last, visit),
                data.duration(profile, last, visit),
            );
            last = visit;

            if data.is_depot(visit) {
                finish_trip(&mut trip, &vt.capacity, &mut excess_load, &mut trip_loads);
            } else {
                for (dim, load) in trip.iter_mut().enumerate() {
                    *load = load.merge(&data.visit_load(visit, dim));
                }
            }
        }

        segment = segment.merge(
            &DistanceDurationSegment::for_location(0, end_tw, 0),
            data.distance(profile, last, vt.end_depot),
            data.duration(profile, last, vt.end_depot),
        );

        if !visits.is_empty() {
            finish_trip(&mut trip, &vt.capacity, &mut excess_load, &mut trip_loads);
        }

        let release_warp = (segment.release_time().saturating_sub(segment.tw_late())).max(0);

        Self {
            vehicle_type,
            visits,
            start_depot: vt.start_depot,
            end_depot: vt.end_depot,
            distance: segment.distance(),
            duration: segment.duration(),
            time_warp: segment.time_warp().saturating_add(release_warp),
            excess_load,
            excess_distance: (segment.distance() - vt.max_distance).max(0),
            excess_duration: (segment.duration() - vt.max_duration).max(0),
            trip_loads,
        }
    }

    /// Returns the vehicle type index.
    pub fn vehicle_type(&self) -> usize {
        self.vehicle_type
    }

    /// Returns the visited locations, excluding the start and end depots.
    pub fn visits(&self) -> &[Location] {
        &self.visits
    }

    /// Returns the start depot location.
    pub fn start_depot(&self) -> Location {
        self.start_depot
    }

    /// Returns the end depot location.
    pub fn end_depot(&self) -> Location {
        self.end_depot
    }

    /// Returns an iterator over the visited client locations, skipping reload depots.
    pub fn clients<'a>(&'a self, data: &'a ProblemData) -> impl Iterator<Item = Location> + 'a {
        self.visits.iter().copied().filter(move |&visit| !data.is_depot(visit))
    }

    /// Returns total travel distance.
    pub fn distance(&self) -> Distance {
        self.distance
    }

    /// Returns total route duration: travel, service, and unavoidable waiting.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Returns total time warp, including lateness forced by release times.
    pub fn time_warp(&self) -> Duration {
        self.time_warp
    }

    /// Returns excess load per dimension, summed over trips.
    pub fn excess_load(&self) -> &[LoadValue] {
        &self.excess_load
    }

    /// Returns the amount by which the route exceeds its maximum distance.
    pub fn excess_distance(&self) -> Distance {
        self.excess_distance
    }

    /// Returns the amount by which the route exceeds its maximum duration.
    pub fn excess_duration(&self) -> Duration {
        self.excess_duration
    }

    /// Returns the maximum load carried per trip and dimension.
    pub fn trip_loads(&self) -> &[Vec<LoadValue>] {
        &self.trip_loads
    }

    /// Returns the trip partition: the visited clients of each trip in order.
    pub fn trips<'a>(&'a self, data: &'a ProblemData) -> impl Iterator<Item = &'a [Location]> + 'a {
        self.visits.split(move |&visit| data.is_depot(visit))
    }

    /// Returns number of trips.
    pub fn num_trips(&self) -> usize {
        self.trip_loads.len()
    }

    /// Checks whether the route violates none of its constraints.
    pub fn is_feasible(&self) -> bool {
        self.time_warp == 0
            && self.excess_distance == 0
            && self.excess_duration == 0
            && self.excess_load.iter().all(|&excess| excess == 0)
    }

    /// Checks whether the route serves no clients.
    pub fn is_empty(&self) -> bool {
        self.visits.is_empty()
    }
}

fn finish_trip(
    trip: &mut [LoadSegment],
    capacity: &[LoadValue],
    excess_load: &mut [LoadValue],
    trip_loads: &mut Vec<Vec<LoadValue>>,
) {
    trip_loads.push(trip.iter().map(|load| load.load()).collect());

    for (dim, load) in trip.iter_mut().enumerate() {
        excess_load[dim] += load.excess(capacity[dim]);
        *load = LoadSegment::default();
    }
}

/// Intersects a depot window with the vehicle shift window. An empty intersection collapses
/// to its earliest point, which converts the conflict into time warp.
fn shift_window(depot: TimeWindow, shift: TimeWindow) -> TimeWindow {
    let early = depot.early.max(shift.early);
    let late = depot.late.min(shift.late);

    TimeWindow::new(early, late.max(early))
}
