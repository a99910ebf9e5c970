#[cfg(test)]
#[path = "../../tests/unit/search/route_test.rs"]
mod route_test;

use crate::models::common::*;
use crate::models::problem::ProblemData;
use crate::solver::CostEvaluator;
use std::sync::Arc;

/// A mutable route used by the local search: the visit sequence of a single vehicle plus
/// cumulative forward/backward segment summaries which make most move evaluations constant
/// time. Mutations mark the route dirty; [`Route::update`] refreshes the caches in one
/// linear pass and must run before the next query.
///
/// Node positions address the conceptual sequence `start depot, visits.., end depot`:
/// position `0` is the start depot, positions `1..=len` are visits (clients and reload
/// depots), and position `len + 1` is the end depot.
pub struct Route {
    data: Arc<ProblemData>,
    idx: usize,
    vehicle_type: usize,
    visits: Vec<Location>,
    dirty: bool,
    ds_before: Vec<DistanceDurationSegment>,
    ds_after: Vec<DistanceDurationSegment>,
    ls_before: Vec<Vec<LoadSegment>>,
    ls_after: Vec<Vec<LoadSegment>>,
    excess_before: Vec<Vec<LoadValue>>,
    excess_after: Vec<Vec<LoadValue>>,
    reloads_before: Vec<usize>,
}

/// A contiguous part of a candidate visit sequence used to evaluate a tentative move
/// without applying it.
#[derive(Clone, Copy)]
pub(crate) enum Piece<'a> {
    /// Visit nodes `start..=end` of the given route, in order.
    Span(&'a Route, usize, usize),
    /// Visit nodes `start..=end` of the given route, reversed.
    Rev(&'a Route, usize, usize),
    /// A single location which is not part of any route, e.g. an unassigned client or a
    /// reload depot to insert.
    Loc(Location),
}

/// The tail of a candidate visit sequence.
#[derive(Clone, Copy)]
pub(crate) enum Tail<'a> {
    /// The evaluated route's own suffix from the given node position, end depot included.
    Own(usize),
    /// Another route's visit suffix from the given node position; the evaluated route
    /// keeps its own end depot.
    Other(&'a Route, usize),
}

impl Route {
    /// Creates a new empty instance of `Route` for the given vehicle type.
    pub fn new(data: Arc<ProblemData>, idx: usize, vehicle_type: usize) -> Self {
        let mut route = Self {
            data,
            idx,
            vehicle_type,
            visits: vec![],
            dirty: true,
            ds_before: vec![],
            ds_after: vec![],
            ls_before: vec![],
            ls_after: vec![],
            excess_before: vec![],
            excess_after: vec![],
            reloads_before: vec![],
        };
        route.update();

        route
    }

    /// Returns the route index within the search.
    pub fn index(&self) -> usize {
        self.idx
    }

    /// Returns the vehicle type index.
    pub fn vehicle_type(&self) -> usize {
        self.vehicle_type
    }

    /// Returns number of visits, reload depots included.
    pub fn len(&self) -> usize {
        self.visits.len()
    }

    /// Checks whether the route serves no visits.
    pub fn is_empty(&self) -> bool {
        self.visits.is_empty()
    }

    /// Returns the visit sequence, depot endpoints excluded.
    pub fn visits(&self) -> &[Location] {
        &self.visits
    }

    /// Returns the location at the given node position.
    pub fn node(&self, pos: usize) -> Location {
        let vt = self.data.vehicle_type(self.vehicle_type);

        if pos == 0 {
            vt.start_depot
        } else if pos == self.visits.len() + 1 {
            vt.end_depot
        } else {
            self.visits[pos - 1]
        }
    }

    /// Checks whether the node at the given position is a depot (endpoint or reload).
    pub fn is_depot_node(&self, pos: usize) -> bool {
        self.data.is_depot(self.node(pos))
    }

    /// Inserts a visit at the given node position, shifting later visits.
    pub fn insert(&mut self, pos: usize, location: Location) {
        debug_assert!((1..=self.visits.len() + 1).contains(&pos));
        self.visits.insert(pos - 1, location);
        self.dirty = true;
    }

    /// Appends a visit at the route end.
    pub fn push(&mut self, location: Location) {
        self.visits.push(location);
        self.dirty = true;
    }

    /// Removes and returns the visit at the given node position.
    pub fn remove(&mut self, pos: usize) -> Location {
        debug_assert!((1..=self.visits.len()).contains(&pos));
        self.dirty = true;
        self.visits.remove(pos - 1)
    }

    /// Swaps the visits at two node positions.
    pub fn swap(&mut self, first: usize, second: usize) {
        debug_assert!((1..=self.visits.len()).contains(&first));
        debug_assert!((1..=self.visits.len()).contains(&second));
        self.visits.swap(first - 1, second - 1);
        self.dirty = true;
    }

    /// Reverses the visit order between two node positions, both inclusive.
    pub fn reverse(&mut self, start: usize, end: usize) {
        debug_assert!(start >= 1 && end <= self.visits.len() && start <= end);
        self.visits[start - 1..end].reverse();
        self.dirty = true;
    }

    /// Replaces the whole visit sequence.
    pub fn set_visits(&mut self, visits: Vec<Location>) {
        self.visits = visits;
        self.dirty = true;
    }

    /// Returns number of reload depot visits.
    pub fn num_reloads(&self) -> usize {
        debug_assert!(!self.dirty);
        self.reloads_before[self.visits.len() + 1]
    }

    /// Returns total travel distance.
    pub fn distance(&self) -> Distance {
        debug_assert!(!self.dirty);
        self.ds_before[self.visits.len() + 1].distance()
    }

    /// Returns total route duration: travel, service, and unavoidable waiting.
    pub fn duration(&self) -> Duration {
        debug_assert!(!self.dirty);
        self.ds_before[self.visits.len() + 1].duration()
    }

    /// Returns total time warp, release time lateness included.
    pub fn time_warp(&self) -> Duration {
        debug_assert!(!self.dirty);
        let segment = &self.ds_before[self.visits.len() + 1];
        let release_warp = (segment.release_time().saturating_sub(segment.tw_late())).max(0);

        segment.time_warp().saturating_add(release_warp)
    }

    /// Returns excess load per dimension, summed over trips.
    pub fn excess_load(&self) -> &[LoadValue] {
        debug_assert!(!self.dirty);
        &self.excess_before[self.visits.len() + 1]
    }

    /// Returns the amount by which the route exceeds its maximum distance.
    pub fn excess_distance(&self) -> Distance {
        (self.distance() - self.data.vehicle_type(self.vehicle_type).max_distance).max(0)
    }

    /// Returns the amount by which the route exceeds its maximum duration.
    pub fn excess_duration(&self) -> Duration {
        (self.duration() - self.data.vehicle_type(self.vehicle_type).max_duration).max(0)
    }

    /// Checks whether the route violates none of its constraints.
    pub fn is_feasible(&self) -> bool {
        self.time_warp() == 0
            && self.excess_distance() == 0
            && self.excess_duration() == 0
            && self.excess_load().iter().all(|&excess| excess == 0)
    }

    /// Returns the penalised cost of the route under the given evaluator.
    pub fn penalised_cost(&self, evaluator: &CostEvaluator) -> Cost {
        debug_assert!(!self.dirty);
        let vt = self.data.vehicle_type(self.vehicle_type);

        if self.is_empty() {
            return 0;
        }

        vt.fixed_cost
            .saturating_add(vt.unit_distance_cost.saturating_mul(self.distance()))
            .saturating_add(vt.unit_duration_cost.saturating_mul(self.duration()))
            .saturating_add(evaluator.load_penalty(self.excess_load()))
            .saturating_add(evaluator.tw_penalty(self.time_warp()))
            .saturating_add(evaluator.dist_penalty(self.excess_distance()))
            .saturating_add(evaluator.dur_penalty(self.excess_duration()))
    }

    /// Refreshes all cumulative segment caches in a single forward and backward pass.
    pub fn update(&mut self) {
        let data = self.data.clone();
        let vt = data.vehicle_type(self.vehicle_type);
        let len = self.visits.len();
        let dims = data.num_load_dimensions();

        let start_tw = intersect(data.time_window(vt.start_depot), vt.tw);
        let end_tw = intersect(data.time_window(vt.end_depot), vt.tw);

        let node_segment = |pos: usize| -> DistanceDurationSegment {
            if pos == 0 {
                DistanceDurationSegment::for_location(0, start_tw, 0)
            } else if pos == len + 1 {
                DistanceDurationSegment::for_location(0, end_tw, 0)
            } else {
                data.visit_segment(self.visits[pos - 1])
            }
        };

        self.ds_before = Vec::with_capacity(len + 2);
        self.ds_before.push(node_segment(0));
        for pos in 1..=len + 1 {
            let prev = self.node(pos - 1);
            let next = self.node(pos);
            let merged = self.ds_before[pos - 1].merge(
                &node_segment(pos),
                data.distance(vt.profile, prev, next),
                data.duration(vt.profile, prev, next),
            );
            self.ds_before.push(merged);
        }

        self.ds_after = vec![DistanceDurationSegment::default(); len + 2];
        self.ds_after[len + 1] = node_segment(len + 1);
        for pos in (0..=len).rev() {
            let from = self.node(pos);
            let to = self.node(pos + 1);
            self.ds_after[pos] = node_segment(pos).merge(
                &self.ds_after[pos + 1],
                data.distance(vt.profile, from, to),
                data.duration(vt.profile, from, to),
            );
        }

        self.ls_before = Vec::with_capacity(len + 2);
        self.excess_before = Vec::with_capacity(len + 2);
        self.reloads_before = Vec::with_capacity(len + 2);
        self.ls_before.push(vec![LoadSegment::default(); dims]);
        self.excess_before.push(vec![0; dims]);
        self.reloads_before.push(0);

        for pos in 1..=len + 1 {
            let location = self.node(pos);
            let is_reload = pos <= len && data.is_depot(location);
            self.reloads_before.push(self.reloads_before[pos - 1] + usize::from(is_reload));

            if data.is_depot(location) || pos == len + 1 {
                let excess = (0..dims)
                    .map(|dim| {
                        self.excess_before[pos - 1][dim] + self.ls_before[pos - 1][dim].excess(vt.capacity[dim])
                    })
                    .collect();
                self.excess_before.push(excess);
                self.ls_before.push(vec![LoadSegment::default(); dims]);
            } else {
                self.excess_before.push(self.excess_before[pos - 1].clone());
                let merged = (0..dims)
                    .map(|dim| self.ls_before[pos - 1][dim].merge(&data.visit_load(location, dim)))
                    .collect();
                self.ls_before.push(merged);
            }
        }

        self.ls_after = vec![vec![LoadSegment::default(); dims]; len + 2];
        self.excess_after = vec![vec![0; dims]; len + 2];

        for pos in (0..=len).rev() {
            let boundary = self.is_depot_node(pos + 1);

            let carried_ls: Vec<_> = if boundary {
                vec![LoadSegment::default(); dims]
            } else {
                self.ls_after[pos + 1].clone()
            };
            let carried_excess: Vec<_> = (0..dims)
                .map(|dim| {
                    if boundary {
                        self.ls_after[pos + 1][dim].excess(vt.capacity[dim]) + self.excess_after[pos + 1][dim]
                    } else {
                        self.excess_after[pos + 1][dim]
                    }
                })
                .collect();

            let location = self.node(pos);
            self.ls_after[pos] = if data.is_depot(location) {
                carried_ls
            } else {
                (0..dims).map(|dim| data.visit_load(location, dim).merge(&carried_ls[dim])).collect()
            };
            self.excess_after[pos] = carried_excess;
        }

        self.dirty = false;
    }

    /// Evaluates the penalised cost of a candidate route made of this route's node prefix
    /// `0..=prefix`, the given middle pieces, and the given tail. Returns `Cost::MAX` when
    /// the candidate is structurally impossible (too many reloads, disallowed client).
    pub(crate) fn eval_candidate(
        &self,
        prefix: usize,
        pieces: &[Piece<'_>],
        tail: Tail<'_>,
        evaluator: &CostEvaluator,
    ) -> Cost {
        debug_assert!(!self.dirty);
        let data = &self.data;
        let vt = data.vehicle_type(self.vehicle_type);
        let dims = data.num_load_dimensions();

        let mut ds = self.ds_before[prefix];
        let mut trip = self.ls_before[prefix].clone();
        let mut excess = self.excess_before[prefix].clone();
        let mut reloads = self.reloads_before[prefix];
        let mut last = self.node(prefix);
        let mut has_visits = prefix > 0;

        let append = |ds: &mut DistanceDurationSegment,
                          trip: &mut Vec<LoadSegment>,
                          excess: &mut Vec<LoadValue>,
                          reloads: &mut usize,
                          last: &mut Location,
                          location: Location|
         -> bool {
            if data.is_depot(location) {
                // Mid-route depots must be valid reload depots of this vehicle type.
                if !vt.reload_depots.contains(&location) {
                    return false;
                }
            } else if !data.vehicle_type_allowed(location, self.vehicle_type) {
                return false;
            }

            *ds = ds.merge(
                &data.visit_segment(location),
                data.distance(vt.profile, *last, location),
                data.duration(vt.profile, *last, location),
            );
            *last = location;

            if data.is_depot(location) {
                *reloads += 1;
                for dim in 0..dims {
                    excess[dim] += trip[dim].excess(vt.capacity[dim]);
                    trip[dim] = LoadSegment::default();
                }
            } else {
                for dim in 0..dims {
                    trip[dim] = trip[dim].merge(&data.visit_load(location, dim));
                }
            }

            true
        };

        for piece in pieces {
            let ok = match *piece {
                Piece::Loc(location) => {
                    has_visits = true;
                    append(&mut ds, &mut trip, &mut excess, &mut reloads, &mut last, location)
                }
                Piece::Span(route, start, end) => {
                    has_visits = has_visits || start <= end;
                    (start..=end).all(|pos| {
                        append(&mut ds, &mut trip, &mut excess, &mut reloads, &mut last, route.node(pos))
                    })
                }
                Piece::Rev(route, start, end) => {
                    has_visits = has_visits || start <= end;
                    (start..=end).rev().all(|pos| {
                        append(&mut ds, &mut trip, &mut excess, &mut reloads, &mut last, route.node(pos))
                    })
                }
            };

            if !ok {
                return Cost::MAX;
            }
        }

        match tail {
            Tail::Own(pos) => {
                self.merge_cached_tail(self, pos, &mut ds, &trip, &mut excess, &mut reloads, last);
                has_visits = has_visits || pos <= self.len();
            }
            Tail::Other(route, pos) if route.vehicle_type == self.vehicle_type => {
                self.merge_cached_tail(route, pos, &mut ds, &trip, &mut excess, &mut reloads, last);
                has_visits = has_visits || pos <= route.len();
            }
            Tail::Other(route, pos) => {
                has_visits = has_visits || pos <= route.len();
                let ok = (pos..=route.len()).all(|node_pos| {
                    append(&mut ds, &mut trip, &mut excess, &mut reloads, &mut last, route.node(node_pos))
                });
                if !ok {
                    return Cost::MAX;
                }

                let end_tw = intersect(data.time_window(vt.end_depot), vt.tw);
                ds = ds.merge(
                    &DistanceDurationSegment::for_location(0, end_tw, 0),
                    data.distance(vt.profile, last, vt.end_depot),
                    data.duration(vt.profile, last, vt.end_depot),
                );
                for dim in 0..dims {
                    excess[dim] += trip[dim].excess(vt.capacity[dim]);
                }
            }
        }

        if reloads > vt.max_reloads {
            return Cost::MAX;
        }

        if !has_visits {
            return 0;
        }

        let release_warp = (ds.release_time().saturating_sub(ds.tw_late())).max(0);
        let time_warp = ds.time_warp().saturating_add(release_warp);

        vt.fixed_cost
            .saturating_add(vt.unit_distance_cost.saturating_mul(ds.distance()))
            .saturating_add(vt.unit_duration_cost.saturating_mul(ds.duration()))
            .saturating_add(evaluator.load_penalty(&excess))
            .saturating_add(evaluator.tw_penalty(time_warp))
            .saturating_add(evaluator.dist_penalty((ds.distance() - vt.max_distance).max(0)))
            .saturating_add(evaluator.dur_penalty((ds.duration() - vt.max_duration).max(0)))
    }

    /// Builds the visit sequence described by a candidate, for applying an improving move.
    pub(crate) fn materialise(&self, prefix: usize, pieces: &[Piece<'_>], tail: Tail<'_>) -> Vec<Location> {
        let mut visits: Vec<Location> = self.visits[..prefix].to_vec();

        for piece in pieces {
            match *piece {
                Piece::Loc(location) => visits.push(location),
                Piece::Span(route, start, end) => {
                    visits.extend((start..=end).map(|pos| route.node(pos)));
                }
                Piece::Rev(route, start, end) => {
                    visits.extend((start..=end).rev().map(|pos| route.node(pos)));
                }
            }
        }

        match tail {
            Tail::Own(pos) => visits.extend_from_slice(&self.visits[(pos - 1).min(self.len())..]),
            Tail::Other(route, pos) => {
                visits.extend_from_slice(&route.visits[(pos - 1).min(route.len())..])
            }
        }

        visits
    }

    #[allow(clippy::too_many_arguments)]
    fn merge_cached_tail(
        &self,
        source: &Route,
        pos: usize,
        ds: &mut DistanceDurationSegment,
        trip: &[LoadSegment],
        excess: &mut [LoadValue],
        reloads: &mut usize,
        last: Location,
    ) {
        let data = &self.data;
        let vt = data.vehicle_type(self.vehicle_type);
        let dims = data.num_load_dimensions();
        let next = source.node(pos);

        *ds = ds.merge(
            &source.ds_after[pos],
            data.distance(vt.profile, last, next),
            data.duration(vt.profile, last, next),
        );

        let boundary = data.is_depot(next);
        for dim in 0..dims {
            if boundary {
                excess[dim] += trip[dim].excess(vt.capacity[dim])
                    + source.ls_after[pos][dim].excess(vt.capacity[dim])
                    + source.excess_after[pos][dim];
            } else {
                excess[dim] += trip[dim].merge(&source.ls_after[pos][dim]).excess(vt.capacity[dim])
                    + source.excess_after[pos][dim];
            }
        }

        let total = source.reloads_before[source.len() + 1];
        *reloads += total - source.reloads_before[(pos - 1).min(source.len())];
    }
}

/// Intersects a depot window with the vehicle shift window. An empty intersection collapses
/// to its earliest point, which converts the conflict into time warp.
fn intersect(depot: TimeWindow, shift: TimeWindow) -> TimeWindow {
    let early = depot.early.max(shift.early);
    let late = depot.late.min(shift.late);

    TimeWindow::new(early, late.max(early))
}
