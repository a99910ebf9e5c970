#[cfg(test)]
#[path = "../../tests/unit/search/local_search_test.rs"]
mod local_search_test;

use crate::models::common::*;
use crate::models::problem::ProblemData;
use crate::models::solution::{Route as SolutionRoute, Solution};
use crate::search::node_ops::{Move, NODE_OPERATORS};
use crate::search::route::{Piece, Route, Tail};
use crate::search::route_ops::ROUTE_OPERATORS;
use crate::solver::CostEvaluator;
use crate::utils::Random;
use std::sync::Arc;

/// Move acceptance mode of the descent.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SearchMode {
    /// Applies the first strictly improving move found for a client.
    FirstImprovement,
    /// Applies the best strictly improving move over all operators and neighbours of a
    /// client.
    BestImprovement,
}

/// A granular neighbourhood descent. Holds one mutable route per vehicle; solutions are
/// loaded into the routes, improved to a local optimum, and exported as immutable snapshots.
pub struct LocalSearch {
    data: Arc<ProblemData>,
    neighbours: Vec<Vec<Location>>,
    mode: SearchMode,
    random: Arc<dyn Random>,
    routes: Vec<Route>,
    client_pos: Vec<Option<(usize, usize)>>,
}

impl LocalSearch {
    /// Creates a new instance of `LocalSearch` over the given neighbour lists.
    pub fn new(
        data: Arc<ProblemData>,
        random: Arc<dyn Random>,
        neighbours: Vec<Vec<Location>>,
        mode: SearchMode,
    ) -> Self {
        let routes = (0..data.num_vehicle_types())
            .flat_map(|vehicle_type| {
                (0..data.vehicle_type(vehicle_type).num_available).map(move |_| vehicle_type)
            })
            .enumerate()
            .map(|(idx, vehicle_type)| Route::new(data.clone(), idx, vehicle_type))
            .collect();

        let client_pos = vec![None; data.num_locations()];

        Self { data, neighbours, mode, random, routes, client_pos }
    }

    /// Improves the given solution until no operator finds a strictly improving move, and
    /// returns the resulting locally optimal solution. A locally optimal input is returned
    /// unchanged.
    pub fn search(&mut self, solution: &Solution, evaluator: &CostEvaluator) -> Solution {
        self.load(solution, evaluator);

        let mut order: Vec<Location> = self.data.client_locations().collect();
        self.random.shuffle(&mut order);

        loop {
            let mut improved = false;

            for &client in order.iter() {
                improved |= match self.client_pos[client] {
                    Some(_) => self.improve_client(client, evaluator),
                    None => self.try_insert(client, evaluator, false),
                };
            }

            improved |= self.route_pairs_pass(evaluator);

            if !improved {
                break;
            }
        }

        self.export()
    }

    fn load(&mut self, solution: &Solution, evaluator: &CostEvaluator) {
        let mut free: Vec<usize> = (0..self.routes.len()).collect();

        for route in self.routes.iter_mut() {
            route.set_visits(vec![]);
        }

        for route in solution.routes() {
            let slot = free
                .iter()
                .position(|&idx| self.routes[idx].vehicle_type() == route.vehicle_type())
                .expect("solution uses more vehicles than available");
            let slot = free.swap_remove(slot);

            self.routes[slot].set_visits(route.visits().to_vec());
        }

        for route in self.routes.iter_mut() {
            route.update();
        }
        self.rebuild_positions();

        // Required clients must be part of the search state; insert them at their best
        // position even when that makes matters worse.
        let required: Vec<Location> = solution
            .unassigned()
            .iter()
            .copied()
            .filter(|&client| self.data.client(client).required)
            .collect();

        for client in required {
            self.try_insert(client, evaluator, true);
        }
    }

    fn export(&self) -> Solution {
        let routes = self
            .routes
            .iter()
            .filter(|route| !route.is_empty())
            .map(|route| {
                let visits = normalise(&self.data, route.visits().to_vec());
                SolutionRoute::new(&self.data, route.vehicle_type(), visits)
            })
            .collect();

        Solution::new(&self.data, routes)
    }

    fn rebuild_positions(&mut self) {
        self.client_pos.iter_mut().for_each(|entry| *entry = None);

        for route in self.routes.iter() {
            for pos in 1..=route.len() {
                let location = route.node(pos);
                if !self.data.is_depot(location) {
                    self.client_pos[location] = Some((route.index(), pos));
                }
            }
        }
    }

    fn apply(&mut self, mv: Move) {
        for (idx, visits) in mv.changes {
            self.routes[idx].set_visits(visits);
            self.routes[idx].update();
        }

        self.rebuild_positions();
    }

    /// Evaluates all moves for an assigned client and applies one according to the mode.
    fn improve_client(&mut self, client: Location, evaluator: &CostEvaluator) -> bool {
        let mv = self.find_move(client, evaluator);

        match mv {
            Some(mv) => {
                self.apply(mv);
                true
            }
            None => false,
        }
    }

    fn find_move(&self, client: Location, evaluator: &CostEvaluator) -> Option<Move> {
        let u = self.client_pos[client].expect("client is not assigned");
        let mut best: Option<Move> = None;

        let consider = |best: &mut Option<Move>, candidate: Option<Move>| -> bool {
            if let Some(mv) = candidate {
                let better = best.as_ref().map_or(true, |cur| mv.delta < cur.delta);
                if better {
                    *best = Some(mv);
                }

                matches!(self.mode, SearchMode::FirstImprovement)
            } else {
                false
            }
        };

        for op in NODE_OPERATORS {
            for &neighbour in self.neighbours[client].iter() {
                let Some(v) = self.client_pos[neighbour] else {
                    continue;
                };

                if consider(&mut best, op.evaluate(&self.routes, u, v, evaluator)) {
                    return best;
                }
            }
        }

        if consider(&mut best, self.relocate_into_empty(u, evaluator)) {
            return best;
        }

        if consider(&mut best, self.reload_moves(u, evaluator)) {
            return best;
        }

        if consider(&mut best, self.remove_optional(client, u, evaluator)) {
            return best;
        }

        best
    }

    /// Tries to relocate the client into the first empty route of each vehicle type.
    fn relocate_into_empty(&self, u: (usize, usize), evaluator: &CostEvaluator) -> Option<Move> {
        let (ru, pu) = u;
        let r1 = &self.routes[ru];
        let mut seen = vec![false; self.data.num_vehicle_types()];
        let mut best: Option<Move> = None;

        for route in self.routes.iter() {
            if !route.is_empty() || std::mem::replace(&mut seen[route.vehicle_type()], true) {
                continue;
            }

            let new_cost = route
                .eval_candidate(0, &[Piece::Span(r1, pu, pu)], Tail::Own(1), evaluator)
                .saturating_add(r1.eval_candidate(pu - 1, &[], Tail::Own(pu + 1), evaluator));
            let old_cost = r1.penalised_cost(evaluator);

            if new_cost < old_cost && best.as_ref().map_or(true, |mv| new_cost - old_cost < mv.delta) {
                best = Some(Move {
                    delta: new_cost - old_cost,
                    changes: vec![
                        (route.index(), route.materialise(0, &[Piece::Span(r1, pu, pu)], Tail::Own(1))),
                        (ru, r1.materialise(pu - 1, &[], Tail::Own(pu + 1))),
                    ],
                });
            }
        }

        best
    }

    /// Evaluates inserting a reload depot next to the client and removing reload depots
    /// adjacent to it.
    fn reload_moves(&self, u: (usize, usize), evaluator: &CostEvaluator) -> Option<Move> {
        let (ru, pu) = u;
        let route = &self.routes[ru];
        let vt = self.data.vehicle_type(route.vehicle_type());
        let old_cost = route.penalised_cost(evaluator);
        let mut best: Option<Move> = None;

        let consider = |best: &mut Option<Move>, prefix: usize, pieces: &[Piece<'_>], tail: Tail<'_>| {
            let new_cost = route.eval_candidate(prefix, pieces, tail, evaluator);

            if new_cost < old_cost && best.as_ref().map_or(true, |mv| new_cost - old_cost < mv.delta) {
                *best = Some(Move {
                    delta: new_cost - old_cost,
                    changes: vec![(ru, route.materialise(prefix, pieces, tail))],
                });
            }
        };

        if route.num_reloads() < vt.max_reloads {
            for &depot in vt.reload_depots.iter() {
                // Before and after the client, skipping positions already next to a depot.
                if !route.is_depot_node(pu - 1) {
                    consider(&mut best, pu - 1, &[Piece::Loc(depot)], Tail::Own(pu));
                }
                if !route.is_depot_node(pu + 1) {
                    consider(&mut best, pu, &[Piece::Loc(depot)], Tail::Own(pu + 1));
                }
            }
        }

        for pos in [pu - 1, pu + 1] {
            if pos >= 1 && pos <= route.len() && route.is_depot_node(pos) {
                consider(&mut best, pos - 1, &[], Tail::Own(pos + 1));
            }
        }

        best
    }

    /// Evaluates removing an optional client, trading its route savings against its prize.
    fn remove_optional(&self, client: Location, u: (usize, usize), evaluator: &CostEvaluator) -> Option<Move> {
        if self.data.client(client).required {
            return None;
        }

        let (ru, pu) = u;
        let route = &self.routes[ru];

        let new_cost = route.eval_candidate(pu - 1, &[], Tail::Own(pu + 1), evaluator);
        let delta = new_cost
            .saturating_sub(route.penalised_cost(evaluator))
            .saturating_add(self.data.client(client).prize);

        if delta < 0 {
            Some(Move { delta, changes: vec![(ru, route.materialise(pu - 1, &[], Tail::Own(pu + 1)))] })
        } else {
            None
        }
    }

    /// Tries to insert an unassigned client. With `force` set the cheapest position is used
    /// regardless of the cost change; otherwise the insertion must beat the client's prize.
    fn try_insert(&mut self, client: Location, evaluator: &CostEvaluator, force: bool) -> bool {
        if self.group_blocked(client) {
            return false;
        }

        let mut best: Option<(Cost, usize, usize)> = None;

        {
            let positions = self.insert_positions(client, force);

            for (route_idx, after) in positions {
                let route = &self.routes[route_idx];
                let pieces = [Piece::Loc(client)];
                let new_cost = route.eval_candidate(after, &pieces, Tail::Own(after + 1), evaluator);

                if new_cost == Cost::MAX {
                    continue;
                }

                let delta = new_cost.saturating_sub(route.penalised_cost(evaluator));
                if best.map_or(true, |(cost, ..)| delta < cost) {
                    best = Some((delta, route_idx, after));
                }
            }
        }

        let Some((delta, route_idx, after)) = best else {
            return false;
        };

        // An optional client is only worth serving when the detour is cheaper than its
        // prize; required clients are inserted no matter what.
        if !force && delta >= self.data.client(client).prize {
            return false;
        }

        let route_len = self.routes[route_idx].len();
        self.routes[route_idx].insert(after.min(route_len) + 1, client);
        self.routes[route_idx].update();
        self.rebuild_positions();

        true
    }

    fn insert_positions(&self, client: Location, all: bool) -> Vec<(usize, usize)> {
        if all {
            return self
                .routes
                .iter()
                .filter(|route| self.data.vehicle_type_allowed(client, route.vehicle_type()))
                .flat_map(|route| (0..=route.len()).map(move |after| (route.index(), after)))
                .collect();
        }

        let mut positions = vec![];
        let mut seen = vec![false; self.data.num_vehicle_types()];

        for &neighbour in self.neighbours[client].iter() {
            if let Some((route_idx, pos)) = self.client_pos[neighbour] {
                positions.push((route_idx, pos));
                positions.push((route_idx, pos - 1));
            }
        }

        for route in self.routes.iter() {
            if route.is_empty() && !std::mem::replace(&mut seen[route.vehicle_type()], true) {
                positions.push((route.index(), 0));
            }
        }

        positions
    }

    fn group_blocked(&self, client: Location) -> bool {
        self.data.client(client).group.map_or(false, |group| {
            self.data
                .group(group)
                .clients
                .iter()
                .any(|&member| member != client && self.client_pos[member].is_some())
        })
    }

    fn route_pairs_pass(&mut self, evaluator: &CostEvaluator) -> bool {
        let mut improved = false;

        for first in 0..self.routes.len() {
            for second in 0..self.routes.len() {
                if first == second
                    || self.routes[first].is_empty()
                    || self.routes[second].is_empty()
                    || !self.share_neighbourhood(first, second)
                {
                    continue;
                }

                for op in ROUTE_OPERATORS {
                    let mv = op.evaluate(&self.routes, first, second, evaluator);

                    if let Some(mv) = mv {
                        self.apply(mv);
                        improved = true;
                    }
                }
            }
        }

        improved
    }

    /// Checks whether some client of the first route has a granular neighbour served by the
    /// second route.
    fn share_neighbourhood(&self, first: usize, second: usize) -> bool {
        self.routes[first].visits().iter().any(|&client| {
            !self.data.is_depot(client)
                && self.neighbours[client].iter().any(|&neighbour| {
                    self.client_pos[neighbour].map_or(false, |(route_idx, _)| route_idx == second)
                })
        })
    }
}

/// Drops pointless reload depot visits: leading, trailing, and consecutive depots.
fn normalise(data: &ProblemData, visits: Vec<Location>) -> Vec<Location> {
    let mut out: Vec<Location> = Vec::with_capacity(visits.len());

    for location in visits {
        if data.is_depot(location) && out.last().map_or(true, |&last| data.is_depot(last)) {
            continue;
        }
        out.push(location);
    }

    while out.last().map_or(false, |&last| data.is_depot(last)) {
        out.pop();
    }

    out
}
