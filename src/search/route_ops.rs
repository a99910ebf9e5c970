#[cfg(test)]
#[path = "../../tests/unit/search/route_ops_test.rs"]
mod route_ops_test;

use crate::models::common::*;
use crate::search::node_ops::{assess, Candidate, Move};
use crate::search::route::{Piece, Route, Tail};
use crate::solver::CostEvaluator;

/// Route pair operators, evaluated for pairs of routes whose clients appear in each other's
/// neighbour lists.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RouteOperator {
    /// Best position exchange of one client per route, following the SWAP* theorem: the new
    /// position of a relocated client is either in place of its counterpart or among the
    /// three best insertion positions evaluated beforehand.
    SwapStar,
    /// Relocates the best client of one route into the best of three insertion positions of
    /// the other.
    RelocateStar,
}

/// All route operators in evaluation order.
pub const ROUTE_OPERATORS: [RouteOperator; 2] = [RouteOperator::SwapStar, RouteOperator::RelocateStar];

impl RouteOperator {
    /// Evaluates the operator for a route pair, returning the best strictly improving move.
    pub(crate) fn evaluate(
        &self,
        routes: &[Route],
        first: usize,
        second: usize,
        evaluator: &CostEvaluator,
    ) -> Option<Move> {
        match *self {
            RouteOperator::SwapStar => swap_star(routes, first, second, evaluator),
            RouteOperator::RelocateStar => relocate_star(routes, first, second, evaluator),
        }
    }
}

const TOP_POSITIONS: usize = 3;

fn client_positions(route: &Route) -> Vec<usize> {
    (1..=route.len()).filter(|&pos| !route.is_depot_node(pos)).collect()
}

/// Returns the insertion positions of `donor[donor_pos]` into `target` with the lowest
/// candidate cost, at most [`TOP_POSITIONS`] of them.
fn top_insert_positions(
    target: &Route,
    donor: &Route,
    donor_pos: usize,
    evaluator: &CostEvaluator,
) -> Vec<usize> {
    let mut costs: Vec<(Cost, usize)> = (0..=target.len())
        .map(|after| {
            let pieces = [Piece::Span(donor, donor_pos, donor_pos)];
            (target.eval_candidate(after, &pieces, Tail::Own(after + 1), evaluator), after)
        })
        .collect();

    costs.sort();
    costs.truncate(TOP_POSITIONS);

    costs.into_iter().filter(|&(cost, _)| cost < Cost::MAX).map(|(_, after)| after).collect()
}

/// Builds a candidate for `route` with the visit at `remove_pos` removed and the donor's
/// visit inserted after position `insert_after`.
fn removal_insert_candidate<'a>(
    route: &'a Route,
    remove_pos: usize,
    insert_after: usize,
    donor: &'a Route,
    donor_pos: usize,
) -> Candidate<'a> {
    let piece = Piece::Span(donor, donor_pos, donor_pos);

    if insert_after < remove_pos {
        Candidate {
            route,
            prefix: insert_after,
            pieces: vec![piece, Piece::Span(route, insert_after + 1, remove_pos - 1)],
            tail: Tail::Own(remove_pos + 1),
        }
    } else {
        Candidate {
            route,
            prefix: remove_pos - 1,
            pieces: vec![Piece::Span(route, remove_pos + 1, insert_after), piece],
            tail: Tail::Own(insert_after + 1),
        }
    }
}

fn swap_star(routes: &[Route], first: usize, second: usize, evaluator: &CostEvaluator) -> Option<Move> {
    let r1 = &routes[first];
    let r2 = &routes[second];

    let first_clients = client_positions(r1);
    let second_clients = client_positions(r2);

    if first_clients.is_empty() || second_clients.is_empty() {
        return None;
    }

    let old_cost = r1.penalised_cost(evaluator).saturating_add(r2.penalised_cost(evaluator));

    let top_in_second: Vec<Vec<usize>> =
        first_clients.iter().map(|&pu| top_insert_positions(r2, r1, pu, evaluator)).collect();
    let top_in_first: Vec<Vec<usize>> =
        second_clients.iter().map(|&pv| top_insert_positions(r1, r2, pv, evaluator)).collect();

    let mut best: Option<(Cost, Candidate<'_>, Candidate<'_>)> = None;

    for (u_idx, &pu) in first_clients.iter().enumerate() {
        for (v_idx, &pv) in second_clients.iter().enumerate() {
            let u_best = best_placement(r2, pv, r1, pu, &top_in_second[u_idx], evaluator);
            let v_best = best_placement(r1, pu, r2, pv, &top_in_first[v_idx], evaluator);

            let (Some((u_cost, u_after)), Some((v_cost, v_after))) = (u_best, v_best) else {
                continue;
            };

            let new_cost = u_cost.saturating_add(v_cost);
            if new_cost < old_cost && best.as_ref().map_or(true, |(cost, ..)| new_cost < *cost) {
                best = Some((
                    new_cost,
                    removal_insert_candidate(r2, pv, u_after, r1, pu),
                    removal_insert_candidate(r1, pu, v_after, r2, pv),
                ));
            }
        }
    }

    let (_, second_candidate, first_candidate) = best?;

    assess(vec![second_candidate, first_candidate], evaluator)
}

/// Returns the cheapest candidate cost and insertion position for placing `donor[donor_pos]`
/// into `target` with the visit at `remove_pos` taken out. Considered positions are the
/// removed visit's place and the precomputed top positions.
fn best_placement(
    target: &Route,
    remove_pos: usize,
    donor: &Route,
    donor_pos: usize,
    top_positions: &[usize],
    evaluator: &CostEvaluator,
) -> Option<(Cost, usize)> {
    std::iter::once(remove_pos)
        .chain(top_positions.iter().copied())
        .map(|after| {
            let candidate = removal_insert_candidate(target, remove_pos, after, donor, donor_pos);
            let cost = candidate.route.eval_candidate(candidate.prefix, &candidate.pieces, candidate.tail, evaluator);
            (cost, after)
        })
        .filter(|&(cost, _)| cost < Cost::MAX)
        .min()
}

fn relocate_star(routes: &[Route], first: usize, second: usize, evaluator: &CostEvaluator) -> Option<Move> {
    let r1 = &routes[first];
    let r2 = &routes[second];

    let old_cost = r1.penalised_cost(evaluator).saturating_add(r2.penalised_cost(evaluator));

    let mut best: Option<(Cost, usize, usize)> = None;

    for pu in client_positions(r1) {
        for after in top_insert_positions(r2, r1, pu, evaluator) {
            let insert_cost = {
                let pieces = [Piece::Span(r1, pu, pu)];
                r2.eval_candidate(after, &pieces, Tail::Own(after + 1), evaluator)
            };
            let removal_cost = r1.eval_candidate(pu - 1, &[], Tail::Own(pu + 1), evaluator);

            let new_cost = insert_cost.saturating_add(removal_cost);
            if new_cost < old_cost && best.map_or(true, |(cost, ..)| new_cost < cost) {
                best = Some((new_cost, pu, after));
            }
        }
    }

    let (_, pu, after) = best?;

    assess(
        vec![
            Candidate {
                route: r2,
                prefix: after,
                pieces: vec![Piece::Span(r1, pu, pu)],
                tail: Tail::Own(after + 1),
            },
            Candidate { route: r1, prefix: pu - 1, pieces: vec![], tail: Tail::Own(pu + 1) },
        ],
        evaluator,
    )
}
