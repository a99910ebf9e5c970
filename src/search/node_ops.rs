#[cfg(test)]
#[path = "../../tests/unit/search/node_ops_test.rs"]
mod node_ops_test;

use crate::models::common::*;
use crate::search::route::{Piece, Route, Tail};
use crate::solver::CostEvaluator;

/// A move descriptor: the signed penalised cost change and the resulting visit sequences of
/// the affected routes. Only strictly improving moves are ever produced.
pub(crate) struct Move {
    /// Signed objective change, negative for improvements.
    pub delta: Cost,
    /// New visit sequences, one entry per affected route index.
    pub changes: Vec<(usize, Vec<Location>)>,
}

/// A closed set of node operators evaluated for each directed client pair `(u, v)` with `v`
/// in the granular neighbourhood of `u`. The tagged variant keeps the hot loop free of
/// dynamic dispatch and allows exhaustive reasoning over the move set.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NodeOperator {
    /// Relocates `u` after `v`.
    Relocate,
    /// Relocates the segment `(u, succ(u))` after `v`.
    RelocatePair,
    /// Relocates the segment `(u, succ(u))` reversed after `v`.
    RelocateReversedPair,
    /// Swaps `u` with `v`.
    Swap,
    /// Swaps the segment `(u, succ(u))` with `v`.
    SwapPairWithSingle,
    /// Swaps the segment `(u, succ(u))` with `(v, succ(v))`.
    SwapPairWithPair,
    /// Reverses the segment between `u` and `v` within one route.
    TwoOpt,
    /// Exchanges the route tails after `u` and after `v` across two routes.
    SwapTails,
}

/// All node operators in evaluation order.
pub const NODE_OPERATORS: [NodeOperator; 8] = [
    NodeOperator::Relocate,
    NodeOperator::RelocatePair,
    NodeOperator::RelocateReversedPair,
    NodeOperator::Swap,
    NodeOperator::SwapPairWithSingle,
    NodeOperator::SwapPairWithPair,
    NodeOperator::TwoOpt,
    NodeOperator::SwapTails,
];

/// A candidate route produced by a tentative move.
pub(crate) struct Candidate<'a> {
    /// The route whose vehicle evaluates the candidate sequence.
    pub route: &'a Route,
    /// Length of the kept visit prefix.
    pub prefix: usize,
    /// Middle pieces of the candidate sequence.
    pub pieces: Vec<Piece<'a>>,
    /// Tail of the candidate sequence.
    pub tail: Tail<'a>,
}

impl NodeOperator {
    /// Evaluates the operator for clients `u` and `v` given as `(route index, node
    /// position)` pairs. Returns a move exactly when it strictly improves the penalised
    /// cost.
    pub(crate) fn evaluate(
        &self,
        routes: &[Route],
        u: (usize, usize),
        v: (usize, usize),
        evaluator: &CostEvaluator,
    ) -> Option<Move> {
        let (ru, pu) = u;
        let (rv, pv) = v;
        let r1 = &routes[ru];
        let r2 = &routes[rv];

        let candidates = match *self {
            NodeOperator::Relocate => relocate_segment(r1, pu, pu, r2, pv, false)?,
            NodeOperator::RelocatePair => {
                if !is_client_segment(r1, pu, pu + 1) || overlaps(u, v, 1) {
                    return None;
                }
                relocate_segment(r1, pu, pu + 1, r2, pv, false)?
            }
            NodeOperator::RelocateReversedPair => {
                if !is_client_segment(r1, pu, pu + 1) || overlaps(u, v, 1) {
                    return None;
                }
                relocate_segment(r1, pu, pu + 1, r2, pv, true)?
            }
            NodeOperator::Swap => swap_segments(r1, pu, 0, r2, pv, 0)?,
            NodeOperator::SwapPairWithSingle => {
                if !is_client_segment(r1, pu, pu + 1) || overlaps(u, v, 1) {
                    return None;
                }
                swap_segments(r1, pu, 1, r2, pv, 0)?
            }
            NodeOperator::SwapPairWithPair => {
                if !is_client_segment(r1, pu, pu + 1) || !is_client_segment(r2, pv, pv + 1) {
                    return None;
                }
                swap_segments(r1, pu, 1, r2, pv, 1)?
            }
            NodeOperator::TwoOpt => {
                if ru != rv || pu >= pv {
                    return None;
                }
                vec![Candidate { route: r1, prefix: pu - 1, pieces: vec![Piece::Rev(r1, pu, pv)], tail: Tail::Own(pv + 1) }]
            }
            NodeOperator::SwapTails => {
                if ru == rv {
                    return None;
                }
                vec![
                    Candidate { route: r1, prefix: pu, pieces: vec![], tail: Tail::Other(r2, pv + 1) },
                    Candidate { route: r2, prefix: pv, pieces: vec![], tail: Tail::Other(r1, pu + 1) },
                ]
            }
        };

        assess(candidates, evaluator)
    }
}

/// Evaluates candidates against the current routes and materialises the move when it is a
/// strict improvement.
pub(crate) fn assess(candidates: Vec<Candidate<'_>>, evaluator: &CostEvaluator) -> Option<Move> {
    let mut new_cost = 0i64;
    let mut old_cost = 0i64;

    for candidate in candidates.iter() {
        new_cost = new_cost.saturating_add(candidate.route.eval_candidate(
            candidate.prefix,
            &candidate.pieces,
            candidate.tail,
            evaluator,
        ));
        old_cost = old_cost.saturating_add(candidate.route.penalised_cost(evaluator));
    }

    if new_cost >= old_cost {
        return None;
    }

    let changes = candidates
        .into_iter()
        .map(|candidate| {
            (candidate.route.index(), candidate.route.materialise(candidate.prefix, &candidate.pieces, candidate.tail))
        })
        .collect();

    Some(Move { delta: new_cost - old_cost, changes })
}

/// Checks that the positions form a client-only segment within route bounds.
fn is_client_segment(route: &Route, start: usize, end: usize) -> bool {
    end <= route.len() && (start..=end).all(|pos| !route.is_depot_node(pos))
}

/// Checks whether `v` lies within the segment of the given half width starting at `u`.
fn overlaps(u: (usize, usize), v: (usize, usize), width: usize) -> bool {
    u.0 == v.0 && v.1 >= u.1 && v.1 <= u.1 + width
}

/// Builds candidates which relocate the segment `start..=end` of `r1` directly after
/// position `pv` of `r2`, optionally reversed.
fn relocate_segment<'a>(
    r1: &'a Route,
    start: usize,
    end: usize,
    r2: &'a Route,
    pv: usize,
    reversed: bool,
) -> Option<Vec<Candidate<'a>>> {
    let piece = if reversed { Piece::Rev(r1, start, end) } else { Piece::Span(r1, start, end) };

    if r1.index() == r2.index() {
        if pv >= start - 1 && pv <= end {
            // Inserting a segment inside or directly before itself is a no-op (unless the
            // reversal changes the order).
            if !(reversed && pv == start - 1 && end > start) {
                return None;
            }
        }

        let candidate = if pv > end {
            Candidate {
                route: r1,
                prefix: start - 1,
                pieces: vec![Piece::Span(r1, end + 1, pv), piece],
                tail: Tail::Own(pv + 1),
            }
        } else {
            Candidate {
                route: r1,
                prefix: pv,
                pieces: vec![piece, Piece::Span(r1, pv + 1, start - 1)],
                tail: Tail::Own(end + 1),
            }
        };

        Some(vec![candidate])
    } else {
        Some(vec![
            Candidate { route: r2, prefix: pv, pieces: vec![piece], tail: Tail::Own(pv + 1) },
            Candidate { route: r1, prefix: start - 1, pieces: vec![], tail: Tail::Own(end + 1) },
        ])
    }
}

/// Builds candidates which swap the segment `pu..=pu+wu` of `r1` with the segment
/// `pv..=pv+wv` of `r2`.
fn swap_segments<'a>(
    r1: &'a Route,
    pu: usize,
    wu: usize,
    r2: &'a Route,
    pv: usize,
    wv: usize,
) -> Option<Vec<Candidate<'a>>> {
    if r1.index() == r2.index() {
        let (a, wa, b, wb) = if pu < pv { (pu, wu, pv, wv) } else { (pv, wv, pu, wu) };

        if a + wa + 1 >= b {
            // Segments sharing visits cannot be swapped; directly adjacent segments trade
            // places without a middle span.
            if a + wa + 1 > b {
                return None;
            }

            return Some(vec![Candidate {
                route: r1,
                prefix: a - 1,
                pieces: vec![Piece::Span(r1, b, b + wb), Piece::Span(r1, a, a + wa)],
                tail: Tail::Own(b + wb + 1),
            }]);
        }

        Some(vec![Candidate {
            route: r1,
            prefix: a - 1,
            pieces: vec![
                Piece::Span(r1, b, b + wb),
                Piece::Span(r1, a + wa + 1, b - 1),
                Piece::Span(r1, a, a + wa),
            ],
            tail: Tail::Own(b + wb + 1),
        }])
    } else {
        Some(vec![
            Candidate {
                route: r1,
                prefix: pu - 1,
                pieces: vec![Piece::Span(r2, pv, pv + wv)],
                tail: Tail::Own(pu + wu + 1),
            },
            Candidate {
                route: r2,
                prefix: pv - 1,
                pieces: vec![Piece::Span(r1, pu, pu + wu)],
                tail: Tail::Own(pv + wv + 1),
            },
        ])
    }
}
