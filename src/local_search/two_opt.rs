//! Intra-route 2-opt block reversal.
//!
//! # Algorithm
//!
//! For every pair of positions `i < j` in a route, reverse the block
//! `r[i..=j]` and replay the new sequence. Reversal also flips which end of
//! each required edge is nearer, so the cost change is not a simple
//! four-term delta as in the node-routing case: the whole route is replayed
//! through [`RouteEvaluator::sequence_cost`].
//!
//! # Complexity
//!
//! O(n³) per scan: O(n²) pairs, O(n) replay each.
//!
//! # Reference
//!
//! Croes, G.A. (1958). "A method for solving traveling salesman problems",
//! *Operations Research* 6(6), 791-812.

use rand::Rng;

use super::moves::{keep_better, reversed, Candidate, Move};
use crate::evaluation::RouteEvaluator;
use crate::models::Route;

/// Finds the best improving reversal in `routes[route]`.
///
/// Ties keep the first pair found in `(i, j)` order. Returns `None` if no
/// reversal lowers the cost.
pub fn best_two_opt(
    routes: &[Route],
    route: usize,
    eval: &RouteEvaluator<'_>,
) -> Option<Candidate> {
    let r = &routes[route];
    let seq = r.services();
    let n = seq.len();
    let mut best = None;

    for start in 0..n.saturating_sub(1) {
        for end in start + 1..n {
            let delta = eval.sequence_cost(reversed(seq, start, end)) - r.cost();
            keep_better(
                &mut best,
                Candidate {
                    mv: Move::TwoOpt { route, start, end },
                    delta,
                },
            );
        }
    }

    best
}

/// Draws one random reversal of `routes[route]`, improving or not.
///
/// Returns `None` if the route has fewer than two services.
pub fn sample_two_opt<R: Rng + ?Sized>(
    routes: &[Route],
    route: usize,
    eval: &RouteEvaluator<'_>,
    rng: &mut R,
) -> Option<Candidate> {
    let r = &routes[route];
    let seq = r.services();
    let n = seq.len();
    if n < 2 {
        return None;
    }
    let start = rng.random_range(0..n - 1);
    let end = rng.random_range(start + 1..n);
    let delta = eval.sequence_cost(reversed(seq, start, end)) - r.cost();
    Some(Candidate {
        mv: Move::TwoOpt { route, start, end },
        delta,
    })
}

/// Applies the best improving reversal, if any. Returns `true` on change.
pub fn two_opt_improve(routes: &mut [Route], route: usize, eval: &RouteEvaluator<'_>) -> bool {
    match best_two_opt(routes, route, eval) {
        Some(c) => {
            c.mv.apply(routes, eval);
            true
        }
        None => false,
    }
}
