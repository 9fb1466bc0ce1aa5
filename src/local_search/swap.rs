//! Inter-route single-service swap.
//!
//! # Algorithm
//!
//! For routes A and B, exchange `A[i]` with `B[j]` for every pair `(i, j)`
//! whose exchange keeps both loads within capacity:
//!
//! ```text
//! load(A) - d(A[i]) + d(B[j]) <= Q
//! load(B) - d(B[j]) + d(A[i]) <= Q
//! ```
//!
//! Both routes are replayed with the replacement in place.
//!
//! # Complexity
//!
//! O(n_a · n_b · (n_a + n_b)) per route pair.

use rand::Rng;

use super::moves::{keep_better, replaced, Candidate, Move};
use crate::evaluation::RouteEvaluator;
use crate::models::Route;

/// Capacity check for exchanging a service of demand `da` in a route of
/// load `load_a` with one of demand `db` in a route of load `load_b`.
fn swap_fits(eval: &RouteEvaluator<'_>, load_a: u64, da: u32, load_b: u64, db: u32) -> bool {
    let (da, db) = (u64::from(da), u64::from(db));
    eval.fits((load_a + db).saturating_sub(da)) && eval.fits((load_b + da).saturating_sub(db))
}

fn swap_delta(
    a: &Route,
    first_pos: usize,
    b: &Route,
    second_pos: usize,
    eval: &RouteEvaluator<'_>,
) -> f64 {
    let x = a.services()[first_pos];
    let y = b.services()[second_pos];
    let new_a = eval.sequence_cost(replaced(a.services(), first_pos, y));
    let new_b = eval.sequence_cost(replaced(b.services(), second_pos, x));
    new_a + new_b - a.cost() - b.cost()
}

/// Finds the best improving swap between `routes[first]` and `routes[second]`.
///
/// Ties keep the first `(i, j)` pair found.
pub fn best_swap(
    routes: &[Route],
    first: usize,
    second: usize,
    eval: &RouteEvaluator<'_>,
) -> Option<Candidate> {
    let (a, b) = (&routes[first], &routes[second]);
    let registry = eval.registry();
    let mut best = None;

    for (first_pos, &x) in a.services().iter().enumerate() {
        let dx = registry.service(x).demand();
        for (second_pos, &y) in b.services().iter().enumerate() {
            let dy = registry.service(y).demand();
            if !swap_fits(eval, a.demand(), dx, b.demand(), dy) {
                continue;
            }
            keep_better(
                &mut best,
                Candidate {
                    mv: Move::Swap {
                        first,
                        first_pos,
                        second,
                        second_pos,
                    },
                    delta: swap_delta(a, first_pos, b, second_pos, eval),
                },
            );
        }
    }

    best
}

/// Draws one random swap between `routes[first]` and `routes[second]`.
///
/// Returns `None` if either route is empty or the drawn pair breaks capacity.
pub fn sample_swap<R: Rng + ?Sized>(
    routes: &[Route],
    first: usize,
    second: usize,
    eval: &RouteEvaluator<'_>,
    rng: &mut R,
) -> Option<Candidate> {
    let (a, b) = (&routes[first], &routes[second]);
    if a.is_empty() || b.is_empty() {
        return None;
    }
    let first_pos = rng.random_range(0..a.len());
    let second_pos = rng.random_range(0..b.len());
    let registry = eval.registry();
    let dx = registry.service(a.services()[first_pos]).demand();
    let dy = registry.service(b.services()[second_pos]).demand();
    if !swap_fits(eval, a.demand(), dx, b.demand(), dy) {
        return None;
    }
    Some(Candidate {
        mv: Move::Swap {
            first,
            first_pos,
            second,
            second_pos,
        },
        delta: swap_delta(a, first_pos, b, second_pos, eval),
    })
}

/// Applies the best improving swap between two routes, if any.
pub fn swap_improve(
    routes: &mut [Route],
    first: usize,
    second: usize,
    eval: &RouteEvaluator<'_>,
) -> bool {
    match best_swap(routes, first, second, eval) {
        Some(c) => {
            c.mv.apply(routes, eval);
            true
        }
        None => false,
    }
}
