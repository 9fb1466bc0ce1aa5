//! Single-service relocation, within one route or between two.
//!
//! # Algorithm
//!
//! **Intra-route**: take the service at position `from` and reinsert it so
//! that it ends up at position `to`, for every `from != to`.
//!
//! **Inter-route**: take the service at position `i` of the source route
//! and insert it at every position `0..=len` of the target route, skipping
//! insertions that would exceed the vehicle capacity.
//!
//! Each candidate is scored by replaying the touched routes.
//!
//! # Complexity
//!
//! O(n³) per scan for intra-route, O(n_a · n_b · (n_a + n_b)) for a pair.

use rand::Rng;

use super::moves::{inserted, keep_better, relocated, removed, Candidate, Move};
use crate::evaluation::RouteEvaluator;
use crate::models::Route;

/// Finds the best improving intra-route relocation in `routes[route]`.
pub fn best_intra_relocate(
    routes: &[Route],
    route: usize,
    eval: &RouteEvaluator<'_>,
) -> Option<Candidate> {
    let r = &routes[route];
    let seq = r.services();
    let n = seq.len();
    let mut best = None;

    for from in 0..n {
        for to in (0..n).filter(|&to| to != from) {
            let delta = eval.sequence_cost(relocated(seq, from, to)) - r.cost();
            keep_better(
                &mut best,
                Candidate {
                    mv: Move::IntraRelocate { route, from, to },
                    delta,
                },
            );
        }
    }

    best
}

/// Draws one random intra-route relocation of `routes[route]`.
///
/// Returns `None` if the route has fewer than two services.
pub fn sample_intra_relocate<R: Rng + ?Sized>(
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
    let from = rng.random_range(0..n);
    // pick among the n - 1 other positions
    let mut to = rng.random_range(0..n - 1);
    if to >= from {
        to += 1;
    }
    let delta = eval.sequence_cost(relocated(seq, from, to)) - r.cost();
    Some(Candidate {
        mv: Move::IntraRelocate { route, from, to },
        delta,
    })
}

/// Finds the best improving move of one service from `routes[source]` into
/// `routes[target]`.
///
/// Ties keep the first `(source position, target position)` found.
pub fn best_inter_relocate(
    routes: &[Route],
    source: usize,
    target: usize,
    eval: &RouteEvaluator<'_>,
) -> Option<Candidate> {
    let (src, dst) = (&routes[source], &routes[target]);
    let registry = eval.registry();
    let before = src.cost() + dst.cost();
    let mut best = None;

    for (source_pos, &id) in src.services().iter().enumerate() {
        let demand = u64::from(registry.service(id).demand());
        if !eval.fits(dst.demand() + demand) {
            continue;
        }
        let src_cost = eval.sequence_cost(removed(src.services(), source_pos));
        for target_pos in 0..=dst.len() {
            let dst_cost = eval.sequence_cost(inserted(dst.services(), target_pos, id));
            keep_better(
                &mut best,
                Candidate {
                    mv: Move::InterRelocate {
                        source,
                        source_pos,
                        target,
                        target_pos,
                    },
                    delta: src_cost + dst_cost - before,
                },
            );
        }
    }

    best
}

/// Draws one random relocation from `routes[source]` into `routes[target]`.
///
/// Returns `None` if the source is empty or the drawn service does not fit
/// the target.
pub fn sample_inter_relocate<R: Rng + ?Sized>(
    routes: &[Route],
    source: usize,
    target: usize,
    eval: &RouteEvaluator<'_>,
    rng: &mut R,
) -> Option<Candidate> {
    let (src, dst) = (&routes[source], &routes[target]);
    if src.is_empty() {
        return None;
    }
    let source_pos = rng.random_range(0..src.len());
    let target_pos = rng.random_range(0..=dst.len());
    let id = src.services()[source_pos];
    if !eval.fits(dst.demand() + u64::from(eval.registry().service(id).demand())) {
        return None;
    }
    let src_cost = eval.sequence_cost(removed(src.services(), source_pos));
    let dst_cost = eval.sequence_cost(inserted(dst.services(), target_pos, id));
    Some(Candidate {
        mv: Move::InterRelocate {
            source,
            source_pos,
            target,
            target_pos,
        },
        delta: src_cost + dst_cost - src.cost() - dst.cost(),
    })
}

/// Applies the best improving intra-route relocation, if any.
pub fn intra_relocate_improve(
    routes: &mut [Route],
    route: usize,
    eval: &RouteEvaluator<'_>,
) -> bool {
    match best_intra_relocate(routes, route, eval) {
        Some(c) => {
            c.mv.apply(routes, eval);
            true
        }
        None => false,
    }
}

/// Applies the best improving relocation from `source` into `target`, if any.
pub fn inter_relocate_improve(
    routes: &mut [Route],
    source: usize,
    target: usize,
    eval: &RouteEvaluator<'_>,
) -> bool {
    match best_inter_relocate(routes, source, target, eval) {
        Some(c) => {
            c.mv.apply(routes, eval);
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::local_search::fixtures::{line, line_with};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_intra_relocate_improves() {
        let fx = line(1, 10, &[2, 3, 4]);
        let eval = fx.eval();
        let mut routes = vec![eval.build_route(1, vec![3, 1, 2])];

        let c = best_intra_relocate(&routes, 0, &eval).expect("improving");
        assert_eq!(
            c.mv,
            Move::IntraRelocate {
                route: 0,
                from: 0,
                to: 1
            }
        );
        assert!((c.delta + 2.0).abs() < 1e-10);

        assert!(intra_relocate_improve(&mut routes, 0, &eval));
        assert_eq!(routes[0].services(), &[1, 3, 2]);
        assert!((routes[0].cost() - 6.0).abs() < 1e-10);
    }

    #[test]
    fn test_inter_relocate_merges_routes() {
        // service 1 is vertex 2, service 2 is vertex 4
        let fx = line(1, 10, &[2, 4]);
        let eval = fx.eval();
        let mut routes = vec![eval.build_route(1, vec![1]), eval.build_route(2, vec![2])];
        assert!((routes[0].cost() + routes[1].cost() - 8.0).abs() < 1e-10);

        let c = best_inter_relocate(&routes, 0, 1, &eval).expect("improving");
        assert_eq!(
            c.mv,
            Move::InterRelocate {
                source: 0,
                source_pos: 0,
                target: 1,
                target_pos: 0
            }
        );
        assert!((c.delta + 2.0).abs() < 1e-10);

        assert!(inter_relocate_improve(&mut routes, 0, 1, &eval));
        assert!(routes[0].is_empty());
        assert_eq!(routes[0].cost(), 0.0);
        assert_eq!(routes[1].services(), &[1, 2]);
        assert_eq!(routes[1].demand(), 2);
        assert!((routes[1].cost() - 6.0).abs() < 1e-10);
    }

    #[test]
    fn test_inter_relocate_respects_capacity() {
        let fx = line(1, 1, &[2, 4]);
        let eval = fx.eval();
        let routes = vec![eval.build_route(1, vec![1]), eval.build_route(2, vec![2])];
        let mut rng = StdRng::seed_from_u64(3);
        assert!(best_inter_relocate(&routes, 0, 1, &eval).is_none());
        assert!(best_inter_relocate(&routes, 1, 0, &eval).is_none());
        assert!(sample_inter_relocate(&routes, 0, 1, &eval, &mut rng).is_none());
    }

    #[test]
    fn test_inter_relocate_loads_near_u32_max() {
        let fx = line_with(1, u32::MAX, &[(2, 3_000_000_000), (3, 3_000_000_000)]);
        let eval = fx.eval();
        let routes = vec![eval.build_route(1, vec![1]), eval.build_route(2, vec![2])];
        let mut rng = StdRng::seed_from_u64(11);
        assert!(best_inter_relocate(&routes, 0, 1, &eval).is_none());
        assert!(best_inter_relocate(&routes, 1, 0, &eval).is_none());
        for _ in 0..10 {
            assert!(sample_inter_relocate(&routes, 0, 1, &eval, &mut rng).is_none());
        }
    }

    #[test]
    fn test_samples_never_pick_identity() {
        let fx = line(1, 10, &[2, 3, 4, 5]);
        let eval = fx.eval();
        let routes = vec![eval.build_route(1, vec![1, 2]), eval.build_route(2, vec![3, 4])];
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..50 {
            let c = sample_intra_relocate(&routes, 0, &eval, &mut rng).expect("two services");
            if let Move::IntraRelocate { from, to, .. } = c.mv {
                assert_ne!(from, to);
                assert!(from < 2 && to < 2);
            }
            let c = sample_inter_relocate(&routes, 1, 0, &eval, &mut rng).expect("fits");
            let mut applied = routes.clone();
            let before: f64 = applied.iter().map(|r| r.cost()).sum();
            c.mv.apply(&mut applied, &eval);
            let after: f64 = applied.iter().map(|r| r.cost()).sum();
            assert!((after - before - c.delta).abs() < 1e-9);
        }
    }
}
