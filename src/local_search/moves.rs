//! Move descriptions shared by every neighborhood operator.
//!
//! Operators evaluate candidates without touching the routes: each
//! hypothetical sequence is streamed through
//! [`RouteEvaluator::sequence_cost`] by one of the view iterators below.
//! Only the chosen candidate is committed, via [`Move::apply`].

use serde::{Deserialize, Serialize};

use crate::evaluation::RouteEvaluator;
use crate::models::Route;

/// A move must beat the current cost by more than this to count as improving.
pub const IMPROVEMENT_EPSILON: f64 = 1e-10;

/// Neighborhood operator families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    /// Reverse a contiguous block of one route.
    TwoOpt,
    /// Move one service to another position of the same route.
    IntraRelocate,
    /// Exchange one service between two routes.
    Swap,
    /// Move one service from one route into another.
    InterRelocate,
}

impl Operator {
    /// Every operator, in a fixed order.
    pub const ALL: [Operator; 4] = [
        Operator::TwoOpt,
        Operator::IntraRelocate,
        Operator::Swap,
        Operator::InterRelocate,
    ];

    /// Returns `true` if the operator works on two distinct routes.
    pub fn is_inter_route(&self) -> bool {
        matches!(self, Operator::Swap | Operator::InterRelocate)
    }
}

/// A concrete neighborhood move. Route fields are indices into the working
/// route slice; position fields are indices into those routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    /// Reverse `route[start..=end]`.
    TwoOpt {
        /// Route index.
        route: usize,
        /// First reversed position.
        start: usize,
        /// Last reversed position.
        end: usize,
    },
    /// Remove the service at `from` and reinsert it so it ends up at `to`.
    IntraRelocate {
        /// Route index.
        route: usize,
        /// Current position.
        from: usize,
        /// Final position.
        to: usize,
    },
    /// Exchange `first[first_pos]` with `second[second_pos]`.
    Swap {
        /// First route index.
        first: usize,
        /// Position in the first route.
        first_pos: usize,
        /// Second route index.
        second: usize,
        /// Position in the second route.
        second_pos: usize,
    },
    /// Remove `source[source_pos]` and insert it at `target_pos` of `target`.
    InterRelocate {
        /// Donor route index.
        source: usize,
        /// Position in the donor route.
        source_pos: usize,
        /// Receiving route index.
        target: usize,
        /// Insertion position in the receiving route.
        target_pos: usize,
    },
}

impl Move {
    /// Which operator produced this move.
    pub fn operator(&self) -> Operator {
        match self {
            Move::TwoOpt { .. } => Operator::TwoOpt,
            Move::IntraRelocate { .. } => Operator::IntraRelocate,
            Move::Swap { .. } => Operator::Swap,
            Move::InterRelocate { .. } => Operator::InterRelocate,
        }
    }

    /// Commits the move and refreshes the cached totals of the touched routes.
    ///
    /// # Panics
    ///
    /// Panics if an index is out of range, or if an inter-route move names
    /// the same route twice.
    pub fn apply(&self, routes: &mut [Route], eval: &RouteEvaluator<'_>) {
        match *self {
            Move::TwoOpt { route, start, end } => {
                let r = &mut routes[route];
                r.services_mut()[start..=end].reverse();
                eval.refresh(r);
            }
            Move::IntraRelocate { route, from, to } => {
                let r = &mut routes[route];
                let id = r.services_mut().remove(from);
                r.services_mut().insert(to, id);
                eval.refresh(r);
            }
            Move::Swap {
                first,
                first_pos,
                second,
                second_pos,
            } => {
                let (a, b) = pair_mut(routes, first, second);
                std::mem::swap(&mut a.services_mut()[first_pos], &mut b.services_mut()[second_pos]);
                eval.refresh(a);
                eval.refresh(b);
            }
            Move::InterRelocate {
                source,
                source_pos,
                target,
                target_pos,
            } => {
                let (src, dst) = pair_mut(routes, source, target);
                let id = src.services_mut().remove(source_pos);
                dst.services_mut().insert(target_pos, id);
                eval.refresh(src);
                eval.refresh(dst);
            }
        }
    }
}

/// A move together with the total-cost change it would cause.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    /// The move.
    pub mv: Move,
    /// New cost minus current cost of the touched routes.
    pub delta: f64,
}

impl Candidate {
    /// Returns `true` if committing the move lowers the cost.
    pub fn is_improving(&self) -> bool {
        self.delta < -IMPROVEMENT_EPSILON
    }
}

/// Keeps `best` if `candidate` does not beat it; ties keep the earlier one.
pub(crate) fn keep_better(best: &mut Option<Candidate>, candidate: Candidate) {
    if candidate.is_improving() && best.is_none_or(|b| candidate.delta < b.delta) {
        *best = Some(candidate);
    }
}

/// Two distinct routes borrowed mutably at once.
pub(crate) fn pair_mut(routes: &mut [Route], a: usize, b: usize) -> (&mut Route, &mut Route) {
    assert_ne!(a, b, "inter-route move needs two distinct routes");
    if a < b {
        let (left, right) = routes.split_at_mut(b);
        (&mut left[a], &mut right[0])
    } else {
        let (left, right) = routes.split_at_mut(a);
        (&mut right[0], &mut left[b])
    }
}

/// `seq` with `seq[start..=end]` reversed.
pub(crate) fn reversed(
    seq: &[usize],
    start: usize,
    end: usize,
) -> impl Iterator<Item = usize> + '_ {
    seq[..start]
        .iter()
        .chain(seq[start..=end].iter().rev())
        .chain(seq[end + 1..].iter())
        .copied()
}

/// `seq` with the element at `from` moved so that it lands at `to`.
pub(crate) fn relocated(seq: &[usize], from: usize, to: usize) -> impl Iterator<Item = usize> + '_ {
    (0..seq.len()).map(move |k| {
        if k == to {
            seq[from]
        } else if from < to && (from..to).contains(&k) {
            seq[k + 1]
        } else if to < from && (to + 1..=from).contains(&k) {
            seq[k - 1]
        } else {
            seq[k]
        }
    })
}

/// `seq` with `seq[pos]` replaced by `id`.
pub(crate) fn replaced(seq: &[usize], pos: usize, id: usize) -> impl Iterator<Item = usize> + '_ {
    seq.iter()
        .enumerate()
        .map(move |(k, &s)| if k == pos { id } else { s })
}

/// `seq` without `seq[pos]`.
pub(crate) fn removed(seq: &[usize], pos: usize) -> impl Iterator<Item = usize> + '_ {
    seq.iter()
        .enumerate()
        .filter(move |&(k, _)| k != pos)
        .map(|(_, &s)| s)
}

/// `seq` with `id` inserted before position `pos`.
pub(crate) fn inserted(seq: &[usize], pos: usize, id: usize) -> impl Iterator<Item = usize> + '_ {
    seq[..pos]
        .iter()
        .copied()
        .chain(std::iter::once(id))
        .chain(seq[pos..].iter().copied())
}
