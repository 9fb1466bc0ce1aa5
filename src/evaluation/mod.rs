//! Route cost replay and solution feasibility checking.

mod evaluator;

pub use evaluator::RouteEvaluator;
