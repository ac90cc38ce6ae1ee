//! Route cost evaluation shared by all four solvers.

mod evaluator;

pub use evaluator::RouteEvaluator;
