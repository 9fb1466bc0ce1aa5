//! Distance tables.
//!
//! - `DistanceMatrix` — Dense row-major matrix storage
//! - [`ShortestPaths`] — Floyd-Warshall all-pairs distances with path reconstruction

mod matrix;
mod shortest_path;

pub(crate) use matrix::DistanceMatrix;
pub use shortest_path::ShortestPaths;
