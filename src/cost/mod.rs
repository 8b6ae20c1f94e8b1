//! Pairwise travel costs between delivery stops.
//!
//! Provides a dense cost matrix and the closed set of metrics that populate
//! it (Euclidean distance or random travel time).

mod matrix;
mod metric;

pub use matrix::CostMatrix;
pub use metric::CostMetric;
