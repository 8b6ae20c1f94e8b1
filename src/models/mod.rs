//! Domain model types for the delivery environment.
//!
//! Provides delivery stops with fixed coordinates and the ordered record of
//! stops visited during an episode.

mod stop;
mod visited;

pub use stop::{Stop, MAX_COORDINATE};
pub use visited::VisitedSequence;
