//! Ordered record of the stops visited in an episode.

use serde::{Deserialize, Serialize};

use crate::error::{EnvError, Result};

/// The route taken so far in the current episode.
///
/// Holds exactly one stop after a reset and grows by one per accepted step.
/// Duplicates are allowed; whether they are accepted is up to the episode's
/// step policy.
///
/// # Examples
///
/// ```
/// use u_delivery::models::VisitedSequence;
///
/// let mut seq = VisitedSequence::new();
/// assert!(seq.current().is_err());
///
/// seq.restart(2);
/// seq.push(0);
/// assert_eq!(seq.stops(), &[2, 0]);
/// assert_eq!(seq.current().unwrap(), 0);
/// assert_eq!(seq.first(), Some(2));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitedSequence {
    stops: Vec<usize>,
}

impl VisitedSequence {
    /// Creates an empty sequence (no episode started).
    pub fn new() -> Self {
        Self { stops: Vec::new() }
    }

    /// Discards the current route and starts a new one at `start`.
    pub fn restart(&mut self, start: usize) {
        self.stops.clear();
        self.stops.push(start);
    }

    /// Appends a stop to the route.
    pub fn push(&mut self, stop: usize) {
        self.stops.push(stop);
    }

    /// The most recently visited stop.
    pub fn current(&self) -> Result<usize> {
        self.stops.last().copied().ok_or(EnvError::EmptyEpisode)
    }

    /// The start stop of the episode, if any.
    pub fn first(&self) -> Option<usize> {
        self.stops.first().copied()
    }

    /// Returns `true` if `stop` appears anywhere in the route.
    pub fn contains(&self, stop: usize) -> bool {
        self.stops.contains(&stop)
    }

    /// Stop indices in visit order.
    pub fn stops(&self) -> &[usize] {
        &self.stops
    }

    /// Number of entries, duplicates included.
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Returns `true` before the first reset.
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }
}
