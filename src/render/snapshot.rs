//! Immutable view of an episode for renderers.

use serde::{Deserialize, Serialize};

/// Everything a renderer may look at, copied out of the episode.
///
/// Holding a snapshot never borrows the episode, so rendering cannot affect
/// the simulation.
///
/// # Examples
///
/// ```
/// use u_delivery::render::RouteSnapshot;
///
/// let snap = RouteSnapshot::new(vec![(0.0, 0.0), (3.0, 4.0)], vec![1, 0], 10.0);
/// assert_eq!(snap.start(), Some((3.0, 4.0)));
/// assert_eq!(snap.end(), Some((0.0, 0.0)));
/// assert_eq!(snap.itinerary(), vec![(3.0, 4.0), (0.0, 0.0)]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteSnapshot {
    coordinates: Vec<(f64, f64)>,
    visited: Vec<usize>,
    bound: f64,
}

impl RouteSnapshot {
    /// Creates a snapshot. `bound` is the coordinate upper limit.
    pub fn new(coordinates: Vec<(f64, f64)>, visited: Vec<usize>, bound: f64) -> Self {
        Self {
            coordinates,
            visited,
            bound,
        }
    }

    /// All stop coordinates.
    pub fn coordinates(&self) -> &[(f64, f64)] {
        &self.coordinates
    }

    /// Visited stop indices in order.
    pub fn visited(&self) -> &[usize] {
        &self.visited
    }

    /// Upper limit of the coordinate box.
    pub fn bound(&self) -> f64 {
        self.bound
    }

    /// Position of the start stop.
    pub fn start(&self) -> Option<(f64, f64)> {
        self.visited
            .first()
            .and_then(|&i| self.coordinates.get(i).copied())
    }

    /// Position of the most recent stop, once the vehicle has moved.
    pub fn end(&self) -> Option<(f64, f64)> {
        if self.visited.len() < 2 {
            return None;
        }
        self.visited
            .last()
            .and_then(|&i| self.coordinates.get(i).copied())
    }

    /// Coordinates along the route, in visit order.
    pub fn itinerary(&self) -> Vec<(f64, f64)> {
        self.visited
            .iter()
            .filter_map(|&i| self.coordinates.get(i).copied())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_route() {
        let snap = RouteSnapshot::new(vec![(1.0, 1.0)], vec![], 5.0);
        assert_eq!(snap.start(), None);
        assert_eq!(snap.end(), None);
        assert!(snap.itinerary().is_empty());
    }

    #[test]
    fn test_single_visit_has_no_end() {
        let snap = RouteSnapshot::new(vec![(1.0, 1.0), (2.0, 2.0)], vec![1], 5.0);
        assert_eq!(snap.start(), Some((2.0, 2.0)));
        assert_eq!(snap.end(), None);
    }

    #[test]
    fn test_serde_roundtrip() {
        let snap = RouteSnapshot::new(vec![(0.5, 1.5), (2.0, 3.0)], vec![0, 1], 4.0);
        let json = serde_json::to_string(&snap).expect("serialize");
        let back: RouteSnapshot = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, snap);
    }
}
