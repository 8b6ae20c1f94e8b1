//! Delivery stop type.

use serde::{Deserialize, Serialize};

/// Largest coordinate magnitude accepted for a stop.
///
/// Keeps every pairwise difference, and so every distance, finite.
pub const MAX_COORDINATE: f64 = f64::MAX / 4.0;

/// A delivery location identified by its index within the episode.
///
/// Coordinates are fixed at construction; a stop never moves.
///
/// # Examples
///
/// ```
/// use u_delivery::models::Stop;
///
/// let a = Stop::new(0, 0.0, 0.0);
/// let b = Stop::new(1, 3.0, 4.0);
/// assert_eq!(b.index(), 1);
/// assert!((a.distance_to(&b) - 5.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    index: usize,
    x: f64,
    y: f64,
}

impl Stop {
    /// Creates a stop at the given coordinates.
    pub fn new(index: usize, x: f64, y: f64) -> Self {
        Self { index, x, y }
    }

    /// Stop index (`0..n_stops`).
    pub fn index(&self) -> usize {
        self.index
    }

    /// X-coordinate.
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Y-coordinate.
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Coordinates as an `(x, y)` pair.
    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    /// Euclidean distance to another stop.
    pub fn distance_to(&self, other: &Stop) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx.hypot(dy)
    }
}
