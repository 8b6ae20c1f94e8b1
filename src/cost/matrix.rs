//! Dense pairwise cost matrix.

use crate::error::{EnvError, Result};
use crate::models::Stop;

/// A dense n×n travel-cost matrix stored in row-major order.
///
/// Entries are non-negative and the diagonal is zero. Symmetry depends on
/// the metric that produced the matrix.
///
/// # Examples
///
/// ```
/// use u_delivery::models::Stop;
/// use u_delivery::cost::CostMatrix;
///
/// let stops = vec![
///     Stop::new(0, 0.0, 0.0),
///     Stop::new(1, 3.0, 4.0),
///     Stop::new(2, 0.0, 4.0),
/// ];
/// let cm = CostMatrix::euclidean(&stops);
/// assert!((cm.get(0, 1) - 5.0).abs() < 1e-10);
/// assert!((cm.get(1, 2) - 3.0).abs() < 1e-10);
/// assert_eq!(cm.size(), 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CostMatrix {
    data: Vec<f64>,
    size: usize,
}

impl CostMatrix {
    /// Creates a cost matrix of the given size, initialized to zero.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0.0; size * size],
            size,
        }
    }

    /// Computes the pairwise Euclidean distance matrix of `stops`.
    pub fn euclidean(stops: &[Stop]) -> Self {
        let n = stops.len();
        let mut cm = Self::new(n);
        for i in 0..n {
            for j in (i + 1)..n {
                let d = stops[i].distance_to(&stops[j]);
                cm.set(i, j, d);
                cm.set(j, i, d);
            }
        }
        cm
    }

    /// Creates a cost matrix from an explicit n×n grid.
    ///
    /// Rejects grids whose length is not `size * size`, or that contain
    /// negative or non-finite entries, or a non-zero diagonal.
    pub fn from_data(size: usize, data: Vec<f64>) -> Result<Self> {
        if data.len() != size * size {
            return Err(EnvError::Configuration(format!(
                "cost matrix of size {size} needs {} entries, got {}",
                size * size,
                data.len()
            )));
        }
        if let Some(v) = data.iter().find(|v| !v.is_finite() || **v < 0.0) {
            return Err(EnvError::Configuration(format!(
                "cost matrix entries must be finite and non-negative, got {v}"
            )));
        }
        let cm = Self { data, size };
        if let Some(i) = (0..size).find(|&i| cm.get(i, i) != 0.0) {
            return Err(EnvError::Configuration(format!(
                "cost matrix diagonal must be zero (entry {i} is {})",
                cm.get(i, i)
            )));
        }
        Ok(cm)
    }

    /// Returns the cost of travelling from stop `from` to stop `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Sets the cost of travelling from stop `from` to stop `to`.
    pub fn set(&mut self, from: usize, to: usize, cost: f64) {
        self.data[from * self.size + to] = cost;
    }

    /// Costs of every transition leaving `from`.
    pub fn row(&self, from: usize) -> &[f64] {
        &self.data[from * self.size..(from + 1) * self.size]
    }

    /// Number of stops covered by this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if the matrix is symmetric within the given tolerance.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                if (self.get(i, j) - self.get(j, i)).abs() > tol {
                    return false;
                }
            }
        }
        true
    }

    /// Sum of the transition costs along `path`.
    ///
    /// Paths with fewer than two stops cost nothing.
    ///
    /// # Panics
    ///
    /// Panics if any index is out of bounds.
    pub fn path_cost(&self, path: &[usize]) -> f64 {
        path.windows(2).map(|w| self.get(w[0], w[1])).sum()
    }
}
