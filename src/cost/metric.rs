//! Cost metrics: how pairwise travel costs are derived.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{EnvError, Result};
use crate::models::Stop;

use super::CostMatrix;

/// The rule used to populate a [`CostMatrix`].
///
/// - [`CostMetric::Distance`] — Euclidean distance between stop coordinates
///   (symmetric).
/// - [`CostMetric::Time`] — independent uniform draws in `[0, max_box)`,
///   unrelated to the coordinates (asymmetric in general).
///
/// # Examples
///
/// ```
/// use u_delivery::cost::CostMetric;
///
/// let metric: CostMetric = "time".parse().unwrap();
/// assert_eq!(metric, CostMetric::Time);
/// assert!("speed".parse::<CostMetric>().is_err());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CostMetric {
    #[default]
    Distance,
    Time,
}

impl CostMetric {
    /// Builds the cost matrix for `stops` under this metric.
    ///
    /// `max_box` bounds the random draws of [`CostMetric::Time`]; it must be
    /// a positive normal float. The distance metric ignores both `max_box` and
    /// `rng`.
    pub fn build<R: Rng + ?Sized>(
        &self,
        stops: &[Stop],
        max_box: f64,
        rng: &mut R,
    ) -> Result<CostMatrix> {
        match self {
            CostMetric::Distance => Ok(CostMatrix::euclidean(stops)),
            CostMetric::Time => {
                if !max_box.is_normal() || max_box <= 0.0 {
                    return Err(EnvError::Configuration(format!(
                        "max_box must be a positive normal number, got {max_box}"
                    )));
                }
                let n = stops.len();
                let mut cm = CostMatrix::new(n);
                for i in 0..n {
                    for j in 0..n {
                        cm.set(i, j, rng.random_range(0.0..max_box));
                    }
                }
                // draws land on the diagonal too
                for i in 0..n {
                    cm.set(i, i, 0.0);
                }
                Ok(cm)
            }
        }
    }

    /// Lowercase name used in configuration.
    pub fn name(&self) -> &'static str {
        match self {
            CostMetric::Distance => "distance",
            CostMetric::Time => "time",
        }
    }
}

impl fmt::Display for CostMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CostMetric {
    type Err = EnvError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "distance" => Ok(CostMetric::Distance),
            "time" => Ok(CostMetric::Time),
            other => Err(EnvError::Configuration(format!(
                "metric {other:?} not recognized (expected \"distance\" or \"time\")"
            ))),
        }
    }
}
