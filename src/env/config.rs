//! Environment configuration.

use serde::{Deserialize, Serialize};

use crate::cost::CostMetric;
use crate::error::{EnvError, Result};
use crate::models::MAX_COORDINATE;

/// How an episode treats revisits and steps past termination.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepPolicy {
    /// Any in-range destination is accepted, including stops already
    /// visited and steps after every stop was reached.
    #[default]
    Lenient,
    /// Revisits are rejected with [`EnvError::RevisitedStop`] and steps on a
    /// terminal episode with [`EnvError::EpisodeTerminated`].
    Strict,
}

/// Construction parameters for a [`RoutingEpisode`](super::RoutingEpisode).
///
/// Every field has a default, so partial configurations deserialize.
///
/// # Examples
///
/// ```
/// use u_delivery::cost::CostMetric;
/// use u_delivery::env::EnvConfig;
///
/// let config = EnvConfig::default()
///     .with_n_stops(25)
///     .with_metric(CostMetric::Time)
///     .with_seed(42);
/// assert_eq!(config.n_stops, 25);
/// assert_eq!(config.max_box, 10.0);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvConfig {
    /// Number of stops in the episode.
    pub n_stops: usize,
    /// Upper bound for coordinates and time-metric costs.
    pub max_box: f64,
    /// Cost semantics.
    pub metric: CostMetric,
    /// Seed for the episode's random source; `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Revisit / termination handling.
    pub policy: StepPolicy,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            n_stops: 10,
            max_box: 10.0,
            metric: CostMetric::Distance,
            seed: None,
            policy: StepPolicy::Lenient,
        }
    }
}

impl EnvConfig {
    /// Sets the number of stops.
    pub fn with_n_stops(mut self, n_stops: usize) -> Self {
        self.n_stops = n_stops;
        self
    }

    /// Sets the coordinate and time-cost upper bound.
    pub fn with_max_box(mut self, max_box: f64) -> Self {
        self.max_box = max_box;
        self
    }

    /// Sets the cost metric.
    pub fn with_metric(mut self, metric: CostMetric) -> Self {
        self.metric = metric;
        self
    }

    /// Seeds the episode's random source.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the revisit / termination policy.
    pub fn with_policy(mut self, policy: StepPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Checks `n_stops >= 1` and that `max_box` is a positive normal float
    /// no larger than [`MAX_COORDINATE`].
    ///
    /// Subnormal bounds are rejected: draws from `[0, max_box)` would round
    /// up to `max_box` itself.
    pub fn validate(&self) -> Result<()> {
        if self.n_stops < 1 {
            return Err(EnvError::Configuration(
                "n_stops must be at least 1".to_string(),
            ));
        }
        if !self.max_box.is_normal() || self.max_box <= 0.0 || self.max_box > MAX_COORDINATE {
            return Err(EnvError::Configuration(format!(
                "max_box must be a positive normal number up to {MAX_COORDINATE:e}, got {}",
                self.max_box
            )));
        }
        Ok(())
    }
}
