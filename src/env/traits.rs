//! Generic reset/step interface for sequential decision-making.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Outcome of a single accepted step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepResult<S = usize> {
    /// State after the transition (the destination stop).
    pub state: S,
    /// Cost of the transition.
    pub reward: f64,
    /// Whether every stop has been visited.
    pub done: bool,
}

impl<S> StepResult<S> {
    /// Splits the result into `(state, reward, done)`.
    pub fn into_tuple(self) -> (S, f64, bool) {
        (self.state, self.reward, self.done)
    }
}

/// An environment an agent interacts with through `reset` and `step`.
///
/// Agents written against this trait do not depend on the concrete
/// environment type.
///
/// # Examples
///
/// ```
/// use u_delivery::env::{EnvConfig, Environment, RoutingEpisode};
///
/// fn in_order_rollout<E: Environment<Action = usize, Observation = usize>>(env: &mut E) -> f64 {
///     env.reset();
///     let mut total = 0.0;
///     for action in 0..env.action_space() {
///         let step = env.step(action).unwrap();
///         total += step.reward;
///         if step.done {
///             break;
///         }
///     }
///     total
/// }
///
/// let mut env = RoutingEpisode::new(EnvConfig::default().with_seed(1)).unwrap();
/// assert!(in_order_rollout(&mut env) >= 0.0);
/// ```
pub trait Environment {
    type Action;
    type Observation;

    /// Starts a new episode and returns its initial observation.
    fn reset(&mut self) -> Self::Observation;

    /// Applies `action` and reports the resulting transition.
    fn step(&mut self, action: Self::Action) -> Result<StepResult<Self::Observation>>;

    /// Number of distinct actions.
    fn action_space(&self) -> usize;

    /// Number of distinct observations.
    fn observation_space(&self) -> usize;
}
