//! The delivery routing environment.
//!
//! - [`RoutingEpisode`] — reset/step state machine over a fixed set of stops
//! - [`EnvConfig`] — construction parameters with defaults
//! - [`Environment`] — generic reset/step interface for agents

mod config;
mod episode;
mod traits;

pub use config::{EnvConfig, StepPolicy};
pub use episode::{EpisodeStatus, RoutingEpisode};
pub use traits::{Environment, StepResult};
