//! Error types for environment construction and episode transitions.

use thiserror::Error;

/// Errors reported by the delivery environment.
///
/// Every error is scoped to the call that produced it: a failed call never
/// leaves the episode partially mutated.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EnvError {
    /// Invalid construction parameters or an unrecognised metric name.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// A destination outside `[0, n_stops)`.
    #[error("destination {destination} is out of range for {n_stops} stops")]
    InvalidAction { destination: usize, n_stops: usize },

    /// A destination that was already visited (strict policy only).
    #[error("stop {destination} was already visited in this episode")]
    RevisitedStop { destination: usize },

    /// Episode state queried before any reset.
    #[error("episode has not been reset")]
    EmptyEpisode,

    /// A step requested after every stop was visited (strict policy only).
    #[error("episode already visited all {n_stops} stops; reset before stepping")]
    EpisodeTerminated { n_stops: usize },
}

impl EnvError {
    /// Returns `true` for errors caused by a rejected destination.
    pub fn is_invalid_action(&self) -> bool {
        matches!(
            self,
            EnvError::InvalidAction { .. } | EnvError::RevisitedStop { .. }
        )
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, EnvError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let e = EnvError::InvalidAction {
            destination: 7,
            n_stops: 5,
        };
        assert_eq!(e.to_string(), "destination 7 is out of range for 5 stops");
        assert_eq!(
            EnvError::Configuration("n_stops must be at least 1".into()).to_string(),
            "invalid configuration: n_stops must be at least 1"
        );
        assert_eq!(EnvError::EmptyEpisode.to_string(), "episode has not been reset");
    }

    #[test]
    fn test_is_invalid_action() {
        assert!(EnvError::InvalidAction {
            destination: 3,
            n_stops: 2
        }
        .is_invalid_action());
        assert!(EnvError::RevisitedStop { destination: 1 }.is_invalid_action());
        assert!(!EnvError::EmptyEpisode.is_invalid_action());
        assert!(!EnvError::EpisodeTerminated { n_stops: 4 }.is_invalid_action());
    }
}
