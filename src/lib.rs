//! # u-delivery
//!
//! Single-vehicle delivery routing environment with a reset/step interface
//! for sequential decision-making (e.g. reinforcement learning) algorithms.
//!
//! ## Modules
//!
//! - [`models`] — Domain model types (Stop, VisitedSequence)
//! - [`cost`] — Cost matrix and cost metrics (distance, time)
//! - [`env`] — Routing episode state machine and configuration
//! - [`render`] — Snapshot type and renderer seam
//! - [`error`] — Error taxonomy

pub mod cost;
pub mod env;
pub mod error;
pub mod models;
pub mod render;

pub use error::{EnvError, Result};
