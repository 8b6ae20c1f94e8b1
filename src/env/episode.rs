//! Single-vehicle delivery episode: the reset/step state machine.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, trace};

use crate::cost::{CostMatrix, CostMetric};
use crate::error::{EnvError, Result};
use crate::models::{Stop, VisitedSequence, MAX_COORDINATE};
use crate::render::RouteSnapshot;

use super::config::{EnvConfig, StepPolicy};
use super::traits::{Environment, StepResult};

/// Lifecycle of an episode.
///
/// `Unstarted → Active` on the first reset, `Active → Terminal` when the
/// route reaches `n_stops` entries, `Terminal → Active` on the next reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EpisodeStatus {
    Unstarted,
    Active,
    Terminal,
}

/// A delivery routing environment over randomly placed stops.
///
/// Stop coordinates and the cost matrix are generated once at construction
/// and never change; each [`reset`](Self::reset) starts a new route from a
/// random stop. Rewards are looked up in the cost matrix.
///
/// The random source is owned by the episode, so instances are independent
/// and reproducible from a seed.
///
/// # Examples
///
/// ```
/// use u_delivery::env::{EnvConfig, RoutingEpisode};
///
/// let mut env = RoutingEpisode::new(EnvConfig::default().with_n_stops(3).with_seed(7)).unwrap();
/// let start = env.current_state().unwrap();
///
/// let next = (start + 1) % 3;
/// let step = env.step(next).unwrap();
/// assert_eq!(step.state, next);
/// assert_eq!(step.reward, env.cost_matrix().get(start, next));
/// assert!(!step.done);
/// ```
#[derive(Debug, Clone)]
pub struct RoutingEpisode<R = StdRng> {
    config: EnvConfig,
    stops: Vec<Stop>,
    costs: CostMatrix,
    visited: VisitedSequence,
    total_reward: f64,
    rng: R,
}

impl RoutingEpisode<StdRng> {
    /// Creates an environment whose random source comes from `config.seed`,
    /// or from the OS when no seed is set.
    pub fn new(config: EnvConfig) -> Result<Self> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::with_rng(config, rng)
    }
}

impl<R: Rng> RoutingEpisode<R> {
    /// Creates an environment drawing stops, costs and starts from `rng`.
    ///
    /// `config.seed` is ignored.
    pub fn with_rng(config: EnvConfig, mut rng: R) -> Result<Self> {
        config.validate()?;
        let stops = (0..config.n_stops)
            .map(|i| {
                let x = rng.random_range(0.0..config.max_box);
                let y = rng.random_range(0.0..config.max_box);
                Stop::new(i, x, y)
            })
            .collect();
        Self::assemble(config, stops, rng)
    }

    /// Creates an environment over caller-supplied coordinates.
    ///
    /// `coordinates.len()` must equal `config.n_stops` and every value must
    /// be finite with magnitude at most [`MAX_COORDINATE`].
    pub fn from_coordinates(
        config: EnvConfig,
        coordinates: &[(f64, f64)],
        rng: R,
    ) -> Result<Self> {
        config.validate()?;
        if coordinates.len() != config.n_stops {
            return Err(EnvError::Configuration(format!(
                "expected {} coordinates, got {}",
                config.n_stops,
                coordinates.len()
            )));
        }
        if let Some(i) = coordinates
            .iter()
            .position(|(x, y)| !(x.abs() <= MAX_COORDINATE && y.abs() <= MAX_COORDINATE))
        {
            return Err(EnvError::Configuration(format!(
                "coordinates of stop {i} must be finite with magnitude at most {MAX_COORDINATE:e}"
            )));
        }
        let stops = coordinates
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| Stop::new(i, x, y))
            .collect();
        Self::assemble(config, stops, rng)
    }

    fn assemble(config: EnvConfig, stops: Vec<Stop>, mut rng: R) -> Result<Self> {
        let costs = config.metric.build(&stops, config.max_box, &mut rng)?;
        info!(
            n_stops = config.n_stops,
            metric = %config.metric,
            "initialized delivery environment"
        );

        let mut episode = Self {
            config,
            stops,
            costs,
            visited: VisitedSequence::new(),
            total_reward: 0.0,
            rng,
        };
        episode.reset();
        Ok(episode)
    }

    /// Starts a new episode at a uniformly random stop.
    pub fn reset(&mut self) {
        let start = self.rng.random_range(0..self.config.n_stops);
        self.restart_at(start);
    }

    /// Starts a new episode at `start`.
    pub fn reset_to(&mut self, start: usize) -> Result<()> {
        self.check_range(start)?;
        self.restart_at(start);
        Ok(())
    }

    fn restart_at(&mut self, start: usize) {
        self.visited.restart(start);
        self.total_reward = 0.0;
        debug!(start, "episode reset");
    }

    /// Moves the vehicle from the current stop to `destination`.
    ///
    /// The reward is `cost[current][destination]`. `done` becomes `true`
    /// once the route holds `n_stops` entries and stays `true` for lenient
    /// steps past that point. A rejected step leaves the episode untouched.
    pub fn step(&mut self, destination: usize) -> Result<StepResult> {
        self.check_range(destination)?;
        let current = self.visited.current()?;

        if self.config.policy == StepPolicy::Strict {
            if self.status() == EpisodeStatus::Terminal {
                debug!(destination, "step rejected: episode terminated");
                return Err(EnvError::EpisodeTerminated {
                    n_stops: self.config.n_stops,
                });
            }
            if self.visited.contains(destination) {
                debug!(destination, "step rejected: stop already visited");
                return Err(EnvError::RevisitedStop { destination });
            }
        }

        let reward = self.costs.get(current, destination);
        self.visited.push(destination);
        self.total_reward += reward;
        let done = self.visited.len() >= self.config.n_stops;
        trace!(from = current, to = destination, reward, done, "step");

        Ok(StepResult {
            state: destination,
            reward,
            done,
        })
    }

    fn check_range(&self, destination: usize) -> Result<()> {
        if destination >= self.config.n_stops {
            debug!(destination, "stop index out of range");
            return Err(EnvError::InvalidAction {
                destination,
                n_stops: self.config.n_stops,
            });
        }
        Ok(())
    }
}

impl<R> RoutingEpisode<R> {
    /// The most recently visited stop.
    pub fn current_state(&self) -> Result<usize> {
        self.visited.current()
    }

    /// Coordinates of the start stop and, once the vehicle has moved, of the
    /// most recent stop.
    pub fn start_and_end_positions(&self) -> Result<((f64, f64), Option<(f64, f64)>)> {
        let first = self.visited.first().ok_or(EnvError::EmptyEpisode)?;
        let start = self.stops[first].position();
        let end = if self.visited.len() > 1 {
            Some(self.stops[self.visited.current()?].position())
        } else {
            None
        };
        Ok((start, end))
    }

    /// Current lifecycle state.
    pub fn status(&self) -> EpisodeStatus {
        if self.visited.is_empty() {
            EpisodeStatus::Unstarted
        } else if self.visited.len() >= self.config.n_stops {
            EpisodeStatus::Terminal
        } else {
            EpisodeStatus::Active
        }
    }

    /// Returns `true` once the route holds `n_stops` entries.
    pub fn is_done(&self) -> bool {
        self.status() == EpisodeStatus::Terminal
    }

    /// All stops, indexed by stop number.
    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    /// Stop coordinates as `(x, y)` pairs.
    pub fn coordinates(&self) -> Vec<(f64, f64)> {
        self.stops.iter().map(Stop::position).collect()
    }

    /// Route taken so far in this episode.
    pub fn visited(&self) -> &VisitedSequence {
        &self.visited
    }

    /// Stops not yet visited in this episode, in index order.
    pub fn unvisited(&self) -> Vec<usize> {
        (0..self.config.n_stops)
            .filter(|&s| !self.visited.contains(s))
            .collect()
    }

    /// Returns `true` if `stop` appears in the current route.
    pub fn is_visited(&self, stop: usize) -> bool {
        self.visited.contains(stop)
    }

    /// Pairwise costs used for reward lookups.
    pub fn cost_matrix(&self) -> &CostMatrix {
        &self.costs
    }

    /// Sum of the rewards collected since the last reset.
    pub fn total_reward(&self) -> f64 {
        self.total_reward
    }

    /// Number of stops.
    pub fn n_stops(&self) -> usize {
        self.config.n_stops
    }

    /// Coordinate upper bound.
    pub fn max_box(&self) -> f64 {
        self.config.max_box
    }

    /// Metric the cost matrix was built with.
    pub fn metric(&self) -> CostMetric {
        self.config.metric
    }

    /// Revisit / termination policy.
    pub fn policy(&self) -> StepPolicy {
        self.config.policy
    }

    /// Configuration the environment was built from.
    pub fn config(&self) -> &EnvConfig {
        &self.config
    }

    /// Owned copy of everything a renderer needs.
    pub fn snapshot(&self) -> RouteSnapshot {
        RouteSnapshot::new(
            self.coordinates(),
            self.visited.stops().to_vec(),
            self.config.max_box,
        )
    }
}

impl<R: Rng> Environment for RoutingEpisode<R> {
    type Action = usize;
    type Observation = usize;

    fn reset(&mut self) -> usize {
        Self::reset(self);
        self.visited.first().unwrap_or_default()
    }

    fn step(&mut self, action: usize) -> Result<StepResult> {
        Self::step(self, action)
    }

    fn action_space(&self) -> usize {
        self.config.n_stops
    }

    fn observation_space(&self) -> usize {
        self.config.n_stops
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle(policy: StepPolicy) -> RoutingEpisode {
        let config = EnvConfig::default().with_n_stops(3).with_policy(policy);
        let mut env = RoutingEpisode::from_coordinates(
            config,
            &[(0.0, 0.0), (3.0, 4.0), (0.0, 4.0)],
            StdRng::seed_from_u64(0),
        )
        .expect("valid");
        env.reset_to(0).expect("in range");
        env
    }

    #[test]
    fn test_triangle_scenario() {
        let mut env = triangle(StepPolicy::Lenient);
        let expected = [[0.0, 5.0, 4.0], [5.0, 0.0, 3.0], [4.0, 3.0, 0.0]];
        for (i, row) in expected.iter().enumerate() {
            for (j, &v) in row.iter().enumerate() {
                assert!((env.cost_matrix().get(i, j) - v).abs() < 1e-10);
            }
        }

        let (state, reward, done) = env.step(1).expect("valid").into_tuple();
        assert_eq!(state, 1);
        assert!((reward - 5.0).abs() < 1e-10);
        assert!(!done);

        let (state, reward, done) = env.step(2).expect("valid").into_tuple();
        assert_eq!(state, 2);
        assert!((reward - 3.0).abs() < 1e-10);
        assert!(done);
        assert_eq!(env.status(), EpisodeStatus::Terminal);
        assert!((env.total_reward() - 8.0).abs() < 1e-10);
    }

    #[test]
    fn test_single_stop_episode() {
        let mut env =
            RoutingEpisode::new(EnvConfig::default().with_n_stops(1).with_seed(3)).expect("valid");
        assert_eq!(env.current_state(), Ok(0));
        assert_eq!(env.visited().len(), 1);

        let step = env.step(0).expect("valid");
        assert_eq!(step.state, 0);
        assert_eq!(step.reward, 0.0);
        assert!(step.done);
    }

    #[test]
    fn test_new_validates_config() {
        assert!(matches!(
            RoutingEpisode::new(EnvConfig::default().with_n_stops(0)),
            Err(EnvError::Configuration(_))
        ));
        assert!(matches!(
            RoutingEpisode::new(EnvConfig::default().with_max_box(0.0)),
            Err(EnvError::Configuration(_))
        ));
    }

    #[test]
    fn test_from_coordinates_validates() {
        let config = EnvConfig::default().with_n_stops(2);
        let rng = StdRng::seed_from_u64(0);
        assert!(
            RoutingEpisode::from_coordinates(config.clone(), &[(0.0, 0.0)], rng.clone()).is_err()
        );
        assert!(RoutingEpisode::from_coordinates(
            config,
            &[(0.0, 0.0), (f64::NAN, 1.0)],
            rng.clone()
        )
        .is_err());
        assert!(RoutingEpisode::from_coordinates(
            EnvConfig::default().with_n_stops(2),
            &[(-f64::MAX, 0.0), (f64::MAX, 0.0)],
            rng
        )
        .is_err());
    }

    #[test]
    fn test_out_of_range_step_leaves_state() {
        let mut env = triangle(StepPolicy::Lenient);
        let err = env.step(3).unwrap_err();
        assert_eq!(
            err,
            EnvError::InvalidAction {
                destination: 3,
                n_stops: 3
            }
        );
        assert_eq!(env.visited().stops(), &[0]);
        assert_eq!(env.total_reward(), 0.0);
    }

    #[test]
    fn test_reset_to_out_of_range() {
        let mut env = triangle(StepPolicy::Lenient);
        env.step(2).expect("valid");
        assert!(env.reset_to(5).unwrap_err().is_invalid_action());
        assert_eq!(env.visited().stops(), &[0, 2]);
    }

    #[test]
    fn test_lenient_allows_revisits_and_overrun() {
        let mut env = triangle(StepPolicy::Lenient);
        let r = env.step(0).expect("revisit allowed");
        assert_eq!(r.reward, 0.0);
        assert!(!r.done);
        env.step(1).expect("valid");
        assert!(env.is_done());

        let r = env.step(2).expect("overrun allowed");
        assert!(r.done);
        assert_eq!(env.visited().len(), 4);
        assert_eq!(env.status(), EpisodeStatus::Terminal);
    }

    #[test]
    fn test_strict_rejects_revisit() {
        let mut env = triangle(StepPolicy::Strict);
        assert_eq!(
            env.step(0),
            Err(EnvError::RevisitedStop { destination: 0 })
        );
        env.step(1).expect("valid");
        assert_eq!(
            env.step(1),
            Err(EnvError::RevisitedStop { destination: 1 })
        );
        assert_eq!(env.visited().stops(), &[0, 1]);
    }

    #[test]
    fn test_strict_rejects_step_after_terminal() {
        let mut env = triangle(StepPolicy::Strict);
        env.step(1).expect("valid");
        assert!(env.step(2).expect("valid").done);
        assert_eq!(env.step(0), Err(EnvError::EpisodeTerminated { n_stops: 3 }));
        assert_eq!(env.visited().len(), 3);

        env.reset_to(2).expect("in range");
        assert_eq!(env.status(), EpisodeStatus::Active);
        assert!(env.step(0).is_ok());
    }

    #[test]
    fn test_start_and_end_positions() {
        let mut env = triangle(StepPolicy::Lenient);
        let (start, end) = env.start_and_end_positions().expect("started");
        assert_eq!(start, (0.0, 0.0));
        assert_eq!(end, None);

        env.step(1).expect("valid");
        let (start, end) = env.start_and_end_positions().expect("started");
        assert_eq!(start, (0.0, 0.0));
        assert_eq!(end, Some((3.0, 4.0)));
    }

    #[test]
    fn test_reset_keeps_stops_and_costs() {
        let mut env =
            RoutingEpisode::new(EnvConfig::default().with_n_stops(6).with_seed(21)).expect("valid");
        let coords = env.coordinates();
        let costs = env.cost_matrix().clone();

        for _ in 0..4 {
            env.step(0).expect("valid");
        }
        env.reset();
        assert_eq!(env.visited().len(), 1);
        assert_eq!(env.total_reward(), 0.0);
        assert_eq!(env.coordinates(), coords);
        assert_eq!(env.cost_matrix(), &costs);
    }

    #[test]
    fn test_seed_reproducible() {
        let config = EnvConfig::default()
            .with_n_stops(8)
            .with_metric(CostMetric::Time)
            .with_seed(99);
        let a = RoutingEpisode::new(config.clone()).expect("valid");
        let b = RoutingEpisode::new(config).expect("valid");
        assert_eq!(a.coordinates(), b.coordinates());
        assert_eq!(a.cost_matrix(), b.cost_matrix());
        assert_eq!(a.current_state(), b.current_state());
    }

    #[test]
    fn test_config_accessors() {
        let config = EnvConfig::default()
            .with_n_stops(4)
            .with_max_box(25.0)
            .with_metric(CostMetric::Time)
            .with_policy(StepPolicy::Strict)
            .with_seed(5);
        let env = RoutingEpisode::new(config.clone()).expect("valid");
        assert_eq!(env.n_stops(), 4);
        assert_eq!(env.max_box(), 25.0);
        assert_eq!(env.metric(), CostMetric::Time);
        assert_eq!(env.policy(), StepPolicy::Strict);
        assert_eq!(env.config(), &config);
        assert_eq!(env.stops().len(), 4);
        assert_eq!(env.cost_matrix().size(), 4);
    }

    #[test]
    fn test_huge_box_distances_stay_finite() {
        let config = EnvConfig::default()
            .with_n_stops(50)
            .with_max_box(1e300)
            .with_seed(3);
        let env = RoutingEpisode::new(config).expect("valid");
        let cm = env.cost_matrix();
        for i in 0..50 {
            for j in 0..50 {
                assert!(cm.get(i, j).is_finite(), "cost[{i}][{j}]");
            }
        }
        assert!(cm.is_symmetric(0.0));
    }

    #[test]
    fn test_unvisited() {
        let mut env = triangle(StepPolicy::Lenient);
        assert_eq!(env.unvisited(), vec![1, 2]);
        env.step(2).expect("valid");
        assert_eq!(env.unvisited(), vec![1]);
        assert!(env.is_visited(2));
        assert!(!env.is_visited(1));
    }

    #[test]
    fn test_environment_trait() {
        let mut env = triangle(StepPolicy::Lenient);
        assert_eq!(Environment::action_space(&env), 3);
        assert_eq!(Environment::observation_space(&env), 3);

        let start = Environment::reset(&mut env);
        assert_eq!(env.current_state(), Ok(start));
        let r = Environment::step(&mut env, (start + 1) % 3).expect("valid");
        assert_eq!(r.state, (start + 1) % 3);
    }

    #[test]
    fn test_snapshot_is_detached() {
        let mut env = triangle(StepPolicy::Lenient);
        env.step(1).expect("valid");
        let snap = env.snapshot();
        env.step(2).expect("valid");
        assert_eq!(snap.visited(), &[0, 1]);
        assert_eq!(env.visited().stops(), &[0, 1, 2]);
    }
}
