//! Planning session: one validated network and its cached task estimates.

use crate::config::PlannerConfig;
use crate::deterministic::{deterministic_indicators, path_reserves};
use crate::models::{DeterministicIndicators, PathReserve, ProbabilisticIndicators, TaskEstimate};
use crate::network::{
    estimate_tasks, EventId, LongestPaths, Network, NetworkError, NetworkInput, Path,
    PathEnumerator,
};
use crate::probabilistic::probabilistic_indicators;
use crate::{log_steps, log_summary};

/// A planning session over a single project network.
///
/// The network is validated once at construction. Queries never re-validate
/// and can be repeated; each one recomputes from the cached estimates.
#[derive(Clone, Debug)]
pub struct NetPlanner {
    network: Network,
    estimates: Vec<TaskEstimate>,
    config: PlannerConfig,
}

impl NetPlanner {
    /// Build a session, using the estimation method and duplicate policy from `config`.
    pub fn new(input: &NetworkInput, config: PlannerConfig) -> Result<Self, NetworkError> {
        let method = config.estimation_method()?;
        let policy = config.duplicate_policy()?;
        config.check_precision()?;
        let network = Network::build(input, method, policy, config.verbosity)?;
        let estimates = estimate_tasks(method, network.tasks(), config.duration_precision);

        Ok(Self {
            network,
            estimates,
            config,
        })
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Expected duration and variance per task.
    pub fn estimates(&self) -> &[TaskEstimate] {
        &self.estimates
    }

    fn longest_paths(&self) -> LongestPaths {
        let durations: Vec<f64> = self.estimates.iter().map(|e| e.expected).collect();
        LongestPaths::compute(&self.network, &durations)
    }

    /// Event times, task times and task reserves.
    pub fn deterministic(&self) -> DeterministicIndicators {
        log_steps!(self.config.verbosity, "Computing deterministic indicators");
        let result = deterministic_indicators(&self.network, &self.estimates, &self.longest_paths());
        log_summary!(
            self.config.verbosity,
            "Critical length {} with {} critical tasks",
            result.critical_length,
            result.critical_tasks.len()
        );
        result
    }

    /// Slack of every full source-to-runoff path.
    pub fn path_reserves(&self) -> Vec<PathReserve> {
        let reserves = path_reserves(
            &self.network,
            &self.estimates,
            &self.longest_paths(),
            self.config.slack_precision,
            self.config.verbosity,
        );
        log_summary!(self.config.verbosity, "Enumerated {} full paths", reserves.len());
        reserves
    }

    /// Governing variance and completion probability per event.
    pub fn probabilistic(&self) -> ProbabilisticIndicators {
        probabilistic_indicators(
            &self.network,
            &self.estimates,
            &self.longest_paths(),
            self.config.verbosity,
        )
    }

    /// Every path between two events, `None` if either event does not exist.
    pub fn paths_between(&self, start: EventId, end: EventId) -> Option<Vec<Path>> {
        let n = self.network.events_count();
        if start >= n || end >= n {
            return None;
        }
        Some(PathEnumerator::new(&self.network, &self.estimates).paths(start, end))
    }
}
