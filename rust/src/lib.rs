//! Rust implementation of the network planning engine.
//!
//! Computes CPM/PERT indicators for a project network of events joined by
//! tasks: duration estimates, event times, task reserves, full-path slack and
//! the probability of meeting directive times.

// Allow clippy warning triggered by PyO3 macro expansion
#![allow(clippy::useless_conversion)]

use pyo3::prelude::*;

mod config;
pub mod deterministic;
pub mod logging;
mod models;
pub mod network;
mod planner;
pub mod probabilistic;

pub use config::{ConfigError, PlannerConfig};
pub use models::{DeterministicIndicators, PathReserve, ProbabilisticIndicators, TaskEstimate};
pub use network::{
    DuplicatePolicy, EstimationMethod, EventId, Network, NetworkError, NetworkInput, Path, TaskId,
};
pub use planner::NetPlanner;

use network::resolve_count;

fn to_py_err(e: NetworkError) -> PyErr {
    pyo3::exceptions::PyValueError::new_err(e.to_string())
}

/// Planning session (PyO3 wrapper).
#[pyclass(name = "NetPlanner")]
pub struct PyNetPlanner {
    inner: NetPlanner,
}

#[pymethods]
impl PyNetPlanner {
    /// Build and validate a network.
    ///
    /// # Arguments
    /// * `tasks_count` / `events_count` - Declared sizes of the task and event vectors
    /// * `use_three_point` - Use PERT three-point estimates (requires `most_likely`)
    /// * `optimistic` / `pessimistic` - Per-task duration estimates
    /// * `start_events` / `end_events` - Per-task event indices
    /// * `directive_times` - Per-event deadline used for probabilities
    /// * `most_likely` - Per-task most likely duration, three-point mode only
    /// * `config` - Planner configuration; its estimation method is replaced by `use_three_point`
    ///
    /// # Raises
    /// * ValueError if a count is negative, the input is malformed, or the network
    ///   is not a single-source, single-runoff acyclic graph
    #[new]
    #[pyo3(signature = (
        tasks_count,
        events_count,
        use_three_point,
        optimistic,
        pessimistic,
        start_events,
        end_events,
        directive_times,
        most_likely=None,
        config=None
    ))]
    #[allow(clippy::too_many_arguments)]
    fn new(
        tasks_count: i64,
        events_count: i64,
        use_three_point: bool,
        optimistic: Vec<f64>,
        pessimistic: Vec<f64>,
        start_events: Vec<i64>,
        end_events: Vec<i64>,
        directive_times: Vec<f64>,
        most_likely: Option<Vec<f64>>,
        config: Option<PlannerConfig>,
    ) -> PyResult<Self> {
        let method = if use_three_point {
            EstimationMethod::ThreePoint
        } else {
            EstimationMethod::TwoPoint
        };
        let config = config.unwrap_or_default().with_estimation(method);
        let input = NetworkInput {
            tasks_count: resolve_count("tasks_count", tasks_count).map_err(to_py_err)?,
            events_count: resolve_count("events_count", events_count).map_err(to_py_err)?,
            optimistic,
            pessimistic,
            most_likely,
            start_events,
            end_events,
            directive_times,
        };

        let inner = NetPlanner::new(&input, config).map_err(to_py_err)?;
        Ok(Self { inner })
    }

    #[getter]
    fn source(&self) -> usize {
        self.inner.network().source()
    }

    #[getter]
    fn runoff(&self) -> usize {
        self.inner.network().runoff()
    }

    /// Expected duration and variance per task.
    fn estimates(&self) -> Vec<TaskEstimate> {
        self.inner.estimates().to_vec()
    }

    /// Event times, task times and the four task reserves.
    fn deterministic(&self) -> DeterministicIndicators {
        self.inner.deterministic()
    }

    /// Slack of every full source-to-runoff path.
    fn path_reserves(&self) -> Vec<PathReserve> {
        self.inner.path_reserves()
    }

    /// Governing variance and completion probability per event.
    fn probabilistic(&self) -> ProbabilisticIndicators {
        self.inner.probabilistic()
    }

    /// Every path from `start` to `end`.
    ///
    /// # Raises
    /// * ValueError if either event does not exist
    fn paths_between(&self, start: usize, end: usize) -> PyResult<Vec<Path>> {
        self.inner.paths_between(start, end).ok_or_else(|| {
            pyo3::exceptions::PyValueError::new_err(format!(
                "Events {} and {} must both be below {}",
                start,
                end,
                self.inner.network().events_count()
            ))
        })
    }

    fn __repr__(&self) -> String {
        let network = self.inner.network();
        format!(
            "NetPlanner(events={}, tasks={}, source={}, runoff={})",
            network.events_count(),
            network.tasks_count(),
            network.source(),
            network.runoff()
        )
    }
}

/// The netplan.rust Python module.
#[pymodule]
fn rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Session
    m.add_class::<PyNetPlanner>()?;

    // Config types
    m.add_class::<PlannerConfig>()?;

    // Result types
    m.add_class::<TaskEstimate>()?;
    m.add_class::<DeterministicIndicators>()?;
    m.add_class::<PathReserve>()?;
    m.add_class::<ProbabilisticIndicators>()?;
    m.add_class::<Path>()?;

    Ok(())
}
