//! Result records returned by the planner.

use pyo3::prelude::*;

/// Expected duration and variance of one task.
#[pyclass]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TaskEstimate {
    #[pyo3(get)]
    pub expected: f64,
    #[pyo3(get)]
    pub variance: f64,
}

#[pymethods]
impl TaskEstimate {
    #[new]
    fn new(expected: f64, variance: f64) -> Self {
        Self { expected, variance }
    }

    fn __repr__(&self) -> String {
        format!(
            "TaskEstimate(expected={}, variance={})",
            self.expected, self.variance
        )
    }
}

/// Event times and per-task time reserves.
///
/// Event vectors are indexed by event, task vectors by task.
///
/// With the "overwrite" duplicate policy a replaced task still has an entry
/// in every task vector. Its times and reserves come from its own endpoints,
/// but it lies on no path and never counts toward the critical length.
#[pyclass]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DeterministicIndicators {
    /// Length of the critical path.
    #[pyo3(get)]
    pub critical_length: f64,
    #[pyo3(get)]
    pub early_times: Vec<f64>,
    #[pyo3(get)]
    pub late_times: Vec<f64>,
    #[pyo3(get)]
    pub task_early_start: Vec<f64>,
    #[pyo3(get)]
    pub task_early_end: Vec<f64>,
    #[pyo3(get)]
    pub task_late_start: Vec<f64>,
    #[pyo3(get)]
    pub task_late_end: Vec<f64>,
    /// late(end) - early(start) - duration
    #[pyo3(get)]
    pub full_reserves: Vec<f64>,
    /// early(end) - late(start) - duration; may be negative
    #[pyo3(get)]
    pub independent_reserves: Vec<f64>,
    /// late(end) - late(start) - duration
    #[pyo3(get)]
    pub private_reserves_1: Vec<f64>,
    /// early(end) - early(start) - duration
    #[pyo3(get)]
    pub private_reserves_2: Vec<f64>,
    /// Tasks without full reserve, ascending.
    #[pyo3(get)]
    pub critical_tasks: Vec<usize>,
}

#[pymethods]
impl DeterministicIndicators {
    fn __repr__(&self) -> String {
        format!(
            "DeterministicIndicators(critical_length={}, events={}, tasks={})",
            self.critical_length,
            self.early_times.len(),
            self.full_reserves.len()
        )
    }
}

/// Slack of one full source-to-runoff path.
#[pyclass]
#[derive(Clone, Debug, PartialEq)]
pub struct PathReserve {
    /// Comma-joined event sequence identifying the path.
    #[pyo3(get)]
    pub label: String,
    #[pyo3(get)]
    pub events: Vec<usize>,
    #[pyo3(get)]
    pub tasks: Vec<usize>,
    #[pyo3(get)]
    pub duration: f64,
    #[pyo3(get)]
    pub variance: f64,
    /// critical length - duration
    #[pyo3(get)]
    pub slack: f64,
}

#[pymethods]
impl PathReserve {
    fn __repr__(&self) -> String {
        format!("PathReserve(events={:?}, slack={})", self.label, self.slack)
    }
}

/// Completion probabilities against directive times.
#[pyclass]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProbabilisticIndicators {
    /// Largest accumulated variance over paths from the source, per event.
    #[pyo3(get)]
    pub max_variances: Vec<f64>,
    /// Events of the path that produced `max_variances`, per event.
    #[pyo3(get)]
    pub variance_paths: Vec<Vec<usize>>,
    /// P(early time <= directive time) per event; `None` for the source.
    #[pyo3(get)]
    pub probabilities: Vec<Option<f64>>,
}

#[pymethods]
impl ProbabilisticIndicators {
    fn __repr__(&self) -> String {
        format!(
            "ProbabilisticIndicators(events={})",
            self.probabilities.len()
        )
    }
}
