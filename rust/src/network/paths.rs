//! Exhaustive enumeration of directed paths between two events.
//!
//! The number of paths grows exponentially with the density of the network.
//! Callers need the explicit path list, so no cutoff is applied; this is a
//! known scaling limit for large, densely connected networks.

use pyo3::prelude::*;

use crate::models::TaskEstimate;

use super::builder::Network;
use super::types::{EventId, TaskId};

/// One directed path with its accumulated duration and variance.
#[pyclass]
#[derive(Clone, Debug, PartialEq)]
pub struct Path {
    /// Visited events, from start to end.
    #[pyo3(get)]
    pub events: Vec<EventId>,
    /// Traversed tasks; one fewer than `events`.
    #[pyo3(get)]
    pub tasks: Vec<TaskId>,
    /// Sum of expected durations along the path.
    #[pyo3(get)]
    pub duration: f64,
    /// Sum of variances along the path.
    #[pyo3(get)]
    pub variance: f64,
}

#[pymethods]
impl Path {
    /// Comma-joined event sequence, e.g. `"0, 1, 3"`.
    pub fn label(&self) -> String {
        self.events
            .iter()
            .map(|event| event.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn __repr__(&self) -> String {
        format!(
            "Path(events={:?}, duration={}, variance={})",
            self.label(),
            self.duration,
            self.variance
        )
    }
}

/// Depth-first path enumerator over a validated network.
pub struct PathEnumerator<'a> {
    network: &'a Network,
    estimates: &'a [TaskEstimate],
}

impl<'a> PathEnumerator<'a> {
    pub fn new(network: &'a Network, estimates: &'a [TaskEstimate]) -> Self {
        Self { network, estimates }
    }

    /// Every path from `start` to `end`.
    ///
    /// Successors are explored in ascending event order, so the result order
    /// is deterministic. A path from an event to itself is the single
    /// zero-length path. Terminates because the network is acyclic.
    pub fn paths(&self, start: EventId, end: EventId) -> Vec<Path> {
        let mut found = Vec::new();
        let mut events = vec![start];
        let mut tasks = Vec::new();
        self.descend(start, end, &mut events, &mut tasks, 0.0, 0.0, &mut found);
        found
    }

    #[allow(clippy::too_many_arguments)]
    fn descend(
        &self,
        current: EventId,
        end: EventId,
        events: &mut Vec<EventId>,
        tasks: &mut Vec<TaskId>,
        duration: f64,
        variance: f64,
        found: &mut Vec<Path>,
    ) {
        if current == end {
            found.push(Path {
                events: events.clone(),
                tasks: tasks.clone(),
                duration,
                variance,
            });
            return;
        }

        for &(next, task) in self.network.successors(current) {
            let estimate = &self.estimates[task];
            events.push(next);
            tasks.push(task);
            self.descend(
                next,
                end,
                events,
                tasks,
                duration + estimate.expected,
                variance + estimate.variance,
                found,
            );
            events.pop();
            tasks.pop();
        }
    }
}
