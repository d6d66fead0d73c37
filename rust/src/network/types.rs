//! Identifiers and raw records shared by the network modules.

/// Index of an event in `[0, events_count)`.
pub type EventId = usize;

/// Index of a task in `[0, tasks_count)`.
pub type TaskId = usize;

/// A validated task: its endpoints and raw duration estimates.
#[derive(Clone, Debug, PartialEq)]
pub struct TaskSpec {
    pub start: EventId,
    pub end: EventId,
    pub optimistic: f64,
    pub pessimistic: f64,
    /// Present only when the network uses three-point estimation.
    pub most_likely: Option<f64>,
}

/// Caller-supplied matrices for building a network.
///
/// Event references are signed so that negative indices coming from an
/// editing grid are reported instead of wrapping.
#[derive(Clone, Debug, Default)]
pub struct NetworkInput {
    pub tasks_count: usize,
    pub events_count: usize,
    pub optimistic: Vec<f64>,
    pub pessimistic: Vec<f64>,
    /// Required when building with three-point estimation, ignored otherwise.
    pub most_likely: Option<Vec<f64>>,
    pub start_events: Vec<i64>,
    pub end_events: Vec<i64>,
    pub directive_times: Vec<f64>,
}
