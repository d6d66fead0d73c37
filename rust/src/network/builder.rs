//! Network construction and validation.

use rustc_hash::FxHashMap;
use std::collections::VecDeque;
use thiserror::Error;

use crate::config::ConfigError;
use crate::{log_debug, log_steps};

use super::estimate::EstimationMethod;
use super::types::{EventId, NetworkInput, TaskId, TaskSpec};

/// Errors that can occur while building a network.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NetworkError {
    #[error("{field} must not be negative, got {value}")]
    NegativeCount { field: &'static str, value: i64 },
    #[error("Length of {field} is {actual}, expected {expected}")]
    ShapeMismatch {
        field: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("Task {task} references event {event}, but events are numbered 0..{event_count}")]
    InvalidEventIndex {
        task: TaskId,
        event: i64,
        event_count: usize,
    },
    #[error("Task {task} has a non-finite {field} estimate: {value}")]
    InvalidEstimate {
        task: TaskId,
        field: &'static str,
        value: f64,
    },
    #[error("Event {event} has an invalid directive time: {value}")]
    InvalidDirectiveTime { event: EventId, value: f64 },
    #[error("Tasks {first} and {second} both connect event {start} to event {end}")]
    DuplicateTask {
        start: EventId,
        end: EventId,
        first: TaskId,
        second: TaskId,
    },
    #[error("Network has no source event")]
    NoSource,
    #[error("Network has multiple source events: {0:?}")]
    MultipleSources(Vec<EventId>),
    #[error("Network has no runoff event")]
    NoRunoff,
    #[error("Network has multiple runoff events: {0:?}")]
    MultipleRunoffs(Vec<EventId>),
    #[error("Circular dependency detected in task network")]
    CyclicNetwork,
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Handling of a second task between an already connected pair of events.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// Fail with [`NetworkError::DuplicateTask`].
    #[default]
    Reject,
    /// The later task replaces the earlier one in the event lookup.
    Overwrite,
}

/// A validated, immutable project network.
///
/// Every event is reachable from the source and reaches the runoff, and the
/// task graph is acyclic.
#[derive(Clone, Debug)]
pub struct Network {
    events_count: usize,
    method: EstimationMethod,
    tasks: Vec<TaskSpec>,
    /// (start, end) -> task occupying that pair.
    lookup: FxHashMap<(EventId, EventId), TaskId>,
    /// Outgoing (end event, task) pairs per event, ascending by end event.
    successors: Vec<Vec<(EventId, TaskId)>>,
    directive_times: Vec<f64>,
    source: EventId,
    runoff: EventId,
}

/// Convert a caller-supplied task or event count.
pub fn resolve_count(field: &'static str, value: i64) -> Result<usize, NetworkError> {
    usize::try_from(value).map_err(|_| NetworkError::NegativeCount { field, value })
}

fn check_len(field: &'static str, expected: usize, actual: usize) -> Result<(), NetworkError> {
    if expected != actual {
        return Err(NetworkError::ShapeMismatch {
            field,
            expected,
            actual,
        });
    }
    Ok(())
}

fn check_finite(field: &'static str, values: &[f64]) -> Result<(), NetworkError> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(task) => Err(NetworkError::InvalidEstimate {
            task,
            field,
            value: values[task],
        }),
        None => Ok(()),
    }
}

fn resolve_event(task: TaskId, event: i64, event_count: usize) -> Result<EventId, NetworkError> {
    if event < 0 || event as u64 >= event_count as u64 {
        return Err(NetworkError::InvalidEventIndex {
            task,
            event,
            event_count,
        });
    }
    Ok(event as EventId)
}

impl Network {
    /// Validate the input matrices and build the network.
    ///
    /// Checks run in order: vector shapes, estimate values, event indices,
    /// duplicate pairs, source/runoff uniqueness, acyclicity. The first
    /// failure is returned and nothing is constructed.
    pub fn build(
        input: &NetworkInput,
        method: EstimationMethod,
        policy: DuplicatePolicy,
        verbosity: u8,
    ) -> Result<Self, NetworkError> {
        let n_tasks = input.tasks_count;
        let n_events = input.events_count;

        check_len("optimistic", n_tasks, input.optimistic.len())?;
        check_len("pessimistic", n_tasks, input.pessimistic.len())?;
        check_len("start_events", n_tasks, input.start_events.len())?;
        check_len("end_events", n_tasks, input.end_events.len())?;
        check_len("directive_times", n_events, input.directive_times.len())?;
        let most_likely = match method {
            EstimationMethod::ThreePoint => {
                let values = input.most_likely.as_deref().unwrap_or(&[]);
                check_len("most_likely", n_tasks, values.len())?;
                Some(values)
            }
            EstimationMethod::TwoPoint => None,
        };

        check_finite("optimistic", &input.optimistic)?;
        check_finite("pessimistic", &input.pessimistic)?;
        if let Some(values) = most_likely {
            check_finite("most_likely", values)?;
        }
        if let Some(event) = input.directive_times.iter().position(|t| t.is_nan()) {
            return Err(NetworkError::InvalidDirectiveTime {
                event,
                value: input.directive_times[event],
            });
        }

        let mut tasks = Vec::with_capacity(n_tasks);
        for task in 0..n_tasks {
            tasks.push(TaskSpec {
                start: resolve_event(task, input.start_events[task], n_events)?,
                end: resolve_event(task, input.end_events[task], n_events)?,
                optimistic: input.optimistic[task],
                pessimistic: input.pessimistic[task],
                most_likely: most_likely.map(|values| values[task]),
            });
        }

        let mut lookup: FxHashMap<(EventId, EventId), TaskId> =
            FxHashMap::with_capacity_and_hasher(n_tasks, Default::default());
        for (id, task) in tasks.iter().enumerate() {
            if let Some(previous) = lookup.insert((task.start, task.end), id) {
                match policy {
                    DuplicatePolicy::Reject => {
                        return Err(NetworkError::DuplicateTask {
                            start: task.start,
                            end: task.end,
                            first: previous,
                            second: id,
                        });
                    }
                    DuplicatePolicy::Overwrite => {
                        log_debug!(
                            verbosity,
                            "Task {} replaces task {} between events {} and {}",
                            id,
                            previous,
                            task.start,
                            task.end
                        );
                    }
                }
            }
        }

        let mut successors: Vec<Vec<(EventId, TaskId)>> = vec![Vec::new(); n_events];
        let mut in_degree = vec![0usize; n_events];
        for (&(start, end), &task) in &lookup {
            successors[start].push((end, task));
            in_degree[end] += 1;
        }
        for outgoing in &mut successors {
            outgoing.sort_unstable();
        }

        let sources: Vec<EventId> = (0..n_events).filter(|&e| in_degree[e] == 0).collect();
        let source = match sources.len() {
            0 => return Err(NetworkError::NoSource),
            1 => sources[0],
            _ => return Err(NetworkError::MultipleSources(sources)),
        };
        let runoffs: Vec<EventId> = (0..n_events)
            .filter(|&e| successors[e].is_empty())
            .collect();
        let runoff = match runoffs.len() {
            0 => return Err(NetworkError::NoRunoff),
            1 => runoffs[0],
            _ => return Err(NetworkError::MultipleRunoffs(runoffs)),
        };

        check_acyclic(&successors, in_degree)?;

        log_steps!(
            verbosity,
            "Built network: {} events, {} tasks, source {}, runoff {}",
            n_events,
            n_tasks,
            source,
            runoff
        );

        Ok(Self {
            events_count: n_events,
            method,
            tasks,
            lookup,
            successors,
            directive_times: input.directive_times.clone(),
            source,
            runoff,
        })
    }

    pub fn events_count(&self) -> usize {
        self.events_count
    }

    pub fn tasks_count(&self) -> usize {
        self.tasks.len()
    }

    pub fn method(&self) -> EstimationMethod {
        self.method
    }

    /// The unique event without incoming tasks.
    pub fn source(&self) -> EventId {
        self.source
    }

    /// The unique event without outgoing tasks.
    pub fn runoff(&self) -> EventId {
        self.runoff
    }

    pub fn tasks(&self) -> &[TaskSpec] {
        &self.tasks
    }

    /// Task occupying the (start, end) pair, if any.
    #[inline]
    pub fn task_between(&self, start: EventId, end: EventId) -> Option<TaskId> {
        self.lookup.get(&(start, end)).copied()
    }

    /// All occupied (start, end) pairs with their task.
    pub fn connections(&self) -> impl Iterator<Item = ((EventId, EventId), TaskId)> + '_ {
        self.lookup.iter().map(|(&pair, &task)| (pair, task))
    }

    /// Outgoing (end event, task) pairs of an event, ascending by end event.
    #[inline]
    pub fn successors(&self, event: EventId) -> &[(EventId, TaskId)] {
        &self.successors[event]
    }

    pub fn directive_times(&self) -> &[f64] {
        &self.directive_times
    }
}

/// Kahn's algorithm over the event graph; fails if some event is never freed.
fn check_acyclic(
    successors: &[Vec<(EventId, TaskId)>],
    mut in_degree: Vec<usize>,
) -> Result<(), NetworkError> {
    let mut queue: VecDeque<EventId> = in_degree
        .iter()
        .enumerate()
        .filter(|(_, &degree)| degree == 0)
        .map(|(event, _)| event)
        .collect();
    let mut visited = 0;

    while let Some(event) = queue.pop_front() {
        visited += 1;
        for &(next, _) in &successors[event] {
            in_degree[next] -= 1;
            if in_degree[next] == 0 {
                queue.push_back(next);
            }
        }
    }

    if visited != successors.len() {
        return Err(NetworkError::CyclicNetwork);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_input(events_count: usize, edges: &[(i64, i64)]) -> NetworkInput {
        NetworkInput {
            tasks_count: edges.len(),
            events_count,
            optimistic: vec![1.0; edges.len()],
            pessimistic: vec![2.0; edges.len()],
            most_likely: None,
            start_events: edges.iter().map(|&(s, _)| s).collect(),
            end_events: edges.iter().map(|&(_, e)| e).collect(),
            directive_times: vec![0.0; events_count],
        }
    }

    fn build(input: &NetworkInput) -> Result<Network, NetworkError> {
        Network::build(
            input,
            EstimationMethod::TwoPoint,
            DuplicatePolicy::Reject,
            0,
        )
    }

    #[test]
    fn test_chain_endpoints() {
        let network = build(&make_input(3, &[(0, 1), (1, 2)])).unwrap();
        assert_eq!(network.source(), 0);
        assert_eq!(network.runoff(), 2);
        assert_eq!(network.task_between(0, 1), Some(0));
        assert_eq!(network.task_between(1, 2), Some(1));
        assert_eq!(network.task_between(0, 2), None);
    }

    #[test]
    fn test_endpoints_need_not_be_first_and_last() {
        // 2 -> 0 -> 1
        let network = build(&make_input(3, &[(2, 0), (0, 1)])).unwrap();
        assert_eq!(network.source(), 2);
        assert_eq!(network.runoff(), 1);
    }

    #[test]
    fn test_successors_sorted_by_event() {
        let network = build(&make_input(4, &[(0, 3), (0, 2), (0, 1), (1, 3), (2, 3)])).unwrap();
        assert_eq!(network.successors(0), &[(1, 2), (2, 1), (3, 0)]);
        assert!(network.successors(3).is_empty());
    }

    #[test]
    fn test_shape_mismatch() {
        let mut input = make_input(3, &[(0, 1), (1, 2)]);
        input.pessimistic.pop();
        assert_eq!(
            build(&input).unwrap_err(),
            NetworkError::ShapeMismatch {
                field: "pessimistic",
                expected: 2,
                actual: 1
            }
        );

        let mut input = make_input(3, &[(0, 1), (1, 2)]);
        input.directive_times.push(5.0);
        assert!(matches!(
            build(&input),
            Err(NetworkError::ShapeMismatch {
                field: "directive_times",
                ..
            })
        ));

        let mut input = make_input(3, &[(0, 1), (1, 2)]);
        input.end_events.push(2);
        assert!(matches!(
            build(&input),
            Err(NetworkError::ShapeMismatch {
                field: "end_events",
                ..
            })
        ));
    }

    #[test]
    fn test_three_point_requires_most_likely() {
        let input = make_input(3, &[(0, 1), (1, 2)]);
        let result = Network::build(
            &input,
            EstimationMethod::ThreePoint,
            DuplicatePolicy::Reject,
            0,
        );
        assert_eq!(
            result.unwrap_err(),
            NetworkError::ShapeMismatch {
                field: "most_likely",
                expected: 2,
                actual: 0
            }
        );

        let mut input = make_input(3, &[(0, 1), (1, 2)]);
        input.most_likely = Some(vec![1.5, 1.5]);
        let network = Network::build(
            &input,
            EstimationMethod::ThreePoint,
            DuplicatePolicy::Reject,
            0,
        )
        .unwrap();
        assert_eq!(network.tasks()[1].most_likely, Some(1.5));
    }

    #[test]
    fn test_two_point_ignores_most_likely_shape() {
        let mut input = make_input(3, &[(0, 1), (1, 2)]);
        input.most_likely = Some(vec![1.0]);
        let network = build(&input).unwrap();
        assert_eq!(network.tasks()[0].most_likely, None);
    }

    #[test]
    fn test_invalid_event_index() {
        let input = make_input(3, &[(0, 1), (1, 3)]);
        assert_eq!(
            build(&input).unwrap_err(),
            NetworkError::InvalidEventIndex {
                task: 1,
                event: 3,
                event_count: 3
            }
        );

        let input = make_input(3, &[(-1, 1), (1, 2)]);
        assert!(matches!(
            build(&input),
            Err(NetworkError::InvalidEventIndex { task: 0, event: -1, .. })
        ));
    }

    #[test]
    fn test_non_finite_estimate_rejected() {
        let mut input = make_input(3, &[(0, 1), (1, 2)]);
        input.optimistic[1] = f64::NAN;
        assert!(matches!(
            build(&input),
            Err(NetworkError::InvalidEstimate {
                task: 1,
                field: "optimistic",
                ..
            })
        ));
    }

    #[test]
    fn test_nan_directive_time_rejected() {
        let mut input = make_input(3, &[(0, 1), (1, 2)]);
        input.directive_times[2] = f64::NAN;
        assert!(matches!(
            build(&input),
            Err(NetworkError::InvalidDirectiveTime { event: 2, .. })
        ));
    }

    #[test]
    fn test_duplicate_task_rejected() {
        let input = make_input(3, &[(0, 1), (0, 1), (1, 2)]);
        assert_eq!(
            build(&input).unwrap_err(),
            NetworkError::DuplicateTask {
                start: 0,
                end: 1,
                first: 0,
                second: 1
            }
        );
    }

    #[test]
    fn test_duplicate_task_overwrite() {
        let input = make_input(3, &[(0, 1), (0, 1), (1, 2)]);
        let network = Network::build(
            &input,
            EstimationMethod::TwoPoint,
            DuplicatePolicy::Overwrite,
            0,
        )
        .unwrap();
        assert_eq!(network.task_between(0, 1), Some(1));
        assert_eq!(network.tasks_count(), 3);
        assert_eq!(network.successors(0), &[(1, 1)]);
    }

    #[test]
    fn test_multiple_sources() {
        // 0 -> 2, 1 -> 2
        let input = make_input(3, &[(0, 2), (1, 2)]);
        assert_eq!(
            build(&input).unwrap_err(),
            NetworkError::MultipleSources(vec![0, 1])
        );
    }

    #[test]
    fn test_multiple_runoffs() {
        // 0 -> 1, 0 -> 2
        let input = make_input(3, &[(0, 1), (0, 2)]);
        assert_eq!(
            build(&input).unwrap_err(),
            NetworkError::MultipleRunoffs(vec![1, 2])
        );
    }

    #[test]
    fn test_no_source() {
        assert_eq!(build(&make_input(0, &[])).unwrap_err(), NetworkError::NoSource);
        // 0 <-> 1 has no event without incoming tasks
        let input = make_input(2, &[(0, 1), (1, 0)]);
        assert_eq!(build(&input).unwrap_err(), NetworkError::NoSource);
    }

    #[test]
    fn test_no_runoff() {
        // 0 -> 1 -> 2 -> 1: single source, every event has an outgoing task
        let input = make_input(3, &[(0, 1), (1, 2), (2, 1)]);
        assert_eq!(build(&input).unwrap_err(), NetworkError::NoRunoff);
    }

    #[test]
    fn test_cycle_detected() {
        // 0 -> 1 -> 2 -> 1, 2 -> 3: unique source and runoff, but 1 and 2 form a loop
        let input = make_input(4, &[(0, 1), (1, 2), (2, 1), (2, 3)]);
        assert_eq!(build(&input).unwrap_err(), NetworkError::CyclicNetwork);

        let input = make_input(3, &[(0, 1), (1, 1), (1, 2)]);
        assert_eq!(build(&input).unwrap_err(), NetworkError::CyclicNetwork);
    }

    #[test]
    fn test_resolve_count() {
        assert_eq!(resolve_count("tasks_count", 0), Ok(0));
        assert_eq!(resolve_count("events_count", 12), Ok(12));
        assert_eq!(
            resolve_count("events_count", -1),
            Err(NetworkError::NegativeCount {
                field: "events_count",
                value: -1
            })
        );
        assert_eq!(
            resolve_count("tasks_count", -3).unwrap_err().to_string(),
            "tasks_count must not be negative, got -3"
        );
    }

    #[test]
    fn test_single_event_network() {
        let network = build(&make_input(1, &[])).unwrap();
        assert_eq!(network.source(), 0);
        assert_eq!(network.runoff(), 0);
        assert_eq!(network.tasks_count(), 0);
    }

    #[test]
    fn test_error_messages() {
        let err = NetworkError::ShapeMismatch {
            field: "optimistic",
            expected: 3,
            actual: 2,
        };
        assert_eq!(err.to_string(), "Length of optimistic is 2, expected 3");
        assert_eq!(
            NetworkError::MultipleSources(vec![0, 4]).to_string(),
            "Network has multiple source events: [0, 4]"
        );
    }
}
