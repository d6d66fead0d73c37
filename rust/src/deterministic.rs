//! Deterministic network indicators: event times, task times and reserves.

use crate::log_debug;
use crate::models::{DeterministicIndicators, PathReserve, TaskEstimate};
use crate::network::{round_to, LongestPaths, Network, PathEnumerator};

/// Tolerance for treating a reserve as zero.
const CRITICAL_EPSILON: f64 = 1e-9;

/// Compute event times, task start/end times and the four reserves of every task.
pub fn deterministic_indicators(
    network: &Network,
    estimates: &[TaskEstimate],
    longest: &LongestPaths,
) -> DeterministicIndicators {
    let early = longest.earliest_times();
    let late = longest.latest_times();
    let n = network.tasks_count();

    let mut result = DeterministicIndicators {
        critical_length: longest.critical_length(),
        task_early_start: Vec::with_capacity(n),
        task_early_end: Vec::with_capacity(n),
        task_late_start: Vec::with_capacity(n),
        task_late_end: Vec::with_capacity(n),
        full_reserves: Vec::with_capacity(n),
        independent_reserves: Vec::with_capacity(n),
        private_reserves_1: Vec::with_capacity(n),
        private_reserves_2: Vec::with_capacity(n),
        ..Default::default()
    };

    for (id, task) in network.tasks().iter().enumerate() {
        let duration = estimates[id].expected;
        let (early_start, early_end) = (early[task.start], early[task.end]);
        let (late_start, late_end) = (late[task.start], late[task.end]);

        result.task_early_start.push(early_start);
        result.task_early_end.push(early_start + duration);
        result.task_late_end.push(late_end);
        result.task_late_start.push(late_end - duration);

        let full = late_end - early_start - duration;
        result.full_reserves.push(full);
        // Negative values are meaningful and kept as-is.
        result
            .independent_reserves
            .push(early_end - late_start - duration);
        result.private_reserves_1.push(late_end - late_start - duration);
        result.private_reserves_2.push(early_end - early_start - duration);

        if full.abs() < CRITICAL_EPSILON {
            result.critical_tasks.push(id);
        }
    }

    result.early_times = early;
    result.late_times = late;
    result
}

/// Slack of every full source-to-runoff path, in enumeration order.
pub fn path_reserves(
    network: &Network,
    estimates: &[TaskEstimate],
    longest: &LongestPaths,
    slack_precision: u32,
    verbosity: u8,
) -> Vec<PathReserve> {
    let critical = longest.critical_length();
    PathEnumerator::new(network, estimates)
        .paths(network.source(), network.runoff())
        .into_iter()
        .map(|path| {
            let slack = round_to(critical - path.duration, slack_precision);
            log_debug!(verbosity, "Path [{}]: slack {}", path.label(), slack);
            PathReserve {
                label: path.label(),
                slack,
                duration: path.duration,
                variance: path.variance,
                events: path.events,
                tasks: path.tasks,
            }
        })
        .collect()
}
