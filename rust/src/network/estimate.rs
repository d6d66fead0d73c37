//! Expected duration and variance of each task.

use crate::models::TaskEstimate;

use super::types::TaskSpec;

/// How raw estimates are turned into a duration distribution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum EstimationMethod {
    /// Optimistic and pessimistic values only.
    #[default]
    TwoPoint,
    /// PERT: optimistic, most likely and pessimistic values.
    ThreePoint,
}

/// Round to a fixed number of decimal places.
pub fn round_to(value: f64, digits: u32) -> f64 {
    let factor = 10f64.powi(digits as i32);
    (value * factor).round() / factor
}

/// Estimate expected duration and variance for one task.
///
/// Two-point: `expected = (3a + 2b) / 5`, `variance = (b - a)^2 / 25`.
/// Three-point: `expected = (a + 4m + b) / 6`, `variance = (b - a)^2 / 36`.
///
/// A task without a most-likely value is estimated with the two-point
/// formula; the builder guarantees the value is present in three-point mode.
pub fn estimate_task(method: EstimationMethod, task: &TaskSpec, precision: u32) -> TaskEstimate {
    let a = task.optimistic;
    let b = task.pessimistic;
    let spread = (b - a) * (b - a);

    let (expected, variance) = match (method, task.most_likely) {
        (EstimationMethod::ThreePoint, Some(m)) => ((a + 4.0 * m + b) / 6.0, spread / 36.0),
        _ => ((3.0 * a + 2.0 * b) / 5.0, spread / 25.0),
    };

    TaskEstimate {
        expected: round_to(expected, precision),
        variance: round_to(variance, precision),
    }
}

/// Estimate every task, indexed by task id.
pub fn estimate_tasks(method: EstimationMethod, tasks: &[TaskSpec], precision: u32) -> Vec<TaskEstimate> {
    tasks
        .iter()
        .map(|task| estimate_task(method, task, precision))
        .collect()
}
