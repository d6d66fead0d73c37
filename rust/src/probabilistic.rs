//! Probabilistic indicators: probability of meeting each event's directive time.
//!
//! The risk of an event is governed by the path from the source with the
//! largest accumulated variance, which need not be the longest path.

use statrs::function::erf::erfc;
use std::f64::consts::SQRT_2;

use crate::models::{ProbabilisticIndicators, TaskEstimate};
use crate::network::{LongestPaths, Network, Path, PathEnumerator};
use crate::{log_debug, log_steps};

/// Standard normal cumulative distribution function.
pub fn standard_normal_cdf(x: f64) -> f64 {
    0.5 * erfc(-x / SQRT_2)
}

/// Probability that an event with the given earliest time and variance
/// completes by `directive`.
///
/// Zero variance means the earliest time is certain: 1.0 if it meets the
/// directive time, 0.0 otherwise.
pub fn completion_probability(directive: f64, earliest: f64, variance: f64) -> f64 {
    if variance <= 0.0 {
        return if directive >= earliest { 1.0 } else { 0.0 };
    }
    standard_normal_cdf((directive - earliest) / variance.sqrt())
}

/// First path with the largest accumulated variance.
fn max_variance_path(paths: Vec<Path>) -> Option<Path> {
    let mut best: Option<Path> = None;
    for path in paths {
        let is_better = best
            .as_ref()
            .map_or(true, |current| path.variance > current.variance);
        if is_better {
            best = Some(path);
        }
    }
    best
}

/// Compute the governing variance and completion probability of every event.
pub fn probabilistic_indicators(
    network: &Network,
    estimates: &[TaskEstimate],
    longest: &LongestPaths,
    verbosity: u8,
) -> ProbabilisticIndicators {
    let source = network.source();
    let early = longest.earliest_times();
    let directive = network.directive_times();
    let enumerator = PathEnumerator::new(network, estimates);
    let n = network.events_count();

    log_steps!(verbosity, "Computing completion probabilities for {} events", n);

    let mut result = ProbabilisticIndicators {
        max_variances: Vec::with_capacity(n),
        variance_paths: Vec::with_capacity(n),
        probabilities: Vec::with_capacity(n),
    };

    for event in 0..n {
        let (variance, events) = match max_variance_path(enumerator.paths(source, event)) {
            Some(path) => (path.variance, path.events),
            None => (0.0, Vec::new()),
        };
        log_debug!(
            verbosity,
            "Event {}: governing variance {} via {:?}",
            event,
            variance,
            events
        );

        let probability = (event != source)
            .then(|| completion_probability(directive[event], early[event], variance));

        result.max_variances.push(variance);
        result.variance_paths.push(events);
        result.probabilities.push(probability);
    }

    result
}
