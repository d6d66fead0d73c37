//! All-pairs longest paths over the task network (max-plus closure).

use super::builder::Network;
use super::types::EventId;

/// Matrix of longest path lengths between every ordered pair of events.
///
/// Unreachable pairs hold `f64::NEG_INFINITY`.
#[derive(Clone, Debug)]
pub struct LongestPaths {
    events_count: usize,
    cells: Vec<f64>,
    source: EventId,
    runoff: EventId,
}

impl LongestPaths {
    /// Run Floyd-Warshall in the max-plus semiring with task durations as weights.
    ///
    /// O(events^3); planning networks are small.
    pub fn compute(network: &Network, durations: &[f64]) -> Self {
        let n = network.events_count();
        let mut cells = vec![f64::NEG_INFINITY; n * n];

        for ((start, end), task) in network.connections() {
            cells[start * n + end] = durations[task];
        }

        for k in 0..n {
            for i in 0..n {
                let through_k = cells[i * n + k];
                if through_k == f64::NEG_INFINITY {
                    continue;
                }
                for j in 0..n {
                    let tail = cells[k * n + j];
                    if tail == f64::NEG_INFINITY {
                        continue;
                    }
                    let candidate = through_k + tail;
                    if candidate > cells[i * n + j] {
                        cells[i * n + j] = candidate;
                    }
                }
            }
        }

        Self {
            events_count: n,
            cells,
            source: network.source(),
            runoff: network.runoff(),
        }
    }

    /// Longest path length from `from` to `to`, `None` if unreachable.
    #[inline]
    pub fn get(&self, from: EventId, to: EventId) -> Option<f64> {
        let value = self.cells[from * self.events_count + to];
        (value != f64::NEG_INFINITY).then_some(value)
    }

    /// Length of the critical path (source to runoff).
    pub fn critical_length(&self) -> f64 {
        if self.source == self.runoff {
            return 0.0;
        }
        self.get(self.source, self.runoff).unwrap_or(0.0)
    }

    /// Earliest time of every event: longest path from the source.
    pub fn earliest_times(&self) -> Vec<f64> {
        (0..self.events_count)
            .map(|event| {
                if event == self.source {
                    0.0
                } else {
                    self.get(self.source, event).unwrap_or(0.0)
                }
            })
            .collect()
    }

    /// Latest time of every event: critical length minus longest path to the runoff.
    pub fn latest_times(&self) -> Vec<f64> {
        let critical = self.critical_length();
        (0..self.events_count)
            .map(|event| {
                if event == self.runoff {
                    critical
                } else if event == self.source {
                    0.0
                } else {
                    critical - self.get(event, self.runoff).unwrap_or(0.0)
                }
            })
            .collect()
    }
}
