//! Project network: construction, duration estimates, longest paths and path enumeration.
//!
//! A network is built once from caller-supplied matrices and is immutable
//! afterwards. Every other module reads it through shared references.

mod builder;
mod estimate;
mod longest_path;
mod paths;
mod types;

pub use builder::{resolve_count, DuplicatePolicy, Network, NetworkError};
pub use estimate::{estimate_task, estimate_tasks, round_to, EstimationMethod};
pub use longest_path::LongestPaths;
pub use paths::{Path, PathEnumerator};
pub use types::{EventId, NetworkInput, TaskId, TaskSpec};
