//! Configuration types for the planner.

use pyo3::prelude::*;
use thiserror::Error;

use crate::network::{DuplicatePolicy, EstimationMethod};

/// Errors raised while interpreting textual configuration options.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Unknown estimation method: {0} (expected \"two_point\" or \"three_point\")")]
    UnknownEstimation(String),
    #[error("Unknown duplicate task policy: {0} (expected \"reject\" or \"overwrite\")")]
    UnknownDuplicatePolicy(String),
    #[error("{field} of {value} exceeds the supported maximum of {max} decimal places")]
    InvalidPrecision {
        field: &'static str,
        value: u32,
        max: u32,
    },
}

/// Largest rounding precision; an f64 carries 15 to 17 significant digits.
pub const MAX_PRECISION: u32 = 15;

/// Configuration for a planning session.
#[pyclass]
#[derive(Clone, Debug)]
pub struct PlannerConfig {
    /// Estimation method: "two_point" or "three_point"
    #[pyo3(get, set)]
    pub estimation: String,
    /// What to do with a second task on an occupied (start, end) pair: "reject" or "overwrite"
    #[pyo3(get, set)]
    pub duplicate_tasks: String,
    /// Decimal places kept for expected durations and variances
    #[pyo3(get, set)]
    pub duration_precision: u32,
    /// Decimal places kept for full-path slack
    #[pyo3(get, set)]
    pub slack_precision: u32,
    /// Verbosity level: 0=silent, 1=summary, 2=steps, 3=debug.
    #[pyo3(get, set)]
    pub verbosity: u8,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            estimation: "two_point".to_string(),
            duplicate_tasks: "reject".to_string(),
            duration_precision: 4,
            slack_precision: 2,
            verbosity: 0,
        }
    }
}

impl PlannerConfig {
    /// Parse the configured estimation method.
    pub fn estimation_method(&self) -> Result<EstimationMethod, ConfigError> {
        match self.estimation.as_str() {
            "two_point" => Ok(EstimationMethod::TwoPoint),
            "three_point" => Ok(EstimationMethod::ThreePoint),
            other => Err(ConfigError::UnknownEstimation(other.to_string())),
        }
    }

    /// Parse the configured duplicate task policy.
    pub fn duplicate_policy(&self) -> Result<DuplicatePolicy, ConfigError> {
        match self.duplicate_tasks.as_str() {
            "reject" => Ok(DuplicatePolicy::Reject),
            "overwrite" => Ok(DuplicatePolicy::Overwrite),
            other => Err(ConfigError::UnknownDuplicatePolicy(other.to_string())),
        }
    }

    /// Check that both rounding precisions are within [`MAX_PRECISION`].
    pub fn check_precision(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("duration_precision", self.duration_precision),
            ("slack_precision", self.slack_precision),
        ] {
            if value > MAX_PRECISION {
                return Err(ConfigError::InvalidPrecision {
                    field,
                    value,
                    max: MAX_PRECISION,
                });
            }
        }
        Ok(())
    }

    /// Copy of this config with the estimation method replaced.
    pub fn with_estimation(&self, method: EstimationMethod) -> Self {
        let estimation = match method {
            EstimationMethod::TwoPoint => "two_point",
            EstimationMethod::ThreePoint => "three_point",
        };
        Self {
            estimation: estimation.to_string(),
            ..self.clone()
        }
    }
}

#[pymethods]
impl PlannerConfig {
    #[new]
    #[pyo3(signature = (
        estimation=None,
        duplicate_tasks=None,
        duration_precision=None,
        slack_precision=None,
        verbosity=None
    ))]
    fn new(
        estimation: Option<String>,
        duplicate_tasks: Option<String>,
        duration_precision: Option<u32>,
        slack_precision: Option<u32>,
        verbosity: Option<u8>,
    ) -> Self {
        let defaults = Self::default();
        Self {
            estimation: estimation.unwrap_or(defaults.estimation),
            duplicate_tasks: duplicate_tasks.unwrap_or(defaults.duplicate_tasks),
            duration_precision: duration_precision.unwrap_or(defaults.duration_precision),
            slack_precision: slack_precision.unwrap_or(defaults.slack_precision),
            verbosity: verbosity.unwrap_or(defaults.verbosity),
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "PlannerConfig(estimation={:?}, duplicate_tasks={:?}, verbosity={})",
            self.estimation, self.duplicate_tasks, self.verbosity
        )
    }
}
