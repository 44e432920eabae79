//! Builder pattern for constructing experiments.
//!
//! The builder collects factors, the array and the analysis configuration
//! step by step and validates them together in [`ExperimentBuilder::build`].
//!
//! # Example
//!
//! ```
//! use taguchi_robust::{Experiment, OptimizationGoal};
//!
//! let exp = Experiment::builder()
//!     .goal(OptimizationGoal::LargerTheBetter)
//!     .control_factor("Temperature", [150.0, 175.0, 200.0])
//!     .control_factor("Pressure", [1.0, 2.0, 3.0])
//!     .noise_factor("Humidity", [0.3, 0.7])
//!     .standard_array("L9")
//!     .pooling_threshold(2.0)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(exp.generate_trials().len(), 18);
//! assert!(exp.config().pooling.enabled);
//! ```

use crate::catalogue;
use crate::doe::{ExperimentConfig, OptimizationGoal, PoolingConfig};
use crate::error::{Error, Result};
use crate::experiment::Experiment;
use crate::factor::{ControlFactor, NoiseFactor};
use crate::oa::OrthogonalArray;

#[derive(Debug, Clone)]
enum ArraySource {
    Standard(String),
    Custom(OrthogonalArray),
    Rows(Vec<Vec<u32>>),
}

/// Builder for constructing experiments.
///
/// Factors are assigned to array columns in the order they are added.
#[derive(Debug, Clone, Default)]
pub struct ExperimentBuilder {
    config: ExperimentConfig,
    control: Vec<ControlFactor>,
    noise: Vec<NoiseFactor>,
    array: Option<ArraySource>,
}

impl ExperimentBuilder {
    /// Create a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the optimization goal (default: smaller-the-better).
    #[must_use]
    pub fn goal(mut self, goal: OptimizationGoal) -> Self {
        self.config.goal = goal;
        self
    }

    /// Add a control factor.
    #[must_use]
    pub fn control_factor(mut self, name: impl Into<String>, levels: impl Into<Vec<f64>>) -> Self {
        self.control.push(ControlFactor::new(name, levels));
        self
    }

    /// Add several control factors.
    #[must_use]
    pub fn control_factors(mut self, factors: impl IntoIterator<Item = ControlFactor>) -> Self {
        self.control.extend(factors);
        self
    }

    /// Add a noise factor.
    #[must_use]
    pub fn noise_factor(mut self, name: impl Into<String>, levels: impl Into<Vec<f64>>) -> Self {
        self.noise.push(NoiseFactor::new(name, levels));
        self
    }

    /// Add several noise factors.
    #[must_use]
    pub fn noise_factors(mut self, factors: impl IntoIterator<Item = NoiseFactor>) -> Self {
        self.noise.extend(factors);
        self
    }

    /// Use a standard array from the catalogue, e.g. `"L8"`.
    #[must_use]
    pub fn standard_array(mut self, name: impl Into<String>) -> Self {
        self.array = Some(ArraySource::Standard(name.into()));
        self
    }

    /// Use a caller-supplied orthogonal array.
    #[must_use]
    pub fn array(mut self, array: OrthogonalArray) -> Self {
        self.array = Some(ArraySource::Custom(array));
        self
    }

    /// Use a caller-supplied matrix of 1-based level indices.
    #[must_use]
    pub fn array_rows(mut self, rows: Vec<Vec<u32>>) -> Self {
        self.array = Some(ArraySource::Rows(rows));
        self
    }

    /// Set the pooling configuration.
    #[must_use]
    pub fn pooling(mut self, pooling: PoolingConfig) -> Self {
        self.config.pooling = pooling;
        self
    }

    /// Enable pooling of factors whose F-ratio falls below `threshold`.
    #[must_use]
    pub fn pooling_threshold(mut self, threshold: f64) -> Self {
        self.config.pooling.enabled = true;
        self.config.pooling.threshold = threshold;
        self
    }

    /// Build the experiment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingArray`] if no array was specified, and
    /// otherwise the same errors as [`Experiment::new`] and
    /// [`Experiment::with_standard_array`].
    pub fn build(self) -> Result<Experiment> {
        let array = match self.array.ok_or(Error::MissingArray)? {
            ArraySource::Standard(name) => catalogue::get_by_name(&name)?,
            ArraySource::Custom(array) => array,
            ArraySource::Rows(rows) => OrthogonalArray::from_rows(&rows)?,
        };

        if !self.config.pooling.threshold.is_finite() {
            return Err(Error::invalid_params("pooling threshold must be finite"));
        }

        Experiment::with_config(self.config, self.control, array, self.noise)
    }
}
