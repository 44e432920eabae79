//! # Taguchi Robust
//!
//! The analytical core of a Taguchi robust-design experiment.
//!
//! ## Overview
//!
//! Given controllable factors, an orthogonal array and uncontrollable noise
//! factors, this library:
//! - Generates every trial to run: each array row crossed with the full
//!   factorial of noise levels
//! - Reduces observations to Signal-to-Noise ratios for the smaller-the-better,
//!   larger-the-better and nominal-the-best goals
//! - Decomposes S/N variation across factors with ANOVA (sums of squares,
//!   degrees of freedom, mean squares, F-ratios, contributions)
//! - Selects the optimal level of every factor
//!
//! Observations recorded under different noise conditions for the same
//! control settings are pooled into one S/N ratio per array row. They are
//! never reduced separately and averaged.
//!
//! ## Quick Start
//!
//! ```rust
//! use taguchi_robust::prelude::*;
//!
//! let mut exp = Experiment::new(
//!     OptimizationGoal::SmallerTheBetter,
//!     vec![ControlFactor::new("A", [1.0, 2.0])],
//!     OrthogonalArray::from_rows(&[[1], [2]]).unwrap(),
//!     vec![NoiseFactor::new("N", [0.0, 1.0])],
//! )
//! .unwrap();
//!
//! let trials = exp.generate_trials();
//! exp.add_result(&trials[0], [2.0, 4.0]);
//! exp.add_result(&trials[1], [6.0, 8.0]);
//! exp.add_result(&trials[2], [1.0, 1.0]);
//! exp.add_result(&trials[3], [1.0, 1.0]);
//!
//! let result = exp.analyze();
//! let snr = result.snr("A").unwrap();
//! assert!((snr[0] - -10.0 * 30f64.log10()).abs() < 1e-10);
//! assert_eq!(result.optimal_level("A"), Some(2.0));
//! println!("{result}");
//! ```
//!
//! Standard arrays are available by name:
//!
//! ```rust
//! use taguchi_robust::get_standard_array;
//!
//! let l18 = get_standard_array("L18").unwrap();
//! assert_eq!(l18.runs(), 18);
//! assert_eq!(l18.columns(), 8);
//! ```
//!
//! ## Logging
//!
//! The library logs through the [`log`] facade: construction and analysis
//! summaries at `debug`, per-row S/N at `trace`, and saturated or unbalanced
//! designs at `warn`. No logger is installed.
//!
//! ## Features
//!
//! - `serde`: Enable serialization/deserialization of factors, trials,
//!   arrays, configuration and results

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_precision_loss)]

pub mod binding;
pub mod builder;
pub mod catalogue;
pub mod doe;
pub mod error;
pub mod experiment;
pub mod factor;
pub mod oa;
pub mod observation;
pub mod report;
pub mod trial;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::binding::{BoundTrial, FromTrial, TrialBinder};
    pub use crate::builder::ExperimentBuilder;
    pub use crate::catalogue::{get_by_name as get_standard_array, list_standard_arrays};
    pub use crate::doe::{
        compute_snr, AnalysisResult, AnovaResult, ExperimentConfig, FactorAnova,
        MainEffect, OptimalLevel, OptimalSettings, OptimizationGoal, PoolingConfig,
    };
    pub use crate::error::{Error, Result};
    pub use crate::experiment::Experiment;
    pub use crate::factor::{ControlFactor, NoiseFactor};
    pub use crate::oa::{BalanceReport, OrthogonalArray};
    pub use crate::observation::{ObservationStore, TrialResult};
    pub use crate::trial::{Assignment, Trial};
}

// Re-export commonly used items at crate root
pub use builder::ExperimentBuilder;
pub use catalogue::get_by_name as get_standard_array;
pub use doe::{AnalysisResult, OptimizationGoal};
pub use error::{Error, Result};
pub use experiment::Experiment;
pub use factor::{ControlFactor, NoiseFactor};
pub use trial::Trial;
