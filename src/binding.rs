//! Typed views of trial assignments.
//!
//! Trials expose their control and noise settings as name → value maps.
//! A [`TrialBinder`] turns them into a caller-defined record, either through
//! the record's [`FromTrial`] impl or through a closure supplied once and
//! reused for every trial.
//!
//! # Example
//!
//! ```
//! use taguchi_robust::binding::{FromTrial, TrialBinder};
//! use taguchi_robust::trial::Trial;
//! use taguchi_robust::{Experiment, Result};
//!
//! struct Params {
//!     threads: usize,
//!     chunk: usize,
//! }
//!
//! impl FromTrial for Params {
//!     fn from_trial(trial: &Trial) -> Result<Self> {
//!         Ok(Self {
//!             threads: trial.require_control("Threads")? as usize,
//!             chunk: trial.require_control("Chunk")? as usize,
//!         })
//!     }
//! }
//!
//! let exp = Experiment::builder()
//!     .control_factor("Threads", [2.0, 8.0])
//!     .control_factor("Chunk", [1024.0, 65536.0])
//!     .standard_array("L4")
//!     .build()
//!     .unwrap();
//!
//! let binder = TrialBinder::<Params>::default();
//! let bound = binder.bind_all(&exp.generate_trials()).unwrap();
//! assert_eq!(bound[2].params.threads, 8);
//! assert_eq!(bound[2].params.chunk, 1024);
//! ```

use std::fmt;

use crate::error::Result;
use crate::trial::Trial;

/// Records that can be built from a trial's assignments.
pub trait FromTrial: Sized {
    /// Build the record from a trial.
    ///
    /// # Errors
    ///
    /// Typically [`Error::UnknownFactor`](crate::Error::UnknownFactor) when
    /// the trial lacks a field's factor.
    fn from_trial(trial: &Trial) -> Result<Self>;
}

type Adapter<P> = Box<dyn Fn(&Trial) -> Result<P> + Send + Sync>;

/// Maps trials to a typed parameter record `P`.
pub struct TrialBinder<P> {
    adapter: Adapter<P>,
}

/// A trial together with its typed parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundTrial<P> {
    /// The trial the parameters were read from.
    pub trial: Trial,
    /// The typed parameters.
    pub params: P,
}

impl<P> TrialBinder<P> {
    /// Create a binder from an adapter closure.
    pub fn new<F>(adapter: F) -> Self
    where
        F: Fn(&Trial) -> Result<P> + Send + Sync + 'static,
    {
        Self {
            adapter: Box::new(adapter),
        }
    }

    /// Read the parameters of one trial.
    ///
    /// # Errors
    ///
    /// Returns whatever the adapter reports.
    pub fn params(&self, trial: &Trial) -> Result<P> {
        (self.adapter)(trial)
    }

    /// Bind one trial.
    ///
    /// # Errors
    ///
    /// Returns whatever the adapter reports.
    pub fn bind(&self, trial: &Trial) -> Result<BoundTrial<P>> {
        Ok(BoundTrial {
            trial: trial.clone(),
            params: self.params(trial)?,
        })
    }

    /// Bind every trial, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// Returns the first error the adapter reports.
    pub fn bind_all(&self, trials: &[Trial]) -> Result<Vec<BoundTrial<P>>> {
        trials.iter().map(|t| self.bind(t)).collect()
    }
}

impl<P: FromTrial + 'static> Default for TrialBinder<P> {
    fn default() -> Self {
        Self::new(P::from_trial)
    }
}

impl<P> fmt::Debug for TrialBinder<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrialBinder")
            .field("params", &std::any::type_name::<P>())
            .finish_non_exhaustive()
    }
}
