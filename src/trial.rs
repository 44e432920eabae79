//! Trial generation: orthogonal array rows crossed with noise conditions.
//!
//! The trial list depends only on the experiment configuration, never on
//! recorded results, so generating it twice yields equal lists. Trials are
//! generated through [`Experiment::generate_trials`](crate::Experiment::generate_trials),
//! which only exists once the array has been validated against the factors:
//!
//! ```compile_fail
//! use taguchi_robust::trial::generate_trials;
//! ```

use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::factor::{ControlFactor, NoiseFactor};
use crate::oa::OrthogonalArray;

/// Factor name to level value.
pub type Assignment = BTreeMap<String, f64>;

/// One experimental run: a control design point under one noise condition.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Trial {
    id: usize,
    row: usize,
    control: Assignment,
    noise: Assignment,
}

impl Trial {
    /// Sequential 1-based identifier (array rows outer, noise combinations inner).
    #[must_use]
    pub fn id(&self) -> usize {
        self.id
    }

    /// 0-based orthogonal array row this trial was generated from.
    #[must_use]
    pub fn row(&self) -> usize {
        self.row
    }

    /// Control factor assignment.
    #[must_use]
    pub fn control(&self) -> &Assignment {
        &self.control
    }

    /// Noise factor assignment.
    #[must_use]
    pub fn noise(&self) -> &Assignment {
        &self.noise
    }

    /// Level of a control factor, if assigned.
    #[must_use]
    pub fn control_value(&self, name: &str) -> Option<f64> {
        self.control.get(name).copied()
    }

    /// Level of a noise factor, if assigned.
    #[must_use]
    pub fn noise_value(&self, name: &str) -> Option<f64> {
        self.noise.get(name).copied()
    }

    /// Level of a control factor.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownFactor`] if the trial has no such control factor.
    pub fn require_control(&self, name: &str) -> Result<f64> {
        self.control_value(name).ok_or_else(|| Error::UnknownFactor {
            trial: self.id,
            name: name.to_string(),
        })
    }

    /// Level of a noise factor.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownFactor`] if the trial has no such noise factor.
    pub fn require_noise(&self, name: &str) -> Result<f64> {
        self.noise_value(name).ok_or_else(|| Error::UnknownFactor {
            trial: self.id,
            name: name.to_string(),
        })
    }
}

/// Enumerate the full factorial of noise levels.
///
/// The first declared factor varies slowest and the last fastest. With no
/// noise factors the result is a single empty assignment.
#[must_use]
pub fn noise_combinations(noise: &[NoiseFactor]) -> Vec<Assignment> {
    fn expand(
        noise: &[NoiseFactor],
        idx: usize,
        current: &mut Assignment,
        out: &mut Vec<Assignment>,
    ) {
        let Some(factor) = noise.get(idx) else {
            out.push(current.clone());
            return;
        };
        for &level in factor.levels() {
            current.insert(factor.name().to_string(), level);
            expand(noise, idx + 1, current, out);
        }
        current.remove(factor.name());
    }

    let total: usize = noise.iter().map(NoiseFactor::level_count).product();
    let mut out = Vec::with_capacity(total);
    expand(noise, 0, &mut Assignment::new(), &mut out);
    out
}

/// Generate every trial of an experiment.
///
/// Produces `array.runs() × Π(noise level counts)` trials. The array must
/// already be validated against `control` (see
/// [`OrthogonalArray::validate_for`]).
#[must_use]
pub(crate) fn generate_trials(
    control: &[ControlFactor],
    array: &OrthogonalArray,
    noise: &[NoiseFactor],
) -> Vec<Trial> {
    let combinations = noise_combinations(noise);
    let mut trials = Vec::with_capacity(array.runs() * combinations.len());

    for row in 0..array.runs() {
        let control_config: Assignment = control
            .iter()
            .map(|f| f.name().to_string())
            .zip(array.row_levels(row, control))
            .collect();

        for combination in &combinations {
            trials.push(Trial {
                id: trials.len() + 1,
                row,
                control: control_config.clone(),
                noise: combination.clone(),
            });
        }
    }

    trials
}
