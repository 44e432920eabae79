//! Control and noise factor definitions.
//!
//! Both kinds of factor share one shape (a name plus an ordered list of
//! numeric levels) and differ only in their role, which is tracked in the
//! type so a noise factor can never be passed where a control factor is
//! expected.

use std::collections::HashSet;
use std::fmt;
use std::marker::PhantomData;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Role marker for factors the experimenter can set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {}

/// Role marker for environmental factors the experimenter cannot set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Noise {}

/// A named experimental factor with an ordered list of levels.
///
/// The position of a level in [`Factor::levels`] defines its 1-based index
/// in the orthogonal array: entry `1` selects `levels()[0]`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Factor<R> {
    name: String,
    levels: Vec<f64>,
    #[cfg_attr(feature = "serde", serde(skip))]
    role: PhantomData<R>,
}

/// A factor whose level is chosen by the orthogonal array.
pub type ControlFactor = Factor<Control>;

/// A factor whose levels are fully crossed with every array row.
pub type NoiseFactor = Factor<Noise>;

impl<R> Factor<R> {
    /// Create a new factor.
    ///
    /// ```
    /// use taguchi_robust::ControlFactor;
    ///
    /// let threads = ControlFactor::new("Threads", [2.0, 4.0, 8.0]);
    /// assert_eq!(threads.level_count(), 3);
    /// assert_eq!(threads.level(2), Some(4.0));
    /// ```
    pub fn new(name: impl Into<String>, levels: impl Into<Vec<f64>>) -> Self {
        Self {
            name: name.into(),
            levels: levels.into(),
            role: PhantomData,
        }
    }

    /// Get the factor name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the level values in declaration order.
    #[must_use]
    pub fn levels(&self) -> &[f64] {
        &self.levels
    }

    /// Get the number of declared levels.
    #[must_use]
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// Get the level value addressed by a 1-based index.
    #[must_use]
    pub fn level(&self, index: u32) -> Option<f64> {
        let idx = (index as usize).checked_sub(1)?;
        self.levels.get(idx).copied()
    }
}

impl<R> fmt::Display for Factor<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let levels: Vec<String> = self.levels.iter().map(|v| v.to_string()).collect();
        write!(f, "{} [{}]", self.name, levels.join(", "))
    }
}

/// Check that every factor has levels and that names are unique across
/// both roles of one experiment.
pub(crate) fn validate_factors(control: &[ControlFactor], noise: &[NoiseFactor]) -> Result<()> {
    let mut seen = HashSet::with_capacity(control.len() + noise.len());
    let declared = control
        .iter()
        .map(|f| (&f.name, f.levels.is_empty()))
        .chain(noise.iter().map(|f| (&f.name, f.levels.is_empty())));

    for (name, no_levels) in declared {
        if no_levels {
            return Err(Error::NoLevels {
                factor: name.clone(),
            });
        }
        if !seen.insert(name.as_str()) {
            return Err(Error::DuplicateFactor { name: name.clone() });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_lookup_is_one_based() {
        let factor = ControlFactor::new("A", vec![10.0, 20.0]);
        assert_eq!(factor.level(0), None);
        assert_eq!(factor.level(1), Some(10.0));
        assert_eq!(factor.level(2), Some(20.0));
        assert_eq!(factor.level(3), None);
    }

    #[test]
    fn test_display() {
        let factor = NoiseFactor::new("Load", [0.5, 1.0]);
        assert_eq!(factor.to_string(), "Load [0.5, 1]");
    }

    #[test]
    fn test_validate_rejects_empty_levels() {
        let factors = vec![ControlFactor::new("A", [1.0]), ControlFactor::new("B", Vec::<f64>::new())];
        assert_eq!(
            validate_factors(&factors, &[]),
            Err(Error::NoLevels { factor: "B".into() })
        );
        assert_eq!(
            validate_factors(&[], &[NoiseFactor::new("N", Vec::<f64>::new())]),
            Err(Error::NoLevels { factor: "N".into() })
        );
    }

    #[test]
    fn test_validate_rejects_duplicates() {
        let factors = vec![
            NoiseFactor::new("N", [1.0]),
            NoiseFactor::new("N", [2.0]),
        ];
        assert_eq!(
            validate_factors(&[], &factors),
            Err(Error::DuplicateFactor { name: "N".into() })
        );
    }

    #[test]
    fn test_validate_rejects_name_shared_across_roles() {
        let control = vec![ControlFactor::new("Load", [1.0, 2.0])];
        let noise = vec![NoiseFactor::new("Load", [0.5, 1.0])];
        assert_eq!(
            validate_factors(&control, &noise),
            Err(Error::DuplicateFactor {
                name: "Load".into()
            })
        );
        assert_eq!(validate_factors(&control, &[]), Ok(()));
    }
}
