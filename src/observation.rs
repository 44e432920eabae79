//! Append-only log of recorded observations.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::trial::Trial;

/// Observations recorded for one execution of a trial.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TrialResult {
    /// The trial configuration that produced the observations.
    pub trial: Trial,
    /// Measured outcomes.
    pub observations: Vec<f64>,
}

/// Append-only collection of trial results.
///
/// Results for the same trial may be recorded any number of times; they are
/// pooled during analysis. The store has no internal locking.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ObservationStore {
    results: Vec<TrialResult>,
}

impl ObservationStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the observations of one trial.
    pub fn record(&mut self, trial: Trial, observations: Vec<f64>) {
        self.results.push(TrialResult {
            trial,
            observations,
        });
    }

    /// Number of recorded results.
    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Whether nothing has been recorded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Total number of individual observations across all results.
    #[must_use]
    pub fn observation_count(&self) -> usize {
        self.results.iter().map(|r| r.observations.len()).sum()
    }

    /// Iterate over results in recording order.
    pub fn iter(&self) -> std::slice::Iter<'_, TrialResult> {
        self.results.iter()
    }

    /// All results as a slice.
    #[must_use]
    pub fn results(&self) -> &[TrialResult] {
        &self.results
    }
}

impl<'a> IntoIterator for &'a ObservationStore {
    type Item = &'a TrialResult;
    type IntoIter = std::slice::Iter<'a, TrialResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factor::ControlFactor;
    use crate::oa::OrthogonalArray;
    use crate::trial::generate_trials;

    #[test]
    fn test_record_appends() {
        let control = vec![ControlFactor::new("A", [1.0, 2.0])];
        let oa = OrthogonalArray::from_rows(&[[1], [2]]).unwrap();
        let trials = generate_trials(&control, &oa, &[]);

        let mut store = ObservationStore::new();
        assert!(store.is_empty());

        store.record(trials[0].clone(), vec![1.0, 2.0]);
        store.record(trials[0].clone(), vec![3.0]);
        store.record(trials[1].clone(), vec![]);

        assert_eq!(store.len(), 3);
        assert_eq!(store.observation_count(), 3);
        let ids: Vec<usize> = store.iter().map(|r| r.trial.id()).collect();
        assert_eq!(ids, vec![1, 1, 2]);
    }
}
