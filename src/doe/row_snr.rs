//! Per-row S/N reduction.
//!
//! Every array row gets exactly one S/N ratio, computed on the union of all
//! observations recorded under that row's control levels, whichever noise
//! condition produced them. Averaging per-replicate S/N ratios instead would
//! be wrong because the logarithm does not commute with the mean.

use log::trace;

use super::types::OptimizationGoal;
use crate::factor::ControlFactor;
use crate::oa::OrthogonalArray;
use crate::observation::ObservationStore;

/// Collect the observations belonging to each array row.
///
/// A result belongs to a row when, for every declared control factor, the
/// trial's control value equals the row's level value. Rows are matched by
/// value, so results recorded for any trial with the same control settings
/// are pooled.
#[must_use]
pub(crate) fn pool_observations(
    factors: &[ControlFactor],
    array: &OrthogonalArray,
    store: &ObservationStore,
) -> Vec<Vec<f64>> {
    // Control values of every result, in declared factor order.
    let recorded: Vec<(Vec<Option<f64>>, &[f64])> = store
        .iter()
        .map(|r| {
            let values = factors
                .iter()
                .map(|f| r.trial.control_value(f.name()))
                .collect();
            (values, r.observations.as_slice())
        })
        .collect();

    (0..array.runs())
        .map(|row| {
            let levels = array.row_levels(row, factors);
            let mut pool = Vec::new();
            for (values, observations) in &recorded {
                let matches = values
                    .iter()
                    .zip(&levels)
                    .all(|(value, &level)| *value == Some(level));
                if matches {
                    pool.extend_from_slice(observations);
                }
            }
            pool
        })
        .collect()
}

/// Compute one S/N ratio per array row over the pooled observations.
///
/// Rows without observations get an S/N ratio of 0.
#[must_use]
pub(crate) fn calculate_row_sn_ratios(
    factors: &[ControlFactor],
    array: &OrthogonalArray,
    store: &ObservationStore,
    goal: &OptimizationGoal,
) -> Vec<f64> {
    pool_observations(factors, array, store)
        .iter()
        .enumerate()
        .map(|(row, pool)| {
            let sn = goal.compute_snr(pool);
            trace!("row {}: {} observations, S/N {:.4}", row + 1, pool.len(), sn);
            sn
        })
        .collect()
}

/// Arithmetic mean of the row S/N ratios.
#[must_use]
pub fn grand_mean(row_sn_ratios: &[f64]) -> f64 {
    if row_sn_ratios.is_empty() {
        return 0.0;
    }
    row_sn_ratios.iter().sum::<f64>() / row_sn_ratios.len() as f64
}
