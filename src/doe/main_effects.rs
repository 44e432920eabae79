//! Main effects calculation for DOE analysis.
//!
//! The main effect of a level is the mean row S/N ratio over the rows that
//! run the factor at that level.

use super::types::MainEffect;
use crate::factor::ControlFactor;
use crate::oa::OrthogonalArray;

/// Calculate main effects for each factor.
///
/// # Arguments
/// * `factors` - Declared control factors; factor `j` reads array column `j`
/// * `array` - Orthogonal array of 1-based level indices
/// * `row_sn_ratios` - S/N ratio of each array row
///
/// # Returns
/// * One MainEffect per factor in declaration order, ranked by range
///
/// # Algorithm
/// For each factor:
/// 1. Group rows by their level index in the factor's column
/// 2. Level mean = mean row S/N of the group (0 for empty groups)
/// 3. Range = max(level_means) - min(level_means)
/// 4. Rank factors by range (descending, ties in declaration order)
#[must_use]
pub(crate) fn calculate_main_effects(
    factors: &[ControlFactor],
    array: &OrthogonalArray,
    row_sn_ratios: &[f64],
) -> Vec<MainEffect> {
    let mut effects: Vec<MainEffect> = factors
        .iter()
        .enumerate()
        .map(|(col, factor)| {
            let num_levels = factor.level_count();
            let mut level_sums = vec![0.0; num_levels];
            let mut level_counts = vec![0usize; num_levels];

            for (row, &index) in array.column(col).iter().enumerate() {
                let Some(level_idx) = (index as usize).checked_sub(1) else {
                    continue;
                };
                if level_idx < num_levels && row < row_sn_ratios.len() {
                    level_sums[level_idx] += row_sn_ratios[row];
                    level_counts[level_idx] += 1;
                }
            }

            let level_means: Vec<f64> = level_sums
                .iter()
                .zip(&level_counts)
                .map(|(&sum, &count)| if count > 0 { sum / count as f64 } else { 0.0 })
                .collect();

            let max_mean = level_means.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            let min_mean = level_means.iter().copied().fold(f64::INFINITY, f64::min);

            MainEffect {
                factor: factor.name().to_string(),
                level_values: factor.levels().to_vec(),
                level_means,
                level_counts,
                range: max_mean - min_mean,
                rank: 0, // Set after sorting
            }
        })
        .collect();

    // Rank factors by range (higher range = more important = lower rank)
    let mut order: Vec<usize> = (0..effects.len()).collect();
    order.sort_by(|&a, &b| {
        effects[b]
            .range
            .partial_cmp(&effects[a].range)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    for (rank, idx) in order.into_iter().enumerate() {
        effects[idx].rank = rank + 1;
    }

    effects
}
