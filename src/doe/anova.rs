//! ANOVA (Analysis of Variance) over row S/N ratios.
//!
//! Calculates sums of squares, degrees of freedom, mean squares, F-ratios and
//! contribution percentages. Supports opt-in factor pooling.

use log::{debug, warn};

use super::types::{AnovaResult, FactorAnova, MainEffect, PoolingConfig};

/// Calculate the ANOVA table with optional pooling.
///
/// # Arguments
/// * `main_effects` - Level means and level row counts for each factor
/// * `row_sn_ratios` - S/N ratio of each array row
/// * `grand_mean` - Mean of the row S/N ratios
/// * `pooling` - Pooling configuration
///
/// # Algorithm
/// 1. Total SS = Σ(ηᵢ - η̄)² over rows
/// 2. Factor SS = Σ nⱼ(η̄ⱼ - η̄)² over levels, DF = levels - 1
/// 3. Error SS = Total SS - Σ Factor SS,
///    Error DF = (rows - 1) - Σ Factor DF, floored at 1
/// 4. Optional pooling of weak factors into error
/// 5. MS = SS / DF, F = MS / MS_error
/// 6. Contribution = SS / Σ Factor SS × 100 (all 0 when Σ Factor SS is 0)
///
/// No value is guarded beyond the error DF floor and the contribution
/// divisor: over-saturated designs can yield a negative error SS, and a
/// factor with a single level has a mean square of NaN.
#[must_use]
pub fn calculate_anova(
    main_effects: &[MainEffect],
    row_sn_ratios: &[f64],
    grand_mean: f64,
    pooling: &PoolingConfig,
) -> AnovaResult {
    let num_rows = row_sn_ratios.len();

    // Total Sum of Squares
    let total_ss: f64 = row_sn_ratios
        .iter()
        .map(|sn| (sn - grand_mean).powi(2))
        .sum();
    let total_df = num_rows.saturating_sub(1);

    let mut entries: Vec<FactorAnova> = main_effects
        .iter()
        .map(|effect| {
            // SS_factor = Σ nⱼ(η̄ⱼ - η̄)²
            let ss: f64 = effect
                .level_means
                .iter()
                .zip(&effect.level_counts)
                .map(|(&mean, &count)| count as f64 * (mean - grand_mean).powi(2))
                .sum();

            FactorAnova {
                factor: effect.factor.clone(),
                sum_of_squares: ss,
                degrees_of_freedom: effect.level_means.len().saturating_sub(1),
                mean_square: 0.0,
                f_ratio: None,
                contribution_percent: 0.0,
                pooled: false,
            }
        })
        .collect();

    let factor_ss_total: f64 = entries.iter().map(|e| e.sum_of_squares).sum();
    let factor_df_total: usize = entries.iter().map(|e| e.degrees_of_freedom).sum();

    // Residual error; the DF may go non-positive for saturated designs
    let mut error_ss = total_ss - factor_ss_total;
    let mut residual_df = num_rows as isize - 1 - factor_df_total as isize;

    for entry in &mut entries {
        entry.mean_square = entry.sum_of_squares / entry.degrees_of_freedom as f64;
    }

    if pooling.enabled {
        pool_factors(&mut entries, &mut error_ss, &mut residual_df, pooling);
    }

    let error_df_clamped = residual_df < 1;
    if error_df_clamped {
        warn!(
            "design is saturated ({} residual degrees of freedom); error DF clamped to 1",
            residual_df
        );
    }
    let error_df = residual_df.max(1) as usize;
    let error_ms = error_ss / error_df as f64;

    for entry in &mut entries {
        if !entry.pooled {
            entry.f_ratio = Some(entry.mean_square / error_ms);
        }
        entry.contribution_percent = if factor_ss_total > 0.0 {
            entry.sum_of_squares / factor_ss_total * 100.0
        } else {
            0.0
        };
    }

    let pooled_factors = entries
        .iter()
        .filter(|e| e.pooled)
        .map(|e| e.factor.clone())
        .collect();

    AnovaResult {
        factors: entries,
        error_ss,
        error_df,
        error_ms,
        total_ss,
        total_df,
        error_df_clamped,
        pooled_factors,
    }
}

/// Pool factors with low F-ratios into error.
///
/// While the residual has no degrees of freedom of its own, F-ratios are
/// undefined and the factor with the smallest mean square is pooled first.
/// After that, the factor with the lowest F-ratio below the threshold is
/// pooled until none qualifies or the minimum unpooled count is reached.
fn pool_factors(
    entries: &mut [FactorAnova],
    error_ss: &mut f64,
    residual_df: &mut isize,
    config: &PoolingConfig,
) {
    loop {
        let unpooled_count = entries.iter().filter(|e| !e.pooled).count();
        if unpooled_count <= config.min_unpooled_factors {
            break; // Don't pool below minimum
        }

        let candidates = entries
            .iter()
            .enumerate()
            .filter(|(_, e)| !e.pooled && e.degrees_of_freedom > 0);

        let pool_idx = if *residual_df < 1 {
            candidates
                .min_by(|a, b| {
                    a.1.mean_square
                        .partial_cmp(&b.1.mean_square)
                        .unwrap_or(std::cmp::Ordering::Equal)
                })
                .map(|(idx, _)| idx)
        } else {
            let error_ms = *error_ss / *residual_df as f64;
            if error_ms <= 0.0 {
                break;
            }

            let mut min_f = f64::INFINITY;
            let mut pool_idx: Option<usize> = None;
            for (idx, entry) in candidates {
                let f_ratio = entry.mean_square / error_ms;
                if f_ratio < config.threshold && f_ratio < min_f {
                    min_f = f_ratio;
                    pool_idx = Some(idx);
                }
            }
            pool_idx
        };

        match pool_idx {
            Some(idx) => {
                debug!("pooling factor {} into error", entries[idx].factor);
                *error_ss += entries[idx].sum_of_squares;
                *residual_df += entries[idx].degrees_of_freedom as isize;
                entries[idx].pooled = true;
            }
            None => break, // No more factors to pool
        }
    }
}
