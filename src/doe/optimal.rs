//! Optimal settings prediction for DOE.
//!
//! Picks the level with the highest mean S/N ratio for every factor and
//! predicts the S/N ratio at that combination with Taguchi's additive model.

use super::types::{MainEffect, OptimalLevel, OptimalSettings};

/// Select the optimal level of every factor.
///
/// Levels are scanned in declaration order and a later level replaces the
/// current best only when its mean S/N is strictly greater, so ties go to
/// the lowest index.
///
/// The prediction uses the additive model:
/// η̂ = η̄ + Σ(η_optimal_i - η̄_i)
/// where η̄_i is the mean S/N of factor i across its levels. A best level
/// with an infinite S/N (an ideal pool) predicts +∞.
///
/// # Arguments
/// * `main_effects` - Main effect results for each factor
/// * `grand_mean` - Grand mean of the row S/N ratios
#[must_use]
pub fn select_optimal_levels(main_effects: &[MainEffect], grand_mean: f64) -> OptimalSettings {
    let levels: Vec<OptimalLevel> = main_effects.iter().filter_map(best_level).collect();

    let ideal = levels
        .iter()
        .any(|best| best.sn_ratio.is_infinite() && best.sn_ratio.is_sign_positive());

    let predicted_sn_ratio = if ideal {
        f64::INFINITY
    } else {
        grand_mean
            + main_effects
                .iter()
                .zip(&levels)
                .map(|(effect, best)| {
                    let factor_sn_mean =
                        effect.level_means.iter().sum::<f64>() / effect.level_means.len() as f64;
                    best.sn_ratio - factor_sn_mean
                })
                .sum::<f64>()
    };

    OptimalSettings {
        levels,
        predicted_sn_ratio,
    }
}

fn best_level(effect: &MainEffect) -> Option<OptimalLevel> {
    let (&first, rest) = effect.level_means.split_first()?;

    let mut best_idx = 0;
    let mut best_sn = first;
    for (offset, &sn) in rest.iter().enumerate() {
        if sn > best_sn {
            best_sn = sn;
            best_idx = offset + 1;
        }
    }

    Some(OptimalLevel {
        factor: effect.factor.clone(),
        level_index: best_idx,
        value: effect.level_values.get(best_idx).copied()?,
        sn_ratio: best_sn,
    })
}
