//! DOE (Design of Experiments) analysis module.
//!
//! This module provides the Taguchi robust-design analysis pipeline:
//! - Signal-to-Noise ratios for the three quality characteristics
//! - Per-row S/N reduction over pooled noise replicates
//! - Main effects calculation
//! - ANOVA with optional factor pooling
//! - Optimal level selection with additive-model prediction
//!
//! ## Quick Start
//!
//! The pipeline runs through [`Experiment::analyze`](crate::Experiment::analyze).
//! The S/N and selection steps are also usable on their own:
//!
//! ```rust
//! use taguchi_robust::doe::{compute_snr, select_optimal_levels, MainEffect, OptimizationGoal};
//!
//! let goal = OptimizationGoal::SmallerTheBetter;
//! let low = compute_snr(&goal, &[2.0, 4.0, 6.0, 8.0]);
//! let high = compute_snr(&goal, &[1.0, 1.0]);
//! assert!((low - -10.0 * 30f64.log10()).abs() < 1e-10);
//!
//! let effect = MainEffect {
//!     factor: "A".to_string(),
//!     level_values: vec![1.0, 2.0],
//!     level_means: vec![low, high],
//!     level_counts: vec![1, 1],
//!     range: high - low,
//!     rank: 1,
//! };
//! let optimal = select_optimal_levels(&[effect], (low + high) / 2.0);
//! assert_eq!(optimal.levels[0].value, 2.0);
//! ```
//!
//! ## Analysis Types
//!
//! ### S/N Ratios
//!
//! Signal-to-Noise ratios measure both mean and variation:
//! - **Smaller-the-better**: Minimize response
//! - **Larger-the-better**: Maximize response
//! - **Nominal-the-best**: Hit a target with minimum variance
//!
//! Each array row gets one S/N ratio over the union of its observations
//! across every noise condition.
//!
//! ### Main Effects
//!
//! The main effect of a level is the mean row S/N ratio at that level.
//! Factors are ranked by their effect range (larger range = more influence).
//!
//! ### ANOVA
//!
//! Analysis of Variance partitions total S/N variation into factor
//! contributions (with F-ratios) and residual error. Factor pooling can be
//! enabled to combine weak factors into error.
//!
//! ### Optimal Settings
//!
//! Picks the level with the greatest main effect for each factor and
//! predicts the S/N ratio there with the additive model.

mod anova;
mod main_effects;
mod optimal;
mod row_snr;
mod sn_ratios;
mod types;

pub use anova::calculate_anova;
pub use optimal::select_optimal_levels;
pub use row_snr::grand_mean;
pub use sn_ratios::{compute_snr, LARGER_THE_BETTER_EPSILON};
pub use types::{
    AnalysisResult, AnovaResult, ExperimentConfig, FactorAnova, MainEffect, OptimalLevel,
    OptimalSettings, OptimizationGoal, PoolingConfig,
};

use log::debug;

use main_effects::calculate_main_effects;
use row_snr::calculate_row_sn_ratios;

use crate::factor::ControlFactor;
use crate::oa::OrthogonalArray;
use crate::observation::ObservationStore;

/// Run the complete analysis over every recorded result.
///
/// Only reachable through [`Experiment::analyze`](crate::Experiment::analyze),
/// so the factors and array have always been validated together. Analysis
/// never fails: degenerate inputs resolve to the documented defaults.
///
/// # Arguments
/// * `control` - Declared control factors; factor `j` reads array column `j`
/// * `array` - The orthogonal array used for the experiment
/// * `store` - Recorded results
/// * `config` - Goal and pooling configuration
#[must_use]
pub(crate) fn analyze(
    control: &[ControlFactor],
    array: &OrthogonalArray,
    store: &ObservationStore,
    config: &ExperimentConfig,
) -> AnalysisResult {
    debug!(
        "analyzing {} results ({} observations) over {} rows for {}",
        store.len(),
        store.observation_count(),
        array.runs(),
        config.goal
    );

    let row_sn_ratios = calculate_row_sn_ratios(control, array, store, &config.goal);
    let grand_mean = grand_mean(&row_sn_ratios);

    let main_effects = calculate_main_effects(control, array, &row_sn_ratios);
    let anova = calculate_anova(&main_effects, &row_sn_ratios, grand_mean, &config.pooling);
    let optimal = select_optimal_levels(&main_effects, grand_mean);

    AnalysisResult {
        goal: config.goal,
        row_sn_ratios,
        grand_mean,
        main_effects,
        anova,
        optimal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::get_by_name;
    use crate::factor::NoiseFactor;
    use crate::trial::generate_trials;

    fn l4_factors() -> Vec<ControlFactor> {
        vec![
            ControlFactor::new("A", [1.0, 2.0]),
            ControlFactor::new("B", [10.0, 20.0]),
        ]
    }

    #[test]
    fn test_analyze_l4() {
        let control = l4_factors();
        let oa = get_by_name("L4").unwrap();
        let mut store = ObservationStore::new();
        for (trial, y) in generate_trials(&control, &oa, &[])
            .into_iter()
            .zip([10.0, 20.0, 15.0, 25.0])
        {
            store.record(trial, vec![y, y + 1.0]);
        }

        let result = analyze(&control, &oa, &store, &ExperimentConfig::default());

        assert_eq!(result.row_sn_ratios.len(), 4);
        assert_eq!(result.main_effects.len(), 2);
        assert_eq!(result.anova.factors.len(), 2);
        assert_eq!(result.optimal.levels.len(), 2);

        // Smaller is better: low responses sit at A=1 and B=10
        assert_eq!(result.optimal_level("A"), Some(1.0));
        assert_eq!(result.optimal_level("B"), Some(10.0));
    }

    #[test]
    fn test_analyze_l9_larger_the_better() {
        let control: Vec<ControlFactor> = ["A", "B", "C", "D"]
            .iter()
            .map(|n| ControlFactor::new(*n, [1.0, 2.0, 3.0]))
            .collect();
        let oa = get_by_name("L9").unwrap();

        // Ross (1996) L9 example data
        let responses = [85.0, 92.0, 78.0, 91.0, 88.0, 82.0, 89.0, 86.0, 94.0];
        let mut store = ObservationStore::new();
        for (trial, y) in generate_trials(&control, &oa, &[]).into_iter().zip(responses) {
            store.record(trial, vec![y]);
        }

        let config = ExperimentConfig {
            goal: OptimizationGoal::LargerTheBetter,
            ..Default::default()
        };
        let result = analyze(&control, &oa, &store, &config);

        assert_eq!(result.main_effects.len(), 4);
        for effect in &result.main_effects {
            assert!(effect.rank >= 1 && effect.rank <= 4);
            assert_eq!(effect.level_counts, vec![3, 3, 3]);
        }

        // L9 with four 3-level factors is saturated
        assert!(result.anova.error_df_clamped);
        let total: f64 = result.contributions().values().sum();
        assert!((total - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_analyze_without_results() {
        let control = l4_factors();
        let oa = get_by_name("L4").unwrap();
        let result = analyze(&control, &oa, &ObservationStore::new(), &ExperimentConfig::default());

        assert!(result.row_sn_ratios.iter().all(|&sn| sn == 0.0));
        assert_eq!(result.grand_mean, 0.0);
        assert_eq!(result.contribution("A"), Some(0.0));
        assert_eq!(result.optimal_level("A"), Some(1.0));
    }

    #[test]
    fn test_analyze_is_repeatable() {
        let control = vec![ControlFactor::new("A", [1.0, 2.0])];
        let noise = vec![NoiseFactor::new("N", [0.0, 1.0, 2.0])];
        let oa = OrthogonalArray::from_rows(&[[1], [2]]).unwrap();

        let mut store = ObservationStore::new();
        for (i, trial) in generate_trials(&control, &oa, &noise).into_iter().enumerate() {
            store.record(trial, vec![i as f64 + 1.0]);
        }

        let config = ExperimentConfig::default();
        assert_eq!(
            analyze(&control, &oa, &store, &config),
            analyze(&control, &oa, &store, &config)
        );
    }

    #[test]
    fn test_analyze_with_pooling() {
        let control: Vec<ControlFactor> = ["A", "B", "C"]
            .iter()
            .map(|n| ControlFactor::new(*n, [1.0, 2.0]))
            .collect();
        let oa = get_by_name("L4").unwrap();

        let mut store = ObservationStore::new();
        for (trial, y) in generate_trials(&control, &oa, &[])
            .into_iter()
            .zip([10.0, 50.0, 10.1, 50.1])
        {
            store.record(trial, vec![y, y + 0.1]);
        }

        let config = ExperimentConfig {
            goal: OptimizationGoal::LargerTheBetter,
            pooling: PoolingConfig {
                enabled: true,
                ..Default::default()
            },
        };
        let result = analyze(&control, &oa, &store, &config);

        let unpooled = result.anova.factors.iter().filter(|e| !e.pooled).count();
        assert!(unpooled >= 1);
        assert!(!result.anova.pooled_factors.is_empty());
    }
}
