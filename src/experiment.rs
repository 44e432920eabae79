//! Taguchi robust-design experiments.
//!
//! An [`Experiment`] owns its factor definitions, orthogonal array,
//! configuration and observation log. It generates the trials to run,
//! collects their results and analyzes them.
//!
//! # Example
//!
//! ```
//! use taguchi_robust::{ControlFactor, Experiment, NoiseFactor, OptimizationGoal};
//!
//! let mut exp = Experiment::with_standard_array(
//!     OptimizationGoal::SmallerTheBetter,
//!     vec![
//!         ControlFactor::new("Threads", [2.0, 8.0]),
//!         ControlFactor::new("Chunk", [1024.0, 65536.0]),
//!     ],
//!     "L4",
//!     vec![NoiseFactor::new("Pattern", [0.0, 1.0])],
//! )
//! .unwrap();
//!
//! let trials = exp.generate_trials();
//! assert_eq!(trials.len(), 8);
//!
//! for trial in &trials {
//!     let threads = trial.control_value("Threads").unwrap();
//!     exp.add_result(trial, [100.0 / threads]);
//! }
//!
//! let result = exp.analyze();
//! assert_eq!(result.optimal_level("Threads"), Some(8.0));
//! ```

use log::{debug, warn};

use crate::builder::ExperimentBuilder;
use crate::catalogue;
use crate::doe::{self, AnalysisResult, ExperimentConfig, OptimizationGoal};
use crate::error::Result;
use crate::factor::{validate_factors, ControlFactor, NoiseFactor};
use crate::oa::OrthogonalArray;
use crate::observation::ObservationStore;
use crate::trial::{self, Trial};

/// A configured robust-design experiment.
///
/// Recording results requires `&mut self`; concurrent recorders must
/// serialize access themselves, e.g. with a `Mutex<Experiment>`.
#[derive(Debug, Clone)]
pub struct Experiment {
    config: ExperimentConfig,
    control: Vec<ControlFactor>,
    noise: Vec<NoiseFactor>,
    array: OrthogonalArray,
    log: ObservationStore,
}

impl Experiment {
    /// Create an experiment over a caller-supplied orthogonal array.
    ///
    /// Column `j` of the array holds the 1-based level index of
    /// `control[j]`. Extra columns are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if a factor has no levels, a factor name is repeated,
    /// the array has fewer columns than control factors, or an entry
    /// addresses a level its factor does not have.
    pub fn new(
        goal: OptimizationGoal,
        control: Vec<ControlFactor>,
        array: OrthogonalArray,
        noise: Vec<NoiseFactor>,
    ) -> Result<Self> {
        let config = ExperimentConfig {
            goal,
            ..Default::default()
        };
        Self::with_config(config, control, array, noise)
    }

    /// Create an experiment over a standard array looked up by name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownArray`](crate::Error::UnknownArray) if the
    /// name is not in the catalogue, plus everything [`Experiment::new`]
    /// reports.
    pub fn with_standard_array(
        goal: OptimizationGoal,
        control: Vec<ControlFactor>,
        array_name: &str,
        noise: Vec<NoiseFactor>,
    ) -> Result<Self> {
        let array = catalogue::get_by_name(array_name)?;
        Self::new(goal, control, array, noise)
    }

    /// Start building an experiment.
    #[must_use]
    pub fn builder() -> ExperimentBuilder {
        ExperimentBuilder::new()
    }

    pub(crate) fn with_config(
        config: ExperimentConfig,
        control: Vec<ControlFactor>,
        array: OrthogonalArray,
        noise: Vec<NoiseFactor>,
    ) -> Result<Self> {
        validate_factors(&control, &noise)?;
        array.validate_for(&control)?;

        let exp = Self {
            config,
            control,
            noise,
            array,
            log: ObservationStore::new(),
        };

        let balance = exp.array.balance_report(exp.control.len());
        if !balance.is_balanced() {
            warn!(
                "array columns {:?} are unbalanced; main effects of their factors will be biased",
                balance
                    .unbalanced_columns()
                    .iter()
                    .map(|c| c + 1)
                    .collect::<Vec<_>>()
            );
        }
        if exp.is_saturated() {
            warn!(
                "design is saturated: {} factor degrees of freedom for {} rows; \
                 error degrees of freedom will be clamped to 1",
                exp.factor_degrees_of_freedom(),
                exp.array.runs()
            );
        }

        debug!(
            "created experiment: {} control factors, {} noise factors, {} ({} runs), goal {}",
            exp.control.len(),
            exp.noise.len(),
            exp.array.name().unwrap_or("custom array"),
            exp.array.runs(),
            exp.config.goal
        );

        Ok(exp)
    }

    /// Generate every trial to run: each array row crossed with each noise
    /// combination, with 1-based ids in row-major order.
    #[must_use]
    pub fn generate_trials(&self) -> Vec<Trial> {
        trial::generate_trials(&self.control, &self.array, &self.noise)
    }

    /// Record the observations measured for a trial.
    ///
    /// Any number of results may be recorded for the same trial.
    pub fn add_result(&mut self, trial: &Trial, observations: impl Into<Vec<f64>>) {
        self.log.record(trial.clone(), observations.into());
    }

    /// Analyze every result recorded so far.
    ///
    /// Each call recomputes from the complete log; the result holds no
    /// reference to the experiment.
    #[must_use]
    pub fn analyze(&self) -> AnalysisResult {
        doe::analyze(&self.control, &self.array, &self.log, &self.config)
    }

    /// Whether the factors use up every degree of freedom of the array.
    ///
    /// Saturated designs leave no residual to estimate error from; analysis
    /// clamps the error degrees of freedom to 1 unless pooling frees some.
    #[must_use]
    pub fn is_saturated(&self) -> bool {
        self.factor_degrees_of_freedom() + 1 >= self.array.runs()
    }

    fn factor_degrees_of_freedom(&self) -> usize {
        self.control
            .iter()
            .map(|f| f.level_count().saturating_sub(1))
            .sum()
    }

    /// The analysis configuration.
    #[must_use]
    pub fn config(&self) -> &ExperimentConfig {
        &self.config
    }

    /// The optimization goal.
    #[must_use]
    pub fn goal(&self) -> OptimizationGoal {
        self.config.goal
    }

    /// Declared control factors.
    #[must_use]
    pub fn control_factors(&self) -> &[ControlFactor] {
        &self.control
    }

    /// Declared noise factors.
    #[must_use]
    pub fn noise_factors(&self) -> &[NoiseFactor] {
        &self.noise
    }

    /// The orthogonal array.
    #[must_use]
    pub fn array(&self) -> &OrthogonalArray {
        &self.array
    }

    /// The observation log.
    #[must_use]
    pub fn results(&self) -> &ObservationStore {
        &self.log
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn single_factor(goal: OptimizationGoal, data: [&[f64]; 4]) -> AnalysisResult {
        let mut exp = Experiment::new(
            goal,
            vec![ControlFactor::new("A", [1.0, 2.0])],
            OrthogonalArray::from_rows(&[[1], [2]]).unwrap(),
            vec![NoiseFactor::new("N", [0.0, 1.0])],
        )
        .unwrap();

        let trials = exp.generate_trials();
        assert_eq!(trials.len(), 4);
        for (trial, obs) in trials.iter().zip(data) {
            exp.add_result(trial, obs);
        }
        exp.analyze()
    }

    #[test]
    fn test_smaller_the_better_end_to_end() {
        let result = single_factor(
            OptimizationGoal::SmallerTheBetter,
            [&[2.0, 4.0], &[6.0, 8.0], &[1.0, 1.0], &[1.0, 1.0]],
        );

        let snr = result.snr("A").unwrap();
        assert!((snr[0] - -10.0 * 30.0_f64.log10()).abs() < 1e-10);
        assert!(snr[1].abs() < 1e-10);
        assert_eq!(result.optimal_level("A"), Some(2.0));
    }

    #[test]
    fn test_larger_the_better_end_to_end() {
        let result = single_factor(
            OptimizationGoal::LargerTheBetter,
            [&[2.0, 4.0], &[6.0, 8.0], &[10.0, 10.0], &[10.0, 10.0]],
        );

        let msd: f64 = (1.0 / 4.0 + 1.0 / 16.0 + 1.0 / 36.0 + 1.0 / 64.0) / 4.0;
        let snr = result.snr("A").unwrap();
        assert!((snr[0] - -10.0 * msd.log10()).abs() < 1e-10);
        assert!((snr[1] - -10.0 * 0.01_f64.log10()).abs() < 1e-10);
        assert_eq!(result.optimal_level("A"), Some(2.0));
    }

    #[test]
    fn test_nominal_the_best_end_to_end() {
        let result = single_factor(
            OptimizationGoal::NominalTheBest { target: 5.0 },
            [&[3.0, 4.0], &[6.0, 7.0], &[5.0, 5.0], &[5.0, 5.0]],
        );

        let snr = result.snr("A").unwrap();
        assert!((snr[0] - -10.0 * 2.5_f64.log10()).abs() < 1e-10);
        assert_eq!(snr[1], f64::INFINITY);
        assert_eq!(result.optimal_level("A"), Some(2.0));
        assert_eq!(result.optimal.predicted_sn_ratio, f64::INFINITY);
        assert!(result.to_string().contains("Predicted S/N at optimum: inf dB"));
    }

    #[test]
    fn test_anova_sanity() {
        let mut exp = Experiment::new(
            OptimizationGoal::SmallerTheBetter,
            vec![
                ControlFactor::new("A", [1.0, 2.0]),
                ControlFactor::new("B", [1.0, 2.0]),
            ],
            OrthogonalArray::from_rows(&[[1, 1], [1, 2], [2, 1], [2, 2]]).unwrap(),
            vec![NoiseFactor::new("N", [0.0])],
        )
        .unwrap();

        let trials = exp.generate_trials();
        for (trial, y) in trials.iter().zip([2.0, 4.0, 6.0, 10.0]) {
            exp.add_result(trial, [y]);
        }
        let result = exp.analyze();

        for name in ["A", "B"] {
            let entry = result.anova.factor(name).unwrap();
            assert_eq!(entry.degrees_of_freedom, 1);
            assert!(entry.sum_of_squares >= 0.0);
        }
        let total: f64 = result.contributions().values().sum();
        assert!((total - 100.0).abs() < 1e-9);
        assert_eq!(result.anova.error_df, 1);
        assert!(!result.anova.error_df_clamped);
    }

    #[test]
    fn test_results_for_repeated_trial_are_pooled() {
        let mut exp = Experiment::new(
            OptimizationGoal::SmallerTheBetter,
            vec![ControlFactor::new("A", [1.0, 2.0])],
            OrthogonalArray::from_rows(&[[1], [2]]).unwrap(),
            Vec::new(),
        )
        .unwrap();

        let trials = exp.generate_trials();
        exp.add_result(&trials[0], [2.0, 4.0]);
        exp.add_result(&trials[0], [6.0, 8.0]);
        exp.add_result(&trials[1], [1.0]);

        assert_eq!(exp.results().len(), 3);
        let snr = exp.analyze().row_sn_ratios;
        assert!((snr[0] - -10.0 * 30.0_f64.log10()).abs() < 1e-10);
    }

    #[test]
    fn test_unknown_array_name() {
        let err = Experiment::with_standard_array(
            OptimizationGoal::SmallerTheBetter,
            vec![ControlFactor::new("A", [1.0, 2.0])],
            "L5",
            Vec::new(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::UnknownArray { .. }));
        assert!(err.is_construction_error());
    }

    #[test]
    fn test_too_few_columns() {
        let control: Vec<ControlFactor> = ["A", "B", "C", "D"]
            .iter()
            .map(|n| ControlFactor::new(*n, [1.0, 2.0]))
            .collect();
        let err = Experiment::with_standard_array(
            OptimizationGoal::SmallerTheBetter,
            control,
            "L4",
            Vec::new(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            Error::TooFewColumns {
                columns: 3,
                factors: 4
            }
        );
    }

    #[test]
    fn test_level_index_out_of_range() {
        let err = Experiment::new(
            OptimizationGoal::SmallerTheBetter,
            vec![ControlFactor::new("A", [1.0, 2.0])],
            OrthogonalArray::from_rows(&[[1], [3]]).unwrap(),
            Vec::new(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            Error::LevelIndexOutOfRange { row: 2, index: 3, .. }
        ));
    }

    #[test]
    fn test_duplicate_noise_factor() {
        let err = Experiment::new(
            OptimizationGoal::SmallerTheBetter,
            vec![ControlFactor::new("A", [1.0, 2.0])],
            OrthogonalArray::from_rows(&[[1], [2]]).unwrap(),
            vec![NoiseFactor::new("N", [0.0]), NoiseFactor::new("N", [1.0])],
        )
        .unwrap_err();
        assert!(matches!(err, Error::DuplicateFactor { .. }));
    }

    #[test]
    fn test_control_and_noise_share_namespace() {
        let err = Experiment::new(
            OptimizationGoal::SmallerTheBetter,
            vec![ControlFactor::new("Temp", [1.0, 2.0])],
            OrthogonalArray::from_rows(&[[1], [2]]).unwrap(),
            vec![NoiseFactor::new("Temp", [20.0, 30.0])],
        )
        .unwrap_err();
        assert_eq!(
            err,
            Error::DuplicateFactor {
                name: "Temp".into()
            }
        );
    }

    #[test]
    fn test_saturation() {
        let control: Vec<ControlFactor> = ["A", "B", "C"]
            .iter()
            .map(|n| ControlFactor::new(*n, [1.0, 2.0]))
            .collect();
        let exp = Experiment::with_standard_array(
            OptimizationGoal::SmallerTheBetter,
            control.clone(),
            "L4",
            Vec::new(),
        )
        .unwrap();
        assert!(exp.is_saturated());

        let exp = Experiment::with_standard_array(
            OptimizationGoal::SmallerTheBetter,
            control,
            "L8",
            Vec::new(),
        )
        .unwrap();
        assert!(!exp.is_saturated());
    }

    #[test]
    fn test_generate_trials_is_deterministic() {
        let exp = Experiment::with_standard_array(
            OptimizationGoal::LargerTheBetter,
            vec![ControlFactor::new("A", [1.0, 2.0, 3.0])],
            "L9",
            vec![
                NoiseFactor::new("N1", [0.0, 1.0]),
                NoiseFactor::new("N2", [0.0, 1.0, 2.0]),
            ],
        )
        .unwrap();

        let first = exp.generate_trials();
        assert_eq!(first.len(), 9 * 6);
        assert_eq!(first, exp.generate_trials());
    }

    #[test]
    fn test_experiment_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Experiment>();
    }
}
