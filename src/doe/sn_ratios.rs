//! Signal-to-Noise ratio calculations.
//!
//! Taguchi's S/N ratios fold both the mean and the spread of a pool of
//! observations into one logarithmic score; larger is always better.

use super::types::OptimizationGoal;

/// Substitute for zero observations under larger-the-better, so `1/y²`
/// stays finite.
pub const LARGER_THE_BETTER_EPSILON: f64 = 1e-10;

impl OptimizationGoal {
    /// Compute the S/N ratio of a pool of observations.
    ///
    /// # Formulas
    /// - Smaller-the-better: η = -10 · log₁₀(mean(y²))
    /// - Larger-the-better: η = -10 · log₁₀(mean(1/y²))
    /// - Nominal-the-best: η = -10 · log₁₀(mean((y - target)²))
    ///
    /// An empty pool scores 0. A mean squared deviation of exactly zero
    /// (smaller-the-better and nominal-the-best) scores `+∞`.
    ///
    /// # Example
    ///
    /// ```
    /// use taguchi_robust::OptimizationGoal;
    ///
    /// let sn = OptimizationGoal::SmallerTheBetter.compute_snr(&[2.0, 4.0, 6.0, 8.0]);
    /// assert!((sn - -10.0 * 30f64.log10()).abs() < 1e-12);
    ///
    /// let on_target = OptimizationGoal::NominalTheBest { target: 5.0 };
    /// assert_eq!(on_target.compute_snr(&[5.0, 5.0]), f64::INFINITY);
    /// ```
    #[must_use]
    pub fn compute_snr(&self, observations: &[f64]) -> f64 {
        if observations.is_empty() {
            return 0.0;
        }

        match *self {
            Self::SmallerTheBetter => snr_from_msd(mean_of(observations, |y| y * y)),
            Self::LargerTheBetter => {
                let msd = mean_of(observations, |y| {
                    let y = if y == 0.0 { LARGER_THE_BETTER_EPSILON } else { y };
                    1.0 / (y * y)
                });
                -10.0 * msd.log10()
            }
            Self::NominalTheBest { target } => {
                snr_from_msd(mean_of(observations, |y| (y - target) * (y - target)))
            }
        }
    }
}

/// Compute the S/N ratio of a pool of observations for a goal.
///
/// Free-function form of [`OptimizationGoal::compute_snr`].
#[must_use]
pub fn compute_snr(goal: &OptimizationGoal, observations: &[f64]) -> f64 {
    goal.compute_snr(observations)
}

fn mean_of(values: &[f64], f: impl Fn(f64) -> f64) -> f64 {
    values.iter().map(|&v| f(v)).sum::<f64>() / values.len() as f64
}

/// Zero mean squared deviation is a perfect score, checked before the log.
fn snr_from_msd(msd: f64) -> f64 {
    if msd == 0.0 {
        return f64::INFINITY;
    }
    -10.0 * msd.log10()
}
