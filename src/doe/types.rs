//! DOE analysis types.
//!
//! Core types for Taguchi robust-design analysis.

use std::collections::BTreeMap;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Optimization goal for Taguchi analysis.
///
/// The target of nominal-the-best lives in its variant, so the other goals
/// carry no unused value.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum OptimizationGoal {
    /// Minimize the response value.
    /// S/N = -10 * log10(mean(y^2))
    #[default]
    SmallerTheBetter,
    /// Maximize the response value.
    /// S/N = -10 * log10(mean(1/y^2))
    LargerTheBetter,
    /// Hit a target value with minimum deviation.
    /// S/N = -10 * log10(mean((y - target)^2))
    NominalTheBest {
        /// The value every observation should ideally equal.
        target: f64,
    },
}

impl fmt::Display for OptimizationGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SmallerTheBetter => write!(f, "Smaller-the-Better"),
            Self::LargerTheBetter => write!(f, "Larger-the-Better"),
            Self::NominalTheBest { target } => write!(f, "Nominal-the-Best (target {target})"),
        }
    }
}

/// Configuration for factor pooling.
///
/// Pooling merges factors with small F-ratios into the error term. It is
/// disabled by default, in which case the threshold is inert.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PoolingConfig {
    /// Whether to pool factors (default: false).
    pub enabled: bool,
    /// F-ratio below which a factor is pooled (default: 2.0).
    pub threshold: f64,
    /// Minimum number of factors to keep unpooled (default: 1).
    pub min_unpooled_factors: usize,
}

impl Default for PoolingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            threshold: 2.0,
            min_unpooled_factors: 1,
        }
    }
}

/// Configuration for an experiment.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ExperimentConfig {
    /// Optimization goal (smaller/larger/nominal).
    pub goal: OptimizationGoal,
    /// Factor pooling settings.
    pub pooling: PoolingConfig,
}

/// Main effect of a single control factor.
///
/// The level means are averages of per-row S/N ratios, so they double as
/// the S/N ratio of each level.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MainEffect {
    /// Factor name.
    pub factor: String,
    /// Level values in declaration order.
    pub level_values: Vec<f64>,
    /// Mean S/N ratio at each level (0 for levels no row uses).
    pub level_means: Vec<f64>,
    /// Number of array rows at each level.
    pub level_counts: Vec<usize>,
    /// Range of level means (max - min).
    pub range: f64,
    /// Rank by range (1 = most influential).
    pub rank: usize,
}

/// ANOVA table entry for a single factor.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FactorAnova {
    /// Factor name.
    pub factor: String,
    /// Sum of squares for this factor.
    pub sum_of_squares: f64,
    /// Degrees of freedom (level count - 1).
    pub degrees_of_freedom: usize,
    /// Mean square (SS / df).
    pub mean_square: f64,
    /// F-ratio (MS / MS_error), None if pooled.
    pub f_ratio: Option<f64>,
    /// Percent of the summed factor SS attributable to this factor.
    pub contribution_percent: f64,
    /// Whether this factor was pooled into error.
    pub pooled: bool,
}

/// Complete ANOVA result.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AnovaResult {
    /// ANOVA entries in factor declaration order.
    pub factors: Vec<FactorAnova>,
    /// Error sum of squares.
    pub error_ss: f64,
    /// Error degrees of freedom (at least 1).
    pub error_df: usize,
    /// Error mean square.
    pub error_ms: f64,
    /// Total sum of squares over row S/N ratios.
    pub total_ss: f64,
    /// Total degrees of freedom (rows - 1).
    pub total_df: usize,
    /// Whether the residual degrees of freedom were below 1 and got clamped.
    pub error_df_clamped: bool,
    /// Names of factors pooled into error.
    pub pooled_factors: Vec<String>,
}

impl AnovaResult {
    /// Look up the entry for a factor.
    #[must_use]
    pub fn factor(&self, name: &str) -> Option<&FactorAnova> {
        self.factors.iter().find(|e| e.factor == name)
    }
}

/// The optimal level chosen for one factor.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OptimalLevel {
    /// Factor name.
    pub factor: String,
    /// 0-based index into the factor's levels.
    pub level_index: usize,
    /// The level value.
    pub value: f64,
    /// Main effect (mean S/N) at this level.
    pub sn_ratio: f64,
}

/// Optimal settings prediction result.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OptimalSettings {
    /// Optimal level for each factor in declaration order.
    pub levels: Vec<OptimalLevel>,
    /// Predicted S/N ratio at the optimum (additive model).
    pub predicted_sn_ratio: f64,
}

/// Complete analysis snapshot.
///
/// Recomputed in full on every analysis; holds no reference to the
/// experiment that produced it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AnalysisResult {
    /// Goal the S/N ratios were computed for.
    pub goal: OptimizationGoal,
    /// S/N ratio of each array row (pooled over noise conditions).
    pub row_sn_ratios: Vec<f64>,
    /// Mean of the row S/N ratios.
    pub grand_mean: f64,
    /// Main effects in factor declaration order.
    pub main_effects: Vec<MainEffect>,
    /// ANOVA table.
    pub anova: AnovaResult,
    /// Optimal settings.
    pub optimal: OptimalSettings,
}

impl AnalysisResult {
    /// Mean S/N ratio per level of a factor.
    #[must_use]
    pub fn snr(&self, factor: &str) -> Option<&[f64]> {
        self.main_effect(factor).map(|e| e.level_means.as_slice())
    }

    /// Main effect of a factor.
    #[must_use]
    pub fn main_effect(&self, factor: &str) -> Option<&MainEffect> {
        self.main_effects.iter().find(|e| e.factor == factor)
    }

    /// Optimal level value of a factor.
    #[must_use]
    pub fn optimal_level(&self, factor: &str) -> Option<f64> {
        self.optimal
            .levels
            .iter()
            .find(|l| l.factor == factor)
            .map(|l| l.value)
    }

    /// Optimal level value of every factor, keyed by name.
    #[must_use]
    pub fn optimal_levels(&self) -> BTreeMap<String, f64> {
        self.optimal
            .levels
            .iter()
            .map(|l| (l.factor.clone(), l.value))
            .collect()
    }

    /// Percentage contribution of a factor.
    #[must_use]
    pub fn contribution(&self, factor: &str) -> Option<f64> {
        self.anova.factor(factor).map(|e| e.contribution_percent)
    }

    /// Percentage contribution of every factor, keyed by name.
    #[must_use]
    pub fn contributions(&self) -> BTreeMap<String, f64> {
        self.anova
            .factors
            .iter()
            .map(|e| (e.factor.clone(), e.contribution_percent))
            .collect()
    }
}
