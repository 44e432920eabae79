//! Plain-text rendering of analysis results.
//!
//! [`AnalysisResult`] and [`AnovaResult`] implement `Display`, so a report
//! is just `println!("{result}")`.

use std::fmt;

use crate::doe::{AnalysisResult, AnovaResult};

const RULE_WIDTH: usize = 72;

impl fmt::Display for AnovaResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:<16} {:>12} {:>4} {:>12} {:>10} {:>9}",
            "Source", "SS", "DF", "MS", "F", "Contrib%"
        )?;
        writeln!(f, "{}", "-".repeat(RULE_WIDTH))?;

        for entry in &self.factors {
            let name = if entry.pooled {
                format!("{} *", entry.factor)
            } else {
                entry.factor.clone()
            };
            let f_ratio = entry
                .f_ratio
                .map_or_else(|| "-".to_string(), |f_ratio| format!("{f_ratio:.4}"));
            writeln!(
                f,
                "{:<16} {:>12.4} {:>4} {:>12.4} {:>10} {:>9.2}",
                name,
                entry.sum_of_squares,
                entry.degrees_of_freedom,
                entry.mean_square,
                f_ratio,
                entry.contribution_percent
            )?;
        }

        writeln!(
            f,
            "{:<16} {:>12.4} {:>4} {:>12.4}",
            "Error", self.error_ss, self.error_df, self.error_ms
        )?;
        writeln!(
            f,
            "{:<16} {:>12.4} {:>4}",
            "Total", self.total_ss, self.total_df
        )?;

        if !self.pooled_factors.is_empty() {
            writeln!(f, "* pooled into error: {}", self.pooled_factors.join(", "))?;
        }
        if self.error_df_clamped {
            writeln!(
                f,
                "note: no residual degrees of freedom (saturated design); error DF clamped to 1"
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for AnalysisResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let title = format!("Taguchi analysis ({})", self.goal);
        writeln!(f, "{title}")?;
        writeln!(f, "{}", "=".repeat(title.len()))?;
        writeln!(f)?;

        writeln!(f, "Optimal levels:")?;
        for level in &self.optimal.levels {
            writeln!(
                f,
                "  {:<16} = {} (level {}, S/N {:.4} dB)",
                level.factor,
                level.value,
                level.level_index + 1,
                level.sn_ratio
            )?;
        }
        writeln!(
            f,
            "Predicted S/N at optimum: {:.4} dB",
            self.optimal.predicted_sn_ratio
        )?;
        writeln!(f)?;

        writeln!(f, "S/N ratio by level (grand mean {:.4} dB):", self.grand_mean)?;
        for effect in &self.main_effects {
            let levels = effect
                .level_values
                .iter()
                .zip(&effect.level_means)
                .map(|(value, mean)| format!("{value} -> {mean:.4}"))
                .collect::<Vec<_>>()
                .join(" | ");
            writeln!(
                f,
                "  {:<16} rank {:<2} range {:>9.4}  {}",
                effect.factor, effect.rank, effect.range, levels
            )?;
        }
        writeln!(f)?;

        writeln!(f, "ANOVA:")?;
        write!(f, "{}", self.anova)
    }
}

#[cfg(test)]
mod tests {
    use crate::doe::{ExperimentConfig, OptimizationGoal, PoolingConfig};
    use crate::factor::ControlFactor;
    use crate::{Experiment, ExperimentBuilder};

    fn l4_experiment(pooling: PoolingConfig) -> Experiment {
        let mut exp = ExperimentBuilder::new()
            .goal(OptimizationGoal::LargerTheBetter)
            .control_factors(
                ["Speed", "Feed", "Depth"]
                    .iter()
                    .map(|n| ControlFactor::new(*n, [1.0, 2.0])),
            )
            .standard_array("L4")
            .pooling(pooling)
            .build()
            .unwrap();

        for (trial, y) in exp.generate_trials().iter().zip([10.0, 50.0, 10.1, 50.3]) {
            exp.add_result(trial, [y, y + 0.2]);
        }
        exp
    }

    #[test]
    fn test_report_contents() {
        let exp = l4_experiment(ExperimentConfig::default().pooling);
        let report = exp.analyze().to_string();

        assert!(report.starts_with("Taguchi analysis (Larger-the-Better)"));
        assert!(report.contains("Optimal levels:"));
        assert!(report.contains("Predicted S/N at optimum"));
        for name in ["Speed", "Feed", "Depth", "Error", "Total"] {
            assert!(report.contains(name), "missing {name}");
        }
        assert!(report.contains("error DF clamped to 1"));
        assert!(!report.contains("pooled into error"));
    }

    #[test]
    fn test_report_lists_pooled_factors() {
        let exp = l4_experiment(PoolingConfig {
            enabled: true,
            ..Default::default()
        });
        let result = exp.analyze();
        let table = result.anova.to_string();

        assert!(!result.anova.pooled_factors.is_empty());
        assert!(table.contains("pooled into error"));
        for name in &result.anova.pooled_factors {
            let line = table
                .lines()
                .find(|line| line.starts_with(&format!("{name} *")))
                .unwrap();
            assert!(line.split_whitespace().any(|cell| cell == "-"));
        }
    }
}
