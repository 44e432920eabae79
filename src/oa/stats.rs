//! Balance checks for orthogonal array layouts.
//!
//! Catalogue arrays are balanced by construction. Caller-supplied matrices
//! are not validated for orthogonality, but an unbalanced column biases the
//! main effects of its factor, so experiments log a warning when one is found.

use std::collections::BTreeMap;

use super::OrthogonalArray;

/// A report on the balance of the first `k` columns of an array.
#[derive(Debug, Clone, PartialEq)]
pub struct BalanceReport {
    /// Whether each column is balanced (each level index appears equally often).
    pub column_balance: Vec<bool>,
    /// The counts of each level index for each column.
    pub level_counts: Vec<BTreeMap<u32, usize>>,
}

impl BalanceReport {
    /// Whether every checked column is balanced.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        self.column_balance.iter().all(|&b| b)
    }

    /// 0-based indices of the unbalanced columns.
    #[must_use]
    pub fn unbalanced_columns(&self) -> Vec<usize> {
        self.column_balance
            .iter()
            .enumerate()
            .filter(|(_, &b)| !b)
            .map(|(i, _)| i)
            .collect()
    }
}

impl OrthogonalArray {
    /// Perform a balance check on the first `columns` columns.
    ///
    /// A column is balanced when every level index it uses appears the same
    /// number of times. `columns` is capped at the array width.
    #[must_use]
    pub fn balance_report(&self, columns: usize) -> BalanceReport {
        let k = columns.min(self.columns());

        let mut column_balance = Vec::with_capacity(k);
        let mut level_counts = Vec::with_capacity(k);

        for col in 0..k {
            let mut counts = BTreeMap::new();
            for &index in self.column(col) {
                *counts.entry(index).or_insert(0) += 1;
            }

            let mut values = counts.values();
            let balanced = match values.next() {
                Some(first) => values.all(|c| c == first),
                None => true,
            };

            column_balance.push(balanced);
            level_counts.push(counts);
        }

        BalanceReport {
            column_balance,
            level_counts,
        }
    }
}
