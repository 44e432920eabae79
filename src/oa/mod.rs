//! Orthogonal array layout used to assign control factor levels to runs.
//!
//! ## Overview
//!
//! - [`OrthogonalArray`]: a rectangular matrix of 1-based level indices
//! - [`BalanceReport`]: per-column level counts for sanity checking layouts
//!
//! Row `i` of the array is one control design point. Column `j` holds the
//! 1-based level index of the `j`-th declared control factor; columns beyond
//! the declared factors are carried along but never read.

mod stats;

pub use stats::BalanceReport;

use ndarray::{Array2, ArrayView1};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::factor::ControlFactor;

/// An orthogonal array of 1-based level indices.
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OrthogonalArray {
    /// The array data, shape (runs, columns).
    data: Array2<u32>,
    /// Catalogue name, if the array came from the standard catalogue.
    name: Option<String>,
}

impl OrthogonalArray {
    /// Create an array from an ndarray matrix.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyArray`] if the matrix has no rows or no columns.
    pub fn new(data: Array2<u32>) -> Result<Self> {
        if data.nrows() == 0 || data.ncols() == 0 {
            return Err(Error::EmptyArray);
        }
        Ok(Self { data, name: None })
    }

    /// Create an array from row vectors.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyArray`] if there are no rows or the rows are
    /// empty, and [`Error::DimensionMismatch`] if the rows differ in length.
    ///
    /// # Example
    ///
    /// ```
    /// use taguchi_robust::oa::OrthogonalArray;
    ///
    /// let oa = OrthogonalArray::from_rows(&[vec![1, 1], vec![1, 2], vec![2, 1], vec![2, 2]]).unwrap();
    /// assert_eq!(oa.runs(), 4);
    /// assert_eq!(oa.columns(), 2);
    /// assert_eq!(oa.get(3, 1), 2);
    /// ```
    pub fn from_rows<R: AsRef<[u32]>>(rows: &[R]) -> Result<Self> {
        let first = rows.first().ok_or(Error::EmptyArray)?;
        let columns = first.as_ref().len();
        if columns == 0 {
            return Err(Error::EmptyArray);
        }

        let mut cells = Vec::with_capacity(rows.len() * columns);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != columns {
                return Err(Error::DimensionMismatch {
                    expected: format!("{} columns", columns),
                    actual: format!("{} columns in row {}", row.len(), i + 1),
                });
            }
            cells.extend_from_slice(row);
        }

        let data = Array2::from_shape_vec((rows.len(), columns), cells).map_err(|e| {
            Error::DimensionMismatch {
                expected: format!("{}x{} matrix", rows.len(), columns),
                actual: e.to_string(),
            }
        })?;
        Self::new(data)
    }

    /// Attach a catalogue name to the array.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Get the catalogue name, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Get the number of runs (rows).
    #[must_use]
    pub fn runs(&self) -> usize {
        self.data.nrows()
    }

    /// Get the number of columns.
    #[must_use]
    pub fn columns(&self) -> usize {
        self.data.ncols()
    }

    /// Get a reference to the underlying data.
    #[must_use]
    pub fn data(&self) -> &Array2<u32> {
        &self.data
    }

    /// Get the level index at a specific position.
    ///
    /// # Panics
    ///
    /// Panics if the indices are out of bounds.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> u32 {
        self.data[[row, col]]
    }

    /// Get a row of the array.
    #[must_use]
    pub fn row(&self, idx: usize) -> ArrayView1<'_, u32> {
        self.data.row(idx)
    }

    /// Get a column of the array.
    #[must_use]
    pub fn column(&self, idx: usize) -> ArrayView1<'_, u32> {
        self.data.column(idx)
    }

    /// Iterate over rows.
    pub fn rows(&self) -> impl Iterator<Item = ArrayView1<'_, u32>> {
        self.data.rows().into_iter()
    }

    /// Check that the array can lay out the given control factors.
    ///
    /// Column `j` is assigned to `factors[j]`; every entry in an assigned
    /// column must address one of that factor's levels.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TooFewColumns`] or [`Error::LevelIndexOutOfRange`].
    pub fn validate_for(&self, factors: &[ControlFactor]) -> Result<()> {
        if self.columns() < factors.len() {
            return Err(Error::TooFewColumns {
                columns: self.columns(),
                factors: factors.len(),
            });
        }

        for (col, factor) in factors.iter().enumerate() {
            for (row, &index) in self.column(col).iter().enumerate() {
                if factor.level(index).is_none() {
                    return Err(Error::LevelIndexOutOfRange {
                        row: row + 1,
                        column: col + 1,
                        index,
                        factor: factor.name().to_string(),
                        levels: factor.level_count(),
                    });
                }
            }
        }

        Ok(())
    }

    /// Map one row to the level values of the given factors.
    ///
    /// Callers hold an array that passed [`validate_for`](Self::validate_for)
    /// for `factors`: every factor has a column and every entry in it is in
    /// `1..=level_count`.
    pub(crate) fn row_levels(&self, row: usize, factors: &[ControlFactor]) -> Vec<f64> {
        factors
            .iter()
            .enumerate()
            .map(|(col, factor)| factor.levels()[self.data[[row, col]] as usize - 1])
            .collect()
    }
}

impl fmt::Debug for OrthogonalArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}({}x{}) with data {:?}",
            self.name.as_deref().unwrap_or("OA"),
            self.runs(),
            self.columns(),
            self.data
        )
    }
}

impl fmt::Display for OrthogonalArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} ({} runs, {} columns)",
            self.name.as_deref().unwrap_or("custom array"),
            self.runs(),
            self.columns()
        )?;
        for row in self.data.rows() {
            let row_str: Vec<String> = row.iter().map(|v| v.to_string()).collect();
            writeln!(f, "  {}", row_str.join(" "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn l4() -> OrthogonalArray {
        OrthogonalArray::from_rows(&[[1, 1, 1], [1, 2, 2], [2, 1, 2], [2, 2, 1]]).unwrap()
    }

    #[test]
    fn test_from_rows() {
        let oa = l4();
        assert_eq!(oa.runs(), 4);
        assert_eq!(oa.columns(), 3);
        assert_eq!(oa.get(1, 2), 2);
        assert_eq!(oa.name(), None);
    }

    #[test]
    fn test_from_rows_empty() {
        let rows: Vec<Vec<u32>> = Vec::new();
        assert_eq!(OrthogonalArray::from_rows(&rows), Err(Error::EmptyArray));
        assert_eq!(
            OrthogonalArray::from_rows(&[Vec::<u32>::new()]),
            Err(Error::EmptyArray)
        );
    }

    #[test]
    fn test_from_rows_ragged() {
        let result = OrthogonalArray::from_rows(&[vec![1, 1], vec![2]]);
        assert!(matches!(result, Err(Error::DimensionMismatch { .. })));
    }

    #[test]
    fn test_validate_too_few_columns() {
        let oa = OrthogonalArray::from_rows(&[[1], [2]]).unwrap();
        let factors = vec![
            ControlFactor::new("A", [1.0, 2.0]),
            ControlFactor::new("B", [1.0, 2.0]),
        ];
        assert_eq!(
            oa.validate_for(&factors),
            Err(Error::TooFewColumns {
                columns: 1,
                factors: 2
            })
        );
    }

    #[test]
    fn test_validate_level_out_of_range() {
        let oa = OrthogonalArray::from_rows(&[[1, 1], [3, 2]]).unwrap();
        let factors = vec![ControlFactor::new("A", [1.0, 2.0])];
        assert_eq!(
            oa.validate_for(&factors),
            Err(Error::LevelIndexOutOfRange {
                row: 2,
                column: 1,
                index: 3,
                factor: "A".into(),
                levels: 2,
            })
        );

        // Zero is never a valid 1-based index
        let oa = OrthogonalArray::from_rows(&[[0], [1]]).unwrap();
        assert!(oa.validate_for(&factors).is_err());
    }

    #[test]
    fn test_unused_columns_are_not_validated() {
        let oa = OrthogonalArray::from_rows(&[[1, 9], [2, 9]]).unwrap();
        let factors = vec![ControlFactor::new("A", [1.0, 2.0])];
        assert!(oa.validate_for(&factors).is_ok());
    }

    #[test]
    fn test_row_levels() {
        let oa = l4();
        let factors = vec![
            ControlFactor::new("A", [10.0, 20.0]),
            ControlFactor::new("B", [0.1, 0.2]),
        ];
        assert_eq!(oa.row_levels(2, &factors), vec![20.0, 0.1]);
    }

    #[test]
    fn test_display() {
        let oa = l4().with_name("L4");
        let text = oa.to_string();
        assert!(text.starts_with("L4 (4 runs, 3 columns)"));
        assert!(text.contains("  2 2 1"));
    }
}
