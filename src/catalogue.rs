//! Catalogue of standard Taguchi orthogonal arrays.
//!
//! This module provides access to the common symmetric and mixed-level
//! layouts (L4, L8, L9, L12, L16, L18, L27) by their standard names. The
//! tables are immutable process-wide constants in the conventional 1-based
//! level notation; nothing is constructed at runtime beyond copying a table
//! into an [`OrthogonalArray`].

use crate::error::{Error, Result};
use crate::oa::OrthogonalArray;

/// A catalogue entry: standard name plus the row table.
#[derive(Debug, Clone, Copy)]
struct StandardArray {
    name: &'static str,
    rows: &'static [&'static [u8]],
}

const L4: &[&[u8]] = &[
    &[1, 1, 1],
    &[1, 2, 2],
    &[2, 1, 2],
    &[2, 2, 1],
];

const L8: &[&[u8]] = &[
    &[1, 1, 1, 1, 1, 1, 1],
    &[1, 1, 1, 2, 2, 2, 2],
    &[1, 2, 2, 1, 1, 2, 2],
    &[1, 2, 2, 2, 2, 1, 1],
    &[2, 1, 2, 1, 2, 1, 2],
    &[2, 1, 2, 2, 1, 2, 1],
    &[2, 2, 1, 1, 2, 2, 1],
    &[2, 2, 1, 2, 1, 1, 2],
];

const L9: &[&[u8]] = &[
    &[1, 1, 1, 1],
    &[1, 2, 2, 2],
    &[1, 3, 3, 3],
    &[2, 1, 2, 3],
    &[2, 2, 3, 1],
    &[2, 3, 1, 2],
    &[3, 1, 3, 2],
    &[3, 2, 1, 3],
    &[3, 3, 2, 1],
];

const L12: &[&[u8]] = &[
    &[1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    &[2, 2, 1, 2, 2, 2, 1, 1, 1, 2, 1],
    &[1, 2, 2, 1, 2, 2, 2, 1, 1, 1, 2],
    &[2, 1, 2, 2, 1, 2, 2, 2, 1, 1, 1],
    &[1, 2, 1, 2, 2, 1, 2, 2, 2, 1, 1],
    &[1, 1, 2, 1, 2, 2, 1, 2, 2, 2, 1],
    &[1, 1, 1, 2, 1, 2, 2, 1, 2, 2, 2],
    &[2, 1, 1, 1, 2, 1, 2, 2, 1, 2, 2],
    &[2, 2, 1, 1, 1, 2, 1, 2, 2, 1, 2],
    &[2, 2, 2, 1, 1, 1, 2, 1, 2, 2, 1],
    &[1, 2, 2, 2, 1, 1, 1, 2, 1, 2, 2],
    &[2, 1, 2, 2, 2, 1, 1, 1, 2, 1, 2],
];

const L16: &[&[u8]] = &[
    &[1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    &[1, 1, 1, 1, 1, 1, 1, 2, 2, 2, 2, 2, 2, 2, 2],
    &[1, 1, 1, 2, 2, 2, 2, 1, 1, 1, 1, 2, 2, 2, 2],
    &[1, 1, 1, 2, 2, 2, 2, 2, 2, 2, 2, 1, 1, 1, 1],
    &[1, 2, 2, 1, 1, 2, 2, 1, 1, 2, 2, 1, 1, 2, 2],
    &[1, 2, 2, 1, 1, 2, 2, 2, 2, 1, 1, 2, 2, 1, 1],
    &[1, 2, 2, 2, 2, 1, 1, 1, 1, 2, 2, 2, 2, 1, 1],
    &[1, 2, 2, 2, 2, 1, 1, 2, 2, 1, 1, 1, 1, 2, 2],
    &[2, 1, 2, 1, 2, 1, 2, 1, 2, 1, 2, 1, 2, 1, 2],
    &[2, 1, 2, 1, 2, 1, 2, 2, 1, 2, 1, 2, 1, 2, 1],
    &[2, 1, 2, 2, 1, 2, 1, 1, 2, 1, 2, 2, 1, 2, 1],
    &[2, 1, 2, 2, 1, 2, 1, 2, 1, 2, 1, 1, 2, 1, 2],
    &[2, 2, 1, 1, 2, 2, 1, 1, 2, 2, 1, 1, 2, 2, 1],
    &[2, 2, 1, 1, 2, 2, 1, 2, 1, 1, 2, 2, 1, 1, 2],
    &[2, 2, 1, 2, 1, 1, 2, 1, 2, 2, 1, 2, 1, 1, 2],
    &[2, 2, 1, 2, 1, 1, 2, 2, 1, 1, 2, 1, 2, 2, 1],
];

const L18: &[&[u8]] = &[
    &[1, 1, 1, 1, 1, 1, 1, 1],
    &[1, 1, 2, 2, 2, 2, 2, 2],
    &[1, 1, 3, 3, 3, 3, 3, 3],
    &[1, 2, 1, 1, 2, 2, 3, 3],
    &[1, 2, 2, 2, 3, 3, 1, 1],
    &[1, 2, 3, 3, 1, 1, 2, 2],
    &[1, 3, 1, 2, 1, 3, 2, 3],
    &[1, 3, 2, 3, 2, 1, 3, 1],
    &[1, 3, 3, 1, 3, 2, 1, 2],
    &[2, 1, 1, 3, 3, 2, 2, 1],
    &[2, 1, 2, 1, 1, 3, 3, 2],
    &[2, 1, 3, 2, 2, 1, 1, 3],
    &[2, 2, 1, 2, 3, 1, 3, 2],
    &[2, 2, 2, 3, 1, 2, 1, 3],
    &[2, 2, 3, 1, 2, 3, 2, 1],
    &[2, 3, 1, 3, 2, 3, 1, 2],
    &[2, 3, 2, 1, 3, 1, 2, 3],
    &[2, 3, 3, 2, 1, 2, 3, 1],
];

const L27: &[&[u8]] = &[
    &[1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    &[1, 1, 1, 1, 2, 2, 3, 2, 2, 3, 3, 2, 3],
    &[1, 1, 1, 1, 3, 3, 2, 3, 3, 2, 2, 3, 2],
    &[1, 2, 2, 3, 1, 1, 1, 2, 2, 3, 2, 3, 2],
    &[1, 2, 2, 3, 2, 2, 3, 3, 3, 2, 1, 1, 1],
    &[1, 2, 2, 3, 3, 3, 2, 1, 1, 1, 3, 2, 3],
    &[1, 3, 3, 2, 1, 1, 1, 3, 3, 2, 3, 2, 3],
    &[1, 3, 3, 2, 2, 2, 3, 1, 1, 1, 2, 3, 2],
    &[1, 3, 3, 2, 3, 3, 2, 2, 2, 3, 1, 1, 1],
    &[2, 1, 2, 2, 1, 2, 2, 1, 2, 2, 1, 2, 2],
    &[2, 1, 2, 2, 2, 3, 1, 2, 3, 1, 3, 3, 1],
    &[2, 1, 2, 2, 3, 1, 3, 3, 1, 3, 2, 1, 3],
    &[2, 2, 3, 1, 1, 2, 2, 2, 3, 1, 2, 1, 3],
    &[2, 2, 3, 1, 2, 3, 1, 3, 1, 3, 1, 2, 2],
    &[2, 2, 3, 1, 3, 1, 3, 1, 2, 2, 3, 3, 1],
    &[2, 3, 1, 3, 1, 2, 2, 3, 1, 3, 3, 3, 1],
    &[2, 3, 1, 3, 2, 3, 1, 1, 2, 2, 2, 1, 3],
    &[2, 3, 1, 3, 3, 1, 3, 2, 3, 1, 1, 2, 2],
    &[3, 1, 3, 3, 1, 3, 3, 1, 3, 3, 1, 3, 3],
    &[3, 1, 3, 3, 2, 1, 2, 2, 1, 2, 3, 1, 2],
    &[3, 1, 3, 3, 3, 2, 1, 3, 2, 1, 2, 2, 1],
    &[3, 2, 1, 2, 1, 3, 3, 2, 1, 2, 2, 2, 1],
    &[3, 2, 1, 2, 2, 1, 2, 3, 2, 1, 1, 3, 3],
    &[3, 2, 1, 2, 3, 2, 1, 1, 3, 3, 3, 1, 2],
    &[3, 3, 2, 1, 1, 3, 3, 3, 2, 1, 3, 1, 2],
    &[3, 3, 2, 1, 2, 1, 2, 1, 3, 3, 2, 2, 1],
    &[3, 3, 2, 1, 3, 2, 1, 2, 1, 2, 1, 3, 3],
];

const CATALOGUE: &[StandardArray] = &[
    StandardArray { name: "L4", rows: L4 },
    StandardArray { name: "L8", rows: L8 },
    StandardArray { name: "L9", rows: L9 },
    StandardArray { name: "L12", rows: L12 },
    StandardArray { name: "L16", rows: L16 },
    StandardArray { name: "L18", rows: L18 },
    StandardArray { name: "L27", rows: L27 },
];

/// Retrieve an orthogonal array by its standard Taguchi name.
///
/// Supported arrays:
/// - **L4**: 4 runs, 3 two-level columns
/// - **L8**: 8 runs, 7 two-level columns
/// - **L9**: 9 runs, 4 three-level columns
/// - **L12**: 12 runs, 11 two-level columns (Plackett-Burman)
/// - **L16**: 16 runs, 15 two-level columns
/// - **L18**: 18 runs, 1 two-level and 7 three-level columns
/// - **L27**: 27 runs, 13 three-level columns
///
/// Lookup is case-insensitive.
///
/// # Errors
///
/// Returns [`Error::UnknownArray`] for any other name.
///
/// # Example
///
/// ```
/// use taguchi_robust::catalogue::get_by_name;
///
/// let oa = get_by_name("L9").unwrap();
/// assert_eq!(oa.runs(), 9);
/// assert_eq!(oa.columns(), 4);
/// ```
pub fn get_by_name(name: &str) -> Result<OrthogonalArray> {
    let entry = CATALOGUE
        .iter()
        .find(|a| a.name.eq_ignore_ascii_case(name))
        .ok_or_else(|| Error::unknown_array(name))?;

    let rows: Vec<Vec<u32>> = entry
        .rows
        .iter()
        .map(|row| row.iter().map(|&v| u32::from(v)).collect())
        .collect();

    Ok(OrthogonalArray::from_rows(&rows)?.with_name(entry.name))
}

/// List all available standard arrays.
#[must_use]
pub fn list_standard_arrays() -> Vec<&'static str> {
    CATALOGUE.iter().map(|a| a.name).collect()
}
