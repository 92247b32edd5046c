//! FILENAME: core/matrix-engine/src/axis.rs
//! Axis Builder - produces the ordered row and column labels.
//!
//! Labels either come verbatim from the static comma separated lists in the
//! options, or are the distinct values of the source/target fields sorted in
//! natural order. Lookups from a raw value back to its axis position use
//! exact matching (same type, same content), first occurrence wins.

use std::cmp::Ordering;
use rustc_hash::{FxHashMap, FxHashSet};
use frame::{Field, FieldKey, FieldValue};
use crate::definition::{MatrixOptions, MAX_MATRIX_CELLS};
use crate::error::MatrixError;

// ============================================================================
// AXES
// ============================================================================

/// Row and column labels of a matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct Axes {
    pub rows: Vec<FieldValue>,
    pub columns: Vec<FieldValue>,
}

impl Axes {
    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.rows.len().saturating_mul(self.columns.len())
    }
}

/// Builds both axes and checks the size bounds.
///
/// Fails with `NoData` when either axis is empty and with `TooManyInputs`
/// when the grid would exceed `MAX_MATRIX_CELLS`.
pub fn build_axes(
    options: &MatrixOptions,
    source: &Field,
    target: &Field,
) -> Result<Axes, MatrixError> {
    let axes = if options.use_static_axes {
        Axes {
            rows: split_static(options.static_rows.as_deref()),
            columns: split_static(options.static_columns.as_deref()),
        }
    } else {
        Axes {
            rows: derive_axis(source),
            columns: derive_axis(target),
        }
    };

    if axes.rows.is_empty() || axes.columns.is_empty() {
        log::debug!(
            "empty axis ({} rows, {} columns)",
            axes.rows.len(),
            axes.columns.len()
        );
        return Err(MatrixError::NoData);
    }

    if axes.cell_count() > MAX_MATRIX_CELLS {
        log::debug!(
            "{} x {} cells exceeds the limit of {}",
            axes.rows.len(),
            axes.columns.len(),
            MAX_MATRIX_CELLS
        );
        return Err(MatrixError::TooManyInputs);
    }

    Ok(axes)
}

/// Splits a static label list on commas. Labels are kept as typed: no
/// sorting, no de-duplication, no trimming. An empty string counts as unset
/// and yields no labels.
pub fn split_static(list: Option<&str>) -> Vec<FieldValue> {
    match list {
        Some(s) if !s.is_empty() => s.split(',').map(FieldValue::text).collect(),
        _ => Vec::new(),
    }
}

/// Distinct defined values of `field`, sorted naturally.
pub fn derive_axis(field: &Field) -> Vec<FieldValue> {
    let mut seen: FxHashSet<FieldKey> = FxHashSet::default();
    let mut labels: Vec<(String, FieldValue)> = Vec::new();

    for value in field.values.iter().flatten() {
        if value.is_null() {
            continue;
        }
        if seen.insert(value.key()) {
            labels.push((value.label_text(), value.clone()));
        }
    }

    labels.sort_by(|a, b| natural_cmp(&a.0, &b.0));
    labels.into_iter().map(|(_, v)| v).collect()
}

// ============================================================================
// LABEL LOOKUP
// ============================================================================

/// Maps a raw value to its position on an axis.
pub struct AxisIndex {
    positions: FxHashMap<FieldKey, usize>,
}

impl AxisIndex {
    pub fn new(labels: &[FieldValue]) -> Self {
        let mut positions = FxHashMap::default();
        positions.reserve(labels.len());
        for (i, label) in labels.iter().enumerate() {
            positions.entry(label.key()).or_insert(i);
        }
        AxisIndex { positions }
    }

    /// Position of the first label equal to `value`.
    pub fn position(&self, value: &FieldValue) -> Option<usize> {
        self.positions.get(&value.key()).copied()
    }
}

// ============================================================================
// NATURAL ORDER
// ============================================================================

/// Compares two labels so that embedded numbers sort numerically
/// ("item2" < "item10"). Text runs compare case-insensitively; labels that
/// differ only in case or leading zeros fall back to a case-sensitive
/// comparison with lowercase first.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut left = Chunks::new(a);
    let mut right = Chunks::new(b);

    loop {
        match (left.next(), right.next()) {
            (None, None) => break,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => {
                let ord = compare_chunks(x, y);
                if ord != Ordering::Equal {
                    return ord;
                }
            }
        }
    }

    // Reversed byte order puts lowercase before uppercase.
    b.cmp(a)
}

fn compare_chunks(x: &str, y: &str) -> Ordering {
    if is_digits(x) && is_digits(y) {
        let x = x.trim_start_matches('0');
        let y = y.trim_start_matches('0');
        return x.len().cmp(&y.len()).then_with(|| x.cmp(y));
    }
    let x = x.chars().flat_map(char::to_lowercase);
    let y = y.chars().flat_map(char::to_lowercase);
    x.cmp(y)
}

fn is_digits(s: &str) -> bool {
    s.bytes().next().map(|b| b.is_ascii_digit()).unwrap_or(false)
}

/// Splits a string into alternating runs of ASCII digits and other characters.
struct Chunks<'a> {
    rest: &'a str,
}

impl<'a> Chunks<'a> {
    fn new(s: &'a str) -> Self {
        Chunks { rest: s }
    }
}

impl<'a> Iterator for Chunks<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let first = self.rest.chars().next()?;
        let digits = first.is_ascii_digit();
        let end = self
            .rest
            .char_indices()
            .find(|(_, c)| c.is_ascii_digit() != digits)
            .map(|(i, _)| i)
            .unwrap_or(self.rest.len());
        let (chunk, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(chunk)
    }
}
