//! FILENAME: core/matrix-engine/src/view.rs
//! Matrix View - Renderable output for the presentation layer.
//!
//! The view is a dense rows x columns grid. Each cell keeps one slot per
//! value field; an unwritten slot means no input row landed there ("no
//! data"), which the renderer draws differently from an explicit null.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use frame::{DataLink, DisplayValue, FieldValue};
use crate::definition::MAX_VALUE_FIELDS;
use crate::error::MatrixError;

/// Outcome of building a matrix.
pub type MatrixResult = Result<MatrixView, MatrixError>;

/// Per-cell value slots.
pub type ValueSlots = SmallVec<[Option<ValueEntry>; MAX_VALUE_FIELDS]>;

// ============================================================================
// CELLS
// ============================================================================

/// One value field's contribution to a cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueEntry {
    /// Raw value. `None` when the row carried no value for this field; the
    /// key is then left out, while an explicit null is written as `null`.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "frame::explicit_null::option"
    )]
    pub value: Option<FieldValue>,

    /// Resolved cell color.
    pub color: String,

    /// Formatted value.
    pub display: DisplayValue,

    /// First data link of the populating field for this row.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<DataLink>,
}

/// A single cell of the matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatrixCell {
    pub row: FieldValue,
    pub col: FieldValue,
    /// One slot per value field, in value field order.
    pub values: ValueSlots,
}

impl MatrixCell {
    pub fn new(row: FieldValue, col: FieldValue, slots: usize) -> Self {
        let mut values = ValueSlots::new();
        values.resize(slots, None);
        MatrixCell { row, col, values }
    }

    /// Whether no input row populated this cell.
    pub fn is_empty(&self) -> bool {
        self.values.iter().all(Option::is_none)
    }

    pub fn entry(&self, slot: usize) -> Option<&ValueEntry> {
        self.values.get(slot).and_then(Option::as_ref)
    }
}

// ============================================================================
// LEGEND
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub label: String,
    pub color: String,
}

// ============================================================================
// VIEW
// ============================================================================

/// The complete, render-ready matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatrixView {
    /// Row labels, top to bottom.
    pub rows: Vec<FieldValue>,

    /// Column labels, left to right.
    pub columns: Vec<FieldValue>,

    /// Display names: row field, column field, then each value field.
    pub series: Vec<String>,

    /// `cells[r][c]` is the cell at row label `r`, column label `c`.
    pub cells: Vec<Vec<MatrixCell>>,

    pub legend: Vec<LegendEntry>,
}

impl MatrixView {
    /// (rows, columns)
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows.len(), self.columns.len())
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&MatrixCell> {
        self.cells.get(row).and_then(|r| r.get(col))
    }

    pub fn row_names(&self) -> Vec<String> {
        self.rows.iter().map(FieldValue::label_text).collect()
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(FieldValue::label_text).collect()
    }

    /// Number of value fields that were resolved.
    pub fn value_field_count(&self) -> usize {
        self.series.len().saturating_sub(2)
    }
}
