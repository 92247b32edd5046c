//! FILENAME: core/matrix-engine/src/definition.rs
//! Matrix Definition - The serializable panel configuration.
//!
//! This module contains the options an operator picks for a matrix panel.
//! The JSON keys match the persisted panel model, so saved dashboards load
//! directly. Older saved shapes go through `migration` first.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use frame::FieldConfigSource;
use crate::error::OptionsError;
use crate::migration::migrate_options;

/// Hard cap on rows x columns.
pub const MAX_MATRIX_CELLS: usize = 50_000;

/// Upper bound on value fields per cell.
pub const MAX_VALUE_FIELDS: usize = 2;

// ============================================================================
// LEGEND
// ============================================================================

/// How legend entries are derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LegendKind {
    /// Evenly spaced samples across the numeric range.
    #[default]
    Range,
    /// One entry per distinct raw value.
    Categorical,
}

// ============================================================================
// OPTIONS
// ============================================================================

/// Panel options for the matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MatrixOptions {
    /// Field supplying row labels (falls back to the first field).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_field: Option<String>,

    /// Field supplying column labels (falls back to the second field).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_field: Option<String>,

    /// Number of value fields to display per cell (1 or 2).
    #[serde(rename = "values")]
    pub value_count: u8,

    /// First value field (falls back to the first numeric field).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_field1: Option<String>,

    /// Second value field. No fallback.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_field2: Option<String>,

    /// Use the static row/column lists instead of deriving axes from data.
    #[serde(rename = "inputList")]
    pub use_static_axes: bool,

    /// Comma separated row labels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub static_rows: Option<String>,

    /// Comma separated column labels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub static_columns: Option<String>,

    pub show_legend: bool,

    #[serde(rename = "legendType")]
    pub legend_kind: LegendKind,

    // ------------------------------------------------------------------
    // Rendering only. The builder ignores these.
    // ------------------------------------------------------------------
    /// Cell size in pixels (10..=50).
    pub cell_size: u32,

    /// Relative padding between cells (0..=100).
    pub cell_padding: u32,

    /// Space reserved for axis labels (1..=300).
    pub txt_length: u32,

    /// Label font size (1..=200).
    pub txt_size: u32,

    /// Tooltip captions.
    pub source_text: String,
    pub target_text: String,
    pub value_text1: String,
    pub value_text2: String,

    // ------------------------------------------------------------------
    // Colors, resolved through the theme.
    // ------------------------------------------------------------------
    /// Used when the query returned an explicit null (or nothing) for a cell.
    pub null_color: String,

    /// Used when the value field has no color of its own.
    pub default_color: String,
}

impl Default for MatrixOptions {
    fn default() -> Self {
        MatrixOptions {
            source_field: None,
            target_field: None,
            value_count: 1,
            value_field1: None,
            value_field2: None,
            use_static_axes: false,
            static_rows: None,
            static_columns: None,
            show_legend: false,
            legend_kind: LegendKind::Range,
            cell_size: 15,
            cell_padding: 5,
            txt_length: 50,
            txt_size: 10,
            source_text: String::new(),
            target_text: String::new(),
            value_text1: String::new(),
            value_text2: String::new(),
            null_color: "#E6E6E6".to_string(),
            default_color: "#E6E6E6".to_string(),
        }
    }
}

impl MatrixOptions {
    /// Number of value slots per cell, clamped to 1..=2.
    pub fn value_slots(&self) -> usize {
        (self.value_count as usize).clamp(1, MAX_VALUE_FIELDS)
    }

    /// Configured name for value field `index` (0-based).
    pub fn value_field_name(&self, index: usize) -> Option<&str> {
        match index {
            0 => self.value_field1.as_deref(),
            1 => self.value_field2.as_deref(),
            _ => None,
        }
    }

    /// Loads persisted options, migrating legacy keys. Any link template
    /// synthesized from legacy url options is added to `field_config`.
    pub fn from_value(
        value: Value,
        field_config: &mut FieldConfigSource,
    ) -> Result<Self, OptionsError> {
        let mut map: Map<String, Value> = match value {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            _ => return Err(OptionsError::NotAnObject),
        };
        migrate_options(&mut map, field_config);
        // A null option is unset.
        map.retain(|_, value| !value.is_null());
        Ok(serde_json::from_value(Value::Object(map))?)
    }

    pub fn from_json(
        json: &str,
        field_config: &mut FieldConfigSource,
    ) -> Result<Self, OptionsError> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(value, field_config)
    }
}
