//! FILENAME: core/frame/src/frame.rs
//! PURPOSE: Tabular query results.
//! CONTEXT: A `DataFrame` is one series: fields aligned by row index.
//! `PanelData` is the full query response, which may hold several series.

use serde::{Deserialize, Serialize};
use crate::field::{Field, FieldConfigSource};
use crate::value::FieldType;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DataFrame {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub fields: Vec<Field>,
}

impl DataFrame {
    pub fn new(fields: Vec<Field>) -> Self {
        DataFrame { name: None, fields }
    }

    /// Number of rows, taken from the longest field.
    pub fn row_count(&self) -> usize {
        self.fields.iter().map(Field::len).max().unwrap_or(0)
    }

    pub fn field(&self, index: usize) -> Option<&Field> {
        self.fields.get(index)
    }

    /// First field whose type is numeric.
    pub fn first_numeric_field(&self) -> Option<&Field> {
        self.fields.iter().find(|f| f.field_type == FieldType::Number)
    }

    /// Finds a field by raw or resolved display name.
    pub fn field_by_name(&self, name: &str) -> Option<&Field> {
        self.fields
            .iter()
            .find(|f| f.name == name || f.display_name() == name)
    }

    /// Applies panel-level defaults to every field.
    pub fn apply_field_defaults(&mut self, source: &FieldConfigSource) {
        for field in &mut self.fields {
            field.config.inherit(&source.defaults);
        }
    }
}

/// A full query response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PanelData {
    #[serde(default)]
    pub series: Vec<DataFrame>,
}

impl PanelData {
    pub fn new(series: Vec<DataFrame>) -> Self {
        PanelData { series }
    }

    pub fn single(frame: DataFrame) -> Self {
        PanelData { series: vec![frame] }
    }

    /// The series the matrix is built from.
    pub fn first_series(&self) -> Option<&DataFrame> {
        self.series.first()
    }

    pub fn apply_field_defaults(&mut self, source: &FieldConfigSource) {
        for frame in &mut self.series {
            frame.apply_field_defaults(source);
        }
    }
}
