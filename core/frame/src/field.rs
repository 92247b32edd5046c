//! FILENAME: core/frame/src/field.rs
//! PURPOSE: Named, typed columns and their display configuration.

use serde::{Deserialize, Serialize};
use crate::value::{explicit_null, FieldType, FieldValue};

// ============================================================================
// THRESHOLDS
// ============================================================================

/// How threshold step values are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThresholdsMode {
    #[default]
    Absolute,
    /// Step values are percentages of the field's numeric min..max range.
    Percentage,
}

/// A single threshold step. A step without a value is the base step
/// (negative infinity).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdStep {
    #[serde(default)]
    pub value: Option<f64>,
    pub color: String,
}

impl ThresholdStep {
    pub fn base(color: impl Into<String>) -> Self {
        ThresholdStep { value: None, color: color.into() }
    }

    pub fn at(value: f64, color: impl Into<String>) -> Self {
        ThresholdStep { value: Some(value), color: color.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Thresholds {
    #[serde(default)]
    pub mode: ThresholdsMode,
    /// Steps in ascending order, base step first.
    #[serde(default)]
    pub steps: Vec<ThresholdStep>,
}

impl Thresholds {
    pub fn absolute(steps: Vec<ThresholdStep>) -> Self {
        Thresholds { mode: ThresholdsMode::Absolute, steps }
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Color name of the base step, if there is one.
    pub fn base_color(&self) -> Option<&str> {
        self.steps
            .iter()
            .find(|s| s.value.is_none())
            .or_else(|| self.steps.first())
            .map(|s| s.color.as_str())
    }

    /// Color name of the last step whose value is at or below `value`.
    pub fn color_for(&self, value: f64) -> Option<&str> {
        let mut color = self.base_color();
        for step in &self.steps {
            if let Some(limit) = step.value {
                if value >= limit {
                    color = Some(step.color.as_str());
                }
            }
        }
        color
    }
}

// ============================================================================
// VALUE MAPPINGS AND LINKS
// ============================================================================

/// Maps one exact raw value to replacement display text and/or color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueMapping {
    /// Raw value compared against the value's plain text form.
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// A data link declared on a field. The url may contain `${...}` variables
/// that are filled in per row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkTemplate {
    #[serde(default)]
    pub title: String,
    pub url: String,
}

impl LinkTemplate {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        LinkTemplate { title: title.into(), url: url.into() }
    }
}

// ============================================================================
// FIELD CONFIG
// ============================================================================

/// Display configuration attached to a field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct FieldConfig {
    /// Display name chosen by the operator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    /// Display name provided by the data source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name_from_ds: Option<String>,

    /// Unit id, e.g. "percent", "ms", or a literal suffix.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decimals: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thresholds: Option<Thresholds>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mappings: Vec<ValueMapping>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<LinkTemplate>,
}

impl FieldConfig {
    /// Fills every property this config leaves unset from `defaults`.
    pub fn inherit(&mut self, defaults: &FieldConfig) {
        if self.display_name.is_none() {
            self.display_name = defaults.display_name.clone();
        }
        if self.unit.is_none() {
            self.unit = defaults.unit.clone();
        }
        if self.decimals.is_none() {
            self.decimals = defaults.decimals;
        }
        if self.thresholds.is_none() {
            self.thresholds = defaults.thresholds.clone();
        }
        if self.mappings.is_empty() {
            self.mappings = defaults.mappings.clone();
        }
        if self.links.is_empty() {
            self.links = defaults.links.clone();
        }
    }
}

/// Panel-level field configuration. `defaults` applies to every field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct FieldConfigSource {
    #[serde(default)]
    pub defaults: FieldConfig,
}

// ============================================================================
// FIELD
// ============================================================================

/// A named, typed column of row-aligned values.
///
/// In JSON, `null` in `values` is an explicit null; a missing value
/// serializes as `null` too.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "FieldRepr")]
pub struct Field {
    pub name: String,

    #[serde(rename = "type")]
    pub field_type: FieldType,

    /// `None` marks a row the query did not return a value for.
    pub values: Vec<Option<FieldValue>>,

    pub config: FieldConfig,
}

/// Wire form of `Field`.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FieldRepr {
    name: String,
    #[serde(rename = "type", default)]
    field_type: FieldType,
    #[serde(default, deserialize_with = "explicit_null::column")]
    values: Vec<Option<FieldValue>>,
    #[serde(default)]
    config: FieldConfig,
}

impl From<FieldRepr> for Field {
    fn from(repr: FieldRepr) -> Self {
        let mut values = repr.values;
        if repr.field_type == FieldType::Time {
            for value in values.iter_mut().flatten() {
                if let FieldValue::Number(ms) = *value {
                    *value = FieldValue::Time(ms as i64);
                }
            }
        }
        Field {
            name: repr.name,
            field_type: repr.field_type,
            values,
            config: repr.config,
        }
    }
}

impl Field {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Field {
            name: name.into(),
            field_type,
            values: Vec::new(),
            config: FieldConfig::default(),
        }
    }

    /// A string field with every row defined.
    pub fn strings<S: AsRef<str>>(name: impl Into<String>, values: &[S]) -> Self {
        let mut field = Field::new(name, FieldType::String);
        field.values = values
            .iter()
            .map(|v| Some(FieldValue::text(v.as_ref())))
            .collect();
        field
    }

    /// A number field with every row defined.
    pub fn numbers(name: impl Into<String>, values: &[f64]) -> Self {
        let mut field = Field::new(name, FieldType::Number);
        field.values = values.iter().map(|v| Some(FieldValue::Number(*v))).collect();
        field
    }

    pub fn with_values(mut self, values: Vec<Option<FieldValue>>) -> Self {
        self.values = values;
        self
    }

    pub fn with_config(mut self, config: FieldConfig) -> Self {
        self.config = config;
        self
    }

    /// The resolved display name: operator override, then the data source
    /// name, then the raw field name.
    pub fn display_name(&self) -> &str {
        self.config
            .display_name
            .as_deref()
            .or(self.config.display_name_from_ds.as_deref())
            .unwrap_or(&self.name)
    }

    /// The value at `row`. Rows past the end of the column are undefined.
    pub fn value_at(&self, row: usize) -> Option<&FieldValue> {
        self.values.get(row).and_then(|v| v.as_ref())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Smallest and largest finite numbers in this field. Timestamps count
    /// as their milliseconds.
    pub fn numeric_range(&self) -> Option<(f64, f64)> {
        self.values
            .iter()
            .filter_map(|v| v.as_ref().and_then(FieldValue::as_scalar))
            .filter(|n| n.is_finite())
            .fold(None, |acc, n| match acc {
                None => Some((n, n)),
                Some((min, max)) => Some((min.min(n), max.max(n))),
            })
    }
}
