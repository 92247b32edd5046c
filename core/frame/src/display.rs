//! FILENAME: core/frame/src/display.rs
//! PURPOSE: Turns raw field values into display text, numeric value and color.
//! CONTEXT: Display is driven by the field's config: value mappings win,
//! then number/time formatting with the unit suffix, then threshold colors.
//! Colors come out of config as theme color names and are resolved through
//! the caller-supplied function.

use serde::{Deserialize, Serialize};
use crate::field::{Field, ThresholdsMode};
use crate::number_format::{format_number, format_time};
use crate::value::FieldValue;

// ============================================================================
// DISPLAY VALUE
// ============================================================================

/// A value ready for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayValue {
    pub text: String,
    pub numeric: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
}

impl Default for DisplayValue {
    fn default() -> Self {
        DisplayValue {
            text: String::new(),
            numeric: 0.0,
            color: None,
            prefix: None,
            suffix: None,
        }
    }
}

impl DisplayValue {
    pub fn new(text: impl Into<String>, numeric: f64) -> Self {
        DisplayValue {
            text: text.into(),
            numeric,
            ..DisplayValue::default()
        }
    }

    /// Text with the unit suffix appended after a space.
    pub fn label(&self) -> String {
        match self.suffix.as_deref() {
            Some(suffix) if !suffix.is_empty() => format!("{} {}", self.text, suffix),
            _ => self.text.clone(),
        }
    }
}

/// A resolved data link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataLink {
    pub title: String,
    pub href: String,
}

// ============================================================================
// DISPLAY PROCESSOR
// ============================================================================

/// Formats values of one field.
pub struct DisplayProcessor<'a> {
    field: &'a Field,
    /// Numeric min/max of the field, needed for percentage thresholds.
    range: Option<(f64, f64)>,
}

impl<'a> DisplayProcessor<'a> {
    pub fn new(field: &'a Field) -> Self {
        let range = match &field.config.thresholds {
            Some(t) if t.mode == ThresholdsMode::Percentage => field.numeric_range(),
            _ => None,
        };
        DisplayProcessor { field, range }
    }

    /// Builds the display value for `value`. `resolve_color` maps theme
    /// color names to renderable colors.
    pub fn display(
        &self,
        value: Option<&FieldValue>,
        resolve_color: &dyn Fn(&str) -> String,
    ) -> DisplayValue {
        let config = &self.field.config;

        let (text, numeric) = match value {
            None | Some(FieldValue::Null) => (String::new(), f64::NAN),
            Some(FieldValue::Number(n)) => (format_number(*n, config.decimals), *n),
            Some(FieldValue::Text(s)) => (s.clone(), f64::NAN),
            Some(FieldValue::Time(ms)) => (format_time(*ms), *ms as f64),
            Some(FieldValue::Boolean(b)) => {
                (if *b { "true" } else { "false" }.to_string(), if *b { 1.0 } else { 0.0 })
            }
        };

        let mut display = DisplayValue {
            text,
            numeric,
            color: self.threshold_color(numeric).map(|name| resolve_color(name)),
            prefix: None,
            suffix: unit_suffix(config.unit.as_deref()),
        };

        if let Some(raw) = value.filter(|v| !v.is_null()) {
            let raw_text = raw.label_text();
            if let Some(mapping) = config.mappings.iter().find(|m| m.value == raw_text) {
                if let Some(text) = &mapping.text {
                    display.text = text.clone();
                    display.suffix = None;
                }
                if let Some(color) = &mapping.color {
                    display.color = Some(resolve_color(color));
                }
            }
        }

        display
    }

    fn threshold_color(&self, numeric: f64) -> Option<&'a str> {
        let thresholds = self.field.config.thresholds.as_ref()?;
        if numeric.is_nan() {
            return thresholds.base_color();
        }
        let position = match (thresholds.mode, self.range) {
            (ThresholdsMode::Percentage, Some((min, max))) if max > min => {
                (numeric - min) / (max - min) * 100.0
            }
            (ThresholdsMode::Percentage, _) => 0.0,
            (ThresholdsMode::Absolute, _) => numeric,
        };
        thresholds.color_for(position)
    }
}

/// Suffix shown after formatted values for a unit id.
/// `suffix:<text>` declares a custom suffix; unknown ids are used verbatim.
pub fn unit_suffix(unit: Option<&str>) -> Option<String> {
    let unit = unit?.trim();
    let suffix = match unit {
        "" | "none" | "short" | "string" => return None,
        "percent" => "%",
        "ms" => "ms",
        "s" => "s",
        "bytes" => "B",
        "bps" => "bps",
        "Bps" => "B/s",
        other => other.strip_prefix("suffix:").unwrap_or(other),
    };
    Some(suffix.to_string())
}
