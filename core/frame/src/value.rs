//! FILENAME: core/frame/src/value.rs
//! PURPOSE: Defines the raw value held by a single row of a field.
//! CONTEXT: Query results arrive as loosely typed columns. A row can carry a
//! number, a string, a timestamp, an explicit null, or nothing at all. The
//! "nothing at all" case is modelled as `Option::None` at the column level so
//! it never gets confused with an explicit `FieldValue::Null`.

use serde::{Deserialize, Serialize};

/// The type a field declares for all of its values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Number,
    Time,
    Boolean,
    #[default]
    Other,
}

/// A raw value as returned by the query.
///
/// Serialized as a plain JSON scalar. Timestamps go out as their
/// milliseconds and come back as numbers unless the enclosing field is a
/// time field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Number(f64),
    Text(String),
    /// Milliseconds since the Unix epoch.
    Time(i64),
    Boolean(bool),
}

impl FieldValue {
    pub fn text(s: impl Into<String>) -> Self {
        FieldValue::Text(s.into())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Returns the numeric value for `Number` values only.
    /// Text is never coerced.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Numeric form of numbers and timestamps (milliseconds).
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            FieldValue::Time(ms) => Some(*ms as f64),
            _ => None,
        }
    }

    /// Plain text form used for label ordering and link interpolation.
    pub fn label_text(&self) -> String {
        match self {
            FieldValue::Null => "null".to_string(),
            FieldValue::Number(n) => crate::number_format::format_general(*n),
            FieldValue::Text(s) => s.clone(),
            FieldValue::Time(ms) => ms.to_string(),
            FieldValue::Boolean(b) => if *b { "true" } else { "false" }.to_string(),
        }
    }

    /// Exact-match identity of this value.
    pub fn key(&self) -> FieldKey {
        FieldKey::from(self)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Boolean(value)
    }
}

/// Serde helpers that read JSON `null` as an explicit `FieldValue::Null`
/// instead of a missing value.
pub mod explicit_null {
    use serde::{Deserialize, Deserializer};
    use super::FieldValue;

    /// For `Option<FieldValue>` struct fields. Pair with `default` so an
    /// absent key stays missing.
    pub fn option<'de, D: Deserializer<'de>>(d: D) -> Result<Option<FieldValue>, D::Error> {
        FieldValue::deserialize(d).map(Some)
    }

    /// For value columns. A missing trailing row is expressed by a shorter
    /// column.
    pub fn column<'de, D: Deserializer<'de>>(
        d: D,
    ) -> Result<Vec<Option<FieldValue>>, D::Error> {
        let values = Vec::<FieldValue>::deserialize(d)?;
        Ok(values.into_iter().map(Some).collect())
    }
}

// ============================================================================
// EXACT-MATCH KEYS
// ============================================================================

/// A hashable representation of a field value.
/// Two values share a key only when they have the same type and the same
/// content; `Number(1.0)` and `Text("1")` are different keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldKey {
    Null,
    Number(OrderedFloat),
    Text(String),
    Time(i64),
    Boolean(bool),
}

impl From<&FieldValue> for FieldKey {
    fn from(value: &FieldValue) -> Self {
        match value {
            FieldValue::Null => FieldKey::Null,
            FieldValue::Number(n) => FieldKey::Number(OrderedFloat(*n)),
            FieldValue::Text(s) => FieldKey::Text(s.clone()),
            FieldValue::Time(t) => FieldKey::Time(*t),
            FieldValue::Boolean(b) => FieldKey::Boolean(*b),
        }
    }
}

/// Wrapper around f64 that implements Eq and Hash for use as HashMap keys.
/// NaN values are treated as equal to each other.
#[derive(Debug, Clone, Copy)]
pub struct OrderedFloat(pub f64);

impl PartialEq for OrderedFloat {
    fn eq(&self, other: &Self) -> bool {
        if self.0.is_nan() && other.0.is_nan() {
            true
        } else {
            self.0 == other.0
        }
    }
}

impl Eq for OrderedFloat {}

impl std::hash::Hash for OrderedFloat {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        if self.0.is_nan() {
            u64::MAX.hash(state);
        } else if self.0 == 0.0 {
            // 0.0 and -0.0 compare equal, so they must hash equal too
            0u64.hash(state);
        } else {
            self.0.to_bits().hash(state);
        }
    }
}
