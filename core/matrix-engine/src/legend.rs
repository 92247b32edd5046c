//! FILENAME: core/matrix-engine/src/legend.rs
//! Legend Builder - derives legend entries from the value fields.
//!
//! Range legends sample the numeric range of all value fields at 11 evenly
//! spaced points. Categorical legends list every distinct raw value. Either
//! way the labels come from the first value field's display, and the colors
//! from the same scale the cells use.

use rustc_hash::FxHashSet;
use frame::{Field, FieldKey, FieldType, FieldValue};
use crate::definition::LegendKind;
use crate::engine::ColorScale;
use crate::view::LegendEntry;

/// Number of intervals a range legend is divided into.
pub const RANGE_STEPS: usize = 10;

/// Raw values the legend is built from.
pub fn legend_samples(kind: LegendKind, value_fields: &[&Field]) -> Vec<FieldValue> {
    if value_fields.is_empty() {
        return Vec::new();
    }
    match kind {
        LegendKind::Range => range_samples(value_fields),
        LegendKind::Categorical => distinct_values(value_fields),
    }
}

/// Builds one legend entry per sample. Labels and colors both come from
/// `scale`, which is keyed to the first value field.
pub fn build_legend(
    kind: LegendKind,
    value_fields: &[&Field],
    scale: &ColorScale<'_>,
) -> Vec<LegendEntry> {
    legend_samples(kind, value_fields)
        .iter()
        .map(|sample| LegendEntry {
            label: scale
                .display(Some(sample))
                .map(|d| d.label())
                .unwrap_or_default(),
            color: scale.color_for(Some(sample)),
        })
        .collect()
}

/// `RANGE_STEPS + 1` values from min to max inclusive. Min and max span all
/// value fields, timestamps included; both are 0 when there are no numbers.
/// Samples are timestamps when the first value field is a time field.
fn range_samples(value_fields: &[&Field]) -> Vec<FieldValue> {
    let (min, max) = value_fields
        .iter()
        .filter_map(|f| f.numeric_range())
        .reduce(|(lo, hi), (min, max)| (lo.min(min), hi.max(max)))
        .unwrap_or((0.0, 0.0));

    let as_time = value_fields
        .first()
        .is_some_and(|f| f.field_type == FieldType::Time);
    let step = (max - min) / RANGE_STEPS as f64;
    (0..=RANGE_STEPS)
        .map(|i| min + i as f64 * step)
        .map(|x| {
            if as_time {
                FieldValue::Time(x.round() as i64)
            } else {
                FieldValue::Number(x)
            }
        })
        .collect()
}

/// Distinct defined raw values in first-encounter order. Explicit nulls
/// count as a value; missing values do not.
fn distinct_values(value_fields: &[&Field]) -> Vec<FieldValue> {
    let mut seen: FxHashSet<FieldKey> = FxHashSet::default();
    let mut values = Vec::new();
    for field in value_fields {
        for value in field.values.iter().flatten() {
            if seen.insert(value.key()) {
                values.push(value.clone());
            }
        }
    }
    values
}
