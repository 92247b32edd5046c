//! FILENAME: core/matrix-engine/src/resolve.rs
//! Field Resolver - maps configured field names to columns.
//!
//! A configured name may refer to a field's raw name, the display name the
//! data source supplied, or the fully resolved display name. Each field is
//! tried against these candidates in that order, and the first field (in
//! column order) with any match wins.

use frame::{DataFrame, Field};

/// What to use when no field matches the configured name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldFallback {
    /// The field at this column position.
    Position(usize),
    /// The first field of numeric type.
    FirstNumeric,
    /// Nothing; the field is omitted.
    None,
}

/// Candidate names of a field, in match priority order.
const NAME_EXTRACTORS: [fn(&Field) -> Option<&str>; 3] = [raw_name, name_from_ds, display_name];

fn raw_name(field: &Field) -> Option<&str> {
    Some(field.name.as_str())
}

fn name_from_ds(field: &Field) -> Option<&str> {
    field.config.display_name_from_ds.as_deref()
}

fn display_name(field: &Field) -> Option<&str> {
    Some(field.display_name())
}

/// Whether `field` answers to `name` under any candidate.
pub fn field_matches(field: &Field, name: &str) -> bool {
    NAME_EXTRACTORS
        .iter()
        .any(|extract| extract(field) == Some(name))
}

/// Finds the first field matching `name`.
pub fn find_field<'a>(frame: &'a DataFrame, name: &str) -> Option<&'a Field> {
    frame.fields.iter().find(|f| field_matches(f, name))
}

/// Resolves a configured field, applying `fallback` when the name is unset
/// or matches nothing.
pub fn resolve<'a>(
    name: Option<&str>,
    frame: &'a DataFrame,
    fallback: FieldFallback,
) -> Option<&'a Field> {
    let found = name.and_then(|n| find_field(frame, n));
    if found.is_some() {
        return found;
    }

    if let Some(n) = name {
        log::debug!("field '{}' not found, using fallback {:?}", n, fallback);
    }

    match fallback {
        FieldFallback::Position(index) => frame.field(index),
        FieldFallback::FirstNumeric => frame.first_numeric_field(),
        FieldFallback::None => None,
    }
}
