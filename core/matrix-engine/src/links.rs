//! FILENAME: core/matrix-engine/src/links.rs
//! Data link interpolation.
//!
//! Fields may declare link templates. A template is turned into a concrete
//! link for one row by substituting:
//! - `${__data.fields["Name"]}` / `${__data.fields.Name}`: the row's value of
//!   another field, looked up by raw or display name (the name may itself be
//!   percent-encoded)
//! - `${__value.raw}`: the row's raw value of the link's field
//! - `${__value.text}`: the same value as displayed
//!
//! Substituted values are URI-component encoded. Any other `${...}` variable
//! is left for the dashboard to resolve.

use std::borrow::Cow;
use once_cell::sync::Lazy;
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use regex::{Captures, Regex};
use frame::{DataFrame, DataLink, DisplayValue, Field, FieldValue, LinkTemplate};

/// Characters left alone by `encodeURIComponent`.
pub(crate) const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

static TEMPLATE_VARIABLE: Lazy<Regex> = Lazy::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r#"\$\{(?:__data\.fields(?:\["([^"\]]*)"\]|\.(\w+))|__value\.(raw|text))\}"#)
        .expect("Hard-coded regex pattern should be valid")
});

/// Resolves every template declared on `field` for `row`. `display` is the
/// row's formatted value of `field`.
pub fn resolve_links(
    frame: &DataFrame,
    field: &Field,
    row: usize,
    display: &DisplayValue,
) -> Vec<DataLink> {
    field
        .config
        .links
        .iter()
        .map(|template| resolve_link(template, frame, field, row, display))
        .collect()
}

/// Resolves a single template for `row`.
pub fn resolve_link(
    template: &LinkTemplate,
    frame: &DataFrame,
    field: &Field,
    row: usize,
    display: &DisplayValue,
) -> DataLink {
    let href = TEMPLATE_VARIABLE.replace_all(&template.url, |caps: &Captures| {
        if let Some(name) = caps.get(1).or_else(|| caps.get(2)) {
            encode_value(lookup_field(frame, name.as_str()).and_then(|f| f.value_at(row)))
        } else if caps.get(3).is_some_and(|m| m.as_str() == "text") {
            utf8_percent_encode(&display.text, URI_COMPONENT).to_string()
        } else {
            encode_value(field.value_at(row))
        }
    });

    DataLink {
        title: template.title.clone(),
        href: href.into_owned(),
    }
}

fn lookup_field<'a>(frame: &'a DataFrame, name: &str) -> Option<&'a Field> {
    frame.field_by_name(name).or_else(|| {
        let decoded: Cow<str> = percent_decode_str(name).decode_utf8_lossy();
        if decoded != name {
            frame.field_by_name(&decoded)
        } else {
            None
        }
    })
}

fn encode_value(value: Option<&FieldValue>) -> String {
    match value {
        None | Some(FieldValue::Null) => String::new(),
        Some(v) => utf8_percent_encode(&v.label_text(), URI_COMPONENT).to_string(),
    }
}
