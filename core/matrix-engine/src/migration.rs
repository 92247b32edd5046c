//! FILENAME: core/matrix-engine/src/migration.rs
//! Upgrades saved panel options from older plugin versions.
//!
//! Older versions stored a single `valueField`/`valueText` and built cell
//! links from flat `addUrl`/`url`/`urlVar1`/`urlVar2` options. Current
//! versions use `valueField1`/`valueText1` and ordinary field data links.

use once_cell::sync::Lazy;
use percent_encoding::utf8_percent_encode;
use regex::Regex;
use serde_json::{Map, Value};
use frame::{FieldConfigSource, LinkTemplate};
use crate::links::URI_COMPONENT;

/// Plugin id of the panel whose options can be carried over on a type change.
pub const MATRIX_PANEL_ID: &str = "esnet-matrix-panel";

/// Title of the link synthesized from legacy url options.
pub const LEGACY_LINK_TITLE: &str = "Show details";

static VARIABLE_NAME: Lazy<Regex> = Lazy::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"\w+").expect("Hard-coded regex pattern should be valid")
});

/// Migrates legacy option keys in place.
pub fn migrate_options(options: &mut Map<String, Value>, field_config: &mut FieldConfigSource) {
    rename_key(options, "valueField", "valueField1");
    rename_key(options, "valueText", "valueText1");

    if options.get("addUrl").map(is_truthy).unwrap_or(false) {
        if let Some(url) = options.get("url").and_then(Value::as_str) {
            let mut url = url.to_string();
            append_variable(&mut url, options, "urlVar1", "sourceField");
            append_variable(&mut url, options, "urlVar2", "targetField");

            log::debug!("migrating legacy cell url into data link: {}", url);
            field_config
                .defaults
                .links
                .push(LinkTemplate::new(LEGACY_LINK_TITLE, url));
        }

        for key in ["addUrl", "url", "urlVar1", "urlVar2"] {
            options.remove(key);
        }
    }
}

/// Options to carry over when the panel type changes to the matrix.
/// Only options from a previous matrix panel are kept.
pub fn migrate_panel_change(
    prev_plugin_id: &str,
    mut prev_options: Map<String, Value>,
    field_config: &mut FieldConfigSource,
) -> Map<String, Value> {
    if prev_plugin_id != MATRIX_PANEL_ID {
        return Map::new();
    }
    migrate_options(&mut prev_options, field_config);
    prev_options
}

/// Moves `from` to `to`, null included.
fn rename_key(options: &mut Map<String, Value>, from: &str, to: &str) {
    if let Some(value) = options.remove(from) {
        options.insert(to.to_string(), value);
    }
}

/// Appends `&var-<name>=${__data.fields["<field>"]}` when both the variable
/// and the field are configured.
fn append_variable(url: &mut String, options: &Map<String, Value>, var_key: &str, field_key: &str) {
    let variable = options.get(var_key).and_then(Value::as_str);
    let field = options.get(field_key).and_then(Value::as_str);

    if let (Some(variable), Some(field)) = (variable, field) {
        if VARIABLE_NAME.is_match(variable) && !field.is_empty() {
            let encoded = utf8_percent_encode(field, URI_COMPONENT);
            url.push_str(&format!("&var-{}=${{__data.fields[\"{}\"]}}", variable, encoded));
        }
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(false),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
