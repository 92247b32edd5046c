//! FILENAME: core/matrix-engine/src/host.rs
//! Host capabilities used by the builder.
//!
//! The dashboard host owns theming, value formatting and link resolution.
//! The builder only reaches them through `MatrixHost`, so it can run (and be
//! tested) without a host present. `StandardHost` is a self-contained
//! implementation driven by field config.

use frame::{DataFrame, DataLink, DisplayProcessor, DisplayValue, Field, FieldValue};
use crate::links::resolve_links;

/// Formats the values of one field.
///
/// Obtained once per field and build through `MatrixHost::field_display`, so
/// any per-field preparation (such as scanning the field's range) is not
/// repeated per row.
pub trait FieldDisplay {
    fn display(&self, value: Option<&FieldValue>) -> DisplayValue;
}

impl<F> FieldDisplay for F
where
    F: Fn(Option<&FieldValue>) -> DisplayValue,
{
    fn display(&self, value: Option<&FieldValue>) -> DisplayValue {
        self(value)
    }
}

/// Capabilities the host provides to the matrix builder.
pub trait MatrixHost {
    /// Resolves a theme color name ("red", "#E6E6E6", ...) to a renderable color.
    fn color_by_name(&self, name: &str) -> String;

    /// Prepares display of `field`'s values. `None` means the field has no
    /// display capability.
    fn field_display<'a>(&'a self, field: &'a Field) -> Option<Box<dyn FieldDisplay + 'a>>;

    /// Links for `row` of `field`, in declaration order. `display` is the
    /// row's formatted value.
    fn links(
        &self,
        frame: &DataFrame,
        field: &Field,
        row: usize,
        display: &DisplayValue,
    ) -> Vec<DataLink>;
}

// ============================================================================
// STANDARD HOST
// ============================================================================

/// Named colors understood by `StandardHost`.
const NAMED_COLORS: &[(&str, &str)] = &[
    ("transparent", "rgba(0, 0, 0, 0)"),
    ("text", "#CCCCDC"),
    ("green", "#73BF69"),
    ("dark-green", "#37872D"),
    ("light-green", "#96D98D"),
    ("red", "#F2495C"),
    ("dark-red", "#C4162A"),
    ("light-red", "#FF7383"),
    ("orange", "#FF9830"),
    ("dark-orange", "#FA6400"),
    ("yellow", "#FADE2A"),
    ("dark-yellow", "#E0B400"),
    ("blue", "#5794F2"),
    ("dark-blue", "#1F60C4"),
    ("light-blue", "#8AB8FF"),
    ("purple", "#B877D9"),
    ("dark-purple", "#8F3BB8"),
];

/// Host driven entirely by field config: thresholds, mappings, units,
/// decimals and link templates.
#[derive(Debug, Clone, Default)]
pub struct StandardHost {
    /// Extra named colors, checked before the built-in palette.
    custom_colors: Vec<(String, String)>,
}

impl StandardHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers (or overrides) a named color.
    pub fn with_color(mut self, name: impl Into<String>, color: impl Into<String>) -> Self {
        self.custom_colors.push((name.into(), color.into()));
        self
    }
}

impl MatrixHost for StandardHost {
    fn color_by_name(&self, name: &str) -> String {
        if let Some((_, color)) = self.custom_colors.iter().rev().find(|(n, _)| n == name) {
            return color.clone();
        }
        NAMED_COLORS
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, color)| color.to_string())
            .unwrap_or_else(|| name.to_string())
    }

    fn field_display<'a>(&'a self, field: &'a Field) -> Option<Box<dyn FieldDisplay + 'a>> {
        Some(Box::new(StandardDisplay {
            host: self,
            processor: DisplayProcessor::new(field),
        }))
    }

    fn links(
        &self,
        frame: &DataFrame,
        field: &Field,
        row: usize,
        display: &DisplayValue,
    ) -> Vec<DataLink> {
        resolve_links(frame, field, row, display)
    }
}

/// Field config display with colors resolved through the host palette.
struct StandardDisplay<'a> {
    host: &'a StandardHost,
    processor: DisplayProcessor<'a>,
}

impl FieldDisplay for StandardDisplay<'_> {
    fn display(&self, value: Option<&FieldValue>) -> DisplayValue {
        self.processor
            .display(value, &|name: &str| self.host.color_by_name(name))
    }
}
