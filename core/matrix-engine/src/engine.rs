//! FILENAME: core/matrix-engine/src/engine.rs
//! Matrix Engine - The transformation core that turns query results into a
//! renderable matrix.
//!
//! Algorithm:
//! 1. Resolve the source, target and value fields of the first series
//! 2. Build the row and column axes (static or derived) and check bounds
//! 3. Assemble the dense grid, last defined write wins per cell slot
//! 4. Derive the legend if enabled
//!
//! The builder is a pure function of (data, options, host). Nothing is kept
//! between calls.

use frame::{DataFrame, DisplayValue, Field, FieldValue, PanelData};
use crate::axis::{build_axes, Axes, AxisIndex};
use crate::definition::MatrixOptions;
use crate::error::MatrixError;
use crate::host::{FieldDisplay, MatrixHost};
use crate::legend::build_legend;
use crate::resolve::{resolve, FieldFallback};
use crate::view::{MatrixCell, MatrixResult, MatrixView, ValueEntry};

// ============================================================================
// COLOR SCALE
// ============================================================================

/// Maps raw values to cell colors.
///
/// Always keyed to the first value field, whichever field populated the
/// cell. Missing and null values get the null color; values the first field
/// cannot color get the default color.
pub struct ColorScale<'a> {
    field_display: Option<Box<dyn FieldDisplay + 'a>>,
    null_color: String,
    default_color: String,
}

impl<'a> ColorScale<'a> {
    pub fn new(host: &'a dyn MatrixHost, field: Option<&'a Field>, options: &MatrixOptions) -> Self {
        ColorScale {
            field_display: field.and_then(|f| host.field_display(f)),
            null_color: host.color_by_name(&options.null_color),
            default_color: host.color_by_name(&options.default_color),
        }
    }

    pub fn color_for(&self, value: Option<&FieldValue>) -> String {
        match value {
            None | Some(FieldValue::Null) => self.null_color.clone(),
            Some(v) => self
                .display(Some(v))
                .and_then(|d| d.color)
                .unwrap_or_else(|| self.default_color.clone()),
        }
    }

    /// `value` as displayed by the first value field.
    pub fn display(&self, value: Option<&FieldValue>) -> Option<DisplayValue> {
        self.field_display.as_ref().map(|d| d.display(value))
    }
}

// ============================================================================
// MATRIX BUILDER
// ============================================================================

/// Resolved inputs for one build.
pub struct MatrixBuilder<'a> {
    frame: &'a DataFrame,
    options: &'a MatrixOptions,
    host: &'a dyn MatrixHost,

    /// Field supplying row labels.
    source: &'a Field,

    /// Field supplying column labels.
    target: &'a Field,

    /// Value fields in slot order (at most two).
    value_fields: Vec<&'a Field>,
}

impl<'a> MatrixBuilder<'a> {
    /// Resolves fields from the first series. Fails with `NoData` when there
    /// is no series or it lacks a row or column field.
    pub fn new(
        data: &'a PanelData,
        options: &'a MatrixOptions,
        host: &'a dyn MatrixHost,
    ) -> Result<Self, MatrixError> {
        let Some(frame) = data.first_series() else {
            log::debug!("no series in query result");
            return Err(MatrixError::NoData);
        };

        let source = resolve(options.source_field.as_deref(), frame, FieldFallback::Position(0));
        let target = resolve(options.target_field.as_deref(), frame, FieldFallback::Position(1));
        let (Some(source), Some(target)) = (source, target) else {
            log::debug!("series has {} fields, need a row and a column field", frame.fields.len());
            return Err(MatrixError::NoData);
        };

        let value_fields: Vec<&Field> = (0..options.value_slots())
            .filter_map(|slot| {
                let fallback = if slot == 0 {
                    FieldFallback::FirstNumeric
                } else {
                    FieldFallback::None
                };
                resolve(options.value_field_name(slot), frame, fallback)
            })
            .collect();

        log::debug!(
            "matrix fields: rows='{}' columns='{}' values={:?}",
            source.display_name(),
            target.display_name(),
            value_fields.iter().map(|f| f.display_name()).collect::<Vec<_>>()
        );

        Ok(MatrixBuilder {
            frame,
            options,
            host,
            source,
            target,
            value_fields,
        })
    }

    /// Executes the full build and returns the view.
    pub fn build(&self) -> MatrixResult {
        // Step 1: Axes and bounds
        let axes = build_axes(self.options, self.source, self.target)?;

        // Step 2: Dense grid
        let scale = ColorScale::new(self.host, self.value_fields.first().copied(), self.options);
        let cells = self.assemble(&axes, &scale);

        // Step 3: Legend
        let legend = if self.options.show_legend {
            build_legend(self.options.legend_kind, &self.value_fields, &scale)
        } else {
            Vec::new()
        };

        log::debug!(
            "built {} x {} matrix with {} legend entries",
            axes.rows.len(),
            axes.columns.len(),
            legend.len()
        );

        Ok(MatrixView {
            series: self.series_names(),
            rows: axes.rows,
            columns: axes.columns,
            cells,
            legend,
        })
    }

    /// Row field, column field, then each value field.
    fn series_names(&self) -> Vec<String> {
        [self.source, self.target]
            .iter()
            .chain(self.value_fields.iter())
            .map(|f| f.display_name().to_string())
            .collect()
    }

    /// Fills the grid from the input rows.
    fn assemble(&self, axes: &Axes, scale: &ColorScale<'_>) -> Vec<Vec<MatrixCell>> {
        let slots = self.value_fields.len();
        let mut cells: Vec<Vec<MatrixCell>> = axes
            .rows
            .iter()
            .map(|row| {
                axes.columns
                    .iter()
                    .map(|col| MatrixCell::new(row.clone(), col.clone(), slots))
                    .collect()
            })
            .collect();

        let row_index = AxisIndex::new(&axes.rows);
        let col_index = AxisIndex::new(&axes.columns);

        for (slot, &field) in self.value_fields.iter().enumerate() {
            let display = self.host.field_display(field);
            for (i, value) in field.values.iter().enumerate() {
                let r = self.source.value_at(i).and_then(|v| row_index.position(v));
                let c = self.target.value_at(i).and_then(|v| col_index.position(v));
                let (Some(r), Some(c)) = (r, c) else {
                    log::trace!("row {} of '{}' is not on the matrix axes", i, field.name);
                    continue;
                };

                let entry = &mut cells[r][c].values[slot];
                // A missing value only fills a slot nothing has written yet.
                if entry.is_none() || value.is_some() {
                    *entry = Some(self.value_entry(
                        field,
                        display.as_deref(),
                        i,
                        value.as_ref(),
                        scale,
                    ));
                }
            }
        }

        cells
    }

    fn value_entry(
        &self,
        field: &Field,
        display: Option<&dyn FieldDisplay>,
        row: usize,
        value: Option<&FieldValue>,
        scale: &ColorScale<'_>,
    ) -> ValueEntry {
        let display = display.map(|d| d.display(value)).unwrap_or_default();
        let link = if field.config.links.is_empty() {
            None
        } else {
            self.host
                .links(self.frame, field, row, &display)
                .into_iter()
                .next()
        };

        ValueEntry {
            value: value.cloned(),
            color: scale.color_for(value),
            display,
            link,
        }
    }
}

// ============================================================================
// PUBLIC API
// ============================================================================

/// Builds a matrix view from query results, panel options and host
/// capabilities. This is the main entry point.
pub fn build_matrix(
    data: &PanelData,
    options: &MatrixOptions,
    host: &dyn MatrixHost,
) -> MatrixResult {
    MatrixBuilder::new(data, options, host)?.build()
}
