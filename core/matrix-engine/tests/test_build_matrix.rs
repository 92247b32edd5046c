//! FILENAME: core/matrix-engine/tests/test_build_matrix.rs
//! PURPOSE: End-to-end tests for building matrices from query results.

mod common;

use common::{build, network_sample, panel, panel_with_values};
use frame::{
    DataFrame, Field, FieldConfig, FieldValue, PanelData, ThresholdStep, Thresholds,
    ThresholdsMode, ValueMapping,
};
use matrix_engine::{LegendKind, MatrixError, MatrixOptions, MAX_MATRIX_CELLS};

// ============================================================================
// SHAPE AND BOUNDS
// ============================================================================

#[test]
fn test_grid_matches_axes() {
    let data = network_sample();
    let view = build(&data, &MatrixOptions::default()).unwrap();

    let (rows, cols) = view.dimensions();
    assert_eq!(view.cells.len(), rows);
    assert!(view.cells.iter().all(|r| r.len() == cols));
    assert!(rows * cols <= MAX_MATRIX_CELLS);

    for (r, row) in view.cells.iter().enumerate() {
        for (c, cell) in row.iter().enumerate() {
            assert_eq!(cell.row, view.rows[r]);
            assert_eq!(cell.col, view.columns[c]);
        }
    }
}

#[test]
fn test_build_is_idempotent() {
    let data = network_sample();
    let options = MatrixOptions {
        show_legend: true,
        ..MatrixOptions::default()
    };
    let first = build(&data, &options).unwrap();
    let second = build(&data, &options).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_empty_result_is_no_data() {
    let err = build(&PanelData::default(), &MatrixOptions::default()).unwrap_err();
    assert_eq!(err, MatrixError::NoData);
    assert_eq!(err.to_string(), "no data");
    assert_eq!(err.user_message(), "No data");
}

#[test]
fn test_series_without_rows_is_no_data() {
    let data = panel(&[]);
    assert_eq!(build(&data, &MatrixOptions::default()), Err(MatrixError::NoData));
}

#[test]
fn test_oversized_matrix_is_rejected() {
    let labels: Vec<String> = (0..300).map(|i| format!("n{}", i)).collect();
    let values: Vec<f64> = (0..300).map(|i| i as f64).collect();
    let data = PanelData::single(DataFrame::new(vec![
        Field::strings("source", &labels),
        Field::strings("target", &labels.iter().rev().cloned().collect::<Vec<_>>()),
        Field::numbers("value", &values),
    ]));

    let err = build(&data, &MatrixOptions::default()).unwrap_err();
    assert_eq!(err, MatrixError::TooManyInputs);
    assert_eq!(err.to_string(), "too many inputs");
}

#[test]
fn test_percentage_thresholds_on_large_input() {
    let n = 200;
    let mut sources = Vec::with_capacity(n * n);
    let mut targets = Vec::with_capacity(n * n);
    let mut values = Vec::with_capacity(n * n);
    for r in 0..n {
        for c in 0..n {
            sources.push(format!("r{}", r));
            targets.push(format!("c{}", c));
            values.push((r * n + c) as f64);
        }
    }
    let value_field = Field::numbers("value", &values).with_config(FieldConfig {
        thresholds: Some(Thresholds {
            mode: ThresholdsMode::Percentage,
            steps: vec![ThresholdStep::base("green"), ThresholdStep::at(50.0, "red")],
        }),
        ..FieldConfig::default()
    });
    let data = PanelData::single(DataFrame::new(vec![
        Field::strings("source", &sources),
        Field::strings("target", &targets),
        value_field,
    ]));
    let options = MatrixOptions {
        show_legend: true,
        ..MatrixOptions::default()
    };

    let view = build(&data, &options).unwrap();
    assert_eq!(view.dimensions(), (n, n));
    assert_eq!(view.cell(0, 0).unwrap().entry(0).unwrap().color, "#73BF69");
    assert_eq!(view.cell(n - 1, n - 1).unwrap().entry(0).unwrap().color, "#F2495C");
    assert_eq!(view.legend.first().unwrap().color, "#73BF69");
    assert_eq!(view.legend.last().unwrap().color, "#F2495C");
}

#[test]
fn test_only_first_series_is_used() {
    let mut data = panel(&[("a", "x", 1.0)]);
    data.series.push(DataFrame::new(vec![
        Field::strings("source", &["z"]),
        Field::strings("target", &["z"]),
        Field::numbers("value", &[9.0]),
    ]));
    let view = build(&data, &MatrixOptions::default()).unwrap();
    assert_eq!(view.row_names(), vec!["a"]);
}

// ============================================================================
// AXES
// ============================================================================

#[test]
fn test_derived_axes_sort_naturally() {
    let data = panel(&[("a10", "x", 1.0), ("a2", "x", 2.0), ("a1", "x", 3.0)]);
    let view = build(&data, &MatrixOptions::default()).unwrap();
    assert_eq!(view.row_names(), vec!["a1", "a2", "a10"]);
}

#[test]
fn test_static_axes_keep_typed_order() {
    let data = panel(&[("y", "2", 1.0), ("x", "1", 2.0), ("z", "1", 3.0)]);
    let options = MatrixOptions {
        use_static_axes: true,
        static_rows: Some("x,y".to_string()),
        static_columns: Some("1,2".to_string()),
        ..MatrixOptions::default()
    };
    let view = build(&data, &options).unwrap();

    assert_eq!(view.row_names(), vec!["x", "y"]);
    assert_eq!(view.column_names(), vec!["1", "2"]);

    // Row "z" is not on the static axis and is skipped.
    let values: Vec<Option<FieldValue>> = view
        .cells
        .iter()
        .flatten()
        .filter_map(|c| c.entry(0).map(|e| e.value.clone()))
        .collect();
    assert_eq!(
        values,
        vec![Some(FieldValue::Number(2.0)), Some(FieldValue::Number(1.0))]
    );
}

#[test]
fn test_static_labels_do_not_match_numbers() {
    let data = PanelData::single(DataFrame::new(vec![
        Field::numbers("source", &[1.0]),
        Field::numbers("target", &[2.0]),
        Field::numbers("value", &[3.0]),
    ]));
    let options = MatrixOptions {
        use_static_axes: true,
        static_rows: Some("1".to_string()),
        static_columns: Some("2".to_string()),
        ..MatrixOptions::default()
    };
    let view = build(&data, &options).unwrap();
    assert!(view.cell(0, 0).unwrap().is_empty());
}

#[test]
fn test_empty_static_list_is_no_data() {
    let data = panel(&[("a", "x", 1.0)]);
    let options = MatrixOptions {
        use_static_axes: true,
        static_rows: Some("a".to_string()),
        static_columns: None,
        ..MatrixOptions::default()
    };
    assert_eq!(build(&data, &options), Err(MatrixError::NoData));

    let options = MatrixOptions {
        static_columns: Some(String::new()),
        ..options
    };
    assert_eq!(build(&data, &options), Err(MatrixError::NoData));
}

// ============================================================================
// CELL WRITES
// ============================================================================

#[test]
fn test_defined_value_survives_later_missing_value() {
    let data = panel_with_values(
        &[("r", "c"), ("r", "c")],
        vec![Some(FieldValue::Number(5.0)), None],
    );
    let view = build(&data, &MatrixOptions::default()).unwrap();
    let entry = view.cell(0, 0).unwrap().entry(0).unwrap();
    assert_eq!(entry.value, Some(FieldValue::Number(5.0)));
}

#[test]
fn test_defined_value_replaces_earlier_missing_value() {
    let data = panel_with_values(
        &[("r", "c"), ("r", "c")],
        vec![None, Some(FieldValue::Number(5.0))],
    );
    let view = build(&data, &MatrixOptions::default()).unwrap();
    let entry = view.cell(0, 0).unwrap().entry(0).unwrap();
    assert_eq!(entry.value, Some(FieldValue::Number(5.0)));
}

#[test]
fn test_last_defined_value_wins() {
    let data = panel(&[("r", "c", 1.0), ("r", "c", 2.0), ("r", "c", 3.0)]);
    let view = build(&data, &MatrixOptions::default()).unwrap();
    let entry = view.cell(0, 0).unwrap().entry(0).unwrap();
    assert_eq!(entry.value, Some(FieldValue::Number(3.0)));
}

#[test]
fn test_explicit_null_overwrites_and_differs_from_empty() {
    let data = panel_with_values(
        &[("r", "c"), ("r", "c"), ("s", "d")],
        vec![Some(FieldValue::Number(5.0)), Some(FieldValue::Null), Some(FieldValue::Number(1.0))],
    );
    let options = MatrixOptions {
        null_color: "dark-red".to_string(),
        ..MatrixOptions::default()
    };
    let view = build(&data, &options).unwrap();

    let nulled = view.cell(0, 0).unwrap();
    assert_eq!(nulled.entry(0).unwrap().value, Some(FieldValue::Null));
    assert_eq!(nulled.entry(0).unwrap().color, "#C4162A");

    // r/d was never queried
    assert!(view.cell(0, 1).unwrap().is_empty());
}

// ============================================================================
// VALUE FIELDS
// ============================================================================

#[test]
fn test_two_value_fields() {
    let data = network_sample();
    let options = MatrixOptions {
        source_field: Some("src_host".to_string()),
        target_field: Some("dst_site".to_string()),
        value_count: 2,
        value_field1: Some("loss".to_string()),
        value_field2: Some("rtt".to_string()),
        ..MatrixOptions::default()
    };
    let view = build(&data, &options).unwrap();

    assert_eq!(view.series, vec!["src_host", "dst_site", "loss", "rtt"]);
    assert_eq!(view.row_names(), vec!["host1", "host2", "host10"]);
    assert_eq!(view.column_names(), vec!["site-a", "site-b"]);

    let cell = view.cell(1, 1).unwrap();
    assert_eq!(cell.entry(0).unwrap().value, Some(FieldValue::Number(5.0)));
    assert_eq!(cell.entry(1).unwrap().value, Some(FieldValue::Number(22.0)));
}

#[test]
fn test_unresolved_second_field_is_omitted() {
    let data = network_sample();
    let options = MatrixOptions {
        value_count: 2,
        value_field2: Some("jitter".to_string()),
        ..MatrixOptions::default()
    };
    let view = build(&data, &options).unwrap();

    assert_eq!(view.series, vec!["src_host", "dst_site", "loss"]);
    assert_eq!(view.value_field_count(), 1);
    assert!(view.cells.iter().flatten().all(|c| c.values.len() == 1));
}

#[test]
fn test_second_field_entries_use_first_field_colors() {
    let mut data = network_sample();
    let fields = &mut data.series[0].fields;
    fields[2].config.thresholds = Some(Thresholds::absolute(vec![ThresholdStep::base("green")]));
    fields[3].config.thresholds = Some(Thresholds::absolute(vec![ThresholdStep::base("red")]));

    let options = MatrixOptions {
        value_count: 2,
        value_field1: Some("loss".to_string()),
        value_field2: Some("rtt".to_string()),
        ..MatrixOptions::default()
    };
    let view = build(&data, &options).unwrap();

    let entry = view.cell(0, 0).unwrap().entry(1).unwrap();
    assert_eq!(entry.color, "#73BF69");
    // Display still comes from the populating field.
    assert_eq!(entry.display.color.as_deref(), Some("#F2495C"));
}

#[test]
fn test_value_field_falls_back_to_first_numeric() {
    let data = PanelData::single(DataFrame::new(vec![
        Field::strings("a", &["r"]),
        Field::strings("b", &["c"]),
        Field::strings("label", &["note"]),
        Field::numbers("count", &[4.0]),
    ]));
    let options = MatrixOptions {
        value_field1: Some("does not exist".to_string()),
        ..MatrixOptions::default()
    };
    let view = build(&data, &options).unwrap();
    assert_eq!(view.series[2], "count");
}

#[test]
fn test_no_numeric_field_leaves_cells_empty() {
    let data = PanelData::single(DataFrame::new(vec![
        Field::strings("a", &["r"]),
        Field::strings("b", &["c"]),
    ]));
    let options = MatrixOptions {
        show_legend: true,
        ..MatrixOptions::default()
    };
    let view = build(&data, &options).unwrap();
    assert_eq!(view.series.len(), 2);
    assert!(view.cell(0, 0).unwrap().values.is_empty());
    assert!(view.legend.is_empty());
}

// ============================================================================
// LEGEND
// ============================================================================

#[test]
fn test_range_legend() {
    let data = panel(&[("a", "x", 0.0), ("a", "y", 10.0), ("b", "x", 20.0)]);
    let options = MatrixOptions {
        show_legend: true,
        legend_kind: LegendKind::Range,
        ..MatrixOptions::default()
    };
    let view = build(&data, &options).unwrap();

    let labels: Vec<&str> = view.legend.iter().map(|e| e.label.as_str()).collect();
    assert_eq!(
        labels,
        vec!["0", "2", "4", "6", "8", "10", "12", "14", "16", "18", "20"]
    );
}

#[test]
fn test_range_legend_labels_carry_unit() {
    let mut data = panel(&[("a", "x", 0.0), ("a", "y", 1.0)]);
    data.series[0].fields[2].config.unit = Some("percent".to_string());
    let options = MatrixOptions {
        show_legend: true,
        ..MatrixOptions::default()
    };
    let view = build(&data, &options).unwrap();
    assert_eq!(view.legend[0].label, "0 %");
    assert_eq!(view.legend[10].label, "1 %");
}

#[test]
fn test_categorical_legend() {
    let mut data = PanelData::single(DataFrame::new(vec![
        Field::strings("source", &["r1", "r2", "r3"]),
        Field::strings("target", &["c", "c", "c"]),
        Field::strings("state", &["A", "B", "A"]),
    ]));
    data.series[0].fields[2].config = FieldConfig {
        mappings: vec![
            ValueMapping { value: "A".to_string(), text: None, color: Some("green".to_string()) },
            ValueMapping { value: "B".to_string(), text: Some("Bad".to_string()), color: Some("red".to_string()) },
        ],
        ..FieldConfig::default()
    };
    let options = MatrixOptions {
        value_field1: Some("state".to_string()),
        show_legend: true,
        legend_kind: LegendKind::Categorical,
        ..MatrixOptions::default()
    };
    let view = build(&data, &options).unwrap();

    assert_eq!(view.legend.len(), 2);
    assert_eq!(view.legend[0].label, "A");
    assert_eq!(view.legend[0].color, "#73BF69");
    assert_eq!(view.legend[1].label, "Bad");
    assert_eq!(view.legend[1].color, "#F2495C");
}

#[test]
fn test_legend_disabled() {
    let data = network_sample();
    let view = build(&data, &MatrixOptions::default()).unwrap();
    assert!(view.legend.is_empty());
}
