//! FILENAME: tests/common/mod.rs
//! Fixtures shared by the matrix engine integration tests.

#![allow(dead_code)]

use frame::{DataFrame, Field, FieldType, FieldValue, PanelData};
use matrix_engine::{build_matrix, MatrixOptions, MatrixResult, StandardHost};

/// Builds panel data from (source, target, value) rows.
pub fn panel(rows: &[(&str, &str, f64)]) -> PanelData {
    let src: Vec<&str> = rows.iter().map(|r| r.0).collect();
    let dst: Vec<&str> = rows.iter().map(|r| r.1).collect();
    let val: Vec<f64> = rows.iter().map(|r| r.2).collect();
    PanelData::single(DataFrame::new(vec![
        Field::strings("source", &src),
        Field::strings("target", &dst),
        Field::numbers("value", &val),
    ]))
}

/// Panel data with explicit (possibly missing) values for one value field.
pub fn panel_with_values(rows: &[(&str, &str)], values: Vec<Option<FieldValue>>) -> PanelData {
    let src: Vec<&str> = rows.iter().map(|r| r.0).collect();
    let dst: Vec<&str> = rows.iter().map(|r| r.1).collect();
    PanelData::single(DataFrame::new(vec![
        Field::strings("source", &src),
        Field::strings("target", &dst),
        Field::new("value", FieldType::Number).with_values(values),
    ]))
}

/// A network-style sample: hosts in rows, sites in columns, loss and rtt.
pub fn network_sample() -> PanelData {
    PanelData::single(DataFrame::new(vec![
        Field::strings("src_host", &["host10", "host2", "host1", "host2"]),
        Field::strings("dst_site", &["site-b", "site-a", "site-a", "site-b"]),
        Field::numbers("loss", &[0.0, 2.5, 10.0, 5.0]),
        Field::numbers("rtt", &[12.0, 40.0, 7.5, 22.0]),
    ]))
}

/// Runs the builder with the standard host.
pub fn build(data: &PanelData, options: &MatrixOptions) -> MatrixResult {
    build_matrix(data, options, &StandardHost::new())
}
