//! FILENAME: core/frame/src/lib.rs
//! PURPOSE: Shared data types for tabular query results.
//! CONTEXT: Re-exports public types and modules for use by other crates.

pub mod display;
pub mod field;
pub mod frame;
pub mod number_format;
pub mod value;

// Re-export commonly used types at the crate root
pub use display::{unit_suffix, DataLink, DisplayProcessor, DisplayValue};
pub use field::{
    Field, FieldConfig, FieldConfigSource, LinkTemplate, ThresholdStep, Thresholds,
    ThresholdsMode, ValueMapping,
};
pub use frame::{DataFrame, PanelData};
pub use number_format::{format_general, format_number, format_time};
pub use value::{explicit_null, FieldKey, FieldType, FieldValue, OrderedFloat};
