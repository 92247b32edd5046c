//! FILENAME: core/matrix-engine/src/lib.rs
//! Adjacency matrix subsystem for the matrix panel.
//!
//! This crate turns one tabular query result into a dense row x column
//! matrix of colored cells, with optional per-cell links and a legend.
//! It depends on `frame` for the shared data types.
//!
//! Layers:
//! - `definition`: Serializable panel options (what the matrix IS)
//! - `migration`: Upgrades options saved by older plugin versions
//! - `resolve` / `axis`: Field selection and row/column labels
//! - `engine`: Grid assembly (HOW we build)
//! - `legend`: Range and categorical legends
//! - `host`: Theme, display and link capabilities supplied by the host
//! - `view`: Renderable output (WHAT we display)

pub mod axis;
pub mod definition;
pub mod engine;
pub mod error;
pub mod host;
pub mod legend;
pub mod links;
pub mod migration;
pub mod resolve;
pub mod view;

pub use axis::{natural_cmp, Axes, AxisIndex};
pub use definition::*;
pub use engine::{build_matrix, ColorScale, MatrixBuilder};
pub use error::{MatrixError, OptionsError};
pub use host::{FieldDisplay, MatrixHost, StandardHost};
pub use legend::legend_samples;
pub use migration::{migrate_options, migrate_panel_change};
pub use resolve::{resolve, FieldFallback};
pub use view::*;
