//! FILENAME: core/matrix-engine/src/error.rs

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The only two ways building a matrix can fail. Both are recoverable by
/// changing the query or the panel options.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatrixError {
    #[error("no data")]
    #[serde(rename = "no data")]
    NoData,

    #[error("too many inputs")]
    #[serde(rename = "too many inputs")]
    TooManyInputs,
}

impl MatrixError {
    /// Message shown in place of the matrix.
    pub fn user_message(&self) -> &'static str {
        match self {
            MatrixError::NoData => "No data",
            MatrixError::TooManyInputs => "Too many data points, add query limits",
        }
    }
}

#[derive(Error, Debug)]
pub enum OptionsError {
    #[error("Invalid panel options: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Panel options must be a JSON object")]
    NotAnObject,
}
