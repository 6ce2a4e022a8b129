#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Column-oriented tables and their conversion to typed rows.
//!
//! The dashboard ships both datasets as JSON objects mapping each column
//! name to an array of values (the `pandas` `to_dict("list")` layout).
//! [`ColumnTable`] holds that layout as-is, checks its shape, and
//! materializes [`TurbineRecord`]s and [`FarmRecord`]s from it.
//!
//! [`TurbineRecord`]: wind_map_site_models::TurbineRecord
//! [`FarmRecord`]: wind_map_site_models::FarmRecord

pub mod options;
mod records;

use std::collections::BTreeMap;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use options::derive_options;
pub use records::{farm_columns, turbine_columns};

/// The input tables do not have the shape the filter requires.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputShapeError {
    /// A required column is absent.
    #[error("Missing column '{column}'")]
    MissingColumn {
        /// Name of the missing column.
        column: String,
    },

    /// A column's length differs from the table's row count.
    #[error("Column '{column}' has {actual} values, expected {expected}")]
    LengthMismatch {
        /// Name of the ragged column.
        column: String,
        /// Row count established by the first required column.
        expected: usize,
        /// Actual length of the column.
        actual: usize,
    },

    /// The turbine and farm tables have different row counts.
    #[error("Turbine table has {turbines} rows but farm table has {farms}")]
    RowCountMismatch {
        /// Turbine table row count.
        turbines: usize,
        /// Farm table row count.
        farms: usize,
    },

    /// A cell holds a value of the wrong JSON type.
    #[error("Invalid value in column '{column}' at row {row}: expected {expected}")]
    InvalidCell {
        /// Column of the offending cell.
        column: String,
        /// Row of the offending cell.
        row: usize,
        /// What the cell should have contained.
        expected: &'static str,
    },
}

/// Errors that can occur while loading a table.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    /// I/O error (file read).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The table does not have the required shape.
    #[error("Input shape error: {0}")]
    Shape(#[from] InputShapeError),
}

/// A table stored as one value sequence per column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnTable {
    columns: BTreeMap<String, Vec<Value>>,
}

impl ColumnTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a column, returning the table.
    #[must_use]
    pub fn with_column(mut self, name: impl Into<String>, values: Vec<Value>) -> Self {
        self.insert_column(name, values);
        self
    }

    /// Adds or replaces a column.
    pub fn insert_column(&mut self, name: impl Into<String>, values: Vec<Value>) {
        self.columns.insert(name.into(), values);
    }

    /// Parses a table from a JSON object of arrays.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a JSON object whose values are
    /// all arrays.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Parses a table from a reader yielding a JSON object of arrays.
    ///
    /// # Errors
    ///
    /// Returns an error if reading fails or the input is not a JSON object
    /// whose values are all arrays.
    pub fn from_reader(reader: impl std::io::Read) -> Result<Self, serde_json::Error> {
        serde_json::from_reader(reader)
    }

    /// Loads a table from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsed.
    pub fn load(path: &Path) -> Result<Self, TableError> {
        let file = std::fs::File::open(path)?;
        let table = Self::from_reader(BufReader::new(file))?;
        log::info!(
            "Loaded {} columns from {}",
            table.columns.len(),
            path.display()
        );
        Ok(table)
    }

    /// Returns the values of a column.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&[Value]> {
        self.columns.get(name).map(Vec::as_slice)
    }

    /// Iterates over the column names in sorted order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    /// Checks that every `required` column exists and that all columns
    /// have the same length, returning that length.
    ///
    /// An empty table with no requirements has zero rows.
    ///
    /// # Errors
    ///
    /// * [`InputShapeError::MissingColumn`] if a required column is absent
    /// * [`InputShapeError::LengthMismatch`] if any column is ragged
    pub fn validate(&self, required: &[&str]) -> Result<usize, InputShapeError> {
        let mut expected = None;

        for &name in required {
            let values = self
                .column(name)
                .ok_or_else(|| InputShapeError::MissingColumn {
                    column: name.to_string(),
                })?;
            expected.get_or_insert(values.len());
        }

        let Some(expected) =
            expected.or_else(|| self.columns.values().next().map(Vec::len))
        else {
            return Ok(0);
        };

        for (name, values) in &self.columns {
            if values.len() != expected {
                return Err(InputShapeError::LengthMismatch {
                    column: name.clone(),
                    expected,
                    actual: values.len(),
                });
            }
        }

        Ok(expected)
    }
}
