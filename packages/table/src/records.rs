//! Materialization of typed rows from a [`ColumnTable`].

use serde_json::Value;
use wind_map_site_models::{
    CategoricalAttribute, FARM_ID_COLUMN, FarmRecord, NumericAttribute, SiteAttributes,
    TURBINE_ID_COLUMN, TurbineRecord,
};

use crate::{ColumnTable, InputShapeError};

/// Columns a turbine table must provide.
#[must_use]
pub fn turbine_columns() -> Vec<&'static str> {
    required_columns(TURBINE_ID_COLUMN)
}

/// Columns a farm table must provide.
#[must_use]
pub fn farm_columns() -> Vec<&'static str> {
    required_columns(FARM_ID_COLUMN)
}

fn required_columns(id_column: &'static str) -> Vec<&'static str> {
    std::iter::once(id_column)
        .chain(CategoricalAttribute::all().iter().map(|&attr| attr.column_name()))
        .chain(NumericAttribute::all().iter().map(|&attr| attr.column_name()))
        .collect()
}

/// Attribute columns resolved once so rows can be read by index.
struct SiteColumns<'a> {
    categorical: Vec<(CategoricalAttribute, &'a [Value])>,
    numeric: Vec<(NumericAttribute, &'a [Value])>,
}

impl<'a> SiteColumns<'a> {
    fn resolve(table: &'a ColumnTable) -> Result<Self, InputShapeError> {
        let categorical = CategoricalAttribute::all()
            .iter()
            .map(|&attr| Ok((attr, require(table, attr.column_name())?)))
            .collect::<Result<_, InputShapeError>>()?;
        let numeric = NumericAttribute::all()
            .iter()
            .map(|&attr| Ok((attr, require(table, attr.column_name())?)))
            .collect::<Result<_, InputShapeError>>()?;

        Ok(Self {
            categorical,
            numeric,
        })
    }

    fn row(&self, row: usize) -> Result<SiteAttributes, InputShapeError> {
        let mut attributes = SiteAttributes::default();

        for &(attr, values) in &self.categorical {
            *attributes.category_mut(attr) =
                decode_category(attr.column_name(), row, &values[row])?;
        }
        for &(attr, values) in &self.numeric {
            *attributes.measure_mut(attr) =
                decode_measure(attr.column_name(), row, &values[row])?;
        }

        Ok(attributes)
    }
}

impl ColumnTable {
    /// Converts the table into one [`TurbineRecord`] per row, in row order.
    ///
    /// # Errors
    ///
    /// Returns an [`InputShapeError`] if a turbine column is missing, the
    /// columns differ in length, or a cell has the wrong type.
    pub fn turbine_records(&self) -> Result<Vec<TurbineRecord>, InputShapeError> {
        let rows = self.validate(&turbine_columns())?;
        let ids = require(self, TURBINE_ID_COLUMN)?;
        let site = SiteColumns::resolve(self)?;

        (0..rows)
            .map(|row| {
                Ok(TurbineRecord {
                    id: decode_id(TURBINE_ID_COLUMN, row, &ids[row])?,
                    attributes: site.row(row)?,
                })
            })
            .collect()
    }

    /// Converts the table into one [`FarmRecord`] per row, in row order.
    ///
    /// Standalone rows (`WFid == -1`) are kept; excluding them is up to the
    /// filter.
    ///
    /// # Errors
    ///
    /// Returns an [`InputShapeError`] if a farm column is missing, the
    /// columns differ in length, or a cell has the wrong type.
    pub fn farm_records(&self) -> Result<Vec<FarmRecord>, InputShapeError> {
        let rows = self.validate(&farm_columns())?;
        let ids = require(self, FARM_ID_COLUMN)?;
        let site = SiteColumns::resolve(self)?;

        (0..rows)
            .map(|row| {
                Ok(FarmRecord {
                    wf_id: decode_id(FARM_ID_COLUMN, row, &ids[row])?,
                    attributes: site.row(row)?,
                })
            })
            .collect()
    }
}

fn require<'a>(table: &'a ColumnTable, column: &str) -> Result<&'a [Value], InputShapeError> {
    table
        .column(column)
        .ok_or_else(|| InputShapeError::MissingColumn {
            column: column.to_string(),
        })
}

fn invalid(column: &str, row: usize, expected: &'static str) -> InputShapeError {
    InputShapeError::InvalidCell {
        column: column.to_string(),
        row,
        expected,
    }
}

fn decode_category(
    column: &str,
    row: usize,
    value: &Value,
) -> Result<Option<String>, InputShapeError> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s.clone())),
        _ => Err(invalid(column, row, "a string or null")),
    }
}

fn decode_measure(
    column: &str,
    row: usize,
    value: &Value,
) -> Result<Option<f64>, InputShapeError> {
    match value {
        Value::Null => Ok(None),
        Value::Number(n) => n
            .as_f64()
            .map(Some)
            .ok_or_else(|| invalid(column, row, "a number or null")),
        _ => Err(invalid(column, row, "a number or null")),
    }
}

/// Integer ids may arrive as integral floats (`5.0`) when the source column
/// went through a float dtype.
#[allow(clippy::cast_possible_truncation)]
fn decode_id(column: &str, row: usize, value: &Value) -> Result<i64, InputShapeError> {
    let Value::Number(n) = value else {
        return Err(invalid(column, row, "an integer id"));
    };
    if let Some(id) = n.as_i64() {
        return Ok(id);
    }
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 => {
            Ok(f as i64)
        }
        _ => Err(invalid(column, row, "an integer id")),
    }
}
