#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Multi-criteria filter over the turbine and wind farm tables.
//!
//! The two tables are aligned by row index: row `i` of the farm table
//! describes the farm that turbine row `i` belongs to (or `WFid == -1` when
//! it belongs to none). Both are filtered with the same predicate and the
//! surviving identifiers are returned in row order, together with counts
//! formatted for display.
//!
//! [`filter_tables`] does the whole job for one invocation, straight from
//! the column-oriented input. Long-lived callers build a [`Dataset`] once
//! and call [`Dataset::filter`] for every criteria change.

pub mod notice;
pub mod selection;

use std::path::Path;

use wind_map_filter_models::{FilterCriteria, FilterOptions, FilterOutcome};
use wind_map_site_models::{FarmRecord, TurbineRecord};
use wind_map_table::{ColumnTable, InputShapeError, TableError, farm_columns, turbine_columns};

/// Turbine and farm records, materialized and aligned by row index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    turbines: Vec<TurbineRecord>,
    farms: Vec<FarmRecord>,
}

impl Dataset {
    /// Pairs already materialized records.
    ///
    /// # Errors
    ///
    /// Returns [`InputShapeError::RowCountMismatch`] if the two tables do
    /// not have the same number of rows.
    pub fn from_records(
        turbines: Vec<TurbineRecord>,
        farms: Vec<FarmRecord>,
    ) -> Result<Self, InputShapeError> {
        ensure_aligned(turbines.len(), farms.len())?;
        Ok(Self { turbines, farms })
    }

    /// Materializes both column-oriented tables.
    ///
    /// # Errors
    ///
    /// Returns an [`InputShapeError`] if a required column is missing, a
    /// table is ragged, a cell has the wrong type, or the tables differ in
    /// row count.
    pub fn from_tables(
        turbine_table: &ColumnTable,
        farm_table: &ColumnTable,
    ) -> Result<Self, InputShapeError> {
        let turbine_rows = turbine_table.validate(&turbine_columns())?;
        let farm_rows = farm_table.validate(&farm_columns())?;
        ensure_aligned(turbine_rows, farm_rows)?;

        Ok(Self {
            turbines: turbine_table.turbine_records()?,
            farms: farm_table.farm_records()?,
        })
    }

    /// Loads and materializes both tables from JSON files.
    ///
    /// # Errors
    ///
    /// Returns an error if either file cannot be read or parsed, or the
    /// tables do not have the required shape.
    pub fn load(turbine_path: &Path, farm_path: &Path) -> Result<Self, TableError> {
        let turbine_table = ColumnTable::load(turbine_path)?;
        let farm_table = ColumnTable::load(farm_path)?;
        let dataset = Self::from_tables(&turbine_table, &farm_table)?;
        log::info!("Materialized {} aligned rows", dataset.row_count());
        Ok(dataset)
    }

    /// Number of rows in each table.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.turbines.len()
    }

    /// Turbine records in row order.
    #[must_use]
    pub fn turbines(&self) -> &[TurbineRecord] {
        &self.turbines
    }

    /// Farm records in row order.
    #[must_use]
    pub fn farms(&self) -> &[FarmRecord] {
        &self.farms
    }

    /// Selectable control values derived from the records.
    #[must_use]
    pub fn options(&self) -> FilterOptions {
        wind_map_table::derive_options(&self.turbines, &self.farms)
    }

    /// Applies `criteria` to both tables.
    ///
    /// Turbine and farm rows are judged independently: a farm row can be
    /// dropped (e.g. for `WFid == -1`) while the turbine in the same row is
    /// kept, and vice versa.
    #[must_use]
    pub fn filter(&self, criteria: &FilterCriteria) -> FilterOutcome {
        let turbine_ids: Vec<i64> = self
            .turbines
            .iter()
            .filter(|record| criteria.admits_turbine(record))
            .map(|record| record.id)
            .collect();

        let farm_ids: Vec<i64> = self
            .farms
            .iter()
            .filter(|record| criteria.admits_farm(record))
            .map(|record| record.wf_id)
            .collect();

        log::debug!(
            "Filter matched {} turbines and {} farms out of {} rows",
            turbine_ids.len(),
            farm_ids.len(),
            self.row_count()
        );

        FilterOutcome::from_ids(turbine_ids, farm_ids)
    }
}

/// Materializes both tables and filters them in one go.
///
/// # Errors
///
/// Returns an [`InputShapeError`] if either table is missing a column, is
/// ragged, holds a wrongly typed cell, or the tables differ in row count.
pub fn filter_tables(
    turbine_table: &ColumnTable,
    farm_table: &ColumnTable,
    criteria: &FilterCriteria,
) -> Result<FilterOutcome, InputShapeError> {
    Ok(Dataset::from_tables(turbine_table, farm_table)?.filter(criteria))
}

fn ensure_aligned(turbines: usize, farms: usize) -> Result<(), InputShapeError> {
    if turbines == farms {
        Ok(())
    } else {
        Err(InputShapeError::RowCountMismatch { turbines, farms })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use serde_json::{Value, json};
    use wind_map_filter_models::NumericRange;
    use wind_map_site_models::{NO_FARM_ID, SiteAttributes};

    use super::*;

    const COUNTRIES: [&str; 3] = ["Germany", "Denmark", "Spain"];
    const LAND_COVERS: [&str; 2] = ["Cropland", "Grassland"];
    const CONTINENTS: [&str; 1] = ["Europe"];
    const LANDFORMS: [&str; 2] = ["Plains", "Hills"];
    const SHAPES: [&str; 2] = ["Cluster", "Line"];

    /// Deterministic, varied sites so every predicate is exercised.
    fn sample_site(row: usize) -> SiteAttributes {
        #[allow(clippy::cast_precision_loss)]
        let n = row as f64;
        SiteAttributes {
            country: Some(COUNTRIES[row % 3].to_string()),
            land_cover: Some(LAND_COVERS[row % 2].to_string()),
            continent: Some(CONTINENTS[0].to_string()),
            landform: Some(LANDFORMS[(row / 2) % 2].to_string()),
            shape: (row % 7 != 0).then(|| SHAPES[row % 2].to_string()),
            turbine_count: Some((row % 11) as f64 + 1.0),
            turbine_spacing: Some(100.0 + n * 37.0),
            elevation: Some(n.mul_add(13.0, -46.0)),
        }
    }

    fn sample_dataset(rows: usize) -> Dataset {
        let turbines = (0..rows)
            .map(|row| TurbineRecord {
                id: i64::try_from(row).unwrap() * 10,
                attributes: sample_site(row),
            })
            .collect();
        let farms = (0..rows)
            .map(|row| FarmRecord {
                wf_id: if row % 3 == 0 {
                    NO_FARM_ID
                } else {
                    i64::try_from(row / 3).unwrap()
                },
                attributes: sample_site(row),
            })
            .collect();
        Dataset::from_records(turbines, farms).unwrap()
    }

    fn set(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|v| (*v).to_string()).collect()
    }

    fn permissive() -> FilterCriteria {
        FilterCriteria {
            countries: set(&COUNTRIES),
            land_covers: set(&LAND_COVERS),
            continents: set(&CONTINENTS),
            landforms: set(&LANDFORMS),
            shapes: set(&SHAPES),
            turbine_count_range: NumericRange::new(1.0, 4086.0),
            spacing_range: NumericRange::new(10.0, 13155.0),
            elevation_range: NumericRange::new(-46.0, 4684.0),
        }
    }

    fn narrow() -> FilterCriteria {
        FilterCriteria {
            countries: set(&["Germany", "Spain"]),
            landforms: set(&["Plains"]),
            turbine_count_range: NumericRange::new(2.0, 8.0),
            elevation_range: NumericRange::new(0.0, 900.0),
            ..permissive()
        }
    }

    fn is_subsequence(needle: &[i64], haystack: &[i64]) -> bool {
        let mut rest = haystack.iter();
        needle.iter().all(|id| rest.any(|h| h == id))
    }

    /// Column-oriented tables of `n` identical, fully matching rows.
    fn uniform_tables(
        turbine_ids: Vec<Value>,
        farm_ids: Vec<Value>,
    ) -> (ColumnTable, ColumnTable) {
        let build = |id_column: &str, ids: Vec<Value>| {
            let n = ids.len();
            ColumnTable::new()
                .with_column(id_column, ids)
                .with_column("Country", vec![json!("Germany"); n])
                .with_column("Land Cover", vec![json!("Cropland"); n])
                .with_column("Continent", vec![json!("Europe"); n])
                .with_column("Landform", vec![json!("Plains"); n])
                .with_column("Shape", vec![json!("Cluster"); n])
                .with_column("Number of turbines", vec![json!(12); n])
                .with_column("Turbine Spacing", vec![json!(410.0); n])
                .with_column("Elevation", vec![json!(35); n])
        };
        (build("id", turbine_ids), build("WFid", farm_ids))
    }

    #[test]
    fn results_preserve_row_order() {
        let dataset = sample_dataset(200);
        let outcome = dataset.filter(&narrow());

        let all_turbines: Vec<i64> = dataset.turbines().iter().map(|r| r.id).collect();
        let all_farms: Vec<i64> = dataset.farms().iter().map(|r| r.wf_id).collect();
        assert!(is_subsequence(&outcome.turbine_ids, &all_turbines));
        assert!(is_subsequence(&outcome.farm_ids, &all_farms));
    }

    #[test]
    fn results_are_sound_and_complete() {
        let dataset = sample_dataset(200);
        let criteria = narrow();
        let outcome = dataset.filter(&criteria);

        let expected_turbines: Vec<i64> = dataset
            .turbines()
            .iter()
            .filter(|r| {
                let a = &r.attributes;
                a.country.as_deref().is_some_and(|c| c == "Germany" || c == "Spain")
                    && a.landform.as_deref() == Some("Plains")
                    && a.shape.is_some()
                    && (2.0..=8.0).contains(&a.turbine_count.unwrap())
                    && (0.0..=900.0).contains(&a.elevation.unwrap())
            })
            .map(|r| r.id)
            .collect();

        let expected_farms: Vec<i64> = dataset
            .turbines()
            .iter()
            .zip(dataset.farms())
            .filter(|(turbine, farm)| expected_turbines.contains(&turbine.id) && farm.is_farm())
            .map(|(_, farm)| farm.wf_id)
            .collect();

        assert!(!expected_turbines.is_empty());
        assert!(!expected_farms.is_empty());
        assert_eq!(outcome.turbine_ids, expected_turbines);
        assert_eq!(outcome.farm_ids, expected_farms);
    }

    #[test]
    fn farm_results_never_include_sentinel() {
        let dataset = sample_dataset(120);
        for criteria in [permissive(), narrow()] {
            assert!(!dataset.filter(&criteria).farm_ids.contains(&NO_FARM_ID));
        }
    }

    #[test]
    fn filtering_is_idempotent() {
        let dataset = sample_dataset(150);
        let criteria = narrow();
        assert_eq!(dataset.filter(&criteria), dataset.filter(&criteria));
    }

    #[test]
    fn counts_match_list_lengths() {
        let dataset = sample_dataset(2500);
        let criteria = FilterCriteria {
            spacing_range: NumericRange::UNBOUNDED,
            elevation_range: NumericRange::UNBOUNDED,
            ..permissive()
        };
        let outcome = dataset.filter(&criteria);
        assert_eq!(
            wind_map_filter_models::parse_count(&outcome.turbine_count),
            Some(outcome.turbine_ids.len())
        );
        assert_eq!(
            wind_map_filter_models::parse_count(&outcome.farm_count),
            Some(outcome.farm_ids.len())
        );
        assert!(outcome.turbine_count.contains('.'));
    }

    #[test]
    fn permissive_criteria_keep_every_row_with_values() {
        let dataset = sample_dataset(300);
        let outcome = dataset.filter(&permissive());

        let with_shape = |row: usize| row % 7 != 0;
        let expected_turbines = (0..300).filter(|&row| with_shape(row)).count();
        let expected_farms = (0..300)
            .filter(|&row| with_shape(row) && row % 3 != 0)
            .count();

        assert_eq!(outcome.turbine_ids.len(), expected_turbines);
        assert_eq!(outcome.farm_ids.len(), expected_farms);
    }

    #[test]
    fn permissive_criteria_on_complete_rows_keep_everything() {
        let (turbines, farms) = uniform_tables(
            (0..1500).map(|id| json!(id)).collect(),
            (0..1500).map(|id| json!(if id % 4 == 0 { -1 } else { id })).collect(),
        );
        let dataset = Dataset::from_tables(&turbines, &farms).unwrap();
        let outcome = dataset.filter(&dataset.options().permissive_criteria());

        assert_eq!(outcome.turbine_ids.len(), 1500);
        assert_eq!(outcome.turbine_count, "1.500");
        assert_eq!(outcome.farm_ids.len(), 1125);
        assert_eq!(outcome.farm_count, "1.125");
    }

    #[test]
    fn empty_categorical_selection_matches_nothing() {
        let dataset = sample_dataset(100);
        let criteria = FilterCriteria {
            countries: BTreeSet::new(),
            ..permissive()
        };
        let outcome = dataset.filter(&criteria);
        assert!(outcome.turbine_ids.is_empty());
        assert!(outcome.farm_ids.is_empty());
        assert_eq!(outcome.turbine_count, "0");
        assert_eq!(outcome.farm_count, "0");
    }

    #[test]
    fn zero_turbine_range_matches_nothing() {
        let dataset = sample_dataset(100);
        let criteria = FilterCriteria {
            turbine_count_range: NumericRange::new(0.0, 0.0),
            ..permissive()
        };
        let outcome = dataset.filter(&criteria);
        assert!(outcome.turbine_ids.is_empty());
        assert!(outcome.farm_ids.is_empty());
    }

    #[test]
    fn sentinel_rows_drop_farms_but_keep_turbines() {
        let (turbines, farms) = uniform_tables(
            vec![json!(101), json!(102), json!(103)],
            vec![json!(-1), json!(5), json!(-1)],
        );
        let dataset = Dataset::from_tables(&turbines, &farms).unwrap();
        let outcome = filter_tables(&turbines, &farms, &dataset.options().permissive_criteria())
            .unwrap();

        assert_eq!(outcome.farm_ids, [5]);
        assert_eq!(outcome.turbine_ids, [101, 102, 103]);
        assert_eq!(outcome.farm_count, "1");
        assert_eq!(outcome.turbine_count, "3");
    }

    #[test]
    fn duplicate_ids_are_preserved() {
        let (turbines, farms) = uniform_tables(
            vec![json!(7), json!(7)],
            vec![json!(9), json!(9)],
        );
        let criteria = Dataset::from_tables(&turbines, &farms)
            .unwrap()
            .options()
            .permissive_criteria();
        let outcome = filter_tables(&turbines, &farms, &criteria).unwrap();
        assert_eq!(outcome.turbine_ids, [7, 7]);
        assert_eq!(outcome.farm_ids, [9, 9]);
    }

    #[test]
    fn mismatched_row_counts_fail() {
        let (turbines, _) = uniform_tables(vec![json!(1), json!(2)], Vec::new());
        let (_, farms) = uniform_tables(Vec::new(), vec![json!(1)]);
        assert_eq!(
            filter_tables(&turbines, &farms, &permissive()),
            Err(InputShapeError::RowCountMismatch {
                turbines: 2,
                farms: 1
            })
        );
        assert!(Dataset::from_records(Vec::new(), sample_dataset(1).farms).is_err());
    }

    #[test]
    fn missing_column_fails() {
        let (mut turbines, farms) = uniform_tables(vec![json!(1)], vec![json!(1)]);
        turbines = ColumnTable::from_json_str(
            &serde_json::to_string(&turbines)
                .unwrap()
                .replace("\"Elevation\"", "\"Altitude\""),
        )
        .unwrap();
        assert_eq!(
            filter_tables(&turbines, &farms, &permissive()),
            Err(InputShapeError::MissingColumn {
                column: "Elevation".to_string()
            })
        );
    }

    #[test]
    fn ragged_column_fails() {
        let (turbines, mut farms) =
            uniform_tables(vec![json!(1), json!(2)], vec![json!(1), json!(2)]);
        farms.insert_column("Shape", vec![json!("Cluster")]);
        assert!(matches!(
            filter_tables(&turbines, &farms, &permissive()),
            Err(InputShapeError::LengthMismatch { .. })
        ));
    }
}
