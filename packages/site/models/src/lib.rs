#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Turbine and wind farm record types.
//!
//! Both datasets describe the same sites with the same attribute columns.
//! A turbine row is keyed by `id`; a farm row is keyed by `WFid`, which
//! uses [`NO_FARM_ID`] for turbines that do not belong to a recognized
//! wind farm.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Column holding the turbine identifier.
pub const TURBINE_ID_COLUMN: &str = "id";

/// Column holding the wind farm identifier.
pub const FARM_ID_COLUMN: &str = "WFid";

/// Sentinel `WFid` marking a standalone turbine with no farm.
pub const NO_FARM_ID: i64 = -1;

/// Categorical site attributes, selectable through multi-select controls.
///
/// The string form of each variant is the exact column name used by the
/// input tables.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum CategoricalAttribute {
    /// Country the site is located in.
    Country,
    /// Land cover class at the site.
    #[serde(rename = "Land Cover")]
    #[strum(serialize = "Land Cover")]
    LandCover,
    /// Continent the site is located in.
    Continent,
    /// Landform class at the site.
    Landform,
    /// Layout shape of the farm.
    Shape,
}

impl CategoricalAttribute {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Country,
            Self::LandCover,
            Self::Continent,
            Self::Landform,
            Self::Shape,
        ]
    }

    /// Name of the table column holding this attribute.
    #[must_use]
    pub const fn column_name(self) -> &'static str {
        match self {
            Self::Country => "Country",
            Self::LandCover => "Land Cover",
            Self::Continent => "Continent",
            Self::Landform => "Landform",
            Self::Shape => "Shape",
        }
    }
}

/// Numeric site attributes, constrained through range sliders.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum NumericAttribute {
    /// Number of turbines in the farm the site belongs to.
    #[serde(rename = "Number of turbines")]
    #[strum(serialize = "Number of turbines")]
    TurbineCount,
    /// Distance between neighbouring turbines.
    #[serde(rename = "Turbine Spacing")]
    #[strum(serialize = "Turbine Spacing")]
    TurbineSpacing,
    /// Elevation above sea level in meters.
    Elevation,
}

impl NumericAttribute {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::TurbineCount, Self::TurbineSpacing, Self::Elevation]
    }

    /// Name of the table column holding this attribute.
    #[must_use]
    pub const fn column_name(self) -> &'static str {
        match self {
            Self::TurbineCount => "Number of turbines",
            Self::TurbineSpacing => "Turbine Spacing",
            Self::Elevation => "Elevation",
        }
    }
}

/// Attribute values shared by turbine and farm rows.
///
/// Values are optional because the source tables contain gaps (e.g. farms
/// without a detected `Shape`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SiteAttributes {
    /// `Country` column.
    #[serde(rename = "Country")]
    pub country: Option<String>,
    /// `Land Cover` column.
    #[serde(rename = "Land Cover")]
    pub land_cover: Option<String>,
    /// `Continent` column.
    #[serde(rename = "Continent")]
    pub continent: Option<String>,
    /// `Landform` column.
    #[serde(rename = "Landform")]
    pub landform: Option<String>,
    /// `Shape` column.
    #[serde(rename = "Shape")]
    pub shape: Option<String>,
    /// `Number of turbines` column.
    #[serde(rename = "Number of turbines")]
    pub turbine_count: Option<f64>,
    /// `Turbine Spacing` column.
    #[serde(rename = "Turbine Spacing")]
    pub turbine_spacing: Option<f64>,
    /// `Elevation` column.
    #[serde(rename = "Elevation")]
    pub elevation: Option<f64>,
}

impl SiteAttributes {
    /// Returns the value of a categorical attribute.
    #[must_use]
    pub fn category(&self, attribute: CategoricalAttribute) -> Option<&str> {
        match attribute {
            CategoricalAttribute::Country => self.country.as_deref(),
            CategoricalAttribute::LandCover => self.land_cover.as_deref(),
            CategoricalAttribute::Continent => self.continent.as_deref(),
            CategoricalAttribute::Landform => self.landform.as_deref(),
            CategoricalAttribute::Shape => self.shape.as_deref(),
        }
    }

    /// Returns the value of a numeric attribute.
    #[must_use]
    pub const fn measure(&self, attribute: NumericAttribute) -> Option<f64> {
        match attribute {
            NumericAttribute::TurbineCount => self.turbine_count,
            NumericAttribute::TurbineSpacing => self.turbine_spacing,
            NumericAttribute::Elevation => self.elevation,
        }
    }

    /// Mutable slot for a categorical attribute.
    pub const fn category_mut(
        &mut self,
        attribute: CategoricalAttribute,
    ) -> &mut Option<String> {
        match attribute {
            CategoricalAttribute::Country => &mut self.country,
            CategoricalAttribute::LandCover => &mut self.land_cover,
            CategoricalAttribute::Continent => &mut self.continent,
            CategoricalAttribute::Landform => &mut self.landform,
            CategoricalAttribute::Shape => &mut self.shape,
        }
    }

    /// Mutable slot for a numeric attribute.
    pub const fn measure_mut(&mut self, attribute: NumericAttribute) -> &mut Option<f64> {
        match attribute {
            NumericAttribute::TurbineCount => &mut self.turbine_count,
            NumericAttribute::TurbineSpacing => &mut self.turbine_spacing,
            NumericAttribute::Elevation => &mut self.elevation,
        }
    }
}

/// A single wind turbine row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurbineRecord {
    /// Row key of the turbine in the origin dataset.
    pub id: i64,
    /// Site attributes.
    #[serde(flatten)]
    pub attributes: SiteAttributes,
}

/// A single wind farm row, positionally aligned with a turbine row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FarmRecord {
    /// Farm identifier, or [`NO_FARM_ID`].
    #[serde(rename = "WFid")]
    pub wf_id: i64,
    /// Site attributes.
    #[serde(flatten)]
    pub attributes: SiteAttributes,
}

impl FarmRecord {
    /// Whether this row belongs to a recognized wind farm.
    #[must_use]
    pub const fn is_farm(&self) -> bool {
        self.wf_id != NO_FARM_ID
    }
}
