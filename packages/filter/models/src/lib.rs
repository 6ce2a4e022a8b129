#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Filter criteria and result types for the wind map dashboard.
//!
//! [`FilterCriteria`] mirrors the dashboard controls (five multi-selects
//! and three range sliders). [`FilterOutcome`] is what the filter hands
//! back: the matching identifiers plus display-ready counts. Both are
//! serialized as JSON with camelCase field names.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use wind_map_site_models::{
    CategoricalAttribute, FarmRecord, NumericAttribute, SiteAttributes, TurbineRecord,
};

/// An inclusive numeric range, as produced by a range slider.
///
/// Serialized as a two-element array `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct NumericRange {
    /// Lower bound (inclusive).
    pub min: f64,
    /// Upper bound (inclusive).
    pub max: f64,
}

impl NumericRange {
    /// A range admitting every finite value.
    pub const UNBOUNDED: Self = Self::new(f64::NEG_INFINITY, f64::INFINITY);

    /// Creates a range from its bounds.
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Whether `value` lies within `[min, max]`.
    ///
    /// `NaN` is never contained. An inverted range contains nothing.
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }

    /// Like [`Self::contains`], treating a missing value as outside.
    #[must_use]
    pub fn contains_value(&self, value: Option<f64>) -> bool {
        value.is_some_and(|v| self.contains(v))
    }

    /// Grows the range so it includes `value`. Non-finite values are ignored.
    #[must_use]
    pub fn extend(range: Option<Self>, value: f64) -> Option<Self> {
        if !value.is_finite() {
            return range;
        }
        Some(range.map_or_else(
            || Self::new(value, value),
            |r| Self::new(r.min.min(value), r.max.max(value)),
        ))
    }
}

impl From<[f64; 2]> for NumericRange {
    fn from([min, max]: [f64; 2]) -> Self {
        Self::new(min, max)
    }
}

impl From<NumericRange> for [f64; 2] {
    fn from(range: NumericRange) -> Self {
        [range.min, range.max]
    }
}

/// The current set of user-selected filter constraints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    /// Allowed `Country` values.
    pub countries: BTreeSet<String>,
    /// Allowed `Land Cover` values.
    pub land_covers: BTreeSet<String>,
    /// Allowed `Continent` values.
    pub continents: BTreeSet<String>,
    /// Allowed `Landform` values.
    pub landforms: BTreeSet<String>,
    /// Allowed `Shape` values.
    pub shapes: BTreeSet<String>,
    /// Allowed `Number of turbines` range.
    pub turbine_count_range: NumericRange,
    /// Allowed `Turbine Spacing` range.
    pub spacing_range: NumericRange,
    /// Allowed `Elevation` range.
    pub elevation_range: NumericRange,
}

impl FilterCriteria {
    /// Returns the allowed values for a categorical attribute.
    #[must_use]
    pub const fn allowed(&self, attribute: CategoricalAttribute) -> &BTreeSet<String> {
        match attribute {
            CategoricalAttribute::Country => &self.countries,
            CategoricalAttribute::LandCover => &self.land_covers,
            CategoricalAttribute::Continent => &self.continents,
            CategoricalAttribute::Landform => &self.landforms,
            CategoricalAttribute::Shape => &self.shapes,
        }
    }

    /// Returns the allowed range for a numeric attribute.
    #[must_use]
    pub const fn range(&self, attribute: NumericAttribute) -> NumericRange {
        match attribute {
            NumericAttribute::TurbineCount => self.turbine_count_range,
            NumericAttribute::TurbineSpacing => self.spacing_range,
            NumericAttribute::Elevation => self.elevation_range,
        }
    }

    /// Whether every categorical value is allowed and every numeric value
    /// is within its range.
    ///
    /// A missing value never matches.
    #[must_use]
    pub fn matches(&self, attributes: &SiteAttributes) -> bool {
        CategoricalAttribute::all().iter().all(|&attr| {
            attributes
                .category(attr)
                .is_some_and(|value| self.allowed(attr).contains(value))
        }) && NumericAttribute::all()
            .iter()
            .all(|&attr| self.range(attr).contains_value(attributes.measure(attr)))
    }

    /// Whether a turbine row passes the filter.
    #[must_use]
    pub fn admits_turbine(&self, record: &TurbineRecord) -> bool {
        self.matches(&record.attributes)
    }

    /// Whether a farm row passes the filter.
    ///
    /// Rows without a farm (`WFid == -1`) never pass.
    #[must_use]
    pub fn admits_farm(&self, record: &FarmRecord) -> bool {
        record.is_farm() && self.matches(&record.attributes)
    }
}

/// Matching identifiers and display counts for one filter invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOutcome {
    /// Matching turbine ids in original row order.
    pub turbine_ids: Vec<i64>,
    /// Matching farm ids in original row order.
    pub farm_ids: Vec<i64>,
    /// Number of matching farm rows, formatted by [`format_count`].
    pub farm_count: String,
    /// Number of matching turbine rows, formatted by [`format_count`].
    pub turbine_count: String,
}

impl FilterOutcome {
    /// Builds an outcome from the matching id lists.
    #[must_use]
    pub fn from_ids(turbine_ids: Vec<i64>, farm_ids: Vec<i64>) -> Self {
        Self {
            farm_count: format_count(farm_ids.len()),
            turbine_count: format_count(turbine_ids.len()),
            turbine_ids,
            farm_ids,
        }
    }

    /// The `{"id": [...]}` object consumed by the turbine map layer.
    #[must_use]
    pub fn turbine_payload(&self) -> TurbineIdPayload {
        TurbineIdPayload {
            id: self.turbine_ids.clone(),
        }
    }

    /// The `{"WFid": [...]}` object consumed by the farm map layer.
    #[must_use]
    pub fn farm_payload(&self) -> FarmIdPayload {
        FarmIdPayload {
            wf_id: self.farm_ids.clone(),
        }
    }
}

/// JSON payload listing matched turbine ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurbineIdPayload {
    /// Turbine ids.
    pub id: Vec<i64>,
}

/// JSON payload listing matched farm ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FarmIdPayload {
    /// Farm ids.
    #[serde(rename = "WFid")]
    pub wf_id: Vec<i64>,
}

/// Formats a count with `.` between groups of three digits.
///
/// `1234` becomes `"1.234"`, `42` stays `"42"`.
#[must_use]
pub fn format_count(count: usize) -> String {
    let digits = count.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

/// Parses a count produced by [`format_count`].
#[must_use]
pub fn parse_count(formatted: &str) -> Option<usize> {
    let digits: String = formatted.chars().filter(|&c| c != '.').collect();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Selectable values for every control, derived from the loaded tables.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    /// Selectable countries.
    pub countries: Vec<String>,
    /// Selectable land cover classes.
    pub land_covers: Vec<String>,
    /// Selectable continents.
    pub continents: Vec<String>,
    /// Selectable landform classes.
    pub landforms: Vec<String>,
    /// Selectable farm shapes.
    pub shapes: Vec<String>,
    /// Observed `Number of turbines` bounds.
    pub turbine_count: Option<NumericRange>,
    /// Observed `Turbine Spacing` bounds.
    pub turbine_spacing: Option<NumericRange>,
    /// Observed `Elevation` bounds.
    pub elevation: Option<NumericRange>,
}

impl FilterOptions {
    /// Returns the selectable values for a categorical attribute.
    #[must_use]
    pub fn values(&self, attribute: CategoricalAttribute) -> &[String] {
        match attribute {
            CategoricalAttribute::Country => &self.countries,
            CategoricalAttribute::LandCover => &self.land_covers,
            CategoricalAttribute::Continent => &self.continents,
            CategoricalAttribute::Landform => &self.landforms,
            CategoricalAttribute::Shape => &self.shapes,
        }
    }

    /// Returns the observed bounds of a numeric attribute.
    #[must_use]
    pub const fn bounds(&self, attribute: NumericAttribute) -> Option<NumericRange> {
        match attribute {
            NumericAttribute::TurbineCount => self.turbine_count,
            NumericAttribute::TurbineSpacing => self.turbine_spacing,
            NumericAttribute::Elevation => self.elevation,
        }
    }

    /// Criteria with every option selected and every slider at its
    /// observed bounds. Attributes without observations are unbounded.
    #[must_use]
    pub fn permissive_criteria(&self) -> FilterCriteria {
        let set = |attr| self.values(attr).iter().cloned().collect::<BTreeSet<_>>();
        let range = |attr| self.bounds(attr).unwrap_or(NumericRange::UNBOUNDED);

        FilterCriteria {
            countries: set(CategoricalAttribute::Country),
            land_covers: set(CategoricalAttribute::LandCover),
            continents: set(CategoricalAttribute::Continent),
            landforms: set(CategoricalAttribute::Landform),
            shapes: set(CategoricalAttribute::Shape),
            turbine_count_range: range(NumericAttribute::TurbineCount),
            spacing_range: range(NumericAttribute::TurbineSpacing),
            elevation_range: range(NumericAttribute::Elevation),
        }
    }
}

/// Which half of a checklist control changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionTrigger {
    /// The list of individually checked values changed.
    Values,
    /// The "All" toggle changed.
    All,
}

/// The two halves of a checklist control: the checked values and the
/// "All" toggle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistState {
    /// Individually checked values.
    pub selected: Vec<String>,
    /// Whether the "All" toggle is checked.
    pub all: bool,
}

/// A checklist change to reconcile against the available options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistRequest {
    /// The control that changed.
    pub attribute: CategoricalAttribute,
    /// Which half of the control changed.
    pub trigger: SelectionTrigger,
    /// Control state after the change.
    pub state: ChecklistState,
}

/// Dashboard tabs, identified by the tab values the front end reports.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum DashboardTab {
    /// Map view.
    #[serde(rename = "tab-1")]
    #[strum(serialize = "tab-1")]
    Map,
    /// Frequency distribution histograms.
    #[serde(rename = "tab-2")]
    #[strum(serialize = "tab-2")]
    Distribution,
    /// Poster grid of randomly drawn wind farms.
    #[serde(rename = "tab-3")]
    #[strum(serialize = "tab-3")]
    Poster,
}

/// A warning shown to the user after a filter has been applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterNotice {
    /// No turbine matched the filter.
    NoTurbines,
    /// The poster grid has more cells than there are matching farms.
    TooFewFarmsForPoster,
}

impl FilterNotice {
    /// Text shown in the notice popover.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::NoTurbines => "There are no turbines to the applied filters!",
            Self::TooFewFarmsForPoster => "Less wind farms than traces for Poster plot!",
        }
    }
}

/// Inputs needed to decide which [`FilterNotice`] applies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoticeRequest {
    /// Displayed turbine count.
    pub turbine_count: String,
    /// Displayed farm count.
    pub farm_count: String,
    /// Poster grid rows.
    pub plot_rows: u32,
    /// Poster grid columns.
    pub plot_cols: u32,
    /// Currently active tab.
    pub tab: DashboardTab,
}

/// Response body of the notice endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoticeResponse {
    /// Which notice applies, if any.
    pub notice: Option<FilterNotice>,
    /// Notice text, empty when no notice applies.
    pub message: String,
}

impl From<Option<FilterNotice>> for NoticeResponse {
    fn from(notice: Option<FilterNotice>) -> Self {
        Self {
            notice,
            message: notice.map(FilterNotice::message).unwrap_or_default().to_string(),
        }
    }
}
