//! Derivation of the selectable control values from loaded records.
//!
//! Most option lists are the sorted distinct values of one table. Shapes
//! are the exception: they keep first-seen order and skip rows without a
//! detected shape.

use std::collections::BTreeSet;

use wind_map_filter_models::{FilterOptions, NumericRange};
use wind_map_site_models::{
    CategoricalAttribute, FarmRecord, NumericAttribute, SiteAttributes, TurbineRecord,
};

/// Builds the option lists and numeric bounds for the dashboard controls.
///
/// Countries, continents and landforms come from the turbine table; land
/// covers and shapes come from the farm table. Numeric bounds span the
/// finite values of both tables.
#[must_use]
pub fn derive_options(turbines: &[TurbineRecord], farms: &[FarmRecord]) -> FilterOptions {
    let turbine_sites = || turbines.iter().map(|r| &r.attributes);
    let farm_sites = || farms.iter().map(|r| &r.attributes);

    let bounds = |attr| {
        turbine_sites()
            .chain(farm_sites())
            .filter_map(|site| site.measure(attr))
            .fold(None, NumericRange::extend)
    };

    let options = FilterOptions {
        countries: sorted_distinct(turbine_sites(), CategoricalAttribute::Country),
        land_covers: sorted_distinct(farm_sites(), CategoricalAttribute::LandCover),
        continents: sorted_distinct(turbine_sites(), CategoricalAttribute::Continent),
        landforms: sorted_distinct(turbine_sites(), CategoricalAttribute::Landform),
        shapes: first_seen_distinct(farm_sites(), CategoricalAttribute::Shape),
        turbine_count: bounds(NumericAttribute::TurbineCount),
        turbine_spacing: bounds(NumericAttribute::TurbineSpacing),
        elevation: bounds(NumericAttribute::Elevation),
    };

    log::debug!(
        "Derived options: {} countries, {} land covers, {} continents, {} landforms, {} shapes",
        options.countries.len(),
        options.land_covers.len(),
        options.continents.len(),
        options.landforms.len(),
        options.shapes.len(),
    );

    options
}

fn sorted_distinct<'a>(
    sites: impl Iterator<Item = &'a SiteAttributes>,
    attribute: CategoricalAttribute,
) -> Vec<String> {
    sites
        .filter_map(|site| site.category(attribute))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

fn first_seen_distinct<'a>(
    sites: impl Iterator<Item = &'a SiteAttributes>,
    attribute: CategoricalAttribute,
) -> Vec<String> {
    let mut seen = BTreeSet::new();
    sites
        .filter_map(|site| site.category(attribute))
        .filter(|value| seen.insert(*value))
        .map(str::to_string)
        .collect()
}
