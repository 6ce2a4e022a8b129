//! Warnings shown after a filter has been applied.

use wind_map_filter_models::{DashboardTab, FilterNotice, NoticeRequest, parse_count};

/// Picks the notice to display for the current counts and poster layout.
///
/// An empty turbine result always wins. The poster warning only applies on
/// the poster tab, when fewer farms matched than the grid has cells. A farm
/// count that cannot be parsed never triggers it.
#[must_use]
pub fn filter_notice(request: &NoticeRequest) -> Option<FilterNotice> {
    if request.turbine_count == "0" {
        return Some(FilterNotice::NoTurbines);
    }

    if request.tab == DashboardTab::Poster {
        let cells = u64::from(request.plot_rows) * u64::from(request.plot_cols);
        let too_few = parse_count(&request.farm_count)
            .and_then(|farms| u64::try_from(farms).ok())
            .is_some_and(|farms| farms < cells);
        if too_few {
            return Some(FilterNotice::TooFewFarmsForPoster);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(turbines: &str, farms: &str, tab: DashboardTab) -> NoticeRequest {
        NoticeRequest {
            turbine_count: turbines.to_string(),
            farm_count: farms.to_string(),
            plot_rows: 3,
            plot_cols: 3,
            tab,
        }
    }

    #[test]
    fn empty_turbine_result_is_reported_on_every_tab() {
        for tab in [DashboardTab::Map, DashboardTab::Distribution, DashboardTab::Poster] {
            assert_eq!(
                filter_notice(&request("0", "0", tab)),
                Some(FilterNotice::NoTurbines)
            );
        }
    }

    #[test]
    fn poster_needs_a_farm_per_cell() {
        assert_eq!(
            filter_notice(&request("120", "8", DashboardTab::Poster)),
            Some(FilterNotice::TooFewFarmsForPoster)
        );
        assert_eq!(filter_notice(&request("120", "9", DashboardTab::Poster)), None);
        assert_eq!(
            filter_notice(&request("1.200", "1.024", DashboardTab::Poster)),
            None
        );
    }

    #[test]
    fn poster_check_ignored_on_other_tabs() {
        assert_eq!(filter_notice(&request("120", "2", DashboardTab::Map)), None);
    }

    #[test]
    fn unparsable_farm_count_is_ignored() {
        assert_eq!(filter_notice(&request("12", "n/a", DashboardTab::Poster)), None);
    }

    #[test]
    fn notice_text_matches_dashboard() {
        assert_eq!(
            FilterNotice::NoTurbines.message(),
            "There are no turbines to the applied filters!"
        );
    }
}
