//! Keeps a checklist's "All" toggle and its value list consistent.

use std::collections::BTreeSet;

use wind_map_filter_models::{ChecklistState, SelectionTrigger};

/// Reconciles the two halves of a checklist after one of them changed.
///
/// When the values changed, "All" is checked exactly when every option is
/// selected (order does not matter). When the toggle changed, the values
/// become every option or none.
#[must_use]
pub fn sync_checklist(
    trigger: SelectionTrigger,
    state: ChecklistState,
    options: &[String],
) -> ChecklistState {
    match trigger {
        SelectionTrigger::Values => {
            let selected: BTreeSet<&str> = state.selected.iter().map(String::as_str).collect();
            let available: BTreeSet<&str> = options.iter().map(String::as_str).collect();
            ChecklistState {
                all: selected == available,
                selected: state.selected,
            }
        }
        SelectionTrigger::All => ChecklistState {
            selected: if state.all {
                options.to_vec()
            } else {
                Vec::new()
            },
            all: state.all,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_string()).collect()
    }

    #[test]
    fn selecting_every_value_checks_all() {
        let options = strings(&["Denmark", "Germany", "Spain"]);
        let state = ChecklistState {
            selected: strings(&["Spain", "Denmark", "Germany"]),
            all: false,
        };
        let synced = sync_checklist(SelectionTrigger::Values, state, &options);
        assert!(synced.all);
        assert_eq!(synced.selected, ["Spain", "Denmark", "Germany"]);
    }

    #[test]
    fn deselecting_a_value_unchecks_all() {
        let options = strings(&["Denmark", "Germany"]);
        let state = ChecklistState {
            selected: strings(&["Germany"]),
            all: true,
        };
        let synced = sync_checklist(SelectionTrigger::Values, state, &options);
        assert!(!synced.all);
        assert_eq!(synced.selected, ["Germany"]);
    }

    #[test]
    fn toggling_all_selects_or_clears_everything() {
        let options = strings(&["Cluster", "Line"]);

        let on = sync_checklist(
            SelectionTrigger::All,
            ChecklistState {
                selected: Vec::new(),
                all: true,
            },
            &options,
        );
        assert_eq!(on.selected, options);

        let off = sync_checklist(
            SelectionTrigger::All,
            ChecklistState {
                selected: options.clone(),
                all: false,
            },
            &options,
        );
        assert!(off.selected.is_empty());
        assert!(!off.all);
    }
}
