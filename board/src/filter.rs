// Copyright (c) 2025 sbksba
//
// This software is licensed under the terms of the MIT License.
// See the LICENSE file in the project root for the full license text.
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::{BoardConfig, BoardItem, Selectors};
use crate::date_range::{CustomRange, DateRange, DateRangeFilter};

/// Everything the user can narrow a board down by.
///
/// `custom_range` is only looked at when `date_range` is
/// [`DateRange::Custom`].
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(
    rename_all = "camelCase",
    default,
    bound(deserialize = "S: Deserialize<'de> + Default")
)]
pub struct FilterState<S> {
    pub search: String,
    pub date_range: DateRange,
    pub custom_range: Option<CustomRange>,
    pub selectors: S,
}

impl<S> FilterState<S> {
    pub fn date_filter(&self) -> DateRangeFilter {
        let custom = match self.date_range {
            DateRange::Custom => self.custom_range,
            _ => None,
        };
        DateRangeFilter::new(self.date_range, custom)
    }

    /// Applies the filters in order: selectors, then date range, then search.
    pub fn matches<I>(&self, item: &I, config: &BoardConfig, today: NaiveDate) -> bool
    where
        I: BoardItem<Selectors = S>,
        S: Selectors<I>,
    {
        if !self.selectors.matches(item) {
            return false;
        }

        let completed = item.status() == config.terminal_status();
        if !self.date_filter().matches(item.date(), completed, today) {
            return false;
        }

        matches_search(&self.search, item)
    }
}

/// Case-insensitive substring match against the item's search fields.
/// An empty query matches everything.
pub fn matches_search<I: BoardItem>(query: &str, item: &I) -> bool {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return true;
    }

    item.search_fields()
        .iter()
        .any(|field| field.to_lowercase().contains(&query))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kinds::{TaskSelectors, tasks_board};
    use common::Task;

    fn task(id: &str, title: &str, status: &str, deadline: Option<&str>) -> Task {
        Task {
            id: id.to_string(),
            title: title.to_string(),
            description: None,
            status: status.to_string(),
            priority: Some("Low".to_string()),
            assignee: Some("Robin".to_string()),
            deadline: deadline.map(str::to_string),
            event_id: None,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 12).unwrap()
    }

    #[test]
    fn test_search_is_case_insensitive_over_secondary_fields() {
        let item = task("t1", "Book Caterer", "To Do", None);
        assert!(matches_search("caterer", &item));
        assert!(matches_search("ROBIN", &item));
        assert!(matches_search("   ", &item));
        assert!(!matches_search("venue", &item));
    }

    #[test]
    fn test_every_stage_must_pass() {
        let config = tasks_board().unwrap();
        let item = task("t1", "Book caterer", "To Do", Some("2024-06-12"));

        let mut filters = FilterState::<TaskSelectors> {
            date_range: DateRange::Today,
            search: "book".to_string(),
            ..Default::default()
        };
        assert!(filters.matches(&item, &config, today()));

        filters.selectors.priority = Some("High".to_string());
        assert!(!filters.matches(&item, &config, today()));

        filters.selectors.priority = None;
        filters.date_range = DateRange::Tomorrow;
        assert!(!filters.matches(&item, &config, today()));

        filters.date_range = DateRange::Today;
        filters.search = "venue".to_string();
        assert!(!filters.matches(&item, &config, today()));
    }

    #[test]
    fn test_overdue_uses_terminal_status_of_the_board() {
        let config = tasks_board().unwrap();
        let filters = FilterState::<TaskSelectors> {
            date_range: DateRange::Overdue,
            ..Default::default()
        };

        let open = task("t1", "Late", "To Do", Some("2024-06-11"));
        let done = task("t2", "Late", "Completed", Some("2024-06-11"));
        assert!(filters.matches(&open, &config, today()));
        assert!(!filters.matches(&done, &config, today()));
    }

    #[test]
    fn test_custom_range_ignored_unless_selected() {
        let filters = FilterState::<TaskSelectors> {
            date_range: DateRange::All,
            custom_range: Some(CustomRange {
                start: NaiveDate::from_ymd_opt(2020, 1, 1),
                end: NaiveDate::from_ymd_opt(2020, 1, 2),
            }),
            ..Default::default()
        };
        assert_eq!(filters.date_filter().custom, None);
    }

    #[test]
    fn test_deserializes_partial_json() {
        let filters: FilterState<TaskSelectors> = serde_json::from_str(
            r#"{"dateRange":"custom","customRange":{"start":"2024-06-01","end":"2024-06-30"},"selectors":{"assignee":"Robin"}}"#,
        )
        .unwrap();

        assert_eq!(filters.search, "");
        assert_eq!(filters.date_range, DateRange::Custom);
        assert_eq!(filters.selectors.assignee.as_deref(), Some("Robin"));
    }
}
