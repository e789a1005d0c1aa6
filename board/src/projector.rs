// Copyright (c) 2025 sbksba
//
// This software is licensed under the terms of the MIT License.
// See the LICENSE file in the project root for the full license text.
use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use crate::config::{BoardConfig, BoardItem};
use crate::filter::FilterState;

/// A named bucket of items sharing one status.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Column<I> {
    pub id: String,
    pub title: String,
    pub color: String,
    pub items: Vec<I>,
}

/// The column map of a board, in configuration order.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(transparent)]
pub struct Columns<I> {
    columns: Vec<Column<I>>,
}

impl<I> Columns<I> {
    /// One empty column per configured column.
    pub fn empty(config: &BoardConfig) -> Self {
        Self {
            columns: config
                .columns()
                .iter()
                .map(|spec| Column {
                    id: spec.id.clone(),
                    title: spec.title.clone(),
                    color: spec.color.clone(),
                    items: Vec::new(),
                })
                .collect(),
        }
    }

    pub fn get(&self, column_id: &str) -> Option<&Column<I>> {
        self.columns.iter().find(|column| column.id == column_id)
    }

    pub fn get_mut(&mut self, column_id: &str) -> Option<&mut Column<I>> {
        self.columns.iter_mut().find(|column| column.id == column_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Column<I>> {
        self.columns.iter()
    }

    pub fn ids(&self) -> Vec<&str> {
        self.columns.iter().map(|column| column.id.as_str()).collect()
    }

    pub fn item_count(&self) -> usize {
        self.columns.iter().map(|column| column.items.len()).sum()
    }
}

impl<I: BoardItem> Columns<I> {
    /// Id of the column currently holding `item_id`.
    pub fn column_of(&self, item_id: &str) -> Option<&str> {
        self.columns
            .iter()
            .find(|column| column.items.iter().any(|item| item.id() == item_id))
            .map(|column| column.id.as_str())
    }

    /// Removes `item_id` from whichever column holds it.
    pub fn take(&mut self, item_id: &str) -> Option<I> {
        self.columns.iter_mut().find_map(|column| {
            let index = column.items.iter().position(|item| item.id() == item_id)?;
            Some(column.items.remove(index))
        })
    }
}

/// Result of projecting a flat item list onto a board.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Projection<I> {
    pub columns: Columns<I>,
    /// Items that passed the filters but whose status no column maps.
    pub unplaced: usize,
}

/// Partitions `items` into the board's columns after filtering them.
///
/// Every configured column is present in the output, even when empty, and
/// items keep their relative input order inside a column.
pub fn project<I: BoardItem>(
    config: &BoardConfig,
    items: &[I],
    filters: &FilterState<I::Selectors>,
    today: NaiveDate,
) -> Projection<I> {
    let mut columns = Columns::empty(config);
    let mut unplaced = 0;

    for item in items
        .iter()
        .filter(|item| filters.matches(*item, config, today))
    {
        let column = config
            .column_for_status(item.status())
            .and_then(|column_id| columns.get_mut(column_id));

        match column {
            Some(column) => column.items.push(item.clone()),
            None => {
                debug!(
                    "Item {} has status {:?} which no {} column maps.",
                    item.id(),
                    item.status(),
                    config.kind()
                );
                unplaced += 1;
            }
        }
    }

    Projection { columns, unplaced }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date_range::DateRange;
    use crate::kinds::{EventSelectors, TaskSelectors, events_board, tasks_board};
    use common::{Event, Task};

    fn task(id: &str, status: &str, deadline: Option<&str>) -> Task {
        Task {
            id: id.to_string(),
            title: format!("Task {}", id),
            description: None,
            status: status.to_string(),
            priority: None,
            assignee: None,
            deadline: deadline.map(str::to_string),
            event_id: None,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 12).unwrap()
    }

    fn ids<I: BoardItem>(columns: &Columns<I>, column_id: &str) -> Vec<String> {
        columns
            .get(column_id)
            .unwrap()
            .items
            .iter()
            .map(|item| item.id().to_string())
            .collect()
    }

    #[test]
    fn test_empty_input_still_yields_every_column() {
        let config = tasks_board().unwrap();
        let projection = project::<Task>(&config, &[], &FilterState::default(), today());

        assert_eq!(
            projection.columns.ids(),
            vec!["todo", "inProgress", "inReview", "completed"]
        );
        assert!(projection.columns.iter().all(|column| column.items.is_empty()));
        assert_eq!(projection.unplaced, 0);
    }

    #[test]
    fn test_filters_matching_nothing_still_yield_every_column() {
        let config = tasks_board().unwrap();
        let items = vec![task("t1", "To Do", None)];
        let filters = FilterState::<TaskSelectors> {
            search: "no such thing".to_string(),
            ..Default::default()
        };

        let projection = project(&config, &items, &filters, today());
        assert_eq!(projection.columns.ids().len(), 4);
        assert_eq!(projection.columns.item_count(), 0);
    }

    #[test]
    fn test_each_item_lands_in_exactly_its_status_column() {
        let config = tasks_board().unwrap();
        let items = vec![
            task("t1", "To Do", None),
            task("t2", "Completed", None),
            task("t3", "In Review", None),
            task("t4", "To Do", None),
            task("t5", "In Progress", None),
        ];

        let projection = project(&config, &items, &FilterState::default(), today());

        assert_eq!(ids(&projection.columns, "todo"), vec!["t1", "t4"]);
        assert_eq!(ids(&projection.columns, "inProgress"), vec!["t5"]);
        assert_eq!(ids(&projection.columns, "inReview"), vec!["t3"]);
        assert_eq!(ids(&projection.columns, "completed"), vec!["t2"]);
        assert_eq!(projection.columns.item_count(), items.len());
        for item in &items {
            assert_eq!(
                projection.columns.column_of(&item.id),
                config.column_for_status(&item.status)
            );
        }
    }

    #[test]
    fn test_unrecognized_status_is_counted_not_placed() {
        let config = tasks_board().unwrap();
        let items = vec![
            task("t1", "To Do", None),
            task("t2", "Blocked", None),
            task("t3", "to do", None),
        ];

        let projection = project(&config, &items, &FilterState::default(), today());

        assert_eq!(projection.columns.item_count(), 1);
        assert_eq!(projection.unplaced, 2);
        assert_eq!(projection.columns.column_of("t2"), None);
    }

    #[test]
    fn test_date_filter_applies_before_partitioning() {
        let config = tasks_board().unwrap();
        let items = vec![
            task("t1", "To Do", Some("2024-06-11")),
            task("t2", "Completed", Some("2024-06-11")),
            task("t3", "To Do", Some("2024-06-20")),
            task("t4", "To Do", None),
        ];
        let filters = FilterState::<TaskSelectors> {
            date_range: DateRange::Overdue,
            ..Default::default()
        };

        let projection = project(&config, &items, &filters, today());

        assert_eq!(ids(&projection.columns, "todo"), vec!["t1"]);
        assert!(ids(&projection.columns, "completed").is_empty());
    }

    #[test]
    fn test_events_board_projection() {
        let config = events_board().unwrap();
        let items = vec![Event {
            id: "e1".to_string(),
            name: "Launch party".to_string(),
            status: "Cancelled".to_string(),
            date: None,
            event_type: None,
            client: Some("Acme".to_string()),
            location: None,
            budget: None,
        }];
        let filters = FilterState::<EventSelectors> {
            search: "acme".to_string(),
            ..Default::default()
        };

        let projection = project(&config, &items, &filters, today());
        assert_eq!(ids(&projection.columns, "cancelled"), vec!["e1"]);
    }

    #[test]
    fn test_columns_serialize_as_a_list() {
        let config = tasks_board().unwrap();
        let columns = Columns::<Task>::empty(&config);
        let json = serde_json::to_value(&columns).unwrap();
        assert_eq!(json[0]["id"], "todo");
        assert_eq!(json[3]["title"], "Completed");
    }
}
