// Copyright (c) 2025 sbksba
//
// This software is licensed under the terms of the MIT License.
// See the LICENSE file in the project root for the full license text.
//! The two concrete boards: tasks and events.
use chrono::NaiveDate;
use common::{Event, EventStatus, Task, TaskStatus};
use serde::{Deserialize, Serialize};

use crate::config::{BoardConfig, BoardItem, ColumnSpec, Selectors, selector_matches};
use crate::date_range::parse_item_date;
use crate::error::BoardResult;

// Column colors, taken from the same muted palette for both boards.
const BLUE: &str = "#1f77b4";
const ORANGE: &str = "#ff7f0e";
const GREEN: &str = "#2ca02c";
const RED: &str = "#d62728";
const PURPLE: &str = "#9467bd";
const CYAN: &str = "#17becf";

/// Equality filters of the tasks board.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TaskSelectors {
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub assignee: Option<String>,
}

impl Selectors<Task> for TaskSelectors {
    fn matches(&self, task: &Task) -> bool {
        selector_matches(&self.priority, task.priority.as_deref())
            && selector_matches(&self.assignee, task.assignee.as_deref())
    }
}

impl BoardItem for Task {
    type Selectors = TaskSelectors;

    fn id(&self) -> &str {
        &self.id
    }

    fn status(&self) -> &str {
        &self.status
    }

    fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }

    fn date(&self) -> Option<NaiveDate> {
        self.deadline.as_deref().and_then(parse_item_date)
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.title.as_str()];
        fields.extend(self.description.as_deref());
        fields.extend(self.assignee.as_deref());
        fields
    }
}

/// Equality filters of the events board.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EventSelectors {
    #[serde(default, rename = "type")]
    pub event_type: Option<String>,
    #[serde(default)]
    pub client: Option<String>,
}

impl Selectors<Event> for EventSelectors {
    fn matches(&self, event: &Event) -> bool {
        selector_matches(&self.event_type, event.event_type.as_deref())
            && selector_matches(&self.client, event.client.as_deref())
    }
}

impl BoardItem for Event {
    type Selectors = EventSelectors;

    fn id(&self) -> &str {
        &self.id
    }

    fn status(&self) -> &str {
        &self.status
    }

    fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }

    fn date(&self) -> Option<NaiveDate> {
        self.date.as_deref().and_then(parse_item_date)
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str()];
        fields.extend(self.client.as_deref());
        fields.extend(
            self.location
                .as_ref()
                .and_then(|location| location.city.as_deref()),
        );
        fields
    }
}

/// To Do / In Progress / In Review / Completed.
pub fn tasks_board() -> BoardResult<BoardConfig> {
    BoardConfig::new(
        "tasks",
        vec![
            ColumnSpec::new("todo", "To Do", BLUE, TaskStatus::ToDo.as_str()),
            ColumnSpec::new("inProgress", "In Progress", ORANGE, TaskStatus::InProgress.as_str()),
            ColumnSpec::new("inReview", "In Review", PURPLE, TaskStatus::InReview.as_str()),
            ColumnSpec::new("completed", "Completed", GREEN, TaskStatus::Completed.as_str()),
        ],
        TaskStatus::Completed.as_str(),
    )
}

/// Planning / In Progress / Completed / Cancelled.
pub fn events_board() -> BoardResult<BoardConfig> {
    BoardConfig::new("events", event_columns(false), EventStatus::Completed.as_str())
}

/// Same as [`events_board`] with a Confirmed column after Planning.
pub fn events_board_with_confirmed() -> BoardResult<BoardConfig> {
    BoardConfig::new("events", event_columns(true), EventStatus::Completed.as_str())
}

fn event_columns(with_confirmed: bool) -> Vec<ColumnSpec> {
    let mut columns = vec![ColumnSpec::new(
        "planning",
        "Planning",
        BLUE,
        EventStatus::Planning.as_str(),
    )];
    if with_confirmed {
        columns.push(ColumnSpec::new(
            "confirmed",
            "Confirmed",
            CYAN,
            EventStatus::Confirmed.as_str(),
        ));
    }
    columns.extend([
        ColumnSpec::new("inProgress", "In Progress", ORANGE, EventStatus::InProgress.as_str()),
        ColumnSpec::new("completed", "Completed", GREEN, EventStatus::Completed.as_str()),
        ColumnSpec::new("cancelled", "Cancelled", RED, EventStatus::Cancelled.as_str()),
    ]);
    columns
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::Location;

    #[test]
    fn test_builtin_boards_are_valid() {
        let tasks = tasks_board().unwrap();
        assert_eq!(tasks.columns().len(), 4);
        assert_eq!(tasks.status_for_column("inProgress"), Some("In Progress"));

        let events = events_board().unwrap();
        assert_eq!(events.columns().len(), 4);
        assert_eq!(events.column_for_status("Confirmed"), None);

        let confirmed = events_board_with_confirmed().unwrap();
        let ids: Vec<&str> = confirmed.columns().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["planning", "confirmed", "inProgress", "completed", "cancelled"]
        );
    }

    #[test]
    fn test_task_search_fields_and_date() {
        let task = Task {
            id: "t1".to_string(),
            title: "Order flowers".to_string(),
            description: None,
            status: "To Do".to_string(),
            priority: Some("High".to_string()),
            assignee: Some("Sam".to_string()),
            deadline: Some("2024-06-10".to_string()),
            event_id: None,
        };

        assert_eq!(task.search_fields(), vec!["Order flowers", "Sam"]);
        assert_eq!(task.date(), NaiveDate::from_ymd_opt(2024, 6, 10));

        let selectors = TaskSelectors {
            priority: Some("High".to_string()),
            assignee: Some("all".to_string()),
        };
        assert!(selectors.matches(&task));
    }

    #[test]
    fn test_event_search_includes_location_city() {
        let event = Event {
            id: "e1".to_string(),
            name: "Summer gala".to_string(),
            status: "Planning".to_string(),
            date: Some("garbage".to_string()),
            event_type: Some("Gala".to_string()),
            client: Some("Acme".to_string()),
            location: Some(Location {
                city: Some("Nantes".to_string()),
                address: None,
            }),
            budget: Some(1000.0),
        };

        assert_eq!(event.search_fields(), vec!["Summer gala", "Acme", "Nantes"]);
        assert_eq!(event.date(), None);
        assert!(!EventSelectors {
            event_type: Some("Wedding".to_string()),
            client: None,
        }
        .matches(&event));
    }
}
