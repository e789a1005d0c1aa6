// Copyright (c) 2025 sbksba
//
// This software is licensed under the terms of the MIT License.
// See the LICENSE file in the project root for the full license text.
use std::collections::HashSet;
use std::fmt::Debug;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::error::{BoardError, BoardResult};

/// One column of a board and the status it stands for.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    pub id: String,
    pub title: String,
    pub color: String,
    pub status: String,
}

impl ColumnSpec {
    pub fn new(id: &str, title: &str, color: &str, status: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            color: color.to_string(),
            status: status.to_string(),
        }
    }
}

/// The fixed set of columns of a board kind.
///
/// The column to status mapping is total and injective: every column carries
/// a status and no two columns share one. Both are checked on construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardConfig {
    kind: String,
    columns: Vec<ColumnSpec>,
    terminal_status: String,
}

impl BoardConfig {
    pub fn new(
        kind: &str,
        columns: Vec<ColumnSpec>,
        terminal_status: &str,
    ) -> BoardResult<Self> {
        if columns.is_empty() {
            return Err(BoardError::InvalidConfig(format!(
                "board {} has no columns",
                kind
            )));
        }

        let mut ids = HashSet::new();
        let mut statuses = HashSet::new();
        for column in &columns {
            if column.id.is_empty() {
                return Err(BoardError::InvalidConfig(format!(
                    "board {} has a column without an id",
                    kind
                )));
            }
            if column.status.is_empty() {
                return Err(BoardError::InvalidConfig(format!(
                    "column {} has no status",
                    column.id
                )));
            }
            if !ids.insert(column.id.as_str()) {
                return Err(BoardError::InvalidConfig(format!(
                    "duplicate column id {}",
                    column.id
                )));
            }
            if !statuses.insert(column.status.as_str()) {
                return Err(BoardError::InvalidConfig(format!(
                    "status {:?} is mapped by more than one column",
                    column.status
                )));
            }
        }

        Ok(Self {
            kind: kind.to_string(),
            columns,
            terminal_status: terminal_status.to_string(),
        })
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    pub fn terminal_status(&self) -> &str {
        &self.terminal_status
    }

    pub fn column(&self, column_id: &str) -> Option<&ColumnSpec> {
        self.columns.iter().find(|column| column.id == column_id)
    }

    /// The status a card takes when dropped into `column_id`.
    pub fn status_for_column(&self, column_id: &str) -> Option<&str> {
        self.column(column_id).map(|column| column.status.as_str())
    }

    /// The column an item with `status` belongs to, if any.
    pub fn column_for_status(&self, status: &str) -> Option<&str> {
        self.columns
            .iter()
            .find(|column| column.status == status)
            .map(|column| column.id.as_str())
    }
}

/// Kind-specific equality filters (priority, assignee, type, ...).
pub trait Selectors<I>:
    Debug + Clone + Default + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static
{
    fn matches(&self, item: &I) -> bool;
}

/// What the board needs to know about an item. Every other field is
/// carried through untouched.
pub trait BoardItem: Debug + Clone + PartialEq + Serialize + Send + Sync + 'static {
    type Selectors: Selectors<Self>;

    fn id(&self) -> &str;

    fn status(&self) -> &str;

    fn set_status(&mut self, status: &str);

    /// The calendar day used for date-range filtering, `None` when missing
    /// or malformed.
    fn date(&self) -> Option<NaiveDate>;

    /// Title or name first, then the secondary fields free-text search looks at.
    fn search_fields(&self) -> Vec<&str>;
}

/// Treats `None` and the literal `"all"` as "no filter".
pub(crate) fn selector_matches(selector: &Option<String>, value: Option<&str>) -> bool {
    match selector.as_deref() {
        None | Some("all") | Some("") => true,
        Some(wanted) => value == Some(wanted),
    }
}
