// Copyright (c) 2025 sbksba
//
// This software is licensed under the terms of the MIT License.
// See the LICENSE file in the project root for the full license text.
use serde::{Deserialize, Serialize};

/// Represents a task as returned by the backend.
///
/// `status`, `priority` and `deadline` are kept exactly as the backend sent
/// them. Unknown statuses and malformed dates must survive deserialization so
/// the board can decide what to do with them instead of rejecting the whole list.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,

    pub title: String,

    #[serde(default)]
    pub description: Option<String>,

    pub status: String,

    #[serde(default)]
    pub priority: Option<String>, // (e.g., "Low", "Medium", "High")

    #[serde(default)]
    pub assignee: Option<String>,

    // Either a plain day ("2024-06-10") or a full RFC 3339 timestamp.
    #[serde(default)]
    pub deadline: Option<String>,

    #[serde(default)]
    pub event_id: Option<String>,
}

/// Where an event takes place.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    #[serde(default)]
    pub city: Option<String>,

    #[serde(default)]
    pub address: Option<String>,
}

/// Represents an event as returned by the backend.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,

    pub name: String,

    pub status: String,

    #[serde(default)]
    pub date: Option<String>,

    #[serde(default, rename = "type")]
    pub event_type: Option<String>,

    #[serde(default)]
    pub client: Option<String>,

    #[serde(default)]
    pub location: Option<Location>,

    // Budget snapshot, carried through unchanged by the board.
    #[serde(default)]
    pub budget: Option<f64>,
}

/// A single expense booked against an event.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: String,

    pub event_id: String,

    pub category: String,

    pub amount: f64,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub date: Option<String>,

    #[serde(default)]
    pub receipt_url: Option<String>,
}

/// Body of the status update request. Only the status travels,
/// never the full record.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct StatusUpdatePayload {
    pub status: String,
}

/// The statuses a task can be in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskStatus {
    ToDo,
    InProgress,
    InReview,
    Completed,
}

impl TaskStatus {
    /// The status string the backend uses.
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::ToDo => "To Do",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::InReview => "In Review",
            TaskStatus::Completed => "Completed",
        }
    }
}

/// The statuses an event can be in. `Confirmed` only shows up on boards
/// configured with a confirmation column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventStatus {
    Planning,
    Confirmed,
    InProgress,
    Completed,
    Cancelled,
}

impl EventStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Planning => "Planning",
            EventStatus::Confirmed => "Confirmed",
            EventStatus::InProgress => "In Progress",
            EventStatus::Completed => "Completed",
            EventStatus::Cancelled => "Cancelled",
        }
    }
}
