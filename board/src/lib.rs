// Copyright (c) 2025 sbksba
//
// This software is licensed under the terms of the MIT License.
// See the LICENSE file in the project root for the full license text.
//! Kanban board engine shared by the tasks and events boards.
//!
//! A board derives its columns from a canonical item list and a filter state,
//! and changes an item's status by dropping its card into another column.
//! The drop is applied locally first and undone if the backend refuses it.
pub mod budget;
pub mod config;
pub mod confirm;
pub mod date_range;
pub mod drag;
pub mod engine;
pub mod error;
pub mod filter;
pub mod kinds;
pub mod notify;
pub mod projector;
pub mod remote;
pub mod store;

pub use config::{BoardConfig, BoardItem, ColumnSpec, Selectors};
pub use confirm::{ConfirmationGate, Decision, PendingConfirmation};
pub use date_range::{CustomRange, DateRange, DateRangeFilter};
pub use drag::{DragResult, DragState, DropLocation};
pub use engine::{Board, BoardView, DragOutcome, StatusChange};
pub use error::{BoardError, BoardResult};
pub use filter::FilterState;
pub use kinds::{EventSelectors, TaskSelectors};
pub use notify::{Notice, NoticeLevel, Notifier, TracingNotifier};
pub use projector::{Column, Columns, Projection};
pub use remote::{BoardRemote, ExpenseSource};
pub use store::{ItemStore, LoadState};
