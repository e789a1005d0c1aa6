// Copyright (c) 2025 sbksba
//
// This software is licensed under the terms of the MIT License.
// See the LICENSE file in the project root for the full license text.
//! Drop handling on a column map: deciding what a drop means and applying it.
//!
//! This module only mutates local column state. The remote round trip and the
//! rollback live in [`crate::engine::Board::handle_drop`].
use serde::{Deserialize, Serialize};

use crate::config::{BoardConfig, BoardItem};
use crate::error::{BoardError, BoardResult};
use crate::projector::Columns;

/// A position on the board.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DropLocation {
    pub column_id: String,
    pub index: usize,
}

/// What the drag-and-drop layer reports once a card is released.
/// `destination` is `None` when the card was dropped outside every column.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DragResult {
    pub item_id: String,
    pub source: DropLocation,
    #[serde(default)]
    pub destination: Option<DropLocation>,
}

/// Lifecycle of a single drop.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum DragState {
    Idle,
    OptimisticallyApplied,
    Committed,
    RolledBack,
}

/// What a drop turns into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropPlan {
    /// Nothing to do: no destination, or same column and same index.
    NoOp,
    /// Same column, different index. Local only, the status does not change.
    Reorder,
    /// Different column. The item takes `status` and the backend is told.
    Move { status: String },
}

/// Decides what `drag` means without touching any state.
pub fn plan_drop<I>(
    config: &BoardConfig,
    columns: &Columns<I>,
    drag: &DragResult,
) -> BoardResult<DropPlan> {
    let Some(destination) = &drag.destination else {
        return Ok(DropPlan::NoOp);
    };

    if columns.get(&drag.source.column_id).is_none() {
        return Err(BoardError::UnknownColumn(drag.source.column_id.clone()));
    }

    if drag.source.column_id == destination.column_id {
        if drag.source.index == destination.index {
            return Ok(DropPlan::NoOp);
        }
        return Ok(DropPlan::Reorder);
    }

    let status = config
        .status_for_column(&destination.column_id)
        .ok_or_else(|| BoardError::UnknownColumn(destination.column_id.clone()))?;

    Ok(DropPlan::Move {
        status: status.to_string(),
    })
}

/// Applies `plan` to `columns` in place.
///
/// The item is taken from `source.index` when the id there matches, and looked
/// up by id otherwise. The insertion index is clamped to the destination length.
/// On error `columns` is left untouched.
pub fn apply_drop<I: BoardItem>(
    columns: &mut Columns<I>,
    drag: &DragResult,
    plan: &DropPlan,
) -> BoardResult<()> {
    let destination = match (plan, &drag.destination) {
        (DropPlan::NoOp, _) | (_, None) => return Ok(()),
        (_, Some(destination)) => destination,
    };

    if columns.get(&destination.column_id).is_none() {
        return Err(BoardError::UnknownColumn(destination.column_id.clone()));
    }

    let source = columns
        .get_mut(&drag.source.column_id)
        .ok_or_else(|| BoardError::UnknownColumn(drag.source.column_id.clone()))?;

    let position = match source.items.get(drag.source.index) {
        Some(item) if item.id() == drag.item_id => Some(drag.source.index),
        _ => source.items.iter().position(|item| item.id() == drag.item_id),
    }
    .ok_or_else(|| BoardError::ItemNotFound {
        item_id: drag.item_id.clone(),
        column_id: drag.source.column_id.clone(),
    })?;

    let mut item = source.items.remove(position);
    if let DropPlan::Move { status } = plan {
        item.set_status(status);
    }

    // Checked above.
    if let Some(target) = columns.get_mut(&destination.column_id) {
        let index = destination.index.min(target.items.len());
        target.items.insert(index, item);
    }

    Ok(())
}
