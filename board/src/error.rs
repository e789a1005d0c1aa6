// Copyright (c) 2025 sbksba
//
// This software is licensed under the terms of the MIT License.
// See the LICENSE file in the project root for the full license text.
use thiserror::Error;

/// Errors that can occur while driving a board.
#[derive(Error, Debug)]
pub enum BoardError {
    #[error("Invalid board configuration: {0}")]
    InvalidConfig(String),

    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    #[error("Item {item_id} not found in column {column_id}")]
    ItemNotFound { item_id: String, column_id: String },

    #[error("Item {0} not found")]
    UnknownItem(String),

    #[error("Unknown confirmation: {0}")]
    UnknownConfirmation(u64),

    #[error("Remote request failed: {0:#}")]
    Remote(#[from] anyhow::Error),
}

pub type BoardResult<T> = Result<T, BoardError>;
