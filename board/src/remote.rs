// Copyright (c) 2025 sbksba
//
// This software is licensed under the terms of the MIT License.
// See the LICENSE file in the project root for the full license text.
use anyhow::Result;
use async_trait::async_trait;
use common::Expense;

/// The backend operations a board needs for one item kind.
#[async_trait]
pub trait BoardRemote<I>: Send + Sync {
    /// Fetches every item of the kind.
    async fn fetch_all(&self) -> Result<Vec<I>>;

    /// Updates only the status of item `id` and returns the stored record.
    async fn update_status(&self, id: &str, status: &str) -> Result<I>;

    async fn delete(&self, id: &str) -> Result<()>;
}

/// Read access to the expenses booked against events.
#[async_trait]
pub trait ExpenseSource: Send + Sync {
    async fn expenses_for_event(&self, event_id: &str) -> Result<Vec<Expense>>;
}
