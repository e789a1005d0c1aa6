// Copyright (c) 2025 sbksba
//
// This software is licensed under the terms of the MIT License.
// See the LICENSE file in the project root for the full license text.
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use board::kinds::{events_board, events_board_with_confirmed, tasks_board};
use board::{Board, BoardItem, BoardRemote, ConfirmationGate, ExpenseSource};
use common::{Event, Task};
use tracing::{info, warn};

use crate::backend::HttpBackend;
use crate::config::Config;
use crate::background::spawn_change_forwarder;
use crate::notifications::{ChangeFeed, NoticeFeed};

/// The backend seams the server talks through.
pub struct Remotes {
    pub tasks: Arc<dyn BoardRemote<Task>>,
    pub events: Arc<dyn BoardRemote<Event>>,
    pub expenses: Arc<dyn ExpenseSource>,
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub tasks: Arc<Board<Task>>,
    pub events: Arc<Board<Event>>,
    pub expenses: Arc<dyn ExpenseSource>,
    pub notices: Arc<NoticeFeed>,
    pub changes: Arc<ChangeFeed>,
    pub confirmations: Arc<ConfirmationGate>,
    pub confirm_countdown: Duration,
}

/// What the per-board routes need.
#[derive(Clone)]
pub struct BoardState<I: BoardItem> {
    pub board: Arc<Board<I>>,
    pub notices: Arc<NoticeFeed>,
    pub confirmations: Arc<ConfirmationGate>,
    pub confirm_countdown: Duration,
}

impl AppState {
    pub fn new(config: &Config, remotes: Remotes) -> Result<Self> {
        let notices = Arc::new(NoticeFeed::new(config.notice_capacity));

        let events_config = if config.event_confirmed_column {
            events_board_with_confirmed()?
        } else {
            events_board()?
        };

        Ok(Self {
            tasks: Arc::new(Board::new(tasks_board()?, remotes.tasks, notices.clone())),
            events: Arc::new(Board::new(events_config, remotes.events, notices.clone())),
            expenses: remotes.expenses,
            notices,
            changes: Arc::new(ChangeFeed::new(config.change_capacity)),
            confirmations: Arc::new(ConfirmationGate::new()),
            confirm_countdown: config.confirm_countdown,
        })
    }

    /// State wired to the REST backend named in `config`.
    pub fn connect(config: &Config) -> Result<Self> {
        let backend = HttpBackend::new(&config.backend_url, config.request_timeout)?;
        let remotes = Remotes {
            tasks: Arc::new(backend.resource::<Task>("tasks")),
            events: Arc::new(backend.resource::<Event>("events")),
            expenses: Arc::new(backend),
        };
        Self::new(config, remotes)
    }

    /// Initial fetch of both boards. A failure is recorded on the board
    /// (and visible through its load state); it is not retried here.
    pub async fn load_all(&self) {
        match self.tasks.refresh().await {
            Ok(count) => info!("Tasks board ready with {} tasks.", count),
            Err(e) => warn!("Tasks board starts empty: {}", e),
        }
        match self.events.refresh().await {
            Ok(count) => info!("Events board ready with {} events.", count),
            Err(e) => warn!("Events board starts empty: {}", e),
        }
    }

    /// Starts copying both boards' status changes into the change feed.
    pub fn forward_changes(&self) {
        spawn_change_forwarder(self.tasks.subscribe(), self.changes.clone());
        spawn_change_forwarder(self.events.subscribe(), self.changes.clone());
    }

    pub fn board_state<I: BoardItem>(&self, board: Arc<Board<I>>) -> BoardState<I> {
        BoardState {
            board,
            notices: self.notices.clone(),
            confirmations: self.confirmations.clone(),
            confirm_countdown: self.confirm_countdown,
        }
    }
}
