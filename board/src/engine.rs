// Copyright (c) 2025 sbksba
//
// This software is licensed under the terms of the MIT License.
// See the LICENSE file in the project root for the full license text.
//! The generic board: canonical store, derived columns and the optimistic
//! status update that ties them to the backend.
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::NaiveDate;
use parking_lot::Mutex;
use serde::Serialize;
use tokio::sync::broadcast;
use tracing::{debug, error, info, warn};

use crate::config::{BoardConfig, BoardItem};
use crate::date_range::today_local;
use crate::drag::{DragResult, DragState, DropPlan, apply_drop, plan_drop};
use crate::error::{BoardError, BoardResult};
use crate::filter::FilterState;
use crate::notify::{Notice, Notifier};
use crate::projector::{Columns, project};
use crate::remote::BoardRemote;
use crate::store::{ItemStore, LoadState};

const SYNC_CHANNEL_CAPACITY: usize = 64;

/// Broadcast after a status change was confirmed by the backend, so other
/// views showing the same item can follow without a re-fetch.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StatusChange {
    pub kind: String,
    pub item_id: String,
    pub status: String,
}

/// How a drop ended.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum DragOutcome<I> {
    /// Dropped outside any column, or back where it came from.
    Ignored,
    /// Reordered inside its column. Nothing was sent to the backend.
    Reordered,
    /// The backend accepted the new status.
    Committed { item: I },
    /// The backend refused; the columns were restored.
    RolledBack { error: String },
}

impl<I> DragOutcome<I> {
    pub fn state(&self) -> DragState {
        match self {
            DragOutcome::Ignored => DragState::Idle,
            DragOutcome::Reordered | DragOutcome::Committed { .. } => DragState::Committed,
            DragOutcome::RolledBack { .. } => DragState::RolledBack,
        }
    }
}

/// What a client needs to render the board.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BoardView<I: BoardItem> {
    pub kind: String,
    pub columns: Columns<I>,
    pub unplaced: usize,
    pub load_state: LoadState,
    pub filters: FilterState<I::Selectors>,
    pub in_flight: usize,
}

struct ViewState<I: BoardItem> {
    filters: FilterState<I::Selectors>,
    columns: Columns<I>,
    unplaced: usize,
    // Optimistic drops waiting on the backend. The columns are re-derived
    // from the store once this drops back to zero.
    in_flight: usize,
}

/// Where a moved item was before an optimistic drop, to put it back.
struct Revert<I> {
    item: I,
    column_id: String,
    index: usize,
}

/// One board kind wired to its backend.
pub struct Board<I: BoardItem> {
    config: BoardConfig,
    store: ItemStore<I>,
    remote: Arc<dyn BoardRemote<I>>,
    notifier: Arc<dyn Notifier>,
    view: Mutex<ViewState<I>>,
    sync: broadcast::Sender<StatusChange>,
    clock: fn() -> NaiveDate,
    mounted: AtomicBool,
}

impl<I: BoardItem> Board<I> {
    pub fn new(
        config: BoardConfig,
        remote: Arc<dyn BoardRemote<I>>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let (sync, _) = broadcast::channel(SYNC_CHANNEL_CAPACITY);
        let columns = Columns::empty(&config);
        Self {
            config,
            store: ItemStore::new(),
            remote,
            notifier,
            view: Mutex::new(ViewState {
                filters: FilterState::default(),
                columns,
                unplaced: 0,
                in_flight: 0,
            }),
            sync,
            clock: today_local,
            mounted: AtomicBool::new(true),
        }
    }

    /// Replaces the source of "today" used by date filters.
    pub fn with_clock(mut self, clock: fn() -> NaiveDate) -> Self {
        self.clock = clock;
        self
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn store(&self) -> &ItemStore<I> {
        &self.store
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StatusChange> {
        self.sync.subscribe()
    }

    pub fn view(&self) -> BoardView<I> {
        let view = self.view.lock();
        BoardView {
            kind: self.config.kind().to_string(),
            columns: view.columns.clone(),
            unplaced: view.unplaced,
            load_state: self.store.load_state(),
            filters: view.filters.clone(),
            in_flight: view.in_flight,
        }
    }

    pub fn columns(&self) -> Columns<I> {
        self.view.lock().columns.clone()
    }

    /// Fetches the whole list again and rebuilds the columns.
    ///
    /// A failure leaves the previous items and columns in place and puts the
    /// store in [`LoadState::Failed`]. Nothing retries on its own.
    pub async fn refresh(&self) -> BoardResult<usize> {
        self.store.begin_load();

        match self.remote.fetch_all().await {
            Ok(items) => {
                let count = items.len();
                self.store.replace_all(items);
                self.rebuild();
                info!("Loaded {} {}.", count, self.config.kind());
                Ok(count)
            }
            Err(err) => {
                error!("Failed to load {}: {:#}", self.config.kind(), err);
                self.store.fail_load(format!("{:#}", err));
                Err(BoardError::Remote(err))
            }
        }
    }

    pub fn set_filters(&self, filters: FilterState<I::Selectors>) {
        let mut view = self.view.lock();
        view.filters = filters;
        self.rebuild_locked(&mut view);
    }

    /// Handles a released card.
    ///
    /// Moves across columns are applied locally first, then sent to the
    /// backend. If the backend refuses, the item goes back to where it was;
    /// other drops still in flight keep their optimistic placement.
    pub async fn handle_drop(&self, drag: &DragResult) -> BoardResult<DragOutcome<I>> {
        let (revert, status) = {
            let mut view = self.view.lock();
            let plan = plan_drop(&self.config, &view.columns, drag)?;

            match &plan {
                DropPlan::NoOp => {
                    debug!("Ignoring drop of {}: nothing moved.", drag.item_id);
                    return Ok(DragOutcome::Ignored);
                }
                DropPlan::Reorder => {
                    apply_drop(&mut view.columns, drag, &plan)?;
                    debug!(
                        "Reordered {} inside {}.",
                        drag.item_id, drag.source.column_id
                    );
                    return Ok(DragOutcome::Reordered);
                }
                DropPlan::Move { status } => {
                    let revert = view.columns.get(&drag.source.column_id).and_then(|column| {
                        let index = column
                            .items
                            .iter()
                            .position(|item| item.id() == drag.item_id)?;
                        Some(Revert {
                            item: column.items[index].clone(),
                            column_id: column.id.clone(),
                            index,
                        })
                    });
                    apply_drop(&mut view.columns, drag, &plan)?;
                    view.in_flight += 1;
                    (revert, status.clone())
                }
            }
        };

        debug!(
            "Drop of {} is {:?}, sending status {:?}.",
            drag.item_id,
            DragState::OptimisticallyApplied,
            status
        );

        match self.remote.update_status(&drag.item_id, &status).await {
            Ok(updated) => {
                self.store.upsert(updated.clone());
                self.settle(None);

                // No subscriber is not an error.
                let _ = self.sync.send(StatusChange {
                    kind: self.config.kind().to_string(),
                    item_id: drag.item_id.clone(),
                    status: status.clone(),
                });

                info!("Moved {} to {:?}.", drag.item_id, status);
                self.notifier
                    .notify(Notice::success(format!("Status updated to {}", status)));
                Ok(DragOutcome::Committed { item: updated })
            }
            Err(err) => {
                warn!(
                    "Status update of {} failed, rolling back: {:#}",
                    drag.item_id, err
                );
                self.settle(revert);
                self.notifier.notify(Notice::error(format!(
                    "Could not update status: {:#}",
                    err
                )));
                Ok(DragOutcome::RolledBack {
                    error: format!("{:#}", err),
                })
            }
        }
    }

    /// Deletes an item on the backend, then drops it locally.
    pub async fn delete_item(&self, id: &str) -> BoardResult<()> {
        if self.store.get(id).is_none() {
            return Err(BoardError::UnknownItem(id.to_string()));
        }

        if let Err(err) = self.remote.delete(id).await {
            error!("Failed to delete {}: {:#}", id, err);
            self.notifier
                .notify(Notice::error(format!("Could not delete item: {:#}", err)));
            return Err(BoardError::Remote(err));
        }

        self.store.remove(id);
        self.rebuild();
        info!("Deleted {} from {}.", id, self.config.kind());
        self.notifier.notify(Notice::success("Item deleted"));
        Ok(())
    }

    /// Detaches the columns: drops settling afterwards no longer touch them.
    pub fn unmount(&self) {
        self.mounted.store(false, Ordering::Release);
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.load(Ordering::Acquire)
    }

    fn settle(&self, rollback: Option<Revert<I>>) {
        let mut view = self.view.lock();
        view.in_flight = view.in_flight.saturating_sub(1);

        if !self.is_mounted() {
            debug!("Board {} is unmounted, discarding drop result.", self.config.kind());
            return;
        }

        if let Some(revert) = rollback {
            view.columns.take(revert.item.id());
            if let Some(column) = view.columns.get_mut(&revert.column_id) {
                let index = revert.index.min(column.items.len());
                column.items.insert(index, revert.item);
            }
        }

        if view.in_flight == 0 {
            self.reproject(&mut view);
        }
    }

    fn rebuild(&self) {
        let mut view = self.view.lock();
        self.rebuild_locked(&mut view);
    }

    fn rebuild_locked(&self, view: &mut ViewState<I>) {
        if view.in_flight > 0 {
            debug!(
                "Deferring {} rebuild, {} drop(s) in flight.",
                self.config.kind(),
                view.in_flight
            );
            return;
        }
        self.reproject(view);
    }

    fn reproject(&self, view: &mut ViewState<I>) {
        let items = self.store.items();
        let projection = project(&self.config, &items, &view.filters, (self.clock)());
        view.columns = projection.columns;
        view.unplaced = projection.unplaced;
    }
}
