// Copyright (c) 2025 sbksba
//
// This software is licensed under the terms of the MIT License.
// See the LICENSE file in the project root for the full license text.
use std::sync::Arc;
use std::time::Instant;

use board::{ConfirmationGate, StatusChange};
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::JoinHandle;
use tokio::time::{self, Duration};

use crate::notifications::ChangeFeed;

/// Spawns the loop that auto-dismisses confirmation prompts whose countdown
/// has run out.
pub fn spawn_confirmation_sweeper(gate: Arc<ConfirmationGate>, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = time::interval(every);

        // The first tick completes immediately. Skip it to wait for the first interval.
        interval.tick().await;

        loop {
            interval.tick().await; // Wait for the next interval tick

            let expired = gate.expire_due(Instant::now());
            if expired > 0 {
                tracing::info!("Dismissed {} expired confirmation(s).", expired);
            } else {
                tracing::trace!("No confirmation expired.");
            }
        }
    })
}

/// Spawns the task copying a board's confirmed status changes into `feed`,
/// where polling clients pick them up. Ends when the board is dropped.
pub fn spawn_change_forwarder(
    mut changes: broadcast::Receiver<StatusChange>,
    feed: Arc<ChangeFeed>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            match changes.recv().await {
                Ok(change) => {
                    tracing::debug!("{} {} is now {:?}.", change.kind, change.item_id, change.status);
                    feed.push(change);
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!("Change feed lagged, {} status change(s) skipped.", skipped);
                }
                Err(RecvError::Closed) => break,
            }
        }
    })
}
