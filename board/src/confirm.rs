// Copyright (c) 2025 sbksba
//
// This software is licensed under the terms of the MIT License.
// See the LICENSE file in the project root for the full license text.
//! Yes/no prompts guarding destructive actions.
//!
//! A prompt is `Pending` until it is confirmed, cancelled, or its countdown
//! runs out. The requester simply awaits [`PendingConfirmation::decision`].
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use serde::Serialize;
use tokio::sync::oneshot;
use tracing::{debug, info};

use crate::error::{BoardError, BoardResult};

pub type ConfirmationId = u64;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum Decision {
    Confirmed,
    Cancelled,
    /// The countdown elapsed before anyone answered.
    Expired,
}

impl Decision {
    pub fn is_confirmed(&self) -> bool {
        matches!(self, Decision::Confirmed)
    }
}

/// An open prompt as shown to the user.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PromptInfo {
    pub id: ConfirmationId,
    pub prompt: String,
    pub remaining_secs: u64,
}

struct Entry {
    prompt: String,
    // `None` when the countdown does not fit in an `Instant`: never expires.
    deadline: Option<Instant>,
    reply: oneshot::Sender<Decision>,
}

/// Handle held by whoever asked for confirmation.
#[derive(Debug)]
pub struct PendingConfirmation {
    id: ConfirmationId,
    prompt: String,
    reply: oneshot::Receiver<Decision>,
}

impl PendingConfirmation {
    pub fn id(&self) -> ConfirmationId {
        self.id
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Waits for the answer. A gate dropped with the prompt still open
    /// counts as a cancellation.
    pub async fn decision(self) -> Decision {
        self.reply.await.unwrap_or(Decision::Cancelled)
    }
}

#[derive(Default)]
pub struct ConfirmationGate {
    next_id: AtomicU64,
    pending: Mutex<HashMap<ConfirmationId, Entry>>,
}

impl ConfirmationGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a prompt that auto-dismisses after `countdown`.
    pub fn request(&self, prompt: impl Into<String>, countdown: Duration) -> PendingConfirmation {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let prompt = prompt.into();
        let (reply, receiver) = oneshot::channel();

        self.pending.lock().insert(
            id,
            Entry {
                prompt: prompt.clone(),
                deadline: Instant::now().checked_add(countdown),
                reply,
            },
        );
        info!("Confirmation {} requested: {}", id, prompt);

        PendingConfirmation {
            id,
            prompt,
            reply: receiver,
        }
    }

    /// Answers prompt `id`. Answering an unknown or already settled prompt
    /// is an error.
    pub fn resolve(&self, id: ConfirmationId, confirm: bool) -> BoardResult<Decision> {
        let entry = self
            .pending
            .lock()
            .remove(&id)
            .ok_or(BoardError::UnknownConfirmation(id))?;

        let decision = if confirm {
            Decision::Confirmed
        } else {
            Decision::Cancelled
        };
        info!("Confirmation {} {:?}.", id, decision);

        // The requester may have gone away; the answer is then simply dropped.
        let _ = entry.reply.send(decision);
        Ok(decision)
    }

    /// Dismisses every prompt whose countdown is over at `now`.
    pub fn expire_due(&self, now: Instant) -> usize {
        let expired: Vec<(ConfirmationId, Entry)> = {
            let mut pending = self.pending.lock();
            let due: Vec<ConfirmationId> = pending
                .iter()
                .filter(|(_, entry)| entry.deadline.is_some_and(|deadline| deadline <= now))
                .map(|(id, _)| *id)
                .collect();
            due.into_iter()
                .filter_map(|id| pending.remove(&id).map(|entry| (id, entry)))
                .collect()
        };

        for (id, entry) in &expired {
            debug!("Confirmation {} expired: {}", id, entry.prompt);
        }
        let count = expired.len();
        for (_, entry) in expired {
            let _ = entry.reply.send(Decision::Expired);
        }
        count
    }

    /// Open prompts, oldest first.
    pub fn pending(&self, now: Instant) -> Vec<PromptInfo> {
        let mut prompts: Vec<PromptInfo> = self
            .pending
            .lock()
            .iter()
            .map(|(id, entry)| PromptInfo {
                id: *id,
                prompt: entry.prompt.clone(),
                remaining_secs: entry
                    .deadline
                    .map_or(u64::MAX, |deadline| deadline.saturating_duration_since(now).as_secs()),
            })
            .collect();
        prompts.sort_by_key(|prompt| prompt.id);
        prompts
    }
}
