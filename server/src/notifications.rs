// Copyright (c) 2025 sbksba
//
// This software is licensed under the terms of the MIT License.
// See the LICENSE file in the project root for the full license text.
use std::collections::VecDeque;

use board::notify::log_notice;
use board::{Notice, Notifier, StatusChange};
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::Serialize;

/// An entry as kept by a [`Feed`], with its sequence number.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Stamped<T> {
    pub id: u64,
    pub raised_at: DateTime<Utc>,
    #[serde(flatten)]
    pub entry: T,
}

/// Bounded history; the oldest entries are dropped first.
pub struct Feed<T> {
    capacity: usize,
    inner: Mutex<FeedInner<T>>,
}

struct FeedInner<T> {
    next_id: u64,
    entries: VecDeque<Stamped<T>>,
}

/// Notices shown to the user.
pub type NoticeFeed = Feed<Notice>;

/// Status changes confirmed by the backend, polled by other views.
pub type ChangeFeed = Feed<StatusChange>;

impl<T: Clone> Feed<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            inner: Mutex::new(FeedInner {
                next_id: 1,
                entries: VecDeque::new(),
            }),
        }
    }

    pub fn push(&self, entry: T) -> u64 {
        let mut inner = self.inner.lock();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.entries.push_back(Stamped {
            id,
            raised_at: Utc::now(),
            entry,
        });
        while inner.entries.len() > self.capacity {
            inner.entries.pop_front();
        }
        id
    }

    /// Oldest first.
    pub fn recent(&self) -> Vec<Stamped<T>> {
        self.inner.lock().entries.iter().cloned().collect()
    }

    /// Entries newer than `after`, oldest first.
    pub fn since(&self, after: u64) -> Vec<Stamped<T>> {
        self.inner
            .lock()
            .entries
            .iter()
            .filter(|stamped| stamped.id > after)
            .cloned()
            .collect()
    }
}

impl Notifier for Feed<Notice> {
    fn notify(&self, notice: Notice) {
        log_notice(&notice);
        self.push(notice);
    }
}
