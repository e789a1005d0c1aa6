// Copyright (c) 2025 sbksba
//
// This software is licensed under the terms of the MIT License.
// See the LICENSE file in the project root for the full license text.
use parking_lot::RwLock;
use serde::Serialize;

use crate::config::BoardItem;

/// Where the last list fetch stands.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "state", content = "error", rename_all = "camelCase")]
pub enum LoadState {
    Idle,
    Loading,
    Loaded,
    Failed(String),
}

/// The canonical copy of every item of one kind.
///
/// Column maps are derived from this store and thrown away; the store itself
/// is only changed by fetches and confirmed mutations.
#[derive(Debug)]
pub struct ItemStore<I> {
    inner: RwLock<StoreInner<I>>,
}

#[derive(Debug)]
struct StoreInner<I> {
    items: Vec<I>,
    load_state: LoadState,
}

impl<I: BoardItem> Default for ItemStore<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: BoardItem> ItemStore<I> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(StoreInner {
                items: Vec::new(),
                load_state: LoadState::Idle,
            }),
        }
    }

    pub fn items(&self) -> Vec<I> {
        self.inner.read().items.clone()
    }

    pub fn get(&self, id: &str) -> Option<I> {
        self.inner
            .read()
            .items
            .iter()
            .find(|item| item.id() == id)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.inner.read().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn load_state(&self) -> LoadState {
        self.inner.read().load_state.clone()
    }

    pub fn begin_load(&self) {
        self.inner.write().load_state = LoadState::Loading;
    }

    /// Records a failed fetch. The items from the previous load are kept.
    pub fn fail_load(&self, message: impl Into<String>) {
        self.inner.write().load_state = LoadState::Failed(message.into());
    }

    pub fn replace_all(&self, items: Vec<I>) {
        let mut inner = self.inner.write();
        inner.items = items;
        inner.load_state = LoadState::Loaded;
    }

    /// Replaces the item with the same id, or appends it.
    pub fn upsert(&self, item: I) {
        let mut inner = self.inner.write();
        match inner.items.iter_mut().find(|existing| existing.id() == item.id()) {
            Some(existing) => *existing = item,
            None => inner.items.push(item),
        }
    }

    /// Returns whether an item was removed.
    pub fn remove(&self, id: &str) -> bool {
        let mut inner = self.inner.write();
        let before = inner.items.len();
        inner.items.retain(|item| item.id() != id);
        inner.items.len() != before
    }
}
