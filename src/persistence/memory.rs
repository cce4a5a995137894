//! In-memory storage backend.

use super::{PersistResult, Persistence};
use crate::model::{DeviceId, Item, ItemId, PersistError};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::Mutex;

/// Records held in a mutex-guarded vector.
///
/// Failure injection switches make the next calls fail with
/// [`PersistError::Unavailable`] so commit error paths can be exercised.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    records: Mutex<Vec<Item>>,
    fail_reorder: AtomicBool,
    fail_delete: AtomicBool,
    reorder_calls: AtomicUsize,
    delete_calls: AtomicUsize,
}

impl MemoryBackend {
    /// Backend seeded with `records`.
    pub fn new(records: Vec<Item>) -> Self {
        Self {
            records: Mutex::new(records),
            ..Self::default()
        }
    }

    /// Make reorder batches fail until switched off.
    pub fn set_fail_reorder(&self, fail: bool) {
        self.fail_reorder.store(fail, Ordering::SeqCst);
    }

    /// Make deletes fail until switched off.
    pub fn set_fail_delete(&self, fail: bool) {
        self.fail_delete.store(fail, Ordering::SeqCst);
    }

    /// Number of reorder batches received, failed ones included.
    pub fn reorder_calls(&self) -> usize {
        self.reorder_calls.load(Ordering::SeqCst)
    }

    /// Number of deletes received, failed ones included.
    pub fn delete_calls(&self) -> usize {
        self.delete_calls.load(Ordering::SeqCst)
    }

    /// Copy of every stored record.
    pub async fn snapshot(&self) -> Vec<Item> {
        self.records.lock().await.clone()
    }
}

#[async_trait]
impl Persistence for MemoryBackend {
    async fn load_items(&self, owner: &DeviceId) -> PersistResult<Vec<Item>> {
        let guard = self.records.lock().await;
        let mut items: Vec<Item> = guard
            .iter()
            .filter(|item| &item.owner == owner)
            .cloned()
            .collect();
        items.sort_by(|a, b| {
            a.position
                .cmp(&b.position)
                .then_with(|| b.last_modified.cmp(&a.last_modified))
        });
        Ok(items)
    }

    async fn persist_reorder(&self, items: &[Item]) -> PersistResult<()> {
        self.reorder_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_reorder.load(Ordering::SeqCst) {
            return Err(PersistError::Unavailable("reorder rejected".to_string()));
        }

        let mut guard = self.records.lock().await;
        for item in items {
            match guard.iter_mut().find(|existing| existing.id == item.id) {
                Some(existing) => *existing = item.clone(),
                None => guard.push(item.clone()),
            }
        }
        Ok(())
    }

    async fn persist_delete(&self, id: &ItemId) -> PersistResult<()> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(PersistError::Unavailable("delete rejected".to_string()));
        }

        let mut guard = self.records.lock().await;
        let before = guard.len();
        guard.retain(|item| &item.id != id);
        if guard.len() == before {
            return Err(PersistError::NotFound(id.clone()));
        }
        Ok(())
    }
}
