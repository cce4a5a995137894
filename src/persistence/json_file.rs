//! JSON file storage backend.
//!
//! All records live in one JSON document. Every write goes to a sibling temp
//! file that is then renamed over the original, so a reorder batch lands
//! entirely or not at all.

use super::{PersistResult, Persistence};
use crate::model::{DeviceId, Item, ItemId, PersistError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::debug;

const DOCUMENT_VERSION: u32 = 1;

/// On-disk document shape.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredDocument {
    version: u32,
    items: Vec<Item>,
}

/// Records persisted to a single JSON file.
#[derive(Debug)]
pub struct JsonFileBackend {
    path: PathBuf,
    // Serializes read-modify-write cycles.
    write_lock: Mutex<()>,
}

impl JsonFileBackend {
    /// Backend over the document at `path`. The file is created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Location of the document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> PersistError {
        PersistError::Io {
            path: self.path.clone(),
            source,
        }
    }

    async fn read_document(&self) -> PersistResult<StoredDocument> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(StoredDocument {
                version: DOCUMENT_VERSION,
                items: Vec::new(),
            }),
            Err(e) => Err(self.io_error(e)),
        }
    }

    async fn write_document(&self, document: &StoredDocument) -> PersistResult<()> {
        let bytes = serde_json::to_vec_pretty(document)?;
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| self.io_error(e))?;
            }
        }
        tokio::fs::write(&tmp, bytes)
            .await
            .map_err(|e| self.io_error(e))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| self.io_error(e))?;
        debug!(path = ?self.path, records = document.items.len(), "Wrote timetable document");
        Ok(())
    }
}

#[async_trait]
impl Persistence for JsonFileBackend {
    async fn load_items(&self, owner: &DeviceId) -> PersistResult<Vec<Item>> {
        let document = self.read_document().await?;
        let mut items: Vec<Item> = document
            .items
            .into_iter()
            .filter(|item| &item.owner == owner)
            .collect();
        items.sort_by(|a, b| {
            a.position
                .cmp(&b.position)
                .then_with(|| b.last_modified.cmp(&a.last_modified))
        });
        Ok(items)
    }

    async fn persist_reorder(&self, items: &[Item]) -> PersistResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut document = self.read_document().await?;
        for item in items {
            match document.items.iter_mut().find(|existing| existing.id == item.id) {
                Some(existing) => *existing = item.clone(),
                None => document.items.push(item.clone()),
            }
        }
        document.version = DOCUMENT_VERSION;
        self.write_document(&document).await
    }

    async fn persist_delete(&self, id: &ItemId) -> PersistResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut document = self.read_document().await?;
        let before = document.items.len();
        document.items.retain(|item| &item.id != id);
        if document.items.len() == before {
            return Err(PersistError::NotFound(id.clone()));
        }
        self.write_document(&document).await
    }
}
