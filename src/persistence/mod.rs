//! Storage and confirmation collaborators.
//!
//! The engine never talks to a database itself. It consumes these traits, which the
//! host implements against its real backend. Two backends ship with the crate:
//! an in-memory one for tests and embedding, and a JSON file.

use crate::model::{DeviceId, Item, ItemId, PersistError};
use async_trait::async_trait;

pub mod json_file;
pub mod memory;

pub use json_file::JsonFileBackend;
pub use memory::MemoryBackend;

/// Common result type for persistence calls.
pub type PersistResult<T> = Result<T, PersistError>;

/// Durable storage of saved timetables.
///
/// All operations are async; the commit handler awaits them before the store
/// changes.
#[async_trait]
pub trait Persistence: Send + Sync {
    /// Every record owned by `owner`.
    async fn load_items(&self, owner: &DeviceId) -> PersistResult<Vec<Item>>;

    /// Upsert position/timestamp changes for one group as a single batch.
    async fn persist_reorder(&self, items: &[Item]) -> PersistResult<()>;

    /// Remove one record.
    async fn persist_delete(&self, id: &ItemId) -> PersistResult<()>;
}

/// User confirmation for destructive actions.
pub trait Confirm {
    /// Ask the user; `true` means proceed.
    fn confirm_destructive(&self, message: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm_destructive(&self, message: &str) -> bool {
        self(message)
    }
}

/// Confirmation that always answers the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoConfirm(pub bool);

impl Confirm for AutoConfirm {
    fn confirm_destructive(&self, _message: &str) -> bool {
        self.0
    }
}
