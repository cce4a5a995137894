//! Error types for the drag engine.
//!
//! This module defines the error taxonomy using `thiserror`. Errors compose via `?` and
//! `From` conversions.
//!
//! # Error Hierarchy
//!
//! - [`EngineError`] - Top-level error for setup and collaborator failures
//!   - [`ConfigError`](crate::config::ConfigError) - Config file read/parse/validation
//!   - [`LoggingError`](crate::logging::LoggingError) - Tracing subscriber setup
//!   - [`PersistError`] - Storage collaborator failures
//! - [`TransitionError`] - Invalid drag session transitions
//! - [`CommitError`] - A commit whose persistence call failed
//!
//! # Recovery Strategy
//!
//! Invalid transitions and malformed drop targets are recovered inside the engine: they
//! are logged and become no-ops, never reaching the caller. Only persistence failures
//! surface, as [`CommitError`], so the UI can tell the user. The engine does not retry;
//! the next load reconciles the store with the authoritative source.

use super::identifiers::ItemId;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level error encompassing setup and collaborator failures.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration could not be loaded or failed validation.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// Tracing could not be initialized.
    #[error("Logging error: {0}")]
    Logging(#[from] crate::logging::LoggingError),

    /// The storage collaborator failed.
    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistError),
}

/// Invalid drag session transition.
///
/// Produced internally when a pointer event arrives in a phase that cannot accept
/// it (e.g. a move while idle). The engine logs and ignores these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    /// A gesture was requested while another press or drag is open.
    #[error("A gesture is already in progress")]
    GestureInProgress,

    /// Move, release or cancel arrived with no open gesture.
    #[error("No gesture in progress")]
    NoGesture,

    /// The pressed item is not in the store.
    #[error("Unknown item: {0}")]
    UnknownItem(ItemId),

    /// The item's previous commit has not finished.
    #[error("Item {0} has a commit in flight")]
    CommitInFlight(ItemId),
}

/// Failure reported by the storage collaborator.
#[derive(Debug, Error)]
pub enum PersistError {
    /// The backend refused or could not reach its store.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// The record to delete or update does not exist.
    #[error("Item not found: {0}")]
    NotFound(ItemId),

    /// File-backed storage I/O failure.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// File that failed.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Stored document could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Commit operation that touched persistence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOp {
    /// Position batch update.
    Reorder,
    /// Single-item removal.
    Delete,
}

impl std::fmt::Display for CommitOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommitOp::Reorder => f.write_str("reorder"),
            CommitOp::Delete => f.write_str("delete"),
        }
    }
}

/// A commit whose persistence call failed.
///
/// The store is left at its last confirmed state; the caller should tell the user
/// and reload.
#[derive(Debug, Error)]
#[error("Failed to persist {op}: {source}")]
pub struct CommitError {
    /// Which operation failed.
    pub op: CommitOp,
    /// The collaborator's error.
    #[source]
    pub source: PersistError,
}
