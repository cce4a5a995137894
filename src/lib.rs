//! Timetable drag-and-drop engine.
//!
//! Reorder and delete saved timetables by pressing, dragging and dropping.
//! The crate is the interaction engine only: the host renders the panel,
//! registers measured rectangles each layout pass, forwards pointer events,
//! and implements the storage and confirmation collaborators.
//!
//! Pure core: `model`, `store` and the engine's resolver, motion constraint and
//! scroll gate are plain functions over data. The only async boundary is the
//! commit's call into [`persistence::Persistence`].

pub mod config;
pub mod engine;
pub mod logging;
pub mod model;
pub mod persistence;
pub mod store;

use config::EngineConfig;
use model::EngineError;
use std::path::PathBuf;

/// Resolve configuration and start file logging.
///
/// # Errors
///
/// Returns [`EngineError::Config`] for unreadable or invalid config and
/// [`EngineError::Logging`] when the subscriber cannot be installed.
pub fn bootstrap(config_path: Option<PathBuf>) -> Result<EngineConfig, EngineError> {
    let config = config::resolve_config(config_path)?;
    logging::init(&config.log_file_path)?;
    tracing::info!(log = %config.log_file_path.display(), "Timetable drag engine ready");
    Ok(config)
}
