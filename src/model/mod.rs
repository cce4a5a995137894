//! Domain model types (pure).
//!
//! All types in this module are pure data with smart constructors.

pub mod error;
pub mod geometry;
pub mod identifiers;
pub mod item;

// Re-export for convenience
pub use error::{CommitError, CommitOp, EngineError, PersistError, TransitionError};
pub use geometry::{Point, Rect, Transform};
pub use identifiers::{DeviceId, GroupKey, InvalidDeviceId, InvalidGroupKey, InvalidItemId, ItemId};
pub use item::{DropTarget, Item};
