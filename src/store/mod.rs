//! Item store (pure data plus reload).
//!
//! Groups are derived views over the store, never stored themselves.

pub mod item_store;
pub mod reorder;
pub mod selection;

pub use item_store::{Group, ItemStore};
pub use reorder::{move_element, plan_reorder, renumber};
pub use selection::{initial_selection, SelectionChange};
