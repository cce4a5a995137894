//! The drag-interaction engine.
//!
//! Pure pieces (resolver, motion constraint, scroll gate, activation) are free
//! functions; [`DragEngine`] sequences them per pointer sample, [`commit`]
//! applies a finished gesture, and [`DragController`] wires both to the store
//! and collaborators.

pub mod activation;
pub mod collision;
pub mod commit;
pub mod controller;
pub mod events;
pub mod motion;
pub mod scroll_gate;
pub mod session;
pub mod targets;

pub use activation::{check_activation, ActivationCheck, PendingPress, PointerKind};
pub use collision::{detect_collision, resolve_collision, Collision, CollisionInput, CollisionKind};
pub use commit::{commit, CommitOutcome, NoOpReason};
pub use controller::{DragController, GestureOutcome};
pub use events::{handle_pointer_event, CancelReason, PointerEvent};
pub use motion::constrain_to_group;
pub use scroll_gate::scroll_allowed;
pub use session::{
    CommitRequest, DragEngine, DragFrame, DragPhase, DragSession, GroupFrame, Layout, PointerOutcome,
};
pub use targets::{ItemRegion, TargetRegistry, TrashZoneState};
