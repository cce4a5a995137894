//! Press-to-drag activation.
//!
//! A press does not start a drag by itself. Mouse and pen pointers activate once
//! they travel past a small distance; touch pointers activate after a hold,
//! and moving too far during the hold hands the gesture back to the page
//! (scrolling).

use crate::config::EngineConfig;
use crate::model::{ItemId, Point};
use std::time::Duration;

/// Input device behind a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    /// Mouse.
    Mouse,
    /// Stylus.
    Pen,
    /// Finger; activates by holding.
    Touch,
}

/// A pointer-down that has not become a drag yet.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingPress {
    /// Pressed item.
    pub item_id: ItemId,
    /// Device that pressed.
    pub kind: PointerKind,
    /// Where the press landed.
    pub origin: Point,
    /// Caller-supplied monotonic timestamp of the press.
    pub pressed_at: Duration,
}

/// Result of checking a pending press against the latest sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationCheck {
    /// Keep waiting for movement or time.
    Waiting,
    /// Start the drag.
    Activate,
    /// Drop the press and let the page handle the gesture.
    Abort,
}

/// Decide whether `press` becomes a drag given the pointer at `pointer` and time `now`.
pub fn check_activation(
    press: &PendingPress,
    pointer: Point,
    now: Duration,
    config: &EngineConfig,
) -> ActivationCheck {
    let travelled = press.origin.distance_to(pointer);

    match press.kind {
        PointerKind::Mouse | PointerKind::Pen => {
            if travelled > config.activation_distance_px {
                ActivationCheck::Activate
            } else {
                ActivationCheck::Waiting
            }
        }
        PointerKind::Touch => {
            if travelled > config.touch_tolerance_px {
                return ActivationCheck::Abort;
            }
            let held = now.saturating_sub(press.pressed_at);
            if held >= Duration::from_millis(config.touch_delay_ms) {
                ActivationCheck::Activate
            } else {
                ActivationCheck::Waiting
            }
        }
    }
}
