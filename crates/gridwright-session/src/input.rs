//! Resolved per-frame pointer input.
//!
//! Device polling and hit testing happen outside the session. The host
//! resolves the pointer into a world position, button edges, a UI-capture
//! flag, and the placeable under the pointer, then hands the result over as a
//! [`PointerFrame`].

use crate::id::PlaceableId;
use gridwright_spatial::WorldPos;

/// Pointer state for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerFrame {
    /// Pointer position in world space.
    pub position: WorldPos,
    /// The button went down this frame.
    pub pressed: bool,
    /// The button went up this frame.
    pub released: bool,
    /// The pointer is over UI; world interactions are suppressed.
    pub over_ui: bool,
    /// The placeable under the pointer, if any.
    pub hit: Option<PlaceableId>,
}

impl PointerFrame {
    /// Pointer movement with no button edge.
    pub fn hover(position: impl Into<WorldPos>) -> Self {
        Self {
            position: position.into(),
            ..Self::default()
        }
    }

    /// Button-down at `position`, optionally over a placeable.
    pub fn press(position: impl Into<WorldPos>, hit: Option<PlaceableId>) -> Self {
        Self {
            position: position.into(),
            pressed: true,
            hit,
            ..Self::default()
        }
    }

    /// Button-up at `position`.
    pub fn release(position: impl Into<WorldPos>) -> Self {
        Self {
            position: position.into(),
            released: true,
            ..Self::default()
        }
    }

    /// Mark this frame as captured by UI.
    pub fn over_ui(mut self) -> Self {
        self.over_ui = true;
        self
    }
}
