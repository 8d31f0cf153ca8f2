//! Gridwright Session -- the interactive placement state machine.
//!
//! A [`PlacementSession`] lets a user pick up a placeable object, drag it
//! across the grid while a validity overlay follows it, rotate it, and then
//! either commit the placement or cancel back to the previous state.
//!
//! # Frame Pipeline
//!
//! Each call to [`session::PlacementSession::tick`] processes one frame:
//!
//! 1. **Signals** -- Apply queued edit-mode signals. An edit-end signal while
//!    an object is held forces a cancel before any input is read.
//! 2. **Input** -- Resolve the frame's pointer state into hold, drag, and
//!    release transitions.
//!
//! Confirm, cancel, and rotate are driven directly by the host UI.
//!
//! # Ownership
//!
//! The session never owns world state. The [`board::Board`] (occupancy field
//! plus placeable entities) is passed in by mutable reference for every
//! transition, and the visual indicator and storage collaborators are injected
//! at construction.
//!
//! ```rust,ignore
//! let mut session = PlacementSession::new(GridLayout::unit(), indicator, storage);
//! session.enable_editing();
//! session.begin_hold(&mut board, chair, false);
//! session.rotate(&mut board);
//! if session.confirm(&mut board) == PlacementOutcome::Rejected {
//!     session.cancel(&mut board, false);
//! }
//! ```
//!
//! # Key Types
//!
//! - [`session::PlacementSession`] -- Hold, drag, rotate, confirm, cancel.
//! - [`board::Board`] -- Occupancy field and placeable entities.
//! - [`collaborator::EditIndicator`], [`collaborator::ObjectStorage`] --
//!   Injected collaborator seams.
//! - [`input::PointerFrame`] -- Resolved per-frame pointer input.
//! - [`event::SessionEvent`] -- Notifications buffered for the host.
//! - [`config::SessionConfig`] -- Grid layout and session settings.

pub mod board;
pub mod collaborator;
pub mod config;
pub mod event;
pub mod id;
pub mod input;
pub mod session;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use board::{Board, BoardError, Placeable};
pub use collaborator::{EditIndicator, ObjectStorage};
pub use config::{ConfigError, SessionConfig};
pub use event::{EditSignal, SessionEvent};
pub use id::PlaceableId;
pub use input::PointerFrame;
pub use session::{CancelOutcome, HeldObject, PlacementOutcome, PlacementSession};
