//! The placement state machine.
//!
//! A session is either idle or holding exactly one placeable. While holding,
//! a dragging flag tracks whether pointer movement should move the object.
//! Every move clears the previously drawn overlay block, re-evaluates the
//! footprint, and draws the new block, so the overlay always reflects the
//! current footprint and nothing else.
//!
//! Lifting an already-placed object releases its committed cells from the
//! ground layer so it does not collide with itself. Cancel restores them,
//! confirm commits the new cells instead.

use crate::board::Board;
use crate::collaborator::{EditIndicator, ObjectStorage};
use crate::config::{ConfigError, SessionConfig};
use crate::event::{EditSignal, EventBuffer, SessionEvent};
use crate::id::PlaceableId;
use crate::input::PointerFrame;
use gridwright_spatial::{Cell, Evaluation, GridLayout, PlaceableFootprint, evaluate};
use tracing::{debug, warn};

/// Result of [`PlacementSession::confirm`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementOutcome {
    /// The held object was committed to the ground layer.
    Placed,
    /// The footprint covers blocked cells; the hold is unchanged.
    Rejected,
    /// Nothing was held.
    NoHeldObject,
}

/// Result of [`PlacementSession::cancel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelOutcome {
    /// The object snapped back to its last committed footprint.
    Reverted,
    /// The object was removed from the world and returned to storage.
    Stored,
    /// Nothing was held.
    NoHeldObject,
}

/// The object currently attached to a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeldObject {
    pub id: PlaceableId,
    /// Cell the footprint origin is anchored to.
    pub cell: Cell,
}

/// Drives pickup, drag, rotate, confirm, and cancel for one held object at a
/// time.
#[derive(Debug)]
pub struct PlacementSession<I, S> {
    layout: GridLayout,
    indicator: I,
    storage: S,
    held: Option<HeldObject>,
    editing: bool,
    dragging: bool,
    /// Footprint whose overlay block is currently drawn.
    drawn: Option<PlaceableFootprint>,
    last_evaluation: Option<Evaluation>,
    pending_signals: Vec<EditSignal>,
    events: EventBuffer,
}

impl<I: EditIndicator, S: ObjectStorage> PlacementSession<I, S> {
    pub fn new(layout: GridLayout, indicator: I, storage: S) -> Self {
        Self {
            layout,
            indicator,
            storage,
            held: None,
            editing: false,
            dragging: false,
            drawn: None,
            last_evaluation: None,
            pending_signals: Vec::new(),
            events: EventBuffer::default(),
        }
    }

    /// Build a session from configuration.
    pub fn with_config(config: &SessionConfig, indicator: I, storage: S) -> Result<Self, ConfigError> {
        let mut session = Self::new(config.layout()?, indicator, storage);
        session.events = EventBuffer::new(config.event_capacity);
        session.editing = config.start_editing;
        Ok(session)
    }

    // -- Accessors --

    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    pub fn indicator(&self) -> &I {
        &self.indicator
    }

    pub fn indicator_mut(&mut self) -> &mut I {
        &mut self.indicator
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    pub fn held(&self) -> Option<HeldObject> {
        self.held
    }

    pub fn is_holding(&self) -> bool {
        self.held.is_some()
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Evaluation behind the overlay currently drawn, if any.
    pub fn last_evaluation(&self) -> Option<&Evaluation> {
        self.last_evaluation.as_ref()
    }

    /// Buffered notifications, oldest first.
    pub fn events(&self) -> &EventBuffer {
        &self.events
    }

    /// Take all buffered notifications, oldest first.
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        self.events.drain()
    }

    // -- Edit mode --

    pub fn enable_editing(&mut self) {
        if !self.editing {
            self.editing = true;
            debug!("editing enabled");
            self.events.push(SessionEvent::EditingChanged { enabled: true });
        }
    }

    /// Leave edit mode. A hold in progress is cancelled.
    pub fn disable_editing(&mut self, board: &mut Board) {
        if self.held.is_some() {
            self.cancel(board, false);
        }
        self.dragging = false;
        if self.editing {
            self.editing = false;
            debug!("editing disabled");
            self.events.push(SessionEvent::EditingChanged { enabled: false });
        }
    }

    /// Apply an edit-mode signal immediately.
    pub fn on_edit_signal(&mut self, board: &mut Board, signal: EditSignal) {
        match signal {
            EditSignal::EditStart => self.enable_editing(),
            EditSignal::EditEnd => self.disable_editing(board),
        }
    }

    /// Queue a signal to be applied at the start of the next [`tick`](Self::tick).
    pub fn queue_signal(&mut self, signal: EditSignal) {
        self.pending_signals.push(signal);
    }

    /// Process one frame: queued signals first, then pointer input.
    pub fn tick(&mut self, board: &mut Board, frame: &PointerFrame) {
        for signal in std::mem::take(&mut self.pending_signals) {
            self.on_edit_signal(board, signal);
        }
        self.handle_input(board, frame);
    }

    // -- Input --

    /// Resolve one frame of pointer input. Ignored while not editing.
    pub fn handle_input(&mut self, board: &mut Board, frame: &PointerFrame) {
        if !self.editing {
            return;
        }

        let cell = self.layout.world_to_cell(frame.position);

        if frame.pressed {
            if frame.over_ui {
                return;
            }
            self.dragging = true;

            match frame.hit {
                Some(hit) => {
                    if self.held.map(|h| h.id) != Some(hit) {
                        self.begin_hold(board, hit, true);
                    }
                }
                None => self.drag_to(board, cell),
            }
        }

        if frame.released {
            self.dragging = false;
        }

        if self.dragging {
            self.drag_to(board, cell);
        }
    }

    /// Move the held object so its origin sits on `cell`. No-op if nothing is
    /// held or the object is already there.
    pub fn drag_to(&mut self, board: &mut Board, cell: Cell) {
        let Some(held) = self.held.as_mut() else {
            return;
        };
        if held.cell != cell {
            held.cell = cell;
            self.follow_update(board);
        }
    }

    // -- Transitions --

    /// Attach a placeable to the session, cancelling any other hold first.
    pub fn begin_hold(&mut self, board: &mut Board, id: PlaceableId, start_dragging: bool) {
        if !board.contains(id) {
            warn!(?id, "begin_hold on a placeable that is not on the board");
            return;
        }
        if self.held.map(|h| h.id) == Some(id) {
            self.dragging = start_dragging;
            return;
        }
        if self.held.is_some() {
            self.cancel(board, false);
        }

        let Some(placeable) = board.get_mut(id) else {
            return;
        };
        placeable.start_edit();
        let committed = placeable.committed();
        let origin = placeable.footprint().origin;
        if let Some(committed) = committed {
            board.field.release_block(&committed);
        }

        self.held = Some(HeldObject { id, cell: origin });
        self.dragging = start_dragging;
        self.indicator.open();
        debug!(?id, ?origin, placed = committed.is_some(), "hold started");
        self.events.push(SessionEvent::HoldStarted { id, origin });

        self.follow_update(board);
    }

    /// Redraw the overlay for the held object at its current cell.
    ///
    /// Clears the block drawn by the previous call (not the current
    /// footprint), so calling it twice for the same cell is harmless.
    pub fn follow_update(&mut self, board: &mut Board) {
        let Some(held) = self.held else {
            return;
        };

        self.clear_overlay(board);

        let Some(placeable) = board.get_mut(held.id) else {
            self.drop_vanished(board, held.id);
            return;
        };
        let footprint = placeable.footprint().at(held.cell);
        placeable.set_footprint(footprint);

        let evaluation = evaluate(&footprint, &board.field);
        board
            .field
            .set_overlay_block(footprint.origin, footprint.extent, &evaluation.overlay_tiles());
        self.drawn = Some(footprint);
        self.indicator.set_position(self.layout.cell_to_world(held.cell));

        debug!(
            id = ?held.id,
            origin = ?footprint.origin,
            valid = evaluation.overall_valid,
            "overlay updated"
        );
        self.events.push(SessionEvent::Moved {
            id: held.id,
            origin: footprint.origin,
            valid: evaluation.overall_valid,
        });
        self.last_evaluation = Some(evaluation);
    }

    /// Commit the held object if its footprint is valid.
    pub fn confirm(&mut self, board: &mut Board) -> PlacementOutcome {
        let Some(held) = self.held else {
            return PlacementOutcome::NoHeldObject;
        };
        let Some(footprint) = board.get(held.id).map(|p| p.footprint()) else {
            self.drop_vanished(board, held.id);
            return PlacementOutcome::NoHeldObject;
        };

        let evaluation = evaluate(&footprint, &board.field);
        if !evaluation.overall_valid {
            let blocked = evaluation.blocked_cells().count();
            debug!(id = ?held.id, blocked, "confirm rejected");
            self.events.push(SessionEvent::ConfirmRejected {
                id: held.id,
                blocked,
            });
            return PlacementOutcome::Rejected;
        }

        self.clear_overlay(board);
        board.field.commit_block(&footprint);
        if let Some(placeable) = board.get_mut(held.id) {
            placeable.place();
        }

        self.end_hold();
        debug!(id = ?held.id, origin = ?footprint.origin, "placed");
        self.events.push(SessionEvent::Placed {
            id: held.id,
            footprint,
        });
        PlacementOutcome::Placed
    }

    /// Drop the held object.
    ///
    /// An object that was never placed, or any object when `keep_object` is
    /// set, leaves the world and is returned to storage. Otherwise it snaps
    /// back to its last committed footprint.
    pub fn cancel(&mut self, board: &mut Board, keep_object: bool) -> CancelOutcome {
        let Some(held) = self.held else {
            return CancelOutcome::NoHeldObject;
        };

        self.clear_overlay(board);

        let committed = board.get(held.id).and_then(|p| p.committed());
        let outcome = match committed {
            Some(committed) if !keep_object => {
                if let Some(placeable) = board.get_mut(held.id) {
                    placeable.end_edit();
                }
                board.field.commit_block(&committed);
                debug!(id = ?held.id, origin = ?committed.origin, "hold reverted");
                self.events.push(SessionEvent::Reverted {
                    id: held.id,
                    footprint: committed,
                });
                CancelOutcome::Reverted
            }
            _ => {
                if let Some(placeable) = board.despawn(held.id) {
                    self.storage.add_object_count(placeable.kind(), 1);
                    debug!(id = ?held.id, kind = placeable.kind(), "returned to storage");
                    self.events.push(SessionEvent::Stored {
                        id: held.id,
                        kind: placeable.kind().to_string(),
                    });
                }
                CancelOutcome::Stored
            }
        };

        self.end_hold();
        outcome
    }

    /// Turn the held object 90 degrees clockwise and redraw its overlay.
    pub fn rotate(&mut self, board: &mut Board) {
        let Some(held) = self.held else {
            return;
        };
        let Some(placeable) = board.get_mut(held.id) else {
            self.drop_vanished(board, held.id);
            return;
        };
        let rotated = placeable.footprint().rotate();
        placeable.set_footprint(rotated);

        debug!(id = ?held.id, degrees = rotated.rotation.degrees(), "rotated");
        self.events.push(SessionEvent::Rotated {
            id: held.id,
            rotation: rotated.rotation,
        });
        self.follow_update(board);
    }

    // -- Internals --

    fn clear_overlay(&mut self, board: &mut Board) {
        if let Some(drawn) = self.drawn.take() {
            board.field.clear_overlay_block(drawn.origin, drawn.extent);
        }
    }

    /// The held entity was despawned behind the session's back.
    fn drop_vanished(&mut self, board: &mut Board, id: PlaceableId) {
        warn!(?id, "held placeable vanished from the board");
        self.clear_overlay(board);
        self.end_hold();
    }

    /// Detach the held object and close the indicator. Every path that ends
    /// a hold goes through here.
    fn end_hold(&mut self) {
        self.held = None;
        self.dragging = false;
        self.drawn = None;
        self.last_evaluation = None;
        self.indicator.close();
    }
}
