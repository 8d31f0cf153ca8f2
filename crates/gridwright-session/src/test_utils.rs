//! Shared test helpers for unit and integration tests.
//!
//! Gated behind `#[cfg(any(test, feature = "test-utils"))]` so these helpers
//! are available in unit tests and in integration tests (via the
//! `test-utils` feature).

use crate::board::Board;
use crate::collaborator::{EditIndicator, ObjectStorage};
use crate::session::PlacementSession;
use gridwright_spatial::{Cell, Extent, GridLayout, OccupancyField, PlaceableFootprint, WorldPos};
use std::collections::BTreeMap;

// ===========================================================================
// Recording collaborators
// ===========================================================================

/// An indicator that records every call it receives.
#[derive(Debug, Default)]
pub struct RecordingIndicator {
    open: bool,
    pub opened: u32,
    pub closed: u32,
    pub positions: Vec<WorldPos>,
}

impl RecordingIndicator {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn last_position(&self) -> Option<WorldPos> {
        self.positions.last().copied()
    }
}

impl EditIndicator for RecordingIndicator {
    fn open(&mut self) {
        self.open = true;
        self.opened += 1;
    }

    fn close(&mut self) {
        self.open = false;
        self.closed += 1;
    }

    fn set_position(&mut self, position: WorldPos) {
        self.positions.push(position);
    }
}

/// A storage panel that tallies returned objects per kind.
#[derive(Debug, Default)]
pub struct CountingStorage {
    pub counts: BTreeMap<String, u32>,
}

impl CountingStorage {
    pub fn count(&self, kind: &str) -> u32 {
        self.counts.get(kind).copied().unwrap_or(0)
    }
}

impl ObjectStorage for CountingStorage {
    fn add_object_count(&mut self, kind: &str, amount: u32) {
        *self.counts.entry(kind.to_string()).or_insert(0) += amount;
    }
}

pub type TestSession = PlacementSession<RecordingIndicator, CountingStorage>;

// ===========================================================================
// Builders
// ===========================================================================

/// A session on a unit grid with editing already enabled and no buffered
/// events.
pub fn make_session() -> TestSession {
    let mut session = PlacementSession::new(
        GridLayout::unit(),
        RecordingIndicator::default(),
        CountingStorage::default(),
    );
    session.enable_editing();
    session.drain_events();
    session
}

/// A board whose buildable area is `width` x `height` cells from the origin.
pub fn empty_board(width: u32, height: u32) -> Board {
    Board::new(OccupancyField::with_empty_area(
        Cell::flat(0, 0),
        Extent::flat(width, height),
    ))
}

/// A 3x3 all-empty board.
pub fn board_3x3() -> Board {
    empty_board(3, 3)
}

/// A flat footprint at `(x, y)` with the given width and height.
pub fn footprint(x: i32, y: i32, width: u32, height: u32) -> PlaceableFootprint {
    PlaceableFootprint::new(Cell::flat(x, y), Extent::flat(width, height))
}

/// World position of a cell's center on the unit grid.
pub fn center(x: i32, y: i32) -> WorldPos {
    GridLayout::unit().cell_to_world(Cell::flat(x, y))
}
