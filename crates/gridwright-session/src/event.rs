//! Edit-mode signals and session notifications.
//!
//! Signals flow in: the host's event bus tells the session when edit mode
//! starts and ends. Notifications flow out: every transition pushes a
//! [`SessionEvent`] into a pre-allocated [`EventBuffer`] that the host drains
//! once per frame. When the buffer is full the oldest events are dropped.

use crate::id::PlaceableId;
use gridwright_spatial::{Cell, PlaceableFootprint, Rotation};

// ---------------------------------------------------------------------------
// Signals
// ---------------------------------------------------------------------------

/// Edit-mode signal from the host's event bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditSignal {
    EditStart,
    EditEnd,
}

// ---------------------------------------------------------------------------
// Event types
// ---------------------------------------------------------------------------

/// A notification emitted by a session transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    EditingChanged {
        enabled: bool,
    },
    HoldStarted {
        id: PlaceableId,
        origin: Cell,
    },
    /// The overlay was redrawn for a new footprint position.
    Moved {
        id: PlaceableId,
        origin: Cell,
        valid: bool,
    },
    Rotated {
        id: PlaceableId,
        rotation: Rotation,
    },
    Placed {
        id: PlaceableId,
        footprint: PlaceableFootprint,
    },
    /// Confirm was refused because the footprint covers blocked cells.
    ConfirmRejected {
        id: PlaceableId,
        blocked: usize,
    },
    /// The held object snapped back to its last committed footprint.
    Reverted {
        id: PlaceableId,
        footprint: PlaceableFootprint,
    },
    /// The held object left the world and went back to storage.
    Stored {
        id: PlaceableId,
        kind: String,
    },
}

// ---------------------------------------------------------------------------
// EventBuffer: pre-allocated ring buffer
// ---------------------------------------------------------------------------

/// A pre-allocated ring buffer for events. Fixed capacity; when full, the
/// oldest events are dropped.
#[derive(Debug)]
pub struct EventBuffer {
    /// Pre-allocated storage.
    events: Vec<Option<SessionEvent>>,
    /// Write position (wraps around).
    head: usize,
    /// Number of events currently stored (may be less than capacity).
    len: usize,
    /// Total events ever written (including dropped).
    total_written: u64,
    /// Events overwritten before anyone read them.
    dropped: u64,
}

impl EventBuffer {
    /// Create a new ring buffer with the given capacity.
    /// A capacity of 0 is clamped to 1.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            events: (0..capacity).map(|_| None).collect(),
            head: 0,
            len: 0,
            total_written: 0,
            dropped: 0,
        }
    }

    /// Push an event into the ring buffer. If full, the oldest event is dropped.
    pub fn push(&mut self, event: SessionEvent) {
        self.events[self.head] = Some(event);
        self.head = (self.head + 1) % self.capacity();
        if self.len < self.capacity() {
            self.len += 1;
        } else {
            self.dropped += 1;
        }
        self.total_written += 1;
    }

    /// The total capacity of the buffer.
    pub fn capacity(&self) -> usize {
        self.events.len()
    }

    /// Number of events currently stored.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Total events written since creation (including dropped).
    pub fn total_written(&self) -> u64 {
        self.total_written
    }

    /// Number of events that were dropped because the buffer was full.
    pub fn dropped_count(&self) -> u64 {
        self.dropped
    }

    /// Iterate over events in order from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &SessionEvent> {
        let start = self.oldest_index();
        (0..self.len).filter_map(move |offset| {
            self.events[(start + offset) % self.capacity()].as_ref()
        })
    }

    /// Remove and return all stored events, oldest first.
    pub fn drain(&mut self) -> Vec<SessionEvent> {
        let start = self.oldest_index();
        let capacity = self.capacity();
        let drained = (0..self.len)
            .filter_map(|offset| self.events[(start + offset) % capacity].take())
            .collect();
        self.head = 0;
        self.len = 0;
        drained
    }

    /// Clear all events from the buffer.
    pub fn clear(&mut self) {
        for slot in &mut self.events {
            *slot = None;
        }
        self.head = 0;
        self.len = 0;
    }

    fn oldest_index(&self) -> usize {
        if self.len < self.capacity() {
            0
        } else {
            // head points to the next write position, which is the oldest entry
            self.head
        }
    }
}

impl Default for EventBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_CAPACITY)
    }
}

/// Capacity used when no configuration overrides it.
pub const DEFAULT_EVENT_CAPACITY: usize = 256;

#[cfg(test)]
mod tests {
    use super::*;

    fn editing(enabled: bool) -> SessionEvent {
        SessionEvent::EditingChanged { enabled }
    }

    #[test]
    fn push_and_iter_in_order() {
        let mut buf = EventBuffer::new(4);
        buf.push(editing(true));
        buf.push(editing(false));

        let events: Vec<_> = buf.iter().cloned().collect();
        assert_eq!(events, vec![editing(true), editing(false)]);
        assert_eq!(buf.len(), 2);
        assert_eq!(buf.dropped_count(), 0);
    }

    #[test]
    fn full_buffer_drops_oldest() {
        let mut buf = EventBuffer::new(2);
        buf.push(editing(true));
        buf.push(editing(false));
        buf.push(editing(true));

        assert_eq!(buf.len(), 2);
        assert_eq!(buf.total_written(), 3);
        assert_eq!(buf.dropped_count(), 1);
        let events: Vec<_> = buf.iter().cloned().collect();
        assert_eq!(events, vec![editing(false), editing(true)]);
    }

    #[test]
    fn drain_empties_and_preserves_order_after_wrap() {
        let mut buf = EventBuffer::new(3);
        for i in 0..5 {
            buf.push(editing(i % 2 == 0));
        }
        let drained = buf.drain();
        assert_eq!(drained, vec![editing(true), editing(false), editing(true)]);
        assert!(buf.is_empty());
        assert!(buf.drain().is_empty());

        buf.push(editing(false));
        assert_eq!(buf.drain(), vec![editing(false)]);
    }

    #[test]
    fn drained_events_are_not_counted_as_dropped() {
        let mut buf = EventBuffer::new(2);
        buf.push(editing(true));
        buf.push(editing(false));
        buf.drain();
        buf.push(editing(true));
        buf.push(editing(false));
        assert_eq!(buf.dropped_count(), 0);
        assert_eq!(buf.total_written(), 4);

        buf.push(editing(true));
        assert_eq!(buf.dropped_count(), 1);
        assert_eq!(buf.drain(), vec![editing(false), editing(true)]);
    }

    #[test]
    fn zero_capacity_clamped() {
        let mut buf = EventBuffer::new(0);
        assert_eq!(buf.capacity(), 1);
        buf.push(editing(true));
        buf.push(editing(false));
        assert_eq!(buf.drain(), vec![editing(false)]);
    }

    #[test]
    fn clear_resets() {
        let mut buf = EventBuffer::default();
        buf.push(editing(true));
        buf.clear();
        assert!(buf.is_empty());
        assert_eq!(buf.iter().count(), 0);
        assert_eq!(buf.total_written(), 1);
    }
}
