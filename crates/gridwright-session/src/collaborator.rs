//! Collaborator seams injected into a [`PlacementSession`](crate::PlacementSession).
//!
//! The session drives these but never implements them: the host supplies a
//! visual indicator that follows the held object and a storage panel that
//! receives objects returned from the world.

use gridwright_spatial::WorldPos;

/// A UI element that follows the held object (e.g. a radial edit menu).
pub trait EditIndicator {
    /// Show the indicator when a hold begins.
    fn open(&mut self);
    /// Hide the indicator when the hold ends.
    fn close(&mut self);
    /// Move the indicator to the held object's anchor (origin cell center).
    fn set_position(&mut self, position: WorldPos);
}

/// Inventory that receives objects returned from the world.
pub trait ObjectStorage {
    fn add_object_count(&mut self, kind: &str, amount: u32);
}

impl<T: EditIndicator + ?Sized> EditIndicator for Box<T> {
    fn open(&mut self) {
        (**self).open();
    }

    fn close(&mut self) {
        (**self).close();
    }

    fn set_position(&mut self, position: WorldPos) {
        (**self).set_position(position);
    }
}

impl<T: ObjectStorage + ?Sized> ObjectStorage for Box<T> {
    fn add_object_count(&mut self, kind: &str, amount: u32) {
        (**self).add_object_count(kind, amount);
    }
}
