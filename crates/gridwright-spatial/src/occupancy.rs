//! Two-layer occupancy field: ground truth and validity overlay.
//!
//! The ground layer records which cells are buildable (`Empty`) and which are
//! blocked, either by terrain or by committed placements. The overlay layer is
//! a scratch visualization rewritten every time a held object moves; it is
//! never consulted when deciding validity.

use crate::{Cell, Extent, PlaceableFootprint};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Classification of a single tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TileClass {
    /// Passable ground, or a blank overlay tile.
    #[default]
    Empty,
    /// Overlay marker: the held object may occupy this cell.
    Possible,
    /// Overlay marker for a blocked cell; on the ground layer, an occupied or
    /// unbuildable cell.
    Impossible,
}

/// Ground and overlay tiles keyed by cell.
///
/// Cells never painted on the ground layer lie outside the buildable area and
/// classify as [`TileClass::Impossible`]. Overlay cells that were never written
/// (or were cleared) read as [`TileClass::Empty`].
#[derive(Debug, Clone, Default)]
pub struct OccupancyField {
    ground: BTreeMap<Cell, TileClass>,
    overlay: BTreeMap<Cell, TileClass>,
}

impl OccupancyField {
    pub fn new() -> Self {
        Self::default()
    }

    /// A field whose buildable area is the given block, entirely `Empty`.
    pub fn with_empty_area(origin: Cell, extent: Extent) -> Self {
        let mut field = Self::new();
        field.paint_ground(origin, extent, TileClass::Empty);
        field
    }

    // -- Ground layer --

    /// Ground classification of a cell.
    pub fn classify(&self, cell: Cell) -> TileClass {
        self.ground
            .get(&cell)
            .copied()
            .unwrap_or(TileClass::Impossible)
    }

    /// Paint a block of ground tiles with a single class.
    pub fn paint_ground(&mut self, origin: Cell, extent: Extent, class: TileClass) {
        for cell in extent.cells_from(origin) {
            self.ground.insert(cell, class);
        }
    }

    /// Paint one ground tile.
    pub fn paint_cell(&mut self, cell: Cell, class: TileClass) {
        self.ground.insert(cell, class);
    }

    /// Mark every cell of a committed placement as occupied.
    pub fn commit_block(&mut self, footprint: &PlaceableFootprint) {
        for cell in footprint.cells_covered() {
            self.ground.insert(cell, TileClass::Impossible);
        }
    }

    /// Return every cell of a lifted or removed placement to `Empty`.
    pub fn release_block(&mut self, footprint: &PlaceableFootprint) {
        for cell in footprint.cells_covered() {
            self.ground.insert(cell, TileClass::Empty);
        }
    }

    /// Iterate over painted ground tiles in row-major order.
    pub fn ground_tiles(&self) -> impl Iterator<Item = (Cell, TileClass)> + '_ {
        self.ground.iter().map(|(&cell, &class)| (cell, class))
    }

    // -- Overlay layer --

    /// Write a block of overlay tiles.
    ///
    /// `tiles` is consumed in the block's row-major order and must hold
    /// exactly one entry per cell.
    ///
    /// # Panics
    ///
    /// Panics if `tiles.len()` differs from the block volume.
    pub fn set_overlay_block(&mut self, origin: Cell, extent: Extent, tiles: &[TileClass]) {
        assert_eq!(
            tiles.len(),
            extent.volume(),
            "overlay block at {origin:?} has {} cells but {} tiles were supplied",
            extent.volume(),
            tiles.len()
        );
        for (cell, &class) in extent.cells_from(origin).zip(tiles) {
            self.write_overlay(cell, class);
        }
    }

    /// Reset a block of overlay tiles to `Empty`.
    pub fn clear_overlay_block(&mut self, origin: Cell, extent: Extent) {
        for cell in extent.cells_from(origin) {
            self.overlay.remove(&cell);
        }
    }

    /// Overlay classification of a cell.
    pub fn overlay(&self, cell: Cell) -> TileClass {
        self.overlay.get(&cell).copied().unwrap_or_default()
    }

    /// Iterate over non-empty overlay tiles in row-major order.
    pub fn overlay_tiles(&self) -> impl Iterator<Item = (Cell, TileClass)> + '_ {
        self.overlay.iter().map(|(&cell, &class)| (cell, class))
    }

    /// Whether no overlay tile is currently drawn.
    pub fn overlay_is_clear(&self) -> bool {
        self.overlay.is_empty()
    }

    fn write_overlay(&mut self, cell: Cell, class: TileClass) {
        match class {
            TileClass::Empty => {
                self.overlay.remove(&cell);
            }
            other => {
                self.overlay.insert(cell, other);
            }
        }
    }
}
