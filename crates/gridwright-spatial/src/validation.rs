//! Footprint validity against the ground layer.

use crate::occupancy::{OccupancyField, TileClass};
use crate::{Cell, PlaceableFootprint};
use tracing::trace;

/// Validity of one covered cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellVerdict {
    pub cell: Cell,
    pub valid: bool,
}

impl CellVerdict {
    /// The overlay tile that visualizes this verdict.
    pub fn overlay_class(&self) -> TileClass {
        if self.valid {
            TileClass::Possible
        } else {
            TileClass::Impossible
        }
    }
}

/// Result of testing a footprint against an occupancy field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    /// One verdict per covered cell, in the footprint's row-major order.
    pub cells: Vec<CellVerdict>,
    /// True iff every covered cell is valid.
    pub overall_valid: bool,
}

impl Evaluation {
    /// Overlay tiles in block order, ready for
    /// [`OccupancyField::set_overlay_block`].
    pub fn overlay_tiles(&self) -> Vec<TileClass> {
        self.cells.iter().map(CellVerdict::overlay_class).collect()
    }

    /// Cells that block the placement.
    pub fn blocked_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells.iter().filter(|v| !v.valid).map(|v| v.cell)
    }
}

/// Test every cell of `footprint` against the ground layer of `field`.
///
/// All cells are classified even after an invalid one is found, since the
/// overlay has to show every cell's state.
pub fn evaluate(footprint: &PlaceableFootprint, field: &OccupancyField) -> Evaluation {
    let mut overall_valid = true;
    let cells: Vec<CellVerdict> = footprint
        .cells_covered()
        .map(|cell| {
            let valid = field.classify(cell) == TileClass::Empty;
            trace!(?cell, valid, "cell classified");
            overall_valid &= valid;
            CellVerdict { cell, valid }
        })
        .collect();

    Evaluation {
        cells,
        overall_valid,
    }
}
