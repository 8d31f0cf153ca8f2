//! Spatial grid module for interactive object placement.
//!
//! Provides the coordinate space that maps continuous world positions onto
//! integer grid cells, the rectangular footprint a placeable object covers,
//! a two-layer occupancy field (ground truth plus a validity overlay), and the
//! validator that tests a footprint against that field.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

pub mod occupancy;
pub mod validation;

pub use occupancy::{OccupancyField, TileClass};
pub use validation::{CellVerdict, Evaluation, evaluate};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A discrete address on the 3D grid.
///
/// Cells order by `z`, then `y`, then `x`, so ordered collections of cells
/// enumerate in the same row-major order as [`Extent::cells_from`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// A cell on the `z = 0` plane.
    pub const fn flat(x: i32, y: i32) -> Self {
        Self { x, y, z: 0 }
    }

    /// Return this cell translated by the given deltas. Components saturate
    /// at the edge of the `i32` range.
    pub fn offset(&self, dx: i32, dy: i32, dz: i32) -> Self {
        Self::new(
            self.x.saturating_add(dx),
            self.y.saturating_add(dy),
            self.z.saturating_add(dz),
        )
    }
}

impl Ord for Cell {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.z, self.y, self.x).cmp(&(other.z, other.y, other.x))
    }
}

impl PartialOrd for Cell {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A continuous position in world space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WorldPos {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl WorldPos {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

impl From<[f32; 3]> for WorldPos {
    fn from([x, y, z]: [f32; 3]) -> Self {
        Self { x, y, z }
    }
}

impl From<(f32, f32)> for WorldPos {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y, z: 0.0 }
    }
}

/// Errors from constructing a [`GridLayout`].
#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    #[error("cell size on the {axis} axis must be finite and positive, got {value}")]
    InvalidCellSize { axis: char, value: f32 },
    #[error("grid origin on the {axis} axis must be finite, got {value}")]
    InvalidOrigin { axis: char, value: f32 },
}

// ---------------------------------------------------------------------------
// GridLayout
// ---------------------------------------------------------------------------

/// Converts between world positions and grid cells.
///
/// Cell `(0, 0, 0)` spans `[origin, origin + cell_size)` on every axis.
/// A position lying exactly on a cell boundary belongs to the cell on the
/// positive side of that boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    cell_size: [f32; 3],
    origin: WorldPos,
}

impl GridLayout {
    /// Create a layout with the given cell size and world origin.
    pub fn new(cell_size: [f32; 3], origin: WorldPos) -> Result<Self, LayoutError> {
        for (axis, value) in ['x', 'y', 'z'].into_iter().zip(cell_size) {
            if !value.is_finite() || value <= 0.0 {
                return Err(LayoutError::InvalidCellSize { axis, value });
            }
        }
        for (axis, value) in ['x', 'y', 'z'].into_iter().zip([origin.x, origin.y, origin.z]) {
            if !value.is_finite() {
                return Err(LayoutError::InvalidOrigin { axis, value });
            }
        }
        Ok(Self { cell_size, origin })
    }

    /// Unit cells anchored at the world origin.
    pub fn unit() -> Self {
        Self {
            cell_size: [1.0; 3],
            origin: WorldPos::default(),
        }
    }

    pub fn cell_size(&self) -> [f32; 3] {
        self.cell_size
    }

    pub fn origin(&self) -> WorldPos {
        self.origin
    }

    /// Resolve the cell containing a world position.
    pub fn world_to_cell(&self, pos: WorldPos) -> Cell {
        Cell::new(
            axis_to_cell(pos.x, self.origin.x, self.cell_size[0]),
            axis_to_cell(pos.y, self.origin.y, self.cell_size[1]),
            axis_to_cell(pos.z, self.origin.z, self.cell_size[2]),
        )
    }

    /// World position of a cell's center.
    pub fn cell_to_world(&self, cell: Cell) -> WorldPos {
        let [sx, sy, sz] = self.cell_size;
        WorldPos::new(
            self.origin.x + (cell.x as f32 + 0.5) * sx,
            self.origin.y + (cell.y as f32 + 0.5) * sy,
            self.origin.z + (cell.z as f32 + 0.5) * sz,
        )
    }

    /// World position of a cell's minimum corner.
    pub fn cell_corner(&self, cell: Cell) -> WorldPos {
        let [sx, sy, sz] = self.cell_size;
        WorldPos::new(
            self.origin.x + cell.x as f32 * sx,
            self.origin.y + cell.y as f32 * sy,
            self.origin.z + cell.z as f32 * sz,
        )
    }
}

impl Default for GridLayout {
    fn default() -> Self {
        Self::unit()
    }
}

fn axis_to_cell(value: f32, origin: f32, size: f32) -> i32 {
    ((value - origin) / size).floor() as i32
}

// ---------------------------------------------------------------------------
// Extent & Rotation
// ---------------------------------------------------------------------------

/// The size of a rectangular block of cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Extent {
    pub width: u32,
    pub height: u32,
    pub depth: u32,
}

impl Extent {
    /// Create an extent. Zero components are clamped to 1.
    pub fn new(width: u32, height: u32, depth: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
            depth: depth.max(1),
        }
    }

    /// A single-layer extent (`depth = 1`).
    pub fn flat(width: u32, height: u32) -> Self {
        Self::new(width, height, 1)
    }

    /// A 1x1x1 extent.
    pub fn single() -> Self {
        Self::new(1, 1, 1)
    }

    /// Number of cells in the block.
    pub fn volume(&self) -> usize {
        self.width as usize * self.height as usize * self.depth as usize
    }

    /// Iterate over every cell of the block anchored at `origin`.
    ///
    /// Order is row-major: `x` varies fastest, then `y`, then `z`. Overlay
    /// writes and validity checks both rely on this order to line up
    /// index-for-index.
    pub fn cells_from(&self, origin: Cell) -> impl Iterator<Item = Cell> + use<> {
        let w = self.width as i32;
        let h = self.height as i32;
        let d = self.depth as i32;
        (0..d).flat_map(move |dz| {
            (0..h).flat_map(move |dy| (0..w).map(move |dx| origin.offset(dx, dy, dz)))
        })
    }
}

/// Rotation applied to a placeable footprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Rotation {
    /// No rotation.
    #[default]
    None,
    /// 90 degrees clockwise.
    Cw90,
    /// 180 degrees.
    Cw180,
    /// 270 degrees clockwise (90 degrees counter-clockwise).
    Cw270,
}

impl Rotation {
    /// All four rotation values.
    pub fn all() -> [Rotation; 4] {
        [
            Rotation::None,
            Rotation::Cw90,
            Rotation::Cw180,
            Rotation::Cw270,
        ]
    }

    /// Rotate 90 degrees clockwise.
    pub fn rotate_cw(self) -> Self {
        match self {
            Rotation::None => Rotation::Cw90,
            Rotation::Cw90 => Rotation::Cw180,
            Rotation::Cw180 => Rotation::Cw270,
            Rotation::Cw270 => Rotation::None,
        }
    }

    pub fn degrees(self) -> u16 {
        match self {
            Rotation::None => 0,
            Rotation::Cw90 => 90,
            Rotation::Cw180 => 180,
            Rotation::Cw270 => 270,
        }
    }
}

// ---------------------------------------------------------------------------
// PlaceableFootprint
// ---------------------------------------------------------------------------

/// The block of cells a placeable object covers.
///
/// `origin` is the minimum corner of the block. `extent` is the size with the
/// current rotation already applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlaceableFootprint {
    pub origin: Cell,
    pub extent: Extent,
    #[serde(default)]
    pub rotation: Rotation,
}

impl PlaceableFootprint {
    pub fn new(origin: Cell, extent: Extent) -> Self {
        Self {
            origin,
            extent,
            rotation: Rotation::None,
        }
    }

    /// The same footprint moved to a new origin.
    pub fn at(&self, origin: Cell) -> Self {
        Self { origin, ..*self }
    }

    /// The footprint turned 90 degrees clockwise about its origin.
    /// Width and height swap; depth and origin are unchanged.
    pub fn rotate(&self) -> Self {
        Self {
            origin: self.origin,
            extent: Extent {
                width: self.extent.height,
                height: self.extent.width,
                depth: self.extent.depth,
            },
            rotation: self.rotation.rotate_cw(),
        }
    }

    /// Covered cells in row-major order (see [`Extent::cells_from`]).
    pub fn cells_covered(&self) -> impl Iterator<Item = Cell> + use<> {
        self.extent.cells_from(self.origin)
    }

    pub fn cell_count(&self) -> usize {
        self.extent.volume()
    }

    /// Whether the footprint covers the given cell.
    pub fn contains(&self, cell: Cell) -> bool {
        let within = |value: i32, start: i32, len: u32| {
            value >= start && i64::from(value) < i64::from(start) + i64::from(len)
        };
        within(cell.x, self.origin.x, self.extent.width)
            && within(cell.y, self.origin.y, self.extent.height)
            && within(cell.z, self.origin.z, self.extent.depth)
    }
}
