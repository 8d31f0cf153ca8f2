//! The world a session edits: occupancy field plus placeable entities.

use crate::id::PlaceableId;
use gridwright_spatial::{Cell, Extent, OccupancyField, PlaceableFootprint, evaluate};
use slotmap::SlotMap;

/// Errors from direct board mutations.
#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    #[error("footprint at {origin:?} overlaps {blocked} blocked cell(s)")]
    Blocked { origin: Cell, blocked: usize },
}

/// A placeable entity in the world.
#[derive(Debug, Clone, PartialEq)]
pub struct Placeable {
    kind: String,
    footprint: PlaceableFootprint,
    committed: Option<PlaceableFootprint>,
    editing: bool,
}

impl Placeable {
    /// Storage identifier, e.g. `"chair"`.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Current footprint. While the entity is being edited this is the
    /// in-progress position, not the committed one.
    pub fn footprint(&self) -> PlaceableFootprint {
        self.footprint
    }

    /// The footprint from the last successful placement, if any.
    pub fn committed(&self) -> Option<PlaceableFootprint> {
        self.committed
    }

    pub fn is_placed(&self) -> bool {
        self.committed.is_some()
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub(crate) fn set_footprint(&mut self, footprint: PlaceableFootprint) {
        self.footprint = footprint;
    }

    pub(crate) fn start_edit(&mut self) {
        self.editing = true;
    }

    /// Record a successful placement and leave edit mode.
    pub(crate) fn place(&mut self) {
        self.committed = Some(self.footprint);
        self.editing = false;
    }

    /// Snap back to the committed footprint and leave edit mode.
    pub(crate) fn end_edit(&mut self) {
        if let Some(committed) = self.committed {
            self.footprint = committed;
        }
        self.editing = false;
    }
}

/// Ground/overlay field and the entities placed on it.
#[derive(Debug, Default)]
pub struct Board {
    pub field: OccupancyField,
    placeables: SlotMap<PlaceableId, Placeable>,
}

impl Board {
    pub fn new(field: OccupancyField) -> Self {
        Self {
            field,
            placeables: SlotMap::with_key(),
        }
    }

    // -- Entities --

    /// Add an entity that has never been placed, e.g. one just taken out of
    /// storage. Its ground cells are not touched until a confirm commits it.
    pub fn spawn(&mut self, kind: impl Into<String>, footprint: PlaceableFootprint) -> PlaceableId {
        self.placeables.insert(Placeable {
            kind: kind.into(),
            footprint: normalized(footprint),
            committed: None,
            editing: false,
        })
    }

    /// Add an entity that is already placed, committing its footprint into the
    /// ground layer. Fails without side effects if any covered cell is blocked.
    pub fn spawn_placed(
        &mut self,
        kind: impl Into<String>,
        footprint: PlaceableFootprint,
    ) -> Result<PlaceableId, BoardError> {
        let footprint = normalized(footprint);
        let evaluation = evaluate(&footprint, &self.field);
        if !evaluation.overall_valid {
            return Err(BoardError::Blocked {
                origin: footprint.origin,
                blocked: evaluation.blocked_cells().count(),
            });
        }
        self.field.commit_block(&footprint);
        Ok(self.placeables.insert(Placeable {
            kind: kind.into(),
            footprint,
            committed: Some(footprint),
            editing: false,
        }))
    }

    /// Remove an entity from the world. Ground cells are left as they are;
    /// callers release committed cells first when that is wanted.
    pub fn despawn(&mut self, id: PlaceableId) -> Option<Placeable> {
        self.placeables.remove(id)
    }

    pub fn get(&self, id: PlaceableId) -> Option<&Placeable> {
        self.placeables.get(id)
    }

    pub(crate) fn get_mut(&mut self, id: PlaceableId) -> Option<&mut Placeable> {
        self.placeables.get_mut(id)
    }

    pub fn contains(&self, id: PlaceableId) -> bool {
        self.placeables.contains_key(id)
    }

    /// Iterate over all entities.
    pub fn placeables(&self) -> impl Iterator<Item = (PlaceableId, &Placeable)> {
        self.placeables.iter()
    }

    /// Number of entities in the world.
    pub fn len(&self) -> usize {
        self.placeables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placeables.is_empty()
    }

    // -- Queries --

    /// The entity whose current footprint covers `cell`, if any.
    ///
    /// Hosts use this to resolve pointer hits when they have no collider
    /// system of their own.
    pub fn placeable_at(&self, cell: Cell) -> Option<PlaceableId> {
        self.placeables
            .iter()
            .find(|(_, p)| p.footprint.contains(cell))
            .map(|(id, _)| id)
    }
}

fn normalized(footprint: PlaceableFootprint) -> PlaceableFootprint {
    let Extent {
        width,
        height,
        depth,
    } = footprint.extent;
    PlaceableFootprint {
        extent: Extent::new(width, height, depth),
        ..footprint
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridwright_spatial::TileClass;

    fn board_3x3() -> Board {
        Board::new(OccupancyField::with_empty_area(
            Cell::flat(0, 0),
            Extent::flat(3, 3),
        ))
    }

    #[test]
    fn spawn_leaves_ground_untouched() {
        let mut board = board_3x3();
        let fp = PlaceableFootprint::new(Cell::flat(0, 0), Extent::flat(2, 1));
        let id = board.spawn("bench", fp);

        let placeable = board.get(id).unwrap();
        assert_eq!(placeable.kind(), "bench");
        assert!(!placeable.is_placed());
        assert!(!placeable.is_editing());
        assert_eq!(board.field.classify(Cell::flat(0, 0)), TileClass::Empty);
    }

    #[test]
    fn spawn_placed_commits_ground() {
        let mut board = board_3x3();
        let fp = PlaceableFootprint::new(Cell::flat(1, 1), Extent::flat(2, 2));
        let id = board.spawn_placed("table", fp).unwrap();

        assert_eq!(board.get(id).unwrap().committed(), Some(fp));
        for cell in fp.cells_covered() {
            assert_eq!(board.field.classify(cell), TileClass::Impossible);
        }
        assert_eq!(board.field.classify(Cell::flat(0, 0)), TileClass::Empty);
    }

    #[test]
    fn spawn_placed_blocked_has_no_side_effects() {
        let mut board = board_3x3();
        board
            .spawn_placed(
                "crate",
                PlaceableFootprint::new(Cell::flat(1, 1), Extent::single()),
            )
            .unwrap();

        let result = board.spawn_placed(
            "table",
            PlaceableFootprint::new(Cell::flat(0, 0), Extent::flat(2, 2)),
        );
        assert!(matches!(result, Err(BoardError::Blocked { blocked: 1, .. })));
        assert_eq!(board.len(), 1);
        assert_eq!(board.field.classify(Cell::flat(0, 0)), TileClass::Empty);
    }

    #[test]
    fn spawn_normalizes_zero_extent() {
        let mut board = board_3x3();
        let fp = PlaceableFootprint::new(
            Cell::flat(0, 0),
            Extent {
                width: 0,
                height: 2,
                depth: 0,
            },
        );
        let id = board.spawn("rug", fp);
        assert_eq!(board.get(id).unwrap().footprint().extent, Extent::flat(1, 2));
    }

    #[test]
    fn placeable_at_hit_test() {
        let mut board = board_3x3();
        let a = board
            .spawn_placed(
                "shelf",
                PlaceableFootprint::new(Cell::flat(0, 0), Extent::flat(1, 2)),
            )
            .unwrap();

        assert_eq!(board.placeable_at(Cell::flat(0, 1)), Some(a));
        assert_eq!(board.placeable_at(Cell::flat(1, 1)), None);
    }

    #[test]
    fn despawn_removes_entity() {
        let mut board = board_3x3();
        let id = board.spawn("lamp", PlaceableFootprint::new(Cell::flat(2, 2), Extent::single()));
        let removed = board.despawn(id).unwrap();
        assert_eq!(removed.kind(), "lamp");
        assert!(!board.contains(id));
        assert!(board.is_empty());
    }

    #[test]
    fn end_edit_restores_committed() {
        let mut board = board_3x3();
        let fp = PlaceableFootprint::new(Cell::flat(0, 0), Extent::flat(2, 1));
        let id = board.spawn_placed("bench", fp).unwrap();

        let placeable = board.get_mut(id).unwrap();
        placeable.start_edit();
        placeable.set_footprint(fp.rotate().at(Cell::flat(2, 0)));
        placeable.end_edit();

        assert_eq!(placeable.footprint(), fp);
        assert!(!placeable.is_editing());
    }
}
