//! Property-based tests for the spatial primitives.
//!
//! Uses proptest to generate random layouts, footprints, and blocked cells,
//! then verifies the conversion and validity invariants hold.

use gridwright_spatial::*;
use proptest::prelude::*;

// ===========================================================================
// Generators
// ===========================================================================

fn arb_cell() -> impl Strategy<Value = Cell> {
    (-500..500i32, -500..500i32, -4..4i32).prop_map(|(x, y, z)| Cell::new(x, y, z))
}

fn arb_layout() -> impl Strategy<Value = GridLayout> {
    (
        prop_oneof![Just(0.25f32), Just(0.5), Just(1.0), Just(2.0), Just(16.0)],
        prop_oneof![Just(0.5f32), Just(1.0), Just(4.0)],
        -100..100i32,
        -100..100i32,
    )
        .prop_map(|(sxy, sz, ox, oy)| {
            GridLayout::new([sxy, sxy, sz], WorldPos::new(ox as f32, oy as f32, 0.0))
                .expect("generated sizes are positive")
        })
}

fn arb_footprint() -> impl Strategy<Value = PlaceableFootprint> {
    (-8..8i32, -8..8i32, 1..5u32, 1..5u32, 1..3u32).prop_map(|(x, y, w, h, d)| {
        PlaceableFootprint::new(Cell::flat(x, y), Extent::new(w, h, d))
    })
}

/// A field large enough to hold every generated footprint, all `Empty`.
fn empty_field() -> OccupancyField {
    OccupancyField::with_empty_area(Cell::new(-10, -10, 0), Extent::new(24, 24, 4))
}

// ===========================================================================
// Properties
// ===========================================================================

proptest! {
    #[test]
    fn cell_center_round_trip(layout in arb_layout(), cell in arb_cell()) {
        let center = layout.cell_to_world(cell);
        prop_assert_eq!(layout.world_to_cell(center), cell);
        prop_assert_eq!(layout.cell_to_world(layout.world_to_cell(center)), center);
    }

    #[test]
    fn four_rotations_restore(fp in arb_footprint()) {
        let once = fp.rotate();
        prop_assert_eq!(once.cell_count(), fp.cell_count());
        prop_assert_eq!(once.origin, fp.origin);
        prop_assert_eq!(once.rotate().rotate().rotate(), fp);
    }

    #[test]
    fn empty_ground_accepts_everything(fp in arb_footprint()) {
        let field = empty_field();
        let eval = evaluate(&fp, &field);
        prop_assert!(eval.overall_valid);
        prop_assert_eq!(eval.cells.len(), fp.cell_count());
        prop_assert!(eval.overlay_tiles().iter().all(|&t| t == TileClass::Possible));
    }

    #[test]
    fn exactly_blocked_cells_are_impossible(
        fp in arb_footprint(),
        blocked in proptest::collection::vec((0..5i32, 0..5i32, 0..3i32), 1..6),
    ) {
        let mut field = empty_field();
        let blocked: Vec<Cell> = blocked
            .into_iter()
            .map(|(dx, dy, dz)| fp.origin.offset(dx, dy, dz))
            .collect();
        for &cell in &blocked {
            field.paint_cell(cell, TileClass::Impossible);
        }

        let eval = evaluate(&fp, &field);
        let any_covered = blocked.iter().any(|&c| fp.contains(c));
        prop_assert_eq!(eval.overall_valid, !any_covered);
        for verdict in &eval.cells {
            prop_assert_eq!(verdict.valid, !blocked.contains(&verdict.cell));
        }
    }

    #[test]
    fn overlay_write_then_clear_leaves_nothing(fp in arb_footprint()) {
        let mut field = empty_field();
        let eval = evaluate(&fp, &field);
        field.set_overlay_block(fp.origin, fp.extent, &eval.overlay_tiles());
        prop_assert_eq!(field.overlay_tiles().count(), fp.cell_count());
        field.clear_overlay_block(fp.origin, fp.extent);
        prop_assert!(field.overlay_is_clear());
    }
}
