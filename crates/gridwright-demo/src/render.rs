//! Plain-text rendering of a board, one block per layer.
//!
//! Legend: `.` empty ground, `#` blocked ground, a capital letter for a
//! placed object (first letter of its kind), `+` and `!` for valid and
//! blocked overlay cells. Cells outside the buildable area are blank.

use gridwright_session::Board;
use gridwright_spatial::{Cell, TileClass};
use std::collections::{BTreeMap, BTreeSet};

/// Render every layer that has ground, lowest first.
pub fn render_board(board: &Board) -> String {
    let ground: BTreeMap<Cell, TileClass> = board.field.ground_tiles().collect();
    let layers: BTreeSet<i32> = ground.keys().map(|cell| cell.z).collect();

    let mut out = String::new();
    for z in layers {
        let mut layer_cells = ground.keys().filter(|cell| cell.z == z);
        let Some(first) = layer_cells.next() else {
            continue;
        };
        let (min_x, max_x, min_y, max_y) = layer_cells.fold(
            (first.x, first.x, first.y, first.y),
            |(min_x, max_x, min_y, max_y), cell| {
                (min_x.min(cell.x), max_x.max(cell.x), min_y.min(cell.y), max_y.max(cell.y))
            },
        );

        out.push_str(&format!("layer {z}\n"));
        for y in min_y..=max_y {
            let row: String = (min_x..=max_x)
                .map(|x| glyph(board, &ground, Cell::new(x, y, z)))
                .collect();
            out.push_str("  ");
            out.push_str(row.trim_end());
            out.push('\n');
        }
    }
    out
}

fn glyph(board: &Board, ground: &BTreeMap<Cell, TileClass>, cell: Cell) -> char {
    match board.field.overlay(cell) {
        TileClass::Possible => return '+',
        TileClass::Impossible => return '!',
        TileClass::Empty => {}
    }
    let settled = board
        .placeable_at(cell)
        .and_then(|id| board.get(id))
        .filter(|p| p.is_placed() && !p.is_editing());
    if let Some(placeable) = settled {
        return placeable
            .kind()
            .chars()
            .next()
            .map_or('?', |c| c.to_ascii_uppercase());
    }
    match ground.get(&cell) {
        None => ' ',
        Some(TileClass::Empty) => '.',
        Some(_) => '#',
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridwright_spatial::{Extent, OccupancyField, PlaceableFootprint};

    fn room() -> Board {
        let mut field = OccupancyField::with_empty_area(Cell::flat(0, 0), Extent::flat(4, 2));
        field.paint_cell(Cell::flat(3, 1), TileClass::Impossible);
        Board::new(field)
    }

    #[test]
    fn renders_ground_and_objects() {
        let mut board = room();
        board
            .spawn_placed(
                "sofa",
                PlaceableFootprint::new(Cell::flat(0, 0), Extent::flat(2, 1)),
            )
            .unwrap();

        assert_eq!(render_board(&board), "layer 0\n  SS..\n  ...#\n");
    }

    #[test]
    fn overlay_wins_over_ground() {
        let mut board = room();
        board.field.set_overlay_block(
            Cell::flat(2, 1),
            Extent::flat(2, 1),
            &[TileClass::Possible, TileClass::Impossible],
        );
        assert_eq!(render_board(&board), "layer 0\n  ....\n  ..+!\n");
    }

    #[test]
    fn holes_render_blank() {
        let mut field = OccupancyField::new();
        field.paint_ground(Cell::flat(0, 0), Extent::flat(1, 1), TileClass::Empty);
        field.paint_ground(Cell::flat(2, 0), Extent::flat(1, 1), TileClass::Empty);
        field.paint_ground(Cell::new(0, 0, 1), Extent::flat(1, 1), TileClass::Empty);
        let board = Board::new(field);

        assert_eq!(render_board(&board), "layer 0\n  . .\nlayer 1\n  .\n");
    }

    #[test]
    fn empty_board_renders_nothing() {
        assert_eq!(render_board(&Board::default()), "");
    }
}
