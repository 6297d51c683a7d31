//! Mapping between terminal cells and board pixels.
//!
//! One cell covers `CELL_WIDTH_PX` × `CELL_HEIGHT_PX` board pixels; a cell
//! stands for the board pixel at its top-left corner.
use ratatui::layout::Rect;

use crate::infra::constants::{CELL_HEIGHT_PX, CELL_WIDTH_PX};

/// Board position under a terminal cell. Works outside `area` too (negative
/// or past the edge) so drags can leave the board.
pub fn cell_to_board(area: Rect, column: u16, row: u16) -> (i64, i64) {
    (
        (column as i64 - area.x as i64) * CELL_WIDTH_PX,
        (row as i64 - area.y as i64) * CELL_HEIGHT_PX,
    )
}

/// Terminal cell containing a board position, unclipped.
pub fn board_to_cell(area: Rect, x: i64, y: i64) -> (i64, i64) {
    (area.x as i64 + x.div_euclid(CELL_WIDTH_PX), area.y as i64 + y.div_euclid(CELL_HEIGHT_PX))
}

pub fn contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x && column < area.x + area.width && row >= area.y && row < area.y + area.height
}

#[cfg(test)]
mod tests {
    use super::*;

    const AREA: Rect = Rect { x: 23, y: 1, width: 60, height: 20 };

    #[test]
    fn origin_cell_is_board_origin() {
        assert_eq!(cell_to_board(AREA, 23, 1), (0, 0));
        assert_eq!(board_to_cell(AREA, 0, 0), (23, 1));
    }

    #[test]
    fn default_position_maps_into_cells() {
        // (60, 60) sits six columns and three rows in
        assert_eq!(board_to_cell(AREA, 60, 60), (29, 4));
        assert_eq!(cell_to_board(AREA, 29, 4), (60, 60));
    }

    #[test]
    fn positions_left_of_area_go_negative() {
        assert_eq!(cell_to_board(AREA, 20, 0), (-30, -20));
        assert_eq!(board_to_cell(AREA, -5, -1), (22, 0));
    }

    #[test]
    fn contains_is_half_open() {
        assert!(contains(AREA, 23, 1));
        assert!(contains(AREA, 82, 20));
        assert!(!contains(AREA, 83, 20));
        assert!(!contains(AREA, 22, 5));
    }
}
