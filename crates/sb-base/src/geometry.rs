//! Board-space rectangles and hit testing.

use crate::board::{Sticker, StickerId};
use crate::constants::{BOARD_HEIGHT, BOARD_WIDTH, STICKER_SIZE};

/// Axis-aligned rectangle in board pixels. `right` and `bottom` are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardRect {
    pub left: i64,
    pub top: i64,
    pub right: i64,
    pub bottom: i64,
}

impl BoardRect {
    pub fn new(left: i64, top: i64, width: i64, height: i64) -> Self {
        Self { left, top, right: left.saturating_add(width), bottom: top.saturating_add(height) }
    }

    pub fn board() -> Self {
        Self::new(0, 0, BOARD_WIDTH, BOARD_HEIGHT)
    }

    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= self.left && x < self.right && y >= self.top && y < self.bottom
    }

    pub fn intersects(&self, other: &BoardRect) -> bool {
        self.left < other.right && other.left < self.right && self.top < other.bottom && other.top < self.bottom
    }
}

/// Rectangle a sticker occupies on the board.
pub fn sticker_rect(sticker: &Sticker) -> BoardRect {
    BoardRect::new(sticker.x(), sticker.y(), STICKER_SIZE, STICKER_SIZE)
}

/// Whether any part of the sticker is visible on the board.
pub fn is_on_board(sticker: &Sticker) -> bool {
    sticker_rect(sticker).intersects(&BoardRect::board())
}

/// Topmost sticker under the point. Later stickers draw over earlier ones.
pub fn hit_test(stickers: &[Sticker], x: i64, y: i64) -> Option<StickerId> {
    stickers.iter().rev().find(|s| sticker_rect(s).contains(x, y)).map(Sticker::id)
}
