//! The sticker board: an ordered collection of placed stickers.
//!
//! All mutation goes through [`Board::place`], [`Board::move_sticker`] and
//! [`Board::delete`]. Positions are only ever changed through grid snapping,
//! so any moved sticker sits on a multiple of [`GRID_SIZE`].

use std::fmt;
use std::sync::Arc;

use crate::constants::{DEFAULT_POSITION, FIRST_STICKER_ID, GRID_SIZE};

/// Identifier of a placed sticker, unique within one board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StickerId(u64);

impl StickerId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for StickerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque reference to one of the predefined sticker images.
///
/// Cloning shares the underlying key; every sticker placed from the same
/// toolbar entry points at the same allocation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceRef(Arc<str>);

impl SourceRef {
    pub fn new(key: impl Into<Arc<str>>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A placed instance of a source image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sticker {
    id: StickerId,
    source: SourceRef,
    x: i64,
    y: i64,
}

impl Sticker {
    pub fn id(&self) -> StickerId {
        self.id
    }

    pub fn source(&self) -> &SourceRef {
        &self.source
    }

    pub fn x(&self) -> i64 {
        self.x
    }

    pub fn y(&self) -> i64 {
        self.y
    }

    pub fn position(&self) -> (i64, i64) {
        (self.x, self.y)
    }
}

/// Round a raw position to the nearest grid intersection.
///
/// Ties round toward positive infinity, so -20 snaps to 0 and 20 to 40.
/// Nothing is clamped: negative and off-board
/// positions snap like any other. Non-finite input saturates instead of
/// panicking.
pub fn snap_to_grid(raw_x: f64, raw_y: f64) -> (i64, i64) {
    (snap_axis(raw_x), snap_axis(raw_y))
}

fn snap_axis(raw: f64) -> i64 {
    let cells = (raw / GRID_SIZE as f64 + 0.5).floor() as i64;
    cells.saturating_mul(GRID_SIZE)
}

/// Ordered collection of placed stickers.
#[derive(Debug, Clone)]
pub struct Board {
    stickers: Vec<Sticker>,
    next_id: u64,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    pub fn new() -> Self {
        Self { stickers: Vec::new(), next_id: FIRST_STICKER_ID }
    }

    /// Append a new sticker at the default position.
    pub fn place(&mut self, source: SourceRef) -> &Sticker {
        let id = StickerId(self.next_id);
        self.next_id += 1;
        let (x, y) = DEFAULT_POSITION;
        let index = self.stickers.len();
        self.stickers.push(Sticker { id, source, x, y });
        tracing::debug!(%id, "sticker placed");
        &self.stickers[index]
    }

    /// Snap `(raw_x, raw_y)` to the grid and move the sticker there.
    ///
    /// Unknown ids are ignored. Returns whether a sticker was updated.
    pub fn move_sticker(&mut self, id: StickerId, raw_x: f64, raw_y: f64) -> bool {
        let Some(sticker) = self.stickers.iter_mut().find(|s| s.id == id) else {
            tracing::debug!(%id, "move ignored, no such sticker");
            return false;
        };
        let (x, y) = snap_to_grid(raw_x, raw_y);
        sticker.x = x;
        sticker.y = y;
        true
    }

    /// Remove a sticker, keeping the order of the rest. Unknown ids are ignored.
    pub fn delete(&mut self, id: StickerId) -> Option<Sticker> {
        let index = self.stickers.iter().position(|s| s.id == id)?;
        Some(self.stickers.remove(index))
    }

    pub fn get(&self, id: StickerId) -> Option<&Sticker> {
        self.stickers.iter().find(|s| s.id == id)
    }

    pub fn stickers(&self) -> &[Sticker] {
        &self.stickers
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sticker> {
        self.stickers.iter()
    }

    pub fn len(&self) -> usize {
        self.stickers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stickers.is_empty()
    }
}

impl<'a> IntoIterator for &'a Board {
    type Item = &'a Sticker;
    type IntoIter = std::slice::Iter<'a, Sticker>;

    fn into_iter(self) -> Self::IntoIter {
        self.stickers.iter()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn src(key: &str) -> SourceRef {
        SourceRef::new(key)
    }

    fn ids(board: &Board) -> Vec<StickerId> {
        board.iter().map(Sticker::id).collect()
    }

    #[test]
    fn place_uses_default_position_and_first_id() {
        let mut board = Board::new();
        let sticker = board.place(src("sticker1"));
        assert_eq!(sticker.id(), StickerId::new(1000));
        assert_eq!(sticker.position(), (60, 60));
        assert_eq!(sticker.source().as_str(), "sticker1");
    }

    #[test]
    fn place_ids_are_distinct() {
        let mut board = Board::new();
        for i in 0..50 {
            board.place(src(&format!("sticker{}", i % 3)));
        }
        assert_eq!(board.len(), 50);
        let unique: HashSet<_> = ids(&board).into_iter().collect();
        assert_eq!(unique.len(), 50);
    }

    #[test]
    fn ids_not_reused_after_delete() {
        let mut board = Board::new();
        let first = board.place(src("a")).id();
        board.delete(first);
        let second = board.place(src("a")).id();
        assert_ne!(first, second);
    }

    #[test]
    fn snap_rounds_to_nearest_cell() {
        assert_eq!(snap_to_grid(83.0, 95.0), (80, 80));
        assert_eq!(snap_to_grid(19.9, 20.0), (0, 40));
        assert_eq!(snap_to_grid(0.0, 0.0), (0, 0));
        assert_eq!(snap_to_grid(619.0, 401.0), (600, 400));
    }

    #[test]
    fn snap_handles_negative_coordinates() {
        assert_eq!(snap_to_grid(-19.0, -21.0), (0, -40));
        assert_eq!(snap_to_grid(-61.0, -100.0), (-80, -80));
    }

    #[test]
    fn snap_ties_round_up() {
        assert_eq!(snap_to_grid(20.0, 60.0), (40, 80));
        assert_eq!(snap_to_grid(-20.0, -60.0), (0, -40));
        assert_eq!(snap_to_grid(-100.0, 0.0), (-80, 0));
    }

    #[test]
    fn snap_is_idempotent() {
        for &(x, y) in &[(83.0, 95.0), (-17.5, 333.3), (20.0, -20.0), (1234.5, 0.1)] {
            let (gx, gy) = snap_to_grid(x, y);
            assert_eq!(snap_to_grid(gx as f64, gy as f64), (gx, gy));
        }
    }

    #[test]
    fn snap_saturates_non_finite() {
        assert_eq!(snap_to_grid(f64::NAN, f64::INFINITY), (0, i64::MAX));
        assert_eq!(snap_to_grid(f64::NEG_INFINITY, 0.0), (i64::MIN, 0));
    }

    #[test]
    fn move_snaps_and_leaves_others_untouched() {
        let mut board = Board::new();
        let a = board.place(src("a")).id();
        let b = board.place(src("b")).id();
        let before_b = board.get(b).cloned();

        assert!(board.move_sticker(a, 83.0, 95.0));

        let moved = board.get(a).unwrap();
        assert_eq!(moved.position(), (80, 80));
        assert_eq!(moved.x() % GRID_SIZE, 0);
        assert_eq!(moved.y() % GRID_SIZE, 0);
        assert_eq!(moved.source().as_str(), "a");
        assert_eq!(board.get(b).cloned(), before_b);
        assert_eq!(ids(&board), vec![a, b]);
    }

    #[test]
    fn move_unknown_id_is_noop() {
        let mut board = Board::new();
        assert!(!board.move_sticker(StickerId::new(42), 100.0, 100.0));
        assert!(board.is_empty());
    }

    #[test]
    fn delete_is_idempotent() {
        let mut board = Board::new();
        let a = board.place(src("a")).id();
        board.place(src("b"));

        assert!(board.delete(a).is_some());
        assert_eq!(board.len(), 1);
        assert!(board.delete(a).is_none());
        assert_eq!(board.len(), 1);
    }

    #[test]
    fn delete_preserves_order() {
        let mut board = Board::new();
        let a = board.place(src("a")).id();
        let b = board.place(src("b")).id();
        let c = board.place(src("c")).id();

        board.delete(b);
        assert_eq!(ids(&board), vec![a, c]);
    }

    #[test]
    fn delete_first_leaves_second() {
        let mut board = Board::new();
        let first = board.place(src("sticker1")).id();
        let second = board.place(src("sticker2")).id();

        board.delete(first);
        assert_eq!(board.len(), 1);
        assert_eq!(board.stickers()[0].id(), second);
        assert_eq!(board.stickers()[0].source().as_str(), "sticker2");
    }

    #[test]
    fn source_refs_share_allocation() {
        let shared = src("sticker1");
        let mut board = Board::new();
        board.place(shared.clone());
        board.place(shared.clone());
        assert_eq!(board.stickers()[0].source(), board.stickers()[1].source());
    }
}
