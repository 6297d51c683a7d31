use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use sb_base::geometry::hit_test;

use crate::app::actions::Action;
use crate::infra::constants::{DOUBLE_CLICK_MS, TOOLBAR_LIST_START_ROW};
use crate::state::State;
use crate::state::viewport::{cell_to_board, contains};
use crate::ui::toolbar::export_button_row;

/// Handle mouse events and return appropriate action
pub fn handle_mouse(event: &MouseEvent, state: &State, now_ms: u64) -> Action {
    let column = event.column;
    let row = event.row;

    match event.kind {
        MouseEventKind::Down(MouseButton::Left) => handle_left_press(column, row, state, now_ms),
        MouseEventKind::Drag(MouseButton::Left) if state.drag.is_some() => {
            let (x, y) = cell_to_board(state.board_area, column, row);
            Action::DragTo { x, y }
        }
        MouseEventKind::Up(MouseButton::Left) if state.drag.is_some() => Action::EndDrag,
        _ => Action::None,
    }
}

fn handle_left_press(column: u16, row: u16, state: &State, now_ms: u64) -> Action {
    if contains(state.toolbar_area, column, row) {
        return handle_toolbar_click(row - state.toolbar_area.y, state);
    }
    if contains(state.board_area, column, row) {
        return handle_board_press(column, row, state, now_ms);
    }
    Action::None
}

/// Toolbar rows: header, blank, one row per palette entry, blank, Export
fn handle_toolbar_click(row: u16, state: &State) -> Action {
    let count = state.palette.stickers.len();
    if row == export_button_row(count) {
        return Action::Export;
    }
    if row >= TOOLBAR_LIST_START_ROW {
        let index = (row - TOOLBAR_LIST_START_ROW) as usize;
        if index < count {
            return Action::PlaceIndex(index);
        }
    }
    Action::None
}

fn handle_board_press(column: u16, row: u16, state: &State, now_ms: u64) -> Action {
    let (x, y) = cell_to_board(state.board_area, column, row);
    let Some(id) = hit_test(state.board.stickers(), x, y) else {
        return Action::ClearSelection;
    };

    if let Some((last_id, last_ms)) = state.last_press
        && last_id == id
        && now_ms.saturating_sub(last_ms) <= DOUBLE_CLICK_MS
    {
        return Action::Delete(id);
    }

    let Some(sticker) = state.board.get(id) else {
        return Action::None;
    };
    Action::Press { id, grab_x: x - sticker.x(), grab_y: y - sticker.y(), at_ms: now_ms }
}
