use sb_base::{SourceRef, StickerId, snap_to_grid};

use crate::state::{DragState, State, StatusLevel};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Place the palette entry at this index
    PlaceIndex(usize),
    /// Pointer pressed on a sticker: select it and start a drag
    Press { id: StickerId, grab_x: i64, grab_y: i64, at_ms: u64 },
    /// Pointer moved during a drag, in board pixels
    DragTo { x: i64, y: i64 },
    /// Pointer released: drop the dragged sticker (snapped)
    EndDrag,
    CancelDrag,
    Delete(StickerId),
    DeleteSelected,
    ClearSelection,
    SelectNext,
    SelectPrev,
    /// Move the selected sticker by a pixel offset (snapped)
    Nudge { dx: i64, dy: i64 },
    Export,
    CycleTheme,
    None,
}

#[derive(Debug, PartialEq, Eq)]
pub enum ActionResult {
    Nothing,
    /// The board changed; stickers may need images
    BoardChanged,
    /// Caller should write the export
    Export,
}

pub fn apply_action(state: &mut State, action: Action) -> ActionResult {
    match action {
        Action::PlaceIndex(index) => match state.palette.stickers.get(index) {
            Some(entry) => {
                let source = entry.source();
                place(state, source)
            }
            None => ActionResult::Nothing,
        },
        Action::Press { id, grab_x, grab_y, at_ms } => {
            let Some(sticker) = state.board.get(id) else {
                return ActionResult::Nothing;
            };
            let (x, y) = sticker.position();
            state.selected = Some(id);
            state.last_press = Some((id, at_ms));
            state.drag = Some(DragState { id, grab_x, grab_y, raw_x: x as f64, raw_y: y as f64, moved: false });
            state.dirty = true;
            ActionResult::Nothing
        }
        Action::DragTo { x, y } => {
            let Some(drag) = state.drag.as_mut() else {
                return ActionResult::Nothing;
            };
            let raw_x = (x - drag.grab_x) as f64;
            let raw_y = (y - drag.grab_y) as f64;
            if raw_x != drag.raw_x || raw_y != drag.raw_y {
                drag.raw_x = raw_x;
                drag.raw_y = raw_y;
                drag.moved = true;
                state.dirty = true;
            }
            ActionResult::Nothing
        }
        Action::EndDrag => {
            let Some(drag) = state.drag.take() else {
                return ActionResult::Nothing;
            };
            if !drag.moved {
                return ActionResult::Nothing;
            }
            state.board.move_sticker(drag.id, drag.raw_x, drag.raw_y);
            // A drag in between breaks a double click
            state.last_press = None;
            state.dirty = true;
            ActionResult::BoardChanged
        }
        Action::CancelDrag => {
            if state.drag.take().is_some() {
                state.dirty = true;
            }
            ActionResult::Nothing
        }
        Action::Delete(id) => delete(state, id),
        Action::DeleteSelected => match state.selected {
            Some(id) => delete(state, id),
            None => ActionResult::Nothing,
        },
        Action::ClearSelection => {
            if state.selected.take().is_some() {
                state.dirty = true;
            }
            state.last_press = None;
            ActionResult::Nothing
        }
        Action::SelectNext => select_step(state, true),
        Action::SelectPrev => select_step(state, false),
        Action::Nudge { dx, dy } => {
            let Some(sticker) = state.selected.and_then(|id| state.board.get(id)) else {
                return ActionResult::Nothing;
            };
            let id = sticker.id();
            // Step from the grid point the sticker sits nearest, so one arrow
            // press moves along one axis only
            let (x, y) = snap_to_grid(sticker.x() as f64, sticker.y() as f64);
            state.board.move_sticker(id, x.saturating_add(dx) as f64, y.saturating_add(dy) as f64);
            state.dirty = true;
            ActionResult::BoardChanged
        }
        Action::Export => ActionResult::Export,
        Action::CycleTheme => {
            let theme = sb_base::config::cycle_theme();
            state.set_status(StatusLevel::Info, format!("Theme: {}", sb_base::config::get_theme(theme).name));
            ActionResult::Nothing
        }
        Action::None => ActionResult::Nothing,
    }
}

fn place(state: &mut State, source: SourceRef) -> ActionResult {
    let id = state.board.place(source).id();
    state.selected = Some(id);
    state.dirty = true;
    ActionResult::BoardChanged
}

fn select_step(state: &mut State, forward: bool) -> ActionResult {
    let len = state.board.len();
    if len == 0 {
        return ActionResult::Nothing;
    }
    let next = match (state.selected_index(), forward) {
        (None, true) => 0,
        (None, false) => len - 1,
        (Some(i), true) => (i + 1) % len,
        (Some(i), false) => (i + len - 1) % len,
    };
    state.selected = Some(state.board.stickers()[next].id());
    state.dirty = true;
    ActionResult::Nothing
}

fn delete(state: &mut State, id: StickerId) -> ActionResult {
    if state.board.delete(id).is_none() {
        return ActionResult::Nothing;
    }
    if state.selected == Some(id) {
        state.selected = None;
    }
    if state.drag.as_ref().is_some_and(|d| d.id == id) {
        state.drag = None;
    }
    state.last_press = None;
    state.dirty = true;
    ActionResult::BoardChanged
}
