use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use sb_base::constants::GRID_SIZE;

use crate::app::actions::Action;
use crate::app::mouse::handle_mouse;
use crate::state::State;

/// Translate a terminal event. `None` means quit.
pub fn handle_event(event: &Event, state: &State, now_ms: u64) -> Option<Action> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => handle_key(key, state),
        Event::Mouse(mouse) => Some(handle_mouse(mouse, state, now_ms)),
        _ => Some(Action::None),
    }
}

fn handle_key(key: &KeyEvent, state: &State) -> Option<Action> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    // Global Ctrl shortcuts (always handled first)
    if ctrl {
        return match key.code {
            KeyCode::Char('q') | KeyCode::Char('c') => None,
            KeyCode::Char('s') => Some(Action::Export),
            _ => Some(Action::None),
        };
    }

    // Escape aborts a drag in progress, otherwise drops the selection
    if key.code == KeyCode::Esc {
        return Some(if state.drag.is_some() { Action::CancelDrag } else { Action::ClearSelection });
    }

    let shift = key.modifiers.contains(KeyModifiers::SHIFT);
    let action = match key.code {
        KeyCode::Char('q') => return None,
        KeyCode::Char(c @ '1'..='9') => Action::PlaceIndex(c as usize - '1' as usize),
        KeyCode::Tab if shift => Action::SelectPrev,
        KeyCode::Tab => Action::SelectNext,
        KeyCode::BackTab => Action::SelectPrev, // Shift+Tab on some terminals
        KeyCode::Left => Action::Nudge { dx: -GRID_SIZE, dy: 0 },
        KeyCode::Right => Action::Nudge { dx: GRID_SIZE, dy: 0 },
        KeyCode::Up => Action::Nudge { dx: 0, dy: -GRID_SIZE },
        KeyCode::Down => Action::Nudge { dx: 0, dy: GRID_SIZE },
        KeyCode::Delete | KeyCode::Backspace | KeyCode::Char('x') => Action::DeleteSelected,
        KeyCode::Char('e') => Action::Export,
        KeyCode::Char('t') => Action::CycleTheme,
        _ => Action::None,
    };
    Some(action)
}
