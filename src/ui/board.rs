use ratatui::{
    prelude::*,
    widgets::{Block, Borders},
};

use sb_base::config::{chars, theme};
use sb_base::constants::{BOARD_HEIGHT, BOARD_WIDTH, GRID_SIZE, STICKER_SIZE};

use super::helpers::contrast_text;
use crate::infra::constants::{CELL_HEIGHT_PX, CELL_WIDTH_PX};
use crate::infra::images::ImageCache;
use crate::state::State;
use crate::state::viewport::board_to_cell;

/// Board size in terminal cells, border excluded
pub const BOARD_COLUMNS: u16 = (BOARD_WIDTH / CELL_WIDTH_PX) as u16;
pub const BOARD_ROWS: u16 = (BOARD_HEIGHT / CELL_HEIGHT_PX) as u16;

const STICKER_COLUMNS: i64 = STICKER_SIZE / CELL_WIDTH_PX;
const STICKER_ROWS: i64 = STICKER_SIZE / CELL_HEIGHT_PX;

/// Draw the bordered board and record its inner area for pointer mapping.
pub fn render_board(frame: &mut Frame, state: &mut State, images: &ImageCache, area: Rect) {
    let outer = Rect {
        x: area.x,
        y: area.y,
        width: area.width.min(BOARD_COLUMNS + 2),
        height: area.height.min(BOARD_ROWS + 2),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::border()))
        .title(Span::styled(" BOARD ", Style::default().fg(theme::text_muted()).bold()));
    let inner = block.inner(outer);
    frame.render_widget(block, outer);

    // Pointer mapping uses the full board size even when the terminal clips it
    state.board_area = Rect { x: inner.x, y: inner.y, width: BOARD_COLUMNS, height: BOARD_ROWS };

    let buf = frame.buffer_mut();
    draw_grid(buf, inner);
    for sticker in state.board.iter() {
        let Some((x, y)) = state.display_position(sticker.id()) else { continue };
        let selected = state.selected == Some(sticker.id());
        let dragging = state.drag.as_ref().is_some_and(|d| d.id == sticker.id() && d.moved);
        let color = images.tint(sticker.source()).unwrap_or([128, 128, 128]);
        let glyph = state.palette.get(sticker.source()).map(|e| e.glyph.as_str()).unwrap_or("?");
        let look = StickerLook { color, glyph, selected, dragging };
        draw_sticker(buf, inner, state.board_area, x, y, &look);
    }
}

fn draw_grid(buf: &mut Buffer, clip: Rect) {
    let base = Style::default().bg(theme::bg_board());
    let dot = Style::default().fg(theme::grid()).bg(theme::bg_board());
    let step_x = (GRID_SIZE / CELL_WIDTH_PX) as u16;
    let step_y = (GRID_SIZE / CELL_HEIGHT_PX) as u16;

    for row in clip.y..clip.y + clip.height {
        for column in clip.x..clip.x + clip.width {
            let Some(cell) = buf.cell_mut((column, row)) else { continue };
            let on_grid = (column - clip.x) % step_x == 0 && (row - clip.y) % step_y == 0;
            if on_grid {
                cell.set_symbol(chars::GRID_DOT).set_style(dot);
            } else {
                cell.set_symbol(" ").set_style(base);
            }
        }
    }
}

struct StickerLook<'a> {
    color: [u8; 3],
    glyph: &'a str,
    selected: bool,
    dragging: bool,
}

/// Paint one sticker as a block of cells. Cells outside `clip` are skipped.
fn draw_sticker(buf: &mut Buffer, clip: Rect, board: Rect, x: i64, y: i64, look: &StickerLook) {
    let (left, top) = board_to_cell(board, x, y);
    let bg = theme::rgb(look.color);
    let fg = if look.selected { theme::accent() } else { contrast_text(look.color) };
    let mut style = Style::default().bg(bg).fg(fg);
    if look.dragging {
        style = style.add_modifier(Modifier::DIM);
    }

    for dy in 0..STICKER_ROWS {
        for dx in 0..STICKER_COLUMNS {
            let (column, row) = (left + dx, top + dy);
            if column < clip.x as i64
                || row < clip.y as i64
                || column >= (clip.x + clip.width) as i64
                || row >= (clip.y + clip.height) as i64
            {
                continue;
            }
            let Some(cell) = buf.cell_mut((column as u16, row as u16)) else { continue };
            let symbol = sticker_symbol(dx, dy, look);
            cell.set_symbol(symbol).set_style(style);
        }
    }
}

/// Glyph in the first row, corner marks when selected
fn sticker_symbol<'a>(dx: i64, dy: i64, look: &StickerLook<'a>) -> &'a str {
    let last_x = STICKER_COLUMNS - 1;
    let last_y = STICKER_ROWS - 1;
    if look.selected {
        match (dx, dy) {
            (0, 0) => return "┌",
            (x, 0) if x == last_x => return "┐",
            (0, y) if y == last_y => return "└",
            (x, y) if x == last_x && y == last_y => return "┘",
            _ => {}
        }
    }
    if dx == 1 && dy == 0 { look.glyph } else { " " }
}
