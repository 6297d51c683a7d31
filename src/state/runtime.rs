use std::path::PathBuf;

use chrono::{DateTime, Local};
use ratatui::layout::Rect;

use sb_base::config::PaletteConfig;
use sb_base::{Board, StickerId};

/// An in-progress pointer drag of one sticker
#[derive(Debug, Clone, PartialEq)]
pub struct DragState {
    pub id: StickerId,
    /// Pointer offset from the sticker's top-left corner, in board pixels
    pub grab_x: i64,
    pub grab_y: i64,
    /// Unsnapped position the sticker would drop at
    pub raw_x: f64,
    pub raw_y: f64,
    /// False until the pointer actually moves; a plain click never moves
    pub moved: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Error,
}

#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub level: StatusLevel,
    pub at: DateTime<Local>,
}

/// Runtime state of one board session
pub struct State {
    pub board: Board,
    pub palette: PaletteConfig,
    pub selected: Option<StickerId>,
    pub drag: Option<DragState>,
    /// Last press on a sticker and its time (ms), for double-click detection
    pub last_press: Option<(StickerId, u64)>,
    pub status: Option<StatusMessage>,
    /// Where exports are written
    pub output_dir: PathBuf,
    /// Board area (inside the border) from the last render, in terminal cells
    pub board_area: Rect,
    /// Toolbar area from the last render
    pub toolbar_area: Rect,
    /// Whether UI needs to be redrawn
    pub dirty: bool,
}

impl State {
    pub fn new(palette: PaletteConfig, output_dir: PathBuf) -> Self {
        Self {
            board: Board::new(),
            palette,
            selected: None,
            drag: None,
            last_press: None,
            status: None,
            output_dir,
            board_area: Rect::default(),
            toolbar_area: Rect::default(),
            dirty: true,
        }
    }

    pub fn set_status(&mut self, level: StatusLevel, text: impl Into<String>) {
        self.status = Some(StatusMessage { text: text.into(), level, at: Local::now() });
        self.dirty = true;
    }

    /// Index of the selected sticker in board order
    pub fn selected_index(&self) -> Option<usize> {
        let id = self.selected?;
        self.board.iter().position(|s| s.id() == id)
    }

    /// Position to draw a sticker at: the drag preview while dragging,
    /// otherwise its board position
    pub fn display_position(&self, id: StickerId) -> Option<(i64, i64)> {
        if let Some(drag) = &self.drag
            && drag.id == id
            && drag.moved
        {
            return Some((drag.raw_x.round() as i64, drag.raw_y.round() as i64));
        }
        self.board.get(id).map(|s| s.position())
    }
}
