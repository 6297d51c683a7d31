mod board;
mod helpers;
mod status;
pub mod toolbar;

use ratatui::{prelude::*, widgets::Block};

use sb_base::config::theme;

use crate::infra::constants::TOOLBAR_WIDTH;
use crate::infra::images::ImageCache;
use crate::state::State;

pub fn render(frame: &mut Frame, state: &mut State, images: &ImageCache) {
    let area = frame.area();

    // Fill base background
    frame.render_widget(Block::default().style(Style::default().bg(theme::bg_base())), area);

    // Main layout: body + footer
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),    // Body
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    render_body(frame, state, images, main_layout[0]);
    status::render_status_bar(frame, state, main_layout[1]);
}

fn render_body(frame: &mut Frame, state: &mut State, images: &ImageCache, area: Rect) {
    // Body layout: toolbar + board
    let body_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(TOOLBAR_WIDTH), // Toolbar
            Constraint::Min(1),                // Board
        ])
        .split(area);

    state.toolbar_area = body_layout[0];
    toolbar::render_toolbar(frame, state, images, body_layout[0]);
    board::render_board(frame, state, images, body_layout[1]);
}
