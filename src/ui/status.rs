use ratatui::{prelude::*, widgets::Paragraph};

use sb_base::config::theme;
use sb_base::geometry::is_on_board;

use crate::state::{State, StatusLevel};

const HINTS: &str = "1-3 place · drag move · dbl-click/x delete · e export · t theme · q quit";

pub fn render_status_bar(frame: &mut Frame, state: &State, area: Rect) {
    let base_style = Style::default().bg(theme::bg_base()).fg(theme::text_muted());

    let mut spans = vec![Span::styled(" ", base_style)];

    match &state.status {
        Some(status) => {
            let badge_bg = match status.level {
                StatusLevel::Info => theme::accent(),
                StatusLevel::Error => theme::error(),
            };
            spans.push(Span::styled(
                format!(" {} ", status.at.format("%H:%M:%S")),
                Style::default().fg(theme::bg_base()).bg(badge_bg).bold(),
            ));
            spans.push(Span::styled(format!(" {}", status.text), Style::default().fg(theme::text())));
        }
        None => spans.push(Span::styled(HINTS, base_style)),
    }

    // Right side: selection and count
    let mut right = String::new();
    if let Some(sticker) = state.selected.and_then(|id| state.board.get(id)) {
        right.push_str(&format!("#{} ({}, {})  ", sticker.id(), sticker.x(), sticker.y()));
        if !is_on_board(sticker) {
            right.push_str("off board  ");
        }
    }
    right.push_str(&format!("{} sticker{} ", state.board.len(), if state.board.len() == 1 { "" } else { "s" }));

    let left_width: usize = spans.iter().map(|s| s.width()).sum();
    let padding = (area.width as usize).saturating_sub(left_width + right.chars().count());
    spans.push(Span::styled(" ".repeat(padding), base_style));
    spans.push(Span::styled(right, base_style));

    frame.render_widget(Paragraph::new(Line::from(spans)).style(base_style), area);
}
