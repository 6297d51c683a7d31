use ratatui::{prelude::*, widgets::Paragraph};

use sb_base::config::{chars, theme};

use super::helpers::truncate_string;
use crate::infra::constants::TOOLBAR_LIST_START_ROW;
use crate::infra::images::ImageCache;
use crate::state::State;

/// Row (relative to the toolbar) of the Export button
pub fn export_button_row(palette_len: usize) -> u16 {
    TOOLBAR_LIST_START_ROW + palette_len as u16 + 1
}

pub fn render_toolbar(frame: &mut Frame, state: &State, images: &ImageCache, area: Rect) {
    let base_style = Style::default().bg(theme::bg_base());
    // Key, glyph and marker columns take the rest
    let name_width = (area.width as usize).saturating_sub(8);

    let mut lines: Vec<Line> = vec![
        Line::from(vec![
            Span::styled("  ", base_style),
            Span::styled("STICKERS", Style::default().fg(theme::text_muted()).bold()),
        ]),
        Line::from(""),
    ];

    for (i, entry) in state.palette.stickers.iter().enumerate() {
        let source = entry.source();
        let (marker, marker_color) = if images.is_pending(&source) {
            ("…", theme::text_muted())
        } else if images.get(&source).is_some_and(|img| img.placeholder) {
            ("!", theme::warning())
        } else {
            ("", theme::text_muted())
        };
        let key = if i < 9 { format!("{}", i + 1) } else { " ".to_string() };
        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", key), Style::default().fg(theme::text_muted())),
            Span::styled(entry.glyph.clone(), Style::default().fg(theme::rgb(entry.color)).bold()),
            Span::styled(" ", base_style),
            Span::styled(truncate_string(&entry.name, name_width), Style::default().fg(theme::text())),
            Span::styled(marker, Style::default().fg(marker_color).bold()),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled(" ", base_style),
        Span::styled(format!("{} Export", chars::ARROW_RIGHT), Style::default().fg(theme::accent()).bold()),
    ]));

    frame.render_widget(Paragraph::new(lines).style(base_style), area);
}
