//! Bottom key hints.

use ratatui::prelude::Rect;
use ratatui::{
    layout::Alignment,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::ui::theme;

/// Key bindings shown on the dashboard, as (key, action)
pub const DASHBOARD_KEYS: &[(&str, &str)] = &[
    ("c", "connect Fitbit"),
    ("r", "refresh steps"),
    ("q", "quit"),
];

pub fn render_help_bar(f: &mut Frame, area: Rect, keys: &[(&str, &str)]) {
    let mut spans = Vec::with_capacity(keys.len() * 3);
    for (i, (key, action)) in keys.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" | ", theme::help_text_style()));
        }
        spans.push(Span::styled(
            *key,
            theme::title_style().add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(format!(": {}", action), theme::help_text_style()));
    }

    let help = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(help, area);
}
