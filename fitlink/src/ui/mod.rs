pub mod components;
pub mod layouts;
pub mod theme;

use crate::state::{AppState, FlowPhase, LoadingState, StatusMessage};
use components::{help_bar, screen_title};
use ratatui::{
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Pure render function. Never mutates state.
pub fn render_app(f: &mut Frame, state: &AppState) {
    let (title_area, content_area, help_area) = layouts::screen_layout(f.area());

    screen_title::render_screen_title(f, title_area, "fitlink", &state.steps_loading);

    let paragraph = Paragraph::new(dashboard_lines(state))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title(" Fitbit ")
                .borders(Borders::ALL)
                .border_style(theme::accent_border_style()),
        );
    f.render_widget(paragraph, content_area);

    help_bar::render_help_bar(f, help_area, help_bar::DASHBOARD_KEYS);
}

fn dashboard_lines(state: &AppState) -> Vec<Line<'_>> {
    let mut lines = vec![Line::from(format!("Status: {}", state.phase.label()))];

    let steps = match (&state.steps, &state.steps_loading) {
        (Some(today), _) => Span::styled(today.steps.to_string(), theme::metric_style()),
        (None, LoadingState::Loading(_)) => Span::styled("loading…", theme::loading_style()),
        (None, _) => Span::styled("-", theme::help_text_style()),
    };
    lines.push(Line::from(vec![Span::raw("Steps today: "), steps]));
    lines.push(Line::default());

    if state.phase == FlowPhase::AwaitingCallback {
        if let Some(url) = &state.authorization_url {
            lines.push(Line::styled(
                "If the browser did not open, visit:",
                theme::help_text_style(),
            ));
            lines.push(Line::from(url.as_str()));
        }
    }

    match &state.listener_addr {
        Some(addr) => lines.push(Line::styled(
            format!("Listening for the Fitbit redirect on {}", addr),
            theme::help_text_style(),
        )),
        None => lines.push(Line::styled(
            "Callback listener not running",
            theme::help_text_style(),
        )),
    }

    match &state.status {
        Some(StatusMessage::Info(msg)) => {
            lines.push(Line::styled(msg.as_str(), theme::success_style()))
        }
        Some(StatusMessage::Error(msg)) => {
            lines.push(Line::styled(msg.as_str(), theme::error_style()))
        }
        None => {}
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::StepsToday;
    use chrono::NaiveDate;
    use ratatui::{backend::TestBackend, Terminal};

    fn render_to_string(state: &AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 24)).unwrap();
        terminal.draw(|f| render_app(f, state)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn shows_step_count() {
        let mut state = AppState::new();
        state.phase = FlowPhase::Ready;
        state.steps = Some(StepsToday {
            date: NaiveDate::from_ymd_opt(2025, 9, 19).unwrap(),
            steps: 4321,
        });
        state.steps_loading = LoadingState::Loaded;

        let screen = render_to_string(&state);

        assert!(screen.contains("Steps today: 4321"));
        assert!(screen.contains("Status: Connected"));
        assert!(screen.contains("c: connect Fitbit"));
    }

    #[test]
    fn shows_error_status() {
        let mut state = AppState::new();
        state.status = Some(StatusMessage::Error("Authorization failed".to_string()));

        let screen = render_to_string(&state);

        assert!(screen.contains("Authorization failed"));
        assert!(screen.contains("Status: Not connected"));
    }
}
