use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    text::Span,
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::ui::layout::centered_rect;
use crate::ui::theme::Theme;
use crate::ui::widgets::hint_line;

/// Shown instead of the menu when the artifacts could not be loaded.
pub struct UnavailableState {
    pub reason: String,
}

impl UnavailableState {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Returns whether the key closes the application.
pub fn handle_key(key: KeyCode) -> bool {
    matches!(key, KeyCode::Char('q') | KeyCode::Esc | KeyCode::Enter)
}

pub fn draw(f: &mut Frame, state: &UnavailableState) {
    let area = f.size();
    f.render_widget(Block::default().style(Theme::base()), area);

    let outer = centered_rect(60, 60, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(4),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(outer);

    f.render_widget(
        Paragraph::new(Span::styled("Predictions unavailable", Theme::error())),
        chunks[0],
    );

    f.render_widget(
        Paragraph::new(state.reason.as_str())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Theme::error())
                    .title(" Error ")
                    .title_style(Theme::error()),
            )
            .style(Theme::text())
            .wrap(Wrap { trim: true }),
        chunks[1],
    );

    f.render_widget(hint_line(&[("q / esc", "quit")]), chunks[3]);
}
