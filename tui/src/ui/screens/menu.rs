use crossterm::event::KeyCode;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::ui::layout::centered_rect;
use crate::ui::theme::Theme;
use crate::ui::widgets::hint_line;

use super::{manual, upload, Action, Screen};

const LOGO: &str = r#"
  _  _  ___  _   _ ___ ___ _  _  ___
 | || |/ _ \| | | / __|_ _| \| |/ __|
 | __ | (_) | |_| \__ \| || .` | (_ |
 |_||_|\___/ \___/|___/___|_|\_|\___|
"#;

const TITLE: &str = "California Housing Price Predictor";

/// The two ways of feeding the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMethod {
    UploadCsv,
    Manual,
}

impl InputMethod {
    const ALL: [InputMethod; 2] = [InputMethod::UploadCsv, InputMethod::Manual];

    fn label(self) -> &'static str {
        match self {
            InputMethod::UploadCsv => "Upload CSV File",
            InputMethod::Manual => "Input Features Manually",
        }
    }
}

pub struct MenuState {
    pub selected: usize,
}

impl MenuState {
    pub fn new() -> Self {
        Self { selected: 0 }
    }

    pub fn method(&self) -> InputMethod {
        InputMethod::ALL[self.selected]
    }
}

pub fn handle_key(state: &mut MenuState, key: KeyCode) -> Action {
    match key {
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Left => {
            state.selected = state.selected.saturating_sub(1);
            Action::None
        }
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Right | KeyCode::Tab => {
            state.selected = (state.selected + 1).min(InputMethod::ALL.len() - 1);
            Action::None
        }
        KeyCode::Char('1') => {
            state.selected = 0;
            Action::None
        }
        KeyCode::Char('2') => {
            state.selected = 1;
            Action::None
        }
        KeyCode::Enter => match state.method() {
            InputMethod::UploadCsv => Action::Transition(Screen::Upload(upload::UploadState::new())),
            InputMethod::Manual => Action::Transition(Screen::Manual(manual::ManualState::new())),
        },
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        _ => Action::None,
    }
}

pub fn draw(f: &mut Frame, state: &MenuState) {
    let area = f.size();
    f.render_widget(Block::default().style(Theme::base()), area);

    let outer = centered_rect(60, 70, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6),
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Length(InputMethod::ALL.len() as u16 * 2 + 2),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(outer);

    draw_logo(f, chunks[0]);
    f.render_widget(
        Paragraph::new(Span::styled(TITLE, Theme::title())).alignment(Alignment::Center),
        chunks[1],
    );
    draw_choices(f, chunks[3], state);
    f.render_widget(
        hint_line(&[("↑↓", "choose"), ("enter", "continue"), ("q", "quit")]),
        chunks[5],
    );
}

fn draw_logo(f: &mut Frame, area: Rect) {
    let lines: Vec<Line> = LOGO
        .lines()
        .map(|l| Line::from(Span::styled(l, Theme::dim())))
        .collect();

    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

fn draw_choices(f: &mut Frame, area: Rect, state: &MenuState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Theme::border())
        .title(" Choose input method ")
        .title_alignment(Alignment::Center)
        .title_style(Theme::title());

    let inner = block.inner(area);
    f.render_widget(block, area);

    let item_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(InputMethod::ALL.map(|_| Constraint::Length(2)))
        .split(inner);

    for (i, (method, item_area)) in InputMethod::ALL.iter().zip(item_areas.iter()).enumerate() {
        let (radio, style) = if i == state.selected {
            ("(•) ", Theme::title().add_modifier(Modifier::BOLD))
        } else {
            ("( ) ", Theme::dim())
        };

        let line = Line::from(vec![
            Span::styled(radio, style),
            Span::styled(method.label(), style),
        ]);

        f.render_widget(Paragraph::new(line), *item_area);
    }
}
