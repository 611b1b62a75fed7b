use crossterm::event::KeyCode;
use log::{debug, warn};
use predictor::{price_message, ManualInput, OceanProximity};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::state::session::Session;
use crate::ui::layout::centered_rect;
use crate::ui::theme::Theme;
use crate::ui::widgets::{draw_error_bar, hint_line};

use super::{Action, Screen};

const LABELS: [&str; 8] = [
    "Longitude",
    "Latitude",
    "Housing Median Age",
    "Total Rooms",
    "Total Bedrooms",
    "Population",
    "Households",
    "Median Income",
];

const CATEGORY_LABEL: &str = "Ocean Proximity";

/// Index of the dropdown, after the numeric fields.
const CATEGORY_FIELD: usize = LABELS.len();

pub struct ManualState {
    pub fields: [String; 8],
    pub category: OceanProximity,
    pub focus: usize,
    /// The last rendered prediction line.
    pub result: Option<String>,
    pub error: Option<String>,
}

impl ManualState {
    pub fn new() -> Self {
        let defaults = ManualInput::default();

        Self {
            fields: defaults.numeric_fields().map(|(_, v)| v.to_string()),
            category: defaults.ocean_proximity,
            focus: 0,
            result: None,
            error: None,
        }
    }

    /// Parses the form, naming the first field that is not a number.
    pub fn input(&self) -> Result<ManualInput, String> {
        let mut input = ManualInput {
            ocean_proximity: self.category,
            ..Default::default()
        };

        for (i, (label, raw)) in LABELS.iter().zip(&self.fields).enumerate() {
            let value = raw
                .trim()
                .parse::<f64>()
                .map_err(|_| format!("{label}: '{raw}' is not a number"))?;
            input.set_numeric(i, value);
        }

        Ok(input)
    }

    fn cycle_category(&mut self, forward: bool) {
        let all = OceanProximity::ALL;
        let at = all.iter().position(|c| *c == self.category).unwrap_or(0);
        let next = if forward {
            (at + 1) % all.len()
        } else {
            (at + all.len() - 1) % all.len()
        };
        self.category = all[next];
    }
}

pub fn handle_key(state: &mut ManualState, key: KeyCode, session: &Session) -> Action {
    state.error = None;

    match key {
        KeyCode::Down | KeyCode::Tab => state.focus = (state.focus + 1) % (CATEGORY_FIELD + 1),
        KeyCode::Up | KeyCode::BackTab => {
            state.focus = (state.focus + CATEGORY_FIELD) % (CATEGORY_FIELD + 1)
        }
        KeyCode::Left if state.focus == CATEGORY_FIELD => state.cycle_category(false),
        KeyCode::Right | KeyCode::Char(' ') if state.focus == CATEGORY_FIELD => {
            state.cycle_category(true)
        }
        KeyCode::Char(c) if state.focus < CATEGORY_FIELD && is_numeric_char(c) => {
            state.fields[state.focus].push(c)
        }
        KeyCode::Backspace if state.focus < CATEGORY_FIELD => {
            state.fields[state.focus].pop();
        }
        KeyCode::Enter => predict(state, session),
        KeyCode::Esc => return Action::Transition(Screen::menu()),
        _ => {}
    }

    Action::None
}

fn is_numeric_char(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '-' | '+' | '.' | 'e' | 'E')
}

fn predict(state: &mut ManualState, session: &Session) {
    let input = match state.input() {
        Ok(input) => input,
        Err(e) => {
            state.error = Some(e);
            return;
        }
    };

    match session.predict_manual(&input) {
        Ok(prediction) => {
            debug!("manual prediction {prediction} for {input:?}");
            state.result = Some(price_message(prediction));
        }
        Err(e) => {
            warn!("manual prediction failed: {e}");
            state.error = Some(e.to_string());
        }
    }
}

pub fn draw(f: &mut Frame, state: &ManualState) {
    let area = f.size();
    f.render_widget(Block::default().style(Theme::base()), area);

    let outer = centered_rect(60, 80, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // title
            Constraint::Length(1),
            Constraint::Length(CATEGORY_FIELD as u16 + 3), // form
            Constraint::Length(3),                         // result
            Constraint::Min(0),
            Constraint::Length(1), // hints
        ])
        .split(outer);

    f.render_widget(
        Paragraph::new(Span::styled("Input Features Manually", Theme::title())),
        chunks[0],
    );

    draw_form(f, chunks[2], state);

    if let Some(result) = &state.result {
        f.render_widget(
            Paragraph::new(Span::styled(result.as_str(), Theme::price())).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Theme::border_focus()),
            ),
            chunks[3],
        );
    }

    f.render_widget(
        hint_line(&[
            ("↑↓", "field"),
            ("←→", "proximity"),
            ("enter", "predict"),
            ("esc", "back"),
        ]),
        chunks[5],
    );

    if let Some(err) = &state.error {
        draw_error_bar(f, area, err);
    }
}

fn draw_form(f: &mut Frame, area: Rect, state: &ManualState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Theme::border())
        .title(" Features ")
        .title_style(Theme::title());

    let inner = block.inner(area);
    f.render_widget(block, area);

    let label_width = LABELS
        .iter()
        .chain(std::iter::once(&CATEGORY_LABEL))
        .map(|l| l.len() as u16)
        .max()
        .unwrap_or(0)
        + 2;

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints((0..=CATEGORY_FIELD).map(|_| Constraint::Length(1)))
        .split(inner);

    for (i, row) in rows.iter().enumerate() {
        let focused = i == state.focus;
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(label_width), Constraint::Min(0)])
            .split(*row);

        let label = LABELS.get(i).copied().unwrap_or(CATEGORY_LABEL);
        let label_style = if focused { Theme::title() } else { Theme::dim() };
        f.render_widget(Paragraph::new(Span::styled(label, label_style)), cols[0]);

        let value = if i == CATEGORY_FIELD {
            Line::from(vec![
                Span::styled("◂ ", Theme::key()),
                Span::styled(state.category.label(), Theme::text()),
                Span::styled(" ▸", Theme::key()),
            ])
        } else if focused {
            Line::from(vec![
                Span::styled(state.fields[i].as_str(), Theme::text()),
                Span::styled("█", Theme::key()),
            ])
        } else {
            Line::from(Span::styled(state.fields[i].as_str(), Theme::text()))
        };
        f.render_widget(Paragraph::new(value), cols[1]);
    }
}
