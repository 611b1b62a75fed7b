use std::path::PathBuf;

use crossterm::event::KeyCode;
use log::warn;
use predictor::FEATURE_NAMES;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    text::Span,
    widgets::{Block, Paragraph, Wrap},
    Frame,
};

use crate::state::session::Session;
use crate::ui::layout::centered_rect;
use crate::ui::theme::Theme;
use crate::ui::widgets::{draw_error_bar, hint_line, path_input};

use super::{results, Action, Screen};

pub struct UploadState {
    pub path: String,
    pub error: Option<String>,
}

impl UploadState {
    pub fn new() -> Self {
        Self {
            path: String::new(),
            error: None,
        }
    }
}

pub fn handle_key(state: &mut UploadState, key: KeyCode, session: &Session) -> Action {
    state.error = None;

    match key {
        KeyCode::Char(c) => {
            state.path.push(c);
            Action::None
        }
        KeyCode::Backspace => {
            state.path.pop();
            Action::None
        }
        KeyCode::Enter => try_predict(state, session),
        KeyCode::Esc => Action::Transition(Screen::menu()),
        _ => Action::None,
    }
}

fn try_predict(state: &mut UploadState, session: &Session) -> Action {
    let path = state.path.trim();
    if path.is_empty() {
        state.error = Some("enter the path of a CSV file".into());
        return Action::None;
    }

    let path = PathBuf::from(path);
    match session.predict_file(&path) {
        Ok(bulk) => Action::Transition(Screen::Results(results::ResultsState::new(path, bulk))),
        Err(e) => {
            warn!("upload of {} failed: {e}", path.display());
            state.error = Some(e.to_string());
            Action::None
        }
    }
}

pub fn draw(f: &mut Frame, state: &UploadState) {
    let area = f.size();
    f.render_widget(Block::default().style(Theme::base()), area);

    let outer = centered_rect(60, 70, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // title
            Constraint::Length(1), // subtitle
            Constraint::Length(2),
            Constraint::Length(3), // input
            Constraint::Length(1),
            Constraint::Length(4), // expected columns
            Constraint::Min(0),
            Constraint::Length(1), // hints
        ])
        .split(outer);

    f.render_widget(
        Paragraph::new(Span::styled("Upload CSV File", Theme::title())),
        chunks[0],
    );
    f.render_widget(
        Paragraph::new(Span::styled(
            "Upload a CSV file with housing features",
            Theme::dim(),
        )),
        chunks[1],
    );
    f.render_widget(path_input("CSV path", &state.path, "houses.csv"), chunks[3]);

    let note = format!("expected columns: {}", FEATURE_NAMES.join(", "));
    f.render_widget(
        Paragraph::new(Span::styled(note, Theme::muted())).wrap(Wrap { trim: true }),
        chunks[5],
    );

    f.render_widget(hint_line(&[("enter", "predict"), ("esc", "back")]), chunks[7]);

    if let Some(err) = &state.error {
        draw_error_bar(f, area, err);
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use predictor::Strictness;
    use tempfile::TempDir;

    use super::*;
    use crate::state::session::fixtures::session;
    use crate::ui::widgets::testing::{render, text};

    fn type_path(state: &mut UploadState, path: &str, session: &Session) {
        for c in path.chars() {
            handle_key(state, KeyCode::Char(c), session);
        }
    }

    #[test]
    fn empty_path_is_rejected() {
        let session = session(Strictness::Lenient);
        let mut state = UploadState::new();

        assert!(matches!(handle_key(&mut state, KeyCode::Enter, &session), Action::None));
        assert_eq!(state.error.as_deref(), Some("enter the path of a CSV file"));
    }

    #[test]
    fn typing_edits_the_path_and_q_is_just_a_letter() {
        let session = session(Strictness::Lenient);
        let mut state = UploadState::new();

        type_path(&mut state, "q.csvx", &session);
        handle_key(&mut state, KeyCode::Backspace, &session);

        assert_eq!(state.path, "q.csv");
    }

    #[test]
    fn valid_upload_moves_to_results() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("houses.csv");
        fs::write(&input, "median_income,ocean_proximity\n4.5,NEAR BAY\n").unwrap();

        let session = session(Strictness::Lenient);
        let mut state = UploadState::new();
        type_path(&mut state, input.to_str().unwrap(), &session);

        match handle_key(&mut state, KeyCode::Enter, &session) {
            Action::Transition(Screen::Results(results)) => {
                assert_eq!(results.bulk.predictions, vec![148_000.0]);
                assert!(results.bulk.report.has_imputations());
            }
            _ => panic!("expected the results screen"),
        }
    }

    #[test]
    fn failed_upload_stays_and_shows_the_error() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("bad.csv");
        fs::write(&input, "median_income\nabc\n").unwrap();

        let session = session(Strictness::Lenient);
        let mut state = UploadState::new();
        type_path(&mut state, input.to_str().unwrap(), &session);

        assert!(matches!(handle_key(&mut state, KeyCode::Enter, &session), Action::None));
        let err = state.error.clone().unwrap();
        assert!(err.contains("median_income"), "{err}");

        let screen = text(&render(120, 30, |f| draw(f, &state)));
        assert!(screen.contains("✖"));
    }

    #[test]
    fn esc_goes_back_to_the_menu() {
        let session = session(Strictness::Lenient);
        let mut state = UploadState::new();

        assert!(matches!(
            handle_key(&mut state, KeyCode::Esc, &session),
            Action::Transition(Screen::Menu(_))
        ));
    }
}
