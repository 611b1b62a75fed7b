use std::path::PathBuf;

use crossterm::event::KeyCode;
use log::{info, warn};
use predictor::BulkPrediction;
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::state::session::Session;
use crate::ui::layout::{self, centered_rect};
use crate::ui::theme::Theme;
use crate::ui::widgets::{draw_error_bar, hint_line, path_input, predictions_table, report_panel};

use super::{upload, Action, Screen};

pub const DEFAULT_EXPORT_PATH: &str = "predictions.csv";

const PAGE: usize = 10;

#[derive(Debug, Clone, PartialEq)]
enum Step {
    Table,
    ExportPath { input: String },
}

pub struct ResultsState {
    pub source: PathBuf,
    pub bulk: BulkPrediction,
    pub selected: usize,
    step: Step,
    pub status: Option<String>,
    pub error: Option<String>,
}

impl ResultsState {
    pub fn new(source: PathBuf, bulk: BulkPrediction) -> Self {
        Self {
            source,
            bulk,
            selected: 0,
            step: Step::Table,
            status: None,
            error: None,
        }
    }

    fn last_row(&self) -> usize {
        self.bulk.len().saturating_sub(1)
    }
}

pub fn handle_key(state: &mut ResultsState, key: KeyCode, session: &Session) -> Action {
    state.error = None;

    match &mut state.step {
        Step::Table => handle_table(state, key),
        Step::ExportPath { input } => match key {
            KeyCode::Char(c) => {
                input.push(c);
                Action::None
            }
            KeyCode::Backspace => {
                input.pop();
                Action::None
            }
            KeyCode::Enter => {
                let path = match input.trim() {
                    "" => PathBuf::from(DEFAULT_EXPORT_PATH),
                    p => PathBuf::from(p),
                };
                export(state, session, path);
                Action::None
            }
            KeyCode::Esc => {
                state.step = Step::Table;
                Action::None
            }
            _ => Action::None,
        },
    }
}

fn handle_table(state: &mut ResultsState, key: KeyCode) -> Action {
    match key {
        KeyCode::Up | KeyCode::Char('k') => state.selected = state.selected.saturating_sub(1),
        KeyCode::Down | KeyCode::Char('j') => {
            state.selected = (state.selected + 1).min(state.last_row())
        }
        KeyCode::PageUp => state.selected = state.selected.saturating_sub(PAGE),
        KeyCode::PageDown => state.selected = (state.selected + PAGE).min(state.last_row()),
        KeyCode::Home => state.selected = 0,
        KeyCode::End => state.selected = state.last_row(),
        KeyCode::Char('d') | KeyCode::Char('s') => {
            state.status = None;
            state.step = Step::ExportPath {
                input: String::new(),
            };
        }
        KeyCode::Esc | KeyCode::Char('b') => {
            return Action::Transition(Screen::Upload(upload::UploadState::new()))
        }
        KeyCode::Char('m') => return Action::Transition(Screen::menu()),
        KeyCode::Char('q') => return Action::Quit,
        _ => {}
    }

    Action::None
}

fn export(state: &mut ResultsState, session: &Session, path: PathBuf) {
    match session.export(&state.bulk, &path) {
        Ok(()) => {
            info!("saved predictions to {}", path.display());
            state.status = Some(format!(
                "saved {} row(s) to {}",
                state.bulk.len(),
                path.display()
            ));
            state.step = Step::Table;
        }
        Err(e) => {
            warn!("export to {} failed: {e}", path.display());
            state.error = Some(e.to_string());
        }
    }
}

pub fn draw(f: &mut Frame, state: &ResultsState) {
    let area = f.size();
    f.render_widget(Block::default().style(Theme::base()), area);

    let messages = state.bulk.report.messages();
    let regions = layout::results(area, messages.len());

    draw_header(f, regions.header, state);

    if state.bulk.is_empty() {
        f.render_widget(
            Paragraph::new(Span::styled("the upload has no rows", Theme::muted()))
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).border_style(Theme::border())),
            regions.table,
        );
    } else {
        f.render_widget(
            predictions_table(&state.bulk, state.selected, regions.table.height),
            regions.table,
        );
    }

    if let Some(report) = regions.report {
        f.render_widget(report_panel(&state.bulk.report), report);
    }

    f.render_widget(
        hint_line(&[
            ("↑↓", "scroll"),
            ("d", "download csv"),
            ("esc", "new upload"),
            ("m", "menu"),
            ("q", "quit"),
        ]),
        regions.footer,
    );

    if let Step::ExportPath { input } = &state.step {
        draw_export_prompt(f, area, input);
    }

    if let Some(err) = &state.error {
        draw_error_bar(f, area, err);
    }
}

fn draw_header(f: &mut Frame, area: Rect, state: &ResultsState) {
    let mut spans = vec![
        Span::styled("Predictions", Theme::title()),
        Span::styled(format!("  {}", state.source.display()), Theme::dim()),
    ];
    if let Some(status) = &state.status {
        spans.push(Span::styled(format!("  ✔ {status}"), Theme::ok()));
    }

    f.render_widget(
        Paragraph::new(Line::from(spans))
            .block(Block::default().borders(Borders::ALL).border_style(Theme::border())),
        area,
    );
}

fn draw_export_prompt(f: &mut Frame, area: Rect, input: &str) {
    let popup = centered_rect(50, 20, area);
    let popup = Rect {
        height: popup.height.max(4),
        ..popup
    };

    f.render_widget(Clear, popup);
    f.render_widget(Block::default().style(Theme::base()), popup);

    let input_area = Rect { height: 3, ..popup };
    f.render_widget(
        path_input("save predictions as", input, DEFAULT_EXPORT_PATH),
        input_area,
    );

    let hint_area = Rect {
        y: popup.y + 3,
        height: 1,
        ..popup
    };
    f.render_widget(hint_line(&[("enter", "save"), ("esc", "cancel")]), hint_area);
}

#[cfg(test)]
mod tests {
    use std::fs;

    use predictor::{FeatureFrame, PreprocessReport, Strictness};
    use tempfile::TempDir;

    use super::*;
    use crate::state::session::fixtures::session;
    use crate::ui::widgets::testing::{render, text};

    fn state(rows: usize) -> ResultsState {
        let bulk = BulkPrediction {
            frame: FeatureFrame::from_rows((0..rows).map(|_| [1.0; 9])),
            predictions: vec![2.0; rows],
            report: PreprocessReport {
                unknown_categories: vec![(1, "MOON".into())],
                ..Default::default()
            },
        };
        ResultsState::new(PathBuf::from("houses.csv"), bulk)
    }

    #[test]
    fn selection_stays_within_the_table() {
        let session = session(Strictness::Lenient);
        let mut state = state(25);

        handle_key(&mut state, KeyCode::Up, &session);
        assert_eq!(state.selected, 0);

        handle_key(&mut state, KeyCode::PageDown, &session);
        handle_key(&mut state, KeyCode::PageDown, &session);
        handle_key(&mut state, KeyCode::PageDown, &session);
        assert_eq!(state.selected, 24);

        handle_key(&mut state, KeyCode::Home, &session);
        assert_eq!(state.selected, 0);
    }

    #[test]
    fn empty_results_do_not_move() {
        let session = session(Strictness::Lenient);
        let mut state = state(0);

        handle_key(&mut state, KeyCode::Down, &session);
        handle_key(&mut state, KeyCode::End, &session);

        assert_eq!(state.selected, 0);
        let screen = text(&render(100, 20, |f| draw(f, &state)));
        assert!(screen.contains("the upload has no rows"));
    }

    #[test]
    fn download_writes_the_augmented_table() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("out.csv");
        let session = session(Strictness::Lenient);
        let mut state = state(2);

        handle_key(&mut state, KeyCode::Char('d'), &session);
        for c in target.to_str().unwrap().chars() {
            handle_key(&mut state, KeyCode::Char(c), &session);
        }
        handle_key(&mut state, KeyCode::Enter, &session);

        assert_eq!(state.step, Step::Table);
        assert!(state.status.as_deref().unwrap().starts_with("saved 2 row(s)"));

        let written = fs::read_to_string(&target).unwrap();
        let mut lines = written.lines();
        assert!(lines.next().unwrap().ends_with("Predicted_Price"));
        assert_eq!(lines.next(), Some("1,1,1,1,1,1,1,1,1,2"));
    }

    #[test]
    fn failed_download_keeps_the_prompt_open() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("missing").join("out.csv");
        let session = session(Strictness::Lenient);
        let mut state = state(1);

        handle_key(&mut state, KeyCode::Char('d'), &session);
        for c in target.to_str().unwrap().chars() {
            handle_key(&mut state, KeyCode::Char(c), &session);
        }
        handle_key(&mut state, KeyCode::Enter, &session);

        assert!(matches!(state.step, Step::ExportPath { .. }));
        assert!(state.error.is_some());

        handle_key(&mut state, KeyCode::Esc, &session);
        assert_eq!(state.step, Step::Table);
    }

    #[test]
    fn navigation_keys_leave_the_screen() {
        let session = session(Strictness::Lenient);

        assert!(matches!(
            handle_key(&mut state(1), KeyCode::Esc, &session),
            Action::Transition(Screen::Upload(_))
        ));
        assert!(matches!(
            handle_key(&mut state(1), KeyCode::Char('m'), &session),
            Action::Transition(Screen::Menu(_))
        ));
        assert!(matches!(
            handle_key(&mut state(1), KeyCode::Char('q'), &session),
            Action::Quit
        ));
    }

    #[test]
    fn draws_table_and_report() {
        let state = state(3);

        let screen = text(&render(160, 30, |f| draw(f, &state)));

        assert!(screen.contains("houses.csv"));
        assert!(screen.contains("Predicted_Price"));
        assert!(screen.contains("Preprocessing"));
        assert!(screen.contains("unknown ocean_proximity mapped to 0 in rows: 1"));
    }
}
