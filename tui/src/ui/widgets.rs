use predictor::features::PREDICTION_COLUMN;
use predictor::{BulkPrediction, PreprocessReport, FEATURE_NAMES};
use ratatui::{
    layout::{Alignment, Constraint, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Row, Table, Wrap},
    Frame,
};

use super::theme::Theme;

/// One line of `key  action` pairs.
pub fn hint_line<'a>(hints: &[(&'a str, &'a str)]) -> Paragraph<'a> {
    let spans = hints
        .iter()
        .flat_map(|(key, action)| {
            [
                Span::styled(*key, Theme::key()),
                Span::styled(format!(" {action}    "), Theme::muted()),
            ]
        })
        .collect::<Vec<_>>();

    Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
}

/// Overlays an error message on the last row of `area`.
pub fn draw_error_bar(f: &mut Frame, area: Rect, msg: &str) {
    if area.height == 0 {
        return;
    }

    let bar = Rect {
        x: area.x + 1,
        y: area.y + area.height - 1,
        width: area.width.saturating_sub(2),
        height: 1,
    };
    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(" ✖ ", Theme::error()),
            Span::styled(msg, Theme::error()),
        ])),
        bar,
    );
}

/// A bordered single-line text input with a block cursor.
///
/// An empty input shows `placeholder` instead.
pub fn path_input<'a>(label: &'a str, current: &'a str, placeholder: &'a str) -> Paragraph<'a> {
    let line = if current.is_empty() {
        Line::from(vec![
            Span::styled(placeholder, Theme::muted()),
            Span::styled("█", Theme::key()),
        ])
    } else {
        Line::from(vec![
            Span::styled(current, Theme::text()),
            Span::styled("█", Theme::key()),
        ])
    };

    Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Theme::border_focus())
            .title(format!(" {label} "))
            .title_style(Theme::title()),
    )
}

/// The uploaded rows with their predictions, scrolled so `selected` is visible.
pub fn predictions_table<'a>(bulk: &BulkPrediction, selected: usize, height: u16) -> Table<'a> {
    // Borders and the header row.
    let visible = usize::from(height.saturating_sub(3)).max(1);
    let offset = selected.saturating_sub(visible - 1);

    let header = Row::new(
        std::iter::once("#")
            .chain(FEATURE_NAMES)
            .chain(std::iter::once(PREDICTION_COLUMN)),
    )
    .style(Theme::title());

    let rows = bulk
        .rows()
        .into_iter()
        .enumerate()
        .skip(offset)
        .take(visible)
        .map(|(i, cells)| {
            let row = Row::new(std::iter::once((i + 1).to_string()).chain(cells));
            if i == selected {
                row.style(Theme::highlight())
            } else {
                row.style(Theme::text())
            }
        })
        .collect::<Vec<_>>();

    let widths = std::iter::once(Constraint::Length(5))
        .chain(FEATURE_NAMES.iter().map(|_| Constraint::Min(7)))
        .chain(std::iter::once(Constraint::Min(12)))
        .collect::<Vec<_>>();

    Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Theme::border())
            .title(format!(" Predictions ({}) ", bulk.len()))
            .title_style(Theme::title()),
    )
}

/// What preprocessing had to fill in or throw away.
pub fn report_panel(report: &PreprocessReport) -> Paragraph<'static> {
    let lines = report
        .messages()
        .into_iter()
        .map(|m| Line::from(Span::styled(m, Theme::warn())))
        .collect::<Vec<_>>();

    Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Theme::border())
                .title(" Preprocessing ")
                .title_style(Theme::warn()),
        )
        .wrap(Wrap { trim: true })
}

#[cfg(test)]
pub mod testing {
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

    /// Renders with `draw` on a fresh `width` x `height` terminal.
    pub fn render<F>(width: u16, height: u16, draw: F) -> Buffer
    where
        F: FnOnce(&mut ratatui::Frame),
    {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(draw).unwrap();
        terminal.backend().buffer().clone()
    }

    /// The buffer's rows joined with newlines.
    pub fn text(buffer: &Buffer) -> String {
        let width = usize::from(buffer.area.width);
        buffer
            .content
            .chunks(width)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
