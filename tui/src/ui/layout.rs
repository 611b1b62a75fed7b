use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Regions of the results screen.
pub struct ResultsLayout {
    pub header: Rect,
    pub table: Rect,
    pub report: Option<Rect>,
    pub footer: Rect,
}

/// Splits the results screen, giving the report panel one line per message.
pub fn results(area: Rect, report_lines: usize) -> ResultsLayout {
    let mut constraints = vec![Constraint::Length(3), Constraint::Min(6)];
    if report_lines > 0 {
        constraints.push(Constraint::Length(report_lines.min(6) as u16 + 2));
    }
    constraints.push(Constraint::Length(1));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let report = (report_lines > 0).then(|| chunks[2]);

    ResultsLayout {
        header: chunks[0],
        table: chunks[1],
        report,
        footer: chunks[chunks.len() - 1],
    }
}

/// A rectangle of the given percentages centered in `r`.
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vert[1])[1]
}
