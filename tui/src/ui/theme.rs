use ratatui::style::{Color, Modifier, Style};

/// Slate and amber theme.
///
/// - light slate text on a near-black background
/// - amber for titles, focus and the predicted price
/// - red and yellow reserved for errors and preprocessing warnings
pub struct Theme;

impl Theme {
    pub const BG: Color = Color::Rgb(12, 14, 18);
    pub const FG: Color = Color::Rgb(214, 222, 235);
    pub const FG_DIM: Color = Color::Rgb(140, 150, 168);
    pub const FG_MUTED: Color = Color::Rgb(78, 86, 100);

    pub const AMBER: Color = Color::Rgb(255, 184, 76);
    pub const TEAL: Color = Color::Rgb(72, 209, 204);
    pub const YELLOW: Color = Color::Rgb(240, 220, 90);
    pub const RED: Color = Color::Rgb(255, 86, 86);

    /// Default full-screen style.
    pub fn base() -> Style {
        Style::default().fg(Self::FG).bg(Self::BG)
    }

    pub fn border() -> Style {
        Style::default().fg(Self::FG_MUTED).bg(Self::BG)
    }

    /// Border of whatever currently has focus.
    pub fn border_focus() -> Style {
        Style::default().fg(Self::AMBER).bg(Self::BG)
    }

    pub fn title() -> Style {
        Style::default().fg(Self::AMBER).add_modifier(Modifier::BOLD)
    }

    pub fn text() -> Style {
        Style::default().fg(Self::FG)
    }

    pub fn dim() -> Style {
        Style::default().fg(Self::FG_DIM)
    }

    pub fn muted() -> Style {
        Style::default().fg(Self::FG_MUTED)
    }

    /// Selected table row.
    pub fn highlight() -> Style {
        Style::default()
            .bg(Color::Rgb(38, 42, 54))
            .add_modifier(Modifier::BOLD)
    }

    /// Keys in the hint rows.
    pub fn key() -> Style {
        Style::default().fg(Self::TEAL).add_modifier(Modifier::BOLD)
    }

    pub fn price() -> Style {
        Style::default().fg(Self::AMBER).add_modifier(Modifier::BOLD)
    }

    pub fn ok() -> Style {
        Style::default().fg(Self::TEAL)
    }

    pub fn warn() -> Style {
        Style::default()
            .fg(Self::YELLOW)
            .add_modifier(Modifier::BOLD)
    }

    pub fn error() -> Style {
        Style::default().fg(Self::RED).add_modifier(Modifier::BOLD)
    }
}
