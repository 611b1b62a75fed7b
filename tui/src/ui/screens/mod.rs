pub mod manual;
pub mod menu;
pub mod results;
pub mod unavailable;
pub mod upload;

use crossterm::event::KeyCode;
use ratatui::Frame;

use crate::state::session::Session;

pub enum Action {
    None,
    Quit,
    Transition(Screen),
}

pub enum Screen {
    Menu(menu::MenuState),
    Upload(upload::UploadState),
    Results(results::ResultsState),
    Manual(manual::ManualState),
}

impl Screen {
    pub fn menu() -> Self {
        Screen::Menu(menu::MenuState::new())
    }

    pub fn draw(&self, f: &mut Frame) {
        match self {
            Screen::Menu(s) => menu::draw(f, s),
            Screen::Upload(s) => upload::draw(f, s),
            Screen::Results(s) => results::draw(f, s),
            Screen::Manual(s) => manual::draw(f, s),
        }
    }

    pub fn handle_key(&mut self, key: KeyCode, session: &Session) -> Action {
        match self {
            Screen::Menu(s) => menu::handle_key(s, key),
            Screen::Upload(s) => upload::handle_key(s, key, session),
            Screen::Results(s) => results::handle_key(s, key, session),
            Screen::Manual(s) => manual::handle_key(s, key, session),
        }
    }
}
