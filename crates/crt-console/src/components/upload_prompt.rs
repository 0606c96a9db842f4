//! UploadPrompt component — picks a local file and the name to store it under.
//!
//! Typing a path fills the file-name field with the path's last component;
//! the name can still be edited before submitting.

use std::path::Path;

use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::Style,
    text::Span,
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    components::help_overlay::centered_rect,
    core::Intent,
    theme::{style_muted, C_OVERLAY_BG, C_PANEL_BORDER_FOCUSED},
    widgets::text_field::{FieldAction, TextField},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Path,
    FileName,
}

pub struct UploadPrompt {
    pub visible: bool,
    path: TextField,
    file_name: TextField,
    active: Field,
}

impl UploadPrompt {
    pub fn new() -> Self {
        Self {
            visible: false,
            path: TextField::new("file", "/path/to/video.mp4"),
            file_name: TextField::new("name", "stored as"),
            active: Field::Path,
        }
    }

    pub fn open(&mut self) {
        self.visible = true;
        self.active = Field::Path;
    }

    pub fn close(&mut self) {
        self.visible = false;
    }

    /// Terminal paste goes into the active field.
    pub fn paste(&mut self, text: &str) {
        match self.active {
            Field::Path => {
                if let FieldAction::Changed(path) = self.path.insert_str(text) {
                    self.file_name.set_value(&suggested_file_name(&path));
                }
            }
            Field::FileName => {
                self.file_name.insert_str(text);
            }
        }
    }

    fn submit(&mut self) -> Vec<Action> {
        let intent = Intent::SubmitUpload {
            path: self.path.text().to_string(),
            file_name: self.file_name.text().to_string(),
        };
        if !self.path.text().trim().is_empty() {
            self.path.clear();
            self.file_name.clear();
        }
        vec![Action::Intent(intent), Action::CloseUpload]
    }
}

impl Default for UploadPrompt {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for UploadPrompt {
    fn id(&self) -> ComponentId {
        ComponentId::UploadPrompt
    }

    fn handle_key(&mut self, key: KeyEvent, _state: &AppState) -> Vec<Action> {
        if !self.visible {
            return vec![];
        }
        match key.code {
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                self.active = match self.active {
                    Field::Path => Field::FileName,
                    Field::FileName => Field::Path,
                };
                return vec![];
            }
            _ => {}
        }
        let result = match self.active {
            Field::Path => self.path.handle_key(key),
            Field::FileName => self.file_name.handle_key(key),
        };
        match result {
            FieldAction::Changed(path) if self.active == Field::Path => {
                self.file_name.set_value(&suggested_file_name(&path));
                vec![]
            }
            FieldAction::Submitted => self.submit(),
            FieldAction::Cancelled => vec![Action::CloseUpload],
            _ => vec![],
        }
    }

    fn on_action(&mut self, action: &Action, _state: &AppState) -> Vec<Action> {
        match action {
            Action::OpenUpload => self.open(),
            Action::CloseUpload => self.close(),
            _ => {}
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, _focused: bool, _state: &AppState) {
        if !self.visible {
            return;
        }
        let popup = centered_rect(60, 6, area);
        frame.render_widget(Clear, popup);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(C_PANEL_BORDER_FOCUSED))
            .style(Style::default().bg(C_OVERLAY_BG))
            .title(" upload video ");
        let inner = block.inner(popup);
        frame.render_widget(block, popup);

        let row = |n: u16| Rect {
            y: inner.y + n,
            height: 1,
            ..inner
        };
        if inner.height < 4 {
            return;
        }
        self.path.draw(frame, row(0), self.active == Field::Path);
        self.file_name.draw(frame, row(1), self.active == Field::FileName);
        frame.render_widget(
            Paragraph::new(Span::styled(
                " Tab switch field  Enter upload  Esc cancel",
                style_muted(),
            )),
            row(3),
        );
    }
}

/// Last path component, or the whole input when it has none.
pub fn suggested_file_name(path: &str) -> String {
    let trimmed = path.trim();
    Path::new(trimmed)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| trimmed.to_string())
}
