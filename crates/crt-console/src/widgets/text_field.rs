//! TextField — single-line editor built on tui-input.

use ratatui::crossterm::event::{Event, KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use tui_input::{backend::crossterm::EventHandler, Input};

use crate::theme::{C_FIELD_BG, C_FIELD_FG, C_MUTED, C_SECONDARY};

#[derive(Debug, PartialEq)]
pub enum FieldAction {
    Changed(String),
    Submitted,
    Cancelled,
    None,
}

pub struct TextField {
    input: Input,
    label: String,
    placeholder: String,
}

impl TextField {
    pub fn new(label: impl Into<String>, placeholder: impl Into<String>) -> Self {
        Self {
            input: Input::default(),
            label: label.into(),
            placeholder: placeholder.into(),
        }
    }

    pub fn clear(&mut self) {
        self.input = Input::default();
    }

    pub fn set_value(&mut self, value: &str) {
        self.input = Input::new(value.to_string());
    }

    pub fn text(&self) -> &str {
        self.input.value()
    }

    /// Append pasted text at the end.
    pub fn insert_str(&mut self, text: &str) -> FieldAction {
        let line = text.lines().next().unwrap_or("");
        let value = format!("{}{}", self.input.value(), line);
        self.input = Input::new(value);
        FieldAction::Changed(self.input.value().to_string())
    }

    /// Enter submits, Esc cancels, everything else edits.
    pub fn handle_key(&mut self, key: KeyEvent) -> FieldAction {
        match key.code {
            KeyCode::Enter => FieldAction::Submitted,
            KeyCode::Esc => FieldAction::Cancelled,
            _ => {
                let before = self.input.value().to_string();
                self.input.handle_event(&Event::Key(key));
                if self.input.value() == before {
                    FieldAction::None
                } else {
                    FieldAction::Changed(self.input.value().to_string())
                }
            }
        }
    }

    /// Render `label: value` into one row. The cursor is placed when `active`.
    pub fn draw(&self, frame: &mut Frame, area: Rect, active: bool) {
        if area.height == 0 {
            return;
        }
        let prefix = format!("{}: ", self.label);
        let prefix_w = prefix.chars().count() as u16;
        let width = area.width.saturating_sub(prefix_w + 1) as usize;
        let scroll = self.input.visual_scroll(width);
        let value = self.input.value();

        let body = if value.is_empty() && !active {
            Span::styled(self.placeholder.clone(), Style::default().fg(C_MUTED))
        } else {
            let visible: String = value.chars().skip(scroll).collect();
            Span::styled(visible, Style::default().fg(C_FIELD_FG))
        };
        let line = Line::from(vec![
            Span::styled(prefix, Style::default().fg(C_SECONDARY)),
            body,
        ]);
        let style = if active {
            Style::default().bg(C_FIELD_BG)
        } else {
            Style::default()
        };
        frame.render_widget(Paragraph::new(line).style(style), area);

        if active {
            let cursor_x = area.x + prefix_w + (self.input.visual_cursor() - scroll) as u16;
            frame.set_cursor_position((
                cursor_x.min(area.x + area.width.saturating_sub(1)),
                area.y,
            ));
        }
    }
}
