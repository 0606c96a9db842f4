//! Status bar — bottom line with the input mode and keybindings.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::action::ComponentId;
use crate::theme::{C_MODE_EDIT, C_MODE_NORMAL, C_MODE_PASTE, C_MODE_UPLOAD, C_MUTED};

/// Where keystrokes currently go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    /// Typing a playlist name.
    Edit,
    /// Upload prompt open.
    Upload,
    /// Paste overlay armed.
    Paste,
}

impl InputMode {
    pub fn label(self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::Edit => "EDIT",
            Self::Upload => "UPLOAD",
            Self::Paste => "PASTE",
        }
    }

    pub fn color(self) -> Color {
        match self {
            Self::Normal => C_MODE_NORMAL,
            Self::Edit => C_MODE_EDIT,
            Self::Upload => C_MODE_UPLOAD,
            Self::Paste => C_MODE_PASTE,
        }
    }
}

fn keys_for(mode: InputMode, focused: Option<ComponentId>) -> &'static str {
    match mode {
        InputMode::Normal => match focused {
            Some(ComponentId::PlaylistPanel) => {
                " ←→ playlist  Enter play  e name  w save  a/A all/none  z shuffle  x stop  Tab pane  ? help  q quit"
            }
            Some(ComponentId::LogPanel) => " ↑↓ scroll  g/G top/bottom  Tab pane  L hide  ? help  q quit",
            _ => {
                " ←↑↓→ move  Enter play  d delete  c check  r random  u upload  m media  Space pause  n/b next/back  Tab pane  ? help  q quit"
            }
        },
        InputMode::Edit => " type name  Enter/Esc done",
        InputMode::Upload => " Tab switch field  Enter upload  Esc cancel",
        InputMode::Paste => " paste a url (terminal paste or v)  Esc cancel",
    }
}

/// Draw the keybindings footer bar (one row).
pub fn draw_keys_bar(frame: &mut Frame, area: Rect, mode: InputMode, focused: Option<ComponentId>) {
    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", mode.label()),
            Style::default().fg(mode.color()).add_modifier(Modifier::BOLD),
        ),
        Span::styled(keys_for(mode, focused), Style::default().fg(C_MUTED)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
