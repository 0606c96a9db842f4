//! PlaylistPanel component — dropdown, name field and playlist actions.
//!
//! The dropdown cycles through `select playlist`, `new` and the server's
//! playlists. The name field and the checked count are only shown while the
//! panel is in playlist-edit mode.

use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crt_proto::protocol::PLAYLIST_NEW;

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    core::Intent,
    selection::{checked_videos, PlaylistMode},
    theme::{style_muted, style_secondary, C_ACCENT, C_MODE_EDIT, C_PRIMARY},
    widgets::{
        pane_chrome::{pane_chrome, Badge},
        text_field::{FieldAction, TextField},
    },
};

pub struct PlaylistPanel {
    name: TextField,
    editing_name: bool,
}

impl PlaylistPanel {
    pub fn new() -> Self {
        Self {
            name: TextField::new("name", "playlist name"),
            editing_name: false,
        }
    }

    pub fn is_editing_name(&self) -> bool {
        self.editing_name
    }

    /// Route terminal paste into the name field while it is being edited.
    pub fn paste(&mut self, text: &str) -> Vec<Action> {
        if !self.editing_name {
            return vec![];
        }
        match self.name.insert_str(text) {
            FieldAction::Changed(value) => vec![Action::Intent(Intent::SetPlaylistName(value))],
            _ => vec![],
        }
    }

    /// Drop out of name editing once the mode is no longer editable, e.g.
    /// after a refetch cleared the selection.
    pub fn sync_mode(&mut self, state: &AppState) {
        if self.editing_name && !state.core.mode().is_editing() {
            self.editing_name = false;
        }
    }

    fn start_editing(&mut self, state: &AppState) -> Vec<Action> {
        self.editing_name = true;
        if state.core.mode().is_editing() {
            self.name.set_value(state.core.name_field());
            vec![]
        } else {
            self.name.clear();
            vec![Action::Intent(Intent::SelectPlaylist(PLAYLIST_NEW.to_string()))]
        }
    }
}

impl Default for PlaylistPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for PlaylistPanel {
    fn id(&self) -> ComponentId {
        ComponentId::PlaylistPanel
    }

    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action> {
        self.sync_mode(state);
        if self.editing_name {
            return match self.name.handle_key(key) {
                FieldAction::Changed(value) => {
                    vec![Action::Intent(Intent::SetPlaylistName(value))]
                }
                FieldAction::Submitted | FieldAction::Cancelled => {
                    self.editing_name = false;
                    vec![]
                }
                FieldAction::None => vec![],
            };
        }

        let dropdown = state.core.dropdown();
        match key.code {
            KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('[') => {
                vec![Action::Intent(Intent::SelectPlaylist(
                    dropdown.neighbour(-1).to_string(),
                ))]
            }
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Char(']') => {
                vec![Action::Intent(Intent::SelectPlaylist(
                    dropdown.neighbour(1).to_string(),
                ))]
            }
            KeyCode::Enter | KeyCode::Char('p') => vec![Action::Intent(Intent::PlayPlaylist)],
            KeyCode::Char('e') | KeyCode::Char('i') => self.start_editing(state),
            KeyCode::Char('w') => vec![Action::Intent(Intent::SavePlaylist)],
            KeyCode::Char('a') => vec![Action::Intent(Intent::SelectAll)],
            KeyCode::Char('A') => vec![Action::Intent(Intent::DeselectAll)],
            _ => vec![],
        }
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        self.sync_mode(state);
        let mode = state.core.mode();
        let badge = match mode {
            PlaylistMode::Inactive => None,
            PlaylistMode::New => Some(Badge {
                text: "NEW",
                color: C_MODE_EDIT,
            }),
            PlaylistMode::Existing(_) => Some(Badge {
                text: "EDIT",
                color: C_MODE_EDIT,
            }),
        };
        let block = pane_chrome("playlists", Some('2'), focused, badge);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        if inner.height == 0 {
            return;
        }

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(inner);

        // ── Dropdown ──────────────────────────────────────────────────────────
        let dropdown = state.core.dropdown();
        let (label, label_style) = match dropdown.options().get(dropdown.selected_index()) {
            Some(o) if o.is_sentinel() => (o.label.as_str(), style_secondary()),
            Some(o) => (
                o.label.as_str(),
                Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
            ),
            None => ("", style_secondary()),
        };
        let position = format!(
            "  {}/{}",
            dropdown.selected_index() + 1,
            dropdown.options().len()
        );
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(" ◀ ", style_muted()),
                Span::styled(label.to_string(), label_style),
                Span::styled(" ▶", style_muted()),
                Span::styled(position, style_muted()),
            ])),
            rows[0],
        );

        if !mode.is_editing() {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    " ←→ choose a playlist, e to create one",
                    style_muted(),
                )),
                rows[1],
            );
            return;
        }

        // ── Edit controls ─────────────────────────────────────────────────────
        if !self.editing_name && self.name.text() != state.core.name_field() {
            self.name.set_value(state.core.name_field());
        }
        self.name.draw(frame, rows[1], self.editing_name);

        let checked = checked_videos(state.core.grid()).len();
        let summary = if checked == 0 {
            " nothing checked: saving deletes the playlist".to_string()
        } else {
            format!(" {} checked", checked)
        };
        frame.render_widget(
            Paragraph::new(Span::styled(summary, style_secondary())),
            rows[2],
        );

        let mut hints = vec![Span::styled(" w save  a all  A none", style_muted())];
        if mode.playable().is_some() {
            hints.push(Span::styled("  Enter play", Style::default().fg(C_ACCENT)));
        }
        frame.render_widget(Paragraph::new(Line::from(hints)), rows[3]);
    }

    fn min_height(&self) -> u16 {
        6
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ConsoleCore;
    use crt_proto::config::Config;
    use crt_proto::protocol::PLAYLIST_NONE;
    use ratatui::crossterm::event::KeyModifiers;
    use ratatui::{backend::TestBackend, Terminal};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn state() -> AppState {
        AppState::new(ConsoleCore::new(&Config::default()), String::new())
    }

    /// Send a key and apply any intents to the core, as the App does.
    fn press(panel: &mut PlaylistPanel, state: &mut AppState, code: KeyCode) -> Vec<Action> {
        let actions = panel.handle_key(key(code), state);
        for action in &actions {
            if let Action::Intent(intent) = action {
                state.core.handle(intent.clone());
            }
        }
        actions
    }

    fn render(panel: &mut PlaylistPanel, state: &AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(48, 8)).unwrap();
        terminal
            .draw(|f| panel.draw(f, f.area(), true, state))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_edit_from_inactive_selects_new() {
        let mut panel = PlaylistPanel::new();
        let actions = panel.handle_key(key(KeyCode::Char('e')), &state());
        assert!(panel.is_editing_name());
        assert!(matches!(
            &actions[..],
            [Action::Intent(Intent::SelectPlaylist(v))] if v == "new"
        ));
    }

    #[test]
    fn test_typing_sets_name_until_enter() {
        let mut state = state();
        let mut panel = PlaylistPanel::new();
        press(&mut panel, &mut state, KeyCode::Char('e'));
        let actions = press(&mut panel, &mut state, KeyCode::Char('M'));
        assert!(matches!(
            &actions[..],
            [Action::Intent(Intent::SetPlaylistName(v))] if v == "M"
        ));
        press(&mut panel, &mut state, KeyCode::Enter);
        assert!(!panel.is_editing_name());
        // Keys now drive the panel, not the field.
        let actions = panel.handle_key(key(KeyCode::Char('w')), &state);
        assert!(matches!(&actions[..], [Action::Intent(Intent::SavePlaylist)]));
    }

    #[test]
    fn test_paste_only_while_editing() {
        let mut state = state();
        let mut panel = PlaylistPanel::new();
        assert!(panel.paste("late night").is_empty());
        press(&mut panel, &mut state, KeyCode::Char('e'));
        let actions = panel.paste("late night");
        assert!(matches!(
            &actions[..],
            [Action::Intent(Intent::SetPlaylistName(v))] if v == "late night"
        ));
    }

    #[test]
    fn test_dropdown_keys_wrap() {
        let state = state();
        let mut panel = PlaylistPanel::new();
        let actions = panel.handle_key(key(KeyCode::Left), &state);
        assert!(matches!(
            &actions[..],
            [Action::Intent(Intent::SelectPlaylist(v))] if v == "new"
        ));
    }

    #[test]
    fn test_editing_ends_when_mode_leaves_edit() {
        let mut state = state();
        let mut panel = PlaylistPanel::new();
        press(&mut panel, &mut state, KeyCode::Char('e'));
        assert!(panel.is_editing_name());

        // Mode drops back to none; the field is hidden and must not eat keys.
        state.core.handle(Intent::SelectPlaylist(PLAYLIST_NONE.to_string()));
        let actions = panel.handle_key(key(KeyCode::Char('w')), &state);
        assert!(!panel.is_editing_name());
        assert!(matches!(&actions[..], [Action::Intent(Intent::SavePlaylist)]));
    }

    #[test]
    fn test_draw_hides_edit_controls_when_inactive() {
        let mut state = state();
        let mut panel = PlaylistPanel::new();
        let text = render(&mut panel, &state);
        assert!(text.contains("select playlist"));
        assert!(!text.contains("w save"));
        assert!(!text.contains("checked"));

        state.core.handle(Intent::SelectPlaylist(PLAYLIST_NEW.to_string()));
        let text = render(&mut panel, &state);
        assert!(text.contains("w save"));
        assert!(text.contains("nothing checked"));
        assert!(text.contains("NEW"));
    }

    #[test]
    fn test_draw_clears_stale_editing() {
        let mut state = state();
        let mut panel = PlaylistPanel::new();
        press(&mut panel, &mut state, KeyCode::Char('e'));
        state.core.handle(Intent::SelectPlaylist(PLAYLIST_NONE.to_string()));
        render(&mut panel, &state);
        assert!(!panel.is_editing_name());
    }
}
