//! Header — 2-row top bar.
//!
//! Row 1: app name, server URL, pending request badge.
//! Row 2: playback controls (gain, visualizer) and the playlist/paste state.
//!
//! Not focusable.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph},
    Frame,
};

use crate::{
    app_state::AppState,
    dispatch::RequestKind,
    selection::PlaylistMode,
    theme::{C_ACCENT, C_BADGE_PENDING, C_MODE_PASTE, C_MUTED, C_PRIMARY, C_SECONDARY},
};

const WATCHED: [(RequestKind, &str); 4] = [
    (RequestKind::Upload, "uploading"),
    (RequestKind::Random, "picking"),
    (RequestKind::Play, "starting"),
    (RequestKind::SavePlaylist, "saving"),
];

pub struct Header;

impl Header {
    pub fn new() -> Self {
        Self
    }

    pub fn draw(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        frame.render_widget(Clear, area);
        if area.height == 0 {
            return;
        }
        let row1 = Rect { height: 1, ..area };
        frame.render_widget(Paragraph::new(build_row1(state)), row1);
        if area.height >= 2 {
            let row2 = Rect {
                y: area.y + 1,
                height: 1,
                ..area
            };
            frame.render_widget(Paragraph::new(build_row2(state)), row2);
        }
    }
}

impl Default for Header {
    fn default() -> Self {
        Self::new()
    }
}

fn build_row1(state: &AppState) -> Line<'static> {
    let mut spans = vec![
        Span::styled(
            " crt ",
            Style::default().fg(C_ACCENT).add_modifier(Modifier::BOLD),
        ),
        Span::styled(state.server_url.clone(), Style::default().fg(C_SECONDARY)),
    ];
    for (kind, label) in WATCHED {
        if state.core.is_in_flight(kind) {
            spans.push(Span::styled(
                format!("  {}…", label),
                Style::default().fg(C_BADGE_PENDING),
            ));
        }
    }
    Line::from(spans)
}

fn build_row2(state: &AppState) -> Line<'static> {
    let controls = state.core.controls();
    let mut spans = vec![
        Span::styled(" gain ", Style::default().fg(C_MUTED)),
        Span::styled(
            format!("{:.1}", controls.gain()),
            Style::default().fg(C_PRIMARY),
        ),
        Span::styled("  vis ", Style::default().fg(C_MUTED)),
        Span::styled(
            controls.visualizer().to_string(),
            Style::default().fg(C_PRIMARY),
        ),
    ];

    let playlist = match state.core.mode() {
        PlaylistMode::Inactive => None,
        PlaylistMode::New => Some("new playlist".to_string()),
        PlaylistMode::Existing(_) => Some(format!("editing {}", state.core.name_field())),
    };
    if let Some(text) = playlist {
        spans.push(Span::styled("  ", Style::default()));
        spans.push(Span::styled(text, Style::default().fg(C_SECONDARY)));
    }
    if state.core.paste_mode().is_armed() {
        spans.push(Span::styled(
            "  PASTE ARMED",
            Style::default().fg(C_MODE_PASTE).add_modifier(Modifier::BOLD),
        ));
    }
    Line::from(spans)
}
