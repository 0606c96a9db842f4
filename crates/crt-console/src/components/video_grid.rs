//! VideoGrid component — thumbnail cards laid out in columns.
//!
//! Each card shows the video name, its size and thumbnail URL. The checkbox
//! column only appears while a playlist is being edited.

use ratatui::crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthChar;

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    core::Intent,
    theme::{
        style_muted, style_secondary, style_selected, style_selected_focused, C_CHECKED,
        C_MUTED, C_PRIMARY,
    },
    view::{format_size, VideoCard},
    widgets::pane_chrome::{pane_chrome, Badge},
};

const CARD_WIDTH: u16 = 30;
const CARD_HEIGHT: u16 = 4;

pub struct VideoGrid {
    selected: usize,
    /// First visible card row.
    scroll_row: usize,
    /// Columns at the last draw; drives up/down movement.
    columns: usize,
}

impl VideoGrid {
    pub fn new() -> Self {
        Self {
            selected: 0,
            scroll_row: 0,
            columns: 1,
        }
    }

    fn selected_card<'a>(&self, state: &'a AppState) -> Option<&'a VideoCard> {
        state.core.grid().get(self.selected)
    }

    fn move_by(&mut self, delta: isize, len: usize) {
        if len == 0 {
            self.selected = 0;
            return;
        }
        let target = (self.selected as isize + delta).clamp(0, len as isize - 1);
        self.selected = target as usize;
    }

    fn ensure_visible(&mut self, visible_rows: usize) {
        let row = self.selected / self.columns.max(1);
        if row < self.scroll_row {
            self.scroll_row = row;
        } else if row >= self.scroll_row + visible_rows {
            self.scroll_row = row + 1 - visible_rows;
        }
    }
}

impl Default for VideoGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for VideoGrid {
    fn id(&self) -> ComponentId {
        ComponentId::VideoGrid
    }

    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action> {
        let len = state.core.grid().len();
        let cols = self.columns.max(1) as isize;
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => self.move_by(-1, len),
            KeyCode::Right | KeyCode::Char('l') => self.move_by(1, len),
            KeyCode::Up | KeyCode::Char('k') => self.move_by(-cols, len),
            KeyCode::Down | KeyCode::Char('j') => self.move_by(cols, len),
            KeyCode::Home | KeyCode::Char('g') => self.selected = 0,
            KeyCode::End | KeyCode::Char('G') => self.selected = len.saturating_sub(1),
            KeyCode::Enter | KeyCode::Char('p') => {
                if let Some(card) = self.selected_card(state) {
                    return vec![Action::Intent(Intent::PlayVideo(card.video.clone()))];
                }
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                if let Some(card) = self.selected_card(state) {
                    return vec![Action::Intent(Intent::DeleteVideo(card.video.clone()))];
                }
            }
            KeyCode::Char('c') => {
                if let Some(card) = self.selected_card(state) {
                    return vec![Action::Intent(Intent::ToggleVideo(card.video.clone()))];
                }
            }
            KeyCode::Char('y') => {
                if let Some(card) = self.selected_card(state) {
                    return vec![Action::CopyToClipboard(state.thumbnail_url(&card.thumbnail))];
                }
            }
            _ => {}
        }
        vec![]
    }

    fn handle_mouse(&mut self, event: MouseEvent, area: Rect, state: &AppState) -> Vec<Action> {
        let len = state.core.grid().len();
        let cols = self.columns.max(1) as isize;
        match event.kind {
            MouseEventKind::ScrollUp => self.move_by(-cols, len),
            MouseEventKind::ScrollDown => self.move_by(cols, len),
            MouseEventKind::Down(MouseButton::Left) => {
                let col = event.column.saturating_sub(area.x + 1) / CARD_WIDTH;
                let row = event.row.saturating_sub(area.y + 1) / CARD_HEIGHT;
                let idx = (self.scroll_row + row as usize) * self.columns.max(1) + col as usize;
                if (col as usize) < self.columns && idx < len {
                    self.selected = idx;
                }
            }
            _ => {}
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        let grid = state.core.grid();
        let editing = state.core.mode().is_editing();
        let count = grid.len().to_string();
        let badge = Badge {
            text: &count,
            color: C_MUTED,
        };
        let block = pane_chrome("videos", Some('1'), focused, Some(badge));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if grid.is_empty() {
            frame.render_widget(
                Paragraph::new(Span::styled("  no videos on the server", style_muted())),
                inner,
            );
            return;
        }

        self.columns = (inner.width / CARD_WIDTH).max(1) as usize;
        if self.selected >= grid.len() {
            self.selected = grid.len() - 1;
        }
        let visible_rows = (inner.height / CARD_HEIGHT) as usize;
        // Column count may have changed since the last draw; the selected row
        // is always a valid scroll position.
        self.scroll_row = self.scroll_row.min(self.selected / self.columns);
        if visible_rows == 0 {
            return;
        }
        self.ensure_visible(visible_rows);

        let first = self.scroll_row * self.columns;
        let last = (first + visible_rows * self.columns).min(grid.len());
        for (offset, card) in grid[first..last].iter().enumerate() {
            let idx = first + offset;
            let col = (offset % self.columns) as u16;
            let row = (offset / self.columns) as u16;
            let card_area = Rect {
                x: inner.x + col * CARD_WIDTH,
                y: inner.y + row * CARD_HEIGHT,
                width: CARD_WIDTH.min(inner.width),
                height: CARD_HEIGHT - 1,
            };
            let is_selected = idx == self.selected;
            draw_card(frame, card_area, card, editing, is_selected, focused, state);
        }
    }

    fn min_height(&self) -> u16 {
        CARD_HEIGHT + 2
    }
}

fn draw_card(
    frame: &mut Frame,
    area: Rect,
    card: &VideoCard,
    editing: bool,
    selected: bool,
    focused: bool,
    state: &AppState,
) {
    let width = area.width.saturating_sub(1) as usize;
    let name_style = match (selected, focused) {
        (true, true) => style_selected_focused(),
        (true, false) => style_selected(),
        _ => Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
    };

    let mut title = Vec::new();
    if editing {
        let (mark, style) = if card.checked {
            ("[x] ", Style::default().fg(C_CHECKED))
        } else {
            ("[ ] ", style_muted())
        };
        title.push(Span::styled(mark, style));
    }
    let used = if editing { 4 } else { 0 };
    title.push(Span::styled(
        truncate(&card.video, width.saturating_sub(used)),
        name_style,
    ));

    let size = card.size.map(format_size).unwrap_or_else(|| "—".to_string());
    let lines = vec![
        Line::from(title),
        Line::from(Span::styled(size, style_secondary())),
        Line::from(Span::styled(
            truncate(&state.thumbnail_url(&card.thumbnail), width),
            style_muted(),
        )),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

/// Cut `s` to at most `width` terminal columns, marking the cut with `…`.
pub fn truncate(s: &str, width: usize) -> String {
    let total: usize = s.chars().map(|c| c.width().unwrap_or(0)).sum();
    if total <= width {
        return s.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ConsoleCore;
    use crate::dispatch::{Outcome, Request, Response};
    use crt_proto::config::Config;
    use crt_proto::protocol::{Playlist, Video, PLAYLIST_NEW};
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("clip.mp4", 20), "clip.mp4");
        assert_eq!(truncate("a_very_long_video_name.mp4", 8), "a_very_…");
        assert_eq!(truncate("映画映画.mp4", 5), "映画…");
    }

    #[test]
    fn test_move_clamps() {
        let mut grid = VideoGrid::new();
        grid.columns = 3;
        grid.move_by(-1, 5);
        assert_eq!(grid.selected, 0);
        grid.move_by(3, 5);
        assert_eq!(grid.selected, 3);
        grid.move_by(3, 5);
        assert_eq!(grid.selected, 4);
        grid.move_by(1, 0);
        assert_eq!(grid.selected, 0);
    }

    fn state_with(videos: usize) -> AppState {
        let mut core = ConsoleCore::new(&Config::default());
        let list = (0..videos)
            .map(|i| Video {
                name: format!("clip{:02}.mp4", i),
                name_without_ext: format!("clip{:02}", i),
                size: None,
            })
            .collect();
        core.on_outcome(Outcome {
            request: Request::FetchVideos,
            result: Ok(Response::Videos(list)),
        });
        AppState::new(core, "http://crt.local".to_string())
    }

    fn render(grid: &mut VideoGrid, state: &AppState, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|f| grid.draw(f, f.area(), true, state))
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
    fn test_checkboxes_only_while_editing() {
        let mut state = state_with(2);
        let mut grid = VideoGrid::new();

        let text = render(&mut grid, &state, 64, 12);
        assert!(text.contains("clip00.mp4"));
        assert!(!text.contains("[ ]") && !text.contains("[x]"));

        state.core.handle(Intent::SelectPlaylist(PLAYLIST_NEW.to_string()));
        let text = render(&mut grid, &state, 64, 12);
        assert!(text.contains("[ ] clip00.mp4"));

        state.core.handle(Intent::ToggleVideo("clip01.mp4".into()));
        let text = render(&mut grid, &state, 64, 12);
        assert!(text.contains("[x] clip01.mp4"));
        assert!(text.contains("[ ] clip00.mp4"));
    }

    #[test]
    fn test_checkboxes_for_existing_playlist() {
        let mut state = state_with(2);
        state.core.on_outcome(Outcome {
            request: Request::FetchPlaylists,
            result: Ok(Response::Playlists(vec![Playlist {
                name: "late_night".into(),
                videos: vec!["clip01.mp4".into()],
            }])),
        });
        state.core.handle(Intent::SelectPlaylist("late_night".into()));
        let mut grid = VideoGrid::new();
        let text = render(&mut grid, &state, 64, 12);
        assert!(text.contains("[ ] clip00.mp4"));
        assert!(text.contains("[x] clip01.mp4"));
    }

    #[test]
    fn test_resize_after_deep_scroll_does_not_panic() {
        let state = state_with(20);
        let mut grid = VideoGrid::new();
        grid.selected = 19;
        render(&mut grid, &state, 32, 10);
        assert_eq!(grid.columns, 1);
        assert!(grid.scroll_row > 0);

        // Wide but too short for one card row.
        render(&mut grid, &state, 200, 5);
        assert!(grid.scroll_row * grid.columns <= 19);

        // Back to a usable size: the selected card is on screen.
        let text = render(&mut grid, &state, 200, 12);
        assert!(text.contains("clip19.mp4"));
    }

    #[test]
    fn test_shrunk_list_clamps_scroll() {
        let mut grid = VideoGrid::new();
        grid.selected = 19;
        render(&mut grid, &state_with(20), 32, 10);
        let text = render(&mut grid, &state_with(3), 32, 10);
        assert_eq!(grid.selected, 2);
        assert!(text.contains("clip02.mp4"));
    }

    #[test]
    fn test_ensure_visible_scrolls_by_rows() {
        let mut grid = VideoGrid::new();
        grid.columns = 2;
        grid.selected = 7;
        grid.ensure_visible(2);
        assert_eq!(grid.scroll_row, 2);
        grid.selected = 0;
        grid.ensure_visible(2);
        assert_eq!(grid.scroll_row, 0);
    }
}
