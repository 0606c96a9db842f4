//! LogPanel component — toggleable viewer for request and response messages.

use ratatui::crossterm::event::{KeyCode, KeyEvent, MouseEvent, MouseEventKind};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Borders, Clear, Paragraph},
    Frame,
};

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    theme::{C_MUTED, C_SECONDARY},
    widgets::pane_chrome::pane_chrome_borders,
};

pub struct LogPanel {
    pub visible: bool,
    /// First visible line; `usize::MAX` pins to the newest.
    scroll: usize,
    /// Top line at the last draw.
    last_top: usize,
    pub borders: Borders,
}

impl LogPanel {
    pub fn new() -> Self {
        Self {
            visible: false,
            scroll: usize::MAX,
            last_top: 0,
            borders: Borders::ALL,
        }
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
        if self.visible {
            self.scroll = usize::MAX;
        }
    }

    fn scroll_up(&mut self, n: usize) {
        self.scroll = self.last_top.saturating_sub(n);
    }

    fn scroll_down(&mut self, n: usize) {
        self.scroll = self.last_top.saturating_add(n);
    }
}

impl Default for LogPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for LogPanel {
    fn id(&self) -> ComponentId {
        ComponentId::LogPanel
    }

    fn handle_key(&mut self, key: KeyEvent, _state: &AppState) -> Vec<Action> {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.scroll_up(1),
            KeyCode::Down | KeyCode::Char('j') => self.scroll_down(1),
            KeyCode::PageUp => self.scroll_up(10),
            KeyCode::PageDown => self.scroll_down(10),
            KeyCode::Home | KeyCode::Char('g') => self.scroll = 0,
            KeyCode::End | KeyCode::Char('G') => self.scroll = usize::MAX,
            _ => {}
        }
        vec![]
    }

    fn handle_mouse(&mut self, event: MouseEvent, _area: Rect, _state: &AppState) -> Vec<Action> {
        match event.kind {
            MouseEventKind::ScrollUp => self.scroll_up(1),
            MouseEventKind::ScrollDown => self.scroll_down(1),
            _ => {}
        }
        vec![]
    }

    fn on_action(&mut self, action: &Action, _state: &AppState) -> Vec<Action> {
        if let Action::ToggleLogs = action {
            self.toggle();
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        if area.height == 0 {
            return;
        }
        frame.render_widget(Clear, area);

        let block = pane_chrome_borders("log", Some('3'), focused, None, self.borders);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if state.logs.is_empty() {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    "  no log entries yet",
                    Style::default().fg(C_MUTED),
                )),
                inner,
            );
            return;
        }

        let height = inner.height as usize;
        let max_scroll = state.logs.len().saturating_sub(height);
        let top = self.scroll.min(max_scroll);
        // Reaching the bottom re-pins to the newest line.
        self.scroll = if top >= max_scroll { usize::MAX } else { top };
        self.last_top = top;

        let lines: Vec<Line> = state
            .logs
            .iter()
            .skip(top)
            .take(height)
            .map(|msg| {
                Line::from(vec![
                    Span::raw("  "),
                    Span::styled(msg.as_str(), Style::default().fg(C_SECONDARY)),
                ])
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn min_height(&self) -> u16 {
        4
    }
}
