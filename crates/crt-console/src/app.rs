//! App — component-based event loop.
//!
//! - `App` owns all components and `AppState` (shared read-only data for components).
//! - A `tokio::mpsc` channel carries `AppMessage`s in from the terminal reader
//!   and from spawned request tasks.
//! - Components return `Vec<Action>`; App dispatches each Action.
//! - Requests chosen by `ConsoleCore` are each run in their own task; the
//!   `Outcome` comes back through the same channel.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use ratatui::crossterm::{
    event::{
        self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste,
        EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent,
        MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Position, Rect},
    Terminal,
};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crt_proto::config::Config;
use crt_proto::protocol::MediaKey;
use crt_proto::MediaServer;

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    components::{
        header::Header, help_overlay::HelpOverlay, log_panel::LogPanel, paste_overlay,
        playlist_panel::PlaylistPanel, upload_prompt::UploadPrompt, video_grid::VideoGrid,
    },
    core::{ConsoleCore, Intent, Severity},
    dispatch::{self, Outcome, Request},
    focus::FocusRing,
    widgets::{
        status_bar::{self, InputMode},
        toast::ToastManager,
    },
};

// ── Internal event bus ────────────────────────────────────────────────────────

enum AppMessage {
    Event(Event),
    Outcome(Outcome),
}

/// Last drawn pane rects, for mouse hit-testing.
#[derive(Default)]
struct PaneAreas {
    video_grid: Rect,
    playlist_panel: Rect,
    log_panel: Rect,
}

pub struct App<S: MediaServer> {
    server: Arc<S>,
    state: AppState,
    focus: FocusRing,

    header: Header,
    video_grid: VideoGrid,
    playlist_panel: PlaylistPanel,
    log_panel: LogPanel,
    help_overlay: HelpOverlay,
    upload_prompt: UploadPrompt,
    toast: ToastManager,

    show_keys_bar: bool,
    should_quit: bool,
    pane_areas: PaneAreas,
    tx: Option<mpsc::Sender<AppMessage>>,
}

impl<S: MediaServer> App<S> {
    pub fn new(server: S, server_url: String, config: &Config) -> Self {
        Self {
            server: Arc::new(server),
            state: AppState::new(ConsoleCore::new(config), server_url),
            focus: FocusRing::new(vec![ComponentId::VideoGrid, ComponentId::PlaylistPanel]),
            header: Header::new(),
            video_grid: VideoGrid::new(),
            playlist_panel: PlaylistPanel::new(),
            log_panel: LogPanel::new(),
            help_overlay: HelpOverlay::new(),
            upload_prompt: UploadPrompt::new(),
            toast: ToastManager::new(),
            show_keys_bar: config.ui.show_keys_bar,
            should_quit: false,
            pane_areas: PaneAreas::default(),
            tx: None,
        }
    }

    // ── Main run loop ─────────────────────────────────────────────────────────

    pub async fn run(mut self) -> anyhow::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            EnterAlternateScreen,
            EnableMouseCapture,
            EnableBracketedPaste
        )?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        debug!("terminal ready, size={:?}", terminal.size());

        let result = self.event_loop(&mut terminal).await;

        // ── Teardown ──────────────────────────────────────────────────────────
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture,
            DisableBracketedPaste
        )?;
        terminal.show_cursor()?;
        info!("console stopped");

        result
    }

    async fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        let (tx, mut rx) = mpsc::channel::<AppMessage>(256);
        self.tx = Some(tx.clone());

        // ── Background task: keyboard/mouse/paste events ──────────────────────
        let event_tx = tx;
        // Polls with a timeout so the thread notices the receiver going away
        // and runtime shutdown does not wait on a pending read.
        tokio::task::spawn_blocking(move || {
            while !event_tx.is_closed() {
                match event::poll(Duration::from_millis(200)) {
                    Ok(false) => continue,
                    Ok(true) => {}
                    Err(_) => break,
                }
                match event::read() {
                    Ok(ev) => {
                        if event_tx.blocking_send(AppMessage::Event(ev)).is_err() {
                            break;
                        }
                    }
                    Err(_) => break,
                }
            }
        });

        self.state.push_log(format!("connecting to {}", self.state.server_url));
        let initial = self.state.core.start();
        self.issue(initial);

        let mut toast_tick = tokio::time::interval(Duration::from_millis(100));
        toast_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal.draw(|f| self.draw(f))?;
            }
            needs_redraw = false;

            if self.should_quit {
                break;
            }

            tokio::select! {
                Some(msg) = rx.recv() => {
                    self.handle_message(msg);
                    // Drain anything else that queued up before drawing.
                    while let Ok(next) = rx.try_recv() {
                        self.handle_message(next);
                    }
                    needs_redraw = true;
                }

                _ = toast_tick.tick() => {
                    if !self.toast.is_empty() {
                        self.toast.tick();
                        needs_redraw = true;
                    }
                }
            }
        }
        Ok(())
    }

    fn handle_message(&mut self, msg: AppMessage) {
        match msg {
            AppMessage::Event(ev) => match ev {
                Event::Key(key) => {
                    if key.kind == KeyEventKind::Release {
                        return;
                    }
                    for action in self.handle_key(key) {
                        self.dispatch(action);
                    }
                }
                Event::Mouse(mouse) => {
                    for action in self.handle_mouse(mouse) {
                        self.dispatch(action);
                    }
                }
                Event::Paste(text) => self.handle_paste(text),
                _ => {}
            },
            AppMessage::Outcome(outcome) => self.on_outcome(outcome),
        }
        self.sync_input_mode();
    }

    // ── Requests ──────────────────────────────────────────────────────────────

    /// Spawn one task per request; each reports back as `AppMessage::Outcome`.
    fn issue(&mut self, requests: Vec<Request>) {
        let Some(tx) = self.tx.clone() else {
            return;
        };
        for request in requests {
            if let Request::UploadVideo { video_name, .. } = &request {
                self.toast.spinner(format!("uploading {}", video_name));
            }
            self.state.push_log(format!("→ {}", request.describe()));
            let server = Arc::clone(&self.server);
            let tx = tx.clone();
            tokio::spawn(async move {
                let outcome = dispatch::execute(server.as_ref(), request).await;
                let _ = tx.send(AppMessage::Outcome(outcome)).await;
            });
        }
    }

    fn on_outcome(&mut self, outcome: Outcome) {
        if matches!(outcome.request, Request::UploadVideo { .. }) {
            self.toast.dismiss_spinner();
        }
        match &outcome.result {
            Ok(_) => self
                .state
                .push_log(format!("✓ {}", outcome.request.describe())),
            Err(e) => self
                .state
                .push_log(format!("✗ {}: {}", outcome.request.describe(), e)),
        }
        let follow_ups = self.state.core.on_outcome(outcome);
        self.issue(follow_ups);
        self.flush_notices();
    }

    fn apply_intent(&mut self, intent: Intent) {
        let requests = self.state.core.handle(intent);
        self.issue(requests);
        self.flush_notices();
    }

    fn flush_notices(&mut self) {
        for notice in self.state.core.drain_notices() {
            if matches!(notice.severity, Severity::Warning | Severity::Error) {
                self.state.push_log(notice.message.clone());
            }
            self.toast.notify(notice);
        }
    }

    // ── Input ─────────────────────────────────────────────────────────────────

    fn handle_key(&mut self, key: KeyEvent) -> Vec<Action> {
        if key.code == KeyCode::Char('c') && key.modifiers == KeyModifiers::CONTROL {
            return vec![Action::Quit];
        }

        // While armed, keystrokes only reach the paste overlay.
        if self.state.core.paste_mode().is_armed() {
            return match key.code {
                KeyCode::Esc => vec![Action::Intent(Intent::CancelPaste)],
                KeyCode::Char('v') => vec![Action::PasteClipboard],
                _ => vec![],
            };
        }

        if self.upload_prompt.visible {
            return self.upload_prompt.handle_key(key, &self.state);
        }

        if self.help_overlay.visible {
            let actions = self.help_overlay.handle_key(key, &self.state);
            if !actions.is_empty() {
                return actions;
            }
            return vec![Action::ToggleHelp];
        }

        if self.playlist_panel.is_editing_name() {
            return self.playlist_panel.handle_key(key, &self.state);
        }

        // Global keys
        let global = match key.code {
            KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Char('?') => Some(Action::ToggleHelp),
            KeyCode::Char('L') => Some(Action::ToggleLogs),
            KeyCode::Char('K') => Some(Action::ToggleKeys),
            KeyCode::Tab => Some(Action::FocusNext),
            KeyCode::BackTab => Some(Action::FocusPrev),
            KeyCode::Char('1') => Some(Action::FocusPane(ComponentId::VideoGrid)),
            KeyCode::Char('2') => Some(Action::FocusPane(ComponentId::PlaylistPanel)),
            KeyCode::Char('3') => Some(Action::FocusPane(ComponentId::LogPanel)),
            KeyCode::Char('u') => Some(Action::OpenUpload),
            KeyCode::Char('m') => Some(Action::Intent(Intent::ArmPaste)),
            KeyCode::Char('r') => Some(Action::Intent(Intent::PlayRandom)),
            KeyCode::Char('z') => Some(Action::Intent(Intent::Shuffle)),
            KeyCode::Char('x') => Some(Action::Intent(Intent::Stop)),
            KeyCode::Char(' ') => Some(Action::Intent(Intent::MediaKey(MediaKey::PlayPause))),
            KeyCode::Char('n') => Some(Action::Intent(Intent::MediaKey(MediaKey::Next))),
            KeyCode::Char('b') => Some(Action::Intent(Intent::MediaKey(MediaKey::Previous))),
            KeyCode::Char('+') | KeyCode::Char('=') => Some(Action::Intent(Intent::GainUp)),
            KeyCode::Char('-') => Some(Action::Intent(Intent::GainDown)),
            KeyCode::Char('v') => Some(Action::Intent(Intent::CycleVisualizer)),
            KeyCode::Char('R') | KeyCode::F(5) => Some(Action::Intent(Intent::Refresh)),
            _ => None,
        };
        if let Some(action) = global {
            return vec![action];
        }

        // Dispatch to the focused component
        let s = &self.state;
        match self.focus.current() {
            Some(ComponentId::VideoGrid) => self.video_grid.handle_key(key, s),
            Some(ComponentId::PlaylistPanel) => self.playlist_panel.handle_key(key, s),
            Some(ComponentId::LogPanel) => self.log_panel.handle_key(key, s),
            _ => vec![],
        }
    }

    fn handle_mouse(&mut self, event: MouseEvent) -> Vec<Action> {
        if self.help_overlay.visible
            || self.upload_prompt.visible
            || self.state.core.paste_mode().is_armed()
        {
            return vec![];
        }
        let pos = Position::new(event.column, event.row);
        let target = [
            (ComponentId::VideoGrid, self.pane_areas.video_grid),
            (ComponentId::PlaylistPanel, self.pane_areas.playlist_panel),
            (ComponentId::LogPanel, self.pane_areas.log_panel),
        ]
        .into_iter()
        .find(|(_, area)| area.contains(pos));
        let Some((id, area)) = target else {
            return vec![];
        };
        if matches!(event.kind, MouseEventKind::Down(_)) {
            self.focus.set(id);
        }
        let s = &self.state;
        match id {
            ComponentId::VideoGrid => self.video_grid.handle_mouse(event, area, s),
            ComponentId::PlaylistPanel => self.playlist_panel.handle_mouse(event, area, s),
            ComponentId::LogPanel => self.log_panel.handle_mouse(event, area, s),
            _ => vec![],
        }
    }

    /// Bracketed paste: feeds the armed overlay, else whichever field is open.
    fn handle_paste(&mut self, text: String) {
        if self.state.core.paste_mode().is_armed() {
            self.apply_intent(Intent::Paste(text));
        } else if self.upload_prompt.visible {
            self.upload_prompt.paste(&text);
        } else if self.playlist_panel.is_editing_name() {
            for action in self.playlist_panel.paste(&text) {
                self.dispatch(action);
            }
        } else {
            debug!("paste ignored: nothing accepts text");
        }
    }

    // ── Actions ───────────────────────────────────────────────────────────────

    fn dispatch(&mut self, action: Action) {
        // Broadcast to components first so overlays can open/close themselves.
        let secondary: Vec<Action> = {
            let s = &self.state;
            let mut out = Vec::new();
            out.extend(self.video_grid.on_action(&action, s));
            out.extend(self.playlist_panel.on_action(&action, s));
            out.extend(self.log_panel.on_action(&action, s));
            out.extend(self.help_overlay.on_action(&action, s));
            out.extend(self.upload_prompt.on_action(&action, s));
            out
        };

        self.apply_action(action);

        for a in secondary {
            self.apply_action(a);
        }
    }

    fn apply_action(&mut self, action: Action) {
        debug!("apply_action: {:?}", action);
        match action {
            Action::Intent(intent) => self.apply_intent(intent),

            Action::FocusNext => {
                self.focus.next();
            }
            Action::FocusPrev => {
                self.focus.prev();
            }
            Action::FocusPane(id) => self.focus.set(id),

            Action::ToggleLogs => {
                let mut items = vec![ComponentId::VideoGrid, ComponentId::PlaylistPanel];
                if self.log_panel.visible {
                    items.push(ComponentId::LogPanel);
                }
                self.focus.set_items(items);
            }
            Action::ToggleKeys => self.show_keys_bar = !self.show_keys_bar,

            Action::PasteClipboard => {
                match arboard::Clipboard::new().and_then(|mut cb| cb.get_text()) {
                    Ok(text) => self.apply_intent(Intent::Paste(text)),
                    Err(e) => {
                        warn!("clipboard error: {}", e);
                        self.toast.error(format!("clipboard error: {}", e));
                    }
                }
            }

            Action::CopyToClipboard(text) => {
                match arboard::Clipboard::new().and_then(|mut cb| cb.set_text(text.clone())) {
                    Ok(()) => {
                        let display = if text.chars().count() > 40 {
                            format!("{}…", text.chars().take(40).collect::<String>())
                        } else {
                            text
                        };
                        self.toast.success(format!("copied: {}", display));
                    }
                    Err(e) => {
                        warn!("clipboard error: {}", e);
                        self.toast.error(format!("clipboard error: {}", e));
                    }
                }
            }

            Action::Quit => self.should_quit = true,

            // Handled by the components themselves in `dispatch`.
            Action::OpenUpload | Action::CloseUpload | Action::ToggleHelp => {}
        }
    }

    fn sync_input_mode(&mut self) {
        self.playlist_panel.sync_mode(&self.state);
        self.state.input_mode = if self.state.core.paste_mode().is_armed() {
            InputMode::Paste
        } else if self.upload_prompt.visible {
            InputMode::Upload
        } else if self.playlist_panel.is_editing_name() {
            InputMode::Edit
        } else {
            InputMode::Normal
        };
    }

    // ── Drawing ───────────────────────────────────────────────────────────────

    fn draw(&mut self, frame: &mut ratatui::Frame) {
        use crate::theme::C_BG;
        use ratatui::widgets::Block;
        let area = frame.area();

        frame.render_widget(
            Block::default().style(ratatui::style::Style::default().bg(C_BG)),
            area,
        );

        // ── Outer layout: header | body | (log) | (keys bar) ─────────────────
        let status_h = if self.show_keys_bar { 1u16 } else { 0 };
        let log_h = if self.log_panel.visible { 10u16 } else { 0 };
        let outer = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Min(0),
                Constraint::Length(log_h),
                Constraint::Length(status_h),
            ])
            .split(area);

        self.header.draw(frame, outer[0], &self.state);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(68), Constraint::Percentage(32)])
            .split(outer[1]);

        let focused = self.focus.current();
        self.video_grid.draw(
            frame,
            body[0],
            focused == Some(ComponentId::VideoGrid),
            &self.state,
        );
        self.playlist_panel.draw(
            frame,
            body[1],
            focused == Some(ComponentId::PlaylistPanel),
            &self.state,
        );
        self.pane_areas.video_grid = body[0];
        self.pane_areas.playlist_panel = body[1];

        if self.log_panel.visible {
            self.log_panel.draw(
                frame,
                outer[2],
                focused == Some(ComponentId::LogPanel),
                &self.state,
            );
            self.pane_areas.log_panel = outer[2];
        } else {
            self.pane_areas.log_panel = Rect::default();
        }

        if self.show_keys_bar {
            status_bar::draw_keys_bar(frame, outer[3], self.state.input_mode, focused);
        }

        // ── Overlays ──────────────────────────────────────────────────────────
        self.upload_prompt.draw(frame, area, true, &self.state);
        self.help_overlay.draw(frame, area, false, &self.state);
        if self.state.core.paste_mode().is_armed() {
            paste_overlay::draw(frame, area);
        }

        // ── Toast notifications (topmost layer) ──────────────────────────────
        self.toast.draw(frame, area);
    }
}
