//! Toast notification system — transient status messages.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph},
    Frame,
};

use crate::core::{Notice, Severity};
use crate::theme::{C_TOAST_ERROR, C_TOAST_INFO, C_TOAST_SUCCESS, C_TOAST_WARNING};

struct Toast {
    message: String,
    severity: Severity,
    expires: Instant,
}

/// A persistent spinner toast that animates until resolved.
struct SpinnerToast {
    message: String,
    frame: usize,
}

const SPINNER_FRAMES: &[&str] = &["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];

pub struct ToastManager {
    toasts: VecDeque<Toast>,
    spinner: Option<SpinnerToast>,
    max_visible: usize,
}

impl ToastManager {
    pub fn new() -> Self {
        Self {
            toasts: VecDeque::new(),
            spinner: None,
            max_visible: 4,
        }
    }

    pub fn push(&mut self, message: impl Into<String>, severity: Severity, duration: Duration) {
        let msg = message.into();
        self.toasts.retain(|t| t.message != msg);
        self.toasts.push_back(Toast {
            message: msg,
            severity,
            expires: Instant::now() + duration,
        });
        while self.toasts.len() > self.max_visible * 2 {
            self.toasts.pop_front();
        }
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(message, Severity::Info, Duration::from_secs(3));
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(message, Severity::Success, Duration::from_secs(3));
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.push(message, Severity::Warning, Duration::from_secs(4));
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(message, Severity::Error, Duration::from_secs(5));
    }

    pub fn notify(&mut self, notice: Notice) {
        match notice.severity {
            Severity::Info => self.info(notice.message),
            Severity::Success => self.success(notice.message),
            Severity::Warning => self.warning(notice.message),
            Severity::Error => self.error(notice.message),
        }
    }

    /// Start or replace the spinner. It animates on every `tick()` and stays
    /// until `dismiss_spinner`.
    pub fn spinner(&mut self, message: impl Into<String>) {
        self.spinner = Some(SpinnerToast {
            message: message.into(),
            frame: 0,
        });
    }

    pub fn dismiss_spinner(&mut self) {
        self.spinner = None;
    }

    /// Remove expired toasts and advance the spinner frame. Call each tick.
    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    fn tick_at(&mut self, now: Instant) {
        self.toasts.retain(|t| t.expires > now);
        if let Some(ref mut s) = self.spinner {
            s.frame = (s.frame + 1) % SPINNER_FRAMES.len();
        }
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty() && self.spinner.is_none()
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    /// Render toasts in the top-right corner of `area`.
    pub fn draw(&self, frame: &mut Frame, area: Rect) {
        if self.is_empty() {
            return;
        }
        let max_width = (area.width / 2).clamp(30, 60);
        let mut y = area.y + 1;

        if let Some(ref s) = self.spinner {
            let icon = SPINNER_FRAMES[s.frame % SPINNER_FRAMES.len()];
            render_row(
                frame,
                area,
                y,
                max_width,
                format!(" {} {} ", icon, s.message),
                Style::default().fg(C_TOAST_INFO),
            );
            y += 1;
        }

        for toast in self.toasts.iter().rev().take(self.max_visible) {
            if y >= area.y + area.height {
                break;
            }
            let (color, icon) = match toast.severity {
                Severity::Info => (C_TOAST_INFO, "·"),
                Severity::Success => (C_TOAST_SUCCESS, "✓"),
                Severity::Warning => (C_TOAST_WARNING, "!"),
                Severity::Error => (C_TOAST_ERROR, "✗"),
            };
            render_row(
                frame,
                area,
                y,
                max_width,
                format!(" {} {} ", icon, toast.message),
                Style::default().fg(color),
            );
            y += 1;
        }
    }
}

fn render_row(frame: &mut Frame, area: Rect, y: u16, max_width: u16, text: String, style: Style) {
    if y >= area.y + area.height {
        return;
    }
    let w = (text.chars().count() as u16).min(max_width).min(area.width);
    let x = area.x + area.width.saturating_sub(w + 1);
    let toast_area = Rect {
        x,
        y,
        width: w,
        height: 1,
    };
    frame.render_widget(Clear, toast_area);
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(text, style.add_modifier(Modifier::BOLD)))),
        toast_area,
    );
}

impl Default for ToastManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_message_replaces() {
        let mut toasts = ToastManager::new();
        toasts.info("stop");
        toasts.success("stop");
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts.toasts[0].severity, Severity::Success);
    }

    #[test]
    fn test_queue_is_capped() {
        let mut toasts = ToastManager::new();
        for i in 0..20 {
            toasts.info(format!("toast {}", i));
        }
        assert_eq!(toasts.len(), 8);
        assert_eq!(toasts.toasts[0].message, "toast 12");
    }

    #[test]
    fn test_tick_expires() {
        let mut toasts = ToastManager::new();
        toasts.error("server unreachable");
        toasts.tick_at(Instant::now() + Duration::from_secs(6));
        assert!(toasts.is_empty());
    }

    #[test]
    fn test_spinner_outlives_ticks() {
        let mut toasts = ToastManager::new();
        toasts.spinner("uploading clip.mp4");
        toasts.tick_at(Instant::now() + Duration::from_secs(60));
        assert!(!toasts.is_empty());
        toasts.dismiss_spinner();
        assert!(toasts.is_empty());
    }

    #[test]
    fn test_notify_maps_severity() {
        let mut toasts = ToastManager::new();
        toasts.notify(Notice {
            severity: Severity::Warning,
            message: "choose a file to upload".into(),
        });
        assert_eq!(toasts.toasts[0].severity, Severity::Warning);
    }
}
