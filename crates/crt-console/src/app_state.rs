//! AppState — shared read-only data passed to all components during render/event.
//!
//! Components read the console core through this, but never mutate it.
//! The App event-loop is the only thing that writes to AppState.

use crate::core::ConsoleCore;
use crate::widgets::status_bar::InputMode;

const MAX_LOG_LINES: usize = 500;

pub struct AppState {
    pub core: ConsoleCore,
    pub server_url: String,
    pub input_mode: InputMode,
    /// Messages shown in the log panel (oldest first).
    pub logs: Vec<String>,
}

impl AppState {
    pub fn new(core: ConsoleCore, server_url: String) -> Self {
        Self {
            core,
            server_url,
            input_mode: InputMode::Normal,
            logs: Vec::new(),
        }
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        self.logs.push(msg.into());
        if self.logs.len() > MAX_LOG_LINES {
            let excess = self.logs.len() - MAX_LOG_LINES;
            self.logs.drain(..excess);
        }
    }

    /// Server-absolute thumbnail URL for a card.
    pub fn thumbnail_url(&self, thumbnail: &str) -> String {
        format!("{}{}", self.server_url.trim_end_matches('/'), thumbnail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crt_proto::config::Config;

    #[test]
    fn test_log_is_capped() {
        let mut state = AppState::new(ConsoleCore::new(&Config::default()), String::new());
        for i in 0..(MAX_LOG_LINES + 10) {
            state.push_log(format!("line {}", i));
        }
        assert_eq!(state.logs.len(), MAX_LOG_LINES);
        assert_eq!(state.logs[0], "line 10");
    }

    #[test]
    fn test_thumbnail_url() {
        let state = AppState::new(
            ConsoleCore::new(&Config::default()),
            "http://crt.local:3000/".into(),
        );
        assert_eq!(
            state.thumbnail_url("/thumbs/a.jpg"),
            "http://crt.local:3000/thumbs/a.jpg"
        );
    }
}
