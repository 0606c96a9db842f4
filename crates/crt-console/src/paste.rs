//! Paste-to-play flow.
//!
//! ```text
//!  Idle  --arm-->  Armed
//!  Armed --paste(non-blank)--> Idle   (emits the url)
//!  Armed --paste(blank)------> Armed
//!  Armed --escape------------> Idle
//! ```
//!
//! Nothing else disarms: moving focus away leaves the overlay armed.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PasteMode {
    #[default]
    Idle,
    Armed,
}

impl PasteMode {
    pub fn is_armed(self) -> bool {
        self == Self::Armed
    }

    pub fn arm(&mut self) {
        *self = Self::Armed;
    }

    /// Returns true if this disarmed the overlay.
    pub fn escape(&mut self) -> bool {
        let was_armed = self.is_armed();
        *self = Self::Idle;
        was_armed
    }

    /// Feed pasted text. Yields the trimmed url to play and disarms; blank
    /// text, or a paste while idle, yields nothing and changes nothing.
    pub fn paste(&mut self, text: &str) -> Option<String> {
        if !self.is_armed() {
            return None;
        }
        let url = text.trim();
        if url.is_empty() {
            return None;
        }
        *self = Self::Idle;
        Some(url.to_string())
    }
}
