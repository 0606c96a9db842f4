//! Action enum — UI-level events produced by components and global keys.

use crate::core::Intent;

/// Unique identifier for a focusable pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentId {
    VideoGrid,
    PlaylistPanel,
    LogPanel,
    HelpOverlay,
    UploadPrompt,
}

/// Components produce Actions; the App dispatches them.
#[derive(Debug, Clone)]
pub enum Action {
    /// Forward to `ConsoleCore`.
    Intent(Intent),

    // ── Navigation ───────────────────────────────────────────────────────────
    FocusNext,
    FocusPrev,
    FocusPane(ComponentId),

    // ── Overlays ─────────────────────────────────────────────────────────────
    OpenUpload,
    CloseUpload,
    /// Read the system clipboard and feed it to the armed paste overlay.
    PasteClipboard,

    // ── UI toggles ───────────────────────────────────────────────────────────
    ToggleLogs,
    ToggleHelp,
    ToggleKeys,
    CopyToClipboard(String),

    // ── System ───────────────────────────────────────────────────────────────
    Quit,
}
