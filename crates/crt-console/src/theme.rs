//! Color palette and style constants for the console.

use ratatui::style::{Color, Modifier, Style};

// ── Color palette ─────────────────────────────────────────────────────────────

pub const C_BG: Color = Color::Rgb(16, 18, 16);
pub const C_ACCENT: Color = Color::Rgb(120, 220, 140); // phosphor green
pub const C_MUTED: Color = Color::Rgb(72, 80, 76);
pub const C_SECONDARY: Color = Color::Rgb(118, 132, 124);
pub const C_PRIMARY: Color = Color::Rgb(212, 222, 214);
pub const C_SELECTION_BG: Color = Color::Rgb(28, 36, 30);
pub const C_PANEL_BORDER: Color = Color::Rgb(40, 48, 44);
pub const C_PANEL_BORDER_FOCUSED: Color = Color::Rgb(96, 180, 120);
pub const C_NUMBER_HINT: Color = Color::Rgb(90, 104, 96);
pub const C_FIELD_BG: Color = Color::Rgb(22, 28, 24);
pub const C_FIELD_FG: Color = Color::Rgb(255, 200, 80);
pub const C_CHECKED: Color = Color::Rgb(255, 200, 80);
pub const C_OVERLAY_BG: Color = Color::Rgb(18, 22, 20);
pub const C_TOAST_INFO: Color = Color::Rgb(80, 160, 220);
pub const C_TOAST_SUCCESS: Color = Color::Rgb(80, 200, 120);
pub const C_TOAST_WARNING: Color = Color::Rgb(255, 184, 80);
pub const C_TOAST_ERROR: Color = Color::Rgb(255, 95, 95);
pub const C_BADGE_PENDING: Color = Color::Rgb(255, 184, 80);
pub const C_MODE_NORMAL: Color = Color::Rgb(118, 132, 124);
pub const C_MODE_EDIT: Color = Color::Rgb(255, 200, 80);
pub const C_MODE_UPLOAD: Color = Color::Rgb(80, 160, 220);
pub const C_MODE_PASTE: Color = Color::Rgb(255, 95, 95);

// ── Predefined styles ─────────────────────────────────────────────────────────

pub fn style_secondary() -> Style {
    Style::default().fg(C_SECONDARY)
}

pub fn style_selected() -> Style {
    Style::default().bg(C_SELECTION_BG).fg(C_PRIMARY)
}

pub fn style_selected_focused() -> Style {
    Style::default()
        .bg(C_SELECTION_BG)
        .fg(C_ACCENT)
        .add_modifier(Modifier::BOLD)
}

pub fn style_focused_border() -> Style {
    Style::default().fg(C_PANEL_BORDER_FOCUSED)
}

pub fn style_unfocused_border() -> Style {
    Style::default().fg(C_PANEL_BORDER)
}

pub fn style_muted() -> Style {
    Style::default().fg(C_MUTED)
}
