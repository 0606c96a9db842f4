//! Paste overlay — shown while the paste-to-play flow is armed.
//!
//! Keys never reach the panes underneath; the App routes Esc and `v` here
//! and swallows the rest. Not focusable.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::components::help_overlay::centered_rect;
use crate::theme::{style_muted, C_MODE_PASTE, C_OVERLAY_BG, C_PRIMARY};

pub fn draw(frame: &mut Frame, area: Rect) {
    let popup = centered_rect(50, 6, area);
    frame.render_widget(Clear, popup);
    let lines = vec![
        Line::from(Span::styled(
            " paste a youtube or media url",
            Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            " terminal paste, or v to read the clipboard",
            style_muted(),
        )),
        Line::from(Span::styled(" esc to cancel", style_muted())),
    ];
    frame.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(C_MODE_PASTE))
                .style(Style::default().bg(C_OVERLAY_BG))
                .title(" play media "),
        ),
        popup,
    );
}
