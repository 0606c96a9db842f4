//! Selection state — playlist membership and the playlist-edit mode.

use std::collections::{HashMap, HashSet};

use crt_proto::protocol::{Playlist, PLAYLIST_NEW, PLAYLIST_NONE};

use crate::view::{render_playlist_options, PlaylistOption, VideoCard};

/// Playlist name → ordered member video names. Replaced wholesale on every
/// fetch, never patched.
#[derive(Debug, Clone, Default)]
pub struct PlaylistBook {
    members: HashMap<String, Vec<String>>,
}

impl PlaylistBook {
    pub fn from_playlists(playlists: &[Playlist]) -> Self {
        Self {
            members: playlists
                .iter()
                .map(|p| (p.name.clone(), p.videos.clone()))
                .collect(),
        }
    }

    /// Members of `name`; unknown names (including `""`) have none.
    pub fn members(&self, name: &str) -> &[String] {
        self.members.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.members.contains_key(name)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.members.len()
    }
}

/// Which playlist the edit UI is bound to.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PlaylistMode {
    /// Dropdown on "none": edit UI hidden.
    #[default]
    Inactive,
    /// Creating a new playlist.
    New,
    /// Editing an existing playlist (wire name).
    Existing(String),
}

impl PlaylistMode {
    /// Name field and checkboxes visible.
    pub fn is_editing(&self) -> bool {
        !matches!(self, Self::Inactive)
    }

    /// The playlist "play playlist" would start, if any.
    pub fn playable(&self) -> Option<&str> {
        match self {
            Self::Existing(name) => Some(name),
            _ => None,
        }
    }
}

/// The dropdown options plus which one is showing.
#[derive(Debug, Clone)]
pub struct PlaylistDropdown {
    options: Vec<PlaylistOption>,
    selected: usize,
}

impl Default for PlaylistDropdown {
    fn default() -> Self {
        Self {
            options: render_playlist_options(&[]),
            selected: 0,
        }
    }
}

impl PlaylistDropdown {
    /// Replace all options; the selection falls back to "none".
    pub fn rebuild(&mut self, playlists: &[Playlist]) {
        self.options = render_playlist_options(playlists);
        self.selected = 0;
    }

    pub fn options(&self) -> &[PlaylistOption] {
        &self.options
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn value(&self) -> &str {
        self.options
            .get(self.selected)
            .map(|o| o.value.as_str())
            .unwrap_or(PLAYLIST_NONE)
    }

    /// Show `value` without firing a change. Returns false (and shows "none")
    /// when no such option exists.
    pub fn show(&mut self, value: &str) -> bool {
        match self.options.iter().position(|o| o.value == value) {
            Some(idx) => {
                self.selected = idx;
                true
            }
            None => {
                self.selected = 0;
                false
            }
        }
    }

    /// Value of the option `offset` steps away, wrapping.
    pub fn neighbour(&self, offset: isize) -> &str {
        let len = self.options.len() as isize;
        if len == 0 {
            return PLAYLIST_NONE;
        }
        let idx = (self.selected as isize + offset).rem_euclid(len) as usize;
        &self.options[idx].value
    }
}

/// Check each card iff its video is in `members`.
pub fn select_videos(cards: &mut [VideoCard], members: &[String]) {
    let members: HashSet<&str> = members.iter().map(String::as_str).collect();
    for card in cards.iter_mut() {
        card.checked = members.contains(card.video.as_str());
    }
}

/// Check every card.
pub fn select_all(cards: &mut [VideoCard]) {
    for card in cards.iter_mut() {
        card.checked = true;
    }
}

/// Flip one card's checkbox. Returns the new state, or `None` if no card
/// has that video.
pub fn toggle_video(cards: &mut [VideoCard], video: &str) -> Option<bool> {
    let card = cards.iter_mut().find(|c| c.video == video)?;
    card.checked = !card.checked;
    Some(card.checked)
}

/// Checked video ids, in grid order.
pub fn checked_videos(cards: &[VideoCard]) -> Vec<String> {
    cards
        .iter()
        .filter(|c| c.checked)
        .map(|c| c.video.clone())
        .collect()
}

/// Mode for a dropdown value.
pub fn mode_for(value: &str) -> PlaylistMode {
    match value {
        "" | PLAYLIST_NONE => PlaylistMode::Inactive,
        PLAYLIST_NEW => PlaylistMode::New,
        name => PlaylistMode::Existing(name.to_string()),
    }
}
