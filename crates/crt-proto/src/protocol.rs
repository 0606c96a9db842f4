use serde::{Deserialize, Serialize};

/// Route prefix the server mounts its thumbnail directory under.
pub const THUMB_ROUTE: &str = "/thumbs";

/// Dropdown value that clears the playlist selection.
pub const PLAYLIST_NONE: &str = "none";
/// Dropdown value that enters playlist create mode.
pub const PLAYLIST_NEW: &str = "new";

/// Visualizer control value that means "no visualizer".
pub const VISUALIZER_NONE: &str = "none";

/// A video as listed by `GET /videos`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
    /// File name including extension; unique on the server.
    pub name: String,
    pub name_without_ext: String,
    /// Size in bytes. Older servers don't report it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
}

impl Video {
    /// Server-relative thumbnail source, e.g. `/thumbs/a.jpg`.
    pub fn thumbnail_path(&self) -> String {
        format!("{}/{}.jpg", THUMB_ROUTE, self.name_without_ext)
    }
}

/// A playlist as listed by `GET /playlists`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    /// Wire form: spaces already replaced by underscores.
    pub name: String,
    #[serde(default)]
    pub videos: Vec<String>,
}

/// Gain and visualizer sent with every play call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackSettings {
    #[serde(default)]
    pub gain: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visualizer: Option<String>,
}

impl PlaybackSettings {
    /// Build settings from the two console controls. A visualizer value of
    /// `"none"` (or blank) is sent as absent.
    pub fn from_controls(gain: f32, visualizer: &str) -> Self {
        let visualizer = match visualizer.trim() {
            "" | VISUALIZER_NONE => None,
            v => Some(v.to_string()),
        };
        Self { gain, visualizer }
    }
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            gain: 1.0,
            visualizer: None,
        }
    }
}

/// Body of `PUT /videos`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayVideo {
    pub video_name: String,
    #[serde(flatten)]
    pub settings: PlaybackSettings,
}

/// Body of `DELETE /videos`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoName {
    pub video_name: String,
}

/// Body of `POST /playlists`. An empty `videos` list deletes the playlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavePlaylist {
    /// Display form, e.g. `"My List"`; the server converts it.
    pub playlist_name: String,
    pub videos: Vec<String>,
}

impl SavePlaylist {
    pub fn is_delete(&self) -> bool {
        self.videos.is_empty()
    }
}

/// Body of `PUT /playlists`. No `playlist_name` means shuffle all videos.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayPlaylist {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub playlist_name: Option<String>,
    #[serde(flatten)]
    pub settings: PlaybackSettings,
}

impl PlayPlaylist {
    pub fn shuffle_all(settings: PlaybackSettings) -> Self {
        Self {
            playlist_name: None,
            settings,
        }
    }

    pub fn is_shuffle_all(&self) -> bool {
        self.playlist_name.is_none()
    }
}

/// Body of `PUT /custom-media`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayMedia {
    pub url: String,
    #[serde(flatten)]
    pub settings: PlaybackSettings,
}

/// Transport keys forwarded by `PATCH /media-control`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKey {
    PlayPause,
    Next,
    Previous,
}

impl MediaKey {
    /// Numeric action code on the wire.
    pub fn code(self) -> u8 {
        match self {
            Self::PlayPause => 0,
            Self::Next => 1,
            Self::Previous => 2,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::PlayPause),
            1 => Some(Self::Next),
            2 => Some(Self::Previous),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::PlayPause => "play/pause",
            Self::Next => "next",
            Self::Previous => "back",
        }
    }
}

/// Body of `PATCH /media-control`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaControl {
    pub action: u8,
}

impl From<MediaKey> for MediaControl {
    fn from(key: MediaKey) -> Self {
        Self { action: key.code() }
    }
}

/// Playlist name as shown to the user: underscores become spaces.
pub fn display_name(wire: &str) -> String {
    wire.replace('_', " ")
}

/// Playlist name as stored by the server: spaces become underscores.
pub fn wire_name(display: &str) -> String {
    display.replace(' ', "_")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_video_list_parses_with_and_without_size() {
        let raw = r#"[{"name":"a.mp4","name_without_ext":"a"},
                      {"name":"b.mkv","name_without_ext":"b","size":42}]"#;
        let videos: Vec<Video> = serde_json::from_str(raw).unwrap();
        assert_eq!(videos.len(), 2);
        assert_eq!(videos[0].size, None);
        assert_eq!(videos[1].size, Some(42));
        assert_eq!(videos[0].thumbnail_path(), "/thumbs/a.jpg");
    }

    #[test]
    fn test_absent_visualizer_is_omitted() {
        let body = PlayVideo {
            video_name: "a.mp4".into(),
            settings: PlaybackSettings::from_controls(1.5, "none"),
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value, json!({"video_name": "a.mp4", "gain": 1.5}));
    }

    #[test]
    fn test_visualizer_is_flattened_next_to_gain() {
        let body = PlayMedia {
            url: "https://example.com/v".into(),
            settings: PlaybackSettings::from_controls(0.0, "spectrum"),
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(
            value,
            json!({"url": "https://example.com/v", "gain": 0.0, "visualizer": "spectrum"})
        );
    }

    #[test]
    fn test_shuffle_all_omits_playlist_name() {
        let body = PlayPlaylist::shuffle_all(PlaybackSettings::from_controls(1.0, ""));
        assert!(body.is_shuffle_all());
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value, json!({"gain": 1.0}));
    }

    #[test]
    fn test_media_key_codes() {
        for key in [MediaKey::PlayPause, MediaKey::Next, MediaKey::Previous] {
            assert_eq!(MediaKey::from_code(key.code()), Some(key));
        }
        assert_eq!(MediaKey::from_code(3), None);
        let value = serde_json::to_value(MediaControl::from(MediaKey::Previous)).unwrap();
        assert_eq!(value, json!({"action": 2}));
    }

    #[test]
    fn test_name_forms() {
        assert_eq!(wire_name("My List"), "My_List");
        assert_eq!(display_name("My_List"), "My List");
        assert_eq!(display_name(&wire_name("frank ocean")), "frank ocean");
    }

    #[test]
    fn test_empty_save_is_delete() {
        let body = SavePlaylist {
            playlist_name: "old".into(),
            videos: Vec::new(),
        };
        assert!(body.is_delete());
    }
}
