//! View renderer — turns server data into the grid and dropdown view-models.
//!
//! Both renderers rebuild their whole output from the response; nothing is
//! patched in place. Drawing happens in `components/`.

use crt_proto::protocol::{display_name, Playlist, Video, PLAYLIST_NEW, PLAYLIST_NONE};

/// One card in the video grid.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoCard {
    /// Video identifier (`Video::name`).
    pub video: String,
    /// Thumbnail source, server-relative.
    pub thumbnail: String,
    pub size: Option<u64>,
    /// Playlist membership checkbox. Only shown in playlist-edit mode.
    pub checked: bool,
}

/// Build one card per video, in server order, all unchecked.
pub fn render_video_grid(videos: &[Video]) -> Vec<VideoCard> {
    videos
        .iter()
        .map(|v| VideoCard {
            video: v.name.clone(),
            thumbnail: v.thumbnail_path(),
            size: v.size,
            checked: false,
        })
        .collect()
}

/// One entry of the playlist dropdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistOption {
    /// Dropdown value: `none`, `new`, or the playlist's wire name.
    pub value: String,
    pub label: String,
}

impl PlaylistOption {
    fn sentinel(value: &str, label: &str) -> Self {
        Self {
            value: value.to_string(),
            label: label.to_string(),
        }
    }

    pub fn is_sentinel(&self) -> bool {
        self.value == PLAYLIST_NONE || self.value == PLAYLIST_NEW
    }
}

/// `none` and `new` first, then one option per playlist labelled with its
/// display name.
pub fn render_playlist_options(playlists: &[Playlist]) -> Vec<PlaylistOption> {
    let mut options = Vec::with_capacity(playlists.len() + 2);
    options.push(PlaylistOption::sentinel(PLAYLIST_NONE, "select playlist"));
    options.push(PlaylistOption::sentinel(PLAYLIST_NEW, "new"));
    options.extend(playlists.iter().map(|p| PlaylistOption {
        value: p.name.clone(),
        label: display_name(&p.name),
    }));
    options
}

/// Human-readable byte count for the grid.
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn video(name: &str, stem: &str) -> Video {
        Video {
            name: name.into(),
            name_without_ext: stem.into(),
            size: None,
        }
    }

    #[test]
    fn test_single_video_card() {
        let videos: Vec<Video> =
            serde_json::from_str(r#"[{"name":"a.mp4","name_without_ext":"a"}]"#).unwrap();
        let grid = render_video_grid(&videos);
        assert_eq!(grid.len(), 1);
        assert_eq!(grid[0].video, "a.mp4");
        assert_eq!(grid[0].thumbnail, "/thumbs/a.jpg");
        assert!(!grid[0].checked);
    }

    #[test]
    fn test_grid_keeps_server_order() {
        let videos = vec![
            video("z.mp4", "z"),
            video("a.mp4", "a"),
            video("m.webm", "m"),
        ];
        let grid = render_video_grid(&videos);
        let keys: Vec<&str> = grid.iter().map(|c| c.video.as_str()).collect();
        assert_eq!(keys, vec!["z.mp4", "a.mp4", "m.webm"]);
    }

    #[test]
    fn test_empty_grid() {
        assert!(render_video_grid(&[]).is_empty());
    }

    #[test]
    fn test_playlist_options() {
        let playlists = vec![
            Playlist {
                name: "frank_ocean".into(),
                videos: vec!["a.mp4".into()],
            },
            Playlist {
                name: "late_night_tv".into(),
                videos: vec![],
            },
        ];
        let options = render_playlist_options(&playlists);
        assert_eq!(options.len(), 4);
        assert_eq!(options[0].value, "none");
        assert_eq!(options[1].value, "new");
        assert!(options[0].is_sentinel() && options[1].is_sentinel());
        assert_eq!(options[2].value, "frank_ocean");
        assert_eq!(options[2].label, "frank ocean");
        assert_eq!(options[3].label, "late night tv");
        assert!(!options[3].is_sentinel());
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(5 * 1024 * 1024 + 512 * 1024), "5.5 MB");
    }
}
