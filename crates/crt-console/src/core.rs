//! ConsoleCore — the command dispatcher.
//!
//! Every user action arrives as an `Intent`. `handle` updates local state and
//! returns the `Request`s to issue; `on_outcome` applies a finished request and
//! returns any follow-ups (re-fetches, the play half of "random"). The core
//! never performs I/O, so tests drive it directly.

use std::path::PathBuf;

use crt_proto::config::Config;
use crt_proto::protocol::{
    display_name, wire_name, MediaKey, PlayMedia, PlayPlaylist, PlayVideo, Playlist, SavePlaylist,
    Video, PLAYLIST_NEW, PLAYLIST_NONE,
};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info};

use crate::controls::PlaybackControls;
use crate::dispatch::{Outcome, Request, RequestKind, Response};
use crate::inflight::SingleFlight;
use crate::paste::PasteMode;
use crate::selection::{
    checked_videos, mode_for, select_all, select_videos, toggle_video, PlaylistBook,
    PlaylistDropdown, PlaylistMode,
};
use crate::view::{render_video_grid, VideoCard};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

/// A message for the toast layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub severity: Severity,
    pub message: String,
}

/// A user action.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    /// Reload videos and playlists.
    Refresh,
    SubmitUpload { path: String, file_name: String },
    PlayVideo(String),
    DeleteVideo(String),
    PlayRandom,
    Shuffle,
    Stop,
    /// "Play media": arm the paste overlay.
    ArmPaste,
    Paste(String),
    CancelPaste,
    /// Dropdown changed to this value (`none`, `new` or a wire name).
    SelectPlaylist(String),
    PlayPlaylist,
    SetPlaylistName(String),
    SavePlaylist,
    ToggleVideo(String),
    SelectAll,
    DeselectAll,
    MediaKey(MediaKey),
    GainUp,
    GainDown,
    CycleVisualizer,
}

pub struct ConsoleCore {
    grid: Vec<VideoCard>,
    book: PlaylistBook,
    dropdown: PlaylistDropdown,
    mode: PlaylistMode,
    name_field: String,
    paste: PasteMode,
    controls: PlaybackControls,
    inflight: SingleFlight,
    /// Wire name to select once the playlist refetch after a save lands.
    pending_reselect: Option<String>,
    notices: Vec<Notice>,
}

impl ConsoleCore {
    pub fn new(config: &Config) -> Self {
        Self {
            grid: Vec::new(),
            book: PlaylistBook::default(),
            dropdown: PlaylistDropdown::default(),
            mode: PlaylistMode::Inactive,
            name_field: String::new(),
            paste: PasteMode::Idle,
            controls: PlaybackControls::from_config(&config.playback),
            inflight: SingleFlight::new(config.ui.single_flight),
            pending_reselect: None,
            notices: Vec::new(),
        }
    }

    /// Requests for the initial load.
    pub fn start(&mut self) -> Vec<Request> {
        self.handle(Intent::Refresh)
    }

    // ── Read access for the UI ──────────────────────────────────────────────

    pub fn grid(&self) -> &[VideoCard] {
        &self.grid
    }

    pub fn dropdown(&self) -> &PlaylistDropdown {
        &self.dropdown
    }

    pub fn mode(&self) -> &PlaylistMode {
        &self.mode
    }

    pub fn name_field(&self) -> &str {
        &self.name_field
    }

    pub fn paste_mode(&self) -> PasteMode {
        self.paste
    }

    pub fn controls(&self) -> &PlaybackControls {
        &self.controls
    }

    pub fn is_in_flight(&self, kind: RequestKind) -> bool {
        self.inflight.is_in_flight(kind)
    }

    pub fn drain_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    // ── Intents ─────────────────────────────────────────────────────────────

    pub fn handle(&mut self, intent: Intent) -> Vec<Request> {
        debug!("intent: {:?}", intent);
        match intent {
            Intent::Refresh => {
                let mut out = self.issue(Request::FetchVideos);
                out.extend(self.issue(Request::FetchPlaylists));
                out
            }
            Intent::SubmitUpload { path, file_name } => {
                let path = path.trim();
                if path.is_empty() {
                    self.notify(Severity::Warning, "choose a file to upload");
                    return vec![];
                }
                self.issue(Request::UploadVideo {
                    path: PathBuf::from(path),
                    video_name: file_name,
                })
            }
            Intent::PlayVideo(video_name) => self.issue(Request::PlayVideo(PlayVideo {
                video_name,
                settings: self.controls.settings(),
            })),
            Intent::DeleteVideo(video_name) => self.issue(Request::DeleteVideo { video_name }),
            Intent::PlayRandom => self.issue(Request::FetchRandomCandidates),
            Intent::Shuffle => self.issue(Request::PlayPlaylist(PlayPlaylist::shuffle_all(
                self.controls.settings(),
            ))),
            Intent::Stop => self.issue(Request::Stop),
            Intent::ArmPaste => {
                self.paste.arm();
                vec![]
            }
            Intent::Paste(text) => match self.paste.paste(&text) {
                Some(url) => {
                    let out = self.issue(Request::PlayMedia(PlayMedia {
                        url,
                        settings: self.controls.settings(),
                    }));
                    // Dropped by the guard: stay armed so the paste can be retried.
                    if out.is_empty() {
                        self.paste.arm();
                    }
                    out
                }
                None => vec![],
            },
            Intent::CancelPaste => {
                self.paste.escape();
                vec![]
            }
            Intent::SelectPlaylist(value) => {
                self.select_playlist(&value);
                vec![]
            }
            Intent::PlayPlaylist => match self.mode.playable() {
                Some(name) => {
                    let body = PlayPlaylist {
                        playlist_name: Some(name.to_string()),
                        settings: self.controls.settings(),
                    };
                    self.issue(Request::PlayPlaylist(body))
                }
                None => {
                    self.notify(Severity::Warning, "select a playlist first");
                    vec![]
                }
            },
            Intent::SetPlaylistName(name) => {
                self.name_field = name;
                vec![]
            }
            Intent::SavePlaylist => {
                if self.name_field.is_empty() {
                    self.notify(Severity::Warning, "enter a playlist name");
                    return vec![];
                }
                self.issue(Request::SavePlaylist(SavePlaylist {
                    playlist_name: self.name_field.clone(),
                    videos: checked_videos(&self.grid),
                }))
            }
            Intent::ToggleVideo(video) => {
                if self.mode.is_editing() {
                    toggle_video(&mut self.grid, &video);
                }
                vec![]
            }
            Intent::SelectAll => {
                select_all(&mut self.grid);
                vec![]
            }
            Intent::DeselectAll => {
                select_videos(&mut self.grid, self.book.members(""));
                vec![]
            }
            Intent::MediaKey(key) => self.issue(Request::MediaControl(key)),
            Intent::GainUp => {
                self.controls.gain_up();
                vec![]
            }
            Intent::GainDown => {
                self.controls.gain_down();
                vec![]
            }
            Intent::CycleVisualizer => {
                self.controls.cycle_visualizer();
                vec![]
            }
        }
    }

    // ── Outcomes ────────────────────────────────────────────────────────────

    pub fn on_outcome(&mut self, outcome: Outcome) -> Vec<Request> {
        let Outcome { request, result } = outcome;
        self.inflight.release(request.kind());
        let response = match result {
            Ok(response) => response,
            Err(e) => {
                self.notify(
                    Severity::Error,
                    format!("{} failed: {}", request.describe(), e.summary()),
                );
                return vec![];
            }
        };

        match (request, response) {
            (Request::FetchVideos, Response::Videos(videos)) => {
                self.apply_videos(&videos);
                vec![]
            }
            (Request::FetchPlaylists, Response::Playlists(playlists)) => {
                self.apply_playlists(&playlists);
                vec![]
            }
            (Request::FetchRandomCandidates, Response::Videos(videos)) => {
                match pick_random(&videos, &mut rand::thread_rng()) {
                    Some(video) => {
                        let name = video.name.clone();
                        self.handle(Intent::PlayVideo(name))
                    }
                    None => {
                        self.notify(Severity::Warning, "no videos to play");
                        vec![]
                    }
                }
            }
            (Request::UploadVideo { video_name, .. }, Response::StoragePath(path)) => {
                info!("uploaded {} to {}", video_name, path);
                self.notify(Severity::Success, format!("uploaded to {}", path));
                vec![Request::FetchVideos]
            }
            (Request::DeleteVideo { video_name }, _) => {
                self.notify(Severity::Success, format!("deleted {}", video_name));
                vec![Request::FetchVideos]
            }
            (Request::SavePlaylist(body), _) => {
                let verb = if body.is_delete() { "deleted" } else { "saved" };
                self.notify(
                    Severity::Success,
                    format!("{} playlist {}", verb, body.playlist_name),
                );
                self.pending_reselect = Some(wire_name(&body.playlist_name));
                vec![Request::FetchPlaylists]
            }
            (request, _) => {
                self.notify(Severity::Success, request.describe());
                vec![]
            }
        }
    }

    // ── Internals ───────────────────────────────────────────────────────────

    /// Admit `request` through the single-flight guard.
    fn issue(&mut self, request: Request) -> Vec<Request> {
        if self.inflight.try_acquire(request.kind()) {
            vec![request]
        } else {
            debug!("dropped duplicate: {}", request.describe());
            self.notify(
                Severity::Info,
                format!("{} already in progress", request.describe()),
            );
            vec![]
        }
    }

    fn notify(&mut self, severity: Severity, message: impl Into<String>) {
        self.notices.push(Notice {
            severity,
            message: message.into(),
        });
    }

    /// Apply a dropdown change.
    fn select_playlist(&mut self, value: &str) {
        let value = if self.dropdown.show(value) {
            value
        } else {
            PLAYLIST_NONE
        };
        self.mode = mode_for(value);
        self.name_field.clear();
        match &self.mode {
            PlaylistMode::Inactive | PlaylistMode::New => {
                select_videos(&mut self.grid, &[]);
            }
            PlaylistMode::Existing(name) => {
                self.name_field = display_name(name);
                select_videos(&mut self.grid, self.book.members(name));
            }
        }
    }

    /// Rebuild the grid. Checked boxes survive for videos still present.
    fn apply_videos(&mut self, videos: &[Video]) {
        let checked = checked_videos(&self.grid);
        self.grid = render_video_grid(videos);
        if self.mode.is_editing() {
            select_videos(&mut self.grid, &checked);
        }
    }

    /// Rebuild mapping and dropdown together, then restore the selection.
    fn apply_playlists(&mut self, playlists: &[Playlist]) {
        self.book = PlaylistBook::from_playlists(playlists);
        self.dropdown.rebuild(playlists);

        if let Some(wire) = self.pending_reselect.take() {
            if self.book.contains(&wire) {
                self.select_playlist(&wire);
            } else {
                // Saved with no videos: the playlist is gone. Stay in create
                // mode with the typed name and boxes as they were.
                self.dropdown.show(PLAYLIST_NEW);
                self.mode = PlaylistMode::New;
            }
            return;
        }

        match self.mode.clone() {
            PlaylistMode::Existing(name) if self.book.contains(&name) => {
                self.dropdown.show(&name);
            }
            PlaylistMode::New => {
                self.dropdown.show(PLAYLIST_NEW);
            }
            PlaylistMode::Existing(_) | PlaylistMode::Inactive => {
                self.select_playlist(PLAYLIST_NONE);
            }
        }
    }
}

/// Uniform pick from the freshly fetched list.
pub fn pick_random<'a, R: Rng + ?Sized>(videos: &'a [Video], rng: &mut R) -> Option<&'a Video> {
    videos.choose(rng)
}
