//! Network side of the command dispatcher.
//!
//! `ConsoleCore` decides *what* to send and returns `Request`s; `execute`
//! performs one request against a `MediaServer` and packages the result as an
//! `Outcome` for the core to apply. Nothing here touches UI state.

use std::path::PathBuf;

use crt_proto::client::read_upload;
use crt_proto::protocol::{MediaKey, PlayMedia, PlayPlaylist, PlayVideo, Playlist, SavePlaylist, Video};
use crt_proto::{ClientResult, MediaServer};
use tracing::{info, warn};

/// One network call.
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    /// Refresh the grid.
    FetchVideos,
    /// Refresh the playlist mapping and dropdown.
    FetchPlaylists,
    /// `GET /videos` for a random pick; the grid is left alone.
    FetchRandomCandidates,
    UploadVideo { path: PathBuf, video_name: String },
    PlayVideo(PlayVideo),
    DeleteVideo { video_name: String },
    SavePlaylist(SavePlaylist),
    PlayPlaylist(PlayPlaylist),
    PlayMedia(PlayMedia),
    Stop,
    MediaControl(MediaKey),
}

/// Request category used by the single-flight guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    FetchVideos,
    FetchPlaylists,
    Random,
    Upload,
    Play,
    Delete,
    SavePlaylist,
    PlayPlaylist,
    PlayMedia,
    Stop,
    MediaControl,
}

impl RequestKind {
    /// List refreshes are never deduplicated: a refresh issued after a
    /// mutation must not be swallowed by an older one still in flight.
    pub fn is_guarded(self) -> bool {
        !matches!(self, Self::FetchVideos | Self::FetchPlaylists)
    }
}

impl Request {
    pub fn kind(&self) -> RequestKind {
        match self {
            Self::FetchVideos => RequestKind::FetchVideos,
            Self::FetchPlaylists => RequestKind::FetchPlaylists,
            Self::FetchRandomCandidates => RequestKind::Random,
            Self::UploadVideo { .. } => RequestKind::Upload,
            Self::PlayVideo(_) => RequestKind::Play,
            Self::DeleteVideo { .. } => RequestKind::Delete,
            Self::SavePlaylist(_) => RequestKind::SavePlaylist,
            Self::PlayPlaylist(_) => RequestKind::PlayPlaylist,
            Self::PlayMedia(_) => RequestKind::PlayMedia,
            Self::Stop => RequestKind::Stop,
            Self::MediaControl(_) => RequestKind::MediaControl,
        }
    }

    /// Short description for logs and toasts.
    pub fn describe(&self) -> String {
        match self {
            Self::FetchVideos => "load videos".to_string(),
            Self::FetchPlaylists => "load playlists".to_string(),
            Self::FetchRandomCandidates => "pick random video".to_string(),
            Self::UploadVideo { video_name, .. } => format!("upload {}", video_name),
            Self::PlayVideo(body) => format!("play {}", body.video_name),
            Self::DeleteVideo { video_name } => format!("delete {}", video_name),
            Self::SavePlaylist(body) if body.is_delete() => {
                format!("delete playlist {}", body.playlist_name)
            }
            Self::SavePlaylist(body) => format!("save playlist {}", body.playlist_name),
            Self::PlayPlaylist(body) => match &body.playlist_name {
                Some(name) => format!("play playlist {}", name),
                None => "shuffle all".to_string(),
            },
            Self::PlayMedia(body) => format!("play {}", body.url),
            Self::Stop => "stop".to_string(),
            Self::MediaControl(key) => key.label().to_string(),
        }
    }
}

/// Successful response payloads.
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    Videos(Vec<Video>),
    Playlists(Vec<Playlist>),
    /// Storage path returned by an upload.
    StoragePath(String),
    Done,
}

/// A finished request and what came back.
#[derive(Debug)]
pub struct Outcome {
    pub request: Request,
    pub result: ClientResult<Response>,
}

/// Perform one request. Never retries.
pub async fn execute<S: MediaServer>(server: &S, request: Request) -> Outcome {
    info!("→ {}", request.describe());
    let result = perform(server, &request).await;
    if let Err(e) = &result {
        warn!("{} failed: {}", request.describe(), e);
    }
    Outcome { request, result }
}

async fn perform<S: MediaServer>(server: &S, request: &Request) -> ClientResult<Response> {
    match request {
        Request::FetchVideos | Request::FetchRandomCandidates => {
            server.list_videos().await.map(Response::Videos)
        }
        Request::FetchPlaylists => server.list_playlists().await.map(Response::Playlists),
        Request::UploadVideo { path, video_name } => {
            let body = read_upload(path).await?;
            server
                .upload_video(video_name, body)
                .await
                .map(Response::StoragePath)
        }
        Request::PlayVideo(body) => server.play_video(body).await.map(|_| Response::Done),
        Request::DeleteVideo { video_name } => {
            server.delete_video(video_name).await.map(|_| Response::Done)
        }
        Request::SavePlaylist(body) => server.save_playlist(body).await.map(|_| Response::Done),
        Request::PlayPlaylist(body) => server.play_playlist(body).await.map(|_| Response::Done),
        Request::PlayMedia(body) => server.play_media(body).await.map(|_| Response::Done),
        Request::Stop => server.stop().await.map(|_| Response::Done),
        Request::MediaControl(key) => server.media_control(*key).await.map(|_| Response::Done),
    }
}

#[cfg(test)]
pub(crate) mod fake {
    //! Recording in-memory `MediaServer` for tests.

    use std::sync::Mutex;

    use crt_proto::protocol::{
        MediaKey, PlayMedia, PlayPlaylist, PlayVideo, Playlist, SavePlaylist, Video,
    };
    use crt_proto::{ClientError, ClientResult, MediaServer};

    #[derive(Debug, Clone, PartialEq)]
    pub enum Call {
        ListVideos,
        Upload { video_name: String, body: Vec<u8> },
        Play(PlayVideo),
        Delete(String),
        ListPlaylists,
        Save(SavePlaylist),
        PlayPlaylist(PlayPlaylist),
        PlayMedia(PlayMedia),
        Stop,
        MediaControl(MediaKey),
    }

    #[derive(Default)]
    pub struct FakeServer {
        pub videos: Vec<Video>,
        pub playlists: Vec<Playlist>,
        /// When set, every call fails with this status.
        pub fail_status: Option<u16>,
        pub calls: Mutex<Vec<Call>>,
    }

    impl FakeServer {
        pub fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: Call) -> ClientResult<()> {
            self.calls.lock().unwrap().push(call);
            match self.fail_status {
                Some(status) => Err(ClientError::Status {
                    status,
                    body: "Something went wrong".into(),
                }),
                None => Ok(()),
            }
        }
    }

    impl MediaServer for FakeServer {
        async fn list_videos(&self) -> ClientResult<Vec<Video>> {
            self.record(Call::ListVideos)?;
            Ok(self.videos.clone())
        }

        async fn upload_video(&self, video_name: &str, body: Vec<u8>) -> ClientResult<String> {
            self.record(Call::Upload {
                video_name: video_name.to_string(),
                body,
            })?;
            Ok(format!("uploads/{}", video_name))
        }

        async fn play_video(&self, body: &PlayVideo) -> ClientResult<()> {
            self.record(Call::Play(body.clone()))
        }

        async fn delete_video(&self, video_name: &str) -> ClientResult<()> {
            self.record(Call::Delete(video_name.to_string()))
        }

        async fn list_playlists(&self) -> ClientResult<Vec<Playlist>> {
            self.record(Call::ListPlaylists)?;
            Ok(self.playlists.clone())
        }

        async fn save_playlist(&self, body: &SavePlaylist) -> ClientResult<()> {
            self.record(Call::Save(body.clone()))
        }

        async fn play_playlist(&self, body: &PlayPlaylist) -> ClientResult<()> {
            self.record(Call::PlayPlaylist(body.clone()))
        }

        async fn play_media(&self, body: &PlayMedia) -> ClientResult<()> {
            self.record(Call::PlayMedia(body.clone()))
        }

        async fn stop(&self) -> ClientResult<()> {
            self.record(Call::Stop)
        }

        async fn media_control(&self, key: MediaKey) -> ClientResult<()> {
            self.record(Call::MediaControl(key))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fake::{Call, FakeServer};
    use super::*;
    use crt_proto::protocol::PlaybackSettings;
    use crt_proto::ClientError;
    use std::io::Write;

    fn video(name: &str) -> Video {
        Video {
            name: name.into(),
            name_without_ext: name.split('.').next().unwrap_or(name).into(),
            size: None,
        }
    }

    #[tokio::test]
    async fn test_fetch_videos() {
        let server = FakeServer {
            videos: vec![video("a.mp4")],
            ..Default::default()
        };
        let outcome = execute(&server, Request::FetchVideos).await;
        assert_eq!(outcome.result.unwrap(), Response::Videos(vec![video("a.mp4")]));
        assert_eq!(server.calls(), vec![Call::ListVideos]);
    }

    #[tokio::test]
    async fn test_upload_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"frames").unwrap();
        let server = FakeServer::default();
        let outcome = execute(
            &server,
            Request::UploadVideo {
                path: file.path().to_path_buf(),
                video_name: "clip.mp4".into(),
            },
        )
        .await;
        assert_eq!(
            outcome.result.unwrap(),
            Response::StoragePath("uploads/clip.mp4".into())
        );
        assert_eq!(
            server.calls(),
            vec![Call::Upload {
                video_name: "clip.mp4".into(),
                body: b"frames".to_vec()
            }]
        );
    }

    #[tokio::test]
    async fn test_upload_missing_file_never_reaches_server() {
        let server = FakeServer::default();
        let outcome = execute(
            &server,
            Request::UploadVideo {
                path: PathBuf::from("/no/such/file.mp4"),
                video_name: "file.mp4".into(),
            },
        )
        .await;
        assert!(matches!(outcome.result, Err(ClientError::Io { .. })));
        assert!(server.calls().is_empty());
    }

    #[tokio::test]
    async fn test_failure_is_reported_not_retried() {
        let server = FakeServer {
            fail_status: Some(500),
            ..Default::default()
        };
        let outcome = execute(&server, Request::Stop).await;
        assert!(matches!(
            outcome.result,
            Err(ClientError::Status { status: 500, .. })
        ));
        assert_eq!(server.calls(), vec![Call::Stop]);
    }

    #[test]
    fn test_describe_and_kind() {
        let shuffle = Request::PlayPlaylist(PlayPlaylist::shuffle_all(PlaybackSettings::default()));
        assert_eq!(shuffle.describe(), "shuffle all");
        assert_eq!(shuffle.kind(), RequestKind::PlayPlaylist);
        let delete = Request::SavePlaylist(SavePlaylist {
            playlist_name: "old".into(),
            videos: vec![],
        });
        assert_eq!(delete.describe(), "delete playlist old");
        assert!(!Request::FetchVideos.kind().is_guarded());
        assert!(Request::Stop.kind().is_guarded());
    }
}
