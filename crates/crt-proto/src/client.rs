//! HTTP client for the media server.
//!
//! `MediaServer` is the seam the console dispatches through; `HttpMediaServer`
//! is the reqwest implementation. Tests substitute their own fakes.

use std::future::Future;
use std::path::Path;
use std::time::Duration;

use reqwest::{Client, Response, Url};
use tracing::{debug, info};

use crate::error::{ClientError, ClientResult};
use crate::protocol::{
    MediaControl, MediaKey, PlayMedia, PlayPlaylist, PlayVideo, Playlist, SavePlaylist, Video,
    VideoName,
};

/// Every endpoint the console talks to. One method per call, no retries.
pub trait MediaServer: Send + Sync + 'static {
    /// `GET /videos`
    fn list_videos(&self) -> impl Future<Output = ClientResult<Vec<Video>>> + Send;

    /// `POST /videos?video_name=<name>` with the raw file bytes. Returns the
    /// storage path the server wrote to.
    fn upload_video(
        &self,
        video_name: &str,
        body: Vec<u8>,
    ) -> impl Future<Output = ClientResult<String>> + Send;

    /// `PUT /videos`
    fn play_video(&self, body: &PlayVideo) -> impl Future<Output = ClientResult<()>> + Send;

    /// `DELETE /videos`
    fn delete_video(&self, video_name: &str) -> impl Future<Output = ClientResult<()>> + Send;

    /// `GET /playlists`
    fn list_playlists(&self) -> impl Future<Output = ClientResult<Vec<Playlist>>> + Send;

    /// `POST /playlists`
    fn save_playlist(&self, body: &SavePlaylist) -> impl Future<Output = ClientResult<()>> + Send;

    /// `PUT /playlists`
    fn play_playlist(&self, body: &PlayPlaylist) -> impl Future<Output = ClientResult<()>> + Send;

    /// `PUT /custom-media`
    fn play_media(&self, body: &PlayMedia) -> impl Future<Output = ClientResult<()>> + Send;

    /// `GET /stop`
    fn stop(&self) -> impl Future<Output = ClientResult<()>> + Send;

    /// `PATCH /media-control`
    fn media_control(&self, key: MediaKey) -> impl Future<Output = ClientResult<()>> + Send;
}

pub struct HttpMediaServer {
    client: Client,
    base: Url,
}

impl HttpMediaServer {
    /// `timeout` of `None` leaves requests unbounded.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> ClientResult<Self> {
        let base = Url::parse(base_url).map_err(|_| ClientError::Url(base_url.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(ClientError::Url(base_url.to_string()));
        }

        let mut builder = Client::builder();
        if let Some(t) = timeout {
            builder = builder.timeout(t);
        }
        let client = builder.build()?;

        Ok(Self { client, base })
    }

    pub fn base_url(&self) -> &str {
        self.base.as_str()
    }

    /// Absolute URL for `path`, which must start with `/`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base.as_str().trim_end_matches('/'), path)
    }

    pub fn thumbnail_url(&self, video: &Video) -> String {
        self.endpoint(&video.thumbnail_path())
    }
}

/// Map non-2xx to `ClientError::Status`, keeping the body for the log.
async fn expect_success(response: Response) -> ClientResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ClientError::Status {
        status: status.as_u16(),
        body,
    })
}

impl MediaServer for HttpMediaServer {
    async fn list_videos(&self) -> ClientResult<Vec<Video>> {
        let resp = self.client.get(self.endpoint("/videos")).send().await?;
        let videos: Vec<Video> = expect_success(resp).await?.json().await?;
        debug!("fetched {} videos", videos.len());
        Ok(videos)
    }

    async fn upload_video(&self, video_name: &str, body: Vec<u8>) -> ClientResult<String> {
        info!("uploading '{}' ({} bytes)", video_name, body.len());
        let resp = self
            .client
            .post(self.endpoint("/videos"))
            .query(&[("video_name", video_name)])
            .body(body)
            .send()
            .await?;
        Ok(expect_success(resp).await?.text().await?)
    }

    async fn play_video(&self, body: &PlayVideo) -> ClientResult<()> {
        let resp = self.client.put(self.endpoint("/videos")).json(body).send().await?;
        expect_success(resp).await?;
        Ok(())
    }

    async fn delete_video(&self, video_name: &str) -> ClientResult<()> {
        let body = VideoName {
            video_name: video_name.to_string(),
        };
        let resp = self
            .client
            .delete(self.endpoint("/videos"))
            .json(&body)
            .send()
            .await?;
        expect_success(resp).await?;
        Ok(())
    }

    async fn list_playlists(&self) -> ClientResult<Vec<Playlist>> {
        let resp = self.client.get(self.endpoint("/playlists")).send().await?;
        let playlists: Vec<Playlist> = expect_success(resp).await?.json().await?;
        debug!("fetched {} playlists", playlists.len());
        Ok(playlists)
    }

    async fn save_playlist(&self, body: &SavePlaylist) -> ClientResult<()> {
        let resp = self
            .client
            .post(self.endpoint("/playlists"))
            .json(body)
            .send()
            .await?;
        expect_success(resp).await?;
        Ok(())
    }

    async fn play_playlist(&self, body: &PlayPlaylist) -> ClientResult<()> {
        let resp = self
            .client
            .put(self.endpoint("/playlists"))
            .json(body)
            .send()
            .await?;
        expect_success(resp).await?;
        Ok(())
    }

    async fn play_media(&self, body: &PlayMedia) -> ClientResult<()> {
        let resp = self
            .client
            .put(self.endpoint("/custom-media"))
            .json(body)
            .send()
            .await?;
        expect_success(resp).await?;
        Ok(())
    }

    async fn stop(&self) -> ClientResult<()> {
        let resp = self.client.get(self.endpoint("/stop")).send().await?;
        expect_success(resp).await?;
        Ok(())
    }

    async fn media_control(&self, key: MediaKey) -> ClientResult<()> {
        let resp = self
            .client
            .patch(self.endpoint("/media-control"))
            .json(&MediaControl::from(key))
            .send()
            .await?;
        expect_success(resp).await?;
        Ok(())
    }
}

/// Read a local file for upload.
pub async fn read_upload(path: &Path) -> ClientResult<Vec<u8>> {
    tokio::fs::read(path).await.map_err(|source| ClientError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        let server = HttpMediaServer::new("http://127.0.0.1:3000/", None).unwrap();
        assert_eq!(server.endpoint("/videos"), "http://127.0.0.1:3000/videos");
        let server = HttpMediaServer::new("http://crt.local:3000", None).unwrap();
        assert_eq!(server.endpoint("/stop"), "http://crt.local:3000/stop");
    }

    #[test]
    fn test_thumbnail_url() {
        let server = HttpMediaServer::new("http://127.0.0.1:3000", None).unwrap();
        let video = Video {
            name: "a.mp4".into(),
            name_without_ext: "a".into(),
            size: None,
        };
        assert_eq!(server.thumbnail_url(&video), "http://127.0.0.1:3000/thumbs/a.jpg");
    }

    #[test]
    fn test_rejects_bad_base_url() {
        assert!(matches!(
            HttpMediaServer::new("not a url", None),
            Err(ClientError::Url(_))
        ));
        assert!(matches!(
            HttpMediaServer::new("mailto:someone@example.com", None),
            Err(ClientError::Url(_))
        ));
    }

    #[tokio::test]
    async fn test_read_upload_missing_file() {
        let err = read_upload(Path::new("/definitely/not/here.mp4"))
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Io { .. }));
    }
}
