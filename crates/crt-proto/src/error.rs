use std::path::PathBuf;

/// Every way a single console action can fail. Transport failures and non-2xx
/// responses are both just "the action failed" to the UI.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("could not read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid server url '{0}'")]
    Url(String),
}

impl ClientError {
    /// Short form for toasts.
    pub fn summary(&self) -> String {
        match self {
            Self::Transport(e) if e.is_connect() => "server unreachable".to_string(),
            Self::Transport(e) if e.is_timeout() => "request timed out".to_string(),
            Self::Transport(e) if e.is_decode() => "unexpected response".to_string(),
            Self::Transport(_) => "request failed".to_string(),
            Self::Status { status, .. } => format!("server error {}", status),
            Self::Io { path, .. } => format!("cannot read {}", path.display()),
            Self::Url(url) => format!("bad url {}", url),
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
