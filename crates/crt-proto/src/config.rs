use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::platform;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub playback: PlaybackConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout. Unset means requests may hang indefinitely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

/// Initial values of the gain and visualizer controls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackConfig {
    #[serde(default = "default_gain")]
    pub gain: f32,
    #[serde(default = "default_visualizer")]
    pub visualizer: String,
    /// Choices the visualizer control cycles through (VLC effect names).
    #[serde(default = "default_visualizers")]
    pub visualizers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Drop a request when one of the same kind is still in flight. Off by
    /// default: every action sends its request.
    #[serde(default = "default_single_flight")]
    pub single_flight: bool,
    #[serde(default = "default_show_keys_bar")]
    pub show_keys_bar: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: None,
        }
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            gain: default_gain(),
            visualizer: default_visualizer(),
            visualizers: default_visualizers(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            single_flight: default_single_flight(),
            show_keys_bar: default_show_keys_bar(),
        }
    }
}

impl ServerConfig {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs
            .filter(|s| *s > 0)
            .map(Duration::from_secs)
    }
}

fn default_base_url() -> String {
    platform::DEFAULT_SERVER_URL.to_string()
}

fn default_gain() -> f32 {
    1.0
}

fn default_visualizer() -> String {
    "none".to_string()
}

fn default_visualizers() -> Vec<String> {
    ["none", "spectrum", "spectrometer", "scope", "vuMeter"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_single_flight() -> bool {
    false
}

fn default_show_keys_bar() -> bool {
    true
}

impl Config {
    /// Load from the default location, writing defaults on first run.
    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            let config = Self::default();
            config.save_to(&config_path)?;
            return Ok(config);
        }

        Self::load_from(&config_path)
    }

    /// Load an explicit file. Missing keys fall back to defaults.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        platform::config_dir().join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.base_url, "http://127.0.0.1:3000");
        assert_eq!(config.server.request_timeout(), None);
        assert_eq!(config.playback.gain, 1.0);
        assert_eq!(config.playback.visualizers[0], "none");
        assert!(!config.ui.single_flight);
        assert!(Config::config_path().ends_with("crt/config.toml"));
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
            [server]
            base_url = "http://tv.lan:3000"
            request_timeout_secs = 10
            "#,
        )
        .unwrap();
        assert_eq!(config.server.base_url, "http://tv.lan:3000");
        assert_eq!(config.server.request_timeout(), Some(Duration::from_secs(10)));
        assert_eq!(config.playback, PlaybackConfig::default());
        assert_eq!(config.ui, UiConfig::default());
    }

    #[test]
    fn test_zero_timeout_means_none() {
        let server = ServerConfig {
            request_timeout_secs: Some(0),
            ..ServerConfig::default()
        };
        assert_eq!(server.request_timeout(), None);
    }

    #[test]
    fn test_save_and_load_from() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut config = Config::default();
        config.playback.gain = 2.5;
        config.ui.single_flight = true;
        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }
}
