//! Gain and visualizer controls. Their values are read fresh on every play.

use crt_proto::config::PlaybackConfig;
use crt_proto::protocol::{PlaybackSettings, VISUALIZER_NONE};

pub const GAIN_STEP: f32 = 0.5;
pub const GAIN_MIN: f32 = 0.0;
/// VLC's `--gain` upper bound.
pub const GAIN_MAX: f32 = 8.0;

#[derive(Debug, Clone)]
pub struct PlaybackControls {
    gain: f32,
    visualizers: Vec<String>,
    visualizer_idx: usize,
}

impl PlaybackControls {
    pub fn from_config(config: &PlaybackConfig) -> Self {
        let mut visualizers = config.visualizers.clone();
        if !visualizers.iter().any(|v| v == VISUALIZER_NONE) {
            visualizers.insert(0, VISUALIZER_NONE.to_string());
        }
        if !visualizers.contains(&config.visualizer) {
            visualizers.push(config.visualizer.clone());
        }
        let visualizer_idx = visualizers
            .iter()
            .position(|v| *v == config.visualizer)
            .unwrap_or(0);
        Self {
            gain: config.gain.clamp(GAIN_MIN, GAIN_MAX),
            visualizers,
            visualizer_idx,
        }
    }

    pub fn gain(&self) -> f32 {
        self.gain
    }

    pub fn visualizer(&self) -> &str {
        self.visualizers
            .get(self.visualizer_idx)
            .map(String::as_str)
            .unwrap_or(VISUALIZER_NONE)
    }

    pub fn gain_up(&mut self) {
        self.gain = (self.gain + GAIN_STEP).min(GAIN_MAX);
    }

    pub fn gain_down(&mut self) {
        self.gain = (self.gain - GAIN_STEP).max(GAIN_MIN);
    }

    pub fn cycle_visualizer(&mut self) {
        if !self.visualizers.is_empty() {
            self.visualizer_idx = (self.visualizer_idx + 1) % self.visualizers.len();
        }
    }

    /// Snapshot for a play call.
    pub fn settings(&self) -> PlaybackSettings {
        PlaybackSettings::from_controls(self.gain, self.visualizer())
    }
}

impl Default for PlaybackControls {
    fn default() -> Self {
        Self::from_config(&PlaybackConfig::default())
    }
}
