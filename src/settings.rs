//! Game settings
//!
//! Loaded from an optional JSON file; every field falls back to its default
//! so partial files are fine.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::StartupError;

/// How velocity decays while ascend is released
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum GravityMode {
    /// Fixed decrement every frame regardless of frame time (classic feel;
    /// effective gravity grows with frame rate)
    #[default]
    PerFrame,
    /// Decrement scaled by frame time, matching `PerFrame` at 60 Hz
    PerSecond,
}

impl GravityMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GravityMode::PerFrame => "per_frame",
            GravityMode::PerSecond => "per_second",
        }
    }
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Window ===
    pub width: u32,
    pub height: u32,
    pub title: String,
    /// Block on vertical sync when presenting
    pub vsync: bool,

    // === Simulation ===
    pub gravity: GravityMode,
    /// Upper bound on a single frame's delta time (seconds); `None` = unbounded
    pub max_frame_dt: Option<f32>,
    /// Obstacle jitter seed; `None` picks one from the clock at startup
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
            title: "Flappy bird speedrun".to_string(),
            vsync: true,

            gravity: GravityMode::PerFrame,
            max_frame_dt: None,
            seed: None,
        }
    }
}

impl Settings {
    /// Parse settings from a JSON string
    pub fn from_json(json: &str) -> Result<Self, StartupError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, StartupError> {
        let json = std::fs::read_to_string(path).map_err(|source| StartupError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load from `path` if given, else use defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, StartupError> {
        match path {
            Some(path) => Self::load(path),
            None => {
                log::info!("Using default settings");
                Ok(Self::default())
            }
        }
    }

    /// Reject settings the host cannot run with
    pub fn validate(&self) -> Result<(), StartupError> {
        if self.width == 0 || self.height == 0 {
            return Err(StartupError::InvalidSetting(format!(
                "window size must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        if let Some(max_dt) = self.max_frame_dt {
            if !(max_dt > 0.0 && max_dt.is_finite()) {
                return Err(StartupError::InvalidSetting(format!(
                    "max_frame_dt must be a positive number, got {max_dt}"
                )));
            }
        }
        Ok(())
    }
}
