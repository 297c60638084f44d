// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Editor configuration.
//!
//! Settings are read from a JSON file. Every field has a default, so a
//! partial file only overrides what it names.

use crate::models::{options::AspectRatio, rect::Size};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable naming an alternative configuration file.
pub const CONFIG_ENV_VAR: &str = "REELCROP_CONFIG";

/// Configuration file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "reelcrop.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Period of the capture and replay loops in milliseconds.
    pub tick_interval_ms: u64,
    /// Volume of the editing player when a video is opened.
    pub default_volume: f64,
    /// Volume restored when unmuting from zero.
    pub unmute_volume: f64,
    pub default_playback_rate: f64,
    pub default_aspect_ratio: AspectRatio,
    /// Size of the container the editable video is displayed in.
    pub display_width: f64,
    pub display_height: f64,
    /// Pixel size of the replay canvas.
    pub preview_width: f64,
    pub preview_height: f64,
    /// How long a still image plays for, in seconds.
    pub still_duration_secs: f64,
    pub export_file_name: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 17,
            default_volume: 0.8,
            unmute_volume: 0.5,
            default_playback_rate: 1.0,
            default_aspect_ratio: AspectRatio::default(),
            display_width: 460.0,
            display_height: 307.0,
            preview_width: 460.0,
            preview_height: 307.0,
            still_duration_secs: 10.0,
            export_file_name: "Playback_Data.json".to_string(),
        }
    }
}

impl EditorConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }

    pub fn display_size(&self) -> Size {
        Size::new(self.display_width, self.display_height)
    }

    pub fn preview_size(&self) -> Size {
        Size::new(self.preview_width, self.preview_height)
    }

    /// Load a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Self = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        Ok(config.sanitized())
    }

    /// Load the configuration from `REELCROP_CONFIG` or `reelcrop.json`,
    /// falling back to defaults when no file exists or it cannot be parsed.
    pub fn load_or_default() -> Self {
        let path = std::env::var_os(CONFIG_ENV_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Self::default();
        }

        match Self::load(&path) {
            Ok(config) => {
                log::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("{:#}; using defaults", e);
                Self::default()
            }
        }
    }

    /// Replace out-of-range values with their defaults.
    fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !(0.0..=1.0).contains(&self.default_volume) {
            self.default_volume = defaults.default_volume;
        }
        if !(0.0..=1.0).contains(&self.unmute_volume) || self.unmute_volume == 0.0 {
            self.unmute_volume = defaults.unmute_volume;
        }
        if !(self.default_playback_rate.is_finite() && self.default_playback_rate > 0.0) {
            self.default_playback_rate = defaults.default_playback_rate;
        }
        if !self.display_size().is_measurable() {
            self.display_width = defaults.display_width;
            self.display_height = defaults.display_height;
        }
        if !self.preview_size().is_measurable() {
            self.preview_width = defaults.preview_width;
            self.preview_height = defaults.preview_height;
        }
        if !(self.still_duration_secs.is_finite() && self.still_duration_secs > 0.0) {
            self.still_duration_secs = defaults.still_duration_secs;
        }
        self
    }
}
