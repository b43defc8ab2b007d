use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::gauge::{GaugeGeometry, GaugeStyle};

pub const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub tick_interval_ms: u64,
    pub window: WindowConfig,
    pub gauge: GaugeConfig,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 2000,
            window: WindowConfig::default(),
            gauge: GaugeConfig::default(),
            log_level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 240.0,
            height: 130.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GaugeConfig {
    pub style: GaugeStyle,
    pub diameter: f32,
    pub stroke_width: f32,
    pub label_height: f32,
    pub label_padding: f32,
    pub fade_in_ms: u64,
}

impl Default for GaugeConfig {
    fn default() -> Self {
        let geometry = GaugeGeometry::default();
        Self {
            style: GaugeStyle::default(),
            diameter: geometry.diameter,
            stroke_width: geometry.stroke_width,
            label_height: geometry.label_height,
            label_padding: geometry.label_padding,
            fade_in_ms: 500,
        }
    }
}

impl GaugeConfig {
    pub fn geometry(&self) -> GaugeGeometry {
        GaugeGeometry {
            diameter: self.diameter,
            stroke_width: self.stroke_width,
            label_height: self.label_height,
            label_padding: self.label_padding,
        }
    }
}

impl AppConfig {
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("traygauge").join(CONFIG_FILE))
    }

    /// Loads the user config. A missing file yields defaults; an unreadable
    /// or malformed one is an error.
    pub fn load() -> anyhow::Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from_path(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from_path(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config: AppConfig = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        Ok(config.validated())
    }

    /// Replaces non-positive sizes and a zero interval with defaults.
    pub fn validated(mut self) -> Self {
        let defaults = Self::default();
        if self.tick_interval_ms == 0 {
            self.tick_interval_ms = defaults.tick_interval_ms;
        }
        self.window.width = positive_or(self.window.width, defaults.window.width);
        self.window.height = positive_or(self.window.height, defaults.window.height);
        self.gauge.diameter = positive_or(self.gauge.diameter, defaults.gauge.diameter);
        self.gauge.stroke_width =
            positive_or(self.gauge.stroke_width, defaults.gauge.stroke_width);
        if self.gauge.label_height < 0.0 {
            self.gauge.label_height = defaults.gauge.label_height;
        }
        if self.gauge.label_padding < 0.0 {
            self.gauge.label_padding = defaults.gauge.label_padding;
        }
        self
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn fade_in(&self) -> Duration {
        Duration::from_millis(self.gauge.fade_in_ms)
    }

    pub fn window_size(&self) -> egui::Vec2 {
        egui::vec2(self.window.width, self.window.height)
    }
}

fn positive_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        fallback
    }
}
