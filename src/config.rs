//! Visualizer configuration
//!
//! Everything is optional; a missing file or field falls back to the
//! defaults below. Loaded from TOML:
//!
//! ```toml
//! resize_debounce_ms = 300
//! compact = true
//! printable = false
//!
//! [screen]
//! width = 5000
//! height = 5000
//!
//! [full]
//! row_height = 30
//! details_width = 150
//!
//! [compact_metrics]
//! row_height = 20
//! ```
//!
//! `[full]` and `[compact_metrics]` override their density's metrics field by
//! field; anything a table omits keeps that density's own default.

use crate::errors::{Result, VisualizerError};
use crate::layout::diagram::{Canvas, Density};
use crate::layout::LayoutMetrics;
use serde::{Deserialize, Deserializer};
use std::path::Path;
use std::time::Duration;

/// Largest drawing surface the host can allocate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ScreenBounds {
    pub width: u32,
    pub height: u32,
}

impl Default for ScreenBounds {
    fn default() -> Self {
        ScreenBounds {
            width: 5000,
            height: 5000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct VisualizerConfig {
    #[serde(deserialize_with = "full_metrics")]
    pub full: LayoutMetrics,
    #[serde(deserialize_with = "compact_metrics")]
    pub compact_metrics: LayoutMetrics,
    /// Quiet period after the last resize event before relayout
    pub resize_debounce_ms: u64,
    pub screen: ScreenBounds,
    /// Initial density
    pub compact: bool,
    /// Initial palette
    pub printable: bool,
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        VisualizerConfig {
            full: LayoutMetrics::FULL,
            compact_metrics: LayoutMetrics::COMPACT,
            resize_debounce_ms: 300,
            screen: ScreenBounds::default(),
            compact: true,
            printable: false,
        }
    }
}

impl VisualizerConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| VisualizerError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| VisualizerError::Config(e.to_string()))
    }

    pub fn metrics(&self, density: Density) -> LayoutMetrics {
        match density {
            Density::Compact => self.compact_metrics,
            Density::Full => self.full,
        }
    }

    pub fn resize_debounce(&self) -> Duration {
        Duration::from_millis(self.resize_debounce_ms)
    }

    pub fn screen_bounds(&self) -> Canvas {
        Canvas::new(self.screen.width, self.screen.height)
    }
}

/// One density table as written; `None` keeps the base value.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct MetricsOverrides {
    row_height: Option<u32>,
    row_separator: Option<u32>,
    title_height: Option<u32>,
    address_width: Option<u32>,
    content_width: Option<u32>,
    details_left_padding: Option<u32>,
    details_width: Option<u32>,
    grid_gap: Option<u32>,
    text_padding_x: Option<u32>,
    text_padding_y: Option<u32>,
}

impl MetricsOverrides {
    fn apply(self, base: LayoutMetrics) -> LayoutMetrics {
        LayoutMetrics {
            row_height: self.row_height.unwrap_or(base.row_height),
            row_separator: self.row_separator.unwrap_or(base.row_separator),
            title_height: self.title_height.unwrap_or(base.title_height),
            address_width: self.address_width.unwrap_or(base.address_width),
            content_width: self.content_width.unwrap_or(base.content_width),
            details_left_padding: self.details_left_padding.unwrap_or(base.details_left_padding),
            details_width: self.details_width.unwrap_or(base.details_width),
            grid_gap: self.grid_gap.unwrap_or(base.grid_gap),
            text_padding_x: self.text_padding_x.unwrap_or(base.text_padding_x),
            text_padding_y: self.text_padding_y.unwrap_or(base.text_padding_y),
        }
    }
}

fn full_metrics<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<LayoutMetrics, D::Error> {
    MetricsOverrides::deserialize(deserializer).map(|table| table.apply(LayoutMetrics::FULL))
}

fn compact_metrics<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<LayoutMetrics, D::Error> {
    MetricsOverrides::deserialize(deserializer).map(|table| table.apply(LayoutMetrics::COMPACT))
}
