//! Editor configuration.

use crate::history::DEFAULT_CAPACITY;
use crate::snap::SNAP_RADIUS;
use crate::tools::ToolStyle;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors raised while loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid config value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Tunables of the canvas. Every field may be omitted from the JSON form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    /// Number of undo steps kept.
    pub history_capacity: usize,
    /// Endpoint snapping distance in field pixels.
    pub snap_radius: f64,
    /// Line drafts shorter than this are discarded.
    pub min_line_length: f64,
    /// Area drafts narrower or shorter than this are discarded.
    pub min_area_size: f64,
    /// Extra slop around elements when picking them.
    pub hit_tolerance: f64,
    /// Style of newly created elements.
    pub style: ToolStyle,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_CAPACITY,
            snap_radius: SNAP_RADIUS,
            min_line_length: 8.0,
            min_area_size: 6.0,
            hit_tolerance: 6.0,
            style: ToolStyle::default(),
        }
    }
}

impl EditorConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Reject values the canvas cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.history_capacity == 0 {
            return Err(ConfigError::Invalid {
                field: "historyCapacity",
                reason: "must be at least 1".into(),
            });
        }
        let distances = [
            ("snapRadius", self.snap_radius),
            ("minLineLength", self.min_line_length),
            ("minAreaSize", self.min_area_size),
            ("hitTolerance", self.hit_tolerance),
            ("style.tick", self.style.tick),
        ];
        for (field, value) in distances {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("{value} is not a non-negative distance"),
                });
            }
        }
        let sizes = [
            ("style.playerRadius", self.style.player_radius),
            ("style.thickness", self.style.thickness),
        ];
        for (field, value) in sizes {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("{value} is not a positive size"),
                });
            }
        }
        Ok(())
    }
}
