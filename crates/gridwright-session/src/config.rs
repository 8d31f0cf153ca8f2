//! Session configuration and data-file loading.
//!
//! Configuration files may be written in RON, TOML, or JSON; the format is
//! picked from the file extension. Every field has a default, so an empty
//! document yields a unit grid anchored at the world origin.

use crate::event::DEFAULT_EVENT_CAPACITY;
use gridwright_spatial::{GridLayout, LayoutError, WorldPos};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// ===========================================================================
// Errors
// ===========================================================================

/// Errors that can occur while loading configuration or data files.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file has an extension we don't support.
    #[error("unsupported format for file: {file}")]
    UnsupportedFormat { file: PathBuf },

    /// A deserialization error occurred.
    #[error("parse error in {file}: {detail}")]
    Parse { file: PathBuf, detail: String },

    /// The configured grid layout is unusable.
    #[error("invalid grid layout: {0}")]
    Layout(#[from] LayoutError),

    /// An I/O error occurred.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

// ===========================================================================
// Format detection
// ===========================================================================

/// Supported data file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Ron,
    Toml,
    Json,
}

/// Detect the format of a file based on its extension.
pub fn detect_format(path: &Path) -> Result<Format, ConfigError> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("ron") => Ok(Format::Ron),
        Some("toml") => Ok(Format::Toml),
        Some("json") => Ok(Format::Json),
        _ => Err(ConfigError::UnsupportedFormat {
            file: path.to_path_buf(),
        }),
    }
}

// ===========================================================================
// Deserialization
// ===========================================================================

/// Deserialize `content` in the given format. `file` is only used to label
/// parse errors.
pub fn parse_str<T: DeserializeOwned>(
    content: &str,
    format: Format,
    file: &Path,
) -> Result<T, ConfigError> {
    let parse_error = |detail: String| ConfigError::Parse {
        file: file.to_path_buf(),
        detail,
    };
    match format {
        Format::Ron => ron::from_str(content).map_err(|e| parse_error(e.to_string())),
        Format::Json => serde_json::from_str(content).map_err(|e| parse_error(e.to_string())),
        Format::Toml => toml::from_str(content).map_err(|e| parse_error(e.to_string())),
    }
}

/// Read a file and deserialize it according to its format (detected from extension).
pub fn deserialize_file<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;
    parse_str(&content, format, path)
}

// ===========================================================================
// SessionConfig
// ===========================================================================

/// Grid geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// World-space size of one cell on each axis.
    pub cell_size: [f32; 3],
    /// World position of the minimum corner of cell `(0, 0, 0)`.
    pub origin: [f32; 3],
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            cell_size: [1.0; 3],
            origin: [0.0; 3],
        }
    }
}

/// Settings for a [`PlacementSession`](crate::PlacementSession).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub grid: GridConfig,
    /// Capacity of the notification ring buffer (clamped to at least 1).
    pub event_capacity: usize,
    /// Start with edit mode already enabled instead of waiting for a signal.
    pub start_editing: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            event_capacity: DEFAULT_EVENT_CAPACITY,
            start_editing: false,
        }
    }
}

impl SessionConfig {
    /// Load a configuration file (`.ron`, `.toml`, or `.json`).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        deserialize_file(path.as_ref())
    }

    /// Build the validated grid layout this configuration describes.
    pub fn layout(&self) -> Result<GridLayout, ConfigError> {
        let layout = GridLayout::new(self.grid.cell_size, WorldPos::from(self.grid.origin))?;
        Ok(layout)
    }
}
