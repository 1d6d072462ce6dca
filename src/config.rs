/// Application configuration
///
/// Read once at startup from `<config dir>/meme-me/config.json`
/// (or the file named by `MEME_ME_CONFIG`). Every field has a default,
/// so a partial file only overrides what it names.
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Environment variable that points at an alternative config file
pub const CONFIG_ENV: &str = "MEME_ME_CONFIG";

/// Top-level configuration
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    /// Fixed caption text style
    pub caption: CaptionStyle,
    /// Geometry of the on-screen scene that gets flattened
    pub scene: SceneMetrics,
    /// Directory the save dialog opens in (defaults to the pictures dir)
    pub export_dir: Option<PathBuf>,
}

/// The one caption style every meme uses
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct CaptionStyle {
    /// TrueType/OpenType file for captions; probed from the system if unset
    pub font_path: Option<PathBuf>,
    /// Font size in points
    pub font_size: f32,
    /// Smallest size the caption may shrink to when fitting its width
    pub min_font_size: f32,
    /// Stroke width as a percentage of the font size
    /// - Negative values stroke and fill
    /// - Positive values stroke only
    pub stroke_width: f32,
    /// Fill colour (RGBA)
    pub fill: [u8; 4],
    /// Stroke colour (RGBA)
    pub stroke: [u8; 4],
}

impl Default for CaptionStyle {
    fn default() -> Self {
        Self {
            font_path: None,
            font_size: 40.0,
            min_font_size: 10.0,
            stroke_width: -6.0,
            fill: [255, 255, 255, 255],
            stroke: [0, 0, 0, 255],
        }
    }
}

/// Scene geometry in points; pixels = points * `scale`
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct SceneMetrics {
    pub width: f32,
    pub height: f32,
    /// Device scale factor used when rasterising. Reported by the display
    /// at runtime, so it is never read from or written to the file.
    #[serde(skip)]
    pub scale: f32,
    /// Pins the export scale regardless of the display
    pub scale_override: Option<f32>,
    /// Height of each toolbar
    pub toolbar_height: f32,
    /// Gap between a toolbar and its caption
    pub caption_inset: f32,
    /// Toolbar colour (RGBA)
    pub chrome_color: [u8; 4],
    /// Colour behind the letterboxed photo (RGBA)
    pub backdrop: [u8; 4],
}

impl Default for SceneMetrics {
    fn default() -> Self {
        Self {
            width: 390.0,
            height: 844.0,
            scale: 1.0,
            scale_override: None,
            toolbar_height: 44.0,
            caption_inset: 16.0,
            chrome_color: [246, 246, 246, 255],
            backdrop: [0, 0, 0, 255],
        }
    }
}

impl Config {
    /// Load the config, falling back to defaults when the file is missing
    /// or broken. A broken file is logged, never fatal.
    pub fn load() -> Self {
        let Some(path) = Self::path() else {
            tracing::debug!("no config directory on this platform, using defaults");
            return Self::default();
        };

        match Self::from_file(&path) {
            Ok(config) => {
                tracing::info!(path = %path.display(), "loaded config");
                config
            }
            Err(ConfigError::Io { source, .. })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                Self::default()
            }
            Err(e) => {
                tracing::warn!("{e}; using defaults");
                Self::default()
            }
        }
    }

    /// Where the config file lives
    /// - `$MEME_ME_CONFIG` if set
    /// - Linux: ~/.config/meme-me/config.json
    /// - macOS: ~/Library/Application Support/meme-me/config.json
    /// - Windows: %APPDATA%\meme-me\config.json
    pub fn path() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Some(PathBuf::from(path));
        }

        let mut path = dirs::config_dir()?;
        path.push("meme-me");
        path.push("config.json");
        Some(path)
    }

    /// Read and parse a config file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        Self::from_json(&json).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Parse from a JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Convert to a pretty JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Directory the save dialog starts in
    pub fn export_dir(&self) -> Option<PathBuf> {
        self.export_dir
            .clone()
            .or_else(dirs::picture_dir)
            .or_else(dirs::home_dir)
    }
}
