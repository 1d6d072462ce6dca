/// Caption font loading
///
/// The caption face is a heavy condensed sans. If the config names a file
/// we use it, otherwise a short list of well-known system fonts is probed.
use rusttype::Font;
use std::path::{Path, PathBuf};

use crate::config::CaptionStyle;
use crate::error::ConfigError;

/// System fonts tried in order when no font is configured
const FALLBACK_FONTS: &[&str] = &[
    // Linux
    "/usr/share/fonts/truetype/dejavu/DejaVuSansCondensed-Bold.ttf",
    "/usr/share/fonts/TTF/DejaVuSansCondensed-Bold.ttf",
    "/usr/share/fonts/dejavu/DejaVuSansCondensed-Bold.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSansNarrow-Bold.ttf",
    // macOS
    "/System/Library/Fonts/Supplemental/Impact.ttf",
    "/Library/Fonts/Impact.ttf",
    // Windows
    "C:\\Windows\\Fonts\\impact.ttf",
    "C:\\Windows\\Fonts\\arialbd.ttf",
];

/// A parsed caption font
#[derive(Clone)]
pub struct CaptionFont {
    font: Font<'static>,
    path: PathBuf,
}

impl CaptionFont {
    /// Load a font file from disk
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let bytes = std::fs::read(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let font = Font::try_from_vec(bytes)
            .ok_or_else(|| ConfigError::InvalidFont(path.display().to_string()))?;

        Ok(Self {
            font,
            path: path.to_path_buf(),
        })
    }

    /// The configured font, or the first usable system fallback
    pub fn discover(style: &CaptionStyle) -> Result<Self, ConfigError> {
        if let Some(path) = &style.font_path {
            return Self::load(path);
        }

        for candidate in FALLBACK_FONTS {
            let path = Path::new(candidate);
            if !path.is_file() {
                continue;
            }

            match Self::load(path) {
                Ok(font) => return Ok(font),
                Err(e) => tracing::debug!("skipping fallback font: {e}"),
            }
        }

        Err(ConfigError::NoFont)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub(crate) fn font(&self) -> &Font<'static> {
        &self.font
    }
}

impl std::fmt::Debug for CaptionFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptionFont")
            .field("path", &self.path)
            .finish()
    }
}
