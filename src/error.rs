/// Error types for the editor and the compositor
///
/// None of these are fatal: every failure returns control to the
/// idle/editing state and is reported through the status line.
use thiserror::Error;

use crate::state::data::ImageSourceKind;

/// Errors produced by the editor coordinator
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EditorError {
    /// The user declined (or previously revoked) access to an image source
    #[error("access to the {0} was denied")]
    PermissionDenied(ImageSourceKind),

    /// The device has no such source (e.g. no camera)
    #[error("no {0} is available on this device")]
    SourceUnavailable(ImageSourceKind),

    /// The user dismissed the picker without choosing an image
    #[error("image picker was cancelled")]
    PickerCancelled,

    /// The picked file could not be decoded into a bitmap
    #[error("could not read the picked image: {0}")]
    ImageUnreadable(String),

    /// Export attempted while no background image is loaded
    #[error("cannot export a meme before an image is loaded")]
    ExportWithoutImage,

    /// A picker, prompt or share sheet is already on screen
    #[error("another dialog is already being presented")]
    PresentationInProgress,

    /// Rasterisation could not produce a bitmap
    #[error("failed to render meme: {0}")]
    Render(#[from] RenderError),
}

/// Errors produced while flattening a scene into a bitmap
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenderError {
    #[error("scene has no drawable area ({width}x{height} px)")]
    EmptyScene { width: u32, height: u32 },

    #[error("no caption font is available to draw \"{0}\"")]
    FontUnavailable(String),
}

/// Errors produced while loading configuration or fonts from disk
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{0} is not a usable TrueType/OpenType font")]
    InvalidFont(String),

    #[error("no caption font found; set \"font_path\" in the config file")]
    NoFont,
}
