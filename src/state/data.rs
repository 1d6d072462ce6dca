/// Shared data structures for the application state
///
/// These types represent the data model that flows between
/// the platform dialogs, the editor and the compositor.
use image::RgbaImage;
use std::fmt;
use std::sync::Arc;

/// A decoded in-memory bitmap, cheap to clone between messages
pub type Photo = Arc<RgbaImage>;

/// A finished meme
///
/// Only ever built after a composite was rendered and the share
/// surface reported completion, so there is no half-built state.
#[derive(Debug, Clone, PartialEq)]
pub struct Meme {
    top_text: String,
    bottom_text: String,
    original_image: Photo,
    memed_image: Photo,
}

impl Meme {
    /// Bundle captions with the source photo and the rendered composite.
    /// Empty captions are legal; they render as blank lines.
    pub fn new(
        top_text: impl Into<String>,
        bottom_text: impl Into<String>,
        original_image: Photo,
        memed_image: Photo,
    ) -> Self {
        Self {
            top_text: top_text.into(),
            bottom_text: bottom_text.into(),
            original_image,
            memed_image,
        }
    }

    pub fn top_text(&self) -> &str {
        &self.top_text
    }

    pub fn bottom_text(&self) -> &str {
        &self.bottom_text
    }

    /// The unmodified source photo
    pub fn original_image(&self) -> &Photo {
        &self.original_image
    }

    /// The rendered composite including captions
    pub fn memed_image(&self) -> &Photo {
        &self.memed_image
    }
}

/// The two caption slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaptionSlot {
    Top,
    Bottom,
}

impl CaptionSlot {
    pub const ALL: [CaptionSlot; 2] = [CaptionSlot::Top, CaptionSlot::Bottom];

    /// Placeholder text shown while the slot is logically empty
    pub fn default_text(self) -> &'static str {
        match self {
            CaptionSlot::Top => "TOP",
            CaptionSlot::Bottom => "BOTTOM",
        }
    }
}

/// Where a photo comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageSourceKind {
    Library,
    Camera,
}

impl fmt::Display for ImageSourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageSourceKind::Library => write!(f, "photo library"),
            ImageSourceKind::Camera => write!(f, "camera"),
        }
    }
}

/// Authorization state reported by the platform for an image source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessStatus {
    Granted,
    Denied,
    /// Blocked by policy; treated like `Denied`
    Restricted,
    NotDetermined,
}

/// Result of presenting an image picker
#[derive(Debug, Clone)]
pub enum PickOutcome {
    Picked(Photo),
    Cancelled,
    /// The chosen file could not be read or decoded
    Failed(String),
}

/// Result reported by the share surface
#[derive(Debug, Clone, PartialEq)]
pub enum ShareOutcome {
    Completed,
    Cancelled,
    Failed(String),
}

/// Title and message for the "open settings" prompt shown after a denial
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsPrompt {
    pub source: ImageSourceKind,
    pub title: &'static str,
    pub message: &'static str,
}

impl SettingsPrompt {
    pub fn for_source(source: ImageSourceKind) -> Self {
        match source {
            ImageSourceKind::Library => Self {
                source,
                title: "Photo Library",
                message: "Open Settings to grant access to Photo Library?",
            },
            ImageSourceKind::Camera => Self {
                source,
                title: "Camera",
                message: "Open Settings to grant access to the Camera?",
            },
        }
    }
}
