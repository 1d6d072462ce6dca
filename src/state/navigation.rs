/// Tracks the single modal presentation slot
///
/// Pickers, permission requests, the settings prompt and the share
/// surface are all modal. Only one may be outstanding at a time.
use super::data::ImageSourceKind;
use crate::error::EditorError;

/// Something modal that is currently on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presentation {
    /// Waiting for the platform to resolve an access request
    AccessRequest(ImageSourceKind),
    Picker(ImageSourceKind),
    SettingsPrompt(ImageSourceKind),
    Share,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Navigator {
    current: Option<Presentation>,
}

impl Navigator {
    pub fn current(&self) -> Option<Presentation> {
        self.current
    }

    pub fn is_idle(&self) -> bool {
        self.current.is_none()
    }

    /// Claim the slot for `presentation`
    pub fn present(&mut self, presentation: Presentation) -> Result<(), EditorError> {
        if let Some(current) = self.current {
            tracing::debug!(?current, requested = ?presentation, "presentation already outstanding");
            return Err(EditorError::PresentationInProgress);
        }

        self.current = Some(presentation);
        Ok(())
    }

    /// Hand the slot from one presentation to the next without releasing it
    pub fn chain(&mut self, presentation: Presentation) {
        self.current = Some(presentation);
    }

    /// Release the slot, returning what was on screen
    pub fn dismiss(&mut self) -> Option<Presentation> {
        self.current.take()
    }
}
