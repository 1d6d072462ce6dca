/// The editor coordinator
///
/// Owns everything on the single meme screen: caption fields, the
/// background photo, the can-export flag, the keyboard viewport offset and
/// the modal presentation slot. Platform dialogs never touch this state
/// directly; their results are handed in through the methods below from
/// the application's update loop.
use std::sync::Arc;

use super::caption::Captions;
use super::data::{
    AccessStatus, CaptionSlot, ImageSourceKind, Meme, PickOutcome, Photo, SettingsPrompt,
    ShareOutcome,
};
use super::navigation::{Navigator, Presentation};
use super::viewport::{KeyboardEvent, Viewport};
use crate::config::{Config, SceneMetrics};
use crate::error::EditorError;
use crate::render::compositor::Compositor;
use crate::render::scene::Scene;

/// What the shell should present next after asking for a photo
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceStep {
    /// Ask the platform for access, then call `access_resolved`
    RequestAccess(ImageSourceKind),
    /// Show the picker, then call `image_picked`
    PresentPicker(ImageSourceKind),
    /// Access was refused earlier; offer to open settings
    ShowSettingsPrompt(SettingsPrompt),
}

/// A rendered meme waiting for the share surface to finish
#[derive(Debug, Clone)]
struct PendingShare {
    top_text: String,
    bottom_text: String,
    original: Photo,
    memed: Photo,
}

#[derive(Debug)]
pub struct Editor {
    metrics: SceneMetrics,
    font_size: f32,
    captions: Captions,
    background: Option<Photo>,
    can_export: bool,
    viewport: Viewport,
    navigator: Navigator,
    camera_available: bool,
    pending_share: Option<PendingShare>,
    meme: Option<Meme>,
}

impl Editor {
    pub fn new(config: &Config, camera_available: bool) -> Self {
        let mut metrics = config.scene;
        if let Some(scale) = metrics.scale_override.filter(|s| valid_scale(*s)) {
            metrics.scale = scale;
        }

        Self {
            metrics,
            font_size: config.caption.font_size,
            captions: Captions::new(),
            background: None,
            can_export: false,
            viewport: Viewport::default(),
            navigator: Navigator::default(),
            camera_available,
            pending_share: None,
            meme: None,
        }
    }

    // ========== Read-only state ==========

    pub fn captions(&self) -> &Captions {
        &self.captions
    }

    pub fn background(&self) -> Option<&Photo> {
        self.background.as_ref()
    }

    /// Share is only allowed once a photo is loaded
    pub fn can_export(&self) -> bool {
        self.can_export
    }

    /// Current scene geometry
    pub fn metrics(&self) -> &SceneMetrics {
        &self.metrics
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn presentation(&self) -> Option<Presentation> {
        self.navigator.current()
    }

    pub fn is_presenting(&self) -> bool {
        !self.navigator.is_idle()
    }

    /// Whether the control for `kind` should be enabled
    pub fn can_pick_from(&self, kind: ImageSourceKind) -> bool {
        self.navigator.is_idle() && self.source_available(kind)
    }

    /// The last meme the user shared this session
    pub fn meme(&self) -> Option<&Meme> {
        self.meme.as_ref()
    }

    fn source_available(&self, kind: ImageSourceKind) -> bool {
        match kind {
            ImageSourceKind::Library => true,
            ImageSourceKind::Camera => self.camera_available,
        }
    }

    // ========== Image source ==========

    /// The user tapped the library or camera control
    pub fn request_image(
        &mut self,
        kind: ImageSourceKind,
        status: AccessStatus,
    ) -> Result<SourceStep, EditorError> {
        if !self.source_available(kind) {
            return Err(EditorError::SourceUnavailable(kind));
        }

        match status {
            AccessStatus::Granted => {
                self.navigator.present(Presentation::Picker(kind))?;
                Ok(SourceStep::PresentPicker(kind))
            }
            AccessStatus::NotDetermined => {
                self.navigator.present(Presentation::AccessRequest(kind))?;
                Ok(SourceStep::RequestAccess(kind))
            }
            AccessStatus::Denied | AccessStatus::Restricted => {
                self.navigator.present(Presentation::SettingsPrompt(kind))?;
                Ok(SourceStep::ShowSettingsPrompt(SettingsPrompt::for_source(kind)))
            }
        }
    }

    /// The platform answered an access request. On success the picker
    /// takes over the presentation slot.
    pub fn access_resolved(
        &mut self,
        kind: ImageSourceKind,
        status: AccessStatus,
    ) -> Result<SourceStep, EditorError> {
        if self.navigator.current() != Some(Presentation::AccessRequest(kind)) {
            tracing::warn!(?kind, current = ?self.navigator.current(), "unexpected access result");
        }

        if status == AccessStatus::Granted {
            self.navigator.chain(Presentation::Picker(kind));
            Ok(SourceStep::PresentPicker(kind))
        } else {
            self.navigator.dismiss();
            Err(EditorError::PermissionDenied(kind))
        }
    }

    /// The settings prompt was answered either way
    pub fn settings_prompt_dismissed(&mut self) {
        self.navigator.dismiss();
    }

    /// The picker closed. Only a successful pick changes state.
    pub fn image_picked(&mut self, outcome: PickOutcome) -> Result<(), EditorError> {
        self.navigator.dismiss();

        match outcome {
            PickOutcome::Picked(photo) => {
                tracing::info!(width = photo.width(), height = photo.height(), "photo loaded");
                self.background = Some(photo);
                self.can_export = true;
                Ok(())
            }
            PickOutcome::Cancelled => Err(EditorError::PickerCancelled),
            PickOutcome::Failed(reason) => Err(EditorError::ImageUnreadable(reason)),
        }
    }

    // ========== Captions ==========

    /// Focus a caption field
    pub fn begin_editing(&mut self, slot: CaptionSlot) {
        if self.captions.begin_editing(slot) == Some(CaptionSlot::Bottom) {
            self.viewport.settle();
        }
    }

    /// Typed text for the focused field
    pub fn edit_caption(&mut self, slot: CaptionSlot, text: &str) -> bool {
        self.captions.edit(slot, text)
    }

    /// Drop caption focus
    pub fn end_editing(&mut self) {
        if self.captions.end_editing() == Some(CaptionSlot::Bottom) {
            self.viewport.settle();
        }
    }

    pub fn keyboard(&mut self, event: KeyboardEvent) {
        let bottom_focused = self.captions.is_editing(CaptionSlot::Bottom);
        self.viewport.apply(event, bottom_focused);
    }

    /// The screen changed size (rotation, window resize). The bottom
    /// caption loses focus so the keyboard offset cannot go stale.
    pub fn resize(&mut self, width: f32, height: f32) {
        if self.captions.is_editing(CaptionSlot::Bottom) {
            self.end_editing();
        }
        self.metrics.width = width;
        self.metrics.height = height;
    }

    /// The display reported its scale factor. Ignored while the config
    /// pins the scale.
    pub fn set_scale(&mut self, scale: f32) {
        if !valid_scale(scale) {
            tracing::warn!(scale, "ignoring invalid display scale");
            return;
        }
        if let Some(pinned) = self.metrics.scale_override.filter(|s| valid_scale(*s)) {
            tracing::debug!(scale, pinned, "display scale overridden by config");
            return;
        }
        if self.metrics.scale != scale {
            tracing::debug!(scale, "display scale changed");
            self.metrics.scale = scale;
        }
    }

    // ========== Reset & export ==========

    /// Back to a blank editor: placeholders, no photo, share disabled
    pub fn reset(&mut self) {
        self.captions.reset();
        self.viewport.settle();
        self.background = None;
        self.can_export = false;
        tracing::info!("editor reset");
    }

    /// The scene as currently on screen, toolbars included
    pub fn scene(&self) -> Scene {
        Scene::new(
            self.metrics,
            self.font_size,
            self.background.clone(),
            self.captions.text(CaptionSlot::Top),
            self.captions.text(CaptionSlot::Bottom),
        )
    }

    /// Render the meme and claim the share surface. Returns the composite
    /// to hand to the share surface; call `share_finished` with its result.
    pub fn begin_share(&mut self, compositor: &Compositor) -> Result<Photo, EditorError> {
        if !self.can_export {
            return Err(EditorError::ExportWithoutImage);
        }
        let original = self
            .background
            .clone()
            .ok_or(EditorError::ExportWithoutImage)?;
        if !self.navigator.is_idle() {
            return Err(EditorError::PresentationInProgress);
        }

        // Commit captions and bring the scene to rest before snapshotting
        self.end_editing();
        self.viewport.settle();

        let mut scene = self.scene();
        let memed = Arc::new(compositor.render(&mut scene)?);

        self.navigator.present(Presentation::Share)?;
        self.pending_share = Some(PendingShare {
            top_text: self.captions.text(CaptionSlot::Top).to_string(),
            bottom_text: self.captions.text(CaptionSlot::Bottom).to_string(),
            original,
            memed: memed.clone(),
        });

        Ok(memed)
    }

    /// The share surface closed. A completed share produces the Meme.
    pub fn share_finished(&mut self, outcome: ShareOutcome) -> Option<&Meme> {
        self.navigator.dismiss();
        let pending = self.pending_share.take()?;

        match outcome {
            ShareOutcome::Completed => {
                let meme = Meme::new(
                    pending.top_text,
                    pending.bottom_text,
                    pending.original,
                    pending.memed,
                );
                tracing::info!(top = meme.top_text(), bottom = meme.bottom_text(), "meme shared");
                self.meme = Some(meme);
                self.meme.as_ref()
            }
            ShareOutcome::Cancelled => {
                tracing::debug!("share cancelled");
                None
            }
            ShareOutcome::Failed(reason) => {
                tracing::warn!("share failed: {reason}");
                None
            }
        }
    }
}

fn valid_scale(scale: f32) -> bool {
    scale.is_finite() && scale > 0.0
}
