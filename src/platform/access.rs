/// Image source permissions
///
/// Desktop systems have no photo-library permission, so access is kept in
/// a session ledger: the first use of a source asks the user, the answer
/// sticks until they agree to "open settings" after a denial.
use rfd::{AsyncMessageDialog, MessageButtons, MessageDialogResult, MessageLevel};

use crate::state::data::{AccessStatus, ImageSourceKind, SettingsPrompt};

/// Per-source access answers for this session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessLedger {
    library: AccessStatus,
    camera: AccessStatus,
}

impl Default for AccessLedger {
    fn default() -> Self {
        Self {
            library: AccessStatus::NotDetermined,
            camera: AccessStatus::NotDetermined,
        }
    }
}

impl AccessLedger {
    pub fn status(&self, kind: ImageSourceKind) -> AccessStatus {
        match kind {
            ImageSourceKind::Library => self.library,
            ImageSourceKind::Camera => self.camera,
        }
    }

    pub fn record(&mut self, kind: ImageSourceKind, status: AccessStatus) {
        tracing::info!(?kind, ?status, "access decided");
        match kind {
            ImageSourceKind::Library => self.library = status,
            ImageSourceKind::Camera => self.camera = status,
        }
    }

    /// Forget an answer so the next use asks again
    pub fn forget(&mut self, kind: ImageSourceKind) {
        self.record(kind, AccessStatus::NotDetermined);
    }
}

/// Desktop builds have no capture path, so the camera control stays off
pub fn camera_available() -> bool {
    false
}

/// Ask the user to allow access to `kind`
pub async fn request_access(kind: ImageSourceKind) -> AccessStatus {
    let answer = AsyncMessageDialog::new()
        .set_level(MessageLevel::Info)
        .set_title("MemeMe")
        .set_description(format!("MemeMe would like to access your {kind}."))
        .set_buttons(MessageButtons::YesNo)
        .show()
        .await;

    status_from_answer(answer)
}

/// Show the "open settings" prompt. Returns `true` if the user said YES.
pub async fn show_settings_prompt(prompt: SettingsPrompt) -> bool {
    let answer = AsyncMessageDialog::new()
        .set_level(MessageLevel::Warning)
        .set_title(prompt.title)
        .set_description(prompt.message)
        .set_buttons(MessageButtons::YesNo)
        .show()
        .await;

    matches!(answer, MessageDialogResult::Yes | MessageDialogResult::Ok)
}

fn status_from_answer(answer: MessageDialogResult) -> AccessStatus {
    match answer {
        MessageDialogResult::Yes | MessageDialogResult::Ok => AccessStatus::Granted,
        _ => AccessStatus::Denied,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ledger_starts_undecided() {
        let ledger = AccessLedger::default();
        assert_eq!(ledger.status(ImageSourceKind::Library), AccessStatus::NotDetermined);
        assert_eq!(ledger.status(ImageSourceKind::Camera), AccessStatus::NotDetermined);
    }

    #[test]
    fn test_record_and_forget() {
        let mut ledger = AccessLedger::default();

        ledger.record(ImageSourceKind::Library, AccessStatus::Denied);
        assert_eq!(ledger.status(ImageSourceKind::Library), AccessStatus::Denied);
        assert_eq!(ledger.status(ImageSourceKind::Camera), AccessStatus::NotDetermined);

        ledger.forget(ImageSourceKind::Library);
        assert_eq!(ledger.status(ImageSourceKind::Library), AccessStatus::NotDetermined);
    }

    #[test]
    fn test_dialog_answers() {
        assert_eq!(status_from_answer(MessageDialogResult::Yes), AccessStatus::Granted);
        assert_eq!(status_from_answer(MessageDialogResult::No), AccessStatus::Denied);
        assert_eq!(status_from_answer(MessageDialogResult::Cancel), AccessStatus::Denied);
    }
}
