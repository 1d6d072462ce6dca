/// Platform boundary module
///
/// The dialogs this app does not own: the permission system (access.rs),
/// the photo picker (picker.rs) and the share surface (share.rs). Each is
/// an async function whose result the shell delivers back to the editor
/// as a message.

pub mod access;
pub mod picker;
pub mod share;
