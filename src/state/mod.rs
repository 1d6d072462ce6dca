/// State management module
///
/// This module handles all application state, including:
/// - Shared data structures (data.rs)
/// - Caption placeholder/edit lifecycle (caption.rs)
/// - Keyboard viewport offset (viewport.rs)
/// - The modal presentation slot (navigation.rs)
/// - The coordinator that ties them together (editor.rs)

pub mod caption;
pub mod data;
pub mod editor;
pub mod navigation;
pub mod viewport;
