/// Meme rendering module
///
/// This module handles:
/// - Laying out the on-screen scene (scene.rs)
/// - Loading the caption font (font.rs)
/// - Drawing stroked caption text (text.rs)
/// - Flattening a scene into an exportable bitmap (compositor.rs)

pub mod compositor;
pub mod font;
pub mod scene;
pub mod text;
