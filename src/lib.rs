//! Caption a photo and export it as a meme.
//!
//! The editor state and compositor live here so they can be tested
//! without a window; `main.rs` wires them to an iced UI.

pub mod config;
pub mod error;
pub mod platform;
pub mod render;
pub mod state;
