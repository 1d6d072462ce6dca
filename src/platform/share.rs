/// Share surface: save the rendered meme as a PNG
use chrono::NaiveDateTime;
use image::{ImageFormat, RgbaImage};
use std::path::{Path, PathBuf};

use rfd::AsyncFileDialog;

use crate::state::data::{Photo, ShareOutcome};

/// Offer to save `meme`, starting in `dir`
pub async fn share(meme: Photo, dir: Option<PathBuf>) -> ShareOutcome {
    let mut dialog = AsyncFileDialog::new()
        .set_title("Save Meme")
        .set_file_name(default_file_name(chrono::Local::now().naive_local()))
        .add_filter("PNG image", &["png"]);
    if let Some(dir) = dir {
        dialog = dialog.set_directory(dir);
    }

    let Some(handle) = dialog.save_file().await else {
        return ShareOutcome::Cancelled;
    };
    let path = handle.path().to_path_buf();

    let written = tokio::task::spawn_blocking(move || write_png(&meme, &path))
        .await
        .map_err(|e| format!("Task join error: {}", e))
        .and_then(|result| result);

    match written {
        Ok(path) => {
            tracing::info!(path = %path.display(), "meme saved");
            ShareOutcome::Completed
        }
        Err(reason) => ShareOutcome::Failed(reason),
    }
}

/// `meme-YYYYMMDD-HHMMSS.png`
pub fn default_file_name(now: NaiveDateTime) -> String {
    format!("meme-{}.png", now.format("%Y%m%d-%H%M%S"))
}

/// Write the meme, adding a `.png` extension if the user left it off
pub fn write_png(meme: &RgbaImage, path: &Path) -> Result<PathBuf, String> {
    let path = if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension("png")
    };

    meme.save_with_format(&path, ImageFormat::Png)
        .map_err(|e| format!("Failed to save {}: {}", path.display(), e))?;

    Ok(path)
}
