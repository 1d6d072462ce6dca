/// Photo picker backed by the native file dialog
use std::path::{Path, PathBuf};
use std::sync::Arc;

use rfd::AsyncFileDialog;

use crate::state::data::{ImageSourceKind, PickOutcome, Photo};

/// Extensions offered in the picker
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "webp", "tif", "tiff"];

/// Show the picker and decode the chosen file
pub async fn pick_image(kind: ImageSourceKind, start_dir: Option<PathBuf>) -> PickOutcome {
    let mut dialog = AsyncFileDialog::new()
        .set_title("Choose a Photo")
        .add_filter("Images", IMAGE_EXTENSIONS);
    if let Some(dir) = start_dir {
        dialog = dialog.set_directory(dir);
    }

    let Some(handle) = dialog.pick_file().await else {
        tracing::debug!(?kind, "picker dismissed");
        return PickOutcome::Cancelled;
    };

    let path = handle.path().to_path_buf();
    tracing::info!(?kind, path = %path.display(), "photo picked");

    // Decoding large photos is CPU-bound
    let decoded = tokio::task::spawn_blocking(move || decode_photo(&path))
        .await
        .map_err(|e| format!("Task join error: {}", e))
        .and_then(|result| result);

    match decoded {
        Ok(photo) => PickOutcome::Picked(photo),
        Err(reason) => {
            tracing::warn!("{reason}");
            PickOutcome::Failed(reason)
        }
    }
}

/// Decode an image file into an RGBA bitmap
pub fn decode_photo(path: &Path) -> Result<Photo, String> {
    let image = image::open(path).map_err(|e| format!("{}: {}", path.display(), e))?;
    Ok(Arc::new(image.to_rgba8()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use std::io::Write;

    #[test]
    fn test_decode_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photo.png");
        RgbaImage::from_pixel(3, 2, Rgba([1, 2, 3, 255]))
            .save(&path)
            .unwrap();

        let photo = decode_photo(&path).unwrap();

        assert_eq!(photo.dimensions(), (3, 2));
        assert_eq!(*photo.get_pixel(2, 1), Rgba([1, 2, 3, 255]));
    }

    #[test]
    fn test_decode_garbage_fails_with_path() {
        let mut file = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
        file.write_all(b"not a png").unwrap();

        let err = decode_photo(file.path()).unwrap_err();
        assert!(err.contains(&file.path().display().to_string()));
    }
}
