use image::{Rgba, RgbaImage};
use rfd::FileDialog;
use std::path::{Path, PathBuf};

/// Accepted raster container extensions (lowercase).
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp", "bmp"];

/// Edge length of the blank placeholder inserted when a decode fails.
pub const PLACEHOLDER_SIZE: u32 = 64;

/// Check if a file extension is an accepted image format.
pub fn is_image_extension(ext: &str) -> bool {
    IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str())
}

/// Error type for image loading.
#[derive(Debug)]
pub enum ImageLoadError {
    Io(std::io::Error),
    Decode(image::ImageError),
}

impl std::fmt::Display for ImageLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImageLoadError::Io(e) => write!(f, "I/O error: {}", e),
            ImageLoadError::Decode(e) => write!(f, "Decode error: {}", e),
        }
    }
}

impl From<std::io::Error> for ImageLoadError {
    fn from(e: std::io::Error) -> Self {
        ImageLoadError::Io(e)
    }
}

impl From<image::ImageError> for ImageLoadError {
    fn from(e: image::ImageError) -> Self {
        ImageLoadError::Decode(e)
    }
}

/// Read and decode an image file to RGBA.
pub fn load_rgba(path: &Path) -> Result<RgbaImage, ImageLoadError> {
    let bytes = std::fs::read(path)?;
    let img = image::load_from_memory(&bytes)?;
    Ok(img.to_rgba8())
}

/// A visible blank stand-in: translucent gray so a failed decode still
/// yields something the user can see, move, and delete.
pub fn placeholder_image() -> RgbaImage {
    RgbaImage::from_pixel(
        PLACEHOLDER_SIZE,
        PLACEHOLDER_SIZE,
        Rgba([128, 128, 128, 96]),
    )
}

/// Decode `path`, falling back to the blank placeholder on any failure.
/// The failure is logged; the item is inserted regardless.
pub fn load_or_placeholder(path: &Path) -> RgbaImage {
    match load_rgba(path) {
        Ok(img) => img,
        Err(e) => {
            log_warn!(
                "Failed to load image {} — inserting blank placeholder: {}",
                path.display(),
                e
            );
            placeholder_image()
        }
    }
}

/// Native open-file dialog restricted to accepted image formats.
/// Returns `None` when the user cancels.
pub fn pick_image_file(title: &str, filter_name: &str, start_dir: &Path) -> Option<PathBuf> {
    let mut dialog = FileDialog::new()
        .set_title(title)
        .add_filter(filter_name, IMAGE_EXTENSIONS);
    if start_dir.is_dir() {
        dialog = dialog.set_directory(start_dir);
    }
    dialog.pick_file()
}

/// Display name for a picked file: the file stem, lossily decoded.
pub fn display_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "Unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_filter_is_case_insensitive() {
        assert!(is_image_extension("PNG"));
        assert!(is_image_extension("jpeg"));
        assert!(!is_image_extension("txt"));
        assert!(!is_image_extension("cr2"));
    }

    #[test]
    fn load_rgba_roundtrips_a_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dot.png");
        let mut img = RgbaImage::new(5, 7);
        img.put_pixel(2, 3, Rgba([255, 0, 0, 255]));
        img.save(&path).unwrap();

        let loaded = load_rgba(&path).unwrap();
        assert_eq!(loaded.dimensions(), (5, 7));
        assert_eq!(loaded.get_pixel(2, 3), &Rgba([255, 0, 0, 255]));
    }

    #[test]
    fn load_rgba_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_rgba(&dir.path().join("nope.png")).unwrap_err();
        assert!(matches!(err, ImageLoadError::Io(_)));
    }

    #[test]
    fn undecodable_file_becomes_placeholder() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("garbage.png");
        std::fs::write(&path, b"this is not a png").unwrap();

        let img = load_or_placeholder(&path);
        assert_eq!(img.dimensions(), (PLACEHOLDER_SIZE, PLACEHOLDER_SIZE));
    }

    #[test]
    fn display_name_uses_file_stem() {
        assert_eq!(display_name(Path::new("/a/b/left eye.png")), "left eye");
        assert_eq!(display_name(Path::new("noses/big.jpeg")), "big");
    }
}
