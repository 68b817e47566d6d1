//! Asset library — the on-disk feature catalogue.
//!
//! Assets live under a base directory with one subfolder per feature
//! category ("eyes", "noses", …). A conventional background image sits at
//! the base directory itself.

use image::RgbaImage;
use rayon::prelude::*;
use std::path::{Path, PathBuf};

use crate::io::{is_image_extension, load_rgba};

/// Base asset directory relative to the working directory.
pub const DEFAULT_ASSET_DIR: &str = "assets";

/// Conventional background image filename at the base directory.
pub const BACKGROUND_FILENAME: &str = "potato.png";

/// Categories offered when the asset directory is missing or empty.
pub const DEFAULT_CATEGORIES: &[&str] = &["eyes", "noses", "mouths", "ears"];

/// Longest-edge size for strip thumbnails.
pub const THUMBNAIL_MAX_EDGE: u32 = 96;

pub struct AssetLibrary {
    base_dir: PathBuf,
    categories: Vec<String>,
}

impl AssetLibrary {
    /// Create a library rooted at `base_dir` and scan it immediately.
    pub fn new(base_dir: PathBuf) -> Self {
        let mut lib = Self {
            base_dir,
            categories: Vec::new(),
        };
        lib.rescan();
        lib
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Re-read the category list from disk. Falls back to the built-in
    /// category names when nothing usable is found.
    pub fn rescan(&mut self) {
        self.categories.clear();
        match std::fs::read_dir(&self.base_dir) {
            Ok(entries) => {
                for entry in entries.flatten() {
                    if entry.path().is_dir() {
                        self.categories.push(entry.file_name().to_string_lossy().to_string());
                    }
                }
                self.categories.sort();
            }
            Err(e) => {
                log_warn!(
                    "Asset directory {} not readable: {}",
                    self.base_dir.display(),
                    e
                );
            }
        }
        if self.categories.is_empty() {
            self.categories = DEFAULT_CATEGORIES.iter().map(|s| s.to_string()).collect();
        }
        log_info!(
            "Asset scan: {} categories under {}",
            self.categories.len(),
            self.base_dir.display()
        );
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn category_dir(&self, category: &str) -> PathBuf {
        self.base_dir.join(category)
    }

    /// Conventional background image path (may not exist on disk).
    pub fn background_path(&self) -> PathBuf {
        self.base_dir.join(BACKGROUND_FILENAME)
    }

    /// Sorted image files inside a category folder. Missing folder = empty.
    pub fn images_in(&self, category: &str) -> Vec<PathBuf> {
        let dir = self.category_dir(category);
        let mut files: Vec<PathBuf> = match std::fs::read_dir(&dir) {
            Ok(entries) => entries
                .flatten()
                .map(|e| e.path())
                .filter(|p| {
                    p.is_file()
                        && p.extension()
                            .map(|ext| is_image_extension(&ext.to_string_lossy()))
                            .unwrap_or(false)
                })
                .collect(),
            Err(_) => Vec::new(),
        };
        files.sort();
        files
    }

    /// Decode and downscale every image in a category, in parallel.
    /// Files that fail to decode are logged and skipped — a broken
    /// thumbnail is not worth a dialog.
    pub fn load_thumbnails(&self, category: &str, max_edge: u32) -> Vec<(PathBuf, RgbaImage)> {
        let files = self.images_in(category);
        files
            .into_par_iter()
            .filter_map(|path| match load_rgba(&path) {
                Ok(img) => {
                    let thumb = image::DynamicImage::ImageRgba8(img)
                        .thumbnail(max_edge, max_edge)
                        .to_rgba8();
                    Some((path, thumb))
                }
                Err(e) => {
                    log_warn!("Skipping thumbnail for {}: {}", path.display(), e);
                    None
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn write_png(path: &Path, w: u32, h: u32) {
        RgbaImage::from_pixel(w, h, Rgba([10, 20, 30, 255]))
            .save(path)
            .unwrap();
    }

    #[test]
    fn scan_lists_subfolders_sorted() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("noses")).unwrap();
        std::fs::create_dir(dir.path().join("eyes")).unwrap();
        write_png(&dir.path().join("potato.png"), 4, 4); // file at base: not a category

        let lib = AssetLibrary::new(dir.path().to_path_buf());
        assert_eq!(lib.categories(), &["eyes".to_string(), "noses".to_string()]);
        assert!(lib.background_path().is_file());
    }

    #[test]
    fn missing_dir_falls_back_to_builtin_categories() {
        let dir = tempfile::tempdir().unwrap();
        let lib = AssetLibrary::new(dir.path().join("does-not-exist"));
        let expected: Vec<String> = DEFAULT_CATEGORIES.iter().map(|s| s.to_string()).collect();
        assert_eq!(lib.categories(), expected.as_slice());
    }

    #[test]
    fn images_in_filters_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let eyes = dir.path().join("eyes");
        std::fs::create_dir(&eyes).unwrap();
        write_png(&eyes.join("b.png"), 4, 4);
        write_png(&eyes.join("a.png"), 4, 4);
        std::fs::write(eyes.join("notes.txt"), "nope").unwrap();

        let lib = AssetLibrary::new(dir.path().to_path_buf());
        let files = lib.images_in("eyes");
        assert_eq!(files.len(), 2);
        assert!(files[0].ends_with("a.png"));
        assert!(files[1].ends_with("b.png"));
        assert!(lib.images_in("mouths").is_empty());
    }

    #[test]
    fn thumbnails_are_bounded_and_skip_broken_files() {
        let dir = tempfile::tempdir().unwrap();
        let eyes = dir.path().join("eyes");
        std::fs::create_dir(&eyes).unwrap();
        write_png(&eyes.join("big.png"), 300, 150);
        std::fs::write(eyes.join("broken.png"), b"not a png").unwrap();

        let lib = AssetLibrary::new(dir.path().to_path_buf());
        let thumbs = lib.load_thumbnails("eyes", THUMBNAIL_MAX_EDGE);
        assert_eq!(thumbs.len(), 1);
        let (_, img) = &thumbs[0];
        assert!(img.width() <= THUMBNAIL_MAX_EDGE && img.height() <= THUMBNAIL_MAX_EDGE);
        // Aspect ratio preserved: 2:1.
        assert_eq!(img.width(), 96);
        assert_eq!(img.height(), 48);
    }
}
