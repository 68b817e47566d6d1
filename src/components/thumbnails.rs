use eframe::egui;
use egui::{TextureFilter, TextureHandle, TextureOptions, Vec2};
use std::path::PathBuf;

use crate::assets::{AssetLibrary, THUMBNAIL_MAX_EDGE};
use crate::canvas::to_color_image;

/// Display height of a thumbnail button.
const THUMB_BUTTON_HEIGHT: f32 = 64.0;

struct ThumbEntry {
    path: PathBuf,
    name: String,
    texture: TextureHandle,
}

/// Horizontal thumbnail strip for the selected feature category.
/// Clicking a thumbnail queues the file for insertion; the app polls
/// `pending_add` each frame.
#[derive(Default)]
pub struct ThumbnailStrip {
    loaded_category: Option<String>,
    entries: Vec<ThumbEntry>,
    pub pending_add: Option<PathBuf>,
}

impl ThumbnailStrip {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, ui: &mut egui::Ui, assets: &AssetLibrary, category: &str) {
        if self.loaded_category.as_deref() != Some(category) {
            self.rebuild(ui.ctx(), assets, category);
        }

        if self.entries.is_empty() {
            ui.label(egui::RichText::new(t!("thumbnails.empty")).weak());
            return;
        }

        egui::ScrollArea::horizontal()
            .id_source("thumbnail_strip")
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    for entry in &self.entries {
                        let tex_size = entry.texture.size_vec2();
                        let scale = THUMB_BUTTON_HEIGHT / tex_size.y.max(1.0);
                        let size = Vec2::new(tex_size.x * scale, THUMB_BUTTON_HEIGHT);
                        let sized = egui::load::SizedTexture::from_handle(&entry.texture);
                        let img = egui::Image::from_texture(sized).fit_to_exact_size(size);
                        let resp = ui
                            .add(egui::ImageButton::new(img).frame(false))
                            .on_hover_text(&entry.name);
                        if resp.clicked() {
                            self.pending_add = Some(entry.path.clone());
                        }
                    }
                });
            });
    }

    fn rebuild(&mut self, ctx: &egui::Context, assets: &AssetLibrary, category: &str) {
        self.entries.clear();
        for (path, thumb) in assets.load_thumbnails(category, THUMBNAIL_MAX_EDGE) {
            let name = crate::io::display_name(&path);
            let texture = ctx.load_texture(
                format!("thumb_{}", name),
                to_color_image(&thumb),
                TextureOptions {
                    magnification: TextureFilter::Linear,
                    minification: TextureFilter::Linear,
                    ..Default::default()
                },
            );
            self.entries.push(ThumbEntry {
                path,
                name,
                texture,
            });
        }
        self.loaded_category = Some(category.to_string());
        log_info!(
            "Thumbnail strip: {} images for category \"{}\"",
            self.entries.len(),
            category
        );
    }
}
