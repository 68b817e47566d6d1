use std::path::PathBuf;

use eframe::egui;

use crate::assets::{AssetLibrary, DEFAULT_ASSET_DIR};
use crate::canvas::Canvas;
use crate::components::thumbnails::ThumbnailStrip;
use crate::components::transform_panel::TransformPanel;
use crate::controller::TransformController;
use crate::io;
use crate::scene::{Background, Scene, Selection, DEFAULT_FEATURE_POSITION};

pub struct PotatoFEApp {
    scene: Scene,
    selection: Selection,
    controller: TransformController,
    canvas: Canvas,

    assets: AssetLibrary,
    selected_category: String,

    // UI components
    thumbnails: ThumbnailStrip,
    transform_panel: TransformPanel,
}

impl PotatoFEApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let assets = AssetLibrary::new(PathBuf::from(DEFAULT_ASSET_DIR));
        let selected_category = assets
            .categories()
            .first()
            .cloned()
            .unwrap_or_default();

        let mut app = Self {
            scene: Scene::new(),
            selection: Selection::new(),
            controller: TransformController::new(),
            canvas: Canvas::new(),
            assets,
            selected_category,
            thumbnails: ThumbnailStrip::new(),
            transform_panel: TransformPanel::new(),
        };

        // Conventional background image at the asset root, loaded when present.
        let background = app.assets.background_path();
        if background.is_file() {
            app.load_background_from_path(background);
        }

        app
    }

    /// Insert an image file as a new feature at the default drop position
    /// and make it the selection. A failed decode still inserts a blank
    /// placeholder item.
    fn add_feature_from_path(&mut self, path: PathBuf) {
        let pixels = io::load_or_placeholder(&path);
        let name = io::display_name(&path);
        log_info!("Add feature \"{}\" ({})", name, path.display());
        let id = self
            .scene
            .add_feature(name, pixels, DEFAULT_FEATURE_POSITION);
        self.selection.set(id);
        self.controller.bind(&self.scene, id);
    }

    /// Replace the background. The feature collection is untouched.
    fn load_background_from_path(&mut self, path: PathBuf) {
        let pixels = io::load_or_placeholder(&path);
        let name = io::display_name(&path);
        log_info!("Load background \"{}\" ({})", name, path.display());
        self.scene.set_background(Background::new(name, pixels));
    }

    /// Remove every selected feature and reset the transform binding.
    fn remove_selected(&mut self) {
        let removed: Vec<_> = self.selection.ids().to_vec();
        if removed.is_empty() {
            return;
        }
        let count = self.scene.remove_features(&removed);
        log_info!("Removed {} feature(s)", count);
        self.controller.notify_removed(&removed);
        self.selection.clear();
    }

    /// Discard the whole composition: background, features, selection.
    fn clear_scene(&mut self) {
        log_info!("Clear scene");
        self.scene.clear();
        self.selection.clear();
        self.controller.notify_scene_cleared();
        self.canvas.invalidate_textures();
    }
}

impl eframe::App for PotatoFEApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // --- Dynamic window title: "PotatoFE - <background name>" ---
        {
            let title = match self.scene.background() {
                Some(bg) => format!("PotatoFE - {}", bg.name),
                None => "PotatoFE".to_string(),
            };
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(title));
        }

        // --- Keyboard shortcuts ---
        {
            let delete_pressed = ctx.input(|i| i.key_pressed(egui::Key::Delete));
            let backspace_pressed = ctx.input(|i| i.key_pressed(egui::Key::Backspace));
            if (delete_pressed || backspace_pressed) && !self.selection.is_empty() {
                self.remove_selected();
            }
            if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
                self.selection.clear();
                self.controller.unbind();
            }
        }

        // Actions collected from the toolbar this frame.
        let mut add_path: Option<PathBuf> = None;
        let mut background_path: Option<PathBuf> = None;
        let mut clear_clicked = false;

        // --- Toolbar ---
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(t!("toolbar.category"));
                let categories: Vec<String> = self.assets.categories().to_vec();
                egui::ComboBox::from_id_source("category_selector")
                    .selected_text(self.selected_category.clone())
                    .show_ui(ui, |ui| {
                        for cat in categories {
                            ui.selectable_value(&mut self.selected_category, cat.clone(), cat);
                        }
                    });

                if ui.button(t!("toolbar.add_feature")).clicked() {
                    // Cancelled picker = None = silent no-op.
                    add_path = io::pick_image_file(
                        &t!("dialog.select_feature"),
                        &t!("dialog.images_filter"),
                        &self.assets.category_dir(&self.selected_category),
                    );
                }

                if ui.button(t!("toolbar.load_potato")).clicked() {
                    background_path = io::pick_image_file(
                        &t!("dialog.select_potato"),
                        &t!("dialog.images_filter"),
                        self.assets.base_dir(),
                    );
                }

                ui.separator();

                if ui.button(t!("toolbar.clear_scene")).clicked() {
                    clear_clicked = true;
                }
            });
        });

        // --- Thumbnail strip (bottom-most) ---
        egui::TopBottomPanel::bottom("thumbnail_strip_panel").show(ctx, |ui| {
            self.thumbnails
                .show(ui, &self.assets, &self.selected_category);
        });
        if let Some(path) = self.thumbnails.pending_add.take() {
            add_path = Some(path);
        }

        // --- Transform sliders ---
        egui::TopBottomPanel::bottom("transform_controls").show(ctx, |ui| {
            self.transform_panel
                .show(ui, &mut self.scene, &mut self.controller);
        });

        // --- Apply collected toolbar actions ---
        if let Some(path) = add_path {
            self.add_feature_from_path(path);
        }
        if let Some(path) = background_path {
            self.load_background_from_path(path);
        }
        if clear_clicked {
            self.clear_scene();
        }

        // --- Canvas (fills remaining space) ---
        self.canvas.selection_stroke = ctx.style().visuals.selection.stroke.color;
        let out = egui::CentralPanel::default()
            .show(ctx, |ui| {
                self.canvas.show(ui, &mut self.scene, &mut self.selection)
            })
            .inner;

        // --- Controller synchronization ---
        // Selection events drive the state machine; transform events (drag,
        // wheel zoom) refresh the control values so the sliders track the
        // single per-item source of truth.
        if out.selection_changed {
            self.controller
                .sync_selection(&self.scene, self.selection.primary());
        }
        if out.transform_changed {
            self.controller.pull(&self.scene);
        }
    }
}
