use std::collections::HashMap;
use std::sync::Arc;

use eframe::egui;
use egui::{
    Align2, Color32, ColorImage, FontId, Pos2, Rect, Sense, Stroke, TextureFilter, TextureHandle,
    TextureOptions, Vec2,
};
use image::RgbaImage;

use crate::scene::{FeatureId, Scene, SceneNode, Selection, ZOOM_IN_STEP, ZOOM_OUT_STEP};

/// Convert a decoded RGBA image into an egui ColorImage for texture upload.
pub fn to_color_image(img: &RgbaImage) -> ColorImage {
    ColorImage::from_rgba_unmultiplied([img.width() as usize, img.height() as usize], img.as_raw())
}

/// What happened on the canvas this frame, for the app to synchronize the
/// transform controller against.
#[derive(Default)]
pub struct CanvasOutput {
    pub selection_changed: bool,
    pub transform_changed: bool,
}

/// The scene viewport: draws the background and features, and turns pointer
/// input into scene mutations.
pub struct Canvas {
    pan_offset: Vec2,
    /// Accent color for selection outlines (set from the app each frame).
    pub selection_stroke: Color32,
    /// Per-feature textures. Feature images are immutable after insertion,
    /// so entries only ever need to be created or dropped.
    feature_textures: HashMap<FeatureId, TextureHandle>,
    background_texture: Option<TextureHandle>,
    /// Identity of the background pixels the cached texture was built from.
    background_key: Option<usize>,
    /// True while a primary-button feature drag is in progress.
    dragging: bool,
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            pan_offset: Vec2::ZERO,
            selection_stroke: Color32::from_rgb(66, 133, 244),
            feature_textures: HashMap::new(),
            background_texture: None,
            background_key: None,
            dragging: false,
        }
    }
}

impl Canvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop cached textures (e.g. after a scene clear).
    pub fn invalidate_textures(&mut self) {
        self.feature_textures.clear();
        self.background_texture = None;
        self.background_key = None;
    }

    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        scene: &mut Scene,
        selection: &mut Selection,
    ) -> CanvasOutput {
        let mut out = CanvasOutput::default();

        let available_size = ui.available_size();
        let sense = Sense::click_and_drag().union(Sense::hover());
        let (response, painter) = ui.allocate_painter(available_size, sense);
        let canvas_rect = response.rect;
        let painter = painter.with_clip_rect(canvas_rect);

        // Handle panning with middle mouse button
        if response.dragged() && ui.input(|i| i.pointer.middle_down()) {
            self.pan_offset += response.drag_delta();
        }

        let origin = canvas_rect.left_top() + self.pan_offset;
        let to_scene = |p: Pos2| p - origin.to_vec2();
        let to_screen = |p: Pos2| p + origin.to_vec2();

        // ---- pointer input ------------------------------------------------

        let pointer = ui.input(|i| i.pointer.interact_pos());
        let primary_pressed = ui.input(|i| i.pointer.primary_pressed());
        let ctrl_held = ui.input(|i| i.modifiers.ctrl);

        if primary_pressed
            && let Some(p) = pointer
            && canvas_rect.contains(p)
        {
            match scene.hit_test(to_scene(p)) {
                Some(id) => {
                    if ctrl_held {
                        selection.toggle(id);
                    } else if !selection.contains(id) {
                        // Pressing an already-selected item keeps the group,
                        // so a multi-selection can be dragged as one.
                        selection.set(id);
                    }
                    self.dragging = selection.contains(id);
                }
                None => {
                    if !ctrl_held {
                        selection.clear();
                    }
                    self.dragging = false;
                }
            }
            out.selection_changed = true;
        }

        if self.dragging && response.dragged() && ui.input(|i| i.pointer.primary_down()) {
            let delta = response.drag_delta();
            if delta != Vec2::ZERO {
                for id in selection.ids().to_vec() {
                    scene.translate(id, delta);
                }
                out.transform_changed = true;
            }
        }
        if ui.input(|i| i.pointer.primary_released()) {
            self.dragging = false;
        }

        // Wheel over a feature: one fixed scale step per event, direction
        // from the scroll sign.
        if let Some(hover) = response.hover_pos() {
            let scroll_y = ui.input(|i| i.scroll_delta.y);
            if scroll_y.abs() > 0.1
                && let Some(id) = scene.hit_test(to_scene(hover))
            {
                let step = if scroll_y > 0.0 {
                    ZOOM_IN_STEP
                } else {
                    ZOOM_OUT_STEP
                };
                scene.scale_by(id, step);
                out.transform_changed = true;
            }
        }

        // ---- rendering ----------------------------------------------------

        painter.rect_filled(canvas_rect, 0.0, ui.visuals().extreme_bg_color);

        self.sync_textures(ui.ctx(), scene);

        for node in scene.nodes() {
            match node {
                SceneNode::Background(bg) => {
                    let Some(tex) = &self.background_texture else {
                        continue;
                    };
                    let rect = Rect::from_min_size(to_screen(Pos2::ZERO), bg.size());
                    painter.image(
                        tex.id(),
                        rect,
                        Rect::from_min_max(Pos2::new(0.0, 0.0), Pos2::new(1.0, 1.0)),
                        Color32::WHITE,
                    );
                }
                SceneNode::Feature(feature) => {
                    let Some(tex) = self.feature_textures.get(&feature.id) else {
                        continue;
                    };
                    let corners = feature.corners();
                    let s_tl = to_screen(corners[0]);
                    let s_tr = to_screen(corners[1]);
                    let s_bl = to_screen(corners[2]);
                    let s_br = to_screen(corners[3]);

                    // Textured quad (two triangles) — the GPU handles
                    // rotation and scale for free.
                    let white = Color32::WHITE;
                    let mut mesh = egui::Mesh::with_texture(tex.id());
                    mesh.vertices.push(egui::epaint::Vertex {
                        pos: s_tl,
                        uv: Pos2::new(0.0, 0.0),
                        color: white,
                    });
                    mesh.vertices.push(egui::epaint::Vertex {
                        pos: s_tr,
                        uv: Pos2::new(1.0, 0.0),
                        color: white,
                    });
                    mesh.vertices.push(egui::epaint::Vertex {
                        pos: s_bl,
                        uv: Pos2::new(0.0, 1.0),
                        color: white,
                    });
                    mesh.vertices.push(egui::epaint::Vertex {
                        pos: s_br,
                        uv: Pos2::new(1.0, 1.0),
                        color: white,
                    });
                    mesh.indices.extend_from_slice(&[0, 1, 2, 1, 3, 2]);
                    painter.add(egui::Shape::mesh(mesh));

                    if selection.contains(feature.id) {
                        // Outline: TL→TR, TR→BR, BR→BL, BL→TL
                        let screen_corners = [s_tl, s_tr, s_bl, s_br];
                        for &(a, b) in &[(0, 1), (1, 3), (3, 2), (2, 0)] {
                            painter.line_segment(
                                [screen_corners[a], screen_corners[b]],
                                Stroke::new(2.0, self.selection_stroke),
                            );
                        }
                    }
                }
            }
        }

        if scene.background().is_none() && scene.features().is_empty() {
            painter.text(
                canvas_rect.center(),
                Align2::CENTER_CENTER,
                t!("canvas.empty_hint"),
                FontId::proportional(15.0),
                ui.visuals().weak_text_color(),
            );
        }

        out
    }

    /// Upload missing textures and drop stale ones.
    fn sync_textures(&mut self, ctx: &egui::Context, scene: &Scene) {
        let texture_options = TextureOptions {
            magnification: TextureFilter::Linear,
            minification: TextureFilter::Linear,
            ..Default::default()
        };

        match scene.background() {
            Some(bg) => {
                let key = Arc::as_ptr(&bg.pixels) as usize;
                if self.background_key != Some(key) {
                    self.background_texture = Some(ctx.load_texture(
                        "scene_background",
                        to_color_image(&bg.pixels),
                        texture_options,
                    ));
                    self.background_key = Some(key);
                }
            }
            None => {
                self.background_texture = None;
                self.background_key = None;
            }
        }

        self.feature_textures
            .retain(|id, _| scene.feature(*id).is_some());
        for feature in scene.features() {
            if !self.feature_textures.contains_key(&feature.id) {
                let tex = ctx.load_texture(
                    format!("feature_{}", feature.name),
                    to_color_image(&feature.pixels),
                    texture_options,
                );
                self.feature_textures.insert(feature.id, tex);
            }
        }
    }
}
