// ============================================================================
// SCENE MODEL — background + placeable feature items with 2D transforms
// ============================================================================

use std::sync::Arc;

use egui::{Pos2, Vec2};
use image::RgbaImage;
use uuid::Uuid;

/// Scale multiplier for one wheel notch zooming in.
pub const ZOOM_IN_STEP: f32 = 1.1;
/// Scale multiplier for one wheel notch zooming out (exact inverse of in).
pub const ZOOM_OUT_STEP: f32 = 1.0 / 1.1;

/// Where a freshly added feature lands on the scene.
pub const DEFAULT_FEATURE_POSITION: Pos2 = Pos2::new(100.0, 100.0);

/// Unique identifier for a feature item within a scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FeatureId(Uuid);

impl FeatureId {
    fn new() -> Self {
        FeatureId(Uuid::new_v4())
    }
}

/// 2D presentation state of a feature: position of the image center in
/// scene points, rotation in degrees, uniform scale.
///
/// Rotation and scale are deliberately unclamped here — the control
/// surfaces bound them, the data does not.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub position: Pos2,
    pub rotation_deg: f32,
    pub scale: f32,
}

impl Default for Placement {
    fn default() -> Self {
        Self {
            position: Pos2::ZERO,
            rotation_deg: 0.0,
            scale: 1.0,
        }
    }
}

/// A decorative image placed on the scene. The image itself is immutable
/// after insertion; only the placement changes.
pub struct Feature {
    pub id: FeatureId,
    /// Display name, derived from the source file stem.
    pub name: String,
    pub pixels: Arc<RgbaImage>,
    pub placement: Placement,
}

impl Feature {
    fn new(name: String, pixels: RgbaImage, position: Pos2) -> Self {
        Self {
            id: FeatureId::new(),
            name,
            pixels: Arc::new(pixels),
            placement: Placement {
                position,
                ..Default::default()
            },
        }
    }

    /// Unscaled image size in scene points.
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.pixels.width() as f32, self.pixels.height() as f32)
    }

    /// Half extents after scaling, before rotation.
    fn scaled_half(&self) -> Vec2 {
        self.size() * 0.5 * self.placement.scale
    }

    /// Rotate `p` around the feature center by the current rotation.
    fn rotate_point(&self, p: Pos2) -> Pos2 {
        let c = self.placement.position;
        let a = self.placement.rotation_deg.to_radians();
        let (sin, cos) = a.sin_cos();
        let dx = p.x - c.x;
        let dy = p.y - c.y;
        Pos2::new(c.x + dx * cos - dy * sin, c.y + dx * sin + dy * cos)
    }

    /// The 4 corner positions in scene coords, rotated: [TL, TR, BL, BR].
    pub fn corners(&self) -> [Pos2; 4] {
        let hs = self.scaled_half();
        let c = self.placement.position;
        [
            self.rotate_point(Pos2::new(c.x - hs.x, c.y - hs.y)),
            self.rotate_point(Pos2::new(c.x + hs.x, c.y - hs.y)),
            self.rotate_point(Pos2::new(c.x - hs.x, c.y + hs.y)),
            self.rotate_point(Pos2::new(c.x + hs.x, c.y + hs.y)),
        ]
    }

    /// Point containment test: un-rotate the point around the center and
    /// compare against the scaled half extents.
    pub fn contains(&self, p: Pos2) -> bool {
        let c = self.placement.position;
        let a = -self.placement.rotation_deg.to_radians();
        let (sin, cos) = a.sin_cos();
        let dx = p.x - c.x;
        let dy = p.y - c.y;
        let ux = dx * cos - dy * sin;
        let uy = dx * sin + dy * cos;
        let hs = self.scaled_half();
        ux.abs() <= hs.x && uy.abs() <= hs.y
    }
}

/// The single background image. No transform state; always rendered below
/// every feature.
pub struct Background {
    pub name: String,
    pub pixels: Arc<RgbaImage>,
}

impl Background {
    pub fn new(name: String, pixels: RgbaImage) -> Self {
        Self {
            name,
            pixels: Arc::new(pixels),
        }
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.pixels.width() as f32, self.pixels.height() as f32)
    }
}

// ----------------------------------------------------------------------------
//  Scene
// ----------------------------------------------------------------------------

/// A renderable scene element. Only the Feature variant carries transform
/// state; the background never has any.
pub enum SceneNode<'a> {
    Background(&'a Background),
    Feature(&'a Feature),
}

/// One background plus zero-or-more features. Feature order is insertion
/// order and doubles as z-order (later items draw on top).
#[derive(Default)]
pub struct Scene {
    background: Option<Background>,
    features: Vec<Feature>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the background. Features are untouched — clearing the whole
    /// composition is `clear()`, a separate operation.
    pub fn set_background(&mut self, background: Background) {
        self.background = Some(background);
    }

    pub fn background(&self) -> Option<&Background> {
        self.background.as_ref()
    }

    /// Insert a new feature, unrotated and unscaled, centered at `position`.
    pub fn add_feature(&mut self, name: String, pixels: RgbaImage, position: Pos2) -> FeatureId {
        let feature = Feature::new(name, pixels, position);
        let id = feature.id;
        self.features.push(feature);
        id
    }

    /// Remove one feature. Returns false if the id is not in the scene.
    pub fn remove_feature(&mut self, id: FeatureId) -> bool {
        let before = self.features.len();
        self.features.retain(|f| f.id != id);
        self.features.len() != before
    }

    /// Remove several features at once. Returns how many were removed.
    pub fn remove_features(&mut self, ids: &[FeatureId]) -> usize {
        let before = self.features.len();
        self.features.retain(|f| !ids.contains(&f.id));
        before - self.features.len()
    }

    /// Discard the background and every feature.
    pub fn clear(&mut self) {
        self.background = None;
        self.features.clear();
    }

    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    /// All elements in render order: the background (if any) first, then
    /// features bottom-to-top.
    pub fn nodes(&self) -> impl Iterator<Item = SceneNode<'_>> {
        self.background
            .iter()
            .map(SceneNode::Background)
            .chain(self.features.iter().map(SceneNode::Feature))
    }

    pub fn feature_count(&self) -> usize {
        self.features.len()
    }

    pub fn feature(&self, id: FeatureId) -> Option<&Feature> {
        self.features.iter().find(|f| f.id == id)
    }

    pub fn feature_mut(&mut self, id: FeatureId) -> Option<&mut Feature> {
        self.features.iter_mut().find(|f| f.id == id)
    }

    /// Topmost feature containing `point`, if any. The background is not
    /// hit-testable.
    pub fn hit_test(&self, point: Pos2) -> Option<FeatureId> {
        self.features
            .iter()
            .rev()
            .find(|f| f.contains(point))
            .map(|f| f.id)
    }

    // ---- transform writes (single source of truth per item) ----------------

    pub fn translate(&mut self, id: FeatureId, delta: Vec2) -> bool {
        match self.feature_mut(id) {
            Some(f) => {
                f.placement.position += delta;
                true
            }
            None => false,
        }
    }

    /// Absolute rotation set, in degrees.
    pub fn set_rotation(&mut self, id: FeatureId, degrees: f32) -> bool {
        match self.feature_mut(id) {
            Some(f) => {
                f.placement.rotation_deg = degrees;
                true
            }
            None => false,
        }
    }

    /// Absolute scale set.
    pub fn set_scale(&mut self, id: FeatureId, scale: f32) -> bool {
        match self.feature_mut(id) {
            Some(f) => {
                f.placement.scale = scale;
                true
            }
            None => false,
        }
    }

    /// Multiplicative scale step — the wheel-gesture path. Writes the same
    /// field the slider writes, so the two surfaces cannot diverge.
    pub fn scale_by(&mut self, id: FeatureId, factor: f32) -> bool {
        match self.feature_mut(id) {
            Some(f) => {
                f.placement.scale *= factor;
                true
            }
            None => false,
        }
    }
}

// ----------------------------------------------------------------------------
//  Selection
// ----------------------------------------------------------------------------

/// Ordered set of selected features. The first entry is the primary
/// selection, the one the transform controls bind to.
#[derive(Default)]
pub struct Selection {
    ids: Vec<FeatureId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn ids(&self) -> &[FeatureId] {
        &self.ids
    }

    pub fn contains(&self, id: FeatureId) -> bool {
        self.ids.contains(&id)
    }

    pub fn primary(&self) -> Option<FeatureId> {
        self.ids.first().copied()
    }

    /// Replace the whole selection with a single feature.
    pub fn set(&mut self, id: FeatureId) {
        self.ids.clear();
        self.ids.push(id);
    }

    /// Ctrl-click behavior: add if absent, remove if present.
    pub fn toggle(&mut self, id: FeatureId) {
        if let Some(pos) = self.ids.iter().position(|&x| x == id) {
            self.ids.remove(pos);
        } else {
            self.ids.push(id);
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Drop ids that no longer exist in the scene (after removals).
    pub fn retain_existing(&mut self, scene: &Scene) {
        self.ids.retain(|&id| scene.feature(id).is_some());
    }
}
