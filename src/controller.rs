// ============================================================================
// SELECTION/TRANSFORM CONTROLLER — binds the two sliders to one feature
// ============================================================================

use crate::scene::{FeatureId, Scene};

/// Rotation control domain, integer degrees.
pub const ROTATION_MIN: i32 = -180;
pub const ROTATION_MAX: i32 = 180;

/// Scale control domain, integer percent (scale ×100).
pub const SCALE_PCT_MIN: i32 = 10;
pub const SCALE_PCT_MAX: i32 = 300;

/// The controller's explicit state: either nothing is bound and control
/// edits are dropped, or exactly one feature receives them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlBinding {
    NoSelection,
    HasSelection(FeatureId),
}

/// Synchronizes the rotation and scale controls with the primary selected
/// feature, bidirectionally.
///
/// The sliders live in the integer domain; the item stores floats. Binding
/// truncates into the slider range, so a bind/apply round trip is lossy by
/// contract (scale 1.234 → 123 → 1.23).
pub struct TransformController {
    binding: ControlBinding,
    /// Slider-backed values. Kept at their last-known state when nothing is
    /// bound — stale, not disabled.
    pub rotation_deg: i32,
    pub scale_pct: i32,
}

impl Default for TransformController {
    fn default() -> Self {
        Self {
            binding: ControlBinding::NoSelection,
            rotation_deg: 0,
            scale_pct: 100,
        }
    }
}

impl TransformController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn binding(&self) -> ControlBinding {
        self.binding
    }

    /// Drive state transitions from the current primary selection. Binding
    /// to a feature reads its transform into the controls; `None` unbinds
    /// and leaves the control values as they are.
    pub fn sync_selection(&mut self, scene: &Scene, primary: Option<FeatureId>) {
        match primary {
            Some(id) if self.binding != ControlBinding::HasSelection(id) => {
                self.bind(scene, id);
            }
            None => self.unbind(),
            _ => {}
        }
    }

    /// Transition to HasSelection and pull the item's values into the
    /// integer controls.
    pub fn bind(&mut self, scene: &Scene, id: FeatureId) {
        if scene.feature(id).is_none() {
            self.binding = ControlBinding::NoSelection;
            return;
        }
        self.binding = ControlBinding::HasSelection(id);
        self.pull(scene);
    }

    /// Transition to NoSelection. The sliders keep their last values.
    pub fn unbind(&mut self) {
        self.binding = ControlBinding::NoSelection;
    }

    /// Re-read the bound item's transform into the controls. This is how
    /// wheel-gesture scale changes show up in the scale slider.
    pub fn pull(&mut self, scene: &Scene) {
        if let ControlBinding::HasSelection(id) = self.binding {
            match scene.feature(id) {
                Some(f) => {
                    self.rotation_deg =
                        (f.placement.rotation_deg as i32).clamp(ROTATION_MIN, ROTATION_MAX);
                    self.scale_pct =
                        ((f.placement.scale * 100.0) as i32).clamp(SCALE_PCT_MIN, SCALE_PCT_MAX);
                }
                // Bound item vanished without a removal notice.
                None => self.binding = ControlBinding::NoSelection,
            }
        }
    }

    /// Rotation control edit: absolute set on the bound item. Dropped when
    /// nothing is bound.
    pub fn apply_rotation(&mut self, scene: &mut Scene, value: i32) {
        self.rotation_deg = value;
        if let ControlBinding::HasSelection(id) = self.binding {
            scene.set_rotation(id, value as f32);
        }
    }

    /// Scale control edit: the item's scale becomes exactly `value / 100`.
    pub fn apply_scale_pct(&mut self, scene: &mut Scene, value: i32) {
        self.scale_pct = value;
        if let ControlBinding::HasSelection(id) = self.binding {
            scene.set_scale(id, value as f32 / 100.0);
        }
    }

    /// Explicit reset when features were removed from the scene.
    pub fn notify_removed(&mut self, removed: &[FeatureId]) {
        if let ControlBinding::HasSelection(id) = self.binding {
            if removed.contains(&id) {
                self.binding = ControlBinding::NoSelection;
            }
        }
    }

    /// Explicit reset when the whole scene was cleared.
    pub fn notify_scene_cleared(&mut self) {
        self.binding = ControlBinding::NoSelection;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{DEFAULT_FEATURE_POSITION, ZOOM_IN_STEP};
    use image::RgbaImage;

    fn scene_with_feature() -> (Scene, FeatureId) {
        let mut scene = Scene::new();
        let id = scene.add_feature(
            "nose".into(),
            RgbaImage::new(16, 16),
            DEFAULT_FEATURE_POSITION,
        );
        (scene, id)
    }

    #[test]
    fn starts_unbound_with_neutral_values() {
        let c = TransformController::new();
        assert_eq!(c.binding(), ControlBinding::NoSelection);
        assert_eq!(c.rotation_deg, 0);
        assert_eq!(c.scale_pct, 100);
    }

    #[test]
    fn rotation_edit_reads_back_exactly() {
        let (mut scene, id) = scene_with_feature();
        let mut c = TransformController::new();
        c.bind(&scene, id);
        c.apply_rotation(&mut scene, 37);
        assert_eq!(scene.feature(id).unwrap().placement.rotation_deg, 37.0);
        c.apply_rotation(&mut scene, -180);
        assert_eq!(scene.feature(id).unwrap().placement.rotation_deg, -180.0);
    }

    #[test]
    fn scale_edit_is_value_over_hundred_exactly() {
        let (mut scene, id) = scene_with_feature();
        let mut c = TransformController::new();
        c.bind(&scene, id);
        c.apply_scale_pct(&mut scene, 250);
        assert_eq!(scene.feature(id).unwrap().placement.scale, 2.5);
        c.apply_scale_pct(&mut scene, 10);
        assert_eq!(scene.feature(id).unwrap().placement.scale, 0.1);
    }

    #[test]
    fn bind_pulls_item_values_into_controls() {
        let (mut scene, id) = scene_with_feature();
        scene.set_rotation(id, 45.0);
        scene.set_scale(id, 1.5);
        let mut c = TransformController::new();
        c.bind(&scene, id);
        assert_eq!(c.binding(), ControlBinding::HasSelection(id));
        assert_eq!(c.rotation_deg, 45);
        assert_eq!(c.scale_pct, 150);
    }

    #[test]
    fn bind_round_trip_is_lossy_by_truncation() {
        let (mut scene, id) = scene_with_feature();
        scene.set_scale(id, 1.234);
        let mut c = TransformController::new();
        c.bind(&scene, id);
        assert_eq!(c.scale_pct, 123);
        c.apply_scale_pct(&mut scene, c.scale_pct);
        assert_eq!(scene.feature(id).unwrap().placement.scale, 1.23);
    }

    #[test]
    fn bind_clamps_out_of_range_values_into_control_domain() {
        let (mut scene, id) = scene_with_feature();
        // Wheel zoom can push scale past the slider range.
        scene.set_scale(id, 4.0);
        scene.set_rotation(id, 400.0);
        let mut c = TransformController::new();
        c.bind(&scene, id);
        assert_eq!(c.scale_pct, SCALE_PCT_MAX);
        assert_eq!(c.rotation_deg, ROTATION_MAX);
    }

    #[test]
    fn edits_without_selection_are_dropped() {
        let (mut scene, id) = scene_with_feature();
        let mut c = TransformController::new();
        c.apply_rotation(&mut scene, 90);
        c.apply_scale_pct(&mut scene, 200);
        let f = scene.feature(id).unwrap();
        assert_eq!(f.placement.rotation_deg, 0.0);
        assert_eq!(f.placement.scale, 1.0);
        // Controls still remember the edits.
        assert_eq!(c.rotation_deg, 90);
        assert_eq!(c.scale_pct, 200);
    }

    #[test]
    fn unbind_keeps_stale_control_values() {
        let (mut scene, id) = scene_with_feature();
        scene.set_rotation(id, 30.0);
        let mut c = TransformController::new();
        c.bind(&scene, id);
        c.unbind();
        assert_eq!(c.binding(), ControlBinding::NoSelection);
        assert_eq!(c.rotation_deg, 30);
    }

    #[test]
    fn pull_reflects_wheel_zoom_in_scale_control() {
        let (mut scene, id) = scene_with_feature();
        let mut c = TransformController::new();
        c.bind(&scene, id);
        scene.scale_by(id, ZOOM_IN_STEP);
        c.pull(&scene);
        assert_eq!(c.scale_pct, 110);
    }

    #[test]
    fn removal_notice_resets_binding() {
        let (mut scene, id) = scene_with_feature();
        let mut c = TransformController::new();
        c.bind(&scene, id);
        scene.remove_feature(id);
        c.notify_removed(&[id]);
        assert_eq!(c.binding(), ControlBinding::NoSelection);
        // And edits are dropped again.
        c.apply_rotation(&mut scene, 10);
        assert_eq!(scene.feature_count(), 0);
    }

    #[test]
    fn scene_clear_notice_resets_binding() {
        let (mut scene, id) = scene_with_feature();
        let mut c = TransformController::new();
        c.bind(&scene, id);
        scene.clear();
        c.notify_scene_cleared();
        assert_eq!(c.binding(), ControlBinding::NoSelection);
    }

    #[test]
    fn sync_selection_rebinds_only_on_change() {
        let (mut scene, id) = scene_with_feature();
        let other = scene.add_feature("ear".into(), RgbaImage::new(8, 8), DEFAULT_FEATURE_POSITION);
        let mut c = TransformController::new();
        c.sync_selection(&scene, Some(id));
        assert_eq!(c.binding(), ControlBinding::HasSelection(id));
        // Same primary again: no re-pull, edited control values survive.
        c.rotation_deg = 77;
        c.sync_selection(&scene, Some(id));
        assert_eq!(c.rotation_deg, 77);
        c.sync_selection(&scene, Some(other));
        assert_eq!(c.binding(), ControlBinding::HasSelection(other));
        c.sync_selection(&scene, None);
        assert_eq!(c.binding(), ControlBinding::NoSelection);
    }
}
