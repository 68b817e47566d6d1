use eframe::egui;

use crate::controller::{
    ControlBinding, TransformController, ROTATION_MAX, ROTATION_MIN, SCALE_PCT_MAX, SCALE_PCT_MIN,
};
use crate::scene::Scene;

/// The two transform sliders. Always enabled; without a bound feature they
/// simply hold their last values and edits go nowhere.
#[derive(Default)]
pub struct TransformPanel;

impl TransformPanel {
    pub fn new() -> Self {
        Self
    }

    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        scene: &mut Scene,
        controller: &mut TransformController,
    ) {
        ui.horizontal(|ui| {
            match controller.binding() {
                ControlBinding::HasSelection(id) => {
                    let name = scene
                        .feature(id)
                        .map(|f| f.name.clone())
                        .unwrap_or_default();
                    ui.strong(name);
                }
                ControlBinding::NoSelection => {
                    ui.label(egui::RichText::new(t!("transform.no_selection")).weak());
                }
            }

            ui.separator();

            let mut rotation = controller.rotation_deg;
            let r = ui.add(
                egui::Slider::new(&mut rotation, ROTATION_MIN..=ROTATION_MAX)
                    .suffix("°")
                    .text(t!("transform.rotation")),
            );
            if r.changed() {
                controller.apply_rotation(scene, rotation);
            }

            let mut scale_pct = controller.scale_pct;
            let s = ui.add(
                egui::Slider::new(&mut scale_pct, SCALE_PCT_MIN..=SCALE_PCT_MAX)
                    .suffix("%")
                    .text(t!("transform.scale")),
            );
            if s.changed() {
                controller.apply_scale_pct(scene, scale_pct);
            }
        });
    }
}
