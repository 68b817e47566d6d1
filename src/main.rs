// GUI-subsystem binary: no console window is allocated on Windows.
#![windows_subsystem = "windows"]

use eframe::egui;
use potatofe::app::PotatoFEApp;

fn main() -> Result<(), eframe::Error> {
    // Initialize session log (overwrites previous session log)
    potatofe::logger::init();

    // Initialize translations and pick the UI language from the system locale
    potatofe::i18n::init();
    potatofe::i18n::set_language(&potatofe::i18n::detect_system_language());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1024.0, 768.0])
            .with_title("PotatoFE"),
        ..Default::default()
    };

    eframe::run_native(
        "PotatoFE",
        options,
        Box::new(|cc| Box::new(PotatoFEApp::new(cc))),
    )
}
