// Macro-bearing modules first so log_*!/t! are in scope crate-wide.
#[macro_use]
pub mod logger;
#[macro_use]
pub mod i18n;

pub mod app;
pub mod assets;
pub mod canvas;
pub mod components;
pub mod controller;
pub mod io;
pub mod scene;
