pub mod thumbnails;
pub mod transform_panel;
