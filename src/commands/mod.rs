//! CLI commands

pub mod clean;
pub mod fix_images;
pub mod generate;
pub mod list;
pub mod render;
