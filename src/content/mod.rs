//! Content module - post and demo indexes, markdown rendering

mod entries;
mod images;
mod markdown;

pub use entries::{PostSummary, WebglEntry};
pub use images::{image_site_path, rewrite_image_links, rewrite_line};
pub use markdown::MarkdownRenderer;
