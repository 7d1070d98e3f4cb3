//! Helper functions for URLs and HTML snippets

mod html;
mod url;

pub use html::*;
pub use url::*;
