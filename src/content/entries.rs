//! Entries of the JSON indexes published with the site

use serde::{Deserialize, Serialize};

/// One blog post in `posts/posts.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostSummary {
    pub slug: String,
    pub title: String,
}

/// One WebGL demo in `webgl/list.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebglEntry {
    pub title: String,
    pub description: String,
    /// Directory holding the demo's `index.html`
    pub path: String,
}

impl WebglEntry {
    /// Link to the demo entry point
    pub fn href(&self) -> String {
        format!("{}/index.html", self.path.trim_end_matches('/'))
    }
}
