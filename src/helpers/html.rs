//! HTML helper functions

use super::url::{asset_url, encode_query_value};
use crate::config::SiteConfig;

/// Generate an anchor tag for a site-relative path
///
/// # Examples
/// ```ignore
/// link_to(&config, "/about.html", "About") // -> <a href="/my-repo/about.html">About</a>
/// ```
pub fn link_to(config: &SiteConfig, path: &str, text: &str) -> String {
    let href = if path.starts_with("http://") || path.starts_with("https://") {
        path.to_string()
    } else {
        asset_url(config, path)
    };

    format!(r#"<a href="{}">{}</a>"#, href, html_escape(text))
}

/// Link to the single-post page for a slug
pub fn post_link(config: &SiteConfig, slug: &str) -> String {
    format!(
        "{}?slug={}",
        config.paths.post_page,
        encode_query_value(slug)
    )
}

/// Escape HTML special characters
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
