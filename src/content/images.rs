//! Rewriting image links in markdown posts to site-absolute URLs
//!
//! Posts written in desktop editors reference images relative to the file
//! (`../assets/images/a.png`, `.\assets\images\a.png`). Served from
//! `post.html` those links break, so they are rewritten to the deployed
//! location (`/root/assets/images/a.png`). Lines with template tags or
//! external links are left alone.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use crate::config::SiteConfig;
use crate::helpers::asset_url;

lazy_static! {
    static ref MD_IMAGE: Regex =
        Regex::new(r"(!\[[^\]]*\]\()([^)]+)(\))").expect("markdown image pattern");
    static ref HTML_IMAGE: Regex =
        Regex::new(r#"(?i)(<img[^>]*\bsrc=["'])([^"']+)(["'])"#).expect("img tag pattern");
    static ref IMAGE_PATH: Regex =
        Regex::new(r"(?i)(?:\.\./|\./)?(/?assets/images/.*)").expect("image path pattern");
    static ref SLASHES: Regex = Regex::new(r"/{2,}").expect("slashes pattern");
}

/// Site-relative path (`/assets/images/...`) for an image reference
pub fn image_site_path(url: &str) -> Option<String> {
    let url = url.trim().replace('\\', "/");
    let caps = IMAGE_PATH.captures(&url)?;
    let path = caps.get(1)?.as_str();
    let path = if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    };
    Some(SLASHES.replace_all(&path, "/").into_owned())
}

/// Rewrite the image links of one line
pub fn rewrite_line(config: &SiteConfig, line: &str) -> String {
    if line.contains("{{") || line.contains("http://") || line.contains("https://") {
        return line.to_string();
    }

    let rewrite = |caps: &Captures| match image_site_path(&caps[2]) {
        Some(path) => format!("{}{}{}", &caps[1], asset_url(config, &path), &caps[3]),
        None => caps[0].to_string(),
    };

    let line = MD_IMAGE.replace_all(line, rewrite);
    HTML_IMAGE.replace_all(&line, rewrite).into_owned()
}

/// Rewrite every line of a document, keeping its line endings
pub fn rewrite_image_links(config: &SiteConfig, text: &str) -> String {
    text.split_inclusive('\n')
        .map(|line| rewrite_line(config, line))
        .collect()
}
