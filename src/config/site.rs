//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    /// Title shown on the site root page, if different
    pub home_title: Option<String>,
    pub nav: Vec<NavLink>,

    // URL
    /// Deployment prefix, e.g. `/my-repo` for a project page
    pub root: String,
    /// Remote origin to fetch from; the source directory is read when unset
    pub origin: Option<String>,
    pub http_timeout_ms: Option<u64>,

    // Directory
    pub source_dir: String,
    pub public_dir: String,

    // Fragments
    pub cache_bust: bool,
    pub alternate_case: bool,

    // Pages
    pub not_found_message: String,
    pub unavailable_message: Option<String>,
    pub expand_posts: bool,
    #[serde(default)]
    pub paths: PathsConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Cinéma Vérité".to_string(),
            home_title: None,
            nav: NavLink::defaults(),

            root: String::new(),
            origin: None,
            http_timeout_ms: None,

            source_dir: "source".to_string(),
            public_dir: "public".to_string(),

            cache_bust: true,
            alternate_case: true,

            not_found_message: "Post not found.".to_string(),
            unavailable_message: None,
            expand_posts: false,
            paths: PathsConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Title for the page at `path`
    pub fn title_for(&self, path: &str) -> &str {
        match &self.home_title {
            Some(home) if crate::helpers::is_site_root(self, path) => home,
            _ => &self.title,
        }
    }
}

/// One entry of the header navigation bar
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavLink {
    pub label: String,
    pub path: String,
}

impl NavLink {
    fn defaults() -> Vec<Self> {
        [
            ("소개", "/about.html"),
            ("일상", "/blog.html"),
            ("데모", "/webgl.html"),
        ]
        .into_iter()
        .map(|(label, path)| NavLink {
            label: label.to_string(),
            path: path.to_string(),
        })
        .collect()
    }
}

/// Site-relative locations of the fetched resources
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub header: String,
    pub footer: String,
    pub posts_index: String,
    pub posts_dir: String,
    pub webgl_index: String,
    /// Page the blog list links to
    pub post_page: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            header: "/assets/header.html".to_string(),
            footer: "/assets/footer.html".to_string(),
            posts_index: "/posts/posts.json".to_string(),
            posts_dir: "/posts".to_string(),
            webgl_index: "/webgl/list.json".to_string(),
            post_page: "post.html".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.title, "Cinéma Vérité");
        assert_eq!(config.nav.len(), 3);
        assert_eq!(config.nav[1].label, "일상");
        assert_eq!(config.nav[1].path, "/blog.html");
        assert!(config.cache_bust);
        assert_eq!(config.paths.posts_index, "/posts/posts.json");
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: My Site
root: /my-repo
origin: https://example.github.io
nav:
  - label: Home
    path: /index.html
paths:
  webgl_index: /demos/list.json
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "My Site");
        assert_eq!(config.root, "/my-repo");
        assert_eq!(config.origin.as_deref(), Some("https://example.github.io"));
        assert_eq!(config.nav.len(), 1);
        assert_eq!(config.paths.webgl_index, "/demos/list.json");
        assert_eq!(config.paths.header, "/assets/header.html");
    }

    #[test]
    fn test_title_for_home_page() {
        let mut config = SiteConfig::default();
        config.root = "/site".to_string();
        assert_eq!(config.title_for("/site/"), "Cinéma Vérité");

        config.home_title = Some("Welcome".to_string());
        assert_eq!(config.title_for("/site/"), "Welcome");
        assert_eq!(config.title_for("/site/index.html"), "Welcome");
        assert_eq!(config.title_for("/site/blog.html"), "Cinéma Vérité");
    }
}
