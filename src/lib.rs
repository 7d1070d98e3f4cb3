//! stitch-rs: page assembly for a small static personal site
//!
//! Pages are plain HTML files with mount points (`#header`, `#postList`,
//! ...). This crate fills them from shared fragments, JSON indexes and
//! markdown posts, either from a local copy of the site or from the
//! deployed origin.

pub mod commands;
pub mod config;
pub mod content;
pub mod dom;
pub mod error;
pub mod fetch;
pub mod helpers;
pub mod pages;
pub mod partials;
pub mod server;

use anyhow::Result;
use std::path::Path;

use fetch::SiteFetcher;

/// The main site application
#[derive(Clone)]
pub struct Site {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
    /// Source directory (pages, fragments, indexes)
    pub source_dir: std::path::PathBuf,
    /// Public (output) directory
    pub public_dir: std::path::PathBuf,
}

impl Site {
    /// Create a new site from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Create a site with an explicit configuration
    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: config::SiteConfig) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        let source_dir = base_dir.join(&config.source_dir);
        let public_dir = base_dir.join(&config.public_dir);

        Self {
            config,
            base_dir,
            source_dir,
            public_dir,
        }
    }

    /// Fetcher for this site's resources
    pub fn fetcher(&self) -> SiteFetcher {
        SiteFetcher::from_config(&self.config, &self.source_dir)
    }

    /// Assemble every page into the public directory
    pub async fn generate(&self) -> Result<()> {
        commands::generate::run(self).await
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }
}
