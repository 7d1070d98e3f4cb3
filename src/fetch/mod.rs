//! Fetching site resources
//!
//! Every read the assembler performs goes through a [`Fetcher`]. The two
//! helpers [`fetch_text`] and [`fetch_json`] turn a raw [`Response`] into
//! a body, failing on non-success statuses.

mod dir;
mod http;
#[cfg(test)]
pub(crate) mod memory;

use serde::de::DeserializeOwned;
use std::future::Future;
use std::path::Path;

pub use dir::DirFetcher;
pub use http::HttpFetcher;

use crate::config::SiteConfig;
use crate::error::{Error, Result};

/// A fetched resource, whatever its status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub body: String,
}

impl Response {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            body: String::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Source of site resources, addressed by site-absolute URL (`/root/a/b?q`)
pub trait Fetcher: Send + Sync {
    /// Issue an uncached GET
    fn get(&self, url: &str) -> impl Future<Output = Result<Response>> + Send;
}

/// Fetch a resource as text
pub async fn fetch_text<F: Fetcher>(fetcher: &F, url: &str) -> Result<String> {
    let response = fetcher.get(url).await?;
    if !response.is_success() {
        return Err(Error::Http {
            url: url.to_string(),
            status: response.status,
        });
    }
    Ok(response.body)
}

/// Fetch a resource and parse it as JSON
pub async fn fetch_json<F: Fetcher, T: DeserializeOwned>(fetcher: &F, url: &str) -> Result<T> {
    let body = fetch_text(fetcher, url).await?;
    serde_json::from_str(&body).map_err(|source| Error::Parse {
        url: url.to_string(),
        source,
    })
}

/// The fetcher selected by the site configuration
#[derive(Debug, Clone)]
pub enum SiteFetcher {
    Http(HttpFetcher),
    Dir(DirFetcher),
}

impl SiteFetcher {
    /// Remote origin when configured, otherwise the local source directory
    pub fn from_config(config: &SiteConfig, source_dir: &Path) -> Self {
        match &config.origin {
            Some(origin) => {
                tracing::debug!("Fetching from {}", origin);
                SiteFetcher::Http(HttpFetcher::new(origin, config.http_timeout_ms))
            }
            None => {
                tracing::debug!("Fetching from {:?}", source_dir);
                SiteFetcher::Dir(DirFetcher::new(source_dir, &config.root))
            }
        }
    }
}

impl Fetcher for SiteFetcher {
    fn get(&self, url: &str) -> impl Future<Output = Result<Response>> + Send {
        let url = url.to_string();
        async move {
            match self {
                SiteFetcher::Http(fetcher) => fetcher.get(&url).await,
                SiteFetcher::Dir(fetcher) => fetcher.get(&url).await,
            }
        }
    }
}
