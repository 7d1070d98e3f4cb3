//! Fetching from a local copy of the site

use percent_encoding::percent_decode_str;
use std::future::Future;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use super::{Fetcher, Response};
use crate::error::Result;
use crate::helpers::split_url;

/// Reads resources from a directory laid out like the deployed site
///
/// URLs are expected to start with the deployment root; the query string
/// is ignored. Missing files answer 404 and paths leaving the directory 403.
#[derive(Debug, Clone)]
pub struct DirFetcher {
    dir: PathBuf,
    root: String,
}

impl DirFetcher {
    pub fn new<P: AsRef<Path>>(dir: P, root: &str) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            root: root.trim_end_matches('/').to_string(),
        }
    }

    /// Path backing a URL, or the status to answer with
    ///
    /// A path naming a directory is served from its `index.html`; that
    /// check touches the filesystem and happens in [`Fetcher::get`].
    pub fn resolve(&self, url: &str) -> std::result::Result<PathBuf, u16> {
        let (path, _) = split_url(url);
        let rest = path.strip_prefix(self.root.as_str()).ok_or(404u16)?;
        if !rest.is_empty() && !rest.starts_with('/') {
            return Err(404);
        }

        let decoded = percent_decode_str(rest).decode_utf8_lossy();
        let relative = Path::new(decoded.trim_start_matches('/'));
        if relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_)))
        {
            return Err(403);
        }

        let file = self.dir.join(relative);
        if decoded.is_empty() || decoded.ends_with('/') {
            return Ok(file.join("index.html"));
        }
        Ok(file)
    }
}

impl Fetcher for DirFetcher {
    fn get(&self, url: &str) -> impl Future<Output = Result<Response>> + Send {
        let resolved = self.resolve(url);
        async move {
            let mut file = match resolved {
                Ok(file) => file,
                Err(status) => return Ok(Response::status(status)),
            };
            if tokio::fs::metadata(&file).await.is_ok_and(|m| m.is_dir()) {
                file = file.join("index.html");
            }

            match tokio::fs::read_to_string(&file).await {
                Ok(body) => Ok(Response::ok(body)),
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    tracing::debug!("Not found: {:?}", file);
                    Ok(Response::status(404))
                }
                Err(e) => Err(e.into()),
            }
        }
    }
}
