//! In-memory fetcher for tests

use std::collections::HashMap;
use std::future::Future;
use std::sync::Mutex;

use super::{Fetcher, Response};
use crate::error::Result;
use crate::helpers::split_url;

/// Serves canned responses keyed by path; unknown paths are 404
#[derive(Default)]
pub struct MemoryFetcher {
    routes: HashMap<String, Response>,
    requests: Mutex<Vec<String>>,
}

impl MemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, path: &str, response: Response) -> Self {
        self.routes.insert(path.to_string(), response);
        self
    }

    /// Every URL requested so far, queries included
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl Fetcher for MemoryFetcher {
    fn get(&self, url: &str) -> impl Future<Output = Result<Response>> + Send {
        self.requests.lock().unwrap().push(url.to_string());
        let (path, _) = split_url(url);
        let response = self
            .routes
            .get(path)
            .cloned()
            .unwrap_or_else(|| Response::status(404));
        async move { Ok(response) }
    }
}
