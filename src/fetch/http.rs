//! Fetching from a deployed site over HTTP

use std::fmt;
use std::future::Future;
use std::time::Duration;

use super::{Fetcher, Response};
use crate::error::{Error, Result};

/// GETs resources from a remote origin such as `https://user.github.io`
#[derive(Clone)]
pub struct HttpFetcher {
    origin: String,
    agent: ureq::Agent,
}

impl fmt::Debug for HttpFetcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpFetcher")
            .field("origin", &self.origin)
            .finish()
    }
}

impl HttpFetcher {
    pub fn new(origin: &str, timeout_ms: Option<u64>) -> Self {
        let mut builder = ureq::AgentBuilder::new();
        if let Some(ms) = timeout_ms {
            builder = builder.timeout(Duration::from_millis(ms.max(1)));
        }
        Self {
            origin: origin.trim_end_matches('/').to_string(),
            agent: builder.build(),
        }
    }

    /// Absolute URL for a site-absolute path
    pub fn full_url(&self, url: &str) -> String {
        format!("{}{}", self.origin, url)
    }
}

impl Fetcher for HttpFetcher {
    fn get(&self, url: &str) -> impl Future<Output = Result<Response>> + Send {
        let full = self.full_url(url);
        let agent = self.agent.clone();
        async move {
            let target = full.clone();
            let joined = tokio::task::spawn_blocking(move || request(&agent, &target)).await;
            match joined {
                Ok(result) => result,
                Err(e) => Err(Error::Transport {
                    url: full,
                    message: e.to_string(),
                }),
            }
        }
    }
}

fn request(agent: &ureq::Agent, url: &str) -> Result<Response> {
    tracing::debug!("GET {}", url);
    let response = agent
        .get(url)
        .set("Cache-Control", "no-cache")
        .set("Pragma", "no-cache")
        .call();

    match response {
        Ok(resp) => {
            let status = resp.status();
            let body = resp.into_string()?;
            Ok(Response { status, body })
        }
        Err(ureq::Error::Status(status, resp)) => Ok(Response {
            status,
            body: resp.into_string().unwrap_or_default(),
        }),
        Err(ureq::Error::Transport(err)) => Err(Error::Transport {
            url: url.to_string(),
            message: err.to_string(),
        }),
    }
}
