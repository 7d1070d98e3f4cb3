//! Error types for fetching and assembling pages

use thiserror::Error;

/// Errors raised while fetching site resources
#[derive(Debug, Error)]
pub enum Error {
    /// The server (or source tree) answered with a non-success status
    #[error("{url} -> {status}")]
    Http { url: String, status: u16 },

    /// The body was fetched but is not the JSON we expected
    #[error("Failed to parse {url}: {source}")]
    Parse {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// The request never produced a status (DNS, connection, timeout)
    #[error("Transport error for {url}: {message}")]
    Transport { url: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The post page was requested without a `slug` parameter
    #[error("No slug given")]
    MissingSlug,
}

impl Error {
    /// HTTP status carried by the error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
