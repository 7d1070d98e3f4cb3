//! Page assembly
//!
//! [`Assembler::assemble`] is the entry point: it loads the shared fragments
//! first, then runs the blog list, single post and WebGL list initializers
//! concurrently. Initializers only read the document and return [`Patch`]es
//! for their own mount points; those are applied once all of them finish.

mod blog;
mod post;
mod webgl;

use crate::config::SiteConfig;
use crate::content::MarkdownRenderer;
use crate::dom::{ids, Document, Patch};
use crate::error::{Error, Result};
use crate::fetch::Fetcher;
use crate::helpers::{html_escape, parse_query, split_url};
use crate::partials::{LoadedFragment, PartialLoader};

/// The URL a page is assembled for
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageRequest {
    pub path: String,
    pub query: Vec<(String, String)>,
}

impl PageRequest {
    /// Parse a site-absolute URL such as `/post.html?slug=hello`
    pub fn parse(url: &str) -> Self {
        let (path, query) = split_url(url);
        Self {
            path: path.to_string(),
            query: query.map(parse_query).unwrap_or_default(),
        }
    }

    /// First value of a query parameter
    pub fn param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// The page regions filled after the fragments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Initializer {
    BlogList,
    Post,
    WebglList,
}

impl Initializer {
    /// Mount point that receives the initializer's output
    pub fn mount(self) -> &'static str {
        match self {
            Initializer::BlogList => ids::POST_LIST,
            Initializer::Post => ids::POST_CONTAINER,
            Initializer::WebglList => ids::WEBGL_LIST,
        }
    }
}

/// An initializer that could not fill its region
#[derive(Debug)]
pub struct InitFailure {
    pub initializer: Initializer,
    pub error: Error,
}

/// Result of assembling one page
#[derive(Debug)]
pub struct AssembledPage {
    pub document: Document,
    pub fragments: Vec<LoadedFragment>,
    pub failures: Vec<InitFailure>,
}

/// Assembles pages with a given configuration and fetcher
pub struct Assembler<'a, F> {
    config: &'a SiteConfig,
    fetcher: &'a F,
    renderer: MarkdownRenderer,
}

impl<'a, F: Fetcher> Assembler<'a, F> {
    pub fn new(config: &'a SiteConfig, fetcher: &'a F) -> Self {
        Self {
            config,
            fetcher,
            renderer: MarkdownRenderer::new(),
        }
    }

    /// Assemble the page `html` as served at `request`
    pub async fn assemble(&self, request: &PageRequest, html: &str) -> AssembledPage {
        let mut document = Document::parse(html);

        let fragments = PartialLoader::new(self.config, self.fetcher)
            .load_into(&mut document, &request.path)
            .await;

        let (blog, post, webgl) = tokio::join!(
            blog::init(self, &document),
            post::init(self, &document, request),
            webgl::init(self, &document),
        );

        let mut failures = Vec::new();
        for (initializer, result) in [
            (Initializer::BlogList, blog),
            (Initializer::Post, post),
            (Initializer::WebglList, webgl),
        ] {
            match result {
                Ok(patches) => {
                    for patch in &patches {
                        document.apply(patch);
                    }
                }
                Err(error) => {
                    tracing::error!("{:?} failed on {}: {}", initializer, request.path, error);
                    if let Some(message) = &self.config.unavailable_message {
                        document.set_inner_html(
                            initializer.mount(),
                            &format!("<p>{}</p>", html_escape(message)),
                        );
                    }
                    failures.push(InitFailure { initializer, error });
                }
            }
        }

        AssembledPage {
            document,
            fragments,
            failures,
        }
    }
}

/// Patches for a region, or an empty list when its mount is absent
type InitResult = Result<Vec<Patch>>;
