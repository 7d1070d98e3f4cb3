//! Single post (`#postContainer`, `#postTitle`)

use super::{Assembler, InitResult, PageRequest};
use crate::dom::{ids, Document, Patch};
use crate::error::{Error, Result};
use crate::fetch::{fetch_text, Fetcher};
use crate::helpers::{asset_url, encode_query_value, html_escape};

/// The `slug` query parameter; empty counts as missing
fn slug(request: &PageRequest) -> Result<&str> {
    request
        .param("slug")
        .filter(|slug| !slug.is_empty())
        .ok_or(Error::MissingSlug)
}

pub(super) async fn init<F: Fetcher>(
    assembler: &Assembler<'_, F>,
    doc: &Document,
    request: &PageRequest,
) -> InitResult {
    if !doc.has(ids::POST_CONTAINER) {
        return Ok(Vec::new());
    }

    let config = assembler.config;
    let slug = match slug(request) {
        Ok(slug) => slug,
        Err(Error::MissingSlug) => {
            tracing::debug!("No slug on {}", request.path);
            return Ok(vec![Patch::inner_html(
                ids::POST_CONTAINER,
                format!("<p>{}</p>", html_escape(&config.not_found_message)),
            )]);
        }
        Err(e) => return Err(e),
    };

    let url = asset_url(
        config,
        &format!(
            "{}/{}.md",
            config.paths.posts_dir.trim_end_matches('/'),
            encode_query_value(slug)
        ),
    );
    let markdown = fetch_text(assembler.fetcher, &url).await?;

    let mut patches = vec![Patch::inner_html(
        ids::POST_CONTAINER,
        assembler.renderer.render(&markdown),
    )];
    if doc.has(ids::POST_TITLE) {
        patches.push(Patch::text(ids::POST_TITLE, slug));
    }
    Ok(patches)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::fetch::memory::MemoryFetcher;
    use crate::fetch::Response;

    const PAGE: &str = r#"<h1 id="postTitle"></h1><article id="postContainer"></article>"#;

    #[tokio::test]
    async fn test_renders_post_and_title() {
        let config = SiteConfig::default();
        let fetcher = MemoryFetcher::new().with(
            "/posts/hello-world.md",
            Response::ok("## Title\n**bold** and *italic*"),
        );
        let assembler = Assembler::new(&config, &fetcher);
        let request = PageRequest::parse("/post.html?slug=hello-world");

        let patches = init(&assembler, &Document::parse(PAGE), &request)
            .await
            .unwrap();
        assert_eq!(
            patches,
            vec![
                Patch::inner_html(
                    ids::POST_CONTAINER,
                    "<h2>Title</h2><br><b>bold</b> and <i>italic</i>"
                ),
                Patch::text(ids::POST_TITLE, "hello-world"),
            ]
        );
    }

    #[tokio::test]
    async fn test_missing_slug_shows_not_found_without_fetching() {
        let config = SiteConfig::default();
        let fetcher = MemoryFetcher::new();
        let assembler = Assembler::new(&config, &fetcher);

        for url in ["/post.html", "/post.html?slug="] {
            let request = PageRequest::parse(url);
            let patches = init(&assembler, &Document::parse(PAGE), &request)
                .await
                .unwrap();
            assert_eq!(
                patches,
                vec![Patch::inner_html(ids::POST_CONTAINER, "<p>Post not found.</p>")]
            );
        }
        assert!(fetcher.requests().is_empty());
    }

    #[tokio::test]
    async fn test_missing_post_file_propagates() {
        let config = SiteConfig::default();
        let fetcher = MemoryFetcher::new();
        let assembler = Assembler::new(&config, &fetcher);
        let request = PageRequest::parse("/post.html?slug=gone");

        let err = init(&assembler, &Document::parse(PAGE), &request)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Http { ref url, status: 404 } if url == "/posts/gone.md"));
    }

    #[tokio::test]
    async fn test_slug_cannot_leave_posts_dir() {
        let config = SiteConfig::default();
        let fetcher = MemoryFetcher::new();
        let assembler = Assembler::new(&config, &fetcher);
        let request = PageRequest::parse("/post.html?slug=../secret");

        let _ = init(&assembler, &Document::parse(PAGE), &request).await;
        assert_eq!(fetcher.requests(), vec!["/posts/..%2Fsecret.md".to_string()]);
    }

    #[tokio::test]
    async fn test_title_mount_is_optional() {
        let config = SiteConfig::default();
        let fetcher = MemoryFetcher::new().with("/posts/a.md", Response::ok("text"));
        let assembler = Assembler::new(&config, &fetcher);
        let request = PageRequest::parse("/post.html?slug=a");

        let patches = init(
            &assembler,
            &Document::parse(r#"<div id="postContainer"></div>"#),
            &request,
        )
        .await
        .unwrap();
        assert_eq!(patches, vec![Patch::inner_html(ids::POST_CONTAINER, "text")]);
    }
}
