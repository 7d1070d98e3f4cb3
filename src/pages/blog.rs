//! Blog index (`#postList`)

use super::{Assembler, InitResult};
use crate::content::PostSummary;
use crate::dom::{ids, Document, Patch};
use crate::fetch::{fetch_json, Fetcher};
use crate::helpers::{asset_url, html_escape, post_link};

/// One list item per post, in index order
pub(super) async fn init<F: Fetcher>(assembler: &Assembler<'_, F>, doc: &Document) -> InitResult {
    if !doc.has(ids::POST_LIST) {
        return Ok(Vec::new());
    }

    let config = assembler.config;
    let url = asset_url(config, &config.paths.posts_index);
    let posts: Vec<PostSummary> = fetch_json(assembler.fetcher, &url).await?;
    tracing::debug!("Listing {} posts", posts.len());

    let items: String = posts
        .iter()
        .map(|post| {
            format!(
                r#"<li><a href="{}">{}</a></li>"#,
                html_escape(&post_link(config, &post.slug)),
                html_escape(&post.title)
            )
        })
        .collect();

    Ok(vec![Patch::inner_html(ids::POST_LIST, items)])
}
