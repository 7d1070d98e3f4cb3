//! WebGL demo cards (`#webglList`)

use super::{Assembler, InitResult};
use crate::content::WebglEntry;
use crate::dom::{ids, Document, Patch};
use crate::fetch::{fetch_json, Fetcher};
use crate::helpers::{asset_url, html_escape};

pub(super) async fn init<F: Fetcher>(assembler: &Assembler<'_, F>, doc: &Document) -> InitResult {
    if !doc.has(ids::WEBGL_LIST) {
        return Ok(Vec::new());
    }

    let config = assembler.config;
    let url = asset_url(config, &config.paths.webgl_index);
    let entries: Vec<WebglEntry> = fetch_json(assembler.fetcher, &url).await?;
    tracing::debug!("Listing {} demos", entries.len());

    let cards: String = entries.iter().map(card).collect();
    Ok(vec![Patch::inner_html(ids::WEBGL_LIST, cards)])
}

fn card(entry: &WebglEntry) -> String {
    format!(
        r#"<div class="card"><h3>{}</h3><p>{}</p><a href="{}">Open</a></div>"#,
        html_escape(&entry.title),
        html_escape(&entry.description),
        html_escape(&entry.href())
    )
}
