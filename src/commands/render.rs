//! Assemble a single page

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::fetch::{fetch_text, Fetcher};
use crate::pages::{AssembledPage, Assembler, PageRequest};
use crate::Site;

/// Assemble the page served at `url` (e.g. `/post.html?slug=hello`)
pub async fn assemble_url<F: Fetcher>(site: &Site, fetcher: &F, url: &str) -> Result<AssembledPage> {
    let request = PageRequest::parse(url);
    let html = fetch_text(fetcher, &request.path)
        .await
        .with_context(|| format!("Failed to load page {}", request.path))?;

    let assembler = Assembler::new(&site.config, fetcher);
    Ok(assembler.assemble(&request, &html).await)
}

/// Render one page to stdout or to `output`
pub async fn run(site: &Site, url: &str, output: Option<&Path>) -> Result<()> {
    let fetcher = site.fetcher();
    let page = assemble_url(site, &fetcher, url).await?;

    for failure in &page.failures {
        tracing::warn!("{:?} left unpopulated: {}", failure.initializer, failure.error);
    }

    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, page.document.html())?;
            tracing::info!("Wrote {:?}", path);
        }
        None => println!("{}", page.document),
    }

    Ok(())
}
