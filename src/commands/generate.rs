//! Assemble every page of the site into the public directory

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::content::PostSummary;
use crate::fetch::{fetch_json, Fetcher};
use crate::helpers::{asset_url, encode_query_value};
use crate::pages::{AssembledPage, Assembler, PageRequest};
use crate::partials::PartialKind;
use crate::Site;

/// Summary of a generate run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GenerateReport {
    pub pages: usize,
    pub copied: usize,
    pub expanded_posts: usize,
    pub failures: usize,
}

/// Generate the site with the configured fetcher
pub async fn run(site: &Site) -> Result<()> {
    let fetcher = site.fetcher();
    run_with(site, &fetcher).await?;
    Ok(())
}

/// Generate the site, reading fragments and indexes through `fetcher`
pub async fn run_with<F: Fetcher>(site: &Site, fetcher: &F) -> Result<GenerateReport> {
    let start = std::time::Instant::now();
    if !site.source_dir.exists() {
        anyhow::bail!("Source directory {:?} does not exist", site.source_dir);
    }
    fs::create_dir_all(&site.public_dir)?;

    let assembler = Assembler::new(&site.config, fetcher);
    let mut report = GenerateReport::default();

    for entry in WalkDir::new(&site.source_dir)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| !is_hidden(e.path()))
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let relative = path.strip_prefix(&site.source_dir)?;
        let target = site.public_dir.join(relative);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }

        if !is_html_file(path) || is_fragment(site, relative) {
            fs::copy(path, &target)?;
            report.copied += 1;
            continue;
        }

        let html = fs::read_to_string(path)?;
        let url = asset_url(&site.config, &format!("/{}", url_path(relative)));
        let page = assembler.assemble(&PageRequest::parse(&url), &html).await;
        write_page(&target, &page, &mut report)?;
        report.pages += 1;

        if site.config.expand_posts && is_post_page(site, relative) {
            expand_posts(site, &assembler, fetcher, &url, &html, &target, &mut report).await?;
        }
    }

    tracing::info!(
        "Assembled {} pages ({} posts expanded), copied {} files in {:.2}s",
        report.pages,
        report.expanded_posts,
        report.copied,
        start.elapsed().as_secs_f64()
    );
    if report.failures > 0 {
        tracing::warn!("{} page regions could not be filled", report.failures);
    }

    Ok(report)
}

/// One assembled copy of the post page per slug, as `post/<slug>.html`
async fn expand_posts<F: Fetcher>(
    site: &Site,
    assembler: &Assembler<'_, F>,
    fetcher: &F,
    page_url: &str,
    html: &str,
    target: &Path,
    report: &mut GenerateReport,
) -> Result<()> {
    let index_url = asset_url(&site.config, &site.config.paths.posts_index);
    let posts: Vec<PostSummary> = match fetch_json(fetcher, &index_url).await {
        Ok(posts) => posts,
        Err(e) => {
            tracing::warn!("Cannot expand posts: {}", e);
            return Ok(());
        }
    };

    let dir = target
        .parent()
        .map(|p| p.join("post"))
        .unwrap_or_else(|| PathBuf::from("post"));

    for post in &posts {
        if !is_safe_file_stem(&post.slug) {
            tracing::warn!("Skipping post with unusable slug {:?}", post.slug);
            continue;
        }
        let url = format!("{}?slug={}", page_url, encode_query_value(&post.slug));
        let page = assembler.assemble(&PageRequest::parse(&url), html).await;
        fs::create_dir_all(&dir)?;
        write_page(&dir.join(format!("{}.html", post.slug)), &page, report)?;
        report.expanded_posts += 1;
    }

    Ok(())
}

fn write_page(target: &Path, page: &AssembledPage, report: &mut GenerateReport) -> Result<()> {
    fs::write(target, page.document.html())?;
    tracing::debug!("Wrote {:?}", target);
    report.failures += page.failures.len();
    Ok(())
}

fn url_path(relative: &Path) -> String {
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Header and footer files, in either letter case, are not pages
fn is_fragment(site: &Site, relative: &Path) -> bool {
    let path = url_path(relative);
    PartialKind::ALL.iter().any(|kind| {
        kind.path(&site.config)
            .trim_start_matches('/')
            .eq_ignore_ascii_case(&path)
    })
}

fn is_post_page(site: &Site, relative: &Path) -> bool {
    url_path(relative) == site.config.paths.post_page.trim_start_matches('/')
}

fn is_html_file(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext == "html" || ext == "htm")
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy().starts_with('.'))
        .unwrap_or(false)
}

fn is_safe_file_stem(slug: &str) -> bool {
    !slug.is_empty()
        && slug != "."
        && slug != ".."
        && !slug.contains(['/', '\\'])
}
