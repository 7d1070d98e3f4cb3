//! Rewrite relative image links in markdown sources

use anyhow::Result;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use crate::content::rewrite_image_links;
use crate::Site;

/// Rewrite one file; a `.bak` copy of the original is kept the first time
pub fn fix_file(site: &Site, path: &Path) -> Result<bool> {
    let original = fs::read_to_string(path)?;
    let rewritten = rewrite_image_links(&site.config, &original);
    if rewritten == original {
        return Ok(false);
    }

    let mut backup = path.as_os_str().to_owned();
    backup.push(".bak");
    let backup = Path::new(&backup);
    if !backup.exists() {
        fs::write(backup, &original)?;
    }
    fs::write(path, rewritten)?;
    Ok(true)
}

/// Fix every markdown file under the source directory
pub fn run(site: &Site) -> Result<usize> {
    let mut touched = 0;

    for entry in WalkDir::new(&site.source_dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if path.is_file() && is_markdown_file(path) && fix_file(site, path)? {
            touched += 1;
            let shown = path.strip_prefix(&site.source_dir).unwrap_or(path);
            println!("[fixed] {}", shown.display());
        }
    }

    tracing::info!("Updated {} file(s) under {:?}", touched, site.source_dir);
    Ok(touched)
}

fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .map(|ext| {
            let ext = ext.to_string_lossy().to_lowercase();
            ext == "md" || ext == "markdown"
        })
        .unwrap_or(false)
}
