//! List site content

use anyhow::Result;

use crate::content::{PostSummary, WebglEntry};
use crate::fetch::{fetch_json, Fetcher};
use crate::helpers::asset_url;
use crate::Site;

/// Lines describing the content of one index
pub async fn lines<F: Fetcher>(site: &Site, fetcher: &F, content_type: &str) -> Result<Vec<String>> {
    let config = &site.config;
    let mut out = Vec::new();

    match content_type {
        "post" | "posts" => {
            let url = asset_url(config, &config.paths.posts_index);
            let posts: Vec<PostSummary> = fetch_json(fetcher, &url).await?;
            out.push(format!("Posts ({}):", posts.len()));
            for post in posts {
                out.push(format!("  {} [{}]", post.title, post.slug));
            }
        }
        "webgl" | "demo" | "demos" => {
            let url = asset_url(config, &config.paths.webgl_index);
            let entries: Vec<WebglEntry> = fetch_json(fetcher, &url).await?;
            out.push(format!("Demos ({}):", entries.len()));
            for entry in entries {
                out.push(format!("  {} - {} [{}]", entry.title, entry.description, entry.href()));
            }
        }
        _ => {
            anyhow::bail!("Unknown type: {}. Available: post, webgl", content_type);
        }
    }

    Ok(out)
}

/// List site content by type
pub async fn run(site: &Site, content_type: &str) -> Result<()> {
    let fetcher = site.fetcher();
    for line in lines(site, &fetcher, content_type).await? {
        println!("{}", line);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::fetch::memory::MemoryFetcher;
    use crate::fetch::Response;

    fn fetcher() -> MemoryFetcher {
        MemoryFetcher::new()
            .with(
                "/posts/posts.json",
                Response::ok(r#"[{"slug":"a","title":"Alpha"}]"#),
            )
            .with(
                "/webgl/list.json",
                Response::ok(r#"[{"title":"Cube","description":"spins","path":"demos/cube"}]"#),
            )
    }

    #[tokio::test]
    async fn test_list_posts_and_demos() {
        let site = Site::with_config(".", SiteConfig::default());
        let fetcher = fetcher();

        let posts = lines(&site, &fetcher, "posts").await.unwrap();
        assert_eq!(posts, vec!["Posts (1):", "  Alpha [a]"]);

        let demos = lines(&site, &fetcher, "webgl").await.unwrap();
        assert_eq!(demos, vec!["Demos (1):", "  Cube - spins [demos/cube/index.html]"]);
    }

    #[tokio::test]
    async fn test_unknown_type() {
        let site = Site::with_config(".", SiteConfig::default());
        assert!(lines(&site, &fetcher(), "tags").await.is_err());
    }
}
