//! URL helper functions

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::config::SiteConfig;

/// Characters left untouched in a query value
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Prefix a site-relative path with the deployment root
///
/// The path is not validated; a path without a leading `/` is glued on as is.
///
/// # Examples
/// ```ignore
/// asset_url(&config, "/assets/header.html") // -> "/my-repo/assets/header.html"
/// ```
pub fn asset_url(config: &SiteConfig, path: &str) -> String {
    format!("{}{}", config.root.trim_end_matches('/'), path)
}

/// Cache-busting query parameter for the current time
pub fn cache_bust() -> String {
    cache_bust_at(chrono::Utc::now().timestamp_millis())
}

/// Cache-busting query parameter for a given unix time in milliseconds
pub fn cache_bust_at(millis: i64) -> String {
    format!("v={}", millis)
}

/// Append a `key=value` query to a URL
pub fn with_query(url: &str, query: &str) -> String {
    if url.contains('?') {
        format!("{}&{}", url, query)
    } else {
        format!("{}?{}", url, query)
    }
}

/// Split a URL into its path and query string
pub fn split_url(url: &str) -> (&str, Option<&str>) {
    let url = url.split('#').next().unwrap_or(url);
    match url.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (url, None),
    }
}

/// Parse a query string into decoded key/value pairs, in order
pub fn parse_query(query: &str) -> Vec<(String, String)> {
    query
        .trim_start_matches('?')
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (decode_component(key), decode_component(value))
        })
        .collect()
}

fn decode_component(s: &str) -> String {
    let s = s.replace('+', " ");
    percent_decode_str(&s).decode_utf8_lossy().into_owned()
}

/// Encode a value for use inside a query string
pub fn encode_query_value(value: &str) -> String {
    utf8_percent_encode(value, QUERY_VALUE).to_string()
}

/// Whether `path` addresses the site root page
pub fn is_site_root(config: &SiteConfig, path: &str) -> bool {
    let (path, _) = split_url(path);
    let root = config.root.trim_end_matches('/');
    match path.strip_prefix(root) {
        Some(rest) => rest.is_empty() || rest == "/" || rest == "/index.html",
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> SiteConfig {
        let mut config = SiteConfig::default();
        config.root = "/gegu/".to_string();
        config
    }

    #[test]
    fn test_asset_url() {
        let config = test_config();
        assert_eq!(
            asset_url(&config, "/assets/header.html"),
            "/gegu/assets/header.html"
        );
        // no leading slash, no repair
        assert_eq!(asset_url(&config, "posts.json"), "/geguposts.json");
        assert_eq!(
            asset_url(&SiteConfig::default(), "/posts/posts.json"),
            "/posts/posts.json"
        );
    }

    #[test]
    fn test_cache_bust() {
        assert_eq!(cache_bust_at(1700000000000), "v=1700000000000");
        assert!(cache_bust().starts_with("v="));
        assert_eq!(
            with_query("/assets/header.html", "v=1"),
            "/assets/header.html?v=1"
        );
        assert_eq!(with_query("/x?a=b", "v=1"), "/x?a=b&v=1");
    }

    #[test]
    fn test_parse_query() {
        let pairs = parse_query("slug=hello%20world&x=a+b&flag");
        assert_eq!(
            pairs,
            vec![
                ("slug".to_string(), "hello world".to_string()),
                ("x".to_string(), "a b".to_string()),
                ("flag".to_string(), String::new()),
            ]
        );
        assert!(parse_query("").is_empty());
    }

    #[test]
    fn test_split_url() {
        assert_eq!(
            split_url("/post.html?slug=a#top"),
            ("/post.html", Some("slug=a"))
        );
        assert_eq!(split_url("/blog.html"), ("/blog.html", None));
    }

    #[test]
    fn test_encode_query_value() {
        assert_eq!(encode_query_value("my-first_post.v2"), "my-first_post.v2");
        assert_eq!(encode_query_value("a b&c"), "a%20b%26c");
    }

    #[test]
    fn test_is_site_root() {
        let config = test_config();
        assert!(is_site_root(&config, "/gegu"));
        assert!(is_site_root(&config, "/gegu/"));
        assert!(is_site_root(&config, "/gegu/index.html?x=1"));
        assert!(!is_site_root(&config, "/gegu/blog.html"));
        assert!(!is_site_root(&config, "/other/"));
        assert!(is_site_root(&SiteConfig::default(), "/"));
    }
}
