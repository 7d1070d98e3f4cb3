//! Shared header and footer fragments
//!
//! Each fragment is loaded from an ordered list of candidate URLs and ends,
//! whatever happens, in a loaded state: when every candidate fails a
//! synthetic fragment built from the site configuration is used instead.
//!
//! ```text
//! NotLoaded -> Trying(primary) -> Loaded(Primary)
//!                              -> Trying(alternate) -> Loaded(Alternate)
//!                                                   -> Loaded(Fallback)
//! ```

use crate::config::SiteConfig;
use crate::dom::{ids, Document};
use crate::error::Error;
use crate::fetch::{fetch_text, Fetcher};
use crate::helpers::{asset_url, cache_bust, html_escape, link_to, with_query};

/// The two shared fragments of every page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartialKind {
    Header,
    Footer,
}

impl PartialKind {
    pub const ALL: [PartialKind; 2] = [PartialKind::Header, PartialKind::Footer];

    /// Id of the element the fragment is injected into
    pub fn mount(self) -> &'static str {
        match self {
            PartialKind::Header => ids::HEADER,
            PartialKind::Footer => ids::FOOTER,
        }
    }

    /// Site-relative path of the fragment file
    pub fn path(self, config: &SiteConfig) -> &str {
        match self {
            PartialKind::Header => &config.paths.header,
            PartialKind::Footer => &config.paths.footer,
        }
    }

    /// Inline fragment used when no candidate could be fetched
    pub fn fallback(self, config: &SiteConfig) -> String {
        match self {
            PartialKind::Header => {
                let menu: Vec<String> = config
                    .nav
                    .iter()
                    .map(|link| link_to(config, &link.path, &link.label))
                    .collect();
                format!(
                    r#"<div class="nav"><div class="title"><a href="{}" id="{}">{}</a></div><div class="menu">{}</div></div>"#,
                    asset_url(config, "/index.html"),
                    ids::SITE_TITLE,
                    html_escape(&config.title),
                    menu.join("")
                )
            }
            PartialKind::Footer => format!("<footer>© {}</footer>", html_escape(&config.title)),
        }
    }
}

/// Where a loaded fragment came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentOrigin {
    Primary,
    Alternate,
    Fallback,
}

/// A candidate source for a fragment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub origin: FragmentOrigin,
    pub path: String,
}

/// Loader state for one fragment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartialState {
    NotLoaded,
    Trying(Candidate),
    Loaded(FragmentOrigin),
}

/// The outcome of loading a fragment; always present
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedFragment {
    pub kind: PartialKind,
    pub html: String,
    pub origin: FragmentOrigin,
}

/// Same file name with the case of its first letter flipped (`header.html` -> `Header.html`)
pub fn alternate_case(path: &str) -> Option<String> {
    let (dir, name) = match path.rfind('/') {
        Some(pos) => path.split_at(pos + 1),
        None => ("", path),
    };
    let mut chars = name.chars();
    let first = chars.next()?;
    let flipped: String = if first.is_lowercase() {
        first.to_uppercase().collect()
    } else {
        first.to_lowercase().collect()
    };
    let alternate = format!("{}{}{}", dir, flipped, chars.as_str());
    (alternate != path).then_some(alternate)
}

/// Candidate paths for a fragment, in the order they are tried
pub fn candidates(kind: PartialKind, config: &SiteConfig) -> Vec<Candidate> {
    let primary = kind.path(config).to_string();
    let alternate = if config.alternate_case {
        alternate_case(&primary)
    } else {
        None
    };

    let mut list = vec![Candidate {
        origin: FragmentOrigin::Primary,
        path: primary,
    }];
    if let Some(path) = alternate {
        list.push(Candidate {
            origin: FragmentOrigin::Alternate,
            path,
        });
    }
    list
}

/// Loads fragments through a fetcher
pub struct PartialLoader<'a, F> {
    config: &'a SiteConfig,
    fetcher: &'a F,
}

impl<'a, F: Fetcher> PartialLoader<'a, F> {
    pub fn new(config: &'a SiteConfig, fetcher: &'a F) -> Self {
        Self { config, fetcher }
    }

    fn url(&self, path: &str) -> String {
        let url = asset_url(self.config, path);
        if self.config.cache_bust {
            with_query(&url, &cache_bust())
        } else {
            url
        }
    }

    /// Load one fragment, trying each candidate before falling back
    pub async fn load(&self, kind: PartialKind) -> LoadedFragment {
        let mut state = PartialState::NotLoaded;
        let mut failures: Vec<Error> = Vec::new();
        tracing::trace!("[{:?}] {:?}", kind, state);

        for candidate in candidates(kind, self.config) {
            let url = self.url(&candidate.path);
            let origin = candidate.origin;
            state = PartialState::Trying(candidate);
            tracing::debug!("[{:?}] {:?}", kind, state);

            match fetch_text(self.fetcher, &url).await {
                Ok(html) => {
                    state = PartialState::Loaded(origin);
                    tracing::debug!("[{:?}] {:?} from {}", kind, state, url);
                    return LoadedFragment { kind, html, origin };
                }
                Err(e) => failures.push(e),
            }
        }

        let messages: Vec<String> = failures.iter().map(|e| e.to_string()).collect();
        state = PartialState::Loaded(FragmentOrigin::Fallback);
        tracing::warn!(
            "[{:?}] {:?}, fallback rendered: {}",
            kind,
            state,
            messages.join("; ")
        );
        LoadedFragment {
            kind,
            html: kind.fallback(self.config),
            origin: FragmentOrigin::Fallback,
        }
    }

    /// Fill the header and footer mounts of a page
    ///
    /// Never fails. After the header is in place its `#siteTitle` (if any)
    /// is set to the title for `page_path`.
    pub async fn load_into(&self, doc: &mut Document, page_path: &str) -> Vec<LoadedFragment> {
        let mut loaded = Vec::new();
        for kind in PartialKind::ALL {
            if !doc.has(kind.mount()) {
                continue;
            }
            let fragment = self.load(kind).await;
            doc.set_inner_html(kind.mount(), &fragment.html);

            if kind == PartialKind::Header {
                doc.set_text(ids::SITE_TITLE, self.config.title_for(page_path));
            }
            loaded.push(fragment);
        }
        loaded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::memory::MemoryFetcher;
    use crate::fetch::Response;

    const PAGE: &str = r#"<body><div id="header"></div><main></main><div id="footer"></div></body>"#;

    fn test_config() -> SiteConfig {
        let mut config = SiteConfig::default();
        config.root = "/site".to_string();
        config
    }

    #[test]
    fn test_alternate_case() {
        assert_eq!(
            alternate_case("/assets/header.html").as_deref(),
            Some("/assets/Header.html")
        );
        assert_eq!(
            alternate_case("/assets/Footer.html").as_deref(),
            Some("/assets/footer.html")
        );
        assert_eq!(alternate_case("/assets/_nav.html"), None);
        assert_eq!(alternate_case("/assets/"), None);
    }

    #[test]
    fn test_candidates_order() {
        let mut config = test_config();
        let list = candidates(PartialKind::Header, &config);
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].origin, FragmentOrigin::Primary);
        assert_eq!(list[0].path, "/assets/header.html");
        assert_eq!(list[1].path, "/assets/Header.html");

        config.alternate_case = false;
        assert_eq!(candidates(PartialKind::Header, &config).len(), 1);
    }

    #[tokio::test]
    async fn test_primary_fragment() {
        let config = test_config();
        let fetcher = MemoryFetcher::new()
            .with("/site/assets/header.html", Response::ok("<nav>H</nav>"));
        let loader = PartialLoader::new(&config, &fetcher);

        let fragment = loader.load(PartialKind::Header).await;
        assert_eq!(fragment.origin, FragmentOrigin::Primary);
        assert_eq!(fragment.html, "<nav>H</nav>");

        let requests = fetcher.requests();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].starts_with("/site/assets/header.html?v="));
    }

    #[tokio::test]
    async fn test_alternate_case_fragment() {
        let config = test_config();
        let fetcher = MemoryFetcher::new()
            .with("/site/assets/Footer.html", Response::ok("<footer>F</footer>"));
        let loader = PartialLoader::new(&config, &fetcher);

        let fragment = loader.load(PartialKind::Footer).await;
        assert_eq!(fragment.origin, FragmentOrigin::Alternate);
        assert_eq!(fragment.html, "<footer>F</footer>");
        assert_eq!(fetcher.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_fallback_header_is_never_blank() {
        let config = test_config();
        let fetcher = MemoryFetcher::new()
            .with("/site/assets/header.html", Response::status(500));
        let loader = PartialLoader::new(&config, &fetcher);

        let mut doc = Document::parse(PAGE);
        let loaded = loader.load_into(&mut doc, "/site/blog.html").await;
        assert_eq!(loaded.len(), 2);
        assert!(loaded.iter().all(|f| f.origin == FragmentOrigin::Fallback));

        let header = doc.inner_html("header").unwrap();
        assert!(!header.is_empty());
        assert!(header.contains(r#"<a href="/site/index.html" id="siteTitle">Cinéma Vérité</a>"#));
        assert_eq!(header.matches("<a ").count(), 4);
        assert!(header.contains(r#"<a href="/site/about.html">소개</a>"#));
        assert!(header.contains(r#"<a href="/site/blog.html">일상</a>"#));
        assert!(header.contains(r#"<a href="/site/webgl.html">데모</a>"#));

        assert_eq!(
            doc.inner_html("footer").as_deref(),
            Some("<footer>© Cinéma Vérité</footer>")
        );
    }

    #[tokio::test]
    async fn test_site_title_override() {
        let mut config = test_config();
        config.home_title = Some("Home".to_string());
        let fetcher = MemoryFetcher::new().with(
            "/site/assets/header.html",
            Response::ok(r#"<a id="siteTitle">placeholder</a>"#),
        );
        let loader = PartialLoader::new(&config, &fetcher);

        let mut doc = Document::parse(PAGE);
        loader.load_into(&mut doc, "/site/about.html").await;
        assert_eq!(doc.inner_html("siteTitle").as_deref(), Some("Cinéma Vérité"));

        let mut doc = Document::parse(PAGE);
        loader.load_into(&mut doc, "/site/").await;
        assert_eq!(doc.inner_html("siteTitle").as_deref(), Some("Home"));
    }

    #[tokio::test]
    async fn test_missing_mounts_are_skipped() {
        let config = test_config();
        let fetcher = MemoryFetcher::new();
        let loader = PartialLoader::new(&config, &fetcher);

        let mut doc = Document::parse("<main>only</main>");
        let loaded = loader.load_into(&mut doc, "/site/").await;
        assert!(loaded.is_empty());
        assert!(fetcher.requests().is_empty());
        assert_eq!(doc.html(), "<main>only</main>");
    }
}
