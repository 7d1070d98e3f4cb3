//! Preview server assembling pages on request

use anyhow::Result;
use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::commands::render::assemble_url;
use crate::fetch::SiteFetcher;
use crate::helpers::is_site_root;
use crate::Site;

/// Server state
struct ServerState {
    site: Site,
    fetcher: SiteFetcher,
}

/// Start the preview server
pub async fn start(site: &Site, ip: &str, port: u16, open: bool) -> Result<()> {
    let state = Arc::new(ServerState {
        site: site.clone(),
        fetcher: site.fetcher(),
    });

    let app = router(state);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    let root = site.config.root.trim_end_matches('/');
    let url = format!("http://{}:{}{}/", ip, port, root);
    println!("Server running at {}", url);
    println!("Press Ctrl+C to stop.");

    if open {
        if let Err(e) = open_browser(&url) {
            tracing::warn!("Failed to open browser: {}", e);
        }
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn router(state: Arc<ServerState>) -> Router {
    Router::new()
        .fallback(fallback_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Assemble HTML pages, serve everything else from the source directory
async fn fallback_handler(
    State(state): State<Arc<ServerState>>,
    mut request: Request<Body>,
) -> Response {
    let path = request.uri().path().to_string();

    if is_page_path(&path) || is_site_root(&state.site.config, &path) {
        let url = request
            .uri()
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .unwrap_or(path);

        return match assemble_url(&state.site, &state.fetcher, &url).await {
            Ok(page) => {
                for failure in &page.failures {
                    tracing::warn!("{:?} on {}: {}", failure.initializer, url, failure.error);
                }
                Html(page.document.into_html()).into_response()
            }
            Err(e) => {
                tracing::debug!("{:#}", e);
                (StatusCode::NOT_FOUND, "Not found").into_response()
            }
        };
    }

    let Some(stripped) = strip_root(&state.site.config.root, &path) else {
        return (StatusCode::NOT_FOUND, "Not found").into_response();
    };
    let rewritten = match request.uri().query() {
        Some(query) => format!("{}?{}", stripped, query),
        None => stripped,
    };
    match rewritten.parse::<Uri>() {
        Ok(uri) => *request.uri_mut() = uri,
        Err(_) => return (StatusCode::BAD_REQUEST, "Bad request").into_response(),
    }

    let mut service = ServeDir::new(&state.site.source_dir);
    match service.try_call(request).await {
        Ok(response) => response.into_response(),
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response(),
    }
}

/// Whether a request path names a page to assemble
fn is_page_path(path: &str) -> bool {
    path.ends_with('/') || path.ends_with(".html") || path.ends_with(".htm")
}

/// Request path with the deployment root removed
fn strip_root(root: &str, path: &str) -> Option<String> {
    let root = root.trim_end_matches('/');
    let rest = path.strip_prefix(root)?;
    if rest.is_empty() {
        Some("/".to_string())
    } else if rest.starts_with('/') {
        Some(rest.to_string())
    } else {
        None
    }
}

/// Open a URL in the default browser
fn open_browser(url: &str) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open").arg(url).spawn()?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open").arg(url).spawn()?;
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/c", "start", url])
            .spawn()?;
    }

    Ok(())
}
